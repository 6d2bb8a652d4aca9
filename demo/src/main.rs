//! RxGuard prescribing safety engine demo CLI
//!
//! Drives the engine crates over the built-in demo dataset. Nothing is
//! persisted and no provider is contacted.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- interactions --drug Warfarin --drug Aspirin
//!   cargo run -p demo -- metrics --org org-1
//!   cargo run -p demo -- doctors --org org-1
//!   cargo run -p demo -- keys
//!   cargo run -p demo -- --seed 42 health-check
//!   cargo run -p demo -- --json dashboard --user user-admin-1

use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rxguard_app::{mock_data, Dashboard, EngineConfig, Runtime, Session};
use rxguard_contracts::{
    credential::ApiKeyCredential,
    medication::Medication,
    prescription::{PrescriptionDraft, PrescriptionStatus},
    review::RiskAssessment,
};
use rxguard_core::{
    traits::{SafetyReviewer, SystemClock},
    Command as EngineCommand,
};
use rxguard_keys::{active_key, healthy_count, primary_key};
use rxguard_metrics::{daily_metrics, doctor_activity, headline};

type CliResult<T> = Result<T, Box<dyn Error>>;

// ── CLI definition ────────────────────────────────────────────────────────────

/// RxGuard: prescription safety review, activity metrics, and AI key pool
/// health over a fictional clinic dataset.
#[derive(Parser)]
#[command(
    name = "rxguard-demo",
    about = "RxGuard prescribing safety engine demo",
    long_about = "Runs the RxGuard engine over the built-in demo dataset: interaction\n\
                  checks, risk scoring, activity metrics, key-pool health, and role dashboards."
)]
struct Cli {
    /// Engine config TOML. Defaults reproduce the built-in constants.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the simulated health checks. Overrides the config file.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a medication list against the interaction table.
    Interactions {
        /// Drug name; repeat for each medication.
        #[arg(long = "drug", required = true)]
        drugs: Vec<String>,
    },
    /// Daily prescription totals and flagged counts.
    Metrics {
        /// Restrict to one organization.
        #[arg(long)]
        org: Option<String>,
    },
    /// Per-doctor prescription activity.
    Doctors {
        #[arg(long)]
        org: Option<String>,
    },
    /// Show the key pool and which key would serve requests.
    Keys,
    /// Run one simulated health check across the key pool.
    HealthCheck,
    /// Build the dashboard a directory user would see.
    Dashboard {
        /// User id, e.g. user-admin-1 or user-doc-1.
        #[arg(long)]
        user: String,
    },
    /// Walk through a full session: review, compose, metrics, health check.
    RunAll,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let out = Output { json: cli.json };
    info!(config = ?cli.config, seed = ?config.seed, json = out.json, "demo starting");

    if !out.json {
        print_banner();
    }

    match cli.command {
        Command::Interactions { drugs } => run_interactions(&config, &out, &drugs),
        Command::Metrics { org } => run_metrics(&config, &out, org.as_deref()),
        Command::Doctors { org } => run_doctors(&config, &out, org.as_deref()),
        Command::Keys => run_keys(&config, &out),
        Command::HealthCheck => run_health_check(&config, &out),
        Command::Dashboard { user } => run_dashboard(&config, &out, &user),
        Command::RunAll => run_all(&config, &out),
    }
}

fn runtime(config: &EngineConfig) -> CliResult<Runtime> {
    let state = mock_data::demo_state(Utc::now())?;
    Ok(Runtime::new(config, state, Box::new(SystemClock))?)
}

// ── Output ────────────────────────────────────────────────────────────────────

struct Output {
    json: bool,
}

impl Output {
    /// Print `value` as JSON, or run `text` to print it for humans.
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T)) -> CliResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text(value);
        }
        Ok(())
    }

    /// A text-mode heading. Suppressed under `--json`.
    fn step(&self, heading: &str) {
        if !self.json {
            println!("{}", heading);
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_interactions(config: &EngineConfig, out: &Output, drugs: &[String]) -> CliResult<()> {
    let engine = config.safety_engine()?;
    let medications: Vec<Medication> = drugs
        .iter()
        .map(|d| Medication::new(d.as_str(), "", "", ""))
        .collect();
    let assessment = engine.review(&medications);
    out.emit(&assessment, print_assessment)
}

fn run_metrics(config: &EngineConfig, out: &Output, org: Option<&str>) -> CliResult<()> {
    let rt = runtime(config)?;
    let points = daily_metrics(&rt.state().prescriptions, org);
    out.emit(&points, |points| {
        println!("Daily activity ({})", org.unwrap_or("all organizations"));
        for p in points {
            println!(
                "  {}  total {:>3}  flagged {:>3}",
                p.date, p.total_prescriptions, p.flagged_prescriptions
            );
        }
        let h = headline(&rt.state().prescriptions, org);
        println!(
            "  headline: {} total, {} pending, {} flagged, {} approved, {} rejected",
            h.total, h.pending, h.flagged, h.approved, h.rejected
        );
        println!();
    })
}

fn run_doctors(config: &EngineConfig, out: &Output, org: Option<&str>) -> CliResult<()> {
    let rt = runtime(config)?;
    let state = rt.state();
    let mut stats = doctor_activity(&state.prescriptions, &state.doctors, org);
    stats.sort_by(|a, b| a.doctor_id.cmp(&b.doctor_id));
    out.emit(&stats, |stats| {
        println!("Doctor activity ({})", org.unwrap_or("all organizations"));
        for s in stats {
            println!(
                "  {:<8} total {:>3}  flagged {:>3}",
                s.doctor_id, s.total_prescriptions, s.flagged_prescriptions
            );
        }
        println!();
    })
}

fn run_keys(config: &EngineConfig, out: &Output) -> CliResult<()> {
    let rt = runtime(config)?;
    out.emit(&rt.state().api_keys, |pool| print_pool(pool))
}

fn run_health_check(config: &EngineConfig, out: &Output) -> CliResult<()> {
    let mut rt = runtime(config)?;
    let state = rt.apply(EngineCommand::RunHealthCheck)?;
    out.emit(&state.api_keys, |pool| print_pool(pool))
}

fn run_dashboard(config: &EngineConfig, out: &Output, user_id: &str) -> CliResult<()> {
    let rt = runtime(config)?;
    let mut session = Session::default();
    let user = session.login_as(&rt.state().users, user_id)?.clone();
    let dashboard = Dashboard::build(rt.state(), &user)?;
    out.emit(&dashboard, |d| print_dashboard(&user.name, d))
}

fn run_all(config: &EngineConfig, out: &Output) -> CliResult<()> {
    let mut rt = runtime(config)?;

    out.step("[1] Composing a prescription for Warfarin + Aspirin");
    let draft = PrescriptionDraft {
        patient_name: "Ahmed Hassan".to_string(),
        age: 63,
        diagnosis: "Atrial fibrillation with joint pain".to_string(),
        medications: vec![
            Medication::new("Warfarin", "5 mg", "once daily", "30 days"),
            Medication::new("Aspirin", "81 mg", "once daily", "30 days"),
        ],
        assigned_doctor_id: "doc-1".to_string(),
        organization_id: "org-1".to_string(),
        patient_instructions_en: None,
        patient_instructions_ar: None,
    };
    let state = rt.apply(EngineCommand::ComposePrescription { draft })?;
    let composed = state
        .prescriptions
        .last()
        .ok_or("compose produced no prescription")?;
    let composed_id = composed.id.clone();
    out.emit(composed, |rx| {
        println!(
            "    {} -> {} (risk {}%, {:?})",
            rx.id,
            rx.status,
            rx.ai_risk_score.percent(),
            rx.ai_risk_score.level()
        );
        for flag in &rx.ai_flags {
            println!("    ! {}", flag);
        }
        println!();
    })?;

    out.step("[2] Doctor approves after review");
    rt.apply(EngineCommand::UpdatePrescriptionStatus {
        id: composed_id,
        status: PrescriptionStatus::Approved,
    })?;
    let h = headline(&rt.state().prescriptions, None);
    out.emit(&h, |h| {
        println!(
            "    {} total, {} flagged ({}%)",
            h.total,
            h.flagged,
            h.flagged_percent().unwrap_or(0)
        );
        println!();
    })?;

    out.step("[3] Health check across the key pool");
    let state = rt.apply(EngineCommand::RunHealthCheck)?;
    out.emit(&state.api_keys, |pool| print_pool(pool))?;

    out.step("[4] Journal integrity");
    let export = rt.journal().export()?;
    let intact = rt.journal().verify_integrity();
    out.emit(&export, |export| {
        for entry in &export.entries {
            println!(
                "    #{} {:<28} {}",
                entry.sequence, entry.record.command_kind, entry.record.summary
            );
        }
        println!("    chain intact: {}", intact);
        println!();
    })?;

    if !intact {
        return Err("journal chain failed verification".into());
    }
    if !out.json {
        println!("Session walkthrough completed successfully.");
    }
    Ok(())
}

// ── Text rendering ────────────────────────────────────────────────────────────

fn print_assessment(a: &RiskAssessment) {
    println!(
        "Risk score: {:.2} ({}%, {:?})",
        a.score.value(),
        a.score.percent(),
        a.score.level()
    );
    for rule in &a.interactions {
        println!("  [{:?}] {} + {}", rule.severity, rule.drug_a, rule.drug_b);
    }
    for flag in &a.flags {
        println!("  ! {}", flag);
    }
    println!("  {}", a.summary);
    println!();
}

fn print_pool(pool: &[ApiKeyCredential]) {
    for k in pool {
        let marker = if k.is_primary { "*" } else { " " };
        println!(
            "  {} {:<8} {:<22} {}  {:<9} success {:.2}  error {:.2}",
            marker,
            k.id,
            k.label,
            k.key_masked,
            k.status,
            k.success_rate,
            k.error_rate
        );
    }
    println!(
        "  primary: {}  serving: {}  healthy: {}/{}",
        primary_key(pool).map(|k| k.id.as_str()).unwrap_or("none"),
        active_key(pool).map(|k| k.id.as_str()).unwrap_or("none"),
        healthy_count(pool),
        pool.len()
    );
    println!();
}

fn print_dashboard(user_name: &str, dashboard: &Dashboard) {
    println!("Dashboard for {}", user_name);
    match dashboard {
        Dashboard::Admin(d) => {
            println!(
                "  {} prescriptions, {} flagged, {} users, {} doctors, {} organizations",
                d.headline.total, d.headline.flagged, d.user_count, d.doctor_count, d.organization_count
            );
            println!(
                "  keys: {} ({} healthy), serving: {}, auto-rotation: {}",
                d.key_count,
                d.healthy_keys,
                d.active_key.as_ref().map(|k| k.id.as_str()).unwrap_or("none"),
                d.auto_rotation_enabled
            );
        }
        Dashboard::Doctor(d) => {
            println!(
                "  queue: {} pending, {} flagged, {} approved",
                d.headline.pending, d.headline.flagged, d.headline.approved
            );
            for rx in &d.queue {
                println!("  {:<6} {:<18} {}", rx.id, rx.patient_name, rx.status);
            }
        }
        Dashboard::Org(d) => {
            println!(
                "  {} ({} doctors): {} prescriptions, {} flagged",
                d.organization.name, d.doctor_count, d.headline.total, d.headline.flagged
            );
            for row in &d.doctors {
                println!(
                    "  {:<22} total {:>3}  flagged {:>3}",
                    row.doctor_name, row.total_prescriptions, row.flagged_prescriptions
                );
            }
        }
        Dashboard::Patient(p) => {
            for rx in &p.prescriptions {
                println!("  {} {} ({})", rx.id, rx.diagnosis, rx.status);
                if let Some(text) = &rx.patient_instructions_en {
                    println!("    {}", text);
                }
            }
        }
        Dashboard::NoDashboard { user_role } => {
            println!("  no dashboard for role {:?}", user_role);
        }
    }
    println!();
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("RxGuard Prescribing Safety Engine");
    println!("Demo dataset (fictional, not clinical guidance)");
    println!("=================================");
    println!();
}
