//! Demo dataset for the RxGuard reference application.
//!
//! All records are hardcoded and fictional. Timestamps are expressed as
//! "days before `now`" so dashboards always show recent activity.

use chrono::{DateTime, Duration, Utc};

use rxguard_contracts::{
    credential::{ApiKeyCredential, ApiKeyStatus, Provider},
    directory::{Doctor, Organization, OrganizationKind, Role, User},
    error::RxResult,
    medication::Medication,
    prescription::{Prescription, PrescriptionStatus, RiskScore},
};
use rxguard_core::AppState;

/// Build the full demo snapshot relative to `now`.
pub fn demo_state(now: DateTime<Utc>) -> RxResult<AppState> {
    Ok(AppState {
        users: users(),
        organizations: organizations(),
        doctors: doctors(),
        prescriptions: prescriptions(now)?,
        api_keys: api_keys(now),
        auto_rotation_enabled: true,
    })
}

// ── Directory ─────────────────────────────────────────────────────────────────

fn user(id: &str, name: &str, email: &str, role: Role, org: Option<&str>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        organization_id: org.map(str::to_string),
    }
}

pub fn users() -> Vec<User> {
    vec![
        user("user-admin-1", "Platform Admin", "admin@rxguard.example", Role::Admin, None),
        user("user-org-1", "CityCare Admin", "org-admin@citycareclinic.example", Role::Org, Some("org-1")),
        user("user-org-2", "Metro General Admin", "org-admin@metrogeneral.example", Role::Org, Some("org-2")),
        user("user-doc-1", "Dr. Emily Carter", "emily.carter@citycareclinic.example", Role::Doctor, Some("org-1")),
        user("user-doc-2", "Dr. Miguel Alvarez", "miguel.alvarez@citycareclinic.example", Role::Doctor, Some("org-1")),
        user("user-doc-3", "Dr. Sophia Nguyen", "sophia.nguyen@metrogeneral.example", Role::Doctor, Some("org-2")),
        user("user-patient-1", "Maria Rodriguez", "maria.rodriguez@mail.example", Role::Patient, None),
    ]
}

pub fn organizations() -> Vec<Organization> {
    vec![
        Organization {
            id: "org-1".to_string(),
            name: "CityCare Clinic".to_string(),
            kind: OrganizationKind::Clinic,
            address: "123 Health Way, Springfield".to_string(),
            contact_email: "admin@citycareclinic.example".to_string(),
        },
        Organization {
            id: "org-2".to_string(),
            name: "Metro General Hospital".to_string(),
            kind: OrganizationKind::Hospital,
            address: "500 Metro Ave, Capital City".to_string(),
            contact_email: "info@metrogeneral.example".to_string(),
        },
    ]
}

pub fn doctors() -> Vec<Doctor> {
    [
        ("doc-1", "user-doc-1", "Internal Medicine", "IM-123456"),
        ("doc-2", "user-doc-2", "Cardiology", "CD-654321"),
        ("doc-3", "user-doc-3", "Pediatrics", "PD-112233"),
    ]
    .into_iter()
    .map(|(id, user_id, specialty, license)| Doctor {
        id: id.to_string(),
        user_id: user_id.to_string(),
        specialty: specialty.to_string(),
        license_number: license.to_string(),
    })
    .collect()
}

// ── Prescriptions ─────────────────────────────────────────────────────────────

struct Seed {
    id: &'static str,
    patient: &'static str,
    age: u32,
    diagnosis: &'static str,
    medications: Vec<Medication>,
    status: PrescriptionStatus,
    doctor: &'static str,
    org: &'static str,
    summary: &'static str,
    risk: f64,
    flags: &'static [&'static str],
    created_days_ago: i64,
    updated_days_ago: i64,
    instructions_en: &'static str,
    instructions_ar: Option<&'static str>,
}

impl Seed {
    fn build(self, now: DateTime<Utc>) -> RxResult<Prescription> {
        Ok(Prescription {
            id: self.id.to_string(),
            patient_name: self.patient.to_string(),
            age: self.age,
            diagnosis: self.diagnosis.to_string(),
            medications: self.medications,
            status: self.status,
            assigned_doctor_id: self.doctor.to_string(),
            organization_id: self.org.to_string(),
            ai_review_summary: self.summary.to_string(),
            ai_risk_score: RiskScore::new(self.risk)?,
            ai_flags: self.flags.iter().map(|f| f.to_string()).collect(),
            created_at: now - Duration::days(self.created_days_ago),
            updated_at: now - Duration::days(self.updated_days_ago),
            patient_instructions_en: Some(self.instructions_en.to_string()),
            patient_instructions_ar: self.instructions_ar.map(str::to_string),
        })
    }
}

pub fn prescriptions(now: DateTime<Utc>) -> RxResult<Vec<Prescription>> {
    use PrescriptionStatus::*;

    let seeds = vec![
        Seed {
            id: "rx-1",
            patient: "John Doe",
            age: 54,
            diagnosis: "Hypertension",
            medications: vec![Medication::new("Lisinopril", "10 mg", "once daily", "30 days")],
            status: Pending,
            doctor: "doc-1",
            org: "org-1",
            summary: "No major interactions detected. Monitor blood pressure weekly. Consider renal function testing in 2 weeks.",
            risk: 0.18,
            flags: &["Recommend baseline renal function tests"],
            created_days_ago: 1,
            updated_days_ago: 1,
            instructions_en: "Take Lisinopril once daily at the same time each morning. Monitor your blood pressure at home twice per week and report dizziness or fainting.",
            instructions_ar: Some("تناول عقار ليسينوبريل مرة واحدة يومياً في نفس التوقيت صباحاً. راقب ضغط الدم في المنزل مرتين أسبوعياً وأبلغ الطبيب عند حدوث دوخة أو إغماء."),
        },
        Seed {
            id: "rx-2",
            patient: "Maria Rodriguez",
            age: 67,
            diagnosis: "Atrial fibrillation",
            medications: vec![
                Medication::new("Warfarin", "5 mg", "once daily", "30 days"),
                Medication::new("Aspirin", "81 mg", "once daily", "30 days"),
            ],
            status: Flagged,
            doctor: "doc-2",
            org: "org-1",
            summary: "Potential increased bleeding risk with concurrent Warfarin and Aspirin. Review indication for dual therapy.",
            risk: 0.82,
            flags: &["High bleeding risk", "Check INR and review concurrent aspirin use"],
            created_days_ago: 2,
            updated_days_ago: 0,
            instructions_en: "Take Warfarin and Aspirin exactly as prescribed. Watch for signs of bleeding such as black stools, nosebleeds, or unusual bruising and seek urgent care if they occur.",
            instructions_ar: Some("تناول الوارفارين والأسبرين تماماً كما وصف الطبيب. انتبه لعلامات النزيف مثل البراز الأسود أو نزيف الأنف أو الكدمات غير العادية، واطلب الرعاية الطبية فوراً إذا ظهرت."),
        },
        Seed {
            id: "rx-3",
            patient: "Liam Smith",
            age: 8,
            diagnosis: "Acute otitis media",
            medications: vec![Medication::new("Amoxicillin", "45 mg/kg/day", "twice daily", "7 days")],
            status: Approved,
            doctor: "doc-3",
            org: "org-2",
            summary: "Weight-based dosing within recommended pediatric range. Ensure adherence and schedule follow-up if no improvement.",
            risk: 0.12,
            flags: &["Confirm weight and allergy history"],
            created_days_ago: 3,
            updated_days_ago: 2,
            instructions_en: "Give Amoxicillin twice daily after food for 7 days. Complete the full course even if symptoms improve and contact your doctor if fever persists more than 48 hours.",
            instructions_ar: Some("أعطِ الأموكسيسيلين مرتين يومياً بعد الطعام لمدة 7 أيام. أكمل الجرعة كاملة حتى لو تحسنت الأعراض، وتواصل مع الطبيب إذا استمرت الحرارة لأكثر من 48 ساعة."),
        },
        Seed {
            id: "rx-4",
            patient: "Evelyn Johnson",
            age: 45,
            diagnosis: "Type 2 diabetes",
            medications: vec![
                Medication::new("Metformin", "500 mg", "twice daily", "90 days"),
                Medication::new("Empagliflozin", "10 mg", "once daily", "90 days"),
            ],
            status: Pending,
            doctor: "doc-1",
            org: "org-1",
            summary: "Combination appropriate for glycemic control and cardiovascular risk reduction. Monitor renal function and volume status.",
            risk: 0.3,
            flags: &["Monitor eGFR every 3-6 months"],
            created_days_ago: 0,
            updated_days_ago: 0,
            instructions_en: "Take Metformin with meals and Empagliflozin once daily. Drink adequate fluids and contact your doctor if you develop nausea, vomiting, or reduced urine output.",
            instructions_ar: None,
        },
        Seed {
            id: "rx-5",
            patient: "Noah Wilson",
            age: 36,
            diagnosis: "Major depressive disorder",
            medications: vec![Medication::new("Sertraline", "50 mg", "once daily", "60 days")],
            status: Approved,
            doctor: "doc-2",
            org: "org-1",
            summary: "Initial SSRI dosing is within standard range. Assess for suicidality at follow-up and monitor for side effects.",
            risk: 0.25,
            flags: &["Schedule follow-up within 2 weeks"],
            created_days_ago: 4,
            updated_days_ago: 3,
            instructions_en: "Take Sertraline once daily, preferably in the morning. Do not stop suddenly and contact your doctor urgently if you notice worsening mood or suicidal thoughts.",
            instructions_ar: None,
        },
        Seed {
            id: "rx-6",
            patient: "Olivia Martinez",
            age: 72,
            diagnosis: "Chronic kidney disease stage 3",
            medications: vec![Medication::new("Ibuprofen", "400 mg", "three times daily", "10 days")],
            status: Flagged,
            doctor: "doc-3",
            org: "org-2",
            summary: "NSAID use in CKD stage 3 may worsen renal function. Consider alternative analgesia and review indication.",
            risk: 0.9,
            flags: &["Avoid NSAIDs in CKD", "Review alternative pain management options"],
            created_days_ago: 1,
            updated_days_ago: 1,
            instructions_en: "Avoid other painkillers containing ibuprofen or similar drugs. Contact your doctor if you notice ankle swelling, shortness of breath, or decreased urine.",
            instructions_ar: None,
        },
    ];

    seeds.into_iter().map(|s| s.build(now)).collect()
}

// ── Key pool ──────────────────────────────────────────────────────────────────

pub fn api_keys(now: DateTime<Utc>) -> Vec<ApiKeyCredential> {
    let key = |id: &str,
               label: &str,
               provider: Provider,
               masked: &str,
               status: ApiKeyStatus,
               success: f64,
               error: f64,
               primary: bool| ApiKeyCredential {
        id: id.to_string(),
        label: label.to_string(),
        provider,
        key_masked: masked.to_string(),
        status,
        success_rate: success,
        error_rate: error,
        last_checked_at: Some(now),
        is_primary: primary,
    };
    vec![
        key("key-1", "Primary OpenAI Key", Provider::OpenAi, "************A1B2", ApiKeyStatus::Active, 0.99, 0.01, true),
        key("key-2", "Backup OpenAI Key", Provider::OpenAi, "************C3D4", ApiKeyStatus::Degraded, 0.92, 0.08, false),
        key("key-3", "Legacy Azure Key", Provider::Azure, "************E5F6", ApiKeyStatus::Down, 0.0, 1.0, false),
    ]
}
