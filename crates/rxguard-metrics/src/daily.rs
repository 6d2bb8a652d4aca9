//! Daily time-series aggregation.
//!
//! Prescriptions are bucketed by the UTC calendar day of `created_at`, which
//! is the same as the `YYYY-MM-DD` prefix of their RFC 3339 form. No time
//! zone conversion happens and days without activity are not filled in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use rxguard_contracts::{
    error::{RxGuardError, RxResult},
    metrics::DailyMetricPoint,
    prescription::Prescription,
};

/// Group prescriptions by creation day, optionally for one organization.
///
/// Points come back sorted by date ascending with each date at most once.
/// The totals sum to the number of prescriptions that passed the filter.
pub fn daily_metrics(prescriptions: &[Prescription], organization_id: Option<&str>) -> Vec<DailyMetricPoint> {
    let mut by_day: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();

    for p in prescriptions.iter().filter(|p| p.in_organization(organization_id)) {
        let entry = by_day.entry(p.created_at.date_naive()).or_default();
        entry.0 += 1;
        if p.is_flagged() {
            entry.1 += 1;
        }
    }

    debug!(days = by_day.len(), org = ?organization_id, "daily metrics computed");

    by_day
        .into_iter()
        .map(|(date, (total, flagged))| DailyMetricPoint {
            date,
            total_prescriptions: total,
            flagged_prescriptions: flagged,
        })
        .collect()
}

/// Parse the calendar-day prefix of a raw timestamp string.
///
/// Accepts `"2024-01-01"` as well as anything that starts with it, such as
/// `"2024-01-01T10:00:00Z"`. Returns `InvalidDate` for anything else.
pub fn parse_day(input: &str) -> RxResult<NaiveDate> {
    let prefix = input.get(..10).ok_or_else(|| RxGuardError::InvalidDate {
        input: input.to_string(),
        reason: "shorter than YYYY-MM-DD".to_string(),
    })?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|e| RxGuardError::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
