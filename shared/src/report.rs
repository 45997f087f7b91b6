//! Attendance summary and export document
//!
//! Everything here is a pure projection over a slice of duty records.
//! Counters are recomputed on every read rather than maintained
//! incrementally, so they can never drift from the records themselves.

use crate::models::DutyRecord;
use serde::{Deserialize, Serialize};

/// Attendance counters for one duty date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutySummary {
    pub total_assignments: usize,
    /// Records with a check-in
    pub reported: usize,
    /// Records with a submission
    pub submitted: usize,
    /// Records reported by someone other than the assignee
    pub proxies: usize,
    /// Records with no check-in
    pub absent: usize,
    /// Reported but not yet submitted
    pub pending_submission: usize,
}

impl DutySummary {
    /// Compute the counters over one date's record set
    pub fn compute(records: &[DutyRecord]) -> Self {
        Self {
            total_assignments: records.len(),
            reported: records.iter().filter(|r| r.checkin_time.is_some()).count(),
            submitted: records
                .iter()
                .filter(|r| r.submission_time.is_some())
                .count(),
            proxies: records.iter().filter(|r| r.is_proxy()).count(),
            absent: records.iter().filter(|r| r.checkin_time.is_none()).count(),
            pending_submission: records
                .iter()
                .filter(|r| r.checkin_time.is_some() && r.submission_time.is_none())
                .count(),
        }
    }
}

/// Records reported by a substitute, for the proxy-cases listing
pub fn proxy_cases(records: &[DutyRecord]) -> Vec<&DutyRecord> {
    records.iter().filter(|r| r.is_proxy()).collect()
}

/// Offline report document: the full record set plus its summary
///
/// Purely an output; the attendance core never reads it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyExport {
    pub duty_records: Vec<DutyRecord>,
    /// Export date, `YYYY-MM-DD`
    pub export_date: String,
    pub summary: DutySummary,
}

impl DutyExport {
    /// Build the document, computing the summary from the records
    pub fn build(records: Vec<DutyRecord>, export_date: impl Into<String>) -> Self {
        let summary = DutySummary::compute(&records);
        Self {
            duty_records: records,
            export_date: export_date.into(),
            summary,
        }
    }

    /// Download file name with the date rendered day-first
    pub fn file_name(&self) -> String {
        // 2025-08-04 -> invigilation-report-04-08-2025.json
        let flipped: Vec<&str> = self.export_date.split('-').rev().collect();
        format!("invigilation-report-{}.json", flipped.join("-"))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
