//! Duty record model and derived attendance status
//!
//! A duty record is one staff-to-slot assignment for a date. Its
//! attendance status is never stored: it is a pure projection of the
//! `checkin_time` / `submission_time` fields, so display and counters
//! can never disagree with the timestamps.

use serde::{Deserialize, Serialize};

/// Attendance status derived from a record's timestamp fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DutyStatus {
    /// No check-in recorded yet
    Absent,
    /// Checked in, papers not yet submitted
    Reported,
    /// Papers submitted, duty complete
    Completed,
}

impl DutyStatus {
    /// Badge label shown on dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Absent => "Absent",
            Self::Reported => "Reported",
            Self::Completed => "Completed",
        }
    }
}

impl Default for DutyStatus {
    fn default() -> Self {
        Self::Absent
    }
}

/// Reason selected on a proxy check-in, recorded as metadata only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyReason {
    Medical,
    Family,
    Transport,
    Other,
}

impl EmergencyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Family => "family",
            Self::Transport => "transport",
            Self::Other => "other",
        }
    }
}

/// One assignment of a staff member to an invigilation duty slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyRecord {
    /// Store-assigned identifier; 0 before first persistence
    #[serde(default)]
    pub id: i64,
    /// Staff member assigned by the scheduling process, immutable
    pub assigned_staff_name: String,
    pub department: String,
    /// Examination hall for this slot
    pub hall: String,
    /// Duty date, `YYYY-MM-DD`
    pub duty_date: String,
    /// Who actually checked in; differs from the assignee in proxy cases.
    /// Set atomically with `checkin_time`.
    #[serde(default)]
    pub reported_staff_name: Option<String>,
    /// Check-in timestamp (Unix millis), set once at first report
    #[serde(default)]
    pub checkin_time: Option<i64>,
    /// Paper submission timestamp (Unix millis), set once after check-in
    #[serde(default)]
    pub submission_time: Option<i64>,
    /// Mobile number used to check in; the proxy's number in proxy cases
    #[serde(default)]
    pub mobile_number: Option<String>,
    /// Proxy emergency reason, never a state-machine input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_reason: Option<EmergencyReason>,
}

impl DutyRecord {
    /// New Absent record, as created by the scheduling process
    pub fn assigned(
        staff_name: impl Into<String>,
        department: impl Into<String>,
        hall: impl Into<String>,
        duty_date: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            assigned_staff_name: staff_name.into(),
            department: department.into(),
            hall: hall.into(),
            duty_date: duty_date.into(),
            reported_staff_name: None,
            checkin_time: None,
            submission_time: None,
            mobile_number: None,
            emergency_reason: None,
        }
    }

    /// Attendance status as a pure projection of the timestamp fields
    pub fn status(&self) -> DutyStatus {
        if self.checkin_time.is_none() {
            DutyStatus::Absent
        } else if self.submission_time.is_none() {
            DutyStatus::Reported
        } else {
            DutyStatus::Completed
        }
    }

    /// True iff someone other than the assignee reported this duty
    pub fn is_proxy(&self) -> bool {
        match &self.reported_staff_name {
            Some(reported) => reported != &self.assigned_staff_name,
            None => false,
        }
    }
}

/// Result of checking a mobile number against the active duty roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobileLookup {
    /// Whether an active report exists for this mobile today
    pub exists: bool,
    /// Whether that report has already been submitted
    #[serde(rename = "alreadySubmitted")]
    pub already_submitted: bool,
    /// The active record, when one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty: Option<DutyRecord>,
}

impl MobileLookup {
    /// Lookup miss: no active report for the mobile
    pub fn miss() -> Self {
        Self {
            exists: false,
            already_submitted: false,
            duty: None,
        }
    }

    /// Lookup hit carrying the active record
    pub fn hit(duty: DutyRecord) -> Self {
        Self {
            exists: true,
            already_submitted: duty.submission_time.is_some(),
            duty: Some(duty),
        }
    }
}

/// Banner data for the scan screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSession {
    pub exam_name: String,
    pub time_slot: String,
    /// Duty date, `YYYY-MM-DD`
    pub duty_date: String,
}

// ==================== Write payloads ====================

/// Payload for a normal check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCreate {
    pub mobile_number: String,
}

/// Payload for a paper submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionCreate {
    pub mobile_number: String,
}

/// Payload for a proxy check-in on behalf of an absent staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyReportCreate {
    pub absent_staff_name: String,
    pub absent_department: String,
    pub absent_hall: String,
    pub proxy_staff_name: String,
    pub proxy_mobile_number: String,
    pub emergency_reason: EmergencyReason,
}
