//! In-memory duty store
//!
//! Backs local mode, the wizard tests, and the mock service. All
//! mutations run under a single lock; the conditional writes are checked
//! and applied without releasing it, which is what gives this
//! implementation its at-most-once report guarantee.

use crate::error::{ClientError, ClientResult};
use crate::store::DutyStore;
use async_trait::async_trait;
use shared::models::{
    DutyRecord, MobileLookup, ProxyReportCreate, ReportCreate, StaffEntry, SubmissionCreate,
};
use shared::util::{now_millis, snowflake_id};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct MemoryState {
    /// Staff directory keyed by mobile number
    staff: HashMap<String, StaffEntry>,
    records: Vec<DutyRecord>,
}

impl MemoryState {
    /// The record a mobile number actively reports against on a date
    fn active_record(&self, mobile: &str, date: &str) -> Option<&DutyRecord> {
        self.records
            .iter()
            .find(|r| r.duty_date == date && r.mobile_number.as_deref() == Some(mobile))
    }

    fn active_record_mut(&mut self, mobile: &str, date: &str) -> Option<&mut DutyRecord> {
        self.records
            .iter_mut()
            .find(|r| r.duty_date == date && r.mobile_number.as_deref() == Some(mobile))
    }

    /// The record assigned to a staff member on a date
    fn assigned_record_mut(&mut self, name: &str, date: &str) -> Option<&mut DutyRecord> {
        self.records
            .iter_mut()
            .find(|r| r.duty_date == date && r.assigned_staff_name == name)
    }
}

/// In-memory implementation of the duty store contract
#[derive(Debug, Clone)]
pub struct MemoryDutyStore {
    state: Arc<Mutex<MemoryState>>,
    /// The date this store treats as "today"
    duty_date: String,
}

impl MemoryDutyStore {
    /// Empty store operating on the given duty date
    pub fn new(duty_date: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            duty_date: duty_date.into(),
        }
    }

    /// The date this store treats as "today"
    pub fn duty_date(&self) -> &str {
        &self.duty_date
    }

    /// Insert a staff directory row
    pub async fn seed_staff(&self, entry: StaffEntry) {
        self.state
            .lock()
            .await
            .staff
            .insert(entry.mobile_no.clone(), entry);
    }

    /// Insert a duty record, assigning an id when it has none
    pub async fn seed_duty(&self, mut record: DutyRecord) {
        if record.id == 0 {
            record.id = snowflake_id();
        }
        self.state.lock().await.records.push(record);
    }

    /// Seed a roster for this store's duty date: each entry gets a
    /// directory row plus an Absent assignment.
    pub async fn seed_roster(&self, entries: Vec<StaffEntry>) {
        for mut entry in entries {
            entry.duty_date = self.duty_date.clone();
            self.seed_duty(DutyRecord::assigned(
                &entry.name,
                &entry.department,
                &entry.hall,
                &entry.duty_date,
            ))
            .await;
            self.seed_staff(entry).await;
        }
    }
}

#[async_trait]
impl DutyStore for MemoryDutyStore {
    async fn lookup_mobile(&self, mobile: &str) -> ClientResult<MobileLookup> {
        let state = self.state.lock().await;
        Ok(match state.active_record(mobile, &self.duty_date) {
            Some(record) => MobileLookup::hit(record.clone()),
            None => MobileLookup::miss(),
        })
    }

    async fn lookup_staff(&self, mobile: &str) -> ClientResult<Option<StaffEntry>> {
        let state = self.state.lock().await;
        Ok(state.staff.get(mobile).cloned())
    }

    async fn list_duty_for_date(&self, date: &str) -> ClientResult<Vec<DutyRecord>> {
        let state = self.state.lock().await;
        Ok(state
            .records
            .iter()
            .filter(|r| r.duty_date == date)
            .cloned()
            .collect())
    }

    async fn list_all_duty(&self) -> ClientResult<Vec<DutyRecord>> {
        let state = self.state.lock().await;
        Ok(state.records.clone())
    }

    async fn create_report(&self, req: &ReportCreate) -> ClientResult<DutyRecord> {
        let mut state = self.state.lock().await;

        let entry = state
            .staff
            .get(&req.mobile_number)
            .cloned()
            .ok_or_else(|| {
                ClientError::UnknownMobile(format!(
                    "no staff entry for mobile {}",
                    req.mobile_number
                ))
            })?;

        // At most one active report per mobile per date
        if state
            .active_record(&req.mobile_number, &self.duty_date)
            .is_some()
        {
            return Err(ClientError::Conflict(format!(
                "mobile {} already has an active report today",
                req.mobile_number
            )));
        }

        let record = state
            .assigned_record_mut(&entry.name, &self.duty_date)
            .ok_or_else(|| {
                ClientError::RecordNotFound(format!(
                    "no duty slot for {} on {}",
                    entry.name, self.duty_date
                ))
            })?;

        if record.checkin_time.is_some() {
            return Err(ClientError::Conflict(format!(
                "duty for {} is already reported",
                entry.name
            )));
        }

        record.reported_staff_name = Some(entry.name.clone());
        record.checkin_time = Some(now_millis());
        record.mobile_number = Some(req.mobile_number.clone());
        Ok(record.clone())
    }

    async fn create_proxy_report(&self, req: &ProxyReportCreate) -> ClientResult<DutyRecord> {
        let mut state = self.state.lock().await;

        if state
            .active_record(&req.proxy_mobile_number, &self.duty_date)
            .is_some()
        {
            return Err(ClientError::Conflict(format!(
                "mobile {} already has an active report today",
                req.proxy_mobile_number
            )));
        }

        let record = state
            .assigned_record_mut(&req.absent_staff_name, &self.duty_date)
            .ok_or_else(|| {
                ClientError::RecordNotFound(format!(
                    "no duty slot for {} on {}",
                    req.absent_staff_name, self.duty_date
                ))
            })?;

        if record.checkin_time.is_some() {
            return Err(ClientError::Conflict(format!(
                "duty for {} is already reported",
                req.absent_staff_name
            )));
        }

        record.reported_staff_name = Some(req.proxy_staff_name.clone());
        record.checkin_time = Some(now_millis());
        record.mobile_number = Some(req.proxy_mobile_number.clone());
        record.emergency_reason = Some(req.emergency_reason);
        Ok(record.clone())
    }

    async fn create_submission(&self, req: &SubmissionCreate) -> ClientResult<DutyRecord> {
        let mut state = self.state.lock().await;

        let record = state
            .active_record_mut(&req.mobile_number, &self.duty_date)
            .ok_or_else(|| {
                ClientError::NotReported(format!(
                    "no check-in on record for mobile {}",
                    req.mobile_number
                ))
            })?;

        // Repeat submission is a no-op; the original submission_time stands
        if record.submission_time.is_none() {
            record.submission_time = Some(now_millis());
        }
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{DutyStatus, EmergencyReason};

    const DATE: &str = "2025-08-04";

    fn entry(name: &str, department: &str, hall: &str, mobile: &str) -> StaffEntry {
        StaffEntry {
            name: name.to_string(),
            department: department.to_string(),
            hall: hall.to_string(),
            duty_date: DATE.to_string(),
            mobile_no: mobile.to_string(),
        }
    }

    async fn seeded_store() -> MemoryDutyStore {
        let store = MemoryDutyStore::new(DATE);
        store
            .seed_roster(vec![
                entry("A. Rao", "Physics", "Hall 3", "9876543210"),
                entry("B. Singh", "Chemistry", "Hall 1", "4445556667"),
                entry("C. Mehta", "Maths", "Hall 2", "1112223333"),
            ])
            .await;
        store
    }

    #[tokio::test]
    async fn test_report_sets_checkin_fields() {
        let store = seeded_store().await;
        let record = store
            .create_report(&ReportCreate {
                mobile_number: "9876543210".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(record.status(), DutyStatus::Reported);
        assert_eq!(record.reported_staff_name.as_deref(), Some("A. Rao"));
        assert_eq!(record.mobile_number.as_deref(), Some("9876543210"));
        assert!(record.id != 0);
        assert!(!record.is_proxy());
    }

    #[tokio::test]
    async fn test_second_report_conflicts() {
        let store = seeded_store().await;
        let req = ReportCreate {
            mobile_number: "9876543210".to_string(),
        };
        store.create_report(&req).await.unwrap();
        let err = store.create_report(&req).await.unwrap_err();
        assert!(matches!(err, ClientError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_report_unknown_mobile() {
        let store = seeded_store().await;
        let err = store
            .create_report(&ReportCreate {
                mobile_number: "0000000000".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnknownMobile(_)));
    }

    #[tokio::test]
    async fn test_proxy_report_marks_proxy_case() {
        let store = seeded_store().await;
        let record = store
            .create_proxy_report(&ProxyReportCreate {
                absent_staff_name: "B. Singh".to_string(),
                absent_department: "Chemistry".to_string(),
                absent_hall: "Hall 1".to_string(),
                proxy_staff_name: "C. Mehta".to_string(),
                proxy_mobile_number: "1112223333".to_string(),
                emergency_reason: EmergencyReason::Medical,
            })
            .await
            .unwrap();

        assert!(record.is_proxy());
        assert_eq!(record.assigned_staff_name, "B. Singh");
        assert_eq!(record.reported_staff_name.as_deref(), Some("C. Mehta"));
        assert_eq!(record.mobile_number.as_deref(), Some("1112223333"));
        assert_eq!(record.emergency_reason, Some(EmergencyReason::Medical));
    }

    #[tokio::test]
    async fn test_proxy_report_without_slot_fails() {
        let store = seeded_store().await;
        let err = store
            .create_proxy_report(&ProxyReportCreate {
                absent_staff_name: "Z. Nobody".to_string(),
                absent_department: "History".to_string(),
                absent_hall: "Hall 9".to_string(),
                proxy_staff_name: "C. Mehta".to_string(),
                proxy_mobile_number: "1112223333".to_string(),
                emergency_reason: EmergencyReason::Other,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::RecordNotFound(_)));
    }

    #[tokio::test]
    async fn test_submission_requires_checkin() {
        let store = seeded_store().await;
        let err = store
            .create_submission(&SubmissionCreate {
                mobile_number: "9876543210".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotReported(_)));
    }

    #[tokio::test]
    async fn test_submission_is_idempotent() {
        let store = seeded_store().await;
        let report = ReportCreate {
            mobile_number: "9876543210".to_string(),
        };
        store.create_report(&report).await.unwrap();

        let submit = SubmissionCreate {
            mobile_number: "9876543210".to_string(),
        };
        let first = store.create_submission(&submit).await.unwrap();
        let second = store.create_submission(&submit).await.unwrap();

        assert_eq!(first.submission_time, second.submission_time);
        assert_eq!(second.status(), DutyStatus::Completed);
    }

    #[tokio::test]
    async fn test_lookup_mobile_tracks_lifecycle() {
        let store = seeded_store().await;
        assert!(!store.lookup_mobile("9876543210").await.unwrap().exists);

        store
            .create_report(&ReportCreate {
                mobile_number: "9876543210".to_string(),
            })
            .await
            .unwrap();
        let lookup = store.lookup_mobile("9876543210").await.unwrap();
        assert!(lookup.exists);
        assert!(!lookup.already_submitted);

        store
            .create_submission(&SubmissionCreate {
                mobile_number: "9876543210".to_string(),
            })
            .await
            .unwrap();
        let lookup = store.lookup_mobile("9876543210").await.unwrap();
        assert!(lookup.exists);
        assert!(lookup.already_submitted);
    }

    #[tokio::test]
    async fn test_list_duty_for_date_filters() {
        let store = seeded_store().await;
        store
            .seed_duty(DutyRecord::assigned("F. Khan", "English", "Hall 5", "2025-08-05"))
            .await;

        assert_eq!(store.list_duty_for_date(DATE).await.unwrap().len(), 3);
        assert_eq!(store.list_all_duty().await.unwrap().len(), 4);
    }
}
