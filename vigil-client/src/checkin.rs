//! Check-in decision core
//!
//! The pure routing logic of duty attendance, independent of any UI:
//! given a mobile number, decide whether the holder has already
//! submitted, has a pending submission, or still needs to report. The
//! wizard drives these operations and renders their outcomes.

use crate::error::{ClientError, ClientResult};
use crate::store::DutyStore;
use shared::models::{
    DutyRecord, EmergencyReason, MobileLookup, ProxyReportCreate, ReportCreate, StaffEntry,
    SubmissionCreate,
};

/// A well-formed mobile number is exactly ten ASCII digits
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.bytes().all(|b| b.is_ascii_digit())
}

/// Where a verified mobile number lands in the check-in flow
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    /// Active report found and papers already submitted
    AlreadySubmitted(DutyRecord),
    /// Active report found, submission still pending
    AlreadyReported(DutyRecord),
    /// No active report; the directory entry to report against
    FreshReport(StaffEntry),
}

fn active_duty(lookup: MobileLookup) -> ClientResult<DutyRecord> {
    lookup.duty.ok_or_else(|| {
        ClientError::InvalidResponse(
            "mobile check flagged an active report but carried no record".to_string(),
        )
    })
}

/// Route a verified mobile number
///
/// Checks in priority order: already submitted, already reported, then
/// the staff directory. A number that matches nothing is unknown.
pub async fn decide_on_verify<S: DutyStore + ?Sized>(
    store: &S,
    mobile: &str,
) -> ClientResult<VerifyOutcome> {
    if !is_valid_mobile(mobile) {
        return Err(ClientError::Validation(format!(
            "mobile number must be exactly 10 digits, got {mobile:?}"
        )));
    }

    let lookup = store.lookup_mobile(mobile).await?;
    if lookup.exists {
        let already_submitted = lookup.already_submitted;
        let duty = active_duty(lookup)?;
        return Ok(if already_submitted {
            VerifyOutcome::AlreadySubmitted(duty)
        } else {
            VerifyOutcome::AlreadyReported(duty)
        });
    }

    let entry = store.lookup_staff(mobile).await?.ok_or_else(|| {
        ClientError::UnknownMobile(format!("no staff entry for mobile {mobile}"))
    })?;
    Ok(VerifyOutcome::FreshReport(entry))
}

/// Re-read the active record for a mobile number
///
/// Callers always re-fetch after a mutation rather than trusting local
/// copies of the record.
pub async fn refresh<S: DutyStore + ?Sized>(
    store: &S,
    mobile: &str,
) -> ClientResult<Option<DutyRecord>> {
    let lookup = store.lookup_mobile(mobile).await?;
    if !lookup.exists {
        return Ok(None);
    }
    Ok(Some(active_duty(lookup)?))
}

/// Record a check-in for the staff member holding this mobile number
///
/// Fails with [`ClientError::Conflict`] when the duty is already
/// reported; callers recover by re-reading the record.
pub async fn report<S: DutyStore + ?Sized>(store: &S, mobile: &str) -> ClientResult<DutyRecord> {
    store
        .create_report(&ReportCreate {
            mobile_number: mobile.to_string(),
        })
        .await
}

/// Record a proxy check-in: the proxy covers the absentee's duty
///
/// Both parties are resolved through the staff directory before the
/// write, so the stored record carries the absentee's real hall and
/// department rather than whatever the proxy typed.
pub async fn report_proxy<S: DutyStore + ?Sized>(
    store: &S,
    proxy_mobile: &str,
    absent_mobile: &str,
    reason: EmergencyReason,
) -> ClientResult<DutyRecord> {
    let proxy = store.lookup_staff(proxy_mobile).await?.ok_or_else(|| {
        ClientError::UnknownStaff(format!("no staff entry for proxy mobile {proxy_mobile}"))
    })?;
    let absent = store.lookup_staff(absent_mobile).await?.ok_or_else(|| {
        ClientError::UnknownStaff(format!("no staff entry for absent mobile {absent_mobile}"))
    })?;

    store
        .create_proxy_report(&ProxyReportCreate {
            absent_staff_name: absent.name,
            absent_department: absent.department,
            absent_hall: absent.hall,
            proxy_staff_name: proxy.name,
            proxy_mobile_number: proxy.mobile_no,
            emergency_reason: reason,
        })
        .await
}

/// Record the paper submission for an active report
///
/// Requires a prior check-in; repeat calls are no-ops on the store side.
pub async fn submit<S: DutyStore + ?Sized>(store: &S, mobile: &str) -> ClientResult<DutyRecord> {
    store
        .create_submission(&SubmissionCreate {
            mobile_number: mobile.to_string(),
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDutyStore;

    const DATE: &str = "2025-08-04";

    async fn seeded_store() -> MemoryDutyStore {
        let store = MemoryDutyStore::new(DATE);
        store
            .seed_roster(vec![
                StaffEntry {
                    name: "A. Rao".to_string(),
                    department: "Physics".to_string(),
                    hall: "Hall 3".to_string(),
                    duty_date: DATE.to_string(),
                    mobile_no: "9876543210".to_string(),
                },
                StaffEntry {
                    name: "B. Singh".to_string(),
                    department: "Chemistry".to_string(),
                    hall: "Hall 1".to_string(),
                    duty_date: DATE.to_string(),
                    mobile_no: "4445556667".to_string(),
                },
                StaffEntry {
                    name: "C. Mehta".to_string(),
                    department: "Maths".to_string(),
                    hall: "Hall 2".to_string(),
                    duty_date: DATE.to_string(),
                    mobile_no: "1112223333".to_string(),
                },
            ])
            .await;
        store
    }

    #[test]
    fn test_mobile_validation() {
        assert!(is_valid_mobile("9876543210"));
        assert!(!is_valid_mobile("987654321"));
        assert!(!is_valid_mobile("98765432100"));
        assert!(!is_valid_mobile("98765abcde"));
        assert!(!is_valid_mobile(""));
    }

    #[tokio::test]
    async fn test_verify_routes_by_lifecycle_stage() {
        let store = seeded_store().await;

        let outcome = decide_on_verify(&store, "9876543210").await.unwrap();
        assert!(matches!(outcome, VerifyOutcome::FreshReport(ref e) if e.name == "A. Rao"));

        report(&store, "9876543210").await.unwrap();
        let outcome = decide_on_verify(&store, "9876543210").await.unwrap();
        assert!(matches!(outcome, VerifyOutcome::AlreadyReported(_)));

        submit(&store, "9876543210").await.unwrap();
        let outcome = decide_on_verify(&store, "9876543210").await.unwrap();
        assert!(matches!(outcome, VerifyOutcome::AlreadySubmitted(_)));
    }

    #[tokio::test]
    async fn test_verify_rejects_malformed_mobile() {
        let store = seeded_store().await;
        let err = decide_on_verify(&store, "123").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_verify_unknown_mobile() {
        let store = seeded_store().await;
        let err = decide_on_verify(&store, "0000000000").await.unwrap_err();
        assert!(matches!(err, ClientError::UnknownMobile(_)));
    }

    #[tokio::test]
    async fn test_proxy_resolves_both_parties() {
        let store = seeded_store().await;
        let record = report_proxy(&store, "1112223333", "4445556667", EmergencyReason::Medical)
            .await
            .unwrap();

        // The record keeps the absentee's assignment details
        assert_eq!(record.assigned_staff_name, "B. Singh");
        assert_eq!(record.hall, "Hall 1");
        assert_eq!(record.department, "Chemistry");
        assert_eq!(record.reported_staff_name.as_deref(), Some("C. Mehta"));
        assert!(record.is_proxy());
    }

    #[tokio::test]
    async fn test_proxy_reports_which_party_is_unknown() {
        let store = seeded_store().await;

        let err = report_proxy(&store, "0000000000", "4445556667", EmergencyReason::Other)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnknownStaff(ref m) if m.contains("proxy")));

        let err = report_proxy(&store, "1112223333", "0000000000", EmergencyReason::Other)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnknownStaff(ref m) if m.contains("absent")));
    }

    #[tokio::test]
    async fn test_refresh_returns_active_record() {
        let store = seeded_store().await;
        assert!(refresh(&store, "9876543210").await.unwrap().is_none());

        report(&store, "9876543210").await.unwrap();
        let record = refresh(&store, "9876543210").await.unwrap().unwrap();
        assert_eq!(record.reported_staff_name.as_deref(), Some("A. Rao"));
    }
}
