//! Duty store contract and its implementations
//!
//! The durable store is an external collaborator; the attendance core
//! reaches it only through this contract. Two implementations ship with
//! the client: [`HttpDutyStore`] for the networked store and
//! [`MemoryDutyStore`] for local mode and tests.

mod http;
mod memory;

pub use http::HttpDutyStore;
pub use memory::MemoryDutyStore;

use crate::error::ClientResult;
use async_trait::async_trait;
use shared::models::{
    DutyRecord, MobileLookup, ProxyReportCreate, ReportCreate, StaffEntry, SubmissionCreate,
};

/// Operations the attendance core requires from the duty store
///
/// Implementations must honor the conditional-mutation contract: a
/// check-in write fails with `Conflict` when the target record already
/// has one, a submission without a prior check-in fails with
/// `NotReported`, and a repeated submission is a no-op that returns the
/// record unchanged. A mobile number maps to at most one active report
/// per duty date.
#[async_trait]
pub trait DutyStore: Send + Sync {
    /// Check a mobile number against the active duty roster for today
    async fn lookup_mobile(&self, mobile: &str) -> ClientResult<MobileLookup>;

    /// Resolve a mobile number in the staff directory; `None` on a miss
    async fn lookup_staff(&self, mobile: &str) -> ClientResult<Option<StaffEntry>>;

    /// All duty records for one date
    async fn list_duty_for_date(&self, date: &str) -> ClientResult<Vec<DutyRecord>>;

    /// Every duty record the store holds
    async fn list_all_duty(&self) -> ClientResult<Vec<DutyRecord>>;

    /// First check-in for the staff member owning this mobile
    async fn create_report(&self, req: &ReportCreate) -> ClientResult<DutyRecord>;

    /// Proxy check-in against the absent staff member's record
    async fn create_proxy_report(&self, req: &ProxyReportCreate) -> ClientResult<DutyRecord>;

    /// Record paper submission for an already-reported mobile
    async fn create_submission(&self, req: &SubmissionCreate) -> ClientResult<DutyRecord>;
}
