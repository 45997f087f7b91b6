//! Vigil Client - duty attendance check-in flow
//!
//! The client side of exam-invigilation tracking: the attendance
//! decision core, the check-in wizard, and the duty store contract with
//! HTTP and in-memory implementations.

pub mod checkin;
pub mod config;
pub mod error;
pub mod notify;
pub mod store;
pub mod wizard;

pub use checkin::{VerifyOutcome, decide_on_verify, is_valid_mobile};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use notify::{LogNotifier, MemoryNotifier, Notice, Notifier, Severity};
pub use store::{DutyStore, HttpDutyStore, MemoryDutyStore};
pub use wizard::{CheckinWizard, WizardStep};

// Re-export shared types for convenience
pub use shared::models::{DutyRecord, DutyStatus, EmergencyReason, ExamSession, StaffEntry};
pub use shared::report::{DutyExport, DutySummary};
