//! Unified error handling
//!
//! Error codes, application errors and the API response envelope shared
//! between the check-in client and the duty store service.

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
