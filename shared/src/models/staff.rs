//! Staff directory entry

use serde::{Deserialize, Serialize};

/// One row of the staff directory, keyed by mobile number
///
/// Read-only to the attendance core. Consulted to resolve an unreported
/// mobile number into a staff identity before the first check-in, and to
/// resolve both parties of a proxy check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffEntry {
    pub name: String,
    pub department: String,
    /// Hall this staff member is assigned to invigilate
    pub hall: String,
    /// Assigned duty date, `YYYY-MM-DD`
    pub duty_date: String,
    /// Contact mobile number, the directory key
    pub mobile_no: String,
}
