//! Mock service state
//!
//! Wraps the in-memory duty store from the client crate, so the wire
//! service and the local implementation share one set of attendance
//! rules, and seeds it with a demonstration roster.

use crate::config::MockConfig;
use shared::models::StaffEntry;
use vigil_client::MemoryDutyStore;

pub struct AppState {
    pub store: MemoryDutyStore,
    pub config: MockConfig,
}

impl AppState {
    /// Build the state and seed the demo roster for the configured date
    pub async fn initialize(config: &MockConfig) -> Self {
        let store = MemoryDutyStore::new(config.duty_date.clone());
        let roster = demo_roster(&config.duty_date);
        tracing::info!(
            duty_date = %config.duty_date,
            staff = roster.len(),
            "seeding duty roster"
        );
        store.seed_roster(roster).await;

        Self {
            store,
            config: config.clone(),
        }
    }
}

fn entry(name: &str, department: &str, hall: &str, mobile: &str, date: &str) -> StaffEntry {
    StaffEntry {
        name: name.to_string(),
        department: department.to_string(),
        hall: hall.to_string(),
        duty_date: date.to_string(),
        mobile_no: mobile.to_string(),
    }
}

/// Demonstration roster: one directory row and one Absent duty slot per
/// staff member, all on the configured date.
fn demo_roster(date: &str) -> Vec<StaffEntry> {
    vec![
        entry("A. Rao", "Physics", "Hall 3", "9876543210", date),
        entry("B. Singh", "Chemistry", "Hall 1", "4445556667", date),
        entry("C. Mehta", "Maths", "Hall 2", "1112223333", date),
        entry("D. Iyer", "Biology", "Hall 4", "7778889990", date),
        entry("E. Verma", "English", "Hall 5", "5556667778", date),
        entry("F. Khan", "History", "Hall 2", "2223334445", date),
        entry("G. Nair", "Commerce", "Hall 1", "8889990001", date),
        entry("H. Das", "Economics", "Hall 3", "6667778889", date),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DutyStatus;
    use vigil_client::DutyStore;

    fn test_config() -> MockConfig {
        MockConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            duty_date: "2025-08-04".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }

    #[tokio::test]
    async fn test_initialize_seeds_roster() {
        let state = AppState::initialize(&test_config()).await;

        let records = state.store.list_duty_for_date("2025-08-04").await.unwrap();
        assert_eq!(records.len(), 8);
        assert!(records.iter().all(|r| r.status() == DutyStatus::Absent));
        assert!(records.iter().all(|r| r.id != 0));

        let staff = state.store.lookup_staff("9876543210").await.unwrap();
        assert_eq!(staff.unwrap().name, "A. Rao");
    }
}
