//! End-to-end check-in walkthrough
//!
//! Runs the full duty attendance flow against the in-memory store:
//! 1. Fresh check-in and paper submission
//! 2. Re-entry after completion (no double write)
//! 3. Proxy check-in for an absent colleague
//! 4. Dashboard summary and JSON export
//!
//! Run: cargo run --example checkin_demo

use shared::models::{DutyStatus, EmergencyReason, StaffEntry};
use shared::report::{DutyExport, DutySummary};
use vigil_client::{CheckinWizard, ClientConfig, DutyStore, LogNotifier, MemoryDutyStore, WizardStep};

const DUTY_DATE: &str = "2025-08-04";

fn entry(name: &str, department: &str, hall: &str, mobile: &str) -> StaffEntry {
    StaffEntry {
        name: name.to_string(),
        department: department.to_string(),
        hall: hall.to_string(),
        duty_date: DUTY_DATE.to_string(),
        mobile_no: mobile.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("\n📋 Duty Attendance Walkthrough");
    println!("==============================\n");

    let store = MemoryDutyStore::new(DUTY_DATE);
    store
        .seed_roster(vec![
            entry("A. Rao", "Physics", "Hall 3", "9876543210"),
            entry("B. Singh", "Chemistry", "Hall 1", "4445556667"),
            entry("C. Mehta", "Maths", "Hall 2", "1112223333"),
            entry("D. Iyer", "Biology", "Hall 4", "7778889990"),
        ])
        .await;

    let config = ClientConfig::new("http://localhost:8080")
        .with_duty_date(DUTY_DATE)
        .with_banner("Half-Yearly Examination", "09:00 AM - 12:00 PM");
    let mut wizard = CheckinWizard::new(store.clone(), LogNotifier, config);

    let (session, roster) = wizard.load_session().await?;
    println!("🏫 {} | {} | {}", session.exam_name, session.duty_date, session.time_slot);
    println!("   {} duties scheduled today\n", roster.len());

    // 1. Fresh check-in and submission
    println!("1️⃣  A. Rao checks in and hands papers over");
    wizard.scan()?;
    wizard.verify("9876543210").await?;
    if let WizardStep::Submit { duty, .. } = wizard.step() {
        println!("   reported as: {:?}", duty.reported_staff_name);
    }
    wizard.confirm_submission().await?;
    wizard.back_to_home();

    // 2. Re-entry after completion: no field is written twice
    println!("\n2️⃣  A. Rao scans again by mistake");
    wizard.scan()?;
    wizard.verify("9876543210").await?;
    assert!(matches!(wizard.step(), WizardStep::Success { .. }));
    wizard.back_to_home();

    // 3. Proxy: C. Mehta covers for the absent B. Singh
    println!("\n3️⃣  C. Mehta covers B. Singh's duty (medical)");
    wizard.choose_proxy()?;
    wizard
        .confirm_proxy("1112223333", "4445556667", Some(EmergencyReason::Medical))
        .await?;
    wizard.back_to_home();

    // 4. Summary and export
    println!("\n4️⃣  Dashboard and export");
    let records = store.list_duty_for_date(DUTY_DATE).await?;
    let summary = DutySummary::compute(&records);
    println!(
        "   assignments={} reported={} submitted={} proxies={} absent={} pending={}",
        summary.total_assignments,
        summary.reported,
        summary.submitted,
        summary.proxies,
        summary.absent,
        summary.pending_submission
    );

    for record in &records {
        println!(
            "   {:<10} {:<9} {} {}",
            record.assigned_staff_name,
            record.hall,
            record.status().label(),
            if record.is_proxy() { "(proxy)" } else { "" }
        );
    }

    let export = DutyExport::build(records, DUTY_DATE);
    println!("\n💾 {}", export.file_name());
    println!("{}", export.to_json_pretty()?);

    // Unreported assignments stay Absent until someone checks in
    let absent = store
        .list_duty_for_date(DUTY_DATE)
        .await?
        .into_iter()
        .filter(|r| r.status() == DutyStatus::Absent)
        .count();
    println!("\n✅ Walkthrough complete ({absent} still absent)");
    Ok(())
}
