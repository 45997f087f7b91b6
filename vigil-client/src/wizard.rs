//! Check-in wizard
//!
//! Drives the user-visible flow: scan, verify, submit, success, with
//! proxy check-in as an alternate entry and a deferred-submission
//! terminal. Each step carries exactly the fields it needs, so a submit
//! screen without a resident record cannot be represented.
//!
//! Two rules hold across every action. After a mutating store call the
//! wizard re-fetches the authoritative record instead of trusting its
//! local copy, because the store fills in fields (id, check-in time)
//! the wizard does not know in advance. And a failed action never
//! advances the step; the outcome is surfaced through the injected
//! [`Notifier`] and the user stays on an actionable screen.

use crate::checkin::{self, VerifyOutcome};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::notify::{Notice, Notifier};
use crate::store::DutyStore;
use shared::models::{DutyRecord, EmergencyReason, ExamSession};

/// One screen of the check-in flow
#[derive(Debug, Clone)]
pub enum WizardStep {
    /// Landing screen, waiting for a scan or the proxy path
    Scan,
    /// Mobile number entry; keeps the last attempted input
    Verify { mobile: String },
    /// Check-in on record, awaiting the paper-submission decision
    Submit { mobile: String, duty: DutyRecord },
    /// Papers submitted, flow complete
    Success { duty: DutyRecord },
    /// Proxy check-in form; keeps the entered fields
    Proxy {
        proxy_mobile: String,
        absent_mobile: String,
        reason: Option<EmergencyReason>,
    },
    /// Check-in recorded with submission deferred to a later visit
    Reported { duty: DutyRecord },
}

impl WizardStep {
    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::Scan => "scan",
            WizardStep::Verify { .. } => "verify",
            WizardStep::Submit { .. } => "submit",
            WizardStep::Success { .. } => "success",
            WizardStep::Proxy { .. } => "proxy",
            WizardStep::Reported { .. } => "reported",
        }
    }
}

fn failure_notice(err: &ClientError) -> Notice {
    match err {
        ClientError::Transport(_) => Notice::error(
            "Connection Error",
            "Could not reach the duty store. Check the connection and try again.",
        ),
        ClientError::UnknownMobile(_) => Notice::error(
            "Staff Not Found",
            "No staff entry matches this mobile number.",
        ),
        ClientError::UnknownStaff(message) => Notice::error("Staff Not Found", message.clone()),
        ClientError::Validation(message) => Notice::error("Invalid Input", message.clone()),
        ClientError::Conflict(_) => Notice::error(
            "Already Reported",
            "This duty already has a check-in on record.",
        ),
        ClientError::NotReported(_) => Notice::error(
            "Not Reported",
            "No check-in on record for this duty. Verify the mobile number first.",
        ),
        other => Notice::error("Something Went Wrong", other.to_string()),
    }
}

/// The check-in flow controller
///
/// Owns the current [`WizardStep`] and applies user actions to it,
/// mutating duty state through the injected store and reporting every
/// outcome through the injected notifier.
pub struct CheckinWizard<S, N> {
    store: S,
    notifier: N,
    config: ClientConfig,
    step: WizardStep,
}

impl<S: DutyStore, N: Notifier> CheckinWizard<S, N> {
    pub fn new(store: S, notifier: N, config: ClientConfig) -> Self {
        Self {
            store,
            notifier,
            config,
            step: WizardStep::Scan,
        }
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The exam session banner shown across the flow
    pub fn session(&self) -> ExamSession {
        ExamSession {
            exam_name: self.config.exam_name.clone(),
            time_slot: self.config.time_slot.clone(),
            duty_date: self.config.duty_date.clone(),
        }
    }

    /// Load the scan screen: the session banner plus the day's roster
    ///
    /// The roster comes from the store so the landing screen reflects
    /// what the store will actually serve.
    pub async fn load_session(&self) -> ClientResult<(ExamSession, Vec<DutyRecord>)> {
        let roster = self
            .store
            .list_duty_for_date(&self.config.duty_date)
            .await?;
        Ok((self.session(), roster))
    }

    fn advance(&mut self, next: WizardStep) {
        tracing::debug!(from = self.step.name(), to = next.name(), "wizard step");
        self.step = next;
    }

    fn wrong_step(&self, action: &str) -> ClientError {
        ClientError::Validation(format!(
            "{action} is not available from the {} step",
            self.step.name()
        ))
    }

    fn surface(&self, err: &ClientError) {
        tracing::warn!(step = self.step.name(), error = %err, "step action failed");
        self.notifier.notify(failure_notice(err));
    }

    async fn fetch_required(&self, mobile: &str) -> ClientResult<DutyRecord> {
        checkin::refresh(&self.store, mobile).await?.ok_or_else(|| {
            ClientError::InvalidResponse(format!(
                "no active record found for mobile {mobile} after write"
            ))
        })
    }

    /// A QR scan (or manual entry choice) arrived on the landing screen
    pub fn scan(&mut self) -> ClientResult<()> {
        if !matches!(self.step, WizardStep::Scan) {
            return Err(self.wrong_step("scan"));
        }
        self.notifier.notify(Notice::info(
            "QR Code Scanned",
            "Enter the mobile number to verify the duty.",
        ));
        self.advance(WizardStep::Verify {
            mobile: String::new(),
        });
        Ok(())
    }

    /// Open the proxy check-in form from the landing screen
    pub fn choose_proxy(&mut self) -> ClientResult<()> {
        if !matches!(self.step, WizardStep::Scan) {
            return Err(self.wrong_step("choose_proxy"));
        }
        self.advance(WizardStep::Proxy {
            proxy_mobile: String::new(),
            absent_mobile: String::new(),
            reason: None,
        });
        Ok(())
    }

    /// Verify the entered mobile number and route by its duty state
    ///
    /// Fresh check-ins that lose a race surface as a conflict; the
    /// wizard re-reads once and follows the already-reported path when
    /// the re-read finds the record.
    pub async fn verify(&mut self, mobile: &str) -> ClientResult<()> {
        if !matches!(self.step, WizardStep::Verify { .. }) {
            return Err(self.wrong_step("verify"));
        }

        // Keep the attempted input resident so a failed try re-renders it
        let mobile = mobile.trim().to_string();
        self.step = WizardStep::Verify {
            mobile: mobile.clone(),
        };

        if !checkin::is_valid_mobile(&mobile) {
            let err =
                ClientError::Validation("Please enter a valid 10-digit mobile number".to_string());
            self.surface(&err);
            return Err(err);
        }

        let outcome = match checkin::decide_on_verify(&self.store, &mobile).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.surface(&err);
                return Err(err);
            }
        };

        match outcome {
            VerifyOutcome::AlreadySubmitted(duty) => {
                self.notifier.notify(Notice::info(
                    "Already Submitted",
                    "Papers for this duty are already in. Thank you!",
                ));
                self.advance(WizardStep::Success { duty });
                Ok(())
            }
            VerifyOutcome::AlreadyReported(duty) => {
                self.notifier.notify(Notice::info(
                    "Already Reported",
                    "Check-in already recorded. Confirm submission once papers are collected.",
                ));
                self.advance(WizardStep::Submit { mobile, duty });
                Ok(())
            }
            VerifyOutcome::FreshReport(entry) => match checkin::report(&self.store, &mobile).await {
                Ok(_) => {
                    let duty = match self.fetch_required(&mobile).await {
                        Ok(duty) => duty,
                        Err(err) => {
                            self.surface(&err);
                            return Err(err);
                        }
                    };
                    self.notifier.notify(Notice::info(
                        "Successfully Reported",
                        format!("Check-in recorded for {}.", entry.name),
                    ));
                    self.advance(WizardStep::Submit { mobile, duty });
                    Ok(())
                }
                Err(ClientError::Conflict(_)) => self.recover_from_conflict(&mobile).await,
                Err(err) => {
                    self.surface(&err);
                    Err(err)
                }
            },
        }
    }

    /// A concurrent report won the race; re-read once and route by what
    /// actually landed instead of retrying the write.
    async fn recover_from_conflict(&mut self, mobile: &str) -> ClientResult<()> {
        let outcome = match checkin::decide_on_verify(&self.store, mobile).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.surface(&err);
                return Err(err);
            }
        };

        match outcome {
            VerifyOutcome::AlreadySubmitted(duty) => {
                self.notifier.notify(Notice::info(
                    "Already Submitted",
                    "Papers for this duty are already in. Thank you!",
                ));
                self.advance(WizardStep::Success { duty });
                Ok(())
            }
            VerifyOutcome::AlreadyReported(duty) => {
                self.notifier.notify(Notice::info(
                    "Already Reported",
                    "Check-in already recorded. Confirm submission once papers are collected.",
                ));
                self.advance(WizardStep::Submit {
                    mobile: mobile.to_string(),
                    duty,
                });
                Ok(())
            }
            // The duty was covered under a different mobile number, so a
            // re-read for this one finds nothing to resume.
            VerifyOutcome::FreshReport(_) => {
                let err = ClientError::Conflict(
                    "duty already reported under a different mobile number".to_string(),
                );
                self.notifier.notify(Notice::error(
                    "Duty Already Covered",
                    "Someone else has already checked in for this duty.",
                ));
                Err(err)
            }
        }
    }

    /// Confirm that the collected papers were handed in
    pub async fn confirm_submission(&mut self) -> ClientResult<()> {
        let mobile = match &self.step {
            WizardStep::Submit { mobile, .. } => mobile.clone(),
            _ => return Err(self.wrong_step("confirm_submission")),
        };

        if let Err(err) = checkin::submit(&self.store, &mobile).await {
            self.surface(&err);
            return Err(err);
        }

        let duty = match self.fetch_required(&mobile).await {
            Ok(duty) => duty,
            Err(err) => {
                self.surface(&err);
                return Err(err);
            }
        };

        self.notifier.notify(Notice::info(
            "Papers Submitted",
            "Duty completed. Thank you!",
        ));
        self.advance(WizardStep::Success { duty });
        Ok(())
    }

    /// Leave the submission for a later visit, keeping the check-in
    pub fn defer_submission(&mut self) -> ClientResult<()> {
        let duty = match &self.step {
            WizardStep::Submit { duty, .. } => duty.clone(),
            _ => return Err(self.wrong_step("defer_submission")),
        };

        self.notifier.notify(Notice::info(
            "Submission Pending",
            "Check-in stands. Come back to confirm once papers are collected.",
        ));
        self.advance(WizardStep::Reported { duty });
        Ok(())
    }

    /// Confirm the proxy check-in form
    ///
    /// Requires both mobile numbers and a selected reason; the absent
    /// staff member's assignment details are resolved from the
    /// directory, not taken from the form.
    pub async fn confirm_proxy(
        &mut self,
        proxy_mobile: &str,
        absent_mobile: &str,
        reason: Option<EmergencyReason>,
    ) -> ClientResult<()> {
        if !matches!(self.step, WizardStep::Proxy { .. }) {
            return Err(self.wrong_step("confirm_proxy"));
        }

        let proxy_mobile = proxy_mobile.trim().to_string();
        let absent_mobile = absent_mobile.trim().to_string();
        self.step = WizardStep::Proxy {
            proxy_mobile: proxy_mobile.clone(),
            absent_mobile: absent_mobile.clone(),
            reason,
        };

        if !checkin::is_valid_mobile(&proxy_mobile) || !checkin::is_valid_mobile(&absent_mobile) {
            let err = ClientError::Validation(
                "Both mobile numbers must be valid 10-digit numbers".to_string(),
            );
            self.surface(&err);
            return Err(err);
        }
        let Some(reason) = reason else {
            let err = ClientError::Validation("Please select an emergency reason".to_string());
            self.surface(&err);
            return Err(err);
        };

        if let Err(err) =
            checkin::report_proxy(&self.store, &proxy_mobile, &absent_mobile, reason).await
        {
            self.surface(&err);
            return Err(err);
        }

        let duty = match self.fetch_required(&proxy_mobile).await {
            Ok(duty) => duty,
            Err(err) => {
                self.surface(&err);
                return Err(err);
            }
        };

        self.notifier.notify(Notice::info(
            "Proxy Check-in Successful",
            format!(
                "{} covered the duty assigned to {}.",
                duty.reported_staff_name.as_deref().unwrap_or("The proxy"),
                duty.assigned_staff_name
            ),
        ));
        self.advance(WizardStep::Success { duty });
        Ok(())
    }

    /// Return to the landing screen, dropping all transient state
    pub fn back_to_home(&mut self) {
        self.advance(WizardStep::Scan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;
    use crate::store::MemoryDutyStore;
    use shared::models::StaffEntry;

    const DATE: &str = "2025-08-04";

    async fn wizard() -> CheckinWizard<MemoryDutyStore, MemoryNotifier> {
        let store = MemoryDutyStore::new(DATE);
        store
            .seed_roster(vec![StaffEntry {
                name: "A. Rao".to_string(),
                department: "Physics".to_string(),
                hall: "Hall 3".to_string(),
                duty_date: DATE.to_string(),
                mobile_no: "9876543210".to_string(),
            }])
            .await;

        let config = ClientConfig::new("http://localhost:8080").with_duty_date(DATE);
        CheckinWizard::new(store, MemoryNotifier::new(), config)
    }

    #[tokio::test]
    async fn test_happy_path_reaches_success() {
        let mut wizard = wizard().await;
        assert!(matches!(wizard.step(), WizardStep::Scan));

        wizard.scan().unwrap();
        assert!(matches!(wizard.step(), WizardStep::Verify { .. }));

        wizard.verify("9876543210").await.unwrap();
        assert!(matches!(wizard.step(), WizardStep::Submit { .. }));

        wizard.confirm_submission().await.unwrap();
        assert!(matches!(wizard.step(), WizardStep::Success { .. }));
    }

    #[tokio::test]
    async fn test_invalid_mobile_stays_on_verify() {
        let mut wizard = wizard().await;
        wizard.scan().unwrap();

        let err = wizard.verify("12345").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        // The attempted input stays resident for the retry
        assert!(matches!(
            wizard.step(),
            WizardStep::Verify { mobile } if mobile == "12345"
        ));
    }

    #[tokio::test]
    async fn test_actions_guard_their_step() {
        let mut wizard = wizard().await;

        let err = wizard.verify("9876543210").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(matches!(wizard.step(), WizardStep::Scan));

        let err = wizard.confirm_submission().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_defer_submission_reaches_reported() {
        let mut wizard = wizard().await;
        wizard.scan().unwrap();
        wizard.verify("9876543210").await.unwrap();

        wizard.defer_submission().unwrap();
        assert!(matches!(wizard.step(), WizardStep::Reported { .. }));

        wizard.back_to_home();
        assert!(matches!(wizard.step(), WizardStep::Scan));
    }

    #[tokio::test]
    async fn test_proxy_requires_reason() {
        let mut wizard = wizard().await;
        wizard.choose_proxy().unwrap();

        let err = wizard
            .confirm_proxy("1112223333", "9876543210", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(matches!(wizard.step(), WizardStep::Proxy { .. }));
    }

    #[tokio::test]
    async fn test_session_banner_comes_from_config() {
        let wizard = wizard().await;
        let session = wizard.session();
        assert_eq!(session.duty_date, DATE);
        assert!(!session.exam_name.is_empty());
    }

    #[tokio::test]
    async fn test_load_session_carries_the_roster() {
        let wizard = wizard().await;
        let (session, roster) = wizard.load_session().await.unwrap();
        assert_eq!(session.duty_date, DATE);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].assigned_staff_name, "A. Rao");
    }
}
