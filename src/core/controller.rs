use crate::core::messages;
use crate::core::notification::NotificationCenter;
use crate::core::validator;
use crate::domain::model::{Field, FieldValidation, NotificationKind, SubmissionOutcome, SubmitReply};
use crate::domain::ports::{FormSubmitter, FormView, NotificationSurface, Timings};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Login form controller: live validation, password toggle and the submit flow.
pub struct FormController<V, S>
where
    V: FormView + NotificationSurface + 'static,
    S: FormSubmitter,
{
    view: Arc<V>,
    submitter: S,
    notifications: NotificationCenter<V>,
    reset_delay: Duration,
    in_flight: AtomicBool,
    pending_reset: Mutex<Option<JoinHandle<()>>>,
}

impl<V, S> FormController<V, S>
where
    V: FormView + NotificationSurface + 'static,
    S: FormSubmitter,
{
    pub fn new(view: Arc<V>, submitter: S, timings: Timings) -> Self {
        Self {
            notifications: NotificationCenter::new(Arc::clone(&view), &timings),
            view,
            submitter,
            reset_delay: timings.reset_delay,
            in_flight: AtomicBool::new(false),
            pending_reset: Mutex::new(None),
        }
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    pub fn on_email_input(&self) -> FieldValidation {
        let validation = validator::validate_email_input(&self.view.field_value(Field::Email));
        self.view.apply_validation(Field::Email, &validation);
        validation
    }

    pub fn on_password_input(&self) -> FieldValidation {
        let validation = validator::validate_password_input(&self.view.field_value(Field::Password));
        self.view.apply_validation(Field::Password, &validation);
        validation
    }

    /// Flips the password input between masked and plain text. Returns the new visibility.
    pub fn toggle_password_visibility(&self) -> bool {
        let visible = !self.view.password_visible();
        self.view.set_password_visible(visible);
        visible
    }

    /// Handles a submit event. Never returns an error: every failure ends up as a notification.
    pub async fn submit(&self) -> SubmissionOutcome {
        if self.in_flight.load(Ordering::Acquire) || self.view.is_loading() {
            tracing::debug!("Submit ignored, a submission is already in flight");
            return SubmissionOutcome::Busy;
        }

        // Both fields are re-validated so both show feedback, even when the first one fails.
        let email = validator::validate_email_submit(&self.view.field_value(Field::Email));
        self.view.apply_validation(Field::Email, &email);
        let password = validator::validate_password_submit(&self.view.field_value(Field::Password));
        self.view.apply_validation(Field::Password, &password);

        if !email.is_valid() || !password.is_valid() {
            tracing::info!("❌ Validation failed, nothing submitted");
            self.notifications.show(messages::CHECK_INPUT, NotificationKind::Error);
            return SubmissionOutcome::Rejected;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return SubmissionOutcome::Busy;
        }
        self.view.set_loading(true);

        let data = self.view.serialize_form();
        tracing::debug!("Submitting form with {} fields", data.len());

        let outcome = match self.submitter.submit(&data).await {
            Ok(reply) => self.handle_reply(reply),
            Err(e) => {
                tracing::error!("❌ Form submission failed: {} (Category: {:?})", e, e.category());
                let message = e.detail();
                self.notifications.show(
                    format!("{}{}", messages::NETWORK_ERROR_PREFIX, message),
                    NotificationKind::Error,
                );
                SubmissionOutcome::NetworkError { message }
            }
        };

        self.view.set_loading(false);
        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    /// Waits for the delayed form reset and the current notification to finish.
    pub async fn settle(&self) {
        let reset = self.lock_pending_reset().take();
        if let Some(handle) = reset {
            let _ = handle.await;
        }
        self.notifications.settle().await;
    }

    fn handle_reply(&self, reply: SubmitReply) -> SubmissionOutcome {
        if reply.is_success() {
            tracing::info!("✅ Form accepted by endpoint");
            self.notifications.show(messages::SUBMIT_SUCCESS, NotificationKind::Success);
            self.schedule_reset();
            return SubmissionOutcome::Accepted {
                message: reply.body.message,
            };
        }

        let message = reply
            .body
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| messages::UNKNOWN_ERROR.to_string());
        tracing::warn!("Form rejected by endpoint (http_ok: {}): {}", reply.http_ok, message);
        self.notifications.show(
            format!("{}{}", messages::SUBMIT_FAILED_PREFIX, message),
            NotificationKind::Error,
        );
        SubmissionOutcome::Failed { message }
    }

    fn schedule_reset(&self) {
        let view = Arc::clone(&self.view);
        let delay = self.reset_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.reset_form();
            view.apply_validation(Field::Email, &FieldValidation::neutral());
            view.apply_validation(Field::Password, &FieldValidation::neutral());
            tracing::debug!("Form reset after successful submission");
        });

        // An earlier reset that has not fired yet is left running; both clear the same form.
        if let Some(previous) = self.lock_pending_reset().replace(handle) {
            if !previous.is_finished() {
                tracing::debug!("Superseding a pending form reset");
            }
        }
    }

    fn lock_pending_reset(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending_reset
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::InMemoryDocument;
    use crate::domain::model::{FormData, SubmitResponse};
    use crate::utils::error::{FormError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    enum Script {
        Reply(SubmitReply),
        Fail,
    }

    struct MockSubmitter {
        script: Script,
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<FormData>>>,
    }

    impl MockSubmitter {
        fn replying(http_ok: bool, success: bool, message: Option<&str>) -> Self {
            Self::with_script(Script::Reply(SubmitReply {
                http_ok,
                body: SubmitResponse {
                    success,
                    message: message.map(str::to_string),
                },
            }))
        }

        fn failing() -> Self {
            Self::with_script(Script::Fail)
        }

        fn with_script(script: Script) -> Self {
            Self {
                script,
                calls: Arc::new(AtomicUsize::new(0)),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl FormSubmitter for MockSubmitter {
        async fn submit(&self, data: &FormData) -> Result<SubmitReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(data.clone());
            match &self.script {
                Script::Reply(reply) => Ok(reply.clone()),
                Script::Fail => Err(FormError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        }
    }

    fn document() -> Arc<InMemoryDocument> {
        Arc::new(InMemoryDocument::new(vec![(
            "access_key".to_string(),
            "test-key".to_string(),
        )]))
    }

    fn controller(
        doc: &Arc<InMemoryDocument>,
        submitter: MockSubmitter,
    ) -> FormController<InMemoryDocument, MockSubmitter> {
        FormController::new(Arc::clone(doc), submitter, Timings::default())
    }

    #[tokio::test]
    async fn test_live_validation_applies_classes() {
        let doc = document();
        let ctrl = controller(&doc, MockSubmitter::replying(true, true, None));

        doc.type_into(Field::Email, "kein-at-zeichen");
        ctrl.on_email_input();
        assert!(doc.has_class("email", "input-invalid"));
        assert!(doc.has_class("emailValidation", "validation-invalid"));
        assert_eq!(doc.text("emailValidation"), messages::EMAIL_INVALID);

        doc.type_into(Field::Email, "max@gmx.de");
        ctrl.on_email_input();
        assert!(doc.has_class("email", "input-valid"));
        assert!(!doc.has_class("email", "input-invalid"));
        assert_eq!(doc.text("emailValidation"), messages::EMAIL_VALID);

        doc.type_into(Field::Email, "");
        ctrl.on_email_input();
        assert!(!doc.has_class("email", "input-valid"));
        assert!(!doc.has_class("emailValidation", "validation-valid"));
        assert_eq!(doc.text("emailValidation"), "");
    }

    #[tokio::test]
    async fn test_password_live_validation() {
        let doc = document();
        let ctrl = controller(&doc, MockSubmitter::replying(true, true, None));

        doc.type_into(Field::Password, "kurz");
        assert!(!ctrl.on_password_input().is_valid());
        assert!(doc.has_class("password", "input-invalid"));

        doc.type_into(Field::Password, "lang genug");
        assert!(ctrl.on_password_input().is_valid());
        assert_eq!(doc.text("passwordValidation"), messages::PASSWORD_VALID);
    }

    #[tokio::test]
    async fn test_toggle_password_visibility() {
        let doc = document();
        let ctrl = controller(&doc, MockSubmitter::replying(true, true, None));

        assert_eq!(doc.input_type("password"), "password");
        assert!(ctrl.toggle_password_visibility());
        assert_eq!(doc.input_type("password"), "text");
        assert!(doc.has_class("togglePasswordIcon", "fa-eye-slash"));
        assert!(!doc.has_class("togglePasswordIcon", "fa-eye"));

        assert!(!ctrl.toggle_password_visibility());
        assert_eq!(doc.input_type("password"), "password");
        assert!(doc.has_class("togglePasswordIcon", "fa-eye"));
    }

    #[tokio::test]
    async fn test_invalid_fields_never_reach_submitter() {
        for (email, password) in [("", ""), ("max@gmx.de", "123"), ("bad", "secret123"), ("", "secret123")] {
            let doc = document();
            let submitter = MockSubmitter::replying(true, true, None);
            let calls = Arc::clone(&submitter.calls);
            let ctrl = controller(&doc, submitter);

            doc.type_into(Field::Email, email);
            doc.type_into(Field::Password, password);

            assert_eq!(ctrl.submit().await, SubmissionOutcome::Rejected);
            assert_eq!(calls.load(Ordering::SeqCst), 0);
            assert!(!doc.is_loading());
            assert_eq!(doc.notification_messages(), vec![messages::CHECK_INPUT.to_string()]);
        }
    }

    #[tokio::test]
    async fn test_submit_marks_required_fields() {
        let doc = document();
        let ctrl = controller(&doc, MockSubmitter::replying(true, true, None));

        ctrl.submit().await;

        assert_eq!(doc.text("emailValidation"), messages::EMAIL_REQUIRED);
        assert_eq!(doc.text("passwordValidation"), messages::PASSWORD_REQUIRED);
        assert!(doc.has_class("email", "input-invalid"));
        assert!(doc.has_class("password", "input-invalid"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resets_form_after_delay() {
        let doc = document();
        let submitter = MockSubmitter::replying(true, true, Some("Email sent successfully!"));
        let seen = Arc::clone(&submitter.seen);
        let ctrl = controller(&doc, submitter);

        doc.type_into(Field::Email, "max@gmx.de");
        doc.type_into(Field::Password, "geheim123");

        let outcome = ctrl.submit().await;
        assert!(outcome.is_accepted());
        assert!(!doc.is_loading());
        assert_eq!(doc.notification_messages(), vec![messages::SUBMIT_SUCCESS.to_string()]);
        assert!(doc.has_class("notification-1", "success"));

        let sent = seen.lock().unwrap()[0].clone();
        assert_eq!(sent.get("access_key"), Some("test-key"));
        assert_eq!(sent.get("email"), Some("max@gmx.de"));
        assert_eq!(sent.get("password"), Some("geheim123"));

        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert_eq!(doc.field_value(Field::Email), "max@gmx.de");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(doc.field_value(Field::Email), "");
        assert_eq!(doc.field_value(Field::Password), "");
        assert!(!doc.has_class("email", "input-valid"));
        assert_eq!(doc.text("passwordValidation"), "");
        assert_eq!(doc.serialize_form().get("access_key"), Some("test-key"));

        ctrl.settle().await;
        assert!(doc.notification_messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_failure_keeps_form() {
        let doc = document();
        let ctrl = controller(&doc, MockSubmitter::replying(true, false, Some("Invalid access key")));

        doc.type_into(Field::Email, "max@gmx.de");
        doc.type_into(Field::Password, "geheim123");

        let outcome = ctrl.submit().await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed {
                message: "Invalid access key".to_string()
            }
        );
        assert_eq!(
            doc.notification_messages(),
            vec!["Fehler bei der Übermittlung: Invalid access key".to_string()]
        );

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(doc.field_value(Field::Email), "max@gmx.de");
        assert!(doc.has_class("email", "input-valid"));
    }

    #[tokio::test]
    async fn test_http_error_without_message_uses_fallback() {
        let doc = document();
        let ctrl = controller(&doc, MockSubmitter::replying(false, true, None));

        doc.type_into(Field::Email, "max@gmx.de");
        doc.type_into(Field::Password, "geheim123");

        let outcome = ctrl.submit().await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed {
                message: messages::UNKNOWN_ERROR.to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_shows_network_notification() {
        let doc = document();
        let ctrl = controller(&doc, MockSubmitter::failing());

        doc.type_into(Field::Email, "max@gmx.de");
        doc.type_into(Field::Password, "geheim123");

        let outcome = ctrl.submit().await;
        assert!(matches!(outcome, SubmissionOutcome::NetworkError { .. }));
        assert!(!doc.is_loading());
        assert!(!doc.is_disabled("loginButton"));

        let shown = doc.notification_messages();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].starts_with(messages::NETWORK_ERROR_PREFIX));
        assert_eq!(shown[0], "Netzwerkfehler: connection refused");
        assert_eq!(
            outcome,
            SubmissionOutcome::NetworkError {
                message: "connection refused".to_string()
            }
        );

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(doc.field_value(Field::Password), "geheim123");
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_ignored() {
        let doc = document();
        let submitter = MockSubmitter::replying(true, true, None);
        let calls = Arc::clone(&submitter.calls);
        let ctrl = controller(&doc, submitter);

        doc.type_into(Field::Email, "max@gmx.de");
        doc.type_into(Field::Password, "geheim123");
        doc.set_loading(true);

        assert_eq!(ctrl.submit().await, SubmissionOutcome::Busy);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        doc.set_loading(false);
        assert!(ctrl.submit().await.is_accepted());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    struct GatedSubmitter {
        gate: Arc<tokio::sync::Notify>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl FormSubmitter for GatedSubmitter {
        async fn submit(&self, _data: &FormData) -> Result<SubmitReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(SubmitReply {
                http_ok: true,
                body: SubmitResponse {
                    success: true,
                    message: None,
                },
            })
        }
    }

    #[tokio::test]
    async fn test_concurrent_submits_send_once() {
        let doc = document();
        let gate = Arc::new(tokio::sync::Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let ctrl = FormController::new(
            Arc::clone(&doc),
            GatedSubmitter {
                gate: Arc::clone(&gate),
                calls: Arc::clone(&calls),
            },
            Timings::default(),
        );

        doc.type_into(Field::Email, "max@gmx.de");
        doc.type_into(Field::Password, "geheim123");

        let (first, second) = tokio::join!(ctrl.submit(), async {
            // The first submit is parked on the gate by the time this runs
            assert!(doc.is_loading());
            let outcome = ctrl.submit().await;
            gate.notify_one();
            outcome
        });

        assert!(first.is_accepted());
        assert_eq!(second, SubmissionOutcome::Busy);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!doc.is_loading());
    }
}
