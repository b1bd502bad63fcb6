//! Form-level validation passes and the submit decision
//!
//! One [`FormCoordinator`] is created per form. Its command handlers
//! (`on_field_changed`, `on_submit_requested`) are what a host wires its
//! change/blur and submit events to, and can be called directly in tests.

use crate::config::FormConfig;
use crate::error::{ConfigError, FormError};
use crate::evaluator::FieldEvaluator;
use crate::field::FieldDescriptor;
use crate::host::{FormHost, SubmissionState};
use crate::rules::FormatRule;
use crate::transport::SubmitTransport;
use crate::verdict::Verdict;
use tracing::{debug, error, info, warn};

/// Where a form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    /// Some field failed; errors are shown and the user may correct and retry
    Blocked,
    SubmittingRemote,
    /// Handed to the host's native submission path
    SubmittedLocally,
    RemoteSuccess,
    RemoteFailed,
}

impl SubmitPhase {
    /// A remote submission settled; the submit control stays disabled until reset
    pub fn is_remote_settled(&self) -> bool {
        matches!(self, SubmitPhase::RemoteSuccess | SubmitPhase::RemoteFailed)
    }
}

/// Outcome of one field in a validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub id: String,
    pub name: String,
    pub outcome: Result<Verdict, ConfigError>,
}

impl FieldReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Ok(Verdict::Success))
    }
}

/// Outcome of a full validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    pub fields: Vec<FieldReport>,
}

impl FormReport {
    /// True iff every field evaluated to `success`
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FieldReport::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|report| !report.passed())
    }

    pub fn verdict(&self, id: &str) -> Option<Verdict> {
        self.fields
            .iter()
            .find(|report| report.id == id)
            .and_then(|report| report.outcome.as_ref().ok().copied())
    }

    pub fn config_errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.fields
            .iter()
            .filter_map(|report| report.outcome.as_ref().err())
    }
}

/// Validates a form's fields and decides how (or whether) it is submitted
pub struct FormCoordinator<H, T> {
    evaluator: FieldEvaluator,
    endpoint: Option<String>,
    host: H,
    transport: T,
    phase: SubmitPhase,
}

impl<H, T> FormCoordinator<H, T>
where
    H: FormHost,
    T: SubmitTransport,
{
    /// Create a coordinator from configuration
    pub fn new(config: &FormConfig, host: H, transport: T) -> Result<Self, ConfigError> {
        let evaluator = config.build_evaluator()?;
        let endpoint = config.endpoint().map(str::to_string);
        Ok(Self::from_parts(evaluator, endpoint, host, transport))
    }

    pub fn from_parts(
        evaluator: FieldEvaluator,
        endpoint: Option<String>,
        host: H,
        transport: T,
    ) -> Self {
        Self {
            evaluator,
            endpoint,
            host,
            transport,
            phase: SubmitPhase::Idle,
        }
    }

    /// Merge programmatic rules over the configured ones
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = FormatRule>) -> Self {
        self.evaluator = self.evaluator.with_rules(rules);
        self
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn evaluator(&self) -> &FieldEvaluator {
        &self.evaluator
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Evaluate one field and reflect the outcome on the host
    pub fn validate_field(&mut self, field: &FieldDescriptor) -> Result<Verdict, ConfigError> {
        let outcome = self.evaluator.evaluate(field);

        match &outcome {
            Ok(verdict) => {
                debug!("Field '{}' evaluated to {}", field.id, verdict);
                self.host.record_verdict(&field.id, Some(*verdict));
                if verdict.is_success() {
                    self.host.hide_message(&field.name);
                } else {
                    self.host.show_message(&field.name, field.message_for(*verdict));
                }
            }
            Err(e) => {
                error!("Cannot validate field '{}': {}", field.id, e);
                self.host.record_verdict(&field.id, None);
                self.host.hide_message(&field.name);
            }
        }

        outcome
    }

    /// Change/blur handler for a single field
    pub fn on_field_changed(&mut self, id: &str) -> Result<Verdict, FormError> {
        let field = self
            .host
            .field(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;

        Ok(self.validate_field(&field)?)
    }

    /// Re-validate every field and report each outcome
    pub fn validate_form_report(&mut self) -> FormReport {
        let fields = self.host.fields();
        let mut report = FormReport::default();

        for field in &fields {
            let outcome = self.validate_field(field);
            report.fields.push(FieldReport {
                id: field.id.clone(),
                name: field.name.clone(),
                outcome,
            });
        }

        report
    }

    /// Re-validate every field; true iff all of them pass
    pub fn validate_form(&mut self) -> bool {
        self.validate_form_report().is_valid()
    }

    /// Submit handler
    ///
    /// Validates the whole form, then blocks, submits natively, or posts to
    /// the configured endpoint. Ignored while a remote submission is in
    /// flight or after one has settled (until [`reset`](Self::reset)).
    pub async fn on_submit_requested(&mut self) -> SubmitPhase {
        if self.phase == SubmitPhase::SubmittingRemote || self.phase.is_remote_settled() {
            debug!("Submit ignored in phase {:?}", self.phase);
            return self.phase;
        }

        self.phase = SubmitPhase::Validating;

        let report = self.validate_form_report();
        if !report.is_valid() {
            info!(
                "Submission blocked: {} field(s) did not pass",
                report.failures().count()
            );
            self.phase = SubmitPhase::Blocked;
            return self.phase;
        }

        self.phase = match self.endpoint.clone() {
            Some(endpoint) => self.submit_remote(&endpoint).await,
            None => {
                info!("Form valid, handing off to native submission");
                self.host.submit_natively();
                SubmitPhase::SubmittedLocally
            }
        };

        self.phase
    }

    /// Re-enable submission after a settled remote pass
    pub fn reset(&mut self) {
        if self.phase.is_remote_settled() {
            self.host.set_submit_enabled(true);
        }
        self.phase = SubmitPhase::Idle;
    }

    async fn submit_remote(&mut self, endpoint: &str) -> SubmitPhase {
        self.phase = SubmitPhase::SubmittingRemote;

        let data = self.host.form_data();
        self.host.set_submission_state(SubmissionState::Sending);
        info!("Submitting form to {}", endpoint);

        let state = match self.transport.submit(endpoint, &data).await {
            Ok(response) if response.is_success() => SubmissionState::Success,
            Ok(response) => {
                warn!(
                    "Form submission to {} returned status {}",
                    endpoint, response.status
                );
                SubmissionState::Failed
            }
            Err(e) => {
                error!("Form submission to {} failed: {}", endpoint, e);
                SubmissionState::Failed
            }
        };

        self.host.set_submission_state(state);
        // Disabled once per settled submission, whatever the outcome
        self.host.set_submit_enabled(false);

        match state {
            SubmissionState::Success => SubmitPhase::RemoteSuccess,
            _ => SubmitPhase::RemoteFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryForm;
    use crate::rules::RuleRegistry;
    use crate::transport::SubmitResponse;
    use crate::{FormData, TransportError};
    use async_trait::async_trait;

    struct NeverCalled;

    #[async_trait]
    impl SubmitTransport for NeverCalled {
        async fn submit(
            &self,
            endpoint: &str,
            _data: &FormData,
        ) -> Result<SubmitResponse, TransportError> {
            panic!("unexpected submission to {endpoint}");
        }
    }

    fn coordinator(form: MemoryForm) -> FormCoordinator<MemoryForm, NeverCalled> {
        FormCoordinator::new(&FormConfig::default(), form, NeverCalled).unwrap()
    }

    #[test]
    fn test_validate_field_shows_and_hides_message() {
        let form = MemoryForm::new().with_field(
            FieldDescriptor::text("email")
                .required()
                .with_message(Verdict::Required, "Email is required"),
        );
        let mut coordinator = coordinator(form);

        assert_eq!(coordinator.on_field_changed("email"), Ok(Verdict::Required));
        assert!(coordinator.host().is_message_visible("email"));
        assert_eq!(
            coordinator.host().message("email").unwrap().text,
            "Email is required"
        );
        assert_eq!(coordinator.host().verdict("email"), Some(Verdict::Required));

        coordinator.host_mut().set_value("email", "user@example.com");
        assert_eq!(coordinator.on_field_changed("email"), Ok(Verdict::Success));
        assert!(!coordinator.host().is_message_visible("email"));
        assert_eq!(coordinator.host().verdict("email"), Some(Verdict::Success));
    }

    #[test]
    fn test_unknown_field_id() {
        let mut coordinator = coordinator(MemoryForm::new());
        assert_eq!(
            coordinator.on_field_changed("ghost"),
            Err(FormError::UnknownField("ghost".to_string()))
        );
    }

    #[test]
    fn test_misconfigured_rule_never_passes() {
        let form = MemoryForm::new().with_field(
            FieldDescriptor::text("iban")
                .with_value("CA12")
                .with_format("iban"),
        );
        let mut coordinator = coordinator(form);

        let report = coordinator.validate_form_report();
        assert!(!report.is_valid());
        assert_eq!(report.config_errors().count(), 1);
        assert!(coordinator.host().is_recorded("iban"));
        assert_eq!(coordinator.host().verdict("iban"), None);
        assert!(!coordinator.host().is_message_visible("iban"));
    }

    #[test]
    fn test_with_rules_resolves_missing_rule() {
        let form = MemoryForm::new().with_field(
            FieldDescriptor::text("iban")
                .with_value("CA12")
                .with_format("iban"),
        );
        let mut coordinator = coordinator(form)
            .with_rules(vec![FormatRule::regex("iban", r"^[A-Z]{2}\d+$").unwrap()]);

        assert!(coordinator.validate_form());
        assert_eq!(coordinator.host().verdict("iban"), Some(Verdict::Success));
    }

    #[test]
    fn test_report_keeps_specific_failure_kind() {
        let form = MemoryForm::new()
            .with_field(FieldDescriptor::text("first").with_value("Ana"))
            .with_field(
                FieldDescriptor::text("zip")
                    .with_value("12")
                    .with_min_length(5),
            )
            .with_field(FieldDescriptor::text("last").with_value("Lima"));
        let mut coordinator = coordinator(form);

        let report = coordinator.validate_form_report();
        assert!(!report.is_valid());
        assert_eq!(report.verdict("zip"), Some(Verdict::Length));
        assert_eq!(report.verdict("first"), Some(Verdict::Success));
        assert_eq!(coordinator.host().verdict("zip"), Some(Verdict::Length));
    }

    #[test]
    fn test_from_parts_without_endpoint() {
        let evaluator = FieldEvaluator::new(RuleRegistry::builtin());
        let coordinator =
            FormCoordinator::from_parts(evaluator, None, MemoryForm::new(), NeverCalled);
        assert_eq!(coordinator.phase(), SubmitPhase::Idle);
        assert!(coordinator.endpoint().is_none());
    }

    #[tokio::test]
    async fn test_reset_after_block_returns_to_idle() {
        let form = MemoryForm::new().with_field(FieldDescriptor::text("name").required());
        let mut coordinator = coordinator(form);

        assert_eq!(coordinator.on_submit_requested().await, SubmitPhase::Blocked);
        coordinator.reset();
        assert_eq!(coordinator.phase(), SubmitPhase::Idle);
        assert!(coordinator.host().submit_enabled());
    }
}
