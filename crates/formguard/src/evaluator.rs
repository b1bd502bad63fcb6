//! Per-field evaluation
//!
//! Checks run in a fixed order and the first one that decides returns:
//!
//! 1. hidden fields pass
//! 2. checkbox/radio groups pass iff a member is checked
//! 3. empty values are `required` or pass, depending on the required flag
//! 4. length bounds
//! 5. bound format rule
//!
//! Length runs before format so an out-of-range value is never reported as a
//! format mismatch while the user is still typing.

use crate::error::ConfigError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::rules::{FormatRule, RuleRegistry};
use crate::verdict::Verdict;

/// Evaluates fields against a rule registry
#[derive(Debug, Clone, Default)]
pub struct FieldEvaluator {
    registry: RuleRegistry,
    empty_values: Vec<String>,
}

impl FieldEvaluator {
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            empty_values: Vec::new(),
        }
    }

    /// Values (compared after trimming) treated as "nothing entered"
    pub fn with_empty_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.empty_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Merge caller rules over the current registry
    pub fn with_rules(mut self, custom: impl IntoIterator<Item = FormatRule>) -> Self {
        self.registry = std::mem::take(&mut self.registry).with_rules(custom);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn empty_values(&self) -> &[String] {
        &self.empty_values
    }

    /// Compute the verdict for one field
    ///
    /// Returns [`ConfigError::UnknownRule`] when the field is bound to a
    /// format rule the registry does not hold.
    ///
    /// Length bounds count Unicode scalar values of the trimmed value, not
    /// the UTF-16 code units a browser's `minlength`/`maxlength` use, so a
    /// character outside the Basic Multilingual Plane (most emoji) counts
    /// once here and twice in the browser.
    pub fn evaluate(&self, field: &FieldDescriptor) -> Result<Verdict, ConfigError> {
        if !field.visible {
            return Ok(Verdict::Success);
        }

        if let FieldKind::Group { checked } = field.kind {
            return Ok(if checked > 0 {
                Verdict::Success
            } else {
                Verdict::Required
            });
        }

        let value = field.value.trim();
        if self.is_empty(value) {
            return Ok(if field.required {
                Verdict::Required
            } else {
                Verdict::Success
            });
        }

        let length = value.chars().count();
        if field.min_length.is_some_and(|min| length < min) {
            return Ok(Verdict::Length);
        }
        if field.max_length.is_some_and(|max| length > max) {
            return Ok(Verdict::Length);
        }

        if let Some(ref rule_name) = field.format {
            let rule = self
                .registry
                .find(rule_name)
                .ok_or_else(|| ConfigError::UnknownRule {
                    field: field.name.clone(),
                    rule: rule_name.clone(),
                })?;
            if !rule.test(value) {
                return Ok(Verdict::Failed);
            }
        }

        Ok(Verdict::Success)
    }

    fn is_empty(&self, trimmed: &str) -> bool {
        trimmed.is_empty() || self.empty_values.iter().any(|empty| empty == trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> FieldEvaluator {
        FieldEvaluator::new(RuleRegistry::builtin()).with_empty_values(["--", "N/A"])
    }

    #[test]
    fn test_hidden_field_always_passes() {
        let field = FieldDescriptor::text("comment").required().hidden();
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Success));

        let group = FieldDescriptor::group("plan-a", "plan", 0).hidden();
        assert_eq!(evaluator().evaluate(&group), Ok(Verdict::Success));
    }

    #[test]
    fn test_group_needs_one_checked_member() {
        let none = FieldDescriptor::group("plan-a", "plan", 0);
        let one = FieldDescriptor::group("plan-a", "plan", 1);
        assert_eq!(evaluator().evaluate(&none), Ok(Verdict::Required));
        assert_eq!(evaluator().evaluate(&one), Ok(Verdict::Success));
    }

    #[test]
    fn test_group_ignores_text_constraints() {
        let field = FieldDescriptor::group("terms", "terms", 1)
            .with_min_length(50)
            .with_format("missing-rule");
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Success));
    }

    #[test]
    fn test_empty_optional_field_skips_remaining_checks() {
        for value in ["", "   ", "--", " N/A "] {
            let field = FieldDescriptor::text("nickname")
                .with_value(value)
                .with_min_length(5)
                .with_format("no-such-rule");
            assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Success), "value {value:?}");
        }
    }

    #[test]
    fn test_empty_required_field() {
        for value in ["", "\t\n", "--"] {
            let field = FieldDescriptor::text("name").with_value(value).required();
            assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Required), "value {value:?}");
        }
    }

    #[test]
    fn test_length_reported_before_format() {
        let field = FieldDescriptor::text("zip")
            .with_value("123")
            .with_min_length(5)
            .with_format("numeric");
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Length));

        let field = FieldDescriptor::text("code")
            .with_value("abcdef")
            .with_max_length(3)
            .with_format("numeric");
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Length));
    }

    #[test]
    fn test_length_uses_trimmed_characters() {
        let field = FieldDescriptor::text("city")
            .with_value("  Montréal  ")
            .with_min_length(8)
            .with_max_length(8);
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Success));
    }

    #[test]
    fn test_astral_character_counts_once() {
        let field = FieldDescriptor::text("mood")
            .with_value("ok \u{1F600}")
            .with_max_length(4);
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Success));
    }

    #[test]
    fn test_format_mismatch_is_failed() {
        let field = FieldDescriptor::text("email")
            .with_value("user@@example")
            .with_format("email");
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Failed));

        let field = field.with_value(" user@example.com ");
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Success));
    }

    #[test]
    fn test_unknown_rule_is_config_error() {
        let field = FieldDescriptor::text("iban")
            .with_value("CA00 1234")
            .with_format("iban");
        assert_eq!(
            evaluator().evaluate(&field),
            Err(ConfigError::UnknownRule {
                field: "iban".to_string(),
                rule: "iban".to_string(),
            })
        );
    }

    #[test]
    fn test_with_rules_registers_missing_format() {
        let field = FieldDescriptor::text("iban")
            .with_value("CA00 1234")
            .with_format("iban");
        let evaluator = evaluator()
            .with_rules(vec![FormatRule::regex("iban", r"^[A-Z]{2}\d{2} \d{4}$").unwrap()]);

        assert_eq!(evaluator.evaluate(&field), Ok(Verdict::Success));
        assert_eq!(evaluator.empty_values(), ["--", "N/A"]);
    }

    #[test]
    fn test_field_without_constraints_passes() {
        let field = FieldDescriptor::text("notes").with_value("anything at all");
        assert_eq!(evaluator().evaluate(&field), Ok(Verdict::Success));
    }
}
