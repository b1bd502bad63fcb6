//! Per-field validation outcome

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of evaluating one field against its declared rules
///
/// The string form (`success`, `required`, `length`, `failed`) is what hosts
/// write back onto the field so the display layer and tests can inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Field passed every check (or was skipped)
    Success,
    /// Field is required but empty, or no member of its group is checked
    Required,
    /// Trimmed value is shorter than the minimum or longer than the maximum
    Length,
    /// Trimmed value does not match the bound format rule
    Failed,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [
        Verdict::Success,
        Verdict::Required,
        Verdict::Length,
        Verdict::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Success => "success",
            Verdict::Required => "required",
            Verdict::Length => "length",
            Verdict::Failed => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Success)
    }

    /// Message shown when the field declares no text for this outcome
    pub fn default_message(&self) -> &'static str {
        match self {
            Verdict::Success => "",
            Verdict::Required => "This field is required.",
            Verdict::Length => "This field does not have the expected length.",
            Verdict::Failed => "This field is not in the expected format.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown verdict string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown verdict: {0}")]
pub struct ParseVerdictError(pub String);

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|verdict| verdict.as_str() == s)
            .ok_or_else(|| ParseVerdictError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_string_forms() {
        assert_eq!(Verdict::Success.to_string(), "success");
        assert_eq!("length".parse::<Verdict>(), Ok(Verdict::Length));
        assert!("undefined".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_verdict_serde_uses_lowercase() {
        let json = serde_json::to_string(&Verdict::Failed).unwrap();
        assert_eq!(json, "\"failed\"");

        let parsed: Verdict = serde_json::from_str("\"required\"").unwrap();
        assert_eq!(parsed, Verdict::Required);
    }

    #[test]
    fn test_only_success_has_empty_default_message() {
        for verdict in Verdict::ALL {
            assert_eq!(verdict.default_message().is_empty(), verdict.is_success());
        }
    }
}
