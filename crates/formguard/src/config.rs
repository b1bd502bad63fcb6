// File: src/config.rs
// Purpose: Construction-time form options, loadable from TOML

use crate::error::ConfigError;
use crate::evaluator::FieldEvaluator;
use crate::rules::{FormatRule, RuleRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options recognized when a form is set up
///
/// ```toml
/// empty_values = ["--", "Select..."]
/// form_endpoint = "https://api.example.com/contact"
///
/// [[validators]]
/// name = "postal-code"
/// pattern = '^\d{5}$'
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Values treated as "nothing entered"
    #[serde(default)]
    pub empty_values: Vec<String>,

    /// Remote submission target; empty or absent means native submission
    #[serde(default)]
    pub form_endpoint: Option<String>,

    /// Caller rules merged over the built-in set
    #[serde(default)]
    pub validators: Vec<RuleSpec>,
}

/// A caller-supplied regex format rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub pattern: String,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    pub fn compile(&self) -> Result<FormatRule, ConfigError> {
        FormatRule::regex(self.name.clone(), &self.pattern)
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form config: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse form config: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid form configuration")
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.form_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_empty_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.empty_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_validator(mut self, spec: RuleSpec) -> Self {
        self.validators.push(spec);
        self
    }

    /// Remote endpoint, if one is configured
    pub fn endpoint(&self) -> Option<&str> {
        self.form_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }

    /// Built-in rules with the configured validators merged over them
    pub fn build_registry(&self) -> Result<RuleRegistry, ConfigError> {
        let custom = self
            .validators
            .iter()
            .map(RuleSpec::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleRegistry::builtin().with_rules(custom))
    }

    pub fn build_evaluator(&self) -> Result<FieldEvaluator, ConfigError> {
        Ok(FieldEvaluator::new(self.build_registry()?)
            .with_empty_values(self.empty_values.iter().cloned()))
    }
}
