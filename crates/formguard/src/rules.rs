//! Named format rules and the registry fields look them up in
//!
//! A [`FormatRule`] is identified by its name. Registries are built by keying
//! rules by name, so a later rule with the same name replaces an earlier one.

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Built-in rule names with their patterns, in registration order
const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("tel", r"^\+?\(?[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4,6}$"),
    (
        "email",
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    ),
    // Canadian postal code, e.g. "H2X 1Y4"
    (
        "postal-code",
        r"(?i)^[ABCEGHJ-NPRSTVXY]\d[ABCEGHJ-NPRSTV-Z]\s?-?\d[ABCEGHJ-NPRSTV-Z]\d$",
    ),
    ("alpha", r"^[a-zA-Z]+$"),
    ("text", r"^[\p{Latin}\s'`\x{2019}-]+$"),
    ("numeric", r"^[ 0-9]+$"),
    ("alphanumeric", r"^[ 0-9a-zA-Z]+$"),
    ("alphanumeric-extended", r"^[\p{Latin}0-9'`\x{2019}-]+$"),
    // Civic number (optionally ranged or suffixed) followed by the street
    (
        "address",
        r"^[A-Za-z]*\d+[A-Za-z]*(?:[-/&][A-Za-z]*\d+[A-Za-z]*)*(?:\s+[\p{Latin}0-9\s.,'#/-]+)?$",
    ),
    (
        "url",
        r"(?i)^(?:https?://)?(?:www\.)?[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}(?::\d{1,5})?(?:/\S*)?$",
    ),
];

static BUILTIN_RULES: Lazy<Vec<FormatRule>> = Lazy::new(|| {
    BUILTIN_PATTERNS
        .iter()
        .map(|(name, pattern)| {
            let regex = Regex::new(pattern).expect("built-in format pattern must compile");
            FormatRule::from_regex(*name, regex)
        })
        .collect()
});

/// A named predicate for a field content convention (email, phone, ...)
#[derive(Clone)]
pub struct FormatRule {
    name: String,
    pattern: Option<String>,
    predicate: Predicate,
}

impl FormatRule {
    /// Create a rule from an arbitrary predicate
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            pattern: None,
            predicate: Arc::new(predicate),
        }
    }

    /// Compile a regex pattern into a rule
    pub fn regex(name: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        match Regex::new(pattern) {
            Ok(regex) => Ok(Self::from_regex(name, regex)),
            Err(e) => Err(ConfigError::InvalidPattern {
                name,
                reason: e.to_string(),
            }),
        }
    }

    pub fn from_regex(name: impl Into<String>, regex: Regex) -> Self {
        let pattern = regex.as_str().to_string();
        Self {
            name: name.into(),
            pattern: Some(pattern),
            predicate: Arc::new(move |value| regex.is_match(value)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source pattern, when the rule was built from a regex
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Check a (trimmed) value against the rule
    pub fn test(&self, value: &str) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for FormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Ordered set of format rules, unique by name
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<FormatRule>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in rules
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES.clone(),
        }
    }

    /// Build a registry from rules; a later rule replaces an earlier one with the same name
    pub fn from_rules(rules: impl IntoIterator<Item = FormatRule>) -> Self {
        let mut registry = Self::new();
        for rule in rules {
            registry.insert(rule);
        }
        registry
    }

    /// Merge caller rules over a base set
    ///
    /// Base rules keep their position; a custom rule with a base rule's name
    /// replaces it in place, and new custom rules are appended.
    pub fn merge(
        custom: impl IntoIterator<Item = FormatRule>,
        base: impl IntoIterator<Item = FormatRule>,
    ) -> Vec<FormatRule> {
        Self::from_rules(base.into_iter().chain(custom)).rules
    }

    /// Merge caller rules over this registry
    pub fn with_rules(self, custom: impl IntoIterator<Item = FormatRule>) -> Self {
        Self {
            rules: Self::merge(custom, self.rules),
        }
    }

    /// Insert a rule, returning the rule it replaced
    pub fn insert(&mut self, rule: FormatRule) -> Option<FormatRule> {
        match self.rules.iter_mut().find(|existing| existing.name == rule.name) {
            Some(existing) => Some(std::mem::replace(existing, rule)),
            None => {
                self.rules.push(rule);
                None
            }
        }
    }

    /// Look up a rule by name
    pub fn find(&self, name: &str) -> Option<&FormatRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(FormatRule::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
