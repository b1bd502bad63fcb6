// File: src/field.rs
// Purpose: Read-only view of one field's validation-relevant attributes

use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a field collects its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Text-like input (text, email, textarea, select, ...)
    #[default]
    Text,
    /// Checkbox or radio input; `checked` counts checked members sharing its name
    Group { checked: usize },
}

/// Snapshot of a field, built by the host adapter once per validation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Host-assigned identifier, unique per element
    pub id: String,

    /// Field name; shared by group members and used to find the message container
    pub name: String,

    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub min_length: Option<usize>,

    #[serde(default)]
    pub max_length: Option<usize>,

    /// Name of the bound format rule
    #[serde(default)]
    pub format: Option<String>,

    /// Whether the field (and all its ancestors) is currently presented
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Message text per failing outcome
    #[serde(default)]
    pub messages: HashMap<Verdict, String>,
}

fn default_true() -> bool {
    true
}

impl FieldDescriptor {
    /// Text-like field whose id is its name
    pub fn text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            value: String::new(),
            kind: FieldKind::Text,
            required: false,
            min_length: None,
            max_length: None,
            format: None,
            visible: true,
            messages: HashMap::new(),
        }
    }

    /// Checkbox/radio member of the group `name`
    pub fn group(id: impl Into<String>, name: impl Into<String>, checked: usize) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::Group { checked },
            ..Self::text(name)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_format(mut self, rule: impl Into<String>) -> Self {
        self.format = Some(rule.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_message(mut self, verdict: Verdict, text: impl Into<String>) -> Self {
        self.messages.insert(verdict, text.into());
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, FieldKind::Group { .. })
    }

    /// Text to show for a failing verdict, falling back to the default message
    pub fn message_for(&self, verdict: Verdict) -> &str {
        self.messages
            .get(&verdict)
            .map(String::as_str)
            .unwrap_or_else(|| verdict.default_message())
    }
}
