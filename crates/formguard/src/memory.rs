// File: src/memory.rs
// Purpose: In-memory form host (headless use and tests)

use crate::field::{FieldDescriptor, FieldKind};
use crate::host::{FormData, FormHost, SubmissionState};
use crate::verdict::Verdict;
use std::collections::{HashMap, HashSet};

/// State of a field's message container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub visible: bool,
    pub text: String,
}

/// In-memory form host
///
/// Holds the fields, which group members are checked, and everything the
/// coordinator writes back, so that it can be inspected afterwards.
#[derive(Debug, Clone)]
pub struct MemoryForm {
    fields: Vec<FieldDescriptor>,
    checked: HashSet<String>,
    verdicts: HashMap<String, Option<Verdict>>,
    messages: HashMap<String, MessageState>,
    submit_enabled: bool,
    submit_disables: usize,
    submission_states: Vec<SubmissionState>,
    native_submissions: usize,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryForm {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            checked: HashSet::new(),
            verdicts: HashMap::new(),
            messages: HashMap::new(),
            submit_enabled: true,
            submit_disables: 0,
            submission_states: Vec::new(),
            native_submissions: 0,
        }
    }

    /// Add a field along with a message container for its name
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.messages.entry(field.name.clone()).or_default();
        self.fields.push(field);
        self
    }

    /// Add a field that has no message container
    pub fn with_bare_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a checkbox/radio member, optionally checked
    pub fn with_group_member(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        checked: bool,
    ) -> Self {
        let field = FieldDescriptor::group(id, name, 0);
        let mut form = self.with_field(field.clone());
        form.set_checked(&field.id, checked);
        form
    }

    /// Set a text field's value; returns false if no such field
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.id == id) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Check or uncheck a group member
    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if checked {
            self.checked.insert(id.to_string());
        } else {
            self.checked.remove(id);
        }
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.fields.iter_mut().find(|field| field.id == id) {
            Some(field) => {
                field.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Last verdict recorded for a field
    pub fn verdict(&self, id: &str) -> Option<Verdict> {
        self.verdicts.get(id).copied().flatten()
    }

    /// Whether the coordinator has written an outcome (possibly undetermined) for a field
    pub fn is_recorded(&self, id: &str) -> bool {
        self.verdicts.contains_key(id)
    }

    pub fn message(&self, name: &str) -> Option<&MessageState> {
        self.messages.get(name)
    }

    pub fn is_message_visible(&self, name: &str) -> bool {
        self.messages.get(name).is_some_and(|message| message.visible)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// How many times the submit control was switched off
    pub fn submit_disables(&self) -> usize {
        self.submit_disables
    }

    /// Current submission marker, if one was ever set
    pub fn submission_state(&self) -> Option<SubmissionState> {
        self.submission_states.last().copied()
    }

    /// Every submission marker set so far, oldest first
    pub fn submission_history(&self) -> &[SubmissionState] {
        &self.submission_states
    }

    /// How many times the native submission path was taken
    pub fn native_submissions(&self) -> usize {
        self.native_submissions
    }

    fn checked_in_group(&self, name: &str) -> usize {
        self.fields
            .iter()
            .filter(|field| field.is_group() && field.name == name)
            .filter(|field| self.checked.contains(&field.id))
            .count()
    }

    fn snapshot(&self, field: &FieldDescriptor) -> FieldDescriptor {
        let mut field = field.clone();
        if field.is_group() {
            field.kind = FieldKind::Group {
                checked: self.checked_in_group(&field.name),
            };
        }
        field
    }
}

impl FormHost for MemoryForm {
    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().map(|field| self.snapshot(field)).collect()
    }

    fn field(&self, id: &str) -> Option<FieldDescriptor> {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| self.snapshot(field))
    }

    fn record_verdict(&mut self, id: &str, verdict: Option<Verdict>) {
        self.verdicts.insert(id.to_string(), verdict);
    }

    fn show_message(&mut self, name: &str, text: &str) {
        if let Some(message) = self.messages.get_mut(name) {
            message.text = text.to_string();
            message.visible = true;
        }
    }

    fn hide_message(&mut self, name: &str) {
        if let Some(message) = self.messages.get_mut(name) {
            message.visible = false;
        }
    }

    fn form_data(&self) -> FormData {
        let mut data = FormData::new();
        for field in &self.fields {
            if !field.is_group() {
                data.append(field.name.clone(), field.value.clone());
            } else if self.checked.contains(&field.id) {
                let value = if field.value.is_empty() { "on" } else { field.value.as_str() };
                data.append(field.name.clone(), value);
            }
        }
        data
    }

    fn submit_natively(&mut self) {
        self.native_submissions += 1;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.submit_disables += 1;
        }
        self.submit_enabled = enabled;
    }

    fn set_submission_state(&mut self, state: SubmissionState) {
        self.submission_states.push(state);
    }
}
