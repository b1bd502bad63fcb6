//! Boundary between the coordinator and whatever renders the form
//!
//! A host adapter reads its own representation (a DOM, a test fixture, ...)
//! into [`FieldDescriptor`] values and applies the coordinator's side effects
//! back onto it. The core never touches the host representation directly.

use crate::field::FieldDescriptor;
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable marker for the remote submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Sending,
    Success,
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Sending => "sending",
            SubmissionState::Success => "success",
            SubmissionState::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered snapshot of the form's name/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value recorded under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as an `application/x-www-form-urlencoded` body
    pub fn to_urlencoded(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Host adapter for one form
pub trait FormHost {
    /// Descriptors for every field that opted in to validation, read fresh
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Descriptor for a single field by id
    fn field(&self, id: &str) -> Option<FieldDescriptor>;

    /// Write the field's current outcome back; `None` when it could not be determined
    fn record_verdict(&mut self, id: &str, verdict: Option<Verdict>);

    /// Show `text` in the message container bound to field `name`, if there is one
    fn show_message(&mut self, name: &str, text: &str);

    /// Hide the message container bound to field `name`, if there is one
    fn hide_message(&mut self, name: &str);

    /// Snapshot of the form's values for remote submission
    fn form_data(&self) -> FormData;

    /// Hand the form to the host's default submission path
    fn submit_natively(&mut self);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_submission_state(&mut self, state: SubmissionState);
}
