//! # formguard
//!
//! Declarative form validation: each field opts in to a few checks
//! (required, length bounds, a named format rule), the form is gated on every
//! field passing, and the submit is either blocked, handed to the host's
//! native submission, or posted to a configured endpoint.
//!
//! ## Quick Start
//!
//! ```rust
//! use formguard::{FieldDescriptor, FieldEvaluator, RuleRegistry, Verdict};
//!
//! let evaluator = FieldEvaluator::new(RuleRegistry::builtin());
//!
//! let email = FieldDescriptor::text("email")
//!     .with_value("user@example.com")
//!     .with_format("email")
//!     .required();
//! assert_eq!(evaluator.evaluate(&email), Ok(Verdict::Success));
//!
//! let zip = FieldDescriptor::text("zip").with_value("123").with_min_length(5);
//! assert_eq!(evaluator.evaluate(&zip), Ok(Verdict::Length));
//! ```
//!
//! ## Architecture
//!
//! - [`RuleRegistry`] - named format rules, merged over the built-ins by name
//! - [`FieldEvaluator`] - computes one field's [`Verdict`]
//! - [`FormCoordinator`] - runs passes over a form, drives the submit decision
//!
//! The host representation (DOM, fixtures) sits behind [`FormHost`] and the
//! network behind [`SubmitTransport`]. [`MemoryForm`] is an in-memory host.
//!
//! ## Features
//!
//! - **`http`** (default) - [`HttpTransport`], a `reqwest` submission transport

pub mod config;
pub mod coordinator;
pub mod error;
pub mod evaluator;
pub mod field;
pub mod host;
pub mod memory;
pub mod rules;
pub mod transport;
pub mod verdict;

pub use config::{FormConfig, RuleSpec};
pub use coordinator::{FieldReport, FormCoordinator, FormReport, SubmitPhase};
pub use error::{ConfigError, FormError, TransportError};
pub use evaluator::FieldEvaluator;
pub use field::{FieldDescriptor, FieldKind};
pub use host::{FormData, FormHost, SubmissionState};
pub use memory::{MemoryForm, MessageState};
pub use rules::{FormatRule, RuleRegistry};
pub use transport::{SubmitResponse, SubmitTransport};
pub use verdict::{ParseVerdictError, Verdict};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
