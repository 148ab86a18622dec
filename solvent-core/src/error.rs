//! Error types for Solvent.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`ResolveError`] - Errors while resolving a handler's arguments
//! - [`DispatchError`] - Errors during event dispatch
//! - [`EmitError`] - Errors while emitting outbound messages
//! - [`TeardownError`] - Aggregated failures from scope teardown

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving a handler's arguments.
///
/// The gateway translates the first two variants into structured error
/// feedback for the originating connection; [`ResolveError::Provider`]
/// passes through untouched.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The inbound payload failed coercion into a structured model.
    #[error("payload validation failed: {0}")]
    Validation(ValidationFailure),

    /// The inbound payload does not have the shape a model expects.
    #[error("unsupported payload: expected a 'map', but received a '{received}'")]
    UnsupportedData {
        /// Name of the payload type that was actually received.
        received: &'static str,
    },

    /// A dependency provider failed with its own error.
    #[error("dependency failed: {0}")]
    Provider(#[source] BoxError),
}

impl ResolveError {
    /// Wrap a provider's own error.
    pub fn provider(err: impl Into<BoxError>) -> Self {
        ResolveError::Provider(err.into())
    }
}

/// A structured description of payload validation violations.
///
/// Each violation carries the field path that failed and the reason.
/// [`ValidationFailure::detail`] renders the semicolon-joined form used in
/// error feedback messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path to the offending field, or `payload` for the whole value.
    pub path: String,
    /// Human-readable reason, lowercased.
    pub message: String,
}

impl ValidationFailure {
    /// Create a failure from a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Create a failure carrying a single violation.
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation {
                path: path.into(),
                message: message.into(),
            }],
        }
    }

    /// Build a failure from a path-tracked JSON deserialization error.
    pub fn from_json_path(err: &serde_path_to_error::Error<serde_json::Error>) -> Self {
        let raw = err.path().to_string();
        let path = match raw.trim_start_matches('.') {
            "" => "payload".to_string(),
            trimmed => trimmed.to_string(),
        };
        Self::single(path, err.inner().to_string().to_lowercase())
    }

    /// The individual violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Render all violations as `path message` pairs joined by `"; "`.
    pub fn detail(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("{} {}", v.path, v.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail())
    }
}

/// Errors that can occur during event dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Argument resolution failed before the handler body ran.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The handler itself returned an error.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    /// No handler is registered for the dispatched event.
    #[error("no handler registered for event '{event}'")]
    NotHandled {
        /// The event name that had no registration.
        event: String,
    },
}

/// Errors that can occur while emitting an outbound message.
#[derive(Error, Debug)]
pub enum EmitError {
    /// The payload could not be converted to its wire form.
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The underlying transport refused delivery.
    #[error("transport delivery failed: {0}")]
    Transport(#[source] BoxError),
}

/// Aggregated teardown failures from one dispatch.
///
/// Teardown keeps going past individual failures; everything that failed is
/// collected here.
#[derive(Debug)]
pub struct TeardownError {
    failures: Vec<BoxError>,
}

impl TeardownError {
    pub(crate) fn new(failures: Vec<BoxError>) -> Self {
        Self { failures }
    }

    /// The individual teardown failures, in execution order.
    pub fn failures(&self) -> &[BoxError] {
        &self.failures
    }
}

impl std::fmt::Display for TeardownError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reasons = self
            .failures
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{} teardown(s) failed: {}", self.failures.len(), reasons)
    }
}

impl std::error::Error for TeardownError {}
