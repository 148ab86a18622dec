//! # Parameter Layer (Markers and Descriptors)
//!
//! The types a handler declares in its signature to say where each argument
//! comes from. These carry no resolution logic of their own; the
//! [`Resolve`] implementations in the resolution layer give them meaning.
//!
//! - [`Sid`] - the originating connection id
//! - [`Environ`] - the connection environment (connect events only)
//! - [`Data`] - the raw event payload, passed through unchanged
//! - [`Payload`] - the event payload coerced into a structured model
//! - [`Dep`] / [`Fresh`] - a provided dependency, cached or re-acquired
//!
//! [`Resolve`]: crate::Resolve

use serde_json::{Map, Value};
use std::ops::Deref;

/// The session id of the originating connection.
///
/// Declaring a `Sid` parameter injects the connection id seeded for the
/// current dispatch.
///
/// # Example
///
/// ```rust,ignore
/// gateway.on("message", |sid: Sid| async move {
///     println!("message from {sid}");
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sid(String);

impl Sid {
    /// Create a session id.
    pub fn new(sid: impl Into<String>) -> Self {
        Self(sid.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the marker, returning the owned id.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Sid {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Sid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The connection environment.
///
/// Only populated during `connect` dispatches; every other event resolves to
/// an empty mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environ(Map<String, Value>);

impl Environ {
    /// Wrap an environment mapping.
    pub fn new(environ: Map<String, Value>) -> Self {
        Self(environ)
    }

    /// An empty environment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Consume the marker, returning the owned mapping.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for Environ {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The raw event payload, passed through unchanged.
///
/// Dispatches without a payload resolve to [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Data(pub Value);

impl Data {
    /// Consume the wrapper, returning the owned value.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl Deref for Data {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The event payload coerced into a structured model.
///
/// The raw payload mapping is validated into `T`; a malformed shape surfaces
/// as a validation failure, a non-mapping payload as an unsupported-data
/// failure.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct Chat { text: String }
///
/// gateway.on("chat", |msg: Payload<Chat>| async move {
///     println!("{}", msg.text);
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload<T>(pub T);

impl<T> Payload<T> {
    /// Consume the wrapper, returning the coerced model.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Payload<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A provided dependency, resolved at most once per dispatch.
///
/// Repeated references to the same provider within one dispatch share the
/// first resolved value. Use [`Fresh`] to opt out of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dep<T>(pub T);

impl<T> Dep<T> {
    /// Consume the wrapper, returning the provided value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Dep<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A provided dependency that bypasses the resolution cache.
///
/// Every `Fresh<T>` reference re-runs the provider and registers its own
/// release step, and the acquired value is not stored for later references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fresh<T>(pub T);

impl<T> Fresh<T> {
    /// Consume the wrapper, returning the provided value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Fresh<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
