//! Wire-level message shapes shared by the gateway and its clients.
//!
//! Nothing here touches a socket; these are the payload forms the gateway
//! hands to its transport.

use crate::error::EmitError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The reserved event name for structured error feedback.
pub const ERROR_EVENT: &str = "error";

/// The reserved event name used by `send`.
pub const MESSAGE_EVENT: &str = "message";

/// WebSocket close codes carried in [`ErrorMessage::code`].
pub mod close_code {
    /// The payload's type is not one the handler can accept.
    pub const UNSUPPORTED_DATA: u16 = 1003;
    /// The payload's shape failed model validation.
    pub const INVALID_FRAME_PAYLOAD_DATA: u16 = 1007;
    /// A failure with no more specific code.
    pub const INTERNAL_ERROR: u16 = 1011;
}

/// Structured error feedback, emitted to the originating connection when a
/// dispatch's payload cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Protocol close code classifying the failure.
    pub code: u16,
    /// The event whose dispatch failed.
    pub event: String,
    /// Fixed human-readable failure class.
    pub message: String,
    /// Failure detail: field violations or the received type.
    pub data: String,
}

impl ErrorMessage {
    /// Feedback for a payload that failed model validation.
    pub fn invalid_payload(event: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: close_code::INVALID_FRAME_PAYLOAD_DATA,
            event: event.into(),
            message: "Data Validation Error.".to_string(),
            data: detail.into(),
        }
    }

    /// Feedback for a payload whose type the handler cannot accept.
    pub fn unsupported_data(event: impl Into<String>, received: &str) -> Self {
        Self {
            code: close_code::UNSUPPORTED_DATA,
            event: event.into(),
            message: "Data Type Error.".to_string(),
            data: format!("expected a 'map', but received a '{received}'."),
        }
    }
}

/// Conversion of an outbound payload to its wire-level form.
///
/// The default method is the generic serde conversion; implementations
/// override it when a model's wire shape differs from its `Serialize` form.
/// Conversion borrows the payload, so emitting the same value twice produces
/// the same mapping.
pub trait WirePayload: Serialize {
    /// Convert to the value handed to the transport.
    fn to_wire(&self) -> Result<Value, EmitError> {
        serde_json::to_value(self).map_err(EmitError::Serialize)
    }
}

impl WirePayload for ErrorMessage {}

// Raw values pass through unchanged.
impl WirePayload for Value {
    fn to_wire(&self) -> Result<Value, EmitError> {
        Ok(self.clone())
    }
}

/// Macro to implement WirePayload for plain pass-through types.
macro_rules! impl_wire_payload {
    ($($t:ty),+ $(,)?) => {
        $(
            impl WirePayload for $t {}
        )+
    };
}

impl_wire_payload!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: WirePayload> WirePayload for Option<T> {}
impl<T: WirePayload> WirePayload for Vec<T> {}
