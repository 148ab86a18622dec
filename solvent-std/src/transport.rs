//! Transport abstraction for the gateway.
//!
//! The gateway never touches the wire: inbound events arrive as [`RawEvent`]
//! values from whatever transport integration feeds the gateway, and
//! outbound messages leave as [`OutboundMessage`] values through the
//! [`Transport`] trait. Rooms, namespaces and the handshake itself belong to
//! the transport.

use async_trait::async_trait;
use serde_json::{Map, Value};
use solvent_core::BoxError;

/// A raw inbound socket event, exactly as the transport received it.
///
/// `args` holds the positional arguments after the connection id; their
/// meaning depends on the event (`connect` carries the environment first),
/// and the gateway normalizes them before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    /// The event name.
    pub event: String,
    /// Namespace the event arrived on, if the transport scopes events.
    pub namespace: Option<String>,
    /// The originating connection id.
    pub sid: String,
    /// Positional arguments following the connection id.
    pub args: Vec<Value>,
    /// The connection environment, when the transport supplies one by name.
    pub environ: Option<Map<String, Value>>,
}

impl RawEvent {
    /// A raw event with no arguments.
    pub fn new(event: impl Into<String>, sid: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            namespace: None,
            sid: sid.into(),
            args: Vec::new(),
            environ: None,
        }
    }

    /// Append a positional argument.
    pub fn with_arg(mut self, arg: Value) -> Self {
        self.args.push(arg);
        self
    }

    /// Set the named environment argument.
    pub fn with_environ(mut self, environ: Map<String, Value>) -> Self {
        self.environ = Some(environ);
        self
    }

    /// Scope the event to a namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Routing for an outbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Deliver to one specific connection.
    pub to: Option<String>,
    /// Deliver to every connection in a room.
    pub room: Option<String>,
    /// Connections to skip when broadcasting.
    pub skip_sids: Vec<String>,
    /// Namespace to deliver within.
    pub namespace: Option<String>,
}

impl EmitOptions {
    /// Options with no routing constraints (broadcast).
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver to one specific connection.
    pub fn to(mut self, sid: impl Into<String>) -> Self {
        self.to = Some(sid.into());
        self
    }

    /// Deliver to every connection in a room.
    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Skip a connection when broadcasting.
    pub fn skip(mut self, sid: impl Into<String>) -> Self {
        self.skip_sids.push(sid.into());
        self
    }

    /// Deliver within a namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// A fully normalized outbound message, ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    /// The event name to emit.
    pub event: String,
    /// The wire-level payload.
    pub data: Value,
    /// Routing for the delivery.
    pub options: EmitOptions,
}

/// Delivery of outbound messages.
///
/// Implementations own the actual socket machinery; the gateway hands them
/// already-serialized messages and treats any failure as opaque.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Hand a message to the wire.
    async fn deliver(&self, message: OutboundMessage) -> Result<(), BoxError>;
}
