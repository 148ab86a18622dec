//! # solvent - Dependency-Resolving Socket Event Gateway
//!
//! `solvent` dispatches socket events to plain async functions whose
//! parameters declare where their values come from: the connection id, the
//! connection environment, the validated payload, or a provided dependency.
//! Each dispatch resolves its dependency graph depth-first with per-dispatch
//! caching, then releases every scoped acquisition in reverse order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solvent::prelude::*;
//!
//! #[derive(Clone)]
//! struct Store { /* ... */ }
//!
//! impl Provide for Store {
//!     async fn provide(scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
//!         Ok(Acquired::value(Store { /* ... */ }))
//!     }
//! }
//!
//! #[derive(serde::Deserialize)]
//! struct Chat { text: String }
//!
//! let mut gateway = EventGateway::new(transport);
//! gateway.on("chat", |sid: Sid, msg: Payload<Chat>, store: Dep<Store>| async move {
//!     // msg is validated, store is resolved at most once per dispatch
//! });
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use solvent_core::{
    // Provider layer
    Acquired,
    // Error types
    BoxError,
    // Parameter markers
    Data,
    Dep,
    DispatchError,
    // Handler layer
    DispatchReply,
    // Resolution layer
    DispatchScope,
    DynEventHandler,
    ERROR_EVENT,
    EmitError,
    Environ,
    ErasedHandler,
    // Wire protocol
    ErrorMessage,
    EventHandler,
    Fresh,
    IntoDispatchReply,
    // Lifespan
    LifespanContext,
    MESSAGE_EVENT,
    Payload,
    Provide,
    Resolve,
    ResolveError,
    ResolutionCache,
    Sid,
    Teardown,
    TeardownError,
    ValidationFailure,
    Violation,
    WirePayload,
    close_code,
    payload_type_name,
};

pub use solvent_std::config::{CorsOrigins, GatewayConfig};
pub use solvent_std::gateway::EventGateway;
pub use solvent_std::transport::{EmitOptions, OutboundMessage, RawEvent, Transport};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use solvent_std::testing::*;
}

/// Prelude module - common imports for Solvent.
///
/// # Usage
///
/// ```rust,ignore
/// use solvent::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Provider layer
        Acquired,
        // Errors
        BoxError,
        // Parameter markers
        Data,
        Dep,
        DispatchError,
        DispatchReply,
        DispatchScope,
        // Gateway
        EmitOptions,
        Environ,
        ErrorMessage,
        EventGateway,
        Fresh,
        GatewayConfig,
        Payload,
        Provide,
        RawEvent,
        Resolve,
        ResolveError,
        Sid,
        Transport,
        WirePayload,
    };
}
