//! # solvent-core
//!
//! Core traits and the dependency resolution engine for the Solvent event
//! gateway.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! transports and extensions that don't need the full `solvent-std`
//! implementation.
//!
//! # Four-Layer Architecture
//!
//! Solvent resolves each inbound socket event through four layers, each with
//! a distinct responsibility:
//!
//! ## Layer 1: Parameters ([`Sid`], [`Environ`], [`Data`], [`Payload`], [`Dep`], [`Fresh`])
//!
//! Marker and descriptor types a handler declares in its signature. Data
//! only; the signature itself documents where every argument comes from.
//!
//! ## Layer 2: Resolution ([`DispatchScope`], [`Provide`], [`Resolve`])
//!
//! One scope per dispatch owns the seeded connection state and the
//! [`ResolutionCache`]. Dependencies resolve depth-first in declaration
//! order; a cached provider runs at most once per dispatch.
//!
//! ## Layer 3: Lifespan ([`LifespanContext`], [`Acquired`])
//!
//! Scoped acquisitions register release steps that run in strictly reverse
//! registration order once the dispatch finishes, on every outcome.
//!
//! ## Layer 4: Invocation ([`EventHandler`], [`IntoDispatchReply`])
//!
//! Plain async functions over extractor parameters become dispatchable
//! handlers; their outputs normalize to a [`DispatchReply`].
//!
//! # Error Types
//!
//! - [`ResolveError`] - Argument resolution failures
//! - [`DispatchError`] - Dispatch-level failures
//! - [`EmitError`] - Outbound serialization/delivery failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod lifespan;
mod params;
mod protocol;
mod provide;
mod reply;
mod resolve;
mod scope;

// Re-exports
pub use error::{
    BoxError, DispatchError, EmitError, ResolveError, TeardownError, ValidationFailure, Violation,
};
pub use handler::{DynEventHandler, ErasedHandler, EventHandler};
pub use lifespan::{LifespanContext, Teardown};
pub use params::{Data, Dep, Environ, Fresh, Payload, Sid};
pub use protocol::{ERROR_EVENT, ErrorMessage, MESSAGE_EVENT, WirePayload, close_code};
pub use provide::{Acquired, Provide};
pub use reply::{DispatchReply, IntoDispatchReply};
pub use resolve::{Resolve, payload_type_name};
pub use scope::{DispatchScope, ResolutionCache};
