//! # solvent-std
//!
//! Gateway and transport implementations for the Solvent event gateway.
//!
//! This crate provides:
//! - **The gateway**: [`EventGateway`], the dispatch state machine
//! - **The transport seam**: [`Transport`], [`RawEvent`], [`OutboundMessage`]
//! - **Configuration**: [`GatewayConfig`], [`CorsOrigins`]
//! - **Testing utilities**: [`RecordingTransport`], [`FailingTransport`]
//!
//! [`EventGateway`]: gateway::EventGateway
//! [`Transport`]: transport::Transport
//! [`RawEvent`]: transport::RawEvent
//! [`OutboundMessage`]: transport::OutboundMessage
//! [`GatewayConfig`]: config::GatewayConfig
//! [`CorsOrigins`]: config::CorsOrigins
//! [`RecordingTransport`]: testing::RecordingTransport
//! [`FailingTransport`]: testing::FailingTransport

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use solvent_core;

// Modules
pub mod config;
pub mod gateway;
pub mod testing;
pub mod transport;
