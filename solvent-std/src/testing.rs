//! Testing utilities for Solvent.
//!
//! This module provides utilities to make testing gateways and providers
//! easier.
//!
//! # Features
//!
//! - [`RecordingTransport`]: captures every outbound message for inspection
//! - [`FailingTransport`]: refuses every delivery, for error-path tests

use crate::transport::{OutboundMessage, Transport};
use async_trait::async_trait;
use solvent_core::BoxError;
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Transport
// ============================================================================

/// A transport that records all messages it is asked to deliver.
///
/// Clones share the same recording, so a handle kept before moving the
/// transport into a gateway still sees everything the gateway emits.
///
/// # Example
///
/// ```rust,ignore
/// let transport = RecordingTransport::new();
/// let recorded = transport.clone();
///
/// let gateway = EventGateway::new(transport);
/// gateway.emit("ping", &(), EmitOptions::new()).await?;
///
/// assert_eq!(recorded.count(), 1);
/// ```
pub struct RecordingTransport {
    messages: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl RecordingTransport {
    /// Create a new recording transport.
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded messages.
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Get the number of recorded messages.
    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// Get the most recently recorded message.
    pub fn last(&self) -> Option<OutboundMessage> {
        self.messages.lock().unwrap().last().cloned()
    }

    /// Clear all recorded messages.
    pub fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingTransport {
    fn clone(&self) -> Self {
        Self {
            messages: self.messages.clone(),
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn deliver(&self, message: OutboundMessage) -> Result<(), BoxError> {
        self.messages.lock().unwrap().push(message);
        Ok(())
    }
}

// ============================================================================
// Failing Transport
// ============================================================================

/// A transport that refuses every delivery.
pub struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn deliver(&self, _message: OutboundMessage) -> Result<(), BoxError> {
        Err("transport refused delivery".into())
    }
}
