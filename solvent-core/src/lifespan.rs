//! # Lifespan Layer (Scoped Teardown)
//!
//! Guarantees release of every scoped resource acquired during a dispatch,
//! regardless of handler success or failure.
//!
//! Providers that acquire resources register a release future here; after the
//! handler completes, [`LifespanContext::run_teardowns`] drains the registered
//! futures in strictly reverse registration order, mirroring nested
//! resource-acquisition order (last acquired, first released).
//!
//! The guarantee covers every dispatch outcome, not a dropped dispatch: a
//! future cancelled mid-flight drops its unrun release futures with it.

use crate::error::{BoxError, TeardownError};
use futures::future::BoxFuture;

/// A boxed release step, awaited during teardown.
pub type Teardown = BoxFuture<'static, Result<(), BoxError>>;

/// An append-only sequence of release steps for one dispatch.
///
/// Created fresh per dispatch and drained exactly once when the dispatch
/// finishes. There is no uniqueness constraint: a cache-bypassed provider
/// resolved twice registers two independent release steps.
#[derive(Default)]
pub struct LifespanContext {
    teardowns: Vec<Teardown>,
}

impl LifespanContext {
    /// Create an empty lifespan context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a release step to run at dispatch end.
    pub fn register(&mut self, teardown: Teardown) {
        self.teardowns.push(teardown);
    }

    /// Number of release steps currently registered.
    pub fn len(&self) -> usize {
        self.teardowns.len()
    }

    /// Whether no release steps are registered.
    pub fn is_empty(&self) -> bool {
        self.teardowns.is_empty()
    }

    /// Run every registered release step, most recently registered first.
    ///
    /// Each step is awaited to completion before the next begins. A failing
    /// step does not stop the remaining ones; failures are collected into a
    /// [`TeardownError`].
    pub async fn run_teardowns(&mut self) -> Result<(), TeardownError> {
        let mut failures = Vec::new();
        while let Some(teardown) = self.teardowns.pop() {
            if let Err(err) = teardown.await {
                failures.push(err);
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(TeardownError::new(failures))
        }
    }
}

impl std::fmt::Debug for LifespanContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifespanContext")
            .field("teardowns", &self.teardowns.len())
            .finish()
    }
}
