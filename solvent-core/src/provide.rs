//! # Provider Layer (Dependency Acquisition)
//!
//! A [`Provide`] implementation is the unit of dependency resolution: a type
//! that knows how to produce itself within a dispatch, optionally paired with
//! a release step that runs after the handler completes.
//!
//! Acquisition and release are two explicit halves of one [`Acquired`] value,
//! so scoped resources (a database session, a cache connection) are acquired
//! before use and released afterwards without relying on the resolution
//! engine to interpret the provider's body.
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Clone)]
//! struct Session { conn: Arc<Connection> }
//!
//! impl Provide for Session {
//!     async fn provide(scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
//!         // sub-dependencies resolve through the same scope
//!         let pool = scope.resolve::<Pool>().await?;
//!         let conn = pool.checkout().await.map_err(ResolveError::provider)?;
//!         let session = Session { conn: conn.clone() };
//!         Ok(Acquired::scoped(session, async move { conn.release().await }))
//!     }
//! }
//! ```

use crate::error::{BoxError, ResolveError};
use crate::lifespan::Teardown;
use crate::scope::DispatchScope;
use std::future::Future;

/// A dependency that can be acquired within a dispatch.
///
/// Providers are identified by their type: the resolution cache keys on the
/// implementing type, so two references to the same provider within one
/// dispatch share one acquisition (unless declared through
/// [`Fresh`](crate::Fresh)).
///
/// The `Clone` bound is what lets a cached acquisition be handed to several
/// parameters; share interior state through `Arc` when cloning must be cheap.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be provided as a dependency",
    label = "missing `Provide` implementation",
    note = "Implement `Provide` so `Dep<{Self}>` and `Fresh<{Self}>` can resolve it."
)]
pub trait Provide: Clone + Send + Sync + Sized + 'static {
    /// Acquire the dependency within the given dispatch scope.
    ///
    /// Sub-dependencies resolve through the same scope, depth-first, before
    /// this provider's own value is produced.
    fn provide(
        scope: &mut DispatchScope,
    ) -> impl Future<Output = Result<Acquired<Self>, ResolveError>> + Send;
}

/// A provided value paired with its optional release step.
pub struct Acquired<T> {
    value: T,
    teardown: Option<Teardown>,
}

impl<T> Acquired<T> {
    /// A plain value with no release step.
    pub fn value(value: T) -> Self {
        Self {
            value,
            teardown: None,
        }
    }

    /// A scoped value whose release step cannot fail.
    pub fn scoped(value: T, release: impl Future<Output = ()> + Send + 'static) -> Self {
        Self {
            value,
            teardown: Some(Box::pin(async move {
                release.await;
                Ok(())
            })),
        }
    }

    /// A scoped value with a fallible release step.
    ///
    /// Release failures are collected during teardown; they never abort the
    /// remaining release steps.
    pub fn try_scoped(
        value: T,
        release: impl Future<Output = Result<(), BoxError>> + Send + 'static,
    ) -> Self {
        Self {
            value,
            teardown: Some(Box::pin(release)),
        }
    }

    /// Split into the value and its release step.
    pub fn into_parts(self) -> (T, Option<Teardown>) {
        (self.value, self.teardown)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Acquired<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Acquired")
            .field("value", &self.value)
            .field("scoped", &self.teardown.is_some())
            .finish()
    }
}
