//! # Resolution Layer (Dispatch Scope)
//!
//! One [`DispatchScope`] exists per inbound event. It owns everything a
//! dispatch needs to resolve handler arguments:
//!
//! - the seeded connection id, raw payload, and environment
//! - the [`ResolutionCache`] of already-acquired dependencies
//! - the [`LifespanContext`] of pending release steps
//!
//! The scope is exclusively owned by its dispatch and never shared; two
//! concurrent dispatches each build their own, so the at-most-once cache
//! guarantee needs no locking.
//!
//! # Resolution algorithm
//!
//! [`DispatchScope::resolve`] produces one dependency value:
//!
//! 1. cache check - a hit returns a clone without re-running the provider;
//! 2. [`Provide::provide`] runs, itself resolving sub-dependencies
//!    depth-first through the same scope;
//! 3. a release step, if the acquisition carries one, is registered on the
//!    lifespan context;
//! 4. the value is cached before being returned.
//!
//! A failed acquisition writes no cache entry, so a later reference within
//! the same dispatch retries in full.

use crate::error::{ResolveError, TeardownError};
use crate::lifespan::{LifespanContext, Teardown};
use crate::params::{Environ, Sid};
use crate::provide::Provide;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Already-resolved dependency values, keyed by provider type.
///
/// Created fresh per dispatch; never shared or reused across dispatches.
#[derive(Default)]
pub struct ResolutionCache {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached value by its provider type.
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }

    /// Store a resolved value under its provider type.
    pub fn insert<T: Clone + Send + Sync + 'static>(&mut self, value: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Whether the given provider type has a cached value.
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Per-dispatch resolution state: seed values, cache, and lifespan.
pub struct DispatchScope {
    sid: Sid,
    data: Option<Value>,
    environ: Environ,
    cache: ResolutionCache,
    lifespan: LifespanContext,
}

impl DispatchScope {
    /// Build a scope seeded with the dispatch's connection id, raw payload,
    /// and environment.
    pub fn new(sid: Sid, data: Option<Value>, environ: Environ) -> Self {
        Self {
            sid,
            data,
            environ,
            cache: ResolutionCache::new(),
            lifespan: LifespanContext::new(),
        }
    }

    /// The originating connection id.
    pub fn sid(&self) -> &Sid {
        &self.sid
    }

    /// The raw event payload, if the dispatch carried one.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The connection environment seeded for this dispatch.
    pub fn environ(&self) -> &Environ {
        &self.environ
    }

    /// The resolution cache (read-only; resolution owns all writes).
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Number of release steps registered so far.
    pub fn pending_teardowns(&self) -> usize {
        self.lifespan.len()
    }

    /// Register a release step to run when the dispatch finishes.
    pub fn register_teardown(&mut self, teardown: Teardown) {
        self.lifespan.register(teardown);
    }

    /// Resolve a dependency, sharing one acquisition per dispatch.
    ///
    /// The provider runs at most once per dispatch regardless of how many
    /// parameters (directly or transitively) request it.
    pub async fn resolve<T: Provide>(&mut self) -> Result<T, ResolveError> {
        self.resolve_with::<T>(true).await
    }

    /// Resolve a dependency, bypassing the cache.
    ///
    /// The provider runs for this reference alone; its value is neither
    /// looked up nor stored.
    pub async fn resolve_fresh<T: Provide>(&mut self) -> Result<T, ResolveError> {
        self.resolve_with::<T>(false).await
    }

    async fn resolve_with<T: Provide>(&mut self, use_cache: bool) -> Result<T, ResolveError> {
        if use_cache {
            if let Some(hit) = self.cache.get::<T>() {
                return Ok(hit);
            }
        }

        let (value, teardown) = T::provide(self).await?.into_parts();
        if let Some(teardown) = teardown {
            self.lifespan.register(teardown);
        }
        if use_cache {
            self.cache.insert(value.clone());
        }
        Ok(value)
    }

    /// Run all registered release steps, most recently registered first.
    ///
    /// The gateway calls this after the handler on every dispatch outcome.
    pub async fn run_teardowns(&mut self) -> Result<(), TeardownError> {
        self.lifespan.run_teardowns().await
    }
}

impl std::fmt::Debug for DispatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchScope")
            .field("sid", &self.sid)
            .field("data", &self.data)
            .field("cache", &self.cache)
            .field("lifespan", &self.lifespan)
            .finish()
    }
}
