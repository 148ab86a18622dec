//! Dependency resolution behavior across whole dispatches: per-dispatch
//! caching, cache bypass, and release ordering.

use serde_json::json;
use solvent::{
    Acquired, Dep, DispatchError, DispatchScope, Fresh, Provide, RawEvent, ResolveError,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

mod common;
use common::recording_gateway;

// ============================================================================
// Shared-dependency diamond: Alpha and Beta both need Gamma
// ============================================================================

static GAMMA_RUNS: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone)]
struct Gamma;

impl Provide for Gamma {
    async fn provide(_scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        GAMMA_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(Acquired::value(Gamma))
    }
}

#[derive(Clone)]
struct Alpha;

impl Provide for Alpha {
    async fn provide(scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        scope.resolve::<Gamma>().await?;
        Ok(Acquired::value(Alpha))
    }
}

#[derive(Clone)]
struct Beta;

impl Provide for Beta {
    async fn provide(scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        scope.resolve::<Gamma>().await?;
        Ok(Acquired::value(Beta))
    }
}

#[tokio::test]
async fn shared_dependency_resolves_at_most_once_per_dispatch() {
    let (mut gateway, _) = recording_gateway();
    gateway.on("work", |_a: Dep<Alpha>, _b: Dep<Beta>| async {});

    gateway
        .dispatch(RawEvent::new("work", "s1").with_arg(json!(null)))
        .await
        .unwrap();

    assert_eq!(GAMMA_RUNS.load(Ordering::SeqCst), 1);

    // A second dispatch gets its own cache, so the provider runs again.
    gateway
        .dispatch(RawEvent::new("work", "s1").with_arg(json!(null)))
        .await
        .unwrap();

    assert_eq!(GAMMA_RUNS.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Cache bypass: both consumers reacquire the shared dependency
// ============================================================================

static LOOSE_RUNS: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone)]
struct Loose;

impl Provide for Loose {
    async fn provide(_scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        LOOSE_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(Acquired::value(Loose))
    }
}

#[derive(Clone)]
struct LeftConsumer;

impl Provide for LeftConsumer {
    async fn provide(scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        scope.resolve_fresh::<Loose>().await?;
        Ok(Acquired::value(LeftConsumer))
    }
}

#[derive(Clone)]
struct RightConsumer;

impl Provide for RightConsumer {
    async fn provide(scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        scope.resolve_fresh::<Loose>().await?;
        Ok(Acquired::value(RightConsumer))
    }
}

#[tokio::test]
async fn cache_bypass_reacquires_per_reference() {
    let (mut gateway, _) = recording_gateway();
    gateway.on(
        "work",
        |_l: Dep<LeftConsumer>, _r: Dep<RightConsumer>| async {},
    );

    gateway
        .dispatch(RawEvent::new("work", "s1"))
        .await
        .unwrap();

    assert_eq!(LOOSE_RUNS.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Release ordering across a diamond
// ============================================================================

static RELEASE_ORDER: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

#[derive(Clone)]
struct Base;

impl Provide for Base {
    async fn provide(_scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        Ok(Acquired::scoped(Base, async {
            RELEASE_ORDER.lock().unwrap().push("base");
        }))
    }
}

#[derive(Clone)]
struct UpperA;

impl Provide for UpperA {
    async fn provide(scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        scope.resolve::<Base>().await?;
        Ok(Acquired::scoped(UpperA, async {
            RELEASE_ORDER.lock().unwrap().push("upper_a");
        }))
    }
}

#[derive(Clone)]
struct UpperB;

impl Provide for UpperB {
    async fn provide(scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        scope.resolve::<Base>().await?;
        Ok(Acquired::scoped(UpperB, async {
            RELEASE_ORDER.lock().unwrap().push("upper_b");
        }))
    }
}

#[tokio::test]
async fn releases_run_in_reverse_resolution_order() {
    let (mut gateway, _) = recording_gateway();
    gateway.on("work", |_a: Dep<UpperA>, _b: Dep<UpperB>| async {});

    gateway
        .dispatch(RawEvent::new("work", "s1"))
        .await
        .unwrap();

    // Resolution order was base, upper_a, upper_b.
    assert_eq!(
        *RELEASE_ORDER.lock().unwrap(),
        vec!["upper_b", "upper_a", "base"]
    );
}

// ============================================================================
// Release pairing when the handler fails
// ============================================================================

static TRACKED_LOG: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

#[derive(Clone)]
struct Guard;

impl Provide for Guard {
    async fn provide(_scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        TRACKED_LOG.lock().unwrap().push("acquire");
        Ok(Acquired::scoped(Guard, async {
            TRACKED_LOG.lock().unwrap().push("release");
        }))
    }
}

#[tokio::test]
async fn release_runs_exactly_once_after_a_failing_handler() {
    let (mut gateway, _) = recording_gateway();
    gateway.on("work", |_g: Dep<Guard>| async {
        TRACKED_LOG.lock().unwrap().push("handler");
        Err::<(), std::io::Error>(std::io::Error::other("boom"))
    });

    let err = gateway
        .dispatch(RawEvent::new("work", "s1"))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Handler(_)));
    assert_eq!(
        *TRACKED_LOG.lock().unwrap(),
        vec!["acquire", "handler", "release"]
    );
}

// ============================================================================
// Fresh acquisitions release independently
// ============================================================================

static FRESH_RELEASES: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone)]
struct Ephemeral;

impl Provide for Ephemeral {
    async fn provide(_scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        Ok(Acquired::scoped(Ephemeral, async {
            FRESH_RELEASES.fetch_add(1, Ordering::SeqCst);
        }))
    }
}

#[tokio::test]
async fn every_fresh_acquisition_registers_its_own_release() {
    let (mut gateway, _) = recording_gateway();
    gateway.on(
        "work",
        |_one: Fresh<Ephemeral>, _two: Fresh<Ephemeral>| async {},
    );

    gateway
        .dispatch(RawEvent::new("work", "s1"))
        .await
        .unwrap();

    assert_eq!(FRESH_RELEASES.load(Ordering::SeqCst), 2);
}

// ============================================================================
// A failed provider aborts the dispatch but never poisons later dispatches
// ============================================================================

static FLAKY_RUNS: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone)]
struct Flaky;

impl Provide for Flaky {
    async fn provide(_scope: &mut DispatchScope) -> Result<Acquired<Self>, ResolveError> {
        if FLAKY_RUNS.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ResolveError::provider("first acquisition refused"))
        } else {
            Ok(Acquired::value(Flaky))
        }
    }
}

#[tokio::test]
async fn provider_failures_pass_through_untranslated() {
    let (mut gateway, recorded) = recording_gateway();
    gateway.on("work", |_f: Dep<Flaky>| async {});

    let err = gateway
        .dispatch(RawEvent::new("work", "s1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Resolve(ResolveError::Provider(_))
    ));
    // Provider failures produce no client feedback.
    assert_eq!(recorded.count(), 0);

    // The next dispatch starts from a clean cache and succeeds.
    gateway
        .dispatch(RawEvent::new("work", "s1"))
        .await
        .unwrap();
}
