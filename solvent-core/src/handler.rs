//! # Handler Layer (Invocation)
//!
//! Wraps user-defined async functions so the resolution engine can call them.
//! This is the terminal point of a dispatch: every declared parameter is
//! resolved in order, then the function body runs with the resolved values.
//!
//! # Usage Patterns
//!
//! Any async function whose parameters all implement
//! [`Resolve`](crate::Resolve) is an event handler:
//!
//! ```rust,ignore
//! async fn connect(sid: Sid, auth: Payload<AccessToken>, users: Dep<UserStore>) -> bool {
//!     users.accept(&sid, &auth.access_token).await
//! }
//!
//! gateway.on("connect", connect);
//! ```
//!
//! Functions with 0 to 12 extractor parameters are supported.

use crate::error::DispatchError;
use crate::reply::{DispatchReply, IntoDispatchReply};
use crate::resolve::Resolve;
use crate::scope::DispatchScope;
use futures::future::BoxFuture;
use std::future::Future;
use std::marker::PhantomData;

/// An event handler over a set of extractor parameters.
///
/// Implemented for async functions of each supported arity; the `Args` type
/// parameter carries the extractor tuple so the compiler can tell otherwise
/// identical `Fn` impls apart.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid event handler",
    label = "missing `EventHandler` implementation",
    note = "Event handlers are async functions whose parameters implement `Resolve` \
            and whose output implements `IntoDispatchReply`."
)]
pub trait EventHandler<Args>: Send + Sync + 'static {
    /// Resolve the handler's parameters against the scope, then run it.
    fn invoke<'a>(
        &'a self,
        scope: &'a mut DispatchScope,
    ) -> BoxFuture<'a, Result<DispatchReply, DispatchError>>;
}

/// Object-safe form of [`EventHandler`], for registry storage.
pub trait DynEventHandler: Send + Sync {
    /// Resolve and run the handler (dynamic dispatch version).
    fn invoke_dyn<'a>(
        &'a self,
        scope: &'a mut DispatchScope,
    ) -> BoxFuture<'a, Result<DispatchReply, DispatchError>>;
}

/// Erases a handler's argument tuple so handlers of different shapes can
/// share one registry.
pub struct ErasedHandler<H, Args> {
    handler: H,
    _marker: PhantomData<fn(Args) -> Args>,
}

impl<H, Args> ErasedHandler<H, Args> {
    /// Wrap a handler for storage behind `dyn DynEventHandler`.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

impl<H, Args> DynEventHandler for ErasedHandler<H, Args>
where
    H: EventHandler<Args>,
    Args: Send + Sync + 'static,
{
    fn invoke_dyn<'a>(
        &'a self,
        scope: &'a mut DispatchScope,
    ) -> BoxFuture<'a, Result<DispatchReply, DispatchError>> {
        self.handler.invoke(scope)
    }
}

/// Macro to implement EventHandler for functions with N extractor arguments.
macro_rules! impl_event_handler {
    // Base case: 0 arguments
    () => {
        impl<F, Fut, Out> EventHandler<()> for F
        where
            F: Fn() -> Fut + Send + Sync + 'static,
            Fut: Future<Output = Out> + Send + 'static,
            Out: IntoDispatchReply,
        {
            fn invoke<'a>(
                &'a self,
                _scope: &'a mut DispatchScope,
            ) -> BoxFuture<'a, Result<DispatchReply, DispatchError>> {
                Box::pin(async move { (self)().await.into_reply() })
            }
        }
    };

    // Recursive case: 1+ arguments
    ($($T:ident),+) => {
        impl<F, Fut, Out, $($T,)+> EventHandler<($($T,)+)> for F
        where
            F: Fn($($T,)+) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = Out> + Send + 'static,
            Out: IntoDispatchReply,
            $($T: Resolve + Send + Sync + 'static,)+
        {
            #[allow(non_snake_case)]
            fn invoke<'a>(
                &'a self,
                scope: &'a mut DispatchScope,
            ) -> BoxFuture<'a, Result<DispatchReply, DispatchError>> {
                Box::pin(async move {
                    $(
                        let $T = $T::resolve(scope).await?;
                    )+
                    (self)($($T,)+).await.into_reply()
                })
            }
        }
    };
}

impl_event_handler!();
impl_event_handler!(T1);
impl_event_handler!(T1, T2);
impl_event_handler!(T1, T2, T3);
impl_event_handler!(T1, T2, T3, T4);
impl_event_handler!(T1, T2, T3, T4, T5);
impl_event_handler!(T1, T2, T3, T4, T5, T6);
impl_event_handler!(T1, T2, T3, T4, T5, T6, T7);
impl_event_handler!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_event_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_event_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_event_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_event_handler!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
