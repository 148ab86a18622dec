//! # Event Gateway
//!
//! The server-side wrapper around a [`Transport`]: handlers register by
//! event name, and every inbound dispatch runs through the resolution
//! engine with a fresh [`DispatchScope`].
//!
//! Per dispatch, the gateway:
//!
//! 1. normalizes the raw argument shapes (connection lifecycle events carry
//!    their environment positionally);
//! 2. seeds a scope with the connection id, payload, and environment;
//! 3. invokes the handler through argument resolution;
//! 4. on a payload-shape failure, emits structured [`ErrorMessage`] feedback
//!    to the originating connection, then surfaces the error to the caller;
//! 5. runs every registered release step, in reverse, on every outcome.

use crate::config::GatewayConfig;
use crate::transport::{EmitOptions, OutboundMessage, RawEvent, Transport};
use serde_json::{Map, Value};
use solvent_core::{
    DispatchError, DispatchReply, DispatchScope, DynEventHandler, EmitError, Environ,
    ErasedHandler, ErrorMessage, EventHandler, MESSAGE_EVENT, ResolveError, Sid, WirePayload,
};
use std::collections::HashMap;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HandlerKey {
    namespace: String,
    event: String,
}

/// A socket event gateway with dependency-resolving handlers.
///
/// # Example
///
/// ```rust,ignore
/// let mut gateway = EventGateway::new(transport);
/// gateway.on("connect", connect);
/// gateway.on("chat", |sid: Sid, msg: Payload<Chat>, store: Dep<Store>| async move {
///     store.record(&sid, &msg).await
/// });
/// ```
pub struct EventGateway<T> {
    transport: T,
    config: GatewayConfig,
    handlers: HashMap<HandlerKey, Box<dyn DynEventHandler>>,
}

impl<T: Transport> EventGateway<T> {
    /// A gateway over the given transport with default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, GatewayConfig::default())
    }

    /// A gateway over the given transport with explicit configuration.
    pub fn with_config(transport: T, config: GatewayConfig) -> Self {
        Self {
            transport,
            config,
            handlers: HashMap::new(),
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Register a handler for an event on the default namespace.
    pub fn on<Args, H>(&mut self, event: &str, handler: H) -> &mut Self
    where
        H: EventHandler<Args>,
        Args: Send + Sync + 'static,
    {
        let namespace = self.config.default_namespace.clone();
        self.register(namespace, event, handler)
    }

    /// Register a handler for an event on a specific namespace.
    pub fn on_ns<Args, H>(&mut self, namespace: &str, event: &str, handler: H) -> &mut Self
    where
        H: EventHandler<Args>,
        Args: Send + Sync + 'static,
    {
        self.register(namespace.to_string(), event, handler)
    }

    fn register<Args, H>(&mut self, namespace: String, event: &str, handler: H) -> &mut Self
    where
        H: EventHandler<Args>,
        Args: Send + Sync + 'static,
    {
        let key = HandlerKey {
            namespace,
            event: event.to_string(),
        };
        let erased: Box<dyn DynEventHandler> = Box::new(ErasedHandler::<H, Args>::new(handler));
        self.handlers.insert(key, erased);
        self
    }

    /// Dispatch a raw inbound event through its registered handler.
    ///
    /// Payload-shape failures are reported back to the originating
    /// connection before the error returns; every other handler or
    /// dependency failure passes through untranslated. Registered release
    /// steps run before this returns, whatever the outcome.
    pub async fn dispatch(&self, raw: RawEvent) -> Result<DispatchReply, DispatchError> {
        let event = raw.event.clone();
        let key = HandlerKey {
            namespace: raw
                .namespace
                .clone()
                .unwrap_or_else(|| self.config.default_namespace.clone()),
            event: event.clone(),
        };
        let handler = self
            .handlers
            .get(&key)
            .ok_or_else(|| DispatchError::NotHandled {
                event: event.clone(),
            })?;

        let (sid, data, environ) = seed(raw);
        debug!(%event, %sid, "dispatching event");

        let mut scope = DispatchScope::new(sid, data, environ);
        let outcome = handler.invoke_dyn(&mut scope).await;

        let outcome = match outcome {
            Err(DispatchError::Resolve(err)) => {
                self.report_resolve_failure(&event, scope.sid(), &err).await;
                Err(DispatchError::Resolve(err))
            }
            other => other,
        };

        if let Err(failures) = scope.run_teardowns().await {
            warn!(%event, %failures, "dispatch teardown reported failures");
        }

        outcome
    }

    /// Emit an event, converting the payload to its wire form.
    pub async fn emit<P>(
        &self,
        event: &str,
        data: &P,
        options: EmitOptions,
    ) -> Result<(), EmitError>
    where
        P: WirePayload + Sync + ?Sized,
    {
        let message = OutboundMessage {
            event: event.to_string(),
            data: data.to_wire()?,
            options,
        };
        self.transport
            .deliver(message)
            .await
            .map_err(EmitError::Transport)
    }

    /// Emit a plain message event.
    pub async fn send<P>(&self, data: &P, options: EmitOptions) -> Result<(), EmitError>
    where
        P: WirePayload + Sync + ?Sized,
    {
        self.emit(MESSAGE_EVENT, data, options).await
    }

    async fn report_resolve_failure(&self, event: &str, sid: &Sid, err: &ResolveError) {
        let feedback = match err {
            ResolveError::Validation(failure) => {
                ErrorMessage::invalid_payload(event, failure.detail())
            }
            ResolveError::UnsupportedData { received } => {
                ErrorMessage::unsupported_data(event, received)
            }
            // Provider failures are not translated into client feedback.
            ResolveError::Provider(_) => return,
        };
        let options = EmitOptions::new().to(sid.as_str());
        if let Err(error) = self.emit(&self.config.error_event, &feedback, options).await {
            error!(%error, %event, "failed to deliver error feedback");
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for EventGateway<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventGateway")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Normalize a raw event's argument shapes into the scope seed.
///
/// A `connect` dispatch carries its environment as the first positional
/// argument and an optional auth payload second; `disconnect` drops its
/// trailing argument (newer transports append a disconnect reason older
/// handlers never saw); everything else takes the first positional argument
/// as the payload and the named environment when present.
fn seed(raw: RawEvent) -> (Sid, Option<Value>, Environ) {
    let sid = Sid::new(raw.sid);
    let mut args = raw.args;
    match raw.event.as_str() {
        "connect" => {
            let mut args = args.into_iter();
            let environ = match args.next() {
                Some(Value::Object(map)) => Environ::new(map),
                _ => named_environ(raw.environ),
            };
            (sid, args.next(), environ)
        }
        "disconnect" => {
            args.pop();
            (sid, args.into_iter().next(), named_environ(raw.environ))
        }
        _ => (sid, args.into_iter().next(), named_environ(raw.environ)),
    }
}

fn named_environ(environ: Option<Map<String, Value>>) -> Environ {
    environ.map(Environ::new).unwrap_or_default()
}
