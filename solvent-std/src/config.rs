//! Gateway configuration.

use solvent_core::ERROR_EVENT;

/// Allowed CORS origins for the transport handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    /// CORS checking disabled; the transport applies its own default.
    #[default]
    Unset,
    /// Any origin is accepted.
    Any,
    /// Only the listed origins are accepted.
    Origins(Vec<String>),
}

impl CorsOrigins {
    /// Normalize a configured origin list.
    ///
    /// A wildcard anywhere in the list collapses the whole list to
    /// [`CorsOrigins::Any`]; an empty list stays [`CorsOrigins::Unset`].
    pub fn from_list<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let origins: Vec<String> = origins.into_iter().map(Into::into).collect();
        if origins.is_empty() {
            CorsOrigins::Unset
        } else if origins.iter().any(|origin| origin == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::Origins(origins)
        }
    }
}

/// Configuration for an [`EventGateway`](crate::gateway::EventGateway).
///
/// # Example
///
/// ```rust,ignore
/// let config = GatewayConfig::new()
///     .error_event("fault")
///     .cors_allowed_origins(["https://app.example.com"]);
/// let gateway = EventGateway::with_config(transport, config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Event name used for structured error feedback.
    pub error_event: String,
    /// Namespace assumed when a raw event carries none.
    pub default_namespace: String,
    /// Origins the transport should accept during the handshake.
    pub cors_allowed_origins: CorsOrigins,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            error_event: ERROR_EVENT.to_string(),
            default_namespace: "/".to_string(),
            cors_allowed_origins: CorsOrigins::Unset,
        }
    }
}

impl GatewayConfig {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the error feedback event name.
    pub fn error_event(mut self, event: impl Into<String>) -> Self {
        self.error_event = event.into();
        self
    }

    /// Override the namespace assumed for unscoped events.
    pub fn default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Set the allowed CORS origins, normalizing wildcard lists.
    pub fn cors_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cors_allowed_origins = CorsOrigins::from_list(origins);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_anywhere_collapses_to_any() {
        let origins = CorsOrigins::from_list(["https://a.example", "*", "https://b.example"]);
        assert_eq!(origins, CorsOrigins::Any);
    }

    #[test]
    fn explicit_list_is_kept() {
        let origins = CorsOrigins::from_list(["https://a.example"]);
        assert_eq!(
            origins,
            CorsOrigins::Origins(vec!["https://a.example".to_string()])
        );
    }

    #[test]
    fn empty_list_stays_unset() {
        assert_eq!(CorsOrigins::from_list(Vec::<String>::new()), CorsOrigins::Unset);
    }
}
