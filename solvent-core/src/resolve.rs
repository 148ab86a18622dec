//! # Resolution Layer (Parameter Extraction)
//!
//! [`Resolve`] is how a handler parameter obtains its value from the dispatch
//! scope. Each parameter kind is an explicit extractor type, so the mapping
//! from a signature slot to its source is visible in the signature itself:
//!
//! | Parameter | Source |
//! |---|---|
//! | [`Sid`] | the seeded connection id |
//! | [`Environ`] | the seeded environment, empty when absent |
//! | [`Data`] | the raw payload value, `null` when absent |
//! | [`Payload<T>`] | the payload mapping coerced into `T` |
//! | [`Dep<T>`] | the provider `T`, resolved at most once per dispatch |
//! | [`Fresh<T>`] | the provider `T`, re-acquired for this reference |
//! | `Option<R>` | `R`, absence or failure yielding `None` |
//! | `Result<R, ResolveError>` | `R`, with the failure handed to the handler |

use crate::error::{ResolveError, ValidationFailure};
use crate::params::{Data, Dep, Environ, Fresh, Payload, Sid};
use crate::provide::Provide;
use crate::scope::DispatchScope;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;

/// Extraction of one handler parameter from the dispatch scope.
///
/// Parameters resolve in declaration order; an extractor may recursively
/// resolve providers, growing the scope's cache and lifespan as it goes.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be resolved from a dispatch scope",
    label = "missing `Resolve` implementation",
    note = "Handler parameters must be extractor types such as `Sid`, `Payload<T>` or `Dep<T>`."
)]
pub trait Resolve: Sized + Send {
    /// Resolve this parameter against the current dispatch.
    fn resolve(
        scope: &mut DispatchScope,
    ) -> impl Future<Output = Result<Self, ResolveError>> + Send;
}

impl Resolve for Sid {
    async fn resolve(scope: &mut DispatchScope) -> Result<Self, ResolveError> {
        Ok(scope.sid().clone())
    }
}

impl Resolve for Environ {
    async fn resolve(scope: &mut DispatchScope) -> Result<Self, ResolveError> {
        Ok(scope.environ().clone())
    }
}

impl Resolve for Data {
    async fn resolve(scope: &mut DispatchScope) -> Result<Self, ResolveError> {
        Ok(Data(scope.data().cloned().unwrap_or(Value::Null)))
    }
}

impl<T> Resolve for Payload<T>
where
    T: DeserializeOwned + Send,
{
    async fn resolve(scope: &mut DispatchScope) -> Result<Self, ResolveError> {
        let value = match scope.data() {
            Some(value) => value,
            None => {
                return Err(ResolveError::UnsupportedData { received: "null" });
            }
        };
        match value {
            Value::Object(_) => match serde_path_to_error::deserialize(value.clone()) {
                Ok(model) => Ok(Payload(model)),
                Err(err) => Err(ResolveError::Validation(ValidationFailure::from_json_path(
                    &err,
                ))),
            },
            other => Err(ResolveError::UnsupportedData {
                received: payload_type_name(other),
            }),
        }
    }
}

impl<T: Provide> Resolve for Dep<T> {
    async fn resolve(scope: &mut DispatchScope) -> Result<Self, ResolveError> {
        Ok(Dep(scope.resolve::<T>().await?))
    }
}

impl<T: Provide> Resolve for Fresh<T> {
    async fn resolve(scope: &mut DispatchScope) -> Result<Self, ResolveError> {
        Ok(Fresh(scope.resolve_fresh::<T>().await?))
    }
}

// Blanket implementations, mirroring optional/fallible parameter declarations.

impl<R: Resolve> Resolve for Option<R> {
    async fn resolve(scope: &mut DispatchScope) -> Result<Self, ResolveError> {
        Ok(R::resolve(scope).await.ok())
    }
}

impl<R: Resolve> Resolve for Result<R, ResolveError> {
    async fn resolve(scope: &mut DispatchScope) -> Result<Self, ResolveError> {
        Ok(R::resolve(scope).await)
    }
}

/// The wire-facing name for a payload value's type.
pub fn payload_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Profile {
        name: String,
    }

    fn scope_with(data: Option<Value>) -> DispatchScope {
        DispatchScope::new(Sid::new("s1"), data, Environ::empty())
    }

    #[tokio::test]
    async fn payload_coerces_a_mapping() {
        let mut scope = scope_with(Some(json!({"name": "alice"})));
        let payload = Payload::<Profile>::resolve(&mut scope).await.unwrap();
        assert_eq!(payload.name, "alice");
    }

    #[tokio::test]
    async fn payload_reports_the_failing_field() {
        let mut scope = scope_with(Some(json!({"name": 123})));
        let err = Payload::<Profile>::resolve(&mut scope).await.unwrap_err();
        match err {
            ResolveError::Validation(failure) => {
                assert!(failure.detail().starts_with("name "), "{}", failure);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn payload_rejects_non_mapping_values() {
        let mut scope = scope_with(Some(json!(42)));
        let err = Payload::<Profile>::resolve(&mut scope).await.unwrap_err();
        match err {
            ResolveError::UnsupportedData { received } => assert_eq!(received, "int"),
            other => panic!("expected unsupported data, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn data_passes_the_raw_value_through() {
        let mut scope = scope_with(Some(json!([1, 2, 3])));
        let data = Data::resolve(&mut scope).await.unwrap();
        assert_eq!(*data, json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn optional_payload_swallows_absence() {
        let mut scope = scope_with(None);
        let payload = Option::<Payload<Profile>>::resolve(&mut scope)
            .await
            .unwrap();
        assert!(payload.is_none());
    }

    #[test]
    fn type_names_match_the_wire_vocabulary() {
        assert_eq!(payload_type_name(&json!(null)), "null");
        assert_eq!(payload_type_name(&json!(true)), "bool");
        assert_eq!(payload_type_name(&json!(7)), "int");
        assert_eq!(payload_type_name(&json!(1.5)), "float");
        assert_eq!(payload_type_name(&json!("hi")), "str");
        assert_eq!(payload_type_name(&json!([])), "list");
        assert_eq!(payload_type_name(&json!({})), "map");
    }
}
