//! Reply conversion traits.

use crate::error::DispatchError;

/// The outcome a handler reports for its dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchReply {
    /// The event was handled; whatever the handler did stands.
    Accepted,
    /// The handler refused the event (a `connect` handler declining the
    /// connection).
    Rejected,
}

/// Trait for converting a handler's output into a [`DispatchReply`].
///
/// # Default Implementations
///
/// - `()` → Accepted
/// - `bool` → `true` = Accepted, `false` = Rejected
/// - `DispatchReply` → As is
/// - `Option<T>` → Inner `T`, `None` = Accepted
/// - `Result<T, E>` → Delegates to inner `T` or surfaces the error
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid handler output",
    label = "missing `IntoDispatchReply` implementation",
    note = "Handlers must return `()`, `bool`, `DispatchReply`, or a `Result`/`Option` of those."
)]
pub trait IntoDispatchReply {
    /// Convert the output into a dispatch outcome or error.
    fn into_reply(self) -> Result<DispatchReply, DispatchError>;
}

impl IntoDispatchReply for () {
    fn into_reply(self) -> Result<DispatchReply, DispatchError> {
        Ok(DispatchReply::Accepted)
    }
}

impl IntoDispatchReply for bool {
    fn into_reply(self) -> Result<DispatchReply, DispatchError> {
        Ok(if self {
            DispatchReply::Accepted
        } else {
            DispatchReply::Rejected
        })
    }
}

impl IntoDispatchReply for DispatchReply {
    fn into_reply(self) -> Result<DispatchReply, DispatchError> {
        Ok(self)
    }
}

impl<T: IntoDispatchReply> IntoDispatchReply for Option<T> {
    fn into_reply(self) -> Result<DispatchReply, DispatchError> {
        match self {
            Some(inner) => inner.into_reply(),
            None => Ok(DispatchReply::Accepted),
        }
    }
}

impl<T, E> IntoDispatchReply for Result<T, E>
where
    T: IntoDispatchReply,
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_reply(self) -> Result<DispatchReply, DispatchError> {
        match self {
            Ok(inner) => inner.into_reply(),
            Err(err) => Err(DispatchError::Handler(Box::new(err))),
        }
    }
}
