//! Why a setter refused its input.

use crate::input::InputKind;

/// Returned by [`ErrorValue::try_set_code`](crate::ErrorValue::try_set_code)
/// and [`ErrorValue::try_set_message`](crate::ErrorValue::try_set_message).
///
/// The field the setter targets is always left untouched when this is returned.
///
/// ```rust
/// use json_rpc_error::{ErrorValue, InputKind, Rejection};
///
/// let mut error = ErrorValue::<()>::default();
/// assert_eq!(error.try_set_code(2.0), Err(Rejection::Code(InputKind::Float)));
/// assert_eq!(error.try_set_code(true).unwrap_err().to_string(), "error code cannot be a boolean");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Rejection {
    /// The input was not an integer, or integer text.
    #[error("error code cannot be a {0}")]
    Code(InputKind),

    /// The input was an integer, but does not fit in an [`i32`].
    #[error("error code {0} does not fit in 32 bits")]
    CodeOutOfRange(i128),

    /// The input was not a scalar.
    #[error("error message cannot be a {0}")]
    Message(InputKind),
}

impl Rejection {
    /// The kind of input that was rejected.
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Code(kind) | Self::Message(kind) => *kind,
            Self::CodeOutOfRange(_) => InputKind::Integer,
        }
    }
}
