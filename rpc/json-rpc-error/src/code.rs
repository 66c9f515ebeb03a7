//! Error codes.

//---------------------------------------------------------------------------------------------------- Use
use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

//---------------------------------------------------------------------------------------------------- Constants
/// Invalid JSON was received by the server.
pub const PARSE: i32 = -32700;

/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;

/// The method does not exist / is not available.
pub const INVALID_METHOD: i32 = -32601;

/// Invalid method parameters.
pub const INVALID_PARAMS: i32 = -32602;

/// Internal JSON-RPC error.
pub const INTERNAL: i32 = -32603;

/// Default, unspecified error.
///
/// This is the code an [`ErrorValue`](crate::ErrorValue) starts with,
/// and the code `0` is coerced into.
pub const OTHER: i32 = -32000;

/// Codes reserved for implementation-defined server errors.
///
/// [`OTHER`] is the upper bound. This range is convention only,
/// codes outside of it are still accepted for application errors.
///
/// ```rust
/// use json_rpc_error::{OTHER, SERVER_ERROR_RANGE};
///
/// assert!(SERVER_ERROR_RANGE.contains(&OTHER));
/// assert!(SERVER_ERROR_RANGE.contains(&-32099));
/// assert!(!SERVER_ERROR_RANGE.contains(&-32100));
/// ```
pub const SERVER_ERROR_RANGE: RangeInclusive<i32> = -32099..=OTHER;

//---------------------------------------------------------------------------------------------------- ErrorCode
/// [Error object code](https://www.jsonrpc.org/specification#error_object).
///
/// Associates a code integer ([`i32`]) with its defined message.
///
/// Any code that is not one of the 5 pre-defined errors
/// is a [`ErrorCode::ServerError`], including application codes
/// outside of [`SERVER_ERROR_RANGE`].
///
/// # Display
/// ```rust
/// use json_rpc_error::ErrorCode;
///
/// for e in [
///     ErrorCode::ParseError,
///     ErrorCode::InvalidRequest,
///     ErrorCode::MethodNotFound,
///     ErrorCode::InvalidParams,
///     ErrorCode::InternalError,
///     ErrorCode::ServerError(-32000),
/// ] {
///     // The formatting is `$CODE: $MSG`.
///     let expected_fmt = format!("{}: {}", e.code(), e.msg());
///     assert_eq!(expected_fmt, format!("{e}"));
/// }
/// ```
///
/// # (De)serialization
/// This type gets (de)serialized as the associated `i32`:
/// ```rust
/// use json_rpc_error::ErrorCode;
/// use serde_json::{to_value, from_value, Value};
///
/// let e = ErrorCode::MethodNotFound;
/// let value = to_value(e).unwrap();
/// assert_eq!(value, Value::Number((-32601).into()));
/// assert_eq!(e, from_value(value).unwrap());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum ErrorCode {
    #[error("{PARSE}: Parse error")]
    /// Invalid JSON was received by the server.
    ParseError,

    #[error("{INVALID_REQUEST}: Invalid Request")]
    /// The JSON sent is not a valid request object.
    InvalidRequest,

    #[error("{INVALID_METHOD}: Method not found")]
    /// The method does not exist / is not available.
    MethodNotFound,

    #[error("{INVALID_PARAMS}: Invalid params")]
    /// Invalid method parameters.
    InvalidParams,

    #[error("{INTERNAL}: Internal error")]
    /// Internal JSON-RPC error.
    InternalError,

    #[error("{0}: Server error")]
    /// Any other code, server or application defined.
    ServerError(i32),
}

impl ErrorCode {
    /// Creates [`Self`] from a [`i32`] code.
    ///
    /// ```rust
    /// use json_rpc_error::{ErrorCode, INTERNAL, PARSE, OTHER};
    ///
    /// assert_eq!(ErrorCode::from_code(PARSE),    ErrorCode::ParseError);
    /// assert_eq!(ErrorCode::from_code(INTERNAL), ErrorCode::InternalError);
    /// assert_eq!(ErrorCode::from_code(OTHER),    ErrorCode::ServerError(OTHER));
    /// assert_eq!(ErrorCode::from_code(404),      ErrorCode::ServerError(404));
    /// ```
    pub const fn from_code(code: i32) -> Self {
        match code {
            PARSE => Self::ParseError,
            INVALID_REQUEST => Self::InvalidRequest,
            INVALID_METHOD => Self::MethodNotFound,
            INVALID_PARAMS => Self::InvalidParams,
            INTERNAL => Self::InternalError,
            code => Self::ServerError(code),
        }
    }

    /// Returns `self`'s [`i32`] code representation.
    pub const fn code(&self) -> i32 {
        match self {
            Self::ParseError => PARSE,
            Self::InvalidRequest => INVALID_REQUEST,
            Self::MethodNotFound => INVALID_METHOD,
            Self::InvalidParams => INVALID_PARAMS,
            Self::InternalError => INTERNAL,
            Self::ServerError(code) => *code,
        }
    }

    /// Returns `self`'s human readable [`str`] message.
    ///
    /// ```rust
    /// use json_rpc_error::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ParseError.msg(),     "Parse error");
    /// assert_eq!(ErrorCode::ServerError(1).msg(), "Server error");
    /// ```
    pub const fn msg(&self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::ServerError(_) => "Server error",
        }
    }

    /// Returns `true` if this code lies within [`SERVER_ERROR_RANGE`].
    ///
    /// ```rust
    /// use json_rpc_error::ErrorCode;
    ///
    /// assert!(ErrorCode::ServerError(-32050).is_server_error());
    /// assert!(!ErrorCode::ServerError(404).is_server_error());
    /// assert!(!ErrorCode::ParseError.is_server_error());
    /// ```
    pub fn is_server_error(&self) -> bool {
        SERVER_ERROR_RANGE.contains(&self.code())
    }
}

//---------------------------------------------------------------------------------------------------- Trait impl
impl<N: Into<i32>> From<N> for ErrorCode {
    fn from(code: N) -> Self {
        Self::from_code(code.into())
    }
}

//---------------------------------------------------------------------------------------------------- Serde impl
impl<'a> Deserialize<'a> for ErrorCode {
    fn deserialize<D: Deserializer<'a>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_code(Deserialize::deserialize(deserializer)?))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}
