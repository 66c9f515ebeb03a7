#![doc = include_str!("../README.md")]

mod code;
pub use code::{
    ErrorCode, INTERNAL, INVALID_METHOD, INVALID_PARAMS, INVALID_REQUEST, OTHER, PARSE,
    SERVER_ERROR_RANGE,
};

mod input;
pub use input::{Input, InputKind};

mod rejection;
pub use rejection::Rejection;

mod value;
pub use value::ErrorValue;
