//! Error object.

//---------------------------------------------------------------------------------------------------- Use
use std::{
    error::Error,
    fmt::{self, Debug, Display},
};

use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{
    code::{ErrorCode, OTHER},
    input::Input,
    rejection::Rejection,
};

//---------------------------------------------------------------------------------------------------- ErrorValue
/// [The error object](https://www.jsonrpc.org/specification#error_object).
///
/// Holds the `code`, `message` and `data` members of a JSON-RPC error.
///
/// The setters never fail: input that does not fit a field is dropped and
/// the field keeps its old value. The `try_set_*` variants report why.
///
/// The generic `D` is the `data` payload, it is never inspected.
///
/// ```rust
/// use json_rpc_error::{ErrorValue, OTHER};
/// use serde_json::json;
///
/// let mut error: ErrorValue = ErrorValue::default();
/// error
///     .set_code("-32700")
///     .set_message("Parse error")
///     .set_data(json!({"line": 3}));
///
/// assert_eq!(error.code(), -32700);
/// assert_eq!(error.message(), Some("Parse error"));
/// assert_eq!(
///     error.to_string(),
///     r#"{"code":-32700,"message":"Parse error","data":{"line":3}}"#,
/// );
///
/// // Invalid input is ignored.
/// error.set_code(2.0).set_message(json!([]));
/// assert_eq!(error.code(), -32700);
/// assert_eq!(error.message(), Some("Parse error"));
///
/// // `0` is not a meaningful code.
/// error.set_code(0);
/// assert_eq!(error.code(), OTHER);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorValue<D = Value> {
    /// Always a valid code, [`OTHER`] by default.
    code: i32,

    /// [`None`] if never set, distinct from an empty string.
    message: Option<String>,

    /// [`None`] if never set.
    data: Option<D>,
}

impl<D> Default for ErrorValue<D> {
    fn default() -> Self {
        Self {
            code: OTHER,
            message: None,
            data: None,
        }
    }
}

impl<D> ErrorValue<D> {
    /// Create a new error.
    ///
    /// This is the same as calling [`Self::set_message`],
    /// [`Self::set_code`] then [`Self::set_data`] on a
    /// [`Self::default`], so invalid input is dropped the same way.
    ///
    /// ```rust
    /// use json_rpc_error::{ErrorValue, OTHER};
    /// use serde_json::{json, Value};
    ///
    /// let error = ErrorValue::<Value>::new("Unknown Error", OTHER, json!({"foo": "bar"}));
    /// assert_eq!(error.code(), OTHER);
    /// assert_eq!(error.message(), Some("Unknown Error"));
    /// assert_eq!(error.data(), Some(&json!({"foo": "bar"})));
    ///
    /// let error = ErrorValue::<Value>::new(None::<&str>, "foo", None);
    /// assert_eq!(error, ErrorValue::default());
    /// ```
    pub fn new(
        message: impl Into<Input>,
        code: impl Into<Input>,
        data: impl Into<Option<D>>,
    ) -> Self {
        let mut this = Self::default();
        this.set_message(message).set_code(code).set_data(data);
        this
    }

    /// Creates a new error with the code and default message of `code`.
    ///
    /// ```rust
    /// use json_rpc_error::{ErrorCode, ErrorValue};
    ///
    /// let error = ErrorValue::<()>::from_code(ErrorCode::InvalidParams);
    /// assert_eq!(error.code(), -32602);
    /// assert_eq!(error.message(), Some("Invalid params"));
    /// assert_eq!(error.data(), None);
    /// ```
    pub fn from_code(code: ErrorCode) -> Self {
        let mut this = Self::default();
        this.set_code(code).set_message(code.msg());
        this
    }

    /// Creates a new error using [`ErrorCode::ParseError`].
    pub fn parse_error() -> Self {
        Self::from_code(ErrorCode::ParseError)
    }

    /// Creates a new error using [`ErrorCode::InvalidRequest`].
    pub fn invalid_request() -> Self {
        Self::from_code(ErrorCode::InvalidRequest)
    }

    /// Creates a new error using [`ErrorCode::MethodNotFound`].
    pub fn method_not_found() -> Self {
        Self::from_code(ErrorCode::MethodNotFound)
    }

    /// Creates a new error using [`ErrorCode::InvalidParams`].
    pub fn invalid_params() -> Self {
        Self::from_code(ErrorCode::InvalidParams)
    }

    /// Creates a new error using [`ErrorCode::InternalError`].
    pub fn internal_error() -> Self {
        Self::from_code(ErrorCode::InternalError)
    }

    /// Creates a new error using [`ErrorCode::ServerError`].
    ///
    /// You must provide the custom [`i32`] error code,
    /// `0` still becomes [`OTHER`].
    ///
    /// ```rust
    /// use json_rpc_error::{ErrorValue, OTHER};
    ///
    /// assert_eq!(ErrorValue::<()>::server_error(-32001).code(), -32001);
    /// assert_eq!(ErrorValue::<()>::server_error(0).code(), OTHER);
    /// ```
    pub fn server_error(error_code: i32) -> Self {
        Self::from_code(ErrorCode::ServerError(error_code))
    }

    //------------------------------------------------------------------------------------------------ Code
    /// Set the error code, dropping invalid input.
    ///
    /// See [`Self::try_set_code`] for what is accepted.
    pub fn set_code(&mut self, code: impl Into<Input>) -> &mut Self {
        if let Err(rejection) = self.try_set_code(code) {
            trace_rejection(&rejection);
        }
        self
    }

    /// Set the error code.
    ///
    /// Integers and integer-valued numeric text (`"-32700"`, `" 404 "`,
    /// `"2.0"`, `"1e3"`) that fit in an [`i32`] are accepted. Everything
    /// else, including booleans and floats with no fractional part, is rejected.
    ///
    /// `0` is stored as [`OTHER`].
    ///
    /// On success, the stored code is returned.
    ///
    /// # Errors
    /// The current code is left unchanged and a [`Rejection`] returned
    /// if the input is not an acceptable integer.
    ///
    /// ```rust
    /// use json_rpc_error::{ErrorValue, InputKind, Rejection, OTHER};
    ///
    /// let mut error = ErrorValue::<()>::default();
    /// assert_eq!(error.try_set_code("404"), Ok(404));
    /// assert_eq!(error.try_set_code("1e3"), Ok(1000));
    /// assert_eq!(error.try_set_code(0), Ok(OTHER));
    /// assert_eq!(error.try_set_code("foo"), Err(Rejection::Code(InputKind::Text)));
    /// assert_eq!(error.try_set_code(u64::MAX), Err(Rejection::CodeOutOfRange(u64::MAX.into())));
    /// assert_eq!(error.code(), OTHER);
    /// ```
    pub fn try_set_code(&mut self, code: impl Into<Input>) -> Result<i32, Rejection> {
        let input = code.into();

        let Some(int) = input.as_integer() else {
            return Err(Rejection::Code(input.kind()));
        };

        let code = i32::try_from(int).map_err(|_| Rejection::CodeOutOfRange(int))?;

        self.code = if code == 0 { OTHER } else { code };
        Ok(self.code)
    }

    /// Returns the current error code.
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Returns the current error code as an [`ErrorCode`].
    ///
    /// ```rust
    /// use json_rpc_error::{ErrorCode, ErrorValue};
    ///
    /// assert_eq!(ErrorValue::<()>::parse_error().error_code(), ErrorCode::ParseError);
    /// assert_eq!(ErrorValue::<()>::default().error_code(), ErrorCode::ServerError(-32000));
    /// ```
    pub const fn error_code(&self) -> ErrorCode {
        ErrorCode::from_code(self.code)
    }

    //------------------------------------------------------------------------------------------------ Message
    /// Set the error message, dropping invalid input.
    ///
    /// See [`Self::try_set_message`] for what is accepted.
    pub fn set_message(&mut self, message: impl Into<Input>) -> &mut Self {
        if let Err(rejection) = self.try_set_message(message) {
            trace_rejection(&rejection);
        }
        self
    }

    /// Set the error message.
    ///
    /// Any scalar is accepted and converted to text, see [`Input::to_text`].
    ///
    /// # Errors
    /// The current message is left unchanged and a [`Rejection`] returned
    /// if the input is null or a compound value.
    ///
    /// ```rust
    /// use json_rpc_error::{ErrorValue, InputKind, Rejection};
    /// use serde_json::json;
    ///
    /// let mut error = ErrorValue::<()>::default();
    /// assert_eq!(error.try_set_message(true), Ok("1"));
    /// assert_eq!(error.try_set_message(2.0), Ok("2"));
    /// assert_eq!(error.try_set_message(&json!({})), Err(Rejection::Message(InputKind::Compound)));
    /// assert_eq!(error.message(), Some("2"));
    /// ```
    pub fn try_set_message(&mut self, message: impl Into<Input>) -> Result<&str, Rejection> {
        let input = message.into();

        let Some(text) = input.to_text() else {
            return Err(Rejection::Message(input.kind()));
        };

        Ok(self.message.insert(text).as_str())
    }

    /// Returns the current message, [`None`] if never set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    //------------------------------------------------------------------------------------------------ Data
    /// Set the error data.
    ///
    /// Any value is accepted, including [`None`] which clears it.
    pub fn set_data(&mut self, data: impl Into<Option<D>>) -> &mut Self {
        self.data = data.into();
        self
    }

    /// Returns a reference to the current data, [`None`] if never set.
    pub const fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    /// Take the current data out, leaving [`None`].
    pub const fn take_data(&mut self) -> Option<D> {
        self.data.take()
    }

    /// Consume `self`, returning the data.
    pub fn into_data(self) -> Option<D> {
        self.data
    }
}

/// Rejections are not surfaced by the fluent setters, only traced.
#[cfg_attr(not(feature = "tracing"), expect(unused_variables))]
fn trace_rejection(rejection: &Rejection) {
    #[cfg(feature = "tracing")]
    tracing::trace!(kind = %rejection.kind(), "{rejection}, ignoring");
}

//---------------------------------------------------------------------------------------------------- Serialization
impl<D: Serialize> ErrorValue<D> {
    /// Returns the `{code, message, data}` map, in that order.
    ///
    /// An absent message or data is `null`, not omitted.
    ///
    /// # Errors
    /// Only if `D`'s [`Serialize`] implementation fails,
    /// this cannot happen for the default [`Value`].
    ///
    /// ```rust
    /// use json_rpc_error::ErrorValue;
    /// use serde_json::{json, Value};
    ///
    /// let map = ErrorValue::<Value>::default().to_structured().unwrap();
    /// let keys = map.keys().map(String::as_str).collect::<Vec<_>>();
    /// assert_eq!(keys, ["code", "message", "data"]);
    /// assert_eq!(Value::Object(map), json!({"code": -32000, "message": null, "data": null}));
    /// ```
    pub fn to_structured(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut map = Map::with_capacity(3);
        map.insert(String::from("code"), Value::from(self.code));
        map.insert(
            String::from("message"),
            self.message.clone().map_or(Value::Null, Value::String),
        );
        map.insert(String::from("data"), serde_json::to_value(&self.data)?);
        Ok(map)
    }

    /// Returns the compact JSON text of [`Self::to_structured`].
    ///
    /// # Errors
    /// Only if `D`'s [`Serialize`] implementation fails,
    /// this cannot happen for the default [`Value`].
    ///
    /// ```rust
    /// use json_rpc_error::ErrorValue;
    /// use serde_json::Value;
    ///
    /// let error = ErrorValue::<Value>::method_not_found();
    /// assert_eq!(
    ///     error.to_json().unwrap(),
    ///     r#"{"code":-32601,"message":"Method not found","data":null}"#,
    /// );
    /// ```
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<D: Serialize> Serialize for ErrorValue<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ErrorValue", 3)?;

        // All members are required, even if `null`.
        s.serialize_field("code", &self.code)?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("data", &self.data)?;

        s.end()
    }
}

/// The wire shape, before the setters' rules are applied.
#[derive(Deserialize)]
#[serde(bound = "D: Deserialize<'de>")]
struct Wire<D> {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<D>,
}

impl<'de, D: Deserialize<'de>> Deserialize<'de> for ErrorValue<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let wire = Wire::<D>::deserialize(deserializer)?;

        let mut this = Self {
            message: wire.message,
            data: wire.data,
            ..Self::default()
        };

        // Same rules as the setter, except rejections are fatal.
        if let Some(code) = wire.code {
            this.try_set_code(code).map_err(serde::de::Error::custom)?;
        }

        Ok(this)
    }
}

//---------------------------------------------------------------------------------------------------- Trait impl
impl<D> From<ErrorCode> for ErrorValue<D> {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code)
    }
}

/// Formats as [`ErrorValue::to_json`].
impl<D: Serialize> Display for ErrorValue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json().map_err(|_| fmt::Error)?)
    }
}

impl<D: Serialize + Debug> Error for ErrorValue<D> {}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{code::SERVER_ERROR_RANGE, input::InputKind};

    fn error() -> ErrorValue {
        ErrorValue::default()
    }

    #[test]
    fn defaults() {
        let error = error();
        assert_eq!(error.code(), OTHER);
        assert_eq!(error.message(), None);
        assert_eq!(error.data(), None);
    }

    #[test]
    fn code_from_integer_text() {
        let mut error = error();
        error.set_code("-32700");
        assert_eq!(error.code(), -32700);
    }

    #[test]
    fn code_rejects_non_integers() {
        let mut error = error();
        for code in [
            json!(null),
            json!(true),
            json!("foo"),
            json!([]),
            json!({}),
            json!(2.0),
        ] {
            error.set_code(&code);
            assert_eq!(error.code(), OTHER, "{code}");
        }

        assert_eq!(error.try_set_code(false), Err(Rejection::Code(InputKind::Boolean)));
        assert_eq!(error.try_set_code(None::<i32>), Err(Rejection::Code(InputKind::Null)));
        assert_eq!(error.try_set_code("2.5"), Err(Rejection::Code(InputKind::Text)));
        assert_eq!(error.try_set_code("1e-3"), Err(Rejection::Code(InputKind::Text)));
    }

    #[test]
    fn code_from_integer_valued_numeric_text() {
        let mut error = error();
        for (code, expected) in [("2.0", 2), ("-32700.0", -32700), ("1e3", 1000), ("-3.2E4", OTHER)] {
            error.set_code(code);
            assert_eq!(error.code(), expected, "{code}");
        }

        error.set_code("0.0e5");
        assert_eq!(error.code(), OTHER);

        error.set_code(404).set_code("2.5");
        assert_eq!(error.code(), 404);
    }

    #[test]
    fn code_accepts_server_error_range() {
        let mut error = error();
        for code in SERVER_ERROR_RANGE {
            error.set_code(code);
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn code_accepts_arbitrary_codes() {
        let mut error = error();
        for code in [1000, 404, -3000, i32::MIN, i32::MAX] {
            error.set_code(code);
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn code_zero_is_other() {
        let mut error = error();
        error.set_code(404).set_code(0);
        assert_eq!(error.code(), OTHER);

        error.set_code(404).set_code("0");
        assert_eq!(error.code(), OTHER);
    }

    #[test]
    fn code_out_of_range() {
        let mut error = error();
        error.set_code(404);
        assert_eq!(
            error.try_set_code(i64::from(i32::MAX) + 1),
            Err(Rejection::CodeOutOfRange(i128::from(i32::MAX) + 1))
        );
        assert_eq!(
            error.try_set_code("-99999999999"),
            Err(Rejection::CodeOutOfRange(-99_999_999_999))
        );
        assert_eq!(error.code(), 404);
    }

    #[test]
    fn message_casts_scalars() {
        let mut error = error();
        for (message, expected) in [(json!(true), "1"), (json!(2.0), "2"), (json!(25), "25")] {
            error.set_message(&message);
            assert_eq!(error.message(), Some(expected));
        }

        error.set_message(false);
        assert_eq!(error.message(), Some(""));
    }

    #[test]
    fn message_rejects_compound() {
        let mut error = error();
        for message in [json!([]), json!({})] {
            error.set_message(message);
            assert_eq!(error.message(), None);
        }

        error.set_message(None::<&str>);
        assert_eq!(error.message(), None);
    }

    #[test]
    fn data_is_arbitrary() {
        let mut error = error();
        for data in [
            json!(true),
            json!("foo"),
            json!(2),
            json!(2.0),
            json!([]),
            json!({}),
        ] {
            error.set_data(data.clone());
            assert_eq!(error.data(), Some(&data));
        }

        error.set_data(None);
        assert_eq!(error.data(), None);
    }

    #[test]
    fn data_ownership() {
        let mut error = ErrorValue::<Vec<u8>>::new("msg", OTHER, vec![1, 2, 3]);
        assert_eq!(error.take_data(), Some(vec![1, 2, 3]));
        assert_eq!(error.data(), None);

        error.set_data(vec![4]);
        assert_eq!(error.into_data(), Some(vec![4]));
    }

    #[test]
    fn new_applies_setters() {
        let error = ErrorValue::<Value>::new(json!([]), 0, json!(null));
        assert_eq!(error.code(), OTHER);
        assert_eq!(error.message(), None);
        // A JSON `null` payload is still a payload.
        assert_eq!(error.data(), Some(&Value::Null));
    }

    #[test]
    fn standard_constructors() {
        for (error, code) in [
            (ErrorValue::<()>::parse_error(), ErrorCode::ParseError),
            (ErrorValue::invalid_request(), ErrorCode::InvalidRequest),
            (ErrorValue::method_not_found(), ErrorCode::MethodNotFound),
            (ErrorValue::invalid_params(), ErrorCode::InvalidParams),
            (ErrorValue::internal_error(), ErrorCode::InternalError),
            (ErrorValue::server_error(-32042), ErrorCode::ServerError(-32042)),
        ] {
            assert_eq!(error.error_code(), code);
            assert_eq!(error.message(), Some(code.msg()));
            assert_eq!(error, ErrorValue::from(code));
        }
    }

    #[test]
    fn display_is_json() {
        let error = ErrorValue::<Value>::new("Unknown Error", OTHER, json!({"foo": "bar"}));
        assert_eq!(error.to_string(), error.to_json().unwrap());
        assert_eq!(
            error.to_string(),
            r#"{"code":-32000,"message":"Unknown Error","data":{"foo":"bar"}}"#
        );
    }

    #[test]
    fn error_trait() {
        let error: Box<dyn Error> = Box::new(ErrorValue::<Value>::internal_error());
        assert_eq!(
            error.to_string(),
            r#"{"code":-32603,"message":"Internal error","data":null}"#
        );
    }
}
