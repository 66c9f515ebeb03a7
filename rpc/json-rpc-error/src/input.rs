//! Loosely-typed input for the code and message setters.

//---------------------------------------------------------------------------------------------------- Use
use std::borrow::Cow;

use serde_json::{Number, Value};
use strum::{Display, IntoStaticStr};

use crate::code::ErrorCode;

//---------------------------------------------------------------------------------------------------- Input
/// A scalar-or-not value handed to
/// [`ErrorValue::set_code`](crate::ErrorValue::set_code) or
/// [`ErrorValue::set_message`](crate::ErrorValue::set_message).
///
/// Callers at the protocol boundary rarely know the type of what they
/// received, so the setters take anything convertible into this and decide
/// per [`InputKind`] whether to accept it.
///
/// ```rust
/// use json_rpc_error::{Input, InputKind};
/// use serde_json::json;
///
/// assert_eq!(Input::from(-32700).kind(),        InputKind::Integer);
/// assert_eq!(Input::from("-32700").kind(),      InputKind::IntegerText);
/// assert_eq!(Input::from("foo").kind(),         InputKind::Text);
/// assert_eq!(Input::from(2.0).kind(),           InputKind::Float);
/// assert_eq!(Input::from(true).kind(),          InputKind::Boolean);
/// assert_eq!(Input::from(None::<&str>).kind(),  InputKind::Null);
/// assert_eq!(Input::from(&json!([])).kind(),    InputKind::Compound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// No value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer of any width up to [`u64`]/[`i64`].
    Int(i128),
    /// A floating point number, integral or not.
    Float(f64),
    /// Text, which may or may not look like an integer.
    Text(String),
    /// An array, object, or anything else that is not a scalar.
    Compound,
}

/// The classification of an [`Input`].
///
/// The [`Display`](std::fmt::Display) form is a human readable name,
/// used in [`Rejection`](crate::Rejection) messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, IntoStaticStr)]
pub enum InputKind {
    /// [`Input::Null`].
    #[strum(to_string = "null")]
    Null,
    /// [`Input::Bool`].
    #[strum(to_string = "boolean")]
    Boolean,
    /// [`Input::Int`].
    #[strum(to_string = "integer")]
    Integer,
    /// [`Input::Text`] holding an integer value, e.g. `"-32700"` or `"1e3"`.
    #[strum(to_string = "integer string")]
    IntegerText,
    /// Any other [`Input::Text`].
    #[strum(to_string = "non-integer string")]
    Text,
    /// [`Input::Float`].
    #[strum(to_string = "float")]
    Float,
    /// [`Input::Compound`].
    #[strum(to_string = "compound value")]
    Compound,
}

impl Input {
    /// Classify this input.
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Null => InputKind::Null,
            Self::Bool(_) => InputKind::Boolean,
            Self::Int(_) => InputKind::Integer,
            Self::Float(_) => InputKind::Float,
            Self::Text(text) => {
                if parse_integer(text).is_some() {
                    InputKind::IntegerText
                } else {
                    InputKind::Text
                }
            }
            Self::Compound => InputKind::Compound,
        }
    }

    /// Returns the integer this input represents.
    ///
    /// Only [`Input::Int`] and integer-valued numeric text qualify;
    /// booleans and floats never do, even `true` or `2.0`.
    ///
    /// ```rust
    /// use json_rpc_error::Input;
    ///
    /// assert_eq!(Input::from(404).as_integer(),       Some(404));
    /// assert_eq!(Input::from(" -32700 ").as_integer(), Some(-32700));
    /// assert_eq!(Input::from("2.0").as_integer(),     Some(2));
    /// assert_eq!(Input::from("1e3").as_integer(),     Some(1000));
    /// assert_eq!(Input::from("1.5").as_integer(),     None);
    /// assert_eq!(Input::from(2.0).as_integer(),       None);
    /// assert_eq!(Input::from(true).as_integer(),      None);
    /// ```
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Int(int) => Some(*int),
            Self::Text(text) => parse_integer(text),
            Self::Null | Self::Bool(_) | Self::Float(_) | Self::Compound => None,
        }
    }

    /// Returns the textual form of a scalar input.
    ///
    /// `true` becomes `"1"`, `false` becomes `""`, and integral
    /// floats lose their fractional part (`2.0` becomes `"2"`).
    /// [`Input::Null`] and [`Input::Compound`] return [`None`].
    ///
    /// ```rust
    /// use json_rpc_error::Input;
    ///
    /// assert_eq!(Input::from(true).to_text().as_deref(),  Some("1"));
    /// assert_eq!(Input::from(false).to_text().as_deref(), Some(""));
    /// assert_eq!(Input::from(2.0).to_text().as_deref(),   Some("2"));
    /// assert_eq!(Input::from(2.5).to_text().as_deref(),   Some("2.5"));
    /// assert_eq!(Input::from(25).to_text().as_deref(),    Some("25"));
    /// assert_eq!(Input::Null.to_text(),                   None);
    /// ```
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Bool(true) => Some(String::from("1")),
            Self::Bool(false) => Some(String::new()),
            Self::Int(int) => Some(int.to_string()),
            Self::Float(float) => Some(float.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::Null | Self::Compound => None,
        }
    }
}

/// Parse numeric text holding an integer value.
///
/// Surrounding whitespace, a leading sign, a fractional part
/// and an exponent are allowed (`" -32700 "`, `"2.0"`, `"1e3"`),
/// as long as the value is integral. The conversion is exact.
fn parse_integer(text: &str) -> Option<i128> {
    let text = text.trim_ascii();

    if let Ok(int) = text.parse::<i128>() {
        return Some(int);
    }

    let (negative, unsigned) = if let Some(unsigned) = text.strip_prefix('-') {
        (true, unsigned)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    };

    let (mantissa, exponent) = if let Some((mantissa, exponent)) = unsigned.split_once(['e', 'E']) {
        (mantissa, exponent.parse::<i32>().ok()?)
    } else {
        (unsigned, 0)
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{whole}{fraction}");
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }

    // The value is `digits * 10^scale`.
    let scale = exponent.checked_sub(i32::try_from(fraction.len()).ok()?)?;

    let int = if scale < 0 {
        let dropped = usize::try_from(scale.unsigned_abs()).ok()?;
        let (kept, dropped) = digits.split_at(digits.len().checked_sub(dropped)?);
        if !dropped.bytes().all(|b| b == b'0') {
            return None;
        }
        kept.parse::<i128>().ok()?
    } else {
        let power = 10_i128.checked_pow(scale.unsigned_abs())?;
        digits.parse::<i128>().ok()?.checked_mul(power)?
    };

    if negative {
        int.checked_neg()
    } else {
        Some(int)
    }
}

//---------------------------------------------------------------------------------------------------- From
/// Implement `From<$int> for Input` through a lossless [`i128`] conversion.
macro_rules! impl_from_int {
    ($($int:ty),* $(,)?) => {
        $(
            impl From<$int> for Input {
                fn from(int: $int) -> Self {
                    Self::Int(i128::from(int))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<bool> for Input {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f32> for Input {
    fn from(float: f32) -> Self {
        Self::Float(f64::from(float))
    }
}

impl From<f64> for Input {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<char> for Input {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<&String> for Input {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Cow<'_, str>> for Input {
    fn from(text: Cow<'_, str>) -> Self {
        Self::Text(text.into_owned())
    }
}

impl From<ErrorCode> for Input {
    fn from(code: ErrorCode) -> Self {
        Self::Int(i128::from(code.code()))
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl From<&Value> for Input {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::from_number(n),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Compound,
        }
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::from_number(&n),
            Value::String(s) => Self::Text(s),
            Value::Array(_) | Value::Object(_) => Self::Compound,
        }
    }
}

impl Input {
    /// JSON integers become [`Input::Int`], everything else [`Input::Float`].
    fn from_number(n: &Number) -> Self {
        let int = n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from));

        match (int, n.as_f64()) {
            (Some(int), _) => Self::Int(int),
            (None, Some(float)) => Self::Float(float),
            (None, None) => Self::Compound,
        }
    }
}
