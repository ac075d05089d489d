//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose `details` name the
//! offending field and a stable code, e.g.
//! `{"field": "price", "code": "invalid_value"}`.

use std::fmt::Display;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::domain::{Error, Price, RecipeValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidType,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidType => "invalid_type",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: &Value) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

/// Wrap a domain validation failure for `field`.
pub(crate) fn invalid_field_error(field: FieldName, error: impl Display) -> Error {
    ValidationError::new(field, error.to_string()).with_code(ErrorCode::InvalidValue)
}

fn invalid_type_error(field: FieldName, expected: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be {expected}"))
        .with_code(ErrorCode::InvalidType)
}

/// Unwrap a required body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Validate a required string field with a domain constructor.
pub(crate) fn parse_field<T, E>(
    value: Option<String>,
    field: FieldName,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Result<T, Error>
where
    E: Display,
{
    let raw = require(value, field)?;
    parse(raw).map_err(|err| invalid_field_error(field, err))
}

/// Parse a whole number given as a JSON integer or a numeric string.
pub(crate) fn parse_integer(value: &Value, field: FieldName) -> Result<i64, Error> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| invalid_type_error(field, "a whole number")),
        Value::String(raw) => i64::from_str(raw.trim())
            .map_err(|_| invalid_type_error(field, "a whole number")),
        _ => Err(invalid_type_error(field, "a whole number")),
    }
}

/// Parse a price given as a JSON number or a decimal string.
///
/// Numbers are read through their shortest textual form, so `5.5` becomes
/// `5.50` rather than a binary float approximation.
pub(crate) fn parse_price(value: &Value, field: FieldName) -> Result<Price, Error> {
    let raw = match value {
        Value::Number(number) => number.to_string(),
        Value::String(raw) => raw.clone(),
        _ => return Err(invalid_type_error(field, "a decimal number")),
    };
    raw.parse::<Price>().map_err(|err| match err {
        RecipeValidationError::InvalidPrice => invalid_type_error(field, "a decimal number"),
        other => invalid_field_error(field, other),
    })
}

/// Parse a list of positive integer identifiers.
pub(crate) fn parse_id_list<T>(
    values: Option<Vec<Value>>,
    field: FieldName,
    wrap: impl Fn(i64) -> T,
) -> Result<Vec<T>, Error> {
    values
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, value)| match value.as_i64() {
            Some(id) if id > 0 => Ok(wrap(id)),
            _ => {
                let name = field.as_str();
                Err(
                    ValidationError::new(field, format!("{name} must contain positive integer ids"))
                        .with_index(ErrorCode::InvalidId, index, value),
                )
            }
        })
        .collect()
}
