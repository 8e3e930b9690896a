//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query strings and JSON bodies arrive loosely typed; these helpers turn the
//! raw values into domain identifiers and report failures as
//! `invalid_request` errors carrying `{field, value?, code}` details.

use std::str::FromStr;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, RequestId, RequestStatus, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidInteger,
    InvalidStatus,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::InvalidStatus => "invalid_status",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

/// Wire name of a request field, as the client sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_request_id(value: &str, field: FieldName) -> Result<RequestId, Error> {
    RequestId::from_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an optional numeric identifier. Blank values count as absent.
pub(crate) fn parse_optional_id<T>(value: Option<&str>, field: FieldName) -> Result<Option<T>, Error>
where
    T: FromStr,
{
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<T>().map(Some).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a positive integer"))
            .with_value(ErrorCode::InvalidInteger, raw)
    })
}

pub(crate) fn parse_status(value: &str, field: FieldName) -> Result<RequestStatus, Error> {
    RequestStatus::from_str(value).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidStatus, value)
    })
}

/// JSON extractor configuration reporting malformed bodies as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let error = Error::invalid_request(format!("invalid JSON body: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }));
        error.into()
    })
}

/// Query extractor configuration reporting malformed query strings as
/// domain errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let error = Error::invalid_request(format!("invalid query string: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }));
        error.into()
    })
}
