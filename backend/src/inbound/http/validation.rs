//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every field-level rejection carries `{"field": ..., "code": ...}` details
//! so clients can highlight the offending input.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation codes raised by the HTTP layer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Attach `{field, code}` details to `error`.
pub(crate) fn with_field(error: Error, field: &str, code: &str) -> Error {
    error.with_details(json!({ "field": field, "code": code }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    with_field(
        Error::invalid_request(format!("missing required field: {field}")),
        field,
        ErrorCode::MissingField.as_str(),
    )
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;
    use serde_json::Value;

    const ID: FieldName = FieldName::new("id");

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    fn missing_field_reports_field_and_code() {
        let err = missing_field_error(ID);
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some("id"));
        assert_eq!(detail(&err, "code"), Some("missing_field"));
    }

    #[rstest]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
    #[case("3FA85F64-5717-4562-B3FC-2C963F66AFA6")]
    fn parses_uuids_leniently(#[case] raw: &str) {
        assert!(parse_uuid(raw, ID).is_ok());
    }

    #[rstest]
    fn bad_uuid_echoes_value() {
        let err = parse_uuid("nope", ID).expect_err("invalid");
        assert_eq!(detail(&err, "value"), Some("nope"));
        assert_eq!(detail(&err, "code"), Some("invalid_uuid"));
    }
}
