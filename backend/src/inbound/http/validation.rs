//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Category, Error, OpportunityId, VerificationToken, notices};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidCategory,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidCategory => "invalid_category",
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

pub(crate) const OPPORTUNITY_ID: FieldName = FieldName::new("id");
pub(crate) const CATEGORY: FieldName = FieldName::new("category");
pub(crate) const TOKEN: FieldName = FieldName::new("token");

fn field_error(message: impl Into<String>, field: FieldName, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        format!("missing required field: {name}"),
        field,
        ErrorCode::MissingField,
    )
}

/// Parse an opportunity id taken from the request path.
pub(crate) fn parse_opportunity_id(raw: &str) -> Result<OpportunityId, Error> {
    raw.parse::<OpportunityId>().map_err(|_| {
        Error::invalid_request(format!("{} must be a valid UUID", OPPORTUNITY_ID.as_str()))
            .with_details(json!({
                "field": OPPORTUNITY_ID.as_str(),
                "value": raw,
                "code": ErrorCode::InvalidUuid.as_str(),
            }))
    })
}

/// Parse a category label as submitted by the dashboard form. Failures use
/// the form's save notice so clients see one message for any bad field.
pub(crate) fn parse_category(raw: &str) -> Result<Category, Error> {
    raw.parse::<Category>().map_err(|error| {
        Error::invalid_request(notices::OPPORTUNITY_SAVE_FAILED).with_details(json!({
            "field": CATEGORY.as_str(),
            "code": ErrorCode::InvalidCategory.as_str(),
            "reason": error.to_string(),
        }))
    })
}

/// Verification tokens must be present and non-blank.
pub(crate) fn parse_token(raw: Option<String>) -> Result<VerificationToken, Error> {
    match raw {
        Some(token) if !token.trim().is_empty() => Ok(VerificationToken::from_raw(token)),
        _ => Err(missing_field_error(TOKEN)),
    }
}
