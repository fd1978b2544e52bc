//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes `invalid_request` with a `details` object naming the
//! offending field and a machine-readable code.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, LeadListQueryError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidNumber,
    OutOfRange,
    InvalidLength,
    InvalidFormat,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidLength => "invalid_length",
            ErrorCode::InvalidFormat => "invalid_format",
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

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const CAMPAIGN_ID: FieldName = FieldName::new("campaignId");
pub(crate) const LAST_CONTACT_DATE: FieldName = FieldName::new("lastContactDate");
pub(crate) const PAGE: FieldName = FieldName::new("page");
pub(crate) const LIMIT: FieldName = FieldName::new("limit");

fn field_error(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Required field absent or blank; `message` is the client-facing text.
pub(crate) fn missing_field_error(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, message, ErrorCode::MissingField)
}

/// Field present but outside its accepted length bounds.
pub(crate) fn invalid_length_error(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, message, ErrorCode::InvalidLength)
}

/// Field present but not in the expected shape.
pub(crate) fn invalid_format_error(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, message, ErrorCode::InvalidFormat)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_value_error(
        field,
        format!("{name} must be a valid UUID"),
        ErrorCode::InvalidUuid,
        value,
    )
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_value_error(
        field,
        format!("{name} must be an RFC 3339 timestamp"),
        ErrorCode::InvalidTimestamp,
        value,
    )
}

/// Parse an optional UUID. Empty strings count as absent.
pub(crate) fn parse_optional_uuid(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<Uuid>, Error> {
    value
        .filter(|raw| !raw.is_empty())
        .map(|raw| Uuid::parse_str(&raw).map_err(|_| invalid_uuid_error(field, &raw)))
        .transpose()
}

/// Parse an optional RFC 3339 timestamp. Empty strings count as absent.
pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| invalid_timestamp_error(field, &raw))
        })
        .transpose()
}

/// Parse a numeric query parameter, falling back to `default` when absent
/// or empty.
pub(crate) fn parse_u32_param(
    value: Option<&str>,
    field: FieldName,
    default: u32,
) -> Result<u32, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            let name = field.as_str();
            field_value_error(
                field,
                format!("{name} must be a positive integer"),
                ErrorCode::InvalidNumber,
                raw,
            )
        }),
    }
}

/// Map lead list range failures onto the offending query parameter.
pub(crate) fn lead_list_query_error(err: LeadListQueryError) -> Error {
    let code = ErrorCode::OutOfRange.as_str();
    let details = match err {
        LeadListQueryError::PageOutOfRange => json!({
            "field": PAGE.as_str(),
            "code": code,
            "min": 1,
        }),
        LeadListQueryError::LimitOutOfRange { max } => json!({
            "field": LIMIT.as_str(),
            "code": code,
            "min": 1,
            "max": max,
        }),
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainErrorCode, MAX_LIMIT};
    use rstest::rstest;

    #[rstest]
    fn missing_field_error_includes_field_details() {
        let err = missing_field_error(NAME, "Campaign name is required");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Campaign name is required");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "name");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(String::new()), None)]
    #[case(
        Some("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned()),
        Some("3fa85f64-5717-4562-b3fc-2c963f66afa6")
    )]
    fn parse_optional_uuid_accepts_absent_and_valid(
        #[case] raw: Option<String>,
        #[case] expected: Option<&str>,
    ) {
        let parsed = parse_optional_uuid(raw, CAMPAIGN_ID).expect("valid input");
        assert_eq!(parsed.map(|id| id.to_string()).as_deref(), expected);
    }

    #[rstest]
    fn parse_optional_uuid_rejects_garbage() {
        let err = parse_optional_uuid(Some("camp-1".to_owned()), CAMPAIGN_ID)
            .expect_err("invalid uuid");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "campaignId");
        assert_eq!(details["value"], "camp-1");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    fn parse_timestamp_normalises_offset_to_utc() {
        let parsed = parse_optional_rfc3339_timestamp(
            Some("2024-01-15T12:00:00+02:00".to_owned()),
            LAST_CONTACT_DATE,
        )
        .expect("valid timestamp")
        .expect("present");
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T10:00:00+00:00");
    }

    #[rstest]
    fn parse_timestamp_rejects_plain_dates() {
        let err = parse_optional_rfc3339_timestamp(Some("15/01/2024".to_owned()), LAST_CONTACT_DATE)
            .expect_err("invalid timestamp");
        assert_eq!(
            err.details().and_then(|d| d.get("code")).and_then(|c| c.as_str()),
            Some("invalid_timestamp")
        );
    }

    #[rstest]
    #[case(None, 20)]
    #[case(Some(""), 20)]
    #[case(Some("5"), 5)]
    #[case(Some(" 7 "), 7)]
    #[case(Some("0"), 0)]
    fn parse_u32_param_uses_default_when_absent(#[case] raw: Option<&str>, #[case] expected: u32) {
        assert_eq!(parse_u32_param(raw, LIMIT, 20).expect("numeric"), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("-1")]
    #[case("1.5")]
    #[case("99999999999")]
    fn parse_u32_param_rejects_non_numeric(#[case] raw: &str) {
        let err = parse_u32_param(Some(raw), PAGE, 1).expect_err("invalid number");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "page");
        assert_eq!(details["code"], "invalid_number");
    }

    #[rstest]
    #[case(LeadListQueryError::PageOutOfRange, "page")]
    #[case(LeadListQueryError::LimitOutOfRange { max: MAX_LIMIT }, "limit")]
    fn lead_list_query_errors_name_their_field(
        #[case] err: LeadListQueryError,
        #[case] field: &str,
    ) {
        let mapped = lead_list_query_error(err);
        assert_eq!(mapped.code(), DomainErrorCode::InvalidRequest);
        let details = mapped.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], "out_of_range");
    }
}
