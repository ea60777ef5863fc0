//! Error types for the allocation pipeline.
//!
//! Every variant's `Display` output is the exact text returned to the client,
//! so the HTTP layer never formats messages itself. Client input problems map
//! to `400 Bad Request`; the single configuration problem maps to
//! `500 Internal Server Error` without leaking detail.

use axum::http::StatusCode;

pub type Result<T> = core::result::Result<T, Error>;

/// A request field subject to validation, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AccountNumber,
    RequestId,
    AccessCode,
    Product,
    ServiceOccurrence,
    SignatureFlag,
    PostingLocation,
}

impl Field {
    /// Name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AccountNumber => "account number",
            Self::RequestId => "requestId",
            Self::AccessCode => "accessCode",
            Self::Product => "product",
            Self::ServiceOccurrence => "serviceOccurrence",
            Self::SignatureFlag => "signatureFlag",
            Self::PostingLocation => "postingLocation",
        }
    }

    /// Human-readable rule the field failed.
    pub const fn rule(self) -> &'static str {
        match self {
            Self::AccountNumber => "Must be exactly 10 digits (0-9).",
            Self::RequestId => "Must be a valid GUID (UUID v4 format).",
            Self::AccessCode => "Must be a string starting with 'M'.",
            Self::Product => "Must be a non-empty string of exactly 3 letters.",
            Self::ServiceOccurrence => "Must be a number.",
            Self::SignatureFlag => "Must be a boolean value (true or false).",
            Self::PostingLocation => "Must be a number (digits only).",
        }
    }
}

/// Terminal outcome of a rejected request.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The body could not be parsed as JSON.
    #[error("Malformed JSON: Please provide a valid JSON body.")]
    MalformedBody,

    /// Client id/secret headers are missing, malformed, or match no pair.
    #[error("Invalid credentials. Incorrect client id or client secret.")]
    InvalidCredentials,

    /// No credential pairs are configured.
    #[error("Server configuration error.")]
    ServerMisconfigured,

    /// `content-type` is not exactly `application/json`.
    #[error("Invalid content type. Must be 'application/json'.")]
    InvalidContentType,

    /// The parsed body is empty.
    #[error("Request body cannot be empty. Please provide all required fields.")]
    EmptyBody,

    /// A field failed its rule. `value` is the received value as rendered
    /// for the message.
    #[error("Invalid {} \"{value}\". {}", .field.name(), .field.rule())]
    InvalidField { field: Field, value: String },
}

impl Error {
    pub fn invalid_field(field: Field, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ServerMisconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_messages_embed_received_value() {
        let cases = [
            (
                Field::AccountNumber,
                "12345",
                "Invalid account number \"12345\". Must be exactly 10 digits (0-9).",
            ),
            (
                Field::RequestId,
                "not-a-guid",
                "Invalid requestId \"not-a-guid\". Must be a valid GUID (UUID v4 format).",
            ),
            (
                Field::AccessCode,
                "X123",
                "Invalid accessCode \"X123\". Must be a string starting with 'M'.",
            ),
            (
                Field::Product,
                "ABCD",
                "Invalid product \"ABCD\". Must be a non-empty string of exactly 3 letters.",
            ),
            (
                Field::ServiceOccurrence,
                "1",
                "Invalid serviceOccurrence \"1\". Must be a number.",
            ),
            (
                Field::SignatureFlag,
                "yes",
                "Invalid signatureFlag \"yes\". Must be a boolean value (true or false).",
            ),
            (
                Field::PostingLocation,
                "abc",
                "Invalid postingLocation \"abc\". Must be a number (digits only).",
            ),
        ];

        for (field, value, expected) in cases {
            assert_eq!(Error::invalid_field(field, value).to_string(), expected);
        }
    }

    #[test]
    fn only_misconfiguration_is_a_server_error() {
        assert_eq!(
            Error::ServerMisconfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        for err in [
            Error::MalformedBody,
            Error::InvalidCredentials,
            Error::InvalidContentType,
            Error::EmptyBody,
            Error::invalid_field(Field::Product, "x"),
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }
}
