//! Body parsing and ordered field validation.
//!
//! Stages run in a fixed order and stop at the first failure:
//! body presence, account number, then the six body fields in the order
//! they are declared on [`BarcodeRequest`]. Each field rule is a standalone
//! function so it can be tested in isolation.

use crate::server::error::{Error, Field, Result};
use axum::http::{HeaderMap, header::CONTENT_TYPE};
use barcode_range::{
    display_value, is_account_number, is_empty, is_guid, is_numeric_value, utf16_len,
};
use core::fmt;
use serde_json::{Map, Number, Value};

/// A request body that passed every field rule.
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeRequest {
    pub request_id: String,
    pub access_code: String,
    pub product: String,
    pub service_occurrence: Number,
    pub signature_flag: bool,
    pub posting_location: PostingLocation,
}

/// A posting location is accepted in any shape that converts to a number.
#[derive(Debug, Clone, PartialEq)]
pub enum PostingLocation {
    Text(String),
    Number(Number),
    Other(Value),
}

impl fmt::Display for PostingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Other(v) => f.write_str(&display_value(Some(v))),
        }
    }
}

impl BarcodeRequest {
    /// Validates the body fields in order and returns the typed request.
    pub fn from_value(body: &Value) -> Result<Self> {
        Ok(Self {
            request_id: request_id(body.get("requestId"))?,
            access_code: access_code(body.get("accessCode"))?,
            product: product(body.get("product"))?,
            service_occurrence: service_occurrence(body.get("serviceOccurrence"))?,
            signature_flag: signature_flag(body.get("signatureFlag"))?,
            posting_location: posting_location(body.get("postingLocation"))?,
        })
    }
}

fn reject<T>(field: Field, value: Option<&Value>) -> Result<T> {
    Err(Error::invalid_field(field, display_value(value)))
}

/// Parses the raw body the way the JSON body parser in front of the pipeline
/// does.
///
/// Only bodies declared as `application/json` (parameters allowed) are
/// parsed; anything else, and a zero-length body, becomes `{}`. Parsed bodies must
/// be an object or array.
pub fn parse_body(headers: &HeaderMap, raw: &[u8]) -> Result<Value> {
    if !declares_json(headers) || raw.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_slice::<Value>(raw) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(value),
        Ok(_) | Err(_) => Err(Error::MalformedBody),
    }
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
}

pub fn body_present(body: &Value) -> Result<()> {
    if is_empty(Some(body)) {
        return Err(Error::EmptyBody);
    }
    Ok(())
}

pub fn account_number(value: &str) -> Result<()> {
    if !is_account_number(value) {
        return Err(Error::invalid_field(Field::AccountNumber, value));
    }
    Ok(())
}

pub fn request_id(value: Option<&Value>) -> Result<String> {
    match value {
        Some(Value::String(s)) if is_guid(s) => Ok(s.clone()),
        _ => reject(Field::RequestId, value),
    }
}

pub fn access_code(value: Option<&Value>) -> Result<String> {
    match value {
        Some(Value::String(s)) if s.starts_with('M') => Ok(s.clone()),
        _ => reject(Field::AccessCode, value),
    }
}

pub fn product(value: Option<&Value>) -> Result<String> {
    match value {
        Some(Value::String(s)) if utf16_len(s) == 3 => Ok(s.clone()),
        _ => reject(Field::Product, value),
    }
}

/// Must be a JSON number; numeric strings are rejected.
pub fn service_occurrence(value: Option<&Value>) -> Result<Number> {
    match value {
        Some(Value::Number(n)) => Ok(n.clone()),
        _ => reject(Field::ServiceOccurrence, value),
    }
}

pub fn signature_flag(value: Option<&Value>) -> Result<bool> {
    match value {
        Some(Value::Bool(b)) => Ok(*b),
        _ => reject(Field::SignatureFlag, value),
    }
}

pub fn posting_location(value: Option<&Value>) -> Result<PostingLocation> {
    match value {
        Some(v) if !is_empty(Some(v)) && is_numeric_value(v) => Ok(match v {
            Value::String(s) => PostingLocation::Text(s.clone()),
            Value::Number(n) => PostingLocation::Number(n.clone()),
            other => PostingLocation::Other(other.clone()),
        }),
        _ => reject(Field::PostingLocation, value),
    }
}
