//! Turns a pipeline outcome into an HTTP response and logs the exchange.
//!
//! Successful allocations are sent as JSON, rejections as the plain-text
//! error message. Logging is a side channel: it never changes what is sent.

use crate::server::{error::Result, telemetry::record_response};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use barcode_range::BarcodeRangeResponse;
use core::fmt;
use serde_json::Value;

/// Builds the response for `outcome` and logs it next to the request body.
pub fn respond(request: &Value, outcome: Result<BarcodeRangeResponse>) -> Response {
    match outcome {
        Ok(body) => {
            log_exchange(StatusCode::OK, request, &pretty(&body));
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            let status = err.status();
            let message = err.to_string();
            log_exchange(status, request, &pretty(&message));
            (status, message).into_response()
        }
    }
}

/// Logs and forwards a rejection produced before the pipeline could run,
/// such as an oversized body or an undecodable path segment.
pub fn respond_rejection<E>(request: &Value, rejection: E) -> Response
where
    E: IntoResponse + fmt::Display,
{
    let message = rejection.to_string();
    let response = rejection.into_response();
    log_exchange(response.status(), request, &pretty(&message));
    response
}

fn log_exchange(status: StatusCode, request: &Value, response: &str) {
    record_response(status.as_u16());
    tracing::info!(
        status = status.as_u16(),
        request = %pretty(request),
        response,
        "request handled"
    );
}

fn pretty<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::error::{Error, Field};
    use axum::{body::to_bytes, http::header::CONTENT_TYPE};
    use barcode_range::{BarcodeRange, BarcodeRangeEntry};
    use serde_json::json;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn errors_are_plain_text_with_their_status() {
        let response = respond(
            &json!({"accessCode": "X123"}),
            Err(Error::invalid_field(Field::AccessCode, "X123")),
        );

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            response.headers()[CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        assert_eq!(
            body_text(response).await,
            "Invalid accessCode \"X123\". Must be a string starting with 'M'."
        );
    }

    #[tokio::test]
    async fn misconfiguration_is_500() {
        let response = respond(&json!({}), Err(Error::ServerMisconfigured));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Server configuration error.");
    }

    #[tokio::test]
    async fn success_is_json() {
        let body = BarcodeRangeResponse::single(
            "550e8400-e29b-41d4-a716-446655440000",
            BarcodeRangeEntry {
                prefix: "AB".into(),
                ranges: BarcodeRange {
                    start: "00000101".into(),
                    end: "00000300".into(),
                },
            },
        );
        let response = respond(&json!({}), Ok(body));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["barcodeRanges"][0]["prefix"], "AB");
        assert_eq!(json["barcodeRanges"][0]["ranges"]["end"], "00000300");
    }
}
