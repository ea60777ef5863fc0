//! HTTP entry point for barcode range allocation.
//!
//! [`BarcodeService`] holds the only state shared between requests: the
//! read-only credential store and the range generator. Each request runs the
//! pipeline to completion independently.
//!
//! ## Pipeline
//!
//! `parse body -> authenticate -> body presence -> account number ->
//! requestId -> accessCode -> product -> serviceOccurrence -> signatureFlag
//! -> postingLocation -> generate`, stopping at the first failure.

use crate::server::{
    credentials::CredentialStore,
    error::Result,
    service::{
        auth::authenticate,
        pipeline::{self, BarcodeRequest},
        responder::{respond, respond_rejection},
    },
    telemetry::{increment_ranges_generated, increment_requests},
};
use axum::{
    Router,
    extract::{
        DefaultBodyLimit, Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    http::HeaderMap,
    response::Response,
    routing::post,
};
use barcode_range::{BarcodeRangeResponse, RandSource, RangeGenerator};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Route of the allocation endpoint.
pub const RANGES_ROUTE: &str = "/barcodes/v1/ranges/{account_number}";

/// Allocation service shared by all request tasks.
pub struct BarcodeService<R> {
    credentials: Arc<CredentialStore>,
    generator: Arc<RangeGenerator<R>>,
}

// Manual impl: cloning only bumps the `Arc`s, so `R` need not be `Clone`.
impl<R> Clone for BarcodeService<R> {
    fn clone(&self) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: RandSource> BarcodeService<R> {
    pub fn new(credentials: CredentialStore, generator: RangeGenerator<R>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            generator: Arc::new(generator),
        }
    }

    /// Runs every stage after body parsing against an already-parsed body.
    pub fn process(
        &self,
        headers: &HeaderMap,
        account_number: &str,
        body: &Value,
    ) -> Result<BarcodeRangeResponse> {
        authenticate(&self.credentials, headers)?;
        pipeline::body_present(body)?;
        pipeline::account_number(account_number)?;
        let request = BarcodeRequest::from_value(body)?;
        tracing::debug!(
            request_id = %request.request_id,
            access_code = %request.access_code,
            product = %request.product,
            service_occurrence = %request.service_occurrence,
            signature_flag = request.signature_flag,
            posting_location = %request.posting_location,
            "request validated"
        );

        let entry = self.generator.barcode_range();
        increment_ranges_generated();

        Ok(BarcodeRangeResponse::single(request.request_id, entry))
    }
}

/// Builds the application router.
pub fn router<R>(service: BarcodeService<R>, max_body_bytes: usize) -> Router
where
    R: RandSource + Send + Sync + 'static,
{
    Router::new()
        .route(RANGES_ROUTE, post(allocate::<R>))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

#[tracing::instrument(
    name = "barcodes.allocate",
    skip_all,
    fields(account_number = tracing::field::Empty)
)]
async fn allocate<R>(
    State(service): State<BarcodeService<R>>,
    account_number: core::result::Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: core::result::Result<Bytes, BytesRejection>,
) -> Response
where
    R: RandSource + Send + Sync + 'static,
{
    increment_requests();

    let account_number = match account_number {
        Ok(Path(account_number)) => account_number,
        Err(rejection) => return respond_rejection(&Value::Null, rejection),
    };
    tracing::Span::current().record("account_number", account_number.as_str());

    let body = match body {
        Ok(body) => body,
        Err(rejection) => return respond_rejection(&Value::Null, rejection),
    };

    match pipeline::parse_body(&headers, &body) {
        Ok(request) => {
            let outcome = service.process(&headers, &account_number, &request);
            respond(&request, outcome)
        }
        Err(err) => {
            let raw = Value::String(String::from_utf8_lossy(&body).into_owned());
            respond(&raw, Err(err))
        }
    }
}
