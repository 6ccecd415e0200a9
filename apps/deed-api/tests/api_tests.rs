//! Router-level tests for the deed API
//!
//! Drives the axum router directly with `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use deed_api::{app, AppState};
use deed_engine::{DeedValidator, ReferenceData, ValidationConfig};
use deed_extract::{ExtractionError, Extractor, LayoutExtractor};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::ExtractedFields;
use std::sync::Arc;
use tower::ServiceExt;

const MESSY_OCR_TEXT: &str = "*** RECORDING REQ ***
Doc: DEED-TRUST-0042
County: S. Clara | State: CA
Date Signed: 2024-01-15
Date Recorded: 2024-01-10

Grantor: T.E.S.L.A. Holdings LLC
Grantee: John & Sarah Connor

Amount: $1,250,000.00 (One Million Two Hundred Thousand Dollars)
APN: 992-001-XA
Status: PRELIMINARY
*** END ***";

/// Extractor standing in for an unreachable extraction service
struct OfflineExtractor;

#[async_trait]
impl Extractor for OfflineExtractor {
    async fn extract(&self, _raw_text: &str) -> Result<ExtractedFields, ExtractionError> {
        Err(ExtractionError::Service {
            status: 529,
            body: "overloaded".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

fn router_with(extractor: Arc<dyn Extractor>) -> Router {
    let reference = Arc::new(ReferenceData::bundled().unwrap());
    let validator = DeedValidator::new(ValidationConfig::new(reference));
    app(Arc::new(AppState::new(validator, extractor)))
}

fn router() -> Router {
    router_with(Arc::new(LayoutExtractor::new()))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_service_name() {
    let (status, body) = send(router(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "service": "deed-validator"}));
}

#[tokio::test]
async fn counties_lists_reference_table() {
    let (status, body) = send(router(), get("/counties")).await;
    assert_eq!(status, StatusCode::OK);

    let counties = body["counties"].as_array().unwrap();
    assert_eq!(counties.len(), 18);
    assert!(counties.contains(&json!({"name": "Santa Clara", "tax_rate": 0.012})));
}

#[tokio::test]
async fn ocr_text_is_extracted_and_validated() {
    let (status, body) = send(
        router(),
        post_json("/validate", json!({"ocr_text": MESSY_OCR_TEXT})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    assert_eq!(body["violations"][0]["kind"], json!("date_logic"));
    assert_eq!(body["violations"][1]["kind"], json!("amount_mismatch"));
    assert_eq!(body["violations"][1]["evidence"]["discrepancy"], json!("50000.00"));
    assert_eq!(body["data"]["county_normalized"], json!("Santa Clara"));
    assert_eq!(body["data"]["tax_rate"], json!(0.012));
}

#[tokio::test]
async fn extracted_fields_are_validated_directly() {
    let fields = json!({
        "doc_number": "DEED-VALID-001",
        "county": "San Mateo",
        "date_signed": "2024-01-10",
        "date_recorded": "2024-01-15",
        "amount_numeric": "$500,000.00",
        "amount_written": "Five Hundred Thousand Dollars"
    });
    let (status, body) = send(router(), post_json("/validate", json!({"fields": fields}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["errors"], json!([]));
    assert_eq!(body["data"]["closing_costs"], json!("5500.00"));
}

#[tokio::test]
async fn missing_ocr_text_is_bad_request() {
    let (status, body) = send(router(), post_json("/validate", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("Missing required field 'ocr_text' in request body")
    );
    assert_eq!(body["status"], json!(400));
}

#[tokio::test]
async fn both_inputs_at_once_is_bad_request() {
    let (status, _) = send(
        router(),
        post_json(
            "/validate",
            json!({"ocr_text": MESSY_OCR_TEXT, "fields": {"county": "S. Clara"}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/validate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!(400));
}

#[tokio::test]
async fn missing_required_field_is_unprocessable() {
    let fields = json!({
        "doc_number": "DEED-1",
        "county": "San Mateo",
        "date_signed": "2024-01-10"
    });
    let (status, body) = send(router(), post_json("/validate", json!({"fields": fields}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("required field 'date_recorded' is missing"));
}

#[tokio::test]
async fn extraction_failure_is_bad_gateway() {
    let (status, body) = send(
        router_with(Arc::new(OfflineExtractor)),
        post_json("/validate", json!({"ocr_text": MESSY_OCR_TEXT})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], json!(502));
}

#[tokio::test]
async fn unlabelled_text_is_bad_gateway() {
    let (status, _) = send(
        router(),
        post_json("/validate", json!({"ocr_text": "smudged beyond reading"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
