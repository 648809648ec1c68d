use std::io;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bp_calc_api::api::routes::{create_app, AppState};
use bp_calc_api::api::handlers::SharedReadingService;
use bp_calc_data::database::create_in_memory_sqlite_pool;
use bp_calc_data::repository::{InMemoryReadingRepository, ReadingRepositoryTrait, SqliteReadingRepository};
use bp_calc_domain::services::create_reading_service;
use bp_calc_domain::testing::StubReadingRepository;

/// Collects formatted log output in memory
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

// Ensure tracing is initialized only once
static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn app_with<R>(repository: R) -> Router
where
    R: ReadingRepositoryTrait + 'static,
{
    initialize();
    let service: SharedReadingService = Arc::new(create_reading_service(repository));
    create_app(AppState::new(service, "test"), Duration::from_secs(5))
}

fn memory_app() -> Router {
    app_with(InMemoryReadingRepository::new())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn reading_body(systolic: Value, diastolic: Value) -> Value {
    json!({
        "name": "A",
        "email": "a@x.com",
        "systolic": systolic,
        "diastolic": diastolic
    })
}

#[tokio::test]
async fn test_submit_then_list_and_fetch() {
    let app = memory_app();

    let (status, body) = send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!(130), json!(89)))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(as_json(&body), json!({"status": "202", "message": "Pre High"}));

    let (status, body) = send(&app, Method::GET, "/api/bpcalc/", None).await;
    assert_eq!(status, StatusCode::OK);
    let readings = as_json(&body);
    let readings = readings.as_array().unwrap();
    assert_eq!(readings.len(), 1);
    let stored = &readings[0];
    assert_eq!(stored["name"], "A");
    assert_eq!(stored["email"], "a@x.com");
    assert_eq!(stored["systolic"], 130);
    assert_eq!(stored["diastolic"], 89);
    assert_eq!(stored["category"], "Pre High");
    assert!(stored["readingtime"].is_string());

    let id = stored["id"].as_str().unwrap();
    let (status, body) = send(&app, Method::GET, &format!("/api/bpcalc/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&as_json(&body), stored);
}

#[tokio::test]
async fn test_routes_without_trailing_slash() {
    let app = memory_app();

    let (status, _) = send(&app, Method::POST, "/api/bpcalc", Some(reading_body(json!(110), json!(70)))).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = send(&app, Method::GET, "/api/bpcalc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejection_is_416_with_reason_and_not_stored() {
    let app = memory_app();

    let (status, body) = send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!(65), json!(45)))).await;
    assert_eq!(status.as_u16(), 416);
    assert_eq!(as_json(&body), json!({"status": "416", "message": "systolic out of range"}));

    let (status, body) = send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!(80), json!(95)))).await;
    assert_eq!(status.as_u16(), 416);
    assert_eq!(as_json(&body)["message"], "diastolic exceeds systolic");

    let (_, body) = send(&app, Method::GET, "/api/bpcalc/", None).await;
    assert_eq!(as_json(&body), json!([]));
}

#[tokio::test]
async fn test_numeric_strings_are_accepted() {
    let app = memory_app();

    let (status, body) = send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!("85"), json!(" 55 ")))).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(as_json(&body)["message"], "Low");
}

#[tokio::test]
async fn test_malformed_requests_are_400() {
    let app = memory_app();

    let cases = vec![
        reading_body(json!(120.5), json!(80)),
        reading_body(json!("high"), json!(80)),
        reading_body(json!(3_000_000_000i64), json!(80)),
        json!({"name": "A", "email": "a@x.com", "systolic": 120}),
        json!({"name": "", "email": "a@x.com", "systolic": 120, "diastolic": 80}),
    ];

    for case in cases {
        let (status, body) = send(&app, Method::POST, "/api/bpcalc/", Some(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {} should be refused", case);
        assert_eq!(as_json(&body)["status"], "400");
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bpcalc/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/bpcalc/", None).await;
    assert_eq!(as_json(&body), json!([]));
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let app = memory_app();

    let (status, body) = send(&app, Method::GET, "/api/bpcalc/not-a-real-id", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body), json!({"status": "404", "message": "reading not found"}));
}

#[tokio::test]
async fn test_delete_is_204_and_idempotent() {
    let app = memory_app();
    send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!(120), json!(80)))).await;
    let (_, body) = send(&app, Method::GET, "/api/bpcalc/", None).await;
    let id = as_json(&body)[0]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/bpcalc/{}", id);
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_failure_is_plain_500() {
    let app = app_with(StubReadingRepository::new().with_write_failure());

    let (status, body) = send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!(120), json!(80)))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(String::from_utf8(body).unwrap(), "Internal Server Error");
}

#[tokio::test]
async fn test_rejection_wins_over_storage_failure() {
    let app = app_with(StubReadingRepository::new().with_storage_down());

    let (status, _) = send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!(200), json!(80)))).await;

    assert_eq!(status.as_u16(), 416);
}

#[tokio::test]
async fn test_health_reports_storage() {
    let (status, body) = send(&memory_app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let health = as_json(&body);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["environment"], "test");
    assert_eq!(health["components"]["storage"]["status"], "healthy");

    let down = app_with(StubReadingRepository::new().with_storage_down());
    let (status, body) = send(&down, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(as_json(&body)["components"]["storage"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_sqlite_backend_round_trip() {
    let pool = create_in_memory_sqlite_pool().unwrap();
    let app = app_with(SqliteReadingRepository::new(pool));

    let (status, body) = send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!(150), json!(95)))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(as_json(&body)["message"], "High");

    let (_, body) = send(&app, Method::GET, "/api/bpcalc/", None).await;
    let id = as_json(&body)[0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, &format!("/api/bpcalc/{}/", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["category"], "High");

    let (status, _) = send(&app, Method::GET, "/api/bpcalc/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = send(&memory_app(), Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(as_json(&body)["paths"]["/api/bpcalc/"].is_object());
}

#[tokio::test]
async fn test_storage_failure_logged_once() {
    let app = app_with(StubReadingRepository::new().with_write_failure());

    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (status, _) = send(&app, Method::POST, "/api/bpcalc/", Some(reading_body(json!(120), json!(80)))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let logs = capture.contents();
    let app_errors: Vec<&str> = logs
        .lines()
        .filter(|line| line.contains("ERROR") && line.contains("bp_calc_"))
        .collect();
    assert_eq!(app_errors.len(), 1, "expected one storage failure log line, got:\n{}", logs);
    assert!(app_errors[0].contains("write conflict") || app_errors[0].contains("Write conflict"));
}
