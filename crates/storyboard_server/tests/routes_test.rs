//! Router tests over an in-memory service with a stub driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use storyboard_core::{GenerateRequest, GenerateResponse};
use storyboard_error::{GeminiError, GeminiErrorKind, StoryboardResult};
use storyboard_interface::StoryboardDriver;
use storyboard_scenes::{FormatOptions, SceneFormatter};
use storyboard_server::{AppState, ServerConfig, router};
use tower::ServiceExt;

/// Driver that replays a fixed outcome for every generate call.
struct StubDriver {
    outcome: Result<String, String>,
    calls: AtomicUsize,
}

impl StubDriver {
    fn responding(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StoryboardDriver for StubDriver {
    async fn generate(&self, _request: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(text) => Ok(GenerateResponse { text: text.clone() }),
            Err(message) => {
                Err(GeminiError::new(GeminiErrorKind::ApiRequest(message.clone())).into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

fn scene_map(count: usize) -> String {
    let mut map = serde_json::Map::new();
    for index in 1..=count {
        map.insert(
            format!("scene_{index}"),
            Value::String(format!("Scene {index} narration.")),
        );
    }
    Value::Object(map).to_string()
}

fn app(driver: StubDriver, key_configured: bool) -> axum::Router {
    let options = FormatOptions {
        max_attempts: 1,
        ..Default::default()
    };
    let formatter = SceneFormatter::with_options(driver, options);
    let config = ServerConfig::default();
    let state = Arc::new(AppState::new(formatter, key_configured, config.port));
    router(state, &config).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn format_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/format")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = app(StubDriver::responding(&scene_map(25)), true);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_credential_state() {
    let app = app(StubDriver::responding(&scene_map(25)), false);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["port"], 3000);
    assert_eq!(body["geminiKeySet"], false);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn invalid_cors_origin_is_a_config_error() {
    let formatter = SceneFormatter::new(StubDriver::responding(&scene_map(25)));
    let config = ServerConfig {
        cors_origins: vec!["not a header\nvalue".to_string()],
        ..Default::default()
    };
    let state = Arc::new(AppState::new(formatter, true, config.port));

    let err = router(state, &config).unwrap_err();
    assert!(err.to_string().contains("Invalid CORS origin"));
}

#[tokio::test]
async fn format_returns_scene_map_verbatim() {
    let wire = scene_map(26);
    let app = app(StubDriver::responding(&wire), true);

    let response = app
        .oneshot(format_request(json!({"script": "A story about rain."})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["formattedScript"], Value::String(wire));
}

#[tokio::test]
async fn blank_script_is_rejected_before_any_provider_call() {
    let driver = StubDriver::responding(&scene_map(25));
    let calls = Arc::new(AtomicUsize::new(0));

    // Wrap so we can observe the call count after the router consumes the
    // driver.
    struct Counting {
        inner: StubDriver,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl StoryboardDriver for Counting {
        async fn generate(
            &self,
            request: &GenerateRequest,
        ) -> StoryboardResult<GenerateResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.generate(request).await
        }

        fn provider_name(&self) -> &'static str {
            self.inner.provider_name()
        }

        fn model_name(&self) -> &str {
            self.inner.model_name()
        }
    }

    let options = FormatOptions {
        max_attempts: 1,
        ..Default::default()
    };
    let formatter = SceneFormatter::with_options(
        Counting {
            inner: driver,
            calls: Arc::clone(&calls),
        },
        options,
    );
    let config = ServerConfig::default();
    let state = Arc::new(AppState::new(formatter, true, config.port));
    let app = router(state, &config).unwrap();

    let response = app
        .oneshot(format_request(json!({"script": "   \n\t  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Script cannot be empty");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_failure_maps_to_internal_error() {
    let app = app(StubDriver::failing("model overloaded"), true);

    let response = app
        .oneshot(format_request(json!({"script": "A story about rain."})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to format script");
    assert!(
        body["details"]
            .as_str()
            .is_some_and(|details| details.contains("model overloaded"))
    );
}

#[tokio::test]
async fn shortfall_after_exhaustion_still_succeeds() {
    // A single-attempt budget with an under-count response returns the
    // best-effort text rather than an error.
    let wire = scene_map(12);
    let app = app(StubDriver::responding(&wire), true);

    let response = app
        .oneshot(format_request(json!({"script": "A story about rain."})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["formattedScript"], Value::String(wire));
}
