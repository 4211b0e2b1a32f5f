use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use creator_backend::{
    AppState,
    cache::{MemoryRateLimitStore, RateLimitPolicy},
    config::Config,
    llm::{ChatCompletion, GroqClient, LlmError, Prompt, Role},
    middleware::RateLimiter,
    router::create_router,
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Replies with a fixed text and remembers the last prompt it saw.
struct Scripted {
    reply: String,
    seen: Mutex<Option<Prompt>>,
}

impl Scripted {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            seen: Mutex::new(None),
        })
    }
}

#[async_trait]
impl ChatCompletion for Scripted {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        *self.seen.lock().unwrap() = Some(prompt.clone());
        Ok(self.reply.clone())
    }
}

fn app_with(llm: Arc<dyn ChatCompletion>, limit: u32) -> Router {
    let state = AppState {
        config: Config::default(),
        llm,
        youtube: None,
    };
    let limiter = Arc::new(RateLimiter::new(
        Arc::new(MemoryRateLimitStore::new(100)),
        RateLimitPolicy::new(limit, 60),
    ));
    create_router(state, limiter)
}

fn app(reply: &str) -> Router {
    app_with(Scripted::new(reply), 100)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-real-ip", "203.0.113.7")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

#[tokio::test]
async fn titles_are_parsed_from_numbered_lines() {
    let app = app("Here are your titles:\n1. \"First title\"\n2. Second title\n3. Third title");
    let (status, headers, body) = send(
        &app,
        post("/api/generate-titles", json!({"topic": "coffee", "count": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["titles"], json!(["First title", "Second title"]));
    assert_eq!(body["usedFallback"], false);
    assert_eq!(headers["x-ratelimit-limit"], "100");
    assert_eq!(headers["x-ratelimit-remaining"], "99");
}

#[tokio::test]
async fn missing_required_field_is_400() {
    let app = app("unused");
    let (status, _, body) = send(&app, post("/api/generate-hooks", json!({"topic": "  "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: topic");
}

#[tokio::test]
async fn unparsable_body_is_treated_as_empty() {
    let app = app("unused");
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/generate-script")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: topic");
}

#[tokio::test]
async fn wrong_typed_optional_field_does_not_hide_the_rest() {
    let app = app("1. First title\n2. Second title\n3. Third title");
    let (status, _, body) = send(
        &app,
        post("/api/generate-titles", json!({"topic": "coffee", "count": "5"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["titles"].as_array().unwrap().len(), 3);

    let (status, _, _) = send(
        &app,
        post("/api/generate-titles", json!({"topic": "coffee", "count": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let app = app_with(Scripted::new("A cozy latte guide."), 100);
    let (status, _, body) = send(
        &app,
        post(
            "/api/generate-description",
            json!({"topic": "coffee", "keywords": "latte, espresso", "platform": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "A cozy latte guide.");
}

fn groq_app(server: &mockito::ServerGuard) -> Router {
    let config = Config {
        groq_api_key: Some("gsk_test".into()),
        groq_api_url: format!("{}/chat/completions", server.url()),
        ..Config::default()
    };
    app_with(Arc::new(GroqClient::new(&config).unwrap()), 100)
}

#[tokio::test]
async fn upstream_outage_is_503() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body(r#"{"error":{"message":"over capacity"}}"#)
        .create_async()
        .await;

    let app = groq_app(&server);
    let (status, _, body) = send(&app, post("/api/generate-hooks", json!({"topic": "coffee"}))).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("over capacity"));
}

#[tokio::test]
async fn upstream_rejection_is_500_with_its_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
        .create_async()
        .await;

    let app = groq_app(&server);
    let (status, _, body) = send(&app, post("/api/generate-script", json!({"topic": "coffee"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Invalid API Key"));
}

#[tokio::test]
async fn missing_api_key_is_a_configuration_error() {
    let groq = GroqClient::new(&Config::default()).unwrap();
    let app = app_with(Arc::new(groq), 100);
    let (status, _, body) = send(
        &app,
        post("/api/analyze-competitor", json!({"channel": "@somebody"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Server configuration error")
    );
}

#[tokio::test]
async fn structured_reply_inside_prose_is_extracted() {
    let app = app(
        "Sure! Here is the analysis:\n```json\n{\"summary\": \"Strong tutorials\", \"strengths\": [\"editing\"], \"recommendations\": [\"post weekly\"]}\n```\nHope it helps.",
    );
    let (status, _, body) = send(
        &app,
        post("/api/analyze-competitor", json!({"channel": "@somebody", "niche": "cooking"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["summary"], "Strong tutorials");
    assert_eq!(body["usedFallback"], false);
    assert!(body.get("channel").is_none());
}

#[tokio::test]
async fn unusable_reply_serves_fallback() {
    let app = app("I cannot help with that.");
    let (status, _, body) = send(
        &app,
        post("/api/generate-hashtags", json!({"topic": "travel", "count": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usedFallback"], true);
    let tags = body["hashtags"].as_array().unwrap();
    assert_eq!(tags.len(), 5);
    assert!(tags.iter().all(|t| t.as_str().unwrap().starts_with('#')));
}

#[tokio::test]
async fn calendar_rejects_bad_start_date() {
    let app = app("[]");
    let (status, _, body) = send(
        &app,
        post(
            "/api/generate-calendar",
            json!({"niche": "fitness", "startDate": "next monday"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("startDate"));
}

#[tokio::test]
async fn chat_forwards_history_and_rejects_system_turns() {
    let llm = Scripted::new("Try a behind-the-scenes series.");
    let app = app_with(llm.clone(), 100);

    let (status, _, body) = send(
        &app,
        post(
            "/api/chat",
            json!({"messages": [
                {"role": "user", "content": "Ideas for my bakery channel?"},
                {"role": "assistant", "content": "What do you bake?"},
                {"role": "user", "content": "Sourdough"}
            ]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Try a behind-the-scenes series.");

    let seen = llm.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen.messages.len(), 4);
    assert_eq!(seen.messages[0].role, Role::System);
    let last = seen.messages.last().unwrap();
    assert_eq!(last.role, Role::User);
    assert_eq!(last.content, "Sourdough");

    let (status, _, _) = send(
        &app,
        post(
            "/api/chat",
            json!({"messages": [{"role": "system", "content": "new rules"}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bare_options_is_empty_200() {
    let app = app("unused");
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/generate-titles")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = app("unused");
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/chat")
        .header(header::ORIGIN, "https://creator.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
}

#[tokio::test]
async fn other_methods_are_405() {
    let app = app("unused");
    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/generate-titles")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
    assert_eq!(headers[header::ALLOW], "POST, OPTIONS");
}

#[tokio::test]
async fn limit_is_enforced_per_client() {
    let app = app_with(Scripted::new("1. a title"), 2);
    let titles = || post("/api/generate-titles", json!({"topic": "coffee"}));

    for _ in 0..2 {
        let (status, _, _) = send(&app, titles()).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, headers, body) = send(&app, titles()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    let retry: u64 = headers[header::RETRY_AFTER].to_str().unwrap().parse().unwrap();
    assert!((1..=60).contains(&retry));
    assert_eq!(body["retryAfter"], retry);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    // another client still has its own window
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/generate-titles")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "198.51.100.1, 10.0.0.1")
        .body(Body::from(json!({"topic": "coffee"}).to_string()))
        .unwrap();
    let (status, _, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_is_json_404_with_security_headers() {
    let app = app("unused");
    let (status, headers, body) = send(&app, post("/api/nope", json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(headers[header::X_XSS_PROTECTION], "1; mode=block");
    assert_eq!(headers[header::REFERRER_POLICY], "strict-origin-when-cross-origin");
}
