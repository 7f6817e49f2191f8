// End-to-end tests driving the axum router directly.
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shoestore_api::config::{ChatConfig, Config, DatabaseConfig, GeminiConfig, ServerConfig};
use shoestore_api::db;
use shoestore_api::llm::ScriptedGenerator;
use shoestore_api::routes::create_router;
use shoestore_api::state::AppState;

async fn test_app() -> Router {
    let pool = db::create_pool("sqlite::memory:", 1)
        .await
        .expect("failed to create test pool");
    db::init_schema(&pool).await.expect("failed to create schema");

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        gemini: GeminiConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
        },
        chat: ChatConfig { context_window: 6 },
    };

    let state = AppState::new(pool, config, Arc::new(ScriptedGenerator::with_reply("hi there")));
    create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn product_body() -> Value {
    json!({
        "name": "Runner Pro",
        "brand": "Nike",
        "category": "Deportivo",
        "size": "42",
        "color": "Rojo",
        "price": 99.5,
        "stock": 3,
        "description": "Zapato deportivo"
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_empty_catalog() {
    let app = test_app().await;
    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_missing_product_is_404() {
    let app = test_app().await;
    let response = app.oneshot(get("/products/999999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("999999"));
}

#[tokio::test]
async fn test_product_crud() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/products", product_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/products/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Runner Pro");

    let mut update = product_body();
    update["price"] = json!(120.0);
    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/products/{}", id), update))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["price"], 120.0);

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/products/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "deleted": true }));

    let response = app
        .oneshot(request("DELETE", &format!("/products/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_product_is_400() {
    let app = test_app().await;

    let mut body = product_body();
    body["price"] = json!(-10.0);
    let response = app
        .oneshot(json_request("POST", "/products", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_search() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request("POST", "/products", product_body()))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/products/search?brand=nike&name=runner"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = app
        .oneshot(get("/products/search?brand=adidas"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_chat_round_trip() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/chat",
            json!({ "session_id": "s1", "message": "hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["session_id"], "s1");
    assert_eq!(body["user_message"], "hello");
    assert_eq!(body["assistant_message"], "hi there");
    assert!(body["timestamp"].is_string());

    let response = app
        .clone()
        .oneshot(get("/chat/history/s1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let history = body_json(response).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["role"], "user");
    assert_eq!(entries[0]["message"], "hello");
    assert_eq!(entries[1]["role"], "assistant");
    assert_eq!(entries[1]["message"], "hi there");

    let response = app
        .clone()
        .oneshot(request("DELETE", "/chat/history/s1"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!({ "deleted": 2 }));

    let response = app.oneshot(get("/chat/history/s1")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_chat_history_limit() {
    let app = test_app().await;

    for i in 0..3 {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/chat",
                json!({ "session_id": "s1", "message": format!("mensaje {}", i) }),
            ))
            .await
            .unwrap();
    }

    // 6 rows stored; the limit keeps the most recent ones, oldest first
    let response = app
        .oneshot(get("/chat/history/s1?limit=4"))
        .await
        .unwrap();
    let history = body_json(response).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["message"], "mensaje 1");
    assert_eq!(entries[1]["message"], "hi there");
    assert_eq!(entries[2]["message"], "mensaje 2");
    assert_eq!(entries[3]["message"], "hi there");
}

#[tokio::test]
async fn test_chat_rejects_blank_input() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/chat",
            json!({ "session_id": "s1", "message": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "POST",
            "/chat",
            json!({ "session_id": "", "message": "hola" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
