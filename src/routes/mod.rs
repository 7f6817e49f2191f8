pub mod chat;
pub mod health;
pub mod products;

use axum::{routing::get, Json, Router};

use crate::state::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(health::routes())
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/search", get(products::search_products))
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/chat", axum::routing::post(chat::chat))
        .route(
            "/chat/history/:session_id",
            get(chat::get_history).delete(chat::delete_history),
        )
        .with_state(state)
}

/// Service banner with the available endpoints
async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "api": "E-commerce Shoes Chat API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /products",
            "GET /products/search",
            "GET /products/{id}",
            "POST /products",
            "PUT /products/{id}",
            "DELETE /products/{id}",
            "POST /chat",
            "GET /chat/history/{session_id}",
            "DELETE /chat/history/{session_id}",
            "GET /health",
        ],
    }))
}
