//! Store contracts for the catalog and the conversation history.
//!
//! The traits are defined independently of the storage technology so the
//! services can be exercised against any backend; the shipped
//! implementations are SQLite, in `products` and `chat`.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{ChatMessage, Product};

pub mod chat;
pub mod products;

pub use chat::SqliteChatRepository;
pub use products::SqliteProductRepository;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn all(&self) -> Result<Vec<Product>>;

    /// Returns `None` if no product has the given id
    async fn by_id(&self, id: i64) -> Result<Option<Product>>;

    /// Exact, case-sensitive brand match
    async fn by_brand(&self, brand: &str) -> Result<Vec<Product>>;

    /// Exact, case-sensitive category match
    async fn by_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Inserts when the product has no id yet, updates otherwise.
    /// Returns the stored product with its id assigned.
    async fn save(&self, product: Product) -> Result<Product>;

    /// Returns whether a product with the id existed
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Stores a message and returns it with its id assigned
    async fn save_message(&self, message: ChatMessage) -> Result<ChatMessage>;

    /// The `count` most recent messages of a session in chronological
    /// order (oldest of the returned subset first). `count <= 0` yields
    /// an empty list.
    async fn recent_messages(&self, session_id: &str, count: i64) -> Result<Vec<ChatMessage>>;

    /// The session's messages in chronological order, optionally capped
    /// to the most recent `limit`
    async fn session_history(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>>;

    /// Deletes every message of the session and returns how many were
    /// removed. An unknown session removes 0 and is not an error.
    async fn delete_session(&self, session_id: &str) -> Result<u64>;
}
