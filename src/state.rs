use std::sync::Arc;

use crate::config::Config;
use crate::db::DbPool;
use crate::llm::ResponseGenerator;
use crate::repositories::{SqliteChatRepository, SqliteProductRepository};
use crate::services::{ChatService, ProductService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub products: Arc<ProductService>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config, generator: Arc<dyn ResponseGenerator>) -> Self {
        let product_repository = Arc::new(SqliteProductRepository::new(pool.clone()));
        let chat_repository = Arc::new(SqliteChatRepository::new(pool.clone()));

        let products = Arc::new(ProductService::new(product_repository.clone()));
        let chat = Arc::new(ChatService::new(
            product_repository,
            chat_repository,
            generator,
            config.chat.context_window,
        ));

        Self {
            pool,
            config,
            products,
            chat,
        }
    }
}
