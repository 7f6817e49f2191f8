use std::sync::Arc;

use crate::errors::{AppError, Result};
use crate::llm::ResponseGenerator;
use crate::models::{ChatContext, ChatHistoryEntry, ChatMessage, ChatRequest, ChatResponse, ChatRole};
use crate::repositories::{ChatRepository, ProductRepository};

/// Orchestrates one chat turn: catalog + recent history in, generated
/// reply out, both sides of the exchange persisted in order.
pub struct ChatService {
    products: Arc<dyn ProductRepository>,
    history: Arc<dyn ChatRepository>,
    generator: Arc<dyn ResponseGenerator>,
    context_window: usize,
}

impl ChatService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        history: Arc<dyn ChatRepository>,
        generator: Arc<dyn ResponseGenerator>,
        context_window: usize,
    ) -> Self {
        Self {
            products,
            history,
            generator,
            context_window,
        }
    }

    /// Processes a user message end to end. Any store or validation
    /// failure aborts the whole turn and surfaces as one chat-service
    /// error; the generator itself cannot fail (it falls back
    /// internally), so a generated reply is always paired with the
    /// user message in the history.
    pub async fn process_message(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.run(request)
            .await
            .map_err(|e| AppError::Chat(format!("Error al procesar el mensaje: {}", e)))
    }

    async fn run(&self, request: ChatRequest) -> Result<ChatResponse> {
        let products = self.products.all().await?;

        let recent = self
            .history
            .recent_messages(&request.session_id, self.context_window as i64)
            .await?;
        let context = ChatContext::with_window(recent, self.context_window);

        let reply = self
            .generator
            .generate(&request.message, &products, &context)
            .await;

        let user_message =
            ChatMessage::new(&request.session_id, ChatRole::User, &request.message)?;
        let user_message = self.history.save_message(user_message).await?;

        let assistant_message =
            ChatMessage::new(&request.session_id, ChatRole::Assistant, &reply)?;
        let assistant_message = self.history.save_message(assistant_message).await?;

        Ok(ChatResponse {
            session_id: request.session_id,
            user_message: user_message.message,
            assistant_message: assistant_message.message,
            timestamp: assistant_message.timestamp,
        })
    }

    /// A session's history in chronological order, capped to the most
    /// recent `limit` entries when given
    pub async fn session_history(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatHistoryEntry>> {
        let messages = self.history.session_history(session_id, limit).await?;
        Ok(messages.iter().map(ChatHistoryEntry::from_message).collect())
    }

    /// Deletes a session's history and returns how many messages were
    /// removed
    pub async fn clear_session(&self, session_id: &str) -> Result<u64> {
        self.history.delete_session(session_id).await
    }
}
