pub mod chat;
pub mod product;

pub use chat::{
    ChatContext, ChatHistoryEntry, ChatMessage, ChatRequest, ChatResponse, ChatRole,
};
pub use product::{Product, ProductFilters, ProductPayload};
