pub mod chat;
pub mod products;

pub use chat::ChatService;
pub use products::ProductService;
