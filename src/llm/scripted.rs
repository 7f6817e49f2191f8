use async_trait::async_trait;

use crate::llm::ResponseGenerator;
use crate::models::{ChatContext, Product};

/// Offline reply generator. Used when no Gemini API key is configured
/// and as a deterministic stand-in for tests.
pub struct ScriptedGenerator {
    reply: Option<String>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self { reply: None }
    }

    /// Always answers with the given text, regardless of input
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    fn generate_reply(products: &[Product]) -> String {
        if products.is_empty() {
            return "Por ahora no tengo productos en el catálogo. Vuelve a intentarlo más tarde."
                .to_string();
        }
        let first = &products[0];
        format!(
            "Tenemos {} modelos disponibles. Te puedo recomendar {} de {} por ${}. ¿Qué estilo buscas?",
            products.len(),
            first.name,
            first.brand,
            first.price
        )
    }
}

impl Default for ScriptedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _user_message: &str,
        products: &[Product],
        _context: &ChatContext,
    ) -> String {
        match &self.reply {
            Some(reply) => reply.clone(),
            None => Self::generate_reply(products),
        }
    }
}
