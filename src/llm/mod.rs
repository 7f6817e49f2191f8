pub mod gemini;
pub mod scripted;

pub use gemini::{GeminiClient, GeminiGenerator};
pub use scripted::ScriptedGenerator;

use async_trait::async_trait;

use crate::models::{ChatContext, Product};

/// Reply returned when the upstream model cannot be reached. The
/// conversation still gets its assistant turn persisted.
pub const FALLBACK_REPLY: &str =
    "Lo siento, hubo un problema al contactar con el asistente de IA. Intenta nuevamente más tarde.";

/// External reply generation. Implementations absorb their own
/// transport failures and fall back to [`FALLBACK_REPLY`] instead of
/// returning an error, so the orchestrator always receives a reply to
/// persist.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(
        &self,
        user_message: &str,
        products: &[Product],
        context: &ChatContext,
    ) -> String;
}

/// Renders the catalog for the prompt, one line per product
pub fn format_products_info(products: &[Product]) -> String {
    if products.is_empty() {
        return "No hay productos disponibles.".to_string();
    }
    products
        .iter()
        .map(|p| format!("- {} | {} | ${} | Stock: {}", p.name, p.brand, p.price, p.stock))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full instruction prompt: fixed sales-assistant persona,
/// the rendered catalog, the conversation so far and the new message.
pub fn build_prompt(user_message: &str, products: &[Product], context: &ChatContext) -> String {
    let mut prompt = String::new();
    prompt.push_str("Eres un asistente virtual experto en ventas de zapatos para un e-commerce.\n");
    prompt.push_str("Tu objetivo es ayudar a los clientes a encontrar los zapatos perfectos.\n\n");
    prompt.push_str("PRODUCTOS DISPONIBLES:\n");
    prompt.push_str(&format_products_info(products));
    prompt.push_str("\n\nINSTRUCCIONES:\n");
    prompt.push_str("- Sé amigable y profesional\n");
    prompt.push_str("- Usa el contexto de la conversación anterior\n");
    prompt.push_str("- Recomienda productos específicos cuando sea apropiado\n");
    prompt.push_str("- Menciona precios, tallas y disponibilidad\n");
    prompt.push_str("- Si no tienes información, sé honesto\n\n");
    let history = context.format_for_prompt();
    if !history.is_empty() {
        prompt.push_str(&history);
        prompt.push('\n');
    }
    prompt.push_str("Usuario: ");
    prompt.push_str(user_message);
    prompt.push_str("\n\nAsistente:");
    prompt
}
