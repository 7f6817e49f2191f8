use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, Result};

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    /// Label used when rendering the conversation into a prompt
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatRole::User => "Usuario",
            ChatRole::Assistant => "Asistente",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            _ => Err(AppError::Validation(
                "El rol debe ser 'user' o 'assistant'".to_string(),
            )),
        }
    }
}

/// One turn in a conversation. Immutable once created; the id is
/// assigned by the store on first save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Option<i64>,
    pub session_id: String,
    pub role: ChatRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Builds a new message stamped with the current time.
    /// Fails if the session id or the message text is blank.
    pub fn new(
        session_id: impl Into<String>,
        role: ChatRole,
        message: impl Into<String>,
    ) -> Result<Self> {
        let session_id = session_id.into();
        let message = message.into();
        if session_id.trim().is_empty() {
            return Err(AppError::Validation(
                "El session_id no puede estar vacío".to_string(),
            ));
        }
        if message.trim().is_empty() {
            return Err(AppError::Validation(
                "El mensaje no puede estar vacío".to_string(),
            ));
        }
        Ok(Self {
            id: None,
            session_id,
            role,
            message,
            timestamp: Utc::now(),
        })
    }

    pub fn is_from_user(&self) -> bool {
        self.role == ChatRole::User
    }

    pub fn is_from_assistant(&self) -> bool {
        self.role == ChatRole::Assistant
    }
}

/// Bounded view over a session's recent messages, assembled fresh for
/// each chat request and never persisted.
#[derive(Debug, Clone)]
pub struct ChatContext {
    messages: Vec<ChatMessage>,
    max_messages: usize,
}

impl ChatContext {
    pub const DEFAULT_WINDOW: usize = 6;

    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self::with_window(messages, Self::DEFAULT_WINDOW)
    }

    pub fn with_window(messages: Vec<ChatMessage>, max_messages: usize) -> Self {
        Self {
            messages,
            max_messages,
        }
    }

    /// The last `max_messages` messages, oldest of the retained subset first
    pub fn recent_messages(&self) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(self.max_messages);
        &self.messages[start..]
    }

    /// Renders the recent window as role-labeled lines for the prompt:
    ///
    /// ```text
    /// Usuario: hola
    /// Asistente: ¿en qué puedo ayudarte?
    /// ```
    ///
    /// An empty context yields an empty string.
    pub fn format_for_prompt(&self) -> String {
        self.recent_messages()
            .iter()
            .map(|m| format!("{}: {}", m.role.display_name(), m.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Request body for the chat endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Response body for the chat endpoint. The timestamp is the one of the
/// persisted assistant message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub user_message: String,
    pub assistant_message: String,
    pub timestamp: DateTime<Utc>,
}

/// One history entry as exposed by the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    pub id: i64,
    pub role: ChatRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatHistoryEntry {
    pub fn from_message(message: &ChatMessage) -> Self {
        Self {
            id: message.id.unwrap_or_default(),
            role: message.role,
            message: message.message.clone(),
            timestamp: message.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: ChatRole, text: &str) -> ChatMessage {
        ChatMessage::new("abc", role, text).unwrap()
    }

    #[test]
    fn test_rejects_blank_session_id() {
        let result = ChatMessage::new("   ", ChatRole::User, "Hola");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_blank_message() {
        let result = ChatMessage::new("abc", ChatRole::User, "  ");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("user".parse::<ChatRole>().unwrap(), ChatRole::User);
        assert_eq!("assistant".parse::<ChatRole>().unwrap(), ChatRole::Assistant);
        assert!("system".parse::<ChatRole>().is_err());
    }

    #[test]
    fn test_recent_messages_bounded_and_ordered() {
        let messages: Vec<ChatMessage> = (0..10)
            .map(|i| message(ChatRole::User, &format!("mensaje {}", i)))
            .collect();
        let context = ChatContext::with_window(messages, 6);
        let recent = context.recent_messages();
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0].message, "mensaje 4");
        assert_eq!(recent[5].message, "mensaje 9");
    }

    #[test]
    fn test_format_for_prompt() {
        let context = ChatContext::new(vec![
            message(ChatRole::User, "Hola"),
            message(ChatRole::Assistant, "¡Hola! ¿En qué puedo ayudarte?"),
        ]);
        assert_eq!(
            context.format_for_prompt(),
            "Usuario: Hola\nAsistente: ¡Hola! ¿En qué puedo ayudarte?"
        );
    }

    #[test]
    fn test_format_for_prompt_empty() {
        let context = ChatContext::new(Vec::new());
        assert_eq!(context.format_for_prompt(), "");
    }
}
