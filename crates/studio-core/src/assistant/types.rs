//! ============================================================================
//! Assistant Types - Messages, model turns and the model boundary
//! ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AssistantError;

/// First message of every conversation
pub const GREETING: &str =
    "Hello! I'm the support assistant for Technical Artists Group. How can I help you today?";

/// Shown for any transport or protocol failure
pub const ERROR_REPLY: &str =
    "Sorry, I encountered an error communicating with the creative assistant. Please try again.";

/// Shown when the model booked but the store rejected the record
pub const STORE_FAILURE_REPLY: &str =
    "There was an issue saving your booking details. Please contact support.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One line of the visible transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Function call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// What the model answered with
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Text(String),
    ToolCall(ToolCall),
}

/// Conversation entry sent to the model
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    Message(ChatMessage),
    ToolCall(ToolCall),
    ToolResult { name: String, response: Value },
}

/// Hosted conversational model
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, turns: &[Turn]) -> Result<ModelReply, AssistantError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::model("hi")).unwrap();
        assert_eq!(json["role"], "model");
    }

    #[test]
    fn test_tool_call_args_default() {
        let call: ToolCall = serde_json::from_str(r#"{"name":"getStudioPackages"}"#).unwrap();
        assert_eq!(call.args, Value::Null);
    }
}
