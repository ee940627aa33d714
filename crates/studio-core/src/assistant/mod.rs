//! ============================================================================
//! Assistant Module - Chat support and self-service booking
//! ============================================================================

pub mod tools;
mod session;
mod types;

pub use session::{confirmation_card, tool_call, ChatPhase, ChatReply, ChatSession, MAX_TOOL_ROUNDS};
pub use types::{
    ChatMessage, ChatModel, ModelReply, Role, ToolCall, Turn, ERROR_REPLY, GREETING,
    STORE_FAILURE_REPLY,
};
