//! ============================================================================
//! Gemini Executor - Chat turns via the generateContent API
//! ============================================================================
//! Sends the studio persona as the system instruction, the conversation as
//! `contents` and both assistant tools as function declarations. The first
//! function call in the answer wins over any text.
//! ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::assistant::{tools, ChatModel, ModelReply, Role, ToolCall, Turn};
use crate::error::AssistantError;

/// API base for generateContent
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Persona and house knowledge for the studio assistant
pub const SYSTEM_INSTRUCTION: &str = "You are the creative soul and virtual studio manager of \
UNDERLA.STUDIO, a creative hub under the Technical Artists Group (TAG).

You are not a standard support bot. You are a fellow artist, a producer and a gear-head. You speak \
with passion and encouragement, using terms like \"sonic texture\", \"warmth\", \"punch\" and \"air\". \
You support every artist's journey, from a first demo to a tenth album.

Gear you know well: Neumann U87 Ai, Shure SM7B, Sony C800G and Coles 4038 ribbon microphones; \
Neve 1073 preamps, Tube-Tech CL1B and API 3124; Prophet-6 and Juno-106 synths. When asked about \
gear, explain why it matters musically.

Recommend packages based on needs (Full Band tracking, Production Blocks for writing, Podcast \
packages for spoken word). Use getStudioPackages to look up current packages and prices rather \
than guessing. When someone wants to book, collect the package name, date (YYYY-MM-DD), time \
(24-hour HH:MM), full name and email, then call createStudioBooking. Invite people to the \
Weekly DJ Showcase (Mondays at 8 PM).";

/// Gemini-backed [`ChatModel`]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(&self, turns: &[Turn]) -> Result<ModelReply, AssistantError> {
        let request = build_request(turns);
        debug!("Calling {} with {} turns", self.model, request.contents.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api { status, body });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Malformed(e.to_string()))?;

        let reply = parse_reply(body)?;
        if let ModelReply::ToolCall(call) = &reply {
            info!("Model requested tool {}", call.name);
        }
        Ok(reply)
    }
}

fn build_request(turns: &[Turn]) -> GenerateRequest {
    let contents = turns
        .iter()
        .map(|turn| match turn {
            Turn::Message(message) => Content {
                role: Some(role_name(message.role).to_string()),
                parts: vec![Part::text(&message.text)],
            },
            Turn::ToolCall(call) => Content {
                role: Some("model".to_string()),
                parts: vec![Part {
                    function_call: Some(FunctionCall {
                        name: call.name.clone(),
                        args: call.args.clone(),
                    }),
                    ..Part::default()
                }],
            },
            Turn::ToolResult { name, response } => Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    function_response: Some(FunctionResponse {
                        name: name.clone(),
                        response: response.clone(),
                    }),
                    ..Part::default()
                }],
            },
        })
        .collect();

    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part::text(SYSTEM_INSTRUCTION)],
        },
        contents,
        tools: vec![ToolSet {
            function_declarations: tools::function_declarations(),
        }],
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn parse_reply(body: GenerateResponse) -> Result<ModelReply, AssistantError> {
    let parts = body
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .ok_or_else(|| AssistantError::Malformed("no candidates in response".into()))?;

    if let Some(call) = parts.iter().find_map(|p| p.function_call.as_ref()) {
        return Ok(ModelReply::ToolCall(ToolCall {
            name: call.name.clone(),
            args: call.args.clone(),
        }));
    }

    let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
    if text.trim().is_empty() {
        return Err(AssistantError::Malformed("empty response".into()));
    }
    Ok(ModelReply::Text(text))
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    tools: Vec<ToolSet>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolSet {
    function_declarations: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
