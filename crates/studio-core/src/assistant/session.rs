//! ============================================================================
//! Chat Session - Tool-calling conversation state machine
//! ============================================================================
//! Per user message:
//!   Idle → AwaitingModel → (ToolRequested → ExecutingTool → AwaitingModel)*
//!        → Responding → Idle
//! Only ExecutingTool touches the outside world (booking log, notifier).
//! Tool rounds are capped per message; transport and protocol failures end
//! the round with a single generic reply.
//! ============================================================================

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::tools::{self, ToolRequest};
use super::types::{ChatMessage, ChatModel, ModelReply, Role, ToolCall, Turn};
use super::types::{ERROR_REPLY, GREETING, STORE_FAILURE_REPLY};
use crate::catalog::Catalog;
use crate::db::{BookingRecord, SubmissionRecord};
use crate::error::AssistantError;
use crate::executor::{long_date, notify_quietly, BookingConfirmation, Notifier};
use crate::submissions::{Collection, SubmissionLog};

/// Tool calls allowed while answering one user message
pub const MAX_TOOL_ROUNDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChatPhase {
    Idle,
    AwaitingModel,
    ToolRequested,
    ExecutingTool,
    Responding,
}

/// Messages added to the transcript for one user message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    pub messages: Vec<ChatMessage>,
    /// Booking stored while answering, if any
    pub booking: Option<BookingRecord>,
}

impl ChatReply {
    /// Replies joined for display
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// "Booking Confirmed!" card shown under the model's answer
pub fn confirmation_card(package_name: &str, date: &str, time: &str) -> String {
    format!(
        "Booking Confirmed!\n--------------------\nPackage: {}\nDate: {}\nTime: {}",
        package_name,
        long_date(date),
        time
    )
}

pub struct ChatSession {
    catalog: Arc<Catalog>,
    log: Arc<SubmissionLog>,
    model: Arc<dyn ChatModel>,
    notifier: Arc<dyn Notifier>,
    transcript: Vec<ChatMessage>,
    phase: ChatPhase,
    trace: Vec<ChatPhase>,
}

/// How a round ended before the model produced final text
enum Interrupted {
    Failed(AssistantError),
    NotSaved(String),
}

impl ChatSession {
    pub fn new(
        catalog: Arc<Catalog>,
        log: Arc<SubmissionLog>,
        model: Arc<dyn ChatModel>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            log,
            model,
            notifier,
            transcript: vec![ChatMessage::model(GREETING)],
            phase: ChatPhase::Idle,
            trace: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    /// Phases visited while answering the last message
    pub fn last_trace(&self) -> &[ChatPhase] {
        &self.trace
    }

    /// Answer one user message. Blank input is ignored.
    pub async fn send(&mut self, text: &str) -> ChatReply {
        if text.trim().is_empty() {
            return ChatReply::default();
        }

        self.trace.clear();
        self.transcript.push(ChatMessage::user(text));
        self.enter(ChatPhase::AwaitingModel);

        let mut turns = self.model_turns();
        let mut booking: Option<(BookingRecord, String)> = None;
        let outcome = self.run_rounds(&mut turns, &mut booking).await;

        self.enter(ChatPhase::Responding);
        let mut reply = ChatReply::default();
        match outcome {
            Ok(answer) if !answer.trim().is_empty() => reply.messages.push(ChatMessage::model(answer)),
            Ok(_) => {}
            Err(Interrupted::Failed(e)) => {
                warn!("Assistant round failed: {}", e);
                reply.messages.push(ChatMessage::model(ERROR_REPLY));
            }
            Err(Interrupted::NotSaved(e)) => {
                warn!("Chat booking not saved: {}", e);
                reply.messages.push(ChatMessage::model(STORE_FAILURE_REPLY));
            }
        }
        if let Some((record, package_name)) = booking {
            reply
                .messages
                .push(ChatMessage::model(confirmation_card(&package_name, &record.date, &record.time)));
            reply.booking = Some(record);
        }

        self.transcript.extend(reply.messages.iter().cloned());
        self.enter(ChatPhase::Idle);
        reply
    }

    async fn run_rounds(
        &mut self,
        turns: &mut Vec<Turn>,
        booking: &mut Option<(BookingRecord, String)>,
    ) -> Result<String, Interrupted> {
        let mut rounds = 0;
        loop {
            let call = match self.model.generate(turns).await.map_err(Interrupted::Failed)? {
                ModelReply::Text(answer) => return Ok(answer),
                ModelReply::ToolCall(call) => call,
            };

            self.enter(ChatPhase::ToolRequested);
            if rounds == MAX_TOOL_ROUNDS {
                return Err(Interrupted::Failed(AssistantError::TooManyToolRounds));
            }
            rounds += 1;
            let request = ToolRequest::parse(&call).map_err(Interrupted::Failed)?;

            self.enter(ChatPhase::ExecutingTool);
            let response = self.execute(request, booking).await?;
            turns.push(Turn::ToolCall(call.clone()));
            turns.push(Turn::ToolResult {
                name: call.name,
                response,
            });

            self.enter(ChatPhase::AwaitingModel);
        }
    }

    async fn execute(
        &self,
        request: ToolRequest,
        booking: &mut Option<(BookingRecord, String)>,
    ) -> Result<serde_json::Value, Interrupted> {
        match request {
            ToolRequest::GetPackages(args) => Ok(tools::get_studio_packages(&self.catalog, &args)),
            ToolRequest::CreateBooking(args) => {
                let draft = match tools::create_studio_booking(&self.catalog, &args, Utc::now()) {
                    Ok(draft) => draft,
                    Err(message) => return Ok(tools::booking_response(&Err(message))),
                };

                let stored = match self
                    .log
                    .append(Collection::Bookings, SubmissionRecord::Booking(draft.record))
                {
                    Ok(SubmissionRecord::Booking(stored)) => stored,
                    Ok(other) => return Err(Interrupted::NotSaved(format!("unexpected {}", other.kind()))),
                    Err(e) => return Err(Interrupted::NotSaved(e.to_string())),
                };
                info!("Chat booking {} stored for {}", stored.id, stored.email);

                let confirmation = BookingConfirmation {
                    name: stored.name.clone(),
                    email: stored.email.clone(),
                    package_title: stored.package_title.clone(),
                    date: stored.date.clone(),
                    time: stored.time.clone(),
                };
                notify_quietly(self.notifier.as_ref(), &confirmation).await;

                *booking = Some((stored, args.package_name));
                Ok(tools::booking_response(&Ok(draft.confirmation)))
            }
        }
    }

    /// Transcript as model turns, leading model messages dropped
    fn model_turns(&self) -> Vec<Turn> {
        self.transcript
            .iter()
            .skip_while(|m| m.role == Role::Model)
            .cloned()
            .map(Turn::Message)
            .collect()
    }

    fn enter(&mut self, phase: ChatPhase) {
        debug!("Chat phase {:?} → {:?}", self.phase, phase);
        self.phase = phase;
        self.trace.push(phase);
    }
}

/// Tool call for tests and scripted models
pub fn tool_call(name: &str, args: serde_json::Value) -> ModelReply {
    ModelReply::ToolCall(ToolCall {
        name: name.to_string(),
        args,
    })
}
