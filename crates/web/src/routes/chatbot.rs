//! Farm assistant chat.
//!
//! Messages post back to `/chatbot` and redirect, so a reload never
//! resubmits. The transcript lives in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::chat::{self, SUGGESTIONS};
use crate::error::Result;
use crate::middleware::PageContext;
use crate::models::{ChatMessage, ChatSender, session_keys};

const CHAT_PATH: &str = "/chatbot";

// =============================================================================
// Form Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "chatbot.html")]
pub struct ChatbotTemplate {
    pub ctx: PageContext,
    pub messages: Vec<ChatMessage>,
    pub suggestions: &'static [&'static str],
}

// =============================================================================
// Transcript
// =============================================================================

async fn load_transcript(session: &Session) -> Result<Vec<ChatMessage>> {
    Ok(session
        .get::<Vec<ChatMessage>>(session_keys::CHAT_TRANSCRIPT)
        .await?
        .unwrap_or_default())
}

/// Append `message`, dropping the oldest beyond the transcript limit.
fn push_message(transcript: &mut Vec<ChatMessage>, message: ChatMessage) {
    transcript.push(message);
    let excess = transcript
        .len()
        .saturating_sub(ChatMessage::TRANSCRIPT_LIMIT);
    transcript.drain(..excess);
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the transcript.
pub async fn page(ctx: PageContext, session: Session) -> Result<impl IntoResponse> {
    Ok(ChatbotTemplate {
        ctx,
        messages: load_transcript(&session).await?,
        suggestions: &SUGGESTIONS,
    })
}

/// Record a question and its scripted answer.
#[instrument(skip_all)]
pub async fn send(session: Session, Form(form): Form<MessageForm>) -> Result<Redirect> {
    let Some(reply) = chat::respond(&form.message) else {
        return Ok(Redirect::to(CHAT_PATH));
    };

    let mut transcript = load_transcript(&session).await?;
    let now = Utc::now();

    push_message(
        &mut transcript,
        ChatMessage {
            sender: ChatSender::User,
            text: form.message.trim().to_string(),
            topic: None,
            sent_at: now,
        },
    );
    push_message(
        &mut transcript,
        ChatMessage {
            sender: ChatSender::Assistant,
            text: reply.text.to_string(),
            topic: Some(reply.topic.to_string()),
            sent_at: now,
        },
    );

    session
        .insert(session_keys::CHAT_TRANSCRIPT, &transcript)
        .await?;
    tracing::debug!(topic = reply.topic, "Assistant replied");

    Ok(Redirect::to(CHAT_PATH))
}

/// Empty the transcript.
pub async fn clear(session: Session) -> Result<Redirect> {
    session
        .remove_value(session_keys::CHAT_TRANSCRIPT)
        .await?;
    Ok(Redirect::to(CHAT_PATH))
}
