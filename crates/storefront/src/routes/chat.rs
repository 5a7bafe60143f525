//! Chat completion stub.
//!
//! Answers `POST /chat/completions` with a fixed assistant message in the
//! usual chat-completion response shape. The request body is accepted but
//! ignored; nothing here touches the store.

use axum::Json;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

/// Model name reported by the stub.
pub const STUB_MODEL: &str = "pixel-store-stub";

/// Assistant reply returned for every request.
pub const CANNED_REPLY: &str = "Hi! I'm the Pixel Store assistant. \
    Ask me about phones, watches or headphones, or use the shopping cart endpoints to place an order.";

#[derive(Debug, Serialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: &'static str,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

#[derive(Debug, Serialize)]
pub struct Choice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Serialize, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Return the canned chat completion.
#[instrument(skip(_body))]
pub async fn completions(_body: Option<Json<serde_json::Value>>) -> Json<ChatCompletion> {
    Json(ChatCompletion {
        id: format!("chatcmpl-{}", Uuid::new_v4().simple()),
        object: "chat.completion",
        created: chrono::Utc::now().timestamp(),
        model: STUB_MODEL,
        choices: vec![Choice {
            index: 0,
            message: ChatMessage {
                role: "assistant",
                content: CANNED_REPLY,
            },
            finish_reason: "stop",
        }],
        usage: Usage::default(),
    })
}
