use serde::{Deserialize, Serialize};

/// Matches the backend `Conversation` payload returned by `/chat/history/`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Conversation {
    pub conversation_id: i64,
    #[serde(default)]
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// One question/answer pair inside a conversation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    pub message_id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for `/chat/sendmessage/`.
/// `conversation_id` is sent as `null` to start a new thread.
#[derive(Clone, Debug, Serialize)]
pub struct SendMessageRequest {
    pub message: String,
    pub conversation_id: Option<i64>,
}

/// Response from `/chat/sendmessage/`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SendMessageResponse {
    pub conversation_id: i64,
    #[serde(default)]
    pub response: Option<String>,
}

/// Request body for the Google credential exchange.
#[derive(Clone, Debug, Serialize)]
pub struct GoogleAuthRequest {
    pub token: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Response from `/authentication/google/`.
/// Some deployments return a flat `token`, others a `tokens` pair.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub tokens: Option<TokenPair>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

impl AuthResponse {
    /// The bearer token to persist: `token`, falling back to `tokens.access`.
    pub fn app_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or_else(|| self.tokens.as_ref().map(|t| t.access.as_str()))
            .filter(|t| !t.is_empty())
    }
}
