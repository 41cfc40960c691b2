//! Client for the crypto-chat backend
//!
//! The backend takes `{ "message": ... }`, enriches it with a market snapshot
//! on its side and answers with `{ "text": ... }` or `{ "error": ... }`.

use {
    crate::{
        error::{CoingeckoError, Result},
        logging::{log_info, log_warn},
    },
    serde::{Deserialize, Serialize},
};

pub const DEFAULT_CHAT_URL: &str = "http://localhost:3000/api/crypto-chat";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Raw response body; the backend sets exactly one of the two fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the chat surface shows for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Text(String),
    Error(String),
}

impl ChatReply {
    pub fn as_str(&self) -> &str {
        match self {
            ChatReply::Text(s) | ChatReply::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ChatReply::Error(_))
    }
}

impl From<ChatResponse> for ChatReply {
    fn from(resp: ChatResponse) -> Self {
        match (resp.text, resp.error) {
            (Some(text), _) => ChatReply::Text(text),
            (None, Some(error)) => ChatReply::Error(error),
            (None, None) => ChatReply::Error("Sorry, I couldn't generate a reply.".to_string()),
        }
    }
}

pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_CHAT_URL.to_string(),
        }
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        url::Url::parse(endpoint)
            .map_err(|e| CoingeckoError::InvalidInput(format!("bad chat endpoint: {}", e)))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one user message.
    ///
    /// Non-2xx responses still carry a JSON `{ error }` body, so the status is
    /// only consulted when the body cannot be decoded.
    pub async fn send(&self, message: &str) -> Result<ChatReply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CoingeckoError::InvalidInput("Empty message".to_string()));
        }

        log_info!("POST {} ({} chars)", self.endpoint, message.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(CoingeckoError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(CoingeckoError::Network)?;

        match serde_json::from_str::<ChatResponse>(&body) {
            Ok(parsed) => Ok(parsed.into()),
            Err(_) if !status.is_success() => {
                log_warn!("Chat backend error: status={}", status);
                Err(CoingeckoError::Upstream {
                    status: status.as_u16(),
                })
            },
            Err(e) => Err(CoingeckoError::Parse(e.to_string())),
        }
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}
