use serde::Deserialize;
use thiserror::Error;

use crate::common::{ChatMessage, SearchResults};

/// Why a send did not produce a displayed message.
#[derive(Debug, Error)]
pub enum SendError {
    /// The server answered with `success: false` and its own reason.
    #[error("{0}")]
    Rejected(String),
    /// Request never completed, or the body was not the expected JSON.
    #[error("network error")]
    Transport(#[from] reqwest::Error),
    /// A success envelope without a message payload.
    #[error("malformed server response")]
    MalformedResponse,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    // The rejection path answers with only an `error` field.
    #[serde(default)]
    success: bool,
    message: Option<ChatMessage>,
    error: Option<String>,
}

/// HTTP surface of the chat server.
#[derive(Clone)]
pub struct ChatApi {
    http: reqwest::Client,
    base_url: String,
}

impl ChatApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POST one message, form-encoded, and decode the server's echo of it.
    pub async fn send_message(
        &self,
        chat_id: &str,
        content: &str,
    ) -> Result<ChatMessage, SendError> {
        let url = format!("{}/send_message", self.base_url);
        let response: SendResponse = self
            .http
            .post(url)
            .form(&[("chat_id", chat_id), ("content", content)])
            .send()
            .await?
            .json()
            .await?;

        if !response.success {
            let reason = response
                .error
                .unwrap_or_else(|| "Failed to send message".to_string());
            return Err(SendError::Rejected(reason));
        }
        response.message.ok_or(SendError::MalformedResponse)
    }

    /// Fetch the conversation's message list. Callers only get the batch
    /// size; the payload itself is dropped.
    pub async fn fetch_messages(&self, chat_id: &str) -> Result<usize, reqwest::Error> {
        let url = format!("{}/chat/{}/messages", self.base_url, chat_id);
        let body: serde_json::Value = self.http.get(url).send().await?.json().await?;
        Ok(body.as_array().map_or(0, |list| list.len()))
    }

    /// Mark every message in the conversation as read.
    pub async fn mark_read(&self, chat_id: &str) -> Result<(), reqwest::Error> {
        let url = format!("{}/chat/{}/mark_read", self.base_url, chat_id);
        self.http.post(url).send().await?;
        Ok(())
    }

    pub async fn search(&self, query: &str) -> Result<SearchResults, reqwest::Error> {
        let url = format!("{}/search", self.base_url);
        self.http
            .get(url)
            .query(&[("q", query)])
            .send()
            .await?
            .json()
            .await
    }
}
