use crate::common::types::{ChatMessage, SearchResults};

/// Events the network task sends up to the UI.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    /// The server accepted the message; this is its rendered form.
    MessageSent(ChatMessage),
    /// The send did not go through; the payload is user-facing text.
    SendFailed(String),
    SearchCompleted(SearchResults),
    SearchCleared,
}
