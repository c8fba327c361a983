/// Commands the UI sends down to the network task.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    /// Submit one trimmed, non-empty message to the open conversation.
    SendMessage(String),
    /// Raw search-box text. The network task debounces it and drops
    /// queries that are too short.
    Search(String),
}
