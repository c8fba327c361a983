use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::common::{ApiCommand, ApiEvent};

use super::api::{ChatApi, SendError};
use super::debounce::Debouncer;

/// Period of the background message refresh.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);
/// Quiet window before a search query goes to the server.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// Queries shorter than this never leave the client.
pub const SEARCH_MIN_CHARS: usize = 2;

const NETWORK_ERROR_TEXT: &str = "Network error. Please try again.";

/// Owns all HTTP traffic. Driven by UI commands and a refresh timer;
/// reports back over the event channel.
pub struct ApiClient {
    api: ChatApi,
    /// The open conversation. Fixed for the lifetime of the client.
    chat_id: Option<String>,
    event_sender: mpsc::Sender<ApiEvent>,
    command_receiver: mpsc::Receiver<ApiCommand>,
    search_debounce: Debouncer,
}

impl ApiClient {
    pub fn new(
        api: ChatApi,
        chat_id: Option<String>,
        event_sender: mpsc::Sender<ApiEvent>,
        command_receiver: mpsc::Receiver<ApiCommand>,
    ) -> Self {
        Self {
            api,
            chat_id,
            event_sender,
            command_receiver,
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    pub async fn run(mut self) -> Result<(), Box<dyn Error>> {
        log::info!("API event loop started");

        self.mark_read_once();

        let mut refresh =
            time::interval_at(time::Instant::now() + REFRESH_INTERVAL, REFRESH_INTERVAL);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => break,
                    }
                }
                _ = refresh.tick() => self.refresh_messages(),
            }
        }

        Ok(())
    }

    fn handle_command(&mut self, command: ApiCommand) {
        match command {
            ApiCommand::SendMessage(content) => self.send_message(content),
            ApiCommand::Search(query) => self.search(query),
        }
    }

    /// One fire-and-forget read receipt per client start. Not retried.
    fn mark_read_once(&self) {
        let Some(chat_id) = self.chat_id.clone() else {
            return;
        };
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(err) = api.mark_read(&chat_id).await {
                log::warn!("Failed to mark chat {chat_id} as read: {err}");
            }
        });
    }

    /// Runs in its own task so an in-flight send never delays the refresh
    /// tick or a later command.
    fn send_message(&self, content: String) {
        let Some(chat_id) = self.chat_id.clone() else {
            self.notify(ApiEvent::SendFailed("No conversation is open.".to_string()));
            return;
        };

        let api = self.api.clone();
        let events = self.event_sender.clone();
        tokio::spawn(async move {
            let event = match api.send_message(&chat_id, &content).await {
                Ok(message) => ApiEvent::MessageSent(message),
                Err(SendError::Rejected(reason)) => ApiEvent::SendFailed(reason),
                Err(err) => {
                    log::warn!("Send failed: {err}");
                    ApiEvent::SendFailed(NETWORK_ERROR_TEXT.to_string())
                }
            };
            if let Err(err) = events.send(event).await {
                log::warn!("Failed to notify UI about send outcome: {err}");
            }
        });
    }

    fn search(&mut self, query: String) {
        let query = query.trim().to_string();
        if query.chars().count() < SEARCH_MIN_CHARS {
            self.search_debounce.cancel();
            self.notify(ApiEvent::SearchCleared);
            return;
        }

        let api = self.api.clone();
        let events = self.event_sender.clone();
        self.search_debounce.call(async move {
            match api.search(&query).await {
                Ok(results) => {
                    if let Err(err) = events.send(ApiEvent::SearchCompleted(results)).await {
                        log::warn!("Failed to deliver search results: {err}");
                    }
                }
                // Search failures stay silent; the user just keeps typing.
                Err(err) => log::warn!("Search request failed: {err}"),
            }
        });
    }

    /// Poll the server for the conversation's messages. The payload is
    /// fetched and dropped.
    // TODO: reconcile the fetched list into the UI once a policy is chosen
    // (append vs. full re-render vs. diff).
    fn refresh_messages(&self) {
        let Some(chat_id) = self.chat_id.clone() else {
            return;
        };

        let api = self.api.clone();
        tokio::spawn(async move {
            match api.fetch_messages(&chat_id).await {
                Ok(count) => {
                    log::debug!("Refreshed chat {chat_id}: {count} messages on server");
                }
                Err(err) => log::warn!("Failed to refresh messages: {err}"),
            }
        });
    }

    fn notify(&self, event: ApiEvent) {
        if let Err(err) = self.event_sender.try_send(event) {
            log::warn!("Failed to notify UI: {err}");
        }
    }
}
