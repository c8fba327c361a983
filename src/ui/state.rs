use chrono::{DateTime, Duration, Utc};

use crate::common::{ChatMessage, SearchResults};

/// How long an error toast stays on screen.
const TOAST_TTL_SECONDS: i64 = 5;
/// How long the typing dots linger after the last keystroke.
const TYPING_LINGER_SECONDS: i64 = 1;

/// One rendered chat entry; `outgoing` picks the bubble side.
#[derive(Debug, Clone)]
pub struct DisplayMessage {
    pub message: ChatMessage,
    pub outgoing: bool,
}

/// Transient error notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Local UI state. The server owns the conversation; this holds only what
/// the current frame needs to draw.
pub struct AppState {
    pub messages: Vec<DisplayMessage>,
    pub input_text: String,
    /// True while a send is in flight; the composer is disabled meanwhile.
    pub sending: bool,
    /// One-shot request to refocus the input after a successful send.
    pub focus_input: bool,
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
    pub search_input: String,
    pub search_results: Option<SearchResults>,
    typing_until: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            sending: false,
            focus_input: false,
            toasts: Vec::new(),
            next_toast_id: 0,
            search_input: String::new(),
            search_results: None,
            typing_until: None,
        }
    }

    /// Start a send: trims the input and locks the composer. Whitespace-only
    /// input returns `None` and changes nothing. The raw input is kept so a
    /// failed send can be resubmitted as typed.
    pub fn begin_send(&mut self) -> Option<String> {
        let content = self.input_text.trim();
        if content.is_empty() {
            return None;
        }
        self.sending = true;
        Some(content.to_string())
    }

    /// The server accepted the message: append its echo, reset the composer.
    pub fn complete_send(&mut self, message: ChatMessage) {
        self.messages.push(DisplayMessage {
            message,
            outgoing: true,
        });
        self.input_text.clear();
        self.sending = false;
        self.focus_input = true;
        self.typing_until = None;
    }

    /// Every failure path lands here, so the composer can never stay locked
    /// past the end of a request.
    pub fn fail_send(&mut self, reason: String) {
        self.sending = false;
        self.push_toast(reason);
    }

    pub fn push_toast(&mut self, text: String) {
        let toast = Toast {
            id: self.next_toast_id,
            text,
            created_at: Utc::now(),
        };
        self.next_toast_id += 1;
        self.toasts.push(toast);
    }

    /// Drop toasts older than their display window. Called once per frame.
    pub fn prune_toasts(&mut self) {
        let now = Utc::now();
        self.toasts.retain(|toast| {
            now.signed_duration_since(toast.created_at).num_seconds() < TOAST_TTL_SECONDS
        });
    }

    pub fn note_typing(&mut self) {
        self.typing_until = Some(Utc::now() + Duration::seconds(TYPING_LINGER_SECONDS));
    }

    pub fn is_typing(&self) -> bool {
        self.typing_until.is_some_and(|until| Utc::now() < until)
    }

    pub fn set_search_results(&mut self, results: SearchResults) {
        self.search_results = Some(results);
    }

    pub fn clear_search_results(&mut self) {
        self.search_results = None;
    }
}
