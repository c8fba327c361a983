pub mod api;
pub mod client;
pub mod debounce;

pub use api::{ChatApi, SendError};
pub use client::ApiClient;
