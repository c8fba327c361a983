use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;

use rust_web_chat::config;
use rust_web_chat::network::{ApiClient, ChatApi};
use rust_web_chat::ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "rust_web_chat",
    version,
    about = "Desktop client for a web chat server"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Override the server base URL from the config file
    #[arg(long, value_name = "URL")]
    server: Option<String>,
    /// Override the conversation to open
    #[arg(long, value_name = "ID")]
    chat: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(server) = cli.server {
        app_config.server_url = server;
    }
    if let Some(chat) = cli.chat {
        app_config.chat_id = Some(chat);
    }

    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let api = ChatApi::new(&app_config.server_url);
    let chat_id = app_config.chat_id.clone();
    tokio::spawn(async move {
        let client = ApiClient::new(api, chat_id, event_tx, cmd_rx);
        if let Err(err) = client.run().await {
            log::error!("API client terminated: {err}");
        }
    });

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Rust Web Chat",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!(
                "Client started against {} (chat: {:?})",
                app_config.server_url,
                app_config.chat_id
            );

            Ok(Box::new(ChatApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )
}
