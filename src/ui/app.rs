use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent};

use super::components::{chat_area, input_bar, search_panel, toast};
use super::cue::Chime;
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<ApiCommand>,
    event_receiver: mpsc::Receiver<ApiEvent>,
    chime: Chime,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<ApiCommand>,
        event_receiver: mpsc::Receiver<ApiEvent>,
    ) -> Self {
        Self {
            state: AppState::new(),
            command_sender,
            event_receiver,
            chime: Chime::new(),
        }
    }

    fn handle_api_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ApiEvent::MessageSent(message) => {
                    self.state.complete_send(message);
                    if let Err(err) = self.chime.play() {
                        log::debug!("Send chime unavailable: {err}");
                    }
                }
                ApiEvent::SendFailed(reason) => self.state.fail_send(reason),
                ApiEvent::SearchCompleted(results) => self.state.set_search_results(results),
                ApiEvent::SearchCleared => self.state.clear_search_results(),
            }
        }
    }

    fn submit_message(&mut self) {
        let Some(content) = self.state.begin_send() else {
            return;
        };
        if let Err(err) = self
            .command_sender
            .try_send(ApiCommand::SendMessage(content))
        {
            log::warn!("Failed to hand message to API task: {err}");
            self.state
                .fail_send("Network error. Please try again.".to_string());
        }
    }

    fn submit_search(&mut self, query: String) {
        if let Err(err) = self.command_sender.try_send(ApiCommand::Search(query)) {
            log::warn!("Failed to hand search query to API task: {err}");
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_api_events();
        self.state.prune_toasts();

        egui::SidePanel::left("search_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                if let Some(query) = search_panel::render(ui, &mut self.state) {
                    self.submit_search(query);
                }
            });

        egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
            if input_bar::render(ui, &mut self.state) {
                self.submit_message();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Rust Web Chat");
            ui.separator();
            chat_area::render(ui, &self.state);
        });

        toast::render(ctx, &self.state);

        ctx.request_repaint();
    }
}
