use eframe::egui;

use crate::ui::state::AppState;

/// Search box plus result lists. Returns the query to forward whenever the
/// box changed; debouncing happens in the network task.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<String> {
    ui.heading("Search");
    ui.separator();

    let response = ui.add(
        egui::TextEdit::singleline(&mut state.search_input).hint_text("Users or messages"),
    );
    let query = response.changed().then(|| state.search_input.clone());

    ui.separator();

    let Some(results) = &state.search_results else {
        ui.weak("Type at least 2 characters to search");
        return query;
    };

    if results.is_empty() {
        ui.weak("No results found");
        return query;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        if !results.users.is_empty() {
            ui.label(egui::RichText::new("USERS").weak().small());
            for user in &results.users {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::GREEN, "●");
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&user.name).strong());
                        ui.label(egui::RichText::new(&user.email).weak().small());
                    });
                });
            }
            ui.separator();
        }

        if !results.messages.is_empty() {
            ui.label(egui::RichText::new("MESSAGES").weak().small());
            for hit in &results.messages {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&hit.sender_name).strong().small());
                    ui.label(egui::RichText::new(&hit.created_at).weak().small());
                });
                ui.add(egui::Label::new(&hit.content).truncate());
            }
        }
    });

    query
}
