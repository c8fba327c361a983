use eframe::egui;

use crate::ui::state::AppState;

/// Returns true when the user asked to submit the current input. The whole
/// surface is disabled while a send is in flight.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let mut send = false;

    ui.horizontal(|ui| {
        let edit = egui::TextEdit::singleline(&mut state.input_text)
            .hint_text("Type a message")
            .desired_width(ui.available_width() - 60.0);
        let response = ui.add_enabled(!state.sending, edit);

        if state.focus_input {
            response.request_focus();
            state.focus_input = false;
        }
        if response.changed() {
            state.note_typing();
        }

        if ui
            .add_enabled(!state.sending, egui::Button::new("Send"))
            .clicked()
        {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });

    send && !state.sending
}
