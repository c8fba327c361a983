use eframe::egui;

use crate::ui::state::AppState;

const TOAST_FILL: egui::Color32 = egui::Color32::from_rgb(170, 40, 40);

/// Transient error notifications, stacked in the top-right corner. Expiry
/// is handled by the state's per-frame pruning.
pub fn render(ctx: &egui::Context, state: &AppState) {
    if state.toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("error_toasts"))
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
        .interactable(false)
        .show(ctx, |ui| {
            for toast in &state.toasts {
                egui::Frame::default()
                    .fill(TOAST_FILL)
                    .corner_radius(egui::CornerRadius::same(6))
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&toast.text).color(egui::Color32::WHITE));
                    });
                ui.add_space(6.0);
            }
        });
}
