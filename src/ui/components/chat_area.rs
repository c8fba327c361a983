use eframe::egui;

use crate::ui::state::{AppState, DisplayMessage};

const OUTGOING_FILL: egui::Color32 = egui::Color32::from_rgb(0, 92, 75);

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if state.messages.is_empty() && !state.is_typing() {
                ui.weak("No messages yet");
                return;
            }

            for entry in &state.messages {
                bubble(ui, entry);
                ui.add_space(4.0);
            }

            if state.is_typing() {
                ui.weak("● ● ●");
            }
        });
}

fn bubble(ui: &mut egui::Ui, entry: &DisplayMessage) {
    let align = if entry.outgoing {
        egui::Align::Max
    } else {
        egui::Align::Min
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        let fill = if entry.outgoing {
            OUTGOING_FILL
        } else {
            ui.visuals().faint_bg_color
        };

        egui::Frame::default()
            .fill(fill)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                // Sender names only matter on received group messages.
                if !entry.outgoing {
                    if let Some(sender_name) = &entry.message.sender_name {
                        ui.label(egui::RichText::new(sender_name).strong().small());
                    }
                }

                ui.label(&entry.message.content);

                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&entry.message.created_at)
                            .weak()
                            .small(),
                    );
                    if entry.outgoing {
                        // One check until the server reports delivery.
                        let check = if entry.message.is_delivered {
                            "✔✔"
                        } else {
                            "✔"
                        };
                        ui.label(egui::RichText::new(check).weak().small());
                    }
                });
            });
    });
}
