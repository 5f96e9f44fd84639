// LeadDesk - ui/panels/about.rs
//
// About dialog: opened from Help > About or the Settings view.
// Rendered as a centred, non-resizable, non-collapsible window.

use crate::app::state::DeskState;
use crate::util::constants::{APP_NAME, APP_VERSION};

/// Render the About dialog (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut DeskState) {
    if !state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new(format!("About {APP_NAME}"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(340.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(APP_NAME).size(28.0).strong());
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("v{APP_VERSION}"))
                        .size(14.0)
                        .weak(),
                );
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label("Lead pipeline, call queue, and follow-up dashboard");
                ui.label(format!("for {}.", state.settings.organisation_name));
            });

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("Data: {}", state.dataset_label))
                        .small()
                        .weak(),
                );
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(6.0);

            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("MIT License").small().weak());
                ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
            });

            ui.add_space(8.0);
        });

    if !open {
        state.show_about = false;
    }
}
