// LeadDesk - ui/panels/settings.rs
//
// Settings view: the effective configuration (read-only; edit config.toml
// to change it), the theme toggle, and any startup warnings.

use crate::app::state::{DeskState, Tab};
use crate::core::clock::Clock;
use crate::ui::panels::view_header;
use egui::RichText;

fn row(ui: &mut egui::Ui, label: &str, value: impl Into<egui::WidgetText>) {
    ui.label(label);
    ui.label(value);
    ui.end_row();
}

pub fn render(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    view_header(ui, Tab::Settings);

    ui.label(RichText::new("Appearance").strong());
    ui.horizontal(|ui| {
        ui.label("Theme:");
        ui.radio_value(&mut state.dark_mode, true, "Dark");
        ui.radio_value(&mut state.dark_mode, false, "Light");
    });

    ui.add_space(10.0);
    ui.label(RichText::new("Organisation").strong());
    let settings = &state.settings;
    egui::Grid::new("settings_org")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            row(ui, "Name:", settings.organisation_name.as_str());
            row(ui, "Branch:", settings.branch.as_deref().unwrap_or("-"));
            row(ui, "Currency:", settings.currency_symbol.as_str());
            row(ui, "UTC offset:", clock.offset().to_string());
        });

    ui.add_space(10.0);
    ui.label(RichText::new("Queues and dashboard").strong());
    egui::Grid::new("settings_queue")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            row(
                ui,
                "Call after (hours since contact):",
                settings.call_policy.stale_contact_hours.to_string(),
            );
            row(
                ui,
                "Daily call target:",
                settings.daily_call_target.to_string(),
            );
            row(
                ui,
                "Follow-up window (days):",
                settings.upcoming_window_days.to_string(),
            );
            row(
                ui,
                "Recent activities shown:",
                settings.recent_activity_limit.to_string(),
            );
            row(ui, "Trend weeks:", settings.trend_weeks.to_string());
        });

    ui.add_space(10.0);
    ui.label(RichText::new("Dataset").strong());
    ui.label(&state.dataset_label);
    ui.label(
        RichText::new(format!(
            "{} leads, {} agents, {} activities, {} targets",
            state.snapshot.leads.len(),
            state.snapshot.agents.len(),
            state.snapshot.activities.len(),
            state.snapshot.targets.len()
        ))
        .weak(),
    );

    if !state.warnings.is_empty() {
        ui.add_space(10.0);
        ui.label(RichText::new(format!("Warnings ({})", state.warnings.len())).strong());
        for warning in &state.warnings {
            ui.label(RichText::new(warning).small());
        }
    }

    ui.add_space(10.0);
    ui.label(
        RichText::new("Settings are read from config.toml at startup.")
            .small()
            .weak(),
    );
    if ui.button("About LeadDesk").clicked() {
        state.show_about = true;
    }
}
