// LeadDesk - ui/panels/targets.rs
//
// Targets view: overall progress and one progress row per target.

use crate::app::report::target_value;
use crate::app::state::{DeskState, Tab};
use crate::core::targets::{overall_progress, percentage, tier};
use crate::ui::panels::{stat_card, view_header};
use crate::ui::theme;
use egui::RichText;

pub fn render(ui: &mut egui::Ui, state: &DeskState) {
    view_header(ui, Tab::Targets);

    let list = &state.snapshot.targets;
    if list.is_empty() {
        ui.label(RichText::new("No targets defined in this dataset.").weak());
        return;
    }

    let symbol = &state.settings.currency_symbol;
    stat_card(
        ui,
        "Overall progress",
        &format!("{}%", overall_progress(list)),
        None,
    );
    ui.add_space(10.0);

    egui::Grid::new("targets_grid")
        .striped(true)
        .num_columns(6)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for title in ["Target", "Period", "Progress", "", "Status", "Trend"] {
                ui.label(RichText::new(title).small().weak());
            }
            ui.end_row();

            for target in list {
                let pct = percentage(target);
                let band = tier(target);
                ui.label(&target.name);
                ui.label(target.period.label());
                ui.label(format!(
                    "{} / {}",
                    target_value(target, target.current, symbol),
                    target_value(target, target.target, symbol)
                ));
                ui.add(
                    egui::ProgressBar::new((pct as f32 / 100.0).min(1.0))
                        .desired_width(160.0)
                        .fill(theme::target_colour(band))
                        .text(format!("{pct}%")),
                );
                ui.label(RichText::new(band.label()).color(theme::target_colour(band)));
                match target.trend {
                    Some(t) if t < 0 => {
                        ui.label(RichText::new(format!("{t}%")).color(theme::OVERDUE))
                    }
                    Some(t) => ui.label(format!("{t:+}%")),
                    None => ui.label(""),
                };
                ui.end_row();
            }
        });
}
