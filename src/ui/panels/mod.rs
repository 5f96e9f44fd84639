// LeadDesk - ui/panels/mod.rs
//
// One module per view, plus the small widgets they share.

pub mod about;
pub mod analytics;
pub mod calls;
pub mod dashboard;
pub mod detail;
pub mod follow_ups;
pub mod leads;
pub mod nav;
pub mod pipeline;
pub mod settings;
pub mod targets;

use crate::app::state::Tab;
use crate::core::model::{stage_label, LeadScore, PipelineStage, StageConfig};
use crate::ui::theme;
use egui::RichText;

/// View title and subtitle.
pub fn view_header(ui: &mut egui::Ui, tab: Tab) {
    ui.heading(tab.label());
    ui.label(RichText::new(tab.subtitle()).weak());
    ui.add_space(6.0);
}

pub fn score_badge(ui: &mut egui::Ui, score: LeadScore) {
    ui.label(
        RichText::new(score.label())
            .strong()
            .color(theme::score_colour(score)),
    );
}

pub fn stage_badge(ui: &mut egui::Ui, stages: &[StageConfig], stage: PipelineStage) {
    ui.label(RichText::new(stage_label(stages, stage)).color(theme::stage_colour(stage)));
}

/// Clickable lead name. Returns true when clicked.
pub fn lead_link(ui: &mut egui::Ui, name: &str) -> bool {
    ui.link(name).on_hover_text("Show details").clicked()
}

/// Framed label/value tile used by the dashboard and targets views.
pub fn stat_card(ui: &mut egui::Ui, title: &str, value: &str, accent: Option<egui::Color32>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(theme::STAT_CARD_WIDTH);
        ui.label(RichText::new(title).small().weak());
        let mut text = RichText::new(value).size(22.0).strong();
        if let Some(colour) = accent {
            text = text.color(colour);
        }
        ui.label(text);
    });
}
