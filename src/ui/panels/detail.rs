// LeadDesk - ui/panels/detail.rs
//
// Lead detail pane (right side panel): contact actions, stage progress,
// profile fields, and the activity history.

use crate::app::state::DeskState;
use crate::core::clock::Clock;
use crate::core::format::{
    date_time, format_amount, format_duration, initials, mailto_link, tel_link, time_ago,
    whatsapp_link,
};
use crate::core::model::stage_label;
use crate::core::repository::CrmRepository;
use crate::ui::panels::{score_badge, stage_badge};
use crate::ui::theme;
use egui::RichText;

enum DetailAction {
    Close,
    Open(String),
}

/// Render the detail pane. Shows a hint when nothing is selected.
pub fn render(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    let Some(detail) = state.selected_detail() else {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("Select a lead to view details.").weak());
        });
        return;
    };

    let lead = detail.lead;
    let stages = &state.snapshot.stages;
    let symbol = &state.settings.currency_symbol;
    let mut action: Option<DetailAction> = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new(initials(&lead.name)).size(20.0).strong());
        ui.vertical(|ui| {
            ui.label(RichText::new(&lead.name).size(16.0).strong());
            ui.label(RichText::new(&lead.id).small().weak());
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
            if ui.small_button("\u{2715}").on_hover_text("Close").clicked() {
                action = Some(DetailAction::Close);
            }
        });
    });

    ui.horizontal(|ui| {
        if ui.button("Call").clicked() {
            action = Some(DetailAction::Open(tel_link(&lead.phone)));
        }
        if ui.button("WhatsApp").clicked() {
            action = Some(DetailAction::Open(whatsapp_link(&lead.phone)));
        }
        if let Some(ref email) = lead.email {
            if ui.button("Email").clicked() {
                action = Some(DetailAction::Open(mailto_link(email)));
            }
        }
    });

    if lead.reactivated {
        let previous = lead
            .previous_stage
            .map(|s| stage_label(stages, s).to_string())
            .unwrap_or_else(|| "an earlier stage".to_string());
        ui.label(
            RichText::new(format!("Reactivated lead (previously {previous})"))
                .small()
                .color(theme::score_colour(crate::core::model::LeadScore::Warm)),
        );
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Stage:");
        stage_badge(ui, stages, lead.stage);
    });
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        for segment in &detail.progress {
            let colour = if segment.filled {
                theme::stage_colour(segment.stage)
            } else {
                ui.visuals().weak_text_color()
            };
            ui.label(RichText::new("\u{25a0}").color(colour))
                .on_hover_text(&segment.label);
        }
    });

    ui.separator();
    egui::ScrollArea::vertical()
        .id_salt("detail_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new("detail_grid")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Phone:");
                    ui.label(&lead.phone);
                    ui.end_row();

                    if let Some(ref email) = lead.email {
                        ui.label("Email:");
                        ui.label(email);
                        ui.end_row();
                    }

                    ui.label("Score:");
                    ui.horizontal(|ui| {
                        score_badge(ui, lead.score);
                        ui.label(format!("{}/100", lead.score_value));
                    });
                    ui.end_row();

                    ui.label("Assigned to:");
                    ui.label(detail.agent_label());
                    ui.end_row();

                    ui.label("Source:");
                    ui.label(&lead.source);
                    ui.end_row();

                    if let Some(ref course) = lead.course {
                        ui.label("Course:");
                        ui.label(course);
                        ui.end_row();
                    }

                    if let Some(budget) = lead.budget {
                        ui.label("Budget:");
                        ui.label(format_amount(budget, symbol));
                        ui.end_row();
                    }

                    ui.label("Urgency:");
                    ui.label(lead.urgency.label());
                    ui.end_row();

                    ui.label("Decision maker:");
                    ui.label(if lead.is_decision_maker { "Yes" } else { "No" });
                    ui.end_row();

                    ui.label("Created:");
                    ui.label(date_time(lead.created_at, clock));
                    ui.end_row();

                    ui.label("Last contact:");
                    ui.label(
                        lead.last_contacted_at
                            .map(|ts| time_ago(ts, clock))
                            .unwrap_or_else(|| "Never".to_string()),
                    );
                    ui.end_row();

                    if let Some(ts) = lead.next_follow_up {
                        ui.label("Next follow-up:");
                        let text = RichText::new(date_time(ts, clock));
                        ui.label(if clock.is_past(ts) {
                            text.color(theme::OVERDUE)
                        } else {
                            text
                        });
                        ui.end_row();
                    }

                    if !lead.tags.is_empty() {
                        ui.label("Tags:");
                        ui.label(lead.tags.join(", "));
                        ui.end_row();
                    }
                });

            if let Some(ref notes) = lead.notes {
                ui.add_space(6.0);
                ui.label(RichText::new("Notes").strong());
                ui.label(notes);
            }

            ui.add_space(6.0);
            ui.label(RichText::new(format!("Activity ({})", detail.activities.len())).strong());
            if detail.activities.is_empty() {
                ui.label(RichText::new("No activity yet.").weak());
            }
            for activity in detail.activities.iter().rev() {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        let kind = activity.activity_type;
                        ui.label(RichText::new(kind.label()).color(theme::activity_colour(kind)));
                        if let Some(outcome) = activity.outcome {
                            ui.label(RichText::new(outcome.label()).small());
                        }
                        let duration = format_duration(activity.duration_secs);
                        if !duration.is_empty() {
                            ui.label(RichText::new(duration).small().weak());
                        }
                    });
                    ui.label(&activity.description);
                    ui.label(
                        RichText::new(format!(
                            "{} \u{00b7} {}",
                            state.snapshot.author_name(&activity.created_by),
                            time_ago(activity.created_at, clock)
                        ))
                        .small()
                        .weak(),
                    );
                });
            }
        });

    match action {
        Some(DetailAction::Close) => state.selected_lead = None,
        Some(DetailAction::Open(url)) => state.request_open(url),
        None => {}
    }
}
