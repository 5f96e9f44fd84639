// LeadDesk - ui/panels/pipeline.rs
//
// Pipeline board: one column per configured stage, in stage order, plus a
// trailing "Other" column for leads whose stage is missing from the table.
// Read-only; cards select the lead for the detail panel.

use crate::app::state::{DeskState, Tab};
use crate::core::clock::Clock;
use crate::core::format::time_ago;
use crate::core::model::Lead;
use crate::core::pipeline::{pipeline_columns, unstaged_leads};
use crate::ui::panels::{lead_link, score_badge, view_header};
use crate::ui::theme;
use crate::util::constants::OTHER_STAGE_LABEL;
use egui::RichText;

struct BoardColumn<'a> {
    title: String,
    colour: egui::Color32,
    id: egui::Id,
    leads: Vec<&'a Lead>,
}

pub fn render(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    view_header(ui, Tab::Pipeline);

    let clicked_lead = {
        let shown: &DeskState = state;
        let leads = &shown.snapshot.leads;
        let stages = &shown.snapshot.stages;

        let mut board: Vec<BoardColumn<'_>> = pipeline_columns(leads, stages)
            .into_iter()
            .map(|column| BoardColumn {
                title: format!("{} ({})", column.stage.label, column.leads.len()),
                colour: theme::stage_colour(column.stage.id),
                id: egui::Id::new(("pipeline_column", column.stage.id)),
                leads: column.leads,
            })
            .collect();
        let unstaged = unstaged_leads(leads, stages);
        if !unstaged.is_empty() {
            board.push(BoardColumn {
                title: format!("{} ({})", OTHER_STAGE_LABEL, unstaged.len()),
                colour: ui.visuals().weak_text_color(),
                id: egui::Id::new("pipeline_column_other"),
                leads: unstaged,
            });
        }

        let mut clicked: Option<String> = None;
        egui::ScrollArea::horizontal()
            .id_salt("pipeline_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    for column in &board {
                        if let Some(id) = render_column(ui, shown, clock, column) {
                            clicked = Some(id);
                        }
                    }
                });
            });
        clicked
    };

    if let Some(id) = clicked_lead {
        state.select_lead(&id);
    }
}

/// Draw one column of cards. Returns the id of a clicked lead.
fn render_column(
    ui: &mut egui::Ui,
    state: &DeskState,
    clock: &Clock,
    column: &BoardColumn<'_>,
) -> Option<String> {
    let mut clicked = None;
    let selected = state.selected_lead.as_deref();

    ui.vertical(|ui| {
        ui.set_width(theme::PIPELINE_COLUMN_WIDTH);
        ui.label(RichText::new(&column.title).strong().color(column.colour));
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt(column.id)
            .show(ui, |ui| {
                if column.leads.is_empty() {
                    ui.label(RichText::new("No leads").weak());
                }
                for lead in &column.leads {
                    let mut frame = egui::Frame::group(ui.style());
                    if selected == Some(lead.id.as_str()) {
                        frame = frame.fill(theme::selection_bg(state.dark_mode));
                    }
                    frame.show(ui, |ui| {
                        ui.set_width(theme::PIPELINE_COLUMN_WIDTH - 12.0);
                        if lead_link(ui, &lead.name) {
                            clicked = Some(lead.id.clone());
                        }
                        ui.horizontal(|ui| {
                            score_badge(ui, lead.score);
                            ui.label(RichText::new(lead.score_value.to_string()).weak());
                        });
                        if let Some(ref course) = lead.course {
                            ui.label(RichText::new(course).small());
                        }
                        let meta = format!(
                            "{} \u{00b7} {}",
                            state.agent_name(&lead.assigned_to),
                            time_ago(lead.created_at, clock)
                        );
                        ui.label(RichText::new(meta).small().weak());
                    });
                }
            });
    });
    clicked
}
