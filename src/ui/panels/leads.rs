// LeadDesk - ui/panels/leads.rs
//
// All-leads view: filter bar (query, stage, score, notes/tags pattern) and
// a sortable table.
//
// Filter edits and header clicks are collected while rendering and applied
// afterwards, so the table never holds a borrow of `state` while it changes.

use crate::app::state::{DeskState, Tab};
use crate::core::clock::Clock;
use crate::core::filter::{SortDirection, SortKey};
use crate::core::format::time_ago;
use crate::core::model::{stage_label, LeadScore, PipelineStage};
use crate::ui::panels::{lead_link, score_badge, stage_badge, view_header};
use crate::ui::theme;
use egui::RichText;

pub fn render(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    view_header(ui, Tab::Leads);
    render_filter_bar(ui, state);
    ui.add_space(6.0);
    render_table(ui, state, clock);
}

fn render_filter_bar(ui: &mut egui::Ui, state: &mut DeskState) {
    let mut changed = false;

    ui.horizontal_wrapped(|ui| {
        ui.label("Search:");
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.filter.query)
                    .hint_text("name, email, or phone")
                    .desired_width(200.0),
            )
            .changed();

        let stage_text = state
            .filter
            .stage
            .map(|s| stage_label(&state.snapshot.stages, s).to_string())
            .unwrap_or_else(|| "All stages".to_string());
        egui::ComboBox::from_id_salt("stage_filter")
            .selected_text(stage_text)
            .show_ui(ui, |ui| {
                changed |= ui
                    .selectable_value(&mut state.filter.stage, None, "All stages")
                    .changed();
                for stage in PipelineStage::all() {
                    changed |= ui
                        .selectable_value(
                            &mut state.filter.stage,
                            Some(*stage),
                            stage_label(&state.snapshot.stages, *stage),
                        )
                        .changed();
                }
            });

        let score_text = state
            .filter
            .score
            .map(|s| s.label())
            .unwrap_or("All scores");
        egui::ComboBox::from_id_salt("score_filter")
            .selected_text(score_text)
            .show_ui(ui, |ui| {
                changed |= ui
                    .selectable_value(&mut state.filter.score, None, "All scores")
                    .changed();
                for score in LeadScore::all() {
                    changed |= ui
                        .selectable_value(&mut state.filter.score, Some(*score), score.label())
                        .changed();
                }
            });

        if ui.button("Hot only").clicked() {
            state.filter.stage = None;
            state.filter.score = Some(LeadScore::Hot);
            changed = true;
        }
    });

    let mut commit = false;
    let mut clear = false;
    ui.horizontal(|ui| {
        ui.label("Notes/tags:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.pattern_input)
                .hint_text("regex, e.g. weekend|evening")
                .desired_width(200.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            commit = true;
        }
        if ui.button("Apply").clicked() {
            commit = true;
        }
        if ui.button("Clear filters").clicked() {
            clear = true;
        }
    });
    if let Some(ref err) = state.pattern_error {
        ui.label(RichText::new(err).small().color(theme::OVERDUE));
    }

    if clear {
        state.clear_filters();
    } else if commit {
        state.commit_pattern();
    } else if changed {
        state.apply_filters();
    }
}

fn header_button(
    ui: &mut egui::Ui,
    key: SortKey,
    active: SortKey,
    direction: SortDirection,
) -> bool {
    let arrow = match (key == active, direction) {
        (false, _) => "",
        (true, SortDirection::Asc) => " \u{25b2}",
        (true, SortDirection::Desc) => " \u{25bc}",
    };
    let next = if key == active {
        direction.flipped()
    } else {
        SortDirection::Asc
    };
    let text = RichText::new(format!("{}{arrow}", key.label())).strong();
    ui.add(egui::Button::new(text).frame(false))
        .on_hover_text(format!("Sort {}", next.label()))
        .clicked()
}

fn render_table(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    ui.label(
        RichText::new(format!(
            "Showing {} of {} leads",
            state.table.shown, state.table.total
        ))
        .weak(),
    );

    if state.table.shown == 0 {
        ui.add_space(12.0);
        ui.label(if state.table.total == 0 {
            "No leads in this dataset."
        } else {
            "No leads match the current filters."
        });
        return;
    }

    let mut sort_click: Option<SortKey> = None;
    let mut clicked_lead: Option<String> = None;
    let active = state.sort.key;
    let direction = state.sort.direction;

    egui::ScrollArea::both()
        .id_salt("leads_table")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new("leads_grid")
                .striped(true)
                .num_columns(7)
                .min_row_height(theme::ROW_HEIGHT)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    if header_button(ui, SortKey::Name, active, direction) {
                        sort_click = Some(SortKey::Name);
                    }
                    ui.label(RichText::new("Phone").strong());
                    if header_button(ui, SortKey::Stage, active, direction) {
                        sort_click = Some(SortKey::Stage);
                    }
                    ui.label(RichText::new("Score").strong());
                    if header_button(ui, SortKey::ScoreValue, active, direction) {
                        sort_click = Some(SortKey::ScoreValue);
                    }
                    ui.label(RichText::new("Agent").strong());
                    if header_button(ui, SortKey::CreatedAt, active, direction) {
                        sort_click = Some(SortKey::CreatedAt);
                    }
                    ui.end_row();

                    for lead in state.table.rows(&state.snapshot.leads) {
                        if lead_link(ui, &lead.name) {
                            clicked_lead = Some(lead.id.clone());
                        }
                        ui.label(&lead.phone);
                        stage_badge(ui, &state.snapshot.stages, lead.stage);
                        score_badge(ui, lead.score);
                        ui.label(lead.score_value.to_string());
                        ui.label(state.agent_name(&lead.assigned_to));
                        ui.label(time_ago(lead.created_at, clock));
                        ui.end_row();
                    }
                });
        });

    if let Some(key) = sort_click {
        state.toggle_sort(key);
    }
    if let Some(id) = clicked_lead {
        state.select_lead(&id);
    }
}
