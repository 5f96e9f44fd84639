// LeadDesk - ui/panels/follow_ups.rs
//
// Follow-ups view: Overdue, Today, Tomorrow, and This Week sections.
// A lead may appear in both Tomorrow and This Week.

use crate::app::state::{DeskState, Tab};
use crate::core::clock::Clock;
use crate::core::follow_up::{bucket_follow_ups, FollowUpWindow};
use crate::core::format::{clock_time, date_time, tel_link};
use crate::ui::panels::{lead_link, score_badge, view_header};
use crate::ui::theme;
use egui::RichText;

pub fn render(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    view_header(ui, Tab::FollowUps);

    let window_days = state.settings.upcoming_window_days;
    let buckets = bucket_follow_ups(&state.snapshot.leads, clock, window_days);

    ui.horizontal(|ui| {
        ui.label(format!("{} scheduled", buckets.scheduled));
        if buckets.unplaced > 0 {
            ui.separator();
            ui.label(
                RichText::new(format!("{} beyond {window_days} days", buckets.unplaced)).weak(),
            );
        }
    });
    ui.add_space(8.0);

    let mut clicked_lead: Option<String> = None;
    let mut open_url: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("follow_ups_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for (window, leads) in buckets.sections() {
                let mut title =
                    RichText::new(format!("{} ({})", window.label(), leads.len())).strong();
                if window == FollowUpWindow::Overdue && !leads.is_empty() {
                    title = title.color(theme::OVERDUE);
                }
                egui::CollapsingHeader::new(title)
                    .id_salt(("follow_ups", window))
                    .default_open(!leads.is_empty())
                    .show(ui, |ui| {
                        if leads.is_empty() {
                            ui.label(RichText::new("Nothing scheduled").weak());
                            return;
                        }
                        egui::Grid::new(("follow_up_grid", window))
                            .striped(true)
                            .num_columns(5)
                            .spacing([16.0, 4.0])
                            .show(ui, |ui| {
                                for lead in leads {
                                    if lead_link(ui, &lead.name) {
                                        clicked_lead = Some(lead.id.clone());
                                    }
                                    score_badge(ui, lead.score);
                                    let due = lead
                                        .next_follow_up
                                        .map(|ts| match window {
                                            FollowUpWindow::Today => clock_time(ts, clock),
                                            _ => date_time(ts, clock),
                                        })
                                        .unwrap_or_default();
                                    ui.label(due);
                                    ui.label(
                                        RichText::new(state.agent_name(&lead.assigned_to)).weak(),
                                    );
                                    if ui.small_button("Call").clicked() {
                                        open_url = Some(tel_link(&lead.phone));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            }
        });

    if let Some(id) = clicked_lead {
        state.select_lead(&id);
    }
    if let Some(url) = open_url {
        state.request_open(url);
    }
}
