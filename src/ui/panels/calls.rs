// LeadDesk - ui/panels/calls.rs
//
// Call queue view: leads waiting for a call, grouped Hot / Warm / Cold,
// with one-click dial and WhatsApp buttons.

use crate::app::state::{DeskState, Tab};
use crate::core::call_queue::{build_call_queue, calls_completed_today, hours_since_contact};
use crate::core::clock::Clock;
use crate::core::format::{tel_link, time_ago, whatsapp_link};
use crate::core::model::LeadScore;
use crate::ui::panels::{lead_link, stage_badge, view_header};
use crate::ui::theme;
use crate::util::constants::NEVER_CONTACTED_HOURS;
use egui::RichText;

pub fn render(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    view_header(ui, Tab::Calls);

    let mut clicked_lead: Option<String> = None;
    let mut open_url: Option<String> = None;

    let queue = build_call_queue(&state.snapshot.leads, clock, &state.settings.call_policy);
    let done = calls_completed_today(&state.snapshot.activities, clock);
    let daily_target = state.settings.daily_call_target;

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{} pending", queue.pending())).strong());
        ui.separator();
        ui.label(format!("{done} of {daily_target} calls done today"));
    });
    ui.add(
        egui::ProgressBar::new((done as f32 / daily_target.max(1) as f32).min(1.0))
            .desired_width(280.0)
            .show_percentage(),
    );
    ui.add_space(8.0);

    if queue.is_empty() {
        ui.label(RichText::new("No leads need a call right now.").weak());
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("calls_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for score in LeadScore::all() {
                let part = queue.partition(*score);
                egui::CollapsingHeader::new(
                    RichText::new(format!("{} ({})", score.label(), part.len()))
                        .strong()
                        .color(theme::score_colour(*score)),
                )
                .id_salt(("calls", *score))
                .default_open(!part.is_empty())
                .show(ui, |ui| {
                    egui::Grid::new(("call_grid", *score))
                        .striped(true)
                        .num_columns(5)
                        .spacing([16.0, 4.0])
                        .show(ui, |ui| {
                            for lead in part {
                                if lead_link(ui, &lead.name) {
                                    clicked_lead = Some(lead.id.clone());
                                }
                                stage_badge(ui, &state.snapshot.stages, lead.stage);
                                let hours = hours_since_contact(lead, clock);
                                let contact = match lead.last_contacted_at {
                                    Some(ts) => format!("Last contact {}", time_ago(ts, clock)),
                                    None => "Never contacted".to_string(),
                                };
                                let contact = RichText::new(contact).small();
                                ui.label(if hours >= NEVER_CONTACTED_HOURS {
                                    contact.color(theme::OVERDUE)
                                } else {
                                    contact.weak()
                                });
                                if ui.small_button("Call").clicked() {
                                    open_url = Some(tel_link(&lead.phone));
                                }
                                if ui.small_button("WhatsApp").clicked() {
                                    open_url = Some(whatsapp_link(&lead.phone));
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
