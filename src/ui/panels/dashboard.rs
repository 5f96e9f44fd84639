// LeadDesk - ui/panels/dashboard.rs
//
// Dashboard view: headline stat cards, agent performance, recent activity.

use crate::app::state::{DeskState, Tab};
use crate::core::clock::Clock;
use crate::core::format::{format_amount, time_ago};
use crate::core::stats::{agent_performance, dashboard_stats, recent_activities};
use crate::ui::panels::{stat_card, view_header};
use crate::ui::theme;
use egui::RichText;

pub fn render(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    view_header(ui, Tab::Dashboard);

    let stats = dashboard_stats(&state.snapshot.leads, clock);
    let symbol = &state.settings.currency_symbol;
    let overdue_accent = (stats.overdue_follow_ups > 0).then_some(theme::OVERDUE);

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Total leads", &stats.total_leads.to_string(), None);
        stat_card(ui, "New today", &stats.new_leads_today.to_string(), None);
        stat_card(
            ui,
            "Hot leads",
            &stats.hot_leads.to_string(),
            Some(theme::score_colour(crate::core::model::LeadScore::Hot)),
        );
        stat_card(
            ui,
            "Conversion rate",
            &format!("{:.1}%", stats.conversion_rate),
            None,
        );
        stat_card(
            ui,
            "Follow-ups today",
            &stats.follow_ups_today.to_string(),
            None,
        );
        stat_card(
            ui,
            "Overdue follow-ups",
            &stats.overdue_follow_ups.to_string(),
            overdue_accent,
        );
        stat_card(
            ui,
            "Admissions this month",
            &stats.admissions_this_month.to_string(),
            None,
        );
        stat_card(
            ui,
            "Revenue this month",
            &format_amount(stats.revenue_this_month, symbol),
            None,
        );
    });

    ui.add_space(12.0);
    let mut clicked_lead: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.label(RichText::new("Agent Performance").strong());
            egui::Grid::new("agent_performance")
                .striped(true)
                .num_columns(6)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for title in [
                        "Agent",
                        "Leads",
                        "Conversions",
                        "Rate",
                        "Avg response",
                        "Today",
                    ] {
                        ui.label(RichText::new(title).small().weak());
                    }
                    ui.end_row();

                    for row in agent_performance(&state.snapshot, clock) {
                        ui.label(&row.agent_name);
                        ui.label(row.total_leads.to_string());
                        ui.label(row.conversions.to_string());
                        ui.label(
                            RichText::new(format!("{:.1}%", row.conversion_rate))
                                .color(theme::performance_colour(row.tier())),
                        );
                        ui.label(
                            row.avg_response_minutes
                                .map(|m| format!("{m} min"))
                                .unwrap_or_else(|| "-".to_string()),
                        );
                        ui.label(row.activities_today.to_string());
                        ui.end_row();
                    }
                });

            ui.add_space(12.0);
            ui.label(RichText::new("Recent Activities").strong());
            let recent = recent_activities(&state.snapshot, state.settings.recent_activity_limit);
            if recent.is_empty() {
                ui.label(RichText::new("No activity recorded yet.").weak());
            }
            for item in recent {
                ui.horizontal(|ui| {
                    let kind = item.activity.activity_type;
                    ui.label(RichText::new(kind.label()).color(theme::activity_colour(kind)));
                    if crate::ui::panels::lead_link(ui, item.lead_name) {
                        clicked_lead = Some(item.activity.lead_id.clone());
                    }
                    ui.label(&item.activity.description);
                    ui.label(
                        RichText::new(format!(
                            "{} \u{00b7} {}",
                            item.agent_name,
                            time_ago(item.activity.created_at, clock)
                        ))
                        .small()
                        .weak(),
                    );
                });
            }
        });

    if let Some(id) = clicked_lead {
        state.select_lead(&id);
    }
}
