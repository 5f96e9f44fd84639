// LeadDesk - ui/panels/analytics.rs
//
// Analytics view. Every figure is derived from the snapshot; proportions
// are drawn as progress bars rather than charts.

use crate::app::state::{DeskState, Tab};
use crate::core::analytics::{
    course_performance, daily_activity, funnel, lead_sources, weekly_trend,
};
use crate::core::clock::Clock;
use crate::core::format::format_amount;
use crate::ui::panels::view_header;
use crate::ui::theme;
use egui::RichText;

const BAR_WIDTH: f32 = 200.0;

fn section(ui: &mut egui::Ui, title: &str) {
    ui.add_space(10.0);
    ui.label(RichText::new(title).strong());
    ui.add_space(2.0);
}

fn fraction(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        part as f32 / whole as f32
    }
}

pub fn render(ui: &mut egui::Ui, state: &DeskState, clock: &Clock) {
    view_header(ui, Tab::Analytics);

    let leads = &state.snapshot.leads;
    let symbol = &state.settings.currency_symbol;

    egui::ScrollArea::vertical()
        .id_salt("analytics_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            section(ui, "Lead Sources");
            egui::Grid::new("sources_grid")
                .num_columns(3)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for share in lead_sources(leads) {
                        ui.label(&share.source);
                        ui.label(share.count.to_string());
                        ui.add(
                            egui::ProgressBar::new(share.percentage as f32 / 100.0)
                                .desired_width(BAR_WIDTH)
                                .text(format!("{:.1}%", share.percentage)),
                        );
                        ui.end_row();
                    }
                });

            section(ui, "Course Performance");
            let courses = course_performance(leads);
            if courses.is_empty() {
                ui.label(RichText::new("No admissions yet.").weak());
            }
            egui::Grid::new("courses_grid")
                .striped(true)
                .num_columns(3)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for row in &courses {
                        ui.label(&row.course);
                        ui.label(format!("{} admissions", row.admissions));
                        ui.label(format_amount(row.revenue, symbol));
                        ui.end_row();
                    }
                });

            section(ui, "Conversion Funnel");
            egui::Grid::new("funnel_grid")
                .num_columns(3)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for row in funnel(leads, &state.snapshot.stages) {
                        ui.label(RichText::new(&row.label).color(theme::stage_colour(row.stage)));
                        ui.label(row.count.to_string());
                        ui.add(
                            egui::ProgressBar::new(row.percentage as f32 / 100.0)
                                .desired_width(BAR_WIDTH)
                                .fill(theme::stage_colour(row.stage))
                                .text(format!("{}%", row.percentage)),
                        );
                        ui.end_row();
                    }
                });

            section(ui, "Weekly Trend");
            let weeks = weekly_trend(leads, clock, state.settings.trend_weeks);
            let busiest = weeks.iter().map(|w| w.leads).max().unwrap_or(0);
            egui::Grid::new("trend_grid")
                .num_columns(3)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for week in &weeks {
                        ui.label(&week.label);
                        ui.add(
                            egui::ProgressBar::new(fraction(week.leads, busiest))
                                .desired_width(BAR_WIDTH)
                                .text(format!("{} leads", week.leads)),
                        );
                        ui.label(format!("{} conversions", week.conversions));
                        ui.end_row();
                    }
                });

            section(ui, "Daily Activity (last 7 days)");
            egui::Grid::new("daily_grid")
                .striped(true)
                .num_columns(4)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for title in ["Day", "Calls", "WhatsApp", "Visits"] {
                        ui.label(RichText::new(title).small().weak());
                    }
                    ui.end_row();
                    for day in daily_activity(&state.snapshot.activities, clock) {
                        ui.label(day.label());
                        ui.label(day.calls.to_string());
                        ui.label(day.whatsapp.to_string());
                        ui.label(day.visits.to_string());
                        ui.end_row();
                    }
                });
        });
}
