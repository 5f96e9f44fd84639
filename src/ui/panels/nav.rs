// LeadDesk - ui/panels/nav.rs
//
// Left navigation sidebar: organisation header and one entry per view.
// Badges show pending calls and today's follow-ups.

use crate::app::state::{DeskState, Tab};
use crate::core::call_queue::build_call_queue;
use crate::core::clock::Clock;
use crate::core::follow_up::bucket_follow_ups;
use egui::RichText;

pub fn render(ui: &mut egui::Ui, state: &mut DeskState, clock: &Clock) {
    ui.add_space(6.0);
    ui.label(
        RichText::new(&state.settings.organisation_name)
            .strong()
            .size(16.0),
    );
    if let Some(ref branch) = state.settings.branch {
        ui.label(RichText::new(branch).weak());
    }
    ui.add_space(6.0);
    ui.separator();

    let pending_calls =
        build_call_queue(&state.snapshot.leads, clock, &state.settings.call_policy).pending();
    let buckets = bucket_follow_ups(
        &state.snapshot.leads,
        clock,
        state.settings.upcoming_window_days,
    );
    let due_now = buckets.overdue.len() + buckets.today.len();

    for tab in Tab::all() {
        let badge = match tab {
            Tab::Calls if pending_calls > 0 => format!("  ({pending_calls})"),
            Tab::FollowUps if due_now > 0 => format!("  ({due_now})"),
            _ => String::new(),
        };
        let selected = state.active_tab == *tab;
        if ui
            .selectable_label(selected, format!("{}{badge}", tab.label()))
            .clicked()
            && !selected
        {
            tracing::debug!(view = tab.label(), "View changed");
            state.active_tab = *tab;
        }
    }
}
