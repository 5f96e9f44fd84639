// LeadDesk - app/report.rs
//
// Plain-text renderings of each view for `--print` (headless) mode.
// Every report is a pure function of the state and a pinned clock.

use crate::app::state::DeskState;
use crate::core::analytics;
use crate::core::call_queue::{build_call_queue, calls_completed_today, hours_since_contact};
use crate::core::clock::Clock;
use crate::core::follow_up::bucket_follow_ups;
use crate::core::format::{date_time, format_amount, format_compact_amount, time_ago};
use crate::core::model::{stage_label, Lead, LeadScore, Target};
use crate::core::pipeline::{pipeline_columns, unstaged_leads};
use crate::core::stats::{agent_performance, dashboard_stats, recent_activities};
use crate::core::targets;
use crate::util::constants::OTHER_STAGE_LABEL;
use std::fmt::Write;

/// Views that can be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    Calls,
    FollowUps,
    Leads,
    Pipeline,
    Dashboard,
    Analytics,
    Targets,
}

impl std::str::FromStr for ReportView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "calls" => Ok(ReportView::Calls),
            "follow-ups" | "followups" => Ok(ReportView::FollowUps),
            "leads" => Ok(ReportView::Leads),
            "pipeline" => Ok(ReportView::Pipeline),
            "dashboard" => Ok(ReportView::Dashboard),
            "analytics" => Ok(ReportView::Analytics),
            "targets" => Ok(ReportView::Targets),
            _ => Err(format!(
                "unknown view '{s}' (expected calls, follow-ups, leads, pipeline, dashboard, analytics, targets)"
            )),
        }
    }
}

/// Render one view as text.
pub fn render(view: ReportView, state: &DeskState, clock: &Clock) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = match view {
        ReportView::Calls => write_calls(&mut out, state, clock),
        ReportView::FollowUps => write_follow_ups(&mut out, state, clock),
        ReportView::Leads => write_leads(&mut out, state, clock),
        ReportView::Pipeline => write_pipeline(&mut out, state),
        ReportView::Dashboard => write_dashboard(&mut out, state, clock),
        ReportView::Analytics => write_analytics(&mut out, state, clock),
        ReportView::Targets => write_targets(&mut out, state),
    };
    out
}

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

fn write_calls(out: &mut String, state: &DeskState, clock: &Clock) -> std::fmt::Result {
    let leads = &state.snapshot.leads;
    let queue = build_call_queue(leads, clock, &state.settings.call_policy);
    let done = calls_completed_today(&state.snapshot.activities, clock);

    heading(out, "Call Queue")?;
    writeln!(
        out,
        "{} pending | {} of {} calls done today",
        queue.pending(),
        done,
        state.settings.daily_call_target
    )?;
    for score in LeadScore::all() {
        let part = queue.partition(*score);
        writeln!(out, "\n{} ({})", score.label(), part.len())?;
        for lead in part {
            let contact = match lead.last_contacted_at {
                Some(ts) => format!("last contact {}", time_ago(ts, clock)),
                None => "never contacted".to_string(),
            };
            writeln!(
                out,
                "  {:<6} {:<22} {:<16} {:>4}h  {}",
                lead.id,
                lead.name,
                stage_label(&state.snapshot.stages, lead.stage),
                hours_since_contact(lead, clock),
                contact
            )?;
        }
    }
    Ok(())
}

fn write_follow_ups(out: &mut String, state: &DeskState, clock: &Clock) -> std::fmt::Result {
    let buckets = bucket_follow_ups(
        &state.snapshot.leads,
        clock,
        state.settings.upcoming_window_days,
    );

    heading(out, "Follow-ups")?;
    writeln!(
        out,
        "{} scheduled | {} beyond {} days",
        buckets.scheduled, buckets.unplaced, state.settings.upcoming_window_days
    )?;
    for (window, leads) in buckets.sections() {
        writeln!(out, "\n{} ({})", window.label(), leads.len())?;
        for lead in leads {
            let due = lead
                .next_follow_up
                .map(|ts| date_time(ts, clock))
                .unwrap_or_default();
            writeln!(
                out,
                "  {:<6} {:<22} {:<5} {}  ({})",
                lead.id,
                lead.name,
                lead.score.label(),
                due,
                state.agent_name(&lead.assigned_to)
            )?;
        }
    }
    Ok(())
}

fn write_leads(out: &mut String, state: &DeskState, clock: &Clock) -> std::fmt::Result {
    heading(out, "All Leads")?;
    writeln!(
        out,
        "Showing {} of {} | sorted by {} {}",
        state.table.shown,
        state.table.total,
        state.sort.key.label(),
        state.sort.direction.label()
    )?;
    writeln!(
        out,
        "\n  {:<6} {:<22} {:<18} {:<16} {:<5} {:>5}  {:<18} {}",
        "ID", "Name", "Phone", "Stage", "Score", "Value", "Agent", "Created"
    )?;
    for lead in state.visible_leads() {
        writeln!(
            out,
            "  {:<6} {:<22} {:<18} {:<16} {:<5} {:>5}  {:<18} {}",
            lead.id,
            lead.name,
            lead.phone,
            stage_label(&state.snapshot.stages, lead.stage),
            lead.score.label(),
            lead.score_value,
            state.agent_name(&lead.assigned_to),
            time_ago(lead.created_at, clock)
        )?;
    }
    Ok(())
}

fn write_pipeline(out: &mut String, state: &DeskState) -> std::fmt::Result {
    heading(out, "Pipeline")?;
    for column in pipeline_columns(&state.snapshot.leads, &state.snapshot.stages) {
        writeln!(out, "\n{} ({})", column.stage.label, column.leads.len())?;
        for lead in column.leads {
            write_board_row(out, lead)?;
        }
    }
    let unstaged = unstaged_leads(&state.snapshot.leads, &state.snapshot.stages);
    if !unstaged.is_empty() {
        writeln!(out, "\n{} ({})", OTHER_STAGE_LABEL, unstaged.len())?;
        for lead in unstaged {
            write_board_row(out, lead)?;
        }
    }
    Ok(())
}

fn write_board_row(out: &mut String, lead: &Lead) -> std::fmt::Result {
    writeln!(
        out,
        "  {:<6} {:<22} {}",
        lead.id,
        lead.name,
        lead.score.label()
    )
}

fn write_dashboard(out: &mut String, state: &DeskState, clock: &Clock) -> std::fmt::Result {
    let symbol = &state.settings.currency_symbol;
    let stats = dashboard_stats(&state.snapshot.leads, clock);

    heading(out, "Dashboard")?;
    writeln!(out, "Total leads          {}", stats.total_leads)?;
    writeln!(out, "New today            {}", stats.new_leads_today)?;
    writeln!(out, "Hot leads            {}", stats.hot_leads)?;
    writeln!(out, "Conversion rate      {:.1}%", stats.conversion_rate)?;
    writeln!(out, "Follow-ups today     {}", stats.follow_ups_today)?;
    writeln!(out, "Overdue follow-ups   {}", stats.overdue_follow_ups)?;
    writeln!(out, "Admissions (month)   {}", stats.admissions_this_month)?;
    writeln!(
        out,
        "Revenue (month)      {}",
        format_amount(stats.revenue_this_month, symbol)
    )?;

    writeln!(out, "\nAgent Performance")?;
    for row in agent_performance(&state.snapshot, clock) {
        let response = row
            .avg_response_minutes
            .map(|m| format!("{m} min"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "  {:<20} {:>5.1}%  {:>2}/{:<3} leads  response {:<8} today {}",
            row.agent_name,
            row.conversion_rate,
            row.conversions,
            row.total_leads,
            response,
            row.activities_today
        )?;
    }

    writeln!(out, "\nRecent Activities")?;
    for item in recent_activities(&state.snapshot, state.settings.recent_activity_limit) {
        writeln!(
            out,
            "  {:<8} {:<9} {:<22} by {:<18} {}",
            time_ago(item.activity.created_at, clock),
            item.activity.activity_type.label(),
            item.lead_name,
            item.agent_name,
            item.activity.description
        )?;
    }
    Ok(())
}

fn write_analytics(out: &mut String, state: &DeskState, clock: &Clock) -> std::fmt::Result {
    let leads = &state.snapshot.leads;
    let symbol = &state.settings.currency_symbol;

    heading(out, "Analytics")?;

    writeln!(out, "\nLead Sources")?;
    for share in analytics::lead_sources(leads) {
        writeln!(
            out,
            "  {:<14} {:>4}  {:>5.1}%",
            share.source,
            share.count,
            share.percentage
        )?;
    }

    writeln!(out, "\nCourse Performance")?;
    for row in analytics::course_performance(leads) {
        writeln!(
            out,
            "  {:<20} {:>3} admissions  {}",
            row.course,
            row.admissions,
            format_amount(row.revenue, symbol)
        )?;
    }

    writeln!(out, "\nConversion Funnel")?;
    for row in analytics::funnel(leads, &state.snapshot.stages) {
        writeln!(
            out,
            "  {:<16} {:>4}  {:>3}%",
            row.label,
            row.count,
            row.percentage
        )?;
    }

    writeln!(out, "\nWeekly Trend")?;
    for week in analytics::weekly_trend(leads, clock, state.settings.trend_weeks) {
        writeln!(
            out,
            "  {:<8} {:>3} leads  {:>3} conversions",
            week.label,
            week.leads,
            week.conversions
        )?;
    }

    writeln!(out, "\nDaily Activity (last 7 days)")?;
    for day in analytics::daily_activity(&state.snapshot.activities, clock) {
        writeln!(
            out,
            "  {:<4} calls {:>3}  whatsapp {:>3}  visits {:>3}",
            day.label(),
            day.calls,
            day.whatsapp,
            day.visits
        )?;
    }
    Ok(())
}

/// "18" or "৳288K" depending on the target's unit.
pub fn target_value(target: &Target, value: u64, symbol: &str) -> String {
    if targets::is_currency(target) {
        format_compact_amount(value, symbol)
    } else {
        value.to_string()
    }
}

fn write_targets(out: &mut String, state: &DeskState) -> std::fmt::Result {
    let symbol = &state.settings.currency_symbol;
    let list = &state.snapshot.targets;

    heading(out, "Targets")?;
    writeln!(out, "Overall progress {}%", targets::overall_progress(list))?;
    for target in list {
        let trend = target.trend.map(|t| format!("{t:+}%")).unwrap_or_default();
        writeln!(
            out,
            "  {:<18} {:<8} {:>8} / {:<8} {:>4}%  {:<9} {}",
            target.name,
            target.period.label(),
            target_value(target, target.current, symbol),
            target_value(target, target.target, symbol),
            targets::percentage(target),
            targets::tier(target).label(),
            trend
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::DeskSettings;
    use crate::core::filter::SortKey;
    use crate::core::model::PipelineStage;
    use crate::core::repository::fixtures::{make_lead, make_snapshot, reference_now};

    fn make_state() -> DeskState {
        let mut hot = make_lead(
            "L1",
            "Ali Rahman",
            PipelineStage::NewProspect,
            LeadScore::Hot,
        );
        hot.next_follow_up = Some(reference_now() + chrono::Duration::minutes(30));
        let closed = make_lead("L2", "Karim", PipelineStage::Admission, LeadScore::Hot);
        DeskState::new(
            make_snapshot(vec![hot, closed]),
            "test".to_string(),
            DeskSettings::default(),
            false,
        )
    }

    #[test]
    fn test_calls_report_lists_only_open_leads() {
        let text = render(
            ReportView::Calls,
            &make_state(),
            &Clock::utc(reference_now()),
        );
        assert!(text.starts_with("Call Queue\n"));
        assert!(text.contains("1 pending"));
        assert!(text.contains("Ali Rahman"));
        assert!(!text.contains("Karim"));
    }

    #[test]
    fn test_follow_ups_report_sections() {
        let text = render(
            ReportView::FollowUps,
            &make_state(),
            &Clock::utc(reference_now()),
        );
        assert!(text.contains("Today (1)"));
        assert!(text.contains("Overdue (0)"));
        assert!(text.contains("Rafiq Islam"));
    }

    #[test]
    fn test_every_view_renders() {
        let state = make_state();
        let clock = Clock::utc(reference_now());
        for view in [
            "calls",
            "follow-ups",
            "leads",
            "pipeline",
            "dashboard",
            "analytics",
            "targets",
        ] {
            let view: ReportView = view.parse().unwrap();
            assert!(!render(view, &state, &clock).is_empty());
        }
        assert!("inbox".parse::<ReportView>().is_err());
    }

    #[test]
    fn test_rows_use_configured_stage_labels() {
        let mut state = make_state();
        for stage in state.snapshot.stages.iter_mut() {
            if stage.id == PipelineStage::NewProspect {
                stage.label = "Fresh Enquiry".to_string();
            }
        }
        let clock = Clock::utc(reference_now());
        let calls = render(ReportView::Calls, &state, &clock);
        assert!(calls.contains("Fresh Enquiry"));
        assert!(!calls.contains("New Prospect"));
        let leads = render(ReportView::Leads, &state, &clock);
        assert!(leads.contains("Fresh Enquiry"));
    }

    #[test]
    fn test_leads_header_spells_out_direction() {
        let mut state = make_state();
        let clock = Clock::utc(reference_now());
        let text = render(ReportView::Leads, &state, &clock);
        assert!(text.contains("sorted by Created descending"));
        assert!(!text.contains("Desc"));

        state.toggle_sort(SortKey::CreatedAt);
        let text = render(ReportView::Leads, &state, &clock);
        assert!(text.contains("sorted by Created ascending"));
    }

    #[test]
    fn test_pipeline_report_keeps_leads_outside_the_stage_table() {
        let mut state = make_state();
        state
            .snapshot
            .stages
            .retain(|s| s.id != PipelineStage::Admission);
        let text = render(ReportView::Pipeline, &state, &Clock::utc(reference_now()));
        assert!(text.contains("Other (1)"));
        assert!(text.contains("Karim"));

        let full = render(
            ReportView::Pipeline,
            &make_state(),
            &Clock::utc(reference_now()),
        );
        assert!(!full.contains("Other ("));
    }
}
