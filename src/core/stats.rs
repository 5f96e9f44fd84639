// LeadDesk - core/stats.rs
//
// Dashboard statistics: headline counters, per-agent performance, and the
// recent-activity feed.
// Core layer: pure functions over a `CrmRepository` and a `Clock`.

use crate::core::clock::Clock;
use crate::core::follow_up::FollowUpWindow;
use crate::core::model::{Activity, Lead, LeadScore, PipelineStage};
use crate::core::repository::CrmRepository;
use crate::util::constants;
use chrono::{DateTime, Utc};

/// Headline counters shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_leads: usize,
    pub new_leads_today: usize,
    pub hot_leads: usize,
    /// Admissions over total, as a percentage rounded to one decimal.
    pub conversion_rate: f64,
    pub follow_ups_today: usize,
    pub overdue_follow_ups: usize,
    pub admissions_this_month: usize,
    /// Sum of budgets over this month's admissions.
    pub revenue_this_month: u64,
}

/// Percentage rounded to one decimal place; 0 when `whole` is 0.
pub fn rate_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

fn follow_up_in(lead: &Lead, window: FollowUpWindow, clock: &Clock) -> bool {
    lead.next_follow_up
        .is_some_and(|ts| window.contains(ts, clock, constants::DEFAULT_UPCOMING_WINDOW_DAYS))
}

/// Compute the dashboard counters.
pub fn dashboard_stats(leads: &[Lead], clock: &Clock) -> DashboardStats {
    let admissions = leads
        .iter()
        .filter(|l| l.stage == PipelineStage::Admission)
        .count();

    let month_admissions: Vec<&Lead> = leads
        .iter()
        .filter(|l| l.stage == PipelineStage::Admission && clock.is_this_month(l.updated_at))
        .collect();

    DashboardStats {
        total_leads: leads.len(),
        new_leads_today: leads
            .iter()
            .filter(|l| clock.is_today(l.created_at))
            .count(),
        hot_leads: leads.iter().filter(|l| l.score == LeadScore::Hot).count(),
        conversion_rate: rate_percent(admissions, leads.len()),
        follow_ups_today: leads
            .iter()
            .filter(|l| follow_up_in(l, FollowUpWindow::Today, clock))
            .count(),
        overdue_follow_ups: leads
            .iter()
            .filter(|l| follow_up_in(l, FollowUpWindow::Overdue, clock))
            .count(),
        admissions_this_month: month_admissions.len(),
        revenue_this_month: month_admissions.iter().filter_map(|l| l.budget).sum(),
    }
}

// =============================================================================
// Agent performance
// =============================================================================

/// Colour band for an agent's conversion rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    Strong,
    Fair,
    Low,
}

impl PerformanceTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 35.0 {
            PerformanceTier::Strong
        } else if rate >= 25.0 {
            PerformanceTier::Fair
        } else {
            PerformanceTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentPerformance {
    pub agent_id: String,
    pub agent_name: String,
    pub total_leads: usize,
    pub conversions: usize,
    pub conversion_rate: f64,
    /// Mean minutes from lead creation to its first activity, over the
    /// agent's leads that have any activity.
    pub avg_response_minutes: Option<i64>,
    /// Activities authored by the agent today.
    pub activities_today: usize,
}

impl AgentPerformance {
    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_rate(self.conversion_rate)
    }
}

fn first_activity_at(activities: &[Activity], lead_id: &str) -> Option<DateTime<Utc>> {
    activities
        .iter()
        .filter(|a| a.lead_id == lead_id)
        .map(|a| a.created_at)
        .min()
}

/// Per-agent performance, best conversion rate first.
pub fn agent_performance<R: CrmRepository + ?Sized>(
    repo: &R,
    clock: &Clock,
) -> Vec<AgentPerformance> {
    let leads = repo.leads();
    let activities = repo.activities();

    let mut rows: Vec<AgentPerformance> = repo
        .agents()
        .iter()
        .map(|agent| {
            let owned: Vec<&Lead> = leads.iter().filter(|l| l.assigned_to == agent.id).collect();
            let conversions = owned
                .iter()
                .filter(|l| l.stage == PipelineStage::Admission)
                .count();

            let response_minutes: Vec<i64> = owned
                .iter()
                .filter_map(|l| {
                    first_activity_at(activities, &l.id)
                        .map(|first| (first - l.created_at).num_minutes().max(0))
                })
                .collect();
            let avg_response_minutes = if response_minutes.is_empty() {
                None
            } else {
                Some(response_minutes.iter().sum::<i64>() / response_minutes.len() as i64)
            };

            AgentPerformance {
                agent_id: agent.id.clone(),
                agent_name: agent.name.clone(),
                total_leads: owned.len(),
                conversions,
                conversion_rate: rate_percent(conversions, owned.len()),
                avg_response_minutes,
                activities_today: activities
                    .iter()
                    .filter(|a| a.created_by == agent.id && clock.is_today(a.created_at))
                    .count(),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.conversion_rate.total_cmp(&a.conversion_rate));
    rows
}

// =============================================================================
// Recent activity feed
// =============================================================================

/// One feed row with its ids resolved to display names.
#[derive(Debug, Clone)]
pub struct RecentActivity<'a> {
    pub activity: &'a Activity,
    pub lead_name: &'a str,
    pub agent_name: &'a str,
}

/// Newest activities first, truncated to `limit`.
pub fn recent_activities<R: CrmRepository + ?Sized>(
    repo: &R,
    limit: usize,
) -> Vec<RecentActivity<'_>> {
    let mut sorted: Vec<&Activity> = repo.activities().iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sorted
        .into_iter()
        .take(limit)
        .map(|activity| RecentActivity {
            activity,
            lead_name: repo.lead_name(&activity.lead_id),
            agent_name: repo.author_name(&activity.created_by),
        })
        .collect()
}
