// LeadDesk - core/analytics.rs
//
// Analytics breakdowns computed from the snapshot: lead sources, course
// performance, the cumulative funnel, weekly trend, and weekday activity.
// Core layer: pure functions.

use crate::core::clock::Clock;
use crate::core::model::{stage_order, Activity, ActivityType, Lead, PipelineStage, StageConfig};
use crate::core::stats::rate_percent;
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SourceShare {
    pub source: String,
    pub count: usize,
    /// Share of all leads, one decimal.
    pub percentage: f64,
}

/// Lead count per acquisition source, largest first, ties by name.
/// An empty source is reported as "Unknown".
pub fn lead_sources(leads: &[Lead]) -> Vec<SourceShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for lead in leads {
        let source = if lead.source.trim().is_empty() {
            crate::util::constants::UNKNOWN_LABEL
        } else {
            lead.source.as_str()
        };
        *counts.entry(source).or_insert(0) += 1;
    }

    let mut shares: Vec<SourceShare> = counts
        .into_iter()
        .map(|(source, count)| SourceShare {
            source: source.to_string(),
            count,
            percentage: rate_percent(count, leads.len()),
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    shares
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePerformance {
    pub course: String,
    pub admissions: usize,
    pub revenue: u64,
}

/// Admissions and budget revenue per course, most admissions first.
/// Only leads in the admission stage with a course count.
pub fn course_performance(leads: &[Lead]) -> Vec<CoursePerformance> {
    let mut rows: Vec<CoursePerformance> = Vec::new();
    for lead in leads.iter().filter(|l| l.stage == PipelineStage::Admission) {
        let Some(course) = lead.course.as_deref() else {
            continue;
        };
        let revenue = lead.budget.unwrap_or(0);
        match rows.iter_mut().find(|r| r.course == course) {
            Some(row) => {
                row.admissions += 1;
                row.revenue += revenue;
            }
            None => rows.push(CoursePerformance {
                course: course.to_string(),
                admissions: 1,
                revenue,
            }),
        }
    }
    rows.sort_by(|a, b| b.admissions.cmp(&a.admissions));
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelRow {
    pub stage: PipelineStage,
    pub label: String,
    /// Leads that reached at least this stage.
    pub count: usize,
    /// Relative to the first row, rounded to a whole percent.
    pub percentage: u32,
}

/// Cumulative funnel over configured stages (not_qualified excluded).
pub fn funnel(leads: &[Lead], stages: &[StageConfig]) -> Vec<FunnelRow> {
    let mut ordered: Vec<&StageConfig> = stages
        .iter()
        .filter(|s| s.id != PipelineStage::NotQualified)
        .collect();
    ordered.sort_by_key(|s| s.order);

    let active: Vec<u32> = leads
        .iter()
        .filter(|l| l.stage != PipelineStage::NotQualified)
        .map(|l| stage_order(stages, l.stage))
        .collect();

    let counts: Vec<usize> = ordered
        .iter()
        .map(|s| active.iter().filter(|&&o| o >= s.order).count())
        .collect();
    let first = counts.first().copied().unwrap_or(0);

    ordered
        .iter()
        .zip(counts)
        .map(|(s, count)| FunnelRow {
            stage: s.id,
            label: s.label.clone(),
            count,
            percentage: if first == 0 {
                0
            } else {
                (count as f64 / first as f64 * 100.0).round() as u32
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekTrend {
    pub label: String,
    pub leads: usize,
    pub conversions: usize,
}

/// `weeks` consecutive seven-day windows ending at now, oldest first.
///
/// Window i spans (start, start + 7d]. Conversions are admission leads whose
/// `updated_at` falls in the window.
pub fn weekly_trend(leads: &[Lead], clock: &Clock, weeks: u32) -> Vec<WeekTrend> {
    let now = clock.now();
    (0..weeks)
        .map(|i| {
            let back = i64::from(weeks - i);
            let start = now - Duration::days(7 * back);
            let end = start + Duration::days(7);
            let in_window = |ts: DateTime<Utc>| ts > start && ts <= end;
            WeekTrend {
                label: format!("Week {}", i + 1),
                leads: leads.iter().filter(|l| in_window(l.created_at)).count(),
                conversions: leads
                    .iter()
                    .filter(|l| l.stage == PipelineStage::Admission && in_window(l.updated_at))
                    .count(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayActivity {
    pub day: Weekday,
    pub calls: usize,
    pub whatsapp: usize,
    pub visits: usize,
}

impl DayActivity {
    pub fn label(&self) -> String {
        self.day.to_string()
    }
}

/// Calls, WhatsApp messages, and visits per local weekday (Mon..Sun) over
/// the trailing seven days.
pub fn daily_activity(activities: &[Activity], clock: &Clock) -> Vec<DayActivity> {
    let now = clock.now();
    let since = clock.days_from_now(-7);

    let mut days: Vec<DayActivity> = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .map(|day| DayActivity {
        day,
        calls: 0,
        whatsapp: 0,
        visits: 0,
    })
    .collect();

    for activity in activities
        .iter()
        .filter(|a| a.created_at > since && a.created_at <= now)
    {
        let idx = clock
            .local_date(activity.created_at)
            .weekday()
            .num_days_from_monday() as usize;
        let Some(day) = days.get_mut(idx) else {
            continue;
        };
        match activity.activity_type {
            ActivityType::Call => day.calls += 1,
            ActivityType::Whatsapp => day.whatsapp += 1,
            ActivityType::Visit => day.visits += 1,
            _ => {}
        }
    }
    days
}
