// LeadDesk - core/follow_up.rs
//
// Follow-up bucketing relative to the current moment.
// Core layer: pure function of (leads, clock, window).
//
// Each bucket filters the "has a follow-up" set independently; there is no
// if/else ladder. The Tomorrow and This Week windows overlap (a follow-up
// tomorrow evening is both on the next calendar day and more than 24 h away),
// so one lead may be listed twice. Follow-ups beyond the window land nowhere.

use crate::core::clock::Clock;
use crate::core::model::Lead;
use crate::util::constants;
use chrono::{DateTime, Utc};

/// The four follow-up windows. Each keeps input order.
#[derive(Debug, Clone, Default)]
pub struct FollowUpBuckets<'a> {
    pub overdue: Vec<&'a Lead>,
    pub today: Vec<&'a Lead>,
    pub tomorrow: Vec<&'a Lead>,
    pub this_week: Vec<&'a Lead>,
    /// Number of leads that have any follow-up scheduled.
    pub scheduled: usize,
    /// Scheduled leads that fall in no window (beyond the week horizon).
    pub unplaced: usize,
}

impl<'a> FollowUpBuckets<'a> {
    /// Sum of bucket sizes. Exceeds `scheduled - unplaced` when buckets overlap.
    pub fn total_placements(&self) -> usize {
        self.overdue.len() + self.today.len() + self.tomorrow.len() + self.this_week.len()
    }

    /// Titled view of the buckets in display order.
    pub fn sections(&self) -> [(FollowUpWindow, &[&'a Lead]); 4] {
        [
            (FollowUpWindow::Overdue, self.overdue.as_slice()),
            (FollowUpWindow::Today, self.today.as_slice()),
            (FollowUpWindow::Tomorrow, self.tomorrow.as_slice()),
            (FollowUpWindow::ThisWeek, self.this_week.as_slice()),
        ]
    }
}

/// Identifies one follow-up bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowUpWindow {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
}

impl FollowUpWindow {
    pub fn label(&self) -> &'static str {
        match self {
            FollowUpWindow::Overdue => "Overdue",
            FollowUpWindow::Today => "Today",
            FollowUpWindow::Tomorrow => "Tomorrow",
            FollowUpWindow::ThisWeek => "This Week",
        }
    }

    /// Whether a follow-up instant belongs to this window.
    pub fn contains(&self, ts: DateTime<Utc>, clock: &Clock, window_days: i64) -> bool {
        match self {
            FollowUpWindow::Overdue => clock.is_past(ts) && !clock.is_today(ts),
            FollowUpWindow::Today => clock.is_today(ts),
            FollowUpWindow::Tomorrow => clock.is_tomorrow(ts),
            FollowUpWindow::ThisWeek => {
                ts > clock.days_from_now(1) && ts <= clock.days_from_now(window_days)
            }
        }
    }
}

/// Partition leads with a follow-up into the four windows.
///
/// `window_days` is the far edge of "This Week" (default 7).
pub fn bucket_follow_ups<'a>(
    leads: &'a [Lead],
    clock: &Clock,
    window_days: i64,
) -> FollowUpBuckets<'a> {
    let scheduled: Vec<(&Lead, DateTime<Utc>)> = leads
        .iter()
        .filter_map(|lead| lead.next_follow_up.map(|ts| (lead, ts)))
        .collect();

    let select = |window: FollowUpWindow| -> Vec<&'a Lead> {
        scheduled
            .iter()
            .filter(|(_, ts)| window.contains(*ts, clock, window_days))
            .map(|(lead, _)| *lead)
            .collect()
    };

    let windows = [
        FollowUpWindow::Overdue,
        FollowUpWindow::Today,
        FollowUpWindow::Tomorrow,
        FollowUpWindow::ThisWeek,
    ];
    let unplaced = scheduled
        .iter()
        .filter(|(_, ts)| !windows.iter().any(|w| w.contains(*ts, clock, window_days)))
        .count();

    let buckets = FollowUpBuckets {
        overdue: select(FollowUpWindow::Overdue),
        today: select(FollowUpWindow::Today),
        tomorrow: select(FollowUpWindow::Tomorrow),
        this_week: select(FollowUpWindow::ThisWeek),
        scheduled: scheduled.len(),
        unplaced,
    };

    tracing::debug!(
        scheduled = buckets.scheduled,
        overdue = buckets.overdue.len(),
        today = buckets.today.len(),
        tomorrow = buckets.tomorrow.len(),
        this_week = buckets.this_week.len(),
        unplaced = buckets.unplaced,
        "Follow-ups bucketed"
    );

    buckets
}

/// Bucket with the default seven-day window.
pub fn bucket_follow_ups_default<'a>(leads: &'a [Lead], clock: &Clock) -> FollowUpBuckets<'a> {
    bucket_follow_ups(leads, clock, constants::DEFAULT_UPCOMING_WINDOW_DAYS)
}
