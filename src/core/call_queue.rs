// LeadDesk - core/call_queue.rs
//
// Call-priority derivation: which leads need a call, and in what order.
// Core layer: pure function of (leads, clock, policy).

use crate::core::clock::Clock;
use crate::core::model::{Activity, ActivityType, Lead, LeadScore, PipelineStage};
use crate::util::constants;

/// Tunables for call selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    /// A lead qualifies once more than this many hours have passed since contact.
    pub stale_contact_hours: i64,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            stale_contact_hours: constants::DEFAULT_STALE_CONTACT_HOURS,
        }
    }
}

/// Leads awaiting a call, sorted by priority and partitioned by score.
#[derive(Debug, Clone, Default)]
pub struct CallQueue<'a> {
    /// All qualifying leads, hottest and longest-uncontacted first.
    pub sorted: Vec<&'a Lead>,
    pub hot: Vec<&'a Lead>,
    pub warm: Vec<&'a Lead>,
    pub cold: Vec<&'a Lead>,
}

impl<'a> CallQueue<'a> {
    /// Total number of pending calls.
    pub fn pending(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The partition for one score bucket.
    pub fn partition(&self, score: LeadScore) -> &[&'a Lead] {
        match score {
            LeadScore::Hot => &self.hot,
            LeadScore::Warm => &self.warm,
            LeadScore::Cold => &self.cold,
        }
    }
}

/// Hours since the lead was last contacted, or `NEVER_CONTACTED_HOURS`.
pub fn hours_since_contact(lead: &Lead, clock: &Clock) -> i64 {
    lead.last_contacted_at
        .map(|ts| clock.hours_since(ts))
        .unwrap_or(constants::NEVER_CONTACTED_HOURS)
}

/// Selection predicate: new prospects always, open leads once contact is stale.
pub fn needs_call(lead: &Lead, clock: &Clock, policy: &CallPolicy) -> bool {
    lead.stage == PipelineStage::NewProspect
        || (!lead.stage.is_closed()
            && hours_since_contact(lead, clock) > policy.stale_contact_hours)
}

/// Build the call queue.
///
/// Ordering is a stable sort on (score rank, last contact in ms) with a
/// missing last contact treated as the epoch, so never-contacted leads lead
/// their bucket. Ties keep input order.
pub fn build_call_queue<'a>(
    leads: &'a [Lead],
    clock: &Clock,
    policy: &CallPolicy,
) -> CallQueue<'a> {
    let mut sorted: Vec<&Lead> = leads
        .iter()
        .filter(|lead| needs_call(lead, clock, policy))
        .collect();

    sorted.sort_by_key(|lead| {
        (
            lead.score.rank(),
            lead.last_contacted_at
                .map(|ts| ts.timestamp_millis())
                .unwrap_or(0),
        )
    });

    let by_score = |score: LeadScore| -> Vec<&'a Lead> {
        sorted
            .iter()
            .copied()
            .filter(|l| l.score == score)
            .collect()
    };
    let hot = by_score(LeadScore::Hot);
    let warm = by_score(LeadScore::Warm);
    let cold = by_score(LeadScore::Cold);

    tracing::debug!(
        pending = sorted.len(),
        hot = hot.len(),
        warm = warm.len(),
        cold = cold.len(),
        "Call queue built"
    );

    CallQueue {
        sorted,
        hot,
        warm,
        cold,
    }
}

/// Calls logged today (local calendar day), for the daily-target read-out.
pub fn calls_completed_today(activities: &[Activity], clock: &Clock) -> usize {
    activities
        .iter()
        .filter(|a| a.activity_type == ActivityType::Call && clock.is_today(a.created_at))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository::fixtures::{make_activity, make_lead, reference_now};
    use chrono::Duration;

    fn clock() -> Clock {
        Clock::utc(reference_now())
    }

    fn contacted(mut lead: Lead, hours_ago: i64) -> Lead {
        lead.last_contacted_at = Some(reference_now() - Duration::hours(hours_ago));
        lead
    }

    #[test]
    fn test_closed_stages_never_queued() {
        let leads = vec![
            make_lead("1", "A", PipelineStage::Admission, LeadScore::Hot),
            make_lead("2", "B", PipelineStage::NotQualified, LeadScore::Hot),
            make_lead("3", "C", PipelineStage::Interested, LeadScore::Hot),
        ];
        let queue = build_call_queue(&leads, &clock(), &CallPolicy::default());
        let ids: Vec<_> = queue.sorted.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_new_prospect_always_queued() {
        let leads = vec![contacted(
            make_lead("1", "A", PipelineStage::NewProspect, LeadScore::Cold),
            1,
        )];
        let queue = build_call_queue(&leads, &clock(), &CallPolicy::default());
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn test_recent_contact_excluded_until_threshold_passes() {
        let leads = vec![
            contacted(
                make_lead("1", "A", PipelineStage::Contacted, LeadScore::Warm),
                24,
            ),
            contacted(
                make_lead("2", "B", PipelineStage::Contacted, LeadScore::Warm),
                25,
            ),
        ];
        let queue = build_call_queue(&leads, &clock(), &CallPolicy::default());
        let ids: Vec<_> = queue.sorted.iter().map(|l| l.id.as_str()).collect();
        // Exactly 24 h is not "more than 24".
        assert_eq!(ids, vec!["2"]);

        let strict = CallPolicy {
            stale_contact_hours: 48,
        };
        assert!(build_call_queue(&leads, &clock(), &strict).is_empty());
    }

    #[test]
    fn test_score_buckets_ordered_hot_warm_cold() {
        let leads = vec![
            make_lead("c", "C", PipelineStage::Contacted, LeadScore::Cold),
            make_lead("w", "W", PipelineStage::Contacted, LeadScore::Warm),
            make_lead("h", "H", PipelineStage::Contacted, LeadScore::Hot),
            make_lead("w2", "W2", PipelineStage::Interested, LeadScore::Warm),
        ];
        let queue = build_call_queue(&leads, &clock(), &CallPolicy::default());
        let ranks: Vec<_> = queue.sorted.iter().map(|l| l.score.rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "ranks {ranks:?}");
        let warm_ids: Vec<_> = queue.warm.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(warm_ids, vec!["w", "w2"]);
    }

    #[test]
    fn test_never_contacted_sorts_before_recently_contacted() {
        // B was contacted 30 h ago so it still qualifies.
        let leads = vec![
            contacted(
                make_lead("B", "B", PipelineStage::Contacted, LeadScore::Hot),
                30,
            ),
            make_lead("A", "A", PipelineStage::Contacted, LeadScore::Hot),
        ];
        let queue = build_call_queue(&leads, &clock(), &CallPolicy::default());
        let ids: Vec<_> = queue.hot.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_never_contacted_hot_before_five_hours_ago_new_prospect() {
        // Both qualify via the new_prospect clause.
        let leads = vec![
            contacted(
                make_lead("B", "B", PipelineStage::NewProspect, LeadScore::Hot),
                5,
            ),
            make_lead("A", "A", PipelineStage::NewProspect, LeadScore::Hot),
        ];
        let queue = build_call_queue(&leads, &clock(), &CallPolicy::default());
        let ids: Vec<_> = queue.sorted.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_calls_completed_today_counts_only_calls() {
        let now = reference_now();
        let activities = vec![
            make_activity(
                "1",
                "L1",
                ActivityType::Call,
                now - Duration::hours(1),
                "a1",
            ),
            make_activity(
                "2",
                "L1",
                ActivityType::Whatsapp,
                now - Duration::hours(1),
                "a1",
            ),
            make_activity("3", "L2", ActivityType::Call, now - Duration::days(1), "a1"),
        ];
        assert_eq!(calls_completed_today(&activities, &clock()), 1);
    }
}
