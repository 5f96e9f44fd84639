// LeadDesk - core/repository.rs
//
// Read-only data provider abstraction.
// Every derivation takes its collections from a `CrmRepository` (or plain
// slices) rather than ambient state, so tests can inject fixtures directly.

use crate::core::model::{Activity, Agent, Lead, StageConfig, Target};
use crate::util::constants::{UNASSIGNED_LABEL, UNKNOWN_LABEL};
use chrono::{DateTime, Duration, Utc};

/// Snapshot-read contract over the CRM collections.
///
/// Implementations return the same slices for their whole lifetime: nothing
/// is inserted, updated, or removed after construction.
pub trait CrmRepository {
    fn leads(&self) -> &[Lead];
    fn agents(&self) -> &[Agent];
    fn activities(&self) -> &[Activity];
    fn stages(&self) -> &[StageConfig];
    fn targets(&self) -> &[Target];

    /// Linear lookup of a lead by id.
    fn lead(&self, id: &str) -> Option<&Lead> {
        self.leads().iter().find(|l| l.id == id)
    }

    /// Linear lookup of an agent by id.
    fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents().iter().find(|a| a.id == id)
    }

    /// Agent display name for a lead assignment ("Unassigned" when unresolved).
    fn agent_name(&self, id: &str) -> &str {
        self.agent(id)
            .map(|a| a.name.as_str())
            .unwrap_or(UNASSIGNED_LABEL)
    }

    /// Agent display name for an activity author ("Unknown" when unresolved).
    fn author_name(&self, id: &str) -> &str {
        self.agent(id)
            .map(|a| a.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Lead display name for an activity ("Unknown" when unresolved).
    fn lead_name(&self, id: &str) -> &str {
        self.lead(id)
            .map(|l| l.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Activities recorded against one lead, in stored order.
    fn activities_for(&self, lead_id: &str) -> Vec<&Activity> {
        self.activities()
            .iter()
            .filter(|a| a.lead_id == lead_id)
            .collect()
    }
}

/// Immutable in-memory dataset instance.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub leads: Vec<Lead>,
    pub agents: Vec<Agent>,
    pub activities: Vec<Activity>,
    pub stages: Vec<StageConfig>,
    pub targets: Vec<Target>,

    /// Reference instant the dataset's timestamps were authored against.
    /// Used by `rebased` to keep relative ages realistic.
    pub anchor: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Shift every instant so that `anchor` lands on `now`.
    ///
    /// Returns the snapshot unchanged when it has no anchor.
    pub fn rebased(mut self, now: DateTime<Utc>) -> Self {
        let Some(anchor) = self.anchor else {
            return self;
        };
        let delta: Duration = now - anchor;

        for lead in &mut self.leads {
            lead.created_at += delta;
            lead.updated_at += delta;
            lead.last_contacted_at = lead.last_contacted_at.map(|t| t + delta);
            lead.next_follow_up = lead.next_follow_up.map(|t| t + delta);
        }
        for activity in &mut self.activities {
            activity.created_at += delta;
        }
        self.anchor = Some(now);

        tracing::debug!(shift_secs = delta.num_seconds(), "Dataset rebased");
        self
    }
}

impl CrmRepository for Snapshot {
    fn leads(&self) -> &[Lead] {
        &self.leads
    }

    fn agents(&self) -> &[Agent] {
        &self.agents
    }

    fn activities(&self) -> &[Activity] {
        &self.activities
    }

    fn stages(&self) -> &[StageConfig] {
        &self.stages
    }

    fn targets(&self) -> &[Target] {
        &self.targets
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared builders for core unit tests.

    use super::*;
    use crate::core::model::{ActivityType, LeadScore, PipelineStage, Urgency, UserRole};
    use chrono::TimeZone;

    /// 2026-10-18 10:00:00 UTC: a mid-morning reference instant.
    pub fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap()
    }

    pub fn make_lead(id: &str, name: &str, stage: PipelineStage, score: LeadScore) -> Lead {
        let created = reference_now() - Duration::days(10);
        Lead {
            id: id.to_string(),
            name: name.to_string(),
            phone: format!("+880 1711-{:0>6}", id.len()),
            email: None,
            source: "Facebook".to_string(),
            stage,
            score,
            score_value: 50,
            assigned_to: "a1".to_string(),
            created_at: created,
            updated_at: created,
            last_contacted_at: None,
            next_follow_up: None,
            course: None,
            budget: None,
            is_decision_maker: false,
            urgency: Urgency::Medium,
            notes: None,
            tags: Vec::new(),
            reactivated: false,
            previous_stage: None,
        }
    }

    pub fn make_agent(id: &str, name: &str) -> Agent {
        Agent {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            role: UserRole::Agent,
            branch: Some("Dhaka Main".to_string()),
        }
    }

    pub fn make_activity(
        id: &str,
        lead_id: &str,
        activity_type: ActivityType,
        created_at: DateTime<Utc>,
        created_by: &str,
    ) -> Activity {
        Activity {
            id: id.to_string(),
            lead_id: lead_id.to_string(),
            activity_type,
            description: String::new(),
            outcome: None,
            duration_secs: None,
            created_at,
            created_by: created_by.to_string(),
            metadata: serde_json::Map::new(),
        }
    }

    pub fn make_snapshot(leads: Vec<Lead>) -> Snapshot {
        Snapshot {
            leads,
            agents: vec![
                make_agent("a1", "Rafiq Islam"),
                make_agent("a2", "Nadia Akter"),
            ],
            activities: Vec::new(),
            stages: StageConfig::defaults(),
            targets: Vec::new(),
            anchor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::core::model::{LeadScore, PipelineStage};

    #[test]
    fn test_unresolved_ids_use_placeholders() {
        let mut lead = make_lead("L1", "Ali Rahman", PipelineStage::Contacted, LeadScore::Hot);
        lead.assigned_to = "ghost".to_string();
        let snapshot = make_snapshot(vec![lead]);

        assert_eq!(snapshot.agent_name("ghost"), "Unassigned");
        assert_eq!(snapshot.author_name("ghost"), "Unknown");
        assert_eq!(snapshot.lead_name("L404"), "Unknown");
        assert_eq!(snapshot.agent_name("a2"), "Nadia Akter");
        assert_eq!(snapshot.lead_name("L1"), "Ali Rahman");
    }

    #[test]
    fn test_rebase_shifts_all_instants() {
        let mut lead = make_lead("L1", "Ali", PipelineStage::Contacted, LeadScore::Warm);
        let anchor = reference_now();
        lead.last_contacted_at = Some(anchor - Duration::hours(5));
        let mut snapshot = make_snapshot(vec![lead]);
        snapshot.anchor = Some(anchor);

        let later = anchor + Duration::days(3);
        let rebased = snapshot.rebased(later);
        let lead = &rebased.leads[0];
        assert_eq!(lead.last_contacted_at, Some(later - Duration::hours(5)));
        assert_eq!(lead.created_at, later - Duration::days(10));
        assert_eq!(rebased.anchor, Some(later));
    }

    #[test]
    fn test_rebase_without_anchor_is_identity() {
        let snapshot = make_snapshot(vec![make_lead(
            "L1",
            "Ali",
            PipelineStage::Contacted,
            LeadScore::Warm,
        )]);
        let before = snapshot.leads[0].created_at;
        let after = snapshot.rebased(reference_now() + Duration::days(30));
        assert_eq!(after.leads[0].created_at, before);
    }
}
