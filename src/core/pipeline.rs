// LeadDesk - core/pipeline.rs
//
// Pipeline board columns and per-lead detail with stage progress.
// Core layer: pure functions over a `CrmRepository`.

use crate::core::model::{stage_order, Activity, Agent, Lead, PipelineStage, StageConfig};
use crate::core::repository::CrmRepository;

/// One board column: a stage and the leads currently in it.
#[derive(Debug, Clone)]
pub struct PipelineColumn<'a> {
    pub stage: &'a StageConfig,
    pub leads: Vec<&'a Lead>,
}

/// Build board columns from the configured stages, sorted by `order`.
///
/// Leads inside a column keep input order. Stages with equal order keep
/// their configured position. A lead whose stage has no configured entry
/// lands in no column; see `unstaged_leads`.
pub fn pipeline_columns<'a>(
    leads: &'a [Lead],
    stages: &'a [StageConfig],
) -> Vec<PipelineColumn<'a>> {
    let mut ordered: Vec<&StageConfig> = stages.iter().collect();
    ordered.sort_by_key(|s| s.order);

    ordered
        .into_iter()
        .map(|stage| PipelineColumn {
            stage,
            leads: leads.iter().filter(|l| l.stage == stage.id).collect(),
        })
        .collect()
}

/// Leads whose stage is missing from a partial stage table, in input order.
///
/// The board shows these in a trailing "Other" column so every lead counted
/// by the table also appears on the board.
pub fn unstaged_leads<'a>(leads: &'a [Lead], stages: &[StageConfig]) -> Vec<&'a Lead> {
    leads
        .iter()
        .filter(|l| !stages.iter().any(|s| s.id == l.stage))
        .collect()
}

/// One cell in the stage-progress strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSegment {
    pub stage: PipelineStage,
    pub label: String,
    pub filled: bool,
}

/// Everything the detail panel shows for one lead.
#[derive(Debug, Clone)]
pub struct LeadDetail<'a> {
    pub lead: &'a Lead,
    /// None when `assigned_to` does not resolve.
    pub agent: Option<&'a Agent>,
    pub activities: Vec<&'a Activity>,
    /// None when the lead's stage is missing from the stage table.
    pub stage: Option<&'a StageConfig>,
    pub progress: Vec<StageSegment>,
}

impl<'a> LeadDetail<'a> {
    pub fn agent_label(&self) -> &str {
        self.agent
            .map(|a| a.name.as_str())
            .unwrap_or(crate::util::constants::UNASSIGNED_LABEL)
    }
}

/// Stage-progress strip for a lead currently in `current`.
///
/// Every configured stage except `not_qualified`, by order. Segment `i`
/// (zero-based) is filled when `i < order(current)`, so a lead in a stage
/// with no configured order shows an empty strip.
pub fn stage_progress(stages: &[StageConfig], current: PipelineStage) -> Vec<StageSegment> {
    let current_order = stage_order(stages, current) as usize;

    let mut ordered: Vec<&StageConfig> = stages
        .iter()
        .filter(|s| s.id != PipelineStage::NotQualified)
        .collect();
    ordered.sort_by_key(|s| s.order);

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, s)| StageSegment {
            stage: s.id,
            label: s.label.clone(),
            filled: i < current_order,
        })
        .collect()
}

/// Resolve the detail view for `lead_id`. Unknown ids yield None.
pub fn lead_detail<'a, R: CrmRepository + ?Sized>(
    repo: &'a R,
    lead_id: &str,
) -> Option<LeadDetail<'a>> {
    let lead = repo.lead(lead_id)?;
    let stages = repo.stages();

    Some(LeadDetail {
        lead,
        agent: repo.agent(&lead.assigned_to),
        activities: repo.activities_for(&lead.id),
        stage: stages.iter().find(|s| s.id == lead.stage),
        progress: stage_progress(stages, lead.stage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ActivityType, LeadScore};
    use crate::core::repository::fixtures::{make_activity, make_lead, make_snapshot, reference_now};

    #[test]
    fn test_columns_follow_stage_order() {
        let leads = vec![
            make_lead("1", "A", PipelineStage::Interested, LeadScore::Hot),
            make_lead("2", "B", PipelineStage::NewProspect, LeadScore::Warm),
            make_lead("3", "C", PipelineStage::Interested, LeadScore::Cold),
        ];
        let mut stages = StageConfig::defaults();
        stages.reverse();

        let columns = pipeline_columns(&leads, &stages);
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0].stage.id, PipelineStage::NewProspect);
        let interested: Vec<_> = columns[2].leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(interested, vec!["1", "3"]);
        assert!(columns[6].leads.is_empty());
    }

    #[test]
    fn test_partial_stage_table_collects_unstaged_leads() {
        let leads = vec![
            make_lead("1", "A", PipelineStage::Admission, LeadScore::Hot),
            make_lead("2", "B", PipelineStage::NewProspect, LeadScore::Warm),
        ];
        let stages: Vec<StageConfig> = StageConfig::defaults()
            .into_iter()
            .filter(|s| s.id != PipelineStage::Admission)
            .collect();

        let columns = pipeline_columns(&leads, &stages);
        assert_eq!(columns.len(), 6);
        assert!(columns.iter().all(|c| c.leads.iter().all(|l| l.id != "1")));

        let other: Vec<_> = unstaged_leads(&leads, &stages)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(other, vec!["1"]);
        assert!(unstaged_leads(&leads, &StageConfig::defaults()).is_empty());
    }

    #[test]
    fn test_progress_fills_up_to_current_order() {
        let progress = stage_progress(&StageConfig::defaults(), PipelineStage::Interested);
        assert_eq!(progress.len(), 6);
        let filled: Vec<bool> = progress.iter().map(|s| s.filled).collect();
        assert_eq!(filled, vec![true, true, true, false, false, false]);
    }

    #[test]
    fn test_not_qualified_fills_whole_strip() {
        // Order 7 exceeds every segment index.
        let progress = stage_progress(&StageConfig::defaults(), PipelineStage::NotQualified);
        assert!(progress.iter().all(|s| s.filled));
    }

    #[test]
    fn test_detail_joins_agent_and_activities() {
        let mut snapshot = make_snapshot(vec![
            make_lead("L1", "Ali", PipelineStage::Contacted, LeadScore::Hot),
            make_lead("L2", "Bina", PipelineStage::Contacted, LeadScore::Hot),
        ]);
        snapshot.leads[1].assigned_to = "nobody".to_string();
        let now = reference_now();
        snapshot.activities = vec![
            make_activity("A1", "L1", ActivityType::Call, now, "a1"),
            make_activity("A2", "L2", ActivityType::Note, now, "a1"),
            make_activity("A3", "L1", ActivityType::Visit, now, "a2"),
        ];

        let detail = lead_detail(&snapshot, "L1").unwrap();
        assert_eq!(detail.agent_label(), "Rafiq Islam");
        let ids: Vec<_> = detail.activities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A3"]);
        assert_eq!(detail.stage.map(|s| s.order), Some(2));

        let orphan = lead_detail(&snapshot, "L2").unwrap();
        assert_eq!(orphan.agent_label(), "Unassigned");

        assert!(lead_detail(&snapshot, "L404").is_none());
    }
}
