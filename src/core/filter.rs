// LeadDesk - core/filter.rs
//
// Composable filter and sort engine for the all-leads table.
// All active filters are AND-combined; the result is a list of indices
// into the caller's lead slice.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{stage_order, Lead, LeadScore, PipelineStage, StageConfig};
use crate::util::error::FilterError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    /// Free-text search over name, phone, and email. Empty = no filter.
    pub query: String,

    /// Exact stage to include. None = all stages.
    pub stage: Option<PipelineStage>,

    /// Exact score to include. None = all scores.
    pub score: Option<LeadScore>,

    /// Compiled pattern over notes and tags. None = no pattern filter.
    pub pattern: Option<Regex>,
}

impl LeadFilter {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.stage.is_none()
            && self.score.is_none()
            && self.pattern.is_none()
    }

    /// Set the notes/tags pattern, compiling it.
    /// Returns an error if the pattern is invalid.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.pattern = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.pattern = Some(regex);
        Ok(())
    }

    /// Quick filter: hot leads in any stage.
    pub fn hot_only() -> Self {
        Self {
            score: Some(LeadScore::Hot),
            ..Default::default()
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Column the table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    CreatedAt,
    ScoreValue,
    Stage,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Name,
            SortKey::CreatedAt,
            SortKey::ScoreValue,
            SortKey::Stage,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::CreatedAt => "Created",
            SortKey::ScoreValue => "Score",
            SortKey::Stage => "Stage",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(SortKey::Name),
            "created_at" | "created" => Ok(SortKey::CreatedAt),
            "score_value" | "score" => Ok(SortKey::ScoreValue),
            "stage" => Ok(SortKey::Stage),
            _ => Err(format!("unknown sort key '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    }
}

/// Active sort column and direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Column-header click: same key flips direction, a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Ascending comparison of two leads on one key.
///
/// Names use a case-folded comparison with a raw tie-break, an approximation
/// of locale collation. Stages compare by configured order (missing = 0).
pub fn compare_leads(a: &Lead, b: &Lead, key: SortKey, stages: &[StageConfig]) -> Ordering {
    match key {
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::ScoreValue => a.score_value.cmp(&b.score_value),
        SortKey::Stage => stage_order(stages, a.stage).cmp(&stage_order(stages, b.stage)),
    }
}

// =============================================================================
// Table view
// =============================================================================

/// Result of filtering and sorting the lead table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadTableView {
    /// Indices into the source slice, in display order.
    pub indices: Vec<usize>,
    /// Rows shown after filtering.
    pub shown: usize,
    /// Rows before filtering.
    pub total: usize,
}

impl LeadTableView {
    /// Resolve the indices against the slice they were computed from.
    pub fn rows<'a>(&'a self, leads: &'a [Lead]) -> impl Iterator<Item = &'a Lead> + 'a {
        self.indices.iter().filter_map(move |&i| leads.get(i))
    }
}

/// Apply filters to a slice of leads, returning indices of matching leads.
///
/// Returns a Vec of indices into the original slice in input order.
pub fn apply_filters(leads: &[Lead], filter: &LeadFilter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..leads.len()).collect();
    }

    let query_lower = filter.query.to_lowercase();

    leads
        .iter()
        .enumerate()
        .filter(|(_, lead)| matches_all(lead, filter, &query_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Filter, then stable-sort, producing the table view.
///
/// Descending reverses the comparator rather than the output, so ties keep
/// input order in both directions.
pub fn build_table_view(
    leads: &[Lead],
    filter: &LeadFilter,
    sort: &SortState,
    stages: &[StageConfig],
) -> LeadTableView {
    let mut indices = apply_filters(leads, filter);

    indices.sort_by(|&a, &b| {
        let ordering = compare_leads(&leads[a], &leads[b], sort.key, stages);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    LeadTableView {
        shown: indices.len(),
        total: leads.len(),
        indices,
    }
}

/// Check if a single lead matches all active filters.
fn matches_all(lead: &Lead, filter: &LeadFilter, query_lower: &str) -> bool {
    // Text search: name and email case-insensitive, phone raw.
    if !query_lower.is_empty() {
        let name_hit = lead.name.to_lowercase().contains(query_lower);
        let phone_hit = lead.phone.contains(filter.query.as_str());
        let email_hit = lead
            .email
            .as_ref()
            .is_some_and(|e| e.to_lowercase().contains(query_lower));
        if !(name_hit || phone_hit || email_hit) {
            return false;
        }
    }

    if let Some(stage) = filter.stage {
        if lead.stage != stage {
            return false;
        }
    }

    if let Some(score) = filter.score {
        if lead.score != score {
            return false;
        }
    }

    if let Some(ref regex) = filter.pattern {
        let notes_hit = lead.notes.as_deref().is_some_and(|n| regex.is_match(n));
        let tag_hit = lead.tags.iter().any(|t| regex.is_match(t));
        if !(notes_hit || tag_hit) {
            return false;
        }
    }

    true
}
