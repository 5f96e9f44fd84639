// LeadDesk - app/state.rs
//
// Application state management. Holds the loaded snapshot, the active
// view, the lead-table filter and sort, and the current selection.
// Owned by the eframe::App implementation; also drives `--print` reports.

use crate::core::call_queue::CallPolicy;
use crate::core::filter::{build_table_view, LeadFilter, LeadTableView, SortKey, SortState};
use crate::core::model::Lead;
use crate::core::pipeline::{lead_detail, LeadDetail};
use crate::core::repository::{CrmRepository, Snapshot};
use crate::util::constants;
use serde::{Deserialize, Serialize};

/// Top-level navigation views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    Pipeline,
    Leads,
    FollowUps,
    Calls,
    Targets,
    Analytics,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Dashboard,
            Tab::Pipeline,
            Tab::Leads,
            Tab::FollowUps,
            Tab::Calls,
            Tab::Targets,
            Tab::Analytics,
            Tab::Settings,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Pipeline => "Pipeline",
            Tab::Leads => "All Leads",
            Tab::FollowUps => "Follow-ups",
            Tab::Calls => "Call Queue",
            Tab::Targets => "Targets",
            Tab::Analytics => "Analytics",
            Tab::Settings => "Settings",
        }
    }

    /// Subtitle shown under the view title.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Overview of today's pipeline and team",
            Tab::Pipeline => "Leads by stage",
            Tab::Leads => "Search, filter, and sort every lead",
            Tab::FollowUps => "Scheduled follow-ups by due date",
            Tab::Calls => "Leads waiting for a call, hottest first",
            Tab::Targets => "Progress against team goals",
            Tab::Analytics => "Sources, courses, and conversion funnel",
            Tab::Settings => "Organisation and display settings",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "dashboard" => Ok(Tab::Dashboard),
            "pipeline" => Ok(Tab::Pipeline),
            "leads" | "all_leads" => Ok(Tab::Leads),
            "follow_ups" | "followups" => Ok(Tab::FollowUps),
            "calls" | "call_queue" => Ok(Tab::Calls),
            "targets" => Ok(Tab::Targets),
            "analytics" => Ok(Tab::Analytics),
            "settings" => Ok(Tab::Settings),
            _ => Err(format!("unknown view '{s}'")),
        }
    }
}

/// Validated tunables the views need, copied out of the loaded config.
#[derive(Debug, Clone)]
pub struct DeskSettings {
    pub organisation_name: String,
    pub branch: Option<String>,
    pub currency_symbol: String,
    pub call_policy: CallPolicy,
    pub daily_call_target: u32,
    pub upcoming_window_days: i64,
    pub recent_activity_limit: usize,
    pub trend_weeks: u32,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            organisation_name: constants::DEFAULT_ORGANISATION_NAME.to_string(),
            branch: None,
            currency_symbol: constants::DEFAULT_CURRENCY_SYMBOL.to_string(),
            call_policy: CallPolicy::default(),
            daily_call_target: constants::DEFAULT_DAILY_CALL_TARGET,
            upcoming_window_days: constants::DEFAULT_UPCOMING_WINDOW_DAYS,
            recent_activity_limit: constants::DEFAULT_RECENT_ACTIVITY_LIMIT,
            trend_weeks: constants::DEFAULT_TREND_WEEKS,
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct DeskState {
    /// The read-only dataset.
    pub snapshot: Snapshot,

    /// Where the snapshot came from, for the header and about dialog.
    pub dataset_label: String,

    pub settings: DeskSettings,

    pub active_tab: Tab,

    /// Current lead-table filter.
    pub filter: LeadFilter,

    /// Raw text of the notes/tags pattern box.
    pub pattern_input: String,

    /// Compile error for `pattern_input`, shown under the box.
    pub pattern_error: Option<String>,

    pub sort: SortState,

    /// Filtered and sorted view of `snapshot.leads`.
    pub table: LeadTableView,

    /// Id of the lead shown in the detail panel.
    pub selected_lead: Option<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, skipped session values).
    pub warnings: Vec<String>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    pub dark_mode: bool,

    /// Whether the About dialog is open.
    pub show_about: bool,

    /// Contact link requested by a panel; the app launches it next frame.
    pub pending_open: Option<String>,
}

impl DeskState {
    pub fn new(
        snapshot: Snapshot,
        dataset_label: String,
        settings: DeskSettings,
        debug_mode: bool,
    ) -> Self {
        let status_message = format!(
            "Loaded {} leads, {} activities from {dataset_label}.",
            snapshot.leads.len(),
            snapshot.activities.len()
        );
        let mut state = Self {
            snapshot,
            dataset_label,
            settings,
            active_tab: Tab::default(),
            filter: LeadFilter::default(),
            pattern_input: String::new(),
            pattern_error: None,
            sort: SortState::default(),
            table: LeadTableView::default(),
            selected_lead: None,
            status_message,
            warnings: Vec::new(),
            debug_mode,
            dark_mode: true,
            show_about: false,
            pending_open: None,
        };
        state.apply_filters();
        state
    }

    /// Recompute the table view from the current filter and sort.
    pub fn apply_filters(&mut self) {
        self.table = build_table_view(
            &self.snapshot.leads,
            &self.filter,
            &self.sort,
            &self.snapshot.stages,
        );
    }

    /// Replace the filter wholesale (session restore, CLI flags).
    pub fn set_filter(&mut self, filter: LeadFilter) {
        self.pattern_input = filter
            .pattern
            .as_ref()
            .map(|r| r.as_str().to_string())
            .unwrap_or_default();
        self.pattern_error = None;
        self.filter = filter;
        self.apply_filters();
    }

    /// Column-header click.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
        self.apply_filters();
    }

    /// Compile `pattern_input` into the filter. On error the previous
    /// pattern stays active and the message is kept for display.
    pub fn commit_pattern(&mut self) {
        match self.filter.set_pattern(&self.pattern_input) {
            Ok(()) => self.pattern_error = None,
            Err(e) => self.pattern_error = Some(e.to_string()),
        }
        self.apply_filters();
    }

    /// Reset the table filter to "show everything".
    pub fn clear_filters(&mut self) {
        self.set_filter(LeadFilter::default());
    }

    /// Leads in table order.
    pub fn visible_leads(&self) -> Vec<&Lead> {
        self.table.rows(&self.snapshot.leads).collect()
    }

    pub fn select_lead(&mut self, lead_id: &str) {
        self.selected_lead = Some(lead_id.to_string());
    }

    /// Detail view for the selected lead. None if nothing is selected or the
    /// id no longer resolves.
    pub fn selected_detail(&self) -> Option<LeadDetail<'_>> {
        self.selected_lead
            .as_deref()
            .and_then(|id| lead_detail(&self.snapshot, id))
    }

    pub fn agent_name(&self, agent_id: &str) -> &str {
        self.snapshot.agent_name(agent_id)
    }

    /// Queue an external link (tel:, mailto:, WhatsApp) for launch.
    pub fn request_open(&mut self, url: String) {
        self.pending_open = Some(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LeadScore, PipelineStage};
    use crate::core::repository::fixtures::{make_lead, make_snapshot};

    fn make_state() -> DeskState {
        let snapshot = make_snapshot(vec![
            make_lead("1", "Ali Rahman", PipelineStage::Contacted, LeadScore::Hot),
            make_lead("2", "Karim", PipelineStage::Interested, LeadScore::Warm),
        ]);
        DeskState::new(snapshot, "test".to_string(), DeskSettings::default(), false)
    }

    #[test]
    fn test_new_state_shows_all_leads() {
        let state = make_state();
        assert_eq!(state.table.shown, 2);
        assert_eq!(state.table.total, 2);
        assert_eq!(state.active_tab, Tab::Dashboard);
    }

    #[test]
    fn test_filter_and_sort_recompute_table() {
        let mut state = make_state();
        state.filter.query = "ali".to_string();
        state.apply_filters();
        assert_eq!(state.table.shown, 1);

        state.clear_filters();
        state.toggle_sort(SortKey::Name);
        let names: Vec<_> = state
            .visible_leads()
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ali Rahman", "Karim"]);
        state.toggle_sort(SortKey::Name);
        let names: Vec<_> = state
            .visible_leads()
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Karim", "Ali Rahman"]);
    }

    #[test]
    fn test_bad_pattern_keeps_previous() {
        let mut state = make_state();
        state.pattern_input = "weekend".to_string();
        state.commit_pattern();
        assert!(state.pattern_error.is_none());
        assert_eq!(state.table.shown, 0);

        state.pattern_input = "(".to_string();
        state.commit_pattern();
        assert!(state.pattern_error.is_some());
        assert_eq!(
            state.filter.pattern.as_ref().map(|r| r.as_str()),
            Some("weekend")
        );
    }

    #[test]
    fn test_selection_resolves_detail() {
        let mut state = make_state();
        assert!(state.selected_detail().is_none());
        state.select_lead("2");
        assert_eq!(
            state.selected_detail().map(|d| d.lead.name.as_str()),
            Some("Karim")
        );
        state.select_lead("missing");
        assert!(state.selected_detail().is_none());
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("follow-ups".parse(), Ok(Tab::FollowUps));
        assert_eq!("calls".parse(), Ok(Tab::Calls));
        assert!("inbox".parse::<Tab>().is_err());
    }
}
