// LeadDesk - tests/e2e_dashboard.rs
//
// End-to-end tests over the on-disk fixture datasets.
//
// These load real TOML and JSON files through the same path the binary
// uses (app::dataset_mgr), then run every derivation against a pinned
// clock: no hand-built leads, no mocks.
//
// Fixture clock: 2026-10-18T10:00:00Z, UTC.

use chrono::{DateTime, Duration, TimeZone, Utc};
use leaddesk::app::dataset_mgr::{load_dataset_file, load_startup_dataset, DatasetSource};
use leaddesk::app::report::{render, ReportView};
use leaddesk::app::state::{DeskSettings, DeskState};
use leaddesk::core::analytics;
use leaddesk::core::call_queue::{build_call_queue, calls_completed_today, CallPolicy};
use leaddesk::core::clock::Clock;
use leaddesk::core::export::{export_csv, export_json};
use leaddesk::core::filter::{build_table_view, LeadFilter, SortKey, SortState};
use leaddesk::core::follow_up::bucket_follow_ups;
use leaddesk::core::model::{Lead, LeadScore, PipelineStage};
use leaddesk::core::pipeline::{lead_detail, pipeline_columns};
use leaddesk::core::repository::{CrmRepository, Snapshot};
use leaddesk::core::stats::{agent_performance, dashboard_stats, recent_activities};
use leaddesk::core::targets;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap()
}

fn clock() -> Clock {
    Clock::utc(fixture_now())
}

fn load_toml() -> Snapshot {
    load_dataset_file(&fixture("sample_dataset.toml")).expect("TOML fixture should load")
}

fn ids(leads: &[&Lead]) -> Vec<String> {
    leads.iter().map(|l| l.id.clone()).collect()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn e2e_toml_and_json_fixtures_agree() {
    let toml = load_toml();
    let json =
        load_dataset_file(&fixture("sample_dataset.json")).expect("JSON fixture should load");

    assert_eq!(toml.leads.len(), 8);
    assert_eq!(toml.leads, json.leads);
    assert_eq!(toml.activities.len(), json.activities.len());
    assert_eq!(toml.targets, json.targets);
    // No [[stages]] in the fixture: the built-in table applies.
    assert_eq!(toml.stages.len(), 7);
}

#[test]
fn e2e_startup_rebase_shifts_every_timestamp() {
    let later = fixture_now() + Duration::days(7);
    let path = fixture("sample_dataset.toml");
    let (snapshot, source) = load_startup_dataset(Some(path.as_path()), None, later, true).unwrap();

    assert!(matches!(source, DatasetSource::File(_)));
    let ali = snapshot.lead("F01").unwrap();
    assert_eq!(
        ali.created_at,
        Utc.with_ymd_and_hms(2026, 10, 25, 8, 0, 0).unwrap()
    );

    // Relative structure survives: the rebased queue matches the original.
    let original = load_toml();
    let before = build_call_queue(&original.leads, &clock(), &CallPolicy::default());
    let after = build_call_queue(&snapshot.leads, &Clock::utc(later), &CallPolicy::default());
    assert_eq!(ids(&before.sorted), ids(&after.sorted));
}

// =============================================================================
// Call queue
// =============================================================================

#[test]
fn e2e_call_queue_priority_order() {
    let snapshot = load_toml();
    let queue = build_call_queue(&snapshot.leads, &clock(), &CallPolicy::default());

    // F03 was contacted 5 h ago; F05 and F06 are closed.
    assert_eq!(ids(&queue.sorted), vec!["F01", "F08", "F02", "F07", "F04"]);
    assert_eq!(ids(&queue.hot), vec!["F01", "F08"]);
    assert_eq!(ids(&queue.warm), vec!["F02"]);
    assert_eq!(ids(&queue.cold), vec!["F07", "F04"]);

    assert!(queue
        .sorted
        .iter()
        .all(|l| !matches!(l.stage, PipelineStage::Admission | PipelineStage::NotQualified)));
}

#[test]
fn e2e_calls_done_today_counts_only_todays_calls() {
    let snapshot = load_toml();
    assert_eq!(calls_completed_today(&snapshot.activities, &clock()), 1);
}

// =============================================================================
// Follow-ups
// =============================================================================

#[test]
fn e2e_follow_up_buckets() {
    let snapshot = load_toml();
    let buckets = bucket_follow_ups(&snapshot.leads, &clock(), 7);

    assert_eq!(ids(&buckets.overdue), vec!["F02"]);
    assert_eq!(ids(&buckets.today), vec!["F01"]);
    assert_eq!(ids(&buckets.tomorrow), vec!["F03"]);
    // Tomorrow afternoon is more than 24 h away, so F03 is listed twice.
    assert_eq!(ids(&buckets.this_week), vec!["F03", "F04"]);
    assert_eq!(buckets.scheduled, 5);
    assert_eq!(buckets.unplaced, 1);
}

// =============================================================================
// Lead table
// =============================================================================

#[test]
fn e2e_table_query_stage_score_and_sort() {
    let snapshot = load_toml();
    let stages = &snapshot.stages;

    let filter = LeadFilter {
        query: "ali".to_string(),
        ..Default::default()
    };
    let view = build_table_view(&snapshot.leads, &filter, &SortState::default(), stages);
    assert_eq!(
        ids(&view.rows(&snapshot.leads).collect::<Vec<_>>()),
        vec!["F01"]
    );
    assert_eq!(view.total, 8);

    let hot = LeadFilter::hot_only();
    let view = build_table_view(&snapshot.leads, &hot, &SortState::default(), stages);
    assert_eq!(view.shown, 4);
    assert!(view
        .rows(&snapshot.leads)
        .all(|l| l.score == LeadScore::Hot));

    let mut sort = SortState::default();
    sort.toggle(SortKey::Name);
    let view = build_table_view(&snapshot.leads, &LeadFilter::default(), &sort, stages);
    let names: Vec<&str> = view
        .rows(&snapshot.leads)
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Ali Rahman",
            "Faria Sultana",
            "Imran Hossain",
            "Karim Uddin",
            "Nusrat Jahan",
            "Rashed Ahmed",
            "Sumaiya Khan",
            "Tamim Alam"
        ]
    );

    sort.toggle(SortKey::Name);
    sort.toggle(SortKey::Name);
    let again = build_table_view(&snapshot.leads, &LeadFilter::default(), &sort, stages);
    assert_eq!(again.indices, view.indices);
}

#[test]
fn e2e_pattern_filter_matches_notes_and_tags() {
    let snapshot = load_toml();
    let mut filter = LeadFilter::default();
    filter.set_pattern("evening|weekend").unwrap();
    let view = build_table_view(
        &snapshot.leads,
        &filter,
        &SortState::default(),
        &snapshot.stages,
    );
    let mut found = ids(&view.rows(&snapshot.leads).collect::<Vec<_>>());
    found.sort();
    assert_eq!(found, vec!["F01", "F03"]);
}

// =============================================================================
// Pipeline, detail, dashboard, analytics, targets
// =============================================================================

#[test]
fn e2e_pipeline_and_detail() {
    let snapshot = load_toml();
    let columns = pipeline_columns(&snapshot.leads, &snapshot.stages);
    assert_eq!(columns.len(), 7);
    assert_eq!(columns[0].stage.id, PipelineStage::NewProspect);
    assert_eq!(ids(&columns[0].leads), vec!["F01", "F07"]);

    let orphan = lead_detail(&snapshot, "F07").unwrap();
    assert_eq!(orphan.agent_label(), "Unassigned");

    let tamim = lead_detail(&snapshot, "F08").unwrap();
    assert_eq!(tamim.activities.len(), 1);
    // Payment pending is order 5: five filled segments out of six.
    assert_eq!(tamim.progress.len(), 6);
    assert_eq!(tamim.progress.iter().filter(|s| s.filled).count(), 5);

    assert!(lead_detail(&snapshot, "F404").is_none());
}

#[test]
fn e2e_dashboard_stats_and_activity() {
    let snapshot = load_toml();
    let stats = dashboard_stats(&snapshot.leads, &clock());
    assert_eq!(stats.total_leads, 8);
    assert_eq!(stats.new_leads_today, 1);
    assert_eq!(stats.hot_leads, 4);
    assert_eq!(stats.conversion_rate, 12.5);
    assert_eq!(stats.follow_ups_today, 1);
    assert_eq!(stats.overdue_follow_ups, 1);
    assert_eq!(stats.admissions_this_month, 1);
    assert_eq!(stats.revenue_this_month, 15_000);

    let agents = agent_performance(&snapshot, &clock());
    assert_eq!(agents[0].agent_id, "a1");
    assert_eq!(agents[0].total_leads, 4);
    assert_eq!(agents[0].conversions, 1);
    assert_eq!(agents[0].conversion_rate, 25.0);

    let recent = recent_activities(&snapshot, 3);
    let recent_ids: Vec<&str> = recent.iter().map(|r| r.activity.id.as_str()).collect();
    assert_eq!(recent_ids, vec!["A2", "A6", "A5"]);
    assert_eq!(recent[1].lead_name, "Unknown");
    assert_eq!(recent[1].agent_name, "Unknown");
}

#[test]
fn e2e_analytics_and_targets() {
    let snapshot = load_toml();

    let sources = analytics::lead_sources(&snapshot.leads);
    assert_eq!(sources.iter().map(|s| s.count).sum::<usize>(), 8);
    let facebook = sources.iter().find(|s| s.source == "Facebook").unwrap();
    assert_eq!(facebook.count, 3);

    let courses = analytics::course_performance(&snapshot.leads);
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].revenue, 15_000);

    // Cumulative: the first row holds every lead except not_qualified.
    let funnel = analytics::funnel(&snapshot.leads, &snapshot.stages);
    assert_eq!(funnel.len(), 6);
    assert_eq!(funnel[0].count, 7);
    assert_eq!(funnel[0].percentage, 100);
    let admitted = funnel
        .iter()
        .find(|r| r.stage == PipelineStage::Admission)
        .unwrap();
    assert_eq!(admitted.count, 1);

    assert_eq!(
        analytics::daily_activity(&snapshot.activities, &clock()).len(),
        7
    );

    let tiers: Vec<_> = snapshot.targets.iter().map(targets::tier).collect();
    assert_eq!(
        tiers,
        vec![
            targets::TargetTier::OnTrack,
            targets::TargetTier::OnTrack,
            targets::TargetTier::Achieved
        ]
    );
    assert_eq!(targets::overall_progress(&snapshot.targets), 81);
}

// =============================================================================
// Export and reports
// =============================================================================

#[test]
fn e2e_export_filtered_rows() {
    let snapshot = load_toml();
    let view = build_table_view(
        &snapshot.leads,
        &LeadFilter::hot_only(),
        &SortState::default(),
        &snapshot.stages,
    );
    let rows: Vec<&Lead> = view.rows(&snapshot.leads).collect();

    let tmp = tempfile::tempdir().unwrap();
    let csv_path = tmp.path().join("hot.csv");
    let n = export_csv(&rows, std::fs::File::create(&csv_path).unwrap(), &csv_path).unwrap();
    assert_eq!(n, 4);
    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 5);

    let json_path = tmp.path().join("hot.json");
    export_json(
        &rows,
        std::fs::File::create(&json_path).unwrap(),
        &json_path,
    ).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(4));
}

#[test]
fn e2e_reports_render_from_fixture() {
    let state = DeskState::new(
        load_toml(),
        "fixture".to_string(),
        DeskSettings::default(),
        false,
    );

    let calls = render(ReportView::Calls, &state, &clock());
    assert!(calls.contains("5 pending"), "{calls}");
    assert!(calls.contains("1 of 20 calls done today"), "{calls}");

    let follow_ups = render(ReportView::FollowUps, &state, &clock());
    assert!(follow_ups.contains("Overdue (1)"), "{follow_ups}");
    assert!(follow_ups.contains("This Week (2)"), "{follow_ups}");
    assert!(follow_ups.contains("1 beyond 7 days"), "{follow_ups}");

    let targets = render(ReportView::Targets, &state, &clock());
    assert!(targets.contains("Overall progress 81%"), "{targets}");
}
