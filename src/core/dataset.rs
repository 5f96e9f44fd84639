// LeadDesk - core/dataset.rs
//
// Dataset parsing and validation.
// Core layer: accepts TOML or JSON strings, never touches the filesystem.
// I/O is handled by app::dataset_mgr which feeds content here.

use crate::core::model::{Activity, Agent, Lead, StageConfig, Target};
use crate::core::repository::Snapshot;
use crate::util::constants;
use crate::util::error::DatasetError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Embedded demo dataset shipped with the binary.
const BUILTIN_DEMO: &str = include_str!("../../assets/demo_dataset.toml");

/// Pseudo-path used in error messages for the embedded dataset.
pub const BUILTIN_DEMO_NAME: &str = "<builtin>/demo_dataset.toml";

// =============================================================================
// Raw deserialization structures
// =============================================================================

/// Dataset file as deserialized. Validated into a `Snapshot` before use.
#[derive(Debug, Default, Deserialize)]
pub struct DatasetDefinition {
    #[serde(default)]
    pub meta: DatasetMeta,
    #[serde(default)]
    pub agents: Vec<Agent>,
    /// Empty means "use the built-in stage table".
    #[serde(default)]
    pub stages: Vec<StageConfig>,
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatasetMeta {
    #[serde(default)]
    pub name: Option<String>,
    /// Instant the timestamps were authored against; enables rebasing.
    #[serde(default)]
    pub anchor: Option<DateTime<Utc>>,
}

/// Supported on-disk encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Toml,
    Json,
}

impl DatasetFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("toml") => Ok(DatasetFormat::Toml),
            Some("json") => Ok(DatasetFormat::Json),
            _ => Err(DatasetError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Parse dataset text in the given format.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_dataset(
    content: &str,
    format: DatasetFormat,
    source_path: &Path,
) -> Result<DatasetDefinition, DatasetError> {
    match format {
        DatasetFormat::Toml => toml::from_str(content).map_err(|e| DatasetError::TomlParse {
            path: source_path.to_path_buf(),
            source: e,
        }),
        DatasetFormat::Json => serde_json::from_str(content).map_err(|e| DatasetError::JsonParse {
            path: source_path.to_path_buf(),
            source: e,
        }),
    }
}

// =============================================================================
// Validation
// =============================================================================

fn check_ids<'a>(
    record: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if id.trim().is_empty() {
            return Err(DatasetError::MissingField {
                record,
                index,
                field: "id",
            });
        }
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId {
                record,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate a definition and build the immutable snapshot.
///
/// Validates:
/// - every record has a non-empty id
/// - lead, agent, activity, target, and stage ids are unique within their collection
/// - `score_value` is at most 100
///
/// Dangling references (unknown agent or lead ids) are allowed; they render
/// with placeholder labels.
pub fn validate(def: DatasetDefinition) -> Result<Snapshot, DatasetError> {
    check_ids("lead", def.leads.iter().map(|l| l.id.as_str()))?;
    check_ids("agent", def.agents.iter().map(|a| a.id.as_str()))?;
    check_ids("activity", def.activities.iter().map(|a| a.id.as_str()))?;
    check_ids("target", def.targets.iter().map(|t| t.id.as_str()))?;
    check_ids("stage", def.stages.iter().map(|s| s.id.id()))?;

    if let Some(lead) = def
        .leads
        .iter()
        .find(|l| l.score_value > constants::MAX_SCORE_VALUE)
    {
        return Err(DatasetError::ScoreValueOutOfRange {
            lead_id: lead.id.clone(),
            value: lead.score_value,
            max: constants::MAX_SCORE_VALUE,
        });
    }

    let stages = if def.stages.is_empty() {
        StageConfig::defaults()
    } else {
        def.stages
    };

    Ok(Snapshot {
        leads: def.leads,
        agents: def.agents,
        activities: def.activities,
        stages,
        targets: def.targets,
        anchor: def.meta.anchor,
    })
}

/// Parse and validate in one step.
pub fn load_dataset_str(
    content: &str,
    format: DatasetFormat,
    source_path: &Path,
) -> Result<Snapshot, DatasetError> {
    let def = parse_dataset(content, format, source_path)?;
    validate(def)
}

/// The embedded demo dataset, not yet rebased.
pub fn builtin_demo() -> Result<Snapshot, DatasetError> {
    load_dataset_str(
        BUILTIN_DEMO,
        DatasetFormat::Toml,
        Path::new(BUILTIN_DEMO_NAME),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::PipelineStage;

    const MINIMAL: &str = r#"
[meta]
anchor = "2026-10-18T10:00:00Z"

[[agents]]
id = "a1"
name = "Rafiq Islam"
role = "agent"

[[leads]]
id = "L1"
name = "Ali Rahman"
phone = "+880 1711-000001"
stage = "interested"
score = "hot"
score_value = 85
assigned_to = "a1"
created_at = "2026-10-15T09:00:00Z"
updated_at = "2026-10-17T09:00:00Z"
urgency = "high"
tags = ["weekend"]
"#;

    fn path() -> &'static Path {
        Path::new("test.toml")
    }

    #[test]
    fn test_minimal_toml_uses_default_stages() {
        let snapshot = load_dataset_str(MINIMAL, DatasetFormat::Toml, path()).unwrap();
        assert_eq!(snapshot.leads.len(), 1);
        assert_eq!(snapshot.leads[0].stage, PipelineStage::Interested);
        assert_eq!(snapshot.stages, StageConfig::defaults());
        assert!(snapshot.anchor.is_some());
        assert!(snapshot.activities.is_empty());
    }

    #[test]
    fn test_duplicate_lead_id_rejected() {
        let doubled = format!(
            "{MINIMAL}\n{}",
            &MINIMAL[MINIMAL.find("[[leads]]").unwrap()..]
        );
        let err = load_dataset_str(&doubled, DatasetFormat::Toml, path()).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateId { record: "lead", .. }));
    }

    #[test]
    fn test_duplicate_stage_id_rejected() {
        let stages = r#"
[[stages]]
id = "admission"
label = "Admission"
order = 6

[[stages]]
id = "admission"
label = "Enrolled"
order = 7
"#;
        let doubled = format!("{MINIMAL}\n{stages}");
        let err = load_dataset_str(&doubled, DatasetFormat::Toml, path()).unwrap_err();
        match err {
            DatasetError::DuplicateId { record, id } => {
                assert_eq!(record, "stage");
                assert_eq!(id, "admission");
            }
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_score_value_over_100_rejected() {
        let bad = MINIMAL.replace("score_value = 85", "score_value = 101");
        let err = load_dataset_str(&bad, DatasetFormat::Toml, path()).unwrap_err();
        assert!(matches!(err, DatasetError::ScoreValueOutOfRange { value: 101, .. }));
    }

    #[test]
    fn test_empty_id_rejected() {
        let bad = MINIMAL.replace("id = \"L1\"", "id = \"\"");
        let err = load_dataset_str(&bad, DatasetFormat::Toml, path()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingField {
                record: "lead",
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_stage_is_parse_error() {
        let bad = MINIMAL.replace("stage = \"interested\"", "stage = \"enrolled\"");
        let err = load_dataset_str(&bad, DatasetFormat::Toml, path()).unwrap_err();
        assert!(matches!(err, DatasetError::TomlParse { .. }));
    }

    #[test]
    fn test_json_dataset() {
        let json = r#"{
            "leads": [{
                "id": "L9", "name": "Bina", "phone": "017", "stage": "admission",
                "score": "warm", "score_value": 60, "assigned_to": "ghost",
                "created_at": "2026-10-01T00:00:00Z", "updated_at": "2026-10-02T00:00:00Z",
                "urgency": "low", "budget": 15000
            }]
        }"#;
        let snapshot = load_dataset_str(json, DatasetFormat::Json, Path::new("d.json")).unwrap();
        assert_eq!(snapshot.leads[0].budget, Some(15_000));
        assert!(snapshot.anchor.is_none());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("a/B.TOML")).unwrap(),
            DatasetFormat::Toml
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("x.json")).unwrap(),
            DatasetFormat::Json
        );
        assert!(DatasetFormat::from_path(Path::new("x.csv")).is_err());
        assert!(DatasetFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_builtin_demo_is_valid() {
        let demo = builtin_demo().unwrap();
        assert!(demo.leads.len() >= 10);
        assert!(!demo.agents.is_empty());
        assert!(!demo.activities.is_empty());
        assert!(!demo.targets.is_empty());
        assert!(demo.anchor.is_some());
    }
}
