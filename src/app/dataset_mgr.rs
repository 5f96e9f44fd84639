// LeadDesk - app/dataset_mgr.rs
//
// Loads the dataset snapshot either from a user file on disk or from the
// demo dataset embedded in the binary, and applies rebasing.

use crate::core::dataset::{self, DatasetFormat};
use crate::core::repository::Snapshot;
use crate::util::constants;
use crate::util::error::DatasetError;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Where the active snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Builtin,
    File(std::path::PathBuf),
}

impl DatasetSource {
    pub fn label(&self) -> String {
        match self {
            DatasetSource::Builtin => "built-in demo data".to_string(),
            DatasetSource::File(path) => path.display().to_string(),
        }
    }
}

/// Read, parse, and validate a dataset file.
///
/// The size limit is checked from metadata before the file is read.
pub fn load_dataset_file(path: &Path) -> Result<Snapshot, DatasetError> {
    let format = DatasetFormat::from_path(path)?;

    let metadata = std::fs::metadata(path).map_err(|e| DatasetError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.len() > constants::MAX_DATASET_FILE_SIZE {
        return Err(DatasetError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_DATASET_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let snapshot = dataset::load_dataset_str(&content, format, path)?;
    tracing::info!(
        path = %path.display(),
        leads = snapshot.leads.len(),
        agents = snapshot.agents.len(),
        activities = snapshot.activities.len(),
        targets = snapshot.targets.len(),
        "Dataset loaded"
    );
    Ok(snapshot)
}

/// Resolve the startup snapshot.
///
/// - An explicit `path` is loaded and rebased only when `rebase` is set.
/// - Otherwise `fallback_path` is used if it exists (same rebase rule).
/// - Otherwise the embedded demo is loaded and always rebased onto `now`.
pub fn load_startup_dataset(
    path: Option<&Path>,
    fallback_path: Option<&Path>,
    now: DateTime<Utc>,
    rebase: bool,
) -> Result<(Snapshot, DatasetSource), DatasetError> {
    let chosen = path.or_else(|| fallback_path.filter(|p| p.is_file()));

    if let Some(file) = chosen {
        let snapshot = load_dataset_file(file)?;
        let snapshot = if rebase {
            if snapshot.anchor.is_none() {
                tracing::warn!(
                    "--rebase given but the dataset has no [meta] anchor; timestamps unchanged"
                );
            }
            snapshot.rebased(now)
        } else {
            snapshot
        };
        return Ok((snapshot, DatasetSource::File(file.to_path_buf())));
    }

    let snapshot = dataset::builtin_demo()?.rebased(now);
    tracing::info!(
        leads = snapshot.leads.len(),
        agents = snapshot.agents.len(),
        activities = snapshot.activities.len(),
        "Built-in demo dataset loaded"
    );
    Ok((snapshot, DatasetSource::Builtin))
}
