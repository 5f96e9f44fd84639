// LeadDesk - app/session.rs
//
// Session persistence: save and restore the active view, lead-table filter,
// and sort order between application restarts.
//
// Design principles:
// - Session is saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good session.
// - Load errors are silently discarded (corrupt or incompatible sessions
//   just start the app fresh rather than surfacing errors to the user).
// - The data directory is created on first save; no user action required.
// - Dataset contents are NOT persisted; only view state is.

use crate::app::state::{DeskState, Tab};
use crate::core::filter::{LeadFilter, SortState};
use crate::core::model::{LeadScore, PipelineStage};
use crate::util::constants::SESSION_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment this constant whenever `SessionData` gains or removes fields
/// in a breaking way. Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

// =============================================================================
// On-disk data structures
// =============================================================================

/// Complete persistent session snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version; must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// View that was open when the app closed.
    #[serde(default)]
    pub active_tab: Tab,

    /// Lead-table filter: the serialisable subset of `LeadFilter`.
    #[serde(default)]
    pub filter: PersistedFilter,

    #[serde(default)]
    pub sort: SortState,
}

/// Serialisable snapshot of `LeadFilter`.
///
/// The compiled regex is stored as its source and re-compiled on restore.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedFilter {
    #[serde(default)]
    pub query: String,

    /// None = all stages.
    #[serde(default)]
    pub stage: Option<PipelineStage>,

    /// None = all scores.
    #[serde(default)]
    pub score: Option<LeadScore>,

    /// Notes/tags pattern source. Empty = no pattern.
    #[serde(default)]
    pub pattern: String,
}

impl PersistedFilter {
    pub fn from_filter(filter: &LeadFilter) -> Self {
        Self {
            query: filter.query.clone(),
            stage: filter.stage,
            score: filter.score,
            pattern: filter
                .pattern
                .as_ref()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    /// Rebuild the live filter. An invalid saved pattern is dropped with a warning.
    pub fn to_filter(&self) -> LeadFilter {
        let mut filter = LeadFilter {
            query: self.query.clone(),
            stage: self.stage,
            score: self.score,
            pattern: None,
        };
        if let Err(e) = filter.set_pattern(&self.pattern) {
            tracing::warn!(error = %e, "Saved filter pattern no longer compiles; ignoring it");
        }
        filter
    }
}

impl SessionData {
    /// Capture the persistable view state.
    pub fn capture(state: &DeskState) -> Self {
        Self {
            version: SESSION_VERSION,
            active_tab: state.active_tab,
            filter: PersistedFilter::from_filter(&state.filter),
            sort: state.sort,
        }
    }

    /// Apply a loaded session to `state` and recompute the table.
    pub fn restore_into(&self, state: &mut DeskState) {
        state.active_tab = self.active_tab;
        state.sort = self.sort;
        state.set_filter(self.filter.to_filter());
    }
}

// =============================================================================
// I/O helpers
// =============================================================================

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed. Returns a descriptive error
/// string suitable for a tracing warn! call; the caller decides whether to
/// surface it to the user (typically it is logged and ignored).
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create session directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("failed to serialise session: {e}"))?;

    // A crash between write and rename loses the new session but never
    // corrupts the previous one.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("failed to write session temp file '{}': {e}", tmp.display()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise session file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch). The caller should treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed, starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch, starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session file loaded");
    Some(data)
}

// =============================================================================
// Unit tests
// =============================================================================
