// LeadDesk - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Config validation in platform::config checks every value against these.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LeadDesk";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LeadDesk";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Call queue
// =============================================================================

/// A lead not contacted for longer than this many hours needs a call.
pub const DEFAULT_STALE_CONTACT_HOURS: i64 = 24;

/// Lower bound for `[queue] stale_contact_hours`.
pub const MIN_STALE_CONTACT_HOURS: i64 = 1;

/// Upper bound for `[queue] stale_contact_hours` (30 days).
pub const MAX_STALE_CONTACT_HOURS: i64 = 720;

/// Elapsed hours assumed for a lead that has never been contacted.
pub const NEVER_CONTACTED_HOURS: i64 = 999;

/// Default number of calls each agent should complete per day.
pub const DEFAULT_DAILY_CALL_TARGET: u32 = 20;

/// Lower bound for `[queue] daily_call_target`.
pub const MIN_DAILY_CALL_TARGET: u32 = 1;

/// Upper bound for `[queue] daily_call_target`.
pub const MAX_DAILY_CALL_TARGET: u32 = 1_000;

// =============================================================================
// Follow-ups
// =============================================================================

/// Far edge of the "This Week" follow-up bucket, in days from now.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;

/// Lower bound for `[follow_ups] upcoming_window_days`.
/// Must exceed 1 or the bucket would always be empty.
pub const MIN_UPCOMING_WINDOW_DAYS: i64 = 2;

/// Upper bound for `[follow_ups] upcoming_window_days`.
pub const MAX_UPCOMING_WINDOW_DAYS: i64 = 31;

// =============================================================================
// Dashboard and analytics
// =============================================================================

/// Number of activities shown in the "Recent Activities" card.
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 8;

/// Lower bound for `[dashboard] recent_activity_limit`.
pub const MIN_RECENT_ACTIVITY_LIMIT: usize = 1;

/// Upper bound for `[dashboard] recent_activity_limit`.
pub const MAX_RECENT_ACTIVITY_LIMIT: usize = 50;

/// Number of trailing weeks in the analytics lead trend.
pub const DEFAULT_TREND_WEEKS: u32 = 4;

/// Lower bound for `[dashboard] trend_weeks`.
pub const MIN_TREND_WEEKS: u32 = 1;

/// Upper bound for `[dashboard] trend_weeks`.
pub const MAX_TREND_WEEKS: u32 = 26;

/// Target percentage at or above which a target counts as on track.
pub const TARGET_ON_TRACK_PERCENT: u32 = 70;

/// Target percentage at or above which a target counts as achieved.
pub const TARGET_ACHIEVED_PERCENT: u32 = 100;

// =============================================================================
// Dataset limits
// =============================================================================

/// Maximum dataset file size in bytes. Larger files are rejected before parsing.
pub const MAX_DATASET_FILE_SIZE: u64 = 16 * 1024 * 1024; // 16 MB

/// Highest permitted `score_value` on a lead.
pub const MAX_SCORE_VALUE: u8 = 100;

// =============================================================================
// Locale
// =============================================================================

/// Default currency symbol (Bangladeshi taka).
pub const DEFAULT_CURRENCY_SYMBOL: &str = "\u{09f3}";

/// Default organisation name shown in the header.
pub const DEFAULT_ORGANISATION_NAME: &str = "Mobile Training Center";

/// Largest accepted UTC offset magnitude in seconds (+/-14:00).
pub const MAX_UTC_OFFSET_SECS: i32 = 14 * 3600;

// =============================================================================
// Placeholder labels
// =============================================================================

/// Shown when a lead's `assigned_to` does not resolve to an agent.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Shown when an activity's lead or agent id does not resolve.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Board column for leads whose stage is missing from the stage table.
pub const OTHER_STAGE_LABEL: &str = "Other";

// =============================================================================
// Files
// =============================================================================

/// Configuration file name (lives beside the config dir).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (lives in the data dir).
pub const SESSION_FILE_NAME: &str = "session.json";

/// Dataset file picked up from the data dir when no path is given on the CLI.
pub const DEFAULT_DATASET_FILE_NAME: &str = "dataset.toml";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
