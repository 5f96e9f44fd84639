// LeadDesk - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use directories::ProjectDirs;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LeadDesk data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/leaddesk/ or %APPDATA%\LeadDesk\config\)
    pub config_dir: PathBuf,

    /// Data directory for the session file and the default dataset.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Paths rooted at an explicit directory (the `--config-dir` override).
    pub fn rooted_at(dir: &Path) -> Self {
        Self {
            config_dir: dir.join("config"),
            data_dir: dir.join("data"),
        }
    }

    /// Where a dataset is looked for when none is given on the command line.
    pub fn default_dataset_path(&self) -> PathBuf {
        self.data_dir.join(constants::DEFAULT_DATASET_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub organisation: OrganisationSection,
    pub locale: LocaleSection,
    pub queue: QueueSection,
    pub follow_ups: FollowUpsSection,
    pub dashboard: DashboardSection,
    pub ui: UiSection,
    pub logging: LoggingSection,
}

/// `[organisation]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OrganisationSection {
    /// Name shown in the header.
    pub name: Option<String>,
    /// Branch shown under the name.
    pub branch: Option<String>,
}

/// `[locale]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LocaleSection {
    /// UTC offset that defines calendar days, e.g. "+06:00".
    pub utc_offset: Option<String>,
    /// Prefix for money amounts.
    pub currency_symbol: Option<String>,
}

/// `[queue]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct QueueSection {
    pub stale_contact_hours: Option<i64>,
    pub daily_call_target: Option<u32>,
}

/// `[follow_ups]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FollowUpsSection {
    pub upcoming_window_days: Option<i64>,
}

/// `[dashboard]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    pub recent_activity_limit: Option<usize>,
    pub trend_weeks: Option<u32>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Organisation --
    pub organisation_name: String,
    pub branch: Option<String>,

    // -- Locale --
    /// Configured offset. None follows the machine's zone, DST included.
    pub utc_offset: Option<FixedOffset>,
    pub currency_symbol: String,

    // -- Queues --
    pub stale_contact_hours: i64,
    pub daily_call_target: u32,
    pub upcoming_window_days: i64,

    // -- Dashboard --
    pub recent_activity_limit: usize,
    pub trend_weeks: u32,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            organisation_name: constants::DEFAULT_ORGANISATION_NAME.to_string(),
            branch: None,
            utc_offset: None,
            currency_symbol: constants::DEFAULT_CURRENCY_SYMBOL.to_string(),
            stale_contact_hours: constants::DEFAULT_STALE_CONTACT_HOURS,
            daily_call_target: constants::DEFAULT_DAILY_CALL_TARGET,
            upcoming_window_days: constants::DEFAULT_UPCOMING_WINDOW_DAYS,
            recent_activity_limit: constants::DEFAULT_RECENT_ACTIVITY_LIMIT,
            trend_weeks: constants::DEFAULT_TREND_WEEKS,
            dark_mode: true,
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Offset that defines calendar days at `now`.
    pub fn offset_at(&self, now: DateTime<Utc>) -> FixedOffset {
        self.utc_offset.unwrap_or_else(|| local_offset_at(now))
    }
}

/// The machine's UTC offset at the instant `at`.
pub fn local_offset_at(at: DateTime<Utc>) -> FixedOffset {
    at.with_timezone(&chrono::Local).offset().fix()
}

/// Parse "+HH:MM", "-HH:MM", "+HHMM", or "Z"/"UTC".
/// Returns None for malformed input or magnitudes beyond 14 hours.
pub fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match s.as_bytes().first().copied()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => return None,
    };
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    let secs = sign * (hours * 3600 + minutes * 60);
    if secs.abs() > constants::MAX_UTC_OFFSET_SECS {
        return None;
    }
    FixedOffset::east_opt(secs)
}

/// Accept `value` if it lies in `min..=max`, else record a warning.
fn checked<T: PartialOrd + Display + Copy>(
    section: &str,
    key: &str,
    value: Option<T>,
    min: T,
    max: T,
    default: T,
    warnings: &mut Vec<String>,
) -> T {
    match value {
        Some(v) if v >= min && v <= max => v,
        Some(v) => {
            let err = ConfigError::ValueOutOfRange {
                field: format!("{section}.{key}"),
                value: v.to_string(),
                expected: format!("{min}-{max}"),
            };
            warnings.push(format!("{err}. Using default ({default})."));
            default
        }
        None => default,
    }
}

/// Read and parse `config.toml` without validating values.
pub fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load and validate `config.toml` from beside the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning; the
/// application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir
        .parent()
        .unwrap_or(config_dir)
        .join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw_config(&config_path) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate_raw(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
        for w in &warnings {
            tracing::warn!("{}", w);
        }
    }

    (config, warnings)
}

/// Validate each field against named constants, accumulating all warnings.
fn validate_raw(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Organisation --
    if let Some(name) = raw.organisation.name.filter(|n| !n.trim().is_empty()) {
        config.organisation_name = name;
    }
    config.branch = raw.organisation.branch.filter(|b| !b.trim().is_empty());

    // -- Locale --
    if let Some(ref offset) = raw.locale.utc_offset {
        match parse_utc_offset(offset) {
            Some(parsed) => config.utc_offset = Some(parsed),
            None => warnings.push(format!(
                "[locale] utc_offset = \"{offset}\" is not a valid offset. \
                 Expected \"+HH:MM\" within +/-14:00. Using the system offset.",
            )),
        }
    }
    if let Some(symbol) = raw.locale.currency_symbol.filter(|s| !s.is_empty()) {
        config.currency_symbol = symbol;
    }

    // -- Queues --
    config.stale_contact_hours = checked(
        "queue",
        "stale_contact_hours",
        raw.queue.stale_contact_hours,
        constants::MIN_STALE_CONTACT_HOURS,
        constants::MAX_STALE_CONTACT_HOURS,
        constants::DEFAULT_STALE_CONTACT_HOURS,
        warnings,
    );
    config.daily_call_target = checked(
        "queue",
        "daily_call_target",
        raw.queue.daily_call_target,
        constants::MIN_DAILY_CALL_TARGET,
        constants::MAX_DAILY_CALL_TARGET,
        constants::DEFAULT_DAILY_CALL_TARGET,
        warnings,
    );
    config.upcoming_window_days = checked(
        "follow_ups",
        "upcoming_window_days",
        raw.follow_ups.upcoming_window_days,
        constants::MIN_UPCOMING_WINDOW_DAYS,
        constants::MAX_UPCOMING_WINDOW_DAYS,
        constants::DEFAULT_UPCOMING_WINDOW_DAYS,
        warnings,
    );

    // -- Dashboard --
    config.recent_activity_limit = checked(
        "dashboard",
        "recent_activity_limit",
        raw.dashboard.recent_activity_limit,
        constants::MIN_RECENT_ACTIVITY_LIMIT,
        constants::MAX_RECENT_ACTIVITY_LIMIT,
        constants::DEFAULT_RECENT_ACTIVITY_LIMIT,
        warnings,
    );
    config.trend_weeks = checked(
        "dashboard",
        "trend_weeks",
        raw.dashboard.trend_weeks,
        constants::MIN_TREND_WEEKS,
        constants::MAX_TREND_WEEKS,
        constants::DEFAULT_TREND_WEEKS,
        warnings,
    );

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(body: &str) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let config_dir = tmp.path().join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(tmp.path().join(constants::CONFIG_FILE_NAME), body).unwrap();
        (tmp, config_dir)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&tmp.path().join("config"));
        assert!(warnings.is_empty());
        assert_eq!(config.stale_contact_hours, 24);
        assert_eq!(config.upcoming_window_days, 7);
        assert_eq!(config.recent_activity_limit, 8);
    }

    #[test]
    fn test_valid_values_applied() {
        let (_tmp, dir) = write_config(
            r#"
[organisation]
name = "Uttara Branch"

[locale]
utc_offset = "+06:00"
currency_symbol = "Tk "

[queue]
stale_contact_hours = 48
daily_call_target = 30

[follow_ups]
upcoming_window_days = 14

[ui]
theme = "light"

[future_section]
ignored = true
"#,
        );
        let (config, warnings) = load_config(&dir);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.organisation_name, "Uttara Branch");
        assert_eq!(
            config.utc_offset.map(|o| o.local_minus_utc()),
            Some(6 * 3600)
        );
        assert_eq!(config.currency_symbol, "Tk ");
        assert_eq!(config.stale_contact_hours, 48);
        assert_eq!(config.daily_call_target, 30);
        assert_eq!(config.upcoming_window_days, 14);
        assert!(!config.dark_mode);
    }

    #[test]
    fn test_out_of_range_values_warn_and_default() {
        let (_tmp, dir) = write_config(
            r#"
[queue]
stale_contact_hours = 0

[follow_ups]
upcoming_window_days = 1

[dashboard]
trend_weeks = 99

[locale]
utc_offset = "+25:00"

[logging]
level = "verbose"
"#,
        );
        let (config, warnings) = load_config(&dir);
        assert_eq!(warnings.len(), 5);
        assert_eq!(
            config.stale_contact_hours,
            constants::DEFAULT_STALE_CONTACT_HOURS
        );
        assert_eq!(
            config.upcoming_window_days,
            constants::DEFAULT_UPCOMING_WINDOW_DAYS
        );
        assert_eq!(config.trend_weeks, constants::DEFAULT_TREND_WEEKS);
        assert!(config.utc_offset.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_offset_at_prefers_configured_offset() {
        let winter = "2026-01-15T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let summer = "2026-07-15T12:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let pinned = AppConfig {
            utc_offset: parse_utc_offset("+06:00"),
            ..AppConfig::default()
        };
        assert_eq!(pinned.offset_at(winter).local_minus_utc(), 6 * 3600);
        assert_eq!(pinned.offset_at(summer).local_minus_utc(), 6 * 3600);

        let system = AppConfig::default();
        assert!(system.utc_offset.is_none());
        assert_eq!(system.offset_at(winter), local_offset_at(winter));
        assert_eq!(system.offset_at(summer), local_offset_at(summer));
    }

    #[test]
    fn test_out_of_range_warning_names_field() {
        let (_tmp, dir) = write_config("[queue]\ndaily_call_target = 5000\n");
        let (_, warnings) = load_config(&dir);
        assert_eq!(warnings.len(), 1);
        assert!(
            warnings[0].contains("queue.daily_call_target"),
            "{}",
            warnings[0]
        );
    }

    #[test]
    fn test_read_raw_config_reports_parse_errors() {
        let (tmp, _dir) = write_config("not = [valid");
        let err = read_raw_config(&tmp.path().join(constants::CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[test]
    fn test_unparseable_file_falls_back() {
        let (_tmp, dir) = write_config("[queue\nstale_contact_hours = ");
        let (config, warnings) = load_config(&dir);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            config.daily_call_target,
            constants::DEFAULT_DAILY_CALL_TARGET
        );
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(
            parse_utc_offset("+06:00").map(|o| o.local_minus_utc()),
            Some(21_600)
        );
        assert_eq!(
            parse_utc_offset("-0530").map(|o| o.local_minus_utc()),
            Some(-19_800)
        );
        assert_eq!(
            parse_utc_offset("UTC").map(|o| o.local_minus_utc()),
            Some(0)
        );
        assert!(parse_utc_offset("6").is_none());
        assert!(parse_utc_offset("+06:75").is_none());
        assert!(parse_utc_offset("+15:00").is_none());
    }
}
