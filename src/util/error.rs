// LeadDesk - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LeadDesk operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LeadDeskError {
    /// Dataset loading or validation failed.
    Dataset(DatasetError),

    /// Filter operation failed.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LeadDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dataset(e) => write!(f, "Dataset error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LeadDeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dataset(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

/// Errors related to dataset loading and validation.
#[derive(Debug)]
pub enum DatasetError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// JSON file could not be parsed.
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// File extension is neither `.toml` nor `.json`.
    UnsupportedFormat { path: PathBuf },

    /// Dataset file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is empty.
    MissingField {
        record: &'static str,
        index: usize,
        field: &'static str,
    },

    /// Two records of the same kind share an id.
    DuplicateId { record: &'static str, id: String },

    /// A lead's `score_value` is above the permitted maximum.
    ScoreValueOutOfRange { lead_id: String, value: u8, max: u8 },

    /// I/O error reading a dataset file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::JsonParse { path, source } => {
                write!(f, "Failed to parse JSON '{}': {source}", path.display())
            }
            Self::UnsupportedFormat { path } => write!(
                f,
                "Dataset '{}' has an unsupported extension (expected .toml or .json)",
                path.display()
            ),
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Dataset '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField {
                record,
                index,
                field,
            } => write!(f, "{record} #{index}: missing required field '{field}'"),
            Self::DuplicateId { record, id } => {
                write!(f, "Duplicate {record} id '{id}'")
            }
            Self::ScoreValueOutOfRange {
                lead_id,
                value,
                max,
            } => write!(
                f,
                "Lead '{lead_id}': score_value {value} exceeds maximum of {max}"
            ),
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading dataset '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::JsonParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DatasetError> for LeadDeskError {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter operations.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided notes/tags pattern is not a valid regex.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid filter pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for LeadDeskError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LeadDeskError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LeadDeskError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LeadDesk results.
pub type Result<T> = std::result::Result<T, LeadDeskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_dataset_error_wraps_into_top_level() {
        let err: LeadDeskError = DatasetError::DuplicateId {
            record: "lead",
            id: "L-1".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Dataset error: Duplicate lead id 'L-1'");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_keeps_source_chain() {
        let err = DatasetError::Io {
            path: PathBuf::from("leads.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("leads.toml"));
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("gone".to_string())
        );
    }
}
