//! CANN-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, CannError>;

/// Top-level error type for the cannibalization engine.
#[derive(Debug, Error)]
pub enum CannError {
    #[error("[CANN-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[CANN-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[CANN-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[CANN-2001] site not found: {site_id}")]
    SiteNotFound { site_id: u64 },

    #[error("[CANN-2002] no pages found to analyze for site {site_id}")]
    EmptyCorpus { site_id: u64 },

    #[error("[CANN-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[CANN-3001] traffic source failure: {details}")]
    TrafficSource { details: String },

    #[error("[CANN-3002] page source failure: {details}")]
    PageSource { details: String },

    #[error("[CANN-3003] result sink failure: {details}")]
    ResultSink { details: String },

    #[error("[CANN-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl CannError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "CANN-1001",
            Self::MissingConfig { .. } => "CANN-1002",
            Self::ConfigParse { .. } => "CANN-1003",
            Self::SiteNotFound { .. } => "CANN-2001",
            Self::EmptyCorpus { .. } => "CANN-2002",
            Self::Serialization { .. } => "CANN-2101",
            Self::TrafficSource { .. } => "CANN-3001",
            Self::PageSource { .. } => "CANN-3002",
            Self::ResultSink { .. } => "CANN-3003",
            Self::Runtime { .. } => "CANN-3900",
        }
    }

    /// Whether the failure aborts an analysis run.
    ///
    /// A traffic-source failure degrades the run (P4/P5 are skipped and
    /// `gsc_connected` is cleared) but never fails it.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::TrafficSource { .. })
    }
}

impl From<serde_json::Error> for CannError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for CannError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_errors() -> Vec<CannError> {
        vec![
            CannError::InvalidConfig {
                details: String::new(),
            },
            CannError::MissingConfig {
                path: PathBuf::new(),
            },
            CannError::ConfigParse {
                context: "",
                details: String::new(),
            },
            CannError::SiteNotFound { site_id: 0 },
            CannError::EmptyCorpus { site_id: 0 },
            CannError::Serialization {
                context: "",
                details: String::new(),
            },
            CannError::TrafficSource {
                details: String::new(),
            },
            CannError::PageSource {
                details: String::new(),
            },
            CannError::ResultSink {
                details: String::new(),
            },
            CannError::Runtime {
                details: String::new(),
            },
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let codes: Vec<&str> = all_errors().iter().map(CannError::code).collect();
        let unique: std::collections::HashSet<&&str> = codes.iter().collect();
        assert_eq!(
            codes.len(),
            unique.len(),
            "error codes must be unique: {codes:?}"
        );
    }

    #[test]
    fn error_codes_have_cann_prefix() {
        for err in &all_errors() {
            assert!(
                err.code().starts_with("CANN-"),
                "code {} must start with CANN-",
                err.code()
            );
        }
    }

    #[test]
    fn error_display_includes_code() {
        let err = CannError::SiteNotFound { site_id: 42 };
        let msg = err.to_string();
        assert!(
            msg.contains("CANN-2001"),
            "display should contain error code: {msg}"
        );
        assert!(msg.contains("42"), "display should contain site id: {msg}");
    }

    #[test]
    fn only_traffic_source_is_non_fatal() {
        for err in &all_errors() {
            let expected = !matches!(err, CannError::TrafficSource { .. });
            assert_eq!(err.is_fatal(), expected, "fatality mismatch for {err}");
        }
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= invalid").unwrap_err();
        let err: CannError = toml_err.into();
        assert_eq!(err.code(), "CANN-1003");
    }
}
