//! Error types for the exporter library.
//!
//! Catalog errors are programming errors (a collector registering or
//! recording metrics inconsistently) and are covered by tests. Only
//! `ExportError::SourceUnavailable` is expected to surface at runtime.

use thiserror::Error;

/// Errors raised by the metric catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The same metric name was registered twice with a different type
    /// or label set.
    #[error("metric '{0}' already registered with a different type or label set")]
    DuplicateDefinition(String),

    /// A sample was recorded for a metric that was never registered.
    #[error("metric '{0}' was never registered")]
    UnknownMetric(String),

    /// A sample carried the wrong number of label values.
    #[error("metric '{name}' expects {expected} label values, got {got}")]
    LabelArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Request-level errors for one scrape.
#[derive(Debug, Error)]
pub enum ExportError {
    /// One of the source statistics aggregates could not be obtained.
    /// No partial document is emitted in this case.
    #[error("{aggregate} unavailable: {reason}")]
    SourceUnavailable {
        /// Which aggregate failed ("cluster health", "node stats", ...).
        aggregate: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ExportError {
    pub fn source_unavailable(aggregate: &'static str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            aggregate,
            reason: reason.to_string(),
        }
    }
}
