//! Export filters derived from configuration.
//!
//! Two predicate sets govern which optional samples the collector emits:
//! which indices get per-index metrics, and which cluster settings are
//! surfaced as info gauges. Patterns are simple wildcards where `*`
//! matches any run of characters and everything else is literal.

use std::sync::Arc;

use regex::RegexSet;

/// A set of wildcard patterns compiled into one anchored regex set.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    set: Option<RegexSet>,
}

impl PatternFilter {
    /// Compiles the given wildcard patterns. An empty slice yields a
    /// filter that matches nothing.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        if patterns.is_empty() {
            return Ok(Self { set: None });
        }

        let regexes: Vec<String> = patterns
            .iter()
            .map(|p| wildcard_to_regex(p.as_ref()))
            .collect();

        Ok(Self {
            set: Some(RegexSet::new(regexes)?),
        })
    }

    /// True when no patterns were configured.
    pub fn is_empty(&self) -> bool {
        self.set.is_none()
    }

    /// True when `candidate` matches at least one pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        match &self.set {
            Some(set) => set.is_match(candidate),
            None => false,
        }
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let literal_parts: Vec<String> = pattern.split('*').map(regex::escape).collect();
    format!("^{}$", literal_parts.join(".*"))
}

/// Predicate for per-index metric export.
///
/// An empty pattern list admits every index; once patterns are configured,
/// only matching indices are exported.
#[derive(Debug, Clone)]
pub struct IndexFilter(PatternFilter);

impl IndexFilter {
    pub fn new(filter: PatternFilter) -> Self {
        Self(filter)
    }

    pub fn admits(&self, index: &str) -> bool {
        self.0.is_empty() || self.0.matches(index)
    }
}

/// Predicate for cluster settings exposure.
///
/// Settings exposure is opt-in: an empty pattern list exposes nothing.
#[derive(Debug, Clone)]
pub struct SettingsFilter(PatternFilter);

impl SettingsFilter {
    pub fn new(filter: PatternFilter) -> Self {
        Self(filter)
    }

    pub fn admits(&self, key: &str) -> bool {
        self.0.matches(key)
    }
}

/// The filter snapshot one scrape works against.
///
/// Cloning is cheap; handlers clone once at the start of a scrape so a
/// concurrent configuration reload cannot partially apply within one
/// document.
#[derive(Debug, Clone)]
pub struct ExportFilters {
    pub indices: Arc<IndexFilter>,
    pub settings: Arc<SettingsFilter>,
}

impl ExportFilters {
    pub fn new(indices: IndexFilter, settings: SettingsFilter) -> Self {
        Self {
            indices: Arc::new(indices),
            settings: Arc::new(settings),
        }
    }

    /// Compiles both filters from raw pattern lists.
    pub fn from_patterns<S: AsRef<str>>(
        index_patterns: &[S],
        settings_patterns: &[S],
    ) -> Result<Self, regex::Error> {
        Ok(Self::new(
            IndexFilter::new(PatternFilter::new(index_patterns)?),
            SettingsFilter::new(PatternFilter::new(settings_patterns)?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let filter = PatternFilter::new(&["logs-000001"]).unwrap();
        assert!(filter.matches("logs-000001"));
        assert!(!filter.matches("logs-000002"));
        assert!(!filter.matches("xlogs-000001"));
    }

    #[test]
    fn test_wildcard_pattern() {
        let filter = PatternFilter::new(&["logs-*"]).unwrap();
        assert!(filter.matches("logs-000001"));
        assert!(filter.matches("logs-"));
        assert!(!filter.matches("metrics-000001"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let filter = PatternFilter::new(&[".kibana"]).unwrap();
        assert!(filter.matches(".kibana"));
        assert!(!filter.matches("xkibana"));
    }

    #[test]
    fn test_multiple_patterns() {
        let filter = PatternFilter::new(&["logs-*", "metrics-*"]).unwrap();
        assert!(filter.matches("logs-1"));
        assert!(filter.matches("metrics-1"));
        assert!(!filter.matches("traces-1"));
    }

    #[test]
    fn test_empty_index_filter_admits_all() {
        let filter = IndexFilter::new(PatternFilter::new::<&str>(&[]).unwrap());
        assert!(filter.admits("anything"));
    }

    #[test]
    fn test_configured_index_filter_restricts() {
        let filter = IndexFilter::new(PatternFilter::new(&["logs-*"]).unwrap());
        assert!(filter.admits("logs-000001"));
        assert!(!filter.admits("other-000001"));
    }

    #[test]
    fn test_empty_settings_filter_admits_none() {
        let filter = SettingsFilter::new(PatternFilter::new::<&str>(&[]).unwrap());
        assert!(!filter.admits("cluster.routing.allocation.enable"));
    }

    #[test]
    fn test_settings_filter_prefix_pattern() {
        let filter =
            SettingsFilter::new(PatternFilter::new(&["cluster.routing.*"]).unwrap());
        assert!(filter.admits("cluster.routing.allocation.enable"));
        assert!(!filter.admits("indices.recovery.max_bytes_per_sec"));
    }
}
