//! Configuration management for es-prometheus-exporter.
//!
//! This module handles loading, merging, and validating configuration
//! from files and CLI arguments. It supports YAML, JSON, and TOML
//! formats with precedence CLI > config file > defaults.

use crate::cli::{Args, ConfigFormat};
use es_prometheus_exporter::{ExportFilters, DEFAULT_METRIC_PREFIX};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9108;
pub const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Effective exporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub port: Option<u16>,
    pub bind: Option<String>,

    // Elasticsearch source
    #[serde(alias = "elasticsearch-url")]
    pub elasticsearch_url: Option<String>,
    #[serde(alias = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    // Export configuration
    #[serde(alias = "metric-prefix")]
    pub metric_prefix: Option<String>,
    /// Wildcard patterns selecting which indices get per-index metrics.
    /// Empty or absent means all indices.
    #[serde(alias = "index-filter")]
    pub index_filter: Option<Vec<String>>,
    /// Wildcard patterns selecting which cluster settings are exposed as
    /// info gauges. Empty or absent means none.
    #[serde(alias = "settings-filter")]
    pub settings_filter: Option<Vec<String>>,

    // Logging
    pub log_level: Option<String>,

    // TLS/SSL Configuration
    #[serde(alias = "enable-tls")]
    pub enable_tls: Option<bool>,
    #[serde(alias = "tls-cert-path")]
    pub tls_cert_path: Option<String>,
    #[serde(alias = "tls-key-path")]
    pub tls_key_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: Some(DEFAULT_BIND_ADDR.to_string()),
            port: Some(DEFAULT_PORT),
            elasticsearch_url: Some(DEFAULT_ELASTICSEARCH_URL.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            metric_prefix: Some(DEFAULT_METRIC_PREFIX.to_string()),
            index_filter: None,
            settings_filter: None,
            log_level: Some("info".into()),
            enable_tls: Some(false),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Config {
    pub fn effective_metric_prefix(&self) -> String {
        self.metric_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_METRIC_PREFIX.to_string())
    }

    /// Compiles the export filters from the configured pattern lists.
    pub fn export_filters(&self) -> Result<ExportFilters, regex::Error> {
        let index_patterns = self.index_filter.clone().unwrap_or_default();
        let settings_patterns = self.settings_filter.clone().unwrap_or_default();
        ExportFilters::from_patterns(&index_patterns, &settings_patterns)
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Filter patterns must compile
    if let Err(e) = cfg.export_filters() {
        return Err(format!("Invalid filter pattern: {}", e).into());
    }

    // Metric prefix must be a valid metric name prefix
    let prefix = cfg.effective_metric_prefix();
    let valid_prefix = prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':');
    if !valid_prefix || prefix.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid metric prefix '{}'", prefix).into());
    }

    // TLS validation
    if cfg.enable_tls.unwrap_or(false) {
        let cert_path = cfg.tls_cert_path.as_deref();
        let key_path = cfg.tls_key_path.as_deref();

        match (cert_path, key_path) {
            (None, None) => {
                return Err(
                    "TLS is enabled but neither tls_cert_path nor tls_key_path are set".into(),
                );
            }
            (Some(_), None) => {
                return Err("TLS is enabled but tls_key_path is not set".into());
            }
            (None, Some(_)) => {
                return Err("TLS is enabled but tls_cert_path is not set".into());
            }
            (Some(cert), Some(key)) => {
                if !Path::new(cert).exists() {
                    return Err(format!("TLS certificate file not found: {}", cert).into());
                }
                if !Path::new(key).exists() {
                    return Err(format!("TLS private key file not found: {}", key).into());
                }
            }
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref().and_then(|p| p.to_str()))?
    };

    if let Some(bind_ip) = args.bind {
        config.bind = Some(bind_ip.to_string());
    }

    if let Some(cli_port) = args.port {
        config.port = Some(cli_port);
    }

    if let Some(url) = &args.elasticsearch_url {
        config.elasticsearch_url = Some(url.clone());
    }

    if let Some(timeout) = args.timeout_secs {
        config.timeout_secs = Some(timeout);
    }

    if let Some(prefix) = &args.metric_prefix {
        config.metric_prefix = Some(prefix.clone());
    }

    // Parse comma-separated filter pattern lists
    if let Some(patterns) = &args.index_filter {
        config.index_filter = Some(split_patterns(patterns));
    }

    if let Some(patterns) = &args.settings_filter {
        config.settings_filter = Some(split_patterns(patterns));
    }

    // TLS configuration: CLI wins if provided
    if args.enable_tls {
        config.enable_tls = Some(true);
    }
    if let Some(cert_path) = &args.tls_cert {
        config.tls_cert_path = Some(cert_path.to_string_lossy().to_string());
    }
    if let Some(key_path) = &args.tls_key {
        config.tls_key_path = Some(key_path.to_string_lossy().to_string());
    }

    Ok(config)
}

fn split_patterns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Configuration loading with multiple format support
pub fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = if let Some(p) = path {
        PathBuf::from(p)
    } else {
        // Try default locations
        let defaults = [
            "/etc/es-prometheus-exporter/config.yaml",
            "/etc/es-prometheus-exporter/config.yml",
            "/etc/es-prometheus-exporter/config.json",
            "./es-prometheus-exporter.yaml",
            "./es-prometheus-exporter.yml",
            "./es-prometheus-exporter.json",
        ];

        defaults
            .iter()
            .find(|p| Path::new(p).exists())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(""))
    };

    if !path.exists() || path.to_string_lossy().is_empty() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    println!("{output}");
    Ok(())
}
