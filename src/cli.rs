//! CLI arguments for es-prometheus-exporter.
//!
//! This module defines the command-line interface structure using the
//! clap library.

use clap::{Parser, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "es-prometheus-exporter",
    about = "Prometheus exporter for Elasticsearch cluster, node and index statistics",
    long_about = "Prometheus exporter for Elasticsearch cluster, node and index statistics.\n\n\
                  Reads cluster health, local node stats, per-index stats and cluster-wide \
                  stats from an Elasticsearch cluster and serves them as one Prometheus \
                  exposition document on /metrics, with content negotiation for OpenMetrics.",
    version,
    propagate_version = true
)]
pub struct Args {
    /// HTTP listen port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Bind to specific interface/IP
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Base URL of the Elasticsearch node to scrape
    #[arg(long)]
    pub elasticsearch_url: Option<String>,

    /// Timeout in seconds for Elasticsearch requests
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Prefix prepended to every metric name
    #[arg(long)]
    pub metric_prefix: Option<String>,

    /// Export per-index metrics only for indices matching these wildcard
    /// patterns (comma-separated); empty means all indices
    #[arg(long)]
    pub index_filter: Option<String>,

    /// Expose cluster settings whose keys match these wildcard patterns
    /// (comma-separated); empty means none
    #[arg(long)]
    pub settings_filter: Option<String>,

    /// Enable TLS/SSL for HTTPS
    #[arg(long)]
    pub enable_tls: bool,

    /// Path to TLS certificate file (PEM format)
    #[arg(long)]
    pub tls_cert: Option<PathBuf>,

    /// Path to TLS private key file (PEM format)
    #[arg(long)]
    pub tls_key: Option<PathBuf>,
}
