use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::RawConfig;
use super::constants::{
    ENV_CONFIG, ENV_ES_DATE_SEPARATOR, ENV_ES_HOSTS, ENV_ES_HTTP_LOGGING, ENV_ES_INDEX,
    ENV_ES_INDEX_REPLICAS, ENV_ES_INDEX_SHARDS, ENV_ES_MAX_REQUESTS, ENV_ES_NAMES_LOOKBACK,
    ENV_ES_PASSWORD, ENV_ES_PIPELINE, ENV_ES_TIMEOUT, ENV_ES_USERNAME, ENV_QUERY_LOOKBACK,
    ENV_SEARCH_ENABLED, ENV_STORAGE_TYPE, ENV_STRICT_TRACE_ID, KEY_ES_DATE_SEPARATOR,
    KEY_ES_HOSTS, KEY_ES_HTTP_LOGGING, KEY_ES_INDEX, KEY_ES_INDEX_REPLICAS, KEY_ES_INDEX_SHARDS,
    KEY_ES_MAX_REQUESTS, KEY_ES_NAMES_LOOKBACK, KEY_ES_PASSWORD, KEY_ES_PIPELINE,
    KEY_ES_TIMEOUT, KEY_ES_USERNAME, KEY_QUERY_LOOKBACK, KEY_SEARCH_ENABLED, KEY_STORAGE_TYPE,
    KEY_STRICT_TRACE_ID,
};

// Values stay strings here; typed coercion and its errors belong to the resolver.
#[derive(Parser)]
#[command(name = "zipkin")]
#[command(version, about = "Zipkin storage configuration", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Set any property, e.g. -D zipkin.storage.type=elasticsearch
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", global = true, value_parser = parse_define)]
    pub define: Vec<(String, String)>,

    /// Storage backend type (elasticsearch activates this client)
    #[arg(long, global = true, env = ENV_STORAGE_TYPE)]
    pub storage_type: Option<String>,

    /// Reject trace IDs that differ only in their upper 64 bits
    #[arg(long, global = true, env = ENV_STRICT_TRACE_ID)]
    pub strict_trace_id: Option<String>,

    /// Enable search features (service and span name indexing)
    #[arg(long, global = true, env = ENV_SEARCH_ENABLED)]
    pub search_enabled: Option<String>,

    /// Query lookback in milliseconds
    #[arg(long, global = true, env = ENV_QUERY_LOOKBACK)]
    pub query_lookback: Option<String>,

    // Elasticsearch options
    /// Comma separated list of hosts (host, host:port or http(s)://host:port)
    #[arg(long, global = true, env = ENV_ES_HOSTS)]
    pub es_hosts: Option<String>,

    /// Ingest pipeline applied to spans
    #[arg(long, global = true, env = ENV_ES_PIPELINE)]
    pub es_pipeline: Option<String>,

    /// Maximum concurrent requests
    #[arg(long, global = true, env = ENV_ES_MAX_REQUESTS)]
    pub es_max_requests: Option<String>,

    /// Connect, read and write timeout in milliseconds
    #[arg(long, global = true, env = ENV_ES_TIMEOUT)]
    pub es_timeout: Option<String>,

    /// Basic auth username
    #[arg(long, global = true, env = ENV_ES_USERNAME)]
    pub es_username: Option<String>,

    /// Basic auth password
    #[arg(long, global = true, env = ENV_ES_PASSWORD, hide_env_values = true)]
    pub es_password: Option<String>,

    /// Index name prefix
    #[arg(long, global = true, env = ENV_ES_INDEX)]
    pub es_index: Option<String>,

    /// Separator between date components of daily indices (one character or empty)
    #[arg(long, global = true, env = ENV_ES_DATE_SEPARATOR)]
    pub es_date_separator: Option<String>,

    /// Number of shards for new indices
    #[arg(long, global = true, env = ENV_ES_INDEX_SHARDS)]
    pub es_index_shards: Option<String>,

    /// Number of replicas for new indices
    #[arg(long, global = true, env = ENV_ES_INDEX_REPLICAS)]
    pub es_index_replicas: Option<String>,

    /// HTTP logging level (NONE, BASIC, HEADERS, BODY)
    #[arg(long, global = true, env = ENV_ES_HTTP_LOGGING)]
    pub es_http_logging: Option<String>,

    /// Lookback in milliseconds for service and span name queries
    #[arg(long, global = true, env = ENV_ES_NAMES_LOOKBACK)]
    pub es_names_lookback: Option<String>,
}

/// Parse a `KEY=VALUE` property. The value may be empty.
fn parse_define(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid property '{}'. Expected KEY=VALUE", s)),
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Resolve and print the storage configuration (default command)
    Check,
    /// Print the daily index name for a document type
    IndexName {
        /// Document type, e.g. span or dependency
        index_type: String,
        /// Epoch milliseconds (defaults to now)
        #[arg(long, allow_negative_numbers = true)]
        timestamp: Option<i64>,
    },
    /// Send a request to each configured host
    Ping,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub define: Vec<(String, String)>,
    pub storage_type: Option<String>,
    pub strict_trace_id: Option<String>,
    pub search_enabled: Option<String>,
    pub query_lookback: Option<String>,
    pub es_hosts: Option<String>,
    pub es_pipeline: Option<String>,
    pub es_max_requests: Option<String>,
    pub es_timeout: Option<String>,
    pub es_username: Option<String>,
    pub es_password: Option<String>,
    pub es_index: Option<String>,
    pub es_date_separator: Option<String>,
    pub es_index_shards: Option<String>,
    pub es_index_replicas: Option<String>,
    pub es_http_logging: Option<String>,
    pub es_names_lookback: Option<String>,
}

impl CliConfig {
    /// Properties set on the command line or through environment variables.
    /// `-D` properties are applied last.
    pub fn to_raw_config(&self) -> RawConfig {
        let mut config = RawConfig::new();
        let options = [
            (KEY_STORAGE_TYPE, &self.storage_type),
            (KEY_STRICT_TRACE_ID, &self.strict_trace_id),
            (KEY_SEARCH_ENABLED, &self.search_enabled),
            (KEY_QUERY_LOOKBACK, &self.query_lookback),
            (KEY_ES_HOSTS, &self.es_hosts),
            (KEY_ES_PIPELINE, &self.es_pipeline),
            (KEY_ES_MAX_REQUESTS, &self.es_max_requests),
            (KEY_ES_TIMEOUT, &self.es_timeout),
            (KEY_ES_USERNAME, &self.es_username),
            (KEY_ES_PASSWORD, &self.es_password),
            (KEY_ES_INDEX, &self.es_index),
            (KEY_ES_DATE_SEPARATOR, &self.es_date_separator),
            (KEY_ES_INDEX_SHARDS, &self.es_index_shards),
            (KEY_ES_INDEX_REPLICAS, &self.es_index_replicas),
            (KEY_ES_HTTP_LOGGING, &self.es_http_logging),
            (KEY_ES_NAMES_LOOKBACK, &self.es_names_lookback),
        ];
        for (key, value) in options {
            if let Some(value) = value {
                config.set(key, value.as_str());
            }
        }
        for (key, value) in &self.define {
            config.set(key.as_str(), value.as_str());
        }
        config
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        define: cli.define,
        storage_type: cli.storage_type,
        strict_trace_id: cli.strict_trace_id,
        search_enabled: cli.search_enabled,
        query_lookback: cli.query_lookback,
        es_hosts: cli.es_hosts,
        es_pipeline: cli.es_pipeline,
        es_max_requests: cli.es_max_requests,
        es_timeout: cli.es_timeout,
        es_username: cli.es_username,
        es_password: cli.es_password,
        es_index: cli.es_index,
        es_date_separator: cli.es_date_separator,
        es_index_shards: cli.es_index_shards,
        es_index_replicas: cli.es_index_replicas,
        es_http_logging: cli.es_http_logging,
        es_names_lookback: cli.es_names_lookback,
    };
    (config, cli.command)
}
