//! Resolved Elasticsearch storage settings

use std::time::Duration;

use super::auth::BasicCredentials;
use super::index_name::IndexNameFormatter;
use super::logging::HttpLogging;

/// Validated storage settings. Only the resolver constructs these, and only
/// after every property resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub(super) hosts: Vec<String>,
    pub(super) pipeline: Option<String>,
    pub(super) max_requests: u32,
    pub(super) timeout_millis: u64,
    pub(super) strict_trace_id: bool,
    pub(super) search_enabled: bool,
    pub(super) names_lookback: u64,
    pub(super) index_name_formatter: IndexNameFormatter,
    pub(super) basic_auth: Option<BasicCredentials>,
    pub(super) index_shards: u32,
    pub(super) index_replicas: u32,
    pub(super) http_logging: HttpLogging,
}

impl StorageConfig {
    /// Canonical base URLs, in configured order
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn pipeline(&self) -> Option<&str> {
        self.pipeline.as_deref()
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn timeout_millis(&self) -> u64 {
        self.timeout_millis
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }

    pub fn strict_trace_id(&self) -> bool {
        self.strict_trace_id
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    /// Lookback in milliseconds for service and span name queries
    pub fn names_lookback(&self) -> u64 {
        self.names_lookback
    }

    pub fn index_name_formatter(&self) -> &IndexNameFormatter {
        &self.index_name_formatter
    }

    pub fn basic_auth(&self) -> Option<&BasicCredentials> {
        self.basic_auth.as_ref()
    }

    pub fn index_shards(&self) -> u32 {
        self.index_shards
    }

    pub fn index_replicas(&self) -> u32 {
        self.index_replicas
    }

    pub fn http_logging(&self) -> HttpLogging {
        self.http_logging
    }
}
