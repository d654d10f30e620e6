//! Elasticsearch client configuration resolver
//!
//! Turns a flat [`RawConfig`] plus the interceptors registered for this client
//! into a validated [`StorageConfig`] and the [`HttpClient`] that goes with it.
//! Resolution either yields every component or fails with a single
//! [`ConfigError`] naming each bad property.

use std::str::FromStr;
use std::time::Duration;

use super::auth::{BasicAuthInterceptor, basic_auth_credentials};
use super::error::{ConfigError, Error, FieldError};
use super::hosts::resolve_hosts;
use super::http::HttpClient;
use super::index_name::{IndexNameError, IndexNameFormatter};
use super::interceptor::{InterceptorRegistry, NetworkInterceptor, aggregate_interceptors};
use super::logging::{HttpLogging, HttpLoggingInterceptor};
use super::storage::StorageConfig;
use crate::core::config::{RawConfig, RawValue};
use crate::core::constants::{
    DEFAULT_ES_HOSTS, DEFAULT_ES_INDEX_REPLICAS, DEFAULT_ES_INDEX_SHARDS, DEFAULT_ES_MAX_REQUESTS,
    DEFAULT_ES_TIMEOUT_MS, DEFAULT_NAMES_LOOKBACK_MS, ES_HTTP_QUALIFIER, KEY_ES_DATE_SEPARATOR,
    KEY_ES_HOSTS, KEY_ES_HTTP_LOGGING, KEY_ES_INDEX, KEY_ES_INDEX_REPLICAS, KEY_ES_INDEX_SHARDS,
    KEY_ES_MAX_REQUESTS, KEY_ES_NAMES_LOOKBACK, KEY_ES_PASSWORD, KEY_ES_PIPELINE, KEY_ES_TIMEOUT,
    KEY_ES_USERNAME, KEY_QUERY_LOOKBACK, KEY_SEARCH_ENABLED, KEY_STORAGE_TYPE,
    KEY_STRICT_TRACE_ID, STORAGE_TYPE_ELASTICSEARCH,
};

// =============================================================================
// Components
// =============================================================================

/// Everything the resolver produced. Empty when the storage type is not
/// Elasticsearch; lookups of absent components fail with [`Error::NotFound`].
#[derive(Debug, Default)]
pub struct Components {
    storage: Option<StorageConfig>,
    http_client: Option<HttpClient>,
    basic_auth_interceptor: Option<NetworkInterceptor>,
}

impl Components {
    pub fn is_activated(&self) -> bool {
        self.storage.is_some()
    }

    pub fn storage(&self) -> Result<&StorageConfig, Error> {
        self.storage.as_ref().ok_or(Error::NotFound("StorageConfig"))
    }

    pub fn http_client(&self) -> Result<&HttpClient, Error> {
        self.http_client.as_ref().ok_or(Error::NotFound("HttpClient"))
    }

    pub fn basic_auth_interceptor(&self) -> Result<&NetworkInterceptor, Error> {
        self.basic_auth_interceptor
            .as_ref()
            .ok_or(Error::NotFound("BasicAuthInterceptor"))
    }
}

// =============================================================================
// Resolver
// =============================================================================

pub struct ClientConfigResolver<'a> {
    raw: &'a RawConfig,
    registry: &'a InterceptorRegistry,
}

impl<'a> ClientConfigResolver<'a> {
    pub fn new(raw: &'a RawConfig, registry: &'a InterceptorRegistry) -> Self {
        Self { raw, registry }
    }

    /// Whether `zipkin.storage.type` selects Elasticsearch
    pub fn is_active(&self) -> bool {
        self.raw
            .get(KEY_STORAGE_TYPE)
            .map(|v| {
                v.as_string()
                    .trim()
                    .eq_ignore_ascii_case(STORAGE_TYPE_ELASTICSEARCH)
            })
            .unwrap_or(false)
    }

    pub fn resolve(&self) -> Result<Components, Error> {
        if !self.is_active() {
            tracing::debug!(
                storage_type = ?self.raw.get(KEY_STORAGE_TYPE).map(|v| v.as_string()),
                "Elasticsearch storage not selected"
            );
            return Ok(Components::default());
        }

        let mut fields = Fields::new(self.raw);

        let hosts = match resolve_hosts(&fields.string_or(KEY_ES_HOSTS, DEFAULT_ES_HOSTS)) {
            Ok(hosts) => hosts,
            Err(e) => {
                fields.fail(KEY_ES_HOSTS, e.to_string());
                Vec::new()
            }
        };
        let pipeline = fields.string(KEY_ES_PIPELINE);
        let max_requests = fields.u32(KEY_ES_MAX_REQUESTS, DEFAULT_ES_MAX_REQUESTS, 1);
        let timeout_millis = fields.u64(KEY_ES_TIMEOUT, DEFAULT_ES_TIMEOUT_MS, 1);
        let strict_trace_id = fields.bool(KEY_STRICT_TRACE_ID, true);
        let search_enabled = fields.bool(KEY_SEARCH_ENABLED, true);
        let index_shards = fields.u32(KEY_ES_INDEX_SHARDS, DEFAULT_ES_INDEX_SHARDS, 1);
        let index_replicas = fields.u32(KEY_ES_INDEX_REPLICAS, DEFAULT_ES_INDEX_REPLICAS, 0);
        let http_logging: HttpLogging = fields.parsed(KEY_ES_HTTP_LOGGING);

        let query_lookback = fields.optional_u64(KEY_QUERY_LOOKBACK, 1);
        let names_lookback = fields
            .optional_u64(KEY_ES_NAMES_LOOKBACK, 1)
            .or(query_lookback)
            .unwrap_or(DEFAULT_NAMES_LOOKBACK_MS);

        let index_name_formatter = self.index_name_formatter(&mut fields);

        // Password is taken verbatim; only emptiness disables it
        let username = fields.string(KEY_ES_USERNAME);
        let password = self
            .raw
            .get(KEY_ES_PASSWORD)
            .map(RawValue::as_string)
            .filter(|p| !p.is_empty());
        if username.is_some() != password.is_some() {
            tracing::warn!(
                "Only one of {} and {} is set; basic auth disabled",
                KEY_ES_USERNAME,
                KEY_ES_PASSWORD
            );
        }
        let basic_auth = basic_auth_credentials(username.as_deref(), password.as_deref());
        // Base64 output is always a valid header value
        let basic_auth_interceptor = basic_auth
            .as_ref()
            .and_then(|credentials| BasicAuthInterceptor::new(credentials).ok())
            .map(BasicAuthInterceptor::into_network_interceptor);

        let errors = fields.into_errors();
        let index_name_formatter = match (index_name_formatter, errors.is_empty()) {
            (Some(formatter), true) => formatter,
            _ => {
                tracing::debug!(failed = errors.len(), "Elasticsearch configuration rejected");
                return Err(ConfigError::new(errors).into());
            }
        };

        let http_logging_interceptor =
            HttpLoggingInterceptor::new(http_logging).map(HttpLoggingInterceptor::into_network_interceptor);
        let network_interceptors = aggregate_interceptors(
            basic_auth_interceptor.as_ref(),
            self.registry,
            ES_HTTP_QUALIFIER,
            http_logging_interceptor.as_ref(),
        );

        let http_client = HttpClient::builder()
            .timeout(Duration::from_millis(timeout_millis))
            .max_requests(max_requests)
            .network_interceptors(network_interceptors)
            .build()?;

        let storage = StorageConfig {
            hosts,
            pipeline,
            max_requests,
            timeout_millis,
            strict_trace_id,
            search_enabled,
            names_lookback,
            index_name_formatter,
            basic_auth,
            index_shards,
            index_replicas,
            http_logging,
        };

        tracing::debug!(
            hosts = ?storage.hosts(),
            max_requests,
            timeout_ms = timeout_millis,
            basic_auth = storage.basic_auth().is_some(),
            interceptors = http_client.network_interceptors().len(),
            "Elasticsearch storage configured"
        );

        Ok(Components {
            storage: Some(storage),
            http_client: Some(http_client),
            basic_auth_interceptor,
        })
    }

    fn index_name_formatter(&self, fields: &mut Fields<'_>) -> Option<IndexNameFormatter> {
        let mut builder = IndexNameFormatter::builder();
        if let Some(index) = fields.string(KEY_ES_INDEX) {
            builder = builder.index(index);
        }
        // Not trimmed: an empty value is meaningful here
        if let Some(separator) = self.raw.get(KEY_ES_DATE_SEPARATOR) {
            builder = builder.date_separator(separator.as_string());
        }
        match builder.build() {
            Ok(formatter) => Some(formatter),
            Err(e) => {
                let key = match e {
                    IndexNameError::DateSeparator(_) => KEY_ES_DATE_SEPARATOR,
                    IndexNameError::EmptyPrefix => KEY_ES_INDEX,
                };
                fields.fail(key, e.to_string());
                None
            }
        }
    }
}

/// Resolve the Elasticsearch components for `raw`
pub fn resolve(raw: &RawConfig, registry: &InterceptorRegistry) -> Result<Components, Error> {
    ClientConfigResolver::new(raw, registry).resolve()
}

// =============================================================================
// Field coercion
// =============================================================================

/// Reads typed properties, collecting failures instead of stopping at the first
struct Fields<'a> {
    raw: &'a RawConfig,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    fn new(raw: &'a RawConfig) -> Self {
        Self {
            raw,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, key: &str, reason: impl Into<String>) {
        self.errors.push(FieldError::new(key, reason));
    }

    fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Present and not blank
    fn value(&self, key: &str) -> Option<&'a RawValue> {
        self.raw.get(key).filter(|v| !v.is_blank())
    }

    fn string(&self, key: &str) -> Option<String> {
        self.value(key).map(|v| v.as_string().trim().to_string())
    }

    /// Untrimmed value when the key is present at all, even if blank
    fn string_or(&self, key: &str, default: &str) -> String {
        self.raw
            .get(key)
            .map(RawValue::as_string)
            .unwrap_or_else(|| default.to_string())
    }

    fn optional_u64(&mut self, key: &str, min: u64) -> Option<u64> {
        match self.value(key).map(RawValue::as_u64) {
            None => None,
            Some(Ok(n)) if n >= min => Some(n),
            Some(Ok(n)) => {
                self.fail(key, format!("must be at least {}, got {}", min, n));
                None
            }
            Some(Err(reason)) => {
                self.fail(key, reason);
                None
            }
        }
    }

    fn u64(&mut self, key: &str, default: u64, min: u64) -> u64 {
        self.optional_u64(key, min).unwrap_or(default)
    }

    fn u32(&mut self, key: &str, default: u32, min: u32) -> u32 {
        let n = self.u64(key, u64::from(default), u64::from(min));
        match u32::try_from(n) {
            Ok(n) => n,
            Err(_) => {
                self.fail(key, format!("must be at most {}, got {}", u32::MAX, n));
                default
            }
        }
    }

    fn bool(&mut self, key: &str, default: bool) -> bool {
        match self.value(key).map(RawValue::as_bool) {
            None => default,
            Some(Ok(b)) => b,
            Some(Err(reason)) => {
                self.fail(key, reason);
                default
            }
        }
    }

    fn parsed<T>(&mut self, key: &str) -> T
    where
        T: FromStr<Err = String> + Default,
    {
        match self.value(key).map(|v| v.as_string().parse::<T>()) {
            None => T::default(),
            Some(Ok(value)) => value,
            Some(Err(reason)) => {
                self.fail(key, reason);
                T::default()
            }
        }
    }
}
