// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Zipkin";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "zipkin";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".zipkin";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "zipkin.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "ZIPKIN_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ZIPKIN_LOG";

// =============================================================================
// Property Keys - Storage
// =============================================================================

/// Storage backend discriminator
pub const KEY_STORAGE_TYPE: &str = "zipkin.storage.type";

pub const KEY_STRICT_TRACE_ID: &str = "zipkin.storage.strict-trace-id";

pub const KEY_SEARCH_ENABLED: &str = "zipkin.storage.search-enabled";

/// Query lookback in milliseconds, shared with the query API
pub const KEY_QUERY_LOOKBACK: &str = "zipkin.query.lookback";

// =============================================================================
// Property Keys - Elasticsearch
// =============================================================================

pub const KEY_ES_HOSTS: &str = "zipkin.storage.elasticsearch.hosts";
pub const KEY_ES_PIPELINE: &str = "zipkin.storage.elasticsearch.pipeline";
pub const KEY_ES_MAX_REQUESTS: &str = "zipkin.storage.elasticsearch.max-requests";
pub const KEY_ES_TIMEOUT: &str = "zipkin.storage.elasticsearch.timeout";
pub const KEY_ES_USERNAME: &str = "zipkin.storage.elasticsearch.username";
pub const KEY_ES_PASSWORD: &str = "zipkin.storage.elasticsearch.password";
pub const KEY_ES_INDEX: &str = "zipkin.storage.elasticsearch.index";
pub const KEY_ES_DATE_SEPARATOR: &str = "zipkin.storage.elasticsearch.date-separator";
pub const KEY_ES_INDEX_SHARDS: &str = "zipkin.storage.elasticsearch.index-shards";
pub const KEY_ES_INDEX_REPLICAS: &str = "zipkin.storage.elasticsearch.index-replicas";
pub const KEY_ES_HTTP_LOGGING: &str = "zipkin.storage.elasticsearch.http-logging";
pub const KEY_ES_NAMES_LOOKBACK: &str = "zipkin.storage.elasticsearch.names-lookback";

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_STORAGE_TYPE: &str = "STORAGE_TYPE";
pub const ENV_STRICT_TRACE_ID: &str = "STRICT_TRACE_ID";
pub const ENV_SEARCH_ENABLED: &str = "SEARCH_ENABLED";
pub const ENV_QUERY_LOOKBACK: &str = "QUERY_LOOKBACK";
pub const ENV_ES_HOSTS: &str = "ES_HOSTS";
pub const ENV_ES_PIPELINE: &str = "ES_PIPELINE";
pub const ENV_ES_MAX_REQUESTS: &str = "ES_MAX_REQUESTS";
pub const ENV_ES_TIMEOUT: &str = "ES_TIMEOUT";
pub const ENV_ES_USERNAME: &str = "ES_USERNAME";
pub const ENV_ES_PASSWORD: &str = "ES_PASSWORD";
pub const ENV_ES_INDEX: &str = "ES_INDEX";
pub const ENV_ES_DATE_SEPARATOR: &str = "ES_DATE_SEPARATOR";
pub const ENV_ES_INDEX_SHARDS: &str = "ES_INDEX_SHARDS";
pub const ENV_ES_INDEX_REPLICAS: &str = "ES_INDEX_REPLICAS";
pub const ENV_ES_HTTP_LOGGING: &str = "ES_HTTP_LOGGING";
pub const ENV_ES_NAMES_LOOKBACK: &str = "ES_NAMES_LOOKBACK";

// =============================================================================
// Elasticsearch Defaults
// =============================================================================

/// Value of `zipkin.storage.type` that activates the Elasticsearch client
pub const STORAGE_TYPE_ELASTICSEARCH: &str = "elasticsearch";

/// Used when no hosts are configured at all
pub const DEFAULT_ES_HOSTS: &str = "http://localhost:9200";

/// HTTP port
pub const ES_HTTP_PORT: u16 = 9200;

/// Legacy native transport port, rewritten to the HTTP port
pub const ES_TRANSPORT_PORT: u16 = 9300;

pub const DEFAULT_ES_MAX_REQUESTS: u32 = 64;

/// Connect, read and write timeout (milliseconds)
pub const DEFAULT_ES_TIMEOUT_MS: u64 = 10_000;

pub const DEFAULT_ES_INDEX: &str = "zipkin";

pub const DEFAULT_ES_DATE_SEPARATOR: char = '-';

pub const DEFAULT_ES_INDEX_SHARDS: u32 = 5;

pub const DEFAULT_ES_INDEX_REPLICAS: u32 = 1;

/// Names lookback when neither it nor the query lookback is set (1 day)
pub const DEFAULT_NAMES_LOOKBACK_MS: u64 = 86_400_000;

/// Qualifier of externally registered interceptors for this client
pub const ES_HTTP_QUALIFIER: &str = "zipkinElasticsearchHttp";
