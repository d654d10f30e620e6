//! Elasticsearch storage client configuration
//!
//! - `hosts` - host list parsing and normalization
//! - `index_name` - daily index names
//! - `auth` - basic auth credentials and interceptor
//! - `interceptor` - network interceptor registry and chain ordering
//! - `logging` - request/response logging interceptor
//! - `http` - the HTTP client built from the resolved settings
//! - `resolver` - turns raw properties into validated components

pub mod auth;
pub mod error;
pub mod hosts;
pub mod http;
pub mod index_name;
pub mod interceptor;
pub mod logging;
pub mod resolver;
pub mod storage;

pub use auth::{BASIC_AUTH_INTERCEPTOR, BasicAuthInterceptor, BasicCredentials};
pub use error::{ConfigError, Error, FieldError};
pub use hosts::HostError;
pub use self::http::HttpClient;
pub use index_name::{IndexNameError, IndexNameFormatter};
pub use interceptor::{InterceptorRegistry, NetworkInterceptor};
pub use logging::{HTTP_LOGGING_INTERCEPTOR, HttpLogging};
pub use resolver::{ClientConfigResolver, Components, resolve};
pub use storage::StorageConfig;
