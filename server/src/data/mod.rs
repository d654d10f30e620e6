//! Storage backends
//!
//! - `elasticsearch` - Elasticsearch client configuration and HTTP client

pub mod elasticsearch;

pub use elasticsearch::{Components, StorageConfig};
