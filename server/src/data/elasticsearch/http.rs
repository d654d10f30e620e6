//! HTTP client used to talk to Elasticsearch
//!
//! A `reqwest` client wrapped in `reqwest-middleware`. The chain is, from
//! the outside in: the request concurrency limit, then the network
//! interceptors in the order they were given.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next, RequestBuilder};
use tokio::sync::Semaphore;

use super::interceptor::NetworkInterceptor;
use crate::core::constants::{APP_NAME, DEFAULT_ES_MAX_REQUESTS, DEFAULT_ES_TIMEOUT_MS};

#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
    network_interceptors: Vec<NetworkInterceptor>,
    connect_timeout: Duration,
    read_timeout: Duration,
    write_timeout: Duration,
    max_requests: u32,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn network_interceptors(&self) -> &[NetworkInterceptor] {
        &self.network_interceptors
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Recorded for parity with the other timeouts; reqwest bounds writes
    /// through the read timeout
    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn inner(&self) -> &ClientWithMiddleware {
        &self.client
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("network_interceptors", &self.network_interceptors)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("max_requests", &self.max_requests)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_requests: u32,
    network_interceptors: Vec<NetworkInterceptor>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_ES_TIMEOUT_MS),
            max_requests: DEFAULT_ES_MAX_REQUESTS,
            network_interceptors: Vec::new(),
        }
    }
}

impl HttpClientBuilder {
    /// Applied to connect, read and write
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = max_requests;
        self
    }

    pub fn network_interceptors(mut self, interceptors: Vec<NetworkInterceptor>) -> Self {
        self.network_interceptors = interceptors;
        self
    }

    pub fn build(self) -> Result<HttpClient, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(self.timeout)
            .read_timeout(self.timeout)
            .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut builder =
            ClientBuilder::new(client).with(ConcurrencyLimit::new(self.max_requests));
        for interceptor in &self.network_interceptors {
            builder = builder.with_arc(interceptor.middleware());
        }

        tracing::debug!(
            timeout_ms = self.timeout.as_millis() as u64,
            max_requests = self.max_requests,
            interceptors = self.network_interceptors.len(),
            "Elasticsearch HTTP client built"
        );

        Ok(HttpClient {
            client: builder.build(),
            network_interceptors: self.network_interceptors,
            connect_timeout: self.timeout,
            read_timeout: self.timeout,
            write_timeout: self.timeout,
            max_requests: self.max_requests,
        })
    }
}

/// Caps the number of in-flight requests
#[derive(Debug, Clone)]
struct ConcurrencyLimit {
    permits: Arc<Semaphore>,
}

impl ConcurrencyLimit {
    fn new(max_requests: u32) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_requests as usize)),
        }
    }
}

#[async_trait::async_trait]
impl Middleware for ConcurrencyLimit {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(reqwest_middleware::Error::middleware)?;
        next.run(req, extensions).await
    }
}
