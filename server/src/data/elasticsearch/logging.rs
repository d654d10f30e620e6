//! Request/response logging for the Elasticsearch HTTP client

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use http::{Extensions, HeaderMap};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

use super::interceptor::NetworkInterceptor;

/// Name under which the logging interceptor appears in the chain
pub const HTTP_LOGGING_INTERCEPTOR: &str = "http-logging";

/// How much of each exchange to log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum HttpLogging {
    #[default]
    None,
    /// Method, URL, status and latency
    Basic,
    /// Basic plus request and response headers
    Headers,
    /// Headers plus the request body
    Body,
}

impl HttpLogging {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Basic => "BASIC",
            Self::Headers => "HEADERS",
            Self::Body => "BODY",
        }
    }
}

impl fmt::Display for HttpLogging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpLogging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "BASIC" => Ok(Self::Basic),
            "HEADERS" => Ok(Self::Headers),
            "BODY" => Ok(Self::Body),
            _ => Err(format!(
                "invalid http logging level '{}'. Valid options: NONE, BASIC, HEADERS, BODY",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HttpLoggingInterceptor {
    level: HttpLogging,
}

impl HttpLoggingInterceptor {
    /// `None` when logging is disabled
    pub fn new(level: HttpLogging) -> Option<Self> {
        (level != HttpLogging::None).then_some(Self { level })
    }

    pub fn into_network_interceptor(self) -> NetworkInterceptor {
        NetworkInterceptor::new(HTTP_LOGGING_INTERCEPTOR, self)
    }
}

#[async_trait::async_trait]
impl Middleware for HttpLoggingInterceptor {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let url = req.url().clone();

        tracing::info!(method = %method, url = %url, "--> Elasticsearch request");
        if self.level >= HttpLogging::Headers {
            tracing::info!(headers = %format_headers(req.headers()), "--> request headers");
        }
        if self.level >= HttpLogging::Body
            && let Some(body) = req.body().and_then(|b| b.as_bytes())
        {
            tracing::info!(body = %String::from_utf8_lossy(body), "--> request body");
        }

        let start = Instant::now();
        let result = next.run(req, extensions).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(resp) => {
                tracing::info!(
                    method = %method,
                    url = %url,
                    status = resp.status().as_u16(),
                    elapsed_ms,
                    "<-- Elasticsearch response"
                );
                if self.level >= HttpLogging::Headers {
                    tracing::info!(headers = %format_headers(resp.headers()), "<-- response headers");
                }
            }
            Err(e) => {
                tracing::warn!(
                    method = %method,
                    url = %url,
                    elapsed_ms,
                    error = %e,
                    "<-- Elasticsearch request failed"
                );
            }
        }
        result
    }
}

/// Render headers as `name: value` pairs, masking sensitive values
fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if value.is_sensitive() {
                "***".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            format!("{}: {}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_parse_levels() {
        assert_eq!("none".parse::<HttpLogging>().unwrap(), HttpLogging::None);
        assert_eq!("BASIC".parse::<HttpLogging>().unwrap(), HttpLogging::Basic);
        assert_eq!(" headers ".parse::<HttpLogging>().unwrap(), HttpLogging::Headers);
        assert_eq!("Body".parse::<HttpLogging>().unwrap(), HttpLogging::Body);
        assert!("verbose".parse::<HttpLogging>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(HttpLogging::Headers.to_string(), "HEADERS");
        assert_eq!(HttpLogging::default(), HttpLogging::None);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(HttpLogging::Body > HttpLogging::Headers);
        assert!(HttpLogging::Headers > HttpLogging::Basic);
    }

    #[test]
    fn test_none_produces_no_interceptor() {
        assert!(HttpLoggingInterceptor::new(HttpLogging::None).is_none());
        let interceptor = HttpLoggingInterceptor::new(HttpLogging::Basic)
            .unwrap()
            .into_network_interceptor();
        assert_eq!(interceptor.name(), HTTP_LOGGING_INTERCEPTOR);
    }

    #[test]
    fn test_format_headers_masks_sensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let mut secret = HeaderValue::from_static("Basic abc");
        secret.set_sensitive(true);
        headers.insert("authorization", secret);

        let rendered = format_headers(&headers);
        assert!(rendered.contains("content-type: application/json"));
        assert!(rendered.contains("authorization: ***"));
        assert!(!rendered.contains("abc"));
    }
}
