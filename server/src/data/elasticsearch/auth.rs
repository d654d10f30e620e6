//! Basic authentication for the Elasticsearch HTTP client

use std::fmt;

use base64::Engine;
use http::Extensions;
use http::header::{AUTHORIZATION, HeaderValue, InvalidHeaderValue};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

use super::interceptor::NetworkInterceptor;

/// Name under which the basic auth interceptor appears in the chain
pub const BASIC_AUTH_INTERCEPTOR: &str = "basic-auth";

#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// `Basic base64(username:password)`
    pub fn header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Credentials are only produced when both parts are present and non-empty.
pub fn basic_auth_credentials(
    username: Option<&str>,
    password: Option<&str>,
) -> Option<BasicCredentials> {
    match (username, password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Some(BasicCredentials {
                username: username.to_string(),
                password: password.to_string(),
            })
        }
        _ => None,
    }
}

/// Adds the `Authorization` header to every outgoing request
#[derive(Debug, Clone)]
pub struct BasicAuthInterceptor {
    header: HeaderValue,
}

impl BasicAuthInterceptor {
    pub fn new(credentials: &BasicCredentials) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            header: credentials.header_value()?,
        })
    }

    pub fn into_network_interceptor(self) -> NetworkInterceptor {
        NetworkInterceptor::new(BASIC_AUTH_INTERCEPTOR, self)
    }
}

#[async_trait::async_trait]
impl Middleware for BasicAuthInterceptor {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        req.headers_mut().insert(AUTHORIZATION, self.header.clone());
        next.run(req, extensions).await
    }
}
