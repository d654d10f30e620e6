//! Network interceptors attached to the Elasticsearch HTTP client
//!
//! Interceptors are [`reqwest_middleware::Middleware`] instances. Other parts
//! of the server register them under a qualifier; the resolver picks up the
//! ones qualified with [`ES_HTTP_QUALIFIER`](crate::core::constants::ES_HTTP_QUALIFIER).

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use reqwest_middleware::Middleware;

/// A named, shareable middleware. Equality is by instance, not by name.
#[derive(Clone)]
pub struct NetworkInterceptor {
    name: Cow<'static, str>,
    middleware: Arc<dyn Middleware>,
}

impl NetworkInterceptor {
    pub fn new(name: impl Into<Cow<'static, str>>, middleware: impl Middleware) -> Self {
        Self::from_arc(name, Arc::new(middleware))
    }

    pub fn from_arc(name: impl Into<Cow<'static, str>>, middleware: Arc<dyn Middleware>) -> Self {
        Self {
            name: name.into(),
            middleware,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn middleware(&self) -> Arc<dyn Middleware> {
        Arc::clone(&self.middleware)
    }

    /// Whether both handles point at the same middleware instance
    pub fn ptr_eq(&self, other: &NetworkInterceptor) -> bool {
        Arc::ptr_eq(&self.middleware, &other.middleware)
    }
}

impl fmt::Debug for NetworkInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkInterceptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Interceptors registered elsewhere in the server, tagged by qualifier
#[derive(Debug, Clone, Default)]
pub struct InterceptorRegistry {
    entries: Vec<(String, NetworkInterceptor)>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interceptor. Registering the same instance twice keeps both.
    pub fn register(
        &mut self,
        qualifier: impl Into<String>,
        interceptor: NetworkInterceptor,
    ) -> &mut Self {
        let qualifier = qualifier.into();
        tracing::trace!(qualifier = %qualifier, name = interceptor.name(), "Registering interceptor");
        self.entries.push((qualifier, interceptor));
        self
    }

    /// Interceptors registered under `qualifier`, in registration order
    pub fn qualified(&self, qualifier: &str) -> Vec<NetworkInterceptor> {
        self.entries
            .iter()
            .filter(|(q, _)| q == qualifier)
            .map(|(_, interceptor)| interceptor.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Order the final network interceptor chain: basic auth first, then the
/// qualified interceptors in registration order, then request logging.
pub fn aggregate_interceptors(
    basic_auth: Option<&NetworkInterceptor>,
    registry: &InterceptorRegistry,
    qualifier: &str,
    http_logging: Option<&NetworkInterceptor>,
) -> Vec<NetworkInterceptor> {
    basic_auth
        .cloned()
        .into_iter()
        .chain(registry.qualified(qualifier))
        .chain(http_logging.cloned())
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use http::Extensions;
    use reqwest::{Request, Response};
    use reqwest_middleware::Next;

    /// Pass-through middleware for tests
    pub(crate) struct PassThrough;

    #[async_trait::async_trait]
    impl Middleware for PassThrough {
        async fn handle(
            &self,
            req: Request,
            extensions: &mut Extensions,
            next: Next<'_>,
        ) -> reqwest_middleware::Result<Response> {
            next.run(req, extensions).await
        }
    }

    #[test]
    fn test_ptr_eq_is_by_instance() {
        let one = NetworkInterceptor::new("one", PassThrough);
        let other = NetworkInterceptor::new("one", PassThrough);
        assert!(one.ptr_eq(&one.clone()));
        assert!(!one.ptr_eq(&other));
    }

    #[test]
    fn test_qualified_filters_and_keeps_order() {
        let one = NetworkInterceptor::new("one", PassThrough);
        let two = NetworkInterceptor::new("two", PassThrough);
        let other = NetworkInterceptor::new("other", PassThrough);

        let mut registry = InterceptorRegistry::new();
        registry
            .register("es", one.clone())
            .register("cassandra", other)
            .register("es", two.clone());

        let qualified = registry.qualified("es");
        assert_eq!(qualified.len(), 2);
        assert!(qualified[0].ptr_eq(&one));
        assert!(qualified[1].ptr_eq(&two));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let one = NetworkInterceptor::new("one", PassThrough);
        let mut registry = InterceptorRegistry::new();
        registry.register("es", one.clone()).register("es", one.clone());

        let qualified = registry.qualified("es");
        assert_eq!(qualified.len(), 2);
        assert!(qualified.iter().all(|i| i.ptr_eq(&one)));
    }

    #[test]
    fn test_unknown_qualifier_is_empty() {
        let registry = InterceptorRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.qualified("es").is_empty());
    }

    #[test]
    fn test_aggregate_order() {
        let auth = NetworkInterceptor::new("basic-auth", PassThrough);
        let logging = NetworkInterceptor::new("http-logging", PassThrough);
        let one = NetworkInterceptor::new("one", PassThrough);
        let mut registry = InterceptorRegistry::new();
        registry.register("es", one.clone());

        let chain = aggregate_interceptors(Some(&auth), &registry, "es", Some(&logging));
        let names: Vec<_> = chain.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["basic-auth", "one", "http-logging"]);
        assert!(chain[1].ptr_eq(&one));

        let chain = aggregate_interceptors(None, &registry, "es", None);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_debug_shows_name_only() {
        let one = NetworkInterceptor::new("one", PassThrough);
        let debug = format!("{:?}", one);
        assert!(debug.contains("\"one\""));
    }
}
