//! Host list normalization
//!
//! Turns a comma separated list of `host`, `host:port` or
//! `scheme://host[:port][/path]` entries into canonical base URLs.
//!
//! | Input | Output |
//! |-------|--------|
//! | `host1` | `http://host1:9200` |
//! | `host1:9300` | `http://host1:9200` |
//! | `https://host1:443` | `https://host1:443` |
//! | `[::1]` | `http://[::1]:9200` |

use thiserror::Error;

use crate::core::constants::{ES_HTTP_PORT, ES_TRANSPORT_PORT};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("no hosts configured")]
    Empty,

    #[error("'{entry}' has no host name")]
    MissingHost { entry: String },

    #[error("'{entry}' has an invalid port '{port}'")]
    InvalidPort { entry: String, port: String },

    #[error("'{entry}' uses unsupported scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { entry: String, scheme: String },

    #[error("'{entry}' must not embed credentials; use username and password instead")]
    Credentials { entry: String },

    #[error("'{entry}' is not a valid URL: {reason}")]
    Malformed { entry: String, reason: String },
}

/// Resolve a delimited host list, preserving order and duplicates.
pub fn resolve_hosts(raw: &str) -> Result<Vec<String>, HostError> {
    let hosts = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(resolve_host)
        .collect::<Result<Vec<_>, _>>()?;

    if hosts.is_empty() {
        return Err(HostError::Empty);
    }
    Ok(hosts)
}

/// Resolve a single host entry into `scheme://host:port[/path]`.
pub fn resolve_host(entry: &str) -> Result<String, HostError> {
    let entry = entry.trim();

    let (scheme, rest) = match entry.split_once("://") {
        Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
        None => ("http".to_string(), entry),
    };
    if scheme != "http" && scheme != "https" {
        return Err(HostError::UnsupportedScheme {
            entry: entry.to_string(),
            scheme,
        });
    }

    let (authority, path) = match rest.find('/') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let path = path.trim_end_matches('/');

    if authority.contains('@') {
        return Err(HostError::Credentials {
            entry: entry.to_string(),
        });
    }
    if let Some(c) = rest
        .chars()
        .find(|&c| matches!(c, '?' | '#' | '\\') || c.is_whitespace())
    {
        return Err(HostError::Malformed {
            entry: entry.to_string(),
            reason: format!("unexpected character '{}'", c.escape_default()),
        });
    }

    let (host, port) = split_host_port(entry, authority)?;
    let port = match port {
        Some(ES_TRANSPORT_PORT) => {
            tracing::warn!(
                host = %host,
                "Port {} is the native transport port; using HTTP port {} instead",
                ES_TRANSPORT_PORT,
                ES_HTTP_PORT
            );
            ES_HTTP_PORT
        }
        Some(port) => port,
        None => ES_HTTP_PORT,
    };

    let url = format!("{}://{}:{}{}", scheme, host, port, path);
    let parsed = reqwest::Url::parse(&url).map_err(|e| HostError::Malformed {
        entry: entry.to_string(),
        reason: e.to_string(),
    })?;
    // The port must survive parsing, not end up in a query, fragment or path
    if parsed.port_or_known_default() != Some(port)
        || parsed.query().is_some()
        || parsed.fragment().is_some()
    {
        return Err(HostError::Malformed {
            entry: entry.to_string(),
            reason: format!("'{}' does not parse back to port {}", url, port),
        });
    }
    Ok(url)
}

/// Split an authority into host and optional port. IPv6 literals must be bracketed.
fn split_host_port<'a>(
    entry: &str,
    authority: &'a str,
) -> Result<(&'a str, Option<u16>), HostError> {
    let (host, port) = if authority.starts_with('[') {
        let end = authority.find(']').ok_or_else(|| HostError::Malformed {
            entry: entry.to_string(),
            reason: "unterminated IPv6 literal".to_string(),
        })?;
        let (host, rest) = authority.split_at(end + 1);
        match rest.strip_prefix(':') {
            Some(port) => (host, Some(port)),
            None if rest.is_empty() => (host, None),
            None => {
                return Err(HostError::Malformed {
                    entry: entry.to_string(),
                    reason: format!("unexpected '{}' after IPv6 literal", rest),
                });
            }
        }
    } else {
        match authority.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    if host.is_empty() || host == "[]" {
        return Err(HostError::MissingHost {
            entry: entry.to_string(),
        });
    }

    let port = port
        .map(|p| {
            p.parse::<u16>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| HostError::InvalidPort {
                    entry: entry.to_string(),
                    port: p.to_string(),
                })
        })
        .transpose()?;

    Ok((host, port))
}
