//! Terminal output for the `check` and `ping` commands

use super::constants::{APP_NAME, KEY_STORAGE_TYPE, STORAGE_TYPE_ELASTICSEARCH};
use crate::data::elasticsearch::{HttpClient, StorageConfig};

// Label width: "Names lookback:" is 15 chars, pad to 17 for alignment
const W: usize = 17;

fn print_header() {
    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
}

fn print_row(label: &str, value: &str) {
    println!("  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}", label, value);
}

fn print_muted(label: &str, value: &str) {
    println!("  \x1b[90m➜  {:<W$} {}\x1b[0m", label, value);
}

/// Print the resolved storage settings. The password is never shown.
pub fn print_storage_summary(storage: &StorageConfig, client: &HttpClient) {
    print_header();

    print_row("Storage:", STORAGE_TYPE_ELASTICSEARCH);
    for (i, host) in storage.hosts().iter().enumerate() {
        print_row(if i == 0 { "Hosts:" } else { "" }, host);
    }

    let formatter = storage.index_name_formatter();
    print_row(
        "Index:",
        &format!(
            "{} \x1b[90m({} shards, {} replicas)\x1b[0m",
            formatter.format_type("span"),
            storage.index_shards(),
            storage.index_replicas()
        ),
    );
    match storage.pipeline() {
        Some(pipeline) => print_row("Pipeline:", pipeline),
        None => print_muted("Pipeline:", "none"),
    }
    match storage.basic_auth() {
        Some(credentials) => print_row("Basic auth:", &format!("{}:***", credentials.username())),
        None => print_muted("Basic auth:", "disabled"),
    }

    print_row("Timeout:", &format!("{} ms", storage.timeout_millis()));
    print_row("Max requests:", &storage.max_requests().to_string());
    print_row("Strict trace ID:", &storage.strict_trace_id().to_string());
    print_row("Search:", if storage.search_enabled() { "enabled" } else { "disabled" });
    print_row("Names lookback:", &format!("{} ms", storage.names_lookback()));

    let interceptors = client
        .network_interceptors()
        .iter()
        .map(|i| i.name())
        .collect::<Vec<_>>();
    if interceptors.is_empty() {
        print_muted("Interceptors:", "none");
    } else {
        print_row("Interceptors:", &interceptors.join(", "));
    }
    print_muted("HTTP logging:", storage.http_logging().as_str());

    println!();
}

/// Print a notice that another storage type (or none) was selected
pub fn print_not_activated(storage_type: Option<&str>) {
    print_header();
    print_muted("Storage:", storage_type.unwrap_or("not set"));
    println!(
        "  Elasticsearch storage is inactive. Set {}={} to enable it.",
        KEY_STORAGE_TYPE, STORAGE_TYPE_ELASTICSEARCH
    );
    println!();
}

/// Print the outcome of a request to one host
pub fn print_ping_result(host: &str, result: &Result<u16, String>) {
    match result {
        Ok(status) if (200..300).contains(status) => {
            println!("  \x1b[32m✔\x1b[0m  {:<40} {}", host, status)
        }
        Ok(status) => println!("  \x1b[33m!\x1b[0m  {:<40} {}", host, status),
        Err(e) => println!("  \x1b[31m✘\x1b[0m  {:<40} {}", host, e),
    }
}
