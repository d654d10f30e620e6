//! Core application

use anyhow::Result;

use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::RawConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG, KEY_STORAGE_TYPE};
use crate::data::elasticsearch::{Components, Error, InterceptorRegistry, resolve};
use crate::utils::time::now_millis;

pub struct CoreApp {
    pub config: RawConfig,
    pub components: Components,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config, &InterceptorRegistry::new())?;

        match command.unwrap_or(Commands::Check) {
            Commands::Check => app.check(),
            Commands::IndexName {
                index_type,
                timestamp,
            } => app.index_name(&index_type, timestamp),
            Commands::Ping => app.ping().await,
        }
    }

    /// Load properties from every source and resolve the storage components
    pub fn init(cli: &CliConfig, registry: &InterceptorRegistry) -> Result<Self> {
        let config = RawConfig::load(cli)?;
        let components = resolve(&config, registry)?;
        Ok(Self { config, components })
    }

    fn check(&self) -> Result<()> {
        if !self.components.is_activated() {
            let storage_type = self.config.get(KEY_STORAGE_TYPE).map(|v| v.as_string());
            banner::print_not_activated(storage_type.as_deref());
            return Ok(());
        }
        banner::print_storage_summary(self.components.storage()?, self.components.http_client()?);
        Ok(())
    }

    fn index_name(&self, index_type: &str, timestamp: Option<i64>) -> Result<()> {
        let storage = self.components.storage()?;
        let timestamp = timestamp.unwrap_or_else(now_millis);
        println!(
            "{}",
            storage
                .index_name_formatter()
                .format_type_and_timestamp(index_type, timestamp)
        );
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let storage = self.components.storage()?;
        let client = self.components.http_client()?;

        let mut failed = 0;
        for host in storage.hosts() {
            let url = format!("{}/", host);
            tracing::debug!(url = %url, "Pinging Elasticsearch host");

            let result = match client.get(&url).send().await {
                Ok(response) => Ok(response.status().as_u16()),
                Err(e) => Err(Error::from(e).to_string()),
            };
            if !matches!(result, Ok(status) if (200..300).contains(&status)) {
                failed += 1;
            }
            banner::print_ping_result(host, &result);
        }

        if failed > 0 {
            anyhow::bail!(
                "{} of {} Elasticsearch hosts did not respond successfully",
                failed,
                storage.hosts().len()
            );
        }
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}_server=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::core::constants::KEY_ES_HOSTS;

    fn cli_with_file(json: &str) -> (tempfile::NamedTempFile, CliConfig) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        (file, cli)
    }

    #[test]
    fn test_init_resolves_from_config_file() {
        let (_file, cli) = cli_with_file(
            r#"{ "zipkin": { "storage": { "type": "elasticsearch",
                 "elasticsearch": { "hosts": "host1:9300" } } } }"#,
        );
        let app = CoreApp::init(&cli, &InterceptorRegistry::new()).unwrap();
        assert_eq!(
            app.components.storage().unwrap().hosts(),
            ["http://host1:9200"]
        );
    }

    #[test]
    fn test_init_cli_overrides_file() {
        let (_file, mut cli) = cli_with_file(
            r#"{ "zipkin.storage.type": "elasticsearch", "zipkin.storage.elasticsearch.hosts": "host1" }"#,
        );
        cli.define = vec![(KEY_ES_HOSTS.to_string(), "host2:9201".to_string())];
        let app = CoreApp::init(&cli, &InterceptorRegistry::new()).unwrap();
        assert_eq!(
            app.components.storage().unwrap().hosts(),
            ["http://host2:9201"]
        );
    }

    #[test]
    fn test_init_fails_on_invalid_config() {
        let (_file, cli) = cli_with_file(
            r#"{ "zipkin.storage.type": "elasticsearch", "zipkin.storage.elasticsearch.date-separator": "::" }"#,
        );
        let err = match CoreApp::init(&cli, &InterceptorRegistry::new()) {
            Err(e) => e,
            Ok(_) => panic!("expected invalid configuration to fail"),
        };
        assert!(err.to_string().starts_with("Configuration error:"));
        assert!(err.to_string().contains("date-separator"));
    }

    #[test]
    fn test_init_without_storage_type_is_inactive() {
        let (_file, cli) = cli_with_file(r#"{ "zipkin.storage.elasticsearch.hosts": "host1" }"#);
        let app = CoreApp::init(&cli, &InterceptorRegistry::new()).unwrap();
        assert!(!app.components.is_activated());
        assert!(app.check().is_ok());
        assert!(app.index_name("span", Some(0)).is_err());
    }
}
