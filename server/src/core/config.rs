use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Number, Value};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME};

// =============================================================================
// Raw Values
// =============================================================================

/// A property value as supplied by a config source, before coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    String(String),
    Number(Number),
    Bool(bool),
}

impl RawValue {
    /// String form of the value, untrimmed
    pub fn as_string(&self) -> String {
        match self {
            RawValue::String(s) => s.clone(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Bool(b) => b.to_string(),
        }
    }

    /// Whether this is a string containing only whitespace
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::String(s) if s.trim().is_empty())
    }

    pub fn as_u64(&self) -> Result<u64, String> {
        match self {
            RawValue::Number(n) => n
                .as_u64()
                .ok_or_else(|| format!("'{}' is not a non-negative integer", n)),
            RawValue::String(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("'{}' is not a non-negative integer", s)),
            RawValue::Bool(b) => Err(format!("'{}' is not a non-negative integer", b)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, String> {
        match self {
            RawValue::Bool(b) => Ok(*b),
            RawValue::String(s) => match s.trim().to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(format!("'{}' is not a boolean (expected true or false)", s)),
            },
            RawValue::Number(n) => Err(format!(
                "'{}' is not a boolean (expected true or false)",
                n
            )),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<u64> for RawValue {
    fn from(n: u64) -> Self {
        RawValue::Number(n.into())
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n.into())
    }
}

// =============================================================================
// Raw Config
// =============================================================================

/// Flat property map keyed by dotted names such as `zipkin.storage.type`.
/// Later writes to a key replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    values: BTreeMap<String, RawValue>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut config = Self::new();
        for (key, value) in pairs {
            config.set(key, value);
        }
        config
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<RawValue>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: RawConfig) {
        for (key, value) in other.values {
            tracing::trace!(key = %key, "Merging property");
            self.values.insert(key, value);
        }
    }

    /// Parse a JSON document, nested or flat, into dotted keys.
    /// Arrays are joined with commas and nulls are skipped.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut config = Self::new();
        flatten_json(None, &value, &mut config);
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(keys = config.len(), "Parsed config file");
        Ok(config)
    }

    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Profile directory config (~/.zipkin/zipkin.json)
    /// 2. Local directory config OR CLI-specified config path
    /// 3. CLI arguments (which include env var fallbacks via clap)
    /// 4. `-D key=value` properties
    ///
    /// Defaults are applied later, by the component that reads each key.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading configuration properties");

        let mut config = RawConfig::new();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            config.merge(Self::load_from_file(&profile_path)?);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            config.merge(Self::load_from_file(&path)?);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. CLI/env overrides
        config.merge(cli.to_raw_config());

        tracing::debug!(
            keys = ?config.values.keys().collect::<Vec<_>>(),
            "Configuration properties loaded"
        );
        Ok(config)
    }
}

fn flatten_json(prefix: Option<&str>, value: &Value, out: &mut RawConfig) {
    let key = |k: &str| match prefix {
        Some(p) => format!("{}.{}", p, k),
        None => k.to_string(),
    };
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                flatten_json(Some(key(k).as_str()), v, out);
            }
        }
        Value::Null => {}
        scalar => {
            if let (Some(prefix), Some(raw)) = (prefix, scalar_to_raw(scalar)) {
                out.set(prefix, raw);
            }
        }
    }
}

fn scalar_to_raw(value: &Value) -> Option<RawValue> {
    match value {
        Value::String(s) => Some(RawValue::String(s.clone())),
        Value::Number(n) => Some(RawValue::Number(n.clone())),
        Value::Bool(b) => Some(RawValue::Bool(*b)),
        Value::Array(items) => Some(RawValue::String(
            items
                .iter()
                .filter_map(scalar_to_raw)
                .map(|v| v.as_string())
                .collect::<Vec<_>>()
                .join(","),
        )),
        Value::Null | Value::Object(_) => None,
    }
}

/// Get the profile config path (~/.zipkin/zipkin.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
