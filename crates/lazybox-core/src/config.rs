//! Configuration resolution for `LazyBox`.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/lazybox/settings.json)
//! 3. Project config (.lazybox/settings.json)
//! 4. Environment variables
//! 5. CLI arguments (highest priority)
//!
//! Every source is read as a [`ConfigLayer`] whose unset fields leave the
//! lower layers untouched.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Complete, resolved `LazyBox` configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub keys: KeysConfig,
    /// Sources that contributed, in application order.
    pub sources: Vec<ConfigSource>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Where the key pair comes from. Inline hex keys win over the key file.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
}

impl std::fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeysConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("key_file", &self.key_file)
            .finish()
    }
}

/// One partial configuration source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigLayer {
    #[serde(default)]
    pub logging: LoggingLayer,
    #[serde(default)]
    pub keys: KeysConfig,
}

/// Partial logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

/// Configuration source priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigSource {
    Default = 0,
    Global = 1,
    Project = 2,
    Environment = 3,
    Cli = 4,
}

impl Config {
    /// Overlay `layer` onto this config, recording `source`.
    pub fn apply(&mut self, layer: ConfigLayer, source: ConfigSource) {
        if let Some(level) = layer.logging.level {
            self.logging.level = level;
        }
        if let Some(json) = layer.logging.json {
            self.logging.json = json;
        }
        if layer.keys.public_key.is_some() {
            self.keys.public_key = layer.keys.public_key;
        }
        if layer.keys.secret_key.is_some() {
            self.keys.secret_key = layer.keys.secret_key;
        }
        if layer.keys.key_file.is_some() {
            self.keys.key_file = layer.keys.key_file;
        }
        self.sources.push(source);
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config(project_dir: Option<&Path>, cli: ConfigLayer) -> Result<Config> {
    load_config_from(
        global_config_path().as_deref(),
        project_dir,
        |name| std::env::var(name).ok(),
        cli,
    )
}

/// Load configuration from explicit sources.
pub fn load_config_from(
    global_path: Option<&Path>,
    project_dir: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    cli: ConfigLayer,
) -> Result<Config> {
    let mut config = Config {
        sources: vec![ConfigSource::Default],
        ..Config::default()
    };

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.apply(load_config_file(global_path)?, ConfigSource::Global);
        }
    }

    if let Some(dir) = project_dir {
        let project_path = project_config_path(dir);
        if project_path.exists() {
            config.apply(load_config_file(&project_path)?, ConfigSource::Project);
        }
    }

    config.apply(env_layer(env), ConfigSource::Environment);
    config.apply(cli, ConfigSource::Cli);

    Ok(config)
}

/// Path of the project config file inside `dir`.
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(".lazybox").join("settings.json")
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|h| PathBuf::from(h).join(".lazybox").join("settings.json"))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support/lazybox/settings.json"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|p| p.join("lazybox").join("settings.json"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

fn load_config_file(path: &Path) -> Result<ConfigLayer> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

/// Build the environment layer from `LAZYBOX_*` variables.
pub fn env_layer(env: impl Fn(&str) -> Option<String>) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    if let Some(val) = env("LAZYBOX_LOG_LEVEL") {
        layer.logging.level = Some(val);
    }
    if let Some(val) = env("LAZYBOX_LOG_JSON") {
        layer.logging.json = parse_flag(&val);
    }
    if let Some(val) = env("LAZYBOX_KEY_FILE") {
        layer.keys.key_file = Some(PathBuf::from(val));
    }
    if let Some(val) = env("LAZYBOX_PUBLIC_KEY") {
        layer.keys.public_key = Some(val);
    }
    if let Some(val) = env("LAZYBOX_SECRET_KEY") {
        layer.keys.secret_key = Some(val);
    }
    layer
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_json(path: &Path, json: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, json).unwrap();
    }

    #[test]
    fn defaults_only() {
        let config = load_config_from(None, None, no_env, ConfigLayer::default()).unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.keys, KeysConfig::default());
        assert_eq!(
            config.sources,
            vec![
                ConfigSource::Default,
                ConfigSource::Environment,
                ConfigSource::Cli
            ]
        );
    }

    #[test]
    fn project_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global").join("settings.json");
        write_json(
            &global,
            r#"{"logging": {"level": "info", "json": true}, "keys": {"key_file": "/g.json"}}"#,
        );
        let project = dir.path().join("project");
        write_json(
            &project_config_path(&project),
            r#"{"logging": {"level": "debug"}}"#,
        );

        let config = load_config_from(
            Some(global.as_path()),
            Some(project.as_path()),
            no_env,
            ConfigLayer::default(),
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        // Unset fields in the project layer keep the global value.
        assert!(config.logging.json);
        assert_eq!(config.keys.key_file, Some(PathBuf::from("/g.json")));
        assert!(config.sources.contains(&ConfigSource::Global));
        assert!(config.sources.contains(&ConfigSource::Project));
    }

    #[test]
    fn env_overrides_files_and_cli_overrides_env() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("settings.json");
        write_json(&global, r#"{"logging": {"level": "info"}}"#);

        let env: HashMap<&str, &str> = [
            ("LAZYBOX_LOG_LEVEL", "trace"),
            ("LAZYBOX_LOG_JSON", "yes"),
            ("LAZYBOX_PUBLIC_KEY", "aa"),
            ("LAZYBOX_SECRET_KEY", "bb"),
        ]
        .into_iter()
        .collect();
        let cli = ConfigLayer {
            keys: KeysConfig {
                public_key: Some("cc".into()),
                ..KeysConfig::default()
            },
            ..ConfigLayer::default()
        };

        let config = load_config_from(
            Some(global.as_path()),
            None,
            |name| env.get(name).map(|v| (*v).to_string()),
            cli,
        )
        .unwrap();

        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json);
        assert_eq!(config.keys.public_key.as_deref(), Some("cc"));
        assert_eq!(config.keys.secret_key.as_deref(), Some("bb"));
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(
            Some(dir.path().join("nope.json").as_path()),
            Some(dir.path()),
            no_env,
            ConfigLayer::default(),
        )
        .unwrap();
        assert!(!config.sources.contains(&ConfigSource::Global));
        assert!(!config.sources.contains(&ConfigSource::Project));
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("settings.json");
        write_json(&global, "{ not json");

        let result =
            load_config_from(Some(global.as_path()), None, no_env, ConfigLayer::default());
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("Failed to parse")));
    }

    #[test]
    fn unparsable_json_flag_is_ignored() {
        let layer = env_layer(|name| (name == "LAZYBOX_LOG_JSON").then(|| "maybe".to_string()));
        assert_eq!(layer.logging.json, None);
    }

    #[test]
    fn keys_debug_redacts_secret() {
        let keys = KeysConfig {
            public_key: Some("aa".into()),
            secret_key: Some("deadbeef".into()),
            key_file: None,
        };
        let debug = format!("{keys:?}");
        assert!(!debug.contains("deadbeef"));
        assert!(debug.contains("[REDACTED]"));
    }
}
