use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    entries::{DEFAULT_MARKER_INTERFACE, DEFAULT_SHORTENED_INFIXES, ShorteningRules},
    table::check_format,
};

pub const CONFIG_FILE_NAME: &str = ".quillrc.json";

/// Configuration read from `.quillrc.json`.
///
/// Relative paths (`exclude`, `output`, `table`) resolve against the source root.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_marker_interface")]
    pub marker_interface: String,
    #[serde(default = "default_shortened_infixes")]
    pub shortened_infixes: Vec<String>,
    #[serde(default = "default_export_extension")]
    pub export_extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

fn default_marker_interface() -> String {
    DEFAULT_MARKER_INTERFACE.to_string()
}

fn default_shortened_infixes() -> Vec<String> {
    DEFAULT_SHORTENED_INFIXES
        .iter()
        .map(|infix| infix.to_string())
        .collect()
}

fn default_export_extension() -> String {
    "json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_interface: default_marker_interface(),
            shortened_infixes: default_shortened_infixes(),
            export_extension: default_export_extension(),
            exclude: None,
            output: None,
            table: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.marker_interface.is_empty()
            || !self
                .marker_interface
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_')
        {
            bail!(
                "Invalid 'markerInterface': \"{}\" is not a type name",
                self.marker_interface
            );
        }

        self.shortening_rules()?;

        if self.export_extension.is_empty() || self.export_extension.starts_with('.') {
            bail!(
                "Invalid 'exportExtension': \"{}\" (expected an extension without a leading dot)",
                self.export_extension
            );
        }

        if let Some(pattern) = &self.exclude
            && (pattern.contains('*') || pattern.contains('?'))
        {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'exclude': \"{}\"", pattern))?;
        }

        if let Some(table) = &self.table {
            check_format(Path::new(table)).context("Invalid 'table'")?;
        }

        Ok(())
    }

    pub fn shortening_rules(&self) -> Result<ShorteningRules> {
        ShorteningRules::new(self.shortened_infixes.clone()).context("Invalid 'shortenedInfixes'")
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
