use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub fn config_file() -> PathBuf { dirs::home_dir().unwrap().join(".monad-stack.toml") }

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which side of the screen the main pane occupies.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Right,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Fraction of the screen width occupied by the main pane.
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    /// Side of the screen the main pane occupies ("left" or "right").
    #[serde(default)]
    pub align: Align,
    /// Size deltas below this threshold are treated as no-ops so that
    /// repeated relayouts do not thrash the screen.
    #[serde(default = "default_change_size")]
    pub change_size: f64,
    /// Minimum height each non-focused secondary pane keeps while another
    /// secondary is maximized.
    #[serde(default = "default_min_secondary_size")]
    pub min_secondary_size: f64,
    /// Maximize the focused secondary window, collapsing the others.
    #[serde(default = "yes")]
    pub auto_maximize: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            ratio: default_ratio(),
            align: Align::default(),
            change_size: default_change_size(),
            min_secondary_size: default_min_secondary_size(),
            auto_maximize: true,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(self.ratio > 0.0 && self.ratio < 1.0) {
            issues.push(format!(
                "ratio must be strictly between 0.0 and 1.0, got {}",
                self.ratio
            ));
        }

        if self.change_size < 0.0 {
            issues.push(format!(
                "change_size must be non-negative, got {}",
                self.change_size
            ));
        }

        if self.min_secondary_size <= 0.0 {
            issues.push(format!(
                "min_secondary_size must be positive, got {}",
                self.min_secondary_size
            ));
        }

        issues
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub layout: LayoutSettings,
}

impl Settings {
    pub fn validate(&self) -> Vec<String> { self.layout.validate() }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Ok(Self::parse(&buf)?)
    }

    pub fn parse(buf: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(buf)?;
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(ConfigError::Invalid(issues.join("; ")));
        }
        Ok(config)
    }

    /// Save the current config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;
        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }
}

fn yes() -> bool { true }

fn default_ratio() -> f64 { 0.5 }

fn default_change_size() -> f64 { 20.0 }

fn default_min_secondary_size() -> f64 { 40.0 }
