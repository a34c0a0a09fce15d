//! Runtime configuration, read from TOML.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crossterm::style;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TreeScanError;
use crate::index::{DEFAULT_INDEX_FILE, DEFAULT_MARKER};

pub const CONFIG_ENV: &str = "TREESCAN_CONFIG";
pub const CONFIG_FILE: &str = "treescan.toml";

/// Output names, template location and listing behaviour.
///
/// Every field is optional in the file; missing ones keep their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub index_file: String,
    pub marker: String,
    /// Directory the report template is loaded from, relative to the
    /// working directory.
    pub template_dir: PathBuf,
    pub template_name: String,
    /// Report file, written in the working directory.
    pub report_file: PathBuf,
    pub sort_entries: bool,
    pub exclude_index: bool,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_file: DEFAULT_INDEX_FILE.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            template_dir: PathBuf::from("templates"),
            template_name: "stats.html".to_string(),
            report_file: PathBuf::from("stats.html"),
            sort_entries: false,
            exclude_index: false,
            theme: Theme::default(),
        }
    }
}

/// Console colours of the summary output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "Theme::default_heading")]
    pub heading: Color,
    #[serde(default = "Theme::default_path")]
    pub path: Color,
    #[serde(default = "Theme::default_percentage")]
    pub percentage: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            heading: Self::default_heading(),
            path: Self::default_path(),
            percentage: Self::default_percentage(),
        }
    }
}

impl Theme {
    fn default_heading() -> Color {
        Color::preset("cyan")
    }

    fn default_path() -> Color {
        Color::preset("blue")
    }

    fn default_percentage() -> Color {
        Color::preset("yellow")
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.heading.validate()?;
        self.path.validate()?;
        self.percentage.validate()?;
        Ok(())
    }
}

/// A named preset or an RGB triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Preset { name: String },
    RGB { r: u8, g: u8, b: u8 },
}

impl Color {
    fn preset(name: &str) -> Self {
        Color::Preset {
            name: name.to_string(),
        }
    }

    /// Resolves to a terminal colour.
    pub fn to_style(&self) -> anyhow::Result<style::Color> {
        match self {
            Color::Preset { name } => parse_preset(name),
            Color::RGB { r, g, b } => Ok(style::Color::Rgb {
                r: *r,
                g: *g,
                b: *b,
            }),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.to_style().map(|_| ())
    }
}

fn parse_preset(name: &str) -> anyhow::Result<style::Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "reset" | "default" => style::Color::Reset,
        "red" => style::Color::Red,
        "yellow" | "yel" => style::Color::Yellow,
        "blue" => style::Color::Blue,
        "green" => style::Color::Green,
        "cyan" => style::Color::Cyan,
        "magenta" | "purple" => style::Color::Magenta,
        "white" => style::Color::White,
        "grey" | "gray" => style::Color::Grey,
        other => anyhow::bail!("Unknown preset color: {other}"),
    };
    Ok(color)
}

impl Config {
    /// Reads and validates a config file.
    pub fn load_from_file(path: &Path) -> Result<Self, TreeScanError> {
        let parse = || -> anyhow::Result<Self> {
            let text = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&text)?;
            config.theme.validate()?;
            Ok(config)
        };
        parse().map_err(|source| TreeScanError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Loads the config named by `TREESCAN_CONFIG`, else `treescan.toml` in the
/// working directory, else the defaults.
///
/// A file that exists but does not parse is reported and skipped.
pub fn load_config_from_env_or_default() -> Config {
    let candidates = env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .into_iter()
        .chain(std::iter::once(PathBuf::from(CONFIG_FILE)));

    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match Config::load_from_file(&path) {
            Ok(config) => {
                debug!("config loaded from {}", path.display());
                return config;
            }
            Err(e) => warn!("{:#}", anyhow::Error::from(e)),
        }
    }
    Config::default()
}
