//! Configuration: TOML file + CLI override merging.
//!
//! Settings resolve in three layers, later layers winning:
//! built-in defaults, then a config file (`./shrink-borders.toml` or the
//! user config directory), then explicit command-line arguments.

use std::path::{Path, PathBuf};

use image::Rgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::border::{BorderOptions, CornerPolicy, MissingBorderPolicy, MAX_PADDING};

/// Local config file name, looked up in the working directory first
const LOCAL_CONFIG: &str = "shrink-borders.toml";

/// Subdirectory under the user config dir
const USER_CONFIG_DIR: &str = "shrink-borders";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid color '{0}': expected RRGGBB or #RRGGBB hex")]
    InvalidColor(String),

    #[error("Padding {0} exceeds the maximum of {MAX_PADDING}")]
    InvalidPadding(u32),
}

/// On-disk configuration. Every field is optional; unset fields fall back
/// to CLI values or built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target uniform border width in pixels
    pub padding: Option<u32>,
    /// Per-channel color match tolerance
    pub tolerance: Option<u8>,
    /// Corner sampling policy
    pub corner_policy: Option<CornerPolicy>,
    /// Behavior when corners disagree
    pub missing_border: Option<MissingBorderPolicy>,
    /// Fallback fill color as RRGGBB hex
    pub fill_color: Option<String>,
    /// Default output directory
    pub output_dir: Option<PathBuf>,
    /// Worker threads for the batch
    pub threads: Option<usize>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// Checks `./shrink-borders.toml`, then the user config directory.
    /// A missing file is not an error; the default config is returned.
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Self::load_from_path(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join(USER_CONFIG_DIR).join("config.toml");
            if user.exists() {
                return Self::load_from_path(&user);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Merge with CLI arguments. CLI values take precedence over the file;
    /// anything still unset falls back to built-in defaults.
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
        let defaults = BorderOptions::default();

        // Reject nonsensical padding before any pixel work
        let padding = cli.padding.or(self.padding).unwrap_or(defaults.padding);
        if padding > MAX_PADDING {
            return Err(ConfigError::InvalidPadding(padding));
        }

        let fill = match cli
            .fill_color
            .as_deref()
            .or(self.fill_color.as_deref())
        {
            Some(hex) => parse_color(hex)?,
            None => defaults.fill,
        };

        let options = BorderOptions::builder()
            .padding(padding)
            .tolerance(
                cli.tolerance
                    .or(self.tolerance)
                    .unwrap_or(defaults.tolerance),
            )
            .corner_policy(
                cli.corner_policy
                    .or(self.corner_policy)
                    .unwrap_or_default(),
            )
            .missing_border(
                cli.missing_border
                    .or(self.missing_border)
                    .unwrap_or_default(),
            )
            .fill(fill)
            .build();

        Ok(ResolvedConfig {
            options,
            output_dir: cli
                .output_dir
                .clone()
                .or_else(|| self.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("processed-images")),
            threads: cli.threads.or(self.threads),
        })
    }
}

/// Explicit command-line values. `None` means the user did not pass the
/// flag, so the config file (then the default) applies.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub padding: Option<u32>,
    pub tolerance: Option<u8>,
    pub corner_policy: Option<CornerPolicy>,
    pub missing_border: Option<MissingBorderPolicy>,
    pub fill_color: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub threads: Option<usize>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: BorderOptions,
    pub output_dir: PathBuf,
    pub threads: Option<usize>,
}

/// Parse an `RRGGBB` or `#RRGGBB` hex color
pub fn parse_color(hex: &str) -> Result<Rgb<u8>, ConfigError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(hex.to_string()));
    }

    let parse =
        |s: &str| u8::from_str_radix(s, 16).map_err(|_| ConfigError::InvalidColor(hex.to_string()));
    Ok(Rgb([
        parse(&digits[0..2])?,
        parse(&digits[2..4])?,
        parse(&digits[4..6])?,
    ]))
}
