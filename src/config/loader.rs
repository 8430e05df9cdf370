//! Configuration file loading with precedence handling.

use crate::layout::{duration_from_secs, AttentionParams, LayoutConfig, SpiralParams};
use crate::layout::config::{
    DEFAULT_DEBOUNCE, DEFAULT_HIGHLIGHT_MEAN, DEFAULT_HIGHLIGHT_STD_DEV, DEFAULT_TICK_INTERVAL,
};
use crate::model::{Animation, CloudError, HighlightEffect, LabelOptions, WordEntry};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "WORDCLOUD_CONFIG";

/// Environment variable overriding the highlight effect.
pub const EFFECT_ENV: &str = "WORDCLOUD_EFFECT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting has a value the engine cannot use.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The settings are individually fine but rejected as a whole.
    #[error(transparent)]
    Layout(#[from] CloudError),
}

/// How labels are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelClass {
    /// Entrance pop-in plus the random highlight loop.
    #[default]
    Animated,
    /// Labels appear in place and are never highlighted.
    Plain,
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Durations are given in seconds.
/// Corresponds to `~/.config/wordcloud/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Words shown when none are given on the command line.
    #[serde(default)]
    pub words: Option<Vec<String>>,

    /// Global label options, layered under per-word options.
    #[serde(default)]
    pub label_options: Option<LabelOptions>,

    /// Label presentation class.
    #[serde(default)]
    pub label_class: Option<LabelClass>,

    /// Seconds between two placements.
    #[serde(default)]
    pub tick_interval: Option<f64>,

    /// Seconds of quiet before a submission starts a pass.
    #[serde(default)]
    pub debounce: Option<f64>,

    /// Spiral angle increment in radians.
    #[serde(default)]
    pub angle_step: Option<f64>,

    /// Spiral distance increment.
    #[serde(default)]
    pub distance_step: Option<f64>,

    /// Candidates tested per word before giving up.
    #[serde(default)]
    pub max_iterations: Option<u32>,

    /// Furthest distance from the center a label may be placed at.
    #[serde(default)]
    pub max_distance: Option<f64>,

    /// Keep labels inside the canvas.
    #[serde(default)]
    pub clip_to_canvas: Option<bool>,

    /// Run the random highlight loop.
    #[serde(default)]
    pub attention: Option<bool>,

    /// Mean seconds between highlights.
    #[serde(default)]
    pub highlight_mean: Option<f64>,

    /// Standard deviation of the highlight delay, in seconds.
    #[serde(default)]
    pub highlight_std_dev: Option<f64>,

    /// Highlight effect name (`zoom`, `bounce` or `flash`).
    #[serde(default)]
    pub highlight_effect: Option<String>,

    /// Seed for reproducible highlight choices.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Words to lay out.
    pub words: Vec<String>,
    /// Global label options.
    pub label_options: LabelOptions,
    /// Label presentation class.
    pub label_class: LabelClass,
    /// Seconds between placements.
    pub tick_interval: f64,
    /// Debounce seconds.
    pub debounce: f64,
    /// Spiral angle increment.
    pub angle_step: f64,
    /// Spiral distance increment.
    pub distance_step: f64,
    /// Search ceiling.
    pub max_iterations: u32,
    /// Optional search radius.
    pub max_distance: Option<f64>,
    /// Keep labels inside the canvas.
    pub clip_to_canvas: bool,
    /// Highlight loop enabled.
    pub attention: bool,
    /// Mean highlight delay in seconds.
    pub highlight_mean: f64,
    /// Highlight delay deviation in seconds.
    pub highlight_std_dev: f64,
    /// Highlight effect name.
    pub highlight_effect: String,
    /// RNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let spiral = SpiralParams::default();
        Self {
            words: Vec::new(),
            label_options: LabelOptions::default(),
            label_class: LabelClass::default(),
            tick_interval: DEFAULT_TICK_INTERVAL.as_secs_f64(),
            debounce: DEFAULT_DEBOUNCE.as_secs_f64(),
            angle_step: spiral.angle_step,
            distance_step: spiral.distance_step,
            max_iterations: spiral.max_iterations,
            max_distance: spiral.max_distance,
            clip_to_canvas: true,
            attention: true,
            highlight_mean: DEFAULT_HIGHLIGHT_MEAN.as_secs_f64(),
            highlight_std_dev: DEFAULT_HIGHLIGHT_STD_DEV.as_secs_f64(),
            highlight_effect: HighlightEffect::default().as_str().to_string(),
            seed: None,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Build and validate the engine configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for unparseable durations or effect
    /// names, [`ConfigError::Layout`] if the engine rejects the combination.
    pub fn to_layout_config(&self) -> Result<LayoutConfig, ConfigError> {
        let effect: HighlightEffect =
            self.highlight_effect
                .parse()
                .map_err(|reason| ConfigError::InvalidValue {
                    field: "highlight_effect",
                    reason,
                })?;
        let plain = self.label_class == LabelClass::Plain;

        let config = LayoutConfig {
            tick_interval: seconds("tick_interval", self.tick_interval)?,
            debounce: seconds("debounce", self.debounce)?,
            spiral: SpiralParams {
                angle_step: self.angle_step,
                distance_step: self.distance_step,
                max_iterations: self.max_iterations,
                max_distance: self.max_distance,
            },
            clip_to_canvas: self.clip_to_canvas,
            label_options: self.label_options.clone(),
            entrance: if plain {
                Animation::still()
            } else {
                Animation::pop_in()
            },
            attention: AttentionParams {
                enabled: self.attention && !plain,
                mean: seconds("highlight_mean", self.highlight_mean)?,
                std_dev: seconds("highlight_std_dev", self.highlight_std_dev)?,
                animation: effect.animation(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse the configured words.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] if a word is empty.
    pub fn word_entries(&self) -> Result<Vec<WordEntry>, ConfigError> {
        self.words
            .iter()
            .map(|text| {
                WordEntry::parse(text.as_str()).map_err(|err| ConfigError::InvalidValue {
                    field: "words",
                    reason: err.to_string(),
                })
            })
            .collect()
    }
}

fn seconds(field: &'static str, secs: f64) -> Result<std::time::Duration, ConfigError> {
    duration_from_secs(field, secs).map_err(|err| ConfigError::InvalidValue {
        field,
        reason: err.to_string(),
    })
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/wordcloud/wordcloud.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("wordcloud").join("wordcloud.log")
    } else {
        PathBuf::from("wordcloud.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/wordcloud/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wordcloud").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `WORDCLOUD_CONFIG` environment variable
/// 3. Default path `~/.config/wordcloud/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `WORDCLOUD_EFFECT`: Override highlight effect
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(effect) = std::env::var(EFFECT_ENV) {
        config.highlight_effect = effect;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        words: config.words.unwrap_or(defaults.words),
        label_options: config.label_options.unwrap_or(defaults.label_options),
        label_class: config.label_class.unwrap_or(defaults.label_class),
        tick_interval: config.tick_interval.unwrap_or(defaults.tick_interval),
        debounce: config.debounce.unwrap_or(defaults.debounce),
        angle_step: config.angle_step.unwrap_or(defaults.angle_step),
        distance_step: config.distance_step.unwrap_or(defaults.distance_step),
        max_iterations: config.max_iterations.unwrap_or(defaults.max_iterations),
        max_distance: config.max_distance.or(defaults.max_distance),
        clip_to_canvas: config.clip_to_canvas.unwrap_or(defaults.clip_to_canvas),
        attention: config.attention.unwrap_or(defaults.attention),
        highlight_mean: config.highlight_mean.unwrap_or(defaults.highlight_mean),
        highlight_std_dev: config
            .highlight_std_dev
            .unwrap_or(defaults.highlight_std_dev),
        highlight_effect: config.highlight_effect.unwrap_or(defaults.highlight_effect),
        seed: config.seed.or(defaults.seed),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Values taken from command-line flags. `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// Positional words or `--file` contents.
    pub words: Option<Vec<String>>,
    /// `--effect`
    pub effect: Option<String>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--plain`
    pub label_class: Option<LabelClass>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(words) = cli.words {
        config.words = words;
    }

    if let Some(effect) = cli.effect {
        config.highlight_effect = effect;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(class) = cli.label_class {
        config.label_class = class;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
