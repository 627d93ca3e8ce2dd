//! Configuration — the `config.toml` file and its validated form.
//!
//! The file is optional. A missing file yields defaults; a present one may
//! set any subset of keys:
//!
//! ```toml
//! [style]
//! dimmed_opacity = 0.5
//! normal_opacity = 1.0
//! foreground = "#d0d0d0"
//! background = "#1e1e1e"
//! ```
//!
//! | Key              | Type         | Default | Meaning                              |
//! |------------------|--------------|---------|--------------------------------------|
//! | `dimmed_opacity` | float 0–1    | 0.5     | Opacity of lines not named in a spec |
//! | `normal_opacity` | float 0–1    | 1.0     | Opacity of every other line          |
//! | `foreground`     | `#rrggbb`    | none    | Text color to fade from              |
//! | `background`     | `#rrggbb`    | none    | Color faded text blends toward       |
//!
//! Without both colors the terminal renderer falls back to SGR faint/hidden
//! attributes instead of blending.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decoration::{DecorationStyle, OpacityError, Styles};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid {key}: {source}")]
    Opacity {
        key: &'static str,
        source: OpacityError,
    },
}

// ---------------------------------------------------------------------------
// HexColor
// ---------------------------------------------------------------------------

/// A `#rrggbb` color from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color string that is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a #rrggbb color, got {0:?}")]
pub struct HexColorError(pub String);

impl HexColor {
    /// Parse `#rrggbb` (the `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`HexColorError`] for anything else.
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let err = || HexColorError(s.to_string());
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for HexColor {
    type Error = HexColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// The `[style]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub dimmed_opacity: f32,
    pub normal_opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<HexColor>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            dimmed_opacity: DecorationStyle::DIMMED.opacity(),
            normal_opacity: DecorationStyle::NORMAL.opacity(),
            foreground: None,
            background: None,
        }
    }
}

/// The whole config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub style: StyleConfig,
}

impl Config {
    /// Parse config text. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, unknown keys, or
    /// bad colors, and [`ConfigError::Opacity`] for out-of-range opacities.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.styles()?;
        Ok(config)
    }

    /// Load from `path`. A missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// or any error from [`Config::from_toml`].
    pub fn load_from_path(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text, path)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(Some(config))
    }

    /// Load from the default path, falling back to defaults.
    ///
    /// # Errors
    ///
    /// See [`Config::load_from_path`].
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Ok(Self::load_from_path(&path)?.unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }

    /// `$XDG_CONFIG_HOME/line-highlighter/config.toml`, or
    /// `$HOME/.config/line-highlighter/config.toml`. `None` when neither
    /// variable is set.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        let base = env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join("line-highlighter").join("config.toml"))
    }

    /// Override the dimmed opacity (e.g. from a command-line flag).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Opacity`] if `opacity` is out of range.
    pub fn with_dimmed_opacity(mut self, opacity: f32) -> Result<Self, ConfigError> {
        self.style.dimmed_opacity = opacity;
        self.styles()?;
        Ok(self)
    }

    /// The validated decoration styles.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Opacity`] naming the offending key.
    pub fn styles(&self) -> Result<Styles, ConfigError> {
        let style = |key: &'static str, opacity: f32| {
            DecorationStyle::new(opacity).map_err(|source| ConfigError::Opacity { key, source })
        };
        Ok(Styles {
            dimmed: style("dimmed_opacity", self.style.dimmed_opacity)?,
            normal: style("normal_opacity", self.style.normal_opacity)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
