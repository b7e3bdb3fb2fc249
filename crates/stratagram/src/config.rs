//! Configuration types for Stratagram diagram rendering.
//!
//! This module provides configuration structures that control how resolved
//! resources are drawn. All types implement [`serde::Deserialize`] for
//! loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining style and icon settings.
//! - [`StyleConfig`] - Visual styling options such as the node fill color.
//! - [`IconConfig`] - Icon overrides per resource type and the fallback icon.
//!
//! # Example
//!
//! ```
//! # use stratagram::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().fill_color().unwrap().to_string(), "lightgreen");
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use stratagram_core::{color::Color, icon::IconTable};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Icon configuration section.
    #[serde(default)]
    icons: IconConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(style: StyleConfig, icons: IconConfig) -> Self {
        Self { style, icons }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the icon configuration.
    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }
}

/// Visual styling configuration for rendered nodes.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Fill color of every node, as a CSS color string.
    #[serde(default)]
    fill_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style with the given fill color string.
    pub fn with_fill_color(mut self, fill_color: impl Into<String>) -> Self {
        self.fill_color = Some(fill_color.into());
        self
    }

    /// Returns the parsed fill [`Color`], `lightgreen` when none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn fill_color(&self) -> Result<Color, String> {
        match &self.fill_color {
            Some(color) => {
                Color::new(color).map_err(|err| format!("Invalid fill color in config: {err}"))
            }
            None => Ok(Color::default()),
        }
    }
}

/// Icon selection configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IconConfig {
    /// Icon used for resource types without a known icon.
    #[serde(default)]
    default: Option<String>,

    /// Icons keyed by resource type tag, taking precedence over built-ins.
    #[serde(default)]
    overrides: HashMap<String, String>,
}

impl IconConfig {
    pub fn with_default(mut self, icon: impl Into<String>) -> Self {
        self.default = Some(icon.into());
        self
    }

    pub fn with_override(mut self, resource_type: impl Into<String>, icon: impl Into<String>) -> Self {
        self.overrides.insert(resource_type.into(), icon.into());
        self
    }

    /// Builds the lookup table used when emitting nodes.
    pub fn icon_table(&self) -> IconTable {
        let table = self
            .overrides
            .iter()
            .fold(IconTable::new(), |table, (resource_type, icon)| {
                table.with_override(resource_type.as_str(), icon.as_str())
            });

        match &self.default {
            Some(icon) => table.with_default(icon.as_str()),
            None => table,
        }
    }
}
