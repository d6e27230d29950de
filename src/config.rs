// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor settings.
//!
//! Every field has a default, so an empty TOML file is a valid configuration. The binary layers
//! `MINDGRAPH_*` environment variables on top with [`EditorConfig::apply_env`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::layout::{LayoutOptions, SpacingProfile};
use crate::model::Rect;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Rectangle new standalone nodes are dropped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementWindow {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for PlacementWindow {
    fn default() -> Self {
        Self {
            x: 100.0,
            y: 100.0,
            width: 500.0,
            height: 400.0,
        }
    }
}

impl PlacementWindow {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history_limit: usize,
    pub animation_duration_ms: u64,
    pub auto_layout_delay_ms: u64,
    pub frame_interval_ms: u64,
    pub paste_offset_step: f64,
    pub spacing_profile: SpacingProfile,
    pub new_node_window: PlacementWindow,
    /// Fixed seed for random placement; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            animation_duration_ms: 800,
            auto_layout_delay_ms: 200,
            frame_interval_ms: 16,
            paste_offset_step: 20.0,
            spacing_profile: SpacingProfile::Default,
            new_node_window: PlacementWindow::default(),
            rng_seed: None,
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let config = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Overrides fields from `MINDGRAPH_*` variables yielded by `vars`.
    pub fn apply_env<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            let invalid = || ConfigError::InvalidValue {
                key: key.to_owned(),
                value: value.to_owned(),
            };
            match key {
                "MINDGRAPH_HISTORY_LIMIT" => {
                    self.history_limit = value.parse().map_err(|_| invalid())?;
                }
                "MINDGRAPH_ANIMATION_MS" => {
                    self.animation_duration_ms = value.parse().map_err(|_| invalid())?;
                }
                "MINDGRAPH_AUTO_LAYOUT_DELAY_MS" => {
                    self.auto_layout_delay_ms = value.parse().map_err(|_| invalid())?;
                }
                "MINDGRAPH_FRAME_MS" => {
                    self.frame_interval_ms = value.parse().map_err(|_| invalid())?;
                }
                "MINDGRAPH_SPACING" => {
                    self.spacing_profile = value.parse().map_err(|_| invalid())?;
                }
                "MINDGRAPH_SEED" => self.rng_seed = Some(value.parse().map_err(|_| invalid())?),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn auto_layout_delay(&self) -> Duration {
        Duration::from_millis(self.auto_layout_delay_ms)
    }

    /// Never zero, so a ticking driver always advances.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::with_profile(self.spacing_profile)
    }
}
