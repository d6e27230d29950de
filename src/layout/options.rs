// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZONTAL_SPACING: f64 = 200.0;
pub const DEFAULT_VERTICAL_SPACING: f64 = 80.0;

/// Gaps between nodes: `horizontal` along x, `vertical` along y, whatever the flow direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        SpacingProfile::Default.spacing()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingProfile {
    Compact,
    #[default]
    Default,
    Spacious,
}

impl SpacingProfile {
    pub fn spacing(self) -> Spacing {
        let (horizontal, vertical) = match self {
            Self::Compact => (150.0, 60.0),
            Self::Default => (DEFAULT_HORIZONTAL_SPACING, DEFAULT_VERTICAL_SPACING),
            Self::Spacious => (260.0, 110.0),
        };
        Spacing {
            horizontal,
            vertical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Default => "default",
            Self::Spacious => "spacious",
        }
    }
}

impl fmt::Display for SpacingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown spacing profile '{0}' (expected compact, default or spacious)")]
pub struct ParseSpacingProfileError(String);

impl FromStr for SpacingProfile {
    type Err = ParseSpacingProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "default" => Ok(Self::Default),
            "spacious" => Ok(Self::Spacious),
            _ => Err(ParseSpacingProfileError(s.to_owned())),
        }
    }
}

/// Inputs shared by every layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutOptions {
    pub spacing: Spacing,
}

impl LayoutOptions {
    pub fn with_profile(profile: SpacingProfile) -> Self {
        Self {
            spacing: profile.spacing(),
        }
    }
}
