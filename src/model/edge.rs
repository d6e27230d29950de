// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, NodeId};
use super::node::{Orientation, PathType, Side};

pub const DEFAULT_EDGE_COLOR: &str = "#0044FF";
pub const DEFAULT_EDGE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeData {
    pub stroke_color: String,
    pub stroke_width: f64,
    pub path_type: PathType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_collapsed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_deleting: bool,
}

impl Default for EdgeData {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_EDGE_COLOR.to_owned(),
            stroke_width: DEFAULT_EDGE_WIDTH,
            path_type: PathType::default(),
            is_collapsed: false,
            is_deleting: false,
        }
    }
}

impl EdgeData {
    pub fn with_path_type(path_type: PathType) -> Self {
        Self {
            path_type,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(default)]
    pub data: EdgeData,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, data: EdgeData) -> Self {
        Self {
            id,
            source,
            target,
            source_handle: None,
            target_handle: None,
            data,
            selected: false,
        }
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }

    /// Rewrites both anchor ids for a child hanging on `side` of the edge's source.
    pub fn route_for_side(&mut self, side: Side, orientation: Orientation) {
        let (source_pos, target_pos) = HandlePosition::pair_for_side(side, orientation);
        self.route_with(source_pos, target_pos);
    }

    pub fn route_with(&mut self, source_pos: HandlePosition, target_pos: HandlePosition) {
        self.source_handle = Some(handle_id(source_pos, HandleRole::Source, &self.source));
        self.target_handle = Some(handle_id(target_pos, HandleRole::Target, &self.target));
    }
}

/// Where on a node's box an edge attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl HandlePosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Source/target anchors for a child on `side`.
    ///
    /// Left children use the first pair (parent left → child right, or parent top → child
    /// bottom when vertical) and everything else the second pair. Renderers depend on this
    /// binary convention.
    pub fn pair_for_side(side: Side, orientation: Orientation) -> (Self, Self) {
        match (orientation, side) {
            (Orientation::Horizontal, Side::Left) => (Self::Left, Self::Right),
            (Orientation::Horizontal, Side::Right | Side::Mid) => (Self::Right, Self::Left),
            (Orientation::Vertical, Side::Left) => (Self::Top, Self::Bottom),
            (Orientation::Vertical, Side::Right | Side::Mid) => (Self::Bottom, Self::Top),
        }
    }
}

impl fmt::Display for HandlePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    Source,
    Target,
}

impl HandleRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

pub fn handle_id(position: HandlePosition, role: HandleRole, node_id: &NodeId) -> String {
    format!("{}-{}-{}", position.as_str(), role.as_str(), node_id)
}

/// A decoded `"{position}-{role}-{nodeId}"` anchor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRef<'a> {
    pub position: HandlePosition,
    pub role: HandleRole,
    pub node_id: &'a str,
}

fn handle_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(left|right|top|bottom)-(source|target)-(.+)$").expect("static handle regex")
    })
}

pub fn parse_handle(raw: &str) -> Option<HandleRef<'_>> {
    let captures = handle_pattern().captures(raw)?;
    let position = HandlePosition::parse(captures.get(1)?.as_str())?;
    let role = match captures.get(2)?.as_str() {
        "source" => HandleRole::Source,
        _ => HandleRole::Target,
    };
    let node_id = captures.get(3)?.as_str();
    Some(HandleRef {
        position,
        role,
        node_id,
    })
}
