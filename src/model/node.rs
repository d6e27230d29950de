// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::geometry::{Position, Size, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};
use super::ids::NodeId;

/// The visual variant of a node. Only `Root` carries tree-wide attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Text,
    Shape,
    Image,
}

impl NodeKind {
    pub fn is_root(self) -> bool {
        matches!(self, Self::Root)
    }
}

/// Which side of its parent a node hangs from.
///
/// Vertical layouts draw `Left` above the parent and `Right` below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    #[default]
    Mid,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Mid => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Mid => "mid",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    #[default]
    Smoothstep,
    Bezier,
    Straight,
    Step,
}

/// The layout families a tree can be arranged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    #[default]
    HorizontalBalanced,
    VerticalBalanced,
    LeftOnly,
    RightOnly,
    TopOnly,
    BottomOnly,
}

impl LayoutType {
    pub const ALL: [Self; 6] = [
        Self::HorizontalBalanced,
        Self::VerticalBalanced,
        Self::LeftOnly,
        Self::RightOnly,
        Self::TopOnly,
        Self::BottomOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HorizontalBalanced => "horizontal-balanced",
            Self::VerticalBalanced => "vertical-balanced",
            Self::LeftOnly => "left-only",
            Self::RightOnly => "right-only",
            Self::TopOnly => "top-only",
            Self::BottomOnly => "bottom-only",
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Self::HorizontalBalanced | Self::LeftOnly | Self::RightOnly => Orientation::Horizontal,
            Self::VerticalBalanced | Self::TopOnly | Self::BottomOnly => Orientation::Vertical,
        }
    }

    pub fn is_balanced(self) -> bool {
        matches!(self, Self::HorizontalBalanced | Self::VerticalBalanced)
    }

    /// The side every non-root node is forced onto, for one-sided layouts.
    pub fn forced_side(self) -> Option<Side> {
        match self {
            Self::HorizontalBalanced | Self::VerticalBalanced => None,
            Self::LeftOnly | Self::TopOnly => Some(Side::Left),
            Self::RightOnly | Self::BottomOnly => Some(Side::Right),
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout type '{0}'")]
pub struct ParseLayoutTypeError(String);

impl FromStr for LayoutType {
    type Err = ParseLayoutTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.as_str() == s.trim())
            .ok_or_else(|| ParseLayoutTypeError(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Depth grows along x, siblings stack along y.
    Horizontal,
    /// Depth grows along y, siblings stack along x.
    Vertical,
}

/// Legacy removal cache written by older documents on collapse.
///
/// Only read on load, where it is folded back into flag-based collapse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CollapsedChildren {
    pub left_nodes: Vec<Node>,
    pub left_edges: Vec<Edge>,
    pub right_nodes: Vec<Node>,
    pub right_edges: Vec<Edge>,
}

impl CollapsedChildren {
    pub fn is_empty(&self) -> bool {
        self.left_nodes.is_empty()
            && self.left_edges.is_empty()
            && self.right_nodes.is_empty()
            && self.right_edges.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeData {
    pub level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    pub side: Side,
    pub content: String,
    pub is_collapsed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed_by: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed_children: Option<CollapsedChildren>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<LayoutType>,
    #[serde(alias = "forceLayout", skip_serializing_if = "Option::is_none")]
    pub is_auto_layout_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_type: Option<PathType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_deleting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sibling_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<Size>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, position: Position, data: NodeData) -> Self {
        Self {
            id,
            kind,
            position,
            data,
            measured: None,
            selected: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.kind.is_root()
    }

    pub fn width(&self) -> f64 {
        self.measured.map_or(DEFAULT_NODE_WIDTH, |size| size.width)
    }

    pub fn height(&self) -> f64 {
        self.measured.map_or(DEFAULT_NODE_HEIGHT, |size| size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// The effective layout type for a root node.
    pub fn layout_type(&self) -> LayoutType {
        self.data.layout_type.unwrap_or_default()
    }

    pub fn path_type(&self) -> PathType {
        self.data.path_type.unwrap_or_default()
    }

    pub fn auto_layout_enabled(&self) -> bool {
        self.data.is_auto_layout_enabled.unwrap_or(false)
    }
}

/// A shallow, typed partial update for [`NodeData`].
///
/// Unset fields leave the node untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeDataPatch {
    pub content: Option<String>,
    pub side: Option<Side>,
    pub is_collapsed: Option<bool>,
    pub layout_type: Option<LayoutType>,
    #[serde(alias = "forceLayout")]
    pub is_auto_layout_enabled: Option<bool>,
    pub path_type: Option<PathType>,
    pub edge_color: Option<String>,
    pub sibling_order: Option<u32>,
    pub shape: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub alt: Option<String>,
}

impl NodeDataPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, data: &mut NodeData) {
        if let Some(content) = &self.content {
            data.content.clone_from(content);
        }
        if let Some(side) = self.side {
            data.side = side;
        }
        if let Some(is_collapsed) = self.is_collapsed {
            data.is_collapsed = is_collapsed;
        }
        if let Some(layout_type) = self.layout_type {
            data.layout_type = Some(layout_type);
        }
        if let Some(enabled) = self.is_auto_layout_enabled {
            data.is_auto_layout_enabled = Some(enabled);
        }
        if let Some(path_type) = self.path_type {
            data.path_type = Some(path_type);
        }
        if let Some(edge_color) = &self.edge_color {
            data.edge_color = Some(edge_color.clone());
        }
        if let Some(order) = self.sibling_order {
            data.sibling_order = Some(order);
        }
        if let Some(shape) = &self.shape {
            data.shape = Some(shape.clone());
        }
        if let Some(width) = self.width {
            data.width = Some(width);
        }
        if let Some(height) = self.height {
            data.height = Some(height);
        }
        if let Some(alt) = &self.alt {
            data.alt = Some(alt.clone());
        }
    }
}
