// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mindgraph: the graph and state engine behind an interactive mind-map editor.
//!
//! A document is a forest of nodes and styling edges held in a single-writer [`store::Graph`].
//! [`editor::Editor`] owns the graph together with history, layout, animation and clipboard
//! handling, and exposes every user command as one undoable step.

pub mod clipboard;
pub mod command;
pub mod config;
pub mod editor;
pub mod history;
pub mod layout;
pub mod model;
pub mod ops;
pub mod store;

pub use config::EditorConfig;
pub use editor::Editor;
pub use store::Graph;
