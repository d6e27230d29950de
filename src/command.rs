// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor commands and their keyboard accelerators.
//!
//! Accelerators are written as `"Mod+Shift+Z"`; `Mod` is Command on macOS and Control
//! elsewhere.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::clipboard::{ClipboardBackend, ExportDocument, ExportOptions, Pasted};
use crate::editor::{Editor, EditorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SelectAll,
    Copy,
    Paste,
    Delete,
    Deselect,
    Undo,
    Redo,
    Save,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Self::SelectAll,
        Self::Copy,
        Self::Paste,
        Self::Delete,
        Self::Deselect,
        Self::Undo,
        Self::Redo,
        Self::Save,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelectAll => "select-all",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Delete => "delete",
            Self::Deselect => "deselect",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Save => "save",
        }
    }

    /// Commands a focused text field handles itself.
    pub fn yields_to_text_input(self) -> bool {
        matches!(self, Self::SelectAll | Self::Copy)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }

    fn primary_modifier(self) -> Modifiers {
        match self {
            Self::Mac => Modifiers::META,
            Self::Other => Modifiers::CTRL,
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        /// Command on macOS, Super/Windows elsewhere.
        const META  = 0b1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, stored lowercase.
    Char(char),
    Delete,
    Backspace,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Parses an accelerator such as `"Mod+Shift+Z"` for `platform`.
    pub fn parse(accelerator: &str, platform: Platform) -> Result<Self, KeymapError> {
        let mut parts: Vec<&str> = accelerator.split('+').map(str::trim).collect();
        let key_part = parts.pop().filter(|part| !part.is_empty()).ok_or(KeymapError::Empty)?;

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "mod" => platform.primary_modifier(),
                "ctrl" | "control" => Modifiers::CTRL,
                "cmd" | "command" | "meta" | "super" => Modifiers::META,
                "shift" => Modifiers::SHIFT,
                "alt" | "option" => Modifiers::ALT,
                _ => return Err(KeymapError::UnknownModifier(part.to_owned())),
            };
        }
        Ok(Self::new(key_part.parse()?, modifiers))
    }
}

impl FromStr for Key {
    type Err = KeymapError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut chars = raw.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c.to_ascii_lowercase()));
        }
        match raw.to_ascii_lowercase().as_str() {
            "delete" | "del" => Ok(Self::Delete),
            "backspace" => Ok(Self::Backspace),
            "escape" | "esc" => Ok(Self::Escape),
            _ => Err(KeymapError::UnknownKey(raw.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeymapError {
    #[error("empty accelerator")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

pub const DEFAULT_BINDINGS: &[(&str, Command)] = &[
    ("Mod+A", Command::SelectAll),
    ("Mod+C", Command::Copy),
    ("Mod+V", Command::Paste),
    ("Delete", Command::Delete),
    ("Backspace", Command::Delete),
    ("Escape", Command::Deselect),
    ("Mod+Z", Command::Undo),
    ("Mod+Shift+Z", Command::Redo),
    ("Mod+Y", Command::Redo),
    ("Mod+S", Command::Save),
];

#[derive(Debug, Clone)]
pub struct Keymap {
    platform: Platform,
    bindings: HashMap<KeyChord, Command>,
}

impl Keymap {
    pub fn empty(platform: Platform) -> Self {
        Self {
            platform,
            bindings: HashMap::new(),
        }
    }

    pub fn with_defaults(platform: Platform) -> Self {
        let mut keymap = Self::empty(platform);
        for (accelerator, command) in DEFAULT_BINDINGS {
            if let Err(err) = keymap.bind(accelerator, *command) {
                debug!(accelerator, error = %err, "skipping default binding");
            }
        }
        keymap
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Binds `accelerator` to `command`, replacing any previous binding of that chord.
    pub fn bind(&mut self, accelerator: &str, command: Command) -> Result<(), KeymapError> {
        let chord = KeyChord::parse(accelerator, self.platform)?;
        self.bindings.insert(chord, command);
        Ok(())
    }

    pub fn lookup(&self, chord: &KeyChord) -> Option<Command> {
        self.bindings.get(chord).copied()
    }

    /// The command for `chord`, unless a focused text field owns it.
    pub fn resolve(&self, chord: &KeyChord, text_focus: bool) -> Option<Command> {
        let command = self.lookup(chord)?;
        if text_focus && command.yields_to_text_input() {
            trace!(%command, "left to the focused text field");
            return None;
        }
        Some(command)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::with_defaults(Platform::current())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// The command was left to a focused text field.
    Suppressed,
    Selected,
    Copied(usize),
    Pasted(Pasted),
    /// Nodes flagged for deletion; the host finalizes once the exit animation ends.
    Marked(usize),
    Deselected,
    Undone(bool),
    Redone(bool),
    /// The document to persist. Writing it is up to the host.
    Save(ExportDocument),
}

/// Runs `command` against `editor`.
pub async fn dispatch(
    editor: &mut Editor,
    command: Command,
    clipboard: &mut dyn ClipboardBackend,
    text_focus: bool,
) -> Result<Dispatched, EditorError> {
    if text_focus && command.yields_to_text_input() {
        return Ok(Dispatched::Suppressed);
    }
    debug!(%command, "dispatching command");
    let dispatched = match command {
        Command::SelectAll => {
            editor.select_all();
            Dispatched::Selected
        }
        Command::Copy => Dispatched::Copied(editor.copy(clipboard).await?),
        Command::Paste => Dispatched::Pasted(editor.paste(clipboard).await?),
        Command::Delete => Dispatched::Marked(editor.delete_selected()),
        Command::Deselect => {
            editor.deselect_all();
            Dispatched::Deselected
        }
        Command::Undo => Dispatched::Undone(editor.undo()),
        Command::Redo => Dispatched::Redone(editor.redo()),
        Command::Save => Dispatched::Save(editor.export(&ExportOptions::default())),
    };
    Ok(dispatched)
}
