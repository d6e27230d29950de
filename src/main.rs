// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mindgraph CLI entrypoint.
//!
//! Runs the layout engine headless over JSON documents and prints the resulting export
//! document to stdout. Logs go to stderr, filtered by `MINDGRAPH_LOG` (default `info`).

use std::error::Error;
use std::path::Path;
use std::time::Instant;

use mindgraph::clipboard::{document_from_value, parse_ai_tree, ExportOptions};
use mindgraph::layout::SpacingProfile;
use mindgraph::model::{LayoutType, Position};
use mindgraph::{Editor, EditorConfig};
use tracing_subscriber::EnvFilter;

/// Upper bound on headless ticks; zero-length animations finish in two.
const MAX_TICKS: usize = 64;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  \
         {program} layout <file.json> [options]\n  \
         {program} import-tree <file.json> [options]\n\n\
         Options: --layout <type>, --profile <name>, --config <file.toml>\n\n\
         layout reads a {{nodes, edges}} or exported document and lays out every tree.\n\
         import-tree converts an external [{{data, children}}] tree into a laid-out document.\n\n\
         --layout is one of horizontal-balanced, vertical-balanced, left-only, right-only,\n\
         top-only, bottom-only.\n\
         --profile is one of compact, default, spacious."
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Layout,
    ImportTree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    mode: Mode,
    input: String,
    layout: Option<LayoutType>,
    profile: Option<SpacingProfile>,
    config: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mode = match args.next().as_deref() {
        Some("layout") => Mode::Layout,
        Some("import-tree") => Mode::ImportTree,
        _ => return Err(()),
    };
    let mut input = None;
    let mut layout = None;
    let mut profile = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--layout" => {
                if layout.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                layout = Some(raw.parse::<LayoutType>().map_err(|_| ())?);
            }
            "--profile" => {
                if profile.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                profile = Some(raw.parse::<SpacingProfile>().map_err(|_| ())?);
            }
            "--config" => {
                if config.is_some() {
                    return Err(());
                }
                config = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if input.is_some() {
                    return Err(());
                }
                input = Some(arg);
            }
        }
    }

    Ok(CliOptions {
        mode,
        input: input.ok_or(())?,
        layout,
        profile,
        config,
    })
}

fn load_config(options: &CliOptions) -> Result<EditorConfig, Box<dyn Error>> {
    let mut config = match &options.config {
        Some(path) => EditorConfig::load(Path::new(path))?,
        None => EditorConfig::default(),
    };
    config.apply_env(std::env::vars())?;
    if let Some(profile) = options.profile {
        config.spacing_profile = profile;
    }
    // Headless runs jump straight to the final layout.
    config.animation_duration_ms = 0;
    config.auto_layout_delay_ms = 0;
    Ok(config)
}

fn settle(editor: &mut Editor) {
    for _ in 0..MAX_TICKS {
        if editor.is_idle() {
            return;
        }
        editor.tick(Instant::now());
    }
    tracing::warn!(ticks = MAX_TICKS, "editor did not settle");
}

/// Relayouts every tree. A single tree goes through the document path; a forest is laid out
/// root by root.
fn relayout(editor: &mut Editor, layout: Option<LayoutType>) -> Result<(), Box<dyn Error>> {
    let root_ids = editor.graph().root_ids();
    if let (Some(layout_type), [_]) = (layout, root_ids.as_slice()) {
        editor.on_layout_change(layout_type)?;
        return Ok(());
    }
    for root_id in &root_ids {
        if let Some(layout_type) = layout {
            editor.set_layout_type(root_id, layout_type)?;
        }
        editor.update_subtree_layout(root_id, layout)?;
    }
    Ok(())
}

fn run_layout(
    editor: &mut Editor,
    raw: &str,
    layout: Option<LayoutType>,
) -> Result<(), Box<dyn Error>> {
    let document = document_from_value(serde_json::from_str(raw)?)?;
    editor.load(document)?;
    relayout(editor, layout)
}

fn run_import_tree(
    editor: &mut Editor,
    raw: &str,
    layout: Option<LayoutType>,
) -> Result<(), Box<dyn Error>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if parse_ai_tree(&value).is_none() {
        return Err("input is not a [{data, children}] tree".into());
    }
    editor.set_pointer(Position::ORIGIN);
    editor.paste_text(raw)?;
    if layout.is_some() {
        settle(editor);
        relayout(editor, layout)?;
    }
    Ok(())
}

fn main() {
    let filter =
        EnvFilter::try_from_env("MINDGRAPH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "mindgraph".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = load_config(&options)?;
        let mut editor = Editor::new(config);
        let raw = std::fs::read_to_string(&options.input)?;
        match options.mode {
            Mode::Layout => run_layout(&mut editor, &raw, options.layout)?,
            Mode::ImportTree => run_import_tree(&mut editor, &raw, options.layout)?,
        }
        settle(&mut editor);

        let title = Path::new(&options.input)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        let export = ExportOptions {
            title,
            ..ExportOptions::default()
        };
        println!("{}", editor.export_json(&export)?);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("mindgraph: {err}");
        std::process::exit(1);
    }
}
