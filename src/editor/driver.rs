// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Clock-driven ticking for hosts without their own frame loop.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use super::Editor;

/// An editor shared between command handlers and the driver. The mutex is the single-writer
/// boundary around the graph.
pub type SharedEditor = Arc<Mutex<Editor>>;

pub fn shared(editor: Editor) -> SharedEditor {
    Arc::new(Mutex::new(editor))
}

/// Ticks `editor` at its configured frame interval until no animation or deferred task is
/// left. Returns the number of ticks delivered.
///
/// The lock is only held for the duration of one tick.
pub async fn run_until_idle(editor: SharedEditor) -> usize {
    let period = editor.lock().await.config().frame_interval();
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut ticks = 0usize;
    loop {
        let now = interval.tick().await;
        let mut editor = editor.lock().await;
        if editor.is_idle() {
            break;
        }
        let outcome = editor.tick(now.into_std());
        trace!(ticks, ran_tasks = outcome.ran_tasks, "editor tick");
        ticks += 1;
    }
    debug!(ticks, "editor driver idle");
    ticks
}

/// Spawns [`run_until_idle`] on the current runtime.
pub fn spawn_driver(editor: SharedEditor) -> JoinHandle<usize> {
    tokio::spawn(run_until_idle(editor))
}
