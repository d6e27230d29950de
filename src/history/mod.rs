// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bounded, linear undo/redo over whole-graph snapshots.
//!
//! Every entry is a full [`Document`]. There is no diffing; the history limit bounds memory.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::model::Document;
use crate::store::Graph;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Document>,
    redo: VecDeque<Document>,
    staged: Option<Document>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// A history keeping at most `limit` entries per direction (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            undo: VecDeque::with_capacity(limit),
            redo: VecDeque::with_capacity(limit),
            staged: None,
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.staged = None;
    }

    /// Stages a snapshot of `graph` for the next [`History::commit`].
    ///
    /// Prepares do not nest: a second prepare before a commit keeps the first snapshot and
    /// returns `false`.
    pub fn prepare(&mut self, graph: &Graph) -> bool {
        if self.staged.is_some() {
            warn!("history prepare called twice without commit; keeping the first snapshot");
            return false;
        }
        self.staged = Some(graph.to_document());
        true
    }

    /// Pushes the staged snapshot. Without a prior prepare this records nothing.
    pub fn commit(&mut self) -> bool {
        let Some(snapshot) = self.staged.take() else {
            trace!("history commit without a staged snapshot");
            return false;
        };
        self.record(snapshot);
        true
    }

    /// Pushes the staged snapshot only if `graph` differs from it; otherwise drops it.
    pub fn commit_if_changed(&mut self, graph: &Graph) -> bool {
        let Some(snapshot) = self.staged.take() else {
            trace!("history commit without a staged snapshot");
            return false;
        };
        let unchanged = graph.nodes() == snapshot.nodes.as_slice()
            && graph.edges() == snapshot.edges.as_slice();
        if unchanged {
            return false;
        }
        self.record(snapshot);
        true
    }

    /// Drops a staged snapshot without recording it.
    pub fn discard(&mut self) -> bool {
        self.staged.take().is_some()
    }

    /// Runs `f` as one undoable step.
    ///
    /// On `Ok` the pre-call state becomes an undo entry, unless `f` left the graph unchanged.
    /// On `Err` the graph is restored to the pre-call state and nothing is recorded.
    pub fn transaction<T, E>(
        &mut self,
        graph: &mut Graph,
        f: impl FnOnce(&mut Graph) -> Result<T, E>,
    ) -> Result<T, E> {
        let snapshot = graph.to_document();
        match f(graph) {
            Ok(value) => {
                if graph.nodes() != snapshot.nodes.as_slice()
                    || graph.edges() != snapshot.edges.as_slice()
                {
                    self.record(snapshot);
                }
                Ok(value)
            }
            Err(err) => {
                graph.restore(snapshot);
                Err(err)
            }
        }
    }

    /// Replaces the live graph with the latest undo entry. Returns `false` when there is none.
    pub fn undo(&mut self, graph: &mut Graph) -> bool {
        let Some(entry) = self.undo.pop_back() else {
            return false;
        };
        push_bounded(&mut self.redo, graph.to_document(), self.limit, "redo");
        graph.restore(entry);
        true
    }

    pub fn redo(&mut self, graph: &mut Graph) -> bool {
        let Some(entry) = self.redo.pop_back() else {
            return false;
        };
        push_bounded(&mut self.undo, graph.to_document(), self.limit, "undo");
        graph.restore(entry);
        true
    }

    fn record(&mut self, snapshot: Document) {
        push_bounded(&mut self.undo, snapshot, self.limit, "undo");
        self.redo.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<Document>, entry: Document, limit: usize, name: &str) {
    while stack.len() >= limit {
        stack.pop_front();
        trace!(stack = name, limit, "evicted oldest history entry");
    }
    stack.push_back(entry);
}
