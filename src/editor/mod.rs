// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The single-writer editing session.
//!
//! [`Editor`] owns the graph and every component that touches it. Each structural command runs
//! as one history transaction; layout, animation and deferred auto-layouts are advanced by
//! [`Editor::tick`], which a host calls from its frame clock (see [`driver`]).

pub mod driver;

use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, trace, warn};

use crate::clipboard::{
    copy_selection, export_document, export_to_json, import_from_json, paste_payload,
    ClipboardBackend, ClipboardError, ClipboardPayload, ExportDocument, ExportOptions,
    ImportError, PasteState, Pasted,
};
use crate::config::EditorConfig;
use crate::history::History;
use crate::layout::{
    plan_single_root, plan_subtree, Animator, FrameOutcome, LayoutError, LayoutOptions,
    LayoutPlan, LayoutStrategy, StrategyRegistry,
};
use crate::model::{
    Document, IdGenerator, LayoutType, NodeDataPatch, NodeId, PathType, Position, Side, UuidIds,
};
use crate::ops::{
    self, AddedChild, ChildRequest, DeletionOutcome, DeletionQueue, EditError, MoveOutcome,
    NewNodeRequest,
};
use crate::store::{Graph, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message the host should show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Failures of commands that cross the clipboard boundary.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("failed to serialize clipboard payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DeferredTask {
    AutoLayout(NodeId),
}

/// A task waiting for its delay. `due` is stamped by the first tick that sees it.
#[derive(Debug, Clone)]
struct Scheduled {
    due: Option<Instant>,
    delay: Duration,
    task: DeferredTask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub frame: FrameOutcome,
    /// Deferred tasks that came due and ran during this tick.
    pub ran_tasks: usize,
}

#[derive(Debug)]
pub struct Editor {
    graph: Graph,
    history: History,
    deletion: DeletionQueue,
    paste: PasteState,
    animator: Animator,
    strategies: StrategyRegistry,
    ids: Box<dyn IdGenerator + Send>,
    rng: StdRng,
    config: EditorConfig,
    options: LayoutOptions,
    notices: Vec<Notice>,
    deferred: Vec<Scheduled>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_ids(config, Box::new(UuidIds))
    }

    pub fn with_ids(config: EditorConfig, ids: Box<dyn IdGenerator + Send>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            graph: Graph::new(),
            history: History::new(config.history_limit),
            deletion: DeletionQueue::new(),
            paste: PasteState::new(config.paste_offset_step),
            animator: Animator::new(),
            strategies: StrategyRegistry::with_defaults(),
            ids,
            rng,
            options: config.layout_options(),
            config,
            notices: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Replaces the session with `document`. History, pending deletions, the running animation
    /// and deferred tasks are dropped.
    pub fn load(&mut self, document: Document) -> Result<(), StoreError> {
        let mut graph = Graph::from_document(document)?;
        let migrated = graph.migrate_legacy_collapse();
        self.graph = graph;
        self.history.clear();
        self.deletion = DeletionQueue::new();
        self.animator.stop();
        self.deferred.clear();
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            migrated,
            "loaded document"
        );
        Ok(())
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> Document {
        self.graph.to_document()
    }

    pub fn pending_deletions(&self) -> usize {
        self.deletion.pending().len()
    }

    /// Drains the notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn set_pointer(&mut self, pointer: Position) {
        self.paste.set_pointer(pointer);
    }

    pub fn register_strategy(&mut self, strategy: Arc<dyn LayoutStrategy>) {
        self.strategies.register(strategy);
    }

    // Structural edits. Each one is a single undo step; a stale id is logged and yields
    // `Ok(None)`, a rejected edit yields `Err` and queues a notice.

    pub fn add_node(&mut self, request: NewNodeRequest) -> Result<Option<NodeId>, EditError> {
        let window = self.config.new_node_window.rect();
        let (ids, rng) = (&mut self.ids, &mut self.rng);
        let result = self.history.transaction(&mut self.graph, |graph| {
            ops::add_node(graph, ids.as_mut(), rng, window, request)
        });
        self.settle("add_node", result)
    }

    pub fn add_child_node(
        &mut self,
        request: ChildRequest,
    ) -> Result<Option<AddedChild>, EditError> {
        let spacing = self.options.spacing;
        let added = self.run("add_child_node", |graph, ids| {
            ops::add_child_node(graph, ids, request, spacing)
        })?;
        if let Some(root_id) = added.as_ref().and_then(|added| added.auto_layout_root.clone()) {
            self.schedule_auto_layout(root_id);
        }
        Ok(added)
    }

    /// Patches node data in place without an undo entry, as typing does.
    pub fn update_node_data(
        &mut self,
        node_id: &NodeId,
        patch: &NodeDataPatch,
    ) -> Result<bool, EditError> {
        let result = ops::update_node_data(&mut self.graph, node_id, patch);
        Ok(self.settle("update_node_data", result)?.is_some())
    }

    pub fn update_node_data_with_undo(
        &mut self,
        node_id: &NodeId,
        patch: &NodeDataPatch,
    ) -> Result<bool, EditError> {
        let updated = self.run("update_node_data", |graph, _| {
            ops::update_node_data(graph, node_id, patch)
        })?;
        Ok(updated.is_some())
    }

    pub fn toggle_collapse(
        &mut self,
        node_id: &NodeId,
        side: Side,
        collapse: bool,
    ) -> Result<Option<usize>, EditError> {
        self.run("toggle_collapse", |graph, _| {
            ops::toggle_collapse(graph, node_id, side, collapse)
        })
    }

    pub fn move_to_child(
        &mut self,
        source_id: &NodeId,
        target_id: &NodeId,
        side: Option<Side>,
    ) -> Result<Option<MoveOutcome>, EditError> {
        let outcome = self.run("move_to_child", |graph, ids| {
            ops::move_to_child(graph, source_id, target_id, side, ids)
        })?;
        if outcome.is_some() {
            self.schedule_if_auto(target_id);
        }
        Ok(outcome)
    }

    pub fn update_subtree_edge_path_type(
        &mut self,
        root_id: &NodeId,
        path_type: PathType,
    ) -> Result<Option<usize>, EditError> {
        self.run("update_subtree_edge_path_type", |graph, _| {
            ops::update_subtree_edge_path_type(graph, root_id, path_type)
        })
    }

    pub fn update_subtree_edge_color(
        &mut self,
        root_id: &NodeId,
        color: &str,
    ) -> Result<Option<usize>, EditError> {
        self.run("update_subtree_edge_color", |graph, _| {
            ops::update_subtree_edge_color(graph, root_id, color)
        })
    }

    pub fn select_all(&mut self) {
        self.graph.select_all();
    }

    pub fn deselect_all(&mut self) {
        self.graph.deselect_all();
    }

    // Deletion.

    /// Flags the subtrees for the exit animation. Not an undo step by itself.
    pub fn mark_for_deletion(&mut self, node_ids: &[NodeId]) -> usize {
        self.deletion.mark(&mut self.graph, node_ids)
    }

    pub fn delete_selected(&mut self) -> usize {
        self.deletion.mark_selected(&mut self.graph)
    }

    /// Removes everything marked so far as one undo step.
    pub fn finalize_deletion(&mut self) -> DeletionOutcome {
        if self.deletion.is_empty() {
            return DeletionOutcome::default();
        }
        // The undo entry must not carry the exit flags.
        self.deletion.clear_flags(&mut self.graph);
        let deletion = &mut self.deletion;
        let outcome = self
            .history
            .transaction(&mut self.graph, |graph| {
                Ok::<_, Infallible>(deletion.finalize(graph))
            })
            .unwrap_or_else(|never| match never {});
        self.schedule_surviving(&outcome.surviving_roots);
        outcome
    }

    pub fn cancel_deletion(&mut self) -> usize {
        self.deletion.cancel(&mut self.graph)
    }

    pub fn delete_nodes_instant(&mut self, node_ids: &[NodeId]) -> DeletionOutcome {
        let outcome = self
            .history
            .transaction(&mut self.graph, |graph| {
                Ok::<_, Infallible>(ops::delete_nodes_instant(graph, node_ids))
            })
            .unwrap_or_else(|never| match never {});
        self.schedule_surviving(&outcome.surviving_roots);
        outcome
    }

    // Clipboard and files.

    /// Writes the selection as `{nodes, edges}` JSON. Returns the number of copied nodes.
    pub async fn copy(&mut self, backend: &mut dyn ClipboardBackend) -> Result<usize, EditorError> {
        let document = copy_selection(&self.graph);
        if document.nodes.is_empty() {
            return Ok(0);
        }
        let count = document.nodes.len();
        let text = serde_json::to_string(&document)?;
        if let Err(err) = backend.write_text(text).await {
            error!(error = %err, "clipboard write failed");
            self.notices.push(Notice::error(format!("Copy failed: {err}")));
            return Err(err.into());
        }
        debug!(nodes = count, "copied selection");
        Ok(count)
    }

    /// Reads the clipboard and pastes at the pointer. A refused read is reported, not swallowed.
    pub async fn paste(
        &mut self,
        backend: &mut dyn ClipboardBackend,
    ) -> Result<Pasted, EditorError> {
        let text = match backend.read_text().await {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "clipboard read failed");
                self.notices.push(Notice::error(format!("Paste failed: {err}")));
                return Err(err.into());
            }
        };
        Ok(self.paste_text(&text)?)
    }

    /// Pastes already-read clipboard text as one undo step.
    pub fn paste_text(&mut self, text: &str) -> Result<Pasted, EditError> {
        let payload = ClipboardPayload::classify(text);
        let anchor = self.paste.next_anchor();
        let pasted = self
            .run("paste", |graph, ids| {
                paste_payload(graph, ids, payload, anchor, LayoutType::default())
            })?
            .unwrap_or_default();
        for root_id in &pasted.auto_layout_roots {
            self.schedule_auto_layout(root_id.clone());
        }
        Ok(pasted)
    }

    /// Replaces the graph with an imported document as one undo step. Returns the node count.
    pub fn import_json(&mut self, text: &str) -> Result<usize, ImportError> {
        let ids = &mut self.ids;
        let result = self.history.transaction(&mut self.graph, |graph| {
            let document = import_from_json(text, ids.as_mut())?;
            graph.restore(document);
            Ok(graph.node_count())
        });
        match result {
            Ok(nodes) => {
                self.animator.stop();
                self.deletion = DeletionQueue::new();
                self.deferred.clear();
                info!(nodes, "imported document");
                Ok(nodes)
            }
            Err(err) => {
                warn!(error = %err, "import rejected");
                self.notices.push(Notice::error(format!("Import failed: {err}")));
                Err(err)
            }
        }
    }

    pub fn export(&self, options: &ExportOptions) -> ExportDocument {
        export_document(&self.graph, options)
    }

    pub fn export_json(&self, options: &ExportOptions) -> Result<String, serde_json::Error> {
        export_to_json(&self.graph, options)
    }

    // History.

    /// Steps back one entry. The running animation and any pending deletion are dropped first.
    pub fn undo(&mut self) -> bool {
        self.interrupt();
        let undone = self.history.undo(&mut self.graph);
        if !undone {
            trace!("nothing to undo");
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.interrupt();
        let redone = self.history.redo(&mut self.graph);
        if !redone {
            trace!("nothing to redo");
        }
        redone
    }

    fn interrupt(&mut self) {
        self.animator.stop();
        self.deletion.cancel(&mut self.graph);
    }

    // Layout.

    /// Lays out the whole document as one undo step.
    ///
    /// Only defined for a single tree: on a forest this logs a warning and returns `Ok(false)`
    /// with the current layout untouched.
    pub fn update_layout(&mut self, layout_type: Option<LayoutType>) -> Result<bool, LayoutError> {
        let Some(plan) = self.plan_document(layout_type)? else {
            return Ok(false);
        };
        self.animate_recorded(plan, |_| {});
        Ok(true)
    }

    /// Lays out the subtree under `node_id` as one undo step.
    pub fn update_subtree_layout(
        &mut self,
        node_id: &NodeId,
        layout_type: Option<LayoutType>,
    ) -> Result<bool, LayoutError> {
        let Some(plan) = self.plan_or_log(node_id, layout_type)? else {
            return Ok(false);
        };
        self.animate_recorded(plan, |_| {});
        Ok(true)
    }

    /// Relayouts the tree owning `node_id` if its root has auto-layout enabled.
    ///
    /// No undo entry: it always follows a command that already recorded one. Works on forests.
    pub fn apply_auto_layout(&mut self, node_id: &NodeId) -> Result<bool, LayoutError> {
        let Some(root) = self.graph.root_of(node_id) else {
            error!(node_id = %node_id, "auto-layout target no longer exists");
            return Ok(false);
        };
        if !root.auto_layout_enabled() {
            trace!(root = %root.id, "auto-layout disabled; skipping");
            return Ok(false);
        }
        let root_id = root.id.clone();
        let Some(plan) = self.plan_or_log(&root_id, None)? else {
            return Ok(false);
        };
        self.animate(plan);
        Ok(true)
    }

    /// Stores `layout_type` on the document root and relayouts it, as one undo step.
    ///
    /// Same single-tree rule as [`Editor::update_layout`]: a forest or an empty graph is left
    /// untouched and `Ok(false)` is returned. Nothing is recorded when neither the root nor any
    /// position changes.
    pub fn on_layout_change(&mut self, layout_type: LayoutType) -> Result<bool, LayoutError> {
        let Some(plan) = self.plan_document(Some(layout_type))? else {
            return Ok(false);
        };
        let root_id = plan.root_id.clone();
        self.animate_recorded(plan, |graph| {
            if let Some(root) = graph.node_mut(&root_id) {
                root.data.layout_type = Some(layout_type);
            }
        });
        debug!(%layout_type, "layout type changed");
        Ok(true)
    }

    /// Stores `layout_type` on the root of `node_id`'s tree as one undo step.
    pub fn set_layout_type(
        &mut self,
        node_id: &NodeId,
        layout_type: LayoutType,
    ) -> Result<Option<NodeId>, EditError> {
        let root_id = self.run("set_layout_type", |graph, _| {
            let root_id = graph
                .root_of(node_id)
                .map(|root| root.id.clone())
                .ok_or_else(|| ops::missing(node_id))?;
            if let Some(root) = graph.node_mut(&root_id) {
                root.data.layout_type = Some(layout_type);
            }
            Ok(root_id)
        })?;
        if let Some(root_id) = &root_id {
            self.schedule_if_auto(root_id);
        }
        Ok(root_id)
    }

    /// Toggles auto-layout on the root of `node_id`'s tree, or on every root when `None`.
    /// Enabling schedules a layout of the affected trees.
    pub fn set_auto_layout_enabled(
        &mut self,
        node_id: Option<&NodeId>,
        enabled: bool,
    ) -> Result<Vec<NodeId>, EditError> {
        let roots = self
            .run("set_auto_layout_enabled", |graph, _| {
                let root_ids = match node_id {
                    Some(node_id) => vec![graph
                        .root_of(node_id)
                        .map(|root| root.id.clone())
                        .ok_or_else(|| ops::missing(node_id))?],
                    None => graph.root_ids(),
                };
                for root_id in &root_ids {
                    if let Some(root) = graph.node_mut(root_id) {
                        root.data.is_auto_layout_enabled = Some(enabled);
                    }
                }
                Ok(root_ids)
            })?
            .unwrap_or_default();
        if enabled {
            for root_id in &roots {
                self.schedule_auto_layout(root_id.clone());
            }
        }
        Ok(roots)
    }

    /// Cancels the running animation without writing its targets. Returns the pending plan so
    /// the caller can still apply it.
    pub fn stop_animation(&mut self) -> Option<LayoutPlan> {
        self.animator.stop()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    // Clock.

    /// Runs deferred tasks that are due at `now`, then advances the animation.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let due = self.take_due(now);
        let ran_tasks = due.len();
        for task in due {
            self.run_task(task);
        }
        let frame = self.animator.on_frame(&mut self.graph, now);
        TickOutcome { frame, ran_tasks }
    }

    /// True when nothing is animating and no task is waiting.
    pub fn is_idle(&self) -> bool {
        !self.animator.is_active() && self.deferred.is_empty()
    }

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    fn take_due(&mut self, now: Instant) -> Vec<DeferredTask> {
        let mut due = Vec::new();
        self.deferred.retain_mut(|scheduled| {
            let at = *scheduled.due.get_or_insert(now + scheduled.delay);
            if at <= now {
                due.push(scheduled.task.clone());
                false
            } else {
                true
            }
        });
        due
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::AutoLayout(root_id) => {
                if let Err(err) = self.apply_auto_layout(&root_id) {
                    error!(root = %root_id, error = %err, "scheduled auto-layout failed");
                }
            }
        }
    }

    /// Queues an auto-layout of `root_id` after the configured delay. Rescheduling restarts
    /// the delay.
    fn schedule_auto_layout(&mut self, root_id: NodeId) {
        let task = DeferredTask::AutoLayout(root_id);
        let delay = self.config.auto_layout_delay();
        self.deferred.retain(|scheduled| scheduled.task != task);
        trace!(?task, delay_ms = delay.as_millis() as u64, "scheduled auto-layout");
        self.deferred.push(Scheduled {
            due: None,
            delay,
            task,
        });
    }

    fn schedule_if_auto(&mut self, node_id: &NodeId) {
        let root_id = self
            .graph
            .root_of(node_id)
            .filter(|root| root.auto_layout_enabled())
            .map(|root| root.id.clone());
        if let Some(root_id) = root_id {
            self.schedule_auto_layout(root_id);
        }
    }

    fn schedule_surviving(&mut self, roots: &[NodeId]) {
        for root_id in roots {
            self.schedule_if_auto(root_id);
        }
    }

    fn plan_or_log(
        &self,
        node_id: &NodeId,
        layout_type: Option<LayoutType>,
    ) -> Result<Option<LayoutPlan>, LayoutError> {
        match plan_subtree(&self.graph, node_id, layout_type, &self.strategies, &self.options) {
            Ok(plan) => Ok(Some(plan)),
            Err(LayoutError::MissingNode { node_id }) => {
                error!(node_id = %node_id, "layout root does not exist");
                Ok(None)
            }
            Err(err) => {
                error!(node_id = %node_id, error = %err, "subtree layout failed");
                Err(err)
            }
        }
    }

    /// Writes the plan's structure now and tweens positions towards it. Targets of a run that
    /// is still in flight are folded in, so another tree's layout is not lost halfway.
    fn plan_document(
        &self,
        layout_type: Option<LayoutType>,
    ) -> Result<Option<LayoutPlan>, LayoutError> {
        match plan_single_root(&self.graph, layout_type, &self.strategies, &self.options) {
            Ok(plan) => Ok(Some(plan)),
            Err(LayoutError::RootCount { found }) => {
                warn!(
                    roots = found,
                    "document layout needs a single root; keeping current layout"
                );
                Ok(None)
            }
            Err(err) => {
                error!(error = %err, "document layout failed");
                Err(err)
            }
        }
    }

    /// Applies `edit`, then animates `plan`, recording one entry if anything changes.
    fn animate_recorded(&mut self, plan: LayoutPlan, edit: impl FnOnce(&mut Graph)) {
        let moves = plan.moves_any(&self.graph);
        self.history.prepare(&self.graph);
        edit(&mut self.graph);
        self.animate(plan);
        if moves {
            self.history.commit();
        } else {
            self.history.commit_if_changed(&self.graph);
        }
    }

    fn animate(&mut self, plan: LayoutPlan) {
        plan.apply_structure(&mut self.graph);
        let plan = match self.animator.pending_plan() {
            Some(pending) => {
                let mut merged = pending.clone();
                merged.merge(plan);
                merged
            }
            None => plan,
        };
        self.animator
            .start(&self.graph, plan, self.config.animation_duration());
    }

    fn run<T>(
        &mut self,
        action: &'static str,
        f: impl FnOnce(&mut Graph, &mut dyn IdGenerator) -> Result<T, EditError>,
    ) -> Result<Option<T>, EditError> {
        let ids = &mut self.ids;
        let result = self
            .history
            .transaction(&mut self.graph, |graph| f(graph, ids.as_mut()));
        self.settle(action, result)
    }

    fn settle<T>(
        &mut self,
        action: &'static str,
        result: Result<T, EditError>,
    ) -> Result<Option<T>, EditError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(EditError::MissingNode { node_id }) => {
                error!(action, node_id = %node_id, "command referenced a missing node");
                Ok(None)
            }
            Err(err) if err.is_validation() => {
                warn!(action, error = %err, "command rejected");
                self.notices.push(Notice::error(err.user_message()));
                Err(err)
            }
            Err(err) => {
                error!(action, error = %err, "command failed");
                Err(err)
            }
        }
    }
}
