// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cosmetic interpolation towards a [`LayoutPlan`].
//!
//! The animator never owns the final state: frames write eased positions, and the exact target
//! positions are committed once the nominal duration has elapsed. Time is supplied by the host.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::model::{NodeId, Position};
use crate::store::Graph;

use super::plan::LayoutPlan;

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(800);

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Start and target captured once for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTween {
    pub id: NodeId,
    pub start: Position,
    pub target: Position,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl NodeTween {
    pub fn at(&self, eased: f64) -> Position {
        self.start.offset(self.delta_x * eased, self.delta_y * eased)
    }
}

/// One interpolation run. The clock starts on the first frame.
#[derive(Debug, Clone)]
pub struct Tween {
    nodes: Vec<NodeTween>,
    duration: Duration,
    started_at: Option<Instant>,
}

impl Tween {
    pub fn capture(graph: &Graph, plan: &LayoutPlan, duration: Duration) -> Self {
        let nodes = plan
            .placements
            .iter()
            .filter_map(|placement| {
                let start = graph.node(&placement.id)?.position;
                let (delta_x, delta_y) = start.delta_to(placement.position);
                Some(NodeTween {
                    id: placement.id.clone(),
                    start,
                    target: placement.position,
                    delta_x,
                    delta_y,
                })
            })
            .collect();
        Self {
            nodes,
            duration,
            started_at: None,
        }
    }

    pub fn nodes(&self) -> &[NodeTween] {
        &self.nodes
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&mut self, now: Instant) -> f64 {
        let started_at = *self.started_at.get_or_insert(now);
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn write_frame(&self, graph: &mut Graph, eased: f64) {
        for tween in &self.nodes {
            if let Some(node) = graph.node_mut(&tween.id) {
                node.position = tween.at(eased);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Nothing is animating.
    Idle,
    Animating { progress: f64 },
    /// The run finished and its plan's exact positions were written.
    Committed(LayoutPlan),
}

#[derive(Debug)]
struct Run {
    generation: u64,
    tween: Tween,
    plan: LayoutPlan,
}

/// Holds at most one run; starting another supersedes the previous one.
#[derive(Debug, Default)]
pub struct Animator {
    run: Option<Run>,
    generation: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// Incremented on every start.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_plan(&self) -> Option<&LayoutPlan> {
        self.run.as_ref().map(|run| &run.plan)
    }

    /// Starts a run towards `plan`, returning the superseded run's plan, which is discarded
    /// unless the caller applies it.
    pub fn start(
        &mut self,
        graph: &Graph,
        plan: LayoutPlan,
        duration: Duration,
    ) -> Option<LayoutPlan> {
        let superseded = self.stop();
        self.generation += 1;
        debug!(
            generation = self.generation,
            root = %plan.root_id,
            nodes = plan.placements.len(),
            duration_ms = duration.as_millis() as u64,
            "layout animation started"
        );
        self.run = Some(Run {
            generation: self.generation,
            tween: Tween::capture(graph, &plan, duration),
            plan,
        });
        superseded
    }

    /// Cancels the current run without writing targets. Returns its plan.
    pub fn stop(&mut self) -> Option<LayoutPlan> {
        let run = self.run.take()?;
        debug!(generation = run.generation, "layout animation stopped");
        Some(run.plan)
    }

    /// Advances the current run to `now`.
    pub fn on_frame(&mut self, graph: &mut Graph, now: Instant) -> FrameOutcome {
        let Some(run) = self.run.as_mut() else {
            return FrameOutcome::Idle;
        };
        let progress = run.tween.progress(now);
        if progress < 1.0 {
            run.tween.write_frame(graph, ease_cubic_in_out(progress));
            return FrameOutcome::Animating { progress };
        }

        let Some(run) = self.run.take() else {
            return FrameOutcome::Idle;
        };
        run.plan.apply_positions(graph);
        debug!(generation = run.generation, "layout animation committed");
        FrameOutcome::Committed(run.plan)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ease_cubic_in_out, Animator, FrameOutcome};
    use crate::layout::plan::{LayoutPlan, NodePlacement};
    use crate::model::fixtures::{chain, nid};
    use crate::model::{LayoutType, Position, Side};
    use crate::store::Graph;

    fn plan_moving_b_to(x: f64, y: f64) -> LayoutPlan {
        LayoutPlan {
            layout_type: LayoutType::RightOnly,
            root_id: nid("a"),
            placements: vec![NodePlacement {
                id: nid("b"),
                position: Position::new(x, y),
                side: Side::Right,
                sibling_order: Some(0),
            }],
            routes: Vec::new(),
        }
    }

    #[test]
    fn easing_is_symmetric_and_bounded() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(2.0), 1.0);
        let a = ease_cubic_in_out(0.25);
        let b = ease_cubic_in_out(0.75);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn frames_interpolate_then_commit_exact_targets() {
        let mut graph = Graph::from_document(chain()).expect("graph");
        let mut animator = Animator::new();
        let t0 = Instant::now();
        animator.start(&graph, plan_moving_b_to(380.0, 400.0), Duration::from_millis(800));

        assert_eq!(
            animator.on_frame(&mut graph, t0),
            FrameOutcome::Animating { progress: 0.0 }
        );
        animator.on_frame(&mut graph, t0 + Duration::from_millis(400));
        let mid = graph.node(&nid("b")).expect("b").position;
        assert_eq!(mid, Position::new(380.0, 200.0));

        let outcome = animator.on_frame(&mut graph, t0 + Duration::from_millis(900));
        assert!(matches!(outcome, FrameOutcome::Committed(_)));
        assert_eq!(
            graph.node(&nid("b")).expect("b").position,
            Position::new(380.0, 400.0)
        );
        assert!(!animator.is_active());
        assert_eq!(animator.on_frame(&mut graph, t0), FrameOutcome::Idle);
    }

    #[test]
    fn new_run_supersedes_and_stop_leaves_positions() {
        let mut graph = Graph::from_document(chain()).expect("graph");
        let mut animator = Animator::new();
        let t0 = Instant::now();
        assert!(animator
            .start(&graph, plan_moving_b_to(0.0, 999.0), Duration::from_millis(800))
            .is_none());
        animator.on_frame(&mut graph, t0);
        let superseded = animator.start(
            &graph,
            plan_moving_b_to(380.0, -80.0),
            Duration::from_millis(800),
        );
        assert_eq!(
            superseded.and_then(|plan| plan.target_of(&nid("b"))),
            Some(Position::new(0.0, 999.0))
        );
        assert_eq!(animator.generation(), 2);

        let pending = animator.stop().expect("pending plan");
        assert_eq!(pending.target_of(&nid("b")), Some(Position::new(380.0, -80.0)));
        assert_eq!(
            graph.node(&nid("b")).expect("b").position,
            Position::new(380.0, 0.0)
        );
    }
}
