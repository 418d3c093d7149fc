//! Lane-gated collision detection
//!
//! Collisions only count when player and obstacle share a lane; within a
//! lane it is a plain axis-aligned bounding-box overlap. When several
//! obstacles overlap the player in the same tick, a fatal kind outranks a
//! question: game over is final and must not be masked by the milder
//! condition.

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box (y is the top edge, render-space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: boxes that merely touch edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// What this tick's collisions resolved to, carrying the obstacle id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Contact with a barrier or answer box: the run is over
    Fatal(u32),
    /// Contact with a question prompt: pause for an answer
    Question(u32),
}

/// Test every live obstacle against the player and resolve the priority.
/// Returns None when nothing overlaps.
pub fn resolve_collisions(player: &Player, obstacles: &[Obstacle]) -> Option<CollisionOutcome> {
    let player_box = player.aabb();
    let mut question_hit = None;

    for obs in obstacles {
        if obs.lane != player.lane {
            continue;
        }
        if !player_box.overlaps(&obs.aabb()) {
            continue;
        }
        if obs.kind.is_fatal() {
            // Fatal outranks any concurrent question overlap
            return Some(CollisionOutcome::Fatal(obs.id));
        }
        if question_hit.is_none() {
            question_hit = Some(obs.id);
        }
    }

    question_hit.map(CollisionOutcome::Question)
}
