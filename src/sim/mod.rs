//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step increments only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod demo;
pub mod kinematics;
pub mod questions;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionOutcome, resolve_collisions};
pub use demo::{DemoEvent, DemoState};
pub use kinematics::{DemoKind, DemoParams, KinematicBody, evaluate};
pub use questions::{Question, builtin_bank};
pub use state::{GameEvent, Obstacle, ObstacleKind, Player, RunPhase, RunState};
pub use tick::{TickInput, submit_answer, tick};
