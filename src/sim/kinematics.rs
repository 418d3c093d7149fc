//! Kinematics model for the lesson demos
//!
//! Closed-form evaluation: a body's position is a function of elapsed
//! simulated time and fixed parameters, never of the previous frame. Calling
//! with the same time twice yields the same result, which is what makes the
//! demos restartable and the renderer stateless.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which motion demo to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DemoKind {
    #[default]
    FreeFall,
    Projectile,
    Uniform,
}

impl DemoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoKind::FreeFall => "freefall",
            DemoKind::Projectile => "projectile",
            DemoKind::Uniform => "uniform",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "freefall" => Some(DemoKind::FreeFall),
            "projectile" => Some(DemoKind::Projectile),
            "uniform" => Some(DemoKind::Uniform),
            _ => None,
        }
    }
}

/// Launch parameters for the projectile and uniform demos.
///
/// Range validation (10-80°, 10-100 units) is a settings-layer concern;
/// the model accepts any real and stays total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemoParams {
    pub angle_degrees: f32,
    pub speed: f32,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            angle_degrees: 45.0,
            speed: 50.0,
        }
    }
}

/// Derived per-frame body: render-space position plus velocity for the
/// HUD and vector overlay. Recomputed every frame, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    /// Render-space position (y grows downward)
    pub pos: Vec2,
    /// Render-space velocity (px/s)
    pub vel: Vec2,
    /// True once the body has reached the ground (free fall / projectile)
    pub landed: bool,
}

impl KinematicBody {
    /// Velocity magnitude for the HUD
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Evaluate a demo at the given simulated time.
///
/// Total over any input: negative time is clamped to zero rather than
/// rejected, since a panic here would kill the animation loop and a single
/// odd frame is preferable to broken playback.
pub fn evaluate(kind: DemoKind, time: f32, params: &DemoParams) -> KinematicBody {
    let t = if time.is_finite() { time.max(0.0) } else { 0.0 };
    match kind {
        DemoKind::FreeFall => free_fall(t),
        DemoKind::Projectile => projectile(t, params),
        DemoKind::Uniform => uniform(t, params),
    }
}

/// Drop from rest: y = y0 + ½gt², v = gt. Clamped at the ground; once
/// clamped the body is landed and stops reporting velocity.
fn free_fall(t: f32) -> KinematicBody {
    let y = FREE_FALL_START_Y + 0.5 * GRAVITY * t * t * RENDER_SCALE;
    if y >= DEMO_GROUND_Y {
        return KinematicBody {
            pos: Vec2::new(FREE_FALL_X, DEMO_GROUND_Y),
            vel: Vec2::ZERO,
            landed: true,
        };
    }
    KinematicBody {
        pos: Vec2::new(FREE_FALL_X, y),
        vel: Vec2::new(0.0, GRAVITY * t * RENDER_SCALE),
        landed: false,
    }
}

/// Independent horizontal and vertical components; once the flight time
/// exceeds `2·v0·sinθ/g` the body is landed and frozen at its impact point.
fn projectile(t: f32, params: &DemoParams) -> KinematicBody {
    let theta = params.angle_degrees.to_radians();
    let vx = params.speed * theta.cos();
    let vy = params.speed * theta.sin();

    let flight_time = (2.0 * vy / GRAVITY).max(0.0);
    if t > 0.0 && t >= flight_time {
        return KinematicBody {
            pos: Vec2::new(
                PROJECTILE_START_X + vx * flight_time * RENDER_SCALE,
                PROJECTILE_START_Y,
            ),
            vel: Vec2::ZERO,
            landed: true,
        };
    }

    let x = PROJECTILE_START_X + vx * t * RENDER_SCALE;
    let y = PROJECTILE_START_Y - (vy * t - 0.5 * GRAVITY * t * t) * RENDER_SCALE;
    KinematicBody {
        pos: Vec2::new(x, y),
        vel: Vec2::new(vx * RENDER_SCALE, -(vy - GRAVITY * t) * RENDER_SCALE),
        landed: false,
    }
}

/// Constant-velocity motion that wraps at the right edge and re-enters
/// from the left (looping demo, never terminates).
fn uniform(t: f32, params: &DemoParams) -> KinematicBody {
    let x = (params.speed * t * RENDER_SCALE).rem_euclid(VIEW_WIDTH);
    KinematicBody {
        pos: Vec2::new(x, UNIFORM_Y),
        vel: Vec2::new(params.speed * RENDER_SCALE, 0.0),
        landed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_free_fall_at_zero() {
        let body = evaluate(DemoKind::FreeFall, 0.0, &DemoParams::default());
        assert_eq!(body.pos.y, FREE_FALL_START_Y);
        assert_eq!(body.speed(), 0.0);
        assert!(!body.landed);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let params = DemoParams::default();
        for kind in [DemoKind::FreeFall, DemoKind::Projectile, DemoKind::Uniform] {
            let a = evaluate(kind, 1.7, &params);
            let b = evaluate(kind, 1.7, &params);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_free_fall_lands() {
        let body = evaluate(DemoKind::FreeFall, 100.0, &DemoParams::default());
        assert!(body.landed);
        assert_eq!(body.pos.y, DEMO_GROUND_Y);
        assert_eq!(body.vel, glam::Vec2::ZERO);
    }

    #[test]
    fn test_negative_time_clamps_to_zero() {
        let params = DemoParams::default();
        let neg = evaluate(DemoKind::Projectile, -3.0, &params);
        let zero = evaluate(DemoKind::Projectile, 0.0, &params);
        assert_eq!(neg, zero);
    }

    #[test]
    fn test_projectile_rises_then_lands() {
        let params = DemoParams::default();
        let early = evaluate(DemoKind::Projectile, 0.5, &params);
        assert!(early.pos.y < PROJECTILE_START_Y);
        assert!(!early.landed);

        let late = evaluate(DemoKind::Projectile, 1000.0, &params);
        assert!(late.landed);
        assert_eq!(late.pos.y, PROJECTILE_START_Y);
    }

    #[test]
    fn test_landed_projectile_is_at_rest() {
        let params = DemoParams::default();
        let flight_time =
            2.0 * params.speed * params.angle_degrees.to_radians().sin() / GRAVITY;

        // Past the flight time the body stays frozen at its impact point
        let a = evaluate(DemoKind::Projectile, flight_time + 1.0, &params);
        let b = evaluate(DemoKind::Projectile, flight_time + 100.0, &params);
        assert!(a.landed);
        assert_eq!(a, b);
        assert_eq!(a.vel, Vec2::ZERO);
        assert_eq!(a.pos.y, PROJECTILE_START_Y);

        // Impact point matches the trajectory evaluated just before landing
        let near = evaluate(DemoKind::Projectile, flight_time - 1e-3, &params);
        assert!((a.pos.x - near.pos.x).abs() < 1.0);
    }

    #[test]
    fn test_uniform_wraps_at_right_edge() {
        let params = DemoParams {
            angle_degrees: 45.0,
            speed: 50.0,
        };
        // One full track width is speed * scale px/s -> wraps every
        // VIEW_WIDTH / (speed * scale) seconds.
        let period = VIEW_WIDTH / (params.speed * RENDER_SCALE);
        let a = evaluate(DemoKind::Uniform, 0.25 * period, &params);
        let b = evaluate(DemoKind::Uniform, 1.25 * period, &params);
        assert!((a.pos.x - b.pos.x).abs() < 0.01);
        assert!(!a.landed);
    }

    proptest! {
        #[test]
        fn prop_vertical_position_never_below_ground(t in 0.0f32..10_000.0) {
            let params = DemoParams::default();
            let ff = evaluate(DemoKind::FreeFall, t, &params);
            prop_assert!(ff.pos.y <= DEMO_GROUND_Y);
            let pr = evaluate(DemoKind::Projectile, t, &params);
            prop_assert!(pr.pos.y <= PROJECTILE_START_Y + 1e-3);
        }

        #[test]
        fn prop_uniform_stays_in_view(t in 0.0f32..10_000.0, speed in 10.0f32..100.0) {
            let params = DemoParams { angle_degrees: 45.0, speed };
            let body = evaluate(DemoKind::Uniform, t, &params);
            prop_assert!(body.pos.x >= 0.0);
            prop_assert!(body.pos.x < VIEW_WIDTH);
        }
    }
}
