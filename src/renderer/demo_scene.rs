//! Lesson demo scene
//!
//! Background, decorative clouds, the moving body, a velocity vector
//! overlay, and the numeric HUD. One renderer parameterized by demo kind;
//! the kinematics model decides where things are.

use web_sys::CanvasRenderingContext2d;

use super::{paint_clouds, paint_dot, paint_sky};
use crate::consts::*;
use crate::sim::{DemoKind, DemoParams, DemoState, KinematicBody, evaluate};

/// Paint one full demo frame
pub fn draw_demo(
    ctx: &CanvasRenderingContext2d,
    demo: &DemoState,
    body: &KinematicBody,
    params: &DemoParams,
    reduced_motion: bool,
) {
    ctx.clear_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
    paint_sky(ctx);
    if !reduced_motion {
        paint_clouds(ctx, demo.time);
    }

    // Ground band
    ctx.set_fill_style_str("#7CCD7C");
    ctx.fill_rect(
        0.0,
        DEMO_GROUND_Y as f64,
        VIEW_WIDTH as f64,
        (VIEW_HEIGHT - DEMO_GROUND_Y) as f64,
    );
    ctx.set_stroke_style_str("#228B22");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(0.0, DEMO_GROUND_Y as f64);
    ctx.line_to(VIEW_WIDTH as f64, DEMO_GROUND_Y as f64);
    ctx.stroke();

    match demo.selected {
        DemoKind::FreeFall => paint_drop_guide(ctx),
        DemoKind::Projectile => paint_trajectory(ctx, demo.time, params),
        DemoKind::Uniform => paint_track(ctx),
    }

    let body_color = match demo.selected {
        DemoKind::FreeFall => "#E74C3C",
        DemoKind::Projectile => "#8E44AD",
        DemoKind::Uniform => "#2980B9",
    };
    paint_dot(ctx, body.pos.x, body.pos.y - 12.0, 12.0, body_color);

    paint_velocity_overlay(ctx, body);
    paint_hud(ctx, demo, body);
}

/// Dashed vertical reference from the release point to the ground
fn paint_drop_guide(ctx: &CanvasRenderingContext2d) {
    ctx.set_stroke_style_str("rgba(0, 0, 0, 0.2)");
    ctx.set_line_width(1.0);
    let mut y = FREE_FALL_START_Y;
    while y < DEMO_GROUND_Y {
        ctx.begin_path();
        ctx.move_to(FREE_FALL_X as f64, y as f64);
        ctx.line_to(FREE_FALL_X as f64, (y + 8.0) as f64);
        ctx.stroke();
        y += 16.0;
    }
}

/// Dots along the flight path flown so far
fn paint_trajectory(ctx: &CanvasRenderingContext2d, time: f32, params: &DemoParams) {
    let mut t = 0.0;
    while t <= time {
        let point = evaluate(DemoKind::Projectile, t, params);
        paint_dot(ctx, point.pos.x, point.pos.y - 12.0, 2.0, "rgba(142, 68, 173, 0.5)");
        if point.landed {
            break;
        }
        t += 0.2;
    }
}

/// Track line for the uniform demo, with edge markers where the body wraps
fn paint_track(ctx: &CanvasRenderingContext2d) {
    ctx.set_stroke_style_str("#555555");
    ctx.set_line_width(3.0);
    ctx.begin_path();
    ctx.move_to(0.0, UNIFORM_Y as f64);
    ctx.line_to(VIEW_WIDTH as f64, UNIFORM_Y as f64);
    ctx.stroke();
    ctx.set_fill_style_str("#555555");
    ctx.fill_rect(0.0, (UNIFORM_Y - 14.0) as f64, 4.0, 28.0);
    ctx.fill_rect((VIEW_WIDTH - 4.0) as f64, (UNIFORM_Y - 14.0) as f64, 4.0, 28.0);
}

/// Velocity as a line plus arrowhead from the body center. Skipped when
/// the body is at rest or landed.
fn paint_velocity_overlay(ctx: &CanvasRenderingContext2d, body: &KinematicBody) {
    let speed = body.speed();
    if speed < 1.0 {
        return;
    }
    let dir = body.vel / speed;
    let len = (speed * 0.25).min(80.0);
    let from = (body.pos.x, body.pos.y - 12.0);
    let to = (from.0 + dir.x * len, from.1 + dir.y * len);

    ctx.set_stroke_style_str("#C0392B");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(from.0 as f64, from.1 as f64);
    ctx.line_to(to.0 as f64, to.1 as f64);
    // Arrowhead: two short strokes swept back from the tip
    let back = glam::Vec2::new(-dir.x, -dir.y) * 8.0;
    let left = glam::Vec2::new(-dir.y, dir.x) * 4.0;
    ctx.move_to(to.0 as f64, to.1 as f64);
    ctx.line_to((to.0 + back.x + left.x) as f64, (to.1 + back.y + left.y) as f64);
    ctx.move_to(to.0 as f64, to.1 as f64);
    ctx.line_to((to.0 + back.x - left.x) as f64, (to.1 + back.y - left.y) as f64);
    ctx.stroke();
}

/// Time / height / speed readout, in simulated units
fn paint_hud(ctx: &CanvasRenderingContext2d, demo: &DemoState, body: &KinematicBody) {
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
    ctx.fill_rect(10.0, 10.0, 210.0, 86.0);

    let height_units = ((DEMO_GROUND_Y - body.pos.y) / RENDER_SCALE).max(0.0);
    let speed_units = body.speed() / RENDER_SCALE;

    ctx.set_fill_style_str("white");
    ctx.set_font("bold 16px Arial");
    ctx.set_text_align("left");
    let _ = ctx.fill_text(&format!("Time: {:.1} s", demo.time), 20.0, 34.0);
    let _ = ctx.fill_text(&format!("Height: {height_units:.1} m"), 20.0, 58.0);
    let _ = ctx.fill_text(&format!("Speed: {speed_units:.1} m/s"), 20.0, 82.0);

    if !demo.is_playing {
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.6)");
        ctx.fill_rect((VIEW_WIDTH / 2.0 - 60.0) as f64, 16.0, 120.0, 30.0);
        ctx.set_fill_style_str("#FFD700");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("PAUSED", (VIEW_WIDTH / 2.0) as f64, 37.0);
        ctx.set_text_align("left");
    }
}
