//! Canvas 2D scene painting
//!
//! Drawing is strictly read-only over simulation state: the loop applies a
//! tick's mutations fully, then paints. If the canvas context is missing the
//! caller skips the frame and retries next callback; nothing here panics in
//! the frame path.

mod course_scene;
mod demo_scene;

pub use course_scene::draw_course;
pub use demo_scene::draw_demo;

use web_sys::CanvasRenderingContext2d;

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

/// Sky gradient shared by both scenes
fn paint_sky(ctx: &CanvasRenderingContext2d) {
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, VIEW_HEIGHT as f64);
    let _ = gradient.add_color_stop(0.0, "#87CEEB");
    let _ = gradient.add_color_stop(0.7, "#E0F6FF");
    let _ = gradient.add_color_stop(1.0, "#90EE90");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
}

/// Drifting clouds, parameterized by an animation phase. Cosmetic only.
fn paint_clouds(ctx: &CanvasRenderingContext2d, phase: f32) {
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
    for i in 0..5 {
        let drift = (200.0 + i as f32 * 200.0 - phase * 20.0).rem_euclid(VIEW_WIDTH + 100.0) - 50.0;
        let bob = 30.0 + (phase * 0.5 + i as f32).sin() * 10.0;
        ctx.begin_path();
        let _ = ctx.arc(drift as f64, bob as f64, 22.0, 0.0, std::f64::consts::TAU);
        let _ = ctx.arc((drift + 28.0) as f64, bob as f64, 26.0, 0.0, std::f64::consts::TAU);
        let _ = ctx.arc((drift + 56.0) as f64, bob as f64, 22.0, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }
}

/// Filled circle helper
fn paint_dot(ctx: &CanvasRenderingContext2d, x: f32, y: f32, r: f32, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(x as f64, y as f64, r as f64, 0.0, std::f64::consts::TAU);
    ctx.fill();
}
