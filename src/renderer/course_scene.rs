//! Obstacle-course scene
//!
//! Parallax background layers keyed off the tick counter (cosmetic only),
//! the three-lane track, live obstacles, the player, and the HUD with the
//! question banner and terminal overlays.

use web_sys::CanvasRenderingContext2d;

use super::{paint_clouds, paint_dot, paint_sky};
use crate::consts::*;
use crate::sim::{Obstacle, ObstacleKind, RunPhase, RunState};

/// Pixels of visual depth separating adjacent lanes
const LANE_DEPTH: f32 = 14.0;

fn lane_shift(lane: u8) -> f32 {
    (lane as f32 - 1.0) * LANE_DEPTH
}

/// Paint one full course frame
pub fn draw_course(ctx: &CanvasRenderingContext2d, run: &RunState, reduced_motion: bool) {
    ctx.clear_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
    paint_sky(ctx);

    let phase = run.ticks as f32 * 0.1;
    if !reduced_motion {
        paint_clouds(ctx, phase);
        paint_buildings(ctx, phase);
    }
    paint_track(ctx);

    for obs in &run.obstacles {
        paint_obstacle(ctx, obs);
    }
    paint_player(ctx, run);
    paint_hud(ctx, run);

    match run.phase {
        RunPhase::Idle => paint_center_card(ctx, "PHYSICS RUN", "Press Start - W jumps, A/D switch lanes"),
        RunPhase::AwaitingAnswer => paint_question_banner(ctx, run),
        RunPhase::Over => paint_center_card(
            ctx,
            "GAME OVER",
            &format!("Final score: {} - press Start to retry", run.score),
        ),
        RunPhase::Running => {}
    }
}

/// Distant skyline scrolling slower than the track
fn paint_buildings(ctx: &CanvasRenderingContext2d, phase: f32) {
    ctx.set_fill_style_str("rgba(100, 100, 100, 0.3)");
    for i in 0..8 {
        let x = (i as f32 * 110.0 - phase * 15.0).rem_euclid(VIEW_WIDTH + 110.0) - 110.0;
        let height = 80.0 + (i % 3) as f32 * 20.0;
        ctx.fill_rect(
            x as f64,
            (RUN_GROUND_Y - height) as f64,
            80.0,
            height as f64,
        );
    }
}

/// Ground band, sidewalk strip, and the three lane guide lines
fn paint_track(ctx: &CanvasRenderingContext2d) {
    ctx.set_fill_style_str("#C0C0C0");
    ctx.fill_rect(0.0, RUN_GROUND_Y as f64, VIEW_WIDTH as f64, 20.0);

    ctx.set_fill_style_str("#90EE90");
    ctx.fill_rect(
        0.0,
        (RUN_GROUND_Y + 20.0) as f64,
        VIEW_WIDTH as f64,
        (VIEW_HEIGHT - RUN_GROUND_Y - 20.0) as f64,
    );

    ctx.set_stroke_style_str("#A0A0A0");
    ctx.set_line_width(1.0);
    for lane in 0..LANE_COUNT {
        let y = RUN_GROUND_Y + lane_shift(lane);
        ctx.begin_path();
        ctx.move_to(0.0, y as f64);
        ctx.line_to(VIEW_WIDTH as f64, y as f64);
        ctx.stroke();
    }
}

fn paint_obstacle(ctx: &CanvasRenderingContext2d, obs: &Obstacle) {
    let shift = lane_shift(obs.lane);
    let x = obs.x as f64;
    let top = (obs.top() + shift) as f64;
    let w = obs.width() as f64;
    let h = obs.height() as f64;

    match obs.kind {
        ObstacleKind::Barrier | ObstacleKind::LowBarrier | ObstacleKind::HighBarrier => {
            let (color, label) = match obs.kind {
                ObstacleKind::LowBarrier => ("#CD853F", Some("LOW")),
                ObstacleKind::HighBarrier => ("#654321", Some("HIGH")),
                _ => ("#8B4513", None),
            };
            ctx.set_fill_style_str(color);
            ctx.fill_rect(x, top, w, h);
            // Cap rail
            ctx.set_fill_style_str("#A0522D");
            ctx.fill_rect(x - 5.0, top - 8.0, w + 10.0, 8.0);
            if let Some(label) = label {
                ctx.set_fill_style_str("white");
                ctx.set_font("bold 10px Arial");
                ctx.set_text_align("center");
                let _ = ctx.fill_text(label, x + w / 2.0, top + h / 2.0);
                ctx.set_text_align("left");
            }
        }
        ObstacleKind::Question => {
            ctx.set_fill_style_str("#4CAF50");
            ctx.fill_rect(x, top, w, h);
            ctx.set_stroke_style_str("#2E7D32");
            ctx.set_line_width(3.0);
            ctx.stroke_rect(x, top, w, h);
            ctx.set_fill_style_str("white");
            ctx.set_font("bold 22px Arial");
            ctx.set_text_align("center");
            let _ = ctx.fill_text("?", x + w / 2.0, top + h / 2.0 + 8.0);
            ctx.set_text_align("left");
        }
        ObstacleKind::AnswerOption => {
            ctx.set_fill_style_str("#FF6B35");
            ctx.fill_rect(x, top, w, h);
            ctx.set_stroke_style_str("#E55A2B");
            ctx.set_line_width(3.0);
            ctx.stroke_rect(x, top, w, h);
            ctx.set_fill_style_str("white");
            ctx.set_font("bold 10px Arial");
            ctx.set_text_align("center");
            let text = obs
                .answer_index
                .zip(obs.question.as_ref())
                .and_then(|(i, q)| q.options.get(i).cloned())
                .unwrap_or_else(|| "?".to_string());
            let _ = ctx.fill_text(&text, x + w / 2.0, top + h / 2.0);
            let _ = ctx.fill_text(&format!("Track {}", obs.lane + 1), x + w / 2.0, top - 12.0);
            ctx.set_text_align("left");
        }
    }
}

/// Runner body with a simple leg-swing animation keyed off the tick count
fn paint_player(ctx: &CanvasRenderingContext2d, run: &RunState) {
    let player = &run.player;
    let shift = lane_shift(player.lane);
    let x = PLAYER_X as f64;
    let top = (player.y - PLAYER_HEIGHT + shift) as f64;
    let w = PLAYER_WIDTH as f64;
    let h = PLAYER_HEIGHT as f64;

    // Shadow stays on the ground while the body jumps
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.3)");
    ctx.begin_path();
    let _ = ctx.ellipse(
        x + w / 2.0,
        (RUN_GROUND_Y + shift + 6.0) as f64,
        w / 2.0 + 4.0,
        7.0,
        0.0,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.fill();

    ctx.set_fill_style_str("#FF6B6B");
    ctx.fill_rect(x, top, w, h);
    paint_dot(ctx, PLAYER_X + PLAYER_WIDTH / 2.0, player.y - PLAYER_HEIGHT + shift - 10.0, 14.0, "#FF8E8E");
    paint_dot(ctx, PLAYER_X + PLAYER_WIDTH / 2.0 - 5.0, player.y - PLAYER_HEIGHT + shift - 13.0, 3.0, "white");
    paint_dot(ctx, PLAYER_X + PLAYER_WIDTH / 2.0 + 5.0, player.y - PLAYER_HEIGHT + shift - 13.0, 3.0, "white");

    let stride = ((run.ticks as f32) * 0.5).sin() * 3.0;
    ctx.set_fill_style_str("#FF4444");
    ctx.fill_rect(x + 8.0, top + h, 5.0, (10.0 + stride) as f64);
    ctx.fill_rect(x + 26.0, top + h, 5.0, (10.0 - stride) as f64);
}

/// Score and speed readout
fn paint_hud(ctx: &CanvasRenderingContext2d, run: &RunState) {
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
    ctx.fill_rect(10.0, 90.0, 170.0, 56.0);
    ctx.set_fill_style_str("white");
    ctx.set_font("bold 18px Arial");
    ctx.set_text_align("left");
    let _ = ctx.fill_text(&format!("Score: {}", run.score), 20.0, 112.0);
    ctx.set_font("bold 14px Arial");
    let _ = ctx.fill_text(&format!("Speed: {:.1}", run.speed), 20.0, 136.0);
}

/// Top bar with the pending question and answer instructions
fn paint_question_banner(ctx: &CanvasRenderingContext2d, run: &RunState) {
    let Some(question) = run.pending_question().and_then(|o| o.question.as_ref()) else {
        return;
    };

    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, 80.0);
    let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0.9)");
    let _ = gradient.add_color_stop(1.0, "rgba(0, 50, 0, 0.9)");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, 80.0);

    ctx.set_fill_style_str("white");
    ctx.set_font("bold 18px Arial");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(&question.prompt, (VIEW_WIDTH / 2.0) as f64, 30.0);

    ctx.set_fill_style_str("#FFD700");
    ctx.set_font("bold 14px Arial");
    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{}: {o}", i + 1))
        .collect::<Vec<_>>()
        .join("   ");
    let _ = ctx.fill_text(&options, (VIEW_WIDTH / 2.0) as f64, 58.0);
    ctx.set_text_align("left");
}

/// Centered overlay card for the Idle and Over states
fn paint_center_card(ctx: &CanvasRenderingContext2d, title: &str, line: &str) {
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.55)");
    ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

    let cx = (VIEW_WIDTH / 2.0) as f64;
    let cy = (VIEW_HEIGHT / 2.0) as f64;
    ctx.set_fill_style_str("white");
    ctx.set_font("bold 32px Arial");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(title, cx, cy - 12.0);
    ctx.set_font("16px Arial");
    let _ = ctx.fill_text(line, cx, cy + 20.0);
    ctx.set_text_align("left");
}
