//! Obstacle-course tick
//!
//! One call advances the session by exactly one step: integrate the player,
//! apply lane input, scroll and cull obstacles, roll the spawner, resolve
//! collisions, ramp the speed. The whole step is synchronous; the caller
//! draws only after it returns, so no frame ever observes a half-applied
//! state.

use rand::Rng;

use super::collision::{CollisionOutcome, resolve_collisions};
use super::state::{GameEvent, Obstacle, ObstacleKind, RunPhase, RunState};
use crate::consts::*;

/// Input commands for a single tick.
///
/// `jump` is a latch (held key, re-applied whenever grounded); the lane
/// fields are one logical press per key-down edge - the embedder sets them
/// on key-down and clears them after the tick, so a held key never skips
/// multiple lanes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump: bool,
    pub lane_left: bool,
    pub lane_right: bool,
}

/// Advance the session by one tick. No-op unless the run is in `Running`;
/// `Over` and `AwaitingAnswer` freeze every field until restart or answer.
pub fn tick(state: &mut RunState, input: &TickInput) {
    if state.phase != RunPhase::Running {
        return;
    }
    state.ticks += 1;

    // Vertical integration: gravity, ground clamp, then the jump latch
    let player = &mut state.player;
    player.velocity_y += RUN_GRAVITY;
    player.y += player.velocity_y;
    if player.y >= RUN_GROUND_Y {
        player.y = RUN_GROUND_Y;
        player.velocity_y = 0.0;
        player.is_jumping = false;
    }
    if input.jump && !player.is_jumping {
        player.velocity_y = JUMP_IMPULSE;
        player.is_jumping = true;
    }

    // Lane change edges, clamped to the track
    if input.lane_left && player.lane > 0 {
        player.lane -= 1;
    }
    if input.lane_right && player.lane + 1 < LANE_COUNT {
        player.lane += 1;
    }

    // Scroll and cull
    let speed = state.speed;
    for obs in &mut state.obstacles {
        obs.x -= speed;
    }
    state.obstacles.retain(|o| o.x > DESPAWN_X);

    // Probabilistic spawn, bounded by the live-obstacle cap
    if state.obstacles.len() < MAX_LIVE_OBSTACLES && state.rng.random::<f32>() < SPAWN_CHANCE {
        spawn_obstacle(state);
    }
    if state.obstacles.len() < SECOND_SPAWN_MAX && state.rng.random::<f32>() < SECOND_SPAWN_CHANCE {
        spawn_obstacle(state);
    }

    // Collision resolution
    match resolve_collisions(&state.player, &state.obstacles) {
        Some(CollisionOutcome::Fatal(id)) => {
            log::info!("fatal collision with obstacle {id}, final score {}", state.score);
            state.phase = RunPhase::Over;
            state.events.push(GameEvent::RunOver { score: state.score });
            return;
        }
        Some(CollisionOutcome::Question(id)) => {
            state.phase = RunPhase::AwaitingAnswer;
            state.pending_question = Some(id);
            return;
        }
        None => {}
    }

    // Difficulty ramp, unbounded
    if state.ticks.is_multiple_of(SPEED_RAMP_INTERVAL) {
        state.speed += SPEED_INCREMENT;
    }
}

/// Resolve the pending question. Only meaningful in `AwaitingAnswer`.
/// Correct: remove the obstacle, award the fixed reward, resume. Wrong:
/// the run is over.
pub fn submit_answer(state: &mut RunState, option_index: usize) {
    if state.phase != RunPhase::AwaitingAnswer {
        return;
    }
    let Some(id) = state.pending_question else {
        state.phase = RunPhase::Running;
        return;
    };
    let correct = state
        .obstacles
        .iter()
        .find(|o| o.id == id)
        .and_then(|o| o.question.as_ref())
        .is_some_and(|q| q.is_correct(option_index));

    state.pending_question = None;
    if correct {
        state.obstacles.retain(|o| o.id != id);
        state.score += ANSWER_REWARD;
        state.phase = RunPhase::Running;
        state.events.push(GameEvent::AnswerCorrect {
            reward: ANSWER_REWARD,
        });
        log::info!("correct answer, score {}", state.score);
    } else {
        state.phase = RunPhase::Over;
        state.events.push(GameEvent::RunOver { score: state.score });
        log::info!("wrong answer, final score {}", state.score);
    }
}

/// Create one obstacle at the far right edge. Spawning only ever happens
/// at SPAWN_X, so a new obstacle can never overlap the player on the tick
/// it is created.
fn spawn_obstacle(state: &mut RunState) {
    // Plain barriers are twice as likely as the special kinds
    const KINDS: [ObstacleKind; 6] = [
        ObstacleKind::Barrier,
        ObstacleKind::Barrier,
        ObstacleKind::LowBarrier,
        ObstacleKind::HighBarrier,
        ObstacleKind::Question,
        ObstacleKind::AnswerOption,
    ];
    let kind = KINDS[state.rng.random_range(0..KINDS.len())];
    let lane = state.rng.random_range(0..LANE_COUNT);

    let (question, answer_index) = match kind {
        ObstacleKind::Question => {
            let qi = state.rng.random_range(0..state.bank.len());
            (Some(state.bank[qi].clone()), None)
        }
        ObstacleKind::AnswerOption => {
            let qi = state.rng.random_range(0..state.bank.len());
            let q = state.bank[qi].clone();
            let ai = state.rng.random_range(0..q.options.len());
            (Some(q), Some(ai))
        }
        _ => (None, None),
    };

    let obstacle = Obstacle {
        id: state.next_entity_id(),
        kind,
        x: SPAWN_X,
        lane,
        question,
        answer_index,
    };
    state.obstacles.push(obstacle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::questions::Question;
    use proptest::prelude::*;

    fn started(seed: u64) -> RunState {
        let mut state = RunState::new(seed);
        state.start();
        state
    }

    /// Place a question obstacle a few ticks ahead of the player slot
    fn plant_question(state: &mut RunState, lane: u8) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Question,
            x: PLAYER_X + PLAYER_WIDTH + 10.0,
            lane,
            question: Some(Question::new("unit of force?", ["Joule", "Newton", "Watt"], 1)),
            answer_index: None,
        });
        id
    }

    /// Tick until the phase leaves Running (bounded)
    fn tick_until_transition(state: &mut RunState) {
        let input = TickInput::default();
        for _ in 0..200 {
            tick(state, &input);
            if state.phase != RunPhase::Running {
                return;
            }
        }
        panic!("no phase transition within 200 ticks");
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = RunState::new(1);
        let before = state.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ticks, before.ticks);
        assert_eq!(state.phase, RunPhase::Idle);
    }

    #[test]
    fn test_jump_rises_and_lands() {
        let mut state = started(1);
        state.obstacles.clear();

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert!(state.player.is_jumping);
        assert!(state.player.velocity_y < 0.0);

        // Holding jump must not re-trigger mid-air
        tick(&mut state, &jump);
        assert!(state.player.y < RUN_GROUND_Y);

        // Released: integrate until ground contact
        let none = TickInput::default();
        for _ in 0..200 {
            tick(&mut state, &none);
            state.obstacles.clear(); // keep the spawner out of this test
            if !state.player.is_jumping {
                break;
            }
        }
        assert_eq!(state.player.y, RUN_GROUND_Y);
        assert_eq!(state.player.velocity_y, 0.0);
        assert!(!state.player.is_jumping);
    }

    #[test]
    fn test_lane_changes_clamp() {
        let mut state = started(2);
        state.obstacles.clear();
        let left = TickInput {
            lane_left: true,
            ..Default::default()
        };
        let right = TickInput {
            lane_right: true,
            ..Default::default()
        };

        tick(&mut state, &left);
        assert_eq!(state.player.lane, 0);
        state.obstacles.clear();
        tick(&mut state, &left);
        assert_eq!(state.player.lane, 0);

        for _ in 0..5 {
            state.obstacles.clear();
            tick(&mut state, &right);
        }
        assert_eq!(state.player.lane, LANE_COUNT - 1);
    }

    #[test]
    fn test_question_collision_pauses_not_over() {
        let mut state = started(3);
        state.obstacles.clear();
        let id = plant_question(&mut state, 1);

        tick_until_transition(&mut state);
        assert_eq!(state.phase, RunPhase::AwaitingAnswer);
        assert_eq!(state.pending_question, Some(id));
        assert_eq!(state.pending_question().map(|o| o.id), Some(id));
    }

    #[test]
    fn test_awaiting_answer_freezes_ticks() {
        let mut state = started(3);
        state.obstacles.clear();
        plant_question(&mut state, 1);
        tick_until_transition(&mut state);

        let ticks = state.ticks;
        let positions: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ticks, ticks);
        let after: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_correct_answer_resumes_and_scores() {
        let mut state = started(4);
        state.obstacles.clear();
        let id = plant_question(&mut state, 1);
        tick_until_transition(&mut state);

        submit_answer(&mut state, 1);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, ANSWER_REWARD);
        assert!(state.pending_question.is_none());
        assert!(state.obstacles.iter().all(|o| o.id != id));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::AnswerCorrect { reward: ANSWER_REWARD })
        );
    }

    #[test]
    fn test_wrong_answer_ends_run() {
        let mut state = started(5);
        state.obstacles.clear();
        plant_question(&mut state, 1);
        tick_until_transition(&mut state);

        submit_answer(&mut state, 0);
        assert_eq!(state.phase, RunPhase::Over);
        assert_eq!(state.score, 0);
        assert!(state.drain_events().contains(&GameEvent::RunOver { score: 0 }));
    }

    #[test]
    fn test_answer_outside_pause_is_ignored() {
        let mut state = started(6);
        state.obstacles.clear();
        submit_answer(&mut state, 0);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_terminal_state_is_stable() {
        let mut state = started(7);
        state.obstacles.clear();
        plant_question(&mut state, 1);
        tick_until_transition(&mut state);
        submit_answer(&mut state, 0);
        assert_eq!(state.phase, RunPhase::Over);

        let score = state.score;
        let speed = state.speed;
        let ticks = state.ticks;
        let positions: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();

        let input = TickInput {
            jump: true,
            lane_left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &input);
        }
        assert_eq!(state.phase, RunPhase::Over);
        assert_eq!(state.score, score);
        assert_eq!(state.speed, speed);
        assert_eq!(state.ticks, ticks);
        let after: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(positions, after);

        // Explicit restart is the only way out
        state.start();
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_speed_ramps_on_cadence() {
        let mut state = started(8);
        state.ticks = SPEED_RAMP_INTERVAL - 1;
        state.obstacles.clear();
        tick(&mut state, &TickInput::default());
        // Spawns land at the far edge and cannot have collided in one tick
        assert_eq!(state.phase, RunPhase::Running);
        assert!((state.speed - (START_SPEED + SPEED_INCREMENT)).abs() < 1e-6);
    }

    #[test]
    fn test_spawner_spawns_at_far_edge() {
        let mut state = started(9);
        for _ in 0..100 {
            spawn_obstacle(&mut state);
        }
        let player_box = state.player.aabb();
        for obs in &state.obstacles {
            assert_eq!(obs.x, SPAWN_X);
            assert!(obs.lane < LANE_COUNT);
            assert!(!player_box.overlaps(&obs.aabb()));
            match obs.kind {
                ObstacleKind::Question => {
                    assert!(obs.question.is_some());
                    assert!(obs.answer_index.is_none());
                }
                ObstacleKind::AnswerOption => {
                    let q = obs.question.as_ref().unwrap();
                    assert!(obs.answer_index.unwrap() < q.options.len());
                }
                _ => assert!(obs.question.is_none()),
            }
        }
    }

    #[test]
    fn test_obstacles_scroll_and_cull() {
        let mut state = started(10);
        state.obstacles.clear();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Barrier,
            x: DESPAWN_X + 1.0,
            lane: 0,
            question: None,
            answer_index: None,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.iter().all(|o| o.x > DESPAWN_X));
    }

    #[test]
    fn test_determinism_across_sessions() {
        let script = [
            TickInput { jump: true, ..Default::default() },
            TickInput::default(),
            TickInput { lane_left: true, ..Default::default() },
            TickInput::default(),
            TickInput { lane_right: true, ..Default::default() },
        ];
        let mut a = started(99);
        let mut b = started(99);
        for _ in 0..100 {
            for input in &script {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player, b.player);
        assert_eq!(a.obstacles, b.obstacles);
    }

    proptest! {
        #[test]
        fn prop_lane_always_in_bounds(
            seed in 0u64..1000,
            moves in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..300),
        ) {
            let mut state = started(seed);
            for (jump, left, right) in moves {
                let input = TickInput { jump, lane_left: left, lane_right: right };
                tick(&mut state, &input);
                prop_assert!(state.player.lane < LANE_COUNT);
                prop_assert!(state.player.y <= RUN_GROUND_Y);
            }
        }

        #[test]
        fn prop_score_is_monotonic(seed in 0u64..200, answers in prop::collection::vec(0usize..3, 0..20)) {
            let mut state = started(seed);
            state.obstacles.clear();
            let mut last = state.score;
            for answer in answers {
                let lane = state.player.lane;
                plant_question(&mut state, lane);
                for _ in 0..200 {
                    tick(&mut state, &TickInput::default());
                    if state.phase != RunPhase::Running {
                        break;
                    }
                }
                if state.phase == RunPhase::AwaitingAnswer {
                    submit_answer(&mut state, answer);
                }
                prop_assert!(state.score >= last);
                last = state.score;
                if state.phase == RunPhase::Over {
                    break;
                }
                state.obstacles.clear();
            }
        }
    }
}
