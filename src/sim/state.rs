//! Obstacle-course game state
//!
//! Everything the course tick mutates lives here. The state machine is
//! Idle -> Running -> AwaitingAnswer -> Running (correct answer) or Over
//! (wrong answer / fatal collision) -> Running again on explicit restart.
//! `Over` is terminal: no tick mutates the session until restart.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::questions::{Question, builtin_bank};
use crate::consts::*;

/// Current phase of an obstacle-course session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Before the first start
    Idle,
    /// Active gameplay
    Running,
    /// Paused on a question prompt, waiting for an answer
    AwaitingAnswer,
    /// Run ended (fatal collision or wrong answer)
    Over,
}

/// The player body: fixed horizontal slot, free-fall-integrated vertically,
/// discrete lane for the horizontal track.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Feet height (render-space, rests at RUN_GROUND_Y)
    pub y: f32,
    pub velocity_y: f32,
    pub is_jumping: bool,
    /// Track index, always within 0..LANE_COUNT
    pub lane: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: RUN_GROUND_Y,
            velocity_y: 0.0,
            is_jumping: false,
            lane: 1, // center track
        }
    }
}

impl Player {
    /// Bounding box at the fixed horizontal slot
    pub fn aabb(&self) -> Aabb {
        Aabb::new(PLAYER_X, self.y - PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

/// Obstacle variants; height and payload depend on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Barrier,
    LowBarrier,
    HighBarrier,
    /// Pauses the run with a question prompt on contact
    Question,
    /// Displays one option of a question; fatal on contact like a barrier
    AnswerOption,
}

impl ObstacleKind {
    pub fn height(&self) -> f32 {
        match self {
            ObstacleKind::LowBarrier => LOW_BARRIER_HEIGHT,
            ObstacleKind::HighBarrier => HIGH_BARRIER_HEIGHT,
            _ => BARRIER_HEIGHT,
        }
    }

    /// Whether contact ends the run (everything except a question prompt)
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ObstacleKind::Question)
    }
}

/// A scrolling obstacle. Immutable once spawned apart from its horizontal
/// position, which the tick decreases by the scroll speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge; decreases each tick, removed past DESPAWN_X
    pub x: f32,
    pub lane: u8,
    /// Present for Question and AnswerOption kinds
    pub question: Option<Question>,
    /// For AnswerOption: which option this box displays
    pub answer_index: Option<usize>,
}

impl Obstacle {
    pub fn width(&self) -> f32 {
        OBSTACLE_WIDTH
    }

    pub fn height(&self) -> f32 {
        self.kind.height()
    }

    /// Top edge (obstacles stand on the ground line)
    pub fn top(&self) -> f32 {
        RUN_GROUND_Y - self.height()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.top(), self.width(), self.height())
    }
}

/// Event emitted at state-transition points for the progress boundary.
/// Cross-component reads (XP award, best scores) go through these, never
/// through shared references into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AnswerCorrect { reward: u32 },
    RunOver { score: u32 },
}

/// Complete obstacle-course session state
#[derive(Debug, Clone)]
pub struct RunState {
    pub seed: u64,
    pub phase: RunPhase,
    pub player: Player,
    /// Live obstacles, ordered by spawn (ascending id)
    pub obstacles: Vec<Obstacle>,
    /// Increases only on correct-answer events
    pub score: u32,
    /// Scroll speed, ramps up on a fixed tick cadence
    pub speed: f32,
    /// Tick counter, reset on restart
    pub ticks: u64,
    /// Obstacle id of the question currently awaiting an answer
    pub pending_question: Option<u32>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    pub(crate) bank: Vec<Question>,
    next_id: u32,
}

impl RunState {
    /// Create a fresh session in Idle with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: RunPhase::Idle,
            player: Player::default(),
            obstacles: Vec::new(),
            score: 0,
            speed: START_SPEED,
            ticks: 0,
            pending_question: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            bank: builtin_bank(),
            next_id: 1,
        }
    }

    /// Start (or restart) the run: player back to the center lane on the
    /// ground, obstacles cleared, score and speed reinitialized. The RNG
    /// stream continues so successive runs differ.
    pub fn start(&mut self) {
        self.phase = RunPhase::Running;
        self.player = Player::default();
        self.obstacles.clear();
        self.score = 0;
        self.speed = START_SPEED;
        self.ticks = 0;
        self.pending_question = None;
        log::info!("run started (seed {})", self.seed);
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The question obstacle currently awaiting an answer, if any
    pub fn pending_question(&self) -> Option<&Obstacle> {
        let id = self.pending_question?;
        self.obstacles.iter().find(|o| o.id == id)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = RunState::new(42);
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, START_SPEED);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_start_reinitializes_session() {
        let mut state = RunState::new(42);
        state.start();
        state.score = 30;
        state.speed = 4.0;
        state.ticks = 900;
        state.player.lane = 0;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Barrier,
            x: 500.0,
            lane: 2,
            question: None,
            answer_index: None,
        });

        state.start();
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, START_SPEED);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.player, Player::default());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_stands_on_ground() {
        let obs = Obstacle {
            id: 1,
            kind: ObstacleKind::HighBarrier,
            x: 400.0,
            lane: 0,
            question: None,
            answer_index: None,
        };
        let bb = obs.aabb();
        assert_eq!(bb.y + bb.h, RUN_GROUND_Y);
        assert_eq!(bb.h, HIGH_BARRIER_HEIGHT);
    }

    #[test]
    fn test_only_questions_are_nonfatal() {
        assert!(ObstacleKind::Barrier.is_fatal());
        assert!(ObstacleKind::LowBarrier.is_fatal());
        assert!(ObstacleKind::HighBarrier.is_fatal());
        assert!(ObstacleKind::AnswerOption.is_fatal());
        assert!(!ObstacleKind::Question.is_fatal());
    }
}
