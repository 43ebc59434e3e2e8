//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; there is no global
//! state. Entity ids come from a per-state counter so iteration order is
//! stable between runs with the same seed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entities::{Body, EntityStore};
use crate::config::{ConfigError, GameConfig};
use crate::highscores::HighScores;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start input
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for the restart input
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Player dropped below the bottom of the view
    Fell,
    /// Player touched an obstacle without invincibility
    HitObstacle,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// `x` is horizontal velocity, `y` vertical (positive is falling)
    pub vel: Vec2,
    /// Ticks of invincibility left
    pub invincible_ticks: u32,
    /// Ticks left on an unused super-jump charge
    pub super_jump_ticks: u32,
}

impl Player {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            vel: Vec2::ZERO,
            invincible_ticks: 0,
            super_jump_ticks: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn has_super_jump(&self) -> bool {
        self.super_jump_ticks > 0
    }

    /// Count status effects down by one tick
    pub fn decay_effects(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        self.super_jump_ticks = self.super_jump_ticks.saturating_sub(1);
    }
}

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Removed after the first landing
    Disappearing,
}

/// A platform the player can bounce on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// A moving hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity, flips at the view edges
    pub dx: f32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Next bounce launches at the super launch velocity
    SuperJump,
    /// Obstacles are harmless for a while
    Invincibility,
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
}

macro_rules! impl_body {
    ($($ty:ty),*) => {
        $(
            impl Body for $ty {
                fn id(&self) -> u32 {
                    self.id
                }

                fn bounds(&self) -> Aabb {
                    Aabb::from_pos_size(self.pos, self.size)
                }

                fn y(&self) -> f32 {
                    self.pos.y
                }

                fn shift_y(&mut self, delta: f32) {
                    self.pos.y += delta;
                }
            }
        )*
    };
}

impl_body!(Platform, Obstacle, PowerUp);

/// Things that happened during a tick, for collaborators and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { seed: u64 },
    Landed { platform_id: u32, kind: PlatformKind, super_jump: bool },
    PlatformVanished { platform_id: u32 },
    PowerUpCollected { kind: PowerUpKind },
    Scrolled { offset: f32 },
    GameOver { reason: GameOverReason, score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub entities: EntityStore,
    /// Distance climbed in the current run
    pub score: u64,
    /// Rows generated since the run started (for the safe zone)
    pub rows_generated: u32,
    pub last_game_over: Option<GameOverReason>,
    /// In-memory leaderboard across runs
    pub high_scores: HighScores,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session in the `NotStarted` phase with the starting layout
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let player = Player::new(Vec2::new(config.player_width, config.player_height));
        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::NotStarted,
            player,
            entities: EntityStore::default(),
            score: 0,
            rows_generated: 0,
            last_game_over: None,
            high_scores: HighScores::new(),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_run();
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Best score recorded so far
    pub fn high_score(&self) -> u64 {
        self.high_scores.top_score().unwrap_or(0)
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
