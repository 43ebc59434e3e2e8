//! Rendering collaborators
//!
//! The simulation never draws. After each update the host hands a [`Frame`]
//! snapshot to a [`Renderer`] and the score line to a [`ScoreDisplay`].
//! [`draw_list`] turns a frame into backend-neutral draw commands so every
//! backend shares the same colour mapping.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod palette;

use glam::Vec2;

use crate::sim::{EntityStore, GamePhase, GameState, PlatformKind, Player, PowerUpKind};
pub use palette::Color;

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub view: Vec2,
    pub player: &'a Player,
    pub entities: &'a EntityStore,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
}

impl<'a> Frame<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            view: Vec2::new(state.config.view_width, state.config.view_height),
            player: &state.player,
            entities: &state.entities,
            score: state.score,
            high_score: state.high_score(),
            phase: state.phase,
        }
    }
}

/// Draws a frame
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Shows the score line after each update
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u64, high_score: u64, phase: GamePhase);
}

/// A single backend-neutral draw command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect { pos: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { text: String, pos: Vec2, color: Color },
}

/// Translate a frame into draw commands, back to front
pub fn draw_list(frame: &Frame<'_>) -> Vec<DrawCmd> {
    let entities = frame.entities;
    let mut cmds = Vec::with_capacity(entities.len() + 4);

    for platform in &entities.platforms {
        let color = match platform.kind {
            PlatformKind::Normal => palette::PLATFORM,
            PlatformKind::Disappearing => palette::PLATFORM_DISAPPEARING,
        };
        cmds.push(DrawCmd::Rect {
            pos: platform.pos,
            size: platform.size,
            color,
        });
    }

    for obstacle in &entities.obstacles {
        cmds.push(DrawCmd::Rect {
            pos: obstacle.pos,
            size: obstacle.size,
            color: palette::OBSTACLE,
        });
    }

    for power_up in &entities.power_ups {
        let color = match power_up.kind {
            PowerUpKind::Invincibility => palette::INVINCIBILITY,
            PowerUpKind::SuperJump => palette::SUPER_JUMP,
        };
        cmds.push(DrawCmd::Circle {
            center: power_up.pos + power_up.size / 2.0,
            radius: power_up.size.x / 2.0,
            color,
        });
    }

    let player = frame.player;
    let color = if player.is_invincible() {
        palette::PLAYER_INVINCIBLE
    } else {
        palette::PLAYER
    };
    cmds.push(DrawCmd::Rect {
        pos: player.pos,
        size: player.size,
        color,
    });
    // Charge indicator under the feet
    if player.has_super_jump() {
        cmds.push(DrawCmd::Rect {
            pos: Vec2::new(player.pos.x, player.bottom()),
            size: Vec2::new(player.size.x, 5.0),
            color: palette::SUPER_JUMP,
        });
    }

    let banner = match frame.phase {
        GamePhase::NotStarted => Some("Click or press Space to start".to_string()),
        GamePhase::GameOver => Some(format!("Game over! Score: {} - press Space", frame.score)),
        GamePhase::Playing => None,
    };
    if let Some(text) = banner {
        cmds.push(DrawCmd::Text {
            text,
            pos: Vec2::new(20.0, frame.view.y / 2.0),
            color: palette::TEXT,
        });
    }

    cmds
}

/// Renderer for hosts without a screen
///
/// Keeps the most recent frame summary and logs phase changes.
#[derive(Debug, Default)]
pub struct Headless {
    pub frames: u64,
    pub last_draw_count: usize,
    pub score: u64,
    pub high_score: u64,
    pub phase: Option<GamePhase>,
}

impl Renderer for Headless {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        self.last_draw_count = draw_list(frame).len();
    }
}

impl ScoreDisplay for Headless {
    fn show_score(&mut self, score: u64, high_score: u64, phase: GamePhase) {
        if self.phase != Some(phase) {
            log::info!(
                "{:?}: score {} (high score {})",
                phase,
                score,
                high_score
            );
        }
        self.score = score;
        self.high_score = high_score;
        self.phase = Some(phase);
    }
}
