//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. A `Playing`
//! tick runs, in order: player movement, platform landing, obstacle motion,
//! power-up pickup, obstacle damage, camera scroll, pruning, refill, the fall
//! check and finally the effect countdowns.

use super::autopilot;
use super::collision::{bounce_between_walls, landed_on};
use super::entities::Body;
use super::state::{GameEvent, GameOverReason, GamePhase, GameState, PlatformKind, PowerUpKind};
use crate::wrap_x;

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    #[default]
    None,
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keyboard direction
    pub horizontal: Horizontal,
    /// Absolute pointer x, overrides the keyboard direction
    pub pointer_x: Option<f32>,
    /// Start or restart (one-shot)
    pub start: bool,
    /// Demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let mut input = input.clone();
    if input.autopilot {
        if state.phase == GamePhase::Playing {
            input.horizontal = autopilot::steer(state);
            input.pointer_x = None;
        } else {
            input.start = true;
        }
    }

    // A start tick only resets; physics begins on the next one
    if input.start && state.start() {
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    let prev_bottom = state.player.bottom();
    move_player(state, &input);
    resolve_landing(state, prev_bottom);
    move_obstacles(state);

    // Pickups first, so invincibility collected this tick already protects
    collect_power_ups(state);
    if touching_obstacle(state) {
        state.end_run(GameOverReason::HitObstacle);
        return;
    }

    scroll_camera(state);
    prune_offscreen(state);
    state.refill_window();

    if state.player.pos.y > state.config.view_height {
        state.end_run(GameOverReason::Fell);
        return;
    }

    state.player.decay_effects();
}

/// Horizontal input, then vertical integration
fn move_player(state: &mut GameState, input: &TickInput) {
    let config = &state.config;
    let player = &mut state.player;

    if let Some(pointer_x) = input.pointer_x {
        // Pointer control clamps to the view
        player.vel.x = 0.0;
        let max_x = config.view_width - player.size.x;
        player.pos.x = (pointer_x - player.size.x / 2.0).clamp(0.0, max_x);
    } else {
        // Keyboard control wraps around the edges, keeping the whole sprite
        // in view so collisions and drawing agree
        player.vel.x = match input.horizontal {
            Horizontal::Left => -config.player_speed,
            Horizontal::Right => config.player_speed,
            Horizontal::None => 0.0,
        };
        let span = config.view_width - player.size.x;
        player.pos.x = wrap_x(player.pos.x + player.vel.x, span);
    }

    player.pos.y += player.vel.y;
    player.vel.y += config.gravity;
}

/// Bounce off the first platform the player fell onto this tick
fn resolve_landing(state: &mut GameState, prev_bottom: f32) {
    let player_box = state.player.bounds();
    let vy = state.player.vel.y;

    let landing = state
        .entities
        .platforms
        .iter()
        .find(|p| landed_on(prev_bottom, &player_box, vy, &p.bounds()))
        .map(|p| (p.id, p.kind));

    let Some((platform_id, kind)) = landing else {
        return;
    };

    let super_jump = state.player.has_super_jump();
    if super_jump {
        state.player.vel.y = state.config.super_launch_velocity;
        state.player.super_jump_ticks = 0;
    } else {
        state.player.vel.y = state.config.launch_velocity;
    }
    state.events.push(GameEvent::Landed {
        platform_id,
        kind,
        super_jump,
    });

    if kind == PlatformKind::Disappearing {
        state.entities.platforms.remove_ids(&[platform_id]);
        state.events.push(GameEvent::PlatformVanished { platform_id });
        log::debug!("Platform {} vanished", platform_id);
    }
}

/// Slide obstacles, reflecting them at the view edges
fn move_obstacles(state: &mut GameState) {
    let view_width = state.config.view_width;
    for obstacle in state.entities.obstacles.iter_mut() {
        let (x, dx) = bounce_between_walls(obstacle.pos.x, obstacle.dx, obstacle.size.x, view_width);
        obstacle.pos.x = x;
        obstacle.dx = dx;
    }
}

/// Remove every power-up the player touches, then apply the effects
fn collect_power_ups(state: &mut GameState) {
    let player_box = state.player.bounds();
    let collected = state
        .entities
        .power_ups
        .remove_where(|p| p.bounds().overlaps(&player_box));

    for power_up in collected {
        match power_up.kind {
            PowerUpKind::SuperJump => {
                state.player.super_jump_ticks = state.config.super_jump_ticks;
            }
            PowerUpKind::Invincibility => {
                state.player.invincible_ticks = state.config.invincibility_ticks;
            }
        }
        state.events.push(GameEvent::PowerUpCollected {
            kind: power_up.kind,
        });
        log::debug!("Collected {:?}", power_up.kind);
    }
}

/// True if an obstacle hits an unprotected player
fn touching_obstacle(state: &GameState) -> bool {
    if state.player.is_invincible() {
        return false;
    }
    let player_box = state.player.bounds();
    state
        .entities
        .obstacles
        .iter()
        .any(|o| o.bounds().overlaps(&player_box))
}

/// Follow a rising player past the midpoint
///
/// Pins the player to the midpoint, moves every entity down by the same
/// offset and adds the whole pixels to the score. Returns the offset.
pub fn scroll_camera(state: &mut GameState) -> Option<f32> {
    let midpoint = state.config.midpoint();
    let player = &mut state.player;
    if player.pos.y >= midpoint || player.vel.y >= 0.0 {
        return None;
    }

    let offset = midpoint - player.pos.y;
    player.pos.y = midpoint;
    state.entities.shift_all_vertically(offset);
    state.score += offset.floor() as u64;
    state.events.push(GameEvent::Scrolled { offset });
    Some(offset)
}

/// Drop everything that scrolled below the view
pub fn prune_offscreen(state: &mut GameState) -> usize {
    state.entities.prune_below(state.config.view_height)
}
