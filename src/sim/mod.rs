//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids from a counter)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod generate;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Aabb, landed_on};
pub use entities::{Body, EntityStore, Layer};
pub use generate::{generate_obstacle, generate_platform, generate_power_up};
pub use state::{
    GameEvent, GameOverReason, GamePhase, GameState, Obstacle, Platform, PlatformKind, Player,
    PowerUp, PowerUpKind,
};
pub use tick::{Horizontal, TickInput, prune_offscreen, scroll_camera, tick};
