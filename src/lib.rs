//! Sky Hop - An endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generation, session)
//! - `config`: Data-driven game balance and view configuration
//! - `renderer`: Renderer and score display collaborators
//! - `platform`: Input capture abstraction
//! - `runner`: Fixed timestep driver tying the pieces together

pub mod config;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Simulation rate. Effect durations are counted in these ticks.
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// View dimensions
    pub const VIEW_WIDTH: f32 = 400.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Horizontal speed from keyboard input (pixels/tick)
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity after a normal bounce (negative is up)
    pub const LAUNCH_VELOCITY: f32 = -13.0;
    /// Vertical velocity after a bounce with a super-jump charge
    pub const SUPER_LAUNCH_VELOCITY: f32 = -20.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 60.0;
    pub const PLATFORM_HEIGHT: f32 = 10.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_SPEED: f32 = 2.0;

    /// Power-ups are square
    pub const POWER_UP_SIZE: f32 = 20.0;

    /// Upper bound on the refill window
    pub const MAX_TARGET_PLATFORMS: usize = 100;

    /// 5 seconds at 60 Hz
    pub const INVINCIBILITY_TICKS: u32 = 300;
    pub const SUPER_JUMP_TICKS: u32 = 300;
}

/// Wrap a horizontal coordinate into `[0, width)`
///
/// For a sprite, pass the span its left edge may occupy (view width minus
/// sprite width) so it never hangs off the right side.
#[inline]
pub fn wrap_x(x: f32, width: f32) -> f32 {
    let wrapped = x.rem_euclid(width);
    // rem_euclid can round up to `width` for tiny negative inputs
    if wrapped >= width { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_x() {
        assert_eq!(wrap_x(10.0, 400.0), 10.0);
        assert_eq!(wrap_x(410.0, 400.0), 10.0);
        assert_eq!(wrap_x(-10.0, 400.0), 390.0);
        assert_eq!(wrap_x(400.0, 400.0), 0.0);
        assert!(wrap_x(-1e-9, 400.0) < 400.0);
    }
}
