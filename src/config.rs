//! Game configuration
//!
//! View dimensions, physics constants and generation tuning. Loaded from JSON
//! (missing fields fall back to defaults) and validated before a session is
//! created so that generation can never stall on an impossible layout.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("view dimensions must be positive, got {width}x{height}")]
    InvalidView { width: f32, height: f32 },

    #[error("{entity} size must be positive, got {width}x{height}")]
    InvalidSize {
        entity: &'static str,
        width: f32,
        height: f32,
    },

    #[error("{entity} width {width} does not fit in a view {view_width} wide")]
    EntityTooWide {
        entity: &'static str,
        width: f32,
        view_width: f32,
    },

    #[error("gravity must be positive, got {0}")]
    InvalidGravity(f32),

    #[error("{name} must be negative (upward), got {value}")]
    InvalidLaunch { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    NegativeSpeed { name: &'static str, value: f32 },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("target platform count must be at least 1")]
    EmptyWindow,

    #[error("target platform count {count} exceeds the limit of {max}")]
    WindowTooLarge { count: usize, max: usize },

    #[error("start platform offset {offset} must be within {min}..={max}")]
    InvalidStartOffset { offset: f32, min: f32, max: f32 },

    #[error("platform spacing range {min}..={max} is invalid")]
    InvalidSpacing { min: f32, max: f32 },

    #[error("a bounce rises {rise} pixels, which does not clear platform spacing {spacing}")]
    UnreachableSpacing { rise: f32, spacing: f32 },

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === View ===
    pub view_width: f32,
    pub view_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed for keyboard movement (pixels/tick)
    pub player_speed: f32,

    // === Physics ===
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity after a normal bounce
    pub launch_velocity: f32,
    /// Vertical velocity after a bounce with a super-jump charge
    pub super_launch_velocity: f32,

    // === Entities ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_speed: f32,
    pub power_up_size: f32,

    // === Generation ===
    /// Platforms kept alive in the window (refill target)
    pub target_platforms: usize,
    pub platform_spacing_min: f32,
    pub platform_spacing_max: f32,
    pub disappearing_chance: f64,
    pub obstacle_chance: f64,
    pub power_up_chance: f64,
    /// Obstacles and power-ups sit this far above their row's platform
    pub hazard_lift: f32,
    /// Rows generated before obstacles may appear
    pub obstacle_safe_rows: u32,
    /// Rows generated before power-ups may appear
    pub power_up_safe_rows: u32,
    /// Distance of the starting platform from the bottom of the view
    pub start_platform_offset: f32,

    // === Effects (ticks) ===
    pub invincibility_ticks: u32,
    pub super_jump_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,

            gravity: GRAVITY,
            launch_velocity: LAUNCH_VELOCITY,
            super_launch_velocity: SUPER_LAUNCH_VELOCITY,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            power_up_size: POWER_UP_SIZE,

            target_platforms: 10,
            platform_spacing_min: 85.0,
            platform_spacing_max: 110.0,
            disappearing_chance: 0.3,
            obstacle_chance: 0.3,
            power_up_chance: 0.2,
            hazard_lift: 30.0,
            obstacle_safe_rows: 3,
            power_up_safe_rows: 4,
            start_platform_offset: 50.0,

            invincibility_ticks: INVINCIBILITY_TICKS,
            super_jump_ticks: SUPER_JUMP_TICKS,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Scroll threshold: the camera follows once the player rises above this
    pub fn midpoint(&self) -> f32 {
        self.view_height / 2.0
    }

    /// Peak height of a single normal bounce, `v² / 2g`
    pub fn max_rise(&self) -> f32 {
        self.launch_velocity * self.launch_velocity / (2.0 * self.gravity)
    }

    /// Reject configurations that would break generation or reachability
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.view_width > 0.0 && self.view_height > 0.0) {
            return Err(ConfigError::InvalidView {
                width: self.view_width,
                height: self.view_height,
            });
        }

        let sizes = [
            ("player", self.player_width, self.player_height),
            ("platform", self.platform_width, self.platform_height),
            ("obstacle", self.obstacle_width, self.obstacle_height),
            ("power-up", self.power_up_size, self.power_up_size),
        ];
        for (entity, width, height) in sizes {
            if !(width > 0.0 && height > 0.0) {
                return Err(ConfigError::InvalidSize {
                    entity,
                    width,
                    height,
                });
            }
            // Generation draws x from [0, view_width - width)
            if width >= self.view_width {
                return Err(ConfigError::EntityTooWide {
                    entity,
                    width,
                    view_width: self.view_width,
                });
            }
        }

        if !(self.gravity > 0.0) {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        for (name, value) in [
            ("launch_velocity", self.launch_velocity),
            ("super_launch_velocity", self.super_launch_velocity),
        ] {
            if !(value < 0.0) {
                return Err(ConfigError::InvalidLaunch { name, value });
            }
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("obstacle_speed", self.obstacle_speed),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeSpeed { name, value });
            }
        }

        for (name, value) in [
            ("disappearing_chance", self.disappearing_chance),
            ("obstacle_chance", self.obstacle_chance),
            ("power_up_chance", self.power_up_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        if self.target_platforms == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if self.target_platforms > MAX_TARGET_PLATFORMS {
            return Err(ConfigError::WindowTooLarge {
                count: self.target_platforms,
                max: MAX_TARGET_PLATFORMS,
            });
        }

        // The player spawns standing on the start platform, fully in view
        let (min, max) = (self.player_height, self.view_height - self.player_height);
        let offset = self.start_platform_offset;
        if !(offset >= min && offset <= max) {
            return Err(ConfigError::InvalidStartOffset { offset, min, max });
        }

        let (min, max) = (self.platform_spacing_min, self.platform_spacing_max);
        if !(min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidSpacing { min, max });
        }

        let rise = self.max_rise();
        if !(rise > max) {
            return Err(ConfigError::UnreachableSpacing { rise, spacing: max });
        }

        Ok(())
    }
}
