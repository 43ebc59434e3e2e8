//! Procedural level generation
//!
//! The `generate_*` functions are pure given an RNG and the config. The
//! `GameState` helpers below them place generated rows above the current
//! frontier until the platform window is full.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, Platform, PlatformKind, PowerUp, PowerUpKind};
use crate::config::GameConfig;

/// Uniform x so that an entity `width` wide fits inside the view
fn random_x<R: Rng>(rng: &mut R, config: &GameConfig, width: f32) -> f32 {
    rng.random_range(0.0..config.view_width - width)
}

/// A platform at height `y`, disappearing with `disappearing_chance`
pub fn generate_platform<R: Rng>(rng: &mut R, config: &GameConfig, id: u32, y: f32) -> Platform {
    let x = random_x(rng, config, config.platform_width);
    let kind = if rng.random_bool(config.disappearing_chance) {
        PlatformKind::Disappearing
    } else {
        PlatformKind::Normal
    };
    Platform {
        id,
        kind,
        pos: Vec2::new(x, y),
        size: Vec2::new(config.platform_width, config.platform_height),
    }
}

/// An obstacle at height `y` moving left or right at `obstacle_speed`
pub fn generate_obstacle<R: Rng>(rng: &mut R, config: &GameConfig, id: u32, y: f32) -> Obstacle {
    let x = random_x(rng, config, config.obstacle_width);
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    Obstacle {
        id,
        pos: Vec2::new(x, y),
        size: Vec2::new(config.obstacle_width, config.obstacle_height),
        dx: direction * config.obstacle_speed,
    }
}

/// A power-up at height `y`, either kind with equal chance
pub fn generate_power_up<R: Rng>(rng: &mut R, config: &GameConfig, id: u32, y: f32) -> PowerUp {
    let x = random_x(rng, config, config.power_up_size);
    let kind = if rng.random_bool(0.5) {
        PowerUpKind::Invincibility
    } else {
        PowerUpKind::SuperJump
    };
    PowerUp {
        id,
        kind,
        pos: Vec2::new(x, y),
        size: Vec2::splat(config.power_up_size),
    }
}

/// Vertical gap to the next row, always within the reachable range
pub fn next_spacing<R: Rng>(rng: &mut R, config: &GameConfig) -> f32 {
    if config.platform_spacing_max > config.platform_spacing_min {
        rng.random_range(config.platform_spacing_min..=config.platform_spacing_max)
    } else {
        config.platform_spacing_min
    }
}

impl GameState {
    /// Put the starting platform under the player, then fill the window
    pub(crate) fn spawn_start_layout(&mut self) {
        let config = &self.config;
        let size = Vec2::new(config.platform_width, config.platform_height);
        let pos = Vec2::new(
            (config.view_width - config.platform_width) / 2.0,
            config.view_height - config.start_platform_offset,
        );
        let id = self.next_entity_id();
        self.entities.platforms.add(Platform {
            id,
            kind: PlatformKind::Normal,
            pos,
            size,
        });

        // Player stands centred on the platform
        self.player.pos = Vec2::new(
            pos.x + size.x / 2.0 - self.player.size.x / 2.0,
            pos.y - self.player.size.y,
        );

        self.refill_window();
    }

    /// Generate rows above the frontier until the platform target is met
    ///
    /// Each iteration adds exactly one platform, so the loop runs at most
    /// `target_platforms` times.
    pub(crate) fn refill_window(&mut self) {
        while self.entities.platforms.len() < self.config.target_platforms {
            self.generate_row();
        }
    }

    /// One platform plus an optional obstacle and power-up above it
    fn generate_row(&mut self) {
        let y = match self.entities.frontier_y() {
            Some(frontier) => frontier - next_spacing(&mut self.rng, &self.config),
            None => 0.0,
        };

        let id = self.next_entity_id();
        let platform = generate_platform(&mut self.rng, &self.config, id, y);
        self.entities.platforms.add(platform);
        self.rows_generated += 1;

        let row = self.rows_generated;
        let hazard_y = y - self.config.hazard_lift;

        if row > self.config.obstacle_safe_rows && self.rng.random_bool(self.config.obstacle_chance)
        {
            let id = self.next_entity_id();
            let obstacle = generate_obstacle(&mut self.rng, &self.config, id, hazard_y);
            self.entities.obstacles.add(obstacle);
        }

        if row > self.config.power_up_safe_rows
            && self.rng.random_bool(self.config.power_up_chance)
        {
            let id = self.next_entity_id();
            let power_up = generate_power_up(&mut self.rng, &self.config, id, hazard_y);
            self.entities.power_ups.add(power_up);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Body;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_platform_in_bounds() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for i in 0..500 {
            let p = generate_platform(&mut rng, &config, i, -50.0);
            assert!(p.pos.x >= 0.0);
            assert!(p.pos.x < config.view_width - config.platform_width);
            assert_eq!(p.pos.y, -50.0);
            assert_eq!(p.size, Vec2::new(60.0, 10.0));
        }
    }

    #[test]
    fn test_platform_kind_probability() {
        let config = GameConfig {
            disappearing_chance: 0.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!((0..200).all(|i| generate_platform(&mut rng, &config, i, 0.0).kind
            == PlatformKind::Normal));

        let config = GameConfig {
            disappearing_chance: 1.0,
            ..Default::default()
        };
        assert!((0..200).all(|i| generate_platform(&mut rng, &config, i, 0.0).kind
            == PlatformKind::Disappearing));

        // Default 0.3 should land somewhere near 30%
        let config = GameConfig::default();
        let disappearing = (0..2000)
            .filter(|&i| generate_platform(&mut rng, &config, i, 0.0).kind == PlatformKind::Disappearing)
            .count();
        assert!((400..800).contains(&disappearing), "got {}", disappearing);
    }

    #[test]
    fn test_obstacle_speed_and_direction() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut saw_left = false;
        let mut saw_right = false;
        for i in 0..100 {
            let o = generate_obstacle(&mut rng, &config, i, 0.0);
            assert_eq!(o.dx.abs(), config.obstacle_speed);
            assert!(o.pos.x < config.view_width - config.obstacle_width);
            saw_left |= o.dx < 0.0;
            saw_right |= o.dx > 0.0;
        }
        assert!(saw_left && saw_right);
    }

    #[test]
    fn test_power_up_kinds() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let kinds: Vec<PowerUpKind> = (0..100)
            .map(|i| generate_power_up(&mut rng, &config, i, 0.0).kind)
            .collect();
        assert!(kinds.contains(&PowerUpKind::SuperJump));
        assert!(kinds.contains(&PowerUpKind::Invincibility));
    }

    #[test]
    fn test_spacing_within_range() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..500 {
            let s = next_spacing(&mut rng, &config);
            assert!(s >= config.platform_spacing_min && s <= config.platform_spacing_max);
            assert!(s < config.max_rise());
        }

        let fixed = GameConfig {
            platform_spacing_min: 100.0,
            platform_spacing_max: 100.0,
            ..Default::default()
        };
        assert_eq!(next_spacing(&mut rng, &fixed), 100.0);
    }

    #[test]
    fn test_start_layout() {
        let state = GameState::new(GameConfig::default(), 42).unwrap();
        let config = &state.config;

        assert_eq!(state.entities.platforms.len(), config.target_platforms);
        let start = &state.entities.platforms.as_slice()[0];
        assert_eq!(start.kind, PlatformKind::Normal);
        assert_eq!(start.pos.y, 550.0);
        // Player stands on the start platform
        assert_eq!(state.player.bottom(), start.pos.y);
        assert!(state.player.bounds().overlaps_x(&start.bounds()));

        // Rows go strictly upward with reachable gaps
        let ys: Vec<f32> = state.entities.platforms.iter().map(|p| p.pos.y).collect();
        for pair in ys.windows(2) {
            let gap = pair[0] - pair[1];
            assert!(gap >= config.platform_spacing_min - 0.001);
            assert!(gap <= config.platform_spacing_max + 0.001);
        }
    }

    #[test]
    fn test_safe_rows_have_no_hazards() {
        let config = GameConfig {
            obstacle_chance: 1.0,
            power_up_chance: 1.0,
            ..Default::default()
        };
        let state = GameState::new(config, 9).unwrap();
        // 9 generated rows; the first 3 have no obstacle, the first 4 no power-up
        assert_eq!(state.rows_generated, 9);
        assert_eq!(state.entities.obstacles.len(), 6);
        assert_eq!(state.entities.power_ups.len(), 5);

        // Hazards sit above the lowest few rows
        let safe_line = state.entities.platforms.as_slice()[3].pos.y;
        assert!(state.entities.obstacles.iter().all(|o| o.pos.y < safe_line));
    }

    #[test]
    fn test_refill_from_empty_store_starts_at_top() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        state.entities.clear();
        state.refill_window();
        assert_eq!(state.entities.platforms.len(), 10);
        assert_eq!(state.entities.platforms.as_slice()[0].pos.y, 0.0);
    }
}
