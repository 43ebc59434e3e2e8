//! Demo steering
//!
//! Picks the highest platform the player can still land on during the
//! current bounce and walks toward it. Used for the attract mode and the
//! headless native runner.

use std::cmp::Ordering;

use super::entities::Body;
use super::state::{GameState, Platform};
use super::tick::Horizontal;

/// Platform the autopilot is aiming for, if any
pub fn target_platform(state: &GameState) -> Option<&Platform> {
    let player = &state.player;
    let vy = player.vel.y;
    let feet = player.bottom();
    // Highest point the feet reach on this bounce
    let apex = if vy < 0.0 {
        feet - vy * vy / (2.0 * state.config.gravity)
    } else {
        feet
    };

    // The highest platform we can still come down on
    state
        .entities
        .platforms
        .iter()
        .filter(|p| p.y() >= apex)
        .min_by(|a, b| a.y().partial_cmp(&b.y()).unwrap_or(Ordering::Equal))
}

/// Horizontal intent that moves the player under its target platform
pub fn steer(state: &GameState) -> Horizontal {
    let Some(target) = target_platform(state) else {
        return Horizontal::None;
    };

    let target_x = target.bounds().center().x;
    let diff = target_x - state.player.center_x();
    if diff.abs() <= state.config.player_speed {
        Horizontal::None
    } else if diff > 0.0 {
        Horizontal::Right
    } else {
        Horizontal::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::PlatformKind;
    use glam::Vec2;

    fn state_with_platforms(platforms: &[(f32, f32)]) -> GameState {
        let mut state = GameState::new(GameConfig::default(), 3).unwrap();
        state.entities.clear();
        for &(x, y) in platforms {
            let id = state.next_entity_id();
            state.entities.platforms.add(Platform {
                id,
                kind: PlatformKind::Normal,
                pos: Vec2::new(x, y),
                size: Vec2::new(60.0, 10.0),
            });
        }
        state.player.pos = Vec2::new(185.0, 300.0);
        state
    }

    #[test]
    fn test_falling_targets_platform_below() {
        let mut state = state_with_platforms(&[(300.0, 500.0), (0.0, 400.0), (50.0, 200.0)]);
        state.player.vel.y = 2.0;
        let target = target_platform(&state).map(|p| p.pos.y);
        assert_eq!(target, Some(400.0));
        assert_eq!(steer(&state), Horizontal::Left);
    }

    #[test]
    fn test_rising_targets_platform_above() {
        // Feet at 330 rising at 8 px/tick reach 266
        let mut state = state_with_platforms(&[(300.0, 500.0), (320.0, 280.0), (0.0, 100.0)]);
        state.player.vel.y = -8.0;
        let target = target_platform(&state).map(|p| p.pos.y);
        assert_eq!(target, Some(280.0));
        assert_eq!(steer(&state), Horizontal::Right);
    }

    #[test]
    fn test_rising_ignores_unreachable_platform() {
        let mut state = state_with_platforms(&[(300.0, 500.0), (0.0, 200.0)]);
        state.player.vel.y = -8.0;
        let target = target_platform(&state).map(|p| p.pos.y);
        assert_eq!(target, Some(500.0));
    }

    #[test]
    fn test_centered_player_holds_still() {
        let mut state = state_with_platforms(&[(170.0, 450.0)]);
        state.player.vel.y = 1.0;
        assert_eq!(steer(&state), Horizontal::None);
    }

    #[test]
    fn test_no_platforms() {
        let state = state_with_platforms(&[]);
        assert_eq!(steer(&state), Horizontal::None);
    }
}
