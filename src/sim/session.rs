//! Session lifecycle
//!
//! `NotStarted -> Playing -> GameOver -> Playing -> ...`. Starting and
//! restarting both rebuild the run from scratch; the high score table and
//! the RNG stream carry over.

use glam::Vec2;

use super::state::{GameEvent, GameOverReason, GamePhase, GameState};

impl GameState {
    /// Clear the run and lay out a fresh level (phase is left unchanged)
    pub(crate) fn reset_run(&mut self) {
        self.entities.clear();
        self.player.vel = Vec2::ZERO;
        self.player.invincible_ticks = 0;
        self.player.super_jump_ticks = 0;
        self.score = 0;
        self.time_ticks = 0;
        self.rows_generated = 0;
        self.spawn_start_layout();
    }

    /// Handle the start/restart input
    ///
    /// Returns true if a new run began. Ignored while already playing.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::NotStarted | GamePhase::GameOver => {
                self.reset_run();
                self.phase = GamePhase::Playing;
                self.last_game_over = None;
                self.events.push(GameEvent::SessionStarted { seed: self.seed });
                log::info!("Run started (seed {})", self.seed);
                true
            }
            GamePhase::Playing => false,
        }
    }

    /// End the current run and record the score
    pub fn end_run(&mut self, reason: GameOverReason) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.last_game_over = Some(reason);

        let previous_best = self.high_score();
        let rank = self
            .high_scores
            .add_score(self.score, self.time_ticks, self.seed);
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });

        match rank {
            Some(1) if self.score > previous_best => log::info!(
                "Game over ({:?}): score {} - new high score!",
                reason,
                self.score
            ),
            _ => log::info!(
                "Game over ({:?}): score {}, high score {}",
                reason,
                self.score,
                self.high_score()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, GameConfig};

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 1234).unwrap()
    }

    #[test]
    fn test_new_rejects_spawn_outside_view() {
        for offset in [5000.0, -500.0] {
            let config = GameConfig {
                start_platform_offset: offset,
                ..Default::default()
            };
            assert!(matches!(
                GameState::new(config, 1),
                Err(ConfigError::InvalidStartOffset { .. })
            ));
        }
    }

    #[test]
    fn test_first_ticks_score_nothing() {
        let mut state = new_state();
        state.start();
        for _ in 0..2 {
            crate::sim::tick(&mut state, &Default::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_start_from_not_started() {
        let mut state = new_state();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::SessionStarted { seed: 1234 }]
        ));
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut state = new_state();
        state.start();
        state.score = 77;
        assert!(!state.start());
        assert_eq!(state.score, 77);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let mut state = new_state();
        state.start();
        state.score = 500;
        state.end_run(GameOverReason::Fell);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.last_game_over, Some(GameOverReason::Fell));
        assert_eq!(state.high_score(), 500);

        // Lower score keeps the old best
        state.start();
        state.score = 200;
        state.end_run(GameOverReason::HitObstacle);
        assert_eq!(state.high_score(), 500);

        // Higher score replaces it
        state.start();
        state.score = 900;
        state.end_run(GameOverReason::Fell);
        assert_eq!(state.high_score(), 900);
    }

    #[test]
    fn test_end_run_only_once() {
        let mut state = new_state();
        state.start();
        state.score = 10;
        state.end_run(GameOverReason::Fell);
        state.end_run(GameOverReason::HitObstacle);
        assert_eq!(state.last_game_over, Some(GameOverReason::Fell));
        assert_eq!(state.high_scores.entries.len(), 1);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = new_state();
        state.start();
        state.score = 300;
        state.time_ticks = 999;
        state.player.invincible_ticks = 40;
        state.player.vel = Vec2::new(5.0, -3.0);
        state.entities.shift_all_vertically(1000.0);
        state.end_run(GameOverReason::Fell);

        assert!(state.start());
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert!(!state.player.is_invincible());
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.entities.platforms.len(), state.config.target_platforms);
        assert_eq!(state.entities.platforms.as_slice()[0].pos.y, 550.0);
        assert_eq!(state.high_score(), 300);
    }
}
