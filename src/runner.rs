//! Fixed timestep driver
//!
//! Hosts call [`Runner::frame`] once per animation frame with the elapsed
//! wall time. The runner turns that into whole simulation ticks, reading one
//! input snapshot per tick, then hands the finished state to the renderer.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::InputSource;
use crate::renderer::{Frame, Renderer, ScoreDisplay};
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Longest frame we try to catch up on (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

pub struct Runner {
    pub state: GameState,
    accumulator: f32,
    last_phase: GamePhase,
    /// Events from every tick of the last frame
    events: Vec<GameEvent>,
}

impl Runner {
    pub fn new(state: GameState) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            accumulator: 0.0,
            last_phase,
            events: Vec::new(),
        }
    }

    /// Run the ticks that fit into `dt` seconds; returns how many ran
    pub fn update(&mut self, dt: f32, input: &mut dyn InputSource) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;
        self.events.clear();

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // One-shot inputs are consumed by the first snapshot
            let tick_input = input.snapshot();
            tick(&mut self.state, &tick_input);
            self.events.append(&mut self.state.drain_events());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.state.phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }

        substeps
    }

    /// Hand the current state to the collaborators
    pub fn render(&self, renderer: &mut dyn Renderer, display: &mut dyn ScoreDisplay) {
        renderer.draw(&Frame::from_state(&self.state));
        display.show_score(
            self.state.score,
            self.state.high_score(),
            self.state.phase,
        );
    }

    /// Update, then render
    pub fn frame(
        &mut self,
        dt: f32,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
        display: &mut dyn ScoreDisplay,
    ) -> u32 {
        let ticks = self.update(dt, input);
        self.render(renderer, display);
        ticks
    }

    /// Events produced during the last `update`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::KeyboardState;
    use crate::renderer::Headless;

    fn runner() -> Runner {
        Runner::new(GameState::new(GameConfig::default(), 77).unwrap())
    }

    #[test]
    fn test_whole_ticks_only() {
        let mut runner = runner();
        let mut input = KeyboardState::new();
        input.click();

        assert_eq!(runner.update(SIM_DT * 0.5, &mut input), 0);
        // Half a tick left over plus one more half
        assert_eq!(runner.update(SIM_DT * 0.5, &mut input), 1);
        assert_eq!(runner.update(SIM_DT * 3.5, &mut input), 3);
        assert_eq!(runner.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut runner = runner();
        let mut input = KeyboardState::new();
        let ticks = runner.update(10.0, &mut input);
        assert!(ticks <= MAX_SUBSTEPS);
        assert!(ticks >= 5);
    }

    #[test]
    fn test_start_consumed_once_per_frame() {
        let mut runner = runner();
        let mut input = KeyboardState::new();
        input.click();

        runner.update(SIM_DT * 4.5, &mut input);
        let starts = runner
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionStarted { .. }))
            .count();
        assert_eq!(starts, 1);
        // The start tick resets, the remaining three simulate
        assert_eq!(runner.state.time_ticks, 3);
    }

    #[test]
    fn test_frame_renders_after_update() {
        let mut runner = runner();
        let mut input = KeyboardState::new();
        input.set_autopilot(true);
        let mut headless = Headless::default();
        let mut display = Headless::default();

        for _ in 0..120 {
            runner.frame(SIM_DT, &mut input, &mut headless, &mut display);
        }
        assert_eq!(headless.frames, 120);
        assert_eq!(display.score, runner.state.score);
        assert_eq!(display.phase, Some(runner.state.phase));
    }
}
