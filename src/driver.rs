//! Frame-driven game loop
//!
//! The platform calls `Driver::frame` once per display refresh. The driver
//! gates the simulation rate, runs one tick when allowed, and on death
//! persists the best score and stops for good. It never schedules itself;
//! the caller decides whether to request another frame.

use crate::config::SimulationConfig;
use crate::error::SimResult;
use crate::highscores::{BestScore, ScoreStore};
use crate::renderer::{Snapshot, snapshot};
use crate::sim::{GameState, InputState, StepGate, tick};

/// Result of offering one frame to the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Too soon since the last step; nothing changed
    Waiting,
    /// One tick of `dt` seconds was simulated
    Stepped { dt: f32 },
    /// The run is over. Returned on the fatal frame and every frame after.
    Finished { score: u64, new_best: bool },
}

impl FrameOutcome {
    /// Whether state changed and a redraw is useful
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, FrameOutcome::Waiting)
    }
}

pub struct Driver<S: ScoreStore> {
    config: SimulationConfig,
    state: GameState,
    gate: StepGate,
    best: BestScore,
    store: S,
    finished: Option<FrameOutcome>,
}

impl<S: ScoreStore> Driver<S> {
    pub fn new(config: SimulationConfig, seed: u64, store: S) -> SimResult<Self> {
        let state = GameState::new(&config, seed)?;
        let gate = StepGate::new(config.min_tick_interval, config.max_step);
        let best = BestScore::load(&store);
        log::info!(
            "Starting {} run (seed {}, best {})",
            config.variant.as_str(),
            seed,
            best.score
        );
        Ok(Self {
            config,
            state,
            gate,
            best,
            store,
            finished: None,
        })
    }

    /// Offer a frame at wall-clock time `now` (seconds)
    pub fn frame(&mut self, now: f64, input: &InputState) -> FrameOutcome {
        if let Some(outcome) = self.finished {
            return outcome;
        }
        let Some(dt) = self.gate.accept(now) else {
            return FrameOutcome::Waiting;
        };

        tick(&mut self.state, input, &self.config, dt);

        if !self.state.is_over() {
            return FrameOutcome::Stepped { dt };
        }

        let score = self.state.score;
        let new_best = self.best.record(score, &mut self.store);
        let outcome = FrameOutcome::Finished { score, new_best };
        self.finished = Some(outcome);
        outcome
    }

    /// Drive the loop with synthetic timestamps until the run ends or
    /// `max_frames` frames have been offered. Returns the final score if the
    /// run ended.
    pub fn run_headless<F>(&mut self, frame_interval: f64, max_frames: usize, mut input: F) -> Option<u64>
    where
        F: FnMut(&GameState) -> InputState,
    {
        let mut now = 0.0;
        for _ in 0..max_frames {
            let flags = input(&self.state);
            if let FrameOutcome::Finished { score, .. } = self.frame(now, &flags) {
                return Some(score);
            }
            now += frame_interval;
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn best(&self) -> u64 {
        self.best.score
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        snapshot(&self.state, self.best.score)
    }
}
