// engine.rs - The animation engine: live grid, run state and baseline snapshot

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::events::{EngineEvent, EngineListener, Listeners, StopReason};
use crate::grid::{Grid, Seed};
use crate::pattern::{Pattern, PatternState};
use crate::step;

/// Everything the engine tracks besides the live grid.
///
/// Only the engine mutates this; callers get a shared reference through
/// [`Engine::state`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationState {
    pub is_running: bool,
    pub current_pattern: Pattern,
    /// Steps committed since the current pattern started.
    pub generation: u64,
    pub pattern_state: PatternState,
    /// Trigger driving the animation, if any.
    pub active_letter: Option<usize>,
    /// Grid captured when the animation started, restored by [`Engine::stop`].
    pub baseline: Option<Grid>,
}

/// What a call to [`Engine::step`] or [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing to do.
    Idle,
    /// Running, but the step interval has not elapsed yet.
    Pending,
    /// A step was committed.
    Advanced { generation: u64 },
    /// The engine stopped itself instead of committing the step.
    Stopped(StopReason),
}

/// Drives one pattern at a time over a fixed-size grid.
///
/// The engine never fails once built. Swapping the live grid for an
/// animation and back again goes through the baseline snapshot: [`start`]
/// captures it (once per run) and [`stop`] restores it.
///
/// [`start`]: Engine::start
/// [`stop`]: Engine::stop
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    grid: Grid,
    state: AnimationState,
    rng: StdRng,
    last_step: Option<Instant>,
    listeners: Listeners,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            rows = config.rows,
            cols = config.cols,
            step_interval_ms = config.step_interval_ms,
            max_generations = config.max_generations,
            "Engine created"
        );

        Ok(Self {
            grid: Grid::empty(config.rows, config.cols),
            config,
            state: AnimationState::default(),
            rng,
            last_step: None,
            listeners: Listeners::default(),
        })
    }

    /// Register a listener; it sees every event fired from now on.
    pub fn subscribe(&mut self, listener: impl EngineListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Deep copy of the live grid.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub const fn state(&self) -> &AnimationState {
        &self.state
    }

    pub const fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub const fn generation(&self) -> u64 {
        self.state.generation
    }

    pub const fn current_pattern(&self) -> Pattern {
        self.state.current_pattern
    }

    pub const fn active_letter(&self) -> Option<usize> {
        self.state.active_letter
    }

    pub const fn has_baseline(&self) -> bool {
        self.state.baseline.is_some()
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Start animating `pattern` on behalf of trigger `letter`.
    ///
    /// The baseline is captured only when the engine is idle and holds none,
    /// so switching patterns mid-run never overwrites the pre-animation grid.
    /// The live grid itself is left as it is.
    pub fn start(&mut self, pattern: Pattern, letter: usize) {
        if !self.state.is_running && self.state.baseline.is_none() {
            self.state.baseline = Some(self.grid.clone());
        }

        self.state.is_running = true;
        self.state.current_pattern = pattern;
        self.state.generation = 0;
        self.state.pattern_state = PatternState::Empty;
        self.state.active_letter = Some(letter);
        self.last_step = None;

        info!(%pattern, letter, "Animation started");
        self.listeners.emit(&EngineEvent::Started { pattern });
    }

    /// Switch to `pattern` and reseed the grid for it. Works whether or not
    /// the engine is running and never touches the baseline.
    pub fn change_pattern(&mut self, pattern: Pattern) {
        self.state.current_pattern = pattern;
        self.state.generation = 0;
        self.state.pattern_state = PatternState::Empty;
        self.grid = self.initial_grid_for(pattern);

        info!(%pattern, running = self.state.is_running, "Pattern changed");
        self.listeners.emit(&EngineEvent::PatternChanged { pattern });
    }

    /// Hand a running animation over to another trigger. Ignored while idle,
    /// since an idle engine has no driving trigger.
    pub fn set_active_letter(&mut self, letter: usize) {
        if self.state.is_running {
            self.state.active_letter = Some(letter);
        }
    }

    /// Stop and restore the baseline, if one was captured.
    ///
    /// Stopping an idle engine that holds no baseline does nothing.
    pub fn stop(&mut self) {
        let restored = match self.state.baseline.take() {
            Some(baseline) => {
                self.grid = baseline;
                true
            }
            None => false,
        };
        let was_running = self.state.is_running;

        self.state.is_running = false;
        self.state.active_letter = None;

        if was_running || restored {
            info!(restored, "Animation stopped");
            self.listeners.emit(&EngineEvent::Stopped { reason: StopReason::Requested });
        }
    }

    /// Halt and clear the live grid. The baseline is kept.
    pub fn reset(&mut self) {
        self.clear_run_state();
        self.grid = Grid::empty(self.config.rows, self.config.cols);
        debug!("Engine reset");
    }

    /// Halt and fill the live grid with random cells. The baseline is kept.
    pub fn randomize(&mut self) {
        self.clear_run_state();
        self.grid = self.random_grid();
        debug!(live = self.grid.live_count(), "Engine randomized");
    }

    /// Replace the live grid. Returns `false`, leaving the engine untouched,
    /// if `grid` does not have the engine's dimensions.
    pub fn load(&mut self, grid: Grid) -> bool {
        if grid.dimensions() != (self.config.rows, self.config.cols) {
            warn!(
                expected_rows = self.config.rows,
                expected_cols = self.config.cols,
                rows = grid.rows(),
                cols = grid.cols(),
                "Rejected grid with wrong dimensions"
            );
            return false;
        }
        self.grid = grid;
        true
    }

    /// Clear the live grid and stamp `seed` in its middle.
    pub fn seed(&mut self, seed: &Seed) {
        let (height, width) = seed.extent();
        let origin = (
            (self.config.rows / 2).saturating_sub(height / 2),
            (self.config.cols / 2).saturating_sub(width / 2),
        );
        let mut grid = Grid::empty(self.config.rows, self.config.cols);
        grid.stamp(seed, origin);
        self.grid = grid;
        debug!(seed = seed.name, "Grid seeded");
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Step once if running and the step interval has elapsed since the last
    /// committed step. Called by whatever drives the engine, as often as it likes.
    pub fn tick(&mut self, now: Instant) -> StepOutcome {
        if !self.state.is_running {
            return StepOutcome::Idle;
        }
        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) < self.config.step_interval() {
                return StepOutcome::Pending;
            }
        }
        self.last_step = Some(now);
        self.step()
    }

    /// Run one step of the current pattern, ignoring the interval.
    ///
    /// The stop conditions are checked against the proposed step, so an
    /// auto-stop leaves the last committed grid on display.
    pub fn step(&mut self) -> StepOutcome {
        if !self.state.is_running {
            return StepOutcome::Idle;
        }

        let max = self.config.max_generations;
        if max > 0 && self.state.generation >= max {
            return self.halt(StopReason::GenerationLimit);
        }

        let pattern = self.state.current_pattern;
        let next = step::step(pattern, &self.grid, &self.state.pattern_state, &mut self.rng);

        if pattern == Pattern::GameOfLife && !next.changed {
            return self.halt(StopReason::Stabilized);
        }

        self.grid = next.grid;
        self.state.generation += 1;
        if let Some(pattern_state) = next.state {
            self.state.pattern_state = pattern_state;
        }

        debug!(%pattern, generation = self.state.generation, "Step committed");
        StepOutcome::Advanced { generation: self.state.generation }
    }

    fn halt(&mut self, reason: StopReason) -> StepOutcome {
        self.state.is_running = false;
        info!(?reason, generation = self.state.generation, "Animation stopped itself");
        self.listeners.emit(&EngineEvent::Stopped { reason });
        StepOutcome::Stopped(reason)
    }

    fn clear_run_state(&mut self) {
        self.state.is_running = false;
        self.state.generation = 0;
        self.state.pattern_state = PatternState::Empty;
        self.state.active_letter = None;
        self.last_step = None;
    }

    fn random_grid(&mut self) -> Grid {
        Grid::random(self.config.rows, self.config.cols, self.config.live_probability, &mut self.rng)
    }

    fn initial_grid_for(&mut self, pattern: Pattern) -> Grid {
        match pattern {
            Pattern::GameOfLife | Pattern::Noise => self.random_grid(),
            Pattern::Rule30 => {
                let mut grid = Grid::empty(self.config.rows, self.config.cols);
                grid.set(self.config.rows / 2, self.config.cols / 2, 1);
                grid
            }
            _ => Grid::empty(self.config.rows, self.config.cols),
        }
    }
}
