// trigger.rs - Maps the eight calendar triggers to patterns and implements
// their click semantics

use std::time::{Duration, Instant};

use tracing::debug;

use crate::engine::Engine;
use crate::pattern::Pattern;
use crate::scheduler::SharedEngine;

pub const TRIGGER_COUNT: usize = 8;

/// Pattern started by each trigger. Game of Life sits on both ends.
pub const TRIGGER_PATTERNS: [Pattern; TRIGGER_COUNT] = [
    Pattern::GameOfLife,
    Pattern::Noise,
    Pattern::Wave,
    Pattern::Spiral,
    Pattern::Rule30,
    Pattern::Rain,
    Pattern::Ripple,
    Pattern::GameOfLife,
];

/// Presses of the same trigger closer together than this are dropped.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(120);

pub fn pattern_for(index: usize) -> Option<Pattern> {
    TRIGGER_PATTERNS.get(index).copied()
}

/// The engine operations a trigger press needs.
pub trait Animator {
    fn is_running(&self) -> bool;
    fn active_letter(&self) -> Option<usize>;
    fn start(&mut self, pattern: Pattern, letter: usize);
    fn change_pattern(&mut self, pattern: Pattern);
    fn set_active_letter(&mut self, letter: usize);
    fn stop(&mut self);
}

impl Animator for Engine {
    fn is_running(&self) -> bool {
        Self::is_running(self)
    }

    fn active_letter(&self) -> Option<usize> {
        Self::active_letter(self)
    }

    fn start(&mut self, pattern: Pattern, letter: usize) {
        Self::start(self, pattern, letter);
    }

    fn change_pattern(&mut self, pattern: Pattern) {
        Self::change_pattern(self, pattern);
    }

    fn set_active_letter(&mut self, letter: usize) {
        Self::set_active_letter(self, letter);
    }

    fn stop(&mut self) {
        Self::stop(self);
    }
}

impl Animator for SharedEngine {
    fn is_running(&self) -> bool {
        Self::is_running(self)
    }

    fn active_letter(&self) -> Option<usize> {
        Self::active_letter(self)
    }

    fn start(&mut self, pattern: Pattern, letter: usize) {
        Self::start(self, pattern, letter);
    }

    fn change_pattern(&mut self, pattern: Pattern) {
        Self::change_pattern(self, pattern);
    }

    fn set_active_letter(&mut self, letter: usize) {
        Self::set_active_letter(self, letter);
    }

    fn stop(&mut self) {
        Self::stop(self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Started(Pattern),
    Changed(Pattern),
    Stopped,
    /// Too soon after the previous press of the same trigger.
    Debounced,
    /// No such trigger.
    Ignored,
}

/// Click handling for the trigger row.
#[derive(Debug, Clone)]
pub struct TriggerPad {
    cooldown: Duration,
    last_press: Option<(usize, Instant)>,
}

impl Default for TriggerPad {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl TriggerPad {
    pub const fn new(cooldown: Duration) -> Self {
        Self { cooldown, last_press: None }
    }

    /// Handle a press of trigger `index`.
    ///
    /// - idle: start the trigger's pattern, seeding the grid for it
    /// - running, same trigger: stop
    /// - running, other trigger: switch pattern without stopping
    pub fn press<A: Animator + ?Sized>(&mut self, index: usize, now: Instant, animator: &mut A) -> TriggerAction {
        let Some(pattern) = pattern_for(index) else {
            return TriggerAction::Ignored;
        };

        if let Some((last_index, at)) = self.last_press {
            if last_index == index && now.saturating_duration_since(at) < self.cooldown {
                debug!(index, "Trigger press debounced");
                return TriggerAction::Debounced;
            }
        }
        self.last_press = Some((index, now));

        if !animator.is_running() {
            animator.start(pattern, index);
            animator.change_pattern(pattern);
            return TriggerAction::Started(pattern);
        }

        if animator.active_letter() == Some(index) {
            animator.stop();
            return TriggerAction::Stopped;
        }

        animator.change_pattern(pattern);
        animator.set_active_letter(index);
        TriggerAction::Changed(pattern)
    }
}
