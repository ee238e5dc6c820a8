// events.rs - Notifications fired by the engine

use crate::pattern::Pattern;

/// Why an animation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `stop()` was called.
    Requested,
    /// Game of Life produced a step with no changes.
    Stabilized,
    /// The configured maximum generation count was reached.
    GenerationLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Started { pattern: Pattern },
    PatternChanged { pattern: Pattern },
    Stopped { reason: StopReason },
}

/// Receives engine events synchronously, at the point the state changes.
pub trait EngineListener: Send {
    fn on_event(&mut self, event: &EngineEvent);
}

impl<F> EngineListener for F
where
    F: FnMut(&EngineEvent) + Send,
{
    fn on_event(&mut self, event: &EngineEvent) {
        self(event);
    }
}

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    listeners: Vec<Box<dyn EngineListener>>,
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: Box<dyn EngineListener>) {
        self.listeners.push(listener);
    }

    pub(crate) fn emit(&mut self, event: &EngineEvent) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("count", &self.listeners.len()).finish()
    }
}
