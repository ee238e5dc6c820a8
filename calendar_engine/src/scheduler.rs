// scheduler.rs - Shared engine handle and the tokio ticker that drives it
//
// A host with a refresh callback can call `Engine::tick` itself. Hosts
// without one spawn a `Ticker`, which does the same from a dedicated task.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::engine::{AnimationState, Engine, StepOutcome};
use crate::events::EngineListener;
use crate::grid::Grid;
use crate::pattern::Pattern;

#[derive(Debug)]
struct Inner {
    engine: Mutex<Engine>,
    /// Wakes an idle ticker after `start`.
    wake: Notify,
}

/// Cloneable handle to one engine.
///
/// Every operation takes the same lock, so steps and control operations
/// never interleave. Listeners run while the lock is held and must not call
/// back into the handle.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Inner>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Inner {
                engine: Mutex::new(engine),
                wake: Notify::new(),
            }),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<T>(&self, f: impl FnOnce(&mut Engine) -> T) -> T {
        let mut engine = self.inner.engine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }

    pub fn subscribe(&self, listener: impl EngineListener + 'static) {
        self.with(|engine| engine.subscribe(listener));
    }

    pub fn start(&self, pattern: Pattern, letter: usize) {
        self.with(|engine| engine.start(pattern, letter));
        self.inner.wake.notify_one();
    }

    pub fn change_pattern(&self, pattern: Pattern) {
        self.with(|engine| engine.change_pattern(pattern));
    }

    pub fn set_active_letter(&self, letter: usize) {
        self.with(|engine| engine.set_active_letter(letter));
    }

    pub fn stop(&self) {
        self.with(Engine::stop);
    }

    pub fn reset(&self) {
        self.with(Engine::reset);
    }

    pub fn randomize(&self) {
        self.with(Engine::randomize);
    }

    pub fn snapshot(&self) -> Grid {
        self.with(|engine| engine.snapshot())
    }

    /// Copy of the animation state.
    pub fn state(&self) -> AnimationState {
        self.with(|engine| engine.state().clone())
    }

    pub fn is_running(&self) -> bool {
        self.with(|engine| engine.is_running())
    }

    pub fn generation(&self) -> u64 {
        self.with(|engine| engine.generation())
    }

    pub fn active_letter(&self) -> Option<usize> {
        self.with(|engine| engine.active_letter())
    }
}

/// Background task stepping a [`SharedEngine`] at its configured interval.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(shared: SharedEngine, runtime: &Handle) -> Self {
        debug!("Ticker spawned");
        Self {
            handle: runtime.spawn(run(shared)),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn shutdown(self) {
        self.handle.abort();
        debug!("Ticker shut down");
    }
}

async fn run(shared: SharedEngine) {
    let interval = shared.with(|engine| engine.config().step_interval());

    loop {
        if !shared.is_running() {
            shared.inner.wake.notified().await;
            continue;
        }

        tokio::time::sleep(interval).await;

        // tick re-checks the running flag under the lock, so a stop issued
        // during the sleep wins
        let now = tokio::time::Instant::now().into_std();
        let outcome = shared.with(|engine| engine.tick(now));
        trace!(?outcome, "Tick");
        if let StepOutcome::Stopped(reason) = outcome {
            debug!(?reason, "Ticker going idle");
        }

        tokio::task::yield_now().await;
    }
}
