//! Animation engine for a contribution calendar.
//!
//! The calendar normally shows contribution counts. When a trigger is
//! pressed, the engine takes over the same `rows × cols` grid and runs one of
//! seven procedural patterns on it (Game of Life, Ripple, Wave, Rain, Spiral,
//! Noise, Rule 30). The grid that was live before the animation is kept as a
//! baseline and handed back when the animation stops.
//!
//! ```
//! use calendar_engine::{Engine, EngineConfig, Pattern, StepOutcome};
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! let before = engine.snapshot();
//!
//! engine.start(Pattern::Wave, 2);
//! engine.change_pattern(Pattern::Wave);
//! assert!(matches!(engine.step(), StepOutcome::Advanced { generation: 1 }));
//!
//! engine.stop();
//! assert_eq!(engine.grid(), &before);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod pattern;
pub mod scheduler;
pub mod step;
pub mod trigger;

pub use config::EngineConfig;
pub use engine::{AnimationState, Engine, StepOutcome};
pub use error::ConfigError;
pub use events::{EngineEvent, EngineListener, StopReason};
pub use grid::{Grid, Seed};
pub use pattern::{Emitter, Pattern, PatternState};
pub use scheduler::{SharedEngine, Ticker};
pub use trigger::{Animator, TriggerAction, TriggerPad};
