// error.rs - Configuration errors for the animation engine

/// Errors raised while validating an [`EngineConfig`](crate::config::EngineConfig).
///
/// This is the only error type of the engine. Everything after construction
/// is total: stabilization and the generation limit are reported through
/// [`EngineEvent::Stopped`](crate::events::EngineEvent::Stopped), not here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The grid must have at least one row.
    #[error("invalid configuration: rows must be at least 1")]
    ZeroRows,

    /// The grid must have at least one column.
    #[error("invalid configuration: cols must be at least 1")]
    ZeroCols,

    /// Probabilities must be finite and within `[0, 1]`.
    #[error("invalid configuration: live_probability {value} is outside [0, 1]")]
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },
}
