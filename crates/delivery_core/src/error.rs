/// Input that cannot produce a simulation run.
///
/// The engine itself only raises [`EngineInputError::EmptyDriverPool`]; the
/// other variants come from [`RunParameters::validate`](crate::scenario::RunParameters::validate),
/// which callers run before invoking the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineInputError {
    #[error("no drivers available: the driver pool is empty after taking the first {requested} drivers")]
    EmptyDriverPool { requested: usize },
    #[error("number of drivers must be at least 1")]
    InvalidDriverCount,
    #[error("max hours per driver must be at least 1, got {0}")]
    InvalidMaxHours(f64),
    #[error("route start time is missing")]
    MissingStartTime,
}
