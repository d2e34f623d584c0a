use thiserror::Error;

/// Failures reported by the growth engine.
///
/// The engine has no fallible I/O; the only runtime failure is the
/// defensive point budget tripping on a run that refuses to terminate.
/// Invariant breaks (mismatched buffer columns, negative radii) are
/// programming defects and assert in debug builds instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrowthError {
    /// The run emitted more points than [`crate::config::GrowthConfig::max_points`]
    /// allows while branches were still alive.
    #[error("point budget exhausted: {emitted} points emitted with a cap of {cap}")]
    BudgetExhausted { emitted: usize, cap: usize },
}
