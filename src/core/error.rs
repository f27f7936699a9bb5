use thiserror::Error;

/// Failures surfaced while a sink consumes a replayed delete plan.
///
/// The accumulator itself never fails; these variants exist so sink
/// implementations and `replay` share one error channel.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("Version conflict: {0}")]
    VersionConflict(String),

    #[error("Execution error: {0}")]
    ExecutionError(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
