// ============================================================================
// DelCascade Library
// ============================================================================
//
// Accumulate-and-replay engine for cascading aggregate deletes: operations
// collected per aggregate instance are bucketed, merged, and handed to an
// executor sink leaf-to-root so a relational store's referential integrity
// is never violated mid-cascade.
//
// ============================================================================

pub mod core;
pub mod executor;
pub mod plan;
pub mod result;

// Re-export main types for convenience
pub use crate::core::{PlanError, PropertyPath, Result, RowRef, Value};
pub use crate::executor::{CollectingSink, OperationSink};
pub use crate::plan::{
    BatchingDeleteChange, DeleteChange, DeleteOp, LockOp, Operation, RootDeleteOp,
};
pub use crate::result::ReplaySummary;
