// ============================================================================
// Delete Plan Operations
// ============================================================================
//
// Closed set of units of work replayed to an executor sink. Single-row
// variants are produced by the mapping layer while cascading a delete;
// batch variants are produced only by the accumulator when it merges a
// bucket of same-shape operations.
//
// ============================================================================

use crate::core::{PropertyPath, RowRef};

/// Delete one non-root row at a given tree position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOp {
    pub path: PropertyPath,
    pub row: RowRef,
}

impl DeleteOp {
    pub fn new(path: impl Into<PropertyPath>, row: RowRef) -> Self {
        Self {
            path: path.into(),
            row,
        }
    }
}

/// Delete one root row, optionally guarded by the version the row is
/// expected to still carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDeleteOp {
    pub row: RowRef,
    pub previous_version: Option<i64>,
}

impl RootDeleteOp {
    pub fn new(row: RowRef, previous_version: Option<i64>) -> Self {
        Self {
            row,
            previous_version,
        }
    }
}

/// Acquire a protective lock on a root row before its cascade runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOp {
    pub row: RowRef,
}

impl LockOp {
    pub fn new(row: RowRef) -> Self {
        Self { row }
    }
}

/// One unit of work handed to an executor sink.
///
/// Batch variants wrap two or more operations sharing one grouping key
/// (tree position for `BatchDelete`, version group for the root batches)
/// so the executor can issue one parameterized statement per row instead
/// of one statement per operation. `BatchDeleteRootWithVersion` is kept
/// apart from `BatchDeleteRoot` because the generated statement differs:
/// it must include a version-equality predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    AcquireLock(LockOp),
    Delete(DeleteOp),
    DeleteRoot(RootDeleteOp),
    BatchDelete(Vec<DeleteOp>),
    BatchDeleteRoot(Vec<RootDeleteOp>),
    BatchDeleteRootWithVersion(Vec<RootDeleteOp>),
}

impl Operation {
    /// Check if this operation wraps a merged bucket.
    pub fn is_batch(&self) -> bool {
        matches!(
            self,
            Operation::BatchDelete(_)
                | Operation::BatchDeleteRoot(_)
                | Operation::BatchDeleteRootWithVersion(_)
        )
    }

    /// Check if this operation addresses the aggregate root.
    pub fn is_root(&self) -> bool {
        matches!(
            self,
            Operation::AcquireLock(_)
                | Operation::DeleteRoot(_)
                | Operation::BatchDeleteRoot(_)
                | Operation::BatchDeleteRootWithVersion(_)
        )
    }

    /// Number of rows this operation covers once executed.
    pub fn row_count(&self) -> usize {
        match self {
            Operation::AcquireLock(_) | Operation::Delete(_) | Operation::DeleteRoot(_) => 1,
            Operation::BatchDelete(ops) => ops.len(),
            Operation::BatchDeleteRoot(ops) | Operation::BatchDeleteRootWithVersion(ops) => {
                ops.len()
            }
        }
    }

    /// Tree position for non-root delete operations; `None` for root-level
    /// operations.
    pub fn path(&self) -> Option<&PropertyPath> {
        match self {
            Operation::Delete(op) => Some(&op.path),
            Operation::BatchDelete(ops) => ops.first().map(|op| &op.path),
            _ => None,
        }
    }
}
