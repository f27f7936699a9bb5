// ============================================================================
// Batching Delete Accumulator
// ============================================================================
//
// Collects the operations of many independent per-aggregate delete changes
// and replays them as one consolidated stream: locks first, then non-root
// deletes leaf-to-root, then root deletes grouped by expected version.
// Same-shape operations sharing a grouping key are merged into one batch
// operation so the executor can run a single parameterized statement.
//
// ============================================================================

use indexmap::IndexMap;
use log::{debug, trace};

use crate::core::{PropertyPath, Result};
use crate::executor::OperationSink;
use crate::result::ReplaySummary;

use super::change::DeleteChange;
use super::operation::{DeleteOp, LockOp, Operation, RootDeleteOp};

/// Accumulates delete operations across aggregate instances and replays
/// them in an order safe for a store that enforces referential integrity:
/// child rows must be gone before the rows they reference.
///
/// Single-writer builder: mutate through [`add`](Self::add), then consume
/// once through [`replay`](Self::replay). Replay leaves the buckets intact,
/// so a second call yields the same sequence, though nothing downstream
/// requires one.
///
/// # Examples
///
/// ```
/// use delcascade::{BatchingDeleteChange, CollectingSink, DeleteChange, RowRef};
///
/// # fn main() -> delcascade::Result<()> {
/// let mut order = DeleteChange::new("order");
/// order.lock(RowRef::new("orders", 1i64));
/// order.delete("lineItems", RowRef::new("line_items", 10i64));
/// order.delete_root(RowRef::new("orders", 1i64), Some(3));
///
/// let mut plan = BatchingDeleteChange::new("order");
/// plan.add(order);
///
/// let mut sink = CollectingSink::new();
/// let summary = plan.replay(&mut sink)?;
/// assert_eq!(summary.row_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BatchingDeleteChange {
    entity_type: String,
    lock_ops: Vec<LockOp>,
    delete_ops: IndexMap<PropertyPath, Vec<DeleteOp>>,
    root_ops: IndexMap<Option<i64>, Vec<RootDeleteOp>>,
}

impl BatchingDeleteChange {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            lock_ops: Vec::new(),
            delete_ops: IndexMap::new(),
            root_ops: IndexMap::new(),
        }
    }

    /// Root entity type this plan deletes.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Route every operation of one per-aggregate change into its bucket.
    ///
    /// Locks keep arrival order. Root deletes bucket by expected version,
    /// with `None` its own group. Non-root deletes bucket by tree position.
    /// Batch-shaped operations are an output vocabulary and are ignored on
    /// input. The change's internal consistency is the producer's contract
    /// and is not checked here.
    pub fn add(&mut self, change: DeleteChange) {
        for operation in change.into_operations() {
            match operation {
                Operation::AcquireLock(lock) => self.lock_ops.push(lock),
                Operation::DeleteRoot(root) => {
                    self.root_ops
                        .entry(root.previous_version)
                        .or_default()
                        .push(root);
                }
                Operation::Delete(delete) => {
                    self.delete_ops
                        .entry(delete.path.clone())
                        .or_default()
                        .push(delete);
                }
                Operation::BatchDelete(_)
                | Operation::BatchDeleteRoot(_)
                | Operation::BatchDeleteRootWithVersion(_) => {}
            }
        }
    }

    /// Replay the consolidated plan into `sink`.
    ///
    /// Emission order: all locks in add order, then non-root buckets by
    /// descending path depth, then root buckets. A bucket holding one
    /// operation is emitted as-is; two or more are wrapped into the
    /// matching batch variant, in bucket insertion order. Equal-depth and
    /// root buckets follow bucket insertion order: deterministic within a
    /// run, but not a contractual guarantee.
    ///
    /// Errors from the sink propagate unchanged; the plan itself never
    /// fails and its buckets are left intact.
    pub fn replay<S>(&self, sink: &mut S) -> Result<ReplaySummary>
    where
        S: OperationSink + ?Sized,
    {
        debug!(
            "replaying delete plan for '{}': {} locks, {} delete buckets, {} root buckets",
            self.entity_type,
            self.lock_ops.len(),
            self.delete_ops.len(),
            self.root_ops.len()
        );

        let mut summary = ReplaySummary::default();

        for lock in &self.lock_ops {
            sink.accept(Operation::AcquireLock(lock.clone()))?;
            summary.locks += 1;
        }

        // Deepest paths first so child rows are removed before the rows
        // they reference. The sort is stable: equal depths keep bucket
        // insertion order.
        let mut buckets: Vec<(&PropertyPath, &Vec<DeleteOp>)> = self.delete_ops.iter().collect();
        buckets.sort_by(|(a, _), (b, _)| b.depth().cmp(&a.depth()));

        for (path, deletes) in buckets {
            summary.rows += deletes.len();
            if deletes.len() > 1 {
                trace!("batching {} deletes at '{}'", deletes.len(), path);
                sink.accept(Operation::BatchDelete(deletes.clone()))?;
                summary.batches += 1;
            } else {
                for delete in deletes {
                    sink.accept(Operation::Delete(delete.clone()))?;
                    summary.singles += 1;
                }
            }
        }

        for (version, roots) in &self.root_ops {
            summary.rows += roots.len();
            if roots.len() > 1 {
                trace!(
                    "batching {} root deletes (version {:?})",
                    roots.len(),
                    version
                );
                let batch = if version.is_some() {
                    Operation::BatchDeleteRootWithVersion(roots.clone())
                } else {
                    Operation::BatchDeleteRoot(roots.clone())
                };
                sink.accept(batch)?;
                summary.batches += 1;
            } else {
                for root in roots {
                    sink.accept(Operation::DeleteRoot(root.clone()))?;
                    summary.singles += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Number of operations currently bucketed, locks included.
    pub fn operation_count(&self) -> usize {
        self.lock_ops.len()
            + self.delete_ops.values().map(Vec::len).sum::<usize>()
            + self.root_ops.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_ops.is_empty() && self.delete_ops.is_empty() && self.root_ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RowRef;
    use crate::executor::CollectingSink;

    fn row(table: &str, id: i64) -> RowRef {
        RowRef::new(table, id)
    }

    #[test]
    fn test_add_buckets_by_path_and_version() {
        let mut plan = BatchingDeleteChange::new("order");

        let mut first = DeleteChange::new("order");
        first.delete("lineItems", row("line_items", 1));
        first.delete_root(row("orders", 1), Some(5));
        plan.add(first);

        let mut second = DeleteChange::new("order");
        second.delete("lineItems", row("line_items", 2));
        second.delete_root(row("orders", 2), Some(5));
        plan.add(second);

        assert_eq!(plan.operation_count(), 4);
        assert_eq!(plan.delete_ops.len(), 1);
        assert_eq!(plan.root_ops.len(), 1);
    }

    #[test]
    fn test_input_batches_are_ignored() {
        let mut plan = BatchingDeleteChange::new("order");

        let mut change = DeleteChange::new("order");
        change.push(Operation::BatchDelete(vec![
            DeleteOp::new("lineItems", row("line_items", 1)),
            DeleteOp::new("lineItems", row("line_items", 2)),
        ]));
        plan.add(change);

        assert!(plan.is_empty());
    }

    #[test]
    fn test_replay_leaves_buckets_intact() {
        let mut plan = BatchingDeleteChange::new("order");
        let mut change = DeleteChange::new("order");
        change.delete("lineItems", row("line_items", 1));
        change.delete_root(row("orders", 1), None);
        plan.add(change);

        let mut first = CollectingSink::new();
        plan.replay(&mut first).unwrap();
        let mut second = CollectingSink::new();
        plan.replay(&mut second).unwrap();

        assert_eq!(first.operations(), second.operations());
        assert_eq!(plan.operation_count(), 2);
    }
}
