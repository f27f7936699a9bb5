use crate::core::{PropertyPath, RowRef};

use super::operation::{DeleteOp, LockOp, Operation, RootDeleteOp};

/// Ordered sequence of operations that deletes one aggregate instance:
/// its root, every nested row, and an optional protective lock.
///
/// Produced by the mapping layer walking the aggregate; consumed by
/// [`BatchingDeleteChange::add`](super::BatchingDeleteChange::add). The
/// engine does not validate that the sequence is internally consistent;
/// that is the producer's contract.
#[derive(Debug, Clone, Default)]
pub struct DeleteChange {
    entity_type: String,
    operations: Vec<Operation>,
}

impl DeleteChange {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            operations: Vec::new(),
        }
    }

    /// Root entity type this change deletes.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Append a protective lock on the aggregate root.
    pub fn lock(&mut self, row: RowRef) {
        self.push(Operation::AcquireLock(LockOp::new(row)));
    }

    /// Append a delete of one nested row at the given tree position.
    pub fn delete(&mut self, path: impl Into<PropertyPath>, row: RowRef) {
        self.push(Operation::Delete(DeleteOp::new(path, row)));
    }

    /// Append the delete of the root row itself.
    pub fn delete_root(&mut self, row: RowRef, previous_version: Option<i64>) {
        self.push(Operation::DeleteRoot(RootDeleteOp::new(
            row,
            previous_version,
        )));
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub(crate) fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    fn row(table: &str, id: i64) -> RowRef {
        RowRef::new(table, id)
    }

    #[test]
    fn test_push_helpers_preserve_order() {
        let mut change = DeleteChange::new("order");
        change.lock(row("orders", 1));
        change.delete("lineItems", row("line_items", 10));
        change.delete_root(row("orders", 1), Some(4));

        assert_eq!(change.entity_type(), "order");
        assert_eq!(change.len(), 3);
        assert!(matches!(change.operations()[0], Operation::AcquireLock(_)));
        assert!(matches!(change.operations()[1], Operation::Delete(_)));
        assert!(matches!(change.operations()[2], Operation::DeleteRoot(_)));
    }

    #[test]
    fn test_delete_root_carries_version() {
        let mut change = DeleteChange::new("order");
        change.delete_root(row("orders", 7), Some(12));

        let Operation::DeleteRoot(ref root) = change.operations()[0] else {
            panic!("expected a root delete");
        };
        assert_eq!(root.previous_version, Some(12));
        assert_eq!(root.row.key, Value::Integer(7));
    }
}
