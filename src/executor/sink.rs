use crate::core::Result;
use crate::plan::Operation;

/// Receives the consolidated operation stream produced by a replay pass.
///
/// Implementors translate each operation into actual lock/delete
/// statements. Batch variants expose their wrapped row list so one
/// parameterized statement can be executed once per row instead of one
/// statement per operation.
pub trait OperationSink {
    fn accept(&mut self, operation: Operation) -> Result<()>;
}

impl<F> OperationSink for F
where
    F: FnMut(Operation) -> Result<()>,
{
    fn accept(&mut self, operation: Operation) -> Result<()> {
        self(operation)
    }
}

/// Sink that materializes the replayed plan in order. Useful for tests
/// and for callers that want to inspect a plan before executing it.
#[derive(Debug, Default)]
pub struct CollectingSink {
    operations: Vec<Operation>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl OperationSink for CollectingSink {
    fn accept(&mut self, operation: Operation) -> Result<()> {
        self.operations.push(operation);
        Ok(())
    }
}
