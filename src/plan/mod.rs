pub mod batching;
pub mod change;
pub mod operation;

pub use batching::BatchingDeleteChange;
pub use change::DeleteChange;
pub use operation::{DeleteOp, LockOp, Operation, RootDeleteOp};
