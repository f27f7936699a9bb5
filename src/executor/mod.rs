pub mod sink;

pub use sink::{CollectingSink, OperationSink};
