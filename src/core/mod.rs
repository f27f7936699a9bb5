pub mod error;
pub mod path;
pub mod types;
pub mod value;

pub use error::{PlanError, Result};
pub use path::PropertyPath;
pub use types::RowRef;
pub use value::Value;
