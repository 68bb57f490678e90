mod context;
mod model;

pub use context::{ErrorContext, ResultExt};
pub use model::{Error, ExitCode, MachineError, Result};
