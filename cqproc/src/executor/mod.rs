//! Task execution: one resolver scope around one dispatch.

pub mod error;
pub mod task_executor;

pub use error::ExecutorError;
pub use task_executor::{default_error_wrapper, ErrorWrapper, TaskExecutor};
