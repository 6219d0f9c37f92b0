pub mod task;
pub mod store;
pub mod error;

// Re-exports
pub use task::{NewTask, Task, TaskUpdate};
pub use store::{InMemoryTaskStore, TaskStore};
pub use error::{Error, Result};
