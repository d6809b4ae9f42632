// tasklist - Ordered to-do list store with a JSON persistence slot

pub mod date;
pub mod error;
pub mod models;
pub mod slot;
pub mod store;

// Re-export main types for convenience
pub use error::ValidationError;
pub use models::Task;
pub use slot::SlotStorage;
pub use store::{TASKS_SLOT, TaskListStore};
