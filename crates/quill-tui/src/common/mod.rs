pub mod format;
mod task;

pub use task::{TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
