mod task;

pub use task::{Task, TaskKind, TaskRecord};
