mod format_utils;
mod parse_tasks;
mod subscription;
mod task;
mod task_list;
mod tasks_paths;

pub(crate) use format_utils::sanitize;
pub use subscription::{Snapshot, Subscription};
pub use task::{
    QueryError, ReadTaskOptions, SortMode, Task, TaskQueryResult, TaskStatus, TaskWriteEntry,
};
pub use task_list::TaskList;
pub use tasks_paths::{completed_tasks_file, pending_tasks_file};
