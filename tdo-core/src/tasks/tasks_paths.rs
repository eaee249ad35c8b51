use std::path::{Path, PathBuf};

/// Path to pending tasks file based on the root dir
pub fn pending_tasks_file(root: &Path) -> PathBuf {
    root.join("tareas.md")
}

/// Path to completed tasks file based on the root dir
pub fn completed_tasks_file(root: &Path) -> PathBuf {
    root.join("completadas.md")
}
