use anyhow::{Context, Result, bail};
use std::io::Write;
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
};
use tracing::{info, warn};

use crate::tasks::sanitize;

const FOLDERS_HEADER: &str = "# Carpetas";

/// The folders a task can be filed under: the configured defaults plus the ones the
/// user created, stored one per line in `carpetas.md`.
#[derive(Debug, Clone)]
pub struct Folders {
    pub tasks_dir: PathBuf,
    pub defaults: Vec<String>,
}

impl Folders {
    pub fn new(tasks_dir: PathBuf, defaults: Vec<String>) -> Self {
        Self { tasks_dir, defaults }
    }

    pub fn path(&self) -> PathBuf {
        self.tasks_dir.join("carpetas.md")
    }

    /// Defaults first, then custom folders in creation order, without repeats.
    pub fn list(&self) -> Vec<String> {
        let mut folders: Vec<String> = Vec::new();
        for name in self.defaults.iter().cloned().chain(self.custom()) {
            if !folders.contains(&name) {
                folders.push(name);
            }
        }
        folders
    }

    pub fn contains(&self, name: &str) -> bool {
        self.list().iter().any(|f| f == name)
    }

    /// Creates a folder. Returns `false` when a folder with that exact name already exists.
    ///
    /// `|` becomes `/`, as it does when the folder is written on a task line.
    pub fn add(&self, name: &str) -> Result<bool> {
        let name = sanitize(name);
        let name = name.as_str();
        if name.is_empty() {
            bail!("A folder needs a name");
        }
        if self.contains(name) {
            return Ok(false);
        }

        let path = self.path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {}", parent.display()))?;
        }
        let existing = if path.exists() {
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?
        } else {
            String::new()
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening {}", path.display()))?;

        if existing.trim().is_empty() {
            writeln!(file, "{FOLDERS_HEADER}\n")
                .with_context(|| format!("writing header to {}", path.display()))?;
        } else if !existing.ends_with('\n') {
            writeln!(file).with_context(|| format!("appending to {}", path.display()))?;
        }
        writeln!(file, "- {name}")
            .with_context(|| format!("appending folder to {}", path.display()))?;
        info!(folder = name, "folder created");
        Ok(true)
    }

    fn custom(&self) -> Vec<String> {
        let path = self.path();
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&path) {
            Ok(content) => content
                .lines()
                .filter_map(|line| line.trim_start().strip_prefix("- "))
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            Err(error) => {
                warn!(path = %path.display(), "{error}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Folders;
    use std::fs;
    use tempfile::tempdir;

    fn mk_folders() -> (Folders, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let defaults = ["Trabajo", "Personal", "Otros"]
            .iter()
            .map(|f| f.to_string())
            .collect();
        (Folders::new(tmp.path().to_path_buf(), defaults), tmp)
    }

    #[test]
    fn defaults_without_file() {
        let (folders, _tmp) = mk_folders();
        assert_eq!(folders.list(), vec!["Trabajo", "Personal", "Otros"]);
        assert!(folders.contains("Otros"));
        assert!(!folders.contains("otros"));
    }

    #[test]
    fn add_appends_after_defaults() {
        let (folders, _tmp) = mk_folders();
        assert!(folders.add("  Viajes ").unwrap());
        assert!(folders.add("Estudio").unwrap());

        assert_eq!(
            folders.list(),
            vec!["Trabajo", "Personal", "Otros", "Viajes", "Estudio"]
        );
        let s = fs::read_to_string(folders.path()).unwrap();
        assert_eq!(s, "# Carpetas\n\n- Viajes\n- Estudio\n");
    }

    #[test]
    fn duplicates_are_not_added() {
        let (folders, _tmp) = mk_folders();
        assert!(!folders.add("Trabajo").unwrap());
        assert!(folders.add("Viajes").unwrap());
        assert!(!folders.add("Viajes").unwrap());
        assert_eq!(folders.list().len(), 4);
    }

    #[test]
    fn empty_name_is_an_error() {
        let (folders, _tmp) = mk_folders();
        assert!(folders.add("   ").is_err());
        assert!(!folders.path().exists());
    }

    #[test]
    fn empty_file_gets_a_header() {
        let (folders, _tmp) = mk_folders();
        fs::write(folders.path(), "").unwrap();
        assert!(folders.add("Viajes").unwrap());
        let s = fs::read_to_string(folders.path()).unwrap();
        assert_eq!(s, "# Carpetas\n\n- Viajes\n");
    }

    #[test]
    fn append_after_a_last_line_without_newline() {
        let (folders, _tmp) = mk_folders();
        fs::write(folders.path(), "# Carpetas\n\n- Viajes").unwrap();
        assert!(folders.add("Estudio").unwrap());
        assert_eq!(
            folders.list(),
            vec!["Trabajo", "Personal", "Otros", "Viajes", "Estudio"]
        );
    }

    #[test]
    fn pipes_in_names_match_task_lines() {
        let (folders, _tmp) = mk_folders();
        assert!(folders.add("Casa|Jardín").unwrap());
        assert!(folders.contains("Casa/Jardín"));
        assert!(!folders.add("Casa|Jardín").unwrap());
    }

    #[test]
    fn hand_edited_file_is_deduplicated() {
        let (folders, _tmp) = mk_folders();
        fs::write(folders.path(), "# Carpetas\n- Viajes\nnota\n- Personal\n- Viajes\n").unwrap();
        assert_eq!(folders.list(), vec!["Trabajo", "Personal", "Otros", "Viajes"]);
    }
}
