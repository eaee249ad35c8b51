use super::{
    format_utils::{COMPLETED_HEADER, PENDING_HEADER, format_task_line, sanitize},
    parse_tasks::parse_task_file_content,
    subscription::{Snapshot, Subscribers, Subscription},
    task::{
        FileLine, ParsedTaskLine, ReadTaskOptions, SortMode, Task, TaskQueryResult, TaskStatus,
        TaskWriteEntry,
    },
    tasks_paths::{completed_tasks_file, pending_tasks_file},
};
use crate::parse_input::DateFilter;
use crate::tasks::QueryError;
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use std::io::Write;
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// The pending and completed task lists stored in `tasks_dir`.
///
/// Every change goes straight to disk and is then broadcast to the
/// [`Subscription`]s handed out by [`TaskList::subscribe`].
#[derive(Debug)]
pub struct TaskList {
    pub tasks_dir: PathBuf,
    subscribers: Subscribers,
}

/// A task file loaded for a change.
///
/// `layout` remembers where the non-task lines were, so that rewriting the file
/// keeps hand-written notes in place.
#[derive(Debug, Default)]
struct TaskFile {
    tasks: Vec<Task>,
    layout: Vec<FileLine>,
    has_header: bool,
    ends_with_newline: bool,
}

impl TaskList {
    pub fn new(tasks_dir: PathBuf) -> Self {
        Self {
            tasks_dir,
            subscribers: Subscribers::default(),
        }
    }

    /// Appends a new task at the end of the pending list.
    pub fn create_task(&self, input: TaskWriteEntry) -> Result<Task> {
        let title = clean_title(&input.title)?;
        let folder = clean_folder(input.folder.as_deref());
        let pending_file = pending_tasks_file(&self.tasks_dir);
        if let Some(parent) = pending_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {}", parent.display()))?;
        }

        let mut pending = self.load(&pending_file)?;
        let task = Task {
            position: pending.tasks.len() + 1,
            title,
            due_date: input.due_date,
            folder,
            done_date: None,
            status: TaskStatus::Pending,
            path: pending_file.clone(),
        };

        if pending.has_header {
            let line = format_task_line(
                &task.title,
                task.due_date,
                task.folder.as_deref(),
                None,
                TaskStatus::Pending,
            );
            let mut file = OpenOptions::new()
                .append(true)
                .open(&pending_file)
                .with_context(|| format!("opening {}", pending_file.display()))?;
            if !pending.ends_with_newline {
                writeln!(file)
                    .with_context(|| format!("appending to {}", pending_file.display()))?;
            }
            write!(file, "{line}")
                .with_context(|| format!("appending task to {}", pending_file.display()))?;
        } else {
            // Missing, empty or headerless file: write it whole, header first.
            pending.tasks.push(task.clone());
            write_list(&pending_file, PENDING_HEADER, &pending)?;
        }
        info!(position = task.position, path = %pending_file.display(), "task created");

        self.notify();
        Ok(task)
    }

    /// Reads the pending tasks, filtered and sorted by `options`.
    ///
    /// This never fails: unreadable files and malformed lines end up in
    /// [`TaskQueryResult::errors`] next to whatever could be parsed.
    pub fn read_tasks(&self, options: &ReadTaskOptions) -> TaskQueryResult {
        let TaskQueryResult { mut tasks, errors } =
            self.parse_file(&pending_tasks_file(&self.tasks_dir));

        if let Some(folder) = options.folder {
            tasks.retain(|t| t.folder.as_deref() == Some(folder));
        }

        if let Some(search) = options.search {
            let needle = search.trim().to_lowercase();
            tasks.retain(|t| t.title.to_lowercase().contains(&needle));
        }

        if let Some(filter) = options.due_date {
            tasks.retain(|t| t.due_date.is_some_and(|d| filter.contains(d)));
        }

        match options.sort {
            SortMode::Manual => {}
            SortMode::Alphabetical => tasks.sort_by_cached_key(|t| t.title.to_lowercase()),
            SortMode::DueDate => tasks.sort_by_key(|t| (t.due_date.is_none(), t.due_date)),
        }

        TaskQueryResult { tasks, errors }
    }

    /// Reads the completed tasks, oldest completion first.
    pub fn read_completed(&self) -> TaskQueryResult {
        self.parse_file(&completed_tasks_file(&self.tasks_dir))
    }

    /// Pending tasks due on `date`, in manual order.
    pub fn tasks_due_on(&self, date: NaiveDate) -> TaskQueryResult {
        self.read_tasks(&ReadTaskOptions {
            due_date: Some(DateFilter::Single(date)),
            ..Default::default()
        })
    }

    /// Moves pending task `position` to the end of the completed list.
    pub fn complete_task(&self, position: usize, done_date: NaiveDate) -> Result<Task> {
        let pending_file = pending_tasks_file(&self.tasks_dir);
        let completed_file = completed_tasks_file(&self.tasks_dir);

        let mut pending = self.load(&pending_file)?;
        let mut task = take(&mut pending.tasks, position, "pending")?;
        let mut completed = self.load(&completed_file)?;

        task.status = TaskStatus::Done;
        task.done_date = Some(done_date);
        task.path = completed_file.clone();
        task.position = completed.tasks.len() + 1;
        completed.tasks.push(task.clone());

        // Destination list first.
        write_list(&completed_file, COMPLETED_HEADER, &completed)?;
        write_list(&pending_file, PENDING_HEADER, &pending)?;
        info!(position, title = %task.title, "task completed");

        self.notify();
        Ok(task)
    }

    /// Moves completed task `position` back to the end of the pending list.
    /// The due date is cleared, the folder is kept.
    pub fn reopen_task(&self, position: usize) -> Result<Task> {
        let pending_file = pending_tasks_file(&self.tasks_dir);
        let completed_file = completed_tasks_file(&self.tasks_dir);

        let mut completed = self.load(&completed_file)?;
        let mut task = take(&mut completed.tasks, position, "completed")?;
        let mut pending = self.load(&pending_file)?;

        task.status = TaskStatus::Pending;
        task.due_date = None;
        task.done_date = None;
        task.path = pending_file.clone();
        task.position = pending.tasks.len() + 1;
        pending.tasks.push(task.clone());

        write_list(&pending_file, PENDING_HEADER, &pending)?;
        write_list(&completed_file, COMPLETED_HEADER, &completed)?;
        info!(position, title = %task.title, "task reopened");

        self.notify();
        Ok(task)
    }

    /// Replaces title, due date and folder of pending task `position`.
    pub fn edit_task(&self, position: usize, input: TaskWriteEntry) -> Result<Task> {
        let title = clean_title(&input.title)?;
        let pending_file = pending_tasks_file(&self.tasks_dir);
        let mut pending = self.load(&pending_file)?;

        let task = get_mut(&mut pending.tasks, position, "pending")?;
        task.title = title;
        task.due_date = input.due_date;
        task.folder = clean_folder(input.folder.as_deref());
        let task = task.clone();

        write_list(&pending_file, PENDING_HEADER, &pending)?;
        info!(position, "task edited");

        self.notify();
        Ok(task)
    }

    pub fn edit_completed_title(&self, position: usize, title: &str) -> Result<Task> {
        let title = clean_title(title)?;
        let completed_file = completed_tasks_file(&self.tasks_dir);
        let mut completed = self.load(&completed_file)?;

        let task = get_mut(&mut completed.tasks, position, "completed")?;
        task.title = title;
        let task = task.clone();

        write_list(&completed_file, COMPLETED_HEADER, &completed)?;
        info!(position, "completed task renamed");

        self.notify();
        Ok(task)
    }

    pub fn delete_task(&self, position: usize) -> Result<Task> {
        self.delete(&pending_tasks_file(&self.tasks_dir), PENDING_HEADER, position, "pending")
    }

    pub fn delete_completed(&self, position: usize) -> Result<Task> {
        self.delete(
            &completed_tasks_file(&self.tasks_dir),
            COMPLETED_HEADER,
            position,
            "completed",
        )
    }

    /// Moves pending task `from` to position `to`, shifting the tasks in between,
    /// and saves the whole new order at once.
    ///
    /// Returns the pending list in its new order.
    pub fn move_task(&self, from: usize, to: usize) -> Result<Vec<Task>> {
        let pending_file = pending_tasks_file(&self.tasks_dir);
        let mut pending = self.load(&pending_file)?;
        let task = take(&mut pending.tasks, from, "pending")?;

        if to == 0 || to > pending.tasks.len() + 1 {
            bail!(
                "Cannot move task #{from} to #{to}: the list has {} tasks",
                pending.tasks.len() + 1
            );
        }
        pending.tasks.insert(to - 1, task);
        renumber(&mut pending.tasks);

        if from != to {
            write_list(&pending_file, PENDING_HEADER, &pending)?;
            info!(from, to, "task moved");
            self.notify();
        }
        Ok(pending.tasks)
    }

    /// Registers a new listener for changes to either list.
    pub fn subscribe(&self) -> Subscription {
        self.subscribers.register()
    }

    fn delete(&self, path: &Path, header: &str, position: usize, list: &str) -> Result<Task> {
        let mut file = self.load(path)?;
        let task = take(&mut file.tasks, position, list)?;

        write_list(path, header, &file)?;
        info!(position, list, "task deleted");

        self.notify();
        Ok(task)
    }

    fn notify(&self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = Snapshot {
            pending: self.parse_file(&pending_tasks_file(&self.tasks_dir)).tasks,
            completed: self.parse_file(&completed_tasks_file(&self.tasks_dir)).tasks,
        };
        self.subscribers.notify(&snapshot);
    }

    /// One task file, read for a change.
    ///
    /// A file that cannot be read is an error, so it is never overwritten.
    /// Problems inside the file are logged and the readable tasks kept.
    fn load(&self, path: &Path) -> Result<TaskFile> {
        if !path.exists() {
            return Ok(TaskFile {
                ends_with_newline: true,
                ..Default::default()
            });
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let parsed = parse_task_file_content(&content);
        for error in &parsed.errors {
            warn!(path = %path.display(), "{error}");
        }

        Ok(TaskFile {
            tasks: to_tasks(path, parsed.entries),
            layout: parsed.layout,
            has_header: parsed.has_header,
            ends_with_newline: content.is_empty() || content.ends_with('\n'),
        })
    }

    /// Parses one task file. A file that does not exist yet is an empty list.
    pub fn parse_file(&self, path: &Path) -> TaskQueryResult {
        let mut tasks = Vec::new();
        let mut errors = Vec::new();
        if !path.exists() {
            return TaskQueryResult { tasks, errors };
        }
        match fs::read_to_string(path) {
            Ok(file_content) => {
                let parse_result = parse_task_file_content(&file_content);
                tasks = to_tasks(path, parse_result.entries);

                for error in parse_result.errors {
                    errors.push(QueryError::FileError {
                        path: path.to_path_buf(),
                        error: anyhow!(error),
                    });
                }
            }
            Err(error) => {
                errors.push(QueryError::FileError {
                    path: path.to_path_buf(),
                    error: error.into(),
                });
            }
        }
        TaskQueryResult { tasks, errors }
    }
}

fn to_tasks(path: &Path, entries: Vec<ParsedTaskLine>) -> Vec<Task> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| Task {
            position: i + 1,
            title: entry.title,
            due_date: entry.due_date,
            folder: entry.folder,
            done_date: entry.done_date,
            status: entry.status,
            path: path.to_path_buf(),
        })
        .collect()
}

fn clean_title(title: &str) -> Result<String> {
    let title = sanitize(title);
    if title.is_empty() {
        bail!("A task needs a title");
    }
    Ok(title)
}

fn clean_folder(folder: Option<&str>) -> Option<String> {
    folder.map(sanitize).filter(|f| !f.is_empty())
}

fn take(tasks: &mut Vec<Task>, position: usize, list: &str) -> Result<Task> {
    if position == 0 || position > tasks.len() {
        bail!("No {list} task #{position}");
    }
    let task = tasks.remove(position - 1);
    renumber(tasks);
    Ok(task)
}

fn get_mut<'a>(tasks: &'a mut [Task], position: usize, list: &str) -> Result<&'a mut Task> {
    position
        .checked_sub(1)
        .and_then(|i| tasks.get_mut(i))
        .ok_or_else(|| anyhow!("No {list} task #{position}"))
}

fn renumber(tasks: &mut [Task]) {
    for (i, task) in tasks.iter_mut().enumerate() {
        task.position = i + 1;
    }
}

/// Rewrites a whole list in a single write.
///
/// Tasks fill the task slots of the file's layout in order and any extra tasks go
/// at the end. Other lines stay where they were. `header` is only added when the
/// file had none.
fn write_list(path: &Path, header: &str, file: &TaskFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating parent directory {}", parent.display()))?;
    }
    let mut content = String::new();
    if !file.has_header {
        content.push_str(header);
        content.push_str("\n\n");
    }

    let task_line = |task: &Task| {
        format_task_line(
            &task.title,
            task.due_date,
            task.folder.as_deref(),
            task.done_date,
            task.status,
        )
    };
    let mut tasks = file.tasks.iter();
    for line in &file.layout {
        match line {
            FileLine::Text(text) => {
                content.push_str(text);
                content.push('\n');
            }
            FileLine::Task => {
                if let Some(task) = tasks.next() {
                    content.push_str(&task_line(task));
                }
            }
        }
    }
    for task in tasks {
        content.push_str(&task_line(task));
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    use super::TaskList;
    use crate::{
        parse_input::DateFilter,
        tasks::{
            ReadTaskOptions, SortMode, TaskStatus, TaskWriteEntry, completed_tasks_file,
            pending_tasks_file,
        },
        tests::mk_config,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mk_task_list() -> (TaskList, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().to_path_buf(), None);
        (TaskList::new(config.tasks_dir), tmp)
    }

    fn entry(title: &str, due_date: Option<NaiveDate>, folder: Option<&str>) -> TaskWriteEntry {
        TaskWriteEntry {
            title: title.to_string(),
            due_date,
            folder: folder.map(str::to_string),
        }
    }

    fn titles(list: &TaskList, options: &ReadTaskOptions) -> Vec<String> {
        list.read_tasks(options)
            .tasks
            .into_iter()
            .map(|t| t.title)
            .collect()
    }

    #[test]
    fn first_task_creates_file_with_header() {
        let (list, _tmp) = mk_task_list();
        let task = list
            .create_task(entry("Comprar leche", Some(date(2024, 6, 10)), Some("Personal")))
            .unwrap();

        assert_eq!(task.position, 1);
        assert_eq!(task.path, pending_tasks_file(&list.tasks_dir));
        let s = fs::read_to_string(&task.path).unwrap();
        assert_eq!(
            s,
            "# Tareas pendientes\n\n- [ ] Comprar leche | 2024-06-10 | Personal\n"
        );
    }

    #[test]
    fn second_task_appends() {
        let (list, _tmp) = mk_task_list();
        list.create_task(entry("Primera", None, None)).unwrap();
        let second = list.create_task(entry("Segunda", None, Some("Trabajo"))).unwrap();

        assert_eq!(second.position, 2);
        let s = fs::read_to_string(&second.path).unwrap();
        assert_eq!(s.matches("# Tareas pendientes").count(), 1);
        assert!(s.ends_with("- [ ] Primera\n- [ ] Segunda | | Trabajo\n"));
    }

    #[test]
    fn blank_title_is_rejected() {
        let (list, _tmp) = mk_task_list();
        assert!(list.create_task(entry("   ", None, None)).is_err());
        assert!(!pending_tasks_file(&list.tasks_dir).exists());
    }

    #[test]
    fn missing_files_read_as_empty() {
        let (list, _tmp) = mk_task_list();
        let res = list.read_tasks(&ReadTaskOptions::default());
        assert!(res.tasks.is_empty());
        assert!(res.errors.is_empty());
        assert!(list.read_completed().tasks.is_empty());
    }

    #[test]
    fn read_filters_by_folder_search_and_date() {
        let (list, _tmp) = mk_task_list();
        list.create_task(entry("Informe mensual", Some(date(2024, 6, 12)), Some("Trabajo")))
            .unwrap();
        list.create_task(entry("Comprar pan", Some(date(2024, 6, 10)), Some("Personal")))
            .unwrap();
        list.create_task(entry("Llamar a mamá", None, Some("Personal"))).unwrap();

        let by_folder = ReadTaskOptions {
            folder: Some("Personal"),
            ..Default::default()
        };
        assert_eq!(titles(&list, &by_folder), vec!["Comprar pan", "Llamar a mamá"]);

        let by_search = ReadTaskOptions {
            search: Some("INFORME"),
            ..Default::default()
        };
        assert_eq!(titles(&list, &by_search), vec!["Informe mensual"]);

        let by_range = ReadTaskOptions {
            due_date: Some(DateFilter::Range(date(2024, 6, 11), date(2024, 6, 30))),
            ..Default::default()
        };
        assert_eq!(titles(&list, &by_range), vec!["Informe mensual"]);

        let due = list.tasks_due_on(date(2024, 6, 10));
        assert_eq!(due.tasks.len(), 1);
        assert_eq!(due.tasks[0].title, "Comprar pan");
        assert_eq!(due.tasks[0].position, 2);
    }

    #[test]
    fn read_sorts() {
        let (list, _tmp) = mk_task_list();
        list.create_task(entry("beta", None, None)).unwrap();
        list.create_task(entry("Alfa", Some(date(2024, 6, 20)), None)).unwrap();
        list.create_task(entry("gamma", Some(date(2024, 6, 15)), None)).unwrap();

        let manual = ReadTaskOptions::default();
        assert_eq!(titles(&list, &manual), vec!["beta", "Alfa", "gamma"]);

        let alpha = ReadTaskOptions {
            sort: SortMode::Alphabetical,
            ..Default::default()
        };
        assert_eq!(titles(&list, &alpha), vec!["Alfa", "beta", "gamma"]);

        let by_date = ReadTaskOptions {
            sort: SortMode::DueDate,
            ..Default::default()
        };
        assert_eq!(titles(&list, &by_date), vec!["gamma", "Alfa", "beta"]);
    }

    #[test]
    fn complete_and_reopen_move_between_lists() {
        let (list, _tmp) = mk_task_list();
        list.create_task(entry("Uno", None, None)).unwrap();
        list.create_task(entry("Dos", Some(date(2024, 6, 10)), Some("Trabajo"))).unwrap();

        let done = list.complete_task(2, date(2024, 6, 11)).unwrap();
        assert_eq!(done.status, TaskStatus::Done);
        assert_eq!(done.done_date, Some(date(2024, 6, 11)));
        assert_eq!(done.position, 1);
        assert_eq!(done.path, completed_tasks_file(&list.tasks_dir));

        let s = fs::read_to_string(completed_tasks_file(&list.tasks_dir)).unwrap();
        assert_eq!(
            s,
            "# Tareas completadas\n\n- [x] Dos | 2024-06-10 | Trabajo | 2024-06-11\n"
        );
        assert_eq!(titles(&list, &ReadTaskOptions::default()), vec!["Uno"]);

        let reopened = list.reopen_task(1).unwrap();
        assert_eq!(reopened.status, TaskStatus::Pending);
        assert_eq!(reopened.due_date, None);
        assert_eq!(reopened.folder.as_deref(), Some("Trabajo"));
        assert_eq!(reopened.position, 2);
        assert!(list.read_completed().tasks.is_empty());
        assert_eq!(titles(&list, &ReadTaskOptions::default()), vec!["Uno", "Dos"]);
    }

    #[test]
    fn out_of_range_positions_fail() {
        let (list, _tmp) = mk_task_list();
        list.create_task(entry("Uno", None, None)).unwrap();

        let err = list.complete_task(2, date(2024, 6, 10)).unwrap_err();
        assert_eq!(err.to_string(), "No pending task #2");
        assert!(list.delete_task(0).is_err());
        let err = list.reopen_task(1).unwrap_err();
        assert_eq!(err.to_string(), "No completed task #1");
        assert!(list.edit_completed_title(1, "x").is_err());
    }

    #[test]
    fn edit_replaces_fields() {
        let (list, _tmp) = mk_task_list();
        list.create_task(entry("Uno", Some(date(2024, 6, 10)), Some("Trabajo"))).unwrap();

        let edited = list
            .edit_task(1, entry("Uno | revisado", None, Some("Personal")))
            .unwrap();
        assert_eq!(edited.title, "Uno / revisado");
        assert_eq!(edited.due_date, None);

        let tasks = list.read_tasks(&ReadTaskOptions::default()).tasks;
        assert_eq!(tasks[0].title, "Uno / revisado");
        assert_eq!(tasks[0].folder.as_deref(), Some("Personal"));
        assert!(list.edit_task(1, entry(" ", None, None)).is_err());
    }

    #[test]
    fn rename_and_delete_completed() {
        let (list, _tmp) = mk_task_list();
        list.create_task(entry("Uno", None, None)).unwrap();
        list.create_task(entry("Dos", None, None)).unwrap();
        list.complete_task(1, date(2024, 6, 10)).unwrap();
        list.complete_task(1, date(2024, 6, 11)).unwrap();

        let renamed = list.edit_completed_title(2, "Dos bis").unwrap();
        assert_eq!(renamed.done_date, Some(date(2024, 6, 11)));

        let deleted = list.delete_completed(1).unwrap();
        assert_eq!(deleted.title, "Uno");
        let completed = list.read_completed().tasks;
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "Dos bis");
        assert_eq!(completed[0].position, 1);
    }

    #[test]
    fn delete_pending() {
        let (list, _tmp) = mk_task_list();
        list.create_task(entry("Uno", None, None)).unwrap();
        list.create_task(entry("Dos", None, None)).unwrap();

        let deleted = list.delete_task(1).unwrap();
        assert_eq!(deleted.title, "Uno");
        let tasks = list.read_tasks(&ReadTaskOptions::default()).tasks;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].position, 1);
    }

    #[test]
    fn move_reorders_like_an_array_move() {
        let (list, _tmp) = mk_task_list();
        for t in ["A", "B", "C", "D"] {
            list.create_task(entry(t, None, None)).unwrap();
        }

        let order = list.move_task(1, 3).unwrap();
        let got: Vec<_> = order.iter().map(|t| (t.position, t.title.as_str())).collect();
        assert_eq!(got, vec![(1, "B"), (2, "C"), (3, "A"), (4, "D")]);
        assert_eq!(titles(&list, &ReadTaskOptions::default()), vec!["B", "C", "A", "D"]);

        list.move_task(4, 1).unwrap();
        assert_eq!(titles(&list, &ReadTaskOptions::default()), vec!["D", "B", "C", "A"]);

        assert!(list.move_task(1, 5).is_err());
        assert!(list.move_task(5, 1).is_err());
    }

    #[test]
    fn malformed_lines_are_reported_not_fatal() {
        let (list, _tmp) = mk_task_list();
        let path = pending_tasks_file(&list.tasks_dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "# Tareas pendientes\n- [ ] Uno | 10/06/2024\n- [ ] Dos\n").unwrap();

        let res = list.read_tasks(&ReadTaskOptions::default());
        assert_eq!(res.tasks.len(), 2);
        assert_eq!(res.tasks[0].due_date, None);
        assert_eq!(res.errors.len(), 1);
    }

    fn write_pending(list: &TaskList, content: &str) -> std::path::PathBuf {
        let path = pending_tasks_file(&list.tasks_dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn empty_file_gets_a_header_before_the_first_task() {
        let (list, _tmp) = mk_task_list();
        let path = write_pending(&list, "");

        let task = list.create_task(entry("Uno", None, None)).unwrap();
        assert_eq!(task.position, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Tareas pendientes\n\n- [ ] Uno\n"
        );
        let res = list.read_tasks(&ReadTaskOptions::default());
        assert_eq!(res.tasks.len(), 1);
        assert!(res.errors.is_empty());
    }

    #[test]
    fn headerless_file_keeps_its_tasks_when_appending() {
        let (list, _tmp) = mk_task_list();
        let path = write_pending(&list, "- [ ] Uno\n");

        let task = list.create_task(entry("Dos", None, None)).unwrap();
        assert_eq!(task.position, 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Tareas pendientes\n\n- [ ] Uno\n- [ ] Dos\n"
        );
    }

    #[test]
    fn append_after_a_last_line_without_newline() {
        let (list, _tmp) = mk_task_list();
        let path = write_pending(&list, "# Tareas pendientes\n\n- [ ] Uno");

        list.create_task(entry("Dos", None, None)).unwrap();
        assert_eq!(titles(&list, &ReadTaskOptions::default()), vec!["Uno", "Dos"]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Tareas pendientes\n\n- [ ] Uno\n- [ ] Dos\n"
        );
    }

    #[test]
    fn notes_survive_rewrites() {
        let (list, _tmp) = mk_task_list();
        let path = write_pending(
            &list,
            "# Tareas pendientes\n\nNotas: llamar antes de las 10\n- [ ] Uno\n- [ ] Dos\n",
        );

        list.complete_task(1, date(2024, 6, 10)).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Tareas pendientes\n\nNotas: llamar antes de las 10\n- [ ] Dos\n"
        );

        list.create_task(entry("Tres", None, None)).unwrap();
        list.move_task(2, 1).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Tareas pendientes\n\nNotas: llamar antes de las 10\n- [ ] Tres\n- [ ] Dos\n"
        );
    }

    #[test]
    fn unreadable_task_lines_are_not_dropped_on_rewrite() {
        let (list, _tmp) = mk_task_list();
        let path = write_pending(&list, "# Tareas pendientes\n- [ ]  | 2024-06-10\n- [ ] Uno\n");

        list.edit_task(1, entry("Uno bis", None, None)).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Tareas pendientes\n- [ ]  | 2024-06-10\n- [ ] Uno bis\n"
        );
    }

    #[test]
    fn subscribers_see_each_change() {
        let (list, _tmp) = mk_task_list();
        let sub = list.subscribe();

        list.create_task(entry("Uno", None, None)).unwrap();
        let first = sub.try_recv().unwrap();
        assert_eq!(first.pending.len(), 1);
        assert!(first.completed.is_empty());

        list.complete_task(1, date(2024, 6, 10)).unwrap();
        let second = sub.latest().unwrap();
        assert!(second.pending.is_empty());
        assert_eq!(second.completed[0].title, "Uno");

        assert!(list.delete_task(1).is_err());
        assert!(sub.try_recv().is_none());

        sub.unsubscribe();
        list.create_task(entry("Dos", None, None)).unwrap();
    }

    #[test]
    fn dropping_the_list_closes_subscriptions() {
        let (list, _tmp) = mk_task_list();
        let sub = list.subscribe();
        drop(list);
        assert!(sub.recv().is_none());
    }
}
