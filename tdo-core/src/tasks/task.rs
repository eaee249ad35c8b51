use crate::parse_input::{DateFilter, ParsedUtterance};
use chrono::NaiveDate;
use std::path::PathBuf;
use strum_macros::{AsRefStr, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// 1-based place of the task in its list (manual order).
    pub position: usize,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub folder: Option<String>,
    pub done_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub path: PathBuf,
}

/// Properties to create or replace a task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskWriteEntry {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub folder: Option<String>,
}

impl From<ParsedUtterance> for TaskWriteEntry {
    fn from(parsed: ParsedUtterance) -> Self {
        Self {
            title: parsed.title,
            due_date: parsed.due_date,
            folder: parsed.folder,
        }
    }
}

/// Represents a non-critical issue that occurred during a query.
///
/// This is used to report problems (e.g., malformed lines, invalid input)
/// without stopping a larger query operation.
#[derive(Debug)]
pub enum QueryError {
    InvalidDate { input: String, error: String },
    FileError { path: PathBuf, error: anyhow::Error },
}

/// The complete result of a query.
/// Contains successfully parsed tasks and any errors.
#[derive(Debug)]
pub struct TaskQueryResult {
    pub tasks: Vec<Task>,
    pub errors: Vec<QueryError>,
}

/// How `read_tasks` orders its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, AsRefStr)]
pub enum SortMode {
    /// The order the user arranged (file order).
    #[default]
    #[strum(serialize = "manual")]
    Manual,
    #[strum(serialize = "alpha", serialize = "alfabetico")]
    Alphabetical,
    /// Dated tasks first, earliest due first.
    #[strum(serialize = "date", serialize = "fecha")]
    DueDate,
}

#[derive(Clone, Debug, Default)]
pub struct ReadTaskOptions<'a> {
    pub folder: Option<&'a str>,
    /// Case-insensitive substring of the title.
    pub search: Option<&'a str>,
    pub due_date: Option<DateFilter>,
    pub sort: SortMode,
}

#[derive(Debug)]
pub(crate) struct ParsedTaskLine {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub folder: Option<String>,
    pub done_date: Option<NaiveDate>,
    pub status: TaskStatus,
}

/// One line of a task file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FileLine {
    /// Written back as-is: the header, blank lines, notes, unreadable task lines.
    Text(String),
    /// The slot of the next parsed task.
    Task,
}

#[derive(Debug)]
pub(crate) struct ReadTasksResult {
    pub entries: Vec<ParsedTaskLine>,
    pub errors: Vec<String>,
    pub layout: Vec<FileLine>,
    pub has_header: bool,
}
