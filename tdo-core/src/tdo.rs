use crate::{
    Config,
    categorize::categorize,
    folders::Folders,
    parse_input::{DateFilter, ParsedUtterance, parse_date_token, parse_utterance_with},
    suggest::suggest_tasks,
    tasks::{ReadTaskOptions, Task, TaskList, TaskWriteEntry},
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;

pub struct Tdo {
    pub config: Config,
    pub tasks: TaskList,
    pub folders: Folders,
}

impl Tdo {
    /// Creates a new `Tdo` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Tdo` instance with a specific `Config`.
    ///
    /// This also ensures that the tasks directory exists.
    pub fn with_config(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.tasks_dir)
            .with_context(|| format!("creating tasks dir {}", config.tasks_dir.display()))?;

        let tasks = TaskList::new(config.tasks_dir.clone());
        let folders = Folders::new(config.tasks_dir.clone(), config.default_folders.clone());
        Ok(Self {
            config,
            tasks,
            folders,
        })
    }

    /// Parses a spoken or typed task, using the configured vocabulary, the current
    /// folders and the reference date.
    pub fn parse_user_input(&self, input: &str) -> ParsedUtterance {
        parse_utterance_with(
            input,
            &self.folders.list(),
            self.config.reference_date,
            &self.config.keywords,
        )
    }

    /// Parses a single date as typed in a flag (`hoy`, `viernes`, `2024-06-10`, ...).
    pub fn parse_date(&self, token: &str) -> Option<NaiveDate> {
        let format_strs: Vec<&str> = self
            .config
            .input_date_formats
            .iter()
            .map(AsRef::as_ref)
            .collect();
        parse_date_token(
            token,
            self.config.reference_date,
            &self.config.keywords,
            &format_strs,
        )
    }

    /// A single day, or an inclusive range when `end_date` is given.
    /// `None` when any of the dates cannot be parsed.
    pub fn parse_dates(&self, start_date: &str, end_date: Option<&str>) -> Option<DateFilter> {
        let start = self.parse_date(start_date)?;
        match end_date {
            None => Some(DateFilter::Single(start)),
            Some(end) => {
                let end = self.parse_date(end)?;
                Some(DateFilter::Range(start.min(end), start.max(end)))
            }
        }
    }

    /// The folder the categorizer would file `title` under, if any.
    pub fn suggest_folder(&self, title: &str) -> Option<String> {
        categorize(title, &self.config.categories)
    }

    /// Tasks worth adding again, based on the completed list.
    pub fn suggestions(&self) -> Vec<String> {
        let completed = self.tasks.read_completed().tasks;
        let pending = self.tasks.read_tasks(&ReadTaskOptions::default()).tasks;
        suggest_tasks(&completed, &pending, self.config.reference_date)
    }

    /// Saves a new pending task, creating its folder first when it does not exist yet.
    pub fn add_task(&self, entry: TaskWriteEntry) -> Result<Task> {
        if let Some(folder) = entry.folder.as_deref() {
            self.folders.add(folder)?;
        }
        self.tasks.create_task(entry)
    }
}
