use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use tdo_core::{
    DateFilter, QueryError, Tdo,
    tasks::{ReadTaskOptions, TaskQueryResult},
};

pub fn read_mode(cli: &Cli, renderer: &Renderer, tdo: &Tdo) -> Result<CliModeResult> {
    // A lone `--folder` lists that folder.
    let folder_only = cli.folder.is_some() && cli.text.is_empty();
    if !(cli.list
        || cli.completed
        || cli.count
        || cli.on.is_some()
        || cli.from.is_some()
        || cli.search.is_some()
        || folder_only)
    {
        return Ok(CliModeResult::NothingToDo);
    }

    let due_date = date_filter(cli, tdo)?;

    let result = if cli.completed {
        let mut result = tdo.tasks.read_completed();
        filter_completed(cli, &mut result, due_date);
        result
    } else {
        let options = ReadTaskOptions {
            folder: cli.folder.as_deref(),
            search: cli.search.as_deref(),
            due_date,
            sort: cli.sort,
        };
        tdo.tasks.read_tasks(&options)
    };

    if cli.count {
        renderer.print_info(&format!("{} tasks found.", result.tasks.len()));
        if !result.errors.is_empty() {
            print_errors(renderer, result.errors);
        }
    } else {
        print_tasks(renderer, result);
    }
    Ok(CliModeResult::Finish)
}

fn date_filter(cli: &Cli, tdo: &Tdo) -> Result<Option<DateFilter>> {
    let parse = |input: &str| {
        tdo.parse_date(input)
            .ok_or_else(|| anyhow!("Could not understand the date `{input}`"))
    };

    if let Some(on) = &cli.on {
        return Ok(Some(DateFilter::Single(parse(on)?)));
    }
    match (&cli.from, &cli.to) {
        (Some(from), Some(to)) => {
            let (start, end) = (parse(from)?, parse(to)?);
            Ok(Some(DateFilter::Range(start.min(end), start.max(end))))
        }
        (Some(from), None) => Ok(Some(DateFilter::Range(parse(from)?, NaiveDate::MAX))),
        _ => Ok(None),
    }
}

/// The completed list is filtered by completion date.
fn filter_completed(cli: &Cli, result: &mut TaskQueryResult, due_date: Option<DateFilter>) {
    if let Some(folder) = cli.folder.as_deref() {
        result.tasks.retain(|t| t.folder.as_deref() == Some(folder));
    }
    if let Some(search) = cli.search.as_deref() {
        let needle = search.to_lowercase();
        result
            .tasks
            .retain(|t| t.title.to_lowercase().contains(&needle));
    }
    if let Some(filter) = due_date {
        result
            .tasks
            .retain(|t| t.done_date.is_some_and(|d| filter.contains(d)));
    }
}

fn print_tasks(renderer: &Renderer, result: TaskQueryResult) {
    if result.tasks.is_empty() {
        renderer.print_info("No tasks found");
    } else {
        renderer.print_info(&format!("{} tasks found.", result.tasks.len()));
        renderer.print_tasks(&result);
    }
    if !result.errors.is_empty() {
        print_errors(renderer, result.errors);
    }
}

pub(crate) fn print_errors(renderer: &Renderer, errors: Vec<QueryError>) {
    renderer.print_md("\n# Errors:");
    for error in errors {
        match error {
            QueryError::FileError { path, error } => {
                let message = format!("* Could not process '{}': {}", path.display(), error);
                renderer.print_md(&message);
            }
            QueryError::InvalidDate { input, error } => {
                let message = format!("* Could not process '{}': {}", input, error);
                renderer.print_md(&message);
            }
        }
    }
}
