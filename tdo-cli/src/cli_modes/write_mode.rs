use super::{
    CliModeResult,
    editor_utils::{create_editor_buffer, resolve_editor},
};
use crate::{Cli, render::Renderer};
use anyhow::{Result, anyhow};
use tdo_core::{ParsedUtterance, Tdo, tasks::TaskWriteEntry};

/// Adds a task from the free text, or from the editor when no text was given.
pub fn write_mode(cli: &Cli, renderer: &Renderer, tdo: &Tdo) -> Result<CliModeResult> {
    let input = if !cli.text.is_empty() {
        cli.text.join(" ")
    } else {
        let editor = resolve_editor(&tdo.config.editor);
        let buffer = create_editor_buffer(&editor)?;
        let trimmed = buffer.split_whitespace().collect::<Vec<_>>().join(" ");
        if trimmed.is_empty() {
            renderer.print_info("No task to save, because no text was received.");
            return Ok(CliModeResult::Finish);
        }
        trimmed
    };

    let entry = build_entry(cli, tdo, &input)?;

    if cli.dry_run {
        renderer.print_parsed(&ParsedUtterance {
            title: entry.title,
            due_date: entry.due_date,
            folder: entry.folder,
        });
        return Ok(CliModeResult::Finish);
    }

    let hint = match entry.folder {
        Some(_) => None,
        None => tdo.suggest_folder(&entry.title),
    };
    let task = tdo.add_task(entry)?;
    renderer.print_info(&format!("Added task #{} to {}", task.position, task.path.display()));
    renderer.print_task_line(&task);
    if let Some(folder) = hint {
        renderer.print_info(&format!("Hint: this looks like a task for `{folder}`."));
    }
    Ok(CliModeResult::Finish)
}

/// Parses `input` and applies the `--folder` / `--due` overrides.
pub(crate) fn build_entry(cli: &Cli, tdo: &Tdo, input: &str) -> Result<TaskWriteEntry> {
    let mut entry = TaskWriteEntry::from(tdo.parse_user_input(input));

    if let Some(folder) = &cli.folder {
        // Reuse the existing spelling when the folder is already known.
        let canonical = tdo
            .folders
            .list()
            .into_iter()
            .find(|f| f.to_lowercase() == folder.trim().to_lowercase());
        entry.folder = Some(canonical.unwrap_or_else(|| folder.trim().to_string()));
    }
    if let Some(due) = &cli.due {
        let date = tdo
            .parse_date(due)
            .ok_or_else(|| anyhow!("Could not understand the date `{due}`"))?;
        entry.due_date = Some(date);
    }
    if entry.title.is_empty() {
        return Err(anyhow!("Nothing left for a title in `{input}`"));
    }
    Ok(entry)
}
