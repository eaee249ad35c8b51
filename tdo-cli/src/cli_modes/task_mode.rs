use super::{CliModeResult, write_mode::build_entry};
use crate::{Cli, render::Renderer};
use anyhow::{Result, bail};
use tdo_core::{Tdo, tasks::TaskQueryResult};

/// Actions on an existing task, addressed by its number in the list.
pub fn task_mode(cli: &Cli, renderer: &Renderer, tdo: &Tdo) -> Result<CliModeResult> {
    let today = tdo.config.reference_date;

    if let Some(n) = cli.done {
        let task = tdo.tasks.complete_task(n, today)?;
        renderer.print_info("Task completed");
        renderer.print_task_line(&task);
    } else if let Some(n) = cli.reopen {
        let task = tdo.tasks.reopen_task(n)?;
        renderer.print_info("Task reopened");
        renderer.print_task_line(&task);
    } else if let Some(n) = cli.delete {
        let task = tdo.tasks.delete_task(n)?;
        renderer.print_info(&format!("Deleted `{}`", task.title));
    } else if let Some(n) = cli.delete_completed {
        let task = tdo.tasks.delete_completed(n)?;
        renderer.print_info(&format!("Deleted `{}`", task.title));
    } else if let Some(positions) = &cli.move_task {
        let [from, to] = positions.as_slice() else {
            bail!("--move needs two positions: FROM TO");
        };
        let tasks = tdo.tasks.move_task(*from, *to)?;
        renderer.print_info(&format!("Moved task #{from} to #{to}"));
        renderer.print_tasks(&TaskQueryResult {
            tasks,
            errors: Vec::new(),
        });
    } else if let Some(n) = cli.update {
        let entry = build_entry(cli, tdo, &cli.text.join(" "))?;
        if let Some(folder) = entry.folder.as_deref() {
            tdo.folders.add(folder)?;
        }
        let task = tdo.tasks.edit_task(n, entry)?;
        renderer.print_info("Task updated");
        renderer.print_task_line(&task);
    } else if let Some(n) = cli.rename_completed {
        let task = tdo.tasks.edit_completed_title(n, &cli.text.join(" "))?;
        renderer.print_info("Task renamed");
        renderer.print_task_line(&task);
    } else {
        return Ok(CliModeResult::NothingToDo);
    }

    Ok(CliModeResult::Finish)
}
