use super::{
    CliModeResult,
    editor_utils::{open_file_in_editor, resolve_editor},
};
use crate::{Cli, render::Renderer};
use anyhow::Result;
use tdo_core::{Tdo, tasks::pending_tasks_file};

/// Opens `tareas.md` for hand editing.
pub fn edit_mode(cli: &Cli, renderer: &Renderer, tdo: &Tdo) -> Result<CliModeResult> {
    if !cli.edit {
        return Ok(CliModeResult::NothingToDo);
    }

    let path = pending_tasks_file(&tdo.config.tasks_dir);
    if !path.exists() {
        renderer.print_info("No tasks yet, nothing to edit.");
        return Ok(CliModeResult::Finish);
    }
    let editor = resolve_editor(&tdo.config.editor);
    open_file_in_editor(&editor, &path)?;
    renderer.print_info(&format!("Edited file {}", path.display()));
    Ok(CliModeResult::Finish)
}
