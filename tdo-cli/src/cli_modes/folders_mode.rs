use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use tdo_core::Tdo;

/// `--folders` and `--new-folder`.
pub fn folders_mode(cli: &Cli, renderer: &Renderer, tdo: &Tdo) -> Result<CliModeResult> {
    if let Some(name) = &cli.new_folder {
        if tdo.folders.add(name)? {
            renderer.print_info(&format!("Created folder `{}`", name.trim()));
        } else {
            renderer.print_info(&format!("Folder `{}` already exists", name.trim()));
        }
        return Ok(CliModeResult::Finish);
    }

    if cli.folders {
        let folders = tdo.folders.list();
        renderer.print_info(&format!("{} folders.", folders.len()));
        renderer.print_folders(&folders);
        return Ok(CliModeResult::Finish);
    }

    Ok(CliModeResult::NothingToDo)
}

pub fn suggest_mode(cli: &Cli, renderer: &Renderer, tdo: &Tdo) -> Result<CliModeResult> {
    if !cli.suggest {
        return Ok(CliModeResult::NothingToDo);
    }

    let suggestions = tdo.suggestions();
    if suggestions.is_empty() {
        renderer.print_info("No suggestions yet. Complete a few tasks first.");
    } else {
        renderer.print_info("You may want to add:");
        renderer.print_suggestions(&suggestions);
    }
    Ok(CliModeResult::Finish)
}
