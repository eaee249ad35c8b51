use clap::{ArgGroup, Parser};
use tdo_core::tasks::SortMode;

use crate::render::ColorMode;

/// tdo: a Markdown task list you can talk to
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("task_action")
        .args(["done", "reopen", "delete", "delete_completed", "move_task", "update", "rename_completed"])),
    group(ArgGroup::new("read_mode")
        .args(["list", "completed", "on", "from", "search", "count"])
        .multiple(true)
        .conflicts_with("task_action")),
)]
pub struct Cli {
    /// Prints the tasks directory
    #[arg(long, short, exclusive = true)]
    pub path: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Only shows one line per task.
    #[arg(long, short, env = "TDO_SHORT")]
    pub short: bool,

    /// Lists the pending tasks.
    #[arg(long, short)]
    pub list: bool,
    /// Lists the completed tasks instead.
    #[arg(long)]
    pub completed: bool,
    /// Tasks due on a date (e.g., `tdo --on mañana`, `tdo --on 2024-06-14`).
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub on: Option<String>,
    /// Tasks due from this date on (e.g., `tdo --from hoy`).
    #[arg(long)]
    pub from: Option<String>,
    /// End of the `--from` range, inclusive.
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Tasks whose title contains this text.
    #[arg(long)]
    pub search: Option<String>,
    /// Order of the listed tasks: `manual`, `alpha` or `date`.
    #[arg(long, default_value = "manual")]
    pub sort: SortMode,
    /// Prints the count of found tasks.
    #[arg(long)]
    pub count: bool,

    /// Folder for the new task, or to filter the list by.
    #[arg(long, short)]
    pub folder: Option<String>,
    /// Due date for the new task, overriding the one in the text (e.g., `--due viernes`).
    #[arg(long, short)]
    pub due: Option<String>,
    /// Shows how the text would be understood without saving anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Marks pending task N as done.
    #[arg(long, value_name = "N")]
    pub done: Option<usize>,
    /// Moves completed task N back to the pending list.
    #[arg(long, value_name = "N")]
    pub reopen: Option<usize>,
    /// Deletes pending task N.
    #[arg(long, value_name = "N")]
    pub delete: Option<usize>,
    /// Deletes completed task N.
    #[arg(long, value_name = "N")]
    pub delete_completed: Option<usize>,
    /// Moves pending task FROM to position TO.
    #[arg(long = "move", num_args = 2, value_names = ["FROM", "TO"])]
    pub move_task: Option<Vec<usize>>,
    /// Replaces pending task N with the given text (e.g., `tdo --update 2 Llamar a Ana el lunes`).
    #[arg(long, value_name = "N", requires = "text")]
    pub update: Option<usize>,
    /// Renames completed task N with the given text.
    #[arg(long, value_name = "N", requires = "text")]
    pub rename_completed: Option<usize>,

    /// Lists all folders.
    #[arg(long, conflicts_with_all = ["read_mode", "task_action"])]
    pub folders: bool,
    /// Creates a folder.
    #[arg(long, value_name = "NAME", conflicts_with_all = ["read_mode", "task_action"])]
    pub new_folder: Option<String>,
    /// Suggests tasks based on what you completed recently.
    #[arg(long, conflicts_with_all = ["read_mode", "task_action"])]
    pub suggest: bool,
    /// Opens the pending tasks file in your $EDITOR.
    #[arg(long, short, conflicts_with_all = ["read_mode", "task_action"])]
    pub edit: bool,

    /// Free text for a new task (e.g., `tdo Comprar leche mañana en la carpeta Personal`).
    #[arg()]
    pub text: Vec<String>,
}
