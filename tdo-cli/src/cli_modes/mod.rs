mod cli_mode;
mod edit_mode;
mod editor_utils;
mod folders_mode;
mod read_mode;
mod task_mode;
mod use_color;
mod write_mode;

pub use cli_mode::CliModeResult;
pub use edit_mode::edit_mode;
pub use folders_mode::{folders_mode, suggest_mode};
pub use read_mode::read_mode;
pub use task_mode::task_mode;
pub use use_color::use_color;
pub use write_mode::write_mode;
