pub mod categorize;
pub mod config;
pub mod folders;
pub mod keywords;
pub mod parse_input;
pub mod suggest;
pub mod tasks;
mod tdo;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use folders::Folders;
pub use parse_input::{DateFilter, ParsedUtterance, parse_utterance};
pub use tasks::{QueryError, Task, TaskList, TaskStatus};
pub use tdo::Tdo;
