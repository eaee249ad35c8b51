use crate::Config;
use crate::categorize::default_rules;
use crate::keywords::Keywords;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(tmp_dir: PathBuf, reference_date: Option<NaiveDate>) -> Config {
    Config {
        tasks_dir: tmp_dir,
        editor: None,
        date_format: "%a, %d %b %Y".to_string(),
        input_date_formats: ["%d-%m-%Y".to_string()].to_vec(),
        default_folders: ["Trabajo", "Personal", "Otros"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        categories: default_rules(),
        keywords: Keywords::default(),
        reference_date: reference_date.unwrap_or(Local::now().date_naive()),
    }
}
