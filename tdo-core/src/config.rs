use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};
use tracing::debug;

use crate::categorize::{CategoryRule, default_rules};
use crate::keywords::Keywords;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute directory where the task files live.
    pub tasks_dir: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Display format for due dates. Files always use `YYYY-MM-DD`.
    pub date_format: String,
    /// Extra formats accepted by date filters (`--on`, `--from`, `--to`).
    pub input_date_formats: Vec<String>,
    /// Folders that always exist, even with no custom folder created.
    pub default_folders: Vec<String>,
    /// Keyword table used to suggest a folder for a new task.
    pub categories: Vec<CategoryRule>,
    /// Spoken vocabulary, including the user's `[synonyms]`.
    pub keywords: Keywords,
    /// The date to use as "today" for relative expressions.
    pub reference_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    tasks_dir: Option<PathBuf>,
    editor: Option<String>,
    date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
    default_folders: Option<Vec<String>>,
    /// Optional table:
    /// [synonyms]
    /// miercoles = "miércoles"
    /// finde = "sábado"
    synonyms: Option<HashMap<String, String>>,
    /// Optional array of tables replacing the built-in categories:
    /// [[categories]]
    /// folder = "Jardín"
    /// keywords = ["regar", "podar"]
    categories: Option<Vec<CategoryRule>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let date_format = file_config
            .date_format
            .unwrap_or_else(|| "%a, %d %b %Y".to_string());

        let tasks_dir = file_config.tasks_dir.unwrap_or_else(Self::default_tasks_dir);

        let default_folders = file_config
            .default_folders
            .unwrap_or_else(Self::default_folders);

        let categories = file_config.categories.unwrap_or_else(default_rules);

        let mut keywords = Keywords::default();
        Self::load_synonyms(&mut keywords, &file_config.synonyms);

        Self {
            tasks_dir,
            editor: file_config.editor,
            date_format,
            input_date_formats: file_config.input_date_formats.unwrap_or_default(),
            default_folders,
            categories,
            keywords,
            reference_date: Local::now().date_naive(),
        }
    }

    fn default_folders() -> Vec<String> {
        ["Trabajo", "Personal", "Otros"]
            .iter()
            .map(|f| f.to_string())
            .collect()
    }

    /// Default tasks root: `{data_dir}/tdo`
    /// - macOS:   `~/Library/Application Support/tdo`
    /// - Linux:   `$XDG_DATA_HOME/tdo` or `~/.local/share/tdo`
    /// - Windows: `%APPDATA%\tdo`
    fn default_tasks_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("tdo");
            p
        } else {
            PathBuf::from("./tdo")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("tdo").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("tdo").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "reading config");
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the keyword registry.
    /// Synonyms that collide with a canonical keyword (eg. "hoy") are dropped by [`Keywords::extend`].
    /// Pairs are applied in alias order so chained synonyms resolve the same way every run.
    fn load_synonyms(keywords: &mut Keywords, synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let mut pairs: Vec<(String, String)> = map
                    .iter()
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();
                pairs.sort();

                if !pairs.is_empty() {
                    keywords.extend(&pairs);
                }
            }
            _ => {}
        }
    }
}
