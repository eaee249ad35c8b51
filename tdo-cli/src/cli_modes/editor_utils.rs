use anyhow::{Context, Result, bail};
use std::{fs, path::Path, process::Command};

/// Configured editor, then `$VISUAL`, then `$EDITOR`, then `vim`.
pub fn resolve_editor(editor: &Option<String>) -> String {
    editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Opens an empty scratch file and returns what was written in it.
pub fn create_editor_buffer(editor_cmd: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("tdo")
        .suffix(".md")
        .tempfile()
        .context("creating editor buffer")?;

    let path = file.path().to_path_buf();
    open_file_in_editor(editor_cmd, &path)?;
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

pub fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor_cmd)
        .arg(path)
        .status()
        .with_context(|| format!("launching editor `{editor_cmd}`"))?;
    if !status.success() {
        bail!("Editor exited with status {}", status);
    }
    Ok(())
}
