use super::{
    TaskStatus,
    format_utils::parse_date,
    task::{FileLine, ParsedTaskLine, ReadTasksResult},
};

/// Parses the content of a task file.
/// - The first line should be a `#` header; a missing header is reported.
/// - Every `- [ ] ...` / `- [x] ...` line is one task. Any other line is not a task
///   but keeps its place in [`ReadTasksResult::layout`] so rewrites leave it alone.
/// - Fields are separated by `|`: title, due date, folder and done date.
///
/// Lines with a bad date are still returned (without that date) and reported in `errors`.
pub fn parse_task_file_content(content: &str) -> ReadTasksResult {
    let mut entries = Vec::new();
    let mut errors = Vec::new();
    let mut layout = Vec::new();
    let mut lines = content.lines().peekable();

    let has_header = match lines.peek().copied() {
        Some(h) if h.trim_start().starts_with('#') => {
            layout.push(FileLine::Text(h.to_string()));
            lines.next();
            true
        }
        Some(other) => {
            errors.push(format!(
                "First line must be a header like `# ...`, got `{other}`."
            ));
            false
        }
        None => false,
    };

    for line in lines {
        let trimmed = line.trim_start();
        let (status, rest) = if let Some(rest) = trimmed.strip_prefix("- [ ]") {
            (TaskStatus::Pending, rest)
        } else if let Some(rest) = trimmed
            .strip_prefix("- [x]")
            .or_else(|| trimmed.strip_prefix("- [X]"))
        {
            (TaskStatus::Done, rest)
        } else {
            layout.push(FileLine::Text(line.to_string()));
            continue;
        };

        let mut parts = rest.split('|').map(str::trim);
        let title = parts.next().unwrap_or("").to_string();
        if title.is_empty() {
            errors.push(format!("In `{line}`: missing title."));
            layout.push(FileLine::Text(line.to_string()));
            continue;
        }
        let due_str = parts.next().unwrap_or("");
        let folder = parts
            .next()
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        let done_str = parts.next().unwrap_or("");

        let due_date = parse_date(due_str).unwrap_or_else(|e| {
            errors.push(format!("In `{line}`: {e}"));
            None
        });
        let done_date = parse_date(done_str).unwrap_or_else(|e| {
            errors.push(format!("In `{line}`: {e}"));
            None
        });

        layout.push(FileLine::Task);
        entries.push(ParsedTaskLine {
            title,
            due_date,
            folder,
            done_date,
            status,
        });
    }

    ReadTasksResult {
        entries,
        errors,
        layout,
        has_header,
    }
}
