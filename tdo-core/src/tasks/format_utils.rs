use chrono::NaiveDate;

use super::TaskStatus;

/// Date format used inside task files.
pub const TASK_DATE_FORMAT: &str = "%Y-%m-%d";

pub const PENDING_HEADER: &str = "# Tareas pendientes";
pub const COMPLETED_HEADER: &str = "# Tareas completadas";

/// `- [ ] Title | due | folder | done`, with trailing empty fields left out.
pub fn format_task_line(
    title: &str,
    due_date: Option<NaiveDate>,
    folder: Option<&str>,
    done_date: Option<NaiveDate>,
    status: TaskStatus,
) -> String {
    let mark = match status {
        TaskStatus::Pending => "- [ ]",
        TaskStatus::Done => "- [x]",
    };
    let mut fields = vec![
        sanitize(title),
        due_date
            .map(|d| d.format(TASK_DATE_FORMAT).to_string())
            .unwrap_or_default(),
        folder.map(sanitize).unwrap_or_default(),
        done_date
            .map(|d| d.format(TASK_DATE_FORMAT).to_string())
            .unwrap_or_default(),
    ];
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    let line = fields.join(" | ");
    format!("{mark} {}\n", line.trim_end())
}

/// `|` separates fields, so it cannot appear inside one.
pub(crate) fn sanitize(value: &str) -> String {
    value.replace('|', "/").trim().to_string()
}

pub fn parse_date(s: &str) -> Result<Option<NaiveDate>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, TASK_DATE_FORMAT)
        .map(Some)
        .map_err(|_| format!("Invalid date `{s}`. Expected `YYYY-MM-DD`."))
}
