use super::theme::OneDark;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tdo_core::{ParsedUtterance, Task, TaskStatus, tasks::TaskQueryResult};
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%a, %d %b %Y".to_string(),
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    pub fn print_info(&self, message: &str) {
        let md = format!("|-|\n| {message} |\n|-|\n");
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            println!("{}", message);
        }
    }

    /// `☐ 3. Title - date [folder]`
    pub fn print_task_line(&self, task: &Task) {
        let icons = task_icons(&task.status);
        let date = self.task_date(task);
        let date = if date.is_empty() {
            date
        } else {
            format!("- {date}")
        };

        if self.opts.use_color {
            let folder = task
                .folder
                .as_deref()
                .map(|f| format!("[{}]", colorize_value(f)))
                .unwrap_or_default();
            println!(
                "{} {} {} {} {}",
                icons.color.with(OneDark::RED),
                format!("{}.", task.position).with(OneDark::BLUE),
                task.title.as_str().with(OneDark::YELLOW),
                date.with(OneDark::CYAN),
                folder
            );
        } else {
            let folder = task
                .folder
                .as_deref()
                .map(|f| format!("[{f}]"))
                .unwrap_or_default();
            let line = format!(
                "{} {}. {} {} {}",
                icons.no_color, task.position, task.title, date, folder
            );
            println!("{}", collapse_spaces(&line));
        }
    }

    pub fn print_tasks(&self, result: &TaskQueryResult) {
        if self.opts.short_mode {
            for task in &result.tasks {
                self.print_task_line(task);
            }
            return;
        }

        let done = result.tasks.iter().any(|t| t.status == TaskStatus::Done);
        let mut md = if done {
            "|#|Tarea|Vence|Carpeta|Completada|\n|-:|:-|:-|:-|:-|\n".to_string()
        } else {
            "|#|Tarea|Vence|Carpeta|\n|-:|:-|:-|:-|\n".to_string()
        };
        for task in &result.tasks {
            let mut row = format!(
                "|{}|{}|{}|{}|",
                task.position,
                highlight_times(&task.title),
                self.format_date(task.due_date),
                task.folder.as_deref().unwrap_or("")
            );
            if done {
                row.push_str(&format!("{}|", self.format_date(task.done_date)));
            }
            md.push_str(&row);
            md.push('\n');
        }
        md.push_str("|-\n");

        if self.opts.use_color {
            self.print_md(&md);
        } else {
            print!("{md}");
        }
    }

    pub fn print_folders(&self, folders: &[String]) {
        let list = if self.opts.use_color {
            let colored: Vec<String> = folders.iter().map(|f| colorize_value(f)).collect();
            colored.join(" - ")
        } else {
            folders.join(" - ")
        };
        println!("{}", list);
    }

    pub fn print_suggestions(&self, suggestions: &[String]) {
        let md: String = suggestions
            .iter()
            .map(|s| format!("* {}\n", highlight_times(s)))
            .collect();
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            print!("{md}");
        }
    }

    /// What a `--dry-run` understood from the text.
    pub fn print_parsed(&self, parsed: &ParsedUtterance) {
        let md = format!(
            "**Tarea:** {}\n**Vence:** {}\n**Carpeta:** {}\n",
            parsed.title,
            self.format_date(parsed.due_date),
            parsed.folder.as_deref().unwrap_or("-"),
        );
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            print!("{}", md.replace("**", ""));
        }
    }

    fn task_date(&self, task: &Task) -> String {
        match task.status {
            TaskStatus::Pending => self.format_date(task.due_date),
            TaskStatus::Done => self.format_date(task.done_date),
        }
    }

    fn format_date(&self, date: Option<NaiveDate>) -> String {
        date.map(|d| d.format(&self.opts.date_format).to_string())
            .unwrap_or_default()
    }
}

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2}:\d{2})\b").unwrap());

/// Marks clock times (`18:30`) as inline code so they stand out.
fn highlight_times(text: &str) -> String {
    TIME_RE.replace_all(text, "`$1`").to_string()
}

fn collapse_spaces(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct Icons {
    color: &'static str,
    no_color: &'static str,
}

fn task_icons(status: &TaskStatus) -> Icons {
    match status {
        TaskStatus::Pending => Icons {
            color: "☐",
            no_color: "[ ]",
        },
        TaskStatus::Done => Icons {
            color: "☑",
            no_color: "[x]",
        },
    }
}

fn colorize_value(val: &str) -> String {
    let palette = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::DarkRed,
        Color::DarkGreen,
        Color::DarkYellow,
        Color::DarkBlue,
        Color::DarkMagenta,
        Color::DarkCyan,
    ];

    // FNV-1a, so a folder keeps its color between runs.
    fn stable_index(s: &str, modulo: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in s.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % modulo
    }

    let idx = stable_index(val, palette.len());
    format!("{}", val.with(palette[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_become_inline_code() {
        assert_eq!(highlight_times("Yoga 18:30"), "Yoga `18:30`");
        assert_eq!(highlight_times("Sin hora"), "Sin hora");
        assert_eq!(
            highlight_times("Turno 8:00 a 15:30"),
            "Turno `8:00` a `15:30`"
        );
    }

    #[test]
    fn folder_colors_are_stable() {
        assert_eq!(colorize_value("Trabajo"), colorize_value("Trabajo"));
    }

    #[test]
    fn empty_fields_leave_no_gaps() {
        assert_eq!(collapse_spaces("[ ] 1. Leer  "), "[ ] 1. Leer");
    }
}
