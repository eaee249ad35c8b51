//! Task suggestions drawn from what the user completed recently.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::keywords::Keyword;
use crate::tasks::Task;

/// How many recently completed tasks are considered.
const RECENT_WINDOW: usize = 30;
const MAX_SUGGESTIONS: usize = 3;
/// Completed tasks reused as-is when the other rules find too little.
const FALLBACK_COUNT: usize = 5;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+/\d+/\d+").unwrap());
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

/// Suggests up to three tasks to add, without duplicates and in a stable order.
///
/// `completed` is expected in completion order (as read from disk); only the last
/// thirty are used, most recent first. Candidates come from:
/// 1. completed titles stripped of their first `d/m/y` date and `h:mm` time, when
///    longer than three characters and not part of any pending title;
/// 2. completed titles mentioning today's weekday (`"Regar el lunes"` on a Monday);
/// 3. if fewer than two were found, the five most recent completed titles.
///
/// Titles that are already pending are never suggested.
///
/// ```
/// # use chrono::NaiveDate;
/// # use tdo_core::suggest::suggest_tasks;
/// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// assert!(suggest_tasks(&[], &[], today).is_empty());
/// ```
pub fn suggest_tasks(completed: &[Task], pending: &[Task], today: NaiveDate) -> Vec<String> {
    let recent: Vec<&str> = completed
        .iter()
        .rev()
        .take(RECENT_WINDOW)
        .map(|t| t.title.as_str())
        .collect();
    let pending: Vec<&str> = pending.iter().map(|t| t.title.as_str()).collect();
    let is_pending = |title: &str| pending.iter().any(|p| *p == title);

    let mut suggestions: Vec<String> = Vec::new();

    for &title in &recent {
        let base = base_title(title);
        if base.chars().count() > 3 && !pending.iter().any(|p| p.contains(base.as_str())) {
            push(&mut suggestions, &base);
        }
    }

    let weekday = Keyword::from_weekday(today.weekday());
    let day_name: &str = weekday.as_ref();
    for &title in &recent {
        if title.to_lowercase().contains(day_name) && !is_pending(title) {
            push(&mut suggestions, title);
        }
    }

    if suggestions.len() < 2 {
        for &title in recent.iter().take(FALLBACK_COUNT) {
            if !is_pending(title) {
                push(&mut suggestions, title);
            }
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn push(suggestions: &mut Vec<String>, title: &str) {
    if !suggestions.iter().any(|s| s == title) {
        suggestions.push(title.to_string());
    }
}

/// The title without its first date and time.
fn base_title(title: &str) -> String {
    let without_date = DATE_RE.replace(title, "");
    TIME_RE.replace(&without_date, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskStatus;
    use std::path::PathBuf;

    fn today() -> NaiveDate {
        // Monday
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn tasks(titles: &[&str], status: TaskStatus) -> Vec<Task> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| Task {
                position: i + 1,
                title: title.to_string(),
                due_date: None,
                folder: None,
                done_date: None,
                status,
                path: PathBuf::new(),
            })
            .collect()
    }

    #[test]
    fn base_title_drops_first_date_and_time() {
        assert_eq!(base_title("Pagar alquiler 01/06/2024"), "Pagar alquiler");
        assert_eq!(base_title("Clase de yoga 18:30"), "Clase de yoga");
        assert_eq!(base_title("1/1/24 y 2/2/24"), "y 2/2/24");
    }

    #[test]
    fn most_recent_first_and_capped() {
        let completed = tasks(
            &["Regar plantas", "Sacar la basura", "Pagar alquiler 01/06/2024", "Correr"],
            TaskStatus::Done,
        );
        let got = suggest_tasks(&completed, &[], today());
        assert_eq!(got, vec!["Correr", "Pagar alquiler", "Sacar la basura"]);
    }

    #[test]
    fn pending_titles_are_skipped() {
        let completed = tasks(
            &["Regar plantas", "Sacar la basura", "Lavar el coche"],
            TaskStatus::Done,
        );
        let pending = tasks(&["Sacar la basura hoy"], TaskStatus::Pending);
        let got = suggest_tasks(&completed, &pending, today());
        assert_eq!(got, vec!["Lavar el coche", "Regar plantas"]);
    }

    #[test]
    fn fallback_only_skips_exact_pending_titles() {
        let completed = tasks(&["Regar plantas", "Sacar la basura"], TaskStatus::Done);
        let pending = tasks(&["Sacar la basura hoy"], TaskStatus::Pending);
        let got = suggest_tasks(&completed, &pending, today());
        assert_eq!(got, vec!["Regar plantas", "Sacar la basura"]);
    }

    #[test]
    fn weekday_titles_are_suggested_whole() {
        let completed = tasks(&["Yoga el lunes 18:30"], TaskStatus::Done);
        let pending = tasks(&["Yoga el lunes y martes"], TaskStatus::Pending);
        // The base title is part of a pending one, the full title is not pending.
        let got = suggest_tasks(&completed, &pending, today());
        assert_eq!(got, vec!["Yoga el lunes 18:30"]);
    }

    #[test]
    fn short_titles_fall_back_to_recent() {
        let completed = tasks(&["Pan", "Té"], TaskStatus::Done);
        let got = suggest_tasks(&completed, &[], today());
        assert_eq!(got, vec!["Té", "Pan"]);
    }

    #[test]
    fn only_last_thirty_count() {
        let mut titles: Vec<String> = vec!["Muy antigua".to_string()];
        titles.extend((0..30).map(|i| format!("T{i}")));
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let completed = tasks(&refs, TaskStatus::Done);

        let got = suggest_tasks(&completed, &[], today());
        assert_eq!(got, vec!["T29", "T28", "T27"]);
    }

    #[test]
    fn deterministic() {
        let completed = tasks(&["Uno largo", "Dos largo", "Tres largo", "Cuatro"], TaskStatus::Done);
        assert_eq!(
            suggest_tasks(&completed, &[], today()),
            suggest_tasks(&completed, &[], today())
        );
    }
}
