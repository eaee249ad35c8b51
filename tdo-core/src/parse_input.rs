//! Natural-language task descriptors.
//!
//! Turns a free-text (usually dictated) Spanish utterance such as
//! `"Llamar a Lucía el jueves que viene en la carpeta Personal"` into a cleaned
//! title, an optional due date and an optional folder.

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use tracing::debug;

use crate::keywords::{Keyword, Keywords, normalize};

/// Default accepted input date formats for single date tokens.
const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Weekday prefixes. `el próximo` and `el siguiente` are listed before `el` so the
/// article is consumed together with the qualifier.
const WEEKDAY_PREFIXES: &str =
    r"antes\s+del|para\s+el|el\s+pr[oó]ximo|el\s+siguiente|el|este|pr[oó]ximo|siguiente";

static DEFAULT_KEYWORDS: Lazy<Keywords> = Lazy::new(Keywords::default);

/// The result of parsing a date filter, which can be a single day or a range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DateFilter {
    Single(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

impl DateFilter {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::Single(day) => day == date,
            DateFilter::Range(start, end) => date >= start && date <= end,
        }
    }
}

/// What the parser understood from an utterance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedUtterance {
    /// The utterance without the recognized date/folder phrases.
    pub title: String,
    pub due_date: Option<NaiveDate>,
    /// Always one of the known folders, in its canonical casing.
    pub folder: Option<String>,
}

/// Parses an utterance with the built-in Spanish vocabulary.
///
/// Folder phrases (`en la carpeta <nombre>`) are extracted first, then the first matching
/// temporal expression, in this order: *hoy*, *mañana*, *próxima semana*, a weekday
/// reference (`el próximo lunes`, `antes del viernes`, `el jueves que viene`) and an
/// explicit day of month (`el 5 de enero`). Matched phrases are removed from the title.
///
/// The function is total and pure: nothing matching simply leaves the fields unset.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use tdo_core::parse_input::parse_utterance;
/// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let folders = vec!["Trabajo".to_string(), "Personal".to_string()];
///
/// let parsed = parse_utterance("Tarea en la carpeta trabajo para hoy", &folders, today);
///
/// assert_eq!(parsed.title, "Tarea");
/// assert_eq!(parsed.due_date, Some(today));
/// assert_eq!(parsed.folder.as_deref(), Some("Trabajo"));
/// ```
pub fn parse_utterance(
    utterance: &str,
    known_folders: &[String],
    today: NaiveDate,
) -> ParsedUtterance {
    parse_utterance_with(utterance, known_folders, today, &DEFAULT_KEYWORDS)
}

/// Same as [`parse_utterance`], with an explicit keyword registry (eg. one extended
/// with the user's synonyms).
pub fn parse_utterance_with(
    utterance: &str,
    known_folders: &[String],
    today: NaiveDate,
    keywords: &Keywords,
) -> ParsedUtterance {
    let mut text = utterance.trim().to_string();

    let folder = match extract_folder(&text, known_folders) {
        Some((name, range)) => {
            text = cut(&text, range);
            Some(name)
        }
        None => None,
    };

    let due_date = match extract_due_date(&text, today, keywords) {
        Some((date, range)) => {
            text = cut(&text, range);
            Some(date)
        }
        None => None,
    };

    ParsedUtterance {
        title: text.trim().to_string(),
        due_date,
        folder,
    }
}

/// Parses a single date token, as typed on the command line.
///
/// Understands, in order:
/// 1. **Keywords**: `hoy`, `mañana`, `próxima semana` and their synonyms.
/// 2. **Weekday names**: the next occurrence of that day, today included.
/// 3. **Formatted dates**: `YYYY-MM-DD`, `DD/MM/YYYY` and then any extra `formats`.
///
/// ```
/// # use chrono::NaiveDate;
/// # use tdo_core::keywords::Keywords;
/// # use tdo_core::parse_input::parse_date_token;
/// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(); // Monday
/// let keywords = Keywords::default();
///
/// assert_eq!(
///     parse_date_token("viernes", today, &keywords, &[]),
///     NaiveDate::from_ymd_opt(2024, 6, 14)
/// );
/// assert_eq!(
///     parse_date_token("01/07/2024", today, &keywords, &[]),
///     NaiveDate::from_ymd_opt(2024, 7, 1)
/// );
/// ```
pub fn parse_date_token(
    token: &str,
    today: NaiveDate,
    keywords: &Keywords,
    formats: &[&str],
) -> Option<NaiveDate> {
    let token = token.trim();
    match keywords.lookup(token) {
        Some(Keyword::Hoy) => return Some(today),
        Some(Keyword::Manana) => return Some(today + Duration::days(1)),
        Some(Keyword::ProximaSemana) => return Some(today + Duration::days(7)),
        Some(keyword) => {
            if let Some(weekday) = keyword.weekday() {
                let target = weekday.num_days_from_sunday() as i64;
                let current = today.weekday().num_days_from_sunday() as i64;
                let delta = (target - current).rem_euclid(7);
                return Some(today + Duration::days(delta));
            }
        }
        None => {}
    }

    DEFAULT_FORMATS
        .iter()
        .chain(formats.iter())
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

type TemporalRule = fn(&str, NaiveDate, &Keywords) -> Option<(NaiveDate, Range<usize>)>;

/// Tried in order; the first rule that matches wins and the rest are skipped.
const TEMPORAL_RULES: &[(&str, TemporalRule)] = &[
    ("today", match_today as TemporalRule),
    ("tomorrow", match_tomorrow as TemporalRule),
    ("next week", match_next_week as TemporalRule),
    ("weekday", match_weekday as TemporalRule),
    ("day of month", match_day_of_month as TemporalRule),
];

fn extract_due_date(
    text: &str,
    today: NaiveDate,
    keywords: &Keywords,
) -> Option<(NaiveDate, Range<usize>)> {
    TEMPORAL_RULES.iter().find_map(|(name, rule)| {
        let (date, range) = rule(text, today, keywords)?;
        debug!(rule = name, phrase = &text[range.clone()], %date, "temporal expression matched");
        Some((date, range))
    })
}

fn match_today(
    text: &str,
    today: NaiveDate,
    keywords: &Keywords,
) -> Option<(NaiveDate, Range<usize>)> {
    let range = find_keyword(text, keywords, Keyword::Hoy, r"(?:\bpara\s+)?")?;
    Some((today, range))
}

fn match_tomorrow(
    text: &str,
    today: NaiveDate,
    keywords: &Keywords,
) -> Option<(NaiveDate, Range<usize>)> {
    let range = find_keyword(text, keywords, Keyword::Manana, r"(?:\bpara\s+)?")?;
    Some((today + Duration::days(1), range))
}

fn match_next_week(
    text: &str,
    today: NaiveDate,
    keywords: &Keywords,
) -> Option<(NaiveDate, Range<usize>)> {
    let lead = r"(?:\b(?:para|en)\s+la\s+|\bla\s+)?";
    let range = find_keyword(text, keywords, Keyword::ProximaSemana, lead)?;
    Some((today + Duration::days(7), range))
}

/// `<prefix> <weekday>[ que viene]`.
///
/// The upcoming occurrence is used for `próximo`, `siguiente` and `que viene`; otherwise
/// the day of the current week, rolling to next week only if it already passed. `antes
/// del` lands one day earlier.
fn match_weekday(
    text: &str,
    today: NaiveDate,
    keywords: &Keywords,
) -> Option<(NaiveDate, Range<usize>)> {
    let days = alternation(&keywords.phrases_where(|k| k.weekday().is_some()))?;
    let pattern = format!(r"(?i)\b({WEEKDAY_PREFIXES})\s+({days})(\s+que\s+viene\b)?");
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(text)?;

    let prefix = normalize(caps.get(1)?.as_str());
    let weekday = keywords.weekday(caps.get(2)?.as_str())?;
    let is_next = caps.get(3).is_some()
        || prefix.ends_with("próximo")
        || prefix.ends_with("proximo")
        || prefix.ends_with("siguiente");

    let target = weekday.num_days_from_sunday() as i64;
    let current = today.weekday().num_days_from_sunday() as i64;
    let mut delta = target - current;
    if (is_next && delta <= 0) || (!is_next && delta < 0) {
        delta += 7;
    }

    let mut date = today + Duration::days(delta);
    if prefix.starts_with("antes") {
        date -= Duration::days(1);
    }
    Some((date, caps.get(0)?.range()))
}

/// `(para el [día |próximo ]|el [día ])<DD> de <mes>`.
///
/// The date is placed in the current year, or the next one when it already passed (or
/// does not exist this year, like a 29th of February).
fn match_day_of_month(
    text: &str,
    today: NaiveDate,
    keywords: &Keywords,
) -> Option<(NaiveDate, Range<usize>)> {
    let months = alternation(&keywords.phrases_where(|k| k.month().is_some()))?;
    let pattern = format!(
        r"(?i)(?:\bpara\s+el\s+(?:día\s+|pr[oó]ximo\s+)?|\bel\s+(?:día\s+)?)([0-9]{{1,2}})\s+de\s+({months})"
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(text)?;

    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month = keywords.month(caps.get(2)?.as_str())?;
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)
        .filter(|date| *date >= today)
        .or_else(|| NaiveDate::from_ymd_opt(today.year() + 1, month, day))?;
    Some((date, caps.get(0)?.range()))
}

/// Looks for a `(en|para) la carpeta <folder>` phrase naming one of the known folders.
fn extract_folder(text: &str, known_folders: &[String]) -> Option<(String, Range<usize>)> {
    let mut names: Vec<&String> = known_folders
        .iter()
        .filter(|name| !name.trim().is_empty())
        .collect();
    // Longest first, so "Trabajo extra" is preferred over "Trabajo".
    names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    let phrases: Vec<&str> = names.iter().map(|name| name.trim()).collect();
    let folders = alternation(&phrases)?;

    let re = Regex::new(&format!(r"(?i)\b(?:en|para)\s+la\s+carpeta\s+({folders})")).ok()?;
    let caps = re.captures(text)?;
    let spoken = normalize(caps.get(1)?.as_str());
    let canonical = names.iter().find(|name| normalize(name) == spoken)?;

    debug!(folder = %canonical, "folder phrase matched");
    Some(((*canonical).clone(), caps.get(0)?.range()))
}

/// Builds a regex alternation out of literal phrases. Spaces inside a phrase match
/// any run of whitespace, and phrases ending in a word character must end on a word
/// boundary.
fn alternation(phrases: &[&str]) -> Option<String> {
    let patterns: Vec<String> = phrases
        .iter()
        .map(|phrase| phrase_pattern(phrase))
        .filter(|pattern| !pattern.is_empty())
        .collect();
    if patterns.is_empty() {
        None
    } else {
        Some(patterns.join("|"))
    }
}

fn phrase_pattern(phrase: &str) -> String {
    let mut pattern = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    if phrase
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
    {
        pattern.push_str(r"\b");
    }
    pattern
}

fn find_keyword(
    text: &str,
    keywords: &Keywords,
    keyword: Keyword,
    lead: &str,
) -> Option<Range<usize>> {
    let phrases = alternation(&keywords.phrases(keyword))?;
    let re = Regex::new(&format!(r"(?i){lead}\b(?:{phrases})")).ok()?;
    re.find(text).map(|m| m.range())
}

/// Removes `range` from `text`, joining both sides with a single space.
fn cut(text: &str, range: Range<usize>) -> String {
    let before = text[..range.start].trim_end();
    let after = text[range.end..].trim_start();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{before} {after}"),
    }
}
