use chrono::Weekday;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

/// Canonical Spanish words understood by the parser.
///
/// The serialized form of each variant is its canonical spelling; every other
/// spelling is registered as a synonym in [`Keywords`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum Keyword {
    #[strum(serialize = "hoy")]
    Hoy,
    #[strum(serialize = "mañana")]
    Manana,
    #[strum(serialize = "próxima semana")]
    ProximaSemana,
    #[strum(serialize = "lunes")]
    Lunes,
    #[strum(serialize = "martes")]
    Martes,
    #[strum(serialize = "miércoles")]
    Miercoles,
    #[strum(serialize = "jueves")]
    Jueves,
    #[strum(serialize = "viernes")]
    Viernes,
    #[strum(serialize = "sábado")]
    Sabado,
    #[strum(serialize = "domingo")]
    Domingo,
    #[strum(serialize = "enero")]
    Enero,
    #[strum(serialize = "febrero")]
    Febrero,
    #[strum(serialize = "marzo")]
    Marzo,
    #[strum(serialize = "abril")]
    Abril,
    #[strum(serialize = "mayo")]
    Mayo,
    #[strum(serialize = "junio")]
    Junio,
    #[strum(serialize = "julio")]
    Julio,
    #[strum(serialize = "agosto")]
    Agosto,
    #[strum(serialize = "septiembre")]
    Septiembre,
    #[strum(serialize = "octubre")]
    Octubre,
    #[strum(serialize = "noviembre")]
    Noviembre,
    #[strum(serialize = "diciembre")]
    Diciembre,
}

impl Keyword {
    pub fn weekday(self) -> Option<Weekday> {
        match self {
            Keyword::Lunes => Some(Weekday::Mon),
            Keyword::Martes => Some(Weekday::Tue),
            Keyword::Miercoles => Some(Weekday::Wed),
            Keyword::Jueves => Some(Weekday::Thu),
            Keyword::Viernes => Some(Weekday::Fri),
            Keyword::Sabado => Some(Weekday::Sat),
            Keyword::Domingo => Some(Weekday::Sun),
            _ => None,
        }
    }

    /// Month number, 1 to 12.
    pub fn month(self) -> Option<u32> {
        match self {
            Keyword::Enero => Some(1),
            Keyword::Febrero => Some(2),
            Keyword::Marzo => Some(3),
            Keyword::Abril => Some(4),
            Keyword::Mayo => Some(5),
            Keyword::Junio => Some(6),
            Keyword::Julio => Some(7),
            Keyword::Agosto => Some(8),
            Keyword::Septiembre => Some(9),
            Keyword::Octubre => Some(10),
            Keyword::Noviembre => Some(11),
            Keyword::Diciembre => Some(12),
            _ => None,
        }
    }

    /// The day name keyword for a `chrono` weekday.
    pub fn from_weekday(weekday: Weekday) -> Keyword {
        match weekday {
            Weekday::Mon => Keyword::Lunes,
            Weekday::Tue => Keyword::Martes,
            Weekday::Wed => Keyword::Miercoles,
            Weekday::Thu => Keyword::Jueves,
            Weekday::Fri => Keyword::Viernes,
            Weekday::Sat => Keyword::Sabado,
            Weekday::Sun => Keyword::Domingo,
        }
    }
}

/// Multi-word phrases understood out of the box, next to the canonical words.
const BUILT_IN_PHRASES: [(&str, Keyword); 4] = [
    ("el día de hoy", Keyword::Hoy),
    ("el día de mañana", Keyword::Manana),
    ("siguiente semana", Keyword::ProximaSemana),
    ("semana que viene", Keyword::ProximaSemana),
];

/// Registry of spoken phrases (input → canonical keyword).
///
/// A `Keywords` value is owned by whoever needs it (usually the [`Config`](crate::Config))
/// and handed to the parser explicitly.
///
/// All keys are stored lowercased with single spaces, so lookups are case-insensitive
/// and tolerant to repeated whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Keywords {
    words: HashMap<String, Keyword>,
}

impl Default for Keywords {
    /// Seeds every canonical word plus the multi-word phrases the parser accepts
    /// out of the box (`el día de hoy`, `semana que viene`, ...).
    fn default() -> Self {
        let words: HashMap<String, Keyword> = Keyword::iter()
            .map(|keyword| (keyword.as_ref().to_string(), keyword))
            .chain(
                BUILT_IN_PHRASES
                    .iter()
                    .map(|(phrase, keyword)| (phrase.to_string(), *keyword)),
            )
            .collect();
        Self { words }
    }
}

impl Keywords {
    /// Extends the registry with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must already be known (a canonical
    /// word or an existing synonym); unknown targets are ignored silently.
    /// Canonical words and built-in phrases keep their meaning: such aliases are skipped.
    ///
    /// ```
    /// # use tdo_core::keywords::{Keyword, Keywords};
    /// let mut keywords = Keywords::default();
    /// keywords.extend(&[("miercoles".into(), "miércoles".into())]);
    /// assert!(keywords.matches(Keyword::Miercoles, "Miercoles"));
    /// ```
    pub fn extend(&mut self, synonyms: &[(String, String)]) {
        for (alias, target) in synonyms {
            let alias = normalize(alias);
            if alias.is_empty() || Self::is_reserved(&alias) {
                continue;
            }
            if let Some(&canonical) = self.words.get(&normalize(target)) {
                self.words.insert(alias, canonical);
            }
        }
    }

    /// Returns `true` if `word` is the canonical spelling of a keyword (eg "hoy").
    pub fn is_canonical(word: &str) -> bool {
        let word = normalize(word);
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Canonical words and built-in phrases, which synonyms cannot redefine.
    fn is_reserved(alias: &str) -> bool {
        Self::is_canonical(alias) || BUILT_IN_PHRASES.iter().any(|(phrase, _)| *phrase == alias)
    }

    pub fn lookup(&self, input: &str) -> Option<Keyword> {
        self.words.get(&normalize(input)).copied()
    }

    /// Returns `true` if `input` is the given keyword or one of its synonyms.
    pub fn matches(&self, keyword: Keyword, input: &str) -> bool {
        self.lookup(input) == Some(keyword)
    }

    pub fn weekday(&self, input: &str) -> Option<Weekday> {
        self.lookup(input).and_then(Keyword::weekday)
    }

    pub fn month(&self, input: &str) -> Option<u32> {
        self.lookup(input).and_then(Keyword::month)
    }

    /// Every phrase registered for `keyword`, longest first.
    pub fn phrases(&self, keyword: Keyword) -> Vec<&str> {
        self.phrases_where(|k| k == keyword)
    }

    /// Every phrase whose keyword satisfies `predicate`, longest first.
    ///
    /// Ties are broken alphabetically so regexes built from the result are stable.
    pub fn phrases_where(&self, predicate: impl Fn(Keyword) -> bool) -> Vec<&str> {
        let mut phrases: Vec<&str> = self
            .words
            .iter()
            .filter(|(_, keyword)| predicate(**keyword))
            .map(|(phrase, _)| phrase.as_str())
            .collect();
        phrases.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        phrases
    }
}

/// Lowercase and collapse whitespace.
pub(crate) fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
