use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder year for undated sources.
pub const YEAR_UNKNOWN: &str = "Sin fecha";

/// `Apellido, N.` / `Apellido Apellido, N. M.`, optionally `... y Apellido, P.`.
static APA_AUTHOR_RE: Lazy<Regex> = Lazy::new(|| {
    let name = r"[A-ZÁ-Ž][a-záéíóúñü]+(?:\s[A-ZÁ-Ž][a-záéíóúñü]+)?,\s[A-Z]\.(?:\s[A-Z]\.)?";
    Regex::new(&format!(r"^{name}(?:\sy\s{name})?$")).expect("valid APA author regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceKind {
    #[default]
    Book,
    Article,
    Web,
    Thesis,
    Conference,
    Report,
}

impl SourceKind {
    /// Label used in project files and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Book => "Libro",
            Self::Article => "Artículo",
            Self::Web => "Web",
            Self::Thesis => "Tesis",
            Self::Conference => "Conferencia",
            Self::Report => "Informe",
        }
    }

    /// Lenient parse: Spanish and English labels, with or without accents.
    /// Unrecognized labels fall back to `Book`, like untyped entries do.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "artículo" | "articulo" | "article" | "journal" => Self::Article,
            "web" | "website" | "online" => Self::Web,
            "tesis" | "thesis" | "disertación" | "disertacion" => Self::Thesis,
            "conferencia" | "conference" | "ponencia" => Self::Conference,
            "informe" | "report" => Self::Report,
            _ => Self::Book,
        }
    }
}

impl From<String> for SourceKind {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<SourceKind> for String {
    fn from(value: SourceKind) -> Self {
        value.label().to_string()
    }
}

/// A bibliography entry as the author typed it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "autor", alias = "author", default)]
    pub author: String,

    #[serde(rename = "año", alias = "year", alias = "anio", default)]
    pub year: String,

    #[serde(rename = "titulo", alias = "title", default)]
    pub title: String,

    #[serde(rename = "tipo", alias = "sourceKind", default)]
    pub source_kind: SourceKind,

    #[serde(rename = "fuente", alias = "sourceText", default)]
    pub source_text: String,
}

impl Reference {
    pub fn new(author: &str, year: &str, title: &str) -> Self {
        Self {
            author: author.to_string(),
            year: year.to_string(),
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: SourceKind, source_text: &str) -> Self {
        self.source_kind = kind;
        self.source_text = source_text.to_string();
        self
    }

    /// Author and title are present: the entry counts toward the minimum.
    pub fn is_countable(&self) -> bool {
        !self.author.trim().is_empty() && !self.title.trim().is_empty()
    }

    /// Author, year and title are all present.
    pub fn is_complete(&self) -> bool {
        self.is_countable() && !self.year.trim().is_empty()
    }

    /// Four ASCII digits or the undated placeholder.
    pub fn has_valid_year_format(&self) -> bool {
        let year = self.year.trim();
        year == YEAR_UNKNOWN || (year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Author written the APA way, `"García, J."` or `"García, J. y López, M."`.
    pub fn has_apa_author_format(&self) -> bool {
        APA_AUTHOR_RE.is_match(self.author.trim())
    }

    pub fn numeric_year(&self) -> Option<i32> {
        let year = self.year.trim();
        if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
            year.parse().ok()
        } else {
            None
        }
    }

    /// Surname used as the citation match key: the text before the first
    /// comma (`"García, J."`), otherwise the last word (`"Juan García"`).
    pub fn surname(&self) -> &str {
        let author = self.author.trim();
        match author.split_once(',') {
            Some((surname, _)) => surname.trim(),
            None => author.split_whitespace().last().unwrap_or(author),
        }
    }
}
