/// Citation kinds understood by the `[CITA:<kind>:<author>:<year>[:<page>]]`
/// marker language. Anything else is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CitationKind {
    Textual,
    Paraphrase,
    LongQuote,
    Web,
    Multiple,
    Unknown(String),
}

impl CitationKind {
    pub const KNOWN: [CitationKind; 5] = [
        CitationKind::Textual,
        CitationKind::Paraphrase,
        CitationKind::LongQuote,
        CitationKind::Web,
        CitationKind::Multiple,
    ];

    /// Matches the marker keyword exactly (after trimming), as authors type it.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim() {
            "textual" => Self::Textual,
            "parafraseo" => Self::Paraphrase,
            "larga" => Self::LongQuote,
            "web" => Self::Web,
            "multiple" => Self::Multiple,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            Self::Textual => "textual",
            Self::Paraphrase => "parafraseo",
            Self::LongQuote => "larga",
            Self::Web => "web",
            Self::Multiple => "multiple",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// One `[CITA:...]` marker found in a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationToken {
    pub kind: CitationKind,
    pub author: String,
    pub year: String,
    pub page: Option<String>,
    pub section_id: String,
    pub raw_text: String,
    pub well_formed: bool,
    /// Human-readable reasons the token is malformed. Empty when well formed.
    pub problems: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip_through_kind() {
        for kind in CitationKind::KNOWN {
            assert_eq!(CitationKind::from_keyword(kind.keyword()), kind);
        }
    }

    #[test]
    fn unrecognized_keyword_is_preserved() {
        let kind = CitationKind::from_keyword(" foo ");
        assert_eq!(kind, CitationKind::Unknown("foo".to_string()));
        assert!(!kind.is_known());
        assert_eq!(kind.keyword(), "foo");
    }
}
