use rubrica_core::{Reference, SourceKind, YEAR_UNKNOWN};

/// APA 7 bibliography line for one reference.
pub fn format_reference(reference: &Reference) -> String {
    let author = non_empty_or(&reference.author, "Autor desconocido");
    let year = non_empty_or(&reference.year, YEAR_UNKNOWN);
    let title = sentence(non_empty_or(&reference.title, "Sin título"));
    let source = reference.source_text.trim();

    let head = format!("{author} ({year}). {title}");
    if source.is_empty() {
        return head;
    }

    match reference.source_kind {
        SourceKind::Web => format!("{head} Recuperado de {source}"),
        SourceKind::Thesis => format!("{head} [Tesis]. {}", sentence(source)),
        SourceKind::Conference => format!("{head} En {}", sentence(source)),
        SourceKind::Book | SourceKind::Article | SourceKind::Report => {
            format!("{head} {}", sentence(source))
        }
    }
}

/// Reference list sorted by author, one blank line between entries.
pub fn format_bibliography(references: &[Reference]) -> String {
    let mut sorted: Vec<&Reference> = references.iter().collect();
    sorted.sort_by_key(|reference| collation_key(&reference.author));
    sorted
        .into_iter()
        .map(format_reference)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

/// Lower-cased with Spanish diacritics folded, so "Álvarez" sorts before "Benítez".
fn collation_key(author: &str) -> String {
    author
        .trim()
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

fn sentence(text: &str) -> String {
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}
