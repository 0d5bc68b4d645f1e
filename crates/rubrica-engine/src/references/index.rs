use std::collections::BTreeSet;

use rubrica_core::Reference;

/// Bidirectional, case-insensitive substring containment between a cited
/// author and a reference surname.
///
/// Deliberately permissive: `"García y López"` matches `"garcía"`, and so
/// does `"Gar"`. Short surnames can therefore produce false positives.
pub fn authors_match(cited: &str, surname: &str) -> bool {
    let cited = cited.trim().to_lowercase();
    let surname = surname.trim().to_lowercase();
    if cited.is_empty() || surname.is_empty() {
        return false;
    }
    cited.contains(&surname) || surname.contains(&cited)
}

/// Bibliography surnames, lower-cased, used to resolve in-text citations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    surnames: BTreeSet<String>,
}

impl ReferenceIndex {
    pub fn build(references: &[Reference]) -> Self {
        let surnames = references
            .iter()
            .map(|reference| reference.surname().to_lowercase())
            .filter(|surname| !surname.is_empty())
            .collect();
        Self { surnames }
    }

    /// True when some reference surname contains `candidate`, or vice versa.
    pub fn lookup(&self, candidate: &str) -> bool {
        self.surnames
            .iter()
            .any(|surname| authors_match(candidate, surname))
    }

    pub fn len(&self) -> usize {
        self.surnames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surnames.is_empty()
    }

    pub fn surnames(&self) -> impl Iterator<Item = &str> {
        self.surnames.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> ReferenceIndex {
        ReferenceIndex::build(&[
            Reference::new("García, J.", "2020", "Redes neuronales"),
            Reference::new("Organización Mundial de la Salud", "2023", "Informe"),
            Reference::new("", "2019", "Sin autor"),
        ])
    }

    #[test]
    fn keys_are_surnames() {
        let index = index();
        assert_eq!(index.len(), 2);
        let keys: Vec<&str> = index.surnames().collect();
        assert_eq!(keys, vec!["garcía", "salud"]);
    }

    #[test]
    fn lookup_is_case_insensitive_and_bidirectional() {
        let index = index();
        assert!(index.lookup("García"));
        assert!(index.lookup("GARCÍA"));
        assert!(index.lookup("García y López"));
        assert!(index.lookup("Gar"));
        assert!(!index.lookup("Pérez"));
    }

    #[test]
    fn blank_candidate_never_matches() {
        assert!(!index().lookup("   "));
        assert!(!ReferenceIndex::default().lookup("García"));
    }
}
