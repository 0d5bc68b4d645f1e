use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::reference::Reference;
use crate::error::{Result, RubricaError};

/// Keys of the `generalInfo` map the rubric knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneralField {
    Title,
    Students,
    Tutors,
    Institution,
}

impl GeneralField {
    pub fn key(self) -> &'static str {
        match self {
            Self::Title => "titulo",
            Self::Students => "estudiantes",
            Self::Tutors => "tutores",
            Self::Institution => "institucion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_chapter_heading: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub body: String,
}

impl Section {
    pub fn new(id: &str, title: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn chapter(mut self) -> Self {
        self.is_chapter_heading = true;
        self
    }

    /// Title for messages, falling back to the id for untitled sections.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// Immutable input of one validation run.
///
/// All three top-level keys are mandatory in the JSON form; a document that
/// omits one is malformed input, not an empty project.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub general_info: BTreeMap<String, String>,
    pub sections: Vec<Section>,
    pub references: Vec<Reference>,
}

impl DocumentSnapshot {
    /// Parse and structurally check a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_structure()?;
        Ok(snapshot)
    }

    /// Load a snapshot from a JSON project file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            sections = snapshot.sections.len(),
            references = snapshot.references.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Section ids must be non-empty and unique.
    pub fn check_structure(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.sections.len());
        for (idx, section) in self.sections.iter().enumerate() {
            let id = section.id.trim();
            if id.is_empty() {
                return Err(RubricaError::InvalidSnapshot(format!(
                    "section #{} has an empty id",
                    idx + 1
                )));
            }
            if !seen.insert(id) {
                return Err(RubricaError::DuplicateSectionId(id.to_string()));
            }
        }
        Ok(())
    }

    /// Trimmed value of a general-info field, empty when absent.
    pub fn general(&self, key: &str) -> &str {
        self.general_info
            .get(key)
            .map(|value| value.trim())
            .unwrap_or("")
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }
}
