use thiserror::Error;

/// All errors that can occur while loading a snapshot or a rubric.
///
/// Content defects never show up here: they are reported as `Issue`s inside
/// the validation result. Only malformed input structure is an error.
#[derive(Debug, Error)]
pub enum RubricaError {
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Duplicate section id: {0}")]
    DuplicateSectionId(String),

    #[error("Unknown validation level: {0} (expected basic, standard or strict)")]
    InvalidLevel(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Exit codes of the `rubrica validate` command.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Passed = 0,
    Failed = 1,
    MalformedInput = 2,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

pub type Result<T> = std::result::Result<T, RubricaError>;
