use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template line {line}: expected at least 9 tab-separated fields, found {found}")]
    MalformedRecord { line: usize, found: usize },

    #[error("genotype line {line}: invalid genotype code '{value}'")]
    InvalidGenotype { line: usize, value: String },

    #[error("ran out of genotype codes after {records} template records")]
    GenotypesExhausted { records: usize },

    #[error("genotype codes remain after the last of {records} template records")]
    TemplateExhausted { records: usize },
}

impl SynthError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SynthError::Open {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;
