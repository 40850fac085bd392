//! Vote-type classification.
//!
//! Raw `vote_type` codes are mapped to a [`VoteOutcome`] through a lookup
//! table rather than hard-coded branches, so supporting a new code is a data
//! change. The default table is compiled in from `seed_data/vote_types.yml`;
//! callers may load their own file of the same shape.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::types::VoteOutcome;

/// Error types for vote-type table operations.
#[derive(Error, Debug)]
pub enum VoteTypeError {
    #[error("Failed to parse vote-type YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Failed to read vote-type file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Duplicate vote-type code: {0}")]
    DuplicateCode(String),
    #[error("Empty vote-type code")]
    EmptyCode,
}

/// Top-level structure for the vote-type YAML file.
#[derive(Deserialize, Debug)]
pub struct VoteTypeFile {
    pub vote_types: Vec<VoteTypeEntry>,
}

/// A single code-to-outcome entry.
#[derive(Deserialize, Debug, Clone)]
pub struct VoteTypeEntry {
    pub code: VoteTypeCode,
    pub outcome: VoteOutcome,
}

/// Codes may be written as bare integers (`1`) or strings (`"yea"`).
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum VoteTypeCode {
    Number(i64),
    Text(String),
}

impl VoteTypeCode {
    fn normalized(&self) -> String {
        match self {
            VoteTypeCode::Number(n) => n.to_string(),
            VoteTypeCode::Text(s) => normalize_code(s),
        }
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

/// Pure `vote_type → VoteOutcome` mapping. Unlisted codes are `Other`.
#[derive(Debug, Clone)]
pub struct VoteClassifier {
    table: HashMap<String, VoteOutcome>,
}

impl VoteClassifier {
    /// Builds a classifier from explicit `(code, outcome)` pairs.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, VoteOutcome)>,
    ) -> Result<Self, VoteTypeError> {
        let mut table = HashMap::new();
        for (code, outcome) in pairs {
            insert_code(&mut table, normalize_code(code), outcome)?;
        }
        Ok(Self { table })
    }

    /// Parses a classifier table from YAML content.
    pub fn from_yaml(yaml_content: &str) -> Result<Self, VoteTypeError> {
        let file: VoteTypeFile = serde_yml::from_str(yaml_content)?;

        let mut table = HashMap::new();
        for entry in file.vote_types {
            insert_code(&mut table, entry.code.normalized(), entry.outcome)?;
        }
        Ok(Self { table })
    }

    /// Loads a classifier table from a YAML file on disk.
    pub fn from_path(path: &Path) -> Result<Self, VoteTypeError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content),
            Err(source) => Err(VoteTypeError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Load the classifier from the embedded YAML file at compile time.
    pub fn load_default() -> Result<Self, VoteTypeError> {
        let yaml_content = include_str!("../../seed_data/vote_types.yml");
        Self::from_yaml(yaml_content)
    }

    pub fn classify(&self, vote_type: &str) -> VoteOutcome {
        self.table
            .get(&normalize_code(vote_type))
            .copied()
            .unwrap_or(VoteOutcome::Other)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn insert_code(
    table: &mut HashMap<String, VoteOutcome>,
    code: String,
    outcome: VoteOutcome,
) -> Result<(), VoteTypeError> {
    if code.is_empty() {
        return Err(VoteTypeError::EmptyCode);
    }
    if table.contains_key(&code) {
        return Err(VoteTypeError::DuplicateCode(code));
    }
    table.insert(code, outcome);
    Ok(())
}
