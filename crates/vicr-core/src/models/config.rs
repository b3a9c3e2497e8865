//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VicrError};
use crate::extract::rules::Vocabulary;

/// Main configuration for vicr.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VicrConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Additions to the built-in keyword vocabularies.
    pub vocabulary: VocabularyConfig,
}

/// Extra keywords merged into the built-in vocabulary tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Additional badge/trim tokens that end the model name.
    pub extra_badges: Vec<String>,

    /// Additional body-type keywords that end the model name.
    pub extra_body_keywords: Vec<String>,

    /// Additional color names.
    pub extra_colors: Vec<String>,
}

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of documents parsed concurrently.
    pub jobs: usize,

    /// Accepted source file extensions (lowercase, without dot).
    pub allowed_extensions: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 4,
            allowed_extensions: vec!["txt".to_string()],
        }
    }
}

impl BatchConfig {
    /// Check whether a file extension is accepted, ignoring case.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

impl VicrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> std::result::Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.batch.jobs == 0 {
            return Err(VicrError::Config("batch.jobs must be at least 1".into()));
        }
        if let Some(ext) = self
            .batch
            .allowed_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(VicrError::Config(format!(
                "batch.allowed_extensions entries are bare extensions, got {:?}",
                ext
            )));
        }
        Ok(())
    }

    /// Build the keyword vocabulary: built-in tables plus configured extras.
    pub fn vocabulary(&self) -> Vocabulary {
        let extra = &self.extraction.vocabulary;
        Vocabulary::default()
            .with_badges(extra.extra_badges.iter().map(String::as_str))
            .with_body_keywords(extra.extra_body_keywords.iter().map(String::as_str))
            .with_colors(extra.extra_colors.iter().map(String::as_str))
    }
}
