//! Criteria template: the canonical criteria → sub-criteria → questions layout
//!
//! Loaded once at startup and shared read-only. Every evaluation skeleton is
//! copied from it, and assembled documents are reconciled against it.

mod error;

pub use error::TemplateError;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::grading::Strictness;

/// A top-level accreditation criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCriterion {
    pub title: String,
    #[serde(rename = "type")]
    pub strictness: Strictness,
    #[serde(default)]
    pub sub_criteria: Vec<TemplateSubCriterion>,
}

/// A group of yes/no questions inside a criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSubCriterion {
    pub text: String,
    #[serde(default)]
    pub questions: Vec<String>,
}

/// The full, ordered template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaTemplate {
    criteria: Vec<TemplateCriterion>,
}

impl CriteriaTemplate {
    pub fn new(criteria: Vec<TemplateCriterion>) -> Self {
        Self { criteria }
    }

    /// Template with no criteria, used when loading fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a template from its JSON text
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a template file, failing on I/O or parse errors
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Load a template file, degrading to an empty template on failure.
    ///
    /// The server stays reachable without a template; endpoints that depend
    /// on it return empty or partial results.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(template) => {
                tracing::info!(
                    path = %path.display(),
                    criteria = template.len(),
                    "Loaded criteria template"
                );
                template
            }
            Err(e) => {
                tracing::warn!("Failed to load criteria template, continuing without it: {}", e);
                Self::empty()
            }
        }
    }

    pub fn criteria(&self) -> &[TemplateCriterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criterion(&self, index: usize) -> Option<&TemplateCriterion> {
        self.criteria.get(index)
    }

    pub fn sub_criterion(&self, criterion: usize, sub: usize) -> Option<&TemplateSubCriterion> {
        self.criterion(criterion)?.sub_criteria.get(sub)
    }

    pub fn strictness(&self, criterion: usize) -> Option<Strictness> {
        self.criterion(criterion).map(|c| c.strictness)
    }

    /// Declared question count, zero for slots outside the template
    pub fn question_count(&self, criterion: usize, sub: usize) -> usize {
        self.sub_criterion(criterion, sub)
            .map_or(0, |s| s.questions.len())
    }

    /// Total number of sub-criteria across all criteria
    pub fn sub_criterion_count(&self) -> usize {
        self.criteria.iter().map(|c| c.sub_criteria.len()).sum()
    }
}
