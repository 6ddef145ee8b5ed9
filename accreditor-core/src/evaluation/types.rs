//! Core evaluation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::EvaluationError;
use crate::grading::{EvaluationLabel, Strictness};

/// Status given to every criterion of a new evaluation
pub const DEFAULT_STATUS: &str = "Not Started";

/// Status counted towards an evaluation's progress
pub const COMPLETED_STATUS: &str = "Completed";

/// Answer to a single yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }
}

/// An evaluation's own fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: i64,
    pub program_name: String,
    pub university_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Evaluation with progress counts, for list views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub completed_criteria: u32,
    pub total_criteria: u32,
}

/// One row of the criteria/sub-criteria/responses join.
///
/// Sub-criterion and response columns are `None` when the left join found
/// nothing on that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRow {
    pub criterion_index: u32,
    pub title: String,
    pub status: String,
    pub evaluation: Option<String>,
    pub justification: Option<String>,
    pub sub_criterion_index: Option<u32>,
    pub sub_criterion_text: Option<String>,
    pub sub_criterion_evaluation: Option<String>,
    pub question_index: Option<u32>,
    pub response: Option<Answer>,
}

/// Full nested evaluation, as rendered by the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDocument {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    /// Indexed by criterion index; `None` marks an index with no stored criterion
    pub criteria: Vec<Option<CriterionDocument>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionDocument {
    pub criterion_index: u32,
    pub title: String,
    pub status: String,
    pub evaluation: Option<String>,
    pub justification: Option<String>,
    /// From the template; `None` if the template no longer has this criterion
    pub strictness: Option<Strictness>,
    /// Advisory label over all of this criterion's questions
    pub suggested_evaluation: Option<EvaluationLabel>,
    pub sub_criteria: Vec<Option<SubCriterionDocument>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCriterionDocument {
    pub sub_criterion_index: u32,
    pub text: String,
    pub evaluation: Option<String>,
    pub suggested_evaluation: Option<EvaluationLabel>,
    /// One slot per question; `None` is unanswered
    pub responses: Vec<Option<Answer>>,
}

/// Validated input for creating an evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvaluation {
    program_name: String,
    university_name: String,
}

impl NewEvaluation {
    /// Both names are required and must not be blank
    pub fn new(
        program_name: Option<String>,
        university_name: Option<String>,
    ) -> Result<Self, EvaluationError> {
        match (non_blank(program_name), non_blank(university_name)) {
            (Some(program_name), Some(university_name)) => Ok(Self {
                program_name,
                university_name,
            }),
            _ => Err(EvaluationError::Validation(
                "Program name and university name are required".into(),
            )),
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn university_name(&self) -> &str {
        &self.university_name
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reviewer edits to a criterion. Labels are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CriterionUpdate {
    /// Left unchanged when absent
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub evaluation: Option<String>,
    #[serde(default)]
    pub justification: Option<String>,
}

/// Full replacement of a sub-criterion's label and answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubCriterionUpdate {
    #[serde(default)]
    pub evaluation: Option<String>,
    #[serde(default)]
    pub responses: Vec<Option<Answer>>,
}
