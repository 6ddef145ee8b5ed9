//! Advisory grading of criteria from their yes/no responses
//!
//! The label produced here is only a suggestion shown next to the reviewer's
//! own choice. Persisted evaluation labels are free text and never checked
//! against [`grade`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::evaluation::Answer;

/// Which threshold table applies to a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Mandatory requirements, graded harshly
    Must,
    /// Recommended practice
    Should,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::Should => "should",
        }
    }
}

/// Qualitative outcome of grading, from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvaluationLabel {
    Compliance,
    Concern,
    Weakness,
    Deficiency,
}

impl EvaluationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliance => "Compliance",
            Self::Concern => "Concern",
            Self::Weakness => "Weakness",
            Self::Deficiency => "Deficiency",
        }
    }
}

impl fmt::Display for EvaluationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map the share of "No" answers in a scope to a label.
///
/// An empty scope (`total == 0`) grades as [`EvaluationLabel::Compliance`]:
/// there is nothing to object to.
pub fn grade(total: usize, no_count: usize, strictness: Strictness) -> EvaluationLabel {
    if total == 0 {
        return EvaluationLabel::Compliance;
    }
    let ratio = no_count as f64 / total as f64;

    match strictness {
        Strictness::Must => {
            if ratio >= 0.5 {
                EvaluationLabel::Deficiency
            } else if ratio > 0.25 {
                EvaluationLabel::Weakness
            } else if ratio > 0.0 {
                EvaluationLabel::Concern
            } else {
                EvaluationLabel::Compliance
            }
        }
        Strictness::Should => {
            if ratio >= 0.75 {
                EvaluationLabel::Weakness
            } else if ratio >= 0.5 {
                EvaluationLabel::Concern
            } else {
                EvaluationLabel::Compliance
            }
        }
    }
}

/// Counts of answers over a set of question slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseTally {
    pub yes: usize,
    pub no: usize,
    pub unanswered: usize,
}

impl ResponseTally {
    pub fn from_responses(responses: &[Option<Answer>]) -> Self {
        responses.iter().fold(Self::default(), |mut tally, slot| {
            match slot {
                Some(Answer::Yes) => tally.yes += 1,
                Some(Answer::No) => tally.no += 1,
                None => tally.unanswered += 1,
            }
            tally
        })
    }

    /// Number of question slots, answered or not
    pub fn total(&self) -> usize {
        self.yes + self.no + self.unanswered
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            yes: self.yes + other.yes,
            no: self.no + other.no,
            unanswered: self.unanswered + other.unanswered,
        }
    }

    pub fn grade(&self, strictness: Strictness) -> EvaluationLabel {
        grade(self.total(), self.no, strictness)
    }
}
