//! Evaluations: persisted reviews of a program against the criteria template

mod assembly;
mod error;
mod migrations;
mod service;
mod store;
mod types;

pub use assembly::assemble;
pub use error::EvaluationError;
pub use service::EvaluationService;
pub use store::{EvaluationStore, SqliteEvaluationStore};
pub use types::{
    Answer, COMPLETED_STATUS, CriterionDocument, CriterionUpdate, DEFAULT_STATUS, Evaluation,
    EvaluationDocument, EvaluationRow, EvaluationSummary, NewEvaluation, SubCriterionDocument,
    SubCriterionUpdate,
};
