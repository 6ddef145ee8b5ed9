//! accreditor-core: Core library for accreditation evaluations
//!
//! This crate provides the pieces the server is assembled from:
//!
//! - **Criteria template** - [`CriteriaTemplate`], the fixed criteria → sub-criteria → questions layout
//! - **Grading** - [`grade`], the advisory rule mapping "No" ratios to an [`EvaluationLabel`]
//! - **Persistence** - [`EvaluationStore`] and its SQLite implementation [`SqliteEvaluationStore`]
//! - **Assembly** - [`assemble`], turning joined rows into an [`EvaluationDocument`]
//! - **Service** - [`EvaluationService`], the operations exposed over HTTP
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use accreditor_core::{CriteriaTemplate, EvaluationService, NewEvaluation, SqliteEvaluationStore};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let template = Arc::new(CriteriaTemplate::load_or_empty("config/criteria.json"));
//!     let store = Arc::new(SqliteEvaluationStore::open("accreditor.db")?);
//!     let service = EvaluationService::new(store, template);
//!
//!     let new = NewEvaluation::new(Some("Computer Science".into()), Some("State University".into()))?;
//!     let evaluation = service.create_evaluation(new)?;
//!     let document = service.get_document(evaluation.id)?;
//!     println!("{} criteria", document.criteria.len());
//!     Ok(())
//! }
//! ```

pub mod evaluation;
pub mod grading;
pub mod template;

pub use evaluation::{
    Answer, CriterionDocument, CriterionUpdate, Evaluation, EvaluationDocument, EvaluationError,
    EvaluationService, EvaluationStore, EvaluationSummary, NewEvaluation, SqliteEvaluationStore,
    SubCriterionDocument, SubCriterionUpdate, assemble,
};
pub use grading::{EvaluationLabel, ResponseTally, Strictness, grade};
pub use template::{CriteriaTemplate, TemplateCriterion, TemplateError, TemplateSubCriterion};
