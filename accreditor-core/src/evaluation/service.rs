//! Evaluation business logic

use std::sync::Arc;

use super::assembly::assemble;
use super::error::EvaluationError;
use super::store::EvaluationStore;
use super::types::{
    CriterionUpdate, Evaluation, EvaluationDocument, EvaluationSummary, NewEvaluation,
    SubCriterionUpdate,
};
use crate::template::CriteriaTemplate;

/// Service combining the evaluation store with the criteria template
pub struct EvaluationService<S: EvaluationStore> {
    store: Arc<S>,
    template: Arc<CriteriaTemplate>,
}

impl<S: EvaluationStore> EvaluationService<S> {
    pub fn new(store: Arc<S>, template: Arc<CriteriaTemplate>) -> Self {
        Self { store, template }
    }

    pub fn template(&self) -> &CriteriaTemplate {
        &self.template
    }

    /// List evaluations, most recently updated first
    pub fn list_evaluations(&self) -> Result<Vec<EvaluationSummary>, EvaluationError> {
        self.store.list_evaluations()
    }

    /// Load the nested evaluation document
    pub fn get_document(&self, id: i64) -> Result<EvaluationDocument, EvaluationError> {
        let evaluation = self
            .store
            .get_evaluation(id)?
            .ok_or_else(|| EvaluationError::NotFound(format!("Evaluation {}", id)))?;
        let rows = self.store.evaluation_rows(id)?;
        Ok(assemble(evaluation, rows, &self.template))
    }

    /// Create an evaluation with one criterion and sub-criterion per template entry
    pub fn create_evaluation(&self, new: NewEvaluation) -> Result<Evaluation, EvaluationError> {
        let evaluation = self.store.create_evaluation(&new, &self.template)?;
        tracing::info!(
            id = evaluation.id,
            program = %evaluation.program_name,
            university = %evaluation.university_name,
            criteria = self.template.len(),
            "Created evaluation"
        );
        Ok(evaluation)
    }

    /// Overwrite a criterion's status and labels.
    ///
    /// Returns the number of rows changed. Zero is not an error.
    pub fn update_criterion(
        &self,
        evaluation_id: i64,
        criterion_index: u32,
        update: &CriterionUpdate,
    ) -> Result<usize, EvaluationError> {
        let changes = self
            .store
            .update_criterion(evaluation_id, criterion_index, update)?;
        if changes == 0 {
            tracing::warn!(
                evaluation_id,
                criterion_index,
                "Criterion update matched no rows"
            );
        } else {
            tracing::debug!(evaluation_id, criterion_index, "Updated criterion");
        }
        Ok(changes)
    }

    /// Replace a sub-criterion's label and answers
    pub fn update_sub_criterion(
        &self,
        evaluation_id: i64,
        criterion_index: u32,
        sub_criterion_index: u32,
        update: &SubCriterionUpdate,
    ) -> Result<(), EvaluationError> {
        let sub_criterion_id = self
            .store
            .find_sub_criterion(evaluation_id, criterion_index, sub_criterion_index)?
            .ok_or_else(|| {
                EvaluationError::NotFound(format!(
                    "Sub-criterion {}.{} of evaluation {}",
                    criterion_index, sub_criterion_index, evaluation_id
                ))
            })?;

        self.store
            .replace_responses(evaluation_id, sub_criterion_id, update)?;
        tracing::debug!(
            evaluation_id,
            criterion_index,
            sub_criterion_index,
            answered = update.responses.iter().flatten().count(),
            "Replaced sub-criterion responses"
        );
        Ok(())
    }
}
