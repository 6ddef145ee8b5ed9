//! Folds flat join rows into the nested evaluation document
//!
//! Rows arrive ordered by criterion, sub-criterion and question index. Each
//! level is collected into an index-keyed map, then flattened into a vector
//! whose missing indices are `None`. Finally every level is padded to the
//! template's length: questions added to the template after an evaluation was
//! answered show up as unanswered, and criteria or sub-criteria added later
//! show up as `None` slots.

use std::collections::BTreeMap;

use super::types::{
    Answer, CriterionDocument, Evaluation, EvaluationDocument, EvaluationRow, SubCriterionDocument,
};
use crate::grading::ResponseTally;
use crate::template::CriteriaTemplate;

struct CriterionNode {
    title: String,
    status: String,
    evaluation: Option<String>,
    justification: Option<String>,
    sub_criteria: BTreeMap<u32, SubCriterionNode>,
}

struct SubCriterionNode {
    text: String,
    evaluation: Option<String>,
    responses: BTreeMap<u32, Answer>,
}

/// Build the evaluation document from its join rows
pub fn assemble(
    evaluation: Evaluation,
    rows: Vec<EvaluationRow>,
    template: &CriteriaTemplate,
) -> EvaluationDocument {
    let nodes = fold_rows(rows);

    let mut criteria: Vec<Option<CriterionDocument>> = flatten(nodes)
        .into_iter()
        .enumerate()
        .map(|(index, node)| node.map(|node| criterion_document(index as u32, node, template)))
        .collect();
    pad(&mut criteria, template.len());

    EvaluationDocument {
        evaluation,
        criteria,
    }
}

fn fold_rows(rows: Vec<EvaluationRow>) -> BTreeMap<u32, CriterionNode> {
    let mut criteria: BTreeMap<u32, CriterionNode> = BTreeMap::new();

    for row in rows {
        let EvaluationRow {
            criterion_index,
            title,
            status,
            evaluation,
            justification,
            sub_criterion_index,
            sub_criterion_text,
            sub_criterion_evaluation,
            question_index,
            response,
        } = row;

        let criterion = criteria
            .entry(criterion_index)
            .or_insert_with(|| CriterionNode {
                title,
                status,
                evaluation,
                justification,
                sub_criteria: BTreeMap::new(),
            });

        let Some(sub_criterion_index) = sub_criterion_index else {
            continue;
        };
        let sub_criterion = criterion
            .sub_criteria
            .entry(sub_criterion_index)
            .or_insert_with(|| SubCriterionNode {
                text: sub_criterion_text.unwrap_or_default(),
                evaluation: sub_criterion_evaluation,
                responses: BTreeMap::new(),
            });

        if let (Some(question_index), Some(answer)) = (question_index, response) {
            sub_criterion.responses.insert(question_index, answer);
        }
    }

    criteria
}

fn criterion_document(
    criterion_index: u32,
    node: CriterionNode,
    template: &CriteriaTemplate,
) -> CriterionDocument {
    let strictness = template.strictness(criterion_index as usize);
    let mut tally = ResponseTally::default();

    let mut sub_criteria: Vec<Option<SubCriterionDocument>> = flatten(node.sub_criteria)
        .into_iter()
        .enumerate()
        .map(|(sub_index, sub)| {
            sub.map(|sub| {
                let mut responses = flatten(sub.responses);
                pad(
                    &mut responses,
                    template.question_count(criterion_index as usize, sub_index),
                );

                let sub_tally = ResponseTally::from_responses(&responses);
                tally = tally.merge(sub_tally);

                SubCriterionDocument {
                    sub_criterion_index: sub_index as u32,
                    text: sub.text,
                    evaluation: sub.evaluation,
                    suggested_evaluation: strictness.map(|s| sub_tally.grade(s)),
                    responses,
                }
            })
        })
        .collect();
    pad(
        &mut sub_criteria,
        template
            .criterion(criterion_index as usize)
            .map_or(0, |c| c.sub_criteria.len()),
    );

    CriterionDocument {
        criterion_index,
        title: node.title,
        status: node.status,
        evaluation: node.evaluation,
        justification: node.justification,
        strictness,
        suggested_evaluation: strictness.map(|s| tally.grade(s)),
        sub_criteria,
    }
}

/// Grow `slots` with `None` up to the template's length; never truncates
fn pad<T>(slots: &mut Vec<Option<T>>, declared: usize) {
    if slots.len() < declared {
        slots.resize_with(declared, || None);
    }
}

/// Turn an index-keyed map into a dense vector, leaving gaps as `None`
fn flatten<T>(map: BTreeMap<u32, T>) -> Vec<Option<T>> {
    let len = map.keys().next_back().map_or(0, |max| *max as usize + 1);
    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(len).collect();
    for (index, value) in map {
        slots[index as usize] = Some(value);
    }
    slots
}
