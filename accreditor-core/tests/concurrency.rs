//! Concurrency tests for EvaluationService
//!
//! Updates to different sub-criteria of one evaluation may interleave freely:
//! - both succeed
//! - both bump the evaluation's update timestamp

use std::sync::Arc;

use accreditor_core::{
    Answer, CriteriaTemplate, EvaluationService, NewEvaluation, SqliteEvaluationStore,
    SubCriterionUpdate,
};
use chrono::Utc;
use tempfile::TempDir;

fn template() -> CriteriaTemplate {
    CriteriaTemplate::from_json(
        r#"[
            {"title": "Students", "type": "must", "subCriteria": [
                {"text": "Admission", "questions": ["a", "b", "c", "d"]},
                {"text": "Advising", "questions": ["a", "b", "c", "d"]}
            ]}
        ]"#,
    )
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_sub_criterion_updates_both_apply() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteEvaluationStore::open(temp_dir.path().join("eval.db")).unwrap());
    let service = Arc::new(EvaluationService::new(store, Arc::new(template())));

    let evaluation = service
        .create_evaluation(
            NewEvaluation::new(Some("Computer Science".into()), Some("State U".into())).unwrap(),
        )
        .unwrap();
    let id = evaluation.id;

    let spawn_update = |sub_index: u32, answer: Answer| {
        let service = Arc::clone(&service);
        tokio::task::spawn_blocking(move || {
            let started = Utc::now();
            service
                .update_sub_criterion(
                    id,
                    0,
                    sub_index,
                    &SubCriterionUpdate {
                        evaluation: None,
                        responses: vec![Some(answer); 4],
                    },
                )
                .map(|_| started)
        })
    };

    let first = spawn_update(0, Answer::Yes);
    let second = spawn_update(1, Answer::No);
    let started_first = first.await.unwrap().unwrap();
    let started_second = second.await.unwrap().unwrap();
    let latest_start = started_first.max(started_second);

    let doc = service.get_document(id).unwrap();
    assert!(doc.evaluation.updated_at.timestamp_millis() >= latest_start.timestamp_millis());

    let criterion = doc.criteria[0].as_ref().unwrap();
    let admission = criterion.sub_criteria[0].as_ref().unwrap();
    let advising = criterion.sub_criteria[1].as_ref().unwrap();
    assert_eq!(admission.responses, vec![Some(Answer::Yes); 4]);
    assert_eq!(advising.responses, vec![Some(Answer::No); 4]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_concurrent_updates_to_same_sub_criterion_leave_one_full_set() {
    let store = Arc::new(SqliteEvaluationStore::open_in_memory().unwrap());
    let service = Arc::new(EvaluationService::new(store, Arc::new(template())));
    let id = service
        .create_evaluation(NewEvaluation::new(Some("CS".into()), Some("State U".into())).unwrap())
        .unwrap()
        .id;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            let answer = if i % 2 == 0 { Answer::Yes } else { Answer::No };
            tokio::task::spawn_blocking(move || {
                service.update_sub_criterion(
                    id,
                    0,
                    0,
                    &SubCriterionUpdate {
                        evaluation: None,
                        responses: vec![Some(answer); 4],
                    },
                )
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // each replace is atomic, so the stored set is one submission, never a mix
    let doc = service.get_document(id).unwrap();
    let responses = &doc.criteria[0].as_ref().unwrap().sub_criteria[0]
        .as_ref()
        .unwrap()
        .responses;
    assert_eq!(responses.len(), 4);
    assert!(responses.iter().all(|r| *r == responses[0]));
}
