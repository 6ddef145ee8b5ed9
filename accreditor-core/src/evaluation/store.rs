//! Evaluation storage trait and SQLite implementation

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::error::EvaluationError;
use super::migrations;
use super::types::{
    Answer, COMPLETED_STATUS, CriterionUpdate, DEFAULT_STATUS, Evaluation, EvaluationRow,
    EvaluationSummary, NewEvaluation, SubCriterionUpdate,
};
use crate::template::CriteriaTemplate;

/// Evaluation storage trait
pub trait EvaluationStore: Send + Sync {
    /// All evaluations with progress counts, most recently updated first
    fn list_evaluations(&self) -> Result<Vec<EvaluationSummary>, EvaluationError>;
    fn get_evaluation(&self, id: i64) -> Result<Option<Evaluation>, EvaluationError>;

    /// Joined rows ordered by criterion, sub-criterion and question index
    fn evaluation_rows(&self, evaluation_id: i64) -> Result<Vec<EvaluationRow>, EvaluationError>;

    /// Insert the evaluation and its full criteria skeleton copied from `template`
    fn create_evaluation(
        &self,
        new: &NewEvaluation,
        template: &CriteriaTemplate,
    ) -> Result<Evaluation, EvaluationError>;

    /// Returns the number of criterion rows changed
    fn update_criterion(
        &self,
        evaluation_id: i64,
        criterion_index: u32,
        update: &CriterionUpdate,
    ) -> Result<usize, EvaluationError>;

    /// Resolve a sub-criterion's row id from its position
    fn find_sub_criterion(
        &self,
        evaluation_id: i64,
        criterion_index: u32,
        sub_criterion_index: u32,
    ) -> Result<Option<i64>, EvaluationError>;

    /// Set the label and replace every stored answer of a sub-criterion
    fn replace_responses(
        &self,
        evaluation_id: i64,
        sub_criterion_id: i64,
        update: &SubCriterionUpdate,
    ) -> Result<(), EvaluationError>;
}

/// SQLite-backed evaluation store
pub struct SqliteEvaluationStore {
    conn: Mutex<Connection>,
}

impl SqliteEvaluationStore {
    /// Open or create database at path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EvaluationError> {
        Self::init(Connection::open(path)?)
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, EvaluationError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, EvaluationError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, EvaluationError> {
        self.conn.lock().map_err(|_| EvaluationError::LockPoisoned)
    }

    fn row_to_evaluation(row: &rusqlite::Row) -> Result<Evaluation, rusqlite::Error> {
        Ok(Evaluation {
            id: row.get(0)?,
            program_name: row.get(1)?,
            university_name: row.get(2)?,
            created_at: from_millis(row.get(3)?),
            updated_at: from_millis(row.get(4)?),
        })
    }

    fn row_to_join(row: &rusqlite::Row) -> Result<EvaluationRow, rusqlite::Error> {
        let response: Option<String> = row.get(9)?;
        Ok(EvaluationRow {
            criterion_index: row.get(0)?,
            title: row.get(1)?,
            status: row.get(2)?,
            evaluation: row.get(3)?,
            justification: row.get(4)?,
            sub_criterion_index: row.get(5)?,
            sub_criterion_text: row.get(6)?,
            sub_criterion_evaluation: row.get(7)?,
            question_index: row.get(8)?,
            response: response.as_deref().and_then(Answer::parse),
        })
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

const TOUCH_EVALUATION: &str = "UPDATE evaluations SET updated_at = ?2 WHERE id = ?1";

impl EvaluationStore for SqliteEvaluationStore {
    fn list_evaluations(&self) -> Result<Vec<EvaluationSummary>, EvaluationError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT e.id, e.program_name, e.university_name, e.created_at, e.updated_at,
                    COUNT(c.id) AS total_criteria,
                    COALESCE(SUM(CASE WHEN c.status = ?1 THEN 1 ELSE 0 END), 0) AS completed_criteria
             FROM evaluations e
             LEFT JOIN criteria c ON c.evaluation_id = e.id
             GROUP BY e.id
             ORDER BY e.updated_at DESC, e.id DESC",
        )?;

        let rows = stmt.query_map([COMPLETED_STATUS], |row| {
            Ok(EvaluationSummary {
                evaluation: Self::row_to_evaluation(row)?,
                total_criteria: row.get(5)?,
                completed_criteria: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn get_evaluation(&self, id: i64) -> Result<Option<Evaluation>, EvaluationError> {
        let conn = self.conn()?;
        let evaluation = conn
            .query_row(
                "SELECT id, program_name, university_name, created_at, updated_at
                 FROM evaluations WHERE id = ?1",
                [id],
                Self::row_to_evaluation,
            )
            .optional()?;
        Ok(evaluation)
    }

    fn evaluation_rows(&self, evaluation_id: i64) -> Result<Vec<EvaluationRow>, EvaluationError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT c.criterion_index, c.title, c.status, c.evaluation, c.justification,
                    s.sub_criterion_index, s.text, s.evaluation,
                    r.question_index, r.response
             FROM criteria c
             LEFT JOIN sub_criteria s ON s.criterion_id = c.id
             LEFT JOIN responses r ON r.sub_criterion_id = s.id
             WHERE c.evaluation_id = ?1
             ORDER BY c.criterion_index, s.sub_criterion_index, r.question_index",
        )?;
        let rows = stmt.query_map([evaluation_id], Self::row_to_join)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn create_evaluation(
        &self,
        new: &NewEvaluation,
        template: &CriteriaTemplate,
    ) -> Result<Evaluation, EvaluationError> {
        let mut conn = self.conn()?;
        let now = now_millis();

        // The skeleton is written all-or-nothing
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO evaluations (program_name, university_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            rusqlite::params![new.program_name(), new.university_name(), now],
        )?;
        let id = tx.last_insert_rowid();

        {
            let mut insert_criterion = tx.prepare(
                "INSERT INTO criteria (evaluation_id, criterion_index, title, status)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut insert_sub_criterion = tx.prepare(
                "INSERT INTO sub_criteria (criterion_id, sub_criterion_index, text)
                 VALUES (?1, ?2, ?3)",
            )?;

            for (criterion_index, criterion) in template.criteria().iter().enumerate() {
                let criterion_id = insert_criterion.insert(rusqlite::params![
                    id,
                    criterion_index as i64,
                    criterion.title,
                    DEFAULT_STATUS,
                ])?;
                for (sub_index, sub) in criterion.sub_criteria.iter().enumerate() {
                    insert_sub_criterion.execute(rusqlite::params![
                        criterion_id,
                        sub_index as i64,
                        sub.text,
                    ])?;
                }
            }
        }
        tx.commit()?;

        Ok(Evaluation {
            id,
            program_name: new.program_name().to_string(),
            university_name: new.university_name().to_string(),
            created_at: from_millis(now),
            updated_at: from_millis(now),
        })
    }

    fn update_criterion(
        &self,
        evaluation_id: i64,
        criterion_index: u32,
        update: &CriterionUpdate,
    ) -> Result<usize, EvaluationError> {
        let conn = self.conn()?;
        let changes = conn.execute(
            "UPDATE criteria SET
                status = COALESCE(?3, status), evaluation = ?4, justification = ?5
             WHERE evaluation_id = ?1 AND criterion_index = ?2",
            rusqlite::params![
                evaluation_id,
                criterion_index,
                update.status,
                update.evaluation,
                update.justification,
            ],
        )?;
        conn.execute(
            TOUCH_EVALUATION,
            rusqlite::params![evaluation_id, now_millis()],
        )?;
        Ok(changes)
    }

    fn find_sub_criterion(
        &self,
        evaluation_id: i64,
        criterion_index: u32,
        sub_criterion_index: u32,
    ) -> Result<Option<i64>, EvaluationError> {
        let conn = self.conn()?;
        let id = conn
            .query_row(
                "SELECT s.id FROM sub_criteria s
                 INNER JOIN criteria c ON s.criterion_id = c.id
                 WHERE c.evaluation_id = ?1 AND c.criterion_index = ?2
                   AND s.sub_criterion_index = ?3",
                rusqlite::params![evaluation_id, criterion_index, sub_criterion_index],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn replace_responses(
        &self,
        evaluation_id: i64,
        sub_criterion_id: i64,
        update: &SubCriterionUpdate,
    ) -> Result<(), EvaluationError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "UPDATE sub_criteria SET evaluation = ?2 WHERE id = ?1",
            rusqlite::params![sub_criterion_id, update.evaluation],
        )?;
        tx.execute(
            "DELETE FROM responses WHERE sub_criterion_id = ?1",
            [sub_criterion_id],
        )?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO responses (sub_criterion_id, question_index, response)
                 VALUES (?1, ?2, ?3)",
            )?;
            // Unanswered slots are not stored
            for (question_index, answer) in update.responses.iter().enumerate() {
                if let Some(answer) = answer {
                    insert.execute(rusqlite::params![
                        sub_criterion_id,
                        question_index as i64,
                        answer.as_str(),
                    ])?;
                }
            }
        }
        tx.execute(
            TOUCH_EVALUATION,
            rusqlite::params![evaluation_id, now_millis()],
        )?;
        tx.commit()?;
        Ok(())
    }
}
