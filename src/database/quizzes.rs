// ABOUTME: Quiz bank storage: type-checked questions, student attempts and performance aggregates
// ABOUTME: Every question is validated before insert and re-validated when read back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    AttemptStatus, NewQuiz, NewQuizAttempt, NewQuizPerformance, NewQuizQuestion, QuestionPayload,
    QuestionType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::Row;

/// Quiz header as read back from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    /// Row id
    pub id: i64,
    /// Owning subject
    pub subject_id: i64,
    /// Unique slug
    pub slug: String,
    /// Stored quiz type string
    pub quiz_type: String,
    /// Denormalized question count
    pub total_questions: i64,
    /// Answers revealed after submission
    pub show_correct_answers: bool,
}

/// Stored attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttemptRecord {
    /// Row id
    pub id: i64,
    /// Attempted quiz
    pub quiz_id: i64,
    /// Student
    pub user_id: i64,
    /// Lifecycle state
    pub status: AttemptStatus,
    /// Question total at attempt time
    pub total_questions: i64,
    /// Sum of question points
    pub max_score: i64,
    /// Correct answers, completed attempts only
    pub correct_answers: Option<i64>,
    /// Wrong answers, completed attempts only
    pub incorrect_answers: Option<i64>,
    /// Blank answers, completed attempts only
    pub skipped_answers: Option<i64>,
    /// Score in percent, completed attempts only
    pub score_percentage: Option<f64>,
    /// Points earned, completed attempts only
    pub total_points: Option<i64>,
    /// Pass flag, completed attempts only
    pub passed: Option<bool>,
    /// Start time
    pub started_at: DateTime<Utc>,
    /// Submission time, completed attempts only
    pub completed_at: Option<DateTime<Utc>>,
    /// Answers keyed by question id
    pub answers: Value,
}

/// Stored per-student aggregate for one quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizPerformanceRecord {
    /// Student
    pub user_id: i64,
    /// Quiz
    pub quiz_id: i64,
    /// Subject of the quiz
    pub subject_id: i64,
    /// Completed attempts
    pub total_attempts: i64,
    /// Highest score
    pub best_score: f64,
    /// Mean score
    pub average_score: f64,
    /// Minutes across completed attempts
    pub total_time_spent_minutes: f64,
    /// Latest submission
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// Weak concepts keyed by tag
    pub weak_concepts: Value,
}

/// Stored question with its decoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestionRecord {
    /// Row id
    pub id: i64,
    /// Owning quiz
    pub quiz_id: i64,
    /// 1-based position
    pub question_order: i64,
    /// Options and answer
    pub payload: QuestionPayload,
}

impl Database {
    pub(super) async fn migrate_quizzes(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS quizzes (
                id INTEGER PRIMARY KEY,
                subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                chapter_id INTEGER REFERENCES content_chapters(id) ON DELETE SET NULL,
                title_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                description_ar TEXT,
                quiz_type TEXT NOT NULL CHECK (quiz_type IN ('practice', 'timed', 'exam')),
                time_limit_minutes INTEGER,
                passing_score INTEGER NOT NULL DEFAULT 50,
                difficulty_level TEXT NOT NULL DEFAULT 'medium',
                estimated_duration_minutes INTEGER NOT NULL DEFAULT 0,
                shuffle_questions BOOLEAN NOT NULL DEFAULT 0,
                shuffle_answers BOOLEAN NOT NULL DEFAULT 0,
                show_correct_answers BOOLEAN NOT NULL DEFAULT 1,
                allow_review BOOLEAN NOT NULL DEFAULT 1,
                total_questions INTEGER NOT NULL DEFAULT 0,
                average_score REAL NOT NULL DEFAULT 0,
                total_attempts INTEGER NOT NULL DEFAULT 0,
                tags TEXT NOT NULL DEFAULT '[]',
                is_published BOOLEAN NOT NULL DEFAULT 0,
                is_premium BOOLEAN NOT NULL DEFAULT 0,
                created_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS quiz_questions (
                id INTEGER PRIMARY KEY,
                quiz_id INTEGER NOT NULL REFERENCES quizzes(id) ON DELETE CASCADE,
                question_type TEXT NOT NULL
                    CHECK (question_type IN ('mcq_single', 'mcq_multiple', 'true_false', 'fill_blank')),
                question_text_ar TEXT NOT NULL,
                options TEXT,
                correct_answer TEXT NOT NULL,
                points INTEGER NOT NULL DEFAULT 1,
                question_order INTEGER NOT NULL,
                explanation_ar TEXT,
                difficulty TEXT NOT NULL DEFAULT 'medium',
                tags TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS quiz_attempts (
                id INTEGER PRIMARY KEY,
                quiz_id INTEGER NOT NULL REFERENCES quizzes(id) ON DELETE CASCADE,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                started_at DATETIME NOT NULL,
                completed_at DATETIME,
                time_spent_seconds INTEGER,
                status TEXT NOT NULL CHECK (status IN ('in_progress', 'completed', 'abandoned')),
                total_questions INTEGER NOT NULL,
                correct_answers INTEGER,
                incorrect_answers INTEGER,
                skipped_answers INTEGER,
                score_percentage REAL,
                total_points INTEGER,
                max_score INTEGER NOT NULL,
                passed BOOLEAN,
                answers TEXT NOT NULL DEFAULT '{}',
                seed INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS user_quiz_performances (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                quiz_id INTEGER NOT NULL REFERENCES quizzes(id) ON DELETE CASCADE,
                subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                total_attempts INTEGER NOT NULL DEFAULT 0,
                best_score REAL NOT NULL DEFAULT 0,
                average_score REAL NOT NULL DEFAULT 0,
                total_time_spent_minutes REAL NOT NULL DEFAULT 0,
                last_attempt_at DATETIME,
                weak_concepts TEXT NOT NULL DEFAULT '{}',
                UNIQUE (user_id, quiz_id, subject_id)
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_quiz_questions_quiz ON quiz_questions(quiz_id)",
            "CREATE INDEX IF NOT EXISTS idx_quiz_attempts_quiz ON quiz_attempts(quiz_id, user_id)",
        ])
        .await
    }

    /// Number of quizzes a subject already has
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_quizzes_for_subject(&self, subject_id: i64) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM quizzes WHERE subject_id = ?1")
            .bind(subject_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count quizzes: {e}")))?;

        Ok(row.get("total"))
    }

    /// Insert a quiz header
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be encoded or the insert fails
    pub async fn insert_quiz(&self, quiz: &NewQuiz) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO quizzes (
                subject_id, chapter_id, title_ar, slug, description_ar, quiz_type,
                time_limit_minutes, passing_score, difficulty_level, estimated_duration_minutes,
                shuffle_questions, shuffle_answers, show_correct_answers, allow_review, tags,
                is_published, is_premium, created_by
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            ",
        )
        .bind(quiz.subject_id)
        .bind(quiz.chapter_id)
        .bind(&quiz.title_ar)
        .bind(&quiz.slug)
        .bind(&quiz.description_ar)
        .bind(quiz.quiz_type.as_str())
        .bind(quiz.time_limit_minutes.map(i64::from))
        .bind(i64::from(quiz.passing_score))
        .bind(quiz.difficulty.as_str())
        .bind(i64::from(quiz.estimated_duration_minutes))
        .bind(quiz.shuffle_questions)
        .bind(quiz.shuffle_answers)
        .bind(quiz.show_correct_answers)
        .bind(quiz.allow_review)
        .bind(serde_json::to_string(&quiz.tags)?)
        .bind(quiz.is_published)
        .bind(quiz.is_premium)
        .bind(quiz.created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert quiz {}: {e}", quiz.slug)))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a question after checking its payload shape
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` for a malformed payload, or a database error
    pub async fn insert_quiz_question(&self, question: &NewQuizQuestion) -> AppResult<i64> {
        question.payload.validate()?;

        let options = question
            .payload
            .options_json()
            .map(|options| serde_json::to_string(&options))
            .transpose()?;
        let answer = serde_json::to_string(&question.payload.answer_json())?;

        let result = sqlx::query(
            r"
            INSERT INTO quiz_questions (
                quiz_id, question_type, question_text_ar, options, correct_answer, points,
                question_order, explanation_ar, difficulty, tags
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(question.quiz_id)
        .bind(question.payload.question_type().as_str())
        .bind(&question.question_text_ar)
        .bind(options)
        .bind(answer)
        .bind(i64::from(question.points))
        .bind(question.question_order)
        .bind(&question.explanation_ar)
        .bind(question.difficulty.as_str())
        .bind(serde_json::to_string(&question.tags)?)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert quiz question: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Recompute the denormalized question count of a quiz
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn sync_quiz_total_questions(&self, quiz_id: i64) -> AppResult<()> {
        sqlx::query(
            r"
            UPDATE quizzes
            SET total_questions = (SELECT COUNT(*) FROM quiz_questions WHERE quiz_id = ?1)
            WHERE id = ?1
            ",
        )
        .bind(quiz_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to sync question count: {e}")))?;

        Ok(())
    }

    /// List every quiz header
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_quizzes(&self) -> AppResult<Vec<QuizSummary>> {
        let rows = sqlx::query(
            r"
            SELECT id, subject_id, slug, quiz_type, total_questions, show_correct_answers
            FROM quizzes
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list quizzes: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| QuizSummary {
                id: row.get("id"),
                subject_id: row.get("subject_id"),
                slug: row.get("slug"),
                quiz_type: row.get("quiz_type"),
                total_questions: row.get("total_questions"),
                show_correct_answers: row.get("show_correct_answers"),
            })
            .collect())
    }

    /// Read back the questions of a quiz, decoding and checking each payload
    ///
    /// # Errors
    ///
    /// Returns a database error, or `InvalidPayload` if a stored payload is malformed
    pub async fn list_quiz_questions(&self, quiz_id: i64) -> AppResult<Vec<QuizQuestionRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, quiz_id, question_type, options, correct_answer, question_order
            FROM quiz_questions
            WHERE quiz_id = ?1
            ORDER BY question_order
            ",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list quiz questions: {e}")))?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            let question_type: String = row.get("question_type");
            let question_type: QuestionType = question_type.parse()?;
            let options: Option<String> = row.get("options");
            let options: Option<Value> = options
                .map(|raw| serde_json::from_str(&raw))
                .transpose()?;
            let answer: String = row.get("correct_answer");
            let answer: Value = serde_json::from_str(&answer)?;

            questions.push(QuizQuestionRecord {
                id: row.get("id"),
                quiz_id: row.get("quiz_id"),
                question_order: row.get("question_order"),
                payload: QuestionPayload::from_stored(question_type, options.as_ref(), &answer)?,
            });
        }
        Ok(questions)
    }

    /// Delete a quiz by slug with its questions, attempts and performance rows
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_quiz_by_slug(&self, slug: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM quizzes WHERE slug = ?1")
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete quiz {slug}: {e}")))?;

        Ok(result.rows_affected())
    }

    /// Insert an attempt after checking that its score matches its status
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an inconsistent attempt, or a database error
    pub async fn insert_quiz_attempt(&self, attempt: &NewQuizAttempt) -> AppResult<i64> {
        attempt.validate()?;
        let result = attempt.result.as_ref();

        let inserted = sqlx::query(
            r"
            INSERT INTO quiz_attempts (
                quiz_id, user_id, started_at, completed_at, time_spent_seconds, status,
                total_questions, correct_answers, incorrect_answers, skipped_answers,
                score_percentage, total_points, max_score, passed, answers, seed
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            ",
        )
        .bind(attempt.quiz_id)
        .bind(attempt.user_id)
        .bind(attempt.started_at)
        .bind(result.map(|r| r.completed_at))
        .bind(result.map(|r| i64::from(r.time_spent_seconds)))
        .bind(attempt.status.as_str())
        .bind(i64::from(attempt.total_questions))
        .bind(result.map(|r| i64::from(r.correct_answers)))
        .bind(result.map(|r| i64::from(r.incorrect_answers)))
        .bind(result.map(|r| i64::from(r.skipped_answers)))
        .bind(result.map(|r| r.score_percentage))
        .bind(result.map(|r| i64::from(r.total_points)))
        .bind(i64::from(attempt.max_score))
        .bind(result.map(|r| r.passed))
        .bind(serde_json::to_string(&attempt.answers)?)
        .bind(i64::from(attempt.seed))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert quiz attempt: {e}")))?;

        Ok(inserted.last_insert_rowid())
    }

    /// Recompute the attempt counter and average score of a quiz from completed attempts
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn sync_quiz_attempt_stats(&self, quiz_id: i64) -> AppResult<()> {
        sqlx::query(
            r"
            UPDATE quizzes
            SET total_attempts = (
                    SELECT COUNT(*) FROM quiz_attempts
                    WHERE quiz_id = ?1 AND status = 'completed'
                ),
                average_score = COALESCE((
                    SELECT ROUND(AVG(score_percentage), 2) FROM quiz_attempts
                    WHERE quiz_id = ?1 AND status = 'completed'
                ), 0)
            WHERE id = ?1
            ",
        )
        .bind(quiz_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to sync attempt stats: {e}")))?;

        Ok(())
    }

    /// Attempts on a quiz in insertion order
    ///
    /// # Errors
    ///
    /// Returns a database error, or `InvalidInput` if a stored status is unknown
    pub async fn list_quiz_attempts(&self, quiz_id: i64) -> AppResult<Vec<QuizAttemptRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, quiz_id, user_id, status, total_questions, max_score, correct_answers,
                   incorrect_answers, skipped_answers, score_percentage, total_points, passed,
                   started_at, completed_at, answers
            FROM quiz_attempts
            WHERE quiz_id = ?1
            ORDER BY id
            ",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list quiz attempts: {e}")))?;

        let mut attempts = Vec::with_capacity(rows.len());
        for row in rows {
            let status: String = row.get("status");
            let answers: String = row.get("answers");
            attempts.push(QuizAttemptRecord {
                id: row.get("id"),
                quiz_id: row.get("quiz_id"),
                user_id: row.get("user_id"),
                status: status.parse()?,
                total_questions: row.get("total_questions"),
                max_score: row.get("max_score"),
                correct_answers: row.get("correct_answers"),
                incorrect_answers: row.get("incorrect_answers"),
                skipped_answers: row.get("skipped_answers"),
                score_percentage: row.get("score_percentage"),
                total_points: row.get("total_points"),
                passed: row.get("passed"),
                started_at: row.get("started_at"),
                completed_at: row.get("completed_at"),
                answers: serde_json::from_str(&answers)?,
            });
        }
        Ok(attempts)
    }

    /// Insert or refresh the aggregate of one student on one quiz
    ///
    /// # Errors
    ///
    /// Returns an error if the weak concepts cannot be encoded or the upsert fails
    pub async fn upsert_quiz_performance(&self, performance: &NewQuizPerformance) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_quiz_performances (
                user_id, quiz_id, subject_id, total_attempts, best_score, average_score,
                total_time_spent_minutes, last_attempt_at, weak_concepts
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(user_id, quiz_id, subject_id) DO UPDATE SET
                total_attempts = excluded.total_attempts,
                best_score = excluded.best_score,
                average_score = excluded.average_score,
                total_time_spent_minutes = excluded.total_time_spent_minutes,
                last_attempt_at = excluded.last_attempt_at,
                weak_concepts = excluded.weak_concepts
            ",
        )
        .bind(performance.user_id)
        .bind(performance.quiz_id)
        .bind(performance.subject_id)
        .bind(i64::from(performance.total_attempts))
        .bind(performance.best_score)
        .bind(performance.average_score)
        .bind(performance.total_time_spent_minutes)
        .bind(performance.last_attempt_at)
        .bind(serde_json::to_string(&performance.weak_concepts)?)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert quiz performance: {e}")))?;

        Ok(())
    }

    /// Every performance row ordered by quiz then student
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or stored weak concepts are not JSON
    pub async fn list_quiz_performances(&self) -> AppResult<Vec<QuizPerformanceRecord>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, quiz_id, subject_id, total_attempts, best_score, average_score,
                   total_time_spent_minutes, last_attempt_at, weak_concepts
            FROM user_quiz_performances
            ORDER BY quiz_id, user_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list quiz performances: {e}")))?;

        let mut performances = Vec::with_capacity(rows.len());
        for row in rows {
            let weak_concepts: String = row.get("weak_concepts");
            performances.push(QuizPerformanceRecord {
                user_id: row.get("user_id"),
                quiz_id: row.get("quiz_id"),
                subject_id: row.get("subject_id"),
                total_attempts: row.get("total_attempts"),
                best_score: row.get("best_score"),
                average_score: row.get("average_score"),
                total_time_spent_minutes: row.get("total_time_spent_minutes"),
                last_attempt_at: row.get("last_attempt_at"),
                weak_concepts: serde_json::from_str(&weak_concepts)?,
            });
        }
        Ok(performances)
    }
}
