// ABOUTME: Quiz and question models with type-consistent answer payloads
// ABOUTME: QuestionPayload ties the options/answer JSON shape to the question type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Difficulty;
use crate::errors::{AppError, AppResult};

/// Quiz delivery mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
    /// Untimed practice
    Practice,
    /// Short timed quiz
    Timed,
    /// Exam conditions, no answer review
    Exam,
}

impl QuizType {
    /// Every quiz type
    pub const ALL: [Self; 3] = [Self::Practice, Self::Timed, Self::Exam];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Practice => "practice",
            Self::Timed => "timed",
            Self::Exam => "exam",
        }
    }

    /// Candidate time limits in minutes, empty when the quiz is untimed
    #[must_use]
    pub const fn time_limit_choices(&self) -> &'static [u32] {
        match self {
            Self::Practice => &[],
            Self::Timed => &[15, 20, 30, 45],
            Self::Exam => &[45, 60, 90, 120],
        }
    }

    /// Arabic label used in generated descriptions
    #[must_use]
    pub const fn label_ar(&self) -> &'static str {
        match self {
            Self::Practice => "تدريبي",
            Self::Timed => "موقوت",
            Self::Exam => "امتحان",
        }
    }

    /// Whether correct answers are revealed after submission
    #[must_use]
    pub const fn reveals_answers(&self) -> bool {
        !matches!(self, Self::Exam)
    }
}

/// Question kind, the discriminator for the answer payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// One correct option
    McqSingle,
    /// Several correct options
    McqMultiple,
    /// Boolean statement
    TrueFalse,
    /// Free text completion
    FillBlank,
}

impl QuestionType {
    /// Every question type
    pub const ALL: [Self; 4] = [
        Self::McqSingle,
        Self::McqMultiple,
        Self::TrueFalse,
        Self::FillBlank,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::McqSingle => "mcq_single",
            Self::McqMultiple => "mcq_multiple",
            Self::TrueFalse => "true_false",
            Self::FillBlank => "fill_blank",
        }
    }

    /// Candidate point values
    #[must_use]
    pub const fn point_choices(&self) -> &'static [u32] {
        match self {
            Self::McqSingle => &[3, 4, 5, 6],
            Self::McqMultiple => &[5, 6, 7, 8],
            Self::TrueFalse => &[2, 3, 4],
            Self::FillBlank => &[4, 5, 6],
        }
    }

    /// Arabic tag attached to generated questions
    #[must_use]
    pub const fn tag_ar(&self) -> &'static str {
        match self {
            Self::McqSingle => "اختيار من متعدد",
            Self::McqMultiple => "اختيار متعدد",
            Self::TrueFalse => "صح أو خطأ",
            Self::FillBlank => "أكمل الفراغ",
        }
    }
}

impl FromStr for QuestionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcq_single" => Ok(Self::McqSingle),
            "mcq_multiple" => Ok(Self::McqMultiple),
            "true_false" => Ok(Self::TrueFalse),
            "fill_blank" => Ok(Self::FillBlank),
            other => Err(AppError::invalid_payload(format!(
                "unknown question type '{other}'"
            ))),
        }
    }
}

/// Options and correct answer of a question, shaped by its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionPayload {
    /// `{"answer": <index>}`
    McqSingle {
        /// Option texts in display order
        options: Vec<String>,
        /// Index of the correct option
        answer: usize,
    },
    /// `{"answers": [<index>, ..]}`
    McqMultiple {
        /// Option texts in display order
        options: Vec<String>,
        /// Indices of the correct options
        answers: Vec<usize>,
    },
    /// `{"answer": true|false}`
    TrueFalse {
        /// Truth value of the statement
        answer: bool,
    },
    /// `{"answer": "<text>"}`
    FillBlank {
        /// Expected text
        answer: String,
    },
}

impl QuestionPayload {
    /// Discriminator matching this payload
    #[must_use]
    pub const fn question_type(&self) -> QuestionType {
        match self {
            Self::McqSingle { .. } => QuestionType::McqSingle,
            Self::McqMultiple { .. } => QuestionType::McqMultiple,
            Self::TrueFalse { .. } => QuestionType::TrueFalse,
            Self::FillBlank { .. } => QuestionType::FillBlank,
        }
    }

    /// Check the answer against the options
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` when an index is out of range, the multiple-choice
    /// answer set is empty or repeats an index, an option is blank, or a fill-blank
    /// answer is empty.
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::McqSingle { options, answer } => {
                validate_options(options)?;
                if *answer >= options.len() {
                    return Err(AppError::invalid_payload(format!(
                        "answer index {answer} out of range for {} options",
                        options.len()
                    )));
                }
            }
            Self::McqMultiple { options, answers } => {
                validate_options(options)?;
                if answers.is_empty() {
                    return Err(AppError::invalid_payload(
                        "mcq_multiple requires at least one correct answer",
                    ));
                }
                let mut seen = HashSet::with_capacity(answers.len());
                for index in answers {
                    if *index >= options.len() {
                        return Err(AppError::invalid_payload(format!(
                            "answer index {index} out of range for {} options",
                            options.len()
                        )));
                    }
                    if !seen.insert(*index) {
                        return Err(AppError::invalid_payload(format!(
                            "answer index {index} listed twice"
                        )));
                    }
                }
            }
            Self::TrueFalse { .. } => {}
            Self::FillBlank { answer } => {
                if answer.trim().is_empty() {
                    return Err(AppError::invalid_payload(
                        "fill_blank answer must not be empty",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Stored `options` column, `None` for types without options
    #[must_use]
    pub fn options_json(&self) -> Option<Value> {
        match self {
            Self::McqSingle { options, .. } | Self::McqMultiple { options, .. } => Some(
                Value::Array(options.iter().map(|text| json!({ "text": text })).collect()),
            ),
            Self::TrueFalse { .. } | Self::FillBlank { .. } => None,
        }
    }

    /// Stored `correct_answer` column
    #[must_use]
    pub fn answer_json(&self) -> Value {
        match self {
            Self::McqSingle { answer, .. } => json!({ "answer": answer }),
            Self::McqMultiple { answers, .. } => json!({ "answers": answers }),
            Self::TrueFalse { answer } => json!({ "answer": answer }),
            Self::FillBlank { answer } => json!({ "answer": answer }),
        }
    }

    /// Rebuild a payload from stored columns and validate it
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` when the JSON shape does not match `question_type`
    /// or the rebuilt payload fails [`QuestionPayload::validate`].
    pub fn from_stored(
        question_type: QuestionType,
        options: Option<&Value>,
        answer: &Value,
    ) -> AppResult<Self> {
        let payload = match question_type {
            QuestionType::McqSingle => {
                let index = answer
                    .get("answer")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| {
                        AppError::invalid_payload("mcq_single answer must be an index")
                    })?;
                Self::McqSingle {
                    options: parse_options(options)?,
                    answer: index as usize,
                }
            }
            QuestionType::McqMultiple => {
                let indices = answer
                    .get("answers")
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        AppError::invalid_payload("mcq_multiple answers must be an index list")
                    })?
                    .iter()
                    .map(|value| {
                        value.as_u64().map(|v| v as usize).ok_or_else(|| {
                            AppError::invalid_payload("mcq_multiple answers must be indices")
                        })
                    })
                    .collect::<AppResult<Vec<_>>>()?;
                Self::McqMultiple {
                    options: parse_options(options)?,
                    answers: indices,
                }
            }
            QuestionType::TrueFalse => {
                ensure_no_options(options, question_type)?;
                let value = answer
                    .get("answer")
                    .and_then(Value::as_bool)
                    .ok_or_else(|| {
                        AppError::invalid_payload("true_false answer must be a boolean")
                    })?;
                Self::TrueFalse { answer: value }
            }
            QuestionType::FillBlank => {
                ensure_no_options(options, question_type)?;
                let text = answer
                    .get("answer")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        AppError::invalid_payload("fill_blank answer must be a string")
                    })?;
                Self::FillBlank {
                    answer: text.to_owned(),
                }
            }
        };
        payload.validate()?;
        Ok(payload)
    }
}

fn validate_options(options: &[String]) -> AppResult<()> {
    if options.len() < 2 {
        return Err(AppError::invalid_payload(
            "multiple-choice questions need at least two options",
        ));
    }
    if options.iter().any(|text| text.trim().is_empty()) {
        return Err(AppError::invalid_payload("option text must not be empty"));
    }
    Ok(())
}

fn parse_options(options: Option<&Value>) -> AppResult<Vec<String>> {
    options
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::invalid_payload("multiple-choice questions require options"))?
        .iter()
        .map(|option| {
            option
                .get("text")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| AppError::invalid_payload("option must be {\"text\": ..}"))
        })
        .collect()
}

fn ensure_no_options(options: Option<&Value>, question_type: QuestionType) -> AppResult<()> {
    match options {
        None | Some(Value::Null) => Ok(()),
        Some(_) => Err(AppError::invalid_payload(format!(
            "{} questions carry no options",
            question_type.as_str()
        ))),
    }
}

/// Insert payload for a quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    /// Owning subject
    pub subject_id: i64,
    /// Optional chapter
    pub chapter_id: Option<i64>,
    /// Arabic title
    pub title_ar: String,
    /// Unique slug
    pub slug: String,
    /// Arabic description
    pub description_ar: String,
    /// Delivery mode
    pub quiz_type: QuizType,
    /// Time limit, `None` for untimed quizzes
    pub time_limit_minutes: Option<u32>,
    /// Pass threshold in percent
    pub passing_score: u32,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Estimated duration
    pub estimated_duration_minutes: u32,
    /// Shuffle question order
    pub shuffle_questions: bool,
    /// Shuffle option order
    pub shuffle_answers: bool,
    /// Reveal answers after submission
    pub show_correct_answers: bool,
    /// Allow reviewing the attempt
    pub allow_review: bool,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Visible to students
    pub is_published: bool,
    /// Requires a subscription
    pub is_premium: bool,
    /// Author account
    pub created_by: Option<i64>,
}

/// Insert payload for a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuizQuestion {
    /// Owning quiz
    pub quiz_id: i64,
    /// Arabic question text
    pub question_text_ar: String,
    /// Options and answer
    pub payload: QuestionPayload,
    /// Points awarded
    pub points: u32,
    /// 1-based position within the quiz
    pub question_order: i64,
    /// Arabic explanation
    pub explanation_ar: String,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Free-form tags
    pub tags: Vec<String>,
}

/// Lifecycle of a quiz attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    /// Started, not submitted
    InProgress,
    /// Submitted and scored
    Completed,
    /// Left without submitting
    Abandoned,
}

impl AttemptStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

impl FromStr for AttemptStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            other => Err(AppError::invalid_input(format!(
                "unknown attempt status '{other}'"
            ))),
        }
    }
}

/// Score of a submitted attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    /// Submission time
    pub completed_at: DateTime<Utc>,
    /// Seconds between start and submission
    pub time_spent_seconds: u32,
    /// Questions answered correctly
    pub correct_answers: u32,
    /// Questions answered wrongly
    pub incorrect_answers: u32,
    /// Questions left blank
    pub skipped_answers: u32,
    /// Points earned over the maximum, in percent with two decimals
    pub score_percentage: f64,
    /// Points earned
    pub total_points: u32,
    /// Score reached the quiz pass threshold
    pub passed: bool,
}

/// Insert payload for a quiz attempt
///
/// Only completed attempts carry a [`AttemptResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuizAttempt {
    /// Attempted quiz
    pub quiz_id: i64,
    /// Student
    pub user_id: i64,
    /// Start time
    pub started_at: DateTime<Utc>,
    /// Lifecycle state
    pub status: AttemptStatus,
    /// Questions in the quiz at attempt time
    pub total_questions: u32,
    /// Sum of question points
    pub max_score: u32,
    /// Score, present exactly when completed
    pub result: Option<AttemptResult>,
    /// Answers keyed by question id
    pub answers: Value,
    /// Shuffle seed replayed by the client
    pub seed: u32,
}

impl NewQuizAttempt {
    /// Check that the score matches the status and the question totals
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a completed attempt has no score, an open attempt
    /// has one, or the answer counts exceed the question total
    pub fn validate(&self) -> AppResult<()> {
        match (&self.result, self.status) {
            (Some(result), AttemptStatus::Completed) => {
                let answered =
                    result.correct_answers + result.incorrect_answers + result.skipped_answers;
                if answered != self.total_questions {
                    return Err(AppError::invalid_input(format!(
                        "attempt counts {answered} answers for {} questions",
                        self.total_questions
                    )));
                }
                if result.total_points > self.max_score {
                    return Err(AppError::invalid_input(
                        "attempt scored more points than the quiz offers",
                    ));
                }
                Ok(())
            }
            (None, AttemptStatus::InProgress | AttemptStatus::Abandoned) => Ok(()),
            (Some(_), status) => Err(AppError::invalid_input(format!(
                "{} attempt must not carry a score",
                status.as_str()
            ))),
            (None, _) => Err(AppError::invalid_input("completed attempt requires a score")),
        }
    }
}

/// Concept a student keeps missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakConcept {
    /// Share of wrong answers, between 0 and 1
    pub error_rate: f64,
    /// Last recomputation
    pub last_updated: DateTime<Utc>,
}

/// Aggregate of one student's completed attempts on one quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuizPerformance {
    /// Student
    pub user_id: i64,
    /// Quiz
    pub quiz_id: i64,
    /// Subject of the quiz
    pub subject_id: i64,
    /// Completed attempts
    pub total_attempts: u32,
    /// Highest score percentage
    pub best_score: f64,
    /// Mean score percentage
    pub average_score: f64,
    /// Time across completed attempts
    pub total_time_spent_minutes: f64,
    /// Latest submission
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// Weak concepts keyed by question tag
    pub weak_concepts: BTreeMap<String, WeakConcept>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn test_single_answer_out_of_range_rejected() {
        let payload = QuestionPayload::McqSingle {
            options: options(4),
            answer: 4,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_multiple_answers_must_be_distinct_and_non_empty() {
        let duplicate = QuestionPayload::McqMultiple {
            options: options(5),
            answers: vec![0, 2, 2],
        };
        assert!(duplicate.validate().is_err());

        let empty = QuestionPayload::McqMultiple {
            options: options(5),
            answers: vec![],
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_fill_blank_requires_text() {
        let payload = QuestionPayload::FillBlank {
            answer: "   ".to_owned(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_stored_shape_mismatch_rejected() {
        let answer = json!({ "answer": "DNA" });
        let result = QuestionPayload::from_stored(QuestionType::TrueFalse, None, &answer);
        assert!(result.is_err());
    }

    #[test]
    fn test_stored_mcq_multiple_accepted() {
        let payload = QuestionPayload::McqMultiple {
            options: options(5),
            answers: vec![0, 2, 4],
        };
        let options = payload.options_json();
        let rebuilt = QuestionPayload::from_stored(
            QuestionType::McqMultiple,
            options.as_ref(),
            &payload.answer_json(),
        );
        assert_eq!(rebuilt.ok(), Some(payload));
    }

    fn attempt(status: AttemptStatus, result: Option<AttemptResult>) -> NewQuizAttempt {
        NewQuizAttempt {
            quiz_id: 1,
            user_id: 2,
            started_at: chrono::Utc::now(),
            status,
            total_questions: 5,
            max_score: 20,
            result,
            answers: json!({}),
            seed: 17,
        }
    }

    fn result(correct: u32, incorrect: u32, skipped: u32, points: u32) -> AttemptResult {
        AttemptResult {
            completed_at: chrono::Utc::now(),
            time_spent_seconds: 300,
            correct_answers: correct,
            incorrect_answers: incorrect,
            skipped_answers: skipped,
            score_percentage: f64::from(points) * 5.0,
            total_points: points,
            passed: points >= 12,
        }
    }

    #[test]
    fn test_attempt_score_follows_status() {
        assert!(attempt(AttemptStatus::Completed, Some(result(3, 1, 1, 14)))
            .validate()
            .is_ok());
        assert!(attempt(AttemptStatus::Abandoned, None).validate().is_ok());
        assert!(attempt(AttemptStatus::Completed, None).validate().is_err());
        assert!(attempt(AttemptStatus::InProgress, Some(result(3, 1, 1, 14)))
            .validate()
            .is_err());
    }

    #[test]
    fn test_attempt_counts_must_cover_every_question() {
        assert!(attempt(AttemptStatus::Completed, Some(result(3, 1, 0, 14)))
            .validate()
            .is_err());
        assert!(attempt(AttemptStatus::Completed, Some(result(5, 0, 0, 21)))
            .validate()
            .is_err());
    }

    #[test]
    fn test_attempt_status_round_trips_through_storage_names() {
        for status in [
            AttemptStatus::InProgress,
            AttemptStatus::Completed,
            AttemptStatus::Abandoned,
        ] {
            assert_eq!(status.as_str().parse::<AttemptStatus>().ok(), Some(status));
        }
        assert!("paused".parse::<AttemptStatus>().is_err());
    }
}
