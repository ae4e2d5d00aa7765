// ABOUTME: Domain models for the Memo platform seeders
// ABOUTME: Re-exports taxonomy, curriculum, content, quiz, achievement, BAC, analytics and commerce types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models shared by the database layer and the seeders.
//!
//! Enumerations serialize to the lowercase snake-case strings stored in the
//! database (`as_str`) and parse back from them.

/// Phases, years, streams, subjects and stream coefficients
pub mod academic;
/// Achievement definitions and typed unlock criteria
pub mod achievement;
/// Engagement statistics and activity logs for synthetic users
pub mod analytics;
/// BAC exam archive entities
pub mod bac;
/// Courses, packages, codes, receipts and subscriptions
pub mod commerce;
/// Content chapters and items
pub mod content;
/// Planner curriculum tree nodes
pub mod curriculum;
/// Home page promotional slides
pub mod promo;
/// Quizzes and type-consistent question payloads
pub mod quiz;

pub use academic::{
    AcademicPhase, AcademicStream, AcademicYear, NewSubject, Subject, SubjectCategory,
    SubjectStream, BAC_LEVEL_NUMBER, SECONDARY_PHASE_SLUG,
};
pub use achievement::{AchievementCriteria, NewAchievement};
pub use analytics::{ActivityType, NewUser, UserRole, UserStats};
pub use bac::{BacSession, BacSessionType, BacYear, NewBacSubject};
pub use commerce::{
    ActivationSource, CodeTarget, CourseLevel, NewCourse, NewCourseLesson, NewPaymentReceipt,
    NewSubscriptionCode, NewUserSubscription, PaymentMethod, ReceiptStatus,
};
pub use content::{ContentKind, NewContent, NewContentChapter};
pub use curriculum::{CurriculumLevel, CurriculumNode, NewCurriculumNode, PlannerContentType};
pub use promo::{NewPromo, PromoActionType};
pub use quiz::{
    AttemptResult, AttemptStatus, NewQuiz, NewQuizAttempt, NewQuizPerformance, NewQuizQuestion,
    QuestionPayload, QuestionType, QuizType, WeakConcept,
};

use serde::{Deserialize, Serialize};

/// Difficulty scale shared by content, quizzes, questions and curriculum nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Introductory material
    Easy,
    /// Standard BAC level
    #[default]
    Medium,
    /// Advanced material
    Hard,
}

impl Difficulty {
    /// Every difficulty, in increasing order
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            // Default to Medium for unrecognized values
            _ => Self::Medium,
        }
    }

    /// Arabic label used in generated descriptions
    #[must_use]
    pub const fn label_ar(&self) -> &'static str {
        match self {
            Self::Easy => "سهل",
            Self::Medium => "متوسط",
            Self::Hard => "صعب",
        }
    }
}
