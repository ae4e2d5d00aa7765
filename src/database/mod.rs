// ABOUTME: SQLite storage for the Memo platform seeders
// ABOUTME: Connection setup, schema migration and row counting for dependency checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! One [`Database`] handle wraps the `SQLite` pool. Table families are split into
//! submodules, each contributing its own `impl Database` block and migration.

mod academic;
mod bac;
mod commerce;
mod content;
mod curriculum;
mod quizzes;
mod reference;
mod users;

pub use bac::{BacPaperChapterRecord, BacPaperRecord};
pub use commerce::UserSubscriptionRecord;
pub use content::ContentChapterRecord;
pub use quizzes::{
    QuizAttemptRecord, QuizPerformanceRecord, QuizQuestionRecord, QuizSummary,
};
pub use users::UserRecord;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info};

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Pool size for file databases
const FILE_POOL_CONNECTIONS: u32 = 5;

/// Every table the seeders write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// Education stages
    AcademicPhases,
    /// Grades within a phase
    AcademicYears,
    /// Specialization tracks
    AcademicStreams,
    /// Taught subjects
    Subjects,
    /// Stream coefficient overrides
    SubjectStreams,
    /// Planner curriculum tree
    CurriculumNodes,
    /// Content kinds
    ContentTypes,
    /// Content chapters
    ContentChapters,
    /// Content items
    Contents,
    /// Quizzes
    Quizzes,
    /// Quiz questions
    QuizQuestions,
    /// Student quiz attempts
    QuizAttempts,
    /// Per-student quiz aggregates
    UserQuizPerformances,
    /// Achievement definitions
    Achievements,
    /// Key/value application settings
    AppSettings,
    /// Home page slides
    Promos,
    /// Exam sessions
    BacSessions,
    /// Exam years
    BacYears,
    /// Archived exam papers
    BacSubjects,
    /// Chapters covered by each paper
    BacSubjectChapters,
    /// Accounts
    Users,
    /// Academic placement of each account
    UserAcademicProfiles,
    /// Aggregate engagement statistics
    UserStats,
    /// Activity history
    UserActivityLogs,
    /// Courses
    Courses,
    /// Course modules
    CourseModules,
    /// Course lessons
    CourseLessons,
    /// Course reviews
    CourseReviews,
    /// Subscription packages
    SubscriptionPackages,
    /// Package to course links
    PackageCourses,
    /// Subscription codes
    SubscriptionCodes,
    /// Payment receipts
    PaymentReceipts,
    /// Course subscriptions
    UserSubscriptions,
}

impl Table {
    /// SQL table name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcademicPhases => "academic_phases",
            Self::AcademicYears => "academic_years",
            Self::AcademicStreams => "academic_streams",
            Self::Subjects => "subjects",
            Self::SubjectStreams => "subject_streams",
            Self::CurriculumNodes => "curriculum_nodes",
            Self::ContentTypes => "content_types",
            Self::ContentChapters => "content_chapters",
            Self::Contents => "contents",
            Self::Quizzes => "quizzes",
            Self::QuizQuestions => "quiz_questions",
            Self::QuizAttempts => "quiz_attempts",
            Self::UserQuizPerformances => "user_quiz_performances",
            Self::Achievements => "achievements",
            Self::AppSettings => "app_settings",
            Self::Promos => "promos",
            Self::BacSessions => "bac_sessions",
            Self::BacYears => "bac_years",
            Self::BacSubjects => "bac_subjects",
            Self::BacSubjectChapters => "bac_subject_chapters",
            Self::Users => "users",
            Self::UserAcademicProfiles => "user_academic_profiles",
            Self::UserStats => "user_stats",
            Self::UserActivityLogs => "user_activity_logs",
            Self::Courses => "courses",
            Self::CourseModules => "course_modules",
            Self::CourseLessons => "course_lessons",
            Self::CourseReviews => "course_reviews",
            Self::SubscriptionPackages => "subscription_packages",
            Self::PackageCourses => "package_courses",
            Self::SubscriptionCodes => "subscription_codes",
            Self::PaymentReceipts => "payment_receipts",
            Self::UserSubscriptions => "user_subscriptions",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database manager for every seeded table
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect, creating the database file when missing, then run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or a migration fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        let options = match url {
            DatabaseUrl::Memory => SqliteConnectOptions::from_str("sqlite::memory:"),
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                Ok(SqliteConnectOptions::new().filename(path))
            }
        }
        .map_err(|e| AppError::database(format!("Invalid database URL {url}: {e}")))?
        .create_if_missing(true)
        .foreign_keys(true);

        // Every connection to :memory: opens its own database
        let max_connections = if url.is_memory() {
            1
        } else {
            FILE_POOL_CONNECTIONS
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create every table idempotently
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE` statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_academic().await?;
        self.migrate_curriculum().await?;
        self.migrate_reference().await?;
        self.migrate_content().await?;
        self.migrate_users().await?;
        self.migrate_quizzes().await?;
        self.migrate_bac().await?;
        self.migrate_commerce().await?;
        debug!("Schema migration complete");
        Ok(())
    }

    /// Number of rows currently stored in `table`
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails
    pub async fn count_rows(&self, table: Table) -> AppResult<u64> {
        let sql = format!("SELECT COUNT(*) AS total FROM {}", table.as_str());
        let row = sqlx::query(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count {table}: {e}")))?;
        let total: i64 = row.get("total");
        Ok(total.max(0) as u64)
    }

    /// Run a sequence of schema statements
    async fn execute_schema(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to run migration: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_database_migrates_every_table() {
        let db = Database::new(&DatabaseUrl::Memory)
            .await
            .expect("in-memory database");

        for table in [
            Table::AcademicPhases,
            Table::UserSubscriptions,
            Table::PackageCourses,
            Table::QuizAttempts,
            Table::UserQuizPerformances,
        ] {
            assert_eq!(db.count_rows(table).await.expect("count"), 0);
        }
    }

    #[tokio::test]
    async fn test_migration_is_idempotent() {
        let db = Database::new(&DatabaseUrl::Memory)
            .await
            .expect("in-memory database");
        db.migrate().await.expect("second migration");
    }
}
