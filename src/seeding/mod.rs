// ABOUTME: Seeding framework: the Seeder trait, shared run context and step catalogue
// ABOUTME: Each seeder declares the tables it requires and provides so plans can order them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Seeding
//!
//! Every seeder implements [`Seeder`]. A seeder names the tables it reads
//! ([`Seeder::requires`]) and the tables it writes ([`Seeder::provides`]); the
//! [`SeedPlan`] turns those declarations into an execution order and checks that
//! every required table holds rows before a step runs.
//!
//! ## Steps
//!
//! - **Reference data**: content types, achievements, promos, BAC sessions and years
//! - **Taxonomy**: academic structure, subject coefficients, planner curriculum
//! - **Fixtures**: BAC papers, sample content, quizzes, analytics users, paid courses
//!   and the curated chapters and quizzes with simulated attempts
//!
//! Randomized steps draw from [`SeedContext::rng`], a seedable `ChaCha8` source, so
//! a run with a fixed seed produces the same shapes every time.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::SeedConfig;
use crate::constants::fixtures;
use crate::database::{Database, Table};
use crate::errors::{AppError, AppResult};

/// Seeder registry and selection helpers
pub mod catalogue;
/// Subject/stream coefficient resolution
pub mod coefficients;
/// Dependency-ordered execution
pub mod plan;
/// Sample title, question and name pools
pub mod pools;
/// Random selection helpers
pub mod random;
/// Parent-first tree builder
pub mod taxonomy;

mod academic;
mod analytics;
mod bac;
mod commerce;
mod content;
mod curated;
mod curriculum;
mod quizzes;
mod reference;

pub use academic::{AcademicStructureSeeder, SubjectCoefficientsSeeder};
pub use analytics::FakeAnalyticsSeeder;
pub use bac::BacSubjectsSeeder;
pub use commerce::PaidCoursesSeeder;
pub use content::FakeContentSeeder;
pub use curated::{CuratedContentSeeder, CuratedQuizzesSeeder};
pub use curriculum::CurriculumSeeder;
pub use plan::{RunSummary, SeedPlan, StepReport};
pub use quizzes::FakeQuizzesSeeder;
pub use reference::{AchievementsSeeder, BacSessionsSeeder, ContentTypesSeeder, PromosSeeder};

/// Identifier of a seeding step, used on the command line and in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedStep {
    /// Phases, years, streams and subjects
    AcademicStructure,
    /// Stream coefficient overrides
    SubjectCoefficients,
    /// Content type lookup rows
    ContentTypes,
    /// Global BAC session and exam years
    BacSessions,
    /// Achievement definitions
    Achievements,
    /// Home page slides
    Promos,
    /// Planner curriculum trees
    Curriculum,
    /// Archived exam papers
    BacSubjects,
    /// Sample chapters and content items
    FakeContent,
    /// Hand-written chapters of the quiz stream
    CuratedContent,
    /// Sample quizzes
    FakeQuizzes,
    /// Hand-written quizzes with simulated attempts
    CuratedQuizzes,
    /// Synthetic users with statistics
    FakeAnalytics,
    /// Courses, packages, codes and subscriptions
    PaidCourses,
}

impl SeedStep {
    /// Every step, in catalogue order
    pub const ALL: [Self; 14] = [
        Self::AcademicStructure,
        Self::SubjectCoefficients,
        Self::ContentTypes,
        Self::BacSessions,
        Self::Achievements,
        Self::Promos,
        Self::Curriculum,
        Self::BacSubjects,
        Self::FakeContent,
        Self::CuratedContent,
        Self::FakeQuizzes,
        Self::CuratedQuizzes,
        Self::FakeAnalytics,
        Self::PaidCourses,
    ];

    /// Command-line name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcademicStructure => "academic-structure",
            Self::SubjectCoefficients => "subject-coefficients",
            Self::ContentTypes => "content-types",
            Self::BacSessions => "bac-sessions",
            Self::Achievements => "achievements",
            Self::Promos => "promos",
            Self::Curriculum => "curriculum",
            Self::BacSubjects => "bac-subjects",
            Self::FakeContent => "fake-content",
            Self::CuratedContent => "curated-content",
            Self::FakeQuizzes => "fake-quizzes",
            Self::CuratedQuizzes => "curated-quizzes",
            Self::FakeAnalytics => "fake-analytics",
            Self::PaidCourses => "paid-courses",
        }
    }

    /// Fixture generators append sample data and are left out of `seed all` by default
    #[must_use]
    pub const fn is_fixture(&self) -> bool {
        matches!(
            self,
            Self::Curriculum
                | Self::BacSubjects
                | Self::FakeContent
                | Self::CuratedContent
                | Self::FakeQuizzes
                | Self::CuratedQuizzes
                | Self::FakeAnalytics
                | Self::PaidCourses
        )
    }
}

impl fmt::Display for SeedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeedStep {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("unknown seeding step '{s}'")))
    }
}

/// Result of running one seeder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedOutcome {
    /// The step wrote its rows
    Completed {
        /// Rows inserted or updated
        rows: u64,
    },
    /// The step did nothing because an upstream anchor is missing
    Skipped {
        /// Human-readable reason
        reason: String,
    },
}

impl SeedOutcome {
    /// Completed outcome
    #[must_use]
    pub const fn completed(rows: u64) -> Self {
        Self::Completed { rows }
    }

    /// Skipped outcome
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    /// Rows written, zero when skipped
    #[must_use]
    pub const fn rows(&self) -> u64 {
        match self {
            Self::Completed { rows } => *rows,
            Self::Skipped { .. } => 0,
        }
    }

    /// Whether the step ran
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Shared state handed to every seeder of a run
pub struct SeedContext<'a> {
    /// Target database
    pub db: &'a Database,
    /// Run settings
    pub config: &'a SeedConfig,
    /// Seedable random source
    pub rng: ChaCha8Rng,
    /// Clock reading taken once per run
    pub now: DateTime<Utc>,
    password_hash: Option<String>,
}

impl<'a> SeedContext<'a> {
    /// Context seeded from the configuration, reading the clock once
    #[must_use]
    pub fn new(db: &'a Database, config: &'a SeedConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.effective_seed());
        Self::with_rng(db, config, rng, Utc::now())
    }

    /// Context with an explicit random source and clock
    #[must_use]
    pub const fn with_rng(
        db: &'a Database,
        config: &'a SeedConfig,
        rng: ChaCha8Rng,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            db,
            config,
            rng,
            now,
            password_hash: None,
        }
    }

    /// Bcrypt hash of the shared fixture password, computed once per run
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails
    pub fn fixture_password_hash(&mut self) -> AppResult<String> {
        if let Some(hash) = &self.password_hash {
            return Ok(hash.clone());
        }
        let hash = bcrypt::hash(fixtures::PASSWORD, self.config.password_cost)
            .map_err(|e| AppError::internal(format!("Failed to hash fixture password: {e}")))?;
        self.password_hash = Some(hash.clone());
        Ok(hash)
    }
}

/// A unit of seeding work
#[async_trait]
pub trait Seeder: Send + Sync {
    /// Step identifier
    fn step(&self) -> SeedStep;

    /// Tables that must hold rows before the step runs
    fn requires(&self) -> &'static [Table];

    /// Tables the step writes
    fn provides(&self) -> &'static [Table];

    /// Write the step's rows
    ///
    /// Missing upstream anchors are reported as [`SeedOutcome::Skipped`]; only
    /// database failures and malformed data are errors.
    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names_round_trip_through_from_str() {
        for step in SeedStep::ALL {
            assert_eq!(step.as_str().parse::<SeedStep>().ok(), Some(step));
        }
        assert!("seed-everything".parse::<SeedStep>().is_err());
    }

    #[test]
    fn test_core_steps_are_not_fixtures() {
        let core: Vec<_> = SeedStep::ALL.iter().filter(|s| !s.is_fixture()).collect();
        assert_eq!(core.len(), 6);
        assert!(SeedStep::PaidCourses.is_fixture());
    }
}
