// ABOUTME: Integration tests for dependency-ordered seed plans
// ABOUTME: Covers ordering, prerequisite skips, invalid selections and a full catalogue run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use chrono::Utc;
use memo_seeder::database::Table;
use memo_seeder::errors::{AppResult, ErrorCode};
use memo_seeder::seeding::{
    catalogue, PromosSeeder, SeedContext, SeedOutcome, SeedPlan, SeedStep, Seeder,
};

/// Seeder with configurable table declarations that writes nothing
struct Declared {
    step: SeedStep,
    requires: &'static [Table],
    provides: &'static [Table],
}

#[async_trait]
impl Seeder for Declared {
    fn step(&self) -> SeedStep {
        self.step
    }

    fn requires(&self) -> &'static [Table] {
        self.requires
    }

    fn provides(&self) -> &'static [Table] {
        self.provides
    }

    async fn run(&self, _ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        Ok(SeedOutcome::completed(0))
    }
}

#[test]
fn test_providers_run_before_dependents() {
    let plan = SeedPlan::new(catalogue::by_steps(&[
        SeedStep::FakeQuizzes,
        SeedStep::Curriculum,
        SeedStep::AcademicStructure,
    ]))
    .unwrap();

    assert_eq!(
        plan.steps(),
        [
            SeedStep::AcademicStructure,
            SeedStep::FakeQuizzes,
            SeedStep::Curriculum,
        ]
    );
}

#[test]
fn test_catalogue_order_is_kept_when_allowed() {
    let plan = SeedPlan::new(catalogue::all(true)).unwrap();
    let steps = plan.steps();
    assert_eq!(steps.len(), SeedStep::ALL.len());
    assert_eq!(steps[0], SeedStep::AcademicStructure);

    let position = |step| steps.iter().position(|s| *s == step).unwrap();
    assert!(position(SeedStep::ContentTypes) < position(SeedStep::FakeContent));
    assert!(position(SeedStep::BacSessions) < position(SeedStep::BacSubjects));
}

#[test]
fn test_duplicate_step_is_rejected() {
    let seeders: Vec<Box<dyn Seeder>> = vec![Box::new(PromosSeeder), Box::new(PromosSeeder)];
    let error = SeedPlan::new(seeders).err().unwrap();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_dependency_cycle_is_rejected() {
    let seeders: Vec<Box<dyn Seeder>> = vec![
        Box::new(Declared {
            step: SeedStep::Promos,
            requires: &[Table::Achievements],
            provides: &[Table::Promos],
        }),
        Box::new(Declared {
            step: SeedStep::Achievements,
            requires: &[Table::Promos],
            provides: &[Table::Achievements],
        }),
    ];
    let error = SeedPlan::new(seeders).err().unwrap();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert!(error.message.contains("cycle"), "{}", error.message);
}

#[tokio::test]
async fn test_empty_prerequisite_skips_step() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 41, Utc::now());

    let plan = SeedPlan::new(catalogue::by_steps(&[SeedStep::Curriculum])).unwrap();
    let summary = plan.execute(&mut ctx).await.unwrap();

    let report = summary.report(SeedStep::Curriculum).unwrap();
    assert_eq!(
        report.outcome,
        SeedOutcome::skipped("table academic_phases is empty")
    );
    assert_eq!(summary.total_rows(), 0);
    assert_eq!(db.count_rows(Table::CurriculumNodes).await.unwrap(), 0);
}

#[tokio::test]
async fn test_full_catalogue_completes_every_step() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 42, Utc::now());

    let plan = SeedPlan::new(catalogue::all(true)).unwrap();
    let summary = plan.execute(&mut ctx).await.unwrap();

    assert_eq!(summary.reports().len(), SeedStep::ALL.len());
    let skipped: Vec<_> = summary.skipped().map(|r| r.step).collect();
    assert!(skipped.is_empty(), "skipped: {skipped:?}");
    assert!(db.count_rows(Table::SubjectStreams).await.unwrap() > 0);
    assert!(db.count_rows(Table::Contents).await.unwrap() > 0);
    assert!(db.count_rows(Table::BacSubjects).await.unwrap() > 0);
}
