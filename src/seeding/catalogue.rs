// ABOUTME: Registry of every seeder, grouped into core reference data and fixture generators
// ABOUTME: Provides the selections used by `memo-seed all`, `run` and `list`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    AcademicStructureSeeder, AchievementsSeeder, BacSessionsSeeder, BacSubjectsSeeder,
    ContentTypesSeeder, CuratedContentSeeder, CuratedQuizzesSeeder, CurriculumSeeder,
    FakeAnalyticsSeeder, FakeContentSeeder, FakeQuizzesSeeder, PaidCoursesSeeder, PromosSeeder,
    SeedStep, Seeder, SubjectCoefficientsSeeder,
};

/// Seeder for a single step
#[must_use]
pub fn seeder_for(step: SeedStep) -> Box<dyn Seeder> {
    match step {
        SeedStep::AcademicStructure => Box::new(AcademicStructureSeeder),
        SeedStep::SubjectCoefficients => Box::new(SubjectCoefficientsSeeder),
        SeedStep::ContentTypes => Box::new(ContentTypesSeeder),
        SeedStep::BacSessions => Box::new(BacSessionsSeeder),
        SeedStep::Achievements => Box::new(AchievementsSeeder),
        SeedStep::Promos => Box::new(PromosSeeder),
        SeedStep::Curriculum => Box::new(CurriculumSeeder),
        SeedStep::BacSubjects => Box::new(BacSubjectsSeeder),
        SeedStep::FakeContent => Box::new(FakeContentSeeder),
        SeedStep::CuratedContent => Box::new(CuratedContentSeeder),
        SeedStep::FakeQuizzes => Box::new(FakeQuizzesSeeder),
        SeedStep::CuratedQuizzes => Box::new(CuratedQuizzesSeeder),
        SeedStep::FakeAnalytics => Box::new(FakeAnalyticsSeeder),
        SeedStep::PaidCourses => Box::new(PaidCoursesSeeder),
    }
}

/// Reference data run by `seed all`
#[must_use]
pub fn core() -> Vec<Box<dyn Seeder>> {
    by_steps(SeedStep::ALL.iter().filter(|s| !s.is_fixture()))
}

/// Sample data generators
#[must_use]
pub fn fixtures() -> Vec<Box<dyn Seeder>> {
    by_steps(SeedStep::ALL.iter().filter(|s| s.is_fixture()))
}

/// Core seeders, followed by the fixture generators when requested
#[must_use]
pub fn all(with_fixtures: bool) -> Vec<Box<dyn Seeder>> {
    let mut seeders = core();
    if with_fixtures {
        seeders.extend(fixtures());
    }
    seeders
}

/// Seeders for the named steps, in the order given
pub fn by_steps<'a>(steps: impl IntoIterator<Item = &'a SeedStep>) -> Vec<Box<dyn Seeder>> {
    steps.into_iter().map(|step| seeder_for(*step)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_seeder_reports_its_own_step() {
        for step in SeedStep::ALL {
            assert_eq!(seeder_for(step).step(), step);
        }
    }

    #[test]
    fn test_all_with_fixtures_covers_the_catalogue() {
        assert_eq!(core().len(), 6);
        assert_eq!(all(true).len(), SeedStep::ALL.len());
    }
}
