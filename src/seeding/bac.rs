// ABOUTME: Archived BAC exam papers with the chapters each paper covers
// ABOUTME: Papers are appended per (year, session) for random BAC-year subjects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tracing::{debug, info};

use super::pools::BAC_CHAPTER_TITLES;
use super::random::{between, percent, pick, pick_distinct};
use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::database::Table;
use crate::errors::AppResult;
use crate::models::NewBacSubject;

const EXAM_DURATIONS: [u32; 3] = [120, 180, 240];

/// Sample exam papers for every archived year and session
pub struct BacSubjectsSeeder;

#[async_trait]
impl Seeder for BacSubjectsSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::BacSubjects
    }

    fn requires(&self) -> &'static [Table] {
        &[
            Table::BacYears,
            Table::BacSessions,
            Table::Subjects,
            Table::AcademicStreams,
        ]
    }

    fn provides(&self) -> &'static [Table] {
        &[Table::BacSubjects, Table::BacSubjectChapters]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        let Some(bac_year) = db.find_bac_year().await? else {
            return Ok(SeedOutcome::skipped("BAC academic year not found"));
        };
        let subjects: Vec<_> = db
            .list_subjects_for_year(bac_year.id, None)
            .await?
            .into_iter()
            .filter(|s| s.academic_stream_id.is_some())
            .collect();
        if subjects.is_empty() {
            return Ok(SeedOutcome::skipped("no stream subjects in the BAC year"));
        }

        let years = db.list_bac_years().await?;
        let sessions = db.list_bac_sessions().await?;
        let rng = &mut ctx.rng;
        let (mut papers, mut chapters) = (0_u64, 0_u64);

        for year in &years {
            for session in &sessions {
                for _ in 0..between(rng, 3, 5) {
                    let subject = pick(rng, &subjects)?;
                    let Some(stream_id) = subject.academic_stream_id else {
                        continue;
                    };
                    let correction_file_path = percent(rng, 70).then(|| {
                        format!(
                            "bac/corrections/{}/{}/{}_correction.pdf",
                            year.year, session.slug, subject.slug
                        )
                    });
                    let paper = NewBacSubject {
                        bac_year_id: year.id,
                        bac_session_id: session.id,
                        subject_id: subject.id,
                        academic_stream_id: stream_id,
                        title_ar: format!(
                            "امتحان {} - {} - {}",
                            subject.name_ar, year.year, session.name_ar
                        ),
                        file_path: format!(
                            "bac/subjects/{}/{}/{}.pdf",
                            year.year, session.slug, subject.slug
                        ),
                        correction_file_path,
                        duration_minutes: *pick(rng, &EXAM_DURATIONS)?,
                        views_count: between(rng, 50, 1000),
                        downloads_count: between(rng, 20, 500),
                    };
                    let paper_id = db.insert_bac_subject(&paper).await?;
                    papers += 1;

                    let count = between(rng, 2, 4) as usize;
                    for (index, title) in pick_distinct(rng, &BAC_CHAPTER_TITLES, count)
                        .into_iter()
                        .enumerate()
                    {
                        db.insert_bac_subject_chapter(paper_id, title, index as i64 + 1)
                            .await?;
                        chapters += 1;
                    }
                    debug!(paper_id, title = %paper.title_ar, "Inserted BAC paper");
                }
            }
        }

        info!(papers, chapters, "BAC papers seeded");
        Ok(SeedOutcome::completed(papers + chapters))
    }
}
