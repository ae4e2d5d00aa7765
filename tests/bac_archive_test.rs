// ABOUTME: Integration tests for the archived BAC paper generator
// ABOUTME: Checks papers per year and session and the chapters covered by each paper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use memo_seeder::database::Table;
use memo_seeder::seeding::{AcademicStructureSeeder, BacSessionsSeeder, BacSubjectsSeeder};

#[tokio::test]
async fn test_papers_per_session_and_covered_chapters() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 31, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &BacSessionsSeeder)
        .await
        .unwrap();
    let outcome = common::run_seeder(&mut ctx, &BacSubjectsSeeder)
        .await
        .unwrap();
    assert!(outcome.is_completed());

    let years = db.list_bac_years().await.unwrap();
    let sessions = db.list_bac_sessions().await.unwrap();
    let papers = db.list_bac_papers().await.unwrap();
    let bac_year = db.find_bac_year().await.unwrap().unwrap();

    let mut per_slot: HashMap<(i64, i64), usize> = HashMap::new();
    for paper in &papers {
        *per_slot
            .entry((paper.bac_year_id, paper.bac_session_id))
            .or_default() += 1;
    }
    for year in &years {
        for session in &sessions {
            let count = per_slot.get(&(year.id, session.id)).copied().unwrap_or(0);
            assert!(
                (3..=5).contains(&count),
                "year {} session {} has {count} papers",
                year.year,
                session.slug
            );
        }
    }
    assert_eq!(per_slot.len(), years.len() * sessions.len());

    let mut covered = 0_u64;
    for paper in &papers {
        let subject = db.get_subject(paper.subject_id).await.unwrap().unwrap();
        assert_eq!(subject.academic_year_id, bac_year.id);
        assert_eq!(subject.academic_stream_id, Some(paper.academic_stream_id));

        let chapters = db.list_bac_paper_chapters(paper.id).await.unwrap();
        assert!((2..=4).contains(&chapters.len()), "{}", paper.title_ar);
        let titles: HashSet<_> = chapters.iter().map(|c| c.title_ar.as_str()).collect();
        assert_eq!(titles.len(), chapters.len(), "{}", paper.title_ar);
        let orders: Vec<i64> = chapters.iter().map(|c| c.sort_order).collect();
        let expected: Vec<i64> = (1..=chapters.len() as i64).collect();
        assert_eq!(orders, expected);
        covered += chapters.len() as u64;
    }

    assert_eq!(db.count_rows(Table::BacSubjectChapters).await.unwrap(), covered);
    assert_eq!(outcome.rows(), papers.len() as u64 + covered);
}
