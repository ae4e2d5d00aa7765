// ABOUTME: Integration tests for the sample content generator
// ABOUTME: Checks chapters per subject and the lesson, summary, exercise and test mix per chapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashMap;

use chrono::Utc;
use memo_seeder::database::Table;
use memo_seeder::seeding::{AcademicStructureSeeder, ContentTypesSeeder, FakeContentSeeder};

#[tokio::test]
async fn test_every_chapter_carries_the_full_content_mix() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 21, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &ContentTypesSeeder)
        .await
        .unwrap();
    let outcome = common::run_seeder(&mut ctx, &FakeContentSeeder)
        .await
        .unwrap();
    assert!(outcome.is_completed());

    let subjects = db.list_subjects().await.unwrap();
    assert!(!subjects.is_empty());

    let mut chapter_total = 0_u64;
    for subject in &subjects {
        let chapters = db.list_content_chapters(subject.id).await.unwrap();
        assert!(
            (2..=3).contains(&chapters.len()),
            "{} has {} chapters",
            subject.slug,
            chapters.len()
        );
        chapter_total += chapters.len() as u64;

        for (index, chapter) in chapters.iter().enumerate() {
            assert_eq!(chapter.sort_order, index as i64 + 1);
            assert_eq!(
                chapter.slug,
                format!("{}-chapter-{}", subject.slug, index + 1)
            );

            let counts: HashMap<String, i64> = db
                .chapter_content_counts(chapter.id)
                .await
                .unwrap()
                .into_iter()
                .collect();
            let count = |slug: &str| counts.get(slug).copied().unwrap_or(0);
            assert!((3..=5).contains(&count("lesson")), "{}: {counts:?}", chapter.slug);
            assert_eq!(count("summary"), 1, "{}: {counts:?}", chapter.slug);
            assert!((2..=3).contains(&count("exercises")), "{}: {counts:?}", chapter.slug);
            assert_eq!(count("test"), 1, "{}: {counts:?}", chapter.slug);
            assert_eq!(counts.len(), 4);
        }
    }

    assert_eq!(db.count_rows(Table::ContentChapters).await.unwrap(), chapter_total);
    let items = db.count_rows(Table::Contents).await.unwrap();
    assert_eq!(outcome.rows(), chapter_total + items);
}

#[tokio::test]
async fn test_rerun_appends_chapters_after_existing_ones() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 22, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &ContentTypesSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &FakeContentSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &FakeContentSeeder)
        .await
        .unwrap();

    for subject in db.list_subjects().await.unwrap() {
        let chapters = db.list_content_chapters(subject.id).await.unwrap();
        assert!((4..=6).contains(&chapters.len()), "{}", subject.slug);
        let orders: Vec<i64> = chapters.iter().map(|c| c.sort_order).collect();
        let expected: Vec<i64> = (1..=chapters.len() as i64).collect();
        assert_eq!(orders, expected);
    }
}
