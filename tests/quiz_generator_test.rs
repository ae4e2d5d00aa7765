// ABOUTME: Integration tests for the sample quiz generator
// ABOUTME: Checks question counts, stored payload consistency and rerun numbering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashSet;

use chrono::Utc;
use memo_seeder::database::Table;
use memo_seeder::seeding::{AcademicStructureSeeder, FakeQuizzesSeeder, SeedOutcome};

#[tokio::test]
async fn test_generated_quizzes_are_consistent() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 11, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    let outcome = common::run_seeder(&mut ctx, &FakeQuizzesSeeder)
        .await
        .unwrap();
    assert!(outcome.is_completed());

    let stream = db.get_stream_by_slug("sciences-exp").await.unwrap().unwrap();
    let quizzes = db.list_quizzes().await.unwrap();
    assert!(!quizzes.is_empty());

    let mut total_questions = 0;
    for quiz in &quizzes {
        let subject = db.get_subject(quiz.subject_id).await.unwrap().unwrap();
        assert_eq!(subject.academic_stream_id, Some(stream.id));
        assert_eq!(quiz.show_correct_answers, quiz.quiz_type != "exam");

        let questions = db.list_quiz_questions(quiz.id).await.unwrap();
        assert_eq!(quiz.total_questions, questions.len() as i64);
        assert!((5..=10).contains(&questions.len()), "{}", quiz.slug);
        for (index, question) in questions.iter().enumerate() {
            assert_eq!(question.question_order, index as i64 + 1);
            question.payload.validate().unwrap();
        }
        total_questions += questions.len() as u64;
    }

    assert_eq!(outcome.rows(), quizzes.len() as u64 + total_questions);
    assert_eq!(db.count_rows(Table::QuizQuestions).await.unwrap(), total_questions);
}

#[tokio::test]
async fn test_rerun_continues_quiz_numbering() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 12, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &FakeQuizzesSeeder)
        .await
        .unwrap();
    let first = db.count_rows(Table::Quizzes).await.unwrap();
    common::run_seeder(&mut ctx, &FakeQuizzesSeeder)
        .await
        .unwrap();

    let quizzes = db.list_quizzes().await.unwrap();
    assert!(quizzes.len() as u64 > first);
    let slugs: HashSet<_> = quizzes.iter().map(|q| q.slug.as_str()).collect();
    assert_eq!(slugs.len(), quizzes.len());
}

#[tokio::test]
async fn test_unknown_stream_is_skipped() {
    let db = common::create_test_database().await.unwrap();
    let mut config = common::test_config();
    config.quiz_stream = "no-such-stream".to_owned();
    let mut ctx = common::seeded_context(&db, &config, 13, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    let outcome = common::run_seeder(&mut ctx, &FakeQuizzesSeeder)
        .await
        .unwrap();

    assert!(matches!(outcome, SeedOutcome::Skipped { .. }));
    assert_eq!(db.count_rows(Table::Quizzes).await.unwrap(), 0);
}
