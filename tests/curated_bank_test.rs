// ABOUTME: Integration tests for the curated chapters and quizzes
// ABOUTME: Covers fixed placement, idempotent reruns and attempt/performance consistency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use memo_seeder::constants::fixtures;
use memo_seeder::database::{Database, Table};
use memo_seeder::models::AttemptStatus;
use memo_seeder::seeding::{
    AcademicStructureSeeder, ContentTypesSeeder, CuratedContentSeeder, CuratedQuizzesSeeder,
    FakeAnalyticsSeeder, SeedContext, SeedOutcome,
};

const CURATED_SLUGS: [&str; 4] = [
    "comprehensive-quiz-all-types",
    "mathematics-timed-quiz",
    "science-final-exam",
    "quick-easy-quiz",
];

async fn slug_counts(db: &Database, chapter_slug: &str) -> HashMap<String, i64> {
    let chapter = db
        .get_content_chapter_by_slug(chapter_slug)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("chapter {chapter_slug} missing"));
    db.chapter_content_counts(chapter.id)
        .await
        .unwrap()
        .into_iter()
        .collect()
}

async fn seed_quiz_bank(ctx: &mut SeedContext<'_>) -> SeedOutcome {
    common::run_seeder(ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(ctx, &CuratedQuizzesSeeder).await.unwrap()
}

#[tokio::test]
async fn test_curated_chapters_land_on_their_subjects() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 51, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &ContentTypesSeeder)
        .await
        .unwrap();
    let outcome = common::run_seeder(&mut ctx, &CuratedContentSeeder)
        .await
        .unwrap();
    assert_eq!(outcome, SeedOutcome::completed(14));

    let functions = slug_counts(&db, "sciences-exp-mathematics-numerical-functions").await;
    assert_eq!(functions.get("lesson"), Some(&2));
    assert_eq!(functions.get("summary"), Some(&1));
    assert_eq!(functions.get("exercises"), Some(&1));

    let sequences = slug_counts(&db, "sciences-exp-mathematics-sequences").await;
    assert_eq!(sequences.get("lesson"), Some(&2));

    let kinetics = slug_counts(&db, "sciences-exp-physics-chemical-kinetics").await;
    assert_eq!(kinetics.get("lesson"), Some(&1));
    assert_eq!(kinetics.get("exercises"), Some(&1));

    let literature = slug_counts(&db, "sciences-exp-arabic-pre-islamic-literature").await;
    assert_eq!(literature.get("lesson"), Some(&1));
    assert_eq!(literature.get("summary"), Some(&1));

    let math = db
        .get_subject_by_slug("sciences-exp-mathematics")
        .await
        .unwrap()
        .unwrap();
    let orders: Vec<i64> = db
        .list_content_chapters(math.id)
        .await
        .unwrap()
        .iter()
        .map(|c| c.sort_order)
        .collect();
    assert_eq!(orders, [1, 2]);
}

#[tokio::test]
async fn test_curated_content_rerun_replaces_instead_of_duplicating() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 52, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &ContentTypesSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &CuratedContentSeeder)
        .await
        .unwrap();
    let second = common::run_seeder(&mut ctx, &CuratedContentSeeder)
        .await
        .unwrap();

    assert_eq!(second, SeedOutcome::completed(14));
    assert_eq!(db.count_rows(Table::ContentChapters).await.unwrap(), 4);
    assert_eq!(db.count_rows(Table::Contents).await.unwrap(), 10);
}

#[tokio::test]
async fn test_curated_content_without_content_types_is_skipped() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 53, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    let outcome = common::run_seeder(&mut ctx, &CuratedContentSeeder)
        .await
        .unwrap();

    assert_eq!(outcome, SeedOutcome::skipped("content type 'lesson' not found"));
    assert_eq!(db.count_rows(Table::ContentChapters).await.unwrap(), 0);
}

#[tokio::test]
async fn test_curated_quizzes_are_placed_and_counted() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 54, Utc::now());

    let outcome = seed_quiz_bank(&mut ctx).await;
    assert!(outcome.is_completed());

    let math = db
        .get_subject_by_slug("sciences-exp-mathematics")
        .await
        .unwrap()
        .unwrap();
    let physics = db
        .get_subject_by_slug("sciences-exp-physics")
        .await
        .unwrap()
        .unwrap();

    let quizzes = db.list_quizzes().await.unwrap();
    let slugs: HashSet<&str> = quizzes.iter().map(|q| q.slug.as_str()).collect();
    let expected: HashSet<&str> = CURATED_SLUGS.into_iter().collect();
    assert_eq!(slugs, expected);

    let mut questions = 0;
    for quiz in &quizzes {
        let expected_subject = if quiz.slug == "science-final-exam" {
            physics.id
        } else {
            math.id
        };
        assert_eq!(quiz.subject_id, expected_subject, "{}", quiz.slug);
        assert_eq!(quiz.show_correct_answers, quiz.quiz_type != "exam");

        let stored = db.list_quiz_questions(quiz.id).await.unwrap();
        assert_eq!(quiz.total_questions, stored.len() as i64);
        for (index, question) in stored.iter().enumerate() {
            assert_eq!(question.question_order, index as i64 + 1);
        }
        questions += stored.len();
    }
    assert_eq!(questions, 17);

    for index in 1..=3 {
        assert!(db
            .get_user_by_email(&fixtures::test_student_email(index))
            .await
            .unwrap()
            .is_some());
    }
}

#[tokio::test]
async fn test_attempts_and_performances_agree() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 55, Utc::now());

    seed_quiz_bank(&mut ctx).await;

    let performances = db.list_quiz_performances().await.unwrap();
    let keyed: HashMap<(i64, i64), _> = performances
        .iter()
        .map(|p| ((p.user_id, p.quiz_id), p))
        .collect();
    assert_eq!(keyed.len(), performances.len());

    let mut attempt_total = 0_u64;
    for quiz in db.list_quizzes().await.unwrap() {
        let attempts = db.list_quiz_attempts(quiz.id).await.unwrap();
        assert!((3..=9).contains(&attempts.len()), "{}", quiz.slug);
        attempt_total += attempts.len() as u64;

        let mut completed_per_user: HashMap<i64, Vec<f64>> = HashMap::new();
        for attempt in &attempts {
            assert_eq!(attempt.total_questions, quiz.total_questions);
            assert!(attempt.started_at <= Utc::now());
            if attempt.status == AttemptStatus::Completed {
                let counted = attempt.correct_answers.unwrap()
                    + attempt.incorrect_answers.unwrap()
                    + attempt.skipped_answers.unwrap();
                assert_eq!(counted, attempt.total_questions);
                assert!(attempt.total_points.unwrap() <= attempt.max_score);
                let score = attempt.score_percentage.unwrap();
                assert!((0.0..=100.0).contains(&score));
                assert!(attempt.completed_at.unwrap() > attempt.started_at);
                completed_per_user
                    .entry(attempt.user_id)
                    .or_default()
                    .push(score);
            } else {
                assert!(attempt.score_percentage.is_none());
                assert!(attempt.passed.is_none());
                assert!(attempt.completed_at.is_none());
            }
        }

        for (user_id, scores) in &completed_per_user {
            let performance = keyed
                .get(&(*user_id, quiz.id))
                .unwrap_or_else(|| panic!("no performance for user {user_id}"));
            assert_eq!(performance.subject_id, quiz.subject_id);
            assert_eq!(performance.total_attempts, scores.len() as i64);
            let best = scores.iter().copied().fold(0.0, f64::max);
            assert!((performance.best_score - best).abs() < 1e-9);
            assert!(performance.average_score <= performance.best_score + 1e-9);

            let concepts = performance.weak_concepts.as_object().unwrap();
            assert!((1..=3).contains(&concepts.len()));
            for concept in concepts.values() {
                let rate = concept["error_rate"].as_f64().unwrap();
                assert!((0.5..=0.8).contains(&rate));
            }
        }
        let with_performance = keyed.keys().filter(|(_, q)| *q == quiz.id).count();
        assert_eq!(with_performance, completed_per_user.len());
    }

    assert_eq!(db.count_rows(Table::QuizAttempts).await.unwrap(), attempt_total);
}

#[tokio::test]
async fn test_curated_quiz_rerun_rebuilds_the_bank() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 56, Utc::now());

    seed_quiz_bank(&mut ctx).await;
    let users = db.count_rows(Table::Users).await.unwrap();
    common::run_seeder(&mut ctx, &CuratedQuizzesSeeder)
        .await
        .unwrap();

    assert_eq!(db.count_rows(Table::Quizzes).await.unwrap(), 4);
    assert_eq!(db.count_rows(Table::QuizQuestions).await.unwrap(), 17);
    assert_eq!(db.count_rows(Table::Users).await.unwrap(), users);

    let quiz_ids: HashSet<i64> = db
        .list_quizzes()
        .await
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect();
    for performance in db.list_quiz_performances().await.unwrap() {
        assert!(quiz_ids.contains(&performance.quiz_id));
    }
}

#[tokio::test]
async fn test_existing_students_take_the_curated_quizzes() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 57, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &FakeAnalyticsSeeder)
        .await
        .unwrap();
    let users = db.count_rows(Table::Users).await.unwrap();
    common::run_seeder(&mut ctx, &CuratedQuizzesSeeder)
        .await
        .unwrap();

    assert_eq!(db.count_rows(Table::Users).await.unwrap(), users);
    let mut takers = HashSet::new();
    for quiz in db.list_quizzes().await.unwrap() {
        for attempt in db.list_quiz_attempts(quiz.id).await.unwrap() {
            takers.insert(attempt.user_id);
        }
    }
    assert_eq!(takers.len(), 5);
}

#[tokio::test]
async fn test_unknown_stream_skips_curated_quizzes() {
    let db = common::create_test_database().await.unwrap();
    let mut config = common::test_config();
    config.quiz_stream = "no-such-stream".to_owned();
    let mut ctx = common::seeded_context(&db, &config, 58, Utc::now());

    let outcome = seed_quiz_bank(&mut ctx).await;

    assert_eq!(
        outcome,
        SeedOutcome::skipped("stream 'no-such-stream' not found")
    );
    assert_eq!(db.count_rows(Table::Quizzes).await.unwrap(), 0);
}
