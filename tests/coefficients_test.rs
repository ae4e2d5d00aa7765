// ABOUTME: Integration tests for coefficient resolution against a seeded database
// ABOUTME: Covers stream overrides, subject defaults, undefined pairs and weighted averages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use memo_seeder::database::{Database, Table};
use memo_seeder::errors::{CoefficientOrigin, ErrorCode};
use memo_seeder::models::{NewSubject, SubjectCategory, SubjectStream};
use memo_seeder::seeding::coefficients::CoefficientResolver;
use memo_seeder::seeding::{AcademicStructureSeeder, SubjectCoefficientsSeeder};

async fn seeded_academic(with_overrides: bool) -> Database {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 1, Utc::now());
    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    if with_overrides {
        common::run_seeder(&mut ctx, &SubjectCoefficientsSeeder)
            .await
            .unwrap();
    }
    db
}

async fn ids(db: &Database, subject: &str, stream: &str) -> (i64, i64) {
    let subject = db.get_subject_by_slug(subject).await.unwrap().unwrap();
    let stream = db.get_stream_by_slug(stream).await.unwrap().unwrap();
    (subject.id, stream.id)
}

#[tokio::test]
async fn test_seeded_override_is_preferred() {
    let db = seeded_academic(true).await;
    let resolver = CoefficientResolver::new(&db);

    let (subject, stream) = ids(&db, "mathematics-mathematics", "mathematics").await;
    let resolved = resolver.resolve(subject, stream).await.unwrap();
    assert_eq!(resolved.value.get(), 7);
    assert_eq!(resolved.source, CoefficientOrigin::StreamOverride);

    // default 3, override 4
    let (subject, stream) = ids(&db, "mathematics-biology", "mathematics").await;
    let resolved = resolver.resolve(subject, stream).await.unwrap();
    assert_eq!(resolved.value.get(), 4);
    assert_eq!(resolved.source, CoefficientOrigin::StreamOverride);
}

#[tokio::test]
async fn test_subject_default_without_override() {
    let db = seeded_academic(false).await;
    assert_eq!(db.count_rows(Table::SubjectStreams).await.unwrap(), 0);

    let (subject, stream) = ids(&db, "sciences-exp-mathematics", "sciences-exp").await;
    let resolved = CoefficientResolver::new(&db)
        .resolve(subject, stream)
        .await
        .unwrap();
    assert_eq!(resolved.value.get(), 5);
    assert_eq!(resolved.source, CoefficientOrigin::SubjectDefault);
}

#[tokio::test]
async fn test_subject_of_another_stream_is_undefined() {
    let db = seeded_academic(true).await;

    let (subject, stream) = ids(&db, "sciences-exp-mathematics", "mathematics").await;
    let error = CoefficientResolver::new(&db)
        .resolve(subject, stream)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::CoefficientUndefined);
}

#[tokio::test]
async fn test_stream_agnostic_subject_uses_override_then_default() {
    let db = seeded_academic(false).await;
    let year = db.find_bac_year().await.unwrap().unwrap();
    let subject_id = db
        .upsert_subject(&NewSubject {
            academic_stream_id: None,
            academic_year_id: year.id,
            name_ar: "الإعلام الآلي".to_owned(),
            slug: "shared-informatics".to_owned(),
            description_ar: None,
            coefficient: 5,
            icon: None,
            color: None,
            sort_order: 99,
        })
        .await
        .unwrap();
    let mathematics = db.get_stream_by_slug("mathematics").await.unwrap().unwrap();
    let languages = db
        .get_stream_by_slug("foreign-languages")
        .await
        .unwrap()
        .unwrap();

    db.upsert_subject_stream(&SubjectStream {
        subject_id,
        academic_stream_id: mathematics.id,
        coefficient: 7,
        category: SubjectCategory::Other,
        is_active: true,
    })
    .await
    .unwrap();

    let resolver = CoefficientResolver::new(&db);
    let overridden = resolver.resolve(subject_id, mathematics.id).await.unwrap();
    assert_eq!(overridden.value.get(), 7);
    assert_eq!(overridden.source, CoefficientOrigin::StreamOverride);

    let fallback = resolver.resolve(subject_id, languages.id).await.unwrap();
    assert_eq!(fallback.value.get(), 5);
    assert_eq!(fallback.source, CoefficientOrigin::SubjectDefault);

    db.upsert_subject_stream(&SubjectStream {
        subject_id,
        academic_stream_id: mathematics.id,
        coefficient: 0,
        category: SubjectCategory::Other,
        is_active: true,
    })
    .await
    .unwrap();
    let error = resolver
        .resolve(subject_id, mathematics.id)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidCoefficient);
}

#[tokio::test]
async fn test_weighted_average_uses_resolved_weights() {
    let db = seeded_academic(true).await;
    let (maths, stream) = ids(&db, "mathematics-mathematics", "mathematics").await;
    let (physics, _) = ids(&db, "mathematics-physics", "mathematics").await;
    let resolver = CoefficientResolver::new(&db);

    let average = resolver
        .weighted_average(stream, &[(maths, 16.0), (physics, 10.0)])
        .await
        .unwrap();
    let expected = (16.0 * 7.0 + 10.0 * 6.0) / 13.0;
    assert!((average - expected).abs() < 1e-9, "{average} != {expected}");

    let error = resolver.weighted_average(stream, &[]).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_coefficient_rerun_keeps_one_row_per_pair() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 2, Utc::now());
    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();

    common::run_seeder(&mut ctx, &SubjectCoefficientsSeeder)
        .await
        .unwrap();
    let first = db.count_rows(Table::SubjectStreams).await.unwrap();
    assert!(first > 0);

    common::run_seeder(&mut ctx, &SubjectCoefficientsSeeder)
        .await
        .unwrap();
    assert_eq!(db.count_rows(Table::SubjectStreams).await.unwrap(), first);

    let links = db.list_subject_streams().await.unwrap();
    assert_eq!(links.len() as u64, first);
    let pairs: std::collections::HashSet<_> = links
        .iter()
        .map(|link| (link.subject_id, link.academic_stream_id))
        .collect();
    assert_eq!(pairs.len(), links.len());
    for link in &links {
        assert!(link.coefficient > 0, "{link:?}");
    }
}
