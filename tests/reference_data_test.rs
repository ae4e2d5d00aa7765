// ABOUTME: Integration tests for the reference data seeders
// ABOUTME: Reruns of natural-key inserts must leave counts unchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashSet;

use chrono::Utc;
use memo_seeder::constants::settings;
use memo_seeder::database::Table;
use memo_seeder::models::{AchievementCriteria, ContentKind};
use memo_seeder::seeding::{
    AchievementsSeeder, BacSessionsSeeder, ContentTypesSeeder, PromosSeeder, SeedOutcome,
};

#[tokio::test]
async fn test_content_types_insert_once() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 1, Utc::now());

    let first = common::run_seeder(&mut ctx, &ContentTypesSeeder)
        .await
        .unwrap();
    assert_eq!(first.rows(), ContentKind::ALL.len() as u64);
    let second = common::run_seeder(&mut ctx, &ContentTypesSeeder)
        .await
        .unwrap();
    assert_eq!(second, SeedOutcome::completed(0));
    assert_eq!(
        db.count_rows(Table::ContentTypes).await.unwrap(),
        ContentKind::ALL.len() as u64
    );

    for kind in ContentKind::ALL {
        assert!(db.get_content_type_id(kind.slug()).await.unwrap().is_some());
    }
}

#[tokio::test]
async fn test_achievements_are_keyed_by_name() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 1, Utc::now());

    let first = common::run_seeder(&mut ctx, &AchievementsSeeder)
        .await
        .unwrap();
    let total = db.count_rows(Table::Achievements).await.unwrap();
    assert_eq!(first.rows(), total);

    let second = common::run_seeder(&mut ctx, &AchievementsSeeder)
        .await
        .unwrap();
    assert_eq!(second.rows(), 0);
    assert_eq!(db.count_rows(Table::Achievements).await.unwrap(), total);

    let criteria = db
        .get_achievement_criteria("عبقري الرياضيات")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        criteria,
        AchievementCriteria::SubjectMastery {
            subject: "mathematics".to_owned(),
            count: 20,
        }
    );
}

#[tokio::test]
async fn test_bac_sessions_and_years_are_unique() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 1, Utc::now());

    common::run_seeder(&mut ctx, &BacSessionsSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &BacSessionsSeeder)
        .await
        .unwrap();

    assert_eq!(db.list_bac_sessions().await.unwrap().len(), 1);
    let years = db.list_bac_years().await.unwrap();
    assert_eq!(years.len(), 10);
    let distinct: HashSet<_> = years.iter().map(|y| y.year).collect();
    assert_eq!(distinct.len(), years.len());
    for year in &years {
        assert_eq!(year.is_active, year.year >= 2020, "{}", year.year);
    }
}

#[tokio::test]
async fn test_promos_replace_previous_slides() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 1, Utc::now());

    common::run_seeder(&mut ctx, &PromosSeeder).await.unwrap();
    common::run_seeder(&mut ctx, &PromosSeeder).await.unwrap();

    assert_eq!(db.count_rows(Table::Promos).await.unwrap(), 6);
    assert_eq!(db.count_active_promos().await.unwrap(), 5);
    assert_eq!(
        db.get_app_setting(settings::PROMOS_SECTION_ENABLED)
            .await
            .unwrap()
            .as_deref(),
        Some("1")
    );
}
