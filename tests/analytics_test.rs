// ABOUTME: Integration tests for the synthetic analytics users
// ABOUTME: Stored stats must be consistent and reruns must replace previous accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use memo_seeder::constants::fixtures;
use memo_seeder::database::Table;
use memo_seeder::seeding::{AcademicStructureSeeder, FakeAnalyticsSeeder};

#[tokio::test]
async fn test_synthetic_users_have_consistent_stats() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 21, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    let outcome = common::run_seeder(&mut ctx, &FakeAnalyticsSeeder)
        .await
        .unwrap();

    let users = u64::from(config.fake_users);
    let logs = db.count_rows(Table::UserActivityLogs).await.unwrap();
    assert_eq!(outcome.rows(), users * 3 + logs);
    assert!(logs >= users * 5 && logs <= users * 50);

    let stats = db.list_user_stats().await.unwrap();
    assert_eq!(stats.len() as u64, users);
    for row in &stats {
        row.validate().unwrap();
        assert!(row.longest_streak_days >= row.current_streak_days);
    }

    let first = db
        .get_user_by_email(&fixtures::analytics_email(1))
        .await
        .unwrap();
    assert!(first.is_some());
}

#[tokio::test]
async fn test_rerun_replaces_previous_synthetic_users() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 22, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &FakeAnalyticsSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &FakeAnalyticsSeeder)
        .await
        .unwrap();

    let users = u64::from(config.fake_users);
    assert_eq!(db.count_rows(Table::Users).await.unwrap(), users);
    assert_eq!(db.count_rows(Table::UserAcademicProfiles).await.unwrap(), users);
    assert_eq!(db.count_rows(Table::UserStats).await.unwrap(), users);
}
