// ABOUTME: Integration tests for the paid course fixtures
// ABOUTME: Checks catalogue sizes, subscription activity flags and rerun cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{TimeZone, Utc};
use memo_seeder::constants::fixtures;
use memo_seeder::database::Table;
use memo_seeder::seeding::{AcademicStructureSeeder, PaidCoursesSeeder};

#[tokio::test]
async fn test_subscriptions_are_active_only_before_expiry() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let mut ctx = common::seeded_context(&db, &config, 31, now);

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    let outcome = common::run_seeder(&mut ctx, &PaidCoursesSeeder)
        .await
        .unwrap();
    assert!(outcome.is_completed());

    let subscriptions = db.list_user_subscriptions().await.unwrap();
    for subscription in &subscriptions {
        assert_eq!(subscription.created_at, now);
        assert_eq!(
            subscription.is_active,
            subscription.expires_at > now,
            "subscription {}",
            subscription.id
        );
        assert!(["receipt", "code"].contains(&subscription.activated_by.as_str()));
    }
    let stored = db.count_rows(Table::UserSubscriptions).await.unwrap();
    assert!(stored <= u64::from(config.test_students) * 2);
}

#[tokio::test]
async fn test_catalogue_sizes_and_fixture_accounts() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 32, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &PaidCoursesSeeder)
        .await
        .unwrap();

    assert_eq!(db.count_rows(Table::Courses).await.unwrap(), 15);
    assert_eq!(db.count_rows(Table::SubscriptionPackages).await.unwrap(), 6);
    assert_eq!(
        db.count_rows(Table::SubscriptionCodes).await.unwrap(),
        u64::from(config.subscription_codes)
    );
    assert_eq!(
        db.count_rows(Table::Users).await.unwrap(),
        u64::from(config.test_students) + 1
    );
    assert!(db
        .get_user_by_email(fixtures::ADMIN_EMAIL)
        .await
        .unwrap()
        .is_some());
    assert!(db
        .get_user_by_email(&fixtures::test_student_email(config.test_students))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_rerun_replaces_courses_and_reuses_accounts() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 33, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &PaidCoursesSeeder)
        .await
        .unwrap();
    common::run_seeder(&mut ctx, &PaidCoursesSeeder)
        .await
        .unwrap();

    assert_eq!(db.count_rows(Table::Courses).await.unwrap(), 15);
    assert_eq!(db.count_rows(Table::SubscriptionPackages).await.unwrap(), 6);
    assert_eq!(
        db.count_rows(Table::SubscriptionCodes).await.unwrap(),
        u64::from(config.subscription_codes)
    );
    assert_eq!(
        db.count_rows(Table::Users).await.unwrap(),
        u64::from(config.test_students) + 1
    );
}
