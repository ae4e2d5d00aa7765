// ABOUTME: Integration tests for environment-driven seeder configuration
// ABOUTME: Covers variable parsing, CLI overrides and file-backed databases across reconnects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::env;

use anyhow::Result;
use chrono::Utc;
use memo_seeder::config::{DatabaseUrl, SeedConfig};
use memo_seeder::constants::env_vars;
use memo_seeder::database::{Database, Table};
use memo_seeder::errors::ErrorCode;
use memo_seeder::seeding::{catalogue, SeedPlan};
use serial_test::serial;
use tempfile::TempDir;

const SEED_VARS: [&str; 8] = [
    env_vars::DATABASE_URL,
    env_vars::SEED_RNG,
    env_vars::FAKE_USERS,
    env_vars::TEST_STUDENTS,
    env_vars::SUBSCRIPTION_CODES,
    env_vars::QUIZ_STREAM,
    env_vars::PASSWORD_COST,
    env_vars::WITH_FIXTURES,
];

fn clear_seed_vars() {
    for key in SEED_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env_reads_process_variables() {
    clear_seed_vars();
    env::set_var(env_vars::DATABASE_URL, "sqlite::memory:");
    env::set_var(env_vars::FAKE_USERS, "12");
    env::set_var(env_vars::QUIZ_STREAM, "mathematics");
    env::set_var(env_vars::WITH_FIXTURES, "yes");

    let config = SeedConfig::from_env().unwrap();
    clear_seed_vars();

    assert!(config.database_url.is_memory());
    assert_eq!(config.fake_users, 12);
    assert_eq!(config.quiz_stream, "mathematics");
    assert!(config.with_fixtures);
    assert_eq!(config.rng_seed, None);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_boolean() {
    clear_seed_vars();
    env::set_var(env_vars::WITH_FIXTURES, "sometimes");

    let error = SeedConfig::from_env().err().unwrap();
    clear_seed_vars();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains(env_vars::WITH_FIXTURES));
}

#[test]
#[serial]
fn test_overrides_apply_after_environment() {
    clear_seed_vars();
    env::set_var(env_vars::SEED_RNG, "3");

    let config = SeedConfig::from_env()
        .unwrap()
        .with_overrides(Some("sqlite:/tmp/override.db"), Some(99))
        .unwrap();
    clear_seed_vars();

    assert_eq!(config.rng_seed, Some(99));
    assert_eq!(
        config.database_url.to_connection_string(),
        "sqlite:/tmp/override.db"
    );
}

#[tokio::test]
async fn test_file_database_keeps_rows_across_reconnects() -> Result<()> {
    common::init_test_logging();
    let temp_dir = TempDir::new()?;
    let url = DatabaseUrl::SQLite {
        path: temp_dir.path().join("nested").join("memo.db"),
    };
    let config = SeedConfig {
        database_url: url.clone(),
        ..common::test_config()
    };

    {
        let db = Database::new(&url).await?;
        let mut ctx = common::seeded_context(&db, &config, 5, Utc::now());
        SeedPlan::new(catalogue::core())?.execute(&mut ctx).await?;
    }

    let db = Database::new(&url).await?;
    let subjects = db.count_rows(Table::Subjects).await?;
    assert!(subjects > 0);

    // core steps are idempotent
    let mut ctx = common::seeded_context(&db, &config, 6, Utc::now());
    SeedPlan::new(catalogue::core())?.execute(&mut ctx).await?;
    assert_eq!(db.count_rows(Table::Subjects).await?, subjects);
    Ok(())
}
