// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, small fixture configs and seeded contexts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `memo_seeder`

use std::sync::Once;

use anyhow::Result;
use chrono::{DateTime, Utc};
use memo_seeder::{
    config::{DatabaseUrl, SeedConfig},
    database::Database,
    seeding::{SeedContext, SeedOutcome, Seeder},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh migrated in-memory database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&DatabaseUrl::Memory).await?)
}

/// Defaults with small fixture counts and the cheapest bcrypt cost
pub fn test_config() -> SeedConfig {
    SeedConfig {
        database_url: DatabaseUrl::Memory,
        rng_seed: Some(42),
        fake_users: 6,
        test_students: 8,
        subscription_codes: 10,
        quiz_stream: "sciences-exp".to_owned(),
        password_cost: 4,
        with_fixtures: true,
    }
}

/// Deterministic random source
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Context with a fixed seed and a fixed clock
pub fn seeded_context<'a>(
    db: &'a Database,
    config: &'a SeedConfig,
    seed: u64,
    now: DateTime<Utc>,
) -> SeedContext<'a> {
    SeedContext::with_rng(db, config, seeded_rng(seed), now)
}

/// Run one seeder directly, bypassing the plan's prerequisite checks
pub async fn run_seeder(ctx: &mut SeedContext<'_>, seeder: &dyn Seeder) -> Result<SeedOutcome> {
    Ok(seeder.run(ctx).await?)
}
