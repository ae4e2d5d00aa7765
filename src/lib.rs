// ABOUTME: Main library entry point for the Memo platform database seeders
// ABOUTME: Academic taxonomy, reference data, curriculum trees and fixture generators over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Memo Seeder
//!
//! Populates the Memo BAC exam-prep database with reference data and sample
//! fixtures.
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` pool, schema migration and per-table operations
//! - **Seeding**: the [`seeding::Seeder`] trait, the dependency-ordered
//!   [`seeding::SeedPlan`], the taxonomy builder and the coefficient resolver
//! - **Config**: database URL and environment-driven seeder settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use memo_seeder::config::SeedConfig;
//! use memo_seeder::database::Database;
//! use memo_seeder::errors::AppResult;
//! use memo_seeder::seeding::{catalogue, SeedPlan};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = SeedConfig::from_env()?;
//!     let database = Database::new(&config.database_url).await?;
//!     let plan = SeedPlan::new(catalogue::core())?;
//!     let summary = plan.run(&database, &config).await?;
//!     println!("{} steps completed", summary.completed().count());
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants and environment variable names
pub mod constants;

/// `SQLite` storage for every seeded table
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Seeders, dependency graph and shared generators
pub mod seeding;

/// Domain models shared with `memo-core`
pub mod models {
    pub use memo_core::models::*;
}
