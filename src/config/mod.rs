// ABOUTME: Configuration management for seeding runs
// ABOUTME: Database URL parsing and environment-driven seeder settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the Memo seeders
//!
//! - **Database**: type-safe database URL (`SQLite` file or in-memory)
//! - **Seed**: fixture sizes, random seed, password cost and quiz stream

/// Database URL parsing
pub mod database;
/// Seeder settings loaded from the environment
pub mod seed;

pub use database::DatabaseUrl;
pub use seed::SeedConfig;
