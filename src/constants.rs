// ABOUTME: System-wide constants for the Memo seeders
// ABOUTME: Environment variable names, configuration defaults and fixture identities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded names and defaults. Values that can be overridden at runtime are read
//! by [`crate::config::SeedConfig::from_env`] using the variable names below.

/// Service identity used in logs
pub mod service_names {
    /// Binary name
    pub const MEMO_SEED: &str = "memo-seed";
}

/// Environment variable names
pub mod env_vars {
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Seed for the random source
    pub const SEED_RNG: &str = "MEMO_SEED_RNG";
    /// Synthetic analytics users to create
    pub const FAKE_USERS: &str = "MEMO_FAKE_USERS";
    /// Commerce fixture students to create
    pub const TEST_STUDENTS: &str = "MEMO_TEST_STUDENTS";
    /// Subscription codes to create
    pub const SUBSCRIPTION_CODES: &str = "MEMO_SUBSCRIPTION_CODES";
    /// Stream whose BAC subjects receive sample quizzes
    pub const QUIZ_STREAM: &str = "MEMO_QUIZ_STREAM";
    /// Bcrypt cost for fixture accounts
    pub const PASSWORD_COST: &str = "MEMO_PASSWORD_COST";
    /// Include fixture generators in `seed all`
    pub const WITH_FIXTURES: &str = "MEMO_WITH_FIXTURES";
}

/// Configuration defaults
pub mod defaults {
    /// Default `SQLite` database location
    pub const DATABASE_URL: &str = "sqlite:./data/memo.db";
    /// Synthetic analytics users
    pub const FAKE_USERS: u32 = 50;
    /// Commerce fixture students
    pub const TEST_STUDENTS: u32 = 20;
    /// Subscription codes
    pub const SUBSCRIPTION_CODES: u32 = 30;
    /// Stream receiving sample quizzes
    pub const QUIZ_STREAM: &str = "sciences-exp";
    /// Cheapest accepted bcrypt cost
    pub const PASSWORD_COST: u32 = 4;
}

/// Fixture account identities
pub mod fixtures {
    /// Plain password shared by every fixture account
    pub const PASSWORD: &str = "password";
    /// Administrator created by the commerce fixtures when none exists
    pub const ADMIN_EMAIL: &str = "admin@test.com";
    /// Administrator display name
    pub const ADMIN_NAME: &str = "مدير النظام";
    /// `LIKE` pattern matching synthetic analytics users
    pub const ANALYTICS_EMAIL_PATTERN: &str = "student%@example.com";
    /// `LIKE` pattern matching fixture courses
    pub const COURSE_SLUG_PATTERN: &str = "dor-%";

    /// Email of the n-th synthetic analytics user
    #[must_use]
    pub fn analytics_email(index: u32) -> String {
        format!("student{index}@example.com")
    }

    /// Email of the n-th fixture student, shared by the commerce and curated quiz fixtures
    #[must_use]
    pub fn test_student_email(index: u32) -> String {
        format!("student{index}@test.com")
    }
}

/// App settings keys
pub mod settings {
    /// Toggles the promo slider on the home page
    pub const PROMOS_SECTION_ENABLED: &str = "promos_section_enabled";
}
