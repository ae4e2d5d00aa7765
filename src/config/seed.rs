// ABOUTME: Seeder settings: fixture sizes, random seed, bcrypt cost and quiz stream
// ABOUTME: Loaded from environment variables with CLI overrides applied on top
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::DatabaseUrl;
use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};

/// Lowest cost bcrypt accepts
const MIN_PASSWORD_COST: u32 = 4;
/// Highest cost bcrypt accepts
const MAX_PASSWORD_COST: u32 = 31;

/// Settings shared by every seeder in a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Target database
    pub database_url: DatabaseUrl,
    /// Fixed seed for the random source, time-derived when absent
    pub rng_seed: Option<u64>,
    /// Synthetic analytics users
    pub fake_users: u32,
    /// Commerce fixture students
    pub test_students: u32,
    /// Subscription codes
    pub subscription_codes: u32,
    /// Stream slug whose BAC subjects receive sample quizzes
    pub quiz_stream: String,
    /// Bcrypt cost for fixture account passwords
    pub password_cost: u32,
    /// Include fixture generators in `seed all`
    pub with_fixtures: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            database_url: DatabaseUrl::default(),
            rng_seed: None,
            fake_users: defaults::FAKE_USERS,
            test_students: defaults::TEST_STUDENTS,
            subscription_codes: defaults::SUBSCRIPTION_CODES,
            quiz_stream: defaults::QUIZ_STREAM.to_owned(),
            password_cost: defaults::PASSWORD_COST,
            with_fixtures: false,
        }
    }
}

impl SeedConfig {
    /// Load settings from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the variable when a value cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the variable when a value cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(env_vars::DATABASE_URL)
            .map(|url| DatabaseUrl::parse_url(&url))
            .transpose()?
            .unwrap_or_default();

        let password_cost = parse_var(&lookup, env_vars::PASSWORD_COST, defaults::PASSWORD_COST)?;
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&password_cost) {
            return Err(AppError::config_invalid(format!(
                "{} must be between {MIN_PASSWORD_COST} and {MAX_PASSWORD_COST}, got {password_cost}",
                env_vars::PASSWORD_COST
            )));
        }

        Ok(Self {
            database_url,
            rng_seed: lookup(env_vars::SEED_RNG)
                .map(|raw| parse_value::<u64>(env_vars::SEED_RNG, &raw))
                .transpose()?,
            fake_users: parse_var(&lookup, env_vars::FAKE_USERS, defaults::FAKE_USERS)?,
            test_students: parse_var(&lookup, env_vars::TEST_STUDENTS, defaults::TEST_STUDENTS)?,
            subscription_codes: parse_var(
                &lookup,
                env_vars::SUBSCRIPTION_CODES,
                defaults::SUBSCRIPTION_CODES,
            )?,
            quiz_stream: lookup(env_vars::QUIZ_STREAM)
                .filter(|slug| !slug.trim().is_empty())
                .unwrap_or_else(|| defaults::QUIZ_STREAM.to_owned()),
            password_cost,
            with_fixtures: lookup(env_vars::WITH_FIXTURES)
                .map(|raw| parse_bool(env_vars::WITH_FIXTURES, &raw))
                .transpose()?
                .unwrap_or(false),
        })
    }

    /// Apply command-line overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the database URL override cannot be parsed
    pub fn with_overrides(
        mut self,
        database_url: Option<&str>,
        seed: Option<u64>,
    ) -> AppResult<Self> {
        if let Some(url) = database_url {
            self.database_url = DatabaseUrl::parse_url(url)?;
        }
        if seed.is_some() {
            self.rng_seed = seed;
        }
        Ok(self)
    }

    /// Fix the seed of this run so later reads agree with what was logged
    #[must_use]
    pub fn with_resolved_seed(mut self) -> Self {
        self.rng_seed = Some(self.effective_seed());
        self
    }

    /// Seed for this run, derived from the clock when none was configured
    #[must_use]
    pub fn effective_seed(&self) -> u64 {
        self.rng_seed.unwrap_or_else(|| {
            let now = Utc::now();
            now.timestamp_nanos_opt()
                .map_or_else(|| now.timestamp() as u64, |nanos| nanos as u64)
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}")))
}

fn parse_bool(key: &str, raw: &str) -> AppResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(AppError::config_invalid(format!(
            "Invalid {key} value '{raw}': expected a boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = SeedConfig::from_lookup(|_| None).unwrap_or_default();
        assert_eq!(config, SeedConfig::default());
        assert_eq!(config.quiz_stream, "sciences-exp");
        assert_eq!(config.fake_users, 50);
    }

    #[test]
    fn test_values_read_from_lookup() {
        let config = SeedConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("MEMO_SEED_RNG", "42"),
            ("MEMO_FAKE_USERS", "5"),
            ("MEMO_WITH_FIXTURES", "true"),
        ]))
        .unwrap_or_default();

        assert!(config.database_url.is_memory());
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.fake_users, 5);
        assert!(config.with_fixtures);
        assert_eq!(config.effective_seed(), 42);
    }

    #[test]
    fn test_resolved_seed_is_stable() {
        let config = SeedConfig::default().with_resolved_seed();
        let logged = config.effective_seed();
        assert_eq!(config.rng_seed, Some(logged));
        assert_eq!(config.effective_seed(), logged);

        let pinned = SeedConfig {
            rng_seed: Some(7),
            ..SeedConfig::default()
        }
        .with_resolved_seed();
        assert_eq!(pinned.rng_seed, Some(7));
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let error = SeedConfig::from_lookup(lookup_from(&[("MEMO_TEST_STUDENTS", "many")])).err();
        let error = error.map(|e| (e.code, e.message));
        assert!(matches!(
            error,
            Some((ErrorCode::ConfigInvalid, ref message)) if message.contains("MEMO_TEST_STUDENTS")
        ));
    }

    #[test]
    fn test_password_cost_out_of_range() {
        let result = SeedConfig::from_lookup(lookup_from(&[("MEMO_PASSWORD_COST", "2")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = SeedConfig::default()
            .with_overrides(Some("sqlite::memory:"), Some(7))
            .unwrap_or_default();
        assert!(config.database_url.is_memory());
        assert_eq!(config.rng_seed, Some(7));
    }
}
