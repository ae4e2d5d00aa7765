// ABOUTME: Synthetic student accounts with academic profiles, stats and activity history
// ABOUTME: Previous synthetic accounts are removed first so reruns replace them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::pools::{FIRST_NAMES, LAST_NAMES};
use super::random::{between, days_ago, percent, pick};
use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::constants::fixtures;
use crate::database::Table;
use crate::errors::AppResult;
use crate::models::{ActivityType, NewUser, UserRole, UserStats};

const ACTIVITY_DESCRIPTION: &str = "Fake activity for seeding";
const ACTIVITY_IP: &str = "127.0.0.1";
const ACTIVITY_USER_AGENT: &str = "Mozilla/5.0 (Seeder)";

fn arabic_name<R: Rng + ?Sized>(rng: &mut R) -> AppResult<String> {
    Ok(format!("{} {}", pick(rng, &FIRST_NAMES)?, pick(rng, &LAST_NAMES)?))
}

/// Random counters made consistent by [`UserStats::normalized`]
pub fn sample_stats<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> UserStats {
    let current_streak_days = between(rng, 0, 120);
    let last_study_date = if percent(rng, 70) {
        days_ago(rng, now, 0, 7)
    } else {
        days_ago(rng, now, 8, 60)
    };
    UserStats {
        total_study_minutes: between(rng, 0, 10_000),
        total_sessions: between(rng, 0, 500),
        total_sessions_completed: between(rng, 0, 450),
        total_contents_completed: between(rng, 0, 200),
        total_quizzes_taken: between(rng, 0, 200),
        total_quizzes_completed: between(rng, 0, 150),
        total_quizzes_passed: between(rng, 0, 150),
        average_quiz_score: between(rng, 40, 100),
        total_simulations_completed: between(rng, 0, 50),
        total_content_viewed: between(rng, 0, 300),
        average_daily_study_minutes: between(rng, 0, 180),
        current_week_minutes: between(rng, 0, 1200),
        current_month_minutes: between(rng, 0, 5000),
        current_streak_days,
        longest_streak_days: between(rng, 0, 200),
        last_study_date: Some(last_study_date),
        total_achievements_unlocked: between(rng, 0, 30),
        ..UserStats::default()
    }
    .normalized()
}

/// Synthetic students for the analytics dashboards
pub struct FakeAnalyticsSeeder;

#[async_trait]
impl Seeder for FakeAnalyticsSeeder {
    fn step(&self) -> SeedStep {
        SeedStep::FakeAnalytics
    }

    fn requires(&self) -> &'static [Table] {
        &[Table::AcademicYears]
    }

    fn provides(&self) -> &'static [Table] {
        &[
            Table::Users,
            Table::UserAcademicProfiles,
            Table::UserStats,
            Table::UserActivityLogs,
        ]
    }

    async fn run(&self, ctx: &mut SeedContext<'_>) -> AppResult<SeedOutcome> {
        let db = ctx.db;
        let now = ctx.now;
        let total = ctx.config.fake_users;
        let password_hash = ctx.fixture_password_hash()?;

        let years = db.list_years().await?;
        if years.is_empty() {
            return Ok(SeedOutcome::skipped("no academic years found"));
        }
        let mut year_streams = Vec::with_capacity(years.len());
        for year in &years {
            year_streams.push(db.list_streams_for_year(year.id).await?);
        }

        let removed = db
            .delete_users_matching(fixtures::ANALYTICS_EMAIL_PATTERN)
            .await?;
        if removed > 0 {
            info!(removed, "Removed previous synthetic users");
        }

        let rng = &mut ctx.rng;
        let (mut users, mut logs) = (0_u64, 0_u64);

        for index in 1..=total {
            let user = NewUser {
                name: arabic_name(rng)?,
                email: fixtures::analytics_email(index),
                password_hash: password_hash.clone(),
                role: UserRole::Student,
                is_active: percent(rng, 90),
                email_verified_at: Some(days_ago(rng, now, 1, 365)),
                created_at: days_ago(rng, now, 1, 365),
            };
            let user_id = db.create_user(&user).await?;
            users += 1;

            let slot = rng.gen_range(0..years.len());
            let year = &years[slot];
            let stream_id = year_streams[slot].choose(rng).map(|s| s.id);
            db.upsert_academic_profile(user_id, year.academic_phase_id, year.id, stream_id)
                .await?;

            db.insert_user_stats(user_id, &sample_stats(rng, now)).await?;

            for _ in 0..between(rng, 5, 50) {
                let created_at = days_ago(rng, now, 0, 30)
                    - Duration::hours(i64::from(between(rng, 0, 23)));
                db.insert_activity_log(
                    user_id,
                    *pick(rng, &ActivityType::ALL)?,
                    ACTIVITY_DESCRIPTION,
                    ACTIVITY_IP,
                    ACTIVITY_USER_AGENT,
                    created_at,
                )
                .await?;
                logs += 1;
            }

            if index % 10 == 0 {
                debug!(created = index, total, "Synthetic users progress");
            }
        }

        info!(users, logs, "Synthetic analytics users seeded");
        Ok(SeedOutcome::completed(users * 3 + logs))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_sample_stats_are_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let now = Utc::now();
        for _ in 0..200 {
            let stats = sample_stats(&mut rng, now);
            stats.validate().expect("normalized stats validate");
            assert!(stats.longest_streak_days >= stats.current_streak_days);
            assert!((1..=10).contains(&stats.level));
            assert_eq!(stats.experience_points, stats.gamification_points);
        }
    }

    #[test]
    fn test_names_join_first_and_last() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let name = arabic_name(&mut rng).expect("name");
        assert!(FIRST_NAMES.iter().any(|first| name.starts_with(first)));
        assert!(LAST_NAMES.iter().any(|last| name.ends_with(last)));
    }
}
