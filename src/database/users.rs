// ABOUTME: User account storage with academic profiles, aggregate stats and activity logs
// ABOUTME: Handles fixture account creation and pattern-based cleanup of synthetic users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityType, NewUser, UserRole, UserStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Account fields needed by the seeders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Row id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Unique email
    pub email: String,
    /// Account role
    pub role: UserRole,
    /// Account enabled
    pub is_active: bool,
}

impl Database {
    /// Create users and their dependent tables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database schema migration fails
    /// - Table creation fails
    /// - Index creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'student' CHECK (role IN ('student', 'teacher', 'admin')),
                is_active BOOLEAN NOT NULL DEFAULT 1,
                email_verified_at DATETIME,
                created_at DATETIME NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS user_academic_profiles (
                user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                academic_phase_id INTEGER NOT NULL REFERENCES academic_phases(id) ON DELETE CASCADE,
                academic_year_id INTEGER NOT NULL REFERENCES academic_years(id) ON DELETE CASCADE,
                academic_stream_id INTEGER REFERENCES academic_streams(id) ON DELETE SET NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS user_stats (
                user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                total_study_minutes INTEGER NOT NULL DEFAULT 0,
                total_sessions INTEGER NOT NULL DEFAULT 0,
                total_sessions_completed INTEGER NOT NULL DEFAULT 0,
                total_contents_completed INTEGER NOT NULL DEFAULT 0,
                total_quizzes_taken INTEGER NOT NULL DEFAULT 0,
                total_quizzes_completed INTEGER NOT NULL DEFAULT 0,
                total_quizzes_passed INTEGER NOT NULL DEFAULT 0,
                average_quiz_score INTEGER NOT NULL DEFAULT 0,
                total_simulations_completed INTEGER NOT NULL DEFAULT 0,
                total_content_viewed INTEGER NOT NULL DEFAULT 0,
                average_daily_study_minutes INTEGER NOT NULL DEFAULT 0,
                current_week_minutes INTEGER NOT NULL DEFAULT 0,
                current_month_minutes INTEGER NOT NULL DEFAULT 0,
                current_streak_days INTEGER NOT NULL DEFAULT 0,
                longest_streak_days INTEGER NOT NULL DEFAULT 0,
                last_study_date DATETIME,
                level INTEGER NOT NULL DEFAULT 1,
                experience_points INTEGER NOT NULL DEFAULT 0,
                gamification_points INTEGER NOT NULL DEFAULT 0,
                total_achievements_unlocked INTEGER NOT NULL DEFAULT 0
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS user_activity_logs (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                activity_type TEXT NOT NULL,
                description TEXT,
                ip_address TEXT,
                user_agent TEXT,
                created_at DATETIME NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_users_role ON users(role)",
            "CREATE INDEX IF NOT EXISTS idx_activity_logs_user ON user_activity_logs(user_id)",
        ])
        .await
    }

    /// Create a user account
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is taken, or a database error
    pub async fn create_user(&self, user: &NewUser) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO users (name, email, password_hash, role, is_active, email_verified_at, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.email_verified_at)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from(e).with_resource_id(user.email.clone()))?;

        Ok(result.last_insert_rowid())
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT id, name, email, role, is_active FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// First account holding one of `roles`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn find_first_user_with_roles(
        &self,
        roles: &[UserRole],
    ) -> AppResult<Option<UserRecord>> {
        if roles.is_empty() {
            return Ok(None);
        }
        let placeholders = (1..=roles.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT id, name, email, role, is_active FROM users WHERE role IN ({placeholders}) ORDER BY id LIMIT 1"
        );
        let mut query = sqlx::query(&sql);
        for role in roles {
            query = query.bind(role.as_str());
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find staff user: {e}")))?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Up to `limit` accounts with `role`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_users_with_role(
        &self,
        role: UserRole,
        limit: u32,
    ) -> AppResult<Vec<UserRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, email, role, is_active
            FROM users
            WHERE role = ?1
            ORDER BY id
            LIMIT ?2
            ",
        )
        .bind(role.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list {} users: {e}", role.as_str())))?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Delete users whose email matches a `LIKE` pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_users_matching(&self, email_pattern: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE email LIKE ?1")
            .bind(email_pattern)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete users: {e}")))?;

        Ok(result.rows_affected())
    }

    /// Record a user's academic placement
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_academic_profile(
        &self,
        user_id: i64,
        phase_id: i64,
        year_id: i64,
        stream_id: Option<i64>,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_academic_profiles (user_id, academic_phase_id, academic_year_id, academic_stream_id)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id) DO UPDATE SET
                academic_phase_id = excluded.academic_phase_id,
                academic_year_id = excluded.academic_year_id,
                academic_stream_id = excluded.academic_stream_id
            ",
        )
        .bind(user_id)
        .bind(phase_id)
        .bind(year_id)
        .bind(stream_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save academic profile: {e}")))?;

        Ok(())
    }

    /// Store the aggregate statistics row of a user
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the stats break a cross-field rule, or a database error
    pub async fn insert_user_stats(&self, user_id: i64, stats: &UserStats) -> AppResult<()> {
        stats.validate()?;

        sqlx::query(
            r"
            INSERT INTO user_stats (
                user_id, total_study_minutes, total_sessions, total_sessions_completed,
                total_contents_completed, total_quizzes_taken, total_quizzes_completed,
                total_quizzes_passed, average_quiz_score, total_simulations_completed,
                total_content_viewed, average_daily_study_minutes, current_week_minutes,
                current_month_minutes, current_streak_days, longest_streak_days, last_study_date,
                level, experience_points, gamification_points, total_achievements_unlocked
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)
            ",
        )
        .bind(user_id)
        .bind(i64::from(stats.total_study_minutes))
        .bind(i64::from(stats.total_sessions))
        .bind(i64::from(stats.total_sessions_completed))
        .bind(i64::from(stats.total_contents_completed))
        .bind(i64::from(stats.total_quizzes_taken))
        .bind(i64::from(stats.total_quizzes_completed))
        .bind(i64::from(stats.total_quizzes_passed))
        .bind(i64::from(stats.average_quiz_score))
        .bind(i64::from(stats.total_simulations_completed))
        .bind(i64::from(stats.total_content_viewed))
        .bind(i64::from(stats.average_daily_study_minutes))
        .bind(i64::from(stats.current_week_minutes))
        .bind(i64::from(stats.current_month_minutes))
        .bind(i64::from(stats.current_streak_days))
        .bind(i64::from(stats.longest_streak_days))
        .bind(stats.last_study_date)
        .bind(i64::from(stats.level))
        .bind(stats.experience_points as i64)
        .bind(stats.gamification_points as i64)
        .bind(i64::from(stats.total_achievements_unlocked))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert user stats: {e}")))?;

        Ok(())
    }

    /// Read every stored stats row
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_user_stats(&self) -> AppResult<Vec<UserStats>> {
        let rows = sqlx::query("SELECT * FROM user_stats ORDER BY user_id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list user stats: {e}")))?;

        Ok(rows.iter().map(stats_from_row).collect())
    }

    /// Append an activity log entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn insert_activity_log(
        &self,
        user_id: i64,
        activity_type: ActivityType,
        description: &str,
        ip_address: &str,
        user_agent: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO user_activity_logs (user_id, activity_type, description, ip_address, user_agent, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(user_id)
        .bind(activity_type.as_str())
        .bind(description)
        .bind(ip_address)
        .bind(user_agent)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert activity log: {e}")))?;

        Ok(result.last_insert_rowid())
    }
}

fn user_from_row(row: &SqliteRow) -> UserRecord {
    let role: String = row.get("role");
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: UserRole::parse(&role),
        is_active: row.get("is_active"),
    }
}

fn counter(row: &SqliteRow, column: &str) -> u32 {
    let value: i64 = row.get(column);
    u32::try_from(value).unwrap_or_default()
}

fn stats_from_row(row: &SqliteRow) -> UserStats {
    let experience_points: i64 = row.get("experience_points");
    let gamification_points: i64 = row.get("gamification_points");
    UserStats {
        total_study_minutes: counter(row, "total_study_minutes"),
        total_sessions: counter(row, "total_sessions"),
        total_sessions_completed: counter(row, "total_sessions_completed"),
        total_contents_completed: counter(row, "total_contents_completed"),
        total_quizzes_taken: counter(row, "total_quizzes_taken"),
        total_quizzes_completed: counter(row, "total_quizzes_completed"),
        total_quizzes_passed: counter(row, "total_quizzes_passed"),
        average_quiz_score: counter(row, "average_quiz_score"),
        total_simulations_completed: counter(row, "total_simulations_completed"),
        total_content_viewed: counter(row, "total_content_viewed"),
        average_daily_study_minutes: counter(row, "average_daily_study_minutes"),
        current_week_minutes: counter(row, "current_week_minutes"),
        current_month_minutes: counter(row, "current_month_minutes"),
        current_streak_days: counter(row, "current_streak_days"),
        longest_streak_days: counter(row, "longest_streak_days"),
        last_study_date: row.get("last_study_date"),
        level: counter(row, "level"),
        experience_points: experience_points.max(0) as u64,
        gamification_points: gamification_points.max(0) as u64,
        total_achievements_unlocked: counter(row, "total_achievements_unlocked"),
    }
}
