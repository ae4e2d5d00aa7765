// ABOUTME: Lookup table storage: content types, achievements, app settings and promo slides
// ABOUTME: Insert-or-ignore on natural keys keeps re-runs from duplicating shared rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{AchievementCriteria, ContentKind, NewAchievement, NewPromo};
use sqlx::Row;

impl Database {
    pub(super) async fn migrate_reference(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS content_types (
                id INTEGER PRIMARY KEY,
                name_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                icon TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS achievements (
                id INTEGER PRIMARY KEY,
                name_ar TEXT NOT NULL UNIQUE,
                description_ar TEXT NOT NULL,
                icon TEXT NOT NULL,
                badge_color TEXT NOT NULL,
                criteria_type TEXT NOT NULL,
                criteria_value TEXT NOT NULL,
                points INTEGER NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS app_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS promos (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                subtitle TEXT NOT NULL,
                badge TEXT,
                action_text TEXT NOT NULL,
                icon_name TEXT NOT NULL,
                image_url TEXT,
                gradient_colors TEXT NOT NULL,
                action_type TEXT NOT NULL CHECK (action_type IN ('route', 'url')),
                action_value TEXT NOT NULL,
                display_order INTEGER NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        ])
        .await
    }

    /// Insert a content type unless its slug exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn insert_content_type_if_missing(&self, kind: ContentKind) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO content_types (name_ar, slug, icon)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slug) DO NOTHING
            ",
        )
        .bind(kind.name_ar())
        .bind(kind.slug())
        .bind(kind.icon())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert content type: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a content type id by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_content_type_id(&self, slug: &str) -> AppResult<Option<i64>> {
        let row = sqlx::query("SELECT id FROM content_types WHERE slug = ?1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get content type: {e}")))?;

        Ok(row.map(|row| row.get("id")))
    }

    /// Insert an achievement unless its name exists
    ///
    /// # Errors
    ///
    /// Returns an error if the criteria cannot be encoded or the insert fails
    pub async fn insert_achievement_if_missing(
        &self,
        achievement: &NewAchievement,
    ) -> AppResult<bool> {
        let (criteria_type, criteria_value) = achievement.criteria.to_columns()?;

        let result = sqlx::query(
            r"
            INSERT INTO achievements (
                name_ar, description_ar, icon, badge_color, criteria_type, criteria_value, points
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(name_ar) DO NOTHING
            ",
        )
        .bind(&achievement.name_ar)
        .bind(&achievement.description_ar)
        .bind(&achievement.icon)
        .bind(&achievement.badge_color)
        .bind(&criteria_type)
        .bind(serde_json::to_string(&criteria_value)?)
        .bind(i64::from(achievement.points))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert achievement: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Read back the unlock rule of an achievement
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored criteria are malformed
    pub async fn get_achievement_criteria(
        &self,
        name_ar: &str,
    ) -> AppResult<Option<AchievementCriteria>> {
        let row = sqlx::query(
            r"
            SELECT criteria_type, criteria_value
            FROM achievements
            WHERE name_ar = ?1
            ",
        )
        .bind(name_ar)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get achievement: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let kind: String = row.get("criteria_type");
        let value: String = row.get("criteria_value");
        let value: serde_json::Value = serde_json::from_str(&value)?;
        Ok(Some(AchievementCriteria::from_columns(&kind, value)?))
    }

    /// Set an application setting
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn set_app_setting(&self, key: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO app_settings (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to set app setting {key}: {e}")))?;

        Ok(())
    }

    /// Get an application setting
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_app_setting(&self, key: &str) -> AppResult<Option<String>> {
        let row = sqlx::query("SELECT value FROM app_settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get app setting: {e}")))?;

        Ok(row.map(|row| row.get("value")))
    }

    /// Remove every promo slide
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_all_promos(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM promos")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear promos: {e}")))?;

        Ok(result.rows_affected())
    }

    /// Insert a promo slide
    ///
    /// # Errors
    ///
    /// Returns an error if the colors cannot be encoded or the insert fails
    pub async fn insert_promo(&self, promo: &NewPromo) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO promos (
                title, subtitle, badge, action_text, icon_name, image_url, gradient_colors,
                action_type, action_value, display_order, is_active
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ",
        )
        .bind(&promo.title)
        .bind(&promo.subtitle)
        .bind(promo.badge.as_deref())
        .bind(&promo.action_text)
        .bind(&promo.icon_name)
        .bind(promo.image_url.as_deref())
        .bind(serde_json::to_string(&promo.gradient_colors)?)
        .bind(promo.action_type.as_str())
        .bind(&promo.action_value)
        .bind(promo.display_order)
        .bind(promo.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert promo: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Count slides shown in the slider
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_active_promos(&self) -> AppResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM promos WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count promos: {e}")))?;

        let total: i64 = row.get("total");
        Ok(total.max(0) as u64)
    }
}
