// ABOUTME: Commerce fixture storage: courses, packages, codes, receipts and subscriptions
// ABOUTME: Subscription rows keep the write-time `is_active` flag next to their expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CodeTarget, NewCourse, NewCourseLesson, NewPaymentReceipt, NewSubscriptionCode,
    NewUserSubscription,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// Subscription fields needed to audit the activity flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSubscriptionRecord {
    /// Row id
    pub id: i64,
    /// Subscriber
    pub user_id: i64,
    /// Stored activation path
    pub activated_by: String,
    /// Expiry time
    pub expires_at: DateTime<Utc>,
    /// Stored activity flag
    pub is_active: bool,
    /// Write time used to derive `is_active`
    pub created_at: DateTime<Utc>,
}

impl Database {
    pub(super) async fn migrate_commerce(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS courses (
                id INTEGER PRIMARY KEY,
                subject_id INTEGER REFERENCES subjects(id) ON DELETE SET NULL,
                title_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                description_ar TEXT,
                thumbnail_url TEXT,
                price_dzd INTEGER NOT NULL DEFAULT 0,
                is_free BOOLEAN NOT NULL DEFAULT 0,
                duration_days INTEGER NOT NULL,
                level TEXT NOT NULL CHECK (level IN ('beginner', 'intermediate', 'advanced')),
                color TEXT,
                is_published BOOLEAN NOT NULL DEFAULT 0,
                published_at DATETIME,
                created_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS course_modules (
                id INTEGER PRIMARY KEY,
                course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
                title_ar TEXT NOT NULL,
                description_ar TEXT,
                sort_order INTEGER NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS course_lessons (
                id INTEGER PRIMARY KEY,
                course_module_id INTEGER NOT NULL REFERENCES course_modules(id) ON DELETE CASCADE,
                title_ar TEXT NOT NULL,
                description_ar TEXT,
                video_type TEXT NOT NULL DEFAULT 'youtube',
                video_url TEXT NOT NULL,
                video_duration_seconds INTEGER NOT NULL,
                has_pdf BOOLEAN NOT NULL DEFAULT 0,
                pdf_path TEXT,
                sort_order INTEGER NOT NULL,
                is_preview BOOLEAN NOT NULL DEFAULT 0
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS course_reviews (
                id INTEGER PRIMARY KEY,
                course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                review_text_ar TEXT,
                is_approved BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (course_id, user_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS subscription_packages (
                id INTEGER PRIMARY KEY,
                name_ar TEXT NOT NULL UNIQUE,
                description_ar TEXT,
                price_dzd INTEGER NOT NULL,
                duration_days INTEGER NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS package_courses (
                package_id INTEGER NOT NULL REFERENCES subscription_packages(id) ON DELETE CASCADE,
                course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
                PRIMARY KEY (package_id, course_id)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS subscription_codes (
                id INTEGER PRIMARY KEY,
                code TEXT NOT NULL UNIQUE,
                course_id INTEGER REFERENCES courses(id) ON DELETE CASCADE,
                package_id INTEGER REFERENCES subscription_packages(id) ON DELETE CASCADE,
                max_uses INTEGER NOT NULL DEFAULT 1,
                current_uses INTEGER NOT NULL DEFAULT 0,
                expires_at DATETIME,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
                CHECK ((course_id IS NULL) <> (package_id IS NULL))
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS payment_receipts (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                course_id INTEGER REFERENCES courses(id) ON DELETE CASCADE,
                receipt_image_url TEXT NOT NULL,
                amount_dzd INTEGER NOT NULL,
                payment_method TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('pending', 'approved', 'rejected')),
                admin_note TEXT,
                reviewed_at DATETIME,
                reviewed_by INTEGER REFERENCES users(id) ON DELETE SET NULL,
                submitted_at DATETIME NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS user_subscriptions (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
                activated_by TEXT NOT NULL CHECK (activated_by IN ('receipt', 'code')),
                receipt_id INTEGER REFERENCES payment_receipts(id) ON DELETE SET NULL,
                code_id INTEGER REFERENCES subscription_codes(id) ON DELETE SET NULL,
                activated_at DATETIME NOT NULL,
                expires_at DATETIME NOT NULL,
                is_active BOOLEAN NOT NULL,
                created_at DATETIME NOT NULL
            )
            ",
        ])
        .await
    }

    /// Delete courses whose slug matches a `LIKE` pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_courses_matching(&self, slug_pattern: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM courses WHERE slug LIKE ?1")
            .bind(slug_pattern)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete courses: {e}")))?;

        Ok(result.rows_affected())
    }

    /// Delete a package by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_package_named(&self, name_ar: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM subscription_packages WHERE name_ar = ?1")
            .bind(name_ar)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete package: {e}")))?;

        Ok(result.rows_affected())
    }

    /// Insert a course
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is taken or the insert fails
    pub async fn insert_course(&self, course: &NewCourse) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO courses (
                subject_id, title_ar, slug, description_ar, thumbnail_url, price_dzd, is_free,
                duration_days, level, color, is_published, published_at, created_by
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            ",
        )
        .bind(course.subject_id)
        .bind(&course.title_ar)
        .bind(&course.slug)
        .bind(&course.description_ar)
        .bind(&course.thumbnail_url)
        .bind(i64::from(course.price_dzd))
        .bind(course.is_free())
        .bind(i64::from(course.duration_days))
        .bind(course.level.as_str())
        .bind(&course.color)
        .bind(course.is_published)
        .bind(course.published_at)
        .bind(course.created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert course {}: {e}", course.slug)))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a course module
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn insert_course_module(
        &self,
        course_id: i64,
        title_ar: &str,
        description_ar: &str,
        sort_order: i64,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO course_modules (course_id, title_ar, description_ar, sort_order) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(course_id)
        .bind(title_ar)
        .bind(description_ar)
        .bind(sort_order)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert course module: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a course lesson
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn insert_course_lesson(&self, lesson: &NewCourseLesson) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO course_lessons (
                course_module_id, title_ar, description_ar, video_url, video_duration_seconds,
                has_pdf, pdf_path, sort_order, is_preview
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(lesson.course_module_id)
        .bind(&lesson.title_ar)
        .bind(&lesson.description_ar)
        .bind(&lesson.video_url)
        .bind(i64::from(lesson.video_duration_seconds))
        .bind(lesson.has_pdf)
        .bind(lesson.pdf_path.as_deref())
        .bind(lesson.sort_order)
        .bind(lesson.is_preview)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert course lesson: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a review, one per (course, student)
    ///
    /// # Errors
    ///
    /// Returns an error if the student already reviewed the course or the insert fails
    pub async fn insert_course_review(
        &self,
        course_id: i64,
        user_id: i64,
        rating: u8,
        review_text_ar: &str,
        is_approved: bool,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO course_reviews (course_id, user_id, rating, review_text_ar, is_approved)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(course_id)
        .bind(user_id)
        .bind(i64::from(rating))
        .bind(review_text_ar)
        .bind(is_approved)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert course review: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a subscription package
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails
    pub async fn insert_package(
        &self,
        name_ar: &str,
        description_ar: &str,
        price_dzd: u32,
        duration_days: u32,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO subscription_packages (name_ar, description_ar, price_dzd, duration_days)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(name_ar)
        .bind(description_ar)
        .bind(i64::from(price_dzd))
        .bind(i64::from(duration_days))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert package {name_ar}: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Link a course into a package
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn attach_package_course(&self, package_id: i64, course_id: i64) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO package_courses (package_id, course_id) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        )
        .bind(package_id)
        .bind(course_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to attach package course: {e}")))?;

        Ok(())
    }

    /// Insert a subscription code
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` for a duplicate code, or a database error
    pub async fn insert_subscription_code(&self, code: &NewSubscriptionCode) -> AppResult<i64> {
        let (course_id, package_id) = match code.target {
            CodeTarget::Course(id) => (Some(id), None),
            CodeTarget::Package(id) => (None, Some(id)),
        };

        let result = sqlx::query(
            r"
            INSERT INTO subscription_codes (
                code, course_id, package_id, max_uses, current_uses, expires_at, is_active, created_by
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(&code.code)
        .bind(course_id)
        .bind(package_id)
        .bind(i64::from(code.max_uses))
        .bind(i64::from(code.current_uses))
        .bind(code.expires_at)
        .bind(code.is_active)
        .bind(code.created_by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from(e).with_resource_id(code.code.clone()))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a payment receipt
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn insert_payment_receipt(&self, receipt: &NewPaymentReceipt) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO payment_receipts (
                user_id, course_id, receipt_image_url, amount_dzd, payment_method, status,
                admin_note, reviewed_at, reviewed_by, submitted_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(receipt.user_id)
        .bind(receipt.course_id)
        .bind(&receipt.receipt_image_url)
        .bind(i64::from(receipt.amount_dzd))
        .bind(receipt.payment_method.as_str())
        .bind(receipt.status.as_str())
        .bind(receipt.admin_note.as_deref())
        .bind(receipt.reviewed_at)
        .bind(receipt.reviewed_by)
        .bind(receipt.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert payment receipt: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a subscription written at `now`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `is_active` disagrees with the expiry at `now`,
    /// or a database error
    pub async fn insert_user_subscription(
        &self,
        subscription: &NewUserSubscription,
        now: DateTime<Utc>,
    ) -> AppResult<i64> {
        if subscription.is_active != (subscription.expires_at > now) {
            return Err(AppError::invalid_input(format!(
                "subscription for user {} has is_active={} but expires at {}",
                subscription.user_id, subscription.is_active, subscription.expires_at
            )));
        }

        let result = sqlx::query(
            r"
            INSERT INTO user_subscriptions (
                user_id, course_id, activated_by, receipt_id, code_id, activated_at, expires_at,
                is_active, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(subscription.user_id)
        .bind(subscription.course_id)
        .bind(subscription.activated_by.as_str())
        .bind(subscription.receipt_id)
        .bind(subscription.code_id)
        .bind(subscription.activated_at)
        .bind(subscription.expires_at)
        .bind(subscription.is_active)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert subscription: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// List every subscription
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_user_subscriptions(&self) -> AppResult<Vec<UserSubscriptionRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, activated_by, expires_at, is_active, created_at
            FROM user_subscriptions
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list subscriptions: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| UserSubscriptionRecord {
                id: row.get("id"),
                user_id: row.get("user_id"),
                activated_by: row.get("activated_by"),
                expires_at: row.get("expires_at"),
                is_active: row.get("is_active"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
