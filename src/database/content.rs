// ABOUTME: Content catalog storage: per-subject chapters and their lessons, summaries, exercises and tests
// ABOUTME: Tags are stored as JSON text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{NewContent, NewContentChapter};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// Chapter header as read back from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentChapterRecord {
    /// Row id
    pub id: i64,
    /// Owning subject
    pub subject_id: i64,
    /// Arabic title
    pub title_ar: String,
    /// Unique slug
    pub slug: String,
    /// Position within the subject
    pub sort_order: i64,
}

impl Database {
    pub(super) async fn migrate_content(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS content_chapters (
                id INTEGER PRIMARY KEY,
                subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                title_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                description_ar TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS contents (
                id INTEGER PRIMARY KEY,
                subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                content_chapter_id INTEGER NOT NULL REFERENCES content_chapters(id) ON DELETE CASCADE,
                content_type_id INTEGER NOT NULL REFERENCES content_types(id) ON DELETE CASCADE,
                title_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                description_ar TEXT,
                content_body_ar TEXT,
                difficulty_level TEXT NOT NULL DEFAULT 'medium',
                estimated_duration_minutes INTEGER NOT NULL DEFAULT 0,
                sort_order INTEGER NOT NULL DEFAULT 0,
                is_published BOOLEAN NOT NULL DEFAULT 0,
                published_at DATETIME,
                is_premium BOOLEAN NOT NULL DEFAULT 0,
                tags TEXT NOT NULL DEFAULT '[]',
                views_count INTEGER NOT NULL DEFAULT 0,
                downloads_count INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_contents_chapter ON contents(content_chapter_id)",
        ])
        .await
    }

    /// Number of chapters a subject already has
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_chapters_for_subject(&self, subject_id: i64) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS total
            FROM content_chapters
            WHERE subject_id = ?1
            ",
        )
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count chapters: {e}")))?;

        Ok(row.get("total"))
    }

    /// Insert a chapter
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is taken or the insert fails
    pub async fn insert_content_chapter(&self, chapter: &NewContentChapter) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO content_chapters (subject_id, title_ar, slug, description_ar, sort_order)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(chapter.subject_id)
        .bind(&chapter.title_ar)
        .bind(&chapter.slug)
        .bind(&chapter.description_ar)
        .bind(chapter.sort_order)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to insert chapter {}: {e}", chapter.slug))
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a content item
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be encoded or the insert fails
    pub async fn insert_content(&self, content: &NewContent) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO contents (
                subject_id, content_chapter_id, content_type_id, title_ar, slug, description_ar,
                content_body_ar, difficulty_level, estimated_duration_minutes, sort_order,
                is_published, published_at, is_premium, tags, views_count, downloads_count
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            ",
        )
        .bind(content.subject_id)
        .bind(content.chapter_id)
        .bind(content.content_type_id)
        .bind(&content.title_ar)
        .bind(&content.slug)
        .bind(&content.description_ar)
        .bind(&content.body_ar)
        .bind(content.difficulty.as_str())
        .bind(i64::from(content.estimated_duration_minutes))
        .bind(content.sort_order)
        .bind(content.is_published)
        .bind(content.published_at)
        .bind(content.is_premium)
        .bind(serde_json::to_string(&content.tags)?)
        .bind(i64::from(content.views_count))
        .bind(i64::from(content.downloads_count))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to insert content {}: {e}", content.slug))
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Count items of one content type across the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_contents_of_type(&self, content_type_slug: &str) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS total
            FROM contents c
            JOIN content_types t ON t.id = c.content_type_id
            WHERE t.slug = ?1
            ",
        )
        .bind(content_type_slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count contents: {e}")))?;

        Ok(row.get("total"))
    }

    /// Chapters of a subject in display order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_content_chapters(
        &self,
        subject_id: i64,
    ) -> AppResult<Vec<ContentChapterRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, subject_id, title_ar, slug, sort_order
            FROM content_chapters
            WHERE subject_id = ?1
            ORDER BY sort_order, id
            ",
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list chapters: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| ContentChapterRecord {
                id: row.get("id"),
                subject_id: row.get("subject_id"),
                title_ar: row.get("title_ar"),
                slug: row.get("slug"),
                sort_order: row.get("sort_order"),
            })
            .collect())
    }

    /// Chapter with `slug`, if present
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_content_chapter_by_slug(
        &self,
        slug: &str,
    ) -> AppResult<Option<ContentChapterRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, subject_id, title_ar, slug, sort_order
            FROM content_chapters
            WHERE slug = ?1
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get chapter {slug}: {e}")))?;

        Ok(row.map(|row| ContentChapterRecord {
            id: row.get("id"),
            subject_id: row.get("subject_id"),
            title_ar: row.get("title_ar"),
            slug: row.get("slug"),
            sort_order: row.get("sort_order"),
        }))
    }

    /// Item count per content type slug within one chapter
    ///
    /// Types without items in the chapter are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn chapter_content_counts(&self, chapter_id: i64) -> AppResult<Vec<(String, i64)>> {
        let rows = sqlx::query(
            r"
            SELECT t.slug AS slug, COUNT(*) AS total
            FROM contents c
            JOIN content_types t ON t.id = c.content_type_id
            WHERE c.content_chapter_id = ?1
            GROUP BY t.slug
            ORDER BY t.slug
            ",
        )
        .bind(chapter_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count chapter contents: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| (row.get("slug"), row.get("total")))
            .collect())
    }

    /// Delete a chapter by slug together with its items
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_content_chapter_by_slug(&self, slug: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM content_chapters WHERE slug = ?1")
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete chapter {slug}: {e}")))?;

        Ok(result.rows_affected())
    }
}
