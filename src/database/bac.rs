// ABOUTME: BAC exam archive storage: global sessions, exam years, papers and covered chapters
// ABOUTME: Sessions and years are first-or-create so every year shares the same sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{BacSession, BacSessionType, BacYear, NewBacSubject};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// Exam paper header as read back from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacPaperRecord {
    /// Row id
    pub id: i64,
    /// Exam year
    pub bac_year_id: i64,
    /// Exam session
    pub bac_session_id: i64,
    /// Examined subject
    pub subject_id: i64,
    /// Stream sitting the paper
    pub academic_stream_id: i64,
    /// Arabic title
    pub title_ar: String,
}

/// Covered chapter of an exam paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacPaperChapterRecord {
    /// Arabic chapter title
    pub title_ar: String,
    /// 1-based position within the paper
    pub sort_order: i64,
}

impl Database {
    pub(super) async fn migrate_bac(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS bac_sessions (
                id INTEGER PRIMARY KEY,
                name_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                session_type TEXT NOT NULL DEFAULT 'main' CHECK (session_type IN ('main', 'makeup')),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS bac_years (
                id INTEGER PRIMARY KEY,
                year INTEGER NOT NULL UNIQUE,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS bac_subjects (
                id INTEGER PRIMARY KEY,
                bac_year_id INTEGER NOT NULL REFERENCES bac_years(id) ON DELETE CASCADE,
                bac_session_id INTEGER NOT NULL REFERENCES bac_sessions(id) ON DELETE CASCADE,
                subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                academic_stream_id INTEGER NOT NULL REFERENCES academic_streams(id) ON DELETE CASCADE,
                title_ar TEXT NOT NULL,
                file_path TEXT NOT NULL,
                correction_file_path TEXT,
                duration_minutes INTEGER NOT NULL,
                views_count INTEGER NOT NULL DEFAULT 0,
                downloads_count INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS bac_subject_chapters (
                id INTEGER PRIMARY KEY,
                bac_subject_id INTEGER NOT NULL REFERENCES bac_subjects(id) ON DELETE CASCADE,
                title_ar TEXT NOT NULL,
                sort_order INTEGER NOT NULL
            )
            ",
        ])
        .await
    }

    /// Return the session with `slug`, creating it when missing
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn first_or_create_bac_session(
        &self,
        slug: &str,
        name_ar: &str,
        session_type: BacSessionType,
    ) -> AppResult<i64> {
        sqlx::query(
            r"
            INSERT INTO bac_sessions (name_ar, slug, session_type)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slug) DO NOTHING
            ",
        )
        .bind(name_ar)
        .bind(slug)
        .bind(session_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create BAC session: {e}")))?;

        let row = sqlx::query("SELECT id FROM bac_sessions WHERE slug = ?1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get BAC session: {e}")))?;

        Ok(row.get("id"))
    }

    /// Return the exam year, creating it when missing
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn first_or_create_bac_year(&self, year: i32, is_active: bool) -> AppResult<i64> {
        sqlx::query(
            r"
            INSERT INTO bac_years (year, is_active)
            VALUES (?1, ?2)
            ON CONFLICT(year) DO NOTHING
            ",
        )
        .bind(year)
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create BAC year {year}: {e}")))?;

        let row = sqlx::query("SELECT id FROM bac_years WHERE year = ?1")
            .bind(year)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get BAC year {year}: {e}")))?;

        Ok(row.get("id"))
    }

    /// List sessions in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_bac_sessions(&self) -> AppResult<Vec<BacSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, name_ar, slug, session_type
            FROM bac_sessions
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list BAC sessions: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| {
                let session_type: String = row.get("session_type");
                BacSession {
                    id: row.get("id"),
                    name_ar: row.get("name_ar"),
                    slug: row.get("slug"),
                    session_type: BacSessionType::parse(&session_type),
                }
            })
            .collect())
    }

    /// List exam years in ascending order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_bac_years(&self) -> AppResult<Vec<BacYear>> {
        let rows = sqlx::query("SELECT id, year, is_active FROM bac_years ORDER BY year")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list BAC years: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| BacYear {
                id: row.get("id"),
                year: row.get("year"),
                is_active: row.get("is_active"),
            })
            .collect())
    }

    /// Insert an exam paper
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn insert_bac_subject(&self, paper: &NewBacSubject) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO bac_subjects (
                bac_year_id, bac_session_id, subject_id, academic_stream_id, title_ar, file_path,
                correction_file_path, duration_minutes, views_count, downloads_count
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(paper.bac_year_id)
        .bind(paper.bac_session_id)
        .bind(paper.subject_id)
        .bind(paper.academic_stream_id)
        .bind(&paper.title_ar)
        .bind(&paper.file_path)
        .bind(paper.correction_file_path.as_deref())
        .bind(i64::from(paper.duration_minutes))
        .bind(i64::from(paper.views_count))
        .bind(i64::from(paper.downloads_count))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert BAC subject: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Attach a covered chapter to an exam paper
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn insert_bac_subject_chapter(
        &self,
        bac_subject_id: i64,
        title_ar: &str,
        sort_order: i64,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO bac_subject_chapters (bac_subject_id, title_ar, sort_order)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(bac_subject_id)
        .bind(title_ar)
        .bind(sort_order)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert BAC chapter: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Every exam paper ordered by year, session and insertion
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_bac_papers(&self) -> AppResult<Vec<BacPaperRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, bac_year_id, bac_session_id, subject_id, academic_stream_id, title_ar
            FROM bac_subjects
            ORDER BY bac_year_id, bac_session_id, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list BAC subjects: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| BacPaperRecord {
                id: row.get("id"),
                bac_year_id: row.get("bac_year_id"),
                bac_session_id: row.get("bac_session_id"),
                subject_id: row.get("subject_id"),
                academic_stream_id: row.get("academic_stream_id"),
                title_ar: row.get("title_ar"),
            })
            .collect())
    }

    /// Covered chapters of one paper in display order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_bac_paper_chapters(
        &self,
        bac_subject_id: i64,
    ) -> AppResult<Vec<BacPaperChapterRecord>> {
        let rows = sqlx::query(
            r"
            SELECT title_ar, sort_order
            FROM bac_subject_chapters
            WHERE bac_subject_id = ?1
            ORDER BY sort_order
            ",
        )
        .bind(bac_subject_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list BAC chapters: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| BacPaperChapterRecord {
                title_ar: row.get("title_ar"),
                sort_order: row.get("sort_order"),
            })
            .collect())
    }
}
