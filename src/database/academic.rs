// ABOUTME: Academic taxonomy storage: phases, years, streams, subjects and coefficient overrides
// ABOUTME: Natural-key upserts return the generated row id for child inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::academic::{BAC_LEVEL_NUMBER, SECONDARY_PHASE_SLUG};
use crate::models::{
    AcademicPhase, AcademicStream, AcademicYear, NewSubject, Subject, SubjectCategory,
    SubjectStream,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const SUBJECT_COLUMNS: &str = "id, academic_stream_id, academic_year_id, name_ar, slug, \
     description_ar, coefficient, icon, color, sort_order";

impl Database {
    pub(super) async fn migrate_academic(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS academic_phases (
                id INTEGER PRIMARY KEY,
                name_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS academic_years (
                id INTEGER PRIMARY KEY,
                academic_phase_id INTEGER NOT NULL REFERENCES academic_phases(id) ON DELETE CASCADE,
                name_ar TEXT NOT NULL,
                level_number INTEGER NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (academic_phase_id, level_number)
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS academic_streams (
                id INTEGER PRIMARY KEY,
                academic_year_id INTEGER NOT NULL REFERENCES academic_years(id) ON DELETE CASCADE,
                name_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                description_ar TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS subjects (
                id INTEGER PRIMARY KEY,
                academic_stream_id INTEGER REFERENCES academic_streams(id) ON DELETE CASCADE,
                academic_year_id INTEGER NOT NULL REFERENCES academic_years(id) ON DELETE CASCADE,
                name_ar TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                description_ar TEXT,
                coefficient INTEGER NOT NULL DEFAULT 1,
                icon TEXT,
                color TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS subject_streams (
                id INTEGER PRIMARY KEY,
                subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                academic_stream_id INTEGER NOT NULL REFERENCES academic_streams(id) ON DELETE CASCADE,
                coefficient INTEGER NOT NULL,
                category TEXT NOT NULL DEFAULT 'other',
                is_active BOOLEAN NOT NULL DEFAULT 1,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (subject_id, academic_stream_id)
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_subjects_stream ON subjects(academic_stream_id)",
            "CREATE INDEX IF NOT EXISTS idx_subjects_year ON subjects(academic_year_id)",
        ])
        .await
    }

    /// Insert or update a phase by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_phase(&self, name_ar: &str, slug: &str, sort_order: i64) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            INSERT INTO academic_phases (name_ar, slug, sort_order)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slug) DO UPDATE SET
                name_ar = excluded.name_ar,
                sort_order = excluded.sort_order
            RETURNING id
            ",
        )
        .bind(name_ar)
        .bind(slug)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert phase {slug}: {e}")))?;

        Ok(row.get("id"))
    }

    /// Insert or update a year keyed by (phase, level number)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_year(
        &self,
        phase_id: i64,
        name_ar: &str,
        level_number: i64,
        sort_order: i64,
    ) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            INSERT INTO academic_years (academic_phase_id, name_ar, level_number, sort_order)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(academic_phase_id, level_number) DO UPDATE SET
                name_ar = excluded.name_ar,
                sort_order = excluded.sort_order
            RETURNING id
            ",
        )
        .bind(phase_id)
        .bind(name_ar)
        .bind(level_number)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert academic year: {e}")))?;

        Ok(row.get("id"))
    }

    /// Insert or update a stream by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_stream(
        &self,
        year_id: i64,
        name_ar: &str,
        slug: &str,
        description_ar: Option<&str>,
        sort_order: i64,
    ) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            INSERT INTO academic_streams (academic_year_id, name_ar, slug, description_ar, sort_order)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(slug) DO UPDATE SET
                academic_year_id = excluded.academic_year_id,
                name_ar = excluded.name_ar,
                description_ar = excluded.description_ar,
                sort_order = excluded.sort_order
            RETURNING id
            ",
        )
        .bind(year_id)
        .bind(name_ar)
        .bind(slug)
        .bind(description_ar)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert stream {slug}: {e}")))?;

        Ok(row.get("id"))
    }

    /// Insert or update a subject by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_subject(&self, subject: &NewSubject) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            INSERT INTO subjects (
                academic_stream_id, academic_year_id, name_ar, slug, description_ar,
                coefficient, icon, color, sort_order
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(slug) DO UPDATE SET
                academic_stream_id = excluded.academic_stream_id,
                academic_year_id = excluded.academic_year_id,
                name_ar = excluded.name_ar,
                description_ar = excluded.description_ar,
                coefficient = excluded.coefficient,
                icon = excluded.icon,
                color = excluded.color,
                sort_order = excluded.sort_order
            RETURNING id
            ",
        )
        .bind(subject.academic_stream_id)
        .bind(subject.academic_year_id)
        .bind(&subject.name_ar)
        .bind(&subject.slug)
        .bind(subject.description_ar.as_deref())
        .bind(subject.coefficient)
        .bind(subject.icon.as_deref())
        .bind(subject.color.as_deref())
        .bind(subject.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to upsert subject {}: {e}", subject.slug))
        })?;

        Ok(row.get("id"))
    }

    /// Get a phase by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_phase_by_slug(&self, slug: &str) -> AppResult<Option<AcademicPhase>> {
        let row = sqlx::query(
            "SELECT id, name_ar, slug, sort_order FROM academic_phases WHERE slug = ?1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get phase: {e}")))?;

        Ok(row.map(|row| AcademicPhase {
            id: row.get("id"),
            name_ar: row.get("name_ar"),
            slug: row.get("slug"),
            sort_order: row.get("sort_order"),
        }))
    }

    /// Get a year by phase and level number
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_year(
        &self,
        phase_id: i64,
        level_number: i64,
    ) -> AppResult<Option<AcademicYear>> {
        let row = sqlx::query(
            r"
            SELECT id, academic_phase_id, name_ar, level_number, sort_order
            FROM academic_years
            WHERE academic_phase_id = ?1 AND level_number = ?2
            ",
        )
        .bind(phase_id)
        .bind(level_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get academic year: {e}")))?;

        Ok(row.as_ref().map(year_from_row))
    }

    /// Resolve the BAC year: terminal year of the secondary phase
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn find_bac_year(&self) -> AppResult<Option<AcademicYear>> {
        let Some(phase) = self.get_phase_by_slug(SECONDARY_PHASE_SLUG).await? else {
            return Ok(None);
        };
        self.get_year(phase.id, BAC_LEVEL_NUMBER).await
    }

    /// List every year ordered by phase then level
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_years(&self) -> AppResult<Vec<AcademicYear>> {
        let rows = sqlx::query(
            r"
            SELECT y.id, y.academic_phase_id, y.name_ar, y.level_number, y.sort_order
            FROM academic_years y
            JOIN academic_phases p ON p.id = y.academic_phase_id
            ORDER BY p.sort_order, y.sort_order
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list academic years: {e}")))?;

        Ok(rows.iter().map(year_from_row).collect())
    }

    /// Get a stream by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_stream_by_slug(&self, slug: &str) -> AppResult<Option<AcademicStream>> {
        let row = sqlx::query(
            r"
            SELECT id, academic_year_id, name_ar, slug, description_ar, sort_order
            FROM academic_streams
            WHERE slug = ?1
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get stream: {e}")))?;

        Ok(row.as_ref().map(stream_from_row))
    }

    /// List streams of a year in display order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_streams_for_year(&self, year_id: i64) -> AppResult<Vec<AcademicStream>> {
        let rows = sqlx::query(
            r"
            SELECT id, academic_year_id, name_ar, slug, description_ar, sort_order
            FROM academic_streams
            WHERE academic_year_id = ?1
            ORDER BY sort_order
            ",
        )
        .bind(year_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list streams: {e}")))?;

        Ok(rows.iter().map(stream_from_row).collect())
    }

    /// Get a subject by slug
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_subject_by_slug(&self, slug: &str) -> AppResult<Option<Subject>> {
        let sql = format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE slug = ?1");
        let row = sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get subject: {e}")))?;

        Ok(row.as_ref().map(subject_from_row))
    }

    /// Get a subject by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_subject(&self, subject_id: i64) -> AppResult<Option<Subject>> {
        let sql = format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(subject_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get subject: {e}")))?;

        Ok(row.as_ref().map(subject_from_row))
    }

    /// List every subject
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        let sql = format!("SELECT {SUBJECT_COLUMNS} FROM subjects ORDER BY id");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list subjects: {e}")))?;

        Ok(rows.iter().map(subject_from_row).collect())
    }

    /// List subjects of a year, optionally narrowed to one stream
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_subjects_for_year(
        &self,
        year_id: i64,
        stream_id: Option<i64>,
    ) -> AppResult<Vec<Subject>> {
        let sql = format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects \
             WHERE academic_year_id = ?1 AND (?2 IS NULL OR academic_stream_id = ?2) \
             ORDER BY sort_order, id"
        );
        let rows = sqlx::query(&sql)
            .bind(year_id)
            .bind(stream_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list subjects for year: {e}")))?;

        Ok(rows.iter().map(subject_from_row).collect())
    }

    /// Insert or update a coefficient override keyed by (subject, stream)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_subject_stream(&self, link: &SubjectStream) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO subject_streams (subject_id, academic_stream_id, coefficient, category, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(subject_id, academic_stream_id) DO UPDATE SET
                coefficient = excluded.coefficient,
                category = excluded.category,
                is_active = excluded.is_active,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(link.subject_id)
        .bind(link.academic_stream_id)
        .bind(link.coefficient)
        .bind(link.category.as_str())
        .bind(link.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert subject coefficient: {e}")))?;

        Ok(())
    }

    /// Get the override for a (subject, stream) pair
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_subject_stream(
        &self,
        subject_id: i64,
        stream_id: i64,
    ) -> AppResult<Option<SubjectStream>> {
        let row = sqlx::query(
            r"
            SELECT subject_id, academic_stream_id, coefficient, category, is_active
            FROM subject_streams
            WHERE subject_id = ?1 AND academic_stream_id = ?2
            ",
        )
        .bind(subject_id)
        .bind(stream_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get subject coefficient: {e}")))?;

        Ok(row.as_ref().map(subject_stream_from_row))
    }

    /// List every coefficient override
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_subject_streams(&self) -> AppResult<Vec<SubjectStream>> {
        let rows = sqlx::query(
            r"
            SELECT subject_id, academic_stream_id, coefficient, category, is_active
            FROM subject_streams
            ORDER BY academic_stream_id, subject_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list subject coefficients: {e}")))?;

        Ok(rows.iter().map(subject_stream_from_row).collect())
    }
}

fn year_from_row(row: &SqliteRow) -> AcademicYear {
    AcademicYear {
        id: row.get("id"),
        academic_phase_id: row.get("academic_phase_id"),
        name_ar: row.get("name_ar"),
        level_number: row.get("level_number"),
        sort_order: row.get("sort_order"),
    }
}

fn stream_from_row(row: &SqliteRow) -> AcademicStream {
    AcademicStream {
        id: row.get("id"),
        academic_year_id: row.get("academic_year_id"),
        name_ar: row.get("name_ar"),
        slug: row.get("slug"),
        description_ar: row.get("description_ar"),
        sort_order: row.get("sort_order"),
    }
}

fn subject_from_row(row: &SqliteRow) -> Subject {
    Subject {
        id: row.get("id"),
        academic_stream_id: row.get("academic_stream_id"),
        academic_year_id: row.get("academic_year_id"),
        name_ar: row.get("name_ar"),
        slug: row.get("slug"),
        description_ar: row.get("description_ar"),
        coefficient: row.get("coefficient"),
        icon: row.get("icon"),
        color: row.get("color"),
        sort_order: row.get("sort_order"),
    }
}

fn subject_stream_from_row(row: &SqliteRow) -> SubjectStream {
    let category: String = row.get("category");
    SubjectStream {
        subject_id: row.get("subject_id"),
        academic_stream_id: row.get("academic_stream_id"),
        coefficient: row.get("coefficient"),
        category: SubjectCategory::parse(&category),
        is_active: row.get("is_active"),
    }
}
