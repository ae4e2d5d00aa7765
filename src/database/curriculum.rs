// ABOUTME: Planner curriculum tree storage with self-referencing parent links
// ABOUTME: Supports destructive per-subject refresh and ordered read-back of the tree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{CurriculumLevel, CurriculumNode, NewCurriculumNode};
use sqlx::Row;

impl Database {
    pub(super) async fn migrate_curriculum(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS curriculum_nodes (
                id INTEGER PRIMARY KEY,
                subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
                parent_id INTEGER REFERENCES curriculum_nodes(id) ON DELETE CASCADE,
                level TEXT NOT NULL CHECK (level IN ('learning_axis', 'unit', 'topic', 'subtopic')),
                code TEXT,
                title_ar TEXT NOT NULL,
                sort_order INTEGER NOT NULL,
                content_type TEXT NOT NULL DEFAULT 'theory',
                difficulty_level TEXT NOT NULL DEFAULT 'medium',
                estimated_duration_minutes INTEGER,
                requires_understanding BOOLEAN NOT NULL DEFAULT 1,
                requires_review BOOLEAN NOT NULL DEFAULT 1,
                requires_theory_practice BOOLEAN NOT NULL DEFAULT 0,
                requires_exercise_practice BOOLEAN NOT NULL DEFAULT 0,
                is_bac_priority BOOLEAN NOT NULL DEFAULT 0,
                bac_frequency INTEGER NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_curriculum_subject ON curriculum_nodes(subject_id)",
            "CREATE INDEX IF NOT EXISTS idx_curriculum_parent ON curriculum_nodes(parent_id)",
        ])
        .await
    }

    /// Delete every curriculum node of a subject
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_curriculum_for_subject(&self, subject_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM curriculum_nodes WHERE subject_id = ?1")
            .bind(subject_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete curriculum: {e}")))?;

        Ok(result.rows_affected())
    }

    /// Insert one node under an optional parent
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails, including a dangling parent id
    pub async fn insert_curriculum_node(
        &self,
        subject_id: i64,
        parent_id: Option<i64>,
        sort_order: i64,
        node: &NewCurriculumNode,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO curriculum_nodes (
                subject_id, parent_id, level, code, title_ar, sort_order, content_type,
                difficulty_level, estimated_duration_minutes, requires_understanding,
                requires_review, requires_theory_practice, requires_exercise_practice,
                is_bac_priority, bac_frequency
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            ",
        )
        .bind(subject_id)
        .bind(parent_id)
        .bind(node.level.as_str())
        .bind(node.code.as_deref())
        .bind(&node.title_ar)
        .bind(sort_order)
        .bind(node.content_type.as_str())
        .bind(node.difficulty.as_str())
        .bind(node.estimated_duration_minutes.map(i64::from))
        .bind(node.requires_understanding)
        .bind(node.requires_review)
        .bind(node.requires_theory_practice)
        .bind(node.requires_exercise_practice)
        .bind(node.is_bac_priority)
        .bind(i64::from(node.bac_frequency))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert curriculum node: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Read a subject's tree in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored level is unknown
    pub async fn list_curriculum_nodes(&self, subject_id: i64) -> AppResult<Vec<CurriculumNode>> {
        let rows = sqlx::query(
            r"
            SELECT id, subject_id, parent_id, level, code, title_ar, sort_order
            FROM curriculum_nodes
            WHERE subject_id = ?1
            ORDER BY id
            ",
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list curriculum nodes: {e}")))?;

        rows.iter()
            .map(|row| {
                let level: String = row.get("level");
                Ok(CurriculumNode {
                    id: row.get("id"),
                    subject_id: row.get("subject_id"),
                    parent_id: row.get("parent_id"),
                    level: level.parse::<CurriculumLevel>()?,
                    code: row.get("code"),
                    title_ar: row.get("title_ar"),
                    sort_order: row.get("sort_order"),
                })
            })
            .collect()
    }
}
