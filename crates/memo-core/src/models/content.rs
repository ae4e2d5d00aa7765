// ABOUTME: Content catalog models: content kinds, chapters and items
// ABOUTME: Content kinds map one-to-one onto content_types slugs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Difficulty;

/// Content type lookup rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Explained lesson
    Lesson,
    /// Chapter summary
    Summary,
    /// Exercise set with solutions
    Exercises,
    /// Assessment
    Test,
}

impl ContentKind {
    /// Every kind, in catalogue order
    pub const ALL: [Self; 4] = [Self::Lesson, Self::Summary, Self::Exercises, Self::Test];

    /// `content_types.slug`
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Lesson => "lesson",
            Self::Summary => "summary",
            Self::Exercises => "exercises",
            Self::Test => "test",
        }
    }

    /// Arabic display name
    #[must_use]
    pub const fn name_ar(&self) -> &'static str {
        match self {
            Self::Lesson => "درس",
            Self::Summary => "ملخص",
            Self::Exercises => "تمارين",
            Self::Test => "اختبار",
        }
    }

    /// Icon name
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Lesson => "book-open",
            Self::Summary => "file-text",
            Self::Exercises => "edit",
            Self::Test => "check-square",
        }
    }
}

/// Insert payload for a content chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContentChapter {
    /// Owning subject
    pub subject_id: i64,
    /// Arabic title
    pub title_ar: String,
    /// Unique slug
    pub slug: String,
    /// Arabic description
    pub description_ar: String,
    /// 1-based position within the subject
    pub sort_order: i64,
}

/// Insert payload for a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContent {
    /// Owning subject
    pub subject_id: i64,
    /// Owning chapter
    pub chapter_id: i64,
    /// `content_types.id`
    pub content_type_id: i64,
    /// Arabic title
    pub title_ar: String,
    /// Unique slug
    pub slug: String,
    /// Arabic description
    pub description_ar: String,
    /// HTML body
    pub body_ar: String,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Estimated study time
    pub estimated_duration_minutes: u32,
    /// 1-based position within the chapter
    pub sort_order: i64,
    /// Visible to students
    pub is_published: bool,
    /// Publication timestamp
    pub published_at: Option<DateTime<Utc>>,
    /// Requires a subscription
    pub is_premium: bool,
    /// Free-form tags
    pub tags: Vec<String>,
    /// View counter
    pub views_count: u32,
    /// Download counter
    pub downloads_count: u32,
}
