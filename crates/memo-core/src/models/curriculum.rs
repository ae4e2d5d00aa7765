// ABOUTME: Planner curriculum tree models (learning axis, unit, topic, subtopic)
// ABOUTME: Node payloads carry study flags and BAC priority metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Difficulty;
use crate::errors::AppError;

/// Depth tier of a curriculum node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurriculumLevel {
    /// Top-level learning axis (المحور / المجال التعلمي)
    LearningAxis,
    /// Teaching unit (الوحدة)
    Unit,
    /// Lesson topic
    Topic,
    /// Fine-grained subtopic
    Subtopic,
}

impl CurriculumLevel {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LearningAxis => "learning_axis",
            Self::Unit => "unit",
            Self::Topic => "topic",
            Self::Subtopic => "subtopic",
        }
    }

    /// Depth rank, 0 for axes
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::LearningAxis => 0,
            Self::Unit => 1,
            Self::Topic => 2,
            Self::Subtopic => 3,
        }
    }
}

impl FromStr for CurriculumLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "learning_axis" => Ok(Self::LearningAxis),
            "unit" => Ok(Self::Unit),
            "topic" => Ok(Self::Topic),
            "subtopic" => Ok(Self::Subtopic),
            other => Err(AppError::invalid_input(format!(
                "unknown curriculum level '{other}'"
            ))),
        }
    }
}

/// Kind of study activity a node calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlannerContentType {
    /// Course material to understand
    #[default]
    Theory,
    /// Exercise solving
    Exercise,
    /// Revision pass
    Review,
    /// Material to learn by heart
    Memorization,
    /// Guided practice
    Practice,
    /// Past-paper preparation
    ExamPrep,
}

impl PlannerContentType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Theory => "theory",
            Self::Exercise => "exercise",
            Self::Review => "review",
            Self::Memorization => "memorization",
            Self::Practice => "practice",
            Self::ExamPrep => "exam_prep",
        }
    }
}

/// Insert payload for one curriculum node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCurriculumNode {
    /// Depth tier
    pub level: CurriculumLevel,
    /// Short code such as `LA1.U2`
    pub code: Option<String>,
    /// Arabic title
    pub title_ar: String,
    /// Kind of study activity
    pub content_type: PlannerContentType,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Estimated study time
    pub estimated_duration_minutes: Option<u32>,
    /// Understanding phase required
    pub requires_understanding: bool,
    /// Review phase required
    pub requires_review: bool,
    /// Theory practice required
    pub requires_theory_practice: bool,
    /// Exercise practice required
    pub requires_exercise_practice: bool,
    /// High priority for BAC preparation
    pub is_bac_priority: bool,
    /// How often the node appeared in past BAC papers
    pub bac_frequency: u32,
}

impl NewCurriculumNode {
    /// Node with default flags
    pub fn new(level: CurriculumLevel, title_ar: impl Into<String>) -> Self {
        Self {
            level,
            code: None,
            title_ar: title_ar.into(),
            content_type: PlannerContentType::Theory,
            difficulty: Difficulty::Medium,
            estimated_duration_minutes: None,
            requires_understanding: true,
            requires_review: true,
            requires_theory_practice: false,
            requires_exercise_practice: false,
            is_bac_priority: false,
            bac_frequency: 0,
        }
    }

    /// Set the short code
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the activity kind
    #[must_use]
    pub const fn content_type(mut self, content_type: PlannerContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Set difficulty and estimated minutes
    #[must_use]
    pub const fn effort(mut self, difficulty: Difficulty, minutes: Option<u32>) -> Self {
        self.difficulty = difficulty;
        self.estimated_duration_minutes = minutes;
        self
    }

    /// Require both theory and exercise practice
    #[must_use]
    pub const fn with_practice(mut self) -> Self {
        self.requires_theory_practice = true;
        self.requires_exercise_practice = true;
        self
    }

    /// Flag as BAC priority with the given frequency
    #[must_use]
    pub const fn bac_priority(mut self, frequency: u32) -> Self {
        self.is_bac_priority = true;
        self.bac_frequency = frequency;
        self
    }
}

/// Stored curriculum node, as read back for inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumNode {
    /// Row id
    pub id: i64,
    /// Owning subject
    pub subject_id: i64,
    /// Parent node, `None` for roots
    pub parent_id: Option<i64>,
    /// Depth tier
    pub level: CurriculumLevel,
    /// Short code
    pub code: Option<String>,
    /// Arabic title
    pub title_ar: String,
    /// 1-based position among siblings
    pub sort_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_rank_by_depth() {
        assert!(CurriculumLevel::LearningAxis.rank() < CurriculumLevel::Unit.rank());
        assert!(CurriculumLevel::Topic.rank() < CurriculumLevel::Subtopic.rank());
    }

    #[test]
    fn test_level_parse_rejects_unknown() {
        assert_eq!(
            "unit".parse::<CurriculumLevel>().ok(),
            Some(CurriculumLevel::Unit)
        );
        assert!("chapter".parse::<CurriculumLevel>().is_err());
    }
}
