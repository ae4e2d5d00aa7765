// ABOUTME: Achievement definitions with typed unlock criteria
// ABOUTME: Criteria serialize as (criteria_type, criteria_value JSON) column pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppResult;

/// Unlock rule of an achievement, keyed by `criteria_type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "criteria_type", content = "criteria_value")]
pub enum AchievementCriteria {
    /// First completed study session
    FirstSession {
        /// Sessions required
        sessions: u32,
    },
    /// Completed study sessions
    SessionCount {
        /// Sessions required
        sessions: u32,
    },
    /// Study streak
    ConsecutiveDays {
        /// Days required
        days: u32,
    },
    /// Single uninterrupted session length
    StudyMinutes {
        /// Minutes required
        minutes: u32,
    },
    /// Minutes studied in one day
    DailyStudyMinutes {
        /// Minutes required
        minutes: u32,
    },
    /// Minutes studied in one week
    WeeklyStudyMinutes {
        /// Minutes required
        minutes: u32,
    },
    /// Minutes studied in one month
    MonthlyStudyMinutes {
        /// Minutes required
        minutes: u32,
    },
    /// Completed items of one content kind
    ContentCount {
        /// `content_types.slug`
        #[serde(rename = "type")]
        content_type: String,
        /// Items required
        count: u32,
    },
    /// Full score on a quiz
    PerfectQuiz {
        /// Required score in percent
        score: u32,
    },
    /// Full scores across several quizzes
    PerfectQuizStreak {
        /// Perfect quizzes required
        count: u32,
    },
    /// Completed quizzes
    QuizCount {
        /// Quizzes required
        count: u32,
    },
    /// Completed BAC simulations
    BacSimulation {
        /// Simulations required
        count: u32,
    },
    /// BAC simulation grade out of 20
    BacHighScore {
        /// Grade required
        score: u32,
    },
    /// Completed items in one subject family
    SubjectMastery {
        /// Subject family slug (`mathematics`, `physics`, ...)
        subject: String,
        /// Items required
        count: u32,
    },
    /// Revisits of the same item
    ContentRevision {
        /// Revisions required
        revisions: u32,
    },
    /// Completed items overall
    TotalContent {
        /// Items required
        count: u32,
    },
    /// Share of a subject's content completed
    SubjectProgress {
        /// Percentage required
        percentage: u32,
    },
    /// Items completed in one day
    DailyContentCount {
        /// Items required
        count: u32,
    },
    /// Session completed before the given hour
    EarlyBird {
        /// Local hour
        hour: u32,
    },
    /// Session completed after the given hour
    NightOwl {
        /// Local hour
        hour: u32,
    },
    /// Average quiz score over a number of quizzes
    HighAverageScore {
        /// Average percentage required
        score: u32,
        /// Quizzes considered
        count: u32,
    },
    /// Top score in consecutive quizzes
    TopScore {
        /// Quizzes required
        count: u32,
    },
    /// Distinct content kinds tried
    ContentTypeVariety {
        /// Kinds required
        types: u32,
    },
    /// Distinct subjects studied in one day
    SubjectVariety {
        /// Subjects required
        subjects: u32,
    },
    /// Joined during the launch month
    FoundingMember {},
    /// Days since registration
    ActiveUser {
        /// Days required
        days: u32,
    },
    /// Accumulated gamification points
    TotalPoints {
        /// Points required
        points: u32,
    },
    /// Every core subject mastered
    AllCoreSubjects {},
    /// Many high-scoring BAC simulations
    BacKing {
        /// Simulations required
        count: u32,
        /// Minimum grade out of 20
        score: u32,
    },
}

impl AchievementCriteria {
    /// Split into the `criteria_type` and `criteria_value` columns
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the criteria cannot be encoded
    pub fn to_columns(&self) -> AppResult<(String, Value)> {
        let mut encoded = serde_json::to_value(self)?;
        let kind = encoded
            .get("criteria_type")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default();
        let value = encoded
            .get_mut("criteria_value")
            .map_or_else(|| Value::Object(serde_json::Map::new()), Value::take);
        Ok((kind, value))
    }

    /// Rebuild from stored columns
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the pair does not describe known criteria
    pub fn from_columns(kind: &str, value: Value) -> AppResult<Self> {
        let encoded = serde_json::json!({ "criteria_type": kind, "criteria_value": value });
        Ok(serde_json::from_value(encoded)?)
    }
}

/// Insert payload for an achievement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAchievement {
    /// Arabic name, natural key
    pub name_ar: String,
    /// Arabic description
    pub description_ar: String,
    /// Icon name
    pub icon: String,
    /// Hex badge color
    pub badge_color: String,
    /// Unlock rule
    pub criteria: AchievementCriteria,
    /// Points awarded
    pub points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_split_keeps_field_names() {
        let criteria = AchievementCriteria::ContentCount {
            content_type: "lesson".to_owned(),
            count: 10,
        };
        let (kind, value) = criteria.to_columns().unwrap_or_default();
        assert_eq!(kind, "ContentCount");
        assert_eq!(value, serde_json::json!({ "type": "lesson", "count": 10 }));
    }

    #[test]
    fn test_empty_criteria_stored_as_object() {
        let (kind, value) = AchievementCriteria::FoundingMember {}
            .to_columns()
            .unwrap_or_default();
        assert_eq!(kind, "FoundingMember");
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_from_columns_round_trip() {
        let criteria = AchievementCriteria::BacKing {
            count: 50,
            score: 15,
        };
        let rebuilt = criteria
            .to_columns()
            .and_then(|(kind, value)| AchievementCriteria::from_columns(&kind, value));
        assert_eq!(rebuilt.ok(), Some(criteria));
    }
}
