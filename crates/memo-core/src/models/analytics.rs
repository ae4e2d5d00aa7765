// ABOUTME: Engagement statistics for synthetic users with cross-field consistency rules
// ABOUTME: Level and points derive from minutes and streak; counters are clamped to each other
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Learner
    #[default]
    Student,
    /// Content author
    Teacher,
    /// Administrator
    Admin,
}

impl UserRole {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "teacher" => Self::Teacher,
            "admin" => Self::Admin,
            _ => Self::Student,
        }
    }
}

/// Kind of tracked user activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Signed in
    Login,
    /// Started a study session
    StudySessionStart,
    /// Finished a study session
    StudySessionEnd,
    /// Started a quiz
    QuizAttempt,
    /// Submitted a quiz
    QuizComplete,
    /// Opened a content item
    ContentView,
    /// Downloaded a content item
    ContentDownload,
}

impl ActivityType {
    /// Every activity type
    pub const ALL: [Self; 7] = [
        Self::Login,
        Self::StudySessionStart,
        Self::StudySessionEnd,
        Self::QuizAttempt,
        Self::QuizComplete,
        Self::ContentView,
        Self::ContentDownload,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::StudySessionStart => "study_session_start",
            Self::StudySessionEnd => "study_session_end",
            Self::QuizAttempt => "quiz_attempt",
            Self::QuizComplete => "quiz_complete",
            Self::ContentView => "content_view",
            Self::ContentDownload => "content_download",
        }
    }
}

/// Insert payload for a user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Unique email
    pub email: String,
    /// Bcrypt hash
    pub password_hash: String,
    /// Account role
    pub role: UserRole,
    /// Account enabled
    pub is_active: bool,
    /// Email verification time
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;

/// Study minutes per level step
pub const MINUTES_PER_LEVEL: u32 = 600;

/// Aggregate statistics row for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserStats {
    /// Lifetime study minutes
    pub total_study_minutes: u32,
    /// Sessions started
    pub total_sessions: u32,
    /// Sessions finished
    pub total_sessions_completed: u32,
    /// Content items completed
    pub total_contents_completed: u32,
    /// Quizzes started
    pub total_quizzes_taken: u32,
    /// Quizzes submitted
    pub total_quizzes_completed: u32,
    /// Quizzes passed
    pub total_quizzes_passed: u32,
    /// Mean quiz score in percent
    pub average_quiz_score: u32,
    /// BAC simulations completed
    pub total_simulations_completed: u32,
    /// Content items opened
    pub total_content_viewed: u32,
    /// Mean daily study minutes
    pub average_daily_study_minutes: u32,
    /// Minutes this week
    pub current_week_minutes: u32,
    /// Minutes this month
    pub current_month_minutes: u32,
    /// Current streak
    pub current_streak_days: u32,
    /// Best streak ever
    pub longest_streak_days: u32,
    /// Last study day
    pub last_study_date: Option<DateTime<Utc>>,
    /// Level derived from minutes
    pub level: u32,
    /// Experience points
    pub experience_points: u64,
    /// Gamification points
    pub gamification_points: u64,
    /// Achievements unlocked
    pub total_achievements_unlocked: u32,
}

impl UserStats {
    /// Level reached after `minutes` of study, capped at [`MAX_LEVEL`]
    #[must_use]
    pub const fn level_for(minutes: u32) -> u32 {
        let level = minutes / MINUTES_PER_LEVEL + 1;
        if level > MAX_LEVEL {
            MAX_LEVEL
        } else {
            level
        }
    }

    /// Points earned from study minutes and the current streak
    #[must_use]
    pub const fn points_for(minutes: u32, streak_days: u32) -> u64 {
        minutes as u64 * 10 + streak_days as u64 * 50
    }

    /// Clamp dependent counters and recompute derived fields
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.total_sessions_completed = self.total_sessions_completed.min(self.total_sessions);
        self.total_quizzes_completed = self.total_quizzes_completed.min(self.total_quizzes_taken);
        self.total_quizzes_passed = self.total_quizzes_passed.min(self.total_quizzes_completed);
        self.current_month_minutes = self.current_month_minutes.min(self.total_study_minutes);
        self.current_week_minutes = self.current_week_minutes.min(self.current_month_minutes);
        self.longest_streak_days = self.longest_streak_days.max(self.current_streak_days);
        self.level = Self::level_for(self.total_study_minutes);
        let points = Self::points_for(self.total_study_minutes, self.current_streak_days);
        self.experience_points = points;
        self.gamification_points = points;
        self
    }

    /// Check the cross-field rules
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first violated rule
    pub fn validate(&self) -> AppResult<()> {
        let rules = [
            (
                self.longest_streak_days >= self.current_streak_days,
                "longest streak below current streak",
            ),
            (
                self.total_sessions_completed <= self.total_sessions,
                "more sessions completed than started",
            ),
            (
                self.total_quizzes_passed <= self.total_quizzes_completed
                    && self.total_quizzes_completed <= self.total_quizzes_taken,
                "quiz counters out of order",
            ),
            (
                self.current_week_minutes <= self.current_month_minutes
                    && self.current_month_minutes <= self.total_study_minutes,
                "period minutes exceed their enclosing period",
            ),
            (
                self.level == Self::level_for(self.total_study_minutes),
                "level does not match study minutes",
            ),
            (
                self.experience_points
                    == Self::points_for(self.total_study_minutes, self.current_streak_days),
                "points do not match minutes and streak",
            ),
        ];
        rules
            .iter()
            .find(|(holds, _)| !holds)
            .map_or(Ok(()), |(_, rule)| Err(AppError::invalid_input(*rule)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_is_capped() {
        assert_eq!(UserStats::level_for(0), 1);
        assert_eq!(UserStats::level_for(599), 1);
        assert_eq!(UserStats::level_for(600), 2);
        assert_eq!(UserStats::level_for(10_000), MAX_LEVEL);
    }

    #[test]
    fn test_normalized_repairs_inconsistent_counters() {
        let stats = UserStats {
            total_study_minutes: 1_000,
            total_sessions: 10,
            total_sessions_completed: 40,
            total_quizzes_taken: 5,
            total_quizzes_completed: 9,
            total_quizzes_passed: 12,
            current_week_minutes: 900,
            current_month_minutes: 4_000,
            current_streak_days: 30,
            longest_streak_days: 3,
            ..UserStats::default()
        }
        .normalized();

        assert!(stats.validate().is_ok());
        assert_eq!(stats.longest_streak_days, 30);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.experience_points, 1_000 * 10 + 30 * 50);
    }

    #[test]
    fn test_validate_flags_streak_violation() {
        let stats = UserStats {
            current_streak_days: 5,
            longest_streak_days: 2,
            level: 1,
            experience_points: 250,
            gamification_points: 250,
            ..UserStats::default()
        };
        assert!(stats.validate().is_err());
    }
}
