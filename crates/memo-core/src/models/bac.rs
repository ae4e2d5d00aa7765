// ABOUTME: BAC exam archive models: sessions, years, exam papers and their chapters
// ABOUTME: Sessions are global and shared by every BAC year
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Kind of exam session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BacSessionType {
    /// Regular June session
    #[default]
    Main,
    /// Make-up session
    Makeup,
}

impl BacSessionType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Makeup => "makeup",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "makeup" => Self::Makeup,
            _ => Self::Main,
        }
    }
}

/// Exam session shared by every exam year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacSession {
    /// Row id
    pub id: i64,
    /// Arabic display name
    pub name_ar: String,
    /// Natural key
    pub slug: String,
    /// Main or make-up session
    pub session_type: BacSessionType,
}

/// Exam archive year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacYear {
    /// Row id
    pub id: i64,
    /// Calendar year
    pub year: i32,
    /// Shown in the archive
    pub is_active: bool,
}

/// Insert payload for an archived exam paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBacSubject {
    /// Exam year row
    pub bac_year_id: i64,
    /// Session row
    pub bac_session_id: i64,
    /// Examined subject
    pub subject_id: i64,
    /// Stream the paper was set for
    pub academic_stream_id: i64,
    /// Arabic title
    pub title_ar: String,
    /// Paper file path
    pub file_path: String,
    /// Correction file path, when a correction exists
    pub correction_file_path: Option<String>,
    /// Exam duration
    pub duration_minutes: u32,
    /// View counter
    pub views_count: u32,
    /// Download counter
    pub downloads_count: u32,
}
