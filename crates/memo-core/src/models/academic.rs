// ABOUTME: Academic taxonomy models (phase, year, stream, subject) and coefficient categories
// ABOUTME: Rows mirror the academic_* and subjects tables keyed by natural slugs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Education stage, root of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicPhase {
    /// Row id
    pub id: i64,
    /// Arabic display name
    pub name_ar: String,
    /// Natural key (`primary`, `middle`, `secondary`)
    pub slug: String,
    /// 1-based position among phases
    pub sort_order: i64,
}

/// Grade within a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    /// Row id
    pub id: i64,
    /// Owning phase
    pub academic_phase_id: i64,
    /// Arabic display name
    pub name_ar: String,
    /// Grade number inside the phase, unique per phase
    pub level_number: i64,
    /// 1-based position among the phase's years
    pub sort_order: i64,
}

/// Specialization track, only present on the terminal secondary year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicStream {
    /// Row id
    pub id: i64,
    /// Owning year
    pub academic_year_id: i64,
    /// Arabic display name
    pub name_ar: String,
    /// Natural key (`sciences-exp`, `mathematics`, ...)
    pub slug: String,
    /// Arabic description
    pub description_ar: Option<String>,
    /// 1-based position among the year's streams
    pub sort_order: i64,
}

/// Taught subject, optionally scoped to a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Row id
    pub id: i64,
    /// Stream, `None` for stream-agnostic subjects
    pub academic_stream_id: Option<i64>,
    /// Owning year
    pub academic_year_id: i64,
    /// Arabic display name
    pub name_ar: String,
    /// Natural key, prefixed with the stream family (`sciences-exp-physics`)
    pub slug: String,
    /// Arabic description
    pub description_ar: Option<String>,
    /// Default weight when no stream override exists
    pub coefficient: i64,
    /// Icon name
    pub icon: Option<String>,
    /// Hex display color
    pub color: Option<String>,
    /// 1-based position among siblings
    pub sort_order: i64,
}

/// Study category attached to a subject/stream coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubjectCategory {
    /// Language subjects
    Language,
    /// Memorization-heavy subjects
    Memorization,
    /// Core scientific or technical subjects
    HardCore,
    /// Anything else
    #[default]
    Other,
}

impl SubjectCategory {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Memorization => "memorization",
            Self::HardCore => "hard_core",
            Self::Other => "other",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "language" => Self::Language,
            "memorization" => Self::Memorization,
            "hard_core" => Self::HardCore,
            _ => Self::Other,
        }
    }
}

/// Insert payload for a subject, upserted by slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    /// Stream, `None` for stream-agnostic subjects
    pub academic_stream_id: Option<i64>,
    /// Owning year
    pub academic_year_id: i64,
    /// Arabic display name
    pub name_ar: String,
    /// Natural key
    pub slug: String,
    /// Arabic description
    pub description_ar: Option<String>,
    /// Default weight
    pub coefficient: i64,
    /// Icon name
    pub icon: Option<String>,
    /// Hex display color
    pub color: Option<String>,
    /// 1-based position among siblings
    pub sort_order: i64,
}

/// Stream-specific coefficient override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStream {
    /// Weighted subject
    pub subject_id: i64,
    /// Stream the weight applies to
    pub academic_stream_id: i64,
    /// Override value
    pub coefficient: i64,
    /// Study category
    pub category: SubjectCategory,
    /// Inactive overrides are ignored by the resolver
    pub is_active: bool,
}

/// Phase slug of the terminal phase holding the BAC year
pub const SECONDARY_PHASE_SLUG: &str = "secondary";

/// Level number of the BAC year inside the secondary phase
pub const BAC_LEVEL_NUMBER: i64 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_through_storage_string() {
        for category in [
            SubjectCategory::Language,
            SubjectCategory::Memorization,
            SubjectCategory::HardCore,
            SubjectCategory::Other,
        ] {
            assert_eq!(SubjectCategory::parse(category.as_str()), category);
        }
        assert_eq!(SubjectCategory::parse("unknown"), SubjectCategory::Other);
    }
}
