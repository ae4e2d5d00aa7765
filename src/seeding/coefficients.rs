// ABOUTME: Subject coefficient resolution for a stream, override first then subject default
// ABOUTME: Undefined or non-positive coefficients are reported as data errors, never defaulted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coefficients
//!
//! A subject's weight in a stream comes from one of two places:
//!
//! 1. an active `subject_streams` row for the exact (subject, stream) pair
//! 2. the subject's own `coefficient` column, when the subject is not tied to a
//!    different stream
//!
//! Anything else is [`CoefficientError::Undefined`]. A stored value of zero or
//! less is [`CoefficientError::NonPositive`].

use std::fmt;

use crate::database::Database;
use crate::errors::{AppError, AppResult, CoefficientError, CoefficientOrigin};
use crate::models::{Subject, SubjectStream};

/// Strictly positive subject weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coefficient(u32);

impl Coefficient {
    /// Accept a stored value only when it is positive
    #[must_use]
    pub fn from_stored(value: i64) -> Option<Self> {
        u32::try_from(value).ok().filter(|v| *v > 0).map(Self)
    }

    /// Numeric weight
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coefficient together with where it was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCoefficient {
    /// Weight
    pub value: Coefficient,
    /// Origin of the weight
    pub source: CoefficientOrigin,
}

/// Resolve from already loaded rows
///
/// # Errors
///
/// Returns [`CoefficientError::NonPositive`] for a stored value of zero or less and
/// [`CoefficientError::Undefined`] when no value applies to the pair
pub fn resolve_with(
    subject: Option<&Subject>,
    link: Option<&SubjectStream>,
    subject_id: i64,
    stream_id: i64,
) -> Result<ResolvedCoefficient, CoefficientError> {
    let checked = |value: i64, source: CoefficientOrigin| {
        Coefficient::from_stored(value)
            .map(|value| ResolvedCoefficient { value, source })
            .ok_or(CoefficientError::NonPositive {
                subject_id,
                stream_id,
                value,
                source,
            })
    };

    if let Some(link) = link.filter(|link| link.is_active) {
        return checked(link.coefficient, CoefficientOrigin::StreamOverride);
    }

    match subject {
        Some(subject)
            if subject
                .academic_stream_id
                .is_none_or(|owner| owner == stream_id) =>
        {
            checked(subject.coefficient, CoefficientOrigin::SubjectDefault)
        }
        _ => Err(CoefficientError::Undefined {
            subject_id,
            stream_id,
        }),
    }
}

/// Database-backed resolver
#[derive(Clone, Copy)]
pub struct CoefficientResolver<'a> {
    db: &'a Database,
}

impl<'a> CoefficientResolver<'a> {
    /// Resolver reading from `db`
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Coefficient of a subject in a stream
    ///
    /// # Errors
    ///
    /// Returns `CoefficientUndefined` or `InvalidCoefficient` for data problems and
    /// `DatabaseError` when the lookup fails
    pub async fn resolve(&self, subject_id: i64, stream_id: i64) -> AppResult<ResolvedCoefficient> {
        let link = self.db.get_subject_stream(subject_id, stream_id).await?;
        let subject = self.db.get_subject(subject_id).await?;
        Ok(resolve_with(
            subject.as_ref(),
            link.as_ref(),
            subject_id,
            stream_id,
        )?)
    }

    /// Coefficient-weighted mean of `(subject_id, score)` pairs in a stream
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty score list and propagates any
    /// resolution error
    pub async fn weighted_average(&self, stream_id: i64, scores: &[(i64, f64)]) -> AppResult<f64> {
        if scores.is_empty() {
            return Err(AppError::invalid_input(
                "weighted average needs at least one score",
            ));
        }

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for (subject_id, score) in scores {
            let weight = f64::from(self.resolve(*subject_id, stream_id).await?.value.get());
            weighted += score * weight;
            total_weight += weight;
        }
        Ok(weighted / total_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectCategory;

    fn subject(stream: Option<i64>, coefficient: i64) -> Subject {
        Subject {
            id: 1,
            academic_stream_id: stream,
            academic_year_id: 12,
            name_ar: "الرياضيات".to_owned(),
            slug: "sciences-exp-mathematics".to_owned(),
            description_ar: None,
            coefficient,
            icon: None,
            color: None,
            sort_order: 1,
        }
    }

    fn link(coefficient: i64, is_active: bool) -> SubjectStream {
        SubjectStream {
            subject_id: 1,
            academic_stream_id: 2,
            coefficient,
            category: SubjectCategory::HardCore,
            is_active,
        }
    }

    #[test]
    fn test_stored_zero_is_not_a_coefficient() {
        assert!(Coefficient::from_stored(0).is_none());
        assert!(Coefficient::from_stored(-3).is_none());
        assert_eq!(Coefficient::from_stored(7).map(Coefficient::get), Some(7));
    }

    #[test]
    fn test_active_override_beats_default() {
        let resolved = resolve_with(Some(&subject(None, 5)), Some(&link(7, true)), 1, 2);
        assert_eq!(
            resolved.map(|r| (r.value.get(), r.source)),
            Ok((7, CoefficientOrigin::StreamOverride))
        );
    }

    #[test]
    fn test_inactive_override_falls_back_to_default() {
        let resolved = resolve_with(Some(&subject(Some(2), 5)), Some(&link(7, false)), 1, 2);
        assert_eq!(
            resolved.map(|r| (r.value.get(), r.source)),
            Ok((5, CoefficientOrigin::SubjectDefault))
        );
    }

    #[test]
    fn test_default_of_another_stream_is_undefined() {
        let resolved = resolve_with(Some(&subject(Some(1), 5)), None, 1, 2);
        assert!(matches!(resolved, Err(CoefficientError::Undefined { .. })));
    }

    #[test]
    fn test_non_positive_override_is_flagged() {
        let resolved = resolve_with(Some(&subject(None, 5)), Some(&link(0, true)), 1, 2);
        assert!(matches!(
            resolved,
            Err(CoefficientError::NonPositive {
                value: 0,
                source: CoefficientOrigin::StreamOverride,
                ..
            })
        ));
    }
}
