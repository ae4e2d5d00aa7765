// ABOUTME: Domain error for subject/stream coefficient resolution
// ABOUTME: Distinguishes undefined coefficients from non-positive stored values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use super::{AppError, ErrorCode};

/// Where a stored coefficient value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientOrigin {
    /// Row in `subject_streams`
    StreamOverride,
    /// `subjects.coefficient` default
    SubjectDefault,
}

impl CoefficientOrigin {
    /// Stable label used in logs and CLI output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StreamOverride => "stream_override",
            Self::SubjectDefault => "subject_default",
        }
    }
}

impl fmt::Display for CoefficientOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coefficient resolution failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoefficientError {
    /// Neither an active override nor a subject default exists
    Undefined {
        /// Subject row id
        subject_id: i64,
        /// Stream row id
        stream_id: i64,
    },
    /// A stored coefficient is zero or negative
    NonPositive {
        /// Subject row id
        subject_id: i64,
        /// Stream row id
        stream_id: i64,
        /// Offending stored value
        value: i64,
        /// Which column held the value
        source: CoefficientOrigin,
    },
}

impl CoefficientError {
    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Undefined { .. } => ErrorCode::CoefficientUndefined,
            Self::NonPositive { .. } => ErrorCode::InvalidCoefficient,
        }
    }
}

impl fmt::Display for CoefficientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined {
                subject_id,
                stream_id,
            } => write!(
                f,
                "no coefficient defined for subject {subject_id} in stream {stream_id}"
            ),
            Self::NonPositive {
                subject_id,
                stream_id,
                value,
                source,
            } => write!(
                f,
                "coefficient {value} for subject {subject_id} in stream {stream_id} ({source}) is not positive"
            ),
        }
    }
}

impl std::error::Error for CoefficientError {}

impl From<CoefficientError> for AppError {
    fn from(error: CoefficientError) -> Self {
        let (subject_id, stream_id) = match &error {
            CoefficientError::Undefined {
                subject_id,
                stream_id,
            }
            | CoefficientError::NonPositive {
                subject_id,
                stream_id,
                ..
            } => (*subject_id, *stream_id),
        };
        Self::new(error.code(), error.to_string())
            .with_resource_id(format!("{subject_id}:{stream_id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_maps_to_coefficient_undefined() {
        let error: AppError = CoefficientError::Undefined {
            subject_id: 3,
            stream_id: 1,
        }
        .into();
        assert_eq!(error.code, ErrorCode::CoefficientUndefined);
        assert_eq!(error.context.resource_id.as_deref(), Some("3:1"));
    }

    #[test]
    fn test_non_positive_names_source() {
        let error = CoefficientError::NonPositive {
            subject_id: 9,
            stream_id: 2,
            value: 0,
            source: CoefficientOrigin::StreamOverride,
        };
        assert!(error.to_string().contains("stream_override"));
        assert_eq!(error.code(), ErrorCode::InvalidCoefficient);
    }
}
