// ABOUTME: Core types for the Memo seeding toolkit
// ABOUTME: Shared error types and domain models used by the database layer and seeders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Memo Core
//!
//! Foundation types for the Memo BAC exam-prep platform seeders. This crate holds
//! the pieces that change rarely: the unified error type and the domain models
//! (academic taxonomy, curriculum nodes, content, quizzes, achievements, BAC archive,
//! analytics and commerce fixtures).

/// Unified error handling
pub mod errors;

/// Domain models and enumerations
pub mod models;
