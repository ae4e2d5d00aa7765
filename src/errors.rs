// ABOUTME: Error types for the seeders, re-exported from memo-core
// ABOUTME: Keeps `crate::errors::AppError` as the single error path inside the binary crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! The error types live in `memo-core` so the domain models can return them.
//! This module re-exports them under the path the rest of the crate uses.

pub use memo_core::errors::*;
