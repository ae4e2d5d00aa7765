// ABOUTME: Dependency-ordered execution of seeders with per-step prerequisite checks
// ABOUTME: Steps run after every selected step providing a table they require
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Seed Plans
//!
//! [`SeedPlan::new`] orders seeders so that a step runs after every other selected
//! step that provides one of its required tables. Ties keep the order seeders were
//! given in, so a plan built from the catalogue runs in catalogue order whenever the
//! graph allows it.
//!
//! At run time each required table is checked for rows first. An empty table skips
//! the step with a warning and the plan moves on.

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use super::{SeedContext, SeedOutcome, SeedStep, Seeder};
use crate::config::SeedConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::SeedLogger;

/// Outcome of one executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Step identifier
    pub step: SeedStep,
    /// What the step did
    pub outcome: SeedOutcome,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// Reports of a whole run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    reports: Vec<StepReport>,
}

impl RunSummary {
    /// Every report in execution order
    #[must_use]
    pub fn reports(&self) -> &[StepReport] {
        &self.reports
    }

    /// Steps that wrote rows
    pub fn completed(&self) -> impl Iterator<Item = &StepReport> {
        self.reports.iter().filter(|r| r.outcome.is_completed())
    }

    /// Steps that were skipped
    pub fn skipped(&self) -> impl Iterator<Item = &StepReport> {
        self.reports.iter().filter(|r| !r.outcome.is_completed())
    }

    /// Rows written across the run
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.reports.iter().map(|r| r.outcome.rows()).sum()
    }

    /// Report of a step, if it ran
    #[must_use]
    pub fn report(&self, step: SeedStep) -> Option<&StepReport> {
        self.reports.iter().find(|r| r.step == step)
    }
}

/// Seeders in dependency order
pub struct SeedPlan {
    seeders: Vec<Box<dyn Seeder>>,
}

impl SeedPlan {
    /// Order `seeders` by their table dependencies
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a step is selected twice or the dependencies form
    /// a cycle
    pub fn new(seeders: Vec<Box<dyn Seeder>>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for seeder in &seeders {
            if !seen.insert(seeder.step()) {
                return Err(AppError::invalid_input(format!(
                    "seeding step '{}' selected more than once",
                    seeder.step()
                )));
            }
        }

        // depends_on[i] holds every selected step that must run before step i
        let depends_on: Vec<BTreeSet<usize>> = seeders
            .iter()
            .enumerate()
            .map(|(index, seeder)| {
                seeders
                    .iter()
                    .enumerate()
                    .filter(|(other, provider)| {
                        *other != index
                            && provider
                                .provides()
                                .iter()
                                .any(|table| seeder.requires().contains(table))
                    })
                    .map(|(other, _)| other)
                    .collect()
            })
            .collect();

        let mut order = Vec::with_capacity(seeders.len());
        let mut placed = vec![false; seeders.len()];
        while order.len() < seeders.len() {
            let next = (0..seeders.len()).find(|&index| {
                !placed[index] && depends_on[index].iter().all(|dep| placed[*dep])
            });
            let Some(next) = next else {
                let stuck: Vec<_> = (0..seeders.len())
                    .filter(|index| !placed[*index])
                    .map(|index| seeders[index].step().as_str())
                    .collect();
                return Err(AppError::invalid_input(format!(
                    "seeding steps form a dependency cycle: {}",
                    stuck.join(", ")
                )));
            };
            placed[next] = true;
            order.push(next);
        }

        let mut slots: Vec<Option<Box<dyn Seeder>>> = seeders.into_iter().map(Some).collect();
        let seeders = order
            .into_iter()
            .filter_map(|index| slots[index].take())
            .collect();
        Ok(Self { seeders })
    }

    /// Steps in execution order
    #[must_use]
    pub fn steps(&self) -> Vec<SeedStep> {
        self.seeders.iter().map(|s| s.step()).collect()
    }

    /// Run every step with a fresh context built from `config`
    ///
    /// # Errors
    ///
    /// Returns the first database or data-shape error, tagged with the failing step
    pub async fn run(&self, db: &Database, config: &SeedConfig) -> AppResult<RunSummary> {
        let mut ctx = SeedContext::new(db, config);
        self.execute(&mut ctx).await
    }

    /// Run every step with a caller-supplied context
    ///
    /// # Errors
    ///
    /// Returns the first database or data-shape error, tagged with the failing step
    pub async fn execute(&self, ctx: &mut SeedContext<'_>) -> AppResult<RunSummary> {
        let mut summary = RunSummary::default();
        info!(steps = self.seeders.len(), "Starting seed plan");

        for seeder in &self.seeders {
            let step = seeder.step();
            let started = Instant::now();

            let outcome = match missing_prerequisite(ctx.db, seeder.as_ref()).await? {
                Some(reason) => SeedOutcome::skipped(reason),
                None => seeder
                    .run(ctx)
                    .await
                    .map_err(|e| e.with_step(step.as_str()))?,
            };

            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            match &outcome {
                SeedOutcome::Completed { rows } => {
                    SeedLogger::log_step_completed(step.as_str(), *rows, duration_ms);
                }
                SeedOutcome::Skipped { reason } => {
                    SeedLogger::log_step_skipped(step.as_str(), reason);
                }
            }
            summary.reports.push(StepReport {
                step,
                outcome,
                duration_ms,
            });
        }

        info!(
            completed = summary.completed().count(),
            skipped = summary.skipped().count(),
            rows = summary.total_rows(),
            "Seed plan finished"
        );
        Ok(summary)
    }
}

/// First required table holding no rows, as a skip reason
async fn missing_prerequisite(db: &Database, seeder: &dyn Seeder) -> AppResult<Option<String>> {
    for table in seeder.requires() {
        if db.count_rows(*table).await? == 0 {
            return Ok(Some(format!("table {table} is empty")));
        }
    }
    Ok(None)
}
