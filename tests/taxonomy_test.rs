// ABOUTME: Integration tests for the parent-first taxonomy builder
// ABOUTME: Covers id propagation, branch skipping and curriculum trees written to SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use chrono::Utc;
use memo_seeder::database::Table;
use memo_seeder::errors::{AppResult, ErrorCode};
use memo_seeder::models::{CurriculumLevel, NewCurriculumNode};
use memo_seeder::seeding::taxonomy::{NodeSink, NodeSpec, Taxonomy};
use memo_seeder::seeding::{AcademicStructureSeeder, CurriculumSeeder, SeedOutcome};

/// Records every call and declines titles listed in `decline`
#[derive(Default)]
struct RecordingSink {
    next_id: i64,
    calls: Vec<(String, Option<i64>, i64)>,
    decline: Vec<&'static str>,
}

#[async_trait]
impl NodeSink<NewCurriculumNode> for RecordingSink {
    async fn create(
        &mut self,
        payload: &NewCurriculumNode,
        parent_id: Option<i64>,
        sort_order: i64,
    ) -> AppResult<Option<i64>> {
        self.calls
            .push((payload.title_ar.clone(), parent_id, sort_order));
        if self.decline.contains(&payload.title_ar.as_str()) {
            return Ok(None);
        }
        self.next_id += 100;
        Ok(Some(self.next_id))
    }
}

fn node(level: CurriculumLevel, title: &str) -> NewCurriculumNode {
    NewCurriculumNode::new(level, title)
}

fn sample_tree() -> Taxonomy<NewCurriculumNode> {
    let mut tree = Taxonomy::new();
    let algebra = tree.root(node(CurriculumLevel::LearningAxis, "algebra"));
    let sequences = tree
        .child(algebra, node(CurriculumLevel::Unit, "sequences"))
        .unwrap();
    tree.child(sequences, node(CurriculumLevel::Topic, "arithmetic"))
        .unwrap();
    tree.child(sequences, node(CurriculumLevel::Topic, "geometric"))
        .unwrap();
    let analysis = tree.root(node(CurriculumLevel::LearningAxis, "analysis"));
    tree.child(analysis, node(CurriculumLevel::Unit, "limits"))
        .unwrap();
    tree
}

#[tokio::test]
async fn test_children_receive_parent_ids_in_insertion_order() {
    common::init_test_logging();
    let tree = sample_tree();
    let mut sink = RecordingSink::default();

    let report = tree.build(&mut sink).await.unwrap();

    assert_eq!(report.created_count(), 6);
    assert_eq!(report.skipped_count(), 0);
    let titles: Vec<_> = sink.calls.iter().map(|(t, ..)| t.as_str()).collect();
    assert_eq!(
        titles,
        ["algebra", "sequences", "arithmetic", "geometric", "analysis", "limits"]
    );
    // sequences hangs off algebra, both topics off sequences
    assert_eq!(sink.calls[1].1, report.id_of(0));
    assert_eq!(sink.calls[2].1, report.id_of(1));
    assert_eq!(sink.calls[3].1, report.id_of(1));
    assert_eq!(sink.calls[3].2, 2);
    assert_eq!(sink.calls[4].1, None);
    assert_eq!(sink.calls[4].2, 2);
}

#[tokio::test]
async fn test_declined_node_skips_its_whole_branch() {
    common::init_test_logging();
    let tree = sample_tree();
    let mut sink = RecordingSink {
        decline: vec!["sequences"],
        ..RecordingSink::default()
    };

    let report = tree.build(&mut sink).await.unwrap();

    assert_eq!(report.skipped_count(), 3);
    assert_eq!(report.created_count(), 3);
    assert!(report.id_of(2).is_none());
    assert!(report.id_of(3).is_none());
    assert!(sink.calls.iter().all(|(t, ..)| t != "arithmetic" && t != "geometric"));
    assert!(report.id_of(5).is_some());
}

#[test]
fn test_from_nodes_rejects_forward_parent() {
    let nodes = vec![
        NodeSpec {
            parent: Some(1),
            payload: node(CurriculumLevel::Unit, "orphan"),
        },
        NodeSpec {
            parent: None,
            payload: node(CurriculumLevel::LearningAxis, "axis"),
        },
    ];
    let error = Taxonomy::from_nodes(nodes).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_curriculum_parents_exist_and_refresh_is_idempotent() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 7, Utc::now());

    let academic = common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    assert!(academic.is_completed());
    let first = common::run_seeder(&mut ctx, &CurriculumSeeder).await.unwrap();
    assert!(first.is_completed());
    let first_count = db.count_rows(Table::CurriculumNodes).await.unwrap();

    let second = common::run_seeder(&mut ctx, &CurriculumSeeder).await.unwrap();
    assert!(matches!(second, SeedOutcome::Completed { .. }));
    assert_eq!(db.count_rows(Table::CurriculumNodes).await.unwrap(), first_count);

    for subject in db.list_subjects().await.unwrap() {
        let nodes = db.list_curriculum_nodes(subject.id).await.unwrap();
        for child in nodes.iter().filter(|n| n.parent_id.is_some()) {
            let parent = nodes
                .iter()
                .find(|n| Some(n.id) == child.parent_id)
                .expect("parent written in the same pass");
            assert!(parent.id < child.id);
            assert!(parent.level.rank() < child.level.rank());
        }
    }
}

#[tokio::test]
async fn test_academic_rerun_keeps_a_single_bac_year() {
    let db = common::create_test_database().await.unwrap();
    let config = common::test_config();
    let mut ctx = common::seeded_context(&db, &config, 8, Utc::now());

    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();
    let subjects = db.count_rows(Table::Subjects).await.unwrap();
    common::run_seeder(&mut ctx, &AcademicStructureSeeder)
        .await
        .unwrap();

    assert_eq!(db.count_rows(Table::AcademicPhases).await.unwrap(), 3);
    assert_eq!(db.count_rows(Table::AcademicYears).await.unwrap(), 12);
    assert_eq!(db.count_rows(Table::Subjects).await.unwrap(), subjects);

    let secondary = db.get_phase_by_slug("secondary").await.unwrap().unwrap();
    let bac_year = db.get_year(secondary.id, 3).await.unwrap().unwrap();
    assert_eq!(db.find_bac_year().await.unwrap().map(|y| y.id), Some(bac_year.id));
    let streams = db.list_streams_for_year(bac_year.id).await.unwrap();
    assert_eq!(streams.len(), 6);
    for year in db.list_years().await.unwrap() {
        if year.id != bac_year.id {
            assert!(db.list_streams_for_year(year.id).await.unwrap().is_empty());
        }
    }
}
