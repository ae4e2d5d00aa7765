// ABOUTME: Parent-first builder for hierarchical seed data (academic structure, curriculum)
// ABOUTME: Nodes reference parents by position; generated ids are captured and handed to children
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! A [`Taxonomy`] is an ordered list of nodes. Each node names its parent by
//! position, and a parent must be declared before its children. [`Taxonomy::build`]
//! walks the list once, asks a [`NodeSink`] to persist every node with the
//! identifier generated for its parent, and records the identifiers it gets back.
//!
//! A sink may decline a node (returning `Ok(None)`) when an anchor it needs is
//! missing. The whole branch under that node is then skipped and reported, while
//! the rest of the tree still builds.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::NewCurriculumNode;

/// Payload with a depth rank, used to reject children shallower than their parent
pub trait Leveled {
    /// Depth rank, smaller is closer to the root
    fn rank(&self) -> u8;

    /// Label used in logs
    fn title(&self) -> &str;
}

impl Leveled for NewCurriculumNode {
    fn rank(&self) -> u8 {
        self.level.rank()
    }

    fn title(&self) -> &str {
        &self.title_ar
    }
}

/// One entry of a tree description
#[derive(Debug, Clone)]
pub struct NodeSpec<P> {
    /// Position of the parent in the same list
    pub parent: Option<usize>,
    /// Row to persist
    pub payload: P,
}

/// Persists nodes for [`Taxonomy::build`]
#[async_trait]
pub trait NodeSink<P: Sync>: Send {
    /// Persist one node and return its generated id
    ///
    /// `sort_order` is the 1-based position among siblings. Returning `Ok(None)`
    /// skips the node and its descendants.
    async fn create(
        &mut self,
        payload: &P,
        parent_id: Option<i64>,
        sort_order: i64,
    ) -> AppResult<Option<i64>>;
}

/// Outcome of a build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    ids: Vec<Option<i64>>,
    skipped: usize,
}

impl BuildReport {
    /// Generated id of the node at `index`, `None` when skipped
    #[must_use]
    pub fn id_of(&self, index: usize) -> Option<i64> {
        self.ids.get(index).copied().flatten()
    }

    /// Nodes persisted
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.ids.iter().filter(|id| id.is_some()).count()
    }

    /// Nodes skipped, including descendants of declined nodes
    #[must_use]
    pub const fn skipped_count(&self) -> usize {
        self.skipped
    }
}

/// Ordered tree description
#[derive(Debug, Clone)]
pub struct Taxonomy<P> {
    nodes: Vec<NodeSpec<P>>,
}

impl<P> Default for Taxonomy<P> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<P: Leveled> Taxonomy<P> {
    /// Empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a prepared node list
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a node references a parent that is not declared
    /// before it, or when a child is not deeper than its parent
    pub fn from_nodes(nodes: Vec<NodeSpec<P>>) -> AppResult<Self> {
        let mut tree = Self::new();
        for node in nodes {
            tree.push(node.parent, node.payload)?;
        }
        Ok(tree)
    }

    /// Append a root node and return its position
    pub fn root(&mut self, payload: P) -> usize {
        self.nodes.push(NodeSpec {
            parent: None,
            payload,
        });
        self.nodes.len() - 1
    }

    /// Append a child of the node at `parent` and return its position
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `parent` is not declared yet, or when the
    /// payload is not deeper than the parent's
    pub fn child(&mut self, parent: usize, payload: P) -> AppResult<usize> {
        self.push(Some(parent), payload)
    }

    fn push(&mut self, parent: Option<usize>, payload: P) -> AppResult<usize> {
        if let Some(parent) = parent {
            let Some(parent_node) = self.nodes.get(parent) else {
                return Err(AppError::invalid_input(format!(
                    "node '{}' references parent #{parent} which is not declared before it",
                    payload.title()
                )));
            };
            if payload.rank() <= parent_node.payload.rank() {
                return Err(AppError::invalid_input(format!(
                    "node '{}' is not deeper than its parent '{}'",
                    payload.title(),
                    parent_node.payload.title()
                )));
            }
        }
        self.nodes.push(NodeSpec { parent, payload });
        Ok(self.nodes.len() - 1)
    }

    /// Declared nodes in traversal order
    #[must_use]
    pub fn nodes(&self) -> &[NodeSpec<P>] {
        &self.nodes
    }

    /// Number of declared nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 1-based position of every node among its siblings, in declaration order
    #[must_use]
    pub fn sibling_orders(&self) -> Vec<i64> {
        let mut seen: Vec<(Option<usize>, i64)> = Vec::new();
        self.nodes
            .iter()
            .map(|node| {
                if let Some(entry) = seen.iter_mut().find(|(parent, _)| *parent == node.parent) {
                    entry.1 += 1;
                    entry.1
                } else {
                    seen.push((node.parent, 1));
                    1
                }
            })
            .collect()
    }

    /// Persist every node parent-first through `sink`
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the sink
    pub async fn build<S>(&self, sink: &mut S) -> AppResult<BuildReport>
    where
        P: Sync,
        S: NodeSink<P>,
    {
        let orders = self.sibling_orders();
        let mut report = BuildReport {
            ids: Vec::with_capacity(self.nodes.len()),
            skipped: 0,
        };

        for (node, sort_order) in self.nodes.iter().zip(orders) {
            let parent_id = match node.parent {
                None => None,
                Some(parent) => {
                    if let Some(id) = report.id_of(parent) {
                        Some(id)
                    } else {
                        debug!(node = node.payload.title(), "Parent skipped, skipping branch");
                        report.ids.push(None);
                        report.skipped += 1;
                        continue;
                    }
                }
            };

            let created = sink.create(&node.payload, parent_id, sort_order).await?;
            if created.is_none() {
                warn!(
                    node = node.payload.title(),
                    "Node declined by sink, skipping its branch"
                );
                report.skipped += 1;
            }
            report.ids.push(created);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurriculumLevel;

    fn node(level: CurriculumLevel, title: &str) -> NewCurriculumNode {
        NewCurriculumNode::new(level, title)
    }

    #[test]
    fn test_child_before_parent_is_rejected() {
        let result = Taxonomy::from_nodes(vec![NodeSpec {
            parent: Some(0),
            payload: node(CurriculumLevel::Unit, "orphan"),
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn test_child_must_be_deeper_than_parent() {
        let mut tree = Taxonomy::new();
        let unit = tree.root(node(CurriculumLevel::Unit, "unit"));
        assert!(tree
            .child(unit, node(CurriculumLevel::LearningAxis, "axis"))
            .is_err());
        assert!(tree.child(unit, node(CurriculumLevel::Topic, "topic")).is_ok());
    }

    #[test]
    fn test_sibling_orders_are_one_based_per_parent() {
        let mut tree = Taxonomy::new();
        let first = tree.root(node(CurriculumLevel::LearningAxis, "a"));
        tree.child(first, node(CurriculumLevel::Unit, "a.1")).ok();
        let second = tree.root(node(CurriculumLevel::LearningAxis, "b"));
        tree.child(first, node(CurriculumLevel::Unit, "a.2")).ok();
        tree.child(second, node(CurriculumLevel::Unit, "b.1")).ok();
        assert_eq!(tree.sibling_orders(), vec![1, 1, 2, 2, 1]);
    }
}
