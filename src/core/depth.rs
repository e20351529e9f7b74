//! Prerequisite-chain depth analysis
//!
//! The depth of a course is the number of edges on the longest blocking
//! prerequisite chain below it: a course with no prerequisites, or one that
//! is missing from the catalog, has depth 0.

use crate::core::models::{Catalog, PrereqGraph};
use crate::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Depth of one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDepth {
    /// Course code as published in the catalog (or as requested, if unknown)
    pub course_code: String,
    /// Longest prerequisite chain length in edges
    pub depth: usize,
}

impl CourseDepth {
    /// Create a new depth entry
    #[must_use]
    pub fn new(course_code: &str, depth: usize) -> Self {
        Self {
            course_code: course_code.to_string(),
            depth,
        }
    }
}

/// One frame of the explicit DFS stack
struct Frame {
    node: usize,
    next_edge: usize,
    best: usize,
}

/// Memoized, cycle-tolerant depth computation over a [`PrereqGraph`].
///
/// Memo entries live for the analyzer's lifetime only. Re-entering a node
/// that is still on the DFS stack contributes an edge of length 1 (the
/// revisited node counts as 0), which under-counts cycles instead of looping.
pub struct DepthAnalyzer {
    graph: PrereqGraph,
    memo: Vec<Option<usize>>,
    visiting: Vec<bool>,
}

impl DepthAnalyzer {
    /// Build an analyzer over the blocking prerequisites of a catalog
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self::from_graph(PrereqGraph::from_catalog(catalog))
    }

    /// Build an analyzer over an existing graph
    #[must_use]
    pub fn from_graph(graph: PrereqGraph) -> Self {
        let count = graph.course_count();
        Self {
            graph,
            memo: vec![None; count],
            visiting: vec![false; count],
        }
    }

    /// Depth of a course; unknown codes have depth 0
    pub fn depth_of(&mut self, code: &str) -> usize {
        self.graph
            .index_of(code)
            .map_or(0, |idx| self.depth_at(idx))
    }

    fn depth_at(&mut self, root: usize) -> usize {
        if let Some(depth) = self.memo[root] {
            return depth;
        }

        self.visiting[root] = true;
        let mut stack = vec![Frame {
            node: root,
            next_edge: 0,
            best: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let edges = self.graph.prerequisites_of(frame.node);
            if let Some(&child) = edges.get(frame.next_edge) {
                frame.next_edge += 1;

                if let Some(depth) = self.memo[child] {
                    frame.best = frame.best.max(depth + 1);
                } else if self.visiting[child] {
                    debug!(
                        "Prerequisite cycle: {} → {}",
                        self.graph.code(frame.node),
                        self.graph.code(child)
                    );
                    frame.best = frame.best.max(1);
                } else {
                    self.visiting[child] = true;
                    stack.push(Frame {
                        node: child,
                        next_edge: 0,
                        best: 0,
                    });
                }
                continue;
            }

            let Frame { node, best, .. } = *frame;
            stack.pop();
            self.visiting[node] = false;
            self.memo[node] = Some(best);
            if let Some(parent) = stack.last_mut() {
                parent.best = parent.best.max(best + 1);
            }
        }

        self.memo[root].unwrap_or(0)
    }
}

/// Compute prerequisite depths.
///
/// # Arguments
/// * `catalog` - The full prerequisite universe
/// * `targets` - Codes to report; `None` reports every catalog course
///
/// # Returns
/// One entry per target in request order, or per catalog course in code order
#[must_use]
pub fn compute_depths<S: AsRef<str>>(catalog: &Catalog, targets: Option<&[S]>) -> Vec<CourseDepth> {
    let mut analyzer = DepthAnalyzer::new(catalog);

    match targets {
        Some(codes) => codes
            .iter()
            .map(|code| {
                let code = code.as_ref();
                let name = catalog.get(code).map_or_else(|| code.trim(), |c| c.code.as_str());
                CourseDepth::new(name, analyzer.depth_of(code))
            })
            .collect(),
        None => catalog
            .iter()
            .map(|course| CourseDepth::new(&course.code, analyzer.depth_of(&course.code)))
            .collect(),
    }
}

/// Sort depths deepest first; equal depths are ordered by course code
#[must_use]
pub fn rank_by_depth(mut depths: Vec<CourseDepth>) -> Vec<CourseDepth> {
    depths.sort_by(|a, b| match b.depth.cmp(&a.depth) {
        Ordering::Equal => a.course_code.cmp(&b.course_code),
        other => other,
    });
    depths
}
