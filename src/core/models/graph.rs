//! Prerequisite graph over canonical course codes

use super::catalog::Catalog;
use super::course::canonical_code;
use std::collections::HashMap;

/// Directed graph of blocking prerequisite edges.
///
/// Nodes live in an arena indexed by `usize`; `dependencies[i]` lists the
/// nodes course `i` requires. Codes
/// referenced by a prerequisite but absent from the catalog become leaf
/// nodes. The graph may contain cycles; traversals must guard against them.
#[derive(Debug, Clone, Default)]
pub struct PrereqGraph {
    codes: Vec<String>,
    index: HashMap<String, usize>,
    dependencies: Vec<Vec<usize>>,
}

impl PrereqGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from every course in a catalog
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut graph = Self::new();
        for (key, _) in catalog.entries() {
            graph.add_course(key);
        }
        for (key, course) in catalog.entries() {
            for prereq in course.prerequisite_codes() {
                graph.add_prerequisite(key, &prereq);
            }
        }
        graph
    }

    /// Add a course node, returning its index
    pub fn add_course(&mut self, code: &str) -> usize {
        let key = canonical_code(code);
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.codes.len();
        self.codes.push(key.clone());
        self.index.insert(key, idx);
        self.dependencies.push(Vec::new());
        idx
    }

    /// Add an edge: `course` requires `prerequisite`
    pub fn add_prerequisite(&mut self, course: &str, prerequisite: &str) {
        let from = self.add_course(course);
        let to = self.add_course(prerequisite);
        if !self.dependencies[from].contains(&to) {
            self.dependencies[from].push(to);
        }
    }

    /// Arena index of a course
    #[must_use]
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(&canonical_code(code)).copied()
    }

    /// Canonical code of a node
    #[must_use]
    pub fn code(&self, idx: usize) -> &str {
        &self.codes[idx]
    }

    /// Prerequisite nodes of a node
    #[must_use]
    pub fn prerequisites_of(&self, idx: usize) -> &[usize] {
        &self.dependencies[idx]
    }

    /// Number of nodes
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.codes.len()
    }
}
