//! Cross-listing groups and the running set of taken courses

use crate::core::models::{canonical_code, Catalog, Course};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Bidirectional cross-listing map.
///
/// Every course code maps to the full connected component of codes it is
/// cross-listed with, so `A ~ B` and `B ~ C` place all three in one group
/// regardless of which side declared the listing.
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    groups: HashMap<String, Vec<String>>,
}

impl AliasMap {
    /// Build alias groups from the `aliases` of every catalog course
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut adjacency: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (key, course) in catalog.entries() {
            for alias in &course.aliases {
                let alias = canonical_code(alias);
                if alias.is_empty() || &alias == key {
                    continue;
                }
                adjacency
                    .entry(key.clone())
                    .or_default()
                    .insert(alias.clone());
                adjacency.entry(alias).or_default().insert(key.clone());
            }
        }

        let mut groups = HashMap::new();
        let mut assigned: HashSet<String> = HashSet::new();
        let mut starts: Vec<&String> = adjacency.keys().collect();
        starts.sort();

        for start in starts {
            if assigned.contains(start) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut stack = vec![start.clone()];
            while let Some(code) = stack.pop() {
                if !component.insert(code.clone()) {
                    continue;
                }
                if let Some(next) = adjacency.get(&code) {
                    stack.extend(next.iter().filter(|c| !component.contains(*c)).cloned());
                }
            }
            let members: Vec<String> = component.into_iter().collect();
            for member in &members {
                assigned.insert(member.clone());
                groups.insert(member.clone(), members.clone());
            }
        }

        Self { groups }
    }

    /// Canonical codes equivalent to `code`, itself included
    #[must_use]
    pub fn expand(&self, code: &str) -> Vec<String> {
        let key = canonical_code(code);
        self.groups
            .get(&key)
            .cloned()
            .unwrap_or_else(|| vec![key])
    }

    /// Catalog entry for `code`, or for the first of its cross-listings
    /// that has one
    #[must_use]
    pub fn resolve<'c>(&self, catalog: &'c Catalog, code: &str) -> Option<&'c Course> {
        catalog.get(code).or_else(|| {
            self.expand(code)
                .into_iter()
                .find_map(|alias| catalog.get(&alias))
        })
    }
}

/// Courses considered complete at some point in the quarter sweep.
///
/// Inserting a code inserts its whole alias group, so membership checks
/// only need the canonical form of the queried code.
#[derive(Debug, Clone)]
pub struct TakenSet<'a> {
    aliases: &'a AliasMap,
    codes: HashSet<String>,
}

impl<'a> TakenSet<'a> {
    /// Create an empty set over an alias map
    #[must_use]
    pub fn new(aliases: &'a AliasMap) -> Self {
        Self {
            aliases,
            codes: HashSet::new(),
        }
    }

    /// Mark a course and its cross-listings as taken
    pub fn insert(&mut self, code: &str) {
        self.codes.extend(self.aliases.expand(code));
    }

    /// Whether a course (under any of its codes) is taken
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(&canonical_code(code))
    }

    /// Cross-listing groups the set expands codes with
    #[must_use]
    pub const fn aliases(&self) -> &'a AliasMap {
        self.aliases
    }

    /// Whether any of `codes` is taken
    #[must_use]
    pub fn contains_any<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().any(|c| self.contains(c.as_ref()))
    }

    /// Number of canonical codes in the set, aliases included
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether nothing is taken yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
