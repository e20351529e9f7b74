//! Requirement group model

use serde::{Deserialize, Serialize};

/// "Choose N from these options" clause of a requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChooseFrom {
    /// Number of options that must be taken
    #[serde(alias = "n", alias = "choose")]
    pub count: usize,

    /// Eligible course codes
    #[serde(default, alias = "courses")]
    pub options: Vec<String>,
}

/// A named degree requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementGroup {
    /// Requirement name (e.g., "Calculus Sequence")
    pub name: String,

    /// Course codes that are each required
    #[serde(default, alias = "required", alias = "courses")]
    pub courses_required: Vec<String>,

    /// Optional choose-N clause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choose_from: Option<ChooseFrom>,
}

impl RequirementGroup {
    /// Create a requirement with no courses
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            courses_required: Vec::new(),
            choose_from: None,
        }
    }

    /// Builder: list the individually required courses
    #[must_use]
    pub fn requiring(mut self, codes: &[&str]) -> Self {
        self.courses_required = codes.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Builder: add a choose-`count`-from-`options` clause
    #[must_use]
    pub fn choosing(mut self, count: usize, options: &[&str]) -> Self {
        self.choose_from = Some(ChooseFrom {
            count,
            options: options.iter().map(|c| (*c).to_string()).collect(),
        });
        self
    }

    /// Number of courses needed to satisfy the requirement
    #[must_use]
    pub fn total_required(&self) -> usize {
        self.courses_required.len() + self.choose_from.as_ref().map_or(0, |c| c.count)
    }
}
