//! Configuration for contraction planning.

use serde::{Deserialize, Serialize};

/// Order in which iteration variables are laid out, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimOrdering {
    /// Ascending extent: the largest variable becomes the innermost loop.
    #[default]
    AscendingExtent,
    /// Ascending label id.
    Label,
}

/// How a label repeated inside a single operand's spec is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatedLabelPolicy {
    /// The stride of the last occurrence is used.
    #[default]
    LastWins,
    /// Strides of all occurrences add up, walking the diagonal.
    Diagonal,
}

/// Configuration options for plan construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Loop order of the iteration variables.
    pub ordering: DimOrdering,
    /// Resolution of repeated labels within one operand.
    pub repeated_labels: RepeatedLabelPolicy,
    /// Whether literal offsets are checked against their dimension.
    pub check_literal_bounds: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            ordering: DimOrdering::AscendingExtent,
            repeated_labels: RepeatedLabelPolicy::LastWins,
            check_literal_bounds: true,
        }
    }
}

impl PlanConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the loop ordering.
    pub fn with_ordering(mut self, ordering: DimOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the repeated label policy.
    pub fn with_repeated_labels(mut self, policy: RepeatedLabelPolicy) -> Self {
        self.repeated_labels = policy;
        self
    }

    /// Enables or disables literal bound checks.
    pub fn with_literal_bounds(mut self, enabled: bool) -> Self {
        self.check_literal_bounds = enabled;
        self
    }

    /// Config where a repeated label selects the diagonal.
    pub fn diagonal() -> Self {
        Self::default().with_repeated_labels(RepeatedLabelPolicy::Diagonal)
    }
}
