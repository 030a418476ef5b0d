//! Unification of shared labels into iteration extents.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::axis::{Axis, Label};
use super::config::DimOrdering;
use crate::error::{EinsteinError, EinsteinResult, Operand};

/// Mapping from shared label to its extent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionMap {
    extents: BTreeMap<Label, usize>,
}

impl DimensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every shared axis of one operand.
    ///
    /// A label seen before must carry the same extent.
    pub fn unify(&mut self, operand: Operand, axes: &[Axis], shape: &[usize]) -> EinsteinResult<()> {
        for (axis, &extent) in axes.iter().zip(shape) {
            let Some(label) = axis.label() else {
                continue;
            };
            match self.extents.get(&label) {
                Some(&expected) if expected != extent => {
                    return Err(EinsteinError::LabelConflict {
                        label: label.0,
                        operand,
                        expected,
                        got: extent,
                    });
                }
                Some(_) => {}
                None => {
                    self.extents.insert(label, extent);
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, label: Label) -> Option<usize> {
        self.extents.get(&label).copied()
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Materializes the map as `(label, extent)` pairs in loop order.
    ///
    /// With [`DimOrdering::AscendingExtent`] equal extents keep descending
    /// label order, so the lowest label of a tie runs innermost.
    pub fn ordered(&self, ordering: DimOrdering) -> Vec<(Label, usize)> {
        match ordering {
            DimOrdering::AscendingExtent => {
                // Raw entries are `-label`, walked in ascending raw order.
                let mut pairs: Vec<(Label, usize)> =
                    self.extents.iter().rev().map(|(&l, &e)| (l, e)).collect();
                pairs.sort_by_key(|&(_, extent)| extent);
                pairs
            }
            DimOrdering::Label => self.extents.iter().map(|(&l, &e)| (l, e)).collect(),
        }
    }
}
