//! Construction of contraction plans.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use smallvec::{SmallVec, smallvec};

use super::axis::{Axis, Label};
use super::buffer::OperandDesc;
use super::config::{PlanConfig, RepeatedLabelPolicy};
use super::dim_map::DimensionMap;
use crate::error::{EinsteinError, EinsteinResult, Operand};

/// Per-operand stride table: slot 0 is the base offset, slot `1 + k` the
/// stride of the `k`-th iteration variable.
pub type StrideTable = SmallVec<[usize; 8]>;

/// Compiled iteration plan for one contraction.
///
/// Produced by [`build_plan`], consumed by the executor. A plan is a pure
/// function of the shapes, specs and config it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractionPlan {
    /// Labels of the iteration variables, outermost first.
    labels: SmallVec<[Label; 8]>,
    /// Extents of the iteration variables, same order as `labels`.
    iter_dims: SmallVec<[usize; 8]>,
    /// Stride tables for A, B and C.
    strides: [StrideTable; 3],
    /// Product of all extents.
    total_iterations: usize,
    /// Element counts the operands were validated against.
    numel: [usize; 3],
}

impl ContractionPlan {
    /// Extents of the iteration variables, outermost first.
    #[inline]
    pub fn iter_dims(&self) -> &[usize] {
        &self.iter_dims
    }

    /// Labels of the iteration variables, same order as [`Self::iter_dims`].
    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of iteration variables.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.iter_dims.len()
    }

    /// Total number of combine invocations.
    #[inline]
    pub fn total_iterations(&self) -> usize {
        self.total_iterations
    }

    /// Stride table of one operand (length `num_vars() + 1`).
    #[inline]
    pub fn strides(&self, operand: Operand) -> &[usize] {
        &self.strides[operand as usize]
    }

    #[inline]
    pub fn strides_a(&self) -> &[usize] {
        self.strides(Operand::A)
    }

    #[inline]
    pub fn strides_b(&self) -> &[usize] {
        self.strides(Operand::B)
    }

    #[inline]
    pub fn strides_c(&self) -> &[usize] {
        self.strides(Operand::C)
    }

    /// Fixed offset contributed by the literal entries of an operand.
    #[inline]
    pub fn base_offset(&self, operand: Operand) -> usize {
        self.strides[operand as usize][0]
    }

    /// Element count the operand was validated against.
    #[inline]
    pub fn numel(&self, operand: Operand) -> usize {
        self.numel[operand as usize]
    }

    /// Position of a label in the loop order.
    pub fn position(&self, label: Label) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    /// True when there is nothing to iterate over.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_iterations == 0
    }

    /// Estimated FLOPs for the arithmetic combine (one mul + one add per step).
    pub fn flops(&self) -> u64 {
        (self.total_iterations as u64).saturating_mul(2)
    }
}

/// Builds a contraction plan for `C += A * B` style Einstein summation.
///
/// All validation happens here. On success the executor can walk the plan
/// without further checks.
pub fn build_plan(
    a: &OperandDesc<'_>,
    b: &OperandDesc<'_>,
    c: &OperandDesc<'_>,
    config: &PlanConfig,
) -> EinsteinResult<ContractionPlan> {
    let operands = [a, b, c];

    let mut numel = [0usize; 3];
    for (operand, desc) in Operand::ALL.into_iter().zip(operands) {
        numel[operand as usize] = check_buffer(operand, desc)?;
    }

    for (operand, desc) in [(Operand::A, a), (Operand::B, b)] {
        if desc.spec.len() != desc.shape.len() {
            return Err(EinsteinError::SpecLength {
                operand,
                spec: desc.spec.len(),
                shape: desc.shape.len(),
            });
        }
    }

    // A shorter result spec addresses only the leading dims of C.
    if c.spec.len() > c.shape.len() {
        return Err(EinsteinError::SpecLength {
            operand: Operand::C,
            spec: c.spec.len(),
            shape: c.shape.len(),
        });
    }

    let available = a.spec.len() + b.spec.len();
    if c.spec.len() > available {
        return Err(EinsteinError::ResultSpecTooLong {
            result: c.spec.len(),
            available,
        });
    }

    let axes = [a.axes()?, b.axes()?, c.axes()?];

    if config.check_literal_bounds {
        for (operand, (desc, axes)) in Operand::ALL.into_iter().zip(operands.iter().zip(&axes)) {
            check_literals(operand, axes, desc.shape)?;
        }
    }

    let mut dim_map = DimensionMap::new();
    for (operand, (desc, axes)) in Operand::ALL.into_iter().zip(operands.iter().zip(&axes)) {
        dim_map.unify(operand, axes, desc.shape)?;
    }

    let ordered = dim_map.ordered(config.ordering);

    let total_iterations = ordered
        .iter()
        .try_fold(1usize, |acc, &(_, extent)| acc.checked_mul(extent))
        .ok_or_else(|| EinsteinError::overflow("total iterations"))?;

    let labels: SmallVec<[Label; 8]> = ordered.iter().map(|&(label, _)| label).collect();
    let iter_dims: SmallVec<[usize; 8]> = ordered.iter().map(|&(_, extent)| extent).collect();
    let lookup: BTreeMap<Label, usize> = labels.iter().enumerate().map(|(pos, &l)| (l, pos)).collect();

    let strides = [
        stride_table(&axes[0], a.shape, &lookup, config.repeated_labels)?,
        stride_table(&axes[1], b.shape, &lookup, config.repeated_labels)?,
        stride_table(&axes[2], c.shape, &lookup, config.repeated_labels)?,
    ];

    tracing::debug!(
        iter_dims = ?iter_dims.as_slice(),
        total_iterations,
        base_a = strides[0][0],
        base_b = strides[1][0],
        base_c = strides[2][0],
        "built contraction plan"
    );

    Ok(ContractionPlan {
        labels,
        iter_dims,
        strides,
        total_iterations,
        numel,
    })
}

/// Checks the storage preconditions of one operand, returning its element count.
fn check_buffer(operand: Operand, desc: &OperandDesc<'_>) -> EinsteinResult<usize> {
    if !desc.buffer.vector {
        return Err(EinsteinError::NotVector { operand });
    }
    if !desc.buffer.dense {
        return Err(EinsteinError::NotDense { operand });
    }

    let expected = desc
        .shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| EinsteinError::overflow("shape product"))?;

    if desc.buffer.numel != expected {
        return Err(EinsteinError::ElementCount {
            operand,
            numel: desc.buffer.numel,
            expected,
        });
    }
    Ok(expected)
}

fn check_literals(operand: Operand, axes: &[Axis], shape: &[usize]) -> EinsteinResult<()> {
    for (axis, (spec, &extent)) in axes.iter().zip(shape).enumerate() {
        if let Axis::Fixed(offset) = *spec {
            if offset >= extent {
                return Err(EinsteinError::LiteralOutOfRange {
                    operand,
                    axis,
                    offset,
                    extent,
                });
            }
        }
    }
    Ok(())
}

/// Walks one spec with a running cumulative stride.
///
/// Dims past the end of the spec contribute nothing to any offset.
fn stride_table(
    axes: &[Axis],
    shape: &[usize],
    lookup: &BTreeMap<Label, usize>,
    policy: RepeatedLabelPolicy,
) -> EinsteinResult<StrideTable> {
    let mut table: StrideTable = smallvec![0; lookup.len() + 1];
    let mut cumprod = 1usize;

    for (axis, &extent) in axes.iter().zip(shape) {
        match *axis {
            Axis::Fixed(offset) => {
                table[0] = offset
                    .checked_mul(cumprod)
                    .and_then(|o| table[0].checked_add(o))
                    .ok_or_else(|| EinsteinError::overflow("base offset"))?;
            }
            Axis::Shared(label) => {
                // Every shared label was unified into the lookup.
                let slot = 1 + lookup[&label];
                table[slot] = match policy {
                    RepeatedLabelPolicy::LastWins => cumprod,
                    RepeatedLabelPolicy::Diagonal => table[slot]
                        .checked_add(cumprod)
                        .ok_or_else(|| EinsteinError::overflow("diagonal stride"))?,
                };
            }
        }
        cumprod = cumprod
            .checked_mul(extent)
            .ok_or_else(|| EinsteinError::overflow("cumulative stride"))?;
    }

    Ok(table)
}

/// Plans a contraction over dense buffers whose lengths match their shapes.
pub fn build_dense_plan(
    shapes: [&[usize]; 3],
    specs: [&[i64]; 3],
    config: &PlanConfig,
) -> EinsteinResult<ContractionPlan> {
    let descs: Vec<OperandDesc<'_>> = shapes
        .iter()
        .zip(specs.iter())
        .map(|(shape, spec)| OperandDesc::dense(shape, spec))
        .collect();
    build_plan(&descs[0], &descs[1], &descs[2], config)
}
