//! Reusable Einstein contraction operation and einsum entry points.

use alloc::vec;
use alloc::vec::Vec;

use super::executor::{execute, propagate_reverse};
use crate::error::{EinsteinError, EinsteinResult, Operand};
use crate::kernels::{DepMask, Element};
use crate::notation::{output_shape, parse_einsum, validate_notation};
use crate::plan::{ContractionPlan, OperandDesc, PlanConfig, build_dense_plan, build_plan};

/// A planned contraction `out = c0 + contract(a, b)`.
///
/// Holds the operand shapes and specs together with the compiled plan, so
/// the same contraction can be evaluated numerically and propagated through
/// dependency masks in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Einstein {
    shapes: [Vec<usize>; 3],
    specs: [Vec<i64>; 3],
    plan: ContractionPlan,
}

impl Einstein {
    /// Plans a contraction over dense operands of the given shapes.
    pub fn new(
        shapes: [&[usize]; 3],
        specs: [&[i64]; 3],
        config: &PlanConfig,
    ) -> EinsteinResult<Self> {
        let plan = build_dense_plan(shapes, specs, config)?;
        Ok(Self {
            shapes: shapes.map(<[usize]>::to_vec),
            specs: specs.map(<[i64]>::to_vec),
            plan,
        })
    }

    /// Plans a contraction described by einsum notation.
    pub fn from_notation(
        notation: &str,
        shapes: [&[usize]; 3],
        config: &PlanConfig,
    ) -> EinsteinResult<Self> {
        let notation = parse_einsum(notation)?;
        validate_notation(&notation)?;
        let [a, b, c] = notation.index_specs()?;
        Self::new(shapes, [&a, &b, &c], config)
    }

    #[inline]
    pub fn plan(&self) -> &ContractionPlan {
        &self.plan
    }

    pub fn shape(&self, operand: Operand) -> &[usize] {
        &self.shapes[operand as usize]
    }

    pub fn spec(&self, operand: Operand) -> &[i64] {
        &self.specs[operand as usize]
    }

    /// Number of elements of an operand.
    pub fn numel(&self, operand: Operand) -> usize {
        self.plan.numel(operand)
    }

    fn check_len(&self, operand: Operand, len: usize) -> EinsteinResult<()> {
        let expected = self.numel(operand);
        if len != expected {
            return Err(EinsteinError::ElementCount {
                operand,
                numel: len,
                expected,
            });
        }
        Ok(())
    }

    /// Evaluates `out = c0 + contract(a, b)`.
    pub fn eval<E: Element>(&self, c0: &[E], a: &[E], b: &[E], out: &mut [E]) -> EinsteinResult<()> {
        self.check_len(Operand::A, a.len())?;
        self.check_len(Operand::B, b.len())?;
        self.check_len(Operand::C, c0.len())?;
        self.check_len(Operand::C, out.len())?;

        out.copy_from_slice(c0);
        execute(&self.plan, a, b, out);
        Ok(())
    }

    /// Forward dependency propagation: `out = c0 | contract_or(a, b)`.
    pub fn sp_forward(
        &self,
        c0: &[DepMask],
        a: &[DepMask],
        b: &[DepMask],
        out: &mut [DepMask],
    ) -> EinsteinResult<()> {
        self.eval(c0, a, b, out)
    }

    /// Reverse dependency propagation.
    ///
    /// Every flag in `res` flows back into the elements of `c0`, `a` and `b`
    /// it was computed from, then `res` is cleared.
    pub fn sp_reverse(
        &self,
        c0: &mut [DepMask],
        a: &mut [DepMask],
        b: &mut [DepMask],
        res: &mut [DepMask],
    ) -> EinsteinResult<()> {
        self.check_len(Operand::A, a.len())?;
        self.check_len(Operand::B, b.len())?;
        self.check_len(Operand::C, c0.len())?;
        self.check_len(Operand::C, res.len())?;

        propagate_reverse(&self.plan, a, b, res);
        for (seed, flag) in c0.iter_mut().zip(res.iter_mut()) {
            *seed |= *flag;
            *flag = DepMask::EMPTY;
        }
        Ok(())
    }
}

/// Accumulates `c += einsum(notation, a, b)` over caller-provided buffers.
///
/// Each operand is passed as `(data, shape)`; buffer lengths are validated
/// against their shapes before anything is written.
///
/// # Example
///
/// ```
/// use einstein_strided::einsum;
///
/// // Column-major 2x3 matrix times a length-3 vector.
/// let a = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
/// let b = [1.0, 1.0, 1.0];
/// let mut c = [0.0; 2];
/// einsum("ij,j->i", (&a, &[2, 3]), (&b, &[3]), (&mut c, &[2])).unwrap();
/// assert_eq!(c, [6.0, 15.0]);
/// ```
pub fn einsum<E: Element>(
    notation: &str,
    a: (&[E], &[usize]),
    b: (&[E], &[usize]),
    c: (&mut [E], &[usize]),
) -> EinsteinResult<()> {
    einsum_with_config(notation, a, b, c, &PlanConfig::default())
}

/// Same as [`einsum`] with an explicit planning config.
pub fn einsum_with_config<E: Element>(
    notation: &str,
    (a, shape_a): (&[E], &[usize]),
    (b, shape_b): (&[E], &[usize]),
    (c, shape_c): (&mut [E], &[usize]),
    config: &PlanConfig,
) -> EinsteinResult<()> {
    let notation = parse_einsum(notation)?;
    validate_notation(&notation)?;
    let [spec_a, spec_b, spec_c] = notation.index_specs()?;

    let plan = build_plan(
        &OperandDesc::new(a, shape_a, &spec_a),
        &OperandDesc::new(b, shape_b, &spec_b),
        &OperandDesc::new(&*c, shape_c, &spec_c),
        config,
    )?;

    execute(&plan, a, b, c);
    Ok(())
}

/// Allocates a zeroed result and evaluates `einsum(notation, a, b)` into it.
///
/// Returns the result data and its shape.
pub fn einsum_alloc<E: Element + Default>(
    notation: &str,
    a: (&[E], &[usize]),
    b: (&[E], &[usize]),
) -> EinsteinResult<(Vec<E>, Vec<usize>)> {
    let parsed = parse_einsum(notation)?;
    let shape = output_shape(&parsed, a.1, b.1)?;
    let numel = shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| EinsteinError::overflow("result size"))?;

    let mut out = vec![E::default(); numel];
    einsum(notation, a, b, (&mut out[..], &shape[..]))?;
    Ok((out, shape))
}
