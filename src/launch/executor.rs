//! Contraction executor.
//!
//! Walks the iteration space of a [`ContractionPlan`] as exactly three
//! explicit nested loops over the last three iteration variables, wrapped in
//! one flattening loop that decomposes its linear index over the remaining
//! leading variables. The combine operation runs at the innermost leaf.

use core::ops::BitOr;

use crate::error::Operand;
use crate::kernels::{CombineOp, Element};
use crate::plan::ContractionPlan;

/// Loop geometry the executor derives from a plan.
///
/// Levels are ordered outermost first and correspond to the last three
/// entries of the plan's iteration dims. Missing levels have extent 1 and
/// stride 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopNest {
    /// Iterations of the flattening loop.
    pub outer: usize,
    /// Number of leading variables decomposed by the flattening loop.
    pub leading: usize,
    /// Extents of the three explicit levels.
    pub extents: [usize; 3],
    /// Strides per level, indexed `[level][operand]`.
    pub strides: [[usize; 3]; 3],
}

impl LoopNest {
    pub fn from_plan(plan: &ContractionPlan) -> Self {
        let n = plan.num_vars();
        let dims = plan.iter_dims();
        let (sa, sb, sc) = (plan.strides_a(), plan.strides_b(), plan.strides_c());

        let mut extents = [1usize; 3];
        let mut strides = [[0usize; 3]; 3];
        for level in 0..3 {
            // Level 2 is the last variable, level 0 the third from last.
            let back = 3 - level;
            if n >= back {
                let var = n - back;
                extents[level] = dims[var];
                strides[level] = [sa[var + 1], sb[var + 1], sc[var + 1]];
            }
        }

        let inner: usize = extents.iter().product();
        let outer = if inner == 0 {
            0
        } else {
            plan.total_iterations() / inner
        };

        Self {
            outer,
            leading: n.saturating_sub(3),
            extents,
            strides,
        }
    }
}

/// Calls `leaf(offset_a, offset_b, offset_c)` for every iteration tuple.
///
/// Tuples are visited in the same order by every executor entry point, so
/// all combine variants see identical index tuples.
#[inline]
pub fn for_each_offset<F>(plan: &ContractionPlan, mut leaf: F)
where
    F: FnMut(usize, usize, usize),
{
    if plan.total_iterations() == 0 {
        return;
    }

    let nest = LoopNest::from_plan(plan);
    let dims = plan.iter_dims();
    let (sa, sb, sc) = (
        &plan.strides_a()[1..],
        &plan.strides_b()[1..],
        &plan.strides_c()[1..],
    );

    let base_a = plan.base_offset(Operand::A);
    let base_b = plan.base_offset(Operand::B);
    let base_c = plan.base_offset(Operand::C);

    let [dim1, dim2, dim3] = nest.extents;
    let [[a1, b1, c1], [a2, b2, c2], [a3, b3, c3]] = nest.strides;

    tracing::trace!(
        outer = nest.outer,
        leading = nest.leading,
        extents = ?nest.extents,
        "walking contraction"
    );

    for i in 0..nest.outer {
        let (mut oa, mut ob, mut oc) = (base_a, base_b, base_c);

        let mut sub = i;
        for j in 0..nest.leading {
            let ind = sub % dims[j];
            oa += sa[j] * ind;
            ob += sb[j] * ind;
            oc += sc[j] * ind;
            sub /= dims[j];
        }

        let (mut pa1, mut pb1, mut pc1) = (oa, ob, oc);
        for _ in 0..dim1 {
            let (mut pa2, mut pb2, mut pc2) = (pa1, pb1, pc1);
            for _ in 0..dim2 {
                let (mut pa3, mut pb3, mut pc3) = (pa2, pb2, pc2);
                for _ in 0..dim3 {
                    leaf(pa3, pb3, pc3);
                    pa3 += a3;
                    pb3 += b3;
                    pc3 += c3;
                }
                pa2 += a2;
                pb2 += b2;
                pc2 += c2;
            }
            pa1 += a1;
            pb1 += b1;
            pc1 += c1;
        }
    }
}

/// Accumulates the contraction into `c` using the element's combine.
///
/// `c` must be pre-initialized with the combine's identity (zero for
/// multiply-accumulate, empty mask for bitwise-OR) wherever it is written.
///
/// # Panics
///
/// If a buffer is shorter than the element count the plan was built for.
pub fn execute<E: Element>(plan: &ContractionPlan, a: &[E], b: &[E], c: &mut [E]) {
    execute_with::<E, E::Op>(plan, a, b, c);
}

/// Accumulates the contraction into `c` with an explicit combine operation.
pub fn execute_with<E, Op>(plan: &ContractionPlan, a: &[E], b: &[E], c: &mut [E])
where
    E: Copy,
    Op: CombineOp<E>,
{
    debug_assert!(a.len() >= plan.numel(Operand::A));
    debug_assert!(b.len() >= plan.numel(Operand::B));
    debug_assert!(c.len() >= plan.numel(Operand::C));

    for_each_offset(plan, |ia, ib, ic| {
        c[ic] = Op::combine(c[ic], a[ia], b[ib]);
    });
}

/// Propagates output flags back into the inputs that contributed to them.
///
/// For every iteration tuple, `a |= c` and `b |= c`. This is the reverse
/// counterpart of the bitwise-OR contraction and visits the same tuples.
pub fn propagate_reverse<E>(plan: &ContractionPlan, a: &mut [E], b: &mut [E], c: &[E])
where
    E: Copy + BitOr<Output = E>,
{
    debug_assert!(a.len() >= plan.numel(Operand::A));
    debug_assert!(b.len() >= plan.numel(Operand::B));
    debug_assert!(c.len() >= plan.numel(Operand::C));

    for_each_offset(plan, |ia, ib, ic| {
        let flag = c[ic];
        a[ia] = a[ia] | flag;
        b[ib] = b[ib] | flag;
    });
}
