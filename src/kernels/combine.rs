//! Per-element combine operations.
//!
//! The executor calls [`CombineOp::combine`] once per iteration tuple. The
//! operation is chosen at compile time, either explicitly or through the
//! element type's [`Element::Op`].

use core::ops::{Add, BitOr as BitOrOp, Mul};

use half::{bf16, f16};

use super::dep_mask::DepMask;

/// Accumulates one `(a, b)` pair into an accumulator.
pub trait CombineOp<E> {
    /// Returns the new accumulator value.
    fn combine(acc: E, a: E, b: E) -> E;
}

/// Multiply-accumulate: `acc + a * b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MulAdd;

/// Bit-flag propagation: `acc | a | b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitOr;

impl<E> CombineOp<E> for MulAdd
where
    E: Add<Output = E> + Mul<Output = E>,
{
    #[inline(always)]
    fn combine(acc: E, a: E, b: E) -> E {
        acc + a * b
    }
}

impl<E> CombineOp<E> for BitOr
where
    E: BitOrOp<Output = E>,
{
    #[inline(always)]
    fn combine(acc: E, a: E, b: E) -> E {
        acc | a | b
    }
}

/// Element type with a default combine operation.
pub trait Element: Copy {
    /// Combine used by [`crate::launch::execute`].
    type Op: CombineOp<Self>;
}

macro_rules! arithmetic_elements {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                type Op = MulAdd;
            }
        )*
    };
}

arithmetic_elements!(f32, f64, f16, bf16, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Element for DepMask {
    type Op = BitOr;
}

impl Element for bool {
    type Op = BitOr;
}
