//! Storage capabilities consumed from the caller's containers.

use alloc::vec::Vec;

use super::axis::{Axis, decode_spec};
use crate::error::EinsteinResult;

/// Storage that can be walked as one flat, densely packed store.
///
/// Slices and vectors are always dense flat vectors. Container types from
/// elsewhere can report otherwise and will be rejected during planning.
pub trait FlatBuffer {
    /// Number of stored elements.
    fn numel(&self) -> usize;

    /// True when every element is stored, without gaps.
    fn is_dense(&self) -> bool {
        true
    }

    /// True when the storage is one-dimensional.
    fn is_vector(&self) -> bool {
        true
    }
}

impl<T> FlatBuffer for [T] {
    fn numel(&self) -> usize {
        self.len()
    }
}

impl<T> FlatBuffer for Vec<T> {
    fn numel(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> FlatBuffer for [T; N] {
    fn numel(&self) -> usize {
        N
    }
}

/// Snapshot of a buffer's capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferInfo {
    pub numel: usize,
    pub dense: bool,
    pub vector: bool,
}

impl BufferInfo {
    /// A dense flat vector with `numel` elements.
    pub fn dense(numel: usize) -> Self {
        Self {
            numel,
            dense: true,
            vector: true,
        }
    }

    pub fn of<B: FlatBuffer + ?Sized>(buffer: &B) -> Self {
        Self {
            numel: buffer.numel(),
            dense: buffer.is_dense(),
            vector: buffer.is_vector(),
        }
    }
}

impl FlatBuffer for BufferInfo {
    fn numel(&self) -> usize {
        self.numel
    }

    fn is_dense(&self) -> bool {
        self.dense
    }

    fn is_vector(&self) -> bool {
        self.vector
    }
}

/// Everything the plan builder needs to know about one operand.
#[derive(Debug, Clone)]
pub struct OperandDesc<'a> {
    pub buffer: BufferInfo,
    pub shape: &'a [usize],
    pub spec: &'a [i64],
}

impl<'a> OperandDesc<'a> {
    pub fn new<B: FlatBuffer + ?Sized>(buffer: &B, shape: &'a [usize], spec: &'a [i64]) -> Self {
        Self {
            buffer: BufferInfo::of(buffer),
            shape,
            spec,
        }
    }

    /// Describes a dense buffer of exactly `product(shape)` elements.
    pub fn dense(shape: &'a [usize], spec: &'a [i64]) -> Self {
        Self {
            buffer: BufferInfo::dense(
                shape
                    .iter()
                    .try_fold(1usize, |acc, &d| acc.checked_mul(d))
                    .unwrap_or(usize::MAX),
            ),
            shape,
            spec,
        }
    }

    pub(crate) fn axes(&self) -> EinsteinResult<Vec<Axis>> {
        decode_spec(self.spec)
    }
}
