//! Typed view of raw index-spec entries.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{EinsteinError, EinsteinResult};

/// Identity of a shared iteration variable.
///
/// In a raw spec the label `n` is written as `-n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(pub u64);

impl Label {
    /// Raw spec entry that refers to this label.
    pub fn to_raw(self) -> i64 {
        (self.0 as i64).wrapping_neg()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One dimension of an index specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Pinned to a single position; not iterated.
    Fixed(usize),
    /// Bound to a shared iteration variable.
    Shared(Label),
}

impl Axis {
    /// Decodes a raw spec entry.
    #[inline]
    pub fn from_raw(raw: i64) -> EinsteinResult<Self> {
        if raw < 0 {
            Ok(Axis::Shared(Label(raw.unsigned_abs())))
        } else {
            usize::try_from(raw)
                .map(Axis::Fixed)
                .map_err(|_| EinsteinError::overflow("literal offset"))
        }
    }

    #[inline]
    pub fn label(&self) -> Option<Label> {
        match self {
            Axis::Shared(label) => Some(*label),
            Axis::Fixed(_) => None,
        }
    }
}

/// Decodes every entry of a raw spec.
pub fn decode_spec(raw: &[i64]) -> EinsteinResult<Vec<Axis>> {
    raw.iter().map(|&r| Axis::from_raw(r)).collect()
}
