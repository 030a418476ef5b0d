//! Dependency bit masks.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// A 64-bit "may depend on" tag.
///
/// Each bit tracks one independent seed. Contracting masks with
/// [`crate::kernels::BitOr`] marks every output that any seeded input
/// flows into.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepMask(pub u64);

impl DepMask {
    pub const EMPTY: DepMask = DepMask(0);
    pub const ALL: DepMask = DepMask(u64::MAX);

    /// Mask with only bit `n` set (`n` is taken modulo 64).
    #[inline]
    pub const fn bit(n: u32) -> Self {
        DepMask(1u64 << (n % 64))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: DepMask) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }
}

impl From<u64> for DepMask {
    fn from(bits: u64) -> Self {
        DepMask(bits)
    }
}

impl BitOr for DepMask {
    type Output = DepMask;

    #[inline(always)]
    fn bitor(self, rhs: DepMask) -> DepMask {
        DepMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for DepMask {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: DepMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for DepMask {
    type Output = DepMask;

    #[inline]
    fn bitand(self, rhs: DepMask) -> DepMask {
        DepMask(self.0 & rhs.0)
    }
}

impl fmt::Debug for DepMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepMask({:#b})", self.0)
    }
}
