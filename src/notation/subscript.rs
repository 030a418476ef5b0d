//! Subscript representation for einsum notation.

use alloc::vec::Vec;
use core::fmt;

/// A single index in an einsum subscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    /// A named index (a-z, A-Z).
    Named(char),
    /// A dimension pinned to one position (0-9).
    Fixed(usize),
}

impl Index {
    /// Returns the character if this is a named index.
    #[inline]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Index::Named(c) => Some(*c),
            Index::Fixed(_) => None,
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Named(c) => write!(f, "{}", c),
            Index::Fixed(n) => write!(f, "{}", n),
        }
    }
}

/// A subscript representing the indices of a single operand.
///
/// For example, in `ij,jk->ik`, the subscripts are `ij`, `jk`, and `ik`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscript {
    indices: Vec<Index>,
}

impl Subscript {
    /// Creates an empty subscript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a subscript from a list of indices.
    pub fn from_indices(indices: Vec<Index>) -> Self {
        Self { indices }
    }

    /// Creates a subscript where each character becomes a named index.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self::from_indices(chars.into_iter().map(Index::Named).collect())
    }

    pub fn push_named(&mut self, c: char) {
        self.indices.push(Index::Named(c));
    }

    pub fn push_fixed(&mut self, offset: usize) {
        self.indices.push(Index::Fixed(offset));
    }

    /// Number of dimensions this subscript describes.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Index> {
        self.indices.iter()
    }

    /// Returns an iterator over named indices only.
    pub fn named_indices(&self) -> impl Iterator<Item = char> + '_ {
        self.indices.iter().filter_map(|i| i.as_char())
    }

    pub fn as_slice(&self) -> &[Index] {
        &self.indices
    }

    /// Checks if this subscript contains a specific named index.
    pub fn contains(&self, c: char) -> bool {
        self.indices.iter().any(|i| matches!(i, Index::Named(x) if *x == c))
    }

    /// Counts occurrences of a named index.
    pub fn count(&self, c: char) -> usize {
        self.indices
            .iter()
            .filter(|i| matches!(i, Index::Named(x) if *x == c))
            .count()
    }

    /// Returns the position of a named index (first occurrence).
    pub fn position(&self, c: char) -> Option<usize> {
        self.indices
            .iter()
            .position(|i| matches!(i, Index::Named(x) if *x == c))
    }
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in &self.indices {
            write!(f, "{}", idx)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Subscript {
    type Item = &'a Index;
    type IntoIter = core::slice::Iter<'a, Index>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}
