//! Complete einsum notation representation.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use super::subscript::{Index, Subscript};
use crate::error::{EinsteinError, EinsteinResult};
use crate::plan::Label;

/// Complete parsed einsum notation.
#[derive(Debug, Clone)]
pub struct EinsumNotation {
    /// Input operand subscripts.
    inputs: Vec<Subscript>,
    /// Result subscript.
    output: Subscript,
    /// Indices that appear in inputs but not output (summed over).
    contraction_indices: BTreeSet<char>,
    /// Named indices of the output, in order.
    output_indices: Vec<char>,
    /// Original notation string (if available).
    original: Option<String>,
}

impl EinsumNotation {
    /// Creates a new einsum notation from parsed components.
    pub fn new(inputs: Vec<Subscript>, output: Subscript) -> Self {
        let all_input_indices: BTreeSet<char> =
            inputs.iter().flat_map(|s| s.named_indices()).collect();

        let output_indices: Vec<char> = output.named_indices().collect();
        let output_set: BTreeSet<char> = output_indices.iter().copied().collect();

        let contraction_indices = all_input_indices.difference(&output_set).copied().collect();

        Self {
            inputs,
            output,
            contraction_indices,
            output_indices,
            original: None,
        }
    }

    /// Sets the original notation string.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    #[inline]
    pub fn inputs(&self) -> &[Subscript] {
        &self.inputs
    }

    #[inline]
    pub fn output(&self) -> &Subscript {
        &self.output
    }

    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the indices that will be contracted (summed over).
    #[inline]
    pub fn contraction_indices(&self) -> &BTreeSet<char> {
        &self.contraction_indices
    }

    #[inline]
    pub fn output_indices(&self) -> &[char] {
        &self.output_indices
    }

    /// Returns the notation string this was parsed from, if any.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Returns true if output is scalar (no named or fixed indices).
    #[inline]
    pub fn is_scalar_output(&self) -> bool {
        self.output.is_empty()
    }

    #[inline]
    pub fn is_contracted(&self, c: char) -> bool {
        self.contraction_indices.contains(&c)
    }

    /// Assigns a shared label to each distinct named index.
    ///
    /// Labels start at 1 and follow first appearance, scanning the inputs
    /// and then the output.
    pub fn labels(&self) -> HashMap<char, Label> {
        let mut labels: HashMap<char, Label> = HashMap::new();
        let subscripts = self.inputs.iter().chain(core::iter::once(&self.output));
        for c in subscripts.flat_map(|s| s.named_indices()) {
            let next = Label(labels.len() as u64 + 1);
            labels.entry(c).or_insert(next);
        }
        labels
    }

    /// Lowers the notation into raw index specs for `[A, B, C]`.
    pub fn index_specs(&self) -> EinsteinResult<[Vec<i64>; 3]> {
        if self.inputs.len() != 2 {
            return Err(EinsteinError::parse(alloc::format!(
                "expected exactly two inputs, got {}",
                self.inputs.len()
            )));
        }

        let labels = self.labels();
        let lower = |sub: &Subscript| -> EinsteinResult<Vec<i64>> {
            sub.iter()
                .map(|idx| match *idx {
                    Index::Named(c) => Ok(labels[&c].to_raw()),
                    Index::Fixed(n) => {
                        i64::try_from(n).map_err(|_| EinsteinError::overflow("literal offset"))
                    }
                })
                .collect()
        };

        Ok([
            lower(&self.inputs[0])?,
            lower(&self.inputs[1])?,
            lower(&self.output)?,
        ])
    }
}

impl fmt::Display for EinsumNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", input)?;
        }
        write!(f, "->{}", self.output)
    }
}
