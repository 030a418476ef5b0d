//! Einsum notation parser.
//!
//! Parses strings like "ij,jk->ik" into structured EinsumNotation.

use alloc::vec::Vec;

use hashbrown::HashMap;

use super::notation::EinsumNotation;
use super::subscript::Subscript;
use crate::error::{EinsteinError, EinsteinResult};

/// Parses an einsum notation string.
///
/// # Grammar
///
/// ```text
/// einsum      ::= inputs '->' output | inputs
/// inputs      ::= subscript (',' subscript)*
/// output      ::= subscript
/// subscript   ::= (index | fixed)*
/// index       ::= [a-zA-Z]
/// fixed       ::= [0-9]
/// ```
///
/// A digit pins its dimension to that position instead of iterating it.
///
/// # Examples
///
/// ```
/// use einstein_strided::parse_einsum;
///
/// let matmul = parse_einsum("ij,jk->ik").unwrap();
/// let implicit = parse_einsum("ij,jk").unwrap(); // implies ->ik
/// let row = parse_einsum("1j,j->").unwrap(); // row 1 dotted with a vector
/// # assert_eq!(implicit.output().to_string(), "ik");
/// # assert_eq!(matmul.num_inputs(), 2);
/// # assert_eq!(row.inputs()[0].len(), 2);
/// ```
pub fn parse_einsum(notation: &str) -> EinsteinResult<EinsumNotation> {
    let notation = notation.trim();

    if notation.is_empty() {
        return Err(EinsteinError::parse("empty notation"));
    }

    let (inputs_str, output_str) = match notation.split_once("->") {
        Some((inputs, output)) => (inputs, Some(output)),
        None => (notation, None),
    };

    let input_strs: Vec<&str> = inputs_str.split(',').collect();
    if input_strs.len() == 1 && input_strs[0].trim().is_empty() {
        return Err(EinsteinError::parse("at least one input subscript is required"));
    }

    let mut inputs = Vec::with_capacity(input_strs.len());
    for input_str in &input_strs {
        inputs.push(parse_subscript(input_str.trim())?);
    }

    let output = match output_str {
        Some(out_str) => parse_subscript(out_str.trim())?,
        None => infer_output(&inputs),
    };

    Ok(EinsumNotation::new(inputs, output).with_original(notation))
}

/// Parses a single subscript string into a Subscript.
fn parse_subscript(s: &str) -> EinsteinResult<Subscript> {
    let mut subscript = Subscript::new();

    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' => subscript.push_named(c),
            '0'..='9' => subscript.push_fixed(c as usize - '0' as usize),
            '.' => return Err(EinsteinError::parse("ellipsis is not supported")),
            ' ' | '\t' => continue,
            _ => {
                return Err(EinsteinError::parse(alloc::format!(
                    "invalid character '{}' in subscript",
                    c
                )));
            }
        }
    }

    Ok(subscript)
}

/// Infers the output subscript when not explicitly provided.
///
/// Indices appearing exactly once across all inputs are kept, sorted
/// alphabetically (NumPy convention).
fn infer_output(inputs: &[Subscript]) -> Subscript {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in inputs.iter().flat_map(|s| s.named_indices()) {
        *counts.entry(c).or_insert(0) += 1;
    }

    let mut output_indices: Vec<char> = counts
        .iter()
        .filter(|&(_, count)| *count == 1)
        .map(|(&c, _)| c)
        .collect();
    output_indices.sort_unstable();

    Subscript::from_chars(output_indices)
}
