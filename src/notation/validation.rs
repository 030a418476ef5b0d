//! Validation for einsum notation against a two-input contraction.

use alloc::vec::Vec;

use hashbrown::HashMap;

use super::notation::EinsumNotation;
use super::subscript::Index;
use crate::error::{EinsteinError, EinsteinResult, Operand};

/// Validates an einsum notation for a two-input contraction.
///
/// Checks:
/// - Exactly two inputs
/// - Output indices must appear in at least one input
/// - The output is not longer than both inputs together
pub fn validate_notation(notation: &EinsumNotation) -> EinsteinResult<()> {
    if notation.num_inputs() != 2 {
        return Err(EinsteinError::parse(alloc::format!(
            "expected exactly two inputs, got {}",
            notation.num_inputs()
        )));
    }
    validate_output_indices(notation)?;

    let available: usize = notation.inputs().iter().map(|s| s.len()).sum();
    if notation.output().len() > available {
        return Err(EinsteinError::ResultSpecTooLong {
            result: notation.output().len(),
            available,
        });
    }
    Ok(())
}

/// Validates that all output indices appear in at least one input.
fn validate_output_indices(notation: &EinsumNotation) -> EinsteinResult<()> {
    for c in notation.output().named_indices() {
        let appears_in_input = notation.inputs().iter().any(|input| input.contains(c));
        if !appears_in_input {
            return Err(EinsteinError::OutputIndexNotInInputs { index: c });
        }
    }
    Ok(())
}

/// Computes the result shape implied by the notation and the input shapes.
///
/// Fixed output axes have no extent in the inputs and cannot be inferred.
pub fn output_shape(
    notation: &EinsumNotation,
    shape_a: &[usize],
    shape_b: &[usize],
) -> EinsteinResult<Vec<usize>> {
    validate_notation(notation)?;

    let mut dim_map: HashMap<char, usize> = HashMap::new();
    for ((operand, subscript), shape) in [Operand::A, Operand::B]
        .into_iter()
        .zip(notation.inputs())
        .zip([shape_a, shape_b])
    {
        if subscript.len() != shape.len() {
            return Err(EinsteinError::SpecLength {
                operand,
                spec: subscript.len(),
                shape: shape.len(),
            });
        }
        for (idx, &extent) in subscript.iter().zip(shape) {
            let Index::Named(c) = *idx else {
                continue;
            };
            match dim_map.get(&c) {
                Some(&expected) if expected != extent => {
                    return Err(EinsteinError::LabelConflict {
                        label: notation.labels()[&c].0,
                        operand,
                        expected,
                        got: extent,
                    });
                }
                Some(_) => {}
                None => {
                    dim_map.insert(c, extent);
                }
            }
        }
    }

    notation
        .output()
        .iter()
        .map(|idx| match *idx {
            Index::Named(c) => dim_map
                .get(&c)
                .copied()
                .ok_or(EinsteinError::OutputIndexNotInInputs { index: c }),
            Index::Fixed(_) => Err(EinsteinError::parse(
                "cannot infer the extent of a fixed output axis",
            )),
        })
        .collect()
}
