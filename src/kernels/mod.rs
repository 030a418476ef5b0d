//! Element-level operations applied at each iteration tuple.
//!
//! Contains:
//! - Combine strategies (multiply-accumulate, bitwise-OR)
//! - The dependency mask element type used for sparsity propagation

mod combine;
mod dep_mask;

pub use combine::{BitOr, CombineOp, Element, MulAdd};
pub use dep_mask::DepMask;
