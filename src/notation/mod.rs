//! Einsum notation front-end.
//!
//! Lowers strings like `ij,jk->ik` into the raw index specs the planner
//! consumes. Each distinct letter becomes a shared label; a digit pins its
//! dimension to a fixed position.

mod notation;
mod parser;
mod subscript;
pub mod validation;

pub use notation::EinsumNotation;
pub use parser::parse_einsum;
pub use subscript::{Index, Subscript};
pub use validation::{output_shape, validate_notation};
