//! # Einstein Strided
//!
//! Einstein summation over flat, densely packed, column-major buffers.
//!
//! ## Features
//!
//! - Integer index specs: negative entries are shared labels, non-negative
//!   entries pin a dimension to a fixed offset
//! - Plan building with label unification and stride derivation
//! - A fixed three-level loop nest with a flattening outer loop
//! - Pluggable combine: multiply-accumulate or bitwise-OR dependency masks
//! - Einsum notation front-end (`ij,jk->ik`)
//!
//! ## Example
//!
//! ```
//! use einstein_strided::{PlanConfig, build_dense_plan, execute};
//!
//! // C[i] += A[i, j] * B[j], column-major A of shape [2, 3].
//! let plan = build_dense_plan(
//!     [&[2, 3], &[3], &[2]],
//!     [&[-1, -2], &[-2], &[-1]],
//!     &PlanConfig::default(),
//! )
//! .unwrap();
//!
//! let a = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
//! let b = [1.0, 0.0, 1.0];
//! let mut c = [0.0; 2];
//! execute(&plan, &a, &b, &mut c);
//! assert_eq!(c, [4.0, 10.0]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod kernels;
pub mod launch;
pub mod notation;
pub mod plan;

pub use error::{EinsteinError, EinsteinResult, Operand};
pub use kernels::{BitOr, CombineOp, DepMask, Element, MulAdd};
pub use launch::{
    Einstein, einsum, einsum_alloc, einsum_with_config, execute, execute_with, propagate_reverse,
};
pub use notation::{EinsumNotation, parse_einsum};
pub use plan::{
    ContractionPlan, DimOrdering, OperandDesc, PlanConfig, RepeatedLabelPolicy, build_dense_plan,
    build_plan,
};
