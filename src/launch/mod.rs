//! Launch module for Einstein contractions.
//!
//! Provides the executor that walks a compiled plan and the high-level
//! entry points built on top of it.

mod einstein;
mod executor;

pub use einstein::{Einstein, einsum, einsum_alloc, einsum_with_config};
pub use executor::{LoopNest, execute, execute_with, for_each_offset, propagate_reverse};
