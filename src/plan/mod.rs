//! Contraction planning.
//!
//! Validates operand shapes and index specs, unifies shared labels into
//! iteration extents and derives the per-operand stride tables the executor
//! walks.

mod axis;
mod buffer;
mod builder;
mod config;
mod dim_map;

pub use axis::{Axis, Label, decode_spec};
pub use buffer::{BufferInfo, FlatBuffer, OperandDesc};
pub use builder::{ContractionPlan, StrideTable, build_dense_plan, build_plan};
pub use config::{DimOrdering, PlanConfig, RepeatedLabelPolicy};
pub use dim_map::DimensionMap;
