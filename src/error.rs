//! Error types for planning Einstein contractions.

use alloc::string::String;
use core::fmt;

/// Identifies one of the three operands of a contraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Left input.
    A,
    /// Right input.
    B,
    /// Accumulated result.
    C,
}

impl Operand {
    /// All operands in planning order.
    pub const ALL: [Operand; 3] = [Operand::A, Operand::B, Operand::C];
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::A => write!(f, "A"),
            Operand::B => write!(f, "B"),
            Operand::C => write!(f, "C"),
        }
    }
}

/// Errors that can occur while validating and planning a contraction.
///
/// These are contract violations by the caller. The executor itself never
/// fails once a plan exists.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum EinsteinError {
    /// Operand storage is not dense.
    #[cfg_attr(feature = "std", error("operand {operand} is not dense"))]
    NotDense { operand: Operand },

    /// Operand storage is not a flat vector.
    #[cfg_attr(feature = "std", error("operand {operand} is not a flat vector"))]
    NotVector { operand: Operand },

    /// Buffer length disagrees with the declared shape.
    #[cfg_attr(feature = "std", error("operand {operand} has {numel} elements, shape implies {expected}"))]
    ElementCount {
        operand: Operand,
        numel: usize,
        expected: usize,
    },

    /// Index spec and shape have different ranks.
    #[cfg_attr(feature = "std", error("operand {operand}: index spec has {spec} entries, shape has {shape} dims"))]
    SpecLength {
        operand: Operand,
        spec: usize,
        shape: usize,
    },

    /// Result spec is longer than both input specs together.
    #[cfg_attr(feature = "std", error("result spec has {result} entries, inputs only provide {available}"))]
    ResultSpecTooLong { result: usize, available: usize },

    /// Two occurrences of one shared label disagree on extent.
    #[cfg_attr(feature = "std", error("label {label} bound to extent {expected}, operand {operand} uses {got}"))]
    LabelConflict {
        label: u64,
        operand: Operand,
        expected: usize,
        got: usize,
    },

    /// A literal offset does not address an element of its dimension.
    #[cfg_attr(feature = "std", error("operand {operand}: literal {offset} out of range for axis {axis} of extent {extent}"))]
    LiteralOutOfRange {
        operand: Operand,
        axis: usize,
        offset: usize,
        extent: usize,
    },

    /// Index arithmetic exceeded `usize`.
    #[cfg_attr(feature = "std", error("overflow while computing {what}"))]
    Overflow { what: &'static str },

    /// Invalid einsum notation syntax.
    #[cfg_attr(feature = "std", error("parse error: {message}"))]
    ParseError { message: String },

    /// Index appears in output but not in any input.
    #[cfg_attr(feature = "std", error("output index '{index}' not found in any input"))]
    OutputIndexNotInInputs { index: char },
}

impl EinsteinError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    pub fn overflow(what: &'static str) -> Self {
        Self::Overflow { what }
    }

    /// Returns true for errors caused by inconsistent shapes or storage.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::NotDense { .. }
                | Self::NotVector { .. }
                | Self::ElementCount { .. }
                | Self::LiteralOutOfRange { .. }
        )
    }

    /// Returns true for spec/shape rank errors.
    pub fn is_spec_length_error(&self) -> bool {
        matches!(self, Self::SpecLength { .. } | Self::ResultSpecTooLong { .. })
    }
}

/// Result type for Einstein contraction planning.
pub type EinsteinResult<T> = core::result::Result<T, EinsteinError>;
