//! Inline assembly template analysis.
//!
//! A GCC-style template such as `"mov %1, %0"` is scanned once into
//! pieces: literal text (already escaped for the backend) and operand
//! references. Malformed templates are user errors and come back as
//! `AsmStringError` with the byte offset of the fault; the diagnostic
//! crate turns those into rendered messages.

mod template;

pub use template::{analyze_template, assemble_pieces, escape_simple_template};

use std::fmt;

/// Target facts the scanner depends on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct AsmTargetInfo {
    /// The assembler has dialect variants, so `{`, `|` and `}` in a
    /// template select between them.
    pub has_asm_variants: bool,
}

impl AsmTargetInfo {
    pub const fn new(has_asm_variants: bool) -> Self {
        AsmTargetInfo { has_asm_variants }
    }
}

impl Default for AsmTargetInfo {
    /// Targets with assembler dialect variants (x86 AT&T/Intel).
    fn default() -> Self {
        Self::new(true)
    }
}

/// One piece of an analyzed template.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum AsmStringPiece {
    /// Literal text, with `$` and variant characters already escaped.
    String(String),
    /// Reference to operand `operand_no`, optionally with a modifier
    /// letter (`%x1` has modifier `x`).
    Operand { operand_no: u32, modifier: Option<char> },
}

impl AsmStringPiece {
    pub fn is_string(&self) -> bool {
        matches!(self, AsmStringPiece::String(_))
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, AsmStringPiece::Operand { .. })
    }
}

/// Operand table consulted while scanning a template.
pub trait OperandResolver {
    /// Outputs, plus-constrained outputs and inputs together; numeric
    /// references must be below this.
    fn num_operands(&self) -> u32;

    /// Operand number of a symbolic name (`%[name]`).
    fn named_operand(&self, name: &str) -> Option<u32>;
}

/// What is wrong with a template.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum AsmStringErrorKind {
    #[error("invalid % escape in inline assembly string")]
    InvalidEscape,
    #[error("% escape at end of inline assembly string")]
    EscapeAtEnd,
    #[error("unterminated symbolic operand name in inline assembly string")]
    UnterminatedSymbolicName,
    #[error("empty symbolic operand name in inline assembly string")]
    EmptySymbolicName,
    #[error("unknown symbolic operand name in inline assembly string")]
    UnknownSymbolicName,
    #[error("invalid operand number in inline assembly string")]
    InvalidOperandNumber,
}

/// A template fault and the byte offset it was found at.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("{kind} (at byte {offset})")]
pub struct AsmStringError {
    pub kind: AsmStringErrorKind,
    pub offset: usize,
}

impl AsmStringError {
    pub const fn new(kind: AsmStringErrorKind, offset: usize) -> Self {
        AsmStringError { kind, offset }
    }
}

impl fmt::Display for AsmStringPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmStringPiece::String(text) => f.write_str(text),
            AsmStringPiece::Operand {
                operand_no,
                modifier: None,
            } => write!(f, "${operand_no}"),
            AsmStringPiece::Operand {
                operand_no,
                modifier: Some(modifier),
            } => write!(f, "${{{operand_no}:{modifier}}}"),
        }
    }
}

#[cfg(test)]
mod tests;
