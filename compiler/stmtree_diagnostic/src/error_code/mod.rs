//! Error codes for statement diagnostics.
//!
//! Each code is a unique identifier (e.g. `E7001`) with the first digit
//! indicating the area.

use std::fmt;

use stmtree_ir::asm::AsmStringErrorKind;

/// Error codes for statement diagnostics.
///
/// Format: E#### where first digit indicates area:
/// - E7xxx: Inline assembly template errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Inline assembly (E7xxx)
    /// `%` at the end of an assembly template
    E7001,
    /// Unterminated `%[name]` operand reference
    E7002,
    /// Empty `%[]` operand reference
    E7003,
    /// `%[name]` names no operand
    E7004,
    /// Operand number out of range
    E7005,
    /// Unknown character after `%`
    E7006,

    // Internal (E9xxx)
    /// Internal invariant violated
    E9001,
}

impl ErrorCode {
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E7001,
        ErrorCode::E7002,
        ErrorCode::E7003,
        ErrorCode::E7004,
        ErrorCode::E7005,
        ErrorCode::E7006,
        ErrorCode::E9001,
    ];

    /// Get the string representation (e.g. "E7001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E7001 => "E7001",
            ErrorCode::E7002 => "E7002",
            ErrorCode::E7003 => "E7003",
            ErrorCode::E7004 => "E7004",
            ErrorCode::E7005 => "E7005",
            ErrorCode::E7006 => "E7006",
            ErrorCode::E9001 => "E9001",
        }
    }

    pub fn is_asm_error(&self) -> bool {
        !matches!(self, ErrorCode::E9001)
    }
}

impl From<AsmStringErrorKind> for ErrorCode {
    fn from(kind: AsmStringErrorKind) -> Self {
        match kind {
            AsmStringErrorKind::EscapeAtEnd => ErrorCode::E7001,
            AsmStringErrorKind::UnterminatedSymbolicName => ErrorCode::E7002,
            AsmStringErrorKind::EmptySymbolicName => ErrorCode::E7003,
            AsmStringErrorKind::UnknownSymbolicName => ErrorCode::E7004,
            AsmStringErrorKind::InvalidOperandNumber => ErrorCode::E7005,
            AsmStringErrorKind::InvalidEscape => ErrorCode::E7006,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E7001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
