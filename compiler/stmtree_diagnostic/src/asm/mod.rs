//! Inline assembly template diagnostics.

use stmtree_ir::asm::{AsmStringError, AsmStringErrorKind};
use stmtree_ir::{SourceLocation, SourceRange};

use crate::{Diagnostic, ErrorCode};

/// Location of a template fault.
///
/// `string_loc` is the opening quote of the template literal, so the byte
/// at `offset` sits one past it.
pub fn asm_string_fault_location(string_loc: SourceLocation, offset: usize) -> SourceLocation {
    let delta = u32::try_from(offset.saturating_add(1)).unwrap_or(u32::MAX);
    string_loc.with_offset(delta)
}

/// Diagnostic for a template rejected by the scanner.
#[cold]
pub fn asm_string_diagnostic(err: &AsmStringError, string_loc: SourceLocation) -> Diagnostic {
    let loc = asm_string_fault_location(string_loc, err.offset);
    let diag = Diagnostic::error(ErrorCode::from(err.kind))
        .with_message(err.kind.to_string())
        .with_label(SourceRange::point(loc), label_for(err.kind));

    match err.kind {
        AsmStringErrorKind::EscapeAtEnd | AsmStringErrorKind::InvalidEscape => {
            diag.with_suggestion("write `%%` for a literal `%`")
        }
        AsmStringErrorKind::UnterminatedSymbolicName => {
            diag.with_suggestion("close the operand name with `]`")
        }
        AsmStringErrorKind::InvalidOperandNumber => {
            diag.with_note("operands are numbered from 0: outputs, then read-write outputs, then inputs")
        }
        AsmStringErrorKind::EmptySymbolicName | AsmStringErrorKind::UnknownSymbolicName => diag,
    }
}

fn label_for(kind: AsmStringErrorKind) -> &'static str {
    match kind {
        AsmStringErrorKind::EscapeAtEnd => "template ends after `%`",
        AsmStringErrorKind::InvalidEscape => "not a valid escape",
        AsmStringErrorKind::UnterminatedSymbolicName => "operand name starts here",
        AsmStringErrorKind::EmptySymbolicName => "empty operand name",
        AsmStringErrorKind::UnknownSymbolicName => "no operand with this name",
        AsmStringErrorKind::InvalidOperandNumber => "operand number out of range",
    }
}
