//! Single-pass template scanner.

use super::{AsmStringError, AsmStringErrorKind, AsmStringPiece, AsmTargetInfo, OperandResolver};

/// Bytes that end a literal run.
fn is_special(byte: u8) -> bool {
    matches!(byte, b'$' | b'{' | b'|' | b'}' | b'%')
}

/// Escape a template that has no operands: only `$` needs doubling.
pub fn escape_simple_template(template: &str) -> AsmStringPiece {
    AsmStringPiece::String(template.replace('$', "$$"))
}

/// Split a template into literal and operand pieces.
///
/// Fault offsets point at the offending byte: the `%` of a trailing
/// escape, the last digit of an out-of-range operand number, the `[` of
/// a bad symbolic name, or the character after `%` for anything else.
#[tracing::instrument(level = "trace", skip_all, fields(len = template.len()))]
pub fn analyze_template(
    template: &str,
    operands: &dyn OperandResolver,
    target: &AsmTargetInfo,
) -> Result<Vec<AsmStringPiece>, AsmStringError> {
    use AsmStringErrorKind::{
        EmptySymbolicName, EscapeAtEnd, InvalidEscape, InvalidOperandNumber,
        UnknownSymbolicName, UnterminatedSymbolicName,
    };

    let bytes = template.as_bytes();
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut pos = 0;

    loop {
        let run_end = bytes[pos..]
            .iter()
            .position(|&b| is_special(b))
            .map_or(bytes.len(), |i| pos + i);
        current.push_str(&template[pos..run_end]);
        pos = run_end;

        let Some(&special) = bytes.get(pos) else {
            if !current.is_empty() {
                pieces.push(AsmStringPiece::String(current));
            }
            tracing::trace!(pieces = pieces.len(), "analyzed asm template");
            return Ok(pieces);
        };
        pos += 1;

        let variants = target.has_asm_variants;
        match special {
            b'$' => {
                current.push_str("$$");
                continue;
            }
            b'{' => {
                current.push_str(if variants { "$(" } else { "{" });
                continue;
            }
            b'|' => {
                current.push_str(if variants { "$|" } else { "|" });
                continue;
            }
            b'}' => {
                current.push_str(if variants { "$)" } else { "}" });
                continue;
            }
            _ => {}
        }

        // `%` escape.
        let Some(&first) = bytes.get(pos) else {
            return Err(AsmStringError::new(EscapeAtEnd, pos - 1));
        };
        pos += 1;
        match first {
            b'%' => {
                current.push('%');
                continue;
            }
            b'=' => {
                current.push_str("${:uid}");
                continue;
            }
            _ => {}
        }

        // An operand follows; flush the text gathered so far.
        if !current.is_empty() {
            pieces.push(AsmStringPiece::String(std::mem::take(&mut current)));
        }

        let mut escaped = first;
        let mut modifier = None;
        if escaped.is_ascii_alphabetic() {
            let Some(&next) = bytes.get(pos) else {
                return Err(AsmStringError::new(EscapeAtEnd, pos - 1));
            };
            modifier = Some(char::from(escaped));
            escaped = next;
            pos += 1;
        }

        if escaped.is_ascii_digit() {
            pos -= 1;
            let mut operand_no: u32 = 0;
            while let Some(&digit) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
                operand_no = operand_no
                    .saturating_mul(10)
                    .saturating_add(u32::from(digit - b'0'));
                pos += 1;
            }
            if operand_no >= operands.num_operands() {
                return Err(AsmStringError::new(InvalidOperandNumber, pos - 1));
            }
            pieces.push(AsmStringPiece::Operand {
                operand_no,
                modifier,
            });
            continue;
        }

        if escaped == b'[' {
            let bracket = pos - 1;
            let Some(len) = memchr::memchr(b']', &bytes[pos..]) else {
                return Err(AsmStringError::new(UnterminatedSymbolicName, bracket));
            };
            if len == 0 {
                return Err(AsmStringError::new(EmptySymbolicName, bracket));
            }
            let name = &template[pos..pos + len];
            let Some(operand_no) = operands.named_operand(name) else {
                return Err(AsmStringError::new(UnknownSymbolicName, bracket));
            };
            pieces.push(AsmStringPiece::Operand {
                operand_no,
                modifier,
            });
            pos += len + 1;
            continue;
        }

        return Err(AsmStringError::new(InvalidEscape, pos - 1));
    }
}

/// Render analyzed pieces in the backend's positional syntax: `$N`, or
/// `${N:m}` with a modifier.
pub fn assemble_pieces(pieces: &[AsmStringPiece]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for piece in pieces {
        // Writing to a String cannot fail.
        let _ = write!(out, "{piece}");
    }
    out
}
