use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Operand table with positional names: outputs first, then inputs.
struct Operands {
    names: Vec<&'static str>,
    extra: u32,
}

impl Operands {
    fn numbered(count: u32) -> Self {
        Operands {
            names: (0..count).map(|_| "").collect(),
            extra: 0,
        }
    }

    fn named(names: &[&'static str]) -> Self {
        Operands {
            names: names.to_vec(),
            extra: 0,
        }
    }
}

impl OperandResolver for Operands {
    fn num_operands(&self) -> u32 {
        u32::try_from(self.names.len()).unwrap_or(u32::MAX) + self.extra
    }

    fn named_operand(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|n| !n.is_empty() && *n == name)
            .and_then(|i| u32::try_from(i).ok())
    }
}

fn text(s: &str) -> AsmStringPiece {
    AsmStringPiece::String(s.to_owned())
}

fn operand(operand_no: u32) -> AsmStringPiece {
    AsmStringPiece::Operand {
        operand_no,
        modifier: None,
    }
}

fn analyze(template: &str, operands: &Operands) -> Result<Vec<AsmStringPiece>, AsmStringError> {
    analyze_template(template, operands, &AsmTargetInfo::new(true))
}

fn fault(template: &str, operands: &Operands) -> AsmStringError {
    match analyze(template, operands) {
        Ok(pieces) => panic!("{template:?} should not scan, got {pieces:?}"),
        Err(err) => err,
    }
}

#[test]
fn test_operands_and_escaped_percent() {
    let Ok(pieces) = analyze("%0 is %%1 not %1", &Operands::numbered(2)) else {
        panic!("template is valid");
    };
    assert_eq!(pieces, vec![operand(0), text(" is %1 not "), operand(1)]);
}

#[test]
fn test_modifier_letter() {
    let Ok(pieces) = analyze("mov %k1, %0", &Operands::numbered(2)) else {
        panic!("template is valid");
    };
    assert_eq!(
        pieces,
        vec![
            text("mov "),
            AsmStringPiece::Operand {
                operand_no: 1,
                modifier: Some('k'),
            },
            text(", "),
            operand(0),
        ]
    );
}

#[test]
fn test_multi_digit_operand() {
    let Ok(pieces) = analyze("%12", &Operands::numbered(13)) else {
        panic!("template is valid");
    };
    assert_eq!(pieces, vec![operand(12)]);
}

#[test]
fn test_symbolic_operand() {
    let operands = Operands::named(&["result", "input"]);
    let Ok(pieces) = analyze("add %[input], %w[result]", &operands) else {
        panic!("template is valid");
    };
    assert_eq!(
        pieces,
        vec![
            text("add "),
            operand(1),
            text(", "),
            AsmStringPiece::Operand {
                operand_no: 0,
                modifier: Some('w'),
            },
        ]
    );
}

#[test]
fn test_dollar_and_variants_escaped() {
    let Ok(pieces) = analyze("movl ${0|1}, %%eax", &Operands::numbered(0)) else {
        panic!("template is valid");
    };
    assert_eq!(pieces, vec![text("movl $$$(0$|1$), %eax")]);
}

#[test]
fn test_variants_literal_without_target_support() {
    let target = AsmTargetInfo::new(false);
    let Ok(pieces) = analyze_template("{a|b}", &Operands::numbered(0), &target) else {
        panic!("template is valid");
    };
    assert_eq!(pieces, vec![text("{a|b}")]);
}

#[test]
fn test_unique_id_escape() {
    let Ok(pieces) = analyze("label%=:", &Operands::numbered(0)) else {
        panic!("template is valid");
    };
    assert_eq!(pieces, vec![text("label${:uid}:")]);
}

#[test]
fn test_empty_template_has_no_pieces() {
    assert_eq!(analyze("", &Operands::numbered(0)), Ok(vec![]));
}

#[test]
fn test_escape_at_end() {
    let err = fault("nop %", &Operands::numbered(1));
    assert_eq!(err, AsmStringError::new(AsmStringErrorKind::EscapeAtEnd, 4));
}

#[test]
fn test_modifier_at_end() {
    let err = fault("nop %k", &Operands::numbered(1));
    assert_eq!(err, AsmStringError::new(AsmStringErrorKind::EscapeAtEnd, 5));
}

#[test]
fn test_operand_out_of_range_points_at_last_digit() {
    let err = fault("mov %10, %0", &Operands::numbered(2));
    assert_eq!(
        err,
        AsmStringError::new(AsmStringErrorKind::InvalidOperandNumber, 6)
    );
}

#[test]
fn test_plus_operands_extend_the_range() {
    let mut operands = Operands::numbered(2);
    assert!(analyze("%2", &operands).is_err());
    operands.extra = 1;
    assert_eq!(analyze("%2", &operands), Ok(vec![operand(2)]));
}

#[test]
fn test_unterminated_symbolic_name() {
    let err = fault("mov %[out", &Operands::named(&["out"]));
    assert_eq!(
        err,
        AsmStringError::new(AsmStringErrorKind::UnterminatedSymbolicName, 5)
    );
}

#[test]
fn test_empty_symbolic_name() {
    let err = fault("mov %[]", &Operands::named(&["out"]));
    assert_eq!(
        err,
        AsmStringError::new(AsmStringErrorKind::EmptySymbolicName, 5)
    );
}

#[test]
fn test_unknown_symbolic_name_points_at_bracket() {
    let err = fault("mov %[nope], %0", &Operands::named(&["out"]));
    assert_eq!(
        err,
        AsmStringError::new(AsmStringErrorKind::UnknownSymbolicName, 5)
    );
}

#[test]
fn test_invalid_escape_character() {
    let err = fault("mov %!", &Operands::numbered(1));
    assert_eq!(err, AsmStringError::new(AsmStringErrorKind::InvalidEscape, 5));

    let err = fault("mov %k!", &Operands::numbered(1));
    assert_eq!(err, AsmStringError::new(AsmStringErrorKind::InvalidEscape, 6));
}

#[test]
fn test_error_display() {
    let err = AsmStringError::new(AsmStringErrorKind::EmptySymbolicName, 3);
    assert_eq!(
        err.to_string(),
        "empty symbolic operand name in inline assembly string (at byte 3)"
    );
}

#[test]
fn test_simple_template_doubles_dollars() {
    assert_eq!(escape_simple_template("int $0x80 %eax"), text("int $$0x80 %eax"));
}

#[test]
fn test_assemble_positional_references() {
    let pieces = vec![
        text("mov "),
        operand(1),
        text(", "),
        AsmStringPiece::Operand {
            operand_no: 0,
            modifier: Some('w'),
        },
    ];
    assert_eq!(assemble_pieces(&pieces), "mov $1, ${0:w}");
}

#[test]
fn test_non_ascii_text_survives() {
    let Ok(pieces) = analyze("# ünïcode %0", &Operands::numbered(1)) else {
        panic!("template is valid");
    };
    assert_eq!(pieces, vec![text("# ünïcode "), operand(0)]);
}

proptest! {
    #[test]
    fn templates_without_specials_are_one_piece(s in "[a-zA-Z0-9 ,.\\t]{1,40}") {
        let Ok(pieces) = analyze(&s, &Operands::numbered(0)) else {
            panic!("plain text always scans");
        };
        prop_assert_eq!(pieces, vec![text(&s)]);
    }

    #[test]
    fn escaped_percent_is_literal(s in "[a-z ]{0,20}") {
        let template = format!("{s}%%{s}");
        let Ok(pieces) = analyze(&template, &Operands::numbered(0)) else {
            panic!("escaped percent always scans");
        };
        prop_assert_eq!(assemble_pieces(&pieces), format!("{s}%{s}"));
    }

    #[test]
    fn scanner_never_panics(s in "\\PC{0,30}") {
        let _ = analyze(&s, &Operands::named(&["a", "b"]));
    }
}
