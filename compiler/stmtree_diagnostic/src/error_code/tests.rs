use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E7001.to_string(), "E7001");
    assert_eq!(ErrorCode::E9001.as_str(), "E9001");
}

#[test]
fn test_error_code_from_str() {
    for &code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
    }
    assert_eq!("e7004".parse::<ErrorCode>(), Ok(ErrorCode::E7004));
    assert_eq!("E1234".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_every_asm_fault_has_its_own_code() {
    let kinds = [
        AsmStringErrorKind::EscapeAtEnd,
        AsmStringErrorKind::UnterminatedSymbolicName,
        AsmStringErrorKind::EmptySymbolicName,
        AsmStringErrorKind::UnknownSymbolicName,
        AsmStringErrorKind::InvalidOperandNumber,
        AsmStringErrorKind::InvalidEscape,
    ];
    let codes: HashSet<ErrorCode> = kinds.iter().map(|&k| ErrorCode::from(k)).collect();
    assert!(codes.iter().all(ErrorCode::is_asm_error));
    assert_eq!(codes.len(), kinds.len());
}
