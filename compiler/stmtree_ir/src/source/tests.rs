use super::*;

#[test]
fn test_location_default_is_invalid() {
    let loc = SourceLocation::default();
    assert!(!loc.is_valid());
    assert_eq!(loc, SourceLocation::INVALID);
    assert_eq!(format!("{loc:?}"), "Loc::INVALID");
}

#[test]
fn test_location_try_from_offset() {
    let Ok(loc) = SourceLocation::try_from_offset(42) else {
        panic!("42 fits in a location");
    };
    assert_eq!(loc.offset(), 42);
    assert_eq!(format!("{loc:?}"), "Loc(42)");
}

#[test]
fn test_location_rejects_sentinel_offset() {
    let result = SourceLocation::try_from_offset(u32::MAX as usize);
    assert_eq!(result, Err(LocationError::OffsetTooLarge(u32::MAX as usize)));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_location_rejects_huge_offset() {
    let huge = u32::MAX as usize + 10;
    let Err(err) = SourceLocation::try_from_offset(huge) else {
        panic!("offset past u32 must be rejected");
    };
    assert!(err.to_string().contains("exceeds the largest location"));
}

#[test]
fn test_location_with_offset() {
    assert_eq!(SourceLocation::new(10).with_offset(5), SourceLocation::new(15));
    assert_eq!(
        SourceLocation::INVALID.with_offset(5),
        SourceLocation::INVALID
    );
    assert!(SourceLocation::new(u32::MAX - 3).with_offset(100).is_valid());
}

#[test]
fn test_range_contains() {
    let range = SourceRange::new(SourceLocation::new(10), SourceLocation::new(20));
    assert!(range.contains(SourceLocation::new(10)));
    assert!(range.contains(SourceLocation::new(20)));
    assert!(!range.contains(SourceLocation::new(21)));
    assert!(!range.contains(SourceLocation::INVALID));
    assert!(range.contains_range(SourceRange::point(SourceLocation::new(15))));
}

#[test]
fn test_range_validity() {
    assert!(!SourceRange::INVALID.is_valid());
    assert!(!SourceRange::new(SourceLocation::new(1), SourceLocation::INVALID).is_valid());
    assert!(SourceRange::point(SourceLocation::new(3)).is_valid());
    assert_eq!(
        format!("{:?}", SourceRange::point(SourceLocation::new(3))),
        "Loc(3)..Loc(3)"
    );
}
