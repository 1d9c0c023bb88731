use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();
    let a = interner.intern("hello");
    let b = interner.intern("world");
    let c = interner.intern("hello");

    assert_eq!(a, c);
    assert_ne!(a, b);
    assert_eq!(interner.lookup(a), "hello");
    assert_eq!(interner.lookup(b), "world");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
    assert_eq!(interner.len(), 1);
}

#[test]
fn test_find_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.find("input"), None);
    let name = interner.intern("input");
    assert_eq!(interner.find("input"), Some(name));
    assert_eq!(interner.len(), 2);
}

#[test]
fn test_lookup_through_trait() {
    fn resolve(lookup: &dyn StringLookup, name: Name) -> String {
        lookup.lookup(name).to_owned()
    }

    let interner = StringInterner::new();
    let name = interner.intern("label");
    assert_eq!(resolve(&interner, name), "label");
}
