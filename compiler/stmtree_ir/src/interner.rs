//! String interner for identifiers, labels and asm operand names.
//!
//! The statement core is single-threaded per compilation unit, so the
//! interner uses interior mutability instead of locks.

use super::Name;
use rustc_hash::FxHashMap;
use std::cell::RefCell;

struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, Name>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

/// String interner with O(1) interning and lookup.
pub struct StringInterner {
    table: RefCell<InternTable>,
}

impl StringInterner {
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, Name::EMPTY);
        StringInterner {
            table: RefCell::new(InternTable {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        let mut table = self.table.borrow_mut();
        if let Some(&name) = table.map.get(s) {
            return name;
        }

        let index = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("string interner exceeded u32::MAX entries"));
        let name = Name::from_index(index);
        // Interned strings live for the whole compilation.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        name
    }

    /// Look up an already-interned string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.borrow().map.get(s).copied()
    }

    /// Look up the string for a `Name`.
    ///
    /// # Panics
    /// Panics if `name` was produced by a different interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        let table = self.table.borrow();
        match table.strings.get(name.index()) {
            Some(s) => s,
            None => panic!("{name:?} was not produced by this interner"),
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        // The empty string is always interned.
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only access to interned strings.
///
/// Consumers that only resolve names (asm operand matching, diagnostics)
/// take `&dyn StringLookup` so they can run against any interner.
pub trait StringLookup {
    /// Look up the string for a `Name`.
    fn lookup(&self, name: Name) -> &str;

    /// Find the `Name` of a string if it has been interned.
    fn find(&self, s: &str) -> Option<Name>;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }

    fn find(&self, s: &str) -> Option<Name> {
        self.get(s)
    }
}

#[cfg(test)]
mod tests;
