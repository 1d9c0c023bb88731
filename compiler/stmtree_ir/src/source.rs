//! Source locations and ranges.
//!
//! A `SourceLocation` is an opaque 32-bit position token. The statement core
//! only stores, copies and compares them; mapping a location back to a file
//! and line is the job of the source manager.

use std::fmt;

/// Error when creating a location from an offset that exceeds `u32::MAX - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The offset does not fit in a location (the top value is reserved).
    OffsetTooLarge(usize),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::OffsetTooLarge(v) => write!(
                f,
                "source offset {} (0x{:X}) exceeds the largest location (0x{:X})",
                v,
                v,
                u32::MAX - 1
            ),
        }
    }
}

impl std::error::Error for LocationError {}

/// Opaque source position.
///
/// Layout: 4 bytes, `u32::MAX` is the invalid sentinel.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct SourceLocation(u32);

impl SourceLocation {
    /// Location of nothing. Default for created-empty nodes.
    pub const INVALID: SourceLocation = SourceLocation(u32::MAX);

    /// Create a location from a raw offset.
    #[inline]
    pub const fn new(offset: u32) -> Self {
        SourceLocation(offset)
    }

    /// Try to create a location from a byte offset.
    #[inline]
    pub fn try_from_offset(offset: usize) -> Result<Self, LocationError> {
        match u32::try_from(offset) {
            Ok(raw) if raw != u32::MAX => Ok(SourceLocation(raw)),
            _ => Err(LocationError::OffsetTooLarge(offset)),
        }
    }

    /// Raw offset value.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Location `delta` bytes further into the same buffer.
    ///
    /// Invalid locations stay invalid.
    #[inline]
    #[must_use]
    pub fn with_offset(self, delta: u32) -> Self {
        if !self.is_valid() {
            return self;
        }
        SourceLocation(self.0.saturating_add(delta).min(u32::MAX - 1))
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Loc({})", self.0)
        } else {
            write!(f, "Loc::INVALID")
        }
    }
}

/// Inclusive pair of locations: first and last token of a construct.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourceRange {
    pub begin: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    /// Range covering nothing.
    pub const INVALID: SourceRange = SourceRange {
        begin: SourceLocation::INVALID,
        end: SourceLocation::INVALID,
    };

    #[inline]
    pub const fn new(begin: SourceLocation, end: SourceLocation) -> Self {
        SourceRange { begin, end }
    }

    /// Range of a single token.
    #[inline]
    pub const fn point(loc: SourceLocation) -> Self {
        SourceRange {
            begin: loc,
            end: loc,
        }
    }

    /// Both endpoints are valid.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.begin.is_valid() && self.end.is_valid()
    }

    /// Check if a location falls within this range (inclusive).
    #[inline]
    pub fn contains(self, loc: SourceLocation) -> bool {
        self.is_valid() && loc.is_valid() && self.begin <= loc && loc <= self.end
    }

    /// Check if another range is fully contained within this range.
    #[inline]
    pub fn contains_range(self, other: SourceRange) -> bool {
        self.contains(other.begin) && self.contains(other.end)
    }
}

impl fmt::Debug for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.begin, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{SourceLocation, SourceRange};
    crate::static_assert_size!(SourceLocation, 4);
    crate::static_assert_size!(SourceRange, 8);
}

#[cfg(test)]
mod tests;
