//! Fixed-arity trailing storage.
//!
//! Variable-length nodes (compound bodies, try handlers, clause variable
//! lists, directive helper slots) keep their sub-node arrays in one
//! allocation that is sized exactly once. The node records how long each
//! section is; the start of a section is always derived from the lengths
//! of the sections before it, never stored.
//!
//! Nodes built for deserialization start with every slot set to the
//! element type's `Default` (the `INVALID` sentinel for ids) and are then
//! filled section by section. Filling a section with the wrong number of
//! elements is a logic fault and panics.

use smallvec::SmallVec;
use std::fmt;
use std::mem::{align_of, size_of};

/// Size and alignment of one trailing array.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ArrayLayout {
    pub count: usize,
    pub elem_size: usize,
    pub elem_align: usize,
}

impl ArrayLayout {
    /// Layout of `count` elements of `T`.
    #[inline]
    pub const fn of<T>(count: usize) -> Self {
        ArrayLayout {
            count,
            elem_size: size_of::<T>(),
            elem_align: align_of::<T>(),
        }
    }

    #[inline]
    pub const fn bytes(self) -> usize {
        self.count * self.elem_size
    }
}

/// Trailing arrays of one node, in storage order.
pub type TrailingArrays = SmallVec<[ArrayLayout; 4]>;

/// Round `offset` up to the next multiple of `align` (a power of two).
#[inline]
pub const fn align_to(offset: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (offset + align - 1) & !(align - 1)
}

/// Bytes needed for a node header followed by its trailing arrays.
///
/// Padding is inserted before an array whenever the previous region does
/// not end on that array's element alignment. Empty arrays take no space
/// and need no padding.
pub fn allocation_size(header_size: usize, arrays: &[ArrayLayout]) -> usize {
    arrays
        .iter()
        .filter(|array| array.count != 0)
        .fold(header_size, |size, array| {
            align_to(size, array.elem_align) + array.bytes()
        })
}

/// One allocation holding consecutive sections of `T`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Trailing<T> {
    slots: Box<[T]>,
    lens: SmallVec<[u32; 4]>,
}

impl<T: Copy + Default> Trailing<T> {
    /// Allocate sections with the given lengths, every slot defaulted.
    pub fn with_sections(lens: &[usize]) -> Self {
        let total: usize = lens.iter().sum();
        Trailing {
            slots: vec![T::default(); total].into_boxed_slice(),
            lens: lens.iter().map(|&len| to_u32(len)).collect(),
        }
    }

    /// Allocate `sections` sections of `len` slots each.
    pub fn uniform(sections: usize, len: usize) -> Self {
        let lens: SmallVec<[usize; 8]> = std::iter::repeat(len).take(sections).collect();
        Self::with_sections(&lens)
    }

    /// Allocate a single section holding a copy of `values`.
    pub fn from_slice(values: &[T]) -> Self {
        Trailing {
            slots: values.into(),
            lens: std::iter::once(to_u32(values.len())).collect(),
        }
    }

    #[inline]
    pub fn num_sections(&self) -> usize {
        self.lens.len()
    }

    /// Number of slots in a section.
    #[track_caller]
    #[inline]
    pub fn section_len(&self, section: usize) -> usize {
        self.lens[section] as usize
    }

    fn section_start(&self, section: usize) -> usize {
        self.lens[..section].iter().map(|&len| len as usize).sum()
    }

    #[track_caller]
    pub fn section(&self, section: usize) -> &[T] {
        let start = self.section_start(section);
        &self.slots[start..start + self.section_len(section)]
    }

    #[track_caller]
    pub fn section_mut(&mut self, section: usize) -> &mut [T] {
        let start = self.section_start(section);
        let len = self.section_len(section);
        &mut self.slots[start..start + len]
    }

    /// Overwrite a whole section.
    ///
    /// # Panics
    /// Panics if `values` does not have exactly the preallocated length.
    #[track_caller]
    pub fn set_section(&mut self, section: usize, values: &[T]) {
        let len = self.section_len(section);
        assert_eq!(
            values.len(),
            len,
            "number of elements is not the same as the preallocated buffer (section {section})"
        );
        self.section_mut(section).copy_from_slice(values);
    }

    /// All slots of all sections in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    #[inline]
    pub fn total_len(&self) -> usize {
        self.slots.len()
    }

    /// Layouts of every section, for size accounting.
    pub fn array_layouts(&self) -> TrailingArrays {
        self.lens
            .iter()
            .map(|&len| ArrayLayout::of::<T>(len as usize))
            .collect()
    }
}

impl<T: fmt::Debug + Copy + Default> fmt::Debug for Trailing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for section in 0..self.num_sections() {
            list.entry(&self.section(section));
        }
        list.finish()
    }
}

#[track_caller]
fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("trailing section of {len} elements exceeds u32::MAX"))
}
