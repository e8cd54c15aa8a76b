//! Bit-field packing for compact applet state.
//!
//! Each applet stores its parameters in one 32- or 64-bit word.  Two levels
//! are provided:
//!
//! - [`pack`] / [`unpack`]: raw primitives over a [`PackLocation`].  `pack`
//!   ORs the value in **without masking**: a value wider than its field
//!   spills into the neighbouring bits.  `unpack` masks to the field width.
//! - [`PackSchema`]: an ordered list of [`PackField`]s.  Offsets are
//!   derived from declaration order, signed fields are stored biased by
//!   `2^(width-1)`, and every value is masked to its field on write.
//!
//! Declaring a layout as a `const` turns an oversize layout into a build
//! error:
//!
//! ```
//! use hemisphere::pack::{PackField, PackSchema};
//!
//! const LAYOUT: PackSchema<2> = PackSchema::new(
//!     [PackField::unsigned("length", 6), PackField::signed("transpose", 7)],
//!     32,
//! );
//! assert_eq!(LAYOUT.total_bits(), 13);
//! ```

use crate::error::PackError;

/// Where a field lives inside a storage word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackLocation {
    /// Bit offset of the least significant bit.
    pub offset: u32,
    /// Field width in bits.
    pub width: u32,
}

impl PackLocation {
    pub const fn new(offset: u32, width: u32) -> Self {
        Self { offset, width }
    }
}

/// Integer words that can hold packed fields.
pub trait PackWord: Copy {
    const BITS: u32;
    fn to_bits(self) -> u64;
    /// Truncates to the word width.
    fn from_bits(bits: u64) -> Self;
}

impl PackWord for u32 {
    const BITS: u32 = 32;

    fn to_bits(self) -> u64 {
        self as u64
    }

    fn from_bits(bits: u64) -> Self {
        bits as u32
    }
}

impl PackWord for u64 {
    const BITS: u32 = 64;

    fn to_bits(self) -> u64 {
        self
    }

    fn from_bits(bits: u64) -> Self {
        bits
    }
}

/// A mask of exactly `width` low bits.
pub const fn field_mask(width: u32) -> u64 {
    if width >= 64 { u64::MAX } else { (1u64 << width) - 1 }
}

/// OR `value << offset` into `data`.  The caller must pre-mask `value`.
pub fn pack<W: PackWord>(data: &mut W, loc: PackLocation, value: u64) {
    let shifted = value.checked_shl(loc.offset).unwrap_or(0);
    *data = W::from_bits(data.to_bits() | shifted);
}

/// Extract the field at `loc` as a non-negative integer.
pub fn unpack<W: PackWord>(data: W, loc: PackLocation) -> u64 {
    data.to_bits().checked_shr(loc.offset).unwrap_or(0) & field_mask(loc.width)
}

/// One named field of a packed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackField {
    pub name: &'static str,
    pub width: u32,
    pub signed: bool,
}

impl PackField {
    pub const fn unsigned(name: &'static str, width: u32) -> Self {
        Self {
            name,
            width,
            signed: false,
        }
    }

    /// A two's-range field stored biased by `2^(width-1)`.
    pub const fn signed(name: &'static str, width: u32) -> Self {
        Self {
            name,
            width,
            signed: true,
        }
    }

    const fn bias(&self) -> i64 {
        if self.signed && self.width > 0 {
            1i64 << (self.width - 1)
        } else {
            0
        }
    }

    /// Smallest storable value.
    pub const fn min(&self) -> i64 {
        -self.bias()
    }

    /// Largest storable value.
    pub const fn max(&self) -> i64 {
        field_mask(self.width) as i64 - self.bias()
    }
}

/// An ordered, width-checked field layout over a storage word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSchema<const N: usize> {
    fields: [PackField; N],
    storage_bits: u32,
}

const fn sum_widths(fields: &[PackField]) -> u32 {
    let mut bits = 0;
    let mut i = 0;
    while i < fields.len() {
        bits += fields[i].width;
        i += 1;
    }
    bits
}

const fn any_empty(fields: &[PackField]) -> bool {
    let mut i = 0;
    while i < fields.len() {
        if fields[i].width == 0 {
            return true;
        }
        i += 1;
    }
    false
}

impl<const N: usize> PackSchema<N> {
    /// Build a layout, panicking if it does not fit.  In a `const` item the
    /// panic is a compile error:
    ///
    /// ```compile_fail
    /// use hemisphere::pack::{PackField, PackSchema};
    ///
    /// const LAYOUT: PackSchema<2> = PackSchema::new(
    ///     [PackField::unsigned("a", 20), PackField::signed("b", 20)],
    ///     32,
    /// );
    ///
    /// assert_eq!(LAYOUT.total_bits(), 40);
    /// ```
    pub const fn new(fields: [PackField; N], storage_bits: u32) -> Self {
        assert!(!any_empty(&fields), "pack layout has a zero-width field");
        assert!(
            sum_widths(&fields) <= storage_bits,
            "pack layout exceeds storage width"
        );
        Self {
            fields,
            storage_bits,
        }
    }

    /// Runtime counterpart of [`PackSchema::new`] for layouts assembled at load time.
    pub fn try_new(fields: [PackField; N], storage_bits: u32) -> Result<Self, PackError> {
        let schema = Self {
            fields,
            storage_bits,
        };
        schema.validate()?;
        Ok(schema)
    }

    pub fn validate(&self) -> Result<(), PackError> {
        if any_empty(&self.fields) {
            return Err(PackError::EmptyField);
        }
        let bits = self.total_bits();
        if bits > self.storage_bits {
            return Err(PackError::LayoutTooWide {
                bits,
                capacity: self.storage_bits,
            });
        }
        Ok(())
    }

    pub const fn total_bits(&self) -> u32 {
        sum_widths(&self.fields)
    }

    pub fn fields(&self) -> &[PackField; N] {
        &self.fields
    }

    /// Location of field `index`, derived from the widths declared before it.
    pub fn location(&self, index: usize) -> PackLocation {
        let offset = sum_widths(&self.fields[..index]);
        PackLocation::new(offset, self.fields[index].width)
    }

    /// Pack `values` in declaration order.  Each value is masked to its field.
    pub fn pack(&self, values: &[i32; N]) -> u64 {
        let mut data = 0u64;
        for (i, (field, &value)) in self.fields.iter().zip(values).enumerate() {
            let encoded = (value as i64 + field.bias()) as u64 & field_mask(field.width);
            pack(&mut data, self.location(i), encoded);
        }
        data
    }

    /// Inverse of [`PackSchema::pack`].
    pub fn unpack(&self, data: u64) -> [i32; N] {
        let mut values = [0; N];
        for (i, field) in self.fields.iter().enumerate() {
            let raw = unpack(data, self.location(i)) as i64;
            values[i] = (raw - field.bias()) as i32;
        }
        values
    }
}
