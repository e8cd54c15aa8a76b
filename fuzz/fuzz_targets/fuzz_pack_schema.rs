//! Fuzz target: `PackSchema` round trip
//!
//! Builds a three-field layout from fuzzed widths, rejects it through
//! `try_new` when it overflows, and otherwise checks that clamped values
//! survive `pack` followed by `unpack`.
//!
//! cargo fuzz run fuzz_pack_schema

#![no_main]

use hemisphere::pack::{PackField, PackSchema};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: ([u8; 3], [i32; 3])| {
    let (widths, raw) = input;
    let field = |i: usize, name| {
        let w = u32::from(widths[i] % 33);
        if widths[i] & 0x80 != 0 {
            PackField::signed(name, w)
        } else {
            PackField::unsigned(name, w)
        }
    };

    let Ok(schema) = PackSchema::try_new([field(0, "a"), field(1, "b"), field(2, "c")], 64) else {
        return;
    };

    let mut values = [0i32; 3];
    for (i, f) in schema.fields().iter().enumerate() {
        let lo = f.min().max(i64::from(i32::MIN));
        let hi = f.max().min(i64::from(i32::MAX));
        values[i] = i64::from(raw[i]).clamp(lo, hi) as i32;
    }

    let word = schema.pack(&values);
    assert!(schema.total_bits() == 64 || word >> schema.total_bits() == 0);
    assert_eq!(schema.unpack(word), values);
});
