//! Fuzz target: `proportion_cv`
//!
//! Any CV reading must map onto `0..=max_pixels`, wrapping included.
//!
//! cargo fuzz run fuzz_proportion_cv

#![no_main]

use hemisphere::scaling::proportion_cv;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (i32, u8)| {
    let (cv, max_pixels) = input;
    let max_pixels = i32::from(max_pixels);
    let h = proportion_cv(cv, max_pixels);
    assert!((0..=max_pixels).contains(&h), "{cv} -> {h} outside 0..={max_pixels}");
});
