//! Fuzz target: `Preset::decode`
//!
//! Arbitrary bytes must either fail cleanly or decode to a preset that
//! encodes within `MAX_ENCODED_LEN` and decodes back to itself.
//!
//! cargo fuzz run fuzz_preset_decode

#![no_main]

use hemisphere::preset::{MAX_ENCODED_LEN, Preset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(preset) = Preset::decode(data) else {
        return;
    };

    let mut buf = [0u8; MAX_ENCODED_LEN];
    let bytes = preset.encode(&mut buf).expect("decoded preset must re-encode");
    assert!(bytes.len() <= MAX_ENCODED_LEN);
    assert_eq!(Preset::decode(bytes).ok(), Some(preset));
});
