//! Fuzz target for the assembler.
//!
//! Feeds arbitrary text to the assembler; any successfully assembled image
//! must also survive an Intel HEX round trip and list one row per source
//! line.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sim6502::{assemble, parse_intel_hex, to_intel_hex};

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    if let Ok(output) = assemble(&source) {
        let hex = to_intel_hex(&output.image);
        let reloaded = parse_intel_hex(&hex).expect("generated hex parses");
        assert_eq!(reloaded, output.image);

        let listing = output.render_listing(&source);
        assert_eq!(listing.lines().count(), source.lines().count());
    }
});
