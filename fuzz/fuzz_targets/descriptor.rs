//! Fuzz target for descriptor parsing and synthesis.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_descriptor
//! ```

#![no_main]

use connprobe_core::{ConnectionDescriptor, synthesize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any byte string is either a descriptor or a MalformedInput error.
    if let Ok(descriptor) = ConnectionDescriptor::from_json(data) {
        let _ = synthesize(&descriptor);
        let _ = format!("{:?}", descriptor);
    }
});
