//! Fuzz target for the JDBC URL reader and password masking.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_jdbc_url
//! ```

#![no_main]

use connprobe_core::{Dialect, JdbcUrl, mask_password};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let _ = mask_password(input);

    // Also try every known prefix so the dialect-specific readers get coverage.
    for dialect in Dialect::ALL {
        let url = format!("{}{}", dialect.jdbc_prefix(), input);
        if let Ok(parsed) = JdbcUrl::parse(&url) {
            assert_eq!(parsed.dialect(), dialect);
            assert!(!parsed.host().is_empty());
            let _ = parsed.port_or_default();
        }
    }
});
