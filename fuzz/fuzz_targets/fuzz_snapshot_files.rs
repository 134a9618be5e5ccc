//! Fuzz target for snapshot item and group file parsing.
//!
//! Goal: parsing should **never panic** on any input. Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_snapshot_files
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = embargo_repo::fuzz::parse_item(text);
        let _ = embargo_repo::fuzz::parse_groups(text);
    }
});
