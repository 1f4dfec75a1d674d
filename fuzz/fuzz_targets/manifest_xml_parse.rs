//! Fuzz target for manifest XML parsing.
//!
//! Anything that parses must serialize and parse back to the same manifest.

#![no_main]

use ironsegment::ir::io_manifest_xml::{from_manifest_slice, from_manifest_str, to_manifest_string};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }
    if let Ok(manifest) = from_manifest_slice(data) {
        let xml = to_manifest_string(&manifest);
        if let Ok(again) = from_manifest_str(&xml) {
            assert_eq!(again, manifest);
        }
    }
});
