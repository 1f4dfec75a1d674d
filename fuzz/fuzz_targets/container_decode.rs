//! Fuzz target for container decoding.
//!
//! Feeds arbitrary bytes to the decoder and, when a container decodes,
//! reads every pixel of every plane.

#![no_main]

use ironsegment::container::{decode, fuzz_parse_header, HEADER_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }
    if fuzz_parse_header(data).is_ok() {
        assert!(data.len() >= HEADER_LEN);
    }
    let Ok(container) = decode(data) else {
        return;
    };
    for plane in container.planes() {
        for y in 0..plane.height() {
            for x in 0..plane.width() {
                let _ = plane.rgba(x, y);
                let _ = plane.object_id(x, y);
            }
        }
    }
});
