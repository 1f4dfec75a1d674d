//! The container byte stream.
//!
//! All integers are big-endian:
//!
//! ```text
//! offset  size  field
//! 0       8     magic: 89 49 72 53 0D 0A 1A 0A
//! 8       4     major version (u32), currently 1
//! 12      4     minor version (u32), currently 0
//! 16      8     manifest length in bytes (u64)
//! 24      n     manifest: canonical UTF-8 XML
//! 24+n    ...   planes in declaration order, tightly packed
//! ```
//!
//! No plane offsets are stored. The decoder re-plans the layout from the
//! manifest and requires the stream to end exactly where the last plane
//! ends.

mod decode;
mod encode;
mod plane;

pub use decode::{decode, decode_with, read_manifest, DecodedContainer};
pub use encode::{encode, encode_with, write_container};
pub use plane::PlaneView;

use std::fmt;

use serde::Serialize;

use crate::error::IronSegmentError;

/// The eight bytes every container starts with (`0x894972530D0A1A0A`).
pub const MAGIC: [u8; 8] = [0x89, b'I', b'r', b'S', 0x0D, 0x0A, 0x1A, 0x0A];

/// The major format version written and accepted.
pub const VERSION_MAJOR: u32 = 1;

/// The minor format version written.
pub const VERSION_MINOR: u32 = 0;

/// Size of the fixed header preceding the manifest.
pub const HEADER_LEN: usize = 24;

/// A container format version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FormatVersion {
    pub major: u32,
    pub minor: u32,
}

impl FormatVersion {
    /// The version this crate writes.
    pub const CURRENT: FormatVersion = FormatVersion {
        major: VERSION_MAJOR,
        minor: VERSION_MINOR,
    };
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The fixed-size header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Header {
    pub version: FormatVersion,
    pub manifest_len: u64,
}

impl Header {
    pub fn new(manifest_len: u64) -> Self {
        Self {
            version: FormatVersion::CURRENT,
            manifest_len,
        }
    }

    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..8].copy_from_slice(&MAGIC);
        out[8..12].copy_from_slice(&self.version.major.to_be_bytes());
        out[12..16].copy_from_slice(&self.version.minor.to_be_bytes());
        out[16..24].copy_from_slice(&self.manifest_len.to_be_bytes());
        out
    }

    /// Reads and checks the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, IronSegmentError> {
        let prefix = &bytes[..bytes.len().min(MAGIC.len())];
        if prefix != &MAGIC[..prefix.len()] {
            return Err(IronSegmentError::MagicOrVersionMismatch {
                message: format!("bad magic number {prefix:02x?}, expected {MAGIC:02x?}"),
            });
        }

        if bytes.len() < HEADER_LEN {
            return Err(IronSegmentError::TruncatedOrOversizedStream {
                expected: HEADER_LEN as u64,
                actual: bytes.len() as u64,
            });
        }

        let version = FormatVersion {
            major: read_u32(bytes, 8),
            minor: read_u32(bytes, 12),
        };
        if version.major != VERSION_MAJOR {
            return Err(IronSegmentError::MagicOrVersionMismatch {
                message: format!(
                    "unsupported format version {version}, expected major version {VERSION_MAJOR}"
                ),
            });
        }

        Ok(Self {
            version,
            manifest_len: read_u64(bytes, 16),
        })
    }
}

/// Fuzz-only entrypoint for header parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_header(bytes: &[u8]) -> Result<(FormatVersion, u64), IronSegmentError> {
    let header = Header::parse(bytes)?;
    Ok((header.version, header.manifest_len))
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[at..at + 4]);
    u32::from_be_bytes(buf)
}

fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_be_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_matches_registered_number() {
        assert_eq!(u64::from_be_bytes(MAGIC), 0x8949_7253_0D0A_1A0A);
    }

    #[test]
    fn header_layout_is_fixed() {
        let bytes = Header::new(0x0102).to_bytes();
        assert_eq!(&bytes[0..8], &MAGIC);
        assert_eq!(&bytes[8..12], &[0, 0, 0, 1]);
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
        assert_eq!(&bytes[16..24], &[0, 0, 0, 0, 0, 0, 0x01, 0x02]);
        assert_eq!(Header::parse(&bytes).unwrap(), Header::new(0x0102));
    }

    #[test]
    fn header_rejects_bad_magic() {
        let mut bytes = Header::new(0).to_bytes();
        bytes[1] = b'X';
        assert!(matches!(
            Header::parse(&bytes),
            Err(IronSegmentError::MagicOrVersionMismatch { .. })
        ));
        assert!(matches!(
            Header::parse(b"PK"),
            Err(IronSegmentError::MagicOrVersionMismatch { .. })
        ));
    }

    #[test]
    fn header_rejects_other_major_version() {
        let mut bytes = Header::new(0).to_bytes();
        bytes[11] = 2;
        match Header::parse(&bytes) {
            Err(IronSegmentError::MagicOrVersionMismatch { message }) => {
                assert!(message.contains("2.0"), "message was: {message}")
            }
            other => panic!("expected MagicOrVersionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn header_accepts_newer_minor_version() {
        let mut bytes = Header::new(5).to_bytes();
        bytes[15] = 3;
        let header = Header::parse(&bytes).unwrap();
        assert_eq!(header.version, FormatVersion { major: 1, minor: 3 });
    }

    #[test]
    fn header_reports_short_input() {
        let bytes = Header::new(0).to_bytes();
        assert!(matches!(
            Header::parse(&bytes[..10]),
            Err(IronSegmentError::TruncatedOrOversizedStream {
                expected: 24,
                actual: 10
            })
        ));
        assert!(matches!(
            Header::parse(&[]),
            Err(IronSegmentError::TruncatedOrOversizedStream { .. })
        ));
    }
}
