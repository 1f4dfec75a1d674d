//! The semantic registry: the closed set of image semantics and their
//! pixel layouts.
//!
//! Every semantic fixes a channel count and a bit depth per channel. The
//! byte size of a plane is derived from these and the canvas size, so any
//! change to this table changes the wire layout of every container using
//! the affected semantic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IronSegmentError;

/// The meaning of the pixel data in a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semantic {
    /// Denoised color, 16-bit RGB.
    #[serde(rename = "DENOISE_RGB16")]
    DenoiseRgb16,
    /// Denoised color, 8-bit RGB.
    #[serde(rename = "DENOISE_RGB8")]
    DenoiseRgb8,
    /// Denoised color, 16-bit RGBA.
    #[serde(rename = "DENOISE_RGBA16")]
    DenoiseRgba16,
    /// Denoised color, 8-bit RGBA.
    #[serde(rename = "DENOISE_RGBA8")]
    DenoiseRgba8,
    /// 16-bit depth.
    #[serde(rename = "DEPTH_16")]
    Depth16,
    /// 32-bit depth.
    #[serde(rename = "DEPTH_32")]
    Depth32,
    /// 8-bit monochrome line art.
    #[serde(rename = "MONOCHROME_LINES_8")]
    MonochromeLines8,
    /// 32-bit object ID map.
    #[serde(rename = "OBJECT_ID_32")]
    ObjectId32,
}

impl Semantic {
    /// All semantics, in the order their tags sort.
    pub const ALL: [Semantic; 8] = [
        Semantic::DenoiseRgb16,
        Semantic::DenoiseRgb8,
        Semantic::DenoiseRgba16,
        Semantic::DenoiseRgba8,
        Semantic::Depth16,
        Semantic::Depth32,
        Semantic::MonochromeLines8,
        Semantic::ObjectId32,
    ];

    /// Returns the manifest tag for this semantic.
    pub fn as_str(&self) -> &'static str {
        match self {
            Semantic::DenoiseRgb16 => "DENOISE_RGB16",
            Semantic::DenoiseRgb8 => "DENOISE_RGB8",
            Semantic::DenoiseRgba16 => "DENOISE_RGBA16",
            Semantic::DenoiseRgba8 => "DENOISE_RGBA8",
            Semantic::Depth16 => "DEPTH_16",
            Semantic::Depth32 => "DEPTH_32",
            Semantic::MonochromeLines8 => "MONOCHROME_LINES_8",
            Semantic::ObjectId32 => "OBJECT_ID_32",
        }
    }

    /// Number of channels per pixel.
    pub fn channel_count(&self) -> u32 {
        match self {
            Semantic::DenoiseRgb16 | Semantic::DenoiseRgb8 => 3,
            Semantic::DenoiseRgba16 | Semantic::DenoiseRgba8 => 4,
            Semantic::Depth16
            | Semantic::Depth32
            | Semantic::MonochromeLines8
            | Semantic::ObjectId32 => 1,
        }
    }

    /// Number of bits in each channel.
    pub fn bits_per_channel(&self) -> u32 {
        match self {
            Semantic::DenoiseRgb8 | Semantic::DenoiseRgba8 | Semantic::MonochromeLines8 => 8,
            Semantic::DenoiseRgb16 | Semantic::DenoiseRgba16 | Semantic::Depth16 => 16,
            Semantic::Depth32 | Semantic::ObjectId32 => 32,
        }
    }

    /// Number of bytes in each channel.
    pub fn bytes_per_channel(&self) -> u32 {
        self.bits_per_channel() / 8
    }

    /// Number of bytes per pixel: `channel_count * bits_per_channel / 8`.
    pub fn bytes_per_pixel(&self) -> u32 {
        self.channel_count() * self.bits_per_channel() / 8
    }

    /// Returns true if the pixel layout carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Semantic::DenoiseRgba16 | Semantic::DenoiseRgba8)
    }
}

/// Returns true if `tag` names a known semantic.
pub fn is_known(tag: &str) -> bool {
    tag.parse::<Semantic>().is_ok()
}

impl FromStr for Semantic {
    type Err = IronSegmentError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Semantic::ALL
            .into_iter()
            .find(|semantic| semantic.as_str() == tag)
            .ok_or_else(|| IronSegmentError::UnknownSemantic {
                tag: tag.to_string(),
            })
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_pixel_table() {
        assert_eq!(Semantic::DenoiseRgb16.bytes_per_pixel(), 6);
        assert_eq!(Semantic::DenoiseRgb8.bytes_per_pixel(), 3);
        assert_eq!(Semantic::DenoiseRgba16.bytes_per_pixel(), 8);
        assert_eq!(Semantic::DenoiseRgba8.bytes_per_pixel(), 4);
        assert_eq!(Semantic::Depth16.bytes_per_pixel(), 2);
        assert_eq!(Semantic::Depth32.bytes_per_pixel(), 4);
        assert_eq!(Semantic::MonochromeLines8.bytes_per_pixel(), 1);
        assert_eq!(Semantic::ObjectId32.bytes_per_pixel(), 4);

        let with_alpha: Vec<_> = Semantic::ALL.iter().filter(|s| s.has_alpha()).collect();
        assert_eq!(
            with_alpha,
            vec![&Semantic::DenoiseRgba16, &Semantic::DenoiseRgba8]
        );
    }

    #[test]
    fn test_tags_roundtrip() {
        for semantic in Semantic::ALL {
            assert_eq!(semantic.as_str().parse::<Semantic>().unwrap(), semantic);
            assert!(is_known(semantic.as_str()));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert!(!is_known("NOT_A_REAL_TAG"));
        assert!(!is_known("depth_16"));
        match "NOT_A_REAL_TAG".parse::<Semantic>() {
            Err(IronSegmentError::UnknownSemantic { tag }) => assert_eq!(tag, "NOT_A_REAL_TAG"),
            other => panic!("expected UnknownSemantic, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_uses_manifest_tags() {
        for semantic in Semantic::ALL {
            let json = serde_json::to_string(&semantic).unwrap();
            assert_eq!(json, format!("\"{}\"", semantic.as_str()));
        }
    }
}
