//! Read-only views of decoded planes.

use crate::error::IronSegmentError;
use crate::ir::{ImageId, Semantic};

/// A borrowed view of one plane inside a decoded byte stream.
///
/// Pixels are stored row-major, top row first. Multi-byte channel values are
/// big-endian unsigned integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneView<'a> {
    image_id: ImageId,
    semantic: Semantic,
    width: u32,
    height: u32,
    offset: u64,
    bytes: &'a [u8],
}

impl<'a> PlaneView<'a> {
    pub(crate) fn new(
        image_id: ImageId,
        semantic: Semantic,
        width: u32,
        height: u32,
        offset: u64,
        bytes: &'a [u8],
    ) -> Self {
        Self {
            image_id,
            semantic,
            width,
            height,
            offset,
            bytes,
        }
    }

    pub fn image_id(&self) -> ImageId {
        self.image_id
    }

    pub fn semantic(&self) -> Semantic {
        self.semantic
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Offset of the plane from the start of the stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The raw plane bytes, borrowed from the decoded stream.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<&'a [u8], IronSegmentError> {
        if x >= self.width {
            return Err(IronSegmentError::PixelOutOfBounds {
                axis: "X",
                value: x,
                limit: self.width,
            });
        }
        if y >= self.height {
            return Err(IronSegmentError::PixelOutOfBounds {
                axis: "Y",
                value: y,
                limit: self.height,
            });
        }

        let size = self.semantic.bytes_per_pixel() as usize;
        let index = u64::from(y) * u64::from(self.width) + u64::from(x);
        // The plane holds width * height pixels, so the index fits in usize.
        let start = index as usize * size;
        Ok(&self.bytes[start..start + size])
    }

    /// The pixel at `(x, y)` as normalized RGB.
    ///
    /// Each channel is divided by `2^bits`. Single-channel semantics are
    /// replicated into all three components; alpha is dropped.
    pub fn rgb(&self, x: u32, y: u32) -> Result<[f64; 3], IronSegmentError> {
        let [r, g, b, _] = self.rgba(x, y)?;
        Ok([r, g, b])
    }

    /// The pixel at `(x, y)` as normalized RGBA.
    ///
    /// Like [`PlaneView::rgb`]; alpha is `1.0` when the semantic has none.
    pub fn rgba(&self, x: u32, y: u32) -> Result<[f64; 4], IronSegmentError> {
        let pixel = self.pixel(x, y)?;
        let channel_bytes = self.semantic.bytes_per_channel() as usize;
        let scale = 2f64.powi(self.semantic.bits_per_channel() as i32);

        let mut channels = pixel
            .chunks_exact(channel_bytes)
            .map(|chunk| read_channel(chunk) as f64 / scale);

        let first = channels.next().unwrap_or(0.0);
        match self.semantic.channel_count() {
            1 => Ok([first, first, first, 1.0]),
            _ => {
                let g = channels.next().unwrap_or(0.0);
                let b = channels.next().unwrap_or(0.0);
                let a = if self.semantic.has_alpha() {
                    channels.next().unwrap_or(1.0)
                } else {
                    1.0
                };
                Ok([first, g, b, a])
            }
        }
    }

    /// The object ID stored at `(x, y)` of an `OBJECT_ID_32` plane.
    pub fn object_id(&self, x: u32, y: u32) -> Result<u32, IronSegmentError> {
        if self.semantic != Semantic::ObjectId32 {
            return Err(IronSegmentError::SemanticMismatch {
                image_id: self.image_id,
                semantic: self.semantic,
                operation: "fetch object IDs",
            });
        }
        let pixel = self.pixel(x, y)?;
        Ok(read_channel(pixel) as u32)
    }
}

/// Reads a big-endian unsigned channel value of 1, 2 or 4 bytes.
fn read_channel(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}
