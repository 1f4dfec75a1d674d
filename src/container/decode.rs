//! Container decoding.

use tracing::debug;

use super::{FormatVersion, Header, PlaneView, HEADER_LEN};
use crate::error::IronSegmentError;
use crate::ir::io_manifest_xml::from_manifest_slice;
use crate::ir::{ImageId, Manifest};
use crate::layout::{plan_layout, Layout};
use crate::validation::{validate_with, ValidateOptions};

/// A decoded container.
///
/// Plane views borrow from the input bytes; nothing is copied.
#[derive(Clone, Debug)]
pub struct DecodedContainer<'a> {
    version: FormatVersion,
    manifest: Manifest,
    layout: Layout,
    planes: Vec<PlaneView<'a>>,
}

impl<'a> DecodedContainer<'a> {
    /// The format version found in the header.
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// The validated manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Plane placements derived from the manifest.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// All planes, in declaration order.
    pub fn planes(&self) -> &[PlaneView<'a>] {
        &self.planes
    }

    /// The plane belonging to `image_id`, if the image is declared.
    pub fn plane(&self, image_id: ImageId) -> Option<&PlaneView<'a>> {
        self.planes.iter().find(|p| p.image_id() == image_id)
    }
}

/// Decode a container byte stream.
///
/// The stream must hold exactly the header, the manifest and every declared
/// plane. Trailing bytes are an error, as is a short stream.
pub fn decode(bytes: &[u8]) -> Result<DecodedContainer<'_>, IronSegmentError> {
    decode_with(bytes, &ValidateOptions::default())
}

/// Like [`decode`], with explicit validation options.
pub fn decode_with<'a>(
    bytes: &'a [u8],
    opts: &ValidateOptions,
) -> Result<DecodedContainer<'a>, IronSegmentError> {
    let (header, data_start, manifest) = read_prefix(bytes)?;
    validate_with(&manifest, opts)?;

    let actual = bytes.len() as u64;
    let layout = plan_layout(&manifest.images, data_start)?;
    if layout.end != actual {
        return Err(IronSegmentError::TruncatedOrOversizedStream {
            expected: layout.end,
            actual,
        });
    }

    let planes = layout
        .placements
        .iter()
        .map(|placement| {
            // Every placement ends at or before layout.end == bytes.len().
            let start = placement.offset as usize;
            let end = placement.end() as usize;
            PlaneView::new(
                placement.image_id,
                placement.semantic,
                manifest.images.width,
                manifest.images.height,
                placement.offset,
                &bytes[start..end],
            )
        })
        .collect::<Vec<_>>();

    debug!(
        version = %header.version,
        manifest_len = header.manifest_len,
        planes = planes.len(),
        total_len = actual,
        "decoded container"
    );

    Ok(DecodedContainer {
        version: header.version,
        manifest,
        layout,
        planes,
    })
}

/// Reads the header and parses the manifest without validating it or
/// looking at the planes.
///
/// Grammar errors still fail. Use [`crate::validation::validate_manifest`]
/// on the result to collect the remaining issues.
pub fn read_manifest(bytes: &[u8]) -> Result<(FormatVersion, Manifest), IronSegmentError> {
    let (header, _, manifest) = read_prefix(bytes)?;
    Ok((header.version, manifest))
}

/// Parses the header and the manifest region, returning the offset of the
/// first byte after the manifest.
fn read_prefix(bytes: &[u8]) -> Result<(Header, u64, Manifest), IronSegmentError> {
    let header = Header::parse(bytes)?;
    let actual = bytes.len() as u64;
    let data_start = (HEADER_LEN as u64)
        .checked_add(header.manifest_len)
        .filter(|end| *end <= actual)
        .ok_or(IronSegmentError::TruncatedOrOversizedStream {
            expected: (HEADER_LEN as u64).saturating_add(header.manifest_len),
            actual,
        })?;

    // data_start <= bytes.len(), so it fits in usize.
    let manifest = from_manifest_slice(&bytes[HEADER_LEN..data_start as usize])?;
    Ok((header, data_start, manifest))
}
