//! Container encoding.

use std::collections::BTreeMap;
use std::io::Write;

use tracing::debug;

use super::{Header, HEADER_LEN};
use crate::error::IronSegmentError;
use crate::ir::io_manifest_xml::to_manifest_string;
use crate::ir::{ImageId, Manifest};
use crate::layout::{plan_layout, Layout};
use crate::validation::{validate_with, ValidateOptions};

/// Encode a manifest and its planes into a container byte stream.
///
/// `planes` must hold exactly one buffer per declared image, each exactly as
/// long as the layout requires. Nothing is truncated or padded.
pub fn encode<B: AsRef<[u8]>>(
    manifest: &Manifest,
    planes: &BTreeMap<ImageId, B>,
) -> Result<Vec<u8>, IronSegmentError> {
    encode_with(manifest, planes, &ValidateOptions::default())
}

/// Like [`encode`], with explicit validation options.
pub fn encode_with<B: AsRef<[u8]>>(
    manifest: &Manifest,
    planes: &BTreeMap<ImageId, B>,
    opts: &ValidateOptions,
) -> Result<Vec<u8>, IronSegmentError> {
    let prepared = prepare(manifest, planes, opts)?;
    let mut out = Vec::with_capacity(usize::try_from(prepared.layout.end).unwrap_or(0));
    prepared.write_to(&mut out)?;
    Ok(out)
}

/// Encode a container directly into `writer`.
///
/// Every check runs before the first byte is written, so a failed call
/// leaves `writer` untouched unless the writer itself fails. Returns the
/// number of bytes written.
pub fn write_container<W: Write, B: AsRef<[u8]>>(
    writer: &mut W,
    manifest: &Manifest,
    planes: &BTreeMap<ImageId, B>,
    opts: &ValidateOptions,
) -> Result<u64, IronSegmentError> {
    let prepared = prepare(manifest, planes, opts)?;
    prepared.write_to(writer)?;
    Ok(prepared.layout.end)
}

/// A fully checked container, ready to be written.
struct Prepared<'a> {
    header: Header,
    manifest_xml: String,
    layout: Layout,
    planes: Vec<&'a [u8]>,
}

impl Prepared<'_> {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), IronSegmentError> {
        writer.write_all(&self.header.to_bytes())?;
        writer.write_all(self.manifest_xml.as_bytes())?;
        for plane in &self.planes {
            writer.write_all(plane)?;
        }
        Ok(())
    }
}

fn prepare<'a, B: AsRef<[u8]>>(
    manifest: &Manifest,
    planes: &'a BTreeMap<ImageId, B>,
    opts: &ValidateOptions,
) -> Result<Prepared<'a>, IronSegmentError> {
    validate_with(manifest, opts)?;

    let manifest_xml = to_manifest_string(manifest);
    let header = Header::new(manifest_xml.len() as u64);
    let data_start = HEADER_LEN as u64 + header.manifest_len;
    let layout = plan_layout(&manifest.images, data_start)?;

    let mut ordered = Vec::with_capacity(layout.placements.len());
    for placement in &layout.placements {
        let buffer = planes
            .get(&placement.image_id)
            .ok_or_else(|| IronSegmentError::MissingPlane {
                image_id: placement.image_id,
            })?
            .as_ref();
        let actual = buffer.len() as u64;
        if actual != placement.length {
            return Err(IronSegmentError::PlaneSizeMismatch {
                image_id: placement.image_id,
                expected: placement.length,
                actual,
            });
        }
        ordered.push(buffer);
    }

    if let Some(extra) = planes
        .keys()
        .find(|id| layout.placement(**id).is_none())
    {
        return Err(IronSegmentError::UnexpectedPlane { image_id: *extra });
    }

    debug!(
        manifest_len = header.manifest_len,
        planes = ordered.len(),
        total_len = layout.end,
        "encoding container"
    );

    Ok(Prepared {
        header,
        manifest_xml,
        layout,
        planes: ordered,
    })
}
