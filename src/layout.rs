//! Plane layout planning.
//!
//! The container never stores plane offsets. Both the encoder and the
//! decoder derive them from the manifest: planes follow the manifest region
//! in declaration order, tightly packed, each `width * height *
//! bytes_per_pixel` bytes long. Planning is a pure function of the images
//! section and the start offset, so both sides always agree.

use serde::Serialize;
use tracing::trace;

use crate::error::IronSegmentError;
use crate::ir::{ImageId, Images, Semantic};

/// Where one plane lives in the byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlanePlacement {
    /// The image this plane belongs to.
    pub image_id: ImageId,
    /// The semantic of the image.
    pub semantic: Semantic,
    /// Offset of the first byte from the start of the stream.
    pub offset: u64,
    /// Length of the plane in bytes.
    pub length: u64,
}

impl PlanePlacement {
    /// Offset one past the last byte of the plane.
    ///
    /// Planning guarantees this does not overflow.
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }
}

/// The planned placement of every plane, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// Offset of the first plane (the end of the manifest region).
    pub data_start: u64,
    /// Plane placements in declaration order.
    pub placements: Vec<PlanePlacement>,
    /// Offset one past the last plane; the exact expected stream length.
    pub end: u64,
}

impl Layout {
    /// Total number of plane bytes.
    pub fn plane_bytes(&self) -> u64 {
        self.end - self.data_start
    }

    /// Looks up the placement of an image's plane.
    pub fn placement(&self, image_id: ImageId) -> Option<&PlanePlacement> {
        self.placements.iter().find(|p| p.image_id == image_id)
    }
}

/// Byte length of a plane with the given semantic on the section's canvas,
/// or `None` if it does not fit in a `u64`.
pub fn plane_length(images: &Images, semantic: Semantic) -> Option<u64> {
    u64::from(images.width)
        .checked_mul(u64::from(images.height))?
        .checked_mul(u64::from(semantic.bytes_per_pixel()))
}

/// Plans the placement of every plane in `images`, starting at `data_start`.
///
/// Fails with [`IronSegmentError::LayoutOverflow`] if any length or offset
/// does not fit in a `u64`.
pub fn plan_layout(images: &Images, data_start: u64) -> Result<Layout, IronSegmentError> {
    let mut placements = Vec::with_capacity(images.images.len());
    let mut offset = data_start;

    for image in &images.images {
        let overflow = || IronSegmentError::LayoutOverflow { image_id: image.id };
        let length = plane_length(images, image.semantic).ok_or_else(overflow)?;
        let end = offset.checked_add(length).ok_or_else(overflow)?;

        trace!(
            image_id = image.id.as_u32(),
            offset,
            length,
            "planned plane"
        );
        placements.push(PlanePlacement {
            image_id: image.id,
            semantic: image.semantic,
            offset,
            length,
        });
        offset = end;
    }

    Ok(Layout {
        data_start,
        placements,
        end: offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planes_are_packed_in_declaration_order() {
        let images = Images::new(10, 4)
            .with_image(3, Semantic::DenoiseRgb8)
            .with_image(1, Semantic::Depth16)
            .with_image(2, Semantic::DenoiseRgba16);

        let layout = plan_layout(&images, 100).expect("plan");
        let summary: Vec<(u32, u64, u64)> = layout
            .placements
            .iter()
            .map(|p| (p.image_id.as_u32(), p.offset, p.length))
            .collect();

        assert_eq!(
            summary,
            vec![(3, 100, 120), (1, 220, 80), (2, 300, 320)]
        );
        assert_eq!(layout.end, 620);
        assert_eq!(layout.plane_bytes(), 520);
        assert_eq!(layout.placement(ImageId(1)).map(|p| p.end()), Some(300));
    }

    #[test]
    fn planning_is_deterministic() {
        let images = Images::new(33, 17)
            .with_image(1, Semantic::ObjectId32)
            .with_image(2, Semantic::MonochromeLines8);
        assert_eq!(plan_layout(&images, 24), plan_layout(&images, 24));
    }

    #[test]
    fn empty_images_section_has_no_planes() {
        let layout = plan_layout(&Images::new(640, 480), 64).expect("plan");
        assert!(layout.placements.is_empty());
        assert_eq!(layout.end, 64);
    }

    #[test]
    fn plane_length_matches_semantic_size() {
        let images = Images::new(800, 600);
        assert_eq!(plane_length(&images, Semantic::Depth16), Some(960_000));
        assert_eq!(plane_length(&images, Semantic::DenoiseRgba16), Some(3_840_000));
    }

    #[test]
    fn plane_length_overflow_is_detected() {
        let images = Images::new(u32::MAX, u32::MAX);
        assert!(plane_length(&images, Semantic::MonochromeLines8).is_some());
        assert!(plane_length(&images, Semantic::DenoiseRgba16).is_none());
    }

    #[test]
    fn offset_overflow_is_fatal() {
        let images = Images::new(u32::MAX, u32::MAX)
            .with_image(1, Semantic::MonochromeLines8)
            .with_image(2, Semantic::MonochromeLines8);
        match plan_layout(&images, 24) {
            Err(IronSegmentError::LayoutOverflow { image_id }) => assert_eq!(image_id, ImageId(2)),
            other => panic!("expected LayoutOverflow, got {other:?}"),
        }
    }
}
