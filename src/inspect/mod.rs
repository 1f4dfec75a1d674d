//! Container inspection.
//!
//! Builds a structured summary of a decoded container: the header version,
//! the canvas, where each plane lives in the stream, and the objects and
//! metadata carried by the manifest.

mod report;

pub use report::{CanvasSection, InspectReport, MetaEntry, ObjectEntry, PlaneEntry};

use crate::container::{DecodedContainer, HEADER_LEN};
use crate::ir::Content;

/// Options for container inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Maximum number of characters of opaque content shown per entry.
    pub preview_len: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { preview_len: 40 }
    }
}

/// Inspect a decoded container and produce a report.
pub fn inspect_container(
    container: &DecodedContainer<'_>,
    opts: &InspectOptions,
) -> InspectReport {
    let manifest = container.manifest();
    let layout = container.layout();

    let canvas = CanvasSection {
        width: manifest.images.width,
        height: manifest.images.height,
        pixels: manifest.images.pixel_count(),
    };

    let planes = layout
        .placements
        .iter()
        .map(|p| PlaneEntry {
            image_id: p.image_id.as_u32(),
            semantic: p.semantic.as_str().to_string(),
            bytes_per_pixel: p.semantic.bytes_per_pixel(),
            offset: p.offset,
            length: p.length,
        })
        .collect();

    let objects = manifest
        .objects
        .iter()
        .map(|o| ObjectEntry {
            id: o.id.as_u32(),
            preview: preview(&o.content, opts.preview_len),
        })
        .collect();

    let metadata = manifest
        .metadata
        .iter()
        .map(|m| MetaEntry {
            name: m.name.as_str().to_string(),
            preview: preview(&m.content, opts.preview_len),
        })
        .collect();

    InspectReport {
        version: container.version().to_string(),
        manifest_bytes: layout.data_start - HEADER_LEN as u64,
        plane_bytes: layout.plane_bytes(),
        total_bytes: layout.end,
        canvas,
        planes,
        objects,
        metadata,
    }
}

/// A short single-line rendering of opaque content.
///
/// Markup is stripped; content that does not parse is shown raw.
fn preview(content: &Content, max_len: usize) -> String {
    let text = content
        .plain_text()
        .unwrap_or_else(|| content.as_markup().to_string());
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if flat.chars().count() <= max_len {
        flat
    } else {
        let kept: String = flat.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
