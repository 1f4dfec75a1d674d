#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ironsegment::container::encode;
use ironsegment::ir::{Content, ImageId, Images, Manifest, Metadatum, Object, Semantic};
use ironsegment::layout::plane_length;

/// A small manifest touching every section.
pub fn sample_manifest() -> Manifest {
    let mut manifest = Manifest::new(
        Images::new(8, 4)
            .with_image(1, Semantic::DenoiseRgb8)
            .with_image(2, Semantic::Depth16)
            .with_image(3, Semantic::ObjectId32),
    );
    manifest.objects.push(Object::new(1, Content::text("lamp")));
    manifest.objects.push(Object::new(
        2,
        Content::markup(r#"<Description xmlns="urn:example">A <b>wooden</b> chair</Description>"#),
    ));
    manifest
        .metadata
        .push(Metadatum::new("camera.iso", Content::text("100")));
    manifest.metadata.push(Metadatum::new(
        "render.engine",
        Content::text("path tracer & denoiser"),
    ));
    manifest
}

/// Correctly sized plane buffers with a per-image byte pattern.
pub fn planes_for(manifest: &Manifest) -> BTreeMap<ImageId, Vec<u8>> {
    manifest
        .images
        .images
        .iter()
        .map(|image| {
            let len = plane_length(&manifest.images, image.semantic).expect("plane length") as usize;
            let seed = image.id.as_u32() as u8;
            let bytes = (0..len).map(|i| seed.wrapping_mul(31).wrapping_add(i as u8)).collect();
            (image.id, bytes)
        })
        .collect()
}

/// Encodes the sample manifest with its planes.
pub fn sample_container() -> Vec<u8> {
    let manifest = sample_manifest();
    encode(&manifest, &planes_for(&manifest)).expect("encode sample container")
}

pub fn write_container(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bytes).expect("write container file");
}
