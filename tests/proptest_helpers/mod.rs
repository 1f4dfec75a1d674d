#![allow(dead_code)]

use std::collections::BTreeMap;

use ironsegment::ir::{Content, Image, ImageId, Images, Manifest, Metadatum, Object, Semantic};
use ironsegment::layout::plane_length;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn semantic_strategy() -> BoxedStrategy<Semantic> {
    proptest::sample::select(Semantic::ALL.to_vec()).boxed()
}

pub fn qualified_name_strategy() -> BoxedStrategy<String> {
    "[a-z][a-z0-9_-]{0,8}(\\.[a-z][a-z0-9_-]{0,8}){0,3}".boxed()
}

/// Plain text with characters that need escaping mixed in.
pub fn text_content_strategy() -> BoxedStrategy<Content> {
    "[a-zA-Z0-9 <>&'\"]{0,24}"
        .prop_map(|text| Content::text(&text))
        .boxed()
}

/// Small well-formed fragments with nested markup.
pub fn markup_content_strategy() -> BoxedStrategy<Content> {
    ("[a-z]{1,6}", "[a-zA-Z0-9 ]{0,12}", "[a-zA-Z0-9 ]{0,12}")
        .prop_map(|(tag, inner, tail)| {
            Content::markup(format!(
                "<{tag} xmlns=\"urn:test\">{inner}<em>{tail}</em></{tag}>{tail}"
            ))
        })
        .boxed()
}

/// Fragments whose prefix is bound outside the fragment itself.
pub fn prefixed_content_strategy() -> BoxedStrategy<Content> {
    ("[a-z]{1,4}", "[a-z]{1,6}", "[a-zA-Z0-9 ]{0,12}")
        .prop_filter("reserved prefix", |(prefix, _, _)| !prefix.starts_with("xml"))
        .prop_map(|(prefix, tag, inner)| {
            Content::markup(format!("<{prefix}:{tag}>{inner}</{prefix}:{tag}>{inner}"))
                .with_namespace(prefix.clone(), format!("urn:test:{prefix}"))
        })
        .boxed()
}

pub fn content_strategy() -> BoxedStrategy<Content> {
    prop_oneof![
        text_content_strategy(),
        markup_content_strategy(),
        prefixed_content_strategy()
    ]
    .boxed()
}

/// A valid manifest on a small canvas.
pub fn arb_manifest(
    max_images: usize,
    max_objects: usize,
    max_meta: usize,
) -> BoxedStrategy<Manifest> {
    (
        0u32..=16,
        0u32..=16,
        proptest::collection::btree_map(1u32..=u32::MAX, semantic_strategy(), 0..=max_images),
        proptest::collection::btree_map(1u32..=u32::MAX, content_strategy(), 0..=max_objects),
        proptest::collection::btree_map(qualified_name_strategy(), content_strategy(), 0..=max_meta),
        any::<bool>(),
    )
        .prop_map(|(width, height, images, objects, metadata, reverse)| {
            let mut images: Vec<Image> = images
                .into_iter()
                .map(|(id, semantic)| Image::new(id, semantic))
                .collect();
            // Declaration order must not need to follow ID order.
            if reverse {
                images.reverse();
            }

            Manifest {
                images: Images {
                    width: width.max(1),
                    height: height.max(1),
                    images,
                },
                objects: objects
                    .into_iter()
                    .map(|(id, content)| Object::new(id, content))
                    .collect(),
                metadata: metadata
                    .into_iter()
                    .map(|(name, content)| Metadatum::new(name, content))
                    .collect(),
            }
        })
        .boxed()
}

/// A valid manifest together with correctly sized random plane buffers.
pub fn arb_container_input(
    max_images: usize,
    max_objects: usize,
    max_meta: usize,
) -> BoxedStrategy<(Manifest, BTreeMap<ImageId, Vec<u8>>)> {
    arb_manifest(max_images, max_objects, max_meta)
        .prop_flat_map(|manifest| {
            let buffers: Vec<_> = manifest
                .images
                .images
                .iter()
                .map(|image| {
                    let id = image.id;
                    let len = plane_length(&manifest.images, image.semantic)
                        .expect("small canvas") as usize;
                    proptest::collection::vec(any::<u8>(), len..=len)
                        .prop_map(move |bytes| (id, bytes))
                })
                .collect();
            (Just(manifest), buffers)
        })
        .prop_map(|(manifest, buffers)| (manifest, buffers.into_iter().collect()))
        .boxed()
}
