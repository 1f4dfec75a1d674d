//! Criterion microbenches for ironsegment container encoding and decoding.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Manifest XML parsing and writing
//! - Container encoding (validation, layout and copy)
//! - Container decoding and per-pixel access

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use ironsegment::container::{decode, encode};
use ironsegment::ir::io_manifest_xml::{from_manifest_str, to_manifest_string};
use ironsegment::ir::{Content, ImageId, Images, Manifest, Metadatum, Object, Semantic};
use ironsegment::layout::plane_length;

/// A 256x256 render with every semantic and a few hundred objects.
fn render_manifest() -> Manifest {
    let mut images = Images::new(256, 256);
    for (idx, semantic) in Semantic::ALL.iter().enumerate() {
        images = images.with_image(idx as u32 + 1, *semantic);
    }

    let mut manifest = Manifest::new(images);
    for id in 1..=300u32 {
        manifest.objects.push(Object::new(
            id,
            Content::markup(format!(
                "<Label xmlns=\"urn:bench\">object {id}</Label><Area>{}</Area>",
                id * 17
            )),
        ));
    }
    for idx in 0..20 {
        manifest.metadata.push(Metadatum::new(
            format!("render.setting_{idx}"),
            Content::text("value & more"),
        ));
    }
    manifest
}

fn render_planes(manifest: &Manifest) -> BTreeMap<ImageId, Vec<u8>> {
    manifest
        .images
        .images
        .iter()
        .map(|image| {
            let len = plane_length(&manifest.images, image.semantic).unwrap() as usize;
            (image.id, (0..len).map(|i| i as u8).collect())
        })
        .collect()
}

/// Benchmark manifest XML parsing.
fn bench_manifest_parse(c: &mut Criterion) {
    let xml = to_manifest_string(&render_manifest());
    let mut group = c.benchmark_group("manifest_xml");
    group.throughput(Throughput::Bytes(xml.len() as u64));

    group.bench_function("from_manifest_str", |b| {
        b.iter(|| {
            let manifest = from_manifest_str(black_box(&xml)).unwrap();
            black_box(manifest)
        })
    });

    group.bench_function("to_manifest_string", |b| {
        let manifest = render_manifest();
        b.iter(|| black_box(to_manifest_string(black_box(&manifest))))
    });

    group.finish();
}

/// Benchmark container encoding.
fn bench_encode(c: &mut Criterion) {
    let manifest = render_manifest();
    let planes = render_planes(&manifest);
    let total: usize = planes.values().map(Vec::len).sum();

    let mut group = c.benchmark_group("container");
    group.throughput(Throughput::Bytes(total as u64));

    group.bench_function("encode", |b| {
        b.iter(|| {
            let bytes = encode(black_box(&manifest), black_box(&planes)).unwrap();
            black_box(bytes)
        })
    });

    group.finish();
}

/// Benchmark container decoding.
///
/// The stream is encoded once; only decoding and pixel reads are measured.
fn bench_decode(c: &mut Criterion) {
    let manifest = render_manifest();
    let bytes = encode(&manifest, &render_planes(&manifest)).unwrap();

    let mut group = c.benchmark_group("container");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("decode", |b| {
        b.iter(|| {
            let decoded = decode(black_box(&bytes)).unwrap();
            black_box(decoded.planes().len())
        })
    });

    group.bench_function("decode_and_read_rgba", |b| {
        b.iter(|| {
            let decoded = decode(black_box(&bytes)).unwrap();
            let plane = decoded.plane(ImageId(3)).unwrap();
            let mut sum = 0.0;
            for y in 0..plane.height() {
                for x in 0..plane.width() {
                    sum += plane.rgba(x, y).unwrap()[0];
                }
            }
            black_box(sum)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_manifest_parse, bench_encode, bench_decode);
criterion_main!(benches);
