//! Manifest validation.
//!
//! Validation runs in a single pass and collects every issue it finds
//! instead of stopping at the first:
//! - Identifier ranges (image and object IDs must not be `0`)
//! - Uniqueness (image IDs, object IDs, metadata names)
//! - Grammar rules the parser cannot see in a constructed manifest
//!   (metadata name pattern, well-formed opaque content)
//! - Plane sizes that cannot be represented

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::error::IronSegmentError;
use crate::ir::{ImageId, Manifest, ObjectId};
use crate::layout::plane_length;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a manifest and returns a report of all issues found.
pub fn validate_manifest(manifest: &Manifest) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_images(manifest, &mut report);
    validate_objects(manifest, &mut report);
    validate_metadata(manifest, &mut report);

    report
}

/// Validates a manifest with default options.
///
/// Fails with [`IronSegmentError::InvalidManifest`] carrying the full report
/// if any error was found.
pub fn validate(manifest: &Manifest) -> Result<(), IronSegmentError> {
    validate_with(manifest, &ValidateOptions::default())
}

/// Validates a manifest, failing on errors (and on warnings in strict mode).
pub fn validate_with(manifest: &Manifest, opts: &ValidateOptions) -> Result<(), IronSegmentError> {
    validate_manifest(manifest).into_result(opts.strict)
}

fn validate_images(manifest: &Manifest, report: &mut ValidationReport) {
    let images = &manifest.images;

    if !images.images.is_empty() && images.pixel_count() == 0 {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyCanvas,
            format!(
                "Canvas is {}x{}; all {} plane(s) will be empty",
                images.width,
                images.height,
                images.images.len()
            ),
            IssueContext::Images,
        ));
    }

    let mut seen_ids: HashMap<ImageId, usize> = HashMap::new();

    for (idx, image) in images.images.iter().enumerate() {
        let id = image.id.as_u32();

        if !image.id.is_in_range() {
            report.add(ValidationIssue::error(
                IssueCode::OutOfRangeIdentifier,
                format!("Image ID {} is out of range (must be 1..={})", id, u32::MAX),
                IssueContext::Image { id },
            ));
        }

        if let Some(first_idx) = seen_ids.get(&image.id) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateIdentifier,
                format!(
                    "Duplicate image ID {} (first seen at index {})",
                    id, first_idx
                ),
                IssueContext::Image { id },
            ));
        } else {
            seen_ids.insert(image.id, idx);
        }

        if plane_length(images, image.semantic).is_none() {
            report.add(ValidationIssue::error(
                IssueCode::LayoutOverflow,
                format!(
                    "Plane of {}x{} {} pixels does not fit in 64 bits",
                    images.width, images.height, image.semantic
                ),
                IssueContext::Image { id },
            ));
        }
    }
}

fn validate_objects(manifest: &Manifest, report: &mut ValidationReport) {
    let mut seen_ids: HashMap<ObjectId, usize> = HashMap::new();

    for (idx, object) in manifest.objects.iter().enumerate() {
        let id = object.id.as_u32();

        if !object.id.is_in_range() {
            report.add(ValidationIssue::error(
                IssueCode::OutOfRangeIdentifier,
                format!("Object ID {} is out of range (must be 1..={})", id, u32::MAX),
                IssueContext::Object { id },
            ));
        }

        if let Some(first_idx) = seen_ids.get(&object.id) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateIdentifier,
                format!(
                    "Duplicate object ID {} (first seen at index {})",
                    id, first_idx
                ),
                IssueContext::Object { id },
            ));
        } else {
            seen_ids.insert(object.id, idx);
        }

        if !object.content.is_well_formed() {
            report.add(ValidationIssue::error(
                IssueCode::SchemaViolation,
                "Content is not a well-formed XML fragment",
                IssueContext::Object { id },
            ));
        }
    }
}

fn validate_metadata(manifest: &Manifest, report: &mut ValidationReport) {
    let mut seen_names: HashMap<&str, usize> = HashMap::new();

    for (idx, meta) in manifest.metadata.iter().enumerate() {
        let name = meta.name.as_str();
        let context = || IssueContext::Meta {
            name: name.to_string(),
        };

        if !meta.name.is_valid() {
            report.add(ValidationIssue::error(
                IssueCode::SchemaViolation,
                format!("Name '{}' is not a valid qualified name", name),
                context(),
            ));
        }

        if let Some(first_idx) = seen_names.get(name) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateIdentifier,
                format!(
                    "Duplicate metadata name '{}' (first seen at index {})",
                    name, first_idx
                ),
                context(),
            ));
        } else {
            seen_names.insert(name, idx);
        }

        if !meta.content.is_well_formed() {
            report.add(ValidationIssue::error(
                IssueCode::SchemaViolation,
                "Content is not a well-formed XML fragment",
                context(),
            ));
        }
    }
}
