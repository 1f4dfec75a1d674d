//! Core manifest model.
//!
//! A manifest is the single authoritative description of a container: the
//! canvas size, the ordered list of image planes, and the opaque objects and
//! metadata that travel with them. The encoder and decoder both derive the
//! byte layout from this model alone.

use serde::{Deserialize, Serialize};

use super::content::Content;
use super::ids::{ImageId, ObjectId};
use super::name::QualifiedName;
use super::semantic::Semantic;

/// A complete container manifest.
///
/// All three sections are always present; `objects` and `metadata` may be
/// empty. The model is permissive: it can hold duplicate or out-of-range
/// IDs so that validation can report them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// The image planes and their shared canvas size.
    pub images: Images,

    /// Opaque annotated payloads keyed by ID.
    pub objects: Vec<Object>,

    /// Free-form metadata entries keyed by qualified name.
    pub metadata: Vec<Metadatum>,
}

impl Manifest {
    /// Creates a manifest with the given images and no objects or metadata.
    pub fn new(images: Images) -> Self {
        Self {
            images,
            objects: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Looks up an image by ID.
    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.images.images.iter().find(|image| image.id == id)
    }

    /// Looks up an object by ID.
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.iter().find(|object| object.id == id)
    }

    /// Looks up a metadata entry by name.
    pub fn meta(&self, name: &str) -> Option<&Metadatum> {
        self.metadata.iter().find(|meta| meta.name.as_str() == name)
    }
}

/// The images section: a canvas size and the planes drawn on it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    /// Canvas width in pixels, shared by every image.
    pub width: u32,

    /// Canvas height in pixels, shared by every image.
    pub height: u32,

    /// Images in declaration order. The order fixes the plane order on disk.
    pub images: Vec<Image>,
}

impl Images {
    /// Creates an empty images section with the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            images: Vec::new(),
        }
    }

    /// Appends an image, builder style.
    pub fn with_image(mut self, id: impl Into<ImageId>, semantic: Semantic) -> Self {
        self.images.push(Image::new(id, semantic));
        self
    }

    /// Number of pixels on the canvas.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A single declared image plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Unique identifier within the images section.
    pub id: ImageId,

    /// What the plane's pixels mean; fixes the per-pixel byte size.
    pub semantic: Semantic,
}

impl Image {
    /// Creates a new image.
    pub fn new(id: impl Into<ImageId>, semantic: Semantic) -> Self {
        Self {
            id: id.into(),
            semantic,
        }
    }
}

/// An opaque annotated payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Unique identifier within the objects section.
    pub id: ObjectId,

    /// Uninterpreted mixed content.
    pub content: Content,
}

impl Object {
    /// Creates a new object.
    pub fn new(id: impl Into<ObjectId>, content: Content) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }
}

/// A metadata entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadatum {
    /// Unique key within the metadata section.
    pub name: QualifiedName,

    /// Uninterpreted mixed content.
    pub content: Content,
}

impl Metadatum {
    /// Creates a new metadata entry.
    pub fn new(name: impl Into<QualifiedName>, content: Content) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_find_declared_entries() {
        let mut manifest = Manifest::new(
            Images::new(4, 2)
                .with_image(1, Semantic::DenoiseRgb8)
                .with_image(7, Semantic::Depth16),
        );
        manifest.objects.push(Object::new(3, Content::text("tree")));
        manifest
            .metadata
            .push(Metadatum::new("camera.iso", Content::text("100")));

        assert_eq!(manifest.image(ImageId(7)).map(|i| i.semantic), Some(Semantic::Depth16));
        assert!(manifest.image(ImageId(2)).is_none());
        assert!(manifest.object(ObjectId(3)).is_some());
        assert!(manifest.meta("camera.iso").is_some());
        assert!(manifest.meta("camera.fstop").is_none());
        assert_eq!(manifest.images.pixel_count(), 8);
    }

    #[test]
    fn pixel_count_does_not_overflow() {
        let images = Images::new(u32::MAX, u32::MAX);
        assert_eq!(images.pixel_count(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }
}
