//! In-memory model of a container manifest.
//!
//! This module defines the manifest (images, objects, metadata), the
//! semantic registry that fixes each plane's pixel layout, and the XML codec
//! for the manifest's canonical serialized form.
//!
//! # Design Principles
//!
//! 1. **Closed Semantics**: [`Semantic`] is an enum, and its per-pixel
//!    layout is an exhaustive match, so adding a semantic is visible at
//!    every use site.
//!
//! 2. **Permissive Construction**: the model can hold duplicate IDs, the
//!    reserved ID `0` or malformed metadata names, so that validation can
//!    report every issue at once rather than the parser stopping at the
//!    first.
//!
//! 3. **Opaque Payloads**: object and metadata content is kept as raw
//!    markup and never interpreted.
//!
//! # Example
//!
//! ```
//! use ironsegment::ir::{Content, Images, Manifest, Metadatum, Semantic};
//!
//! let mut manifest = Manifest::new(
//!     Images::new(800, 600)
//!         .with_image(1u32, Semantic::DenoiseRgb8)
//!         .with_image(2u32, Semantic::Depth16),
//! );
//! manifest
//!     .metadata
//!     .push(Metadatum::new("camera.iso", Content::text("100")));
//! ```

mod content;
mod ids;
pub mod io_manifest_xml;
mod model;
mod name;
mod semantic;

// Re-export core types for convenient access
pub use content::Content;
pub use ids::{ImageId, ObjectId, MAX_ID, MIN_ID};
pub use model::{Image, Images, Manifest, Metadatum, Object};
pub use name::{is_qualified_name, QualifiedName};
pub use semantic::{is_known, Semantic};
