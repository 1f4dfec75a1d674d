//! Manifest XML reader and writer.
//!
//! The manifest is a namespaced XML document:
//!
//! ```text
//! Manifest
//!  ├─ Images [Width, Height]
//!  │   └─ Image* [ID, Semantic]
//!  ├─ Objects
//!  │   └─ Object* [ID] (opaque mixed content)
//!  └─ Metadata
//!      └─ Meta* [Name] (opaque mixed content)
//! ```
//!
//! Parsing enforces the grammar (element names and order, required and
//! unknown attributes, numeric ranges, the semantic enumeration). Rules
//! that span elements, such as ID uniqueness, are left to
//! [`crate::validation`].

use std::fmt::Write as _;

use roxmltree::{Document, Node};

use super::content::Content;
use super::model::{Image, Images, Manifest, Metadatum, Object};
use super::name::QualifiedName;
use super::{ImageId, ObjectId, Semantic};
use crate::error::IronSegmentError;

/// The XML namespace of version 1 manifests.
pub const MANIFEST_NAMESPACE: &str = "urn:com.io7m.ironsegment:manifest:1";

/// Parse a manifest from a string.
pub fn from_manifest_str(xml: &str) -> Result<Manifest, IronSegmentError> {
    let document = Document::parse(xml).map_err(|source| schema_violation(source.to_string()))?;

    let root = document.root_element();
    expect_element(root, "Manifest")?;
    check_attributes(root, &[], "<Manifest>")?;

    let sections = structural_children(root, "<Manifest>")?;
    let [images_node, objects_node, metadata_node] = sections.as_slice() else {
        return Err(schema_violation(format!(
            "<Manifest> must contain exactly <Images>, <Objects> and <Metadata>; found {} element(s)",
            sections.len()
        )));
    };

    let images = parse_images(*images_node)?;
    let objects = parse_objects(*objects_node, xml)?;
    let metadata = parse_metadata(*metadata_node, xml)?;

    Ok(Manifest {
        images,
        objects,
        metadata,
    })
}

/// Parse a manifest from bytes (must be valid UTF-8).
pub fn from_manifest_slice(bytes: &[u8]) -> Result<Manifest, IronSegmentError> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|source| schema_violation(format!("manifest is not valid UTF-8: {source}")))?;
    from_manifest_str(xml)
}

/// Serialize a manifest to its canonical XML form.
///
/// Images, objects and metadata are written in declaration order. Content is
/// written verbatim.
pub fn to_manifest_string(manifest: &Manifest) -> String {
    let mut xml = String::new();
    writeln!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>").expect("write to string");
    writeln!(xml, "<Manifest xmlns=\"{MANIFEST_NAMESPACE}\">").expect("write to string");

    let images = &manifest.images;
    if images.images.is_empty() {
        writeln!(
            xml,
            "  <Images Width=\"{}\" Height=\"{}\"/>",
            images.width, images.height
        )
        .expect("write to string");
    } else {
        writeln!(
            xml,
            "  <Images Width=\"{}\" Height=\"{}\">",
            images.width, images.height
        )
        .expect("write to string");
        for image in &images.images {
            writeln!(
                xml,
                "    <Image ID=\"{}\" Semantic=\"{}\"/>",
                image.id, image.semantic
            )
            .expect("write to string");
        }
        writeln!(xml, "  </Images>").expect("write to string");
    }

    if manifest.objects.is_empty() {
        writeln!(xml, "  <Objects/>").expect("write to string");
    } else {
        writeln!(xml, "  <Objects>").expect("write to string");
        for object in &manifest.objects {
            writeln!(
                xml,
                "    <Object ID=\"{}\"{}>{}</Object>",
                object.id,
                object.content.declarations(),
                object.content.as_markup()
            )
            .expect("write to string");
        }
        writeln!(xml, "  </Objects>").expect("write to string");
    }

    if manifest.metadata.is_empty() {
        writeln!(xml, "  <Metadata/>").expect("write to string");
    } else {
        writeln!(xml, "  <Metadata>").expect("write to string");
        for meta in &manifest.metadata {
            writeln!(
                xml,
                "    <Meta Name=\"{}\"{}>{}</Meta>",
                escape_attr(meta.name.as_str()),
                meta.content.declarations(),
                meta.content.as_markup()
            )
            .expect("write to string");
        }
        writeln!(xml, "  </Metadata>").expect("write to string");
    }

    writeln!(xml, "</Manifest>").expect("write to string");
    xml
}

fn parse_images(node: Node<'_, '_>) -> Result<Images, IronSegmentError> {
    expect_element(node, "Images")?;
    check_attributes(node, &["Width", "Height"], "<Images>")?;
    let width = parse_required_u32_attr(node, "Width", "<Images>")?;
    let height = parse_required_u32_attr(node, "Height", "<Images>")?;

    let mut images = Vec::new();
    for child in structural_children(node, "<Images>")? {
        expect_element(child, "Image")?;
        check_attributes(child, &["ID", "Semantic"], "<Image>")?;
        let id = parse_required_u32_attr(child, "ID", "<Image>")?;
        let semantic: Semantic = required_attr(child, "Semantic", "<Image>")?.parse()?;
        images.push(Image::new(ImageId::new(id), semantic));
    }

    Ok(Images {
        width,
        height,
        images,
    })
}

fn parse_objects(node: Node<'_, '_>, xml: &str) -> Result<Vec<Object>, IronSegmentError> {
    expect_element(node, "Objects")?;
    check_attributes(node, &[], "<Objects>")?;

    let mut objects = Vec::new();
    for child in structural_children(node, "<Objects>")? {
        expect_element(child, "Object")?;
        check_attributes(child, &["ID"], "<Object>")?;
        let id = parse_required_u32_attr(child, "ID", "<Object>")?;
        objects.push(Object::new(ObjectId::new(id), inner_content(child, xml)));
    }
    Ok(objects)
}

fn parse_metadata(node: Node<'_, '_>, xml: &str) -> Result<Vec<Metadatum>, IronSegmentError> {
    expect_element(node, "Metadata")?;
    check_attributes(node, &[], "<Metadata>")?;

    let mut metadata = Vec::new();
    for child in structural_children(node, "<Metadata>")? {
        expect_element(child, "Meta")?;
        check_attributes(child, &["Name"], "<Meta>")?;
        let name = required_attr(child, "Name", "<Meta>")?;
        metadata.push(Metadatum::new(
            QualifiedName::new(name),
            inner_content(child, xml),
        ));
    }
    Ok(metadata)
}

/// Returns the element children of a structural node.
///
/// Whitespace, comments and processing instructions are skipped; any other
/// text is a schema violation.
fn structural_children<'a, 'input>(
    node: Node<'a, 'input>,
    context: &str,
) -> Result<Vec<Node<'a, 'input>>, IronSegmentError> {
    let mut out = Vec::new();
    for child in node.children() {
        if child.is_element() {
            out.push(child);
        } else if child.is_text() {
            let text = child.text().unwrap_or("");
            if !text.trim().is_empty() {
                return Err(schema_violation(format!(
                    "unexpected text '{}' in {context}",
                    text.trim()
                )));
            }
        }
    }
    Ok(out)
}

/// Returns the exact source text between the start and end tags of `node`,
/// together with the prefixed namespaces in scope on `node`.
fn inner_content(node: Node<'_, '_>, xml: &str) -> Content {
    let markup = if node.has_children() {
        let element = &xml[node.range()];
        let start = start_tag_len(element);
        let end = element.rfind("</").unwrap_or(element.len());
        element.get(start..end).unwrap_or("")
    } else {
        ""
    };

    node.namespaces()
        .filter_map(|ns| ns.name().map(|prefix| (prefix, ns.uri())))
        .filter(|(prefix, _)| *prefix != "xml")
        .fold(Content::markup(markup), |content, (prefix, uri)| {
            content.with_namespace(prefix, uri)
        })
}

/// Length of the start tag at the beginning of `element`, including `>`.
fn start_tag_len(element: &str) -> usize {
    let mut quote = None;
    for (idx, ch) in element.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(open), c) if c == open => quote = None,
            (None, '>') => return idx + 1,
            _ => {}
        }
    }
    element.len()
}

fn expect_element(node: Node<'_, '_>, name: &str) -> Result<(), IronSegmentError> {
    let tag = node.tag_name();
    if tag.name() != name || tag.namespace() != Some(MANIFEST_NAMESPACE) {
        let found = match tag.namespace() {
            Some(ns) => format!("{{{ns}}}{}", tag.name()),
            None => tag.name().to_string(),
        };
        return Err(schema_violation(format!(
            "expected <{name}> in namespace '{MANIFEST_NAMESPACE}', found <{found}>"
        )));
    }
    Ok(())
}

fn check_attributes(
    node: Node<'_, '_>,
    allowed: &[&str],
    context: &str,
) -> Result<(), IronSegmentError> {
    for attr in node.attributes() {
        if attr.namespace().is_some() || !allowed.contains(&attr.name()) {
            return Err(schema_violation(format!(
                "unexpected attribute '{}' in {context}",
                attr.name()
            )));
        }
    }
    Ok(())
}

fn required_attr<'a>(
    node: Node<'a, '_>,
    attr: &str,
    context: &str,
) -> Result<&'a str, IronSegmentError> {
    node.attribute(attr)
        .ok_or_else(|| schema_violation(format!("missing '{attr}' attribute in {context}")))
}

fn parse_required_u32_attr(
    node: Node<'_, '_>,
    attr: &str,
    context: &str,
) -> Result<u32, IronSegmentError> {
    let raw = required_attr(node, attr, context)?;
    raw.trim().parse::<u32>().map_err(|_| {
        schema_violation(format!(
            "invalid '{attr}' value '{raw}' in {context}; expected unsigned 32-bit integer"
        ))
    })
}

fn schema_violation(message: impl Into<String>) -> IronSegmentError {
    IronSegmentError::SchemaViolation {
        message: message.into(),
    }
}

/// Escapes an attribute value so that whitespace survives normalization.
pub(crate) fn escape_attr(raw: &str) -> String {
    xml_escape(raw)
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

pub(crate) fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
