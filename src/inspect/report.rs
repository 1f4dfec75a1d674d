//! Inspect report types and terminal formatting.

use std::fmt;

use serde::Serialize;

/// The result of inspecting a container.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Format version from the header, as `major.minor`.
    pub version: String,
    /// Size of the manifest region in bytes.
    pub manifest_bytes: u64,
    /// Total size of all planes in bytes.
    pub plane_bytes: u64,
    /// Size of the whole stream in bytes.
    pub total_bytes: u64,
    pub canvas: CanvasSection,
    /// Planes in stream order.
    pub planes: Vec<PlaneEntry>,
    pub objects: Vec<ObjectEntry>,
    pub metadata: Vec<MetaEntry>,
}

/// The shared canvas of every plane.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CanvasSection {
    pub width: u32,
    pub height: u32,
    pub pixels: u64,
}

/// One plane and its position in the stream.
#[derive(Clone, Debug, Serialize)]
pub struct PlaneEntry {
    pub image_id: u32,
    pub semantic: String,
    pub bytes_per_pixel: u32,
    pub offset: u64,
    pub length: u64,
}

/// One declared object.
#[derive(Clone, Debug, Serialize)]
pub struct ObjectEntry {
    pub id: u32,
    /// Shortened content.
    pub preview: String,
}

/// One metadata entry.
#[derive(Clone, Debug, Serialize)]
pub struct MetaEntry {
    pub name: String,
    /// Shortened content.
    pub preview: String,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "╭─────────────────────────────────────────────────────────────╮")?;
        writeln!(f, "│              📦  Container Inspection Report                │")?;
        writeln!(f, "╰─────────────────────────────────────────────────────────────╯")?;
        writeln!(f)?;

        self.fmt_summary(f)?;
        writeln!(f)?;
        self.fmt_planes(f)?;
        writeln!(f)?;
        self.fmt_entries(f)?;

        Ok(())
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.canvas;

        section_header(f, "Summary")?;
        row(f, &format!("Version:       {}", self.version))?;
        row(
            f,
            &format!(
                "Canvas:        {} x {} ({} pixels)",
                c.width,
                c.height,
                format_number(c.pixels)
            ),
        )?;
        row(f, "")?;
        row(f, &format!("Manifest:      {} bytes", format_number(self.manifest_bytes)))?;
        row(f, &format!("Planes:        {} bytes", format_number(self.plane_bytes)))?;
        row(f, &format!("Total:         {} bytes", format_number(self.total_bytes)))?;
        section_footer(f)
    }

    fn fmt_planes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section_header(f, &format!("Planes ({})", self.planes.len()))?;

        if self.planes.is_empty() {
            row(f, "No images declared.")?;
        } else {
            row(f, &format!("{:>10}  {:<18} {:>12} {:>12}", "ID", "Semantic", "Offset", "Length"))?;
            for p in &self.planes {
                row(
                    f,
                    &format!(
                        "{:>10}  {:<18} {:>12} {:>12}",
                        p.image_id,
                        p.semantic,
                        format_number(p.offset),
                        format_number(p.length)
                    ),
                )?;
            }
        }

        section_footer(f)
    }

    fn fmt_entries(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section_header(f, &format!("Objects ({})", self.objects.len()))?;
        if self.objects.is_empty() {
            row(f, "No objects declared.")?;
        }
        for o in &self.objects {
            row(f, &format!("{:>10}  {}", o.id, o.preview))?;
        }
        section_footer(f)?;

        writeln!(f)?;

        section_header(f, &format!("Metadata ({})", self.metadata.len()))?;
        if self.metadata.is_empty() {
            row(f, "No metadata.")?;
        }
        for m in &self.metadata {
            row(f, &format!("{:<24} {}", truncate(&m.name, 24), m.preview))?;
        }
        section_footer(f)
    }
}

const INNER_WIDTH: usize = 59;

fn section_header(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let used = title.chars().count() + 3;
    writeln!(f, "┌─ {} {}┐", title, "─".repeat(INNER_WIDTH.saturating_sub(used)))?;
    row(f, "")
}

fn section_footer(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    row(f, "")?;
    writeln!(f, "└{}┘", "─".repeat(INNER_WIDTH))
}

/// Writes one boxed line, padding the text to the box width.
fn row(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let padding = (INNER_WIDTH - 3).saturating_sub(text.chars().count());
    writeln!(f, "│   {}{}│", text, " ".repeat(padding))
}

/// Format a number with thousands separators.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len - 1).collect();
        format!("{kept}…")
    }
}
