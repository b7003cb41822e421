//! SVG document reading and writing.
//!
//! Reading goes through `roxmltree` and only collects what the cleanup passes
//! need: the declared canvas size, the root `viewBox`, and every `<path>`
//! element's geometry plus its non-`d` attributes. Writing rebuilds a minimal
//! standalone SVG by string assembly.

use crate::error::{Error, Result};
use crate::geom::Bounds;
use crate::parse::parse_path_data;
use crate::path::{Path, Segment};
use std::fmt::Write as _;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Canvas size used when the document declares none.
pub const DEFAULT_DIMENSION: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

/// A parsed SVG map: declared canvas dimensions plus drawable paths.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub width: f64,
    pub height: f64,
    pub view_box: Option<ViewBox>,
    pub paths: Vec<Path>,
}

impl MapDocument {
    pub fn from_str(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)?;
        let root = doc.root_element();

        let width = parse_dimension(root.attribute("width"), "width")?;
        let height = parse_dimension(root.attribute("height"), "height")?;
        let view_box = root.attribute("viewBox").and_then(parse_view_box);

        let mut paths = Vec::new();
        for node in doc.descendants().filter(is_svg_path) {
            let Some(d) = node.attribute("d") else {
                continue;
            };
            let mut path = parse_path_data(d)?;
            path.attributes = node
                .attributes()
                .filter(|a| a.name() != "d")
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect();
            if !path.is_empty() {
                paths.push(path);
            }
        }

        tracing::debug!(paths = paths.len(), width, height, "parsed svg document");
        Ok(Self {
            width,
            height,
            view_box,
            paths,
        })
    }

    pub fn read_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Refit the declared canvas and viewBox to the given bounds.
    pub fn fit_to(&mut self, bounds: Bounds) {
        self.width = bounds.width();
        self.height = bounds.height();
        self.view_box = Some(ViewBox::from_bounds(bounds));
    }

    pub fn to_svg_string(&self) -> String {
        let vb = self.view_box.unwrap_or(ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: self.width,
            height: self.height,
        });

        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            &mut out,
            r#"<svg xmlns="{SVG_NS}" width="{}px" height="{}px" viewBox="{} {} {} {}">"#,
            fmt_num(self.width),
            fmt_num(self.height),
            fmt_num(vb.min_x),
            fmt_num(vb.min_y),
            fmt_num(vb.width),
            fmt_num(vb.height),
        );
        for path in &self.paths {
            out.push_str("  <path d=\"");
            write_path_data(&mut out, path);
            out.push('"');
            for (name, value) in &path.attributes {
                let _ = write!(&mut out, r#" {name}="{}""#, escape_attr(value));
            }
            out.push_str("/>\n");
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_file(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path, self.to_svg_string())?;
        Ok(())
    }
}

fn is_svg_path(node: &roxmltree::Node) -> bool {
    let tag = node.tag_name();
    tag.name() == "path" && matches!(tag.namespace(), None | Some(SVG_NS))
}

fn parse_dimension(value: Option<&str>, name: &str) -> Result<f64> {
    let Some(raw) = value else {
        return Ok(DEFAULT_DIMENSION);
    };
    let trimmed = raw.trim().trim_end_matches("px").trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidDimension {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

fn parse_view_box(raw: &str) -> Option<ViewBox> {
    let mut it = raw.split_whitespace();
    let min_x = it.next()?.parse().ok()?;
    let min_y = it.next()?.parse().ok()?;
    let width = it.next()?.parse().ok()?;
    let height = it.next()?.parse().ok()?;
    Some(ViewBox {
        min_x,
        min_y,
        width,
        height,
    })
}

fn write_path_data(out: &mut String, path: &Path) {
    for (idx, seg) in path.segments.iter().enumerate() {
        if idx != 0 {
            out.push(' ');
        }
        match *seg {
            Segment::Move { end, .. } => {
                let _ = write!(out, "M {} {}", fmt_num(end.x), fmt_num(end.y));
            }
            Segment::Line { end, .. } => {
                let _ = write!(out, "L {} {}", fmt_num(end.x), fmt_num(end.y));
            }
            Segment::Cubic {
                ctrl1, ctrl2, end, ..
            } => {
                let _ = write!(
                    out,
                    "C {} {}, {} {}, {} {}",
                    fmt_num(ctrl1.x),
                    fmt_num(ctrl1.y),
                    fmt_num(ctrl2.x),
                    fmt_num(ctrl2.y),
                    fmt_num(end.x),
                    fmt_num(end.y)
                );
            }
            Segment::Quadratic { ctrl, end, .. } => {
                let _ = write!(
                    out,
                    "Q {} {}, {} {}",
                    fmt_num(ctrl.x),
                    fmt_num(ctrl.y),
                    fmt_num(end.x),
                    fmt_num(end.y)
                );
            }
            Segment::Arc {
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                end,
                ..
            } => {
                let _ = write!(
                    out,
                    "A {} {} {} {} {} {} {}",
                    fmt_num(rx),
                    fmt_num(ry),
                    fmt_num(x_rotation),
                    u8::from(large_arc),
                    u8::from(sweep),
                    fmt_num(end.x),
                    fmt_num(end.y)
                );
            }
        }
    }
    // Closes were resolved to explicit lines at parse time, so the trailing Z
    // is redundant geometry-wise; it keeps the closed flag stable on re-read.
    if path.closed && !path.segments.is_empty() {
        out.push_str(" Z");
    }
}

/// Stringify a coordinate for SVG attributes: round-trippable decimal form,
/// but without `-0` or tiny float noise from our own arithmetic.
fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
