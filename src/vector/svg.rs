//! Vector primitives and SVG serialization

use crate::models::{BorderStyle, Logo, Rgb};
use crate::render::overlay::{BorderLayout, LogoLayout};
use std::borrow::Cow;
use std::fmt::Write as _;

/// Stroke of an outlined rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Stroke colour
    pub color: Rgb,
    /// Stroke width in pixels
    pub width: f64,
    /// On/off dash lengths; `None` for a continuous line
    pub dash: Option<(u32, u32)>,
}

/// One drawing primitive, in canvas pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Axis-aligned rectangle, filled and/or stroked
    Rect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// Fill colour; `None` leaves the interior transparent
        fill: Option<Rgb>,
        /// Outline
        stroke: Option<Stroke>,
    },
    /// Embedded raster image
    Image {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// `data:` URL of the encoded image
        href: String,
    },
}

impl Primitive {
    /// Filled square without outline
    pub fn square(x: f64, y: f64, side: f64, fill: Rgb) -> Self {
        Primitive::filled(x, y, side, side, fill)
    }

    /// Filled rectangle without outline
    pub fn filled(x: f64, y: f64, width: f64, height: f64, fill: Rgb) -> Self {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
        }
    }

    fn write_svg(&self, out: &mut String) {
        match self {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    num(*x),
                    num(*y),
                    num(*width),
                    num(*height)
                );
                match fill {
                    Some(color) => {
                        let _ = write!(out, r#" fill="{color}""#);
                    }
                    None => out.push_str(r#" fill="none""#),
                }
                if let Some(stroke) = stroke {
                    let _ = write!(
                        out,
                        r#" stroke="{}" stroke-width="{}""#,
                        stroke.color,
                        num(stroke.width)
                    );
                    if let Some((on, off)) = stroke.dash {
                        let _ = write!(out, r#" stroke-dasharray="{on},{off}""#);
                    }
                }
                out.push_str("/>");
            }
            Primitive::Image {
                x,
                y,
                width,
                height,
                href,
            } => {
                let _ = write!(
                    out,
                    r#"<image x="{}" y="{}" width="{}" height="{}" href="{}" preserveAspectRatio="none"/>"#,
                    num(*x),
                    num(*y),
                    num(*width),
                    num(*height),
                    escape_attr(href)
                );
            }
        }
    }
}

/// Ordered primitives on a square canvas
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Primitives in paint order
    pub primitives: Vec<Primitive>,
}

impl VectorDocument {
    /// Empty document of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    /// Append the full-canvas background rectangle
    pub fn push_background(&mut self, color: Rgb) {
        self.primitives.push(Primitive::Rect {
            x: 0.0,
            y: 0.0,
            width: self.width as f64,
            height: self.height as f64,
            fill: Some(color),
            stroke: None,
        });
    }

    /// Append the white logo backing square and the logo image
    pub fn push_logo(&mut self, logo: &Logo, layout: &LogoLayout) {
        self.primitives.push(Primitive::square(
            layout.backing_origin(),
            layout.backing_origin(),
            layout.backing_side(),
            Rgb::WHITE,
        ));
        self.primitives.push(Primitive::Image {
            x: layout.origin,
            y: layout.origin,
            width: layout.side,
            height: layout.side,
            href: logo.to_data_url(),
        });
    }

    /// Append the border outline; `BorderStyle::None` appends nothing
    pub fn push_border(&mut self, style: BorderStyle, color: Rgb, layout: &BorderLayout) {
        if !style.is_visible() {
            return;
        }
        self.primitives.push(Primitive::Rect {
            x: layout.inset,
            y: layout.inset,
            width: layout.side,
            height: layout.side,
            fill: None,
            stroke: Some(Stroke {
                color,
                width: layout.width,
                dash: style.dash_pattern(),
            }),
        });
    }

    /// Number of `Image` primitives
    pub fn image_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Image { .. }))
            .count()
    }

    /// Serialize as a standalone SVG document
    pub fn to_svg_string(&self) -> String {
        let mut out = String::with_capacity(64 + self.primitives.len() * 64);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" shape-rendering="crispEdges">"#,
            w = self.width,
            h = self.height
        );
        for primitive in &self.primitives {
            out.push('\t');
            primitive.write_svg(&mut out);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Escape a string for use inside a double-quoted XML attribute
fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Format a coordinate without trailing zeros
fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.3}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
