//! SVG serialization of a [`CardLayout`]

use crate::element::{
    CardLayout, Color, ElementKind, GradientDirection, Paint, Point, TextAnchor, VisualElement,
};
use std::fmt::Write;

pub const FONT_FAMILY: &str =
    "Inter, 'Segoe UI', 'Noto Sans', 'DejaVu Sans', sans-serif, 'Noto Color Emoji'";

/// Ratio of font size from the top of the line box to the baseline
const BASELINE_RATIO: f32 = 0.85;

/// Serialize the layout as a standalone SVG document.
pub fn to_svg(layout: &CardLayout) -> String {
    let mut writer = SvgWriter::default();
    writer.element(&layout.root);

    let mut out = String::with_capacity(writer.body.len() + writer.defs.len() + 256);
    let _ = write!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>\n",
        w = layout.width,
        h = layout.height
    );
    if !writer.defs.is_empty() {
        out.push_str("  <defs>\n");
        out.push_str(&writer.defs);
        out.push_str("  </defs>\n");
    }
    out.push_str(&writer.body);
    out.push_str("</svg>\n");
    out
}

#[derive(Default)]
struct SvgWriter {
    defs: String,
    body: String,
    gradients: usize,
    depth: usize,
}

impl SvgWriter {
    fn element(&mut self, el: &VisualElement) {
        match el.kind {
            ElementKind::Container => self.container(el),
            ElementKind::Rectangle => {
                let attrs = self.shape_attrs(el);
                self.line(&format!("<rect{}{}/>", rect_attrs(el), attrs));
            }
            ElementKind::LinePath => {
                let attrs = self.shape_attrs(el);
                self.line(&format!(
                    "<path{} d='{}' stroke-linejoin='round' stroke-linecap='round'{}/>",
                    id_attr(el),
                    path_data(&el.points, el.closed),
                    attrs
                ));
            }
            ElementKind::PointMarker => {
                let attrs = self.shape_attrs(el);
                self.line(&format!(
                    "<circle{} cx='{}' cy='{}' r='{}'{}/>",
                    id_attr(el),
                    num(el.bounds.center_x()),
                    num(el.bounds.center_y()),
                    num(el.bounds.width.min(el.bounds.height) / 2.0),
                    attrs
                ));
            }
            kind if kind.is_text() => self.text(el),
            _ => {}
        }
    }

    fn container(&mut self, el: &VisualElement) {
        let opacity = if el.style.opacity < 1.0 {
            format!(" opacity='{}'", num(el.style.opacity))
        } else {
            String::new()
        };
        self.line(&format!("<g{}{}>", id_attr(el), opacity));
        self.depth += 1;

        if el.style.fill.is_some() || el.style.stroke.is_some() {
            let attrs = self.shape_attrs(el);
            self.line(&format!("<rect{}{}/>", rect_attrs(el), attrs));
        }
        for child in &el.children {
            self.element(child);
        }

        self.depth -= 1;
        self.line("</g>");
    }

    fn text(&mut self, el: &VisualElement) {
        let Some(text) = el.text.as_deref() else {
            return;
        };
        let style = &el.style;
        let (x, anchor) = match style.text_anchor {
            TextAnchor::Start => (el.bounds.x, "start"),
            TextAnchor::Middle => (el.bounds.center_x(), "middle"),
            TextAnchor::End => (el.bounds.right(), "end"),
        };
        let fill = match &style.fill {
            Some(paint) => self.paint("fill", paint),
            None => style
                .text_color
                .map(|c| color_attr("fill", c))
                .unwrap_or_default(),
        };

        self.line(&format!(
            "<text{} x='{}' y='{}' font-family=\"{}\" font-size='{}' font-weight='{}' text-anchor='{}'{}>{}</text>",
            id_attr(el),
            num(x),
            num(el.bounds.y + style.font_size * BASELINE_RATIO),
            FONT_FAMILY,
            num(style.font_size),
            style.font_weight,
            anchor,
            fill,
            escape_xml(text)
        ));
    }

    /// fill / stroke / opacity attributes for a shape
    fn shape_attrs(&mut self, el: &VisualElement) -> String {
        let style = &el.style;
        let mut attrs = match &style.fill {
            Some(paint) => self.paint("fill", paint),
            None => " fill='none'".to_string(),
        };
        if let Some(stroke) = style.stroke {
            attrs.push_str(&color_attr("stroke", stroke));
            let _ = write!(attrs, " stroke-width='{}'", num(style.stroke_width));
        }
        if el.kind != ElementKind::Container && style.opacity < 1.0 {
            let _ = write!(attrs, " opacity='{}'", num(style.opacity));
        }
        attrs
    }

    fn paint(&mut self, attr: &str, paint: &Paint) -> String {
        match paint {
            Paint::Solid(color) => color_attr(attr, *color),
            Paint::LinearGradient { direction, stops } => {
                let id = self.gradient(*direction, stops);
                format!(" {}='url(#{})'", attr, id)
            }
        }
    }

    fn gradient(&mut self, direction: GradientDirection, stops: &[Color]) -> String {
        self.gradients += 1;
        let id = format!("grad-{}", self.gradients);
        let (x2, y2) = match direction {
            GradientDirection::Vertical => (0, 1),
            GradientDirection::Horizontal => (1, 0),
            GradientDirection::Diagonal => (1, 1),
        };

        let _ = writeln!(
            self.defs,
            "    <linearGradient id='{}' x1='0' y1='0' x2='{}' y2='{}'>",
            id, x2, y2
        );
        let last = stops.len().saturating_sub(1).max(1) as f32;
        for (i, stop) in stops.iter().enumerate() {
            let _ = write!(
                self.defs,
                "      <stop offset='{}%' stop-color='{}'",
                num(i as f32 / last * 100.0),
                stop.to_hex()
            );
            if stop.a < 1.0 {
                let _ = write!(self.defs, " stop-opacity='{}'", num(stop.a));
            }
            self.defs.push_str("/>\n");
        }
        self.defs.push_str("    </linearGradient>\n");
        id
    }

    fn line(&mut self, s: &str) {
        for _ in 0..=self.depth {
            self.body.push_str("  ");
        }
        self.body.push_str(s);
        self.body.push('\n');
    }
}

fn id_attr(el: &VisualElement) -> String {
    el.id
        .as_deref()
        .map(|id| format!(" id='{}'", escape_xml(id)))
        .unwrap_or_default()
}

fn rect_attrs(el: &VisualElement) -> String {
    let b = el.bounds;
    let mut attrs = format!(
        "{} x='{}' y='{}' width='{}' height='{}'",
        id_attr(el),
        num(b.x),
        num(b.y),
        num(b.width),
        num(b.height)
    );
    if el.style.corner_radius > 0.0 {
        // Keep the radius within the box so zero-height bars stay flat.
        let r = el
            .style
            .corner_radius
            .min(b.width / 2.0)
            .min(b.height / 2.0);
        let _ = write!(attrs, " rx='{}'", num(r));
    }
    attrs
}

fn color_attr(attr: &str, color: Color) -> String {
    let mut out = format!(" {}='{}'", attr, color.to_hex());
    if color.a < 1.0 {
        let _ = write!(out, " {}-opacity='{}'", attr, num(color.a));
    }
    out
}

fn path_data(points: &[Point], closed: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{} {} ", cmd, num(p.x), num(p.y));
    }
    if closed && !points.is_empty() {
        d.push('Z');
    }
    d.trim_end().to_string()
}

/// Two decimals, trailing zeros dropped
fn num(v: f32) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
