//! Positioned, styled element tree handed to a renderer

use crate::Theme;

/// Axis-aligned box in canvas pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Shrink by `pad` on every side
    pub fn inset(&self, pad: f32) -> Self {
        Self::new(
            self.x + pad,
            self.y + pad,
            (self.width - 2.0 * pad).max(0.0),
            (self.height - 2.0 * pad).max(0.0),
        )
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::hex(0xffffff);

    /// Opaque color from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    /// Top to bottom
    Vertical,
    /// Left to right
    Horizontal,
    /// Top-left to bottom-right
    Diagonal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Stops are spread evenly along the gradient axis
    LinearGradient {
        direction: GradientDirection,
        stops: Vec<Color>,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Shape fill; for text elements this overrides `text_color`
    pub fill: Option<Paint>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    pub corner_radius: f32,
    pub font_size: f32,
    pub font_weight: u16,
    pub text_color: Option<Color>,
    pub text_anchor: TextAnchor,
    pub opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 0.0,
            font_size: 16.0,
            font_weight: 400,
            text_color: None,
            text_anchor: TextAnchor::Start,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Container,
    Heading,
    Paragraph,
    Rectangle,
    LinePath,
    PointMarker,
    TextLabel,
}

impl ElementKind {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Heading | Self::Paragraph | Self::TextLabel)
    }
}

/// A node of the layout tree. Children paint in order, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualElement {
    pub kind: ElementKind,
    pub id: Option<String>,
    pub bounds: Rect,
    pub style: Style,
    pub text: Option<String>,
    /// Vertices of a `LinePath`
    pub points: Vec<Point>,
    /// Closed paths are filled polygons, open ones are polylines
    pub closed: bool,
    pub children: Vec<VisualElement>,
}

impl VisualElement {
    pub fn new(kind: ElementKind, bounds: Rect) -> Self {
        Self {
            kind,
            id: None,
            bounds,
            style: Style::default(),
            text: None,
            points: Vec::new(),
            closed: false,
            children: Vec::new(),
        }
    }

    pub fn container(bounds: Rect) -> Self {
        Self::new(ElementKind::Container, bounds)
    }

    pub fn rect(bounds: Rect, fill: impl Into<Paint>) -> Self {
        Self::new(ElementKind::Rectangle, bounds).fill(fill)
    }

    /// Text element whose box is one line tall at `font_size`
    pub fn text(
        kind: ElementKind,
        x: f32,
        y: f32,
        width: f32,
        text: impl Into<String>,
        font_size: f32,
        color: Color,
    ) -> Self {
        let mut el = Self::new(kind, Rect::new(x, y, width, line_height(font_size)));
        el.text = Some(text.into());
        el.style.font_size = font_size;
        el.style.text_color = Some(color);
        el
    }

    /// Path through `points`; bounds are the points' bounding box
    pub fn path(points: Vec<Point>, closed: bool) -> Self {
        let mut el = Self::new(ElementKind::LinePath, bounding_box(&points));
        el.points = points;
        el.closed = closed;
        el
    }

    pub fn marker(center: Point, radius: f32) -> Self {
        Self::new(
            ElementKind::PointMarker,
            Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0),
        )
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn fill(mut self, paint: impl Into<Paint>) -> Self {
        self.style.fill = Some(paint.into());
        self
    }

    pub fn stroke(mut self, color: Color, width: f32) -> Self {
        self.style.stroke = Some(color);
        self.style.stroke_width = width;
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.style.corner_radius = radius;
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.style.font_weight = weight;
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.style.text_anchor = anchor;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.style.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn child(mut self, child: VisualElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = VisualElement>) -> Self {
        self.children.extend(children);
        self
    }

    /// Pre-order walk: self first, then children in paint order
    pub fn walk(&self) -> Vec<&VisualElement> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(el.children.iter().rev());
        }
        out
    }
}

/// Line box height for a font size
pub fn line_height(font_size: f32) -> f32 {
    font_size * 1.2
}

fn bounding_box(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// A fully resolved card, ready for rasterization
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    /// Requested theme. Recorded only; colors do not depend on it.
    pub theme: Theme,
    pub root: VisualElement,
}

impl CardLayout {
    pub fn elements(&self) -> Vec<&VisualElement> {
        self.root.walk()
    }

    pub fn find(&self, id: &str) -> Option<&VisualElement> {
        self.elements()
            .into_iter()
            .find(|el| el.id.as_deref() == Some(id))
    }

    /// All elements whose id starts with `prefix`, in paint order
    pub fn find_prefixed(&self, prefix: &str) -> Vec<&VisualElement> {
        self.elements()
            .into_iter()
            .filter(|el| el.id.as_deref().is_some_and(|id| id.starts_with(prefix)))
            .collect()
    }
}
