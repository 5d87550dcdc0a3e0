//! ghcard Card Builder
//!
//! Lays out the stats card as a tree of positioned elements and rasterizes
//! it to PNG.

pub mod element;
mod layout;
mod render;
pub mod svg;

pub use element::{CardLayout, Color, ElementKind, Paint, Rect, VisualElement};
pub use layout::{
    build_error_layout, build_layout, heatmap_fill, LayoutOptions, ERROR_CARD_MESSAGE, TITLE,
};
pub use render::{CardRenderer, SvgRenderer};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Expected {expected} monthly samples, got {actual}")]
    SeriesLength { expected: usize, actual: usize },

    #[error("Expected {expected} heatmap cells, got {actual}")]
    HeatmapSize { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("SVG parse failed: {0}")]
    Parse(#[from] usvg::Error),

    #[error("Cannot allocate {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Output image size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Full stats card
    pub const CARD: Canvas = Canvas::new(1200, 800);
    /// Fallback shown when a card cannot be built
    pub const ERROR: Canvas = Canvas::new(800, 400);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Requested color theme.
///
/// Accepted and carried through to the layout, but every theme currently
/// draws the same dark palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Neon,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Dark, Theme::Light, Theme::Neon];

    /// Unknown or missing names fall back to [`Theme::Dark`]
    pub fn parse(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Neon => "neon",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "neon" => Ok(Theme::Neon),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the monthly series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bars,
    /// Filled area under a stroked line with point markers
    Area,
}

impl ChartKind {
    pub fn parse(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" | "bars" => Ok(ChartKind::Bars),
            "area" | "line" => Ok(ChartKind::Area),
            other => Err(format!("unknown chart kind: {}", other)),
        }
    }
}
