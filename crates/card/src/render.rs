//! PNG rasterization

use crate::element::CardLayout;
use crate::svg::to_svg;
use crate::RenderError;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns a finished layout into encoded image bytes.
pub trait CardRenderer: Send + Sync {
    fn render(&self, layout: &CardLayout) -> Result<Vec<u8>, RenderError>;

    /// MIME type of the bytes produced by [`CardRenderer::render`]
    fn content_type(&self) -> &'static str {
        "image/png"
    }
}

/// Renders through SVG markup with resvg.
#[derive(Clone)]
pub struct SvgRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRenderer {
    /// Renderer with an empty font database; text is skipped.
    pub fn new() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    /// Renderer using the fonts installed on this machine
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        info!(faces = db.len(), "Loaded system fonts");

        Self {
            fontdb: Arc::new(db),
        }
    }

    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CardRenderer for SvgRenderer {
    fn render(&self, layout: &CardLayout) -> Result<Vec<u8>, RenderError> {
        let svg = to_svg(layout);

        let opt = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opt)?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(
            RenderError::Allocation {
                width: size.width(),
                height: size.height(),
            },
        )?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))?;

        debug!(
            width = layout.width,
            height = layout.height,
            bytes = png.len(),
            "Rendered card"
        );
        Ok(png)
    }
}
