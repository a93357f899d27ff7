//! Free-form paint surface bound to the canvas geometry.
//!
//! Brush colour is always white and the background always black; the
//! background only exists for display and never reaches the paint layer.
//! Points are recorded exactly as given (no lazy-cursor smoothing).

use image::{Rgba, RgbaImage};

use super::raster::render_strokes;
use super::{BrushRadius, PaintLayerSource, Point, Stroke};
use crate::error::InpaintError;
use crate::source::geometry::CanvasGeometry;

/// Brush colour of every stroke.
pub const BRUSH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Display background behind the source image.
pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Debug, Clone)]
pub struct AnnotationSurface {
    geometry: CanvasGeometry,
    brush: BrushRadius,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
}

impl AnnotationSurface {
    pub fn new(geometry: CanvasGeometry, brush: BrushRadius) -> Self {
        Self {
            geometry,
            brush,
            strokes: Vec::new(),
            active: None,
        }
    }

    pub fn geometry(&self) -> CanvasGeometry {
        self.geometry
    }

    pub fn brush_radius(&self) -> BrushRadius {
        self.brush
    }

    /// Applies to strokes started after this call.
    pub fn set_brush_radius(&mut self, brush: BrushRadius) {
        self.brush = brush;
    }

    /// Start a new stroke at `point` with the current brush radius.
    ///
    /// A stroke still in progress is committed first.
    pub fn begin_stroke(&mut self, point: Point) {
        self.end_stroke();
        self.active = Some(Stroke::new(vec![point], self.brush));
    }

    pub fn extend_stroke(&mut self, point: Point) -> crate::error::Result<()> {
        match self.active.as_mut() {
            Some(stroke) => {
                stroke.push(point);
                Ok(())
            }
            None => Err(InpaintError::validation("No stroke in progress")),
        }
    }

    /// Commit the stroke in progress. Returns `false` when there was none.
    pub fn end_stroke(&mut self) -> bool {
        match self.active.take() {
            Some(stroke) => {
                tracing::debug!(
                    points = stroke.points().len(),
                    radius = stroke.radius().get(),
                    "stroke committed"
                );
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Append a complete stroke. Strokes without points are ignored.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.end_stroke();
        if !stroke.is_empty() {
            self.strokes.push(stroke);
        }
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Discard every stroke, including one in progress.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }

    /// Rebind to a new geometry, discarding all strokes.
    pub fn reset(&mut self, geometry: CanvasGeometry) {
        self.clear();
        self.geometry = geometry;
    }

    /// What the user sees: strokes painted over `source`.
    ///
    /// `source` must match the surface geometry so strokes align with it
    /// pixel for pixel.
    pub fn preview(&self, source: &RgbaImage) -> crate::error::Result<RgbaImage> {
        if source.dimensions() != (self.geometry.width, self.geometry.height) {
            return Err(InpaintError::validation(format!(
                "Preview source is {}x{}, surface is {}x{}",
                source.width(),
                source.height(),
                self.geometry.width,
                self.geometry.height
            )));
        }

        let coverage = render_strokes(self.geometry, &self.strokes);
        let mut out = RgbaImage::from_pixel(
            self.geometry.width,
            self.geometry.height,
            BACKGROUND_COLOR,
        );
        for ((dst, src), &c) in out.pixels_mut().zip(source.pixels()).zip(&coverage) {
            // Source sits on the opaque background, strokes on top.
            let src_alpha = f32::from(src[3]) / 255.0;
            for ch in 0..3 {
                let under = f32::from(src[ch]) * src_alpha
                    + f32::from(BACKGROUND_COLOR[ch]) * (1.0 - src_alpha);
                let v = f32::from(BRUSH_COLOR[ch]) * c + under * (1.0 - c);
                dst[ch] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
        Ok(out)
    }
}

impl PaintLayerSource for AnnotationSurface {
    fn geometry(&self) -> CanvasGeometry {
        self.geometry
    }

    fn export_paint_layer(&self) -> RgbaImage {
        let coverage = render_strokes(self.geometry, &self.strokes);
        let mut layer = RgbaImage::new(self.geometry.width, self.geometry.height);
        for (px, &c) in layer.pixels_mut().zip(&coverage) {
            if c > 0.0 {
                let alpha = (c * 255.0).round().clamp(0.0, 255.0) as u8;
                *px = Rgba([BRUSH_COLOR[0], BRUSH_COLOR[1], BRUSH_COLOR[2], alpha]);
            }
        }
        layer
    }
}
