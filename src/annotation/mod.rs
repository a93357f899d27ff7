pub mod raster;
pub mod surface;

use image::RgbaImage;

use crate::error::InpaintError;
use crate::source::geometry::CanvasGeometry;

/// Smallest brush radius accepted, in pixels.
pub const MIN_BRUSH_RADIUS: u32 = 1;
/// Largest brush radius accepted, in pixels.
pub const MAX_BRUSH_RADIUS: u32 = 50;
/// Brush radius of a fresh session.
pub const DEFAULT_BRUSH_RADIUS: u32 = 20;

/// A pointer position in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Brush radius in pixels, guaranteed to lie in 1-50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BrushRadius(u32);

impl BrushRadius {
    pub fn new(radius: u32) -> crate::error::Result<Self> {
        if !(MIN_BRUSH_RADIUS..=MAX_BRUSH_RADIUS).contains(&radius) {
            return Err(InpaintError::validation(format!(
                "Brush radius must be {MIN_BRUSH_RADIUS}-{MAX_BRUSH_RADIUS}, got {radius}"
            )));
        }
        Ok(Self(radius))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BrushRadius {
    fn default() -> Self {
        Self(DEFAULT_BRUSH_RADIUS)
    }
}

/// One continuous paint gesture with a fixed brush radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    radius: BrushRadius,
}

impl Stroke {
    pub fn new(points: Vec<Point>, radius: BrushRadius) -> Self {
        Self { points, radius }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn radius(&self) -> BrushRadius {
        self.radius
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

/// Something that can hand out its paint layer as an owned raster.
///
/// The layer is transparent where nothing was painted and white (with
/// coverage in the alpha channel) where strokes landed. Background and
/// source-image pixels are never part of it.
pub trait PaintLayerSource {
    fn geometry(&self) -> CanvasGeometry;

    fn export_paint_layer(&self) -> RgbaImage;
}
