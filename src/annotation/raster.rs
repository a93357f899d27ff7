// ストローク → 塗りレイヤー（ピクセル毎の被覆率）

use super::{Point, Stroke};
use crate::source::geometry::CanvasGeometry;

/// Per-pixel paint coverage in `[0, 1]`, row-major, `width * height` long.
pub type CoverageBuffer = Vec<f32>;

/// Render `strokes` in order into a fresh coverage buffer.
///
/// Each stroke is the set of points within the brush radius of its
/// polyline (round caps and joins) with a one pixel anti-aliased rim.
/// Within a stroke overlapping segments do not accumulate; across strokes
/// coverage composites source-over.
pub fn render_strokes(geometry: CanvasGeometry, strokes: &[Stroke]) -> CoverageBuffer {
    let mut layer = vec![0.0f32; geometry.pixel_count()];
    for stroke in strokes.iter().filter(|s| !s.is_empty()) {
        composite_stroke(&mut layer, geometry, stroke);
    }
    layer
}

/// Inclusive-exclusive pixel rectangle clipped to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelRect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelRect {
    fn width(&self) -> usize {
        (self.x1 - self.x0) as usize
    }

    fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Pixel rectangle touched by a disc of `reach` around every point in `points`.
fn bounding_rect(points: &[Point], reach: f32, geometry: CanvasGeometry) -> PixelRect {
    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let clamp = |v: f32, limit: u32| -> u32 { v.max(0.0).min(limit as f32) as u32 };
    PixelRect {
        x0: clamp((min_x - reach).floor(), geometry.width),
        y0: clamp((min_y - reach).floor(), geometry.height),
        x1: clamp((max_x + reach).ceil() + 1.0, geometry.width),
        y1: clamp((max_y + reach).ceil() + 1.0, geometry.height),
    }
}

fn composite_stroke(layer: &mut [f32], geometry: CanvasGeometry, stroke: &Stroke) {
    let radius = stroke.radius().get() as f32;
    let reach = radius + 1.0;
    let rect = bounding_rect(stroke.points(), reach, geometry);
    if rect.is_empty() {
        return;
    }

    // Per-stroke coverage, max over segments.
    let mut scratch = vec![0.0f32; rect.width() * (rect.y1 - rect.y0) as usize];
    let points = stroke.points();
    if points.len() == 1 {
        stamp_segment(&mut scratch, rect, geometry, points[0], points[0], radius);
    } else {
        for pair in points.windows(2) {
            stamp_segment(&mut scratch, rect, geometry, pair[0], pair[1], radius);
        }
    }

    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let src = scratch[(y - rect.y0) as usize * rect.width() + (x - rect.x0) as usize];
            if src > 0.0 {
                let dst = &mut layer[y as usize * geometry.width as usize + x as usize];
                *dst = src + *dst * (1.0 - src);
            }
        }
    }
}

fn stamp_segment(
    scratch: &mut [f32],
    stroke_rect: PixelRect,
    geometry: CanvasGeometry,
    a: Point,
    b: Point,
    radius: f32,
) {
    let seg_rect = bounding_rect(&[a, b], radius + 1.0, geometry);
    let x0 = seg_rect.x0.max(stroke_rect.x0);
    let y0 = seg_rect.y0.max(stroke_rect.y0);
    let x1 = seg_rect.x1.min(stroke_rect.x1);
    let y1 = seg_rect.y1.min(stroke_rect.y1);

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let dist = point_segment_distance(center, a, b);
            let c = coverage(dist, radius);
            if c > 0.0 {
                let idx = (y - stroke_rect.y0) as usize * stroke_rect.width()
                    + (x - stroke_rect.x0) as usize;
                if c > scratch[idx] {
                    scratch[idx] = c;
                }
            }
        }
    }
}

/// Coverage of a pixel whose centre lies `dist` from the stroke spine.
fn coverage(dist: f32, radius: f32) -> f32 {
    (radius + 0.5 - dist).clamp(0.0, 1.0)
}

/// Euclidean distance from `p` to segment `ab` (a point when `a == b`).
fn point_segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let ab2 = abx * abx + aby * aby;

    let (qx, qy) = if ab2 < 1e-6 {
        (a.x, a.y)
    } else {
        let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / ab2).clamp(0.0, 1.0);
        (a.x + t * abx, a.y + t * aby)
    };

    ((p.x - qx).powi(2) + (p.y - qy).powi(2)).sqrt()
}
