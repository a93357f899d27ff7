//! The single editing session: current source image, annotation surface
//! and last generated mask.
//!
//! Lifecycle: created empty, becomes active on the first successful load,
//! mutated by drawing, clearing and mask generation, and reset by every
//! later load.

pub mod gallery;

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::annotation::surface::AnnotationSurface;
use crate::annotation::{BrushRadius, Point, Stroke};
use crate::config::settings::Settings;
use crate::error::InpaintError;
use crate::mask::MaskImage;
use crate::mask::export::export_mask;
use crate::mask::rasterizer::rasterize;
use crate::source::SourceImage;
use crate::source::geometry::{CanvasBounds, CanvasGeometry};
use crate::source::loader::load_source;
use crate::store::{PairPayload, PairStore, SaveReceipt};

/// Lowers an in-flight flag when dropped, including when the future
/// holding it is dropped before the store answers.
struct InFlight<'a>(&'a mut bool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct Session {
    bounds: CanvasBounds,
    source: Option<SourceImage>,
    surface: AnnotationSurface,
    mask: Option<MaskImage>,
    saving: bool,
}

impl Session {
    /// An empty session; the surface starts at the full canvas bounds.
    pub fn new(bounds: CanvasBounds, brush: BrushRadius) -> Self {
        let geometry = CanvasGeometry::new(bounds.max_width, bounds.max_height);
        Self {
            bounds,
            source: None,
            surface: AnnotationSurface::new(geometry, brush),
            mask: None,
            saving: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> crate::error::Result<Self> {
        Ok(Self::new(settings.canvas_bounds(), settings.default_brush()?))
    }

    /// Decode `bytes` and make it the session's image.
    ///
    /// The new image is fully decoded and normalized before anything is
    /// committed. On success the surface is rebound to the new geometry and
    /// every stroke and the previous mask are dropped; on failure the
    /// session is left exactly as it was.
    pub fn load_image(&mut self, bytes: Vec<u8>) -> crate::error::Result<CanvasGeometry> {
        let source = match load_source(bytes, self.bounds) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "image load failed, keeping previous image");
                return Err(e);
            }
        };

        let geometry = source.geometry();
        let (natural_width, natural_height) = source.natural_size();
        self.source = Some(source);
        self.surface.reset(geometry);
        self.mask = None;

        tracing::info!(
            natural_width,
            natural_height,
            width = geometry.width,
            height = geometry.height,
            "image loaded"
        );
        Ok(geometry)
    }

    pub fn load_image_file(&mut self, path: &Path) -> crate::error::Result<CanvasGeometry> {
        let bytes = std::fs::read(path)?;
        self.load_image(bytes)
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn geometry(&self) -> CanvasGeometry {
        self.surface.geometry()
    }

    pub fn surface(&self) -> &AnnotationSurface {
        &self.surface
    }

    /// Last generated mask, if still valid.
    pub fn mask(&self) -> Option<&MaskImage> {
        self.mask.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_brush_radius(&mut self, radius: u32) -> crate::error::Result<()> {
        self.surface.set_brush_radius(BrushRadius::new(radius)?);
        Ok(())
    }

    fn require_image(&self) -> crate::error::Result<&SourceImage> {
        self.source
            .as_ref()
            .ok_or_else(|| InpaintError::validation("No image loaded"))
    }

    pub fn begin_stroke(&mut self, point: Point) -> crate::error::Result<()> {
        self.require_image()?;
        self.surface.begin_stroke(point);
        Ok(())
    }

    pub fn extend_stroke(&mut self, point: Point) -> crate::error::Result<()> {
        self.require_image()?;
        self.surface.extend_stroke(point)
    }

    pub fn end_stroke(&mut self) -> bool {
        self.surface.end_stroke()
    }

    pub fn push_stroke(&mut self, stroke: Stroke) -> crate::error::Result<()> {
        self.require_image()?;
        self.surface.push_stroke(stroke);
        Ok(())
    }

    /// Drop every stroke and the generated mask.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.mask = None;
        tracing::debug!("canvas cleared");
    }

    /// Rasterize the committed strokes into a new mask, replacing the
    /// previous one. A stroke still in progress is not included.
    pub fn generate_mask(&mut self) -> crate::error::Result<&MaskImage> {
        self.require_image()?;
        let mask = rasterize(&self.surface);
        tracing::info!(
            strokes = self.surface.strokes().len(),
            painted = mask.painted_pixel_count(),
            digest = %mask.digest(),
            "mask generated"
        );
        Ok(self.mask.insert(mask))
    }

    /// Write the generated mask to disk (`mask.png` inside `dest` when
    /// `dest` is a directory).
    pub fn export_mask(&self, dest: &Path) -> crate::error::Result<PathBuf> {
        let mask = self
            .mask
            .as_ref()
            .ok_or_else(|| InpaintError::validation("No mask generated"))?;
        export_mask(mask, dest)
    }

    /// Source image with the strokes drawn over it.
    pub fn preview(&self) -> crate::error::Result<RgbaImage> {
        let source = self.require_image()?;
        self.surface.preview(source.normalized())
    }

    /// Start a save: validate, encode both images and raise the in-flight flag.
    ///
    /// Rejected without side effects when a save is already running or
    /// when either the image or the mask is missing.
    pub fn begin_save(&mut self) -> crate::error::Result<PairPayload> {
        if self.saving {
            return Err(InpaintError::busy("Save already in progress"));
        }
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| InpaintError::validation("Cannot save without an image"))?;
        let mask = self
            .mask
            .as_ref()
            .ok_or_else(|| InpaintError::validation("Cannot save without a generated mask"))?;

        let payload = PairPayload::new(source.normalized_png()?, mask.to_png()?)?;
        self.saving = true;
        Ok(payload)
    }

    /// Lower the in-flight flag and pass the store's answer through.
    pub fn finish_save(
        &mut self,
        result: crate::error::Result<SaveReceipt>,
    ) -> crate::error::Result<SaveReceipt> {
        self.saving = false;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "save failed");
        }
        result
    }

    /// `begin_save`, upload, `finish_save`.
    ///
    /// Dropping the returned future mid-upload also lowers the flag.
    pub async fn save<S: PairStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> crate::error::Result<SaveReceipt> {
        let payload = self.begin_save()?;
        let result = {
            let _in_flight = InFlight(&mut self.saving);
            store.save(&payload).await
        };
        self.finish_save(result)
    }
}
