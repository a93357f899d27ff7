use std::path::Path;

use serde::Deserialize;

use crate::annotation::{BrushRadius, Point, Stroke};
use crate::error::InpaintError;

/// Strokes to replay onto an annotation surface, read from YAML.
///
/// ```yaml
/// strokes:
///   - radius: 12
///     points: [[10, 10], [120, 40]]
///   - points: [[300.5, 200]]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StrokeScript {
    pub strokes: Vec<StrokeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrokeEntry {
    /// Brush radius for this stroke; the surface's current radius when absent.
    pub radius: Option<u32>,
    pub points: Vec<[f32; 2]>,
}

impl StrokeScript {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            InpaintError::config(format!("Failed to parse stroke script YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Resolve every entry into a [`Stroke`], filling missing radii with
    /// `default_radius`.
    ///
    /// Entries without points and radii outside 1-50 are rejected.
    pub fn to_strokes(&self, default_radius: BrushRadius) -> crate::error::Result<Vec<Stroke>> {
        self.strokes
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if entry.points.is_empty() {
                    return Err(InpaintError::config(format!(
                        "Stroke {i} has no points"
                    )));
                }
                let radius = match entry.radius {
                    Some(r) => BrushRadius::new(r).map_err(|e| {
                        InpaintError::config(format!("Stroke {i}: {e}"))
                    })?,
                    None => default_radius,
                };
                let points = entry
                    .points
                    .iter()
                    .map(|&[x, y]| Point::new(x, y))
                    .collect();
                Ok(Stroke::new(points, radius))
            })
            .collect()
    }
}
