use std::path::Path;

use serde::Deserialize;

use crate::annotation::BrushRadius;
use crate::source::geometry::CanvasBounds;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store_url: String,
    pub max_width: u32,
    pub max_height: u32,
    pub brush_radius: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            store_url: "http://localhost:8000".to_string(),
            max_width: 800,
            max_height: 600,
            brush_radius: 20,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        let settings: Settings = serde_yml::from_str(yaml).map_err(|e| {
            crate::error::InpaintError::config(format!("Failed to parse settings YAML: {e}"))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// 値の範囲を検証する。
    ///
    /// - キャンバス上限は両方とも 1 以上
    /// - ブラシ半径は 1-50
    /// - ストア URL は空でないこと
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(crate::error::InpaintError::config(format!(
                "Canvas bounds must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        BrushRadius::new(self.brush_radius)
            .map_err(|e| crate::error::InpaintError::config(e.to_string()))?;
        if self.store_url.trim().is_empty() {
            return Err(crate::error::InpaintError::config(
                "store_url cannot be empty",
            ));
        }
        Ok(())
    }

    pub fn canvas_bounds(&self) -> CanvasBounds {
        CanvasBounds {
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    /// 検証済みのブラシ半径。`validate` を通過していれば失敗しない。
    pub fn default_brush(&self) -> crate::error::Result<BrushRadius> {
        BrushRadius::new(self.brush_radius)
    }
}
