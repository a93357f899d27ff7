// マスクのローカル保存（ネットワーク不要）

use std::path::{Path, PathBuf};

use super::MaskImage;

/// File name of an exported or uploaded mask.
pub const MASK_FILE_NAME: &str = "mask.png";

/// Write `mask` as PNG.
///
/// If `dest` is an existing directory the file is written as
/// `<dest>/mask.png`; otherwise `dest` is used as the file path. Returns
/// the path actually written.
pub fn export_mask(mask: &MaskImage, dest: &Path) -> crate::error::Result<PathBuf> {
    let path = if dest.is_dir() {
        dest.join(MASK_FILE_NAME)
    } else {
        dest.to_path_buf()
    };

    let png = mask.to_png()?;
    std::fs::write(&path, png)?;
    tracing::info!(path = %path.display(), "mask exported");
    Ok(path)
}
