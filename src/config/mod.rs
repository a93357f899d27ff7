pub mod settings;
pub mod strokes;

use settings::Settings;
use std::path::Path;

/// Environment variable overriding `store_url`.
pub const STORE_URL_ENV: &str = "INPAINT_STORE_URL";

/// 設定ファイルを読み込む。
///
/// 明示的なパスが与えられればそれを読み込み、なければカレントディレクトリの
/// `settings.yaml` を探す。どちらもなければデフォルト設定を返す。
/// 最後に環境変数 `INPAINT_STORE_URL` があれば `store_url` を上書きする。
pub fn load_settings(explicit: Option<&Path>) -> crate::error::Result<Settings> {
    let mut settings = match explicit {
        Some(path) => Settings::from_file(path)?,
        None => {
            let default_path = Path::new("settings.yaml");
            if default_path.exists() {
                Settings::from_file(default_path)?
            } else {
                Settings::default()
            }
        }
    };

    if let Ok(url) = std::env::var(STORE_URL_ENV) {
        if !url.trim().is_empty() {
            tracing::debug!(store_url = %url, "store_url overridden from environment");
            settings.store_url = url;
        }
    }

    Ok(settings)
}
