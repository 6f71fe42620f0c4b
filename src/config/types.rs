use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const MAX_RECENT_PATHS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTypeTable {
    #[serde(rename = "IMAGE_FILE")]
    pub image_file: Vec<String>,
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
    #[serde(rename = "AUDIO_FILE")]
    pub audio_file: Vec<String>,
}

impl MediaTypeTable {
    #[must_use]
    pub fn is_image_file(&self, path: &Path) -> bool {
        Self::has_extension(&self.extensions_set(&self.image_file), path)
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        Self::has_extension(&self.extensions_set(&self.video_file), path)
    }

    #[must_use]
    pub fn is_audio_file(&self, path: &Path) -> bool {
        Self::has_extension(&self.extensions_set(&self.audio_file), path)
    }

    fn extensions_set(&self, extensions: &[String]) -> HashSet<String> {
        extensions.iter().map(|ext| ext.to_lowercase()).collect()
    }

    fn has_extension(extensions: &HashSet<String>, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

/// 使用者可調整的設定，持久化於 settings.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// 最近使用過的素材目錄
    pub recent_paths: Vec<String>,
    /// 背景模糊使用先降採樣再模糊的快速路徑（犧牲柔和度換速度）
    pub fast_blur: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            recent_paths: Vec::new(),
            fast_blur: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub media_type_table: MediaTypeTable,
    pub settings: UserSettings,
}
