use crate::tools::{MediaFileInfo, MediaFileKind};
use std::path::PathBuf;

/// 一個輸入視覺素材（圖片或短片），載入後不再變動
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub path: PathBuf,
    pub kind: MediaFileKind,
    /// 疊在畫面上的說明文字（可選）
    pub caption: Option<String>,
}

impl MediaItem {
    #[must_use]
    pub fn from_scanned(file: &MediaFileInfo) -> Self {
        Self {
            path: file.path.clone(),
            kind: file.kind,
            caption: None,
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// 旁白或配樂音軌，時長一律透過探測取得
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub path: PathBuf,
}

/// 一次渲染任務的完整輸入，建立後不可變
///
/// 所有參數都放在這個結構裡傳遞，不依賴任何跨呼叫的隱藏狀態
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub items: Vec<MediaItem>,
    pub audio: AudioTrack,
    pub output_path: PathBuf,
}
