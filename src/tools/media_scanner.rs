use crate::config::MediaTypeTable;
use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 媒體檔案種類（靜態圖片或動態短片）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFileKind {
    Image,
    Video,
}

#[derive(Debug, Clone)]
pub struct MediaFileInfo {
    pub path: PathBuf,
    pub kind: MediaFileKind,
}

/// 掃描目錄中的圖片與短片檔案
///
/// 只掃描第一層，依檔名排序（檔名順序即投影片順序）
pub fn scan_media_files(directory: &Path, table: &MediaTypeTable) -> Result<Vec<MediaFileInfo>> {
    let mut files: Vec<MediaFileInfo> = WalkDir::new(directory)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            let kind = if table.is_image_file(&path) {
                MediaFileKind::Image
            } else if table.is_video_file(&path) {
                MediaFileKind::Video
            } else {
                debug!("略過非媒體檔案: {}", path.display());
                return None;
            };
            Some(MediaFileInfo { path, kind })
        })
        .collect();

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

    Ok(files)
}
