use crate::config::types::{Config, MediaTypeTable, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 編譯時嵌入的媒體副檔名設定（不需要外部檔案）
const MEDIA_EXTENSIONS_JSON: &str = include_str!("../data/media_extensions.json");

impl Config {
    pub fn new() -> Result<Self> {
        let media_type_table = MediaTypeTable::embedded()?;
        let settings = Self::load_settings().unwrap_or_default();

        Ok(Self {
            media_type_table,
            settings,
        })
    }

    fn load_settings() -> Result<UserSettings> {
        let path = Path::new("settings.json");
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}

impl MediaTypeTable {
    /// 從編譯時嵌入的 JSON 載入副檔名表
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(MEDIA_EXTENSIONS_JSON).context("無法解析嵌入的媒體副檔名設定")
    }
}
