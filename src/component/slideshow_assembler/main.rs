use super::media::{AudioTrack, MediaItem, RenderRequest};
use super::render_job::run_render_job;
use crate::config::{Config, add_recent_path, save_settings};
use crate::tools::{scan_media_files, validate_directory_exists, validate_file_exists};
use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};
use log::{error, info};
use std::path::PathBuf;

pub struct SlideshowAssembler {
    config: Config,
}

impl SlideshowAssembler {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", style("=== 幻燈片影片組合 ===").cyan().bold());

        let media_dir = self.prompt_media_directory()?;
        let directory = PathBuf::from(&media_dir);
        validate_directory_exists(&directory)?;

        println!("{}", style("掃描媒體檔案中...").dim());
        let files = scan_media_files(&directory, &self.config.media_type_table)?;

        if files.is_empty() {
            println!("{}", style("目錄中找不到任何圖片或短片").yellow());
            return Ok(());
        }

        println!(
            "{}",
            style(format!("找到 {} 個素材，依檔名排序：", files.len())).green()
        );
        for (index, file) in files.iter().enumerate() {
            println!(
                "  {}. {} ({:?})",
                index + 1,
                file.path.file_name().unwrap_or_default().to_string_lossy(),
                file.kind
            );
        }

        let audio_path = self.prompt_audio_path()?;
        validate_file_exists(&audio_path)?;
        if !self.config.media_type_table.is_audio_file(&audio_path) {
            println!(
                "{}",
                style("警告：音軌副檔名不在已知清單中，仍會嘗試探測").yellow()
            );
        }

        let output_path = self.prompt_output_path()?;
        let items: Vec<MediaItem> = files.iter().map(MediaItem::from_scanned).collect();

        let request = RenderRequest {
            items,
            audio: AudioTrack { path: audio_path },
            output_path,
        };

        println!();
        println!("{}", style("開始渲染...").cyan());
        match run_render_job(&request, self.config.settings.fast_blur) {
            Ok(output) => {
                println!(
                    "{} {}",
                    style("完成:").green().bold(),
                    output.display()
                );
                info!("渲染完成: {}", output.display());

                add_recent_path(&mut self.config.settings, &media_dir);
                if let Err(e) = save_settings(&self.config.settings) {
                    error!("設定儲存失敗: {e}");
                }
            }
            Err(e) => {
                error!("渲染任務失敗: {e}");
                return Err(e);
            }
        }

        Ok(())
    }

    fn prompt_media_directory(&self) -> Result<String> {
        if let Some(recent) = self.config.settings.recent_paths.first() {
            let reuse = Confirm::new()
                .with_prompt(format!("使用上次的素材目錄 {recent}？"))
                .default(true)
                .interact()?;
            if reuse {
                return Ok(recent.clone());
            }
        }

        let path: String = Input::new()
            .with_prompt("請輸入素材目錄路徑")
            .interact_text()?;
        Ok(path.trim().to_string())
    }

    fn prompt_audio_path(&self) -> Result<PathBuf> {
        let path: String = Input::new()
            .with_prompt("請輸入音軌檔案路徑")
            .interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }

    fn prompt_output_path(&self) -> Result<PathBuf> {
        let path: String = Input::new()
            .with_prompt("請輸入輸出影片路徑")
            .default("slideshow.mp4".to_string())
            .interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }
}
