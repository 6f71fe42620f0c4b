use crate::component::SlideshowAssembler;
use crate::config::{Config, save_settings};
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Confirm;

pub fn run_slideshow_assembler(term: &Term, config: &mut Config) -> Result<()> {
    let mut assembler = SlideshowAssembler::new(config.clone());

    if let Err(e) = assembler.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    // 元件內可能更新了最近路徑，重新載入設定
    *config = Config::new()?;

    pause(term)?;
    Ok(())
}

pub fn run_settings(term: &Term, config: &mut Config) -> Result<()> {
    println!("{}", style("=== 設定 ===").cyan().bold());

    let fast_blur = Confirm::new()
        .with_prompt("背景模糊使用快速路徑（速度快、柔和度較低）？")
        .default(config.settings.fast_blur)
        .interact()?;

    config.settings.fast_blur = fast_blur;
    save_settings(&config.settings)?;
    println!("{}", style("設定已儲存").green());

    pause(term)?;
    Ok(())
}
