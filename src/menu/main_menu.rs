use crate::config::Config;
use crate::menu::handlers;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;

/// 顯示主選單，回傳 false 表示使用者選擇離開
pub fn show_main_menu(term: &Term, config: &mut Config) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== 幻燈片影片產生器 ===").cyan().bold());
    println!();

    let options = vec!["組合幻燈片影片", "設定", "離開"];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on(term)?;

    match selection {
        0 => {
            handlers::run_slideshow_assembler(term, config)?;
            Ok(true)
        }
        1 => {
            handlers::run_settings(term, config)?;
            Ok(true)
        }
        2 => Ok(false),
        _ => unreachable!(),
    }
}
