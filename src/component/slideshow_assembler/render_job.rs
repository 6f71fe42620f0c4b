use super::ffmpeg_command::FfmpegCommand;
use super::filter_graph::build_filter_graph;
use super::media::{AudioTrack, MediaItem, RenderRequest};
use super::timeline::{Timeline, plan_timeline};
use super::transition::{TransitionKind, pick_transitions};
use crate::tools::{ensure_directory_exists, probe_duration, validate_file_exists};
use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// 時間表加上每個接點選定的轉場效果
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub timeline: Timeline,
    pub transitions: Vec<TransitionKind>,
}

/// 計算時間表並為每個接點挑選轉場
///
/// 音軌時長必須先探測完成才能呼叫，探測失敗時整個任務在此之前
/// 就已中止
pub fn plan_render<R: Rng + ?Sized>(
    item_count: usize,
    audio_duration: f64,
    rng: &mut R,
) -> Result<RenderPlan> {
    let timeline = plan_timeline(item_count, audio_duration)?;
    let transitions = pick_transitions(timeline.junction_offsets.len(), rng);

    Ok(RenderPlan {
        timeline,
        transitions,
    })
}

/// 執行一次完整的渲染任務
///
/// 探測音軌 → 計算時間表 → 複製素材到暫存工作區 → 單次呼叫
/// ffmpeg。任務不可分段重試；暫存工作區在任何結束路徑（成功、
/// 編碼失敗、錯誤）都會隨 TempDir 的 Drop 一併清除。
pub fn run_render_job(request: &RenderRequest, fast_blur: bool) -> Result<PathBuf> {
    run_render_job_with_rng(request, fast_blur, &mut rand::thread_rng())
}

/// 同 [`run_render_job`]，但隨機來源由呼叫端注入（測試用固定種子）
pub fn run_render_job_with_rng<R: Rng + ?Sized>(
    request: &RenderRequest,
    fast_blur: bool,
    rng: &mut R,
) -> Result<PathBuf> {
    if request.items.is_empty() {
        bail!("渲染任務沒有任何視覺素材");
    }
    for item in &request.items {
        validate_file_exists(&item.path)?;
    }
    validate_file_exists(&request.audio.path)?;

    // 音軌時長探測失敗時立刻中止，不會走到濾鏡圖與編碼器
    let audio_duration = probe_duration(&request.audio.path)?;
    info!(
        "音軌時長 {:.2}s，{} 個素材",
        audio_duration,
        request.items.len()
    );

    let plan = plan_render(request.items.len(), audio_duration, rng)?;
    debug!(
        "display={:.3}s offsets={:?} transitions={:?}",
        plan.timeline.display_duration, plan.timeline.junction_offsets, plan.transitions
    );

    let workspace = TempDir::new().context("無法建立暫存工作區")?;
    let staged = materialize_inputs(request, workspace.path())?;

    let graph = build_filter_graph(&staged.items, &plan.timeline, &plan.transitions, fast_blur);

    if let Some(parent) = request.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }

    let command = FfmpegCommand::new(
        &staged.items,
        &staged.audio,
        &plan.timeline,
        &graph,
        &request.output_path,
    );

    execute_encoder(&command)?;

    if !request.output_path.exists() {
        bail!("編碼器結束但輸出檔案未建立: {}", request.output_path.display());
    }

    info!("輸出完成: {}", request.output_path.display());
    Ok(request.output_path.clone())
}

struct StagedInputs {
    items: Vec<MediaItem>,
    audio: AudioTrack,
}

/// 將所有輸入複製到暫存工作區，之後編碼器只讀工作區內的副本
fn materialize_inputs(request: &RenderRequest, workspace: &Path) -> Result<StagedInputs> {
    let mut items = Vec::with_capacity(request.items.len());
    for (i, item) in request.items.iter().enumerate() {
        let staged_path = workspace.join(staged_name("item", i, &item.path));
        fs::copy(&item.path, &staged_path)
            .with_context(|| format!("無法複製素材到工作區: {}", item.path.display()))?;
        items.push(MediaItem {
            path: staged_path,
            kind: item.kind,
            caption: item.caption.clone(),
        });
    }

    let audio_path = workspace.join(staged_name("audio", 0, &request.audio.path));
    fs::copy(&request.audio.path, &audio_path)
        .with_context(|| format!("無法複製音軌到工作區: {}", request.audio.path.display()))?;

    Ok(StagedInputs {
        items,
        audio: AudioTrack { path: audio_path },
    })
}

/// 工作區內的檔名：保留原始副檔名讓解多工器正確判型
fn staged_name(prefix: &str, index: usize, original: &Path) -> String {
    match original.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{prefix}_{index:03}.{ext}"),
        None => format!("{prefix}_{index:03}"),
    }
}

/// 單次阻塞呼叫編碼器，失敗時原樣回報 stderr 診斷文字
fn execute_encoder(command: &FfmpegCommand) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("ffmpeg 渲染中...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let output = command
        .build_command()
        .output()
        .context("無法執行 ffmpeg")?;

    spinner.finish_and_clear();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffmpeg 編碼失敗:\n{}", stderr.trim());
    }

    Ok(())
}
