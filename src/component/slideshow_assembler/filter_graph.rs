use super::media::MediaItem;
use super::timeline::{FRAME_RATE, TRANSITION_DURATION, Timeline};
use super::transition::TransitionKind;
use crate::tools::MediaFileKind;
use std::fmt::Write as _;

/// 輸出畫布（直式 9:16）
pub const TARGET_WIDTH: u32 = 1080;
pub const TARGET_HEIGHT: u32 = 1920;

/// 前景內縮框，留白邊後形成拍立得效果
pub const FOREGROUND_BOX_WIDTH: u32 = 850;
pub const FOREGROUND_BOX_HEIGHT: u32 = 1800;

/// 白框寬度（每邊，左右合計 80px）
pub const BORDER_WIDTH: u32 = 40;

/// 緩慢放大的上限倍率
pub const ZOOM_MAX: f64 = 1.06;

/// 快速模糊路徑的降採樣尺寸
const FAST_BLUR_WIDTH: u32 = 270;
const FAST_BLUR_HEIGHT: u32 = 480;

/// 一條具名濾鏡鏈：輸入串流標籤 → 若干濾鏡 → 輸出串流標籤
#[derive(Debug, Clone)]
pub struct FilterChain {
    inputs: Vec<String>,
    steps: Vec<String>,
    outputs: Vec<String>,
}

impl FilterChain {
    fn new(inputs: Vec<String>, output: impl Into<String>) -> Self {
        Self {
            inputs,
            steps: Vec::new(),
            outputs: vec![output.into()],
        }
    }

    fn new_multi(inputs: Vec<String>, outputs: Vec<String>) -> Self {
        Self {
            inputs,
            steps: Vec::new(),
            outputs,
        }
    }

    fn step(mut self, filter: impl Into<String>) -> Self {
        self.steps.push(filter.into());
        self
    }

    /// 序列化成 ffmpeg 濾鏡鏈語法：`[in]f1,f2[out]`
    fn serialize(&self) -> String {
        let mut out = String::new();
        for input in &self.inputs {
            let _ = write!(out, "[{input}]");
        }
        out.push_str(&self.steps.join(","));
        for output in &self.outputs {
            let _ = write!(out, "[{output}]");
        }
        out
    }
}

/// 組合完成的濾鏡圖，只在邊界序列化成 ffmpeg 文字語法
#[derive(Debug, Clone)]
pub struct FilterGraph {
    chains: Vec<FilterChain>,
    output_label: String,
}

impl FilterGraph {
    /// 最終影像串流的標籤（供 -map 使用）
    #[must_use]
    pub fn output_label(&self) -> &str {
        &self.output_label
    }

    /// 序列化成 -filter_complex 參數字串
    #[must_use]
    pub fn serialize(&self) -> String {
        self.chains
            .iter()
            .map(FilterChain::serialize)
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// 建構整個濾鏡圖
///
/// 每個素材經過固定的五段處理：模糊背景、內縮前景、白框、置中
/// 合成、緩慢放大（短片素材改為正規化幀率與尺寸）。素材之間以
/// xfade 兩兩串接，最後輸出單一影像串流。單一素材時不經過任何
/// 轉場，直接輸出該素材的合成結果。
///
/// `transitions.len()` 必須等於 `timeline.junction_offsets.len()`。
#[must_use]
pub fn build_filter_graph(
    items: &[MediaItem],
    timeline: &Timeline,
    transitions: &[TransitionKind],
    fast_blur: bool,
) -> FilterGraph {
    debug_assert_eq!(transitions.len(), timeline.junction_offsets.len());

    let mut chains = Vec::new();

    for (i, item) in items.iter().enumerate() {
        // 同一個輸入串流被背景與前景各用一次，必須先 split
        chains.push(
            FilterChain::new_multi(
                vec![format!("{i}:v")],
                vec![format!("src{i}a"), format!("src{i}b")],
            )
            .step("split=2"),
        );
        chains.push(background_chain(i, fast_blur));
        chains.push(foreground_chain(i));
        chains.push(composite_chain(i, item, timeline));
    }

    // 以 xfade 兩兩串接：[v0][v1] -> xf1，[xf1][v2] -> xf2 ...
    let mut previous = "v0".to_string();
    let junction_count = timeline.junction_offsets.len();
    for (j, (&kind, &offset)) in transitions
        .iter()
        .zip(timeline.junction_offsets.iter())
        .enumerate()
    {
        let output = if j + 1 == junction_count {
            "vout".to_string()
        } else {
            format!("xf{}", j + 1)
        };
        chains.push(
            FilterChain::new(vec![previous.clone(), format!("v{}", j + 1)], output.clone()).step(format!(
                "xfade=transition={}:duration={TRANSITION_DURATION}:offset={offset:.3}",
                kind.as_filter_name()
            )),
        );
        previous = output;
    }

    FilterGraph {
        chains,
        output_label: previous,
    }
}

/// 背景層：覆蓋縮放裁切到滿版，再大半徑模糊並稍微壓暗
fn background_chain(index: usize, fast_blur: bool) -> FilterChain {
    let chain = FilterChain::new(vec![format!("src{index}a")], format!("bg{index}"));
    if fast_blur {
        // 先降採樣再模糊再放大，速度快但模糊較生硬
        chain
            .step(format!(
                "scale={FAST_BLUR_WIDTH}:{FAST_BLUR_HEIGHT}:force_original_aspect_ratio=increase"
            ))
            .step(format!("crop={FAST_BLUR_WIDTH}:{FAST_BLUR_HEIGHT}"))
            .step("boxblur=luma_radius=10:luma_power=1")
            .step(format!("scale={TARGET_WIDTH}:{TARGET_HEIGHT}"))
            .step("eq=brightness=-0.08")
            .step("setsar=1")
    } else {
        chain
            .step(format!(
                "scale={TARGET_WIDTH}:{TARGET_HEIGHT}:force_original_aspect_ratio=increase"
            ))
            .step(format!("crop={TARGET_WIDTH}:{TARGET_HEIGHT}"))
            .step("boxblur=luma_radius=32:luma_power=2")
            .step("eq=brightness=-0.08")
            .step("setsar=1")
    }
}

/// 前景層：等比縮小到內縮框內，四邊加白框
fn foreground_chain(index: usize) -> FilterChain {
    FilterChain::new(vec![format!("src{index}b")], format!("fg{index}"))
        .step(format!(
            "scale={FOREGROUND_BOX_WIDTH}:{FOREGROUND_BOX_HEIGHT}:force_original_aspect_ratio=decrease"
        ))
        .step(format!(
            "pad=iw+{pad}:ih+{pad}:{BORDER_WIDTH}:{BORDER_WIDTH}:color=white",
            pad = BORDER_WIDTH * 2
        ))
}

/// 合成層：前景置中疊在背景上，加上說明文字與緩慢放大
fn composite_chain(index: usize, item: &MediaItem, timeline: &Timeline) -> FilterChain {
    let mut chain = FilterChain::new(
        vec![format!("bg{index}"), format!("fg{index}")],
        format!("v{index}"),
    )
    .step("overlay=(W-w)/2:(H-h)/2");

    if let Some(caption) = &item.caption {
        chain = chain.step(drawtext_filter(caption));
    }

    chain = match item.kind {
        // 靜態圖片：線性放大到上限，模擬鏡頭推進
        MediaFileKind::Image => chain.step(format!(
            "zoompan=z='min(1+{growth:.2}*on/{frames},{ZOOM_MAX})':\
             x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':d=1:\
             s={TARGET_WIDTH}x{TARGET_HEIGHT}:fps={FRAME_RATE}",
            growth = ZOOM_MAX - 1.0,
            frames = timeline.frames_per_item()
        ))
        .step("setsar=1"),
        // 短片素材本身已有動態，只正規化幀率與尺寸
        MediaFileKind::Video => chain
            .step(format!("fps={FRAME_RATE}"))
            .step(format!("scale={TARGET_WIDTH}:{TARGET_HEIGHT}"))
            .step("setsar=1"),
    };

    chain.step("format=yuv420p")
}

/// 置中說明文字，帶黑邊與陰影
fn drawtext_filter(caption: &str) -> String {
    format!(
        "drawtext=text={}:fontcolor=white:fontsize=52:borderw=4:bordercolor=black:\
         shadowx=3:shadowy=3:shadowcolor=black@0.6:x=(w-text_w)/2:y=h*0.55",
        escape_drawtext(caption)
    )
}

/// 將任意文字包成 drawtext 可接受的引號字串
///
/// 單引號在引號區段內無法直接出現，需用 '\'' 的斷開接回寫法
fn escape_drawtext(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('\'', "'\\''");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::slideshow_assembler::timeline::plan_timeline;
    use std::path::PathBuf;

    fn image_items(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem {
                path: PathBuf::from(format!("/media/{i:02}.jpg")),
                kind: MediaFileKind::Image,
                caption: None,
            })
            .collect()
    }

    #[test]
    fn test_chain_serialization() {
        let chain = FilterChain::new(vec!["0:v".to_string()], "bg0")
            .step("scale=1080:1920")
            .step("boxblur=2");
        assert_eq!(chain.serialize(), "[0:v]scale=1080:1920,boxblur=2[bg0]");
    }

    #[test]
    fn test_graph_has_one_xfade_per_junction() {
        let items = image_items(3);
        let timeline = plan_timeline(3, 10.0).unwrap();
        let transitions = vec![TransitionKind::Fade, TransitionKind::Radial];
        let graph = build_filter_graph(&items, &timeline, &transitions, false);
        let text = graph.serialize();

        // 每個素材一組 split（背景、前景各取一路）
        assert_eq!(text.matches("split=2").count(), 3);
        assert!(text.contains("[0:v]split=2[src0a][src0b]"));

        assert_eq!(text.matches("xfade=").count(), 2);
        assert!(text.contains("xfade=transition=fade:duration=1:offset=3.000"));
        assert!(text.contains("xfade=transition=radial:duration=1:offset=6.000"));
        assert_eq!(graph.output_label(), "vout");
    }

    #[test]
    fn test_single_item_bypasses_xfade() {
        let items = image_items(1);
        let timeline = plan_timeline(1, 5.0).unwrap();
        let graph = build_filter_graph(&items, &timeline, &[], false);
        let text = graph.serialize();

        assert!(!text.contains("xfade"));
        assert_eq!(graph.output_label(), "v0");
    }

    #[test]
    fn test_image_item_gets_zoompan() {
        let items = image_items(1);
        let timeline = plan_timeline(1, 4.0).unwrap();
        let text = build_filter_graph(&items, &timeline, &[], false).serialize();

        assert!(text.contains("zoompan=z='min(1+0.06"));
        assert!(text.contains("/120,1.06)'"));
        assert!(text.contains("s=1080x1920"));
    }

    #[test]
    fn test_video_item_skips_zoompan() {
        let items = vec![MediaItem {
            path: PathBuf::from("/media/clip.mp4"),
            kind: MediaFileKind::Video,
            caption: None,
        }];
        let timeline = plan_timeline(1, 4.0).unwrap();
        let text = build_filter_graph(&items, &timeline, &[], false).serialize();

        assert!(!text.contains("zoompan"));
        assert!(text.contains("fps=30"));
    }

    #[test]
    fn test_polaroid_frame_dimensions() {
        let items = image_items(1);
        let timeline = plan_timeline(1, 4.0).unwrap();
        let text = build_filter_graph(&items, &timeline, &[], false).serialize();

        assert!(text.contains("scale=850:1800:force_original_aspect_ratio=decrease"));
        assert!(text.contains("pad=iw+80:ih+80:40:40:color=white"));
        assert!(text.contains("overlay=(W-w)/2:(H-h)/2"));
    }

    #[test]
    fn test_fast_blur_downsamples_first() {
        let items = image_items(1);
        let timeline = plan_timeline(1, 4.0).unwrap();
        let text = build_filter_graph(&items, &timeline, &[], true).serialize();

        assert!(text.contains("scale=270:480:force_original_aspect_ratio=increase"));
        assert!(text.contains("boxblur=luma_radius=10"));
    }

    #[test]
    fn test_caption_adds_drawtext() {
        let mut items = image_items(1);
        items[0].caption = Some("超值優惠".to_string());
        let timeline = plan_timeline(1, 4.0).unwrap();
        let text = build_filter_graph(&items, &timeline, &[], false).serialize();

        assert!(text.contains("drawtext=text='超值優惠'"));
    }

    #[test]
    fn test_escape_drawtext_quotes() {
        assert_eq!(escape_drawtext("abc"), "'abc'");
        assert_eq!(escape_drawtext("it's"), "'it'\\''s'");
        assert_eq!(escape_drawtext("a\\b"), "'a\\\\b'");
    }
}
