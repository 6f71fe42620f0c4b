use anyhow::{Result, bail};

/// 輸出影格率（fps）
pub const FRAME_RATE: u32 = 30;

/// 相鄰素材之間轉場效果的混合時間（秒）
pub const TRANSITION_DURATION: f64 = 1.0;

/// 每個輸入來源多要求的尾端緩衝時間（秒）
///
/// 轉場期間編碼器仍需從前一個來源取樣，緩衝不足會造成畫面凍結；
/// 多出來的長度會被轉場圖自然裁掉
pub const INPUT_PADDING: f64 = 3.0;

/// 依素材數量與音軌時長計算出的播放時間表
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// 每個素材的顯示時間（秒），所有素材一致
    pub display_duration: f64,
    /// 每個轉場接點的起始時間（秒），共 n-1 筆
    pub junction_offsets: Vec<f64>,
}

impl Timeline {
    /// 每個輸入來源應要求的長度（顯示時間加尾端緩衝）
    #[must_use]
    pub fn source_duration(&self) -> f64 {
        self.display_duration + INPUT_PADDING
    }

    /// 素材顯示期間的影格數
    #[must_use]
    pub fn frames_per_item(&self) -> u32 {
        (self.display_duration * f64::from(FRAME_RATE)).round() as u32
    }
}

/// 計算時間表
///
/// `display_duration = (A + (n-1) * T) / n`，使 n 個素材扣掉 n-1 段
/// 轉場重疊後剛好等於音軌長度。單一素材時直接以音軌長度顯示、
/// 不安排轉場。
///
/// 轉場時間不得大於等於顯示時間，否則接點時間會歸零或變負
/// （會產生編碼器無法接受的轉場圖），這種輸入直接拒絕。
pub fn plan_timeline(item_count: usize, audio_duration: f64) -> Result<Timeline> {
    if item_count == 0 {
        bail!("至少需要一個視覺素材");
    }
    if audio_duration <= 0.0 {
        bail!("音軌時長無效（{audio_duration:.3}s），無法計算時間表");
    }

    if item_count == 1 {
        return Ok(Timeline {
            display_duration: audio_duration,
            junction_offsets: Vec::new(),
        });
    }

    let n = item_count as f64;
    let display_duration = (audio_duration + (n - 1.0) * TRANSITION_DURATION) / n;

    if display_duration <= TRANSITION_DURATION {
        bail!(
            "音軌太短：{item_count} 個素材每個只分到 {display_duration:.2}s，\
             不足以容納 {TRANSITION_DURATION:.1}s 的轉場"
        );
    }

    let step = display_duration - TRANSITION_DURATION;
    let junction_offsets = (1..item_count).map(|i| step * i as f64).collect();

    Ok(Timeline {
        display_duration,
        junction_offsets,
    })
}
