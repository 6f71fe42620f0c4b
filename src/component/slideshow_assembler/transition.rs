use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

/// xfade 支援的轉場效果，每個接點獨立隨機挑選
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Fade,
    Dissolve,
    SlideUp,
    SlideDown,
    WipeRight,
    WipeLeft,
    CircleOpen,
    Radial,
}

pub const TRANSITION_PALETTE: [TransitionKind; 8] = [
    TransitionKind::Fade,
    TransitionKind::Dissolve,
    TransitionKind::SlideUp,
    TransitionKind::SlideDown,
    TransitionKind::WipeRight,
    TransitionKind::WipeLeft,
    TransitionKind::CircleOpen,
    TransitionKind::Radial,
];

impl TransitionKind {
    /// xfade 濾鏡的 transition 參數名稱
    #[must_use]
    pub const fn as_filter_name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Dissolve => "dissolve",
            Self::SlideUp => "slideup",
            Self::SlideDown => "slidedown",
            Self::WipeRight => "wiperight",
            Self::WipeLeft => "wipeleft",
            Self::CircleOpen => "circleopen",
            Self::Radial => "radial",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_name())
    }
}

/// 為每個接點隨機挑一個轉場效果
///
/// 隨機來源由呼叫端注入，測試可用固定種子重現同一組選擇
pub fn pick_transitions<R: Rng + ?Sized>(junction_count: usize, rng: &mut R) -> Vec<TransitionKind> {
    (0..junction_count)
        .map(|_| {
            *TRANSITION_PALETTE
                .choose(rng)
                .unwrap_or(&TransitionKind::Fade)
        })
        .collect()
}
