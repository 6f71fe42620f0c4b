mod ffmpeg_command;
mod filter_graph;
mod main;
mod media;
mod render_job;
mod timeline;
mod transition;

pub use ffmpeg_command::FfmpegCommand;
pub use filter_graph::{
    FilterGraph, TARGET_HEIGHT, TARGET_WIDTH, ZOOM_MAX, build_filter_graph,
};
pub use main::SlideshowAssembler;
pub use media::{AudioTrack, MediaItem, RenderRequest};
pub use render_job::{RenderPlan, plan_render, run_render_job, run_render_job_with_rng};
pub use timeline::{
    FRAME_RATE, INPUT_PADDING, TRANSITION_DURATION, Timeline, plan_timeline,
};
pub use transition::{TRANSITION_PALETTE, TransitionKind, pick_transitions};
