use super::filter_graph::FilterGraph;
use super::media::{AudioTrack, MediaItem};
use super::timeline::{FRAME_RATE, Timeline};
use crate::tools::MediaFileKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 單次 ffmpeg 渲染呼叫的參數組裝
pub struct FfmpegCommand {
    args: Vec<String>,
    output_path: PathBuf,
}

impl FfmpegCommand {
    #[must_use]
    pub fn new(
        items: &[MediaItem],
        audio: &AudioTrack,
        timeline: &Timeline,
        graph: &FilterGraph,
        output_path: &Path,
    ) -> Self {
        let mut args: Vec<String> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
        ];

        let source_duration = format!("{:.3}", timeline.source_duration());
        for item in items {
            match item.kind {
                // 靜態圖片循環成影像串流，長度為顯示時間加尾端緩衝
                MediaFileKind::Image => {
                    args.extend([
                        "-loop".into(),
                        "1".into(),
                        "-framerate".into(),
                        FRAME_RATE.to_string(),
                        "-t".into(),
                        source_duration.clone(),
                    ]);
                }
                MediaFileKind::Video => {
                    args.extend(["-t".into(), source_duration.clone()]);
                }
            }
            args.push("-i".into());
            args.push(item.path.to_string_lossy().to_string());
        }

        let audio_input_index = items.len();
        args.push("-i".into());
        args.push(audio.path.to_string_lossy().to_string());

        args.extend([
            "-filter_complex".into(),
            graph.serialize(),
            "-map".into(),
            format!("[{}]", graph.output_label()),
            "-map".into(),
            format!("{audio_input_index}:a"),
            "-c:v".into(),
            "libx264".into(),
            "-preset".into(),
            "veryfast".into(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-r".into(),
            FRAME_RATE.to_string(),
            "-c:a".into(),
            "aac".into(),
            "-b:a".into(),
            "192k".into(),
            // 影像長度已依音軌計算，-shortest 只是保險鉗
            "-shortest".into(),
        ]);
        args.push(output_path.to_string_lossy().to_string());

        Self {
            args,
            output_path: output_path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(&self.args);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::slideshow_assembler::filter_graph::build_filter_graph;
    use crate::component::slideshow_assembler::timeline::plan_timeline;
    use crate::component::slideshow_assembler::transition::TransitionKind;

    fn sample_request() -> (Vec<MediaItem>, AudioTrack) {
        let items = vec![
            MediaItem {
                path: PathBuf::from("/media/01.jpg"),
                kind: MediaFileKind::Image,
                caption: None,
            },
            MediaItem {
                path: PathBuf::from("/media/02.jpg"),
                kind: MediaFileKind::Image,
                caption: None,
            },
            MediaItem {
                path: PathBuf::from("/media/clip.mp4"),
                kind: MediaFileKind::Video,
                caption: None,
            },
        ];
        let audio = AudioTrack {
            path: PathBuf::from("/media/voice.mp3"),
        };
        (items, audio)
    }

    #[test]
    fn test_command_layout() {
        let (items, audio) = sample_request();
        let timeline = plan_timeline(3, 10.0).unwrap();
        let transitions = vec![TransitionKind::Fade, TransitionKind::Dissolve];
        let graph = build_filter_graph(&items, &timeline, &transitions, false);
        let cmd = FfmpegCommand::new(&items, &audio, &timeline, &graph, Path::new("/out/final.mp4"));
        let args = cmd.args();

        // 圖片輸入帶 -loop 1，短片輸入不帶
        assert_eq!(args.iter().filter(|a| *a == "-loop").count(), 2);
        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 4);

        // 每個來源要求 display (4.0) + padding (3.0) 秒
        assert_eq!(args.iter().filter(|a| *a == "7.000").count(), 3);

        // 音軌是最後一個輸入（索引 3）
        let map_positions: Vec<_> = args.iter().filter(|a| a.starts_with("[v") || *a == "3:a").collect();
        assert!(args.contains(&"[vout]".to_string()));
        assert!(args.contains(&"3:a".to_string()));
        assert!(!map_positions.is_empty());

        assert!(args.contains(&"-shortest".to_string()));
        assert_eq!(args.last().unwrap(), "/out/final.mp4");
        assert_eq!(cmd.output_path(), Path::new("/out/final.mp4"));
    }

    #[test]
    fn test_filter_complex_present_once() {
        let (items, audio) = sample_request();
        let timeline = plan_timeline(3, 10.0).unwrap();
        let transitions = vec![TransitionKind::Fade, TransitionKind::Dissolve];
        let graph = build_filter_graph(&items, &timeline, &transitions, false);
        let cmd = FfmpegCommand::new(&items, &audio, &timeline, &graph, Path::new("/out/final.mp4"));

        let idx = cmd
            .args()
            .iter()
            .position(|a| a == "-filter_complex")
            .unwrap();
        assert_eq!(cmd.args()[idx + 1], graph.serialize());
        assert_eq!(
            cmd.args().iter().filter(|a| *a == "-filter_complex").count(),
            1
        );
    }
}
