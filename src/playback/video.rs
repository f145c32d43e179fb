//! Video artifact playback.
//!
//! Steps through the artifact's raw RGB24 frames on wall-clock time; the
//! UI asks for the current frame each repaint.

use crate::media::{Artifact, StreamFormat};
use crate::{RecorderError, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub struct VideoPlayer {
    artifact: Option<Arc<Artifact>>,
    frame_size: usize,
    frame_count: usize,
    fps: u32,
    started: Option<Instant>,
}

impl VideoPlayer {
    pub fn new() -> Self {
        Self {
            artifact: None,
            frame_size: 0,
            frame_count: 0,
            fps: 0,
            started: None,
        }
    }

    /// Start playing the artifact from the first frame.
    pub fn play(&mut self, artifact: Arc<Artifact>) -> Result<()> {
        let StreamFormat::Video { width, height, fps } = artifact.format else {
            return Err(RecorderError::PlaybackError(
                "not a video artifact".to_string(),
            ));
        };

        self.frame_size = (width as usize) * (height as usize) * 3;
        self.frame_count = if self.frame_size > 0 {
            artifact.bytes.len() / self.frame_size
        } else {
            0
        };
        self.fps = fps.max(1);
        info!(frames = self.frame_count, fps = self.fps, "video playback started");
        self.artifact = Some(artifact);
        self.started = Some(Instant::now());
        Ok(())
    }

    pub fn stop(&mut self) {
        self.started = None;
    }

    fn elapsed_frame(&self) -> usize {
        match self.started {
            Some(started) => (started.elapsed().as_secs_f64() * self.fps as f64) as usize,
            None => 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.started.is_some() && self.elapsed_frame() < self.frame_count
    }

    /// The frame to show right now, or None when nothing is loaded.
    ///
    /// Past the end of playback the last frame stays up.
    pub fn current_frame(&self) -> Option<&[u8]> {
        let artifact = self.artifact.as_ref()?;
        if self.frame_count == 0 {
            return None;
        }
        let index = self.elapsed_frame().min(self.frame_count - 1);
        let start = index * self.frame_size;
        artifact.bytes.get(start..start + self.frame_size)
    }

    /// Playback progress in 0.0..=1.0.
    pub fn progress(&self) -> f32 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (self.elapsed_frame() as f32 / self.frame_count as f32).min(1.0)
    }
}

impl Default for VideoPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_artifact(frames: usize) -> Arc<Artifact> {
        let format = StreamFormat::Video {
            width: 2,
            height: 2,
            fps: 10,
        };
        let frame_size = 2 * 2 * 3;
        let mut bytes = Vec::new();
        for i in 0..frames {
            bytes.extend(std::iter::repeat(i as u8).take(frame_size));
        }
        Arc::new(Artifact::new(format, bytes))
    }

    #[test]
    fn test_play_shows_first_frame() {
        let mut player = VideoPlayer::new();
        player.play(video_artifact(3)).expect("play should succeed");
        assert!(player.is_playing());

        let frame = player.current_frame().expect("frame available");
        assert_eq!(frame.len(), 12);
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rejects_audio_artifact() {
        let artifact = Arc::new(Artifact::new(
            StreamFormat::Audio {
                sample_rate: 8000,
                channels: 1,
            },
            vec![0; 4],
        ));
        let mut player = VideoPlayer::new();
        assert!(player.play(artifact).is_err());
    }

    #[test]
    fn test_empty_artifact_has_no_frames() {
        let mut player = VideoPlayer::new();
        player.play(video_artifact(0)).expect("play should succeed");
        assert!(player.current_frame().is_none());
        assert!(!player.is_playing());
        assert_eq!(player.progress(), 0.0);
    }

    #[test]
    fn test_stop_resets() {
        let mut player = VideoPlayer::new();
        player.play(video_artifact(2)).expect("play should succeed");
        player.stop();
        assert!(!player.is_playing());
        // stopped playback still shows the first frame
        assert!(player.current_frame().is_some());
    }
}
