//! Audio artifact playback via cpal.

use crate::media::{decode_pcm16, Artifact, StreamFormat};
use crate::playback::SampleRing;
use crate::{RecorderError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{error, info};

/// Plays one audio artifact through the default output device.
pub struct AudioPlayer {
    stream: Option<cpal::Stream>,
    playing: Arc<AtomicBool>,
    played: Arc<AtomicUsize>,
    total: usize,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self {
            stream: None,
            playing: Arc::new(AtomicBool::new(false)),
            played: Arc::new(AtomicUsize::new(0)),
            total: 0,
        }
    }

    /// Start playing the artifact from the beginning.
    pub fn play(&mut self, artifact: &Artifact) -> Result<()> {
        let StreamFormat::Audio {
            sample_rate,
            channels,
        } = artifact.format
        else {
            return Err(RecorderError::PlaybackError(
                "not an audio artifact".to_string(),
            ));
        };

        self.stop();

        let samples = decode_pcm16(&artifact.bytes);
        self.total = samples.len();
        if samples.is_empty() {
            return Ok(());
        }

        let ring = SampleRing::new(samples.len());
        ring.write(&samples);

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or_else(|| {
            RecorderError::DeviceUnavailable("No output device available".to_string())
        })?;

        let config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let playing = self.playing.clone();
        playing.store(true, Ordering::SeqCst);
        let playing_cb = playing.clone();
        let played = self.played.clone();
        played.store(0, Ordering::SeqCst);

        let err_fn = |e| error!("Audio output stream error: {}", e);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let read = ring.read(data);
                    played.fetch_add(read, Ordering::SeqCst);
                    for sample in &mut data[read..] {
                        *sample = 0.0;
                    }
                    if read == 0 {
                        playing_cb.store(false, Ordering::SeqCst);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                RecorderError::PlaybackError(format!("Failed to build output stream: {}", e))
            })?;

        stream
            .play()
            .map_err(|e| RecorderError::PlaybackError(format!("Failed to start playback: {}", e)))?;

        info!(
            samples = self.total,
            rate = sample_rate,
            "playback started"
        );
        self.stream = Some(stream);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.playing.store(false, Ordering::SeqCst);
        if let Some(stream) = self.stream.take() {
            drop(stream);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Playback progress in 0.0..=1.0.
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.played.load(Ordering::SeqCst) as f32 / self.total as f32).min(1.0)
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
