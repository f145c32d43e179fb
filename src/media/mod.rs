//! Media kinds, stream formats and sample conversion.

pub mod blob;
pub mod wav;

pub use blob::{Artifact, BlobStore};

use serde::{Deserialize, Serialize};

/// Which device a widget captures from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Device name used in button labels ("Start Camera" / "Start Microphone")
    pub fn device_noun(&self) -> &'static str {
        match self {
            MediaKind::Audio => "Microphone",
            MediaKind::Video => "Camera",
        }
    }

    /// Widget title shown in the header and on the home page
    pub fn widget_title(&self) -> &'static str {
        match self {
            MediaKind::Audio => "Audio Recorder",
            MediaKind::Video => "Video Recorder",
        }
    }
}

/// Negotiated format of an acquired device stream.
///
/// Carried by every recording session and baked into the artifact's media
/// type so playback knows how to interpret the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamFormat {
    Audio { sample_rate: u32, channels: u16 },
    Video { width: u32, height: u32, fps: u32 },
}

impl StreamFormat {
    pub fn kind(&self) -> MediaKind {
        match self {
            StreamFormat::Audio { .. } => MediaKind::Audio,
            StreamFormat::Video { .. } => MediaKind::Video,
        }
    }

    /// Media type tag for artifacts produced from this stream.
    pub fn media_type(&self) -> String {
        match self {
            StreamFormat::Audio {
                sample_rate,
                channels,
            } => format!("audio/pcm;rate={sample_rate};channels={channels}"),
            StreamFormat::Video { width, height, fps } => {
                format!("video/rgb24;width={width};height={height};fps={fps}")
            }
        }
    }

    /// Duration in seconds of `byte_len` bytes of this stream's data.
    pub fn duration_seconds(&self, byte_len: usize) -> f32 {
        match self {
            StreamFormat::Audio {
                sample_rate,
                channels,
            } => {
                let denom = 2.0 * *sample_rate as f32 * *channels as f32;
                if denom > 0.0 {
                    byte_len as f32 / denom
                } else {
                    0.0
                }
            }
            StreamFormat::Video { width, height, fps } => {
                let frame = (*width as usize) * (*height as usize) * 3;
                if frame > 0 && *fps > 0 {
                    (byte_len / frame) as f32 / *fps as f32
                } else {
                    0.0
                }
            }
        }
    }
}

/// Convert f32 samples (-1.0..1.0) to little-endian PCM16 bytes.
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&sample_i16.to_le_bytes());
    }
    bytes
}

/// Convert little-endian PCM16 bytes back to f32 samples.
///
/// A trailing odd byte is ignored.
pub fn decode_pcm16(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / i16::MAX as f32)
        .collect()
}
