//! WAV export for finalized audio artifacts.

use crate::media::{Artifact, StreamFormat};
use crate::{RecorderError, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;
use tracing::info;

/// Write f32 samples (-1.0..1.0) to a 16-bit WAV file.
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sample_rate: u32,
    channels: u16,
) -> Result<()> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)
        .map_err(|e| RecorderError::IoError(format!("Failed to create WAV writer: {}", e)))?;

    for &sample in samples {
        let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| RecorderError::IoError(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| RecorderError::IoError(format!("Failed to finalize WAV file: {}", e)))?;

    info!("Wrote {} samples to WAV file: {:?}", samples.len(), path.as_ref());
    Ok(())
}

/// Export an audio artifact as a WAV file.
///
/// Fails for video artifacts; the artifact itself stays in memory.
pub fn export_artifact<P: AsRef<Path>>(path: P, artifact: &Artifact) -> Result<()> {
    let StreamFormat::Audio {
        sample_rate,
        channels,
    } = artifact.format
    else {
        return Err(RecorderError::IoError(format!(
            "cannot export {} as WAV",
            artifact.media_type
        )));
    };

    let mut writer = WavWriter::create(
        path.as_ref(),
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        },
    )
    .map_err(|e| RecorderError::IoError(format!("Failed to create WAV writer: {}", e)))?;

    // Artifact bytes are already PCM16LE
    for pair in artifact.bytes.chunks_exact(2) {
        writer
            .write_sample(i16::from_le_bytes([pair[0], pair[1]]))
            .map_err(|e| RecorderError::IoError(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| RecorderError::IoError(format!("Failed to finalize WAV file: {}", e)))?;

    info!(
        "Exported artifact {} ({} bytes) to {:?}",
        artifact.id,
        artifact.len(),
        path.as_ref()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::encode_pcm16;
    use std::f32::consts::PI;

    #[test]
    fn test_write_wav() {
        let path = std::env::temp_dir().join("mediarec_test_write.wav");

        // 100 ms sine wave at 440 Hz
        let sample_rate = 16000;
        let samples: Vec<f32> = (0..1600)
            .map(|i| (2.0 * PI * 440.0 * i as f32 / sample_rate as f32).sin() * 0.5)
            .collect();

        write_wav(&path, &samples, sample_rate, 1).expect("write should succeed");

        let mut reader = hound::WavReader::open(&path).expect("file should open");
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, sample_rate);
        assert_eq!(spec.channels, 1);
        assert_eq!(reader.samples::<i16>().count(), samples.len());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_export_audio_artifact() {
        let path = std::env::temp_dir().join("mediarec_test_export.wav");
        let format = StreamFormat::Audio {
            sample_rate: 8000,
            channels: 1,
        };
        let bytes = encode_pcm16(&[0.1, -0.1, 0.2, -0.2]);
        let artifact = Artifact::new(format, bytes);

        export_artifact(&path, &artifact).expect("export should succeed");

        let mut reader = hound::WavReader::open(&path).expect("file should open");
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.samples::<i16>().count(), 4);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_export_rejects_video() {
        let artifact = Artifact::new(
            StreamFormat::Video {
                width: 2,
                height: 2,
                fps: 1,
            },
            vec![0; 12],
        );
        let path = std::env::temp_dir().join("mediarec_test_video.wav");
        assert!(export_artifact(&path, &artifact).is_err());
    }
}
