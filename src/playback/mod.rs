//! Artifact playback.

#[cfg(feature = "media-io")]
pub mod audio;
pub mod buffer;
pub mod video;

#[cfg(feature = "media-io")]
pub use audio::AudioPlayer;
pub use buffer::SampleRing;
pub use video::VideoPlayer;
