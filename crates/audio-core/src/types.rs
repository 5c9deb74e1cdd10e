//! Core audio types
//!
//! [`ProcessSpec`] describes a stream before processing starts,
//! [`AudioBuffer`] carries one host block of planar float audio, and
//! [`CodecParameters`] is the small value type every codec processor exposes.

use crate::error::{AudioError, AudioResult};
use serde::{Deserialize, Serialize};

/// Smallest accepted downsampling factor
pub const MIN_DOWNSAMPLING_FACTOR: u32 = 1;

/// Largest accepted downsampling factor
pub const MAX_DOWNSAMPLING_FACTOR: u32 = 8;

/// Smallest accepted bitrate mode
pub const MIN_BITRATE_MODE: u32 = 1;

/// Largest accepted bitrate mode
pub const MAX_BITRATE_MODE: u32 = 4;

/// Stream description delivered on (re)configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Number of channels in every block
    pub channels: usize,
    /// Largest block the host will deliver
    pub max_block_size: usize,
}

impl ProcessSpec {
    /// Create a new process spec
    pub fn new(sample_rate: f64, channels: usize, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            channels,
            max_block_size,
        }
    }

    /// Stereo at 48 kHz with 512-sample blocks
    pub fn stereo_48k() -> Self {
        Self::new(48000.0, 2, 512)
    }

    /// Mono at the 8 kHz telephony rate with 160-sample blocks
    pub fn mono_8k() -> Self {
        Self::new(8000.0, 1, 160)
    }

    /// Check sample rate, channel count and block size
    ///
    /// The sample rate must be finite and high enough for the 20 Hz low-cut
    /// to sit below Nyquist.
    pub fn validate(&self) -> AudioResult<()> {
        if !self.sample_rate.is_finite() || self.sample_rate < 1000.0 {
            return Err(AudioError::invalid_process_spec(format!(
                "sample rate must be a finite value of at least 1000 Hz, got {}",
                self.sample_rate
            )));
        }
        if self.channels == 0 {
            return Err(AudioError::invalid_process_spec("channel count must be at least 1"));
        }
        if self.max_block_size == 0 {
            return Err(AudioError::invalid_process_spec("maximum block size must be at least 1"));
        }
        Ok(())
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::stereo_48k()
    }
}

/// Planar float audio, one `Vec` per channel, nominal range -1.0..=1.0
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Create a silent buffer
    pub fn new(channels: usize, samples: usize) -> Self {
        Self {
            channels: vec![vec![0.0; samples]; channels],
        }
    }

    /// Wrap existing per-channel sample vectors
    ///
    /// All channels must have the same length.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> AudioResult<Self> {
        if let Some(first) = channels.first() {
            let len = first.len();
            if let Some(bad) = channels.iter().position(|ch| ch.len() != len) {
                return Err(AudioError::invalid_buffer(format!(
                    "channel {} has {} samples, channel 0 has {}",
                    bad,
                    channels[bad].len(),
                    len
                )));
            }
        }
        Ok(Self { channels })
    }

    /// Build a mono buffer from a slice
    pub fn from_mono(samples: &[f32]) -> Self {
        Self {
            channels: vec![samples.to_vec()],
        }
    }

    /// Number of channels
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel
    pub fn num_samples(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Read one channel
    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.channels[channel]
    }

    /// Write one channel
    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        &mut self.channels[channel]
    }

    /// Iterate over channels mutably
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice)
    }

    /// Consume the buffer and return its channels
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Average of all channels at one sample index
    #[inline]
    pub fn downmix_sample(&self, index: usize) -> f32 {
        let count = self.channels.len();
        if count == 0 {
            return 0.0;
        }
        let sum: f32 = self.channels.iter().map(|ch| ch[index]).sum();
        sum / count as f32
    }

    /// Write the same value to every channel at one sample index
    #[inline]
    pub fn fill_sample(&mut self, index: usize, value: f32) {
        for ch in &mut self.channels {
            ch[index] = value;
        }
    }

    /// Zero every sample
    pub fn clear(&mut self) {
        for ch in &mut self.channels {
            ch.fill(0.0);
        }
    }

    /// RMS level of one channel
    pub fn rms(&self, channel: usize) -> f32 {
        let samples = &self.channels[channel];
        if samples.is_empty() {
            return 0.0;
        }
        let energy: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
        (energy / samples.len() as f64).sqrt() as f32
    }

    /// Largest absolute sample over all channels
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|ch| ch.iter())
            .fold(0.0f32, |peak, &s| peak.max(s.abs()))
    }

    /// True when no sample is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.channels.iter().flat_map(|ch| ch.iter()).all(|s| s.is_finite())
    }
}

/// Transport-wide codec parameters
///
/// Copied by value between the engine and each processor. Out-of-range
/// values are clamped by [`CodecParameters::sanitized`] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecParameters {
    /// Decimation ratio against the host sample rate, 1..=8
    pub downsampling_factor: u32,
    /// Bitrate selector, 1..=4. Carried for the host; no codec consumes it.
    pub bitrate_mode: u32,
}

impl CodecParameters {
    /// Create parameters, clamped to the supported ranges
    pub fn new(downsampling_factor: u32, bitrate_mode: u32) -> Self {
        Self {
            downsampling_factor,
            bitrate_mode,
        }
        .sanitized()
    }

    /// Copy with every field clamped to its supported range
    pub fn sanitized(self) -> Self {
        Self {
            downsampling_factor: self
                .downsampling_factor
                .clamp(MIN_DOWNSAMPLING_FACTOR, MAX_DOWNSAMPLING_FACTOR),
            bitrate_mode: self.bitrate_mode.clamp(MIN_BITRATE_MODE, MAX_BITRATE_MODE),
        }
    }

    /// Set the downsampling factor
    pub fn with_downsampling_factor(mut self, factor: u32) -> Self {
        self.downsampling_factor = factor;
        self.sanitized()
    }

    /// Set the bitrate mode
    pub fn with_bitrate_mode(mut self, mode: u32) -> Self {
        self.bitrate_mode = mode;
        self.sanitized()
    }
}

impl Default for CodecParameters {
    fn default() -> Self {
        Self {
            downsampling_factor: MIN_DOWNSAMPLING_FACTOR,
            bitrate_mode: MIN_BITRATE_MODE,
        }
    }
}
