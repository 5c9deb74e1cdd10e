//! GSM 06.10 Codec Implementation

use super::decoder::GsmDecoder;
use super::encoder::GsmEncoder;
use super::frame::GSM_FRAME_BYTES;
use super::state::GSM_FRAME_SAMPLES;
use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, CodecConfig, CodecInfo, CodecType};
use crate::utils::{validate_buffer_size, validate_encoded_frame, validate_frame_size};

/// GSM 06.10 full-rate codec
///
/// Encodes 160-sample frames of 16-bit PCM into 33-byte frames at
/// 13.2 kbit/s. The three low bits of every input sample are ignored and
/// decoded samples always have them cleared.
///
/// # Example
/// ```
/// use rstelecom_codec_core::codecs::gsm::Gsm610Codec;
/// use rstelecom_codec_core::types::AudioCodec;
///
/// let mut codec = Gsm610Codec::default();
/// let encoded = codec.encode(&[0i16; 320]).unwrap();
/// assert_eq!(encoded.len(), 66);
/// assert_eq!(encoded[0] >> 4, 0xD);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gsm610Codec {
    encoder: GsmEncoder,
    decoder: GsmDecoder,
}

impl Gsm610Codec {
    /// Create a new GSM codec from configuration
    pub fn new(config: CodecConfig) -> Result<Self> {
        if config.codec_type != CodecType::Gsm610 {
            return Err(CodecError::unsupported_codec(format!("{:?}", config.codec_type)));
        }
        config.validate()?;

        Ok(Self::default())
    }

    /// Encode whole frames into a caller-provided buffer
    ///
    /// Returns the number of bytes written.
    pub fn encode_into(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize> {
        validate_frame_size(samples, GSM_FRAME_SAMPLES)?;
        let frames = samples.len() / GSM_FRAME_SAMPLES;
        validate_buffer_size(frames * GSM_FRAME_BYTES, output.len())?;

        let mut frame_samples = [0i16; GSM_FRAME_SAMPLES];
        let mut frame_bytes = [0u8; GSM_FRAME_BYTES];
        for (input, out) in samples
            .chunks_exact(GSM_FRAME_SAMPLES)
            .zip(output.chunks_exact_mut(GSM_FRAME_BYTES))
        {
            frame_samples.copy_from_slice(input);
            self.encoder.encode_frame(&frame_samples, &mut frame_bytes);
            out.copy_from_slice(&frame_bytes);
        }

        Ok(frames * GSM_FRAME_BYTES)
    }

    /// Encoder half
    pub fn encoder(&self) -> &GsmEncoder {
        &self.encoder
    }

    /// Decoder half
    pub fn decoder(&self) -> &GsmDecoder {
        &self.decoder
    }
}

impl AudioCodec for Gsm610Codec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        validate_frame_size(samples, GSM_FRAME_SAMPLES)?;
        let mut output = vec![0u8; samples.len() / GSM_FRAME_SAMPLES * GSM_FRAME_BYTES];
        self.encode_into(samples, &mut output)?;
        Ok(output)
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        validate_encoded_frame(data, GSM_FRAME_BYTES)?;

        let mut output = vec![0i16; data.len() / GSM_FRAME_BYTES * GSM_FRAME_SAMPLES];
        let mut frame_samples = [0i16; GSM_FRAME_SAMPLES];
        for (frame, out) in data
            .chunks_exact(GSM_FRAME_BYTES)
            .zip(output.chunks_exact_mut(GSM_FRAME_SAMPLES))
        {
            self.decoder.decode_frame(frame, &mut frame_samples)?;
            out.copy_from_slice(&frame_samples);
        }

        Ok(output)
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: "GSM",
            sample_rate: 8000,
            channels: 1,
            bitrate: 13200,
            frame_size: GSM_FRAME_SAMPLES,
            encoded_frame_size: GSM_FRAME_BYTES,
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.encoder.reset();
        self.decoder.reset();
        Ok(())
    }

    fn frame_size(&self) -> usize {
        GSM_FRAME_SAMPLES
    }
}
