//! Input validation utilities for codec operations

use crate::error::{CodecError, Result};

/// Validate audio samples for codec processing
pub fn validate_samples(samples: &[i16]) -> Result<()> {
    if samples.is_empty() {
        return Err(CodecError::invalid_format("Input samples cannot be empty"));
    }

    Ok(())
}

/// Validate that a sample buffer holds a whole number of codec frames
pub fn validate_frame_size(samples: &[i16], frame_size: usize) -> Result<()> {
    validate_samples(samples)?;

    if samples.len() % frame_size != 0 {
        return Err(CodecError::InvalidFrameSize {
            expected: frame_size,
            actual: samples.len(),
        });
    }

    Ok(())
}

/// Validate that encoded data holds a whole number of fixed-size frames
pub fn validate_encoded_frame(data: &[u8], encoded_frame_size: usize) -> Result<()> {
    if data.is_empty() {
        return Err(CodecError::invalid_format("Encoded data cannot be empty"));
    }

    if data.len() % encoded_frame_size != 0 {
        return Err(CodecError::InvalidFrameSize {
            expected: encoded_frame_size,
            actual: data.len(),
        });
    }

    Ok(())
}

/// Validate that an output buffer can hold the requested amount of data
pub fn validate_buffer_size(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(CodecError::BufferTooSmall { needed, actual });
    }

    Ok(())
}
