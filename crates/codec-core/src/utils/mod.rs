//! Utility functions shared by the codec implementations

pub mod conversion;
pub mod validation;

pub use conversion::{f32_to_pcm16, pcm16_to_f32, saturate_i16};
pub use validation::{
    validate_buffer_size, validate_encoded_frame, validate_frame_size, validate_samples,
};
