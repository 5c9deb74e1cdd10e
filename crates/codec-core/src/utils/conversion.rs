//! Sample format conversion
//!
//! The float side of the crate works in the nominal range -1.0..=1.0. The
//! codecs work on 16-bit integers. Conversion in both directions uses the
//! symmetric scale 32767 and saturates instead of wrapping.

/// Full-scale factor between float and 16-bit PCM
pub const PCM16_SCALE: f32 = 32767.0;

/// Saturate a 32-bit intermediate to the 16-bit range
#[inline]
pub fn saturate_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Convert a float sample to 16-bit PCM, saturating out-of-range input
///
/// NaN converts to zero.
#[inline]
pub fn f32_to_pcm16(sample: f32) -> i16 {
    // `as` on floats saturates and maps NaN to 0
    (sample * PCM16_SCALE) as i16
}

/// Convert a 16-bit PCM sample to float
#[inline]
pub fn pcm16_to_f32(sample: i16) -> f32 {
    sample as f32 / PCM16_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate_i16() {
        assert_eq!(saturate_i16(0), 0);
        assert_eq!(saturate_i16(40000), i16::MAX);
        assert_eq!(saturate_i16(-40000), i16::MIN);
        assert_eq!(saturate_i16(-32768), -32768);
    }

    #[test]
    fn test_float_conversion_saturates() {
        assert_eq!(f32_to_pcm16(1.0), 32767);
        assert_eq!(f32_to_pcm16(-1.0), -32767);
        assert_eq!(f32_to_pcm16(3.5), i16::MAX);
        assert_eq!(f32_to_pcm16(-3.5), i16::MIN);
        assert_eq!(f32_to_pcm16(f32::NAN), 0);
    }

    #[test]
    fn test_float_round_trip() {
        for &pcm in &[-32767i16, -1000, 0, 1, 1000, 32767] {
            assert_eq!(f32_to_pcm16(pcm16_to_f32(pcm)), pcm);
        }
    }
}
