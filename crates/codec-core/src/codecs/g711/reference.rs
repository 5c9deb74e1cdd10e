//! G.711 Arithmetic Reference
//!
//! Closed-form equivalents of the table-driven compander. Segment location
//! uses a comparison ladder over the segment boundaries instead of a lookup,
//! and expansion rebuilds the linear value from segment and mantissa.
//!
//! ## Algorithm Details
//!
//! ### μ-law
//! - Magnitude clipped to 32635, biased by 0x84
//! - Segment boundaries at 0x100 << n for n in 0..7
//! - Output byte is the one's complement of `sign | segment << 4 | mantissa`
//!
//! ### A-law
//! - Magnitudes below 256 share segment 0 with a 16-step mantissa
//! - Segment boundaries at 0x100 << n for n in 0..7
//! - Output byte has its even bits toggled (XOR with 0x55)

use super::tables::{ALAW_XOR_MASK, CLIP, MULAW_BIAS};

/// Segment boundaries shared by both laws, highest first
const SEGMENT_LADDER: [(u8, i32); 7] = [
    (7, 0x4000),
    (6, 0x2000),
    (5, 0x1000),
    (4, 0x0800),
    (3, 0x0400),
    (2, 0x0200),
    (1, 0x0100),
];

fn ladder_segment(value: i32) -> u8 {
    SEGMENT_LADDER
        .iter()
        .find(|&&(_, boundary)| value >= boundary)
        .map_or(0, |&(segment, _)| segment)
}

/// μ-law segment of a biased magnitude, by comparison ladder
pub fn ulaw_segment_ladder(biased: i32) -> u8 {
    ladder_segment(biased)
}

/// A-law segment of a clipped magnitude, by comparison ladder
pub fn alaw_segment_ladder(magnitude: i32) -> u8 {
    ladder_segment(magnitude)
}

/// μ-law compression using the comparison ladder
pub fn ulaw_compress_ladder(sample: i16) -> u8 {
    let mut pcm = i32::from(sample);
    let sign = if pcm < 0 { 0x80 } else { 0x00 };
    if sign != 0 {
        pcm = -pcm;
    }
    pcm = pcm.min(CLIP) + MULAW_BIAS;

    let exponent = i32::from(ulaw_segment_ladder(pcm));
    let mantissa = (pcm >> (exponent + 3)) & 0x0F;
    !((sign | (exponent << 4) | mantissa) as u8)
}

/// A-law compression using the comparison ladder
pub fn alaw_compress_ladder(sample: i16) -> u8 {
    let mut pcm = i32::from(sample);
    let sign: u8 = if pcm >= 0 { 0x80 } else { 0x00 };
    if sign == 0 {
        pcm = -pcm;
    }
    pcm = pcm.min(CLIP);

    let exponent = i32::from(alaw_segment_ladder(pcm));
    let code = if exponent > 0 {
        (exponent << 4) | ((pcm >> (exponent + 3)) & 0x0F)
    } else {
        pcm >> 4
    };

    (code as u8) ^ (sign ^ ALAW_XOR_MASK)
}

/// μ-law expansion by closed form
///
/// The mantissa is placed above three fraction bits, the bias is added back
/// in, the result is shifted by the segment, and the bias removed again.
pub fn ulaw_expand_arith(compressed: u8) -> i16 {
    let u = !compressed;
    let mut t = (i32::from(u & 0x0F) << 3) + MULAW_BIAS;
    t <<= (u & 0x70) >> 4;

    if u & 0x80 != 0 {
        (MULAW_BIAS - t) as i16
    } else {
        (t - MULAW_BIAS) as i16
    }
}

/// A-law expansion by closed form
///
/// Segment 0 keeps the raw mantissa, higher segments restore the implicit
/// leading bit before shifting. Every value is reconstructed at the middle
/// of its quantization interval.
pub fn alaw_expand_arith(compressed: u8) -> i16 {
    let ix = i32::from(compressed ^ ALAW_XOR_MASK) & 0x7F;
    let exponent = ix >> 4;
    let mut mantissa = ix & 0x0F;

    if exponent > 0 {
        mantissa += 16;
    }
    mantissa = (mantissa << 4) + 0x08;
    if exponent > 1 {
        mantissa <<= exponent - 1;
    }

    if compressed > 0x7F {
        mantissa as i16
    } else {
        -mantissa as i16
    }
}
