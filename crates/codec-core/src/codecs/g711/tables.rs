//! G.711 Lookup Tables
//!
//! Segment tables for compression and 256-entry expansion tables. The
//! expansion tables are the reference output: the arithmetic forms in
//! [`reference`](super::reference) are checked against them.

/// Bias added to the μ-law magnitude before segment search
pub const MULAW_BIAS: i32 = 0x84;

/// Largest magnitude accepted by either compressor
pub const CLIP: i32 = 32635;

/// XOR mask applied to every A-law byte (even-bit inversion)
pub const ALAW_XOR_MASK: u8 = 0x55;

/// μ-law segment, indexed by the biased magnitude shifted right by 7
pub const MULAW_COMPRESS_TABLE: [u8; 256] = [
    0, 0, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
];

/// A-law segment, indexed by the magnitude shifted right by 8
///
/// Only consulted for magnitudes of 256 and above, so entry 0 is never used
/// for segment 0.
pub const ALAW_COMPRESS_TABLE: [u8; 128] = [
    1, 1, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, 7,
];

/// μ-law byte to 16-bit linear PCM
pub const MULAW_DECOMPRESS_TABLE: [i16; 256] = [
    -32124, -31100, -30076, -29052, -28028, -27004, -25980, -24956,
    -23932, -22908, -21884, -20860, -19836, -18812, -17788, -16764,
    -15996, -15484, -14972, -14460, -13948, -13436, -12924, -12412,
    -11900, -11388, -10876, -10364, -9852, -9340, -8828, -8316,
    -7932, -7676, -7420, -7164, -6908, -6652, -6396, -6140,
    -5884, -5628, -5372, -5116, -4860, -4604, -4348, -4092,
    -3900, -3772, -3644, -3516, -3388, -3260, -3132, -3004,
    -2876, -2748, -2620, -2492, -2364, -2236, -2108, -1980,
    -1884, -1820, -1756, -1692, -1628, -1564, -1500, -1436,
    -1372, -1308, -1244, -1180, -1116, -1052, -988, -924,
    -876, -844, -812, -780, -748, -716, -684, -652,
    -620, -588, -556, -524, -492, -460, -428, -396,
    -372, -356, -340, -324, -308, -292, -276, -260,
    -244, -228, -212, -196, -180, -164, -148, -132,
    -120, -112, -104, -96, -88, -80, -72, -64,
    -56, -48, -40, -32, -24, -16, -8, 0,
    32124, 31100, 30076, 29052, 28028, 27004, 25980, 24956,
    23932, 22908, 21884, 20860, 19836, 18812, 17788, 16764,
    15996, 15484, 14972, 14460, 13948, 13436, 12924, 12412,
    11900, 11388, 10876, 10364, 9852, 9340, 8828, 8316,
    7932, 7676, 7420, 7164, 6908, 6652, 6396, 6140,
    5884, 5628, 5372, 5116, 4860, 4604, 4348, 4092,
    3900, 3772, 3644, 3516, 3388, 3260, 3132, 3004,
    2876, 2748, 2620, 2492, 2364, 2236, 2108, 1980,
    1884, 1820, 1756, 1692, 1628, 1564, 1500, 1436,
    1372, 1308, 1244, 1180, 1116, 1052, 988, 924,
    876, 844, 812, 780, 748, 716, 684, 652,
    620, 588, 556, 524, 492, 460, 428, 396,
    372, 356, 340, 324, 308, 292, 276, 260,
    244, 228, 212, 196, 180, 164, 148, 132,
    120, 112, 104, 96, 88, 80, 72, 64,
    56, 48, 40, 32, 24, 16, 8, 0,
];

/// A-law byte to 16-bit linear PCM
pub const ALAW_DECOMPRESS_TABLE: [i16; 256] = [
    -5504, -5248, -6016, -5760, -4480, -4224, -4992, -4736,
    -7552, -7296, -8064, -7808, -6528, -6272, -7040, -6784,
    -2752, -2624, -3008, -2880, -2240, -2112, -2496, -2368,
    -3776, -3648, -4032, -3904, -3264, -3136, -3520, -3392,
    -22016, -20992, -24064, -23040, -17920, -16896, -19968, -18944,
    -30208, -29184, -32256, -31232, -26112, -25088, -28160, -27136,
    -11008, -10496, -12032, -11520, -8960, -8448, -9984, -9472,
    -15104, -14592, -16128, -15616, -13056, -12544, -14080, -13568,
    -344, -328, -376, -360, -280, -264, -312, -296,
    -472, -456, -504, -488, -408, -392, -440, -424,
    -88, -72, -120, -104, -24, -8, -56, -40,
    -216, -200, -248, -232, -152, -136, -184, -168,
    -1376, -1312, -1504, -1440, -1120, -1056, -1248, -1184,
    -1888, -1824, -2016, -1952, -1632, -1568, -1760, -1696,
    -688, -656, -752, -720, -560, -528, -624, -592,
    -944, -912, -1008, -976, -816, -784, -880, -848,
    5504, 5248, 6016, 5760, 4480, 4224, 4992, 4736,
    7552, 7296, 8064, 7808, 6528, 6272, 7040, 6784,
    2752, 2624, 3008, 2880, 2240, 2112, 2496, 2368,
    3776, 3648, 4032, 3904, 3264, 3136, 3520, 3392,
    22016, 20992, 24064, 23040, 17920, 16896, 19968, 18944,
    30208, 29184, 32256, 31232, 26112, 25088, 28160, 27136,
    11008, 10496, 12032, 11520, 8960, 8448, 9984, 9472,
    15104, 14592, 16128, 15616, 13056, 12544, 14080, 13568,
    344, 328, 376, 360, 280, 264, 312, 296,
    472, 456, 504, 488, 408, 392, 440, 424,
    88, 72, 120, 104, 24, 8, 56, 40,
    216, 200, 248, 232, 152, 136, 184, 168,
    1376, 1312, 1504, 1440, 1120, 1056, 1248, 1184,
    1888, 1824, 2016, 1952, 1632, 1568, 1760, 1696,
    688, 656, 752, 720, 560, 528, 624, 592,
    944, 912, 1008, 976, 816, 784, 880, 848,
];

/// Locate the μ-law segment of a biased magnitude
#[inline]
pub fn ulaw_segment(biased: i32) -> u8 {
    MULAW_COMPRESS_TABLE[((biased >> 7) & 0xFF) as usize]
}

/// Locate the A-law segment of a clipped magnitude
#[inline]
pub fn alaw_segment(magnitude: i32) -> u8 {
    if magnitude >= 256 {
        ALAW_COMPRESS_TABLE[((magnitude >> 8) & 0x7F) as usize]
    } else {
        0
    }
}

/// μ-law compression of a 16-bit linear sample
///
/// Sign is extracted, the magnitude clipped to [`CLIP`] and biased, the
/// segment located by table, and the final byte inverted.
pub fn ulaw_compress(sample: i16) -> u8 {
    let mut pcm = i32::from(sample);
    let sign = (pcm >> 8) & 0x80;
    if sign != 0 {
        pcm = -pcm;
    }
    pcm = pcm.min(CLIP) + MULAW_BIAS;

    let exponent = i32::from(ulaw_segment(pcm));
    let mantissa = (pcm >> (exponent + 3)) & 0x0F;
    !((sign | (exponent << 4) | mantissa) as u8)
}

/// μ-law expansion to a 16-bit linear sample
#[inline]
pub fn ulaw_expand(compressed: u8) -> i16 {
    MULAW_DECOMPRESS_TABLE[usize::from(compressed)]
}

/// A-law compression of a 16-bit linear sample
pub fn alaw_compress(sample: i16) -> u8 {
    let mut pcm = i32::from(sample);
    let sign = ((!pcm) >> 8) & 0x80;
    if sign == 0 {
        pcm = -pcm;
    }
    pcm = pcm.min(CLIP);

    let code = if pcm >= 256 {
        let exponent = i32::from(alaw_segment(pcm));
        let mantissa = (pcm >> (exponent + 3)) & 0x0F;
        (exponent << 4) | mantissa
    } else {
        pcm >> 4
    };

    (code as u8) ^ (sign as u8 ^ ALAW_XOR_MASK)
}

/// A-law expansion to a 16-bit linear sample
#[inline]
pub fn alaw_expand(compressed: u8) -> i16 {
    ALAW_DECOMPRESS_TABLE[usize::from(compressed)]
}

/// Segment number carried in a μ-law byte
#[inline]
pub fn ulaw_byte_segment(compressed: u8) -> u8 {
    ((!compressed) & 0x70) >> 4
}

/// Segment number carried in an A-law byte
#[inline]
pub fn alaw_byte_segment(compressed: u8) -> u8 {
    ((compressed ^ ALAW_XOR_MASK) & 0x70) >> 4
}
