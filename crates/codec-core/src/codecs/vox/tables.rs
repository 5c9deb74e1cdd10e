//! VOX Tables and Constants
//!
//! Step sizes and index adjustments for Dialogic 12-bit ADPCM. The step table
//! is the 49-entry Dialogic table, which covers the 12-bit signal range that
//! the VOX predictor works in.

/// Quantizer step sizes, indexed by the adaptive step index
pub const VOX_STEP_TABLE: [i16; 49] = [
    16, 17, 19, 21, 23, 25, 28, 31, 34, 37, 41, 45, 50, 55, 60, 66, 73, 80, 88, 97, 107, 118, 130,
    143, 157, 173, 190, 209, 230, 253, 279, 307, 337, 371, 408, 449, 494, 544, 598, 658, 724, 796,
    876, 963, 1060, 1166, 1282, 1411, 1552,
];

/// Step index adjustment selected by the last emitted nibble
pub const ADPCM_INDEX_TABLE: [i8; 16] = [-1, -1, -1, -1, 2, 4, 6, 8, -1, -1, -1, -1, 2, 4, 6, 8];

/// Largest valid step index
pub const MAX_STEP_INDEX: u8 = (VOX_STEP_TABLE.len() - 1) as u8;

/// Nibble pair that holds a decoder at rest (+0, -0)
pub const VOX_RESET_NIBBLES: [u8; 2] = [0b0000, 0b1000];

/// Sign bit of a VOX nibble
pub const SIGN_BIT: u8 = 0b1000;

/// Magnitude bits of a VOX nibble
pub const MAGNITUDE_MASK: u8 = 0b0111;
