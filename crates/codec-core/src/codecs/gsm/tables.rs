//! GSM 06.10 quantizer and filter tables

/// LAR quantizer slopes (table 4.1)
pub const GSM_A: [i16; 8] = [20480, 20480, 20480, 20480, 13964, 15360, 8534, 9036];

/// LAR quantizer offsets (table 4.1)
pub const GSM_B: [i16; 8] = [0, 0, 2048, -2560, 94, -1792, -341, -1144];

/// Smallest coded value of each LAR (table 4.1)
pub const GSM_MIC: [i16; 8] = [-32, -32, -16, -16, -8, -8, -4, -4];

/// Largest coded value of each LAR (table 4.1)
pub const GSM_MAC: [i16; 8] = [31, 31, 15, 15, 7, 7, 3, 3];

/// Inverse of the LAR quantizer slopes (table 4.2)
pub const GSM_INVA: [i16; 8] = [13107, 13107, 13107, 13107, 19223, 17476, 31454, 29708];

/// Decision levels of the LTP gain quantizer (table 4.3a)
pub const GSM_DLB: [i16; 4] = [6554, 16384, 26214, 32767];

/// Quantization levels of the LTP gain (table 4.3b)
pub const GSM_QLB: [i16; 4] = [3277, 11469, 21299, 32767];

/// Impulse response of the RPE weighting filter (table 4.4)
pub const GSM_H: [i16; 11] = [-134, -374, 0, 2054, 5741, 8192, 5741, 2054, 0, -374, -134];

/// Inverse mantissas used for RPE normalization (table 4.5)
pub const GSM_NRFAC: [i16; 8] = [29128, 26215, 23832, 21846, 20165, 18725, 17476, 16384];

/// Normalized inverse mantissas used in APCM inverse quantization (table 4.6)
pub const GSM_FAC: [i16; 8] = [18431, 20479, 22527, 24575, 26623, 28671, 30719, 32767];

/// Bit width of each coded LAR in the frame
pub const LAR_BITS: [u32; 8] = [6, 6, 5, 5, 4, 4, 3, 3];
