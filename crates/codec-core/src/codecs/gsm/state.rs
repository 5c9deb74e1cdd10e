//! GSM 06.10 encoder and decoder state

/// Samples per frame (20ms at 8kHz)
pub const GSM_FRAME_SAMPLES: usize = 160;

/// Samples per subframe
pub const SUBFRAME_SAMPLES: usize = 40;

/// Number of subframes per frame
pub const SUBFRAMES: usize = 4;

/// Length of the reconstructed residual history searched by the LTP
pub const LTP_HISTORY: usize = 120;

/// Shortest long-term predictor lag
pub const MIN_LAG: u8 = 40;

/// Longest long-term predictor lag
pub const MAX_LAG: u8 = 120;

/// Encoder memory carried from frame to frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderState {
    /// Reconstructed short-term residual: 120 samples of history plus the
    /// four subframes of the frame being coded
    pub dp: [i16; LTP_HISTORY + GSM_FRAME_SAMPLES],
    /// Offset compensation input memory
    pub z1: i16,
    /// Offset compensation output memory
    pub l_z2: i32,
    /// Preemphasis memory
    pub mp: i16,
    /// Short-term analysis lattice memory
    pub u: [i16; 8],
    /// Decoded LARs of the previous frame, used for interpolation
    pub previous_larpp: [i16; 8],
}

impl EncoderState {
    /// Power-on state
    pub fn new() -> Self {
        Self {
            dp: [0; LTP_HISTORY + GSM_FRAME_SAMPLES],
            z1: 0,
            l_z2: 0,
            mp: 0,
            u: [0; 8],
            previous_larpp: [0; 8],
        }
    }
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoder memory carried from frame to frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderState {
    /// Reconstructed residual: 120 samples of history plus the current subframe
    pub drp: [i16; LTP_HISTORY + SUBFRAME_SAMPLES],
    /// Last valid LTP lag, reused when a frame carries an out-of-range lag
    pub nrp: u8,
    /// Short-term synthesis lattice memory
    pub v: [i16; 9],
    /// Decoded LARs of the previous frame, used for interpolation
    pub previous_larpp: [i16; 8],
    /// Deemphasis memory
    pub msr: i16,
}

impl DecoderState {
    /// Power-on state
    pub fn new() -> Self {
        Self {
            drp: [0; LTP_HISTORY + SUBFRAME_SAMPLES],
            nrp: MIN_LAG,
            v: [0; 9],
            previous_larpp: [0; 8],
            msr: 0,
        }
    }
}

impl Default for DecoderState {
    fn default() -> Self {
        Self::new()
    }
}
