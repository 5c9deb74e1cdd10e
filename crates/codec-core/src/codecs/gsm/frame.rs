//! GSM 06.10 frame parameters and the 33-byte frame layout
//!
//! A frame starts with the 4-bit magic `0xD`, followed by the eight coded
//! LARs (6, 6, 5, 5, 4, 4, 3 and 3 bits) and four subframes of
//! `Nc` (7 bits), `bc` (2), `Mc` (2), `xmaxc` (6) and 13 three-bit pulses.
//! Fields are packed most significant bit first.

use super::rpe::RPE_PULSES;
use super::state::SUBFRAMES;
use super::tables::LAR_BITS;
use crate::error::{CodecError, Result};
use crate::utils::validate_encoded_frame;

/// Magic nibble at the start of every frame
pub const GSM_MAGIC: u8 = 0xD;

/// Encoded frame size in bytes
pub const GSM_FRAME_BYTES: usize = 33;

/// Parameters of one subframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubframeParams {
    /// LTP lag (40..=120)
    pub nc: u8,
    /// Coded LTP gain
    pub bc: u8,
    /// RPE grid position
    pub mc: u8,
    /// Coded RPE block maximum
    pub xmaxc: u8,
    /// Coded RPE pulses
    pub xmc: [u8; RPE_PULSES],
}

/// All parameters carried by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GsmFrameParams {
    /// Coded log-area ratios
    pub larc: [u8; 8],
    /// Subframe parameters
    pub subframes: [SubframeParams; SUBFRAMES],
}

impl GsmFrameParams {
    /// Pack into a new 33-byte frame
    pub fn pack(&self) -> [u8; GSM_FRAME_BYTES] {
        let mut frame = [0u8; GSM_FRAME_BYTES];
        self.pack_into(&mut frame);
        frame
    }

    /// Pack into an existing 33-byte frame
    pub fn pack_into(&self, frame: &mut [u8; GSM_FRAME_BYTES]) {
        frame.fill(0);
        let mut writer = BitWriter::new(frame);

        writer.put(GSM_MAGIC, 4);
        for (&larc, &bits) in self.larc.iter().zip(&LAR_BITS) {
            writer.put(larc, bits);
        }

        for sub in &self.subframes {
            writer.put(sub.nc, 7);
            writer.put(sub.bc, 2);
            writer.put(sub.mc, 2);
            writer.put(sub.xmaxc, 6);
            for &pulse in &sub.xmc {
                writer.put(pulse, 3);
            }
        }
    }

    /// Unpack a 33-byte frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is not 33 bytes long or does not start
    /// with the GSM magic nibble.
    pub fn unpack(frame: &[u8]) -> Result<Self> {
        validate_encoded_frame(frame, GSM_FRAME_BYTES)?;
        if frame.len() != GSM_FRAME_BYTES {
            return Err(CodecError::InvalidFrameSize {
                expected: GSM_FRAME_BYTES,
                actual: frame.len(),
            });
        }

        let mut reader = BitReader::new(frame);
        let magic = reader.take(4);
        if magic != GSM_MAGIC {
            return Err(CodecError::invalid_payload(format!(
                "GSM frame magic {magic:#x}, expected {GSM_MAGIC:#x}"
            )));
        }

        let mut params = Self::default();
        for (larc, &bits) in params.larc.iter_mut().zip(&LAR_BITS) {
            *larc = reader.take(bits);
        }

        for sub in &mut params.subframes {
            sub.nc = reader.take(7);
            sub.bc = reader.take(2);
            sub.mc = reader.take(2);
            sub.xmaxc = reader.take(6);
            for pulse in &mut sub.xmc {
                *pulse = reader.take(3);
            }
        }

        Ok(params)
    }
}

struct BitWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BitWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn put(&mut self, value: u8, bits: u32) {
        for bit in (0..bits).rev() {
            if (value >> bit) & 1 != 0 {
                self.buf[self.pos / 8] |= 0x80 >> (self.pos % 8);
            }
            self.pos += 1;
        }
    }
}

struct BitReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, bits: u32) -> u8 {
        let mut value = 0u8;
        for _ in 0..bits {
            let bit = (self.buf[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | bit;
            self.pos += 1;
        }
        value
    }
}
