//! GSM 06.10 Test Modules

mod codec_tests;

/// Deterministic test signal: a 73-sample triangle plus pseudo-random noise,
/// 13-bit left-aligned
pub(super) fn test_signal(n: usize) -> i16 {
    let triangle = (n % 73) as i32 * 400 - 14600;
    let noise = ((n * 7919 + 13) % 257) as i32 * 8 - 1024;
    (triangle + noise) as i16 & !0x7
}

pub(super) fn test_frame(index: usize) -> [i16; crate::codecs::gsm::GSM_FRAME_SAMPLES] {
    std::array::from_fn(|n| test_signal(index * crate::codecs::gsm::GSM_FRAME_SAMPLES + n))
}
