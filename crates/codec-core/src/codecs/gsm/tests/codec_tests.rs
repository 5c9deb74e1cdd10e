//! GSM encoder/decoder tests

use super::{test_frame, test_signal};
use crate::codecs::gsm::*;
use crate::error::CodecError;
use crate::types::{AudioCodec, CodecConfig};

/// Third frame of the test signal, encoded from power-on
const THIRD_FRAME: [u8; GSM_FRAME_BYTES] = [
    0xD7, 0x9F, 0x92, 0xA0, 0xD9, 0x8C, 0xAD, 0x47, 0x5E, 0x9B, 0x5D, 0x7D, 0x93, 0x8E, 0xE2,
    0xD7, 0x8F, 0x2C, 0xA4, 0x93, 0x8A, 0x8E, 0x2B, 0x3C, 0x71, 0xCC, 0x9C, 0x4E, 0x3E, 0x5A,
    0x6D, 0xC7, 0x66,
];

fn snr_db(reference: &[i16], decoded: &[i16]) -> f64 {
    let signal: f64 = reference.iter().map(|&x| f64::from(x).powi(2)).sum();
    let noise: f64 = reference
        .iter()
        .zip(decoded)
        .map(|(&x, &y)| (f64::from(x) - f64::from(y)).powi(2))
        .sum();
    10.0 * (signal / noise.max(1.0)).log10()
}

#[test]
fn test_encoder_regression_frame() {
    let mut encoder = GsmEncoder::new();
    let mut frame = [0u8; GSM_FRAME_BYTES];

    for index in 0..3 {
        encoder.encode_frame(&test_frame(index), &mut frame);
    }

    assert_eq!(frame, THIRD_FRAME);

    let params = GsmFrameParams::unpack(&frame).unwrap();
    assert_eq!(params.larc, [30, 31, 18, 10, 8, 3, 3, 1]);
    assert_eq!(params.subframes[0].nc, 70);
    assert_eq!(params.subframes[0].bc, 1);
    assert_eq!(params.subframes[0].mc, 1);
    assert_eq!(params.subframes[0].xmaxc, 26);
}

#[test]
fn test_decoder_regression_frame() {
    let mut encoder = GsmEncoder::new();
    let mut decoder = GsmDecoder::new();
    let mut frame = [0u8; GSM_FRAME_BYTES];
    let mut output = [0i16; GSM_FRAME_SAMPLES];

    for index in 0..3 {
        encoder.encode_frame(&test_frame(index), &mut frame);
        decoder.decode_frame(&frame, &mut output).unwrap();
    }

    assert_eq!(output[..8], [-3344, -2264, -1648, -1336, -1456, -1384, -1128, 384]);
    assert_eq!(output.iter().map(|&s| i32::from(s)).sum::<i32>(), -34256);
}

#[test]
fn test_round_trip_quality() {
    let mut codec = Gsm610Codec::new(CodecConfig::gsm()).unwrap();
    let input: Vec<i16> = (0..GSM_FRAME_SAMPLES * 3).map(test_signal).collect();

    let encoded = codec.encode(&input).unwrap();
    let decoded = codec.decode(&encoded).unwrap();
    assert_eq!(decoded.len(), input.len());

    // Skip the first frame while the predictors settle
    let snr = snr_db(&input[GSM_FRAME_SAMPLES..], &decoded[GSM_FRAME_SAMPLES..]);
    assert!(snr > 15.0, "SNR {snr:.1} dB");
}

#[test]
fn test_sine_round_trip() {
    let mut codec = Gsm610Codec::default();
    let input: Vec<i16> = (0..GSM_FRAME_SAMPLES * 25)
        .map(|n| {
            let phase = 2.0 * std::f64::consts::PI * 440.0 * n as f64 / 8000.0;
            ((phase.sin() * 2048.0) as i16) << 3
        })
        .collect();

    let encoded = codec.encode(&input).unwrap();
    assert_eq!(encoded.len(), 25 * GSM_FRAME_BYTES);
    let decoded = codec.decode(&encoded).unwrap();

    let snr = snr_db(&input[800..], &decoded[800..]);
    assert!(snr > 20.0, "SNR {snr:.1} dB");
    assert!(decoded.iter().all(|&s| s & 0x7 == 0));
}

#[test]
fn test_extreme_input_stays_in_range() {
    let mut encoder = GsmEncoder::new();
    let mut decoder = GsmDecoder::new();
    let mut frame = [0u8; GSM_FRAME_BYTES];
    let mut output = [0i16; GSM_FRAME_SAMPLES];

    let inputs: [[i16; GSM_FRAME_SAMPLES]; 4] = [
        [i16::MIN; GSM_FRAME_SAMPLES],
        [0x7FF8; GSM_FRAME_SAMPLES],
        std::array::from_fn(|n| if (n / 20) % 2 == 0 { 0x7FF8 } else { i16::MIN }),
        std::array::from_fn(|n| if n % 2 == 0 { 0x7FF8 } else { i16::MIN }),
    ];

    for input in inputs.iter().cycle().take(20) {
        let params = encoder.encode_params(input);
        for sub in &params.subframes {
            assert!((40..=120).contains(&sub.nc));
            assert!(sub.xmaxc < 64);
            assert!(sub.xmc.iter().all(|&p| p < 8));
        }
        params.pack_into(&mut frame);
        decoder.decode_frame(&frame, &mut output).unwrap();
    }
}

#[test]
fn test_reset_restores_power_on_output() {
    let mut codec = Gsm610Codec::default();
    let input: Vec<i16> = (0..GSM_FRAME_SAMPLES).map(test_signal).collect();

    let first = codec.encode(&input).unwrap();
    let second = codec.encode(&input).unwrap();
    assert_ne!(first, second, "encoder memory changes the second frame");

    codec.reset().unwrap();
    assert_eq!(codec.encode(&input).unwrap(), first);
    assert_eq!(codec.encoder().state(), GsmEncoder::new().state());
}

#[test]
fn test_frame_size_validation() {
    let mut codec = Gsm610Codec::default();
    assert!(matches!(
        codec.encode(&[0; 100]),
        Err(CodecError::InvalidFrameSize { expected: 160, actual: 100 })
    ));
    assert!(codec.decode(&[0xD0; 32]).is_err());
    assert!(codec.encode(&[]).is_err());

    let mut small = [0u8; 10];
    assert!(matches!(
        codec.encode_into(&[0; 160], &mut small),
        Err(CodecError::BufferTooSmall { needed: 33, actual: 10 })
    ));
}

#[test]
fn test_decode_error_leaves_state() {
    let mut decoder = GsmDecoder::new();
    let mut output = [0i16; GSM_FRAME_SAMPLES];
    let before = decoder.state().clone();

    assert!(decoder.decode_frame(&[0u8; GSM_FRAME_BYTES], &mut output).is_err());
    assert_eq!(decoder.state(), &before);
}

#[test]
fn test_codec_info_and_config() {
    let codec = Gsm610Codec::default();
    let info = codec.info();
    assert_eq!(info.name, "GSM");
    assert_eq!(info.bitrate, 13200);
    assert_eq!(info.frame_size, 160);
    assert_eq!(info.encoded_frame_size, 33);
    assert!(!codec.supports_variable_frame_size());

    assert!(Gsm610Codec::new(CodecConfig::vox()).is_err());
    assert!(Gsm610Codec::new(CodecConfig::gsm().with_channels(2)).is_err());
}
