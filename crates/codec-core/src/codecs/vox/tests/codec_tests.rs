//! VOX frame codec tests

use crate::codecs::vox::VoxCodec;
use crate::error::CodecError;
use crate::types::{AudioCodec, CodecConfig, SampleRate};

#[test]
fn test_nibble_packing_order() {
    let mut codec = VoxCodec::default();
    let encoded = codec.encode(&[0, 0, 0, 0]).unwrap();

    // +0 then -0: high nibble first
    assert_eq!(encoded, vec![0x08, 0x08]);
}

#[test]
fn test_odd_length_is_padded() {
    let mut codec = VoxCodec::default();
    let encoded = codec.encode(&[0i16; 161]).unwrap();
    assert_eq!(encoded.len(), 81);

    // The pad nibble is the encoding of one more silent sample
    let mut reference = VoxCodec::default();
    let padded = reference.encode(&[0i16; 162]).unwrap();
    assert_eq!(encoded, padded);
    assert_eq!(codec.encoder_state(), reference.encoder_state());
}

#[test]
fn test_odd_length_frame_keeps_encoder_and_decoder_in_step() {
    let tone = |len: usize, phase: usize| -> Vec<i16> {
        (0..len)
            .map(|n| (8000.0 * (2.0 * std::f32::consts::PI * 440.0 * (n + phase) as f32 / 8000.0).sin()) as i16)
            .collect()
    };

    let mut codec = VoxCodec::default();
    let odd = codec.encode(&tone(161, 0)).unwrap();
    let decoded = codec.decode(&odd).unwrap();
    assert_eq!(decoded.len(), 162);
    assert_eq!(codec.encoder_state(), codec.decoder_state());

    // The next frame decodes exactly like a per-sample round trip
    let next = tone(160, 161);
    let mut in_step = codec.clone();
    let expected: Vec<i16> = next.iter().map(|&s| in_step.round_trip_sample(s)).collect();

    let encoded = codec.encode(&next).unwrap();
    assert_eq!(codec.decode(&encoded).unwrap(), expected);
    assert_eq!(codec.encoder_state(), codec.decoder_state());
}

#[test]
fn test_frame_round_trip_matches_per_sample_path() {
    let samples: Vec<i16> = (0..320).map(|n| ((n * 97) % 4000 - 2000) as i16).collect();

    let mut frame_codec = VoxCodec::default();
    let encoded = frame_codec.encode(&samples).unwrap();
    let decoded = frame_codec.decode(&encoded).unwrap();

    let mut sample_codec = VoxCodec::default();
    let expected: Vec<i16> = samples.iter().map(|&s| sample_codec.round_trip_sample(s)).collect();

    assert_eq!(decoded, expected);
    assert_eq!(frame_codec.encoder_state(), frame_codec.decoder_state());
}

#[test]
fn test_reset_restores_initial_state() {
    let mut codec = VoxCodec::default();
    codec.encode(&[12000i16; 64]).unwrap();
    assert_ne!(codec.encoder_state().predictor, 0);

    codec.reset().unwrap();
    assert_eq!(codec.encoder_state().predictor, 0);
    assert_eq!(codec.encoder_state().step_index, 0);
    assert_eq!(codec.decoder_state().predictor, 0);
}

#[test]
fn test_empty_input_rejected() {
    let mut codec = VoxCodec::default();
    assert!(codec.encode(&[]).is_err());
    assert!(matches!(codec.decode(&[]), Err(CodecError::InvalidFormat { .. })));
}

#[test]
fn test_codec_info() {
    let codec = VoxCodec::new(CodecConfig::vox().with_sample_rate(SampleRate::Rate6000)).unwrap();
    let info = codec.info();
    assert_eq!(info.name, "VOX");
    assert_eq!(info.sample_rate, 6000);
    assert_eq!(info.bitrate, 24000);
    assert!(codec.supports_variable_frame_size());

    assert!(VoxCodec::new(CodecConfig::gsm()).is_err());
}
