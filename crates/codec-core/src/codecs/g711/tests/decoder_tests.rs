//! G.711 Decoder Unit Tests

use crate::codecs::g711::tables::{ALAW_DECOMPRESS_TABLE, MULAW_DECOMPRESS_TABLE};
use crate::codecs::g711::*;
use crate::types::{AudioCodec, CodecConfig};

#[test]
fn test_mulaw_table_matches_closed_form() {
    for byte in 0..=u8::MAX {
        assert_eq!(
            MULAW_DECOMPRESS_TABLE[usize::from(byte)],
            ulaw_expand_arith(byte),
            "μ-law byte {byte:#04x}"
        );
    }
}

#[test]
fn test_alaw_table_matches_closed_form() {
    for byte in 0..=u8::MAX {
        assert_eq!(
            ALAW_DECOMPRESS_TABLE[usize::from(byte)],
            alaw_expand_arith(byte),
            "A-law byte {byte:#04x}"
        );
    }
}

#[test]
fn test_tables_are_odd_symmetric() {
    for byte in 0..0x80u8 {
        assert_eq!(ulaw_expand(byte), -ulaw_expand(byte | 0x80));
        assert_eq!(alaw_expand(byte), -alaw_expand(byte | 0x80));
    }
}

#[test]
fn test_recompression_is_stable() {
    // μ-law has two zeros; 0x7F (-0) expands to 0 and recompresses as +0
    for byte in 0..=u8::MAX {
        let expected = if byte == 0x7F { 0xFF } else { byte };
        assert_eq!(ulaw_compress(ulaw_expand(byte)), expected);
        assert_eq!(alaw_compress(alaw_expand(byte)), byte);
    }
}

#[test]
fn test_frame_codec_round_trip() {
    let samples: Vec<i16> = (0..160).map(|n| ((n * 409) % 20000 - 10000) as i16).collect();

    for config in [CodecConfig::g711_pcmu(), CodecConfig::g711_pcma()] {
        let mut codec = crate::codecs::CodecFactory::create(config).unwrap();
        let encoded = codec.encode(&samples).unwrap();
        assert_eq!(encoded.len(), samples.len());

        let decoded = codec.decode(&encoded).unwrap();
        for (&original, &restored) in samples.iter().zip(&decoded) {
            assert!((original - restored).abs() <= 512, "{original} -> {restored}");
        }
    }
}

#[test]
fn test_buffer_api() {
    let codec = G711Codec::for_law(CompandingLaw::ALaw);
    let samples = [0i16, 1000, -1000, 20000];
    let mut encoded = [0u8; 4];
    let mut decoded = [0i16; 4];

    assert_eq!(codec.compress_into(&samples, &mut encoded).unwrap(), 4);
    assert_eq!(codec.expand_into(&encoded, &mut decoded).unwrap(), 4);
    assert_eq!(decoded[0], 8);

    let mut short = [0u8; 2];
    assert!(codec.compress_into(&samples, &mut short).is_err());
}
