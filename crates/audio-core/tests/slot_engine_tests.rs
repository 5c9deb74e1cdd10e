//! Slot engine integration tests

use rstelecom_audio_core::engine::{
    ProcessorRegistry, SELECTOR_A_LAW, SELECTOR_GSM, SELECTOR_ILBC, SELECTOR_MU_LAW, SELECTOR_NONE, SELECTOR_VOX,
};
use rstelecom_audio_core::prelude::*;
use serial_test::serial;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing_test::traced_test;

fn tone(len: usize, channels: usize) -> AudioBuffer {
    let samples: Vec<f32> = (0..len)
        .map(|n| 0.4 * (2.0 * std::f32::consts::PI * 440.0 * n as f32 / 48000.0).sin())
        .collect();
    AudioBuffer::from_channels(vec![samples; channels]).unwrap()
}

fn prepared_engine(spec: &ProcessSpec) -> SlotEngine {
    let mut engine = SlotEngine::new(EngineConfig::default()).unwrap();
    engine.prepare(spec).unwrap();
    engine
}

/// Two slots process in series, exactly like two processors applied in turn
#[test]
fn test_serial_composition() {
    let spec = ProcessSpec::stereo_48k();
    let config = EngineConfig::default();
    let params = CodecParameters::new(3, 2);

    let mut engine = prepared_engine(&spec);
    let snapshot = ControlSnapshot::new(params, &[SELECTOR_VOX, SELECTOR_MU_LAW]);

    let mut vox = VoxProcessor::new(&config);
    let mut mu = CompanderProcessor::mu_law(&config);
    for processor in [&mut vox as &mut dyn CodecProcessor, &mut mu] {
        processor.set_parameters(params);
        processor.prepare(&spec).unwrap();
    }

    for _ in 0..4 {
        let mut through_engine = tone(512, 2);
        engine.process_block_with(&mut through_engine, &snapshot);

        let mut by_hand = tone(512, 2);
        vox.process_block(&mut by_hand);
        mu.process_block(&mut by_hand);

        assert_eq!(through_engine, by_hand);
    }
}

/// A slot keeps its processor and state while its selector is unchanged
#[test]
fn test_unchanged_selector_keeps_state() {
    let spec = ProcessSpec::new(48000.0, 1, 512);
    let mut engine = prepared_engine(&spec);
    let snapshot = ControlSnapshot::new(CodecParameters::default(), &[SELECTOR_GSM]);

    for _ in 0..5 {
        engine.process_block_with(&mut tone(512, 1), &snapshot);
    }

    // A freshly built GSM processor would not have run 16 frames yet
    let mut fresh = GsmProcessor::new(&EngineConfig::default());
    fresh.prepare(&spec).unwrap();
    let mut expected = tone(512, 1);
    fresh.process_block(&mut expected);

    let mut actual = tone(512, 1);
    engine.process_block_with(&mut actual, &snapshot);
    assert_ne!(actual, expected);
}

/// Switching away and back builds a new instance from scratch
#[test]
fn test_reselect_starts_fresh() {
    let spec = ProcessSpec::new(48000.0, 1, 512);
    let params = CodecParameters::new(2, 1);
    let vox = ControlSnapshot::new(params, &[SELECTOR_VOX]);
    let none = ControlSnapshot::new(params, &[SELECTOR_NONE]);

    let mut engine = prepared_engine(&spec);
    let mut first = tone(512, 1);
    engine.process_block_with(&mut first, &vox);

    engine.process_block_with(&mut tone(512, 1), &vox);
    engine.process_block_with(&mut tone(512, 1), &none);

    let mut again = tone(512, 1);
    engine.process_block_with(&mut again, &vox);
    assert_eq!(again, first);
}

/// Unknown and reserved selectors pass audio through untouched
#[test]
fn test_passthrough_selectors() {
    let spec = ProcessSpec::stereo_48k();
    let mut engine = prepared_engine(&spec);

    for id in [SELECTOR_NONE, SELECTOR_ILBC, 99] {
        let snapshot = ControlSnapshot::new(CodecParameters::new(4, 1), &[id, id]);
        let mut buffer = tone(256, 2);
        engine.process_block_with(&mut buffer, &snapshot);
        assert_eq!(buffer, tone(256, 2), "selector {}", id);
    }
}

/// Every built-in selector produces finite audio at every factor
#[test]
fn test_all_selectors_all_factors() {
    let spec = ProcessSpec::stereo_48k();
    let mut engine = prepared_engine(&spec);

    for id in [SELECTOR_GSM, SELECTOR_MU_LAW, SELECTOR_A_LAW, SELECTOR_VOX] {
        for factor in 1..=8 {
            let snapshot = ControlSnapshot::new(CodecParameters::new(factor, 1), &[id, SELECTOR_A_LAW]);
            let mut buffer = tone(480, 2);
            engine.process_block_with(&mut buffer, &snapshot);
            assert!(buffer.is_finite(), "selector {} factor {}", id, factor);
        }
    }
}

/// Slot swaps and unknown selectors are logged
#[test]
#[traced_test]
fn test_slot_changes_are_logged() {
    let mut engine = prepared_engine(&ProcessSpec::stereo_48k());
    let controls = engine.controls();

    controls.set_selector(0, SELECTOR_MU_LAW);
    engine.process_block(&mut AudioBuffer::new(2, 64));
    assert!(logs_contain("Slot switched from None to Mu-Law"));

    controls.set_selector(0, 77);
    engine.process_block(&mut AudioBuffer::new(2, 64));
    assert!(logs_contain("Unknown codec selector 77"));
    assert!(logs_contain("Slot switched from Mu-Law to None"));
}

/// A control thread hammering parameters never disturbs the audio thread
#[test]
#[serial]
fn test_controls_written_during_processing() {
    let mut engine = prepared_engine(&ProcessSpec::stereo_48k());
    let controls = engine.controls();
    let running = Arc::new(AtomicBool::new(true));

    let writer = {
        let controls = Arc::clone(&controls);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let selectors = [SELECTOR_VOX, SELECTOR_GSM, SELECTOR_MU_LAW, SELECTOR_A_LAW, SELECTOR_NONE];
            let mut step = 0u32;
            while running.load(Ordering::Relaxed) {
                controls.set_downsampling_factor(step % 10);
                controls.set_bitrate_mode(step % 6);
                controls.set_selector((step % 2) as usize, selectors[step as usize % selectors.len()]);
                step = step.wrapping_add(1);
                thread::yield_now();
            }
        })
    };

    for _ in 0..200 {
        let mut buffer = tone(128, 2);
        engine.process_block(&mut buffer);
        assert!(buffer.is_finite());
    }

    running.store(false, Ordering::Relaxed);
    writer.join().unwrap();

    // Sanitized values reached every active processor
    for slot in engine.slots() {
        if let Some(processor) = slot.processor() {
            let params = processor.parameters();
            assert!((1..=8).contains(&params.downsampling_factor));
            assert!((1..=4).contains(&params.bitrate_mode));
        }
    }
}

/// A registry with a custom entry drives the engine like a built-in one
#[test]
fn test_custom_registry() {
    let mut registry = ProcessorRegistry::new();
    registry.register(SELECTOR_ILBC, "Stand-in", |config| Box::new(CompanderProcessor::a_law(config)));

    let mut engine = SlotEngine::with_registry(EngineConfig::default().with_slot_count(1), registry).unwrap();
    engine.prepare(&ProcessSpec::stereo_48k()).unwrap();

    let controls = engine.controls();
    controls.set_selector(0, SELECTOR_ILBC);
    assert!(!controls.set_selector(1, SELECTOR_VOX));

    engine.process_block(&mut tone(64, 2));
    assert_eq!(engine.active_processors(), vec!["A-Law"]);
}

/// Re-preparing moves active processors to the new stream shape
#[test]
fn test_prepare_after_activation() {
    let mut engine = prepared_engine(&ProcessSpec::new(48000.0, 1, 256));
    engine.process_block_with(
        &mut tone(256, 1),
        &ControlSnapshot::new(CodecParameters::default(), &[SELECTOR_VOX]),
    );

    engine.prepare(&ProcessSpec::stereo_48k()).unwrap();
    let mut buffer = tone(256, 2);
    engine.process_block_with(
        &mut buffer,
        &ControlSnapshot::new(CodecParameters::default(), &[SELECTOR_VOX]),
    );
    // Both channels now run through their own codec
    assert_eq!(buffer.channel(0), buffer.channel(1));
    assert_ne!(buffer.channel(1), tone(256, 2).channel(1));
}
