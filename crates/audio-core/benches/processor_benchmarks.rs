use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rstelecom_audio_core::engine::{SELECTOR_GSM, SELECTOR_MU_LAW, SELECTOR_VOX};
use rstelecom_audio_core::filter::{DEFAULT_FILTER_ORDER, GainTable, ResamplingChain};
use rstelecom_audio_core::prelude::*;

// --- Common benchmark configuration ---
const BLOCK: usize = 512;
const SAMPLE_RATE: f64 = 48000.0;

fn stereo_block() -> AudioBuffer {
    let samples: Vec<f32> = (0..BLOCK)
        .map(|n| {
            let t = n as f32 / SAMPLE_RATE as f32;
            0.3 * (2.0 * std::f32::consts::PI * 220.0 * t).sin() + 0.1 * (2.0 * std::f32::consts::PI * 1300.0 * t).sin()
        })
        .collect();
    AudioBuffer::from_channels(vec![samples.clone(), samples]).unwrap()
}

/// Pre-filter, hold and post-filter alone, per factor
fn bench_resampling_chain(c: &mut Criterion) {
    let input = stereo_block();
    let mut group = c.benchmark_group("resampling_chain");
    group.throughput(Throughput::Elements(BLOCK as u64));

    for factor in [1u32, 4, 8] {
        let mut chain = ResamplingChain::new(SAMPLE_RATE, 1, DEFAULT_FILTER_ORDER, factor, GainTable::hold()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(factor), &factor, |b, _| {
            b.iter(|| {
                input
                    .channel(0)
                    .iter()
                    .map(|&x| chain.process_sample(0, black_box(x), |held| held))
                    .sum::<f32>()
            })
        });
    }

    group.finish();
}

/// One stereo block through each processor at factor 6
fn bench_processors(c: &mut Criterion) {
    let config = EngineConfig::default();
    let spec = ProcessSpec::new(SAMPLE_RATE, 2, BLOCK);
    let input = stereo_block();
    let mut group = c.benchmark_group("processors");
    group.throughput(Throughput::Elements((BLOCK * 2) as u64));

    let processors: Vec<Box<dyn CodecProcessor>> = vec![
        Box::new(VoxProcessor::new(&config)),
        Box::new(CompanderProcessor::mu_law(&config)),
        Box::new(CompanderProcessor::a_law(&config)),
        Box::new(GsmProcessor::new(&config)),
    ];

    for mut processor in processors {
        processor.set_parameters(CodecParameters::new(6, 1));
        processor.prepare(&spec).unwrap();
        group.bench_function(processor.name(), |b| {
            b.iter(|| {
                let mut buffer = input.clone();
                processor.process_block(black_box(&mut buffer));
                buffer
            })
        });
    }

    group.finish();
}

/// Two chained slots, steady state and with a swap every block
fn bench_slot_engine(c: &mut Criterion) {
    let input = stereo_block();
    let mut group = c.benchmark_group("slot_engine");
    group.throughput(Throughput::Elements((BLOCK * 2) as u64));

    let mut engine = SlotEngine::new(EngineConfig::default()).unwrap();
    engine.prepare(&ProcessSpec::new(SAMPLE_RATE, 2, BLOCK)).unwrap();
    let steady = ControlSnapshot::new(CodecParameters::new(4, 1), &[SELECTOR_VOX, SELECTOR_MU_LAW]);

    group.bench_function("steady", |b| {
        b.iter(|| {
            let mut buffer = input.clone();
            engine.process_block_with(black_box(&mut buffer), &steady);
            buffer
        })
    });

    let swaps = [
        ControlSnapshot::new(CodecParameters::new(4, 1), &[SELECTOR_GSM, SELECTOR_MU_LAW]),
        ControlSnapshot::new(CodecParameters::new(4, 1), &[SELECTOR_VOX, SELECTOR_MU_LAW]),
    ];
    let mut turn = 0usize;
    group.bench_function("swap_every_block", |b| {
        b.iter(|| {
            let mut buffer = input.clone();
            engine.process_block_with(black_box(&mut buffer), &swaps[turn % 2]);
            turn += 1;
            buffer
        })
    });

    group.finish();
}

criterion_group!(benches, bench_resampling_chain, bench_processors, bench_slot_engine);
criterion_main!(benches);
