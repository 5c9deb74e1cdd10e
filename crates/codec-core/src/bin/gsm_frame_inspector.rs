//! GSM 06.10 frame file inspector
//!
//! Reads a file of raw 33-byte GSM frames (as written by `toast` or the
//! `.gsm` audio format) and prints the parameter fields of each frame,
//! together with the level of the decoded audio.

use rstelecom_codec_core::Result;
use rstelecom_codec_core::codecs::gsm::{GSM_FRAME_BYTES, GSM_FRAME_SAMPLES, GsmDecoder, GsmFrameParams};
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_FRAMES_TO_INSPECT: usize = 5;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <path_to_gsm_file> [frames_to_show]", args[0]);
        eprintln!("Example: {} recording.gsm 10", args[0]);
        return ExitCode::FAILURE;
    }

    let limit = match args.get(2).map(|s| s.parse::<usize>()) {
        None => DEFAULT_FRAMES_TO_INSPECT,
        Some(Ok(limit)) => limit,
        Some(Err(err)) => {
            eprintln!("Error: invalid frame count '{}': {}", args[2], err);
            return ExitCode::FAILURE;
        }
    };

    match inspect(Path::new(&args[1]), limit) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn inspect(path: &Path, limit: usize) -> Result<()> {
    let buffer = std::fs::read(path)?;

    println!("GSM 06.10 Frame Inspector");
    println!("=========================");
    println!("File: {}", path.display());
    println!("Size: {} bytes", buffer.len());
    println!("Frames: {}", buffer.len() / GSM_FRAME_BYTES);
    if buffer.len() % GSM_FRAME_BYTES != 0 {
        println!("Trailing bytes: {}", buffer.len() % GSM_FRAME_BYTES);
    }
    println!();

    let mut decoder = GsmDecoder::new();
    let mut samples = [0i16; GSM_FRAME_SAMPLES];
    let mut bad_frames = 0usize;

    // Every frame is decoded so the decoder state is right for the frames shown
    for (index, frame) in buffer.chunks_exact(GSM_FRAME_BYTES).enumerate() {
        let show = index < limit;

        let params = match GsmFrameParams::unpack(frame) {
            Ok(params) => params,
            Err(err) => {
                bad_frames += 1;
                if show {
                    println!("Frame {index}: {err}");
                    println!();
                }
                continue;
            }
        };
        decoder.decode_params(&params, &mut samples);

        if show {
            print_frame(index, frame, &params, &samples);
        }
    }

    if bad_frames > 0 {
        println!("Frames with a bad magic nibble: {bad_frames}");
    }

    Ok(())
}

fn print_frame(index: usize, frame: &[u8], params: &GsmFrameParams, samples: &[i16; GSM_FRAME_SAMPLES]) {
    println!("Frame {index}:");
    print!("  Hex: ");
    for byte in frame {
        print!("{byte:02X} ");
    }
    println!();

    println!("  LARc: {:?}", params.larc);
    for (k, sub) in params.subframes.iter().enumerate() {
        println!(
            "  Subframe {k}: Nc={:3} bc={} Mc={} xmaxc={:2} xMc={:?}",
            sub.nc, sub.bc, sub.mc, sub.xmaxc, sub.xmc
        );
    }

    let energy: f64 = samples.iter().map(|&s| f64::from(s).powi(2)).sum();
    let rms = (energy / GSM_FRAME_SAMPLES as f64).sqrt();
    let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
    println!("  Decoded: rms={rms:.1} peak={peak}");
    println!();
}
