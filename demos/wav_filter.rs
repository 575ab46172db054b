//! Offline stereo filtering session with a mid-stream coefficient reload.

use hound::{SampleFormat, WavSpec, WavWriter};
use simple_logger::SimpleLogger;

use fir_stereo_dsp::fixed::q15_from_f32;
use fir_stereo_dsp::stereo_fir::StereoFir;

const SAMPLE_RATE: u32 = 48000;
const BLOCK_SIZE: usize = 32;

/// Seven-tap DC blocker; the taps sum to zero.
const DC_BLOCKER: [i16; 7] = [-1000, -2000, -4000, 14000, -4000, -2000, -1000];

/// Unity-gain smoothing boxcar.
const BOXCAR: [i16; 7] = [4681; 7];

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    let mut fir = StereoFir::new(7).unwrap();
    fir.load_coefficients(&DC_BLOCKER);
    fir.set_enabled(true);

    let spec = WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    std::fs::create_dir_all("out").unwrap();
    let mut writer = WavWriter::create("out/wav_filter.wav", spec).unwrap();

    let seconds: u32 = 4;
    let blocks = (seconds * SAMPLE_RATE) as usize / BLOCK_SIZE;
    let mut left = [0i16; BLOCK_SIZE];
    let mut right = [0i16; BLOCK_SIZE];

    for n in 0..blocks {
        // Halfway through, swap the DC blocker for the smoother while the
        // stream keeps running.
        if n == blocks / 2 {
            log::info!("reloading coefficients");
            fir.load_coefficients(&BOXCAR);
        }

        for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
            let t = (n * BLOCK_SIZE + i) as f32 / SAMPLE_RATE as f32;
            *l = q15_from_f32(0.4 * (core::f32::consts::TAU * 220.0 * t).sin() + 0.25);
            *r = q15_from_f32(0.4 * (core::f32::consts::TAU * 330.0 * t).sin() - 0.25);
        }
        fir.process(&mut left, &mut right);

        for (l, r) in left.iter().zip(right.iter()) {
            writer.write_sample(*l).unwrap();
            writer.write_sample(*r).unwrap();
        }
    }

    writer.finalize().unwrap();
    log::info!("wrote out/wav_filter.wav");
}
