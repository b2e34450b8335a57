mod back_end;
mod dsp;
mod engine;
mod patch_yaml;
mod plugin;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, SampleRate, StreamConfig};
use std::thread;
use std::time::Duration;

// DEBUGGING, LOGGING
use simplelog::__private::paris::Logger;
use simplelog::*;

// MY STUFF
use back_end::{get_preferred_config, write_interleaved, Channels};
use crossbeam::channel::bounded;
use engine::{ControlEvent, Engine};
use patch_yaml::load_patch;
use plugin::{Distortion, Synth};
use ringbuf::HeapRb;

const SAMPLE_RATE: i32 = 44100;
const BLOCK_SIZE: usize = 512;
// Interleaved stereo samples: eight blocks of slack between the engine
// thread and the output callback.
const RING_CAPACITY: usize = BLOCK_SIZE * 2 * 8;

fn main() -> Result<(), anyhow::Error> {
    // LOGGER INIT
    TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("Failed to start simplelog");
    let mut logger = Logger::new();

    info!("<b>Running <blue>demo program</>");

    // BUILD THE RIG
    let mut synth = Synth::new();
    let mut distortion = Distortion::new();

    match load_patch("demo.yaml") {
        Ok(patch) => patch.apply(&mut synth, &mut distortion),
        Err(err) => {
            warn!("<b>Could not load the demo patch, <yellow>using defaults</><b>.</>");
            warn!("  |_ reason: {}", err);
        }
    }

    if std::env::args().any(|arg| arg == "--bounce") {
        return bounce(synth, distortion, "clipwave-demo.wav", 2000);
    }

    // get default host and device
    let host = cpal::default_host();
    let device: Device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no default output device available"))?;

    let supported_config = get_preferred_config(
        &device,
        Some(SampleFormat::F32),
        Some(SampleRate(SAMPLE_RATE as u32)),
        Some(Channels::Stereo),
    )?;
    let config: StreamConfig = supported_config.into();

    // CONTROL AND OUTPUT BOUNDARIES
    let (tx, rx) = bounded(64);
    let ring: HeapRb<f32> = HeapRb::new(RING_CAPACITY);
    let (producer, mut consumer) = ring.split();

    // The engine must render at the rate the stream actually opened with.
    tx.send(ControlEvent::Reset {
        sample_rate: config.sample_rate.0 as f32,
    })?;

    let mut engine = Engine::new(synth, distortion, rx, producer, BLOCK_SIZE);
    let engine_handle = thread::spawn(move || engine.run());

    // If the ring runs dry, silence
    let mut next_value = move || consumer.pop().unwrap_or(0.0);

    let err_fn = |err| eprintln!("an error occurred on stream: {}", err);

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            write_interleaved(data, &mut next_value)
        },
        err_fn,
        None,
    )?;

    logger.loading("<blue><info></><b> Playing the patch, then cycling waveforms</>");
    stream.play()?;
    thread::sleep(Duration::from_millis(600));

    for index in 0..4 {
        tx.send(ControlEvent::SynthParam {
            tag: "mode".to_string(),
            value: index as f32,
        })?;
        thread::sleep(Duration::from_millis(400));
    }

    tx.send(ControlEvent::DistortionParam {
        tag: "threshold".to_string(),
        value: 80.0,
    })?;
    thread::sleep(Duration::from_millis(600));

    tx.send(ControlEvent::Shutdown)?;
    engine_handle
        .join()
        .map_err(|_| anyhow::anyhow!("engine thread panicked"))?;

    logger.done();
    info!("<green><tick></> <b>Program finished <green>successfully</>");
    Ok(())
}

/// Renders the rig offline and writes it to a 16-bit stereo WAV instead of
/// playing it.
fn bounce(
    mut synth: Synth,
    distortion: Distortion,
    path: &str,
    millis: usize,
) -> Result<(), anyhow::Error> {
    info!("<b>Bouncing <cyan>{} ms</><b> to <cyan>{}</>", millis, path);

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;

    let mut dry_left = vec![0.0f32; BLOCK_SIZE];
    let mut dry_right = vec![0.0f32; BLOCK_SIZE];
    let mut wet_left = vec![0.0f32; BLOCK_SIZE];
    let mut wet_right = vec![0.0f32; BLOCK_SIZE];

    let mut remaining = millis * SAMPLE_RATE as usize / 1000;
    while remaining > 0 {
        let n_frames = remaining.min(BLOCK_SIZE);

        synth.process([&mut dry_left[..], &mut dry_right[..]], n_frames);
        distortion.process(
            [&dry_left[..], &dry_right[..]],
            [&mut wet_left[..], &mut wet_right[..]],
            n_frames,
        );

        for i in 0..n_frames {
            writer.write_sample((wet_left[i] * i16::MAX as f32) as i16)?;
            writer.write_sample((wet_right[i] * i16::MAX as f32) as i16)?;
        }

        remaining -= n_frames;
    }

    writer.finalize()?;
    info!("<green><tick></> <b>Bounce written to <green>{}</>", path);
    Ok(())
}
