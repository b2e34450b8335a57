use crossbeam::channel::{Receiver, TryRecvError};
use ringbuf::{Consumer, Producer, SharedRb};
use simplelog::info;
use std::mem::MaybeUninit;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use thiserror::Error;

use crate::plugin::{Distortion, Plug, Synth};

/// Alias for the ring buffer producer carrying interleaved stereo samples.
pub type OutputProducer = Producer<f32, Arc<SharedRb<f32, Vec<MaybeUninit<f32>>>>>;
/// Alias for the matching consumer side, owned by the output callback.
pub type OutputConsumer = Consumer<f32, Arc<SharedRb<f32, Vec<MaybeUninit<f32>>>>>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("output ring buffer cannot take a {0} frame block")]
    OutputFull(usize),
    #[error("control channel disconnected")]
    ControlDisconnected,
}

/// Control messages crossing from the UI/control thread into the engine.
/// This channel is the single entry point for mutating the instruments, so
/// parameter changes and block rendering are serialized by construction —
/// the "host lock" the processing contracts assume.
pub enum ControlEvent {
    SynthParam { tag: String, value: f32 },
    DistortionParam { tag: String, value: f32 },
    Reset { sample_rate: f32 },
    Shutdown,
}

/// The engine exclusively owns the synthesizer and the distortion and runs
/// them block by block: drain every pending [ControlEvent], render the
/// synthesizer into scratch buffers, push the block through the distortion
/// and hand the interleaved result to the output ring.
///
/// All scratch space is allocated up front; rendering itself never
/// allocates.
pub struct Engine {
    synth: Synth,
    distortion: Distortion,
    controls: Receiver<ControlEvent>,
    output: OutputProducer,
    block_size: usize,
    dry_left: Vec<f32>,
    dry_right: Vec<f32>,
    wet_left: Vec<f32>,
    wet_right: Vec<f32>,
    running: bool,
}

impl Engine {
    pub fn new(
        synth: Synth,
        distortion: Distortion,
        controls: Receiver<ControlEvent>,
        output: OutputProducer,
        block_size: usize,
    ) -> Self {
        Self {
            synth,
            distortion,
            controls,
            output,
            block_size,
            dry_left: vec![0.0; block_size],
            dry_right: vec![0.0; block_size],
            wet_left: vec![0.0; block_size],
            wet_right: vec![0.0; block_size],
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Applies every queued control event. Events always land between
    /// blocks, never inside one.
    fn drain_controls(&mut self) -> Result<(), EngineError> {
        loop {
            match self.controls.try_recv() {
                Ok(ControlEvent::SynthParam { tag, value }) => {
                    self.synth.on_param_change(&tag, value);
                }
                Ok(ControlEvent::DistortionParam { tag, value }) => {
                    self.distortion.on_param_change(&tag, value);
                }
                Ok(ControlEvent::Reset { sample_rate }) => {
                    info!("<b>Stream reset at <cyan>{} Hz</>", sample_rate);
                    self.synth.reset(sample_rate);
                }
                Ok(ControlEvent::Shutdown) => {
                    self.running = false;
                }
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => return Err(EngineError::ControlDisconnected),
            }
        }
    }

    /// Renders one block into the output ring. Fails without touching the
    /// ring when it cannot take the whole block, so blocks are never torn.
    pub fn render_block(&mut self) -> Result<(), EngineError> {
        self.drain_controls()?;

        if !self.running {
            return Ok(());
        }

        if self.output.free_len() < self.block_size * 2 {
            return Err(EngineError::OutputFull(self.block_size));
        }

        self.synth.process(
            [&mut self.dry_left[..], &mut self.dry_right[..]],
            self.block_size,
        );
        self.distortion.process(
            [&self.dry_left[..], &self.dry_right[..]],
            [&mut self.wet_left[..], &mut self.wet_right[..]],
            self.block_size,
        );

        for (left, right) in self.wet_left.iter().zip(self.wet_right.iter()) {
            // Capacity was checked above, the pushes cannot fail.
            let _ = self.output.push(*left);
            let _ = self.output.push(*right);
        }

        Ok(())
    }

    /// Render loop for a dedicated engine thread. Backs off briefly while
    /// the output ring is full and returns once a [ControlEvent::Shutdown]
    /// arrives or the control side hangs up.
    pub fn run(&mut self) {
        while self.running {
            match self.render_block() {
                Ok(()) => {}
                Err(EngineError::OutputFull(_)) => sleep(Duration::from_millis(1)),
                Err(EngineError::ControlDisconnected) => break,
            }
        }

        info!("<b>Engine stopped.</>");
    }
}
