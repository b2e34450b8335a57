use simplelog::warn;

use crate::dsp::{Oscillator, OscillatorBuilder, Waveform};
use crate::plugin::{Parameter, ParameterBuilder, Plug};

/// The four-waveform synthesizer instrument. Owns exactly one [Oscillator]
/// and the two host parameters driving it:
///
/// * **frequency**: 20 Hz to 20 kHz, default 440 Hz;
/// * **mode**: waveform index 0 to 3 (sine, saw, square, triangle).
///
/// Output is stereo by duplication: the oscillator fills the left channel
/// and the right channel is copied from it.
pub struct Synth {
    oscillator: Oscillator,
    parameters: Vec<Parameter>,
}

impl Synth {
    pub fn new() -> Self {
        // The builder defaults match the parameter defaults below, so a
        // default-constructed synth plays a 440 Hz sine with no setup.
        Self {
            oscillator: OscillatorBuilder::new().build().unwrap(),
            parameters: vec![
                ParameterBuilder::new("frequency".to_string())
                    .with_min(20.0)
                    .with_max(20000.0)
                    .with_step(0.01)
                    .with_default(440.0)
                    .with_unit("Hz")
                    .build()
                    .unwrap(),
                ParameterBuilder::new("mode".to_string())
                    .with_min(0.0)
                    .with_max(3.0)
                    .with_step(1.0)
                    .with_default(0.0)
                    .build()
                    .unwrap(),
            ],
        }
    }

    /// Called by the host when the stream (re)starts. Only the sample rate
    /// changes here; every other setting survives a reset.
    pub fn reset(&mut self, sample_rate: f32) {
        self.oscillator.set_sample_rate(sample_rate);
    }

    /// Fills the first `n_frames` of both output channels: the oscillator
    /// generates into the left buffer and the right buffer is duplicated
    /// from it. A muted oscillator leaves the left buffer as the caller
    /// provided it, and the duplication still runs.
    pub fn process(&mut self, outputs: [&mut [f32]; 2], n_frames: usize) {
        let [left, right] = outputs;
        let left = &mut left[..n_frames];

        self.oscillator.generate(left);
        right[..n_frames].copy_from_slice(left);
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }
}

impl Default for Synth {
    fn default() -> Self {
        Self::new()
    }
}

impl Plug for Synth {
    fn on_param_change(&mut self, tag: &str, value: f32) {
        match tag {
            "frequency" => {
                // The registry clamps to the host range; the oscillator gets
                // the clamped value.
                if let Some(param) = self.parameters.iter_mut().find(|p| p.get_tag() == tag) {
                    param.set_clamped(value);
                    self.oscillator.set_frequency(param.get_value());
                }
            }
            "mode" => {
                if let Some(param) = self.parameters.iter_mut().find(|p| p.get_tag() == tag) {
                    param.set_clamped(value);
                }
                // The raw index reaches the oscillator unclamped: an
                // unmapped index mutes instead of snapping to the nearest
                // waveform.
                self.oscillator.set_mode(Waveform::from_index(value as i64));
            }
            _ => {
                warn!("<b>Parameter tag <yellow>not found</><b> in synth.</>");
                warn!("  |_ tag: {}", tag);
            }
        }
    }

    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}
