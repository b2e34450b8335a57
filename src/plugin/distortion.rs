use simplelog::warn;

use crate::dsp::Clipper;
use crate::plugin::{Parameter, ParameterBuilder, Plug};

/// The distortion effect. Owns exactly one [Clipper] and a single host
/// parameter:
///
/// * **threshold**: percentage 0 to 99.99, default 0 (no distortion).
///
/// The percentage is inverted into the clipper's threshold, so turning the
/// knob up clips harder. Processing is stereo in, stereo out.
pub struct Distortion {
    clipper: Clipper,
    parameters: Vec<Parameter>,
}

impl Distortion {
    pub fn new() -> Self {
        Self {
            clipper: Clipper::new(),
            parameters: vec![ParameterBuilder::new("threshold".to_string())
                .with_min(0.0)
                .with_max(99.99)
                .with_step(0.01)
                .with_default(0.0)
                .with_unit("%")
                .build()
                .unwrap()],
        }
    }

    /// Applies the clip-then-normalize transfer to the first `n_frames`
    /// samples of both channels.
    pub fn process(&self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2], n_frames: usize) {
        self.clipper.process(inputs, outputs, n_frames);
    }

    pub fn clipper(&self) -> &Clipper {
        &self.clipper
    }
}

impl Default for Distortion {
    fn default() -> Self {
        Self::new()
    }
}

impl Plug for Distortion {
    fn on_param_change(&mut self, tag: &str, value: f32) {
        match tag {
            "threshold" => {
                if let Some(param) = self.parameters.iter_mut().find(|p| p.get_tag() == tag) {
                    param.set_clamped(value);
                    self.clipper.set_threshold(param.get_value());
                }
            }
            _ => {
                warn!("<b>Parameter tag <yellow>not found</><b> in distortion.</>");
                warn!("  |_ tag: {}", tag);
            }
        }
    }

    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::THRESHOLD_FLOOR;
    use crate::plugin::{find_preset, DISTORTION_PRESETS};

    #[test]
    fn test_default_passes_signal_through() {
        let distortion = Distortion::new();
        assert_eq!(distortion.clipper().threshold(), 1.0);

        let input = [0.3, -0.9, 0.0];
        let mut left = [0.0; 3];
        let mut right = [0.0; 3];
        distortion.process([&input, &input], [&mut left, &mut right], 3);

        assert_eq!(left, input, "Default distortion must be transparent");
    }

    #[test]
    fn test_threshold_parameter_reaches_clipper() {
        let mut distortion = Distortion::new();

        distortion.on_param_change("threshold", 20.0);
        assert_eq!(distortion.parameter("threshold").unwrap().get_value(), 20.0);
        assert!(
            (distortion.clipper().threshold() - 0.8).abs() < 1e-6,
            "20% must map to a 0.8 threshold"
        );
    }

    #[test]
    fn test_threshold_clamped_to_host_range() {
        let mut distortion = Distortion::new();

        // 100% is past the host maximum of 99.99; the registry clamps it
        // and the clipper ends up at its floor instead of dividing by zero.
        distortion.on_param_change("threshold", 100.0);
        assert_eq!(
            distortion.parameter("threshold").unwrap().get_value(),
            99.99
        );
        assert!(distortion.clipper().threshold() >= THRESHOLD_FLOOR);

        let mut left = [0.0; 1];
        let mut right = [0.0; 1];
        distortion.process([&[0.5], &[0.5]], [&mut left, &mut right], 1);
        assert!(left[0].is_finite(), "Full distortion produced NaN/inf");
        assert_eq!(left[0], 1.0);
    }

    #[test]
    fn test_process_clips_and_normalizes() {
        let mut distortion = Distortion::new();
        distortion.on_param_change("threshold", 50.0);

        let input = [0.3, 0.8, -0.9];
        let mut left = [0.0; 3];
        let mut right = [0.0; 3];
        distortion.process([&input, &input], [&mut left, &mut right], 3);

        assert_eq!(left, [0.6, 1.0, -1.0]);
        assert_eq!(right, [0.6, 1.0, -1.0]);
    }

    #[test]
    fn test_presets() {
        let mut distortion = Distortion::new();

        distortion.apply_preset(find_preset(DISTORTION_PRESETS, "medium distortion").unwrap());
        assert!(
            (distortion.clipper().threshold() - 0.6).abs() < 1e-6,
            "40% must map to a 0.6 threshold"
        );

        distortion.apply_preset(find_preset(DISTORTION_PRESETS, "MAXIMUM distortion!!!").unwrap());
        assert!(distortion.clipper().threshold() >= THRESHOLD_FLOOR);
        assert!(distortion.clipper().threshold() < 0.001);
    }
}
