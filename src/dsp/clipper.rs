use simplelog::warn;

/// Lowest threshold the clipper will accept. The host parameter tops out at
/// 99.99 %, which already lands here; anything lower would divide by zero
/// and push NaN into the output.
pub const THRESHOLD_FLOOR: f32 = 1e-4;

/// Symmetric hard clip followed by normalization. Samples beyond the
/// threshold are clamped to it, then the whole signal is divided by the
/// threshold so the output swings the full `[-1, 1]` range again. Lower
/// thresholds clip more of the wave and therefore distort harder.
///
/// The stage is stateless: every sample is transformed on its own, so the
/// threshold is the only field and there is no history to reset.
pub struct Clipper {
    /// Clipping boundary in `(0, 1]`. 1.0 passes the signal through.
    threshold: f32,
}

impl Clipper {
    /// A clipper that does not distort (threshold 1.0).
    pub fn new() -> Self {
        Self { threshold: 1.0 }
    }

    /// Sets the threshold from the host-facing percentage,
    /// `threshold = 1 - percentage / 100`. The result is clamped into
    /// `[THRESHOLD_FLOOR, 1.0]`: a percentage of 100 or more would
    /// otherwise zero the threshold and the normalization would divide by
    /// zero.
    pub fn set_threshold(&mut self, percentage: f32) {
        let threshold = 1.0 - percentage / 100.0;

        if !(THRESHOLD_FLOOR..=1.0).contains(&threshold) {
            warn!("<b>Threshold percentage <yellow>out of range</><b>. Clamping.</>");
            warn!("  |_ input percentage: {}", percentage);
            warn!("  |_ valid range: <green>[0, 99.99]</>");
        }

        self.threshold = threshold.clamp(THRESHOLD_FLOOR, 1.0);
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// The per-sample transfer function: clamp into `[-threshold,
    /// threshold]`, then rescale by the threshold. Inside the window the
    /// output is `x / threshold`; beyond it the output is exactly `±1`.
    #[inline]
    pub fn transfer(&self, sample: f32) -> f32 {
        let clipped = if sample > 0.0 {
            self.threshold.min(sample)
        } else {
            (-self.threshold).max(sample)
        };

        clipped / self.threshold
    }

    /// Applies the transfer function to the first `n_frames` samples of
    /// each channel, elementwise and independently per channel. Stereo
    /// only, matching the host's fixed two-channel layout.
    pub fn process(&self, inputs: [&[f32]; 2], outputs: [&mut [f32]; 2], n_frames: usize) {
        for (input, output) in inputs.into_iter().zip(outputs) {
            for (x, y) in input.iter().zip(output.iter_mut()).take(n_frames) {
                *y = self.transfer(*x);
            }
        }
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}
