use simplelog::warn;
use std::f32::consts::PI;

const TWO_PI: f32 = 2.0 * PI;

/// The shape of the wave an [Oscillator] produces. The set is closed: the
/// host addresses waveforms with an integer index (0 to 3) and anything
/// outside that range maps to no waveform at all, which mutes the oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

impl Waveform {
    /// Maps the host-facing mode index onto a waveform. Out-of-range indices
    /// return `None`, which callers should treat as "muted".
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Saw),
            2 => Some(Waveform::Square),
            3 => Some(Waveform::Triangle),
            _ => None,
        }
    }

    /// Looks a waveform up by its lowercase name. Used by the patch loader.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sine" => Some(Waveform::Sine),
            "saw" => Some(Waveform::Saw),
            "square" => Some(Waveform::Square),
            "triangle" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    /// The host-facing mode index of this waveform.
    pub fn index(self) -> usize {
        match self {
            Waveform::Sine => 0,
            Waveform::Saw => 1,
            Waveform::Square => 2,
            Waveform::Triangle => 3,
        }
    }
}

/// The oscillator is the genesis of the chain. It generates a raw periodic
/// signal by accumulating phase: every sample the phase moves forward by a
/// fixed increment derived from the frequency and the sample rate, and the
/// current waveform formula is evaluated at that phase.
///
/// # Usage
/// To create a **new oscillator**, use the [OscillatorBuilder].
///
/// To **change the behaviour** of an instance, use the setter named after
/// each property. Setting the frequency or the sample rate recomputes the
/// cached phase increment immediately, so generation can never observe a
/// stale increment.
///
/// # Phase continuity
/// `generate` is stateful across calls: the phase carries over from one
/// block to the next, so consecutive blocks join without a seam. Switching
/// waveforms does **not** reset the phase; an audible discontinuity on a
/// switch is accepted behaviour. Restarting the cycle requires an explicit
/// [reset_phase](fn@Oscillator::reset_phase).
pub struct Oscillator {
    /// Current waveform. `None` mutes the oscillator: `generate` leaves the
    /// buffer untouched.
    mode: Option<Waveform>,
    /// Tone of the signal, in Hz.
    frequency: f32,
    /// Amount of samples in a second, in Hz.
    sample_rate: f32,
    /// Position inside the waveform cycle, in radians. Kept in `[0, 2π)`
    /// after every advance.
    phase: f32,
    /// Cached radians-per-sample step, `frequency * 2π / sample_rate`.
    phase_increment: f32,
}

impl Oscillator {
    /// Sets the frequency and recomputes the phase increment. Non-positive
    /// values are rejected and the previous frequency is kept.
    pub fn set_frequency(&mut self, frequency: f32) {
        if frequency <= 0.0 {
            warn!("<b>Frequency must be <yellow>positive</><b>. Value kept back.</>");
            warn!("  |_ input value: {}", frequency);
            return;
        }

        self.frequency = frequency;
        self.update_increment();
    }

    /// Sets the sample rate and recomputes the phase increment. Must be
    /// called whenever the host stream is reset to a different rate.
    /// Non-positive values are rejected and the previous rate is kept.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate <= 0.0 {
            warn!("<b>Sample rate must be <yellow>positive</><b>. Value kept back.</>");
            warn!("  |_ input value: {}", sample_rate);
            return;
        }

        self.sample_rate = sample_rate;
        self.update_increment();
    }

    /// Selects the waveform starting with the next generated sample. `None`
    /// mutes the oscillator. The phase is deliberately left alone so that
    /// output stays continuous in time across switches.
    pub fn set_mode(&mut self, mode: Option<Waveform>) {
        self.mode = mode;
    }

    /// Restarts the cycle at phase zero. Never called implicitly.
    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn mode(&self) -> Option<Waveform> {
        self.mode
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn phase_increment(&self) -> f32 {
        self.phase_increment
    }

    fn update_increment(&mut self) {
        self.phase_increment = self.frequency * TWO_PI / self.sample_rate;
    }

    /// Advances the phase by one sample and wraps it back into `[0, 2π)`.
    /// Wrapping subtracts rather than takes a modulo so that increments
    /// larger than `2π` are handled too (they just subtract more than once).
    fn advance_phase(&mut self) {
        self.phase += self.phase_increment;
        while self.phase >= TWO_PI {
            self.phase -= TWO_PI;
        }
    }

    /// Fills `buffer` with consecutive samples of the current waveform,
    /// starting at the current phase. The waveform is dispatched once per
    /// block. When the oscillator is muted the buffer is left untouched;
    /// callers rely on that as a silent no-op, not an error.
    pub fn generate(&mut self, buffer: &mut [f32]) {
        let mode = match self.mode {
            Some(mode) => mode,
            None => return,
        };

        match mode {
            Waveform::Sine => {
                for sample in buffer.iter_mut() {
                    *sample = self.phase.sin();
                    self.advance_phase();
                }
            }
            // Downwards ramp, range [-1, 1].
            Waveform::Saw => {
                for sample in buffer.iter_mut() {
                    *sample = 1.0 - 2.0 * self.phase / TWO_PI;
                    self.advance_phase();
                }
            }
            Waveform::Square => {
                for sample in buffer.iter_mut() {
                    *sample = if self.phase <= PI { 1.0 } else { -1.0 };
                    self.advance_phase();
                }
            }
            Waveform::Triangle => {
                for sample in buffer.iter_mut() {
                    // An upwards saw folded around zero.
                    let saw = -1.0 + 2.0 * self.phase / TWO_PI;
                    *sample = 2.0 * (saw.abs() - 0.5);
                    self.advance_phase();
                }
            }
        }
    }
}

/// The [OscillatorBuilder] is the proper way of generating an [Oscillator].
/// # Usage
/// ```rust
/// let mut oscillator = OscillatorBuilder::new().build().unwrap(); // 440 Hz sine
///
/// let osc = OscillatorBuilder::new()
///     .with_frequency(220.0)
///     .with_sample_rate(48000.0)
///     .with_mode(Waveform::Saw)
///     .build()
///     .unwrap();
/// ```
pub struct OscillatorBuilder {
    mode: Option<Waveform>,
    frequency: Option<f32>,
    sample_rate: Option<f32>,
    phase: Option<f32>,
}

impl OscillatorBuilder {
    /// Sets the defaults for the oscillator (440 Hz sine at 44.1 kHz).
    pub fn new() -> Self {
        Self {
            mode: None,
            frequency: None,
            sample_rate: None,
            phase: None,
        }
    }

    /// Sets the starting waveform.
    pub fn with_mode(mut self, mode: Waveform) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the starting frequency, in Hz.
    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the sample rate, in Hz.
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Sets the starting phase, in radians.
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Tries to generate an [Oscillator] from the given configuration.
    ///
    /// # Default values
    /// * Mode: sine
    /// * Frequency: 440 Hz
    /// * Sample rate: 44100 Hz
    /// * Phase: 0 radians
    ///
    /// # Expected errors
    /// * Frequency or sample rate not positive.
    /// * Phase outside `[0, 2π)`.
    pub fn build(self) -> Result<Oscillator, String> {
        let mode = Some(self.mode.unwrap_or(Waveform::Sine));
        let frequency = self.frequency.unwrap_or(440.0);
        let sample_rate = self.sample_rate.unwrap_or(44100.0);
        let phase = self.phase.unwrap_or(0.0);

        if frequency <= 0.0 {
            return Err("Frequency must be positive.".to_string());
        }

        if sample_rate <= 0.0 {
            return Err("Sample rate must be positive.".to_string());
        }

        if !(0.0..TWO_PI).contains(&phase) {
            return Err("Phase out of the [0, 2π) range.".to_string());
        }

        let mut oscillator = Oscillator {
            mode,
            frequency,
            sample_rate,
            phase,
            phase_increment: 0.0,
        };
        oscillator.update_increment();

        Ok(oscillator)
    }
}
