// Helpers for initializing the cpal output back-end.

use cpal::traits::DeviceTrait;
use cpal::{Device, FromSample, Sample, SampleFormat, SampleRate, SupportedStreamConfig};
use simplelog::info;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackEndError {
    #[error("could not query output configurations: {0}")]
    Query(#[from] cpal::SupportedStreamConfigsError),
    #[error("no output configuration matches the requested format")]
    NoMatchingConfig,
}

/// An enumeration for specifying an amount of channels and easily
/// differentiating the most common cases (mono and stereo).
#[derive(Debug)]
pub enum Channels {
    /// A single channel
    Mono,
    /// Two channels
    Stereo,
    /// Any given amount of channels
    Multi(u8),
}

impl Channels {
    /// Translates the `enum` to a value for ease.
    pub fn get_amt(&self) -> u8 {
        match *self {
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Multi(x) => x,
        }
    }
}

/// Looks up a supported output config matching the requested format.
///
/// # Arguments
/// * `device` - the `Device` from which to get the **supported configurations**.
/// * `sample_format` - (optional) the **preferred format** for each **sample**.
/// * `sample_rate` - (optional) a `SampleRate`. Defaults to the maximum supported.
/// * `channel_amt` - (optional) the maximum amount of channels to use.
///
/// # Return
/// The first `SupportedStreamConfig` fulfilling the requirements.
pub fn get_preferred_config(
    device: &Device,
    sample_format: Option<SampleFormat>,
    sample_rate: Option<SampleRate>,
    channel_amt: Option<Channels>,
) -> Result<SupportedStreamConfig, BackEndError> {
    let mut matches: Vec<_> = device
        .supported_output_configs()?
        .filter(|config| match &sample_format {
            None => true,
            Some(format) => config.sample_format() == *format,
        })
        .filter(|config| match &channel_amt {
            None => true,
            Some(amt) => amt.get_amt() >= config.channels() as u8,
        })
        .filter(|config| match &sample_rate {
            None => true,
            Some(rate) => config.min_sample_rate() <= *rate && *rate <= config.max_sample_rate(),
        })
        .collect();

    let range = matches.pop().ok_or(BackEndError::NoMatchingConfig)?;
    let config = match sample_rate {
        None => range.with_max_sample_rate(),
        Some(rate) => range.with_sample_rate(rate),
    };

    info!(
        "<b>Output config: <cyan>{} ch, {} Hz, {:?}</>",
        config.channels(),
        config.sample_rate().0,
        config.sample_format()
    );

    Ok(config)
}

/// Writes an interleaved stereo stream buffer, pulling one value per slot
/// from `next_sample`. The ring the engine fills is interleaved the same
/// way, so the callback is a straight copy.
pub fn write_interleaved<T>(output: &mut [T], next_sample: &mut dyn FnMut() -> f32)
where
    T: Sample + FromSample<f32>,
{
    for sample in output.iter_mut() {
        *sample = T::from_sample(next_sample());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_amounts() {
        assert_eq!(Channels::Mono.get_amt(), 1);
        assert_eq!(Channels::Stereo.get_amt(), 2);
        assert_eq!(Channels::Multi(6).get_amt(), 6);
    }

    #[test]
    fn test_write_interleaved_copies_in_order() {
        let mut output = [0.0f32; 4];
        let mut counter = 0.0;
        let mut next_sample = || {
            counter += 1.0;
            counter
        };

        write_interleaved(&mut output, &mut next_sample);
        assert_eq!(output, [1.0, 2.0, 3.0, 4.0]);
    }
}
