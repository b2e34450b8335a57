use anyhow::{anyhow, bail, Context};
use simplelog::{error, info, warn};
use std::fs;
use yaml_rust::{Yaml, YamlLoader};

use crate::dsp::Waveform;
use crate::plugin::{find_preset, Distortion, Plug, Synth, DISTORTION_PRESETS, SYNTH_PRESETS};

const YAML_VERSION: f64 = 0.1;

/// A patch is the persisted shape of the demo rig: which preset and/or
/// explicit values each instrument starts from. Presets apply first,
/// explicit values override them.
pub struct Patch {
    synth_preset: Option<String>,
    frequency: Option<f32>,
    mode: Option<f32>,
    distortion_preset: Option<String>,
    threshold: Option<f32>,
}

impl Patch {
    /// Pushes the patch into the instruments through their normal
    /// parameter-change paths.
    pub fn apply(&self, synth: &mut Synth, distortion: &mut Distortion) {
        if let Some(name) = &self.synth_preset {
            match find_preset(SYNTH_PRESETS, name) {
                Some(preset) => synth.apply_preset(preset),
                None => warn!("<b>Unknown synth preset <yellow>{}</><b>.</>", name),
            }
        }

        if let Some(frequency) = self.frequency {
            synth.on_param_change("frequency", frequency);
        }

        if let Some(mode) = self.mode {
            synth.on_param_change("mode", mode);
        }

        if let Some(name) = &self.distortion_preset {
            match find_preset(DISTORTION_PRESETS, name) {
                Some(preset) => distortion.apply_preset(preset),
                None => warn!("<b>Unknown distortion preset <yellow>{}</><b>.</>", name),
            }
        }

        if let Some(threshold) = self.threshold {
            distortion.on_param_change("threshold", threshold);
        }
    }
}

/// Loads a patch from the `patches/` directory.
pub fn load_patch(file: &str) -> anyhow::Result<Patch> {
    let path = format!("patches/{}", file);
    info!("<b>Loading patch from <cyan>{}</><b>.</>", path);

    let yaml =
        fs::read_to_string(&path).with_context(|| format!("could not read patch {}", path))?;
    parse_patch(&yaml)
}

/// Parses a patch document. The version field is a hard gate: a patch
/// written for another layout version is rejected instead of half-applied.
pub fn parse_patch(yaml: &str) -> anyhow::Result<Patch> {
    let docs = YamlLoader::load_from_str(yaml)?;
    let doc = docs.first().ok_or_else(|| anyhow!("empty patch document"))?;

    let version = doc["version"].as_f64().unwrap_or(0.0);
    if version != YAML_VERSION {
        error!("<b>Please use patch version <red>{}</><b>.</>", YAML_VERSION);
        bail!("unsupported patch version {}", version);
    }

    let patch = &doc["patch"];
    let synth = &patch["synth"];
    let distortion = &patch["distortion"];

    let mode = match &synth["mode"] {
        Yaml::Integer(index) => Some(*index as f32),
        Yaml::String(name) => match Waveform::from_name(name) {
            Some(waveform) => Some(waveform.index() as f32),
            None => {
                warn!("<b>Unknown waveform name <yellow>{}</><b>. Ignored.</>", name);
                None
            }
        },
        Yaml::BadValue => None,
        other => {
            warn!("<b>Invalid format for <yellow>mode</><b>: {:?}. Ignored.</>", other);
            None
        }
    };

    Ok(Patch {
        synth_preset: synth["preset"].as_str().map(|s| s.to_string()),
        frequency: yaml_f32(&synth["frequency"]),
        mode,
        distortion_preset: distortion["preset"].as_str().map(|s| s.to_string()),
        threshold: yaml_f32(&distortion["threshold"]),
    })
}

fn yaml_f32(yaml: &Yaml) -> Option<f32> {
    match yaml {
        Yaml::Real(_) => yaml.as_f64().map(|x| x as f32),
        Yaml::Integer(x) => Some(*x as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_patch() {
        let patch = parse_patch(
            "version: 0.1\n\
             patch:\n\
             \x20 synth:\n\
             \x20   frequency: 660.0\n\
             \x20   mode: square\n\
             \x20 distortion:\n\
             \x20   threshold: 40.0\n",
        )
        .unwrap();

        let mut synth = Synth::new();
        let mut distortion = Distortion::new();
        patch.apply(&mut synth, &mut distortion);

        assert_eq!(synth.oscillator().frequency(), 660.0);
        assert_eq!(synth.oscillator().mode(), Some(Waveform::Square));
        assert!((distortion.clipper().threshold() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_preset_then_override() {
        let patch = parse_patch(
            "version: 0.1\n\
             patch:\n\
             \x20 synth:\n\
             \x20   preset: \"A5\"\n\
             \x20   mode: 3\n\
             \x20 distortion:\n\
             \x20   preset: \"medium distortion\"\n",
        )
        .unwrap();

        let mut synth = Synth::new();
        let mut distortion = Distortion::new();
        patch.apply(&mut synth, &mut distortion);

        // Preset frequency survives, explicit mode wins over the preset's.
        assert_eq!(synth.oscillator().frequency(), 880.0);
        assert_eq!(synth.oscillator().mode(), Some(Waveform::Triangle));
        assert!((distortion.clipper().threshold() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_version_gate() {
        assert!(parse_patch("version: 0.2\npatch:\n  synth:\n").is_err());
        assert!(parse_patch("patch:\n  synth:\n").is_err());
    }

    #[test]
    fn test_empty_sections_apply_defaults() {
        let patch = parse_patch("version: 0.1\npatch:\n").unwrap();

        let mut synth = Synth::new();
        let mut distortion = Distortion::new();
        patch.apply(&mut synth, &mut distortion);

        assert_eq!(synth.oscillator().frequency(), 440.0);
        assert_eq!(distortion.clipper().threshold(), 1.0);
    }
}
