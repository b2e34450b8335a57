/// A named set of parameter values. Presets are plain data owned by the
/// host layer: applying one replays its values through the plug's normal
/// parameter-change path.
pub struct Preset {
    pub name: &'static str,
    /// `(parameter tag, raw host value)` pairs, in application order.
    pub values: &'static [(&'static str, f32)],
}

/// Factory presets of the synthesizer: the A note in three octaves, all on
/// the sine waveform.
pub const SYNTH_PRESETS: &[Preset] = &[
    Preset {
        name: "A4",
        values: &[("frequency", 440.0), ("mode", 0.0)],
    },
    Preset {
        name: "A5",
        values: &[("frequency", 880.0), ("mode", 0.0)],
    },
    Preset {
        name: "A6",
        values: &[("frequency", 1760.0), ("mode", 0.0)],
    },
];

/// Factory presets of the distortion, from barely-there to the clipper's
/// threshold floor.
pub const DISTORTION_PRESETS: &[Preset] = &[
    Preset {
        name: "clean",
        values: &[("threshold", 0.01)],
    },
    Preset {
        name: "slightly distorted",
        values: &[("threshold", 20.0)],
    },
    Preset {
        name: "medium distortion",
        values: &[("threshold", 40.0)],
    },
    Preset {
        name: "high distortion",
        values: &[("threshold", 80.0)],
    },
    Preset {
        name: "MAXIMUM distortion!!!",
        values: &[("threshold", 100.0)],
    },
];

/// Looks a preset up by its exact name.
pub fn find_preset(table: &'static [Preset], name: &str) -> Option<&'static Preset> {
    table.iter().find(|preset| preset.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset() {
        let preset = find_preset(SYNTH_PRESETS, "A5").unwrap();
        assert_eq!(preset.values, &[("frequency", 880.0), ("mode", 0.0)]);

        assert!(find_preset(DISTORTION_PRESETS, "clean").is_some());
        assert!(find_preset(DISTORTION_PRESETS, "A5").is_none());
    }
}
