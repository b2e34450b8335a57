mod distortion;
mod parameter;
mod presets;
mod synth;

pub use distortion::Distortion;
pub use parameter::{Parameter, ParameterBuilder};
pub use presets::{find_preset, Preset, DISTORTION_PRESETS, SYNTH_PRESETS};
pub use synth::Synth;

use simplelog::{info, warn};

/// A plug is an instrument or effect the way the host sees it: a registry
/// of [Parameter]s plus a notification entry point for value changes. Block
/// processing is not part of the trait because the signatures differ (the
/// synthesizer only writes outputs, the distortion reads inputs too); the
/// host is expected to call parameter notifications and block processing on
/// one thread only, never concurrently.
pub trait Plug {
    /// Handles a host parameter-change notification. The tag addresses the
    /// parameter, the value is the raw host value (Hz, %, mode index).
    fn on_param_change(&mut self, tag: &str, value: f32);

    /// The parameter registry, in declaration order.
    fn parameters(&self) -> &[Parameter];

    /// Retrieves a parameter given its tag, if it exists.
    fn parameter(&self, tag: &str) -> Option<&Parameter> {
        self.parameters().iter().find(|p| p.get_tag() == tag)
    }

    /// Replays a named preset through the parameter-change path, exactly as
    /// if the host had restored it knob by knob.
    fn apply_preset(&mut self, preset: &Preset) {
        info!("<b>Applying preset <cyan>{}</>", preset.name);

        for (tag, value) in preset.values {
            if self.parameter(tag).is_none() {
                warn!("<b>Preset value for <yellow>unknown parameter</><b>.</>");
                warn!("  |_ tag: {}", tag);
                continue;
            }

            self.on_param_change(tag, *value);
        }
    }
}
