#[cfg(feature = "verbose_params")]
use simplelog::warn;

/// Parameters are the host-facing knobs of a plug. Each one carries the
/// metadata a host needs to build a control for it (range, step, default,
/// unit label) next to its runtime value. Plugs keep a registry of these and
/// route every change notification through it.
///
/// # Usage
/// To create one, please refer to the [ParameterBuilder].
#[derive(Debug, PartialEq)]
pub struct Parameter {
    /// Maximum value that the parameter can reach.
    max: f32,
    /// Minimum value that the parameter can reach.
    min: f32,
    /// The size of the increment, in other words, how big the step is.
    step: f32,
    /// The starting (or default) value of the parameter.
    default: f32,
    /// The runtime value of the parameter.
    current: f32,
    /// Unit label shown next to the value ("Hz", "%"). May be empty.
    unit: String,
    /// The tag of the parameter. Works as identifier to distinguish it from
    /// the other parameters of a plug.
    tag: String,
}

impl Parameter {
    pub fn get_tag(&self) -> &String {
        &self.tag
    }

    pub fn get_value(&self) -> f32 {
        self.current
    }

    pub fn get_default(&self) -> f32 {
        self.default
    }

    pub fn get_unit(&self) -> &str {
        &self.unit
    }

    pub fn get_range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn get_step(&self) -> f32 {
        self.step
    }

    /// Sets the value of the parameter. Out-of-range values are rejected
    /// and the previous value is kept.
    pub fn set(&mut self, value: f32) {
        if value <= self.max && value >= self.min {
            self.current = value;
        } else {
            #[cfg(feature = "verbose_params")]
            {
                warn!("<b>Value <yellow>out of range</><b>.</>");
                warn!("  |_ Parameter: <yellow>{}</>", self.tag);
                warn!("  |_ Input value: <red>{}</>", value);
                warn!("  |_ Valid range: <green>[{}, {}]</>", self.min, self.max);
                warn!("  |_ Value kept back.");
            }
        }
    }

    /// Sets the value of the parameter the way a host knob would: values
    /// past either end of the range stick to that end.
    pub fn set_clamped(&mut self, value: f32) {
        self.current = value.clamp(self.min, self.max);
    }

    /// Increases the value of the parameter by one step, up to the maximum.
    pub fn inc(&mut self) {
        if self.current + self.step > self.max {
            self.current = self.max;
        } else {
            self.current += self.step;
        }
    }

    /// Decreases the value of the parameter by one step, down to the minimum.
    pub fn dec(&mut self) {
        if self.current - self.step < self.min {
            self.current = self.min;
        } else {
            self.current -= self.step;
        }
    }
}

/// A builder pattern to create parameters in a modular fashion. Check
/// [Parameter] for all the information about the fields.
/// # Example
/// ```rust
/// // The frequency knob of the synthesizer.
/// ParameterBuilder::new("frequency".to_string())
///     .with_min(20.0)
///     .with_max(20000.0)
///     .with_step(0.01)
///     .with_default(440.0)
///     .with_unit("Hz")
///     .build()
///     .unwrap();
/// ```
pub struct ParameterBuilder {
    /// Maximum value. Defaults on 1.0
    max: Option<f32>,
    /// Minimum value. Defaults on 0.0
    min: Option<f32>,
    /// Step value. Defaults on 0.1
    step: Option<f32>,
    /// Default value. Defaults on 0.0
    default: Option<f32>,
    /// Unit label. Defaults on an empty string.
    unit: Option<String>,
    /// Tag (name) of the parameter. Serves as identifier and should not be
    /// duplicated inside one plug.
    tag: String,
}

impl ParameterBuilder {
    /// Creates a new builder with all values set at default.
    ///
    /// **Requires** the tag of the parameter, which serves as **identifier**.
    pub fn new(tag: String) -> Self {
        Self {
            max: None,
            min: None,
            step: None,
            default: None,
            unit: None,
            tag,
        }
    }

    /// Sets the maximum value of the [Parameter].
    pub fn with_max(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the minimum value of the [Parameter].
    pub fn with_min(mut self, min: f32) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the step of the [Parameter].
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = Some(step);
        self
    }

    /// Sets the default value of the [Parameter].
    pub fn with_default(mut self, default: f32) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the unit label of the [Parameter].
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Generates a [Parameter] from the specified values. Performs some
    /// integrity checks.
    pub fn build(self) -> Result<Parameter, String> {
        let max = self.max.unwrap_or(1.0);
        let min = self.min.unwrap_or(0.0);
        let step = self.step.unwrap_or(0.1);
        let default = self.default.unwrap_or(0.0);
        let unit = self.unit.unwrap_or_default();
        let current = default;
        let tag = self.tag;

        if max <= min {
            return Err("Non valid max/min range.".to_string());
        }

        if default > max || default < min {
            return Err("Default value is out of range.".to_string());
        }

        if step > (max - min) {
            return Err("Step can not be bigger than the range itself.".to_string());
        }

        Ok(Parameter {
            max,
            min,
            step,
            default,
            current,
            unit,
            tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parameter_builder_tests {
        use super::*;

        #[test]
        fn test_default() {
            let tested_param = ParameterBuilder::new(String::from("test")).build().unwrap();
            let testing_param = Parameter {
                max: 1.0,
                min: 0.0,
                step: 0.1,
                default: 0.0,
                current: 0.0,
                unit: String::new(),
                tag: "test".to_string(),
            };

            assert_eq!(
                tested_param, testing_param,
                "Empty constructor for Parameter Builder failed"
            );
        }

        #[test]
        fn test_with_all_args() {
            let tested_param = ParameterBuilder::new(String::from("test"))
                .with_max(2.0)
                .with_min(1.0)
                .with_default(1.5)
                .with_step(0.3)
                .with_unit("Hz")
                .build()
                .unwrap();

            let testing_param = Parameter {
                max: 2.0,
                min: 1.0,
                step: 0.3,
                default: 1.5,
                current: 1.5,
                unit: "Hz".to_string(),
                tag: "test".to_string(),
            };

            assert_eq!(
                tested_param, testing_param,
                "Constructor with all arguments for Parameter Builder failed"
            );
        }

        #[test]
        #[should_panic]
        fn test_invalid_range_greater() {
            ParameterBuilder::new(String::from("test"))
                .with_min(1.0)
                .with_max(0.0)
                .build()
                .unwrap();
        }

        #[test]
        #[should_panic]
        fn test_invalid_range_equal() {
            ParameterBuilder::new(String::from("test"))
                .with_min(0.0)
                .with_max(0.0)
                .build()
                .unwrap();
        }

        #[test]
        #[should_panic]
        fn test_invalid_default_min() {
            ParameterBuilder::new(String::from("test"))
                .with_min(1.0)
                .with_max(2.0)
                .with_default(0.5)
                .build()
                .unwrap();
        }

        #[test]
        #[should_panic]
        fn test_invalid_default_max() {
            ParameterBuilder::new(String::from("test"))
                .with_max(0.4)
                .with_default(0.5)
                .build()
                .unwrap();
        }

        #[test]
        #[should_panic]
        fn test_invalid_step() {
            ParameterBuilder::new(String::from("test"))
                .with_max(1.0)
                .with_min(0.0)
                .with_step(1.5)
                .build()
                .unwrap();
        }
    }

    mod parameter_tests {
        use super::*;

        fn get_parameter() -> Parameter {
            ParameterBuilder::new("test".to_string())
                .with_max(1.2)
                .with_min(0.1)
                .with_default(0.5)
                .with_step(0.2)
                .build()
                .unwrap()
        }

        #[test]
        fn test_get_tag() {
            let parameter = get_parameter();

            assert_eq!(parameter.get_tag(), "test");
        }

        #[test]
        fn test_metadata() {
            let parameter = ParameterBuilder::new("gain".to_string())
                .with_min(0.0)
                .with_max(2.0)
                .with_step(0.5)
                .with_default(1.0)
                .with_unit("dB")
                .build()
                .unwrap();

            assert_eq!(parameter.get_range(), (0.0, 2.0));
            assert_eq!(parameter.get_step(), 0.5);
            assert_eq!(parameter.get_default(), 1.0);
            assert_eq!(parameter.get_unit(), "dB");
        }

        #[test]
        fn test_get_value() {
            let mut parameter = get_parameter();

            assert_eq!(parameter.get_value(), 0.5, "Current value mismatch");
            parameter.set(0.1);
            assert_eq!(parameter.get_value(), 0.1, "Current value mismatch");
        }

        #[test]
        fn test_set_value() {
            let mut parameter = get_parameter();

            parameter.set(1.2);
            assert_eq!(parameter.get_value(), 1.2, "Current value mismatch");
            parameter.set(-1.0);
            assert_eq!(parameter.get_value(), 1.2, "Smaller than check wrong");
            parameter.set(10.0);
            assert_eq!(parameter.get_value(), 1.2, "Greater than check wrong");
        }

        #[test]
        fn test_set_clamped() {
            let mut parameter = get_parameter();

            parameter.set_clamped(10.0);
            assert_eq!(parameter.get_value(), 1.2, "Upper clamp mismatch");
            parameter.set_clamped(-10.0);
            assert_eq!(parameter.get_value(), 0.1, "Lower clamp mismatch");
            parameter.set_clamped(0.7);
            assert_eq!(parameter.get_value(), 0.7, "In-range value altered");
        }

        #[test]
        fn test_inc() {
            let mut parameter = get_parameter();

            assert_eq!(parameter.get_value(), 0.5, "Default item is different");
            parameter.inc();
            assert_eq!(parameter.get_value(), 0.7, "Increase not working");

            parameter.set(1.1);
            parameter.inc();
            assert_eq!(
                parameter.get_value(),
                parameter.max,
                "Increase out of bounds"
            )
        }

        #[test]
        fn test_dec() {
            let mut parameter = get_parameter();

            assert_eq!(parameter.get_value(), 0.5, "Default item is different");
            parameter.dec();
            assert_eq!(parameter.get_value(), 0.3, "Decrease not working");

            parameter.set(0.2);
            parameter.dec();
            assert_eq!(
                parameter.get_value(),
                parameter.min,
                "Decrease out of bounds"
            )
        }
    }
}
