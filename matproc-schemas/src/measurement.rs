use serde::{Deserialize, Serialize};

/// A physical quantity as it is entered by the user: a magnitude plus a free-form unit
/// string (e.g. `"mL"`, `"g/mL"`, `"mol/L"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement<T = f64> {
    pub value: T,
    pub unit: String,
}

impl<T> Measurement<T> {
    pub fn new(value: T, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

impl Measurement<f64> {
    /// Multiplies the magnitude by `factor`, keeping the unit.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            unit: self.unit.clone(),
        }
    }
}

/// A series of measured values over process time, with optional set points.
///
/// Every concrete series (temperature, pressure, flow rates, ...) fixes the unit of
/// `value` and `set_value` through the `unit` field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Unit shared by `value` and `set_value`.
    pub unit: Option<String>,
    /// The observed value as a function of time.
    #[serde(default)]
    pub value: Vec<f64>,
    /// The process time (s) when each of the values was recorded.
    #[serde(default)]
    pub time: Vec<f64>,
    /// The intended values.
    #[serde(default)]
    pub set_value: Vec<f64>,
    /// The process time (s) when each set value was set. A single set value without a
    /// time applies from the start of the step; two set values describe a linear ramp.
    #[serde(default)]
    pub set_time: Vec<f64>,
}
