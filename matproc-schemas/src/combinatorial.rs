//! Continuous and discrete combinatorial libraries and the properties measured on
//! their samples.

use crate::system::{CompositeSystem, CompositeSystemReference};
use serde::{Deserialize, Serialize};

/// A point of a scatter figure, linked to the entry it was drawn from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScatterFigure {
    pub label: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(default)]
    pub points: Vec<ScatterPoint>,
}

/// A continuous combinatorial library, e.g. a thin film with a composition gradient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinatorialLibrary {
    #[serde(flatten)]
    pub system: CompositeSystem,
    /// Derived on normalization.
    #[serde(default)]
    pub figures: Vec<ScatterFigure>,
}

/// Position of a sample on its library (m).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinatorialSamplePosition {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

pub type CombinatorialLibraryReference = CompositeSystemReference;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinatorialSample {
    #[serde(flatten)]
    pub system: CompositeSystem,
    /// Unique number of the sample within its library.
    pub sample_number: Option<i64>,
    pub library: Option<CombinatorialLibraryReference>,
    pub position: Option<CombinatorialSamplePosition>,
}

/// Provenance shared by every measured or modelled property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinatorialProperty {
    pub model: Option<String>,
    pub analysis: Option<String>,
    #[serde(default)]
    pub measurements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScalarProperty<T = f64> {
    #[serde(flatten)]
    pub property: CombinatorialProperty,
    pub value: Option<T>,
}

pub type Formula = ScalarProperty<String>;
/// m
pub type Thickness = ScalarProperty;
/// S/m
pub type Conductivity = ScalarProperty;
/// s
pub type CarrierLifetime = ScalarProperty;
/// eV
pub type BandGap = ScalarProperty;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Synthesis {
    #[serde(flatten)]
    pub property: CombinatorialProperty,
    pub method: Option<String>,
    /// K
    pub temperature: Option<f64>,
    /// Pa
    pub pressure: Option<f64>,
    pub atmosphere: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Photoluminescence {
    /// nm
    pub peak_position: Option<ScalarProperty>,
    /// nm
    pub fwhm: Option<ScalarProperty>,
    pub peak_area: Option<ScalarProperty>,
    /// W/m^2
    pub absorber_power_flux: Option<ScalarProperty>,
    /// nm
    pub excitation_wavelength: Option<ScalarProperty>,
    pub plqy: Option<ScalarProperty>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XRayDiffraction {
    #[serde(flatten)]
    pub property: CombinatorialProperty,
    pub intensity: Option<Vec<f64>>,
    /// 1/nm
    pub scattering_vector: Option<Vec<f64>>,
}

impl XRayDiffraction {
    /// Length of the pattern, taken from the first array present.
    pub fn n_values(&self) -> usize {
        self.intensity
            .as_ref()
            .or(self.scattering_vector.as_ref())
            .map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexRefractiveIndex {
    #[serde(flatten)]
    pub property: CombinatorialProperty,
    pub n: Option<Vec<f64>>,
    pub k: Option<Vec<f64>>,
    /// nm
    pub photon_wavelength: Option<Vec<f64>>,
}

impl ComplexRefractiveIndex {
    pub fn n_values(&self) -> usize {
        self.n
            .as_ref()
            .or(self.k.as_ref())
            .or(self.photon_wavelength.as_ref())
            .map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Photovoltaic {
    pub efficiency: Option<ScalarProperty>,
    /// A/m^2
    pub jsc: Option<ScalarProperty>,
    /// V
    pub voc: Option<ScalarProperty>,
    pub ff: Option<ScalarProperty>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThinFilmCombinatorialSample {
    #[serde(flatten)]
    pub sample: CombinatorialSample,
    pub formula: Option<Formula>,
    pub thickness: Option<Thickness>,
    pub conductivity: Option<Conductivity>,
    pub carrier_lifetime: Option<CarrierLifetime>,
    pub band_gap: Option<BandGap>,
    pub synthesis: Option<Synthesis>,
    pub photoluminescence: Option<Photoluminescence>,
    pub xray_diffraction: Option<XRayDiffraction>,
    pub complex_refractive_index: Option<ComplexRefractiveIndex>,
    pub photovoltaic: Option<Photovoltaic>,
}

pub type DiscreteCombinatorialSample = CompositeSystem;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscreteCombinatorialSampleReference {
    #[serde(flatten)]
    pub reference: CompositeSystemReference,
    pub sample_number: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiscreteCombinatorialLibrary {
    pub name: Option<String>,
    pub lab_id: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub entities: Vec<DiscreteCombinatorialSampleReference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n_values_follow_first_present_array() {
        let xrd = XRayDiffraction {
            scattering_vector: Some(vec![1.0, 2.0, 3.0]),
            ..Default::default()
        };
        assert_eq!(xrd.n_values(), 3);

        let nk = ComplexRefractiveIndex {
            n: Some(vec![]),
            k: Some(vec![0.1, 0.2]),
            ..Default::default()
        };
        assert_eq!(nk.n_values(), 0);
        assert_eq!(ComplexRefractiveIndex::default().n_values(), 0);
    }
}
