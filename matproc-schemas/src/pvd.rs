//! Physical vapor deposition: thermal evaporation, pulsed laser deposition, molecular
//! beam epitaxy and sputtering.

use crate::{
    measurement::{Measurement, TimeSeries},
    system::CompositeSystem,
    vapor_deposition::{
        SampleParameters, Temperature, VaporDeposition, VaporDepositionSource,
        VaporDepositionStep,
    },
};
use serde::{Deserialize, Serialize};

/// Power delivered to the source (W).
pub type SourcePower = TimeSeries;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericEvaporator {
    pub power: Option<SourcePower>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermalEvaporationHeater {
    pub power: Option<SourcePower>,
    pub temperature: Option<Temperature>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PldLaser {
    pub power: Option<SourcePower>,
    pub wavelength: Option<Measurement>,
    pub repetition_rate: Option<Measurement>,
    pub spot_size: Option<Measurement>,
    pub pulses: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PvdEvaporationSource {
    Generic(GenericEvaporator),
    ThermalEvaporationHeater(ThermalEvaporationHeater),
    PldLaser(PldLaser),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FluxMeasurementType {
    Assumed,
    #[serde(rename = "Quartz Crystal Microbalance")]
    QuartzCrystalMicrobalance,
}

/// Flux of material impinging on the substrate (mol/(m^2 s)).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpingingFlux {
    #[serde(flatten)]
    pub series: TimeSeries,
    pub measurement_type: Option<FluxMeasurementType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvdSource<V = PvdEvaporationSource> {
    #[serde(flatten)]
    pub source: VaporDepositionSource<V>,
    #[serde(default)]
    pub impinging_flux: Vec<ImpingingFlux>,
}

impl<V> Default for PvdSource<V> {
    fn default() -> Self {
        Self {
            source: VaporDepositionSource::default(),
            impinging_flux: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PvdSubstrateHeater {
    #[serde(rename = "No heating")]
    NoHeating,
    #[serde(rename = "Halogen lamp")]
    HalogenLamp,
    Filament,
    Resistive,
    Laser,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PvdSampleParameters {
    #[serde(flatten)]
    pub parameters: SampleParameters,
    pub heater: Option<PvdSubstrateHeater>,
    /// Distance between the sample and each source (m), in source order.
    #[serde(default)]
    pub distance_to_source: Vec<f64>,
}

pub type PvdStep = VaporDepositionStep<PvdSource, PvdSampleParameters>;

pub type PhysicalVaporDeposition = VaporDeposition<PvdStep>;

/// `method` defaults to `"Molecular Beam Epitaxy"`.
pub type MolecularBeamEpitaxy = VaporDeposition<PvdStep>;

/// `method` defaults to `"Sputter Deposition"`.
pub type SputterDeposition = VaporDeposition<PvdStep>;

pub type ThermalEvaporationSource = PvdSource<ThermalEvaporationHeater>;

pub type ThermalEvaporationStep = VaporDepositionStep<ThermalEvaporationSource, PvdSampleParameters>;

/// `method` defaults to `"Thermal Evaporation"`.
pub type ThermalEvaporation = VaporDeposition<ThermalEvaporationStep>;

/// A ceramic target for laser ablation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PldTarget {
    #[serde(flatten)]
    pub system: CompositeSystem,
    pub target_id: Option<String>,
}

/// A PLD target used as source material; the target entry is referenced by `system`.
pub type PldTargetComponent = crate::system::SystemComponent;

pub type PldSource = PvdSource<PldLaser>;

pub type PldStep = VaporDepositionStep<PldSource, PvdSampleParameters>;

/// `method` defaults to `"Pulsed Laser Deposition"`.
pub type PulsedLaserDeposition = VaporDeposition<PldStep>;
