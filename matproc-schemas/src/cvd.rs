//! Chemical vapor deposition, including metal-organic vapor phase epitaxy.

use crate::{
    measurement::{Measurement, TimeSeries},
    substance::PureSubstance,
    system::PureSubstanceComponent,
    vapor_deposition::{
        ChamberEnvironment, MolarFlowRate, SampleParameters, Temperature, VaporDeposition,
        VaporDepositionSource, VaporDepositionStep, VolumetricFlowRate,
    },
};
use serde::{Deserialize, Serialize};

/// A pure substance component with its theoretical and effective concentration in
/// the source solution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentConcentration {
    #[serde(flatten)]
    pub component: PureSubstanceComponent,
    pub theoretical_concentration: Option<Measurement>,
    pub effective_concentration: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PushPurgeGasFlow {
    pub gas: Option<PureSubstance>,
    pub flow_rate: Option<VolumetricFlowRate>,
    pub purge_flow_rate: Option<VolumetricFlowRate>,
}

/// Rotation of the susceptor (rpm).
pub type Rotation = TimeSeries;

/// Partial vapor pressure of the precursor (Pa).
pub type PartialVaporPressure = TimeSeries;

pub type BubblerMolarFlowRate = MolarFlowRate;

/// Conditions every CVD evaporator reports.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaporatorConditions {
    pub pressure: Option<TimeSeries>,
    pub precursor_partial_pressure: Option<PartialVaporPressure>,
    pub temperature: Option<Temperature>,
    pub total_flow_rate: Option<VolumetricFlowRate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BubblerEvaporator {
    #[serde(flatten)]
    pub conditions: EvaporatorConditions,
    pub carrier_gas: Option<PureSubstance>,
    pub carrier_push_flow_rate: Option<VolumetricFlowRate>,
    pub carrier_purge_flow_rate: Option<VolumetricFlowRate>,
    pub dilution: Option<PushPurgeGasFlow>,
    pub source: Option<PushPurgeGasFlow>,
    pub inject: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlashEvaporator {
    #[serde(flatten)]
    pub conditions: EvaporatorConditions,
    pub carrier_gas: Option<PureSubstance>,
    pub carrier_push_flow_rate: Option<VolumetricFlowRate>,
    pub carrier_purge_flow_rate: Option<VolumetricFlowRate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MistEvaporator {
    #[serde(flatten)]
    pub conditions: EvaporatorConditions,
    pub item: Option<String>,
    pub stirring_time: Option<Measurement>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GasCylinderEvaporator {
    #[serde(flatten)]
    pub conditions: EvaporatorConditions,
    pub dilution_in_cylinder: Option<f64>,
    pub effective_flow_rate: Option<VolumetricFlowRate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CvdEvaporationSource {
    Bubbler(BubblerEvaporator),
    Flash(FlashEvaporator),
    Mist(MistEvaporator),
    GasLine(EvaporatorConditions),
    GasCylinder(GasCylinderEvaporator),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CvdSource {
    #[serde(flatten)]
    pub source: VaporDepositionSource<CvdEvaporationSource>,
    /// Whether the valve to the chamber is open.
    pub valve: Option<bool>,
}

pub type CvdStep = VaporDepositionStep<CvdSource>;

pub type ChemicalVaporDeposition = VaporDeposition<CvdStep>;

pub type FilamentTemperature = Temperature;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MovpeSampleParameters {
    #[serde(flatten)]
    pub parameters: SampleParameters,
    pub filament_temperature: Option<FilamentTemperature>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MovpeChamberEnvironment {
    #[serde(flatten)]
    pub environment: ChamberEnvironment,
    pub uniform_gas_flow_rate: Option<VolumetricFlowRate>,
    pub throttle_valve: Option<TimeSeries>,
    pub rotation: Option<Rotation>,
}

pub type StepMovpe = VaporDepositionStep<CvdSource, MovpeSampleParameters, MovpeChamberEnvironment>;

/// Metal-organic vapor phase epitaxy; `method` defaults to `"MOVPE"`.
pub type Movpe = VaporDeposition<StepMovpe>;
