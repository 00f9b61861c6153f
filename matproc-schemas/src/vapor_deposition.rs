//! Sections shared by physical and chemical vapor deposition.
//!
//! Steps, sources and processes are generic over the concrete source, sample
//! parameter and environment sections so that each technique can narrow them.

use crate::{
    geometry::Geometry,
    measurement::{Measurement, TimeSeries},
    sample::{ThinFilmReference, ThinFilmStackReference},
    substance::PureSubstance,
    system::{Component, CompositeSystemReference, ProcessInfo, StepInfo},
    workflow::Task,
};
use serde::{Deserialize, Serialize};

/// The reduction sometimes used to lodge the substrate in a holder position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsertReduction {
    pub name: Option<String>,
    pub lab_id: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub material: Vec<PureSubstance>,
    pub inner_geometry: Option<Geometry>,
    pub outer_geometry: Option<Geometry>,
}

/// One casing position of a substrate holder, relative to the center of the holder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubstrateHolderPosition {
    pub name: Option<String>,
    pub x_position: Option<Measurement>,
    pub y_position: Option<Measurement>,
    pub slot_geometry: Option<Geometry>,
    /// Reference to an `InsertReduction` entry.
    pub insert_reduction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilledSubstrateHolderPosition {
    #[serde(flatten)]
    pub position: SubstrateHolderPosition,
    pub substrate: Option<CompositeSystemReference>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubstrateHolder<P = SubstrateHolderPosition> {
    pub name: Option<String>,
    pub lab_id: Option<String>,
    #[serde(default)]
    pub material: Vec<PureSubstance>,
    /// Thickness of the holder to the back of the substrate.
    pub thickness: Option<Measurement>,
    pub outer_diameter: Option<Measurement>,
    pub number_of_positions: Option<u32>,
    pub image: Option<String>,
    #[serde(default)]
    pub positions: Vec<P>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilledSubstrateHolder {
    #[serde(flatten)]
    pub holder: SubstrateHolder<FilledSubstrateHolderPosition>,
    /// Reference to the empty `SubstrateHolder` entry.
    pub substrate_holder: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowMeasurementType {
    Assumed,
    #[serde(rename = "Mass Flow Controller")]
    MassFlowController,
    #[serde(rename = "Flow Meter")]
    FlowMeter,
    Other,
}

/// Amount of a substance passing per unit of time (mol/s).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MolarFlowRate {
    #[serde(flatten)]
    pub series: TimeSeries,
    pub measurement_type: Option<FlowMeasurementType>,
}

/// Gas flow rate at standard conditions (0 °C, 1 atm), in m^3/s.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumetricFlowRate {
    #[serde(flatten)]
    pub series: TimeSeries,
    pub measurement_type: Option<FlowMeasurementType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthRateMeasurementType {
    Assumed,
    #[serde(rename = "RHEED")]
    Rheed,
    Reflectance,
}

/// Growth rate of the thin film (m/s).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthRate {
    #[serde(flatten)]
    pub series: TimeSeries,
    pub measurement_type: Option<GrowthRateMeasurementType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureMeasurementType {
    #[serde(rename = "Heater thermocouple")]
    HeaterThermocouple,
    Thermocouple,
    Pyrometer,
    Assumed,
}

/// Temperature monitoring (K).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(flatten)]
    pub series: TimeSeries,
    pub measurement_type: Option<TemperatureMeasurementType>,
}

/// Chamber pressure during the deposition (Pa).
pub type Pressure = TimeSeries;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GasFlow {
    pub gas: Option<PureSubstance>,
    pub flow_rate: Option<VolumetricFlowRate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubstrateHeater {}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChamberEnvironment {
    #[serde(default)]
    pub gas_flow: Vec<GasFlow>,
    pub pressure: Option<Pressure>,
    pub heater: Option<SubstrateHeater>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleParameters {
    pub growth_rate: Option<GrowthRate>,
    pub substrate_temperature: Option<Temperature>,
    /// The thin film created during this step.
    pub layer: Option<ThinFilmReference>,
    /// The thin film stack that is deposited on.
    pub substrate: Option<ThinFilmStackReference>,
}

/// A source of vapor: the material that is evaporated, what evaporates it, and the
/// resulting molar flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaporDepositionSource<V> {
    pub name: Option<String>,
    /// E.g. a sputtering target or a powder in a crucible.
    #[serde(default)]
    pub material: Vec<Component>,
    /// E.g. a heater, a filament, a laser or a bubbler.
    pub vapor_source: Option<V>,
    pub vapor_molar_flow_rate: Option<MolarFlowRate>,
}

impl<V> Default for VaporDepositionSource<V> {
    fn default() -> Self {
        Self {
            name: None,
            material: Vec::new(),
            vapor_source: None,
            vapor_molar_flow_rate: None,
        }
    }
}

/// A step of any vapor deposition process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaporDepositionStep<S, P = SampleParameters, E = ChamberEnvironment> {
    #[serde(flatten)]
    pub step: StepInfo,
    /// Free-form step identifier used by some CVD systems.
    pub step_index: Option<String>,
    #[serde(default)]
    pub creates_new_thin_film: bool,
    #[serde(default)]
    pub sources: Vec<S>,
    #[serde(default)]
    pub sample_parameters: Vec<P>,
    pub environment: Option<E>,
}

impl<S, P, E> Default for VaporDepositionStep<S, P, E> {
    fn default() -> Self {
        Self {
            step: StepInfo::default(),
            step_index: None,
            creates_new_thin_film: false,
            sources: Vec::new(),
            sample_parameters: Vec::new(),
            environment: None,
        }
    }
}

/// Deposition of material from a vapor phase onto a substrate, covering both PVD and
/// CVD (http://purl.obolibrary.org/obo/CHMO_0001314,
/// http://purl.obolibrary.org/obo/CHMO_0001356).
///
/// `workflow` is derived: one task per step when the steps run one after another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaporDeposition<S> {
    #[serde(flatten)]
    pub process: ProcessInfo,
    #[serde(default)]
    pub steps: Vec<S>,
    #[serde(default)]
    pub workflow: Vec<Task>,
}

impl<S> Default for VaporDeposition<S> {
    fn default() -> Self {
        Self {
            process: ProcessInfo::default(),
            steps: Vec::new(),
            workflow: Vec::new(),
        }
    }
}
