//! Liquid solutions, their components, and the preparation process that produces them.

use crate::{
    measurement::Measurement,
    substance::{ElementalComposition, PureSubstance},
    system::{InstrumentReference, ProcessInfo, SectionInfo, StepInfo},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role of a component added to a solution.
///
/// | role    | description                                                              |
/// |---------|--------------------------------------------------------------------------|
/// | Solvent | The whole initial liquid phase containing the extractant.                |
/// | Solute  | The minor component regarded as having been dissolved by the solvent.    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComponentRole {
    #[default]
    Solvent,
    Solute,
}

impl ComponentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentRole::Solvent => "Solvent",
            ComponentRole::Solute => "Solute",
        }
    }
}

/// The molar concentration of a component in a solution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MolarConcentration {
    /// Expected concentration from the component moles and the total volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_concentration: Option<Measurement>,
    /// Concentration observed with some characterization technique.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_concentration: Option<Measurement>,
}

/// Storage conditions of a solution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionStorage {
    pub start_date: Option<DateTime<Utc>>,
    /// Expiry date of the storage.
    pub end_date: Option<DateTime<Utc>>,
    pub temperature: Option<Measurement>,
    /// Suggested values: "Ar", "N2", "Air".
    pub atmosphere: Option<String>,
    pub comments: Option<String>,
}

/// A pure substance added to a solution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substance_name: Option<String>,
    #[serde(default)]
    pub component_role: ComponentRole,
    /// Volume of the liquid component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Measurement>,
    /// Mass of the component without the container. Derived from `volume` and `density`
    /// when both are given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<Measurement>,
    /// Density of the liquid component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molar_concentration: Option<MolarConcentration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pure_substance: Option<PureSubstance>,
}

/// Another solution used as an ingredient.
///
/// The referenced solution is either embedded in `system` or resolved from the entry
/// reference in `reference`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionComponentReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Box<Solution>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Volume of the referenced solution that is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Measurement>,
    /// Mass of the referenced solution that is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolutionIngredient {
    Component(SolutionComponent),
    Reference(SolutionComponentReference),
}

impl SolutionIngredient {
    pub fn volume(&self) -> Option<&Measurement> {
        match self {
            SolutionIngredient::Component(c) => c.volume.as_ref(),
            SolutionIngredient::Reference(r) => r.volume.as_ref(),
        }
    }
}

/// A homogeneous liquid mixture composed of two or more substances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Solution {
    #[serde(flatten)]
    pub info: SectionInfo,
    /// pH value between 0 and 14.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph_value: Option<f64>,
    /// Expected volume: the sum of the volumes of the components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_volume: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_volume: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<Measurement>,
    #[serde(default)]
    pub components: Vec<SolutionIngredient>,
    #[serde(default)]
    pub elemental_composition: Vec<ElementalComposition>,
    /// The whole initial liquid phase (https://doi.org/10.1351/goldbook.S05751).
    #[serde(default)]
    pub solvents: Vec<SolutionComponent>,
    /// The dissolved minor components (https://doi.org/10.1351/goldbook.S05744).
    #[serde(default)]
    pub solutes: Vec<SolutionComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_storage: Option<SolutionStorage>,
}

impl Solution {
    /// The measured volume when present, otherwise the calculated one.
    pub fn available_volume(&self) -> Option<&Measurement> {
        self.measured_volume
            .as_ref()
            .or(self.calculated_volume.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionReference {
    pub name: Option<String>,
    pub lab_id: Option<String>,
    pub reference: Option<String>,
}

/// Pipetting of liquids.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pipetting {
    pub instrument: Option<InstrumentReference>,
    pub pipette_volume: Option<Measurement>,
}

/// Weighing of substances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scaling {
    pub instrument: Option<InstrumentReference>,
    pub precision: Option<Measurement>,
    pub container_mass: Option<Measurement>,
    /// Mass including the container.
    pub gross_mass: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeasurementMethodology {
    Pipetting(Pipetting),
    Scaling(Scaling),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddSolutionComponent {
    #[serde(flatten)]
    pub step: StepInfo,
    pub solution_component: Option<SolutionIngredient>,
    pub measurement: Option<MeasurementMethodology>,
}

/// Generic agitation or mixing step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Agitation {
    #[serde(flatten)]
    pub step: StepInfo,
    pub temperature: Option<Measurement>,
    pub container_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sonication {
    #[serde(flatten)]
    pub agitation: Agitation,
    pub frequency: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MechanicalStirring {
    #[serde(flatten)]
    pub agitation: Agitation,
    pub rotation_speed: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolutionPreparationStep {
    AddSolutionComponent(AddSolutionComponent),
    Agitation(Agitation),
    Sonication(Sonication),
    MechanicalStirring(MechanicalStirring),
}

/// The steps involved in preparing a solution. Normalizing it creates the `Solution`
/// entry described by the steps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionPreparation {
    #[serde(flatten)]
    pub process: ProcessInfo,
    pub solution_name: Option<String>,
    #[serde(default)]
    pub steps: Vec<SolutionPreparationStep>,
    pub solution: Option<SolutionReference>,
}
