//! Building blocks shared by every composite system (samples, solutions, targets) and
//! by every process.

use crate::{
    cvd::ComponentConcentration,
    measurement::Measurement,
    substance::{ElementalComposition, PureSubstance},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identification shared by all entities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionInfo {
    pub name: Option<String>,
    pub lab_id: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// A component that is itself another system entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemComponent {
    pub name: Option<String>,
    pub mass: Option<Measurement>,
    pub mass_fraction: Option<f64>,
    /// Entry reference of the system, e.g. `../uploads/<upload>/archive/<entry>#data`.
    pub system: Option<String>,
}

/// A component that is a pure chemical substance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PureSubstanceComponent {
    pub name: Option<String>,
    pub substance_name: Option<String>,
    pub mass: Option<Measurement>,
    pub mass_fraction: Option<f64>,
    pub pure_substance: Option<PureSubstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    System(SystemComponent),
    PureSubstance(PureSubstanceComponent),
    /// A pure substance dissolved at a known concentration, as used in mist CVD.
    Concentration(ComponentConcentration),
}

impl Component {
    pub fn name(&self) -> Option<&str> {
        match self {
            Component::System(c) => c.name.as_deref(),
            Component::PureSubstance(c) => c.name.as_deref(),
            Component::Concentration(c) => c.component.name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompositeSystem {
    #[serde(flatten)]
    pub info: SectionInfo,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub elemental_composition: Vec<ElementalComposition>,
}

/// A reference to another composite system entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompositeSystemReference {
    pub name: Option<String>,
    pub lab_id: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentReference {
    pub name: Option<String>,
    pub lab_id: Option<String>,
    pub reference: Option<String>,
}

/// Attributes shared by every process entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub name: Option<String>,
    pub lab_id: Option<String>,
    pub method: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub samples: Vec<CompositeSystemReference>,
    #[serde(default)]
    pub instruments: Vec<InstrumentReference>,
}

/// Attributes shared by every process step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepInfo {
    pub name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration: Option<Measurement>,
    pub comment: Option<String>,
}
