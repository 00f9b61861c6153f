//! Generic surface-treatment processes: etching, annealing, cleaning and their recipes.

use crate::{
    measurement::Measurement,
    system::{CompositeSystem, CompositeSystemReference, ProcessInfo, StepInfo},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgitationMethod {
    #[serde(rename = "Magnetic Stirring")]
    MagneticStirring,
    #[serde(rename = "Sonication")]
    Sonication,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EtchingStep {
    #[serde(flatten)]
    pub step: StepInfo,
    pub temperature: Option<Measurement>,
    pub agitation: Option<AgitationMethod>,
    #[serde(default)]
    pub etching_reagents: Vec<CompositeSystem>,
}

/// Selective removal of material from a surface (http://purl.obolibrary.org/obo/CHMO_0001558).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Etching {
    #[serde(flatten)]
    pub process: ProcessInfo,
    /// Searchable tags for this entry.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Reference to the recipe the process follows.
    pub recipe: Option<String>,
    #[serde(default)]
    pub steps: Vec<EtchingStep>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnealingStep {
    #[serde(flatten)]
    pub step: StepInfo,
    pub starting_temperature: Option<Measurement>,
    pub ending_temperature: Option<Measurement>,
}

/// Heat treatment that alters a material's properties
/// (http://purl.obolibrary.org/obo/CHMO_0001465).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annealing {
    #[serde(flatten)]
    pub process: ProcessInfo,
    #[serde(default)]
    pub tags: Vec<String>,
    pub recipe: Option<String>,
    pub duration: Option<Measurement>,
    #[serde(default)]
    pub steps: Vec<AnnealingStep>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CleaningStep {
    #[serde(flatten)]
    pub step: StepInfo,
    pub temperature: Option<Measurement>,
    pub agitation: Option<AgitationMethod>,
    pub cleaning_reagents: Option<CompositeSystemReference>,
}

/// Removal of contaminants from a substrate surface before deposition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cleaning {
    #[serde(flatten)]
    pub process: ProcessInfo,
    #[serde(default)]
    pub tags: Vec<String>,
    pub recipe: Option<String>,
    pub duration: Option<Measurement>,
    #[serde(default)]
    pub steps: Vec<CleaningStep>,
}

/// A process template. It carries the same data as the process, without the datetime
/// and the input samples; `lab_id` is the recipe ID.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipe<P> {
    #[serde(flatten)]
    pub process: P,
}

pub type EtchingRecipe = Recipe<Etching>;
pub type AnnealingRecipe = Recipe<Annealing>;
pub type CleaningRecipe = Recipe<Cleaning>;
