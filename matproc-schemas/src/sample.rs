//! Substrates, thin films and the stacks they form.

use crate::{
    crystal::{Dopant, ElectronicProperties, SubstrateCrystalProperties},
    geometry::Geometry,
    system::{CompositeSystem, CompositeSystemReference},
};
use serde::{Deserialize, Serialize};

/// A thin free standing sheet of material. Not to be confused with the substrate role
/// during a deposition, which can be a `Substrate` with `ThinFilm`s on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Substrate {
    #[serde(flatten)]
    pub system: CompositeSystem,
    pub supplier: Option<String>,
    /// An ID that is unique at the supplier.
    pub supplier_id: Option<String>,
    /// Raw file path of a photograph of the substrate.
    pub image: Option<String>,
    /// Raw file paths of certificates and other documentation.
    #[serde(default)]
    pub information_sheet: Vec<String>,
}

/// A substrate with a periodic arrangement of atoms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrystallineSubstrate {
    #[serde(flatten)]
    pub substrate: Substrate,
    pub geometry: Option<Geometry>,
    pub crystal_properties: Option<SubstrateCrystalProperties>,
    pub electronic_properties: Option<ElectronicProperties>,
    #[serde(default)]
    pub dopants: Vec<Dopant>,
}

/// A thin film of material which exists as part of a stack.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThinFilm {
    #[serde(flatten)]
    pub system: CompositeSystem,
    pub geometry: Option<Geometry>,
}

pub type ThinFilmReference = CompositeSystemReference;
pub type SubstrateReference = CompositeSystemReference;
pub type ThinFilmStackReference = CompositeSystemReference;

/// A stack of thin films, typically deposited on a substrate. Its `components` are
/// derived from `layers` and `substrate`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThinFilmStack {
    #[serde(flatten)]
    pub system: CompositeSystem,
    /// Ordered list of layers, starting at the substrate.
    #[serde(default)]
    pub layers: Vec<ThinFilmReference>,
    pub substrate: Option<SubstrateReference>,
}
