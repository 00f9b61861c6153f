//! Chemical identity of pure substances and elemental compositions.

use serde::{Deserialize, Serialize};

/// A pure chemical substance, usually filled from a PubChem lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PureSubstance {
    pub name: Option<String>,
    pub iupac_name: Option<String>,
    pub molecular_formula: Option<String>,
    /// Mass of one molecule in daltons, numerically equal to the molar mass in g/mol.
    pub molecular_mass: Option<f64>,
    pub cas_number: Option<String>,
    pub pub_chem_cid: Option<u64>,
    pub inchi: Option<String>,
    pub inchi_key: Option<String>,
    pub smiles: Option<String>,
}

impl PureSubstance {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementalComposition {
    /// Chemical symbol, e.g. "Ga".
    pub element: Option<String>,
    pub atomic_fraction: Option<f64>,
    pub mass_fraction: Option<f64>,
}
