use crate::{measurement::Measurement, substance::ElementalComposition};
use serde::{Deserialize, Serialize};

/// Miller indices (h k l) of a family of lattice planes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MillerIndices {
    pub h_index: Option<f64>,
    pub k_index: Option<f64>,
    pub l_index: Option<f64>,
}

/// Bravais-Miller indices (h k i l) for hexagonal and rhombohedral lattices, with
/// h + k + i = 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BravaisMillerIndices {
    #[serde(flatten)]
    pub miller: MillerIndices,
    pub i_index: Option<f64>,
}

/// A crystallographic plane or direction, given in reciprocal and/or direct space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrystallographicDirection {
    pub hkl_reciprocal: Option<MillerIndices>,
    pub hkl_direct: Option<MillerIndices>,
}

/// The tilt angle along one crystallographic direction of the surface plane.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectedMiscutOrientation {
    #[serde(flatten)]
    pub direction: CrystallographicDirection,
    pub angle: Option<Measurement>,
    pub angle_deviation: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianMiscut {
    pub reference_orientation: Option<ProjectedMiscutOrientation>,
    pub perpendicular_orientation: Option<ProjectedMiscutOrientation>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarMiscut {
    /// Out-of-plane tilt angle.
    pub rho: Option<Measurement>,
    /// In-plane angle toward the reference orientation.
    pub theta: Option<Measurement>,
    pub reference_orientation: Option<CrystallographicDirection>,
}

/// Intentional angular deviation of the surface from a crystallographic plane.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Miscut {
    pub cartesian_miscut: Option<CartesianMiscut>,
    pub polar_miscut: Option<PolarMiscut>,
    /// Raw file path of a schematic of the miscut directions.
    pub directions_image: Option<String>,
}

/// A foreign atom intentionally introduced into the crystal lattice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dopant {
    #[serde(flatten)]
    pub composition: ElementalComposition,
    /// Doping level in 1/m^3.
    pub doping_level: Option<Measurement>,
    pub doping_deviation: Option<Measurement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BravaisLattice {
    #[serde(rename = "Triclinic")]
    Triclinic,
    #[serde(rename = "Monoclinic Simple")]
    MonoclinicSimple,
    #[serde(rename = "Monoclinic Base Centered")]
    MonoclinicBaseCentered,
    #[serde(rename = "Orthorhombic Simple")]
    OrthorhombicSimple,
    #[serde(rename = "Orthorhombic Base Centered")]
    OrthorhombicBaseCentered,
    #[serde(rename = "Orthorhombic Body Centered")]
    OrthorhombicBodyCentered,
    #[serde(rename = "Orthorhombic Face Centered")]
    OrthorhombicFaceCentered,
    #[serde(rename = "Tetragonal Simple")]
    TetragonalSimple,
    #[serde(rename = "Tetragonal Body Centered")]
    TetragonalBodyCentered,
    #[serde(rename = "Cubic Simple")]
    CubicSimple,
    #[serde(rename = "Cubic Body Centered")]
    CubicBodyCentered,
    #[serde(rename = "Cubic Face Centered")]
    CubicFaceCentered,
    #[serde(rename = "Trigonal")]
    Trigonal,
    #[serde(rename = "Hexagonal")]
    Hexagonal,
}

/// Orientation, miscut and lattice of a crystalline substrate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubstrateCrystalProperties {
    pub bravais_lattices: Option<BravaisLattice>,
    pub surface_orientation: Option<CrystallographicDirection>,
    pub miscut: Option<Miscut>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConductivityType {
    #[serde(rename = "P-type")]
    PType,
    #[serde(rename = "N-type")]
    NType,
    #[serde(rename = "Semi-insulating")]
    SemiInsulating,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElectronicProperties {
    pub conductivity_type: Option<ConductivityType>,
    /// Concentration of free charge carriers.
    pub carrier_density: Option<Measurement>,
    pub carrier_density_deviation: Option<Measurement>,
    pub electrical_resistivity: Option<Measurement>,
}
