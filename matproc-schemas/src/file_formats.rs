use crate::{
    combinatorial::{
        CombinatorialLibrary, CombinatorialSample, DiscreteCombinatorialLibrary,
        DiscreteCombinatorialSample, ThinFilmCombinatorialSample,
    },
    cvd::{ChemicalVaporDeposition, Movpe},
    process::{Annealing, AnnealingRecipe, Cleaning, CleaningRecipe, Etching, EtchingRecipe},
    pvd::{
        MolecularBeamEpitaxy, PhysicalVaporDeposition, PldTarget, PulsedLaserDeposition,
        SputterDeposition, ThermalEvaporation,
    },
    sample::{CrystallineSubstrate, Substrate, ThinFilm, ThinFilmStack},
    solution::{Solution, SolutionPreparation},
    vapor_deposition::{FilledSubstrateHolder, InsertReduction, SubstrateHolder},
};
use serde::{Deserialize, Serialize};

/// The section stored as the `data` of an entry file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryData {
    Solution(Solution),
    SolutionPreparation(SolutionPreparation),
    Substrate(Substrate),
    CrystallineSubstrate(CrystallineSubstrate),
    ThinFilm(ThinFilm),
    ThinFilmStack(ThinFilmStack),
    PldTarget(PldTarget),
    InsertReduction(InsertReduction),
    SubstrateHolder(SubstrateHolder),
    FilledSubstrateHolder(FilledSubstrateHolder),
    ChemicalVaporDeposition(ChemicalVaporDeposition),
    Movpe(Movpe),
    PhysicalVaporDeposition(PhysicalVaporDeposition),
    ThermalEvaporation(ThermalEvaporation),
    PulsedLaserDeposition(PulsedLaserDeposition),
    MolecularBeamEpitaxy(MolecularBeamEpitaxy),
    SputterDeposition(SputterDeposition),
    Etching(Etching),
    EtchingRecipe(EtchingRecipe),
    Annealing(Annealing),
    AnnealingRecipe(AnnealingRecipe),
    Cleaning(Cleaning),
    CleaningRecipe(CleaningRecipe),
    CombinatorialLibrary(CombinatorialLibrary),
    CombinatorialSample(CombinatorialSample),
    ThinFilmCombinatorialSample(ThinFilmCombinatorialSample),
    DiscreteCombinatorialSample(DiscreteCombinatorialSample),
    DiscreteCombinatorialLibrary(DiscreteCombinatorialLibrary),
}

impl EntryData {
    /// The variant name, as written in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            EntryData::Solution(_) => "Solution",
            EntryData::SolutionPreparation(_) => "SolutionPreparation",
            EntryData::Substrate(_) => "Substrate",
            EntryData::CrystallineSubstrate(_) => "CrystallineSubstrate",
            EntryData::ThinFilm(_) => "ThinFilm",
            EntryData::ThinFilmStack(_) => "ThinFilmStack",
            EntryData::PldTarget(_) => "PldTarget",
            EntryData::InsertReduction(_) => "InsertReduction",
            EntryData::SubstrateHolder(_) => "SubstrateHolder",
            EntryData::FilledSubstrateHolder(_) => "FilledSubstrateHolder",
            EntryData::ChemicalVaporDeposition(_) => "ChemicalVaporDeposition",
            EntryData::Movpe(_) => "Movpe",
            EntryData::PhysicalVaporDeposition(_) => "PhysicalVaporDeposition",
            EntryData::ThermalEvaporation(_) => "ThermalEvaporation",
            EntryData::PulsedLaserDeposition(_) => "PulsedLaserDeposition",
            EntryData::MolecularBeamEpitaxy(_) => "MolecularBeamEpitaxy",
            EntryData::SputterDeposition(_) => "SputterDeposition",
            EntryData::Etching(_) => "Etching",
            EntryData::EtchingRecipe(_) => "EtchingRecipe",
            EntryData::Annealing(_) => "Annealing",
            EntryData::AnnealingRecipe(_) => "AnnealingRecipe",
            EntryData::Cleaning(_) => "Cleaning",
            EntryData::CleaningRecipe(_) => "CleaningRecipe",
            EntryData::CombinatorialLibrary(_) => "CombinatorialLibrary",
            EntryData::CombinatorialSample(_) => "CombinatorialSample",
            EntryData::ThinFilmCombinatorialSample(_) => "ThinFilmCombinatorialSample",
            EntryData::DiscreteCombinatorialSample(_) => "DiscreteCombinatorialSample",
            EntryData::DiscreteCombinatorialLibrary(_) => "DiscreteCombinatorialLibrary",
        }
    }

    /// The combinatorial sample section, for entries that are one.
    pub fn as_combinatorial_sample(&self) -> Option<&CombinatorialSample> {
        match self {
            EntryData::CombinatorialSample(sample) => Some(sample),
            EntryData::ThinFilmCombinatorialSample(sample) => Some(&sample.sample),
            _ => None,
        }
    }
}

/// A single entry as stored in a `.archive.json` / `.archive.yaml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFile {
    pub schema_version: String,
    pub data: EntryData,
}

pub const SCHEMA_VERSION: &str = "1.0";

impl EntryFile {
    pub fn new(data: EntryData) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            data,
        }
    }
}
