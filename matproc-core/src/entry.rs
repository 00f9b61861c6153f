//! Reading and writing entry files, and normalizing whole entries.

use crate::{
    error::MatprocError,
    host::FileType,
    normalize::{Normalize, NormalizeContext},
};
use matproc_schemas::file_formats::{EntryData, EntryFile};
use std::{fs, path::Path};

pub fn parse_entry(contents: &str, file_type: FileType, origin: &str) -> Result<EntryFile, MatprocError> {
    match file_type {
        FileType::Json => Ok(serde_json::from_str(contents)?),
        FileType::Yaml => serde_yaml::from_str(contents)
            .map_err(|e| MatprocError::YamlParsing(origin.to_string(), e)),
    }
}

pub fn render_entry(entry: &EntryFile, file_type: FileType) -> Result<String, MatprocError> {
    match file_type {
        FileType::Json => Ok(serde_json::to_string_pretty(entry)?),
        FileType::Yaml => serde_yaml::to_string(entry)
            .map_err(|e| MatprocError::YamlParsing("<entry>".to_string(), e)),
    }
}

fn file_type_of(path: &Path) -> Result<FileType, MatprocError> {
    let name = path.to_string_lossy();
    FileType::from_filename(&name).ok_or_else(|| MatprocError::UnsupportedFileType(name.to_string()))
}

pub fn load_entry(path: &Path) -> Result<EntryFile, MatprocError> {
    let file_type = file_type_of(path)?;
    let display = path.display().to_string();
    let contents =
        fs::read_to_string(path).map_err(|e| MatprocError::FileIO(display.clone(), e))?;
    parse_entry(&contents, file_type, &display)
}

pub fn save_entry(path: &Path, entry: &EntryFile) -> Result<(), MatprocError> {
    let contents = render_entry(entry, file_type_of(path)?)?;
    fs::write(path, contents).map_err(|e| MatprocError::FileIO(path.display().to_string(), e))
}

impl Normalize for EntryData {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        match self {
            EntryData::Solution(solution) => solution.normalize(ctx),
            EntryData::SolutionPreparation(preparation) => preparation.normalize(ctx),
            EntryData::ThinFilmStack(stack) => stack.normalize(ctx),
            EntryData::CombinatorialLibrary(library) => library.normalize(ctx),
            EntryData::ChemicalVaporDeposition(deposition) => deposition.normalize(ctx),
            EntryData::Movpe(deposition) => {
                deposition.process.method.get_or_insert_with(|| "MOVPE".into());
                deposition.normalize(ctx)
            }
            EntryData::PhysicalVaporDeposition(deposition) => deposition.normalize(ctx),
            EntryData::ThermalEvaporation(deposition) => {
                deposition.process.method.get_or_insert_with(|| "Thermal Evaporation".into());
                deposition.normalize(ctx)
            }
            EntryData::PulsedLaserDeposition(deposition) => {
                deposition.process.method.get_or_insert_with(|| "Pulsed Laser Deposition".into());
                deposition.normalize(ctx)
            }
            EntryData::MolecularBeamEpitaxy(deposition) => {
                deposition.process.method.get_or_insert_with(|| "Molecular Beam Epitaxy".into());
                deposition.normalize(ctx)
            }
            EntryData::SputterDeposition(deposition) => {
                deposition.process.method.get_or_insert_with(|| "Sputter Deposition".into());
                deposition.normalize(ctx)
            }
            // Pure declarations.
            EntryData::Substrate(_)
            | EntryData::CrystallineSubstrate(_)
            | EntryData::ThinFilm(_)
            | EntryData::PldTarget(_)
            | EntryData::InsertReduction(_)
            | EntryData::SubstrateHolder(_)
            | EntryData::FilledSubstrateHolder(_)
            | EntryData::Etching(_)
            | EntryData::EtchingRecipe(_)
            | EntryData::Annealing(_)
            | EntryData::AnnealingRecipe(_)
            | EntryData::Cleaning(_)
            | EntryData::CleaningRecipe(_)
            | EntryData::CombinatorialSample(_)
            | EntryData::ThinFilmCombinatorialSample(_)
            | EntryData::DiscreteCombinatorialSample(_)
            | EntryData::DiscreteCombinatorialLibrary(_) => {}
        }
    }
}

impl Normalize for EntryFile {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        self.data.normalize(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeConfig;

    const BRINE: &str = r#"
schema_version: "1.0"
data:
  type: Solution
  name: brine
  components:
    - type: component
      name: water
      component_role: Solvent
      volume: { value: 500, unit: mL }
      density: { value: 1, unit: g/mL }
      pure_substance: { name: Water, molecular_mass: 18.010565, pub_chem_cid: 962 }
    - type: component
      name: salt
      component_role: Solute
      mass: { value: 10, unit: g }
      pure_substance: { name: Sodium Chloride, molecular_mass: 57.958622, pub_chem_cid: 5234 }
"#;

    #[test]
    fn yaml_entry_normalizes_and_renders_as_json() {
        let mut entry = parse_entry(BRINE, FileType::Yaml, "brine.archive.yaml").unwrap();
        let mut ctx = NormalizeContext::new(NormalizeConfig::default());
        entry.normalize(&mut ctx);

        let EntryData::Solution(solution) = &entry.data else {
            panic!("solution expected");
        };
        assert_eq!(solution.solutes.len(), 1);

        let json = render_entry(&entry, FileType::Json).unwrap();
        let back = parse_entry(&json, FileType::Json, "brine.archive.json").unwrap();
        assert_eq!(back.data.kind(), "Solution");
        let EntryData::Solution(back) = back.data else {
            unreachable!()
        };
        assert_eq!(back.solvents.len(), 1);
        assert_eq!(back.solutes[0].name.as_deref(), Some("salt"));
    }

    #[test]
    fn deposition_method_defaults_by_kind() {
        let yaml = "schema_version: '1.0'\ndata:\n  type: SputterDeposition\n  name: run 7\n";
        let mut entry = parse_entry(yaml, FileType::Yaml, "run.archive.yaml").unwrap();
        entry.normalize(&mut NormalizeContext::new(NormalizeConfig::default()));
        let EntryData::SputterDeposition(deposition) = &entry.data else {
            panic!("sputter deposition expected");
        };
        assert_eq!(deposition.process.method.as_deref(), Some("Sputter Deposition"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_entry(Path::new("entry.txt")).unwrap_err();
        assert!(matches!(err, MatprocError::UnsupportedFileType(_)));
    }
}
