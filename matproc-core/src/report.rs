//! CSV reports of normalized solutions.

use crate::{error::MatprocError, normalize::IdentityKey, units};
use csv::Writer;
use matproc_schemas::solution::{Solution, SolutionComponent};
use serde::Serialize;
use std::{fs, io, path::Path};
use uom::si::{mass::kilogram, volume::liter};

#[derive(Debug, Serialize)]
struct ComponentRow<'a> {
    solution: &'a str,
    role: &'static str,
    name: &'a str,
    identity_key: Option<String>,
    volume_l: Option<f64>,
    mass_kg: Option<f64>,
    concentration_mol_per_l: Option<f64>,
}

/// Writes one row per solvent and solute of each reported solution.
pub struct ComponentReportWriter<W: io::Write> {
    writer: Writer<W>,
    identity_key: IdentityKey,
    path: String,
}

impl ComponentReportWriter<fs::File> {
    pub fn create(path: &Path, identity_key: IdentityKey) -> Result<Self, MatprocError> {
        let display = path.display().to_string();
        let writer =
            Writer::from_path(path).map_err(|e| MatprocError::CsvError(display.clone(), e))?;
        Ok(Self {
            writer,
            identity_key,
            path: display,
        })
    }
}

impl<W: io::Write> ComponentReportWriter<W> {
    pub fn from_writer(inner: W, identity_key: IdentityKey) -> Self {
        Self {
            writer: Writer::from_writer(inner),
            identity_key,
            path: "<memory>".to_string(),
        }
    }

    fn row<'a>(&self, solution: &'a str, component: &'a SolutionComponent) -> ComponentRow<'a> {
        let concentration = component
            .molar_concentration
            .as_ref()
            .and_then(|c| c.calculated_concentration.as_ref())
            .filter(|m| m.unit == units::CONCENTRATION_UNIT)
            .map(|m| m.value);
        ComponentRow {
            solution,
            role: component.component_role.as_str(),
            name: component
                .name
                .as_deref()
                .or(component.substance_name.as_deref())
                .unwrap_or_default(),
            identity_key: component
                .pure_substance
                .as_ref()
                .and_then(|substance| self.identity_key.key_of(substance)),
            volume_l: component
                .volume
                .as_ref()
                .and_then(|m| units::volume(m).ok())
                .map(|v| v.get::<liter>()),
            mass_kg: component
                .mass
                .as_ref()
                .and_then(|m| units::mass(m).ok())
                .map(|m| m.get::<kilogram>()),
            concentration_mol_per_l: concentration,
        }
    }

    /// Appends the rows of `solution`. Returns the number of rows written.
    pub fn write_solution(&mut self, solution: &Solution) -> Result<usize, MatprocError> {
        let name = solution.info.name.as_deref().unwrap_or("unnamed solution");
        let mut count = 0;
        for component in solution.solvents.iter().chain(&solution.solutes) {
            let row = self.row(name, component);
            self.writer
                .serialize(row)
                .map_err(|e| MatprocError::CsvError(self.path.clone(), e))?;
            count += 1;
        }
        self.writer
            .flush()
            .map_err(|e| MatprocError::FileIO(self.path.clone(), e))?;
        Ok(count)
    }

    pub fn into_inner(self) -> Result<W, MatprocError> {
        let path = self.path;
        self.writer
            .into_inner()
            .map_err(|e| MatprocError::FileIO(path, e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matproc_schemas::{
        measurement::Measurement,
        solution::{ComponentRole, MolarConcentration},
        substance::PureSubstance,
    };

    fn close(cell: &str, expected: f64) -> bool {
        (cell.parse::<f64>().unwrap() - expected).abs() < 1e-12
    }

    #[test]
    fn rows_for_solvents_then_solutes() {
        let mut solution = Solution::default();
        solution.info.name = Some("brine".into());
        solution.solvents.push(SolutionComponent {
            name: Some("water".into()),
            volume: Some(Measurement::new(500.0, "mL")),
            mass: Some(Measurement::new(0.5, "kg")),
            pure_substance: Some(PureSubstance {
                pub_chem_cid: Some(962),
                ..Default::default()
            }),
            ..Default::default()
        });
        solution.solutes.push(SolutionComponent {
            substance_name: Some("NaCl".into()),
            component_role: ComponentRole::Solute,
            mass: Some(Measurement::new(10.0, "g")),
            molar_concentration: Some(MolarConcentration {
                calculated_concentration: Some(Measurement::new(0.345, "mol/L")),
                measured_concentration: None,
            }),
            ..Default::default()
        });

        let mut report = ComponentReportWriter::from_writer(Vec::new(), IdentityKey::PubChemCid);
        assert_eq!(report.write_solution(&solution).unwrap(), 2);
        let text = String::from_utf8(report.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "solution,role,name,identity_key,volume_l,mass_kg,concentration_mol_per_l"
        );

        let solvent: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(solvent[..4], ["brine", "Solvent", "water", "962"]);
        assert!(close(solvent[4], 0.5));
        assert!(close(solvent[5], 0.5));
        assert_eq!(solvent[6], "");

        let solute: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(solute[..5], ["brine", "Solute", "NaCl", "", ""]);
        assert!(close(solute[5], 0.01));
        assert_eq!(solute[6], "0.345");
    }
}
