//! Solution preparation: naming the steps and creating the prepared `Solution` entry.

use crate::{
    archive::{create_archive, create_unique_filename},
    diagnostics::NormalizeWarning,
    host::FileType,
    normalize::{section_label, Normalize, NormalizeContext},
};
use matproc_schemas::{
    file_formats::{EntryData, EntryFile},
    solution::{
        AddSolutionComponent, Agitation, Solution, SolutionIngredient, SolutionPreparation,
        SolutionPreparationStep, SolutionReference,
    },
    system::SectionInfo,
};
use tracing::info;

impl Normalize for AddSolutionComponent {
    fn normalize(&mut self, _ctx: &mut NormalizeContext<'_>) {
        if self.step.name.is_some() {
            return;
        }
        self.step.name = match &self.solution_component {
            Some(SolutionIngredient::Component(component)) => Some(match &component.name {
                Some(name) => format!("Add {name}"),
                None => format!("Add {}", component.component_role.as_str()),
            }),
            Some(SolutionIngredient::Reference(reference)) => {
                reference.system.as_ref().map(|solution| match &solution.info.name {
                    Some(name) => format!("Add {name}"),
                    None => "Add Solution".to_string(),
                })
            }
            None => None,
        };
    }
}

fn default_step_name(agitation: &mut Agitation, kind: &str) {
    agitation.step.name.get_or_insert_with(|| kind.to_string());
}

impl Normalize for SolutionPreparationStep {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        match self {
            SolutionPreparationStep::AddSolutionComponent(step) => step.normalize(ctx),
            SolutionPreparationStep::Agitation(step) => default_step_name(step, "Agitation"),
            SolutionPreparationStep::Sonication(step) => {
                default_step_name(&mut step.agitation, "Sonication")
            }
            SolutionPreparationStep::MechanicalStirring(step) => {
                default_step_name(&mut step.agitation, "MechanicalStirring")
            }
        }
    }
}

/// `"Brine 2 M"` -> `"brine_2_m.archive.json"`.
pub fn solution_filename(solution_name: &str) -> String {
    format!("{}.archive.json", solution_name.to_lowercase().replace(' ', "_"))
}

/// Writes `solution` as a new entry and returns its reference.
fn create_solution_entry(
    preparation: &mut SolutionPreparation,
    mut solution: Solution,
    ctx: &mut NormalizeContext<'_>,
) -> Option<String> {
    let section = section_label("SolutionPreparation", preparation.process.name.as_deref());
    let archive = ctx.archive()?;

    let filename = match preparation.solution_name.clone() {
        Some(name) => solution_filename(&name),
        None => {
            let filename = create_unique_filename(archive, "unnamed_solution", "archive.json");
            let stem = filename.split('.').next().unwrap_or(&filename);
            let name = stem.replace('_', " ");
            solution.info.name = Some(name.clone());
            preparation.solution_name = Some(name);
            filename
        }
    };

    let entry = EntryFile::new(EntryData::Solution(solution));
    match create_archive(&entry, archive, &filename, FileType::Json, true) {
        Ok(Some(created)) => {
            if !created.written {
                ctx.diagnostics
                    .error(&section, NormalizeWarning::ArchiveConflict(filename));
            } else {
                info!(filename = %filename, "created solution entry");
            }
            Some(created.reference)
        }
        Ok(None) => None,
        Err(err) => {
            ctx.diagnostics.error(
                &section,
                NormalizeWarning::ArchiveWriteFailed(filename, err.to_string()),
            );
            None
        }
    }
}

impl Normalize for SolutionPreparation {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        self.steps.normalize(ctx);

        let components: Vec<SolutionIngredient> = self
            .steps
            .iter()
            .filter_map(|step| match step {
                SolutionPreparationStep::AddSolutionComponent(add) => {
                    add.solution_component.clone()
                }
                _ => None,
            })
            .collect();
        if components.is_empty() {
            return;
        }

        let mut solution = Solution {
            info: SectionInfo {
                name: self.solution_name.clone(),
                ..Default::default()
            },
            components,
            ..Default::default()
        };
        solution.normalize(ctx);

        if let Some(reference) = create_solution_entry(self, solution, ctx) {
            self.solution
                .get_or_insert_with(SolutionReference::default)
                .reference = Some(reference);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeConfig;
    use matproc_schemas::solution::{
        ComponentRole, MechanicalStirring, SolutionComponent, SolutionComponentReference,
        Sonication,
    };

    fn add(ingredient: SolutionIngredient) -> SolutionPreparationStep {
        SolutionPreparationStep::AddSolutionComponent(AddSolutionComponent {
            solution_component: Some(ingredient),
            ..Default::default()
        })
    }

    fn step_name(step: &SolutionPreparationStep) -> Option<&str> {
        match step {
            SolutionPreparationStep::AddSolutionComponent(s) => s.step.name.as_deref(),
            SolutionPreparationStep::Agitation(s) => s.step.name.as_deref(),
            SolutionPreparationStep::Sonication(s) => s.agitation.step.name.as_deref(),
            SolutionPreparationStep::MechanicalStirring(s) => s.agitation.step.name.as_deref(),
        }
    }

    #[test]
    fn steps_get_default_names() {
        let named_solution = Solution {
            info: SectionInfo {
                name: Some("stock".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut preparation = SolutionPreparation {
            steps: vec![
                add(SolutionIngredient::Component(SolutionComponent {
                    name: Some("water".into()),
                    ..Default::default()
                })),
                add(SolutionIngredient::Component(SolutionComponent {
                    component_role: ComponentRole::Solute,
                    ..Default::default()
                })),
                add(SolutionIngredient::Reference(SolutionComponentReference {
                    system: Some(Box::new(named_solution)),
                    ..Default::default()
                })),
                add(SolutionIngredient::Reference(SolutionComponentReference {
                    system: Some(Box::default()),
                    ..Default::default()
                })),
                SolutionPreparationStep::Agitation(Agitation::default()),
                SolutionPreparationStep::Sonication(Sonication::default()),
                SolutionPreparationStep::MechanicalStirring(MechanicalStirring::default()),
            ],
            ..Default::default()
        };
        preparation.normalize(&mut NormalizeContext::new(NormalizeConfig::default()));

        let names: Vec<_> = preparation.steps.iter().map(step_name).collect();
        assert_eq!(
            names,
            vec![
                Some("Add water"),
                Some("Add Solute"),
                Some("Add stock"),
                Some("Add Solution"),
                Some("Agitation"),
                Some("Sonication"),
                Some("MechanicalStirring"),
            ]
        );
        // No archive host: nothing is created.
        assert!(preparation.solution.is_none());
    }

    #[test]
    fn without_add_steps_nothing_happens() {
        let mut preparation = SolutionPreparation {
            solution_name: Some("empty".into()),
            steps: vec![SolutionPreparationStep::Agitation(Agitation::default())],
            ..Default::default()
        };
        let mut ctx = NormalizeContext::new(NormalizeConfig::default());
        preparation.normalize(&mut ctx);
        assert!(preparation.solution.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn filenames_from_solution_names() {
        assert_eq!(solution_filename("Brine 2 M"), "brine_2_m.archive.json");
    }
}
