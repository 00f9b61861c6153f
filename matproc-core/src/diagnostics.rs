//! Non-fatal findings of the normalizers.
//!
//! Normalization never fails: missing or inconsistent inputs are skipped and reported
//! here. Every finding is also emitted through `tracing` as it is recorded.

use crate::units::UnitError;
use matproc_schemas::solution::ComponentRole;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeWarning {
    #[error(
        "Either the pure substance or the mass of component '{}' is missing. \
         Not adding it to the {} list",
        .component,
        role_list(.role)
    )]
    IncompleteComponent {
        component: String,
        role: ComponentRole,
    },

    #[error("Could not calculate moles of '{0}' as molecular mass is missing")]
    MissingMolecularMass(String),

    #[error("Could not calculate moles of '{0}' as mass is missing")]
    MissingMass(String),

    #[error("Volume of the solution is missing, can not calculate the concentration of '{0}'")]
    MissingSolutionVolume(String),

    #[error("The volume of the solvent component '{0}' is missing")]
    MissingSolventVolume(String),

    #[error(
        "The volume used for '{0}' is greater than the available volume of the solution. \
         Setting it to the available volume"
    )]
    VolumeExceedsAvailable(String),

    #[error("Could not resolve the solution referenced by '{0}'")]
    UnresolvedReference(String),

    #[error("Solution references are nested deeper than {0} levels")]
    ReferenceDepthExceeded(usize),

    #[error(transparent)]
    UnsupportedUnit(#[from] UnitError),

    #[error(
        "{0} archive file already exists. You are trying to overwrite it with a different \
         content. To do so, remove the existing archive and reprocess"
    )]
    ArchiveConflict(String),

    #[error("Could not create the entry '{0}': {1}")]
    ArchiveWriteFailed(String, String),

    #[error("Search for samples of the library failed: {0}")]
    SearchFailed(String),
}

fn role_list(role: &ComponentRole) -> String {
    format!("{}s", role.as_str().to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The section that raised it, e.g. `Solution 'brine'`.
    pub section: String,
    pub warning: NormalizeWarning,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, section: &str, warning: NormalizeWarning) {
        warn!(section, "{}", warning);
        self.push(Severity::Warning, section, warning);
    }

    pub fn error(&mut self, section: &str, warning: NormalizeWarning) {
        error!(section, "{}", warning);
        self.push(Severity::Error, section, warning);
    }

    fn push(&mut self, severity: Severity, section: &str, warning: NormalizeWarning) {
        self.entries.push(Diagnostic {
            severity,
            section: section.to_string(),
            warning,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &NormalizeWarning> {
        self.entries.iter().map(|d| &d.warning)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_component_names_the_target_list() {
        let w = NormalizeWarning::IncompleteComponent {
            component: "salt".into(),
            role: ComponentRole::Solute,
        };
        assert!(w.to_string().ends_with("to the solutes list"));
    }

    #[test]
    fn records_severity_and_section() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn("Solution 'a'", NormalizeWarning::MissingMass("water".into()));
        diagnostics.error("SolutionPreparation", NormalizeWarning::ArchiveConflict("a.archive.json".into()));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.entries()[0].severity, Severity::Warning);
        assert_eq!(diagnostics.entries()[1].section, "SolutionPreparation");
        assert_eq!(diagnostics.take().len(), 2);
        assert!(diagnostics.is_empty());
    }
}
