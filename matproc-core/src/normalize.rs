use crate::{
    diagnostics::{Diagnostics, NormalizeWarning},
    error::MatprocError,
    host::{ArchiveContext, EntryResolver, SampleHit, SampleSearch},
    units::UnitError,
};
use matproc_schemas::{solution::Solution, substance::PureSubstance};
use serde::{Deserialize, Serialize};

/// How many solution references may be followed from one entry.
pub const MAX_REFERENCE_DEPTH: usize = 16;

/// The property of a pure substance that decides whether two components are the same
/// chemical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKey {
    #[default]
    PubChemCid,
    CasNumber,
    IupacName,
}

impl IdentityKey {
    pub fn key_of(&self, substance: &PureSubstance) -> Option<String> {
        match self {
            IdentityKey::PubChemCid => substance.pub_chem_cid.map(|cid| cid.to_string()),
            IdentityKey::CasNumber => non_empty(substance.cas_number.as_deref()),
            IdentityKey::IupacName => non_empty(substance.iupac_name.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    #[serde(default)]
    pub identity_key: IdentityKey,
}

/// Everything a normalizer may use besides the section itself.
pub struct NormalizeContext<'a> {
    pub config: NormalizeConfig,
    pub diagnostics: Diagnostics,
    archive: Option<&'a dyn ArchiveContext>,
    resolver: Option<&'a dyn EntryResolver>,
    search: Option<&'a dyn SampleSearch>,
    entry_id: Option<String>,
    depth: usize,
}

impl<'a> NormalizeContext<'a> {
    pub fn new(config: NormalizeConfig) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::new(),
            archive: None,
            resolver: None,
            search: None,
            entry_id: None,
            depth: 0,
        }
    }

    pub fn with_archive(mut self, archive: &'a dyn ArchiveContext) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn with_resolver(mut self, resolver: &'a dyn EntryResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_search(mut self, search: &'a dyn SampleSearch) -> Self {
        self.search = Some(search);
        self
    }

    /// Uses one host for archive access, reference resolution and search.
    pub fn with_host<H>(self, host: &'a H) -> Self
    where
        H: ArchiveContext + EntryResolver + SampleSearch,
    {
        self.with_archive(host).with_resolver(host).with_search(host)
    }

    /// Sets the id of the entry being normalized.
    pub fn with_entry_id(mut self, entry_id: impl Into<String>) -> Self {
        self.entry_id = Some(entry_id.into());
        self
    }

    pub fn archive(&self) -> Option<&'a dyn ArchiveContext> {
        self.archive
    }

    pub fn entry_id(&self) -> Option<&str> {
        self.entry_id.as_deref()
    }

    pub fn resolve_solution(&self, reference: &str) -> Result<Option<Solution>, MatprocError> {
        self.resolver
            .map(|resolver| resolver.resolve_solution(reference))
            .transpose()
    }

    pub fn search_samples(&self) -> Option<Result<Vec<SampleHit>, MatprocError>> {
        let search = self.search?;
        let entry_id = self.entry_id.as_deref()?;
        Some(search.find_combinatorial_samples(entry_id))
    }

    /// Runs `f` one reference level deeper. Returns `None` when the nesting limit
    /// is reached.
    pub fn nested<T>(&mut self, section: &str, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.depth >= MAX_REFERENCE_DEPTH {
            self.diagnostics.warn(
                section,
                NormalizeWarning::ReferenceDepthExceeded(MAX_REFERENCE_DEPTH),
            );
            return None;
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        Some(result)
    }

    /// Converts a unit result, recording an `UnsupportedUnit` warning on failure.
    pub fn checked<T>(&mut self, section: &str, value: Result<T, UnitError>) -> Option<T> {
        match value {
            Ok(value) => Some(value),
            Err(err) => {
                self.diagnostics.warn(section, err.into());
                None
            }
        }
    }

    pub fn warn(&mut self, section: &str, warning: NormalizeWarning) {
        self.diagnostics.warn(section, warning);
    }
}

/// A section that derives some of its quantities from the others.
pub trait Normalize {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>);
}

impl<T: Normalize> Normalize for Option<T> {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        if let Some(section) = self {
            section.normalize(ctx);
        }
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        for section in self.iter_mut() {
            section.normalize(ctx);
        }
    }
}

/// `"{kind} '{name}'"`, or just the kind for unnamed sections.
pub(crate) fn section_label(kind: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{kind} '{name}'"),
        _ => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keys() {
        let substance = PureSubstance {
            pub_chem_cid: Some(962),
            cas_number: Some(" 7732-18-5 ".into()),
            iupac_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(IdentityKey::PubChemCid.key_of(&substance).as_deref(), Some("962"));
        assert_eq!(IdentityKey::CasNumber.key_of(&substance).as_deref(), Some("7732-18-5"));
        assert_eq!(IdentityKey::IupacName.key_of(&substance), None);
    }

    #[test]
    fn config_defaults_to_pubchem() {
        let config: NormalizeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.identity_key, IdentityKey::PubChemCid);
        let config: NormalizeConfig =
            serde_json::from_str(r#"{"identity_key": "cas_number"}"#).unwrap();
        assert_eq!(config.identity_key, IdentityKey::CasNumber);
    }

    #[test]
    fn nesting_is_bounded() {
        let mut ctx = NormalizeContext::new(NormalizeConfig::default());
        fn dive(ctx: &mut NormalizeContext<'_>) -> usize {
            ctx.nested("Solution", |ctx| 1 + dive(ctx)).unwrap_or(0)
        }
        assert_eq!(dive(&mut ctx), MAX_REFERENCE_DEPTH);
        assert_eq!(ctx.diagnostics.len(), 1);
    }
}
