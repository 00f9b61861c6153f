//! Volume, mass and molar concentration propagation through solutions, including
//! solutions made from other solutions.

use crate::{
    diagnostics::NormalizeWarning,
    normalize::{section_label, IdentityKey, Normalize, NormalizeContext},
    units::{self, Volume},
};
use matproc_schemas::{
    measurement::Measurement,
    solution::{
        ComponentRole, MolarConcentration, Solution, SolutionComponent,
        SolutionComponentReference, SolutionIngredient,
    },
    substance::PureSubstance,
};
use std::{collections::HashMap, ops::Add};
use tracing::debug;

fn component_name(component: &SolutionComponent) -> String {
    component
        .name
        .as_deref()
        .or(component.substance_name.as_deref())
        .or_else(|| component.pure_substance.as_ref()?.name.as_deref())
        .unwrap_or("unnamed component")
        .to_string()
}

fn is_present(measurement: Option<&Measurement>) -> bool {
    measurement.is_some_and(|m| m.value != 0.0)
}

impl Normalize for SolutionComponent {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        if self.pure_substance.is_none() {
            if let Some(name) = &self.substance_name {
                self.pure_substance = Some(PureSubstance::named(name.clone()));
            }
        }
        let section = section_label("SolutionComponent", self.name.as_deref());
        update_mass_from_density(self, &section, ctx);
    }
}

/// mass = volume × density, when both are known.
fn update_mass_from_density(
    component: &mut SolutionComponent,
    section: &str,
    ctx: &mut NormalizeContext<'_>,
) {
    let (Some(volume), Some(density)) = (&component.volume, &component.density) else {
        return;
    };
    let volume = ctx.checked(section, units::volume(volume));
    let density = ctx.checked(section, units::density(density));
    if let (Some(volume), Some(density)) = (volume, density) {
        component.mass = Some(units::mass_measurement(volume * density));
    }
}

fn calculate_moles(
    component: &mut SolutionComponent,
    section: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Option<units::Amount> {
    update_mass_from_density(component, section, ctx);

    let molecular_mass = component
        .pure_substance
        .as_ref()
        .and_then(|s| s.molecular_mass)
        .filter(|m| *m != 0.0);
    let Some(molecular_mass) = molecular_mass else {
        ctx.warn(
            section,
            NormalizeWarning::MissingMolecularMass(component_name(component)),
        );
        return None;
    };
    if !is_present(component.mass.as_ref()) {
        ctx.warn(section, NormalizeWarning::MissingMass(component_name(component)));
        return None;
    }
    let mass = ctx.checked(section, units::mass(component.mass.as_ref()?))?;
    Some(mass / units::molar_mass_from_daltons(molecular_mass))
}

/// Sets the calculated molar concentration of `component` in `volume` of solution.
pub fn calculate_molar_concentration(
    component: &mut SolutionComponent,
    volume: Option<Volume>,
    section: &str,
    ctx: &mut NormalizeContext<'_>,
) {
    let Some(volume) = volume else {
        ctx.warn(
            section,
            NormalizeWarning::MissingSolutionVolume(component_name(component)),
        );
        return;
    };
    let moles = calculate_moles(component, section, ctx);
    let concentration = component
        .molar_concentration
        .get_or_insert_with(MolarConcentration::default);
    if let Some(moles) = moles {
        concentration.calculated_concentration =
            Some(units::concentration_measurement((moles / volume).into()));
    }
}

/// Applies a referenced solution to the reference: name, used volume (capped at the
/// available volume) and the mass of that volume.
fn apply_reference(
    reference: &mut SolutionComponentReference,
    solution: &Solution,
    section: &str,
    ctx: &mut NormalizeContext<'_>,
) {
    if reference.name.is_none() {
        reference.name = solution.info.name.clone();
    }
    let available = solution.available_volume();
    match (reference.volume.clone(), available) {
        (None, Some(available)) => reference.volume = Some(available.clone()),
        (Some(used), Some(available)) => {
            let used_volume = ctx.checked(section, units::volume(&used));
            let available_volume = ctx.checked(section, units::volume(available));
            if let (Some(used_volume), Some(available_volume)) = (used_volume, available_volume) {
                if used_volume > available_volume {
                    let name = reference.name.clone().unwrap_or_default();
                    ctx.warn(section, NormalizeWarning::VolumeExceedsAvailable(name));
                    reference.volume = Some(available.clone());
                }
            }
        }
        _ => {}
    }
    if let (Some(density), Some(volume)) = (&solution.density, &reference.volume) {
        let density = ctx.checked(section, units::density(density));
        let volume = ctx.checked(section, units::volume(volume));
        if let (Some(density), Some(volume)) = (density, volume) {
            reference.mass = Some(units::mass_measurement(density * volume));
        }
    }
}

/// Looks up the solution a reference points at and brings the reference up to date.
///
/// The returned solution is a copy; the referenced entry itself is never modified.
/// A referenced solution that has components but no solvents or solutes yet is
/// normalized first.
pub fn resolve_reference(
    reference: &mut SolutionComponentReference,
    ctx: &mut NormalizeContext<'_>,
) -> Option<Solution> {
    let section = section_label("SolutionComponentReference", reference.name.as_deref());
    let mut solution = match (&reference.system, &reference.reference) {
        (Some(system), _) => (**system).clone(),
        (None, Some(target)) => match ctx.resolve_solution(target) {
            Ok(Some(solution)) => solution,
            Ok(None) => {
                ctx.warn(&section, NormalizeWarning::UnresolvedReference(target.clone()));
                return None;
            }
            Err(err) => {
                debug!("resolving {target} failed: {err}");
                ctx.warn(&section, NormalizeWarning::UnresolvedReference(target.clone()));
                return None;
            }
        },
        (None, None) => return None,
    };

    let needs_normalizing = !solution.components.is_empty()
        && solution.solvents.is_empty()
        && solution.solutes.is_empty();
    if needs_normalizing {
        ctx.nested(&section, |ctx| solution.normalize(ctx))?;
    }

    apply_reference(reference, &solution, &section, ctx);
    Some(solution)
}

impl Normalize for SolutionComponentReference {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        resolve_reference(self, ctx);
    }
}

/// Sums two optional quantities; a value missing on one side keeps the other.
fn add_measurements<Q: Add<Output = Q>>(
    first: Option<Measurement>,
    second: Option<Measurement>,
    parse: fn(&Measurement) -> Result<Q, units::UnitError>,
    write: fn(Q) -> Measurement,
    section: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Option<Measurement> {
    match (first, second) {
        (Some(first), Some(second)) => {
            let a = ctx.checked(section, parse(&first));
            let b = ctx.checked(section, parse(&second));
            match (a, b) {
                (Some(a), Some(b)) => Some(write(a + b)),
                _ => Some(first),
            }
        }
        (first, None) => first,
        (None, second) => second,
    }
}

/// Merges components that share an identity key, summing their mass and volume.
///
/// Merged components keep the position of their first occurrence; components without
/// a key follow them in their original order and are never merged.
pub fn combine_components(
    components: Vec<SolutionComponent>,
    key: IdentityKey,
    section: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Vec<SolutionComponent> {
    let mut combined: Vec<SolutionComponent> = Vec::with_capacity(components.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut keyless = Vec::new();

    for component in components {
        let Some(id) = component.pure_substance.as_ref().and_then(|s| key.key_of(s)) else {
            keyless.push(component);
            continue;
        };
        match positions.get(&id) {
            Some(&position) => {
                let target = &mut combined[position];
                target.mass = add_measurements(
                    target.mass.take(),
                    component.mass,
                    units::mass,
                    units::mass_measurement,
                    section,
                    ctx,
                );
                target.volume = add_measurements(
                    target.volume.take(),
                    component.volume,
                    units::volume,
                    units::volume_measurement,
                    section,
                    ctx,
                );
            }
            None => {
                positions.insert(id, combined.len());
                combined.push(component);
            }
        }
    }
    combined.extend(keyless);
    combined
}

fn scaled_copy(component: &SolutionComponent, scaler: f64) -> SolutionComponent {
    let mut copy = component.clone();
    copy.volume = copy.volume.map(|v| v.scaled(scaler));
    copy.mass = copy.mass.map(|m| m.scaled(scaler));
    copy
}

/// The fraction of the referenced solution that is used.
fn reference_scaler(
    reference: &SolutionComponentReference,
    solution: &Solution,
    section: &str,
    ctx: &mut NormalizeContext<'_>,
) -> f64 {
    let (Some(used), Some(available)) = (&reference.volume, solution.available_volume()) else {
        return 1.0;
    };
    let used = ctx.checked(section, units::volume(used));
    let available = ctx.checked(section, units::volume(available));
    match (used, available) {
        (Some(used), Some(available)) if available.value > 0.0 => used.value / available.value,
        _ => 1.0,
    }
}

/// Sum of the component volumes. Solvents without a volume are reported.
fn calculate_volume(solution: &Solution, section: &str, ctx: &mut NormalizeContext<'_>) -> Volume {
    let mut total = units::liters(0.0);
    for ingredient in &solution.components {
        match ingredient.volume() {
            Some(volume) if volume.value != 0.0 => {
                if let Some(volume) = ctx.checked(section, units::volume(volume)) {
                    total += volume;
                }
            }
            _ => {
                if let SolutionIngredient::Component(component) = ingredient {
                    if component.component_role == ComponentRole::Solvent {
                        ctx.warn(
                            section,
                            NormalizeWarning::MissingSolventVolume(component_name(component)),
                        );
                    }
                }
            }
        }
    }
    total
}

impl Normalize for Solution {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        let section = section_label("Solution", self.info.name.as_deref());

        // Components first: they may derive their mass or resolve their solution.
        let mut referenced = Vec::with_capacity(self.components.len());
        for ingredient in self.components.iter_mut() {
            referenced.push(match ingredient {
                SolutionIngredient::Component(component) => {
                    component.normalize(ctx);
                    None
                }
                SolutionIngredient::Reference(reference) => resolve_reference(reference, ctx),
            });
        }

        let calculated = calculate_volume(self, &section, ctx);
        self.calculated_volume = Some(units::volume_measurement(calculated));
        let measured = self
            .measured_volume
            .as_ref()
            .and_then(|measured| ctx.checked(&section, units::volume(measured)))
            .filter(|v| v.value > 0.0);
        let volume = measured.or(Some(calculated)).filter(|v| v.value > 0.0);

        let mut solvents = Vec::new();
        let mut solutes = Vec::new();
        for (ingredient, solution) in self.components.iter_mut().zip(&referenced) {
            match ingredient {
                SolutionIngredient::Component(component) => {
                    if component.pure_substance.is_none() || !is_present(component.mass.as_ref()) {
                        ctx.warn(
                            &section,
                            NormalizeWarning::IncompleteComponent {
                                component: component_name(component),
                                role: component.component_role,
                            },
                        );
                        continue;
                    }
                    calculate_molar_concentration(component, volume, &section, ctx);
                    match component.component_role {
                        ComponentRole::Solvent => solvents.push(component.clone()),
                        ComponentRole::Solute => solutes.push(component.clone()),
                    }
                }
                SolutionIngredient::Reference(reference) => {
                    let Some(solution) = solution else {
                        continue;
                    };
                    let scaler = reference_scaler(reference, solution, &section, ctx);
                    solvents.extend(solution.solvents.iter().map(|c| scaled_copy(c, scaler)));
                    solutes.extend(solution.solutes.iter().map(|c| scaled_copy(c, scaler)));
                }
            }
        }

        let key = ctx.config.identity_key;
        self.solvents = combine_components(solvents, key, &section, ctx);
        self.solutes = combine_components(solutes, key, &section, ctx);

        for component in self.solvents.iter_mut().chain(self.solutes.iter_mut()) {
            calculate_molar_concentration(component, volume, &section, ctx);
        }

        let mut total_mass = None;
        for component in self.solvents.iter().chain(&self.solutes) {
            let Some(mass) = &component.mass else {
                continue;
            };
            if let Some(mass) = ctx.checked(&section, units::mass(mass)) {
                total_mass = Some(total_mass.map_or(mass, |total| total + mass));
            }
        }
        self.mass = None;
        self.density = None;
        if let Some(mass) = total_mass.filter(|m| m.value != 0.0) {
            self.mass = Some(units::mass_measurement(mass));
            if let Some(volume) = volume {
                self.density = Some(units::density_measurement(mass / volume));
            }
        }

        self.elemental_composition.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeConfig;
    use proptest::prelude::*;

    const WATER_DA: f64 = 18.010565;
    const NACL_DA: f64 = 57.958622;

    fn water(liters: f64) -> SolutionComponent {
        SolutionComponent {
            name: Some("water".into()),
            component_role: ComponentRole::Solvent,
            volume: Some(Measurement::new(liters, "L")),
            density: Some(Measurement::new(1.0, "kg/L")),
            pure_substance: Some(PureSubstance {
                name: Some("Water".into()),
                molecular_mass: Some(WATER_DA),
                pub_chem_cid: Some(962),
                cas_number: Some("7732-18-5".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn salt(kilograms: f64) -> SolutionComponent {
        SolutionComponent {
            name: Some("NaCl".into()),
            component_role: ComponentRole::Solute,
            mass: Some(Measurement::new(kilograms, "kg")),
            pure_substance: Some(PureSubstance {
                name: Some("Sodium Chloride".into()),
                molecular_mass: Some(NACL_DA),
                pub_chem_cid: Some(5234),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn solution(name: &str, components: Vec<SolutionIngredient>) -> Solution {
        let mut solution = Solution::default();
        solution.info.name = Some(name.into());
        solution.components = components;
        solution
    }

    fn reference_to(starter: &Solution, liters: Option<f64>) -> SolutionIngredient {
        SolutionIngredient::Reference(SolutionComponentReference {
            system: Some(Box::new(starter.clone())),
            volume: liters.map(|l| Measurement::new(l, "L")),
            ..Default::default()
        })
    }

    fn context() -> NormalizeContext<'static> {
        NormalizeContext::new(NormalizeConfig::default())
    }

    fn concentration(component: &SolutionComponent) -> f64 {
        component
            .molar_concentration
            .as_ref()
            .and_then(|c| c.calculated_concentration.as_ref())
            .map(|c| c.value)
            .expect("concentration calculated")
    }

    fn mass_kg(component: &SolutionComponent) -> f64 {
        units::mass(component.mass.as_ref().expect("mass")).unwrap().value
    }

    fn brine() -> Solution {
        let mut brine = solution(
            "brine",
            vec![
                SolutionIngredient::Component(water(0.5)),
                SolutionIngredient::Component(salt(0.01)),
            ],
        );
        brine.normalize(&mut context());
        brine
    }

    #[test]
    fn one_liter_of_water() {
        let mut sol = solution("water", vec![SolutionIngredient::Component(water(1.0))]);
        let mut ctx = context();
        sol.normalize(&mut ctx);

        assert!(ctx.diagnostics.is_empty());
        assert_eq!(sol.solvents.len(), 1);
        assert!((mass_kg(&sol.solvents[0]) - 1.0).abs() < 1e-12);
        assert!((concentration(&sol.solvents[0]) - 55.523).abs() < 1e-3);
        assert_eq!(sol.calculated_volume, Some(Measurement::new(1.0, "L")));
        assert!((sol.mass.as_ref().unwrap().value - 1.0).abs() < 1e-12);
        let density = sol.density.expect("density");
        assert_eq!(density.unit, "kg/L");
        assert!((density.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn salt_in_half_a_liter() {
        let brine = brine();
        assert_eq!(brine.solutes.len(), 1);
        let nacl = &brine.solutes[0];
        assert_eq!((concentration(nacl) * 1000.0).round() / 1000.0, 0.345);
        assert!((mass_kg(nacl) - 0.01).abs() < 1e-15);
        assert!((brine.mass.as_ref().unwrap().value - 0.51).abs() < 1e-12);
    }

    #[test]
    fn dilution_halves_solute_and_keeps_solvent_concentration() {
        let starter = brine();
        let before = starter.clone();
        let mut diluted = solution(
            "diluted brine",
            vec![
                reference_to(&starter, Some(0.1)),
                SolutionIngredient::Component(water(0.1)),
            ],
        );
        diluted.normalize(&mut context());

        assert_eq!(starter, before);
        assert_eq!(diluted.solvents.len(), 1);
        assert_eq!(diluted.solutes.len(), 1);
        let nacl = &diluted.solutes[0];
        assert!((mass_kg(nacl) - 0.002).abs() < 1e-12);
        assert!((concentration(nacl) - concentration(&starter.solutes[0]) / 2.0).abs() < 1e-9);
        assert_eq!((concentration(nacl) * 100.0).round() / 100.0, 0.17);
        assert!((concentration(&diluted.solvents[0]) - 55.523).abs() < 1e-3);
        assert!((mass_kg(&diluted.solvents[0]) - 0.2).abs() < 1e-12);
        assert!((diluted.calculated_volume.as_ref().unwrap().value - 0.2).abs() < 1e-12);
        let SolutionIngredient::Reference(reference) = &diluted.components[0] else {
            panic!("reference expected");
        };
        assert_eq!(reference.system.as_deref(), Some(&before));
    }

    #[test]
    fn reference_without_volume_uses_whole_solution() {
        let starter = brine();
        let mut derived = solution("copy", vec![reference_to(&starter, None)]);
        derived.normalize(&mut context());

        let SolutionIngredient::Reference(reference) = &derived.components[0] else {
            panic!("reference expected");
        };
        assert_eq!(reference.name.as_deref(), Some("brine"));
        assert_eq!(reference.volume, starter.calculated_volume);
        let used_mass = reference.mass.as_ref().unwrap().value;
        assert!((used_mass - 0.51).abs() < 1e-12);
        assert!((mass_kg(&derived.solutes[0]) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn oversized_reference_volume_is_capped() {
        let starter = brine();
        let mut derived = solution("greedy", vec![reference_to(&starter, Some(2.0))]);
        let mut ctx = context();
        derived.normalize(&mut ctx);

        assert!(ctx
            .diagnostics
            .warnings()
            .any(|w| matches!(w, NormalizeWarning::VolumeExceedsAvailable(name) if name == "brine")));
        let SolutionIngredient::Reference(reference) = &derived.components[0] else {
            panic!("reference expected");
        };
        assert_eq!(reference.volume, starter.calculated_volume);
        assert!((mass_kg(&derived.solutes[0]) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn unnormalized_embedded_solution_is_normalized_first() {
        let raw = solution(
            "raw brine",
            vec![
                SolutionIngredient::Component(water(0.5)),
                SolutionIngredient::Component(salt(0.01)),
            ],
        );
        let mut derived = solution("half", vec![reference_to(&raw, Some(0.25))]);
        derived.normalize(&mut context());

        assert!((mass_kg(&derived.solutes[0]) - 0.005).abs() < 1e-12);
        assert!((mass_kg(&derived.solvents[0]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn incomplete_components_are_skipped() {
        let mut no_substance = salt(0.01);
        no_substance.pure_substance = None;
        no_substance.name = Some("mystery".into());
        let mut no_mass = salt(0.0);
        no_mass.mass = None;

        let mut sol = solution(
            "partial",
            vec![
                SolutionIngredient::Component(water(1.0)),
                SolutionIngredient::Component(no_substance),
                SolutionIngredient::Component(no_mass),
            ],
        );
        let mut ctx = context();
        sol.normalize(&mut ctx);

        assert!(sol.solutes.is_empty());
        let skipped = ctx
            .diagnostics
            .warnings()
            .filter(|w| matches!(w, NormalizeWarning::IncompleteComponent { .. }))
            .count();
        assert_eq!(skipped, 2);
        assert!(ctx.diagnostics.entries()[0]
            .warning
            .to_string()
            .contains("'mystery'"));
    }

    #[test]
    fn solute_only_solution_has_no_volume() {
        let mut sol = solution("dry", vec![SolutionIngredient::Component(salt(0.01))]);
        let mut ctx = context();
        sol.normalize(&mut ctx);

        assert_eq!(sol.calculated_volume, Some(Measurement::new(0.0, "L")));
        assert!(sol.density.is_none());
        assert!((sol.mass.as_ref().unwrap().value - 0.01).abs() < 1e-15);
        assert!(ctx
            .diagnostics
            .warnings()
            .any(|w| matches!(w, NormalizeWarning::MissingSolutionVolume(_))));
    }

    #[test]
    fn solvent_without_volume_is_reported() {
        let mut dry_water = water(0.0);
        dry_water.volume = None;
        dry_water.mass = Some(Measurement::new(1.0, "kg"));
        let mut sol = solution(
            "mass only",
            vec![SolutionIngredient::Component(dry_water)],
        );
        sol.measured_volume = Some(Measurement::new(1000.0, "mL"));
        let mut ctx = context();
        sol.normalize(&mut ctx);

        assert!(ctx
            .diagnostics
            .warnings()
            .any(|w| matches!(w, NormalizeWarning::MissingSolventVolume(_))));
        assert!((concentration(&sol.solvents[0]) - 55.523).abs() < 1e-3);
    }

    #[test]
    fn measured_volume_takes_precedence() {
        let mut sol = solution(
            "brine",
            vec![
                SolutionIngredient::Component(water(0.5)),
                SolutionIngredient::Component(salt(0.01)),
            ],
        );
        sol.measured_volume = Some(Measurement::new(250.0, "mL"));
        sol.normalize(&mut context());

        assert_eq!((concentration(&sol.solutes[0]) * 1000.0).round() / 1000.0, 0.690);
        assert!((sol.calculated_volume.as_ref().unwrap().value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_measured_volume_falls_back_to_calculated() {
        let mut sol = solution(
            "brine",
            vec![
                SolutionIngredient::Component(water(0.5)),
                SolutionIngredient::Component(salt(0.01)),
            ],
        );
        sol.measured_volume = Some(Measurement::new(0.0, "L"));
        sol.normalize(&mut context());

        assert_eq!((concentration(&sol.solutes[0]) * 1000.0).round() / 1000.0, 0.345);
        let density = sol.density.as_ref().unwrap();
        assert_eq!(density.unit, "kg/L");
        assert!((density.value - 1.02).abs() < 1e-9);
    }

    #[test]
    fn keyless_components_are_never_merged() {
        let mut anonymous = salt(0.001);
        anonymous.pure_substance.as_mut().unwrap().pub_chem_cid = None;
        let components = vec![
            anonymous.clone(),
            salt(0.002),
            anonymous,
            salt(0.003),
        ];
        let mut ctx = context();
        let merged = combine_components(components, IdentityKey::PubChemCid, "test", &mut ctx);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].pure_substance.as_ref().unwrap().pub_chem_cid, Some(5234));
        assert!((mass_kg(&merged[0]) - 0.005).abs() < 1e-15);
        assert!((mass_kg(&merged[1]) - 0.001).abs() < 1e-15);
        assert!((mass_kg(&merged[2]) - 0.001).abs() < 1e-15);
    }

    #[test]
    fn merge_keeps_single_sided_values() {
        let mut with_volume = water(0.1);
        with_volume.mass = None;
        let mut with_mass = water(0.0);
        with_mass.volume = None;
        with_mass.mass = Some(Measurement::new(50.0, "g"));

        let merged = combine_components(
            vec![with_volume, with_mass],
            IdentityKey::CasNumber,
            "test",
            &mut context(),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].volume, Some(Measurement::new(0.1, "L")));
        assert_eq!(merged[0].mass, Some(Measurement::new(50.0, "g")));
    }

    #[test]
    fn unsupported_unit_counts_as_missing() {
        let mut odd = water(1.0);
        odd.volume = Some(Measurement::new(1.0, "gallon"));
        let mut sol = solution("odd", vec![SolutionIngredient::Component(odd)]);
        let mut ctx = context();
        sol.normalize(&mut ctx);

        assert!(ctx
            .diagnostics
            .warnings()
            .any(|w| matches!(w, NormalizeWarning::UnsupportedUnit(e) if e.unit == "gallon")));
        assert_eq!(sol.calculated_volume, Some(Measurement::new(0.0, "L")));
    }

    #[test]
    fn unresolvable_reference_is_reported() {
        let mut derived = solution(
            "orphan",
            vec![SolutionIngredient::Reference(SolutionComponentReference {
                reference: Some("missing.archive.json".into()),
                volume: Some(Measurement::new(10.0, "mL")),
                ..Default::default()
            })],
        );
        let mut ctx = context();
        derived.normalize(&mut ctx);

        assert!(derived.solvents.is_empty() && derived.solutes.is_empty());
        assert!(ctx
            .diagnostics
            .warnings()
            .any(|w| matches!(w, NormalizeWarning::UnresolvedReference(r) if r == "missing.archive.json")));
    }

    #[test]
    fn substance_name_fills_pure_substance() {
        let mut component = SolutionComponent {
            substance_name: Some("Ethanol".into()),
            volume: Some(Measurement::new(10.0, "mL")),
            density: Some(Measurement::new(0.789, "g/mL")),
            ..Default::default()
        };
        component.normalize(&mut context());
        assert_eq!(
            component.pure_substance.as_ref().and_then(|s| s.name.as_deref()),
            Some("Ethanol")
        );
        let mass = units::mass(component.mass.as_ref().unwrap()).unwrap();
        assert!((mass - units::kilograms(0.00789)).value.abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn concentration_survives_proportional_dilution(
            water_l in 0.05_f64..5.0,
            salt_kg in 0.0001_f64..0.5,
            fraction in 0.01_f64..1.0,
        ) {
            let mut starter = solution(
                "starter",
                vec![
                    SolutionIngredient::Component(water(water_l)),
                    SolutionIngredient::Component(salt(salt_kg)),
                ],
            );
            starter.normalize(&mut context());
            let mut portion = solution("portion", vec![reference_to(&starter, Some(water_l * fraction))]);
            portion.normalize(&mut context());

            let expected = concentration(&starter.solutes[0]);
            let got = concentration(&portion.solutes[0]);
            prop_assert!((got - expected).abs() <= 1e-9 * expected.max(1.0));
            prop_assert!((mass_kg(&portion.solutes[0]) - salt_kg * fraction).abs() <= 1e-12);
        }

        #[test]
        fn split_additions_merge_to_the_same_total(
            parts in prop::collection::vec(0.0001_f64..0.1, 1..6),
        ) {
            let total: f64 = parts.iter().sum();
            let mut components = vec![SolutionIngredient::Component(water(1.0))];
            components.extend(parts.iter().map(|&kg| SolutionIngredient::Component(salt(kg))));
            let mut split = solution("split", components);
            split.normalize(&mut context());

            let mut whole = solution(
                "whole",
                vec![
                    SolutionIngredient::Component(water(1.0)),
                    SolutionIngredient::Component(salt(total)),
                ],
            );
            whole.normalize(&mut context());

            prop_assert_eq!(split.solutes.len(), 1);
            let a = concentration(&split.solutes[0]);
            let b = concentration(&whole.solutes[0]);
            prop_assert!((a - b).abs() <= 1e-9 * b);
        }
    }
}
