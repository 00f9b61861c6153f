use crate::config::AppConfig;
use crate::plotting;
use anyhow::{bail, Context, Result};
use matproc_core::{
    diagnostics::{Diagnostic, Severity},
    entry::{load_entry, save_entry},
    host::EntryResolver,
    local::LocalUpload,
    report::ComponentReportWriter,
    Normalize, NormalizeContext,
};
use matproc_schemas::{
    file_formats::{EntryData, EntryFile},
    solution::Solution,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// A normalized entry together with what normalization had to say about it.
pub struct NormalizedEntry {
    pub entry: EntryFile,
    pub diagnostics: Vec<Diagnostic>,
}

/// File name up to the first dot, e.g. `brine` for `brine.archive.yaml`.
fn stem(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .unwrap_or("entry")
        .to_string()
}

/// Entry id of `path` when it lies inside the upload directory.
fn entry_id_for(upload: &LocalUpload, path: &Path) -> Option<String> {
    let root = fs::canonicalize(upload.root()).ok()?;
    let file = fs::canonicalize(path).ok()?;
    let relative = file.strip_prefix(&root).ok()?;
    let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Some(upload.entry_id_of(&name))
}

pub fn normalize_file(config: &AppConfig, upload: &LocalUpload, path: &Path) -> Result<NormalizedEntry> {
    let mut entry =
        load_entry(path).with_context(|| format!("Failed to load entry {:?}", path))?;
    let mut ctx = NormalizeContext::new(config.normalize_config()).with_host(upload);
    if let Some(entry_id) = entry_id_for(upload, path) {
        debug!(entry_id = %entry_id, "normalizing {}", path.display());
        ctx = ctx.with_entry_id(entry_id);
    }
    entry.normalize(&mut ctx);
    Ok(NormalizedEntry {
        entry,
        diagnostics: ctx.diagnostics.take(),
    })
}

fn print_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let level = match diagnostic.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!(
            "  - {} [{}] {}: {}",
            path.display(),
            level,
            diagnostic.section,
            diagnostic.warning
        );
    }
}

/// Normalizes every entry and writes it back, or into `out` when given.
pub fn run_normalize(config: &AppConfig, paths: &[PathBuf], out: Option<&Path>) -> Result<()> {
    println!("\n--- [Normalize] {} entries ---", paths.len());
    let upload = config.upload();
    let mut warnings = 0;

    for path in paths {
        let normalized = normalize_file(config, &upload, path)?;
        print_diagnostics(path, &normalized.diagnostics);
        warnings += normalized.diagnostics.len();

        let target = match (out, path.file_name()) {
            (Some(out), Some(name)) => {
                fs::create_dir_all(out)
                    .with_context(|| format!("Failed to create output directory: {:?}", out))?;
                out.join(name)
            }
            _ => path.clone(),
        };
        save_entry(&target, &normalized.entry)?;
        println!(
            "  {} ({}) -> {}",
            path.display(),
            normalized.entry.data.kind(),
            target.display()
        );
    }

    println!("Normalized {} entries with {} findings.", paths.len(), warnings);
    Ok(())
}

fn write_component_report(config: &AppConfig, name: &str, solution: &Solution) -> Result<PathBuf> {
    let path = config.output_dir()?.join(format!("{name}_components.csv"));
    let mut report = ComponentReportWriter::create(&path, config.identity_key)?;
    let rows = report.write_solution(solution)?;
    println!("  Wrote {} component rows to '{}'.", rows, path.display());
    Ok(path)
}

/// Normalizes a solution preparation, which creates its solution entry in the upload.
pub fn run_prepare(config: &AppConfig, path: &Path) -> Result<()> {
    println!("\n--- [Prepare] {} ---", path.display());
    let upload = config.upload();
    let normalized = normalize_file(config, &upload, path)?;
    print_diagnostics(path, &normalized.diagnostics);

    let EntryData::SolutionPreparation(preparation) = &normalized.entry.data else {
        bail!(
            "{:?} holds a {} entry, expected a SolutionPreparation",
            path,
            normalized.entry.data.kind()
        );
    };
    let Some(reference) = preparation.solution.as_ref().and_then(|s| s.reference.clone()) else {
        println!("  No solution was created: the preparation adds no components.");
        return Ok(());
    };
    save_entry(path, &normalized.entry)?;

    let solution = upload
        .resolve_solution(&reference)
        .with_context(|| format!("Failed to read back the created solution {reference}"))?;
    println!(
        "  Created '{}' ({} solvents, {} solutes) as {}",
        solution.info.name.as_deref().unwrap_or("unnamed solution"),
        solution.solvents.len(),
        solution.solutes.len(),
        reference
    );
    write_component_report(config, &stem(path), &solution)?;
    Ok(())
}

/// Normalizes a solution and writes its component report and composition chart.
pub fn run_report(config: &AppConfig, path: &Path) -> Result<()> {
    println!("\n--- [Report] {} ---", path.display());
    let upload = config.upload();
    let normalized = normalize_file(config, &upload, path)?;
    print_diagnostics(path, &normalized.diagnostics);

    let EntryData::Solution(solution) = &normalized.entry.data else {
        bail!(
            "{:?} holds a {} entry, expected a Solution",
            path,
            normalized.entry.data.kind()
        );
    };
    let name = stem(path);
    write_component_report(config, &name, solution)?;
    let chart = plotting::plot_solution_composition(config.output_dir()?, &name, solution, config.plot)?;
    println!("  Composition chart saved to '{}'.", chart.display());
    Ok(())
}

/// Normalizes a combinatorial library and renders its sample map.
pub fn run_plot_library(config: &AppConfig, path: &Path) -> Result<()> {
    println!("\n--- [Plot library] {} ---", path.display());
    let upload = config.upload();
    let normalized = normalize_file(config, &upload, path)?;
    print_diagnostics(path, &normalized.diagnostics);

    let EntryData::CombinatorialLibrary(library) = &normalized.entry.data else {
        bail!(
            "{:?} holds a {} entry, expected a CombinatorialLibrary",
            path,
            normalized.entry.data.kind()
        );
    };
    let Some(figure) = library.figures.first() else {
        println!("  No figure: the library is not part of the upload directory.");
        return Ok(());
    };
    if figure.points.is_empty() {
        println!("  Warning: no samples reference this library.");
        return Ok(());
    }
    let image = plotting::plot_scatter_figure(config.output_dir()?, &stem(path), figure, config.plot)?;
    println!(
        "  {} samples plotted to '{}'.",
        figure.points.len(),
        image.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matproc_core::normalize::IdentityKey;
    use tempfile::tempdir;

    fn config_for(dir: &Path) -> AppConfig {
        AppConfig {
            upload_dir: dir.join("upload"),
            upload_id: "test-upload".to_string(),
            identity_key: IdentityKey::PubChemCid,
            output_dir: dir.join("out"),
            plot: Default::default(),
        }
    }

    const PREPARATION: &str = r#"
schema_version: "1.0"
data:
  type: SolutionPreparation
  solution_name: Stock
  steps:
    - type: add_solution_component
      solution_component:
        type: component
        name: water
        component_role: Solvent
        volume: { value: 250, unit: mL }
        density: { value: 1, unit: g/mL }
        pure_substance: { name: Water, molecular_mass: 18.010565, pub_chem_cid: 962 }
"#;

    #[test]
    fn prepare_creates_the_solution_and_a_report() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());
        fs::create_dir_all(&config.upload_dir).unwrap();
        let path = config.upload_dir.join("stock_prep.archive.yaml");
        fs::write(&path, PREPARATION).unwrap();

        run_prepare(&config, &path).unwrap();

        assert!(config.upload_dir.join("stock.archive.json").is_file());
        let report = fs::read_to_string(dir.path().join("out/stock_prep_components.csv")).unwrap();
        assert_eq!(report.lines().count(), 2);
        assert!(report.lines().nth(1).unwrap().starts_with("Stock,Solvent,water,962,"));

        let EntryData::SolutionPreparation(saved) = load_entry(&path).unwrap().data else {
            panic!("preparation expected");
        };
        assert!(saved.solution.and_then(|s| s.reference).is_some());
    }

    #[test]
    fn wrong_entry_kind_is_an_error() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());
        fs::create_dir_all(&config.upload_dir).unwrap();
        let path = config.upload_dir.join("film.archive.yaml");
        fs::write(&path, "schema_version: '1.0'\ndata:\n  type: ThinFilm\n").unwrap();

        let err = run_report(&config, &path).unwrap_err();
        assert!(err.to_string().contains("expected a Solution"));
    }

    #[test]
    fn normalize_writes_into_the_output_directory() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());
        fs::create_dir_all(&config.upload_dir).unwrap();
        let path = config.upload_dir.join("run.archive.yaml");
        fs::write(&path, "schema_version: '1.0'\ndata:\n  type: ThermalEvaporation\n").unwrap();
        let out = dir.path().join("normalized");

        run_normalize(&config, &[path.clone()], Some(&out)).unwrap();

        let EntryData::ThermalEvaporation(run) = load_entry(&out.join("run.archive.yaml")).unwrap().data
        else {
            panic!("thermal evaporation expected");
        };
        assert_eq!(run.process.method.as_deref(), Some("Thermal Evaporation"));
    }

    #[test]
    fn stems() {
        assert_eq!(stem(Path::new("a/brine_1.archive.yaml")), "brine_1");
    }
}
