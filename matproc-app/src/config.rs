use anyhow::{Context, Result};
use matproc_core::{local::LocalUpload, normalize::IdentityKey, NormalizeConfig};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_FILE: &str = "matproc.yaml";

/// Pixel size of the rendered figures.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Settings of a `matproc` run, read from `matproc.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the raw files of the upload.
    pub upload_dir: PathBuf,
    pub upload_id: String,
    pub identity_key: IdentityKey,
    /// Where reports and figures are written.
    pub output_dir: PathBuf,
    pub plot: PlotConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("."),
            upload_id: "local".to_string(),
            identity_key: IdentityKey::default(),
            output_dir: PathBuf::from("./output"),
            plot: PlotConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path`, or `matproc.yaml` in the working directory when it exists.
    /// Without either, the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => PathBuf::from(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        println!("Loading configuration from '{}'...", path.display());
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))
    }

    pub fn normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            identity_key: self.identity_key,
        }
    }

    pub fn upload(&self) -> LocalUpload {
        LocalUpload::new(&self.upload_dir, &self.upload_id)
    }

    /// Creates the output directory and returns it.
    pub fn output_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory: {:?}", self.output_dir)
        })?;
        Ok(&self.output_dir)
    }
}

/// Expands directories into the entry files they contain; files are kept as given.
pub fn collect_entry_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for path in paths {
        if !path.is_dir() {
            entries.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for item in fs::read_dir(path)
            .with_context(|| format!("Failed to read directory: {:?}", path))?
        {
            let item = item?.path();
            let is_entry = item.is_file()
                && item
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.contains(".archive."));
            if is_entry {
                found.push(item);
            }
        }
        found.sort();
        entries.extend(found);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("upload_id: ikz-42\nidentity_key: cas_number\nplot: { width: 640 }\n")
                .unwrap();
        assert_eq!(config.upload_id, "ikz-42");
        assert_eq!(config.identity_key, IdentityKey::CasNumber);
        assert_eq!(config.upload_dir, PathBuf::from("."));
        assert_eq!(config.plot.width, 640);
        assert_eq!(config.plot.height, 768);
    }

    #[test]
    fn directories_expand_to_entry_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.archive.yaml"), "").unwrap();
        fs::write(dir.path().join("a.archive.json"), "").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();
        let explicit = PathBuf::from("other.archive.yaml");

        let paths = collect_entry_paths(&[dir.path().to_path_buf(), explicit.clone()]).unwrap();
        assert_eq!(
            paths,
            vec![
                dir.path().join("a.archive.json"),
                dir.path().join("b.archive.yaml"),
                explicit
            ]
        );
    }
}
