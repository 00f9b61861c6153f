//! An upload kept in a directory on the local filesystem.

use crate::{
    archive::{entry_id, parse_entry_reference},
    entry::load_entry,
    error::MatprocError,
    host::{ArchiveContext, EntryResolver, SampleHit, SampleSearch},
};
use matproc_schemas::{file_formats::EntryData, solution::Solution};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

const ENTRY_SUFFIXES: [&str; 3] = [".archive.json", ".archive.yaml", ".archive.yml"];

/// Raw files of one upload, stored under `root`. Entry ids are derived from the
/// file paths relative to `root`.
#[derive(Debug, Clone)]
pub struct LocalUpload {
    root: PathBuf,
    upload_id: String,
}

impl LocalUpload {
    pub fn new(root: impl Into<PathBuf>, upload_id: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            upload_id: upload_id.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn entry_id_of(&self, filename: &str) -> String {
        entry_id(&self.upload_id, filename)
    }

    /// Relative file names of every entry file in the upload, sorted.
    pub fn entry_files(&self) -> Result<Vec<String>, MatprocError> {
        let mut files = Vec::new();
        collect_entry_files(&self.root, &self.root, &mut files)?;
        files.sort();
        Ok(files)
    }

    /// Relative file name of the entry a reference points at.
    ///
    /// Accepts `../uploads/{upload}/archive/{entry_id}#data` references of this upload
    /// as well as plain paths relative to the upload root.
    pub fn locate(&self, reference: &str) -> Result<String, MatprocError> {
        if let Some((upload_id, id)) = parse_entry_reference(reference) {
            if upload_id != self.upload_id {
                return Err(MatprocError::UnresolvableReference(reference.to_string()));
            }
            return self
                .entry_files()?
                .into_iter()
                .find(|filename| self.entry_id_of(filename) == id)
                .ok_or_else(|| MatprocError::EntryNotFound(id.to_string()));
        }
        let path = reference.split('#').next().unwrap_or_default();
        if !path.is_empty() && self.raw_path(path).is_file() {
            Ok(path.to_string())
        } else {
            Err(MatprocError::UnresolvableReference(reference.to_string()))
        }
    }

    /// Entry id of the entry a library reference points at, when it is in this upload.
    fn referenced_entry_id(&self, reference: &str) -> Option<String> {
        match parse_entry_reference(reference) {
            Some((upload_id, id)) => (upload_id == self.upload_id).then(|| id.to_string()),
            None => {
                let path = reference.split('#').next()?;
                (!path.is_empty()).then(|| self.entry_id_of(path))
            }
        }
    }
}

fn collect_entry_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<(), MatprocError> {
    let io_error = |e| MatprocError::FileIO(dir.display().to_string(), e);
    for item in fs::read_dir(dir).map_err(io_error)? {
        let path = item.map_err(io_error)?.path();
        if path.is_dir() {
            collect_entry_files(root, &path, out)?;
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if ENTRY_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            out.push(name);
        }
    }
    Ok(())
}

impl ArchiveContext for LocalUpload {
    fn upload_id(&self) -> &str {
        &self.upload_id
    }

    fn raw_path_exists(&self, filename: &str) -> bool {
        self.raw_path(filename).exists()
    }

    fn read_raw_file(&self, filename: &str) -> Result<String, MatprocError> {
        let path = self.raw_path(filename);
        fs::read_to_string(&path).map_err(|e| MatprocError::FileIO(path.display().to_string(), e))
    }

    fn write_raw_file(&self, filename: &str, contents: &str) -> Result<(), MatprocError> {
        let path = self.raw_path(filename);
        let io_error = |e| MatprocError::FileIO(path.display().to_string(), e);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&path, contents).map_err(io_error)
    }

    /// Re-reads the written file so that malformed entries surface immediately.
    fn process_updated_raw_file(&self, filename: &str) -> Result<(), MatprocError> {
        let entry = load_entry(&self.raw_path(filename))?;
        debug!(
            filename,
            kind = entry.data.kind(),
            entry_id = %self.entry_id_of(filename),
            "processed raw file"
        );
        Ok(())
    }
}

impl EntryResolver for LocalUpload {
    fn resolve_solution(&self, reference: &str) -> Result<Solution, MatprocError> {
        let filename = self.locate(reference)?;
        match load_entry(&self.raw_path(&filename))?.data {
            EntryData::Solution(solution) => Ok(solution),
            other => Err(MatprocError::UnexpectedEntryKind {
                path: filename,
                expected: "Solution",
                found: other.kind(),
            }),
        }
    }
}

impl SampleSearch for LocalUpload {
    fn find_combinatorial_samples(
        &self,
        library_entry_id: &str,
    ) -> Result<Vec<SampleHit>, MatprocError> {
        let mut hits = Vec::new();
        for filename in self.entry_files()? {
            let entry = match load_entry(&self.raw_path(&filename)) {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(filename = %filename, "skipping unreadable entry: {err}");
                    continue;
                }
            };
            let Some(sample) = entry.data.as_combinatorial_sample() else {
                continue;
            };
            let references_library = sample
                .library
                .as_ref()
                .and_then(|library| library.reference.as_deref())
                .and_then(|reference| self.referenced_entry_id(reference))
                .is_some_and(|id| id == library_entry_id);
            if references_library {
                hits.push(SampleHit {
                    upload_id: self.upload_id.clone(),
                    entry_id: self.entry_id_of(&filename),
                    position: sample.position,
                });
            }
        }
        Ok(hits)
    }
}
