//! Callbacks into the data repository that hosts the entries.

use crate::error::MatprocError;
use matproc_schemas::{combinatorial::CombinatorialSamplePosition, solution::Solution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json,
    Yaml,
}

impl FileType {
    /// Picks the file type from an entry file name, `.json` or `.yaml`/`.yml`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".json") {
            Some(FileType::Json)
        } else if filename.ends_with(".yaml") || filename.ends_with(".yml") {
            Some(FileType::Yaml)
        } else {
            None
        }
    }
}

/// Raw file access within the upload an entry belongs to.
pub trait ArchiveContext {
    fn upload_id(&self) -> &str;

    /// Client contexts cannot create entries.
    fn is_client(&self) -> bool {
        false
    }

    fn raw_path_exists(&self, filename: &str) -> bool;

    fn read_raw_file(&self, filename: &str) -> Result<String, MatprocError>;

    fn write_raw_file(&self, filename: &str, contents: &str) -> Result<(), MatprocError>;

    /// Asks the host to (re)process a raw file after it was written.
    fn process_updated_raw_file(&self, filename: &str) -> Result<(), MatprocError>;
}

pub trait EntryResolver {
    /// Loads the solution an entry reference points at.
    fn resolve_solution(&self, reference: &str) -> Result<Solution, MatprocError>;
}

/// A combinatorial sample found by [`SampleSearch`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleHit {
    pub upload_id: String,
    pub entry_id: String,
    pub position: Option<CombinatorialSamplePosition>,
}

pub trait SampleSearch {
    /// All combinatorial sample entries whose library reference points at
    /// `library_entry_id`.
    fn find_combinatorial_samples(
        &self,
        library_entry_id: &str,
    ) -> Result<Vec<SampleHit>, MatprocError>;
}
