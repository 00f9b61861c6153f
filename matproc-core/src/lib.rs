//! Normalization of materials-processing lab entries: solution chemistry, deposition
//! workflows, combinatorial library figures, and the creation of derived entries.

pub mod archive;
pub mod combinatorial;
pub mod deposition;
pub mod diagnostics;
pub mod entry;
pub mod error;
pub mod host;
pub mod local;
pub mod normalize;
pub mod preparation;
pub mod report;
pub mod sample;
pub mod solution;
pub mod units;

pub use error::MatprocError;
pub use normalize::{Normalize, NormalizeConfig, NormalizeContext};
