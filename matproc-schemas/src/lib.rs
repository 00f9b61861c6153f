//! Data declarations for materials-processing lab entries: samples, solutions,
//! deposition processes and combinatorial libraries.

pub mod combinatorial;
pub mod crystal;
pub mod cvd;
pub mod file_formats;
pub mod geometry;
pub mod measurement;
pub mod process;
pub mod pvd;
pub mod sample;
pub mod solution;
pub mod substance;
pub mod system;
pub mod vapor_deposition;
pub mod workflow;
