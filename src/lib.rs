//! Volume-preserving denting of a soft mesh against a rigid hard mesh.
//!
//! Soft vertices that penetrate the hard mesh are pushed back onto its
//! surface, and the volume lost in the dent is pushed into a ring of
//! surrounding vertices. See [`DeformPipeline`] for the entry point.

pub mod config;
pub mod error;
pub mod math;
pub mod mesh;
pub mod operations;
pub mod pipeline;
pub mod report;
pub mod spatial;
pub mod target;

pub use config::DentConfig;
pub use error::{DentError, Result};
pub use mesh::{Mesh, MeshInstance};
pub use pipeline::{DeformPipeline, Deformation};
pub use report::DentReport;
pub use target::DeformationTarget;
