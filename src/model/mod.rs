//! Core data structures flowing through the decomposition pipeline.
//!
//! - [`types`] – Velocity component selector.
//! - [`mesh`] – Mesh topology templates and point-centered vector fields as read from disk.
//! - [`snapshot`] – Per-timestep scalar samples and the assembled snapshot matrix.
//! - [`decomposition`] – Singular value decomposition results and the selected spatial modes.
//!
//! Mesh-level types ([`MeshField`]) stay separate from the numeric types
//! ([`SnapshotMatrix`]) so the decomposition core never depends on a file format.
//!
//! [`MeshField`]: mesh::MeshField
//! [`SnapshotMatrix`]: snapshot::SnapshotMatrix

pub mod decomposition;
pub mod mesh;
pub mod snapshot;
pub mod types;
