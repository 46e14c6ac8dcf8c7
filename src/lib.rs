//! Proper orthogonal decomposition (POD) of one velocity component sampled
//! over a time series of unstructured-mesh snapshots.
//!
//! Each snapshot contributes one column of a `(point_count, timestep_count)`
//! matrix. The reduced singular value decomposition of that matrix yields
//! spatial modes (columns of `U`), their energies (`S`) and temporal
//! coefficients (`Vᵗ`).
//!
//! # Pipeline
//!
//! 1. **Load** – [`load_snapshots`] reads every source through a
//!    [`io::FieldReader`], skipping (and reporting) the ones that are missing
//!    or unreadable.
//! 2. **Assemble** – [`assemble`] stacks snapshots column-wise, rejecting an
//!    empty list or mismatched point counts.
//! 3. **Decompose** – [`decompose_matrix`] computes `U`, `S` (descending) and
//!    `V` via nalgebra.
//! 4. **Select** – [`select_modes`] takes the first `k` columns of `U`.
//! 5. **Export** – [`export_results`] writes the modes onto the mesh and the
//!    three factors as CSV tables.
//!
//! # Quick Start
//!
//! ```
//! use pod_modes::{FieldSnapshot, decompose, select_modes, PodError};
//!
//! // Three timesteps of a 4-point field; the third is a copy of the first.
//! let snapshots = vec![
//!     FieldSnapshot::new(vec![1.0, 2.0, 3.0, 4.0]),
//!     FieldSnapshot::new(vec![0.0, 1.0, 0.0, 1.0]),
//!     FieldSnapshot::new(vec![1.0, 2.0, 3.0, 4.0]),
//! ];
//!
//! let (matrix, decomposition) = decompose(snapshots)?;
//! assert_eq!(matrix.shape(), (4, 3));
//!
//! // Singular values come sorted, the last one vanishes.
//! let s = decomposition.singular_values();
//! assert!(s[0] >= s[1] && s[1] >= s[2]);
//! assert!(s[2] < 1e-10);
//!
//! // Two modes capture the whole field.
//! let modes = select_modes(&decomposition.u, 2)?;
//! assert_eq!(modes.len(), 2);
//! assert!(decomposition.relative_error(&matrix) < 1e-12);
//! # Ok::<(), PodError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: Field and table adapters (ASCII VTU, CSV) and their traits
//! - [`PodConfig`]: Run configuration, loadable from TOML
//!
//! # Data Types
//!
//! - [`Channel`]: Velocity component (`u`, `v` or `w`)
//! - [`FieldSnapshot`]: One timestep of the selected component
//! - [`SnapshotMatrix`]: Snapshots stacked column-wise
//! - [`Decomposition`]: Reduced SVD factors with energy helpers
//! - [`ModeSet`]: Selected spatial modes
//! - [`MeshTemplate`] / [`MeshField`]: Mesh topology and a vector field on it

mod model;
mod pod;

pub mod io;

pub use model::decomposition::{Decomposition, ModeSet};
pub use model::mesh::{MeshField, MeshTemplate};
pub use model::snapshot::{FieldSnapshot, SnapshotMatrix};
pub use model::types::{Channel, ParseChannelError};

pub use pod::{
    DEFAULT_FIELD_NAME, LoadedSnapshots, OutputPaths, PodConfig, SourceReport, SourceStatus,
    SvdOptions, assemble, decompose, decompose_matrix, decompose_with, export_results,
    load_snapshots, load_source, select_modes,
};

pub use pod::Error as PodError;
