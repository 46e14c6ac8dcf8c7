mod assemble;
mod config;
mod error;
mod export;
mod loader;
mod select;
mod svd;

pub use assemble::assemble;
pub use config::{DEFAULT_FIELD_NAME, OutputPaths, PodConfig};
pub use error::Error;
pub use export::export_results;
pub use loader::{LoadedSnapshots, SourceReport, SourceStatus, load_snapshots, load_source};
pub use select::select_modes;
pub use svd::{SvdOptions, decompose_matrix, decompose_with};

use crate::model::decomposition::Decomposition;
use crate::model::snapshot::{FieldSnapshot, SnapshotMatrix};
use log::{debug, info};

/// Assembles `snapshots` column by column and decomposes the result.
///
/// The assembled matrix is returned alongside its decomposition so callers
/// can measure the reconstruction error.
pub fn decompose(snapshots: Vec<FieldSnapshot>) -> Result<(SnapshotMatrix, Decomposition), Error> {
    let matrix = assemble(snapshots)?;
    let (points, timesteps) = matrix.shape();
    info!("assembled snapshot matrix: {points} points x {timesteps} timesteps");

    let decomposition = decompose_matrix(&matrix)?;
    info!("decomposition rank: {}", decomposition.rank());
    debug!(
        "U {:?}, S {}, V {:?}",
        decomposition.u.shape(),
        decomposition.s.len(),
        decomposition.v.shape()
    );

    Ok((matrix, decomposition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn decompose_returns_matrix_and_factors() {
        let (matrix, d) = decompose(vec![
            FieldSnapshot::new(vec![1.0, 0.0, 2.0]),
            FieldSnapshot::new(vec![0.0, 1.0, 1.0]),
        ])
        .unwrap();

        assert_eq!(matrix.shape(), (3, 2));
        assert_eq!(d.u.shape(), (3, 2));
        assert_eq!(d.vt().shape(), (2, 2));
        assert!(d.s[0] >= d.s[1]);
        assert_abs_diff_eq!(d.relative_error(&matrix), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn decompose_propagates_assembly_errors() {
        assert!(matches!(decompose(Vec::new()), Err(Error::EmptyInput)));
        assert!(matches!(
            decompose(vec![
                FieldSnapshot::new(vec![1.0, 2.0]),
                FieldSnapshot::new(vec![1.0]),
            ]),
            Err(Error::ShapeMismatch { index: 1, .. })
        ));
    }
}
