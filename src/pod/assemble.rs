use super::error::Error;
use crate::model::snapshot::{FieldSnapshot, SnapshotMatrix};
use log::debug;
use nalgebra::DMatrix;

/// Stacks snapshots column-wise into a `(point_count, timestep_count)` matrix.
///
/// Column order follows input order. All snapshots must share the point
/// count of the first one.
pub fn assemble(snapshots: Vec<FieldSnapshot>) -> Result<SnapshotMatrix, Error> {
    let Some(first) = snapshots.first() else {
        return Err(Error::EmptyInput);
    };
    let point_count = first.point_count();

    if let Some((index, snapshot)) = snapshots
        .iter()
        .enumerate()
        .find(|(_, s)| s.point_count() != point_count)
    {
        return Err(Error::shape_mismatch(
            index,
            point_count,
            snapshot.point_count(),
        ));
    }

    let timestep_count = snapshots.len();
    debug!("assembling {point_count} x {timestep_count} snapshot matrix");

    // Column-major storage: each snapshot fills one contiguous column.
    let data = DMatrix::from_iterator(
        point_count,
        timestep_count,
        snapshots.into_iter().flat_map(FieldSnapshot::into_values),
    );

    Ok(SnapshotMatrix::from_matrix(data))
}
