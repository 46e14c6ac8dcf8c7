use super::error::Error;
use crate::model::decomposition::ModeSet;
use nalgebra::DMatrix;

/// Returns the first `count` columns of `u` as spatial modes.
pub fn select_modes(u: &DMatrix<f64>, count: usize) -> Result<ModeSet, Error> {
    let available = u.ncols();
    if count == 0 || count > available {
        return Err(Error::InvalidModeCount {
            requested: count,
            available,
        });
    }

    let modes = u
        .column_iter()
        .take(count)
        .map(|c| c.iter().copied().collect())
        .collect();

    Ok(ModeSet::new(modes))
}
