use super::snapshot::SnapshotMatrix;
use nalgebra::{DMatrix, DVector};

/// Reduced singular value decomposition `M = U·diag(S)·Vᵗ`.
///
/// With `r = min(point_count, timestep_count)`, `u` is `(point_count, r)`,
/// `s` holds `r` non-negative values in descending order and `v` is
/// `(timestep_count, r)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub u: DMatrix<f64>,
    pub s: DVector<f64>,
    pub v: DMatrix<f64>,
}

impl Decomposition {
    #[inline]
    pub fn rank(&self) -> usize {
        self.s.len()
    }

    #[inline]
    pub fn singular_values(&self) -> &[f64] {
        self.s.as_slice()
    }

    /// Right singular vectors as rows, `(r, timestep_count)`.
    pub fn vt(&self) -> DMatrix<f64> {
        self.v.transpose()
    }

    /// Fraction of the total energy `Σ S²` carried by each singular triplet.
    pub fn energy_fractions(&self) -> Vec<f64> {
        let total: f64 = self.s.iter().map(|s| s * s).sum();
        if total <= 0.0 {
            return vec![0.0; self.rank()];
        }
        self.s.iter().map(|s| s * s / total).collect()
    }

    pub fn cumulative_energy(&self) -> Vec<f64> {
        self.energy_fractions()
            .into_iter()
            .scan(0.0, |acc, e| {
                *acc += e;
                Some(*acc)
            })
            .collect()
    }

    pub fn reconstruct(&self) -> DMatrix<f64> {
        let mut scaled = self.u.clone();
        for (mut col, &s) in scaled.column_iter_mut().zip(self.s.iter()) {
            col *= s;
        }
        scaled * self.v.transpose()
    }

    /// `‖M − U·diag(S)·Vᵗ‖_F / ‖M‖_F`, or the absolute residual when `‖M‖_F = 0`.
    pub fn relative_error(&self, matrix: &SnapshotMatrix) -> f64 {
        let residual = (matrix.as_matrix() - self.reconstruct()).norm();
        let norm = matrix.frobenius_norm();
        if norm > 0.0 { residual / norm } else { residual }
    }
}

/// The leading spatial modes, `modes[i]` being column `i` of `U`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSet {
    modes: Vec<Vec<f64>>,
}

impl ModeSet {
    pub(crate) fn new(modes: Vec<Vec<f64>>) -> Self {
        Self { modes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[f64]> {
        self.modes.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.modes.iter().map(Vec::as_slice)
    }

    /// Modes paired with their export names `Mode1`, `Mode2`, ...
    pub fn named(&self) -> Vec<(String, &[f64])> {
        self.iter()
            .enumerate()
            .map(|(i, m)| (format!("Mode{}", i + 1), m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn diagonal_decomposition() -> Decomposition {
        Decomposition {
            u: DMatrix::identity(3, 2),
            s: DVector::from_vec(vec![3.0, 4.0]),
            v: DMatrix::identity(2, 2),
        }
    }

    #[test]
    fn energy_fractions_sum_to_one() {
        let d = diagonal_decomposition();
        let e = d.energy_fractions();
        assert_abs_diff_eq!(e[0], 9.0 / 25.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e[1], 16.0 / 25.0, epsilon = 1e-12);
        let c = d.cumulative_energy();
        assert_abs_diff_eq!(c[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn energy_fractions_of_zero_spectrum() {
        let d = Decomposition {
            u: DMatrix::identity(2, 2),
            s: DVector::zeros(2),
            v: DMatrix::identity(2, 2),
        };
        assert_eq!(d.energy_fractions(), vec![0.0, 0.0]);
    }

    #[test]
    fn reconstruct_scales_columns() {
        let d = diagonal_decomposition();
        let m = d.reconstruct();
        assert_eq!(m.shape(), (3, 2));
        assert_abs_diff_eq!(m[(0, 0)], 3.0);
        assert_abs_diff_eq!(m[(1, 1)], 4.0);
        assert_abs_diff_eq!(m[(2, 1)], 0.0);
        assert_eq!(d.vt().shape(), (2, 2));
    }

    #[test]
    fn mode_set_names_are_one_based() {
        let modes = ModeSet::new(vec![vec![1.0], vec![2.0]]);
        let named = modes.named();
        assert_eq!(named[0].0, "Mode1");
        assert_eq!(named[1].0, "Mode2");
        assert_eq!(named[1].1, &[2.0]);
    }
}
