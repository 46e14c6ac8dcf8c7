use super::types::Channel;
use nalgebra::{DMatrix, DVectorView};

/// One timestep of a scalar field, one value per mesh point.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    values: Vec<f64>,
}

impl FieldSnapshot {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Extracts one Cartesian component from a per-point vector field.
    pub fn from_vectors(vectors: &[[f64; 3]], channel: Channel) -> Self {
        let c = channel.index();
        Self {
            values: vectors.iter().map(|v| v[c]).collect(),
        }
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.values.len()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Dense `(point_count, timestep_count)` matrix; column `t` is snapshot `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotMatrix {
    data: DMatrix<f64>,
}

impl SnapshotMatrix {
    pub(crate) fn from_matrix(data: DMatrix<f64>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn timestep_count(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn column(&self, t: usize) -> Option<DVectorView<'_, f64>> {
        (t < self.timestep_count()).then(|| self.data.column(t))
    }

    #[inline]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn frobenius_norm(&self) -> f64 {
        self.data.norm()
    }
}
