/// Spatial carrier of a snapshot: point coordinates plus cell connectivity.
///
/// Cells are kept in the flat VTK layout (`connectivity`, cumulative
/// `offsets`, one `types` code per cell) so a template read from one file can
/// be written back unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshTemplate {
    pub points: Vec<[f64; 3]>,
    pub connectivity: Vec<i64>,
    pub offsets: Vec<i64>,
    pub types: Vec<u8>,
}

impl MeshTemplate {
    pub fn new(
        points: Vec<[f64; 3]>,
        connectivity: Vec<i64>,
        offsets: Vec<i64>,
        types: Vec<u8>,
    ) -> Self {
        Self {
            points,
            connectivity,
            offsets,
            types,
        }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.types.len()
    }
}

/// A point-centered 3-vector field together with the mesh it lives on.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshField {
    pub vectors: Vec<[f64; 3]>,
    pub template: MeshTemplate,
}

impl MeshField {
    pub fn new(vectors: Vec<[f64; 3]>, template: MeshTemplate) -> Self {
        Self { vectors, template }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.vectors.len()
    }
}
