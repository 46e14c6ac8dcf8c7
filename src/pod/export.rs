use super::config::OutputPaths;
use super::error::Error;
use crate::io::{FieldWriter, TableWriter};
use crate::model::decomposition::{Decomposition, ModeSet};
use crate::model::mesh::MeshTemplate;
use log::info;
use nalgebra::DMatrix;
use std::path::PathBuf;

/// Writes the modes file, then `U`, `S` and `Vᵗ` tables, in that order.
///
/// Stops at the first failing artifact. Artifacts written before the
/// failure are left in place.
pub fn export_results<F: FieldWriter, T: TableWriter>(
    field_writer: &F,
    table_writer: &T,
    outputs: &OutputPaths,
    template: &MeshTemplate,
    modes: &ModeSet,
    decomposition: &Decomposition,
) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::with_capacity(4);

    field_writer
        .write_fields(&outputs.modes, template, &modes.named())
        .map_err(|e| Error::write(&outputs.modes, e))?;
    info!("wrote {} modes to {}", modes.len(), outputs.modes.display());
    written.push(outputs.modes.clone());

    let s = DMatrix::from_column_slice(decomposition.rank(), 1, decomposition.singular_values());
    let vt = decomposition.vt();
    let tables = [
        (&outputs.u, &decomposition.u),
        (&outputs.s, &s),
        (&outputs.vt, &vt),
    ];
    for (path, matrix) in tables {
        table_writer
            .write_table(path, matrix)
            .map_err(|e| Error::write(path, e))?;
        info!("wrote {}", path.display());
        written.push(path.clone());
    }

    Ok(written)
}
