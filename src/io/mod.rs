//! File adapters for mesh snapshots and tabular results.
//!
//! The decomposition core only sees the three traits defined here:
//!
//! - [`FieldReader`] – load a point-centered vector field and its mesh.
//! - [`FieldWriter`] – attach named scalar fields to a mesh and persist it.
//! - [`TableWriter`] – persist a dense numeric matrix.
//!
//! [`VtuReader`]/[`VtuWriter`] implement the field traits for ASCII VTK
//! UnstructuredGrid files and [`CsvTableWriter`] implements [`TableWriter`].

use crate::model::mesh::{MeshField, MeshTemplate};
use nalgebra::DMatrix;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub mod error;
pub mod table;
pub mod vtu;

pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Vtu,
    Csv,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Vtu => write!(f, "VTU"),
            Format::Csv => write!(f, "CSV"),
        }
    }
}

/// Source of per-timestep vector fields.
pub trait FieldReader {
    /// Reads the point-centered vector field `field` from `source`.
    ///
    /// A missing source must surface as an [`Error::Io`] of kind
    /// `NotFound`; a source without the field as [`Error::MissingField`].
    fn read_field(&self, source: &Path, field: &str) -> Result<MeshField, Error>;
}

/// Sink for scalar fields attached to a mesh topology.
pub trait FieldWriter {
    /// Writes `template` with one single-component point array per entry of
    /// `fields`, in order.
    fn write_fields(
        &self,
        dest: &Path,
        template: &MeshTemplate,
        fields: &[(String, &[f64])],
    ) -> Result<(), Error>;
}

/// Sink for dense numeric tables.
pub trait TableWriter {
    fn write_table(&self, dest: &Path, matrix: &DMatrix<f64>) -> Result<(), Error>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VtuReader;

impl FieldReader for VtuReader {
    fn read_field(&self, source: &Path, field: &str) -> Result<MeshField, Error> {
        let file = File::open(source)?;
        vtu::reader::read(BufReader::new(file), field)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VtuWriter;

impl FieldWriter for VtuWriter {
    fn write_fields(
        &self,
        dest: &Path,
        template: &MeshTemplate,
        fields: &[(String, &[f64])],
    ) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(dest)?);
        vtu::writer::write(&mut writer, template, fields)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableWriter;

impl TableWriter for CsvTableWriter {
    fn write_table(&self, dest: &Path, matrix: &DMatrix<f64>) -> Result<(), Error> {
        let file = File::create(dest)?;
        table::writer::write(BufWriter::new(file), matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn vtu_reader_reports_missing_file_as_not_found() {
        let dir = tempdir().unwrap();
        let err = VtuReader
            .read_field(&dir.path().join("time_0_0_0.vtu"), "U")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn vtu_file_round_trip_through_adapters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("modes.vtu");
        let template = MeshTemplate::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
            vec![3],
            vec![5],
        );
        let mode = [0.5, -0.25, 0.125];

        VtuWriter
            .write_fields(&path, &template, &[("Mode1".to_string(), &mode[..])])
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#"Name="Mode1""#));

        let reread = vtu::reader::read_template(text.as_bytes()).unwrap();
        assert_eq!(reread, template);
    }

    #[test]
    fn csv_writer_reports_missing_directory() {
        let dir = tempdir().unwrap();
        let err = CsvTableWriter
            .write_table(&dir.path().join("nope").join("U.csv"), &DMatrix::zeros(1, 1))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
