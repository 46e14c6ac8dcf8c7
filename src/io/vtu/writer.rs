use super::scan::escape;
use crate::io::error::Error;
use crate::model::mesh::MeshTemplate;
use std::io::Write;

const VALUES_PER_LINE: usize = 6;

/// Writes `template` with one `Float32` point array per named field.
pub fn write<W: Write>(
    mut writer: W,
    template: &MeshTemplate,
    fields: &[(String, &[f64])],
) -> Result<(), Error> {
    let point_count = template.point_count();
    for (name, values) in fields {
        if values.len() != point_count {
            return Err(Error::FieldLength {
                name: name.clone(),
                expected: point_count,
                found: values.len(),
            });
        }
    }

    writeln!(writer, r#"<?xml version="1.0"?>"#)?;
    writeln!(
        writer,
        r#"<VTKFile type="UnstructuredGrid" version="1.0" byte_order="LittleEndian" header_type="UInt64">"#
    )?;
    writeln!(writer, "  <UnstructuredGrid>")?;
    writeln!(
        writer,
        r#"    <Piece NumberOfPoints="{}" NumberOfCells="{}">"#,
        point_count,
        template.cell_count()
    )?;

    writeln!(writer, "      <PointData>")?;
    for (name, values) in fields {
        let (min, max) = value_range(values);
        writeln!(
            writer,
            r#"        <DataArray type="Float32" Name="{}" format="ascii" RangeMin="{}" RangeMax="{}">"#,
            escape(name),
            min as f32,
            max as f32
        )?;
        write_values(&mut writer, values.iter().map(|&v| v as f32))?;
        writeln!(writer, "        </DataArray>")?;
    }
    writeln!(writer, "      </PointData>")?;
    writeln!(writer, "      <CellData>")?;
    writeln!(writer, "      </CellData>")?;

    writeln!(writer, "      <Points>")?;
    writeln!(
        writer,
        r#"        <DataArray type="Float64" Name="Points" NumberOfComponents="3" format="ascii">"#
    )?;
    write_values(&mut writer, template.points.iter().flatten())?;
    writeln!(writer, "        </DataArray>")?;
    writeln!(writer, "      </Points>")?;

    writeln!(writer, "      <Cells>")?;
    writeln!(
        writer,
        r#"        <DataArray type="Int64" Name="connectivity" format="ascii">"#
    )?;
    write_values(&mut writer, template.connectivity.iter())?;
    writeln!(writer, "        </DataArray>")?;
    writeln!(
        writer,
        r#"        <DataArray type="Int64" Name="offsets" format="ascii">"#
    )?;
    write_values(&mut writer, template.offsets.iter())?;
    writeln!(writer, "        </DataArray>")?;
    writeln!(
        writer,
        r#"        <DataArray type="UInt8" Name="types" format="ascii">"#
    )?;
    write_values(&mut writer, template.types.iter())?;
    writeln!(writer, "        </DataArray>")?;
    writeln!(writer, "      </Cells>")?;

    writeln!(writer, "    </Piece>")?;
    writeln!(writer, "  </UnstructuredGrid>")?;
    writeln!(writer, "</VTKFile>")?;

    Ok(())
}

fn write_values<W: Write, T: std::fmt::Display>(
    writer: &mut W,
    values: impl Iterator<Item = T>,
) -> Result<(), Error> {
    let mut column = 0;
    for value in values {
        if column == 0 {
            write!(writer, "          {value}")?;
        } else {
            write!(writer, " {value}")?;
        }
        column += 1;
        if column == VALUES_PER_LINE {
            writeln!(writer)?;
            column = 0;
        }
    }
    if column != 0 {
        writeln!(writer)?;
    }
    Ok(())
}

fn value_range(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
