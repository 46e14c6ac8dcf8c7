use super::scan::{Tag, TagKind, TagScanner, character_data};
use crate::io::{Format, error::Error};
use crate::model::mesh::{MeshField, MeshTemplate};
use std::borrow::Cow;
use std::io::BufRead;

/// A point-centered data array, stored tuple-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PointArray {
    pub name: String,
    pub components: usize,
    pub values: Vec<f64>,
}

/// Topology plus every point-centered array of a `.vtu` file.
#[derive(Debug, Clone, PartialEq)]
pub struct VtuDocument {
    pub template: MeshTemplate,
    pub point_data: Vec<PointArray>,
}

impl VtuDocument {
    pub fn point_array(&self, name: &str) -> Option<&PointArray> {
        self.point_data.iter().find(|a| a.name == name)
    }
}

/// Reads the mesh and the 3-component point field `field`.
pub fn read<R: BufRead>(reader: R, field: &str) -> Result<MeshField, Error> {
    let text = read_text(reader)?;
    let raw = scan_document(&text)?;
    let template = raw.template()?;

    let array = raw
        .point_data
        .iter()
        .find(|a| a.name == field)
        .ok_or_else(|| Error::missing_field(field))?;
    if array.components < 3 {
        return Err(Error::missing_field(field));
    }

    let values = array.floats()?;
    let vectors = tuples(&values, array, raw.point_count)?
        .map(|t| [t[0], t[1], t[2]])
        .collect();

    Ok(MeshField::new(vectors, template))
}

/// Reads only the mesh topology.
pub fn read_template<R: BufRead>(reader: R) -> Result<MeshTemplate, Error> {
    let text = read_text(reader)?;
    scan_document(&text)?.template()
}

/// Reads the mesh and all point-centered arrays.
pub fn parse<R: BufRead>(reader: R) -> Result<VtuDocument, Error> {
    let text = read_text(reader)?;
    let raw = scan_document(&text)?;
    let template = raw.template()?;

    let point_data = raw
        .point_data
        .iter()
        .map(|a| {
            let values = a.floats()?;
            check_len(&values, a, raw.point_count)?;
            Ok(PointArray {
                name: a.name.clone(),
                components: a.components,
                values,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(VtuDocument {
        template,
        point_data,
    })
}

fn read_text<R: BufRead>(mut reader: R) -> Result<String, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

fn check_len(values: &[f64], array: &RawArray<'_>, point_count: usize) -> Result<(), Error> {
    if array.components == 0 || values.len() != array.components * point_count {
        return Err(Error::parse(
            Format::Vtu,
            array.line,
            format!(
                "array '{}' has {} values, expected {} points x {} components",
                array.name,
                values.len(),
                point_count,
                array.components
            ),
        ));
    }
    Ok(())
}

fn tuples<'v>(
    values: &'v [f64],
    array: &RawArray<'_>,
    point_count: usize,
) -> Result<std::slice::ChunksExact<'v, f64>, Error> {
    check_len(values, array, point_count)?;
    Ok(values.chunks_exact(array.components))
}

struct RawArray<'a> {
    name: String,
    components: usize,
    line: usize,
    body: Cow<'a, str>,
}

impl<'a> RawArray<'a> {
    fn from_tag(tag: &Tag<'_>, body: &'a str) -> Result<Self, Error> {
        let format = tag.attr("format").unwrap_or("ascii");
        if !format.eq_ignore_ascii_case("ascii") {
            return Err(Error::parse(
                Format::Vtu,
                tag.line,
                format!("only ASCII data arrays are supported (found format=\"{format}\")"),
            ));
        }
        Ok(Self {
            name: tag.attr("Name").unwrap_or_default().to_string(),
            components: tag.usize_attr("NumberOfComponents")?.unwrap_or(1),
            line: tag.line,
            body: character_data(body),
        })
    }

    fn floats(&self) -> Result<Vec<f64>, Error> {
        self.body
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>().map_err(|_| {
                    Error::parse(
                        Format::Vtu,
                        self.line,
                        format!("invalid number '{tok}' in array '{}'", self.name),
                    )
                })
            })
            .collect()
    }

    fn integers<T: std::str::FromStr>(&self) -> Result<Vec<T>, Error> {
        self.body
            .split_whitespace()
            .map(|tok| {
                tok.parse::<T>().map_err(|_| {
                    Error::parse(
                        Format::Vtu,
                        self.line,
                        format!("invalid integer '{tok}' in array '{}'", self.name),
                    )
                })
            })
            .collect()
    }
}

#[derive(Default)]
struct RawDocument<'a> {
    point_count: usize,
    cell_count: usize,
    piece_line: usize,
    points: Option<RawArray<'a>>,
    connectivity: Option<RawArray<'a>>,
    offsets: Option<RawArray<'a>>,
    types: Option<RawArray<'a>>,
    point_data: Vec<RawArray<'a>>,
}

impl RawDocument<'_> {
    fn template(&self) -> Result<MeshTemplate, Error> {
        let points = match &self.points {
            Some(array) => {
                let values = array.floats()?;
                if array.components != 3 {
                    return Err(Error::parse(
                        Format::Vtu,
                        array.line,
                        "point coordinates must have 3 components",
                    ));
                }
                tuples(&values, array, self.point_count)?
                    .map(|t| [t[0], t[1], t[2]])
                    .collect()
            }
            None if self.point_count == 0 => Vec::new(),
            None => {
                return Err(Error::parse(
                    Format::Vtu,
                    self.piece_line,
                    "piece declares points but has no <Points> array",
                ));
            }
        };

        if self.cell_count == 0 {
            return Ok(MeshTemplate::new(points, Vec::new(), Vec::new(), Vec::new()));
        }

        let required = |array: &Option<RawArray<'_>>, name: &str| -> Result<(), Error> {
            if array.is_none() {
                return Err(Error::parse(
                    Format::Vtu,
                    self.piece_line,
                    format!("<Cells> is missing the '{name}' array"),
                ));
            }
            Ok(())
        };
        required(&self.connectivity, "connectivity")?;
        required(&self.offsets, "offsets")?;
        required(&self.types, "types")?;

        let connectivity: Vec<i64> = self
            .connectivity
            .as_ref()
            .map(RawArray::integers)
            .transpose()?
            .unwrap_or_default();
        let offsets: Vec<i64> = self
            .offsets
            .as_ref()
            .map(RawArray::integers)
            .transpose()?
            .unwrap_or_default();
        let types: Vec<u8> = self
            .types
            .as_ref()
            .map(RawArray::integers)
            .transpose()?
            .unwrap_or_default();

        if offsets.len() != self.cell_count || types.len() != self.cell_count {
            return Err(Error::parse(
                Format::Vtu,
                self.piece_line,
                format!(
                    "piece declares {} cells but has {} offsets and {} types",
                    self.cell_count,
                    offsets.len(),
                    types.len()
                ),
            ));
        }
        if offsets.last().copied() != Some(connectivity.len() as i64) {
            return Err(Error::parse(
                Format::Vtu,
                self.piece_line,
                "last cell offset does not match the connectivity length",
            ));
        }

        Ok(MeshTemplate::new(points, connectivity, offsets, types))
    }
}

fn scan_document(text: &str) -> Result<RawDocument<'_>, Error> {
    let mut scanner = TagScanner::new(text);
    let mut open: Vec<&str> = Vec::new();
    let mut doc = RawDocument::default();
    let mut saw_root = false;
    let mut saw_piece = false;

    while let Some(tag) = scanner.next_tag()? {
        match (tag.kind, tag.name) {
            (TagKind::Close, name) => match open.pop() {
                Some(expected) if expected == name => {}
                _ => {
                    return Err(Error::parse(
                        Format::Vtu,
                        tag.line,
                        format!("unexpected closing tag </{name}>"),
                    ));
                }
            },

            (kind, "VTKFile") => {
                let kind_attr = tag.attr("type").unwrap_or_default();
                if kind_attr != "UnstructuredGrid" {
                    return Err(Error::parse(
                        Format::Vtu,
                        tag.line,
                        format!("expected an UnstructuredGrid file, found type=\"{kind_attr}\""),
                    ));
                }
                if tag.attr("compressor").is_some() {
                    return Err(Error::parse(
                        Format::Vtu,
                        tag.line,
                        "compressed files are not supported",
                    ));
                }
                saw_root = true;
                if kind == TagKind::Open {
                    open.push(tag.name);
                }
            }

            (_, "AppendedData") => {
                return Err(Error::parse(
                    Format::Vtu,
                    tag.line,
                    "appended data sections are not supported",
                ));
            }

            (kind, "Piece") => {
                if saw_piece {
                    return Err(Error::parse(
                        Format::Vtu,
                        tag.line,
                        "multi-piece files are not supported",
                    ));
                }
                saw_piece = true;
                doc.piece_line = tag.line;
                doc.point_count = tag.usize_attr("NumberOfPoints")?.unwrap_or(0);
                doc.cell_count = tag.usize_attr("NumberOfCells")?.unwrap_or(0);
                if kind == TagKind::Open {
                    open.push(tag.name);
                }
            }

            (kind, "DataArray") => {
                let body = if kind == TagKind::Open {
                    scanner.take_body("DataArray")?
                } else {
                    ""
                };
                let array = RawArray::from_tag(&tag, body)?;
                match open.last().copied() {
                    Some("Points") => doc.points = Some(array),
                    Some("PointData") => doc.point_data.push(array),
                    Some("Cells") => match array.name.as_str() {
                        "connectivity" => doc.connectivity = Some(array),
                        "offsets" => doc.offsets = Some(array),
                        "types" => doc.types = Some(array),
                        _ => {}
                    },
                    _ => {}
                }
            }

            (TagKind::Open, name) => open.push(name),
            (TagKind::Empty, _) => {}
        }
    }

    if !saw_root {
        return Err(Error::parse(Format::Vtu, 1, "missing <VTKFile> root element"));
    }
    if !saw_piece {
        return Err(Error::parse(Format::Vtu, 1, "missing <Piece> element"));
    }
    if let Some(name) = open.last() {
        return Err(Error::parse(
            Format::Vtu,
            scanner.line_at(text.len()),
            format!("element <{name}> is never closed"),
        ));
    }

    Ok(doc)
}
