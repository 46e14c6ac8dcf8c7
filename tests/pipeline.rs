use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use tempfile::tempdir;

use pod_modes::io::{CsvTableWriter, VtuReader, VtuWriter, vtu};
use pod_modes::{
    Channel, OutputPaths, PodError, SourceStatus, decompose, export_results, load_snapshots,
    select_modes,
};

const POINTS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

fn velocity(step: usize, point: usize) -> [f64; 3] {
    let t = step as f64;
    let p = point as f64;
    [1.0 + p * t, (p + 1.0) * (t - 2.0), 0.5 * p - t]
}

fn write_snapshot(root: &Path, step: usize, points: usize) -> PathBuf {
    let dir = root.join(format!("time_{step}"));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("time_{step}_0_0.vtu"));

    let vectors: Vec<String> = (0..points)
        .map(|p| {
            let [u, v, w] = velocity(step, p);
            format!("{u} {v} {w}")
        })
        .collect();
    let coords: Vec<String> = POINTS[..points]
        .iter()
        .map(|[x, y, z]| format!("{x} {y} {z}"))
        .collect();

    let xml = format!(
        r#"<?xml version="1.0"?>
<VTKFile type="UnstructuredGrid" version="1.0" byte_order="LittleEndian">
  <UnstructuredGrid>
    <Piece NumberOfPoints="{points}" NumberOfCells="1">
      <PointData Vectors="U">
        <DataArray type="Float64" Name="U" NumberOfComponents="3" format="ascii">
          {vectors}
        </DataArray>
      </PointData>
      <Points>
        <DataArray type="Float64" Name="Points" NumberOfComponents="3" format="ascii">
          {coords}
        </DataArray>
      </Points>
      <Cells>
        <DataArray type="Int64" Name="connectivity" format="ascii">{connectivity}</DataArray>
        <DataArray type="Int64" Name="offsets" format="ascii">{points}</DataArray>
        <DataArray type="UInt8" Name="types" format="ascii">7</DataArray>
      </Cells>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
"#,
        vectors = vectors.join("\n          "),
        coords = coords.join(" "),
        connectivity = (0..points)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" "),
    );
    fs::write(&path, xml).unwrap();
    path
}

fn time_series(root: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| root.join(format!("time_{i}")).join(format!("time_{i}_0_0.vtu")))
        .collect()
}

fn read_csv(path: &Path) -> Vec<Vec<f64>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split(',').map(|v| v.parse().unwrap()).collect())
        .collect()
}

#[test]
fn decomposes_time_series_with_a_missing_step() {
    let data = tempdir().unwrap();
    for step in [0, 1, 3, 4] {
        write_snapshot(data.path(), step, 4);
    }
    let sources = time_series(data.path(), 5);

    let loaded = load_snapshots(&VtuReader, &sources, "U", Channel::V);
    assert_eq!(loaded.loaded_count(), 4);
    let skipped: Vec<_> = loaded.skipped().collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].path, sources[2]);
    assert_eq!(skipped[0].status, SourceStatus::NotFound);

    let template = loaded.template.clone().unwrap();
    assert_eq!(template.point_count(), 4);
    assert_eq!(template.cell_count(), 1);

    let (matrix, decomposition) = decompose(loaded.snapshots).unwrap();
    assert_eq!(matrix.shape(), (4, 4));
    // Column 2 is timestep 3: v = (p + 1) * (3 - 2).
    let column: Vec<f64> = matrix.column(2).unwrap().iter().copied().collect();
    assert_eq!(column, vec![1.0, 2.0, 3.0, 4.0]);

    // v(p, t) = (p + 1)(t - 2) has rank one.
    let s = decomposition.singular_values();
    assert!(s[1] < 1e-10 * s[0]);
    assert_abs_diff_eq!(decomposition.relative_error(&matrix), 0.0, epsilon = 1e-12);

    let modes = select_modes(&decomposition.u, 2).unwrap();
    let out = tempdir().unwrap();
    let outputs = OutputPaths::in_dir(out.path());
    let written = export_results(
        &VtuWriter,
        &CsvTableWriter,
        &outputs,
        &template,
        &modes,
        &decomposition,
    )
    .unwrap();
    assert_eq!(
        written,
        vec![
            outputs.modes.clone(),
            outputs.u.clone(),
            outputs.s.clone(),
            outputs.vt.clone()
        ]
    );

    let doc = vtu::reader::parse(fs::read(&outputs.modes).unwrap().as_slice()).unwrap();
    assert_eq!(doc.template, template);
    let names: Vec<&str> = doc.point_data.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Mode1", "Mode2"]);
    let mode1 = &doc.point_array("Mode1").unwrap().values;
    for (written, exact) in mode1.iter().zip(modes.get(0).unwrap()) {
        assert_abs_diff_eq!(*written, *exact, epsilon = 1e-6);
    }

    let u = read_csv(&outputs.u);
    assert_eq!((u.len(), u[0].len()), (4, 4));
    let s_csv = read_csv(&outputs.s);
    assert_eq!(s_csv.len(), 4);
    assert!(s_csv.iter().all(|row| row.len() == 1));
    assert_abs_diff_eq!(s_csv[0][0], s[0], epsilon = 1e-12);
    let vt = read_csv(&outputs.vt);
    assert_eq!((vt.len(), vt[0].len()), (4, 4));
    let first_line = fs::read_to_string(&outputs.s).unwrap();
    assert!(first_line.lines().next().unwrap().contains("e+"));
}

#[test]
fn mesh_change_is_a_shape_mismatch() {
    let data = tempdir().unwrap();
    write_snapshot(data.path(), 0, 4);
    write_snapshot(data.path(), 1, 4);
    write_snapshot(data.path(), 2, 3);
    let sources = time_series(data.path(), 3);

    let loaded = load_snapshots(&VtuReader, &sources, "U", Channel::U);
    assert_eq!(loaded.loaded_count(), 3);

    let err = decompose(loaded.snapshots).unwrap_err();
    assert!(matches!(
        err,
        PodError::ShapeMismatch {
            index: 2,
            expected: 4,
            found: 3
        }
    ));
}

#[test]
fn nothing_to_decompose_when_no_source_loads() {
    let data = tempdir().unwrap();
    write_snapshot(data.path(), 0, 4);
    let sources = time_series(data.path(), 2);

    let loaded = load_snapshots(&VtuReader, &sources, "velocity", Channel::U);
    assert!(loaded.is_empty());
    assert!(loaded.template.is_none());
    assert!(matches!(
        loaded.reports[0].status,
        SourceStatus::MissingChannel { .. }
    ));
    assert_eq!(loaded.reports[1].status, SourceStatus::NotFound);
    assert!(matches!(decompose(loaded.snapshots), Err(PodError::EmptyInput)));
}
