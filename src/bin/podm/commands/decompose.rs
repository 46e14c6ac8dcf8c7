use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use pod_modes::io::{CsvTableWriter, VtuReader, VtuWriter};
use pod_modes::{
    LoadedSnapshots, OutputPaths, decompose, export_results, load_snapshots, select_modes,
};

use crate::cli::Cli;
use crate::config::{RunSettings, build_run_settings};
use crate::display::{
    Context as DisplayContext, Progress, print_export_summary, print_singular_values,
    print_source_report,
};
use crate::io::Prompter;

const TOTAL_STAGES: u8 = 3;

pub fn run_decompose(cli: Cli, ctx: DisplayContext) -> Result<()> {
    let settings = build_run_settings(&cli)?;
    let mut prompter = Prompter::stdin();
    execute(
        settings,
        &mut prompter,
        ctx,
        &mut io::stdout(),
        &mut io::stderr(),
    )
}

/// Runs one decomposition. Results go to files; `stdout` only carries the
/// no-data notice and `report` receives the run report unless `ctx.quiet`.
pub fn execute<R: BufRead, W: Write>(
    settings: RunSettings,
    prompter: &mut Prompter<R, W>,
    ctx: DisplayContext,
    stdout: &mut dyn Write,
    report: &mut dyn Write,
) -> Result<()> {
    let mut sink = io::sink();
    let report: &mut dyn Write = if ctx.quiet { &mut sink } else { report };

    let mut config = settings.config;
    if !settings.channel_chosen {
        config.channel = prompter.channel()?;
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STAGES);

    progress.begin("Loading snapshots");
    let loaded = load_snapshots(
        &VtuReader,
        &config.sources,
        &config.field_name,
        config.channel,
    );
    progress.complete(
        "Loading snapshots",
        &[
            format!("Scan {} sources", config.sources.len()),
            format!(
                "Extract component {} of '{}'",
                config.channel, config.field_name
            ),
            format!("{} snapshots loaded", loaded.loaded_count()),
        ],
    );

    print_source_report(report, &loaded, ctx.interactive);

    let LoadedSnapshots {
        snapshots,
        template,
        ..
    } = loaded;
    let Some(template) = template else {
        progress.abandon();
        writeln!(stdout, "No velocity data found.")?;
        return Ok(());
    };

    progress.begin("Decomposing snapshot matrix");
    let (matrix, decomposition) = decompose(snapshots).context("Decomposition failed")?;
    let (points, timesteps) = matrix.shape();
    progress.complete(
        "Decomposing snapshot matrix",
        &[
            format!("Assemble {} x {} snapshot matrix", points, timesteps),
            format!("Reduced SVD, rank {}", decomposition.rank()),
            format!(
                "Reconstruction error {:.2e}",
                decomposition.relative_error(&matrix)
            ),
        ],
    );

    print_singular_values(report, &decomposition);

    let mode_count = match config.mode_count {
        Some(k) => k,
        None => prompter.mode_count(decomposition.rank())?,
    };
    let modes = select_modes(&decomposition.u, mode_count)?;

    progress.begin("Exporting results");
    create_output_dirs(&config.outputs)?;
    let written = export_results(
        &VtuWriter,
        &CsvTableWriter,
        &config.outputs,
        &template,
        &modes,
        &decomposition,
    )
    .context("Export failed")?;
    progress.complete(
        "Exporting results",
        &written
            .iter()
            .map(|p| format!("Write {}", p.display()))
            .collect::<Vec<_>>(),
    );

    if !ctx.interactive {
        print_export_summary(report, &written);
    }

    progress.finish();

    Ok(())
}

fn create_output_dirs(outputs: &OutputPaths) -> Result<()> {
    for path in [&outputs.modes, &outputs.u, &outputs.s, &outputs.vt] {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pod_modes::{Channel, PodConfig};
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const PLAIN: DisplayContext = DisplayContext {
        interactive: false,
        quiet: false,
    };

    fn source(root: &Path, step: usize) -> PathBuf {
        root.join(format!("time_{step}"))
            .join(format!("time_{step}_0_0.vtu"))
    }

    fn write_snapshot(root: &Path, step: usize) {
        let path = source(root, step);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let t = step as f64;
        let vectors: Vec<String> = (0..4)
            .map(|p| format!("{} {} 0", 1.0 + p as f64 * t, (p as f64 + 1.0) * (t - 2.0)))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0"?>
<VTKFile type="UnstructuredGrid" version="1.0" byte_order="LittleEndian">
  <UnstructuredGrid>
    <Piece NumberOfPoints="4" NumberOfCells="1">
      <PointData Vectors="U">
        <DataArray type="Float64" Name="U" NumberOfComponents="3" format="ascii">
          {}
        </DataArray>
      </PointData>
      <Points>
        <DataArray type="Float64" Name="Points" NumberOfComponents="3" format="ascii">
          0 0 0 1 0 0 1 1 0 0 1 0
        </DataArray>
      </Points>
      <Cells>
        <DataArray type="Int64" Name="connectivity" format="ascii">0 1 2 3</DataArray>
        <DataArray type="Int64" Name="offsets" format="ascii">4</DataArray>
        <DataArray type="UInt8" Name="types" format="ascii">9</DataArray>
      </Cells>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
"#,
            vectors.join(" ")
        );
        fs::write(path, xml).unwrap();
    }

    fn settings(root: &Path, steps: usize) -> RunSettings {
        RunSettings {
            config: PodConfig {
                channel: Channel::U,
                mode_count: Some(1),
                field_name: "U".to_string(),
                sources: (0..steps).map(|i| source(root, i)).collect(),
                outputs: OutputPaths::in_dir(&root.join("out")),
            },
            channel_chosen: true,
        }
    }

    fn no_answers() -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(Vec::new()), Vec::new(), false)
    }

    fn run(settings: RunSettings, ctx: DisplayContext) -> (String, String) {
        let mut stdout = Vec::new();
        let mut report = Vec::new();
        execute(settings, &mut no_answers(), ctx, &mut stdout, &mut report).unwrap();
        (
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(report).unwrap(),
        )
    }

    #[test]
    fn non_interactive_run_reports_sources_spectrum_and_outputs() {
        let dir = tempdir().unwrap();
        for step in [0, 1, 3] {
            write_snapshot(dir.path(), step);
        }

        let (stdout, report) = run(settings(dir.path(), 4), PLAIN);

        assert!(stdout.is_empty());
        assert!(!report.contains('\x1b'));
        assert_eq!(report.matches("  loaded").count(), 3);
        let missing = format!("{}  not found", source(dir.path(), 2).display());
        assert!(report.contains(&missing), "{report}");
        assert!(report.contains("Snapshot Summary"));
        assert!(report.contains("Singular Values"));

        let outputs = OutputPaths::in_dir(&dir.path().join("out"));
        for path in [&outputs.modes, &outputs.u, &outputs.s, &outputs.vt] {
            assert!(path.is_file());
            assert!(report.contains(&format!("wrote {}", path.display())));
        }
    }

    #[test]
    fn quiet_run_writes_files_without_a_report() {
        let dir = tempdir().unwrap();
        for step in [0, 1, 2] {
            write_snapshot(dir.path(), step);
        }
        let quiet = DisplayContext::detect().with_quiet(true);

        let (stdout, report) = run(settings(dir.path(), 3), quiet);

        assert!(stdout.is_empty());
        assert!(report.is_empty());
        assert!(OutputPaths::in_dir(&dir.path().join("out")).u.is_file());
    }

    #[test]
    fn no_data_notice_goes_to_stdout() {
        let dir = tempdir().unwrap();

        let (stdout, report) = run(settings(dir.path(), 2), PLAIN);

        assert_eq!(stdout, "No velocity data found.\n");
        assert_eq!(report.matches("not found").count(), 2);
        assert!(!dir.path().join("out").exists());
    }
}
