use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_pod_hints(err);
        collector.collect_io_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_pod_hints(&mut self, err: &Error) {
        use pod_modes::PodError;

        let Some(pod_err) = err.downcast_ref::<PodError>() else {
            return;
        };

        self.mark_typed();

        match pod_err {
            PodError::SourceNotFound { .. } => {
                self.add("Check --root, --first and --steps against the time_N folders");
            }

            PodError::MissingChannel { field, .. } => {
                self.add(format!("No 3-component point array named '{}'", field));
                self.add("Use --field to select the velocity array by name");
            }

            PodError::SourceRead { .. } => {
                self.add("Only ASCII VTK UnstructuredGrid (.vtu) files are supported");
                self.add("Re-export binary or appended data in ASCII mode");
            }

            PodError::ShapeMismatch { index, .. } => {
                self.add(format!(
                    "Snapshot {} was sampled on a different mesh than snapshot 0",
                    index
                ));
                self.add("All timesteps must share the same point count");
                self.add("Restrict the run with --first/--steps or a --manifest");
            }

            PodError::EmptyInput => {
                self.add("No snapshots were loaded");
                self.add("Verify the input paths and the --field name");
            }

            PodError::NumericalFailure(_) => {
                self.add("The snapshot matrix could not be factorized");
                self.add("Check the input for NaN or infinite velocities");
            }

            PodError::InvalidModeCount { available, .. } => {
                self.add(format!("Choose a mode count between 1 and {}", available));
                self.add("The limit is min(point count, timestep count)");
            }

            PodError::Write { path, source } => {
                self.add(format!("Could not write {}", path.display()));
                if let pod_modes::io::Error::Io { source } = source {
                    self.collect_std_io_hints(source);
                } else {
                    self.add("Check the output directory given with --out-dir");
                }
            }

            PodError::ConfigParse(_) => {
                self.add("Config file has invalid TOML or unknown keys");
                self.add("Known keys: channel, mode_count, field_name, sources, [outputs]");
            }
        }
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use pod_modes::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser encountered an issue near line {} in {} format",
                    line, format
                ));
                self.add("Inspect the file around that line for malformed entries");
            }

            IoError::MissingField { name } => {
                self.add(format!("Point array '{}' is missing or not a vector", name));
                self.add("Use --field to select another array");
            }

            IoError::FieldLength { .. } => {
                self.add("A mode does not match the mesh point count");
                self.add("This may indicate a bug; please report it if reproducible");
            }

            IoError::Table(_) => {
                self.add("CSV serialization failed");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the directory exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("Verify the file is not truncated or corrupted");
            }

            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("stdin") {
            self.add("Pass --component and --modes to run without prompts");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
            self.add("Ensure you have the required access rights");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
