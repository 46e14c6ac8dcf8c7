use std::io::Write;
use std::path::PathBuf;

use pod_modes::{Decomposition, LoadedSnapshots, SourceStatus};

use crate::util::text::{truncate, truncate_left};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_SPECTRUM_ROWS: usize = 20;

/// One status line per source, then the load summary.
///
/// With `color` off the marks carry no escape codes and paths are printed in
/// full, so the report stays usable when redirected to a file.
pub fn print_source_report(out: &mut dyn Write, loaded: &LoadedSnapshots, color: bool) {
    let path_w = SAFE_TABLE_WIDTH - 16;
    for report in &loaded.reports {
        let (mark, ansi, status) = match &report.status {
            SourceStatus::Loaded { .. } => ("✓", "32", "loaded".to_string()),
            SourceStatus::NotFound => ("-", "33", "not found".to_string()),
            SourceStatus::MissingChannel { field } => ("!", "33", format!("no field '{field}'")),
            SourceStatus::Failed { detail } if !color => ("✗", "31", format!("unreadable: {detail}")),
            SourceStatus::Failed { .. } => ("✗", "31", "unreadable".to_string()),
        };
        let path = report.path.display().to_string();
        let _ = if color {
            writeln!(
                out,
                "{}\x1b[{}m{}\x1b[0m {:<path_w$} {}",
                INDENT,
                ansi,
                mark,
                truncate_left(&path, path_w),
                status,
                path_w = path_w
            )
        } else {
            writeln!(out, "{}{} {}  {}", INDENT, mark, path, status)
        };
    }
    let _ = writeln!(out);

    let count = |pred: fn(&SourceStatus) -> bool| {
        loaded.reports.iter().filter(|r| pred(&r.status)).count()
    };

    let mut rows = vec![
        ("Sources", loaded.reports.len().to_string()),
        ("Loaded", loaded.loaded_count().to_string()),
        (
            "Not Found",
            count(|s| matches!(s, SourceStatus::NotFound)).to_string(),
        ),
        (
            "Missing Field",
            count(|s| matches!(s, SourceStatus::MissingChannel { .. })).to_string(),
        ),
        (
            "Unreadable",
            count(|s| matches!(s, SourceStatus::Failed { .. })).to_string(),
        ),
    ];
    if let Some(template) = &loaded.template {
        rows.push(("Mesh Points", template.point_count().to_string()));
        rows.push(("Mesh Cells", template.cell_count().to_string()));
    }

    print_kv_table(out, "Snapshot Summary", &rows);
}

/// Singular values with their energy share, largest first.
pub fn print_singular_values(out: &mut dyn Write, decomposition: &Decomposition) {
    let mode_w = 6usize;
    let sigma_w = 12usize;
    let cum_w = 8usize;
    let sep_overhead = 10;
    let energy_w = SAFE_TABLE_WIDTH.saturating_sub(mode_w + sigma_w + cum_w + sep_overhead);
    let max_bar_width = energy_w.saturating_sub(8).min(16);

    let lines = |l: &str, m: &str, r: &str| {
        format!(
            "{}{l}{}{m}{}{m}{}{m}{}{r}",
            INDENT,
            "─".repeat(mode_w + 2),
            "─".repeat(sigma_w + 2),
            "─".repeat(energy_w + 2),
            "─".repeat(cum_w + 2),
        )
    };

    let _ = writeln!(out, "{}┌─ Singular Values ─┐", INDENT);
    let _ = writeln!(out, "{}", lines("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{}│ {:<mode_w$} │ {:>sigma_w$} │ {:<energy_w$} │ {:>cum_w$} │",
        INDENT,
        "Mode",
        "σ",
        "Energy",
        "Cumul.",
    );
    let _ = writeln!(out, "{}", lines("├", "┼", "┤"));

    for row in spectrum_rows(decomposition).iter().take(MAX_SPECTRUM_ROWS) {
        let bar = make_bar(row.energy_pct, max_bar_width);
        let energy_cell = format!("{}  {:>5.1}%", bar, row.energy_pct);
        let _ = writeln!(
            out,
            "{}│ {:<mode_w$} │ {:>sigma_w$.4e} │ {:<energy_w$} │ {:>cum_w$} │",
            INDENT,
            row.mode,
            row.sigma,
            energy_cell,
            format!("{:.2}%", row.cumulative_pct),
        );
    }

    if decomposition.rank() > MAX_SPECTRUM_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<mode_w$} │ {:>sigma_w$} │ {:<energy_w$} │ {:>cum_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more values)", decomposition.rank() - MAX_SPECTRUM_ROWS),
            "",
        );
    }

    let _ = writeln!(out, "{}", lines("└", "┴", "┘"));
}

/// Lists the files an export wrote.
pub fn print_export_summary(out: &mut dyn Write, written: &[PathBuf]) {
    let _ = writeln!(out);
    for path in written {
        let _ = writeln!(out, "{}wrote {}", INDENT, path.display());
    }
}

struct SpectrumRow {
    mode: usize,
    sigma: f64,
    energy_pct: f64,
    cumulative_pct: f64,
}

fn spectrum_rows(decomposition: &Decomposition) -> Vec<SpectrumRow> {
    decomposition
        .singular_values()
        .iter()
        .zip(decomposition.energy_fractions())
        .zip(decomposition.cumulative_energy())
        .enumerate()
        .map(|(i, ((&sigma, energy), cumulative))| SpectrumRow {
            mode: i + 1,
            sigma,
            energy_pct: energy * 100.0,
            cumulative_pct: cumulative * 100.0,
        })
        .collect()
}

fn print_kv_table(out: &mut dyn Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }
    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = (((pct / 100.0) * max_width as f64).round() as usize).min(max_width);
    let empty = max_width - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
