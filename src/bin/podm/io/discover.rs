use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Lists `root/time_{i}/time_{i}_0_0.vtu` for `i` in `first..first + count`.
///
/// Existence is not checked; the loader reports sources that are missing.
pub fn discover_time_series(root: &Path, first: usize, count: usize) -> Vec<PathBuf> {
    (first..first + count)
        .map(|i| {
            root.join(format!("time_{i}"))
                .join(format!("time_{i}_0_0.vtu"))
        })
        .collect()
}

/// Reads a manifest file; relative entries resolve against its directory.
pub fn read_manifest(path: &Path) -> Result<Vec<PathBuf>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(parse_manifest(&text, base))
}

/// One path per line. Blank lines and `#` comments are ignored.
fn parse_manifest(text: &str, base: &Path) -> Vec<PathBuf> {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(path, _)| path).trim())
        .filter(|line| !line.is_empty())
        .map(|line| base.join(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn time_series_follows_naming_convention() {
        let sources = discover_time_series(Path::new("run"), 2, 3);
        assert_eq!(
            sources,
            vec![
                PathBuf::from("run/time_2/time_2_0_0.vtu"),
                PathBuf::from("run/time_3/time_3_0_0.vtu"),
                PathBuf::from("run/time_4/time_4_0_0.vtu"),
            ]
        );
        assert!(discover_time_series(Path::new("run"), 0, 0).is_empty());
    }

    #[test]
    fn manifest_skips_comments_and_blank_lines() {
        let text = "# snapshots\na.vtu\n\n  sub/b.vtu  # second\n/abs/c.vtu\n";
        let sources = parse_manifest(text, Path::new("base"));
        assert_eq!(
            sources,
            vec![
                PathBuf::from("base/a.vtu"),
                PathBuf::from("base/sub/b.vtu"),
                PathBuf::from("/abs/c.vtu"),
            ]
        );
    }

    #[test]
    fn manifest_file_resolves_relative_to_its_directory() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("sources.txt");
        fs::write(&manifest, "time_0.vtu\ntime_1.vtu\n").unwrap();

        let sources = read_manifest(&manifest).unwrap();
        assert_eq!(sources, vec![dir.path().join("time_0.vtu"), dir.path().join("time_1.vtu")]);

        assert!(read_manifest(&dir.path().join("missing.txt")).is_err());
    }
}
