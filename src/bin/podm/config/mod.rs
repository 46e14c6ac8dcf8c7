use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pod_modes::{OutputPaths, PodConfig};

use crate::cli::Cli;
use crate::io::{discover_time_series, read_manifest};

/// A run configuration plus what still has to be asked for.
pub struct RunSettings {
    pub config: PodConfig,
    /// `false` when neither `--component` nor a config file chose the channel.
    pub channel_chosen: bool,
}

/// Merges the optional TOML file with command-line flags; flags win.
pub fn build_run_settings(cli: &Cli) -> Result<RunSettings> {
    let (mut config, from_file) = match &cli.config {
        Some(path) => (load_config_file(path)?, true),
        None => (PodConfig::default(), false),
    };

    if let Some(channel) = cli.decomposition.component {
        config.channel = channel;
    }
    if let Some(k) = cli.decomposition.mode_count {
        config.mode_count = Some(k);
    }
    if let Some(field) = &cli.sources.field {
        config.field_name = field.clone();
    }
    if let Some(dir) = &cli.output.out_dir {
        config.outputs = OutputPaths::in_dir(dir);
    }

    config.sources = resolve_sources(cli, std::mem::take(&mut config.sources))?;

    Ok(RunSettings {
        config,
        channel_chosen: from_file || cli.decomposition.component.is_some(),
    })
}

fn load_config_file(path: &Path) -> Result<PodConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    PodConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

fn resolve_sources(cli: &Cli, from_config: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let opts = &cli.sources;

    if !opts.input.is_empty() {
        return Ok(opts.input.clone());
    }
    if let Some(manifest) = &opts.manifest {
        return read_manifest(manifest);
    }
    if opts.root.is_none() && !from_config.is_empty() {
        return Ok(from_config);
    }

    let root = opts.root.as_deref().unwrap_or_else(|| Path::new("."));
    Ok(discover_time_series(root, opts.first, opts.steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pod_modes::Channel;
    use tempfile::tempdir;

    fn settings(args: &[&str]) -> RunSettings {
        let cli = Cli::try_parse_from(std::iter::once("podm").chain(args.iter().copied())).unwrap();
        build_run_settings(&cli).unwrap()
    }

    #[test]
    fn defaults_scan_current_directory() {
        let s = settings(&[]);
        assert!(!s.channel_chosen);
        assert_eq!(s.config.sources.len(), 1441);
        assert_eq!(
            s.config.sources[0],
            PathBuf::from("./time_0/time_0_0_0.vtu")
        );
        assert_eq!(s.config.outputs, OutputPaths::default());
        assert!(s.config.mode_count.is_none());
    }

    #[test]
    fn flags_fill_the_config() {
        let s = settings(&[
            "--root", "data", "--first", "10", "--steps", "2", "-c", "v", "-k", "3", "--field",
            "vel", "-o", "out",
        ]);
        assert!(s.channel_chosen);
        assert_eq!(s.config.channel, Channel::V);
        assert_eq!(s.config.mode_count, Some(3));
        assert_eq!(s.config.field_name, "vel");
        assert_eq!(
            s.config.sources,
            vec![
                PathBuf::from("data/time_10/time_10_0_0.vtu"),
                PathBuf::from("data/time_11/time_11_0_0.vtu"),
            ]
        );
        assert_eq!(s.config.outputs.u, PathBuf::from("out/U.csv"));
    }

    #[test]
    fn config_file_is_overridden_by_flags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            "channel = 2\nmode_count = 5\nsources = [\"a.vtu\", \"b.vtu\"]\n",
        )
        .unwrap();
        let config_arg = path.to_string_lossy().into_owned();

        let s = settings(&["--config", &config_arg]);
        assert!(s.channel_chosen);
        assert_eq!(s.config.channel, Channel::W);
        assert_eq!(s.config.sources, vec![PathBuf::from("a.vtu"), PathBuf::from("b.vtu")]);

        let s = settings(&["--config", &config_arg, "-k", "1", "-i", "c.vtu"]);
        assert_eq!(s.config.mode_count, Some(1));
        assert_eq!(s.config.sources, vec![PathBuf::from("c.vtu")]);
    }

    #[test]
    fn broken_config_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(&path, "modes = 3\n").unwrap();

        let cli = Cli::try_parse_from(["podm", "--config", path.to_str().unwrap()]).unwrap();
        let err = build_run_settings(&cli).err().unwrap();
        assert!(err.to_string().contains("Invalid config file"));
        assert!(err.downcast_ref::<pod_modes::PodError>().is_some());
    }
}
