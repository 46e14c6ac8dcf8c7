use super::error::Error;
use crate::model::types::Channel;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_FIELD_NAME: &str = "U";

/// Everything a run needs, built once at the program boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PodConfig {
    /// Velocity component to decompose.
    pub channel: Channel,
    /// Number of spatial modes to export. `None` defers the choice until the
    /// singular values are known.
    pub mode_count: Option<usize>,
    /// Name of the point-centered vector field in each source.
    pub field_name: String,
    /// Ordered timestep sources.
    pub sources: Vec<PathBuf>,
    pub outputs: OutputPaths,
}

impl Default for PodConfig {
    fn default() -> Self {
        Self {
            channel: Channel::default(),
            mode_count: None,
            field_name: DEFAULT_FIELD_NAME.to_string(),
            sources: Vec::new(),
            outputs: OutputPaths::default(),
        }
    }
}

impl PodConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}

/// Destinations of the four exported artifacts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputPaths {
    pub modes: PathBuf,
    pub u: PathBuf,
    pub s: PathBuf,
    pub vt: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            modes: PathBuf::from("modes.vtu"),
            u: PathBuf::from("U.csv"),
            s: PathBuf::from("S.csv"),
            vt: PathBuf::from("VT.csv"),
        }
    }
}

impl OutputPaths {
    /// Default file names placed under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        let d = Self::default();
        Self {
            modes: dir.join(d.modes),
            u: dir.join(d.u),
            s: dir.join(d.s),
            vt: dir.join(d.vt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = PodConfig::default();
        assert_eq!(config.channel, Channel::U);
        assert!(config.mode_count.is_none());
        assert_eq!(config.field_name, "U");
        assert!(config.sources.is_empty());
        assert_eq!(config.outputs.vt, PathBuf::from("VT.csv"));
    }

    #[test]
    fn config_from_toml_with_partial_outputs() {
        let config = PodConfig::from_toml_str(
            r#"
            channel = "w"
            mode_count = 4
            sources = ["a.vtu", "b.vtu"]

            [outputs]
            modes = "out/modes.vtu"
            "#,
        )
        .unwrap();

        assert_eq!(config.channel, Channel::W);
        assert_eq!(config.mode_count, Some(4));
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.outputs.modes, PathBuf::from("out/modes.vtu"));
        assert_eq!(config.outputs.s, PathBuf::from("S.csv"));
    }

    #[test]
    fn config_channel_accepts_index() {
        let config = PodConfig::from_toml_str("channel = 1").unwrap();
        assert_eq!(config.channel, Channel::V);
    }

    #[test]
    fn config_rejects_unknown_keys_and_bad_channel() {
        assert!(matches!(
            PodConfig::from_toml_str("component = 1"),
            Err(Error::ConfigParse(_))
        ));
        assert!(PodConfig::from_toml_str("channel = 5").is_err());
    }

    #[test]
    fn output_paths_in_dir() {
        let paths = OutputPaths::in_dir(Path::new("results"));
        assert_eq!(paths.u, Path::new("results").join("U.csv"));
        assert_eq!(paths.modes, Path::new("results").join("modes.vtu"));
    }
}
