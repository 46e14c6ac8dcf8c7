use super::error::Error;
use crate::io::{self, FieldReader};
use crate::model::mesh::MeshTemplate;
use crate::model::snapshot::FieldSnapshot;
use crate::model::types::Channel;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Outcome of loading one nominal source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceStatus {
    Loaded { points: usize },
    NotFound,
    MissingChannel { field: String },
    Failed { detail: String },
}

impl SourceStatus {
    #[inline]
    pub fn is_loaded(&self) -> bool {
        matches!(self, SourceStatus::Loaded { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub path: PathBuf,
    pub status: SourceStatus,
}

/// Snapshots that loaded, in source order, plus one report per source.
#[derive(Debug, Clone, Default)]
pub struct LoadedSnapshots {
    pub snapshots: Vec<FieldSnapshot>,
    /// Topology of the first source that loaded.
    pub template: Option<MeshTemplate>,
    pub reports: Vec<SourceReport>,
}

impl LoadedSnapshots {
    #[inline]
    pub fn loaded_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SourceReport> {
        self.reports.iter().filter(|r| !r.status.is_loaded())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Loads one source and extracts `channel` of its vector field `field`.
pub fn load_source<R: FieldReader>(
    reader: &R,
    path: &Path,
    field: &str,
    channel: Channel,
) -> Result<(FieldSnapshot, MeshTemplate), Error> {
    let mesh = reader.read_field(path, field).map_err(|e| match e {
        e if e.is_not_found() => Error::SourceNotFound {
            path: path.to_path_buf(),
        },
        io::Error::MissingField { name } => Error::MissingChannel {
            path: path.to_path_buf(),
            field: name,
        },
        other => Error::SourceRead {
            path: path.to_path_buf(),
            detail: other.to_string(),
        },
    })?;

    let snapshot = FieldSnapshot::from_vectors(&mesh.vectors, channel);
    Ok((snapshot, mesh.template))
}

/// Loads every source in order, skipping (and logging) the ones that fail.
///
/// Only source-level failures are absorbed here; the returned snapshots may
/// still disagree on point count, which the assembler rejects.
pub fn load_snapshots<R: FieldReader>(
    reader: &R,
    sources: &[PathBuf],
    field: &str,
    channel: Channel,
) -> LoadedSnapshots {
    let mut loaded = LoadedSnapshots {
        snapshots: Vec::with_capacity(sources.len()),
        template: None,
        reports: Vec::with_capacity(sources.len()),
    };

    for path in sources {
        let status = match load_source(reader, path, field, channel) {
            Ok((snapshot, template)) => {
                let points = snapshot.point_count();
                debug!("loaded {} ({points} points)", path.display());
                loaded.snapshots.push(snapshot);
                loaded.template.get_or_insert(template);
                SourceStatus::Loaded { points }
            }
            Err(Error::SourceNotFound { .. }) => {
                warn!("skipping {}: not found", path.display());
                SourceStatus::NotFound
            }
            Err(Error::MissingChannel { field, .. }) => {
                warn!("skipping {}: no vector field '{field}'", path.display());
                SourceStatus::MissingChannel { field }
            }
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                SourceStatus::Failed {
                    detail: e.to_string(),
                }
            }
        };
        loaded.reports.push(SourceReport {
            path: path.clone(),
            status,
        });
    }

    loaded
}
