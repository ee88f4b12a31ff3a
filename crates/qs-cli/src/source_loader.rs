use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CliError;
use crate::world::World;

pub(crate) const SUITE_EXTENSION: &str = "quest";

pub(crate) fn resolve_scripts_dir(scripts_dir: &str) -> Result<PathBuf, CliError> {
    let path = PathBuf::from(scripts_dir);
    if !path.exists() {
        return Err(CliError::SourceNotFound { path });
    }
    if !path.is_dir() {
        return Err(CliError::SourceNotDir { path });
    }
    Ok(path)
}

/// Reads every `*.quest` file below `scripts_dir`, keyed by package: the
/// relative path without extension, segments joined with `.`.
pub(crate) fn read_suites_from_dir(
    scripts_dir: &Path,
) -> Result<BTreeMap<String, String>, CliError> {
    let mut suites = BTreeMap::new();

    for entry in WalkDir::new(scripts_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(SUITE_EXTENSION)
        {
            continue;
        }

        let source = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        suites.insert(package_name(scripts_dir, path), source);
    }

    if suites.is_empty() {
        return Err(CliError::SourceEmpty {
            path: scripts_dir.to_path_buf(),
        });
    }
    Ok(suites)
}

fn package_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(".")
}

pub(crate) fn load_world(path: Option<&str>) -> Result<World, CliError> {
    let Some(path) = path else {
        return Ok(World::default());
    };
    let path = PathBuf::from(path);
    let raw = fs::read_to_string(&path).map_err(|source| CliError::ReadFile {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::ParseWorld { path, source })
}
