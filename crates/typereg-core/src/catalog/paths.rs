//! Catalog path resolution helpers.

use std::path::{Path, PathBuf};

/// File name looked up in the project root.
pub const PROJECT_CATALOG_FILE: &str = "typereg.toml";

/// The user's config directory (e.g. `~/.config` on Linux).
pub fn global_config_dir() -> anyhow::Result<PathBuf> {
    dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))
}

/// Global catalog location: `<config_dir>/typereg/catalog.toml`.
pub fn global_catalog_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join("typereg").join("catalog.toml")
}

/// Pick the catalog to load.
///
/// An explicit path always wins. Otherwise the project catalog is used when it
/// exists, falling back to the global one.
pub fn resolve_catalog_path(
    explicit: Option<&Path>,
    project_root: &Path,
    global_dir: &Path,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let project = project_root.join(PROJECT_CATALOG_FILE);
    if project.is_file() {
        tracing::debug!(path = %project.display(), "using project catalog");
        return project;
    }

    global_catalog_path_in(global_dir)
}
