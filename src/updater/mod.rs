//! Applying a version to the release artifacts
//!
//! Steps run in a fixed order and stop at the first failure. Each file is
//! replaced atomically, but earlier steps are not rolled back when a later
//! one fails.

pub mod changelog;
pub mod cmake;
pub mod contributors;
pub mod docker;

pub use cmake::CmakeVersionFile;

use crate::config::Config;
use crate::version::{Version, VersionType};
use std::path::Path;

/// Update contributors, CMake constants, changelog and Dockerfiles in `repo`
pub fn update_version_local(
    repo: &Path,
    sha: &str,
    version: &Version,
    version_type: VersionType,
    config: &Config,
) -> crate::Result<()> {
    let paths = &config.paths;
    tracing::info!(
        "Applying {} ({}) to {}",
        version,
        version_type,
        repo.display()
    );

    contributors::update(&repo.join(&paths.contributors_dir), &paths.contributors_script)?;
    cmake::update(&repo.join(&paths.version_file), version, sha, version_type)?;
    changelog::update(
        &repo.join(&paths.changelog_template),
        &repo.join(&paths.changelog),
        version,
        &config.changelog,
    )?;
    docker::update(
        repo,
        &paths.dockerfile_glob,
        &config.docker.version_arg,
        version,
    )?;

    Ok(())
}
