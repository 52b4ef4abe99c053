//! Resolving the current version of a repository
//!
//! The tuple comes from two places: `major`, `minor`, `patch` and `revision`
//! are read from the checked-in CMake version file, while `tweak` is derived
//! from `git describe`.

pub mod git;
pub mod version_file;

pub use git::{describe, tweak_from_describe};
pub use version_file::VersionFields;

use crate::config::Config;
use crate::version::Version;
use std::path::Path;

/// Combine version file fields with a tweak number
pub fn combine(fields: VersionFields, tweak: u32) -> Version {
    Version::new(fields.major, fields.minor, fields.patch, tweak, fields.revision)
}

/// A resolved version together with the `git describe` output it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub version: Version,
    pub describe: String,
}

/// Resolve the version of the repository at `repo`, keeping the describe output
pub fn resolve(repo: &Path, config: &Config) -> crate::Result<Resolved> {
    let described = describe(repo)?;
    let tweak = tweak_from_describe(&described)?;
    let fields = version_file::read(&repo.join(&config.paths.version_file))?;
    let version = combine(fields, tweak);
    tracing::info!("Resolved version {} (revision {})", version, version.revision);
    Ok(Resolved {
        version,
        describe: described,
    })
}

/// Resolve the version of the repository at `repo`
pub fn get_version_from_repo(repo: &Path, config: &Config) -> crate::Result<Version> {
    resolve(repo, config).map(|r| r.version)
}
