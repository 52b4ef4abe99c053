//! version-helper: release version bookkeeping for a CMake + Debian + Docker project
//!
//! This crate derives a release version from `git describe` and the
//! checked-in CMake version file, then rewrites the contributors list, the
//! CMake constants, the Debian changelog and the Dockerfiles to match.

pub mod config;
pub mod error;
pub mod fsutil;
pub mod process;
pub mod resolver;
pub mod ui;
pub mod updater;
pub mod version;

pub use error::{Error, Result};
pub use resolver::get_version_from_repo;
pub use updater::update_version_local;
pub use version::{Version, VersionType, build_version_description};
