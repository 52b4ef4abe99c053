//! Release version value type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A release version: `major.minor.patch.tweak` plus a separate build revision.
///
/// Update methods return a new value and leave `self` untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Derived from commit distance, not set by hand
    pub tweak: u32,
    /// Monotonic build revision, independent of the tuple
    pub revision: u32,
}

impl Version {
    /// Create a version from its components
    pub fn new(major: u32, minor: u32, patch: u32, tweak: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            tweak,
            revision,
        }
    }

    /// Next minor release: patch and tweak restart at 1, revision advances
    pub fn minor_update(&self) -> crate::Result<Self> {
        Ok(Self::new(
            self.major,
            increment(self.minor, "minor")?,
            1,
            1,
            increment(self.revision, "revision")?,
        ))
    }

    /// Next patch release: tweak restarts at 1
    pub fn patch_update(&self) -> crate::Result<Self> {
        Ok(Self::new(
            self.major,
            self.minor,
            increment(self.patch, "patch")?,
            1,
            self.revision,
        ))
    }

    /// Next tweak of the same patch release
    pub fn tweak_update(&self) -> crate::Result<Self> {
        Ok(Self::new(
            self.major,
            self.minor,
            self.patch,
            increment(self.tweak, "tweak")?,
            self.revision,
        ))
    }

    /// `major.minor.patch.tweak`
    pub fn version_string(&self) -> String {
        self.to_string()
    }

    /// Version wildcard used for Docker package pins, `major.minor.patch.*`
    pub fn docker_version(&self) -> String {
        format!("{}.{}.{}.*", self.major, self.minor, self.patch)
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.major, self.minor, self.patch, self.tweak)
    }
}

fn increment(value: u32, field: &'static str) -> crate::Result<u32> {
    value.checked_add(1).ok_or(crate::Error::Overflow(field))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.tweak
        )
    }
}

/// Release channel
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    /// Stable release; tweak is the plain commit distance
    Stable,
    /// Testing release; tweak keeps counting from the previous testing tag
    #[default]
    Testing,
}

impl VersionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionType::Stable => "stable",
            VersionType::Testing => "testing",
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "stable" => Ok(VersionType::Stable),
            "testing" => Ok(VersionType::Testing),
            other => Err(crate::Error::InvalidVersionType(other.to_string())),
        }
    }
}

/// `v<version>-<type>`, e.g. `v21.11.4.14-stable`
pub fn build_version_description(version: &Version, version_type: VersionType) -> String {
    format!("v{}-{}", version.version_string(), version_type)
}
