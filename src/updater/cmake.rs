//! Rewriting `SET(VERSION_*)` constants in the CMake version file

use crate::version::{Version, VersionType, build_version_description};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::Path;

/// `<head>SET(<key> <value><tail>`; a value runs until `)` or a space.
///
/// Only the first `SET(` of a line is an assignment. Anything after it,
/// including a second `SET(`, stays in the verbatim tail. The version file
/// holds one assignment per line.
static SET_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<head>.*?SET\()(?P<key>\w+) (?P<value>[^) ]*)(?P<tail>.*)$")
        .expect("SET line pattern is valid")
});

/// A `SET(KEY value)` line split around its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    head: String,
    key: String,
    value: String,
    tail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Set(Assignment),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    body: Body,
    /// `\n`, `\r\n` or empty for an unterminated last line
    ending: String,
}

/// In-memory CMake version file. Serializing an unmodified file yields the
/// original text unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmakeVersionFile {
    lines: Vec<Line>,
}

impl CmakeVersionFile {
    pub fn parse(content: &str) -> Self {
        let lines = content
            .split_inclusive('\n')
            .map(|raw| {
                let text = raw.trim_end_matches('\n').trim_end_matches('\r');
                let ending = raw[text.len()..].to_string();
                let body = match SET_LINE.captures(text) {
                    Some(caps) => Body::Set(Assignment {
                        head: caps["head"].to_string(),
                        key: caps["key"].to_string(),
                        value: caps["value"].to_string(),
                        tail: caps["tail"].to_string(),
                    }),
                    None => Body::Text(text.to_string()),
                };
                Line { body, ending }
            })
            .collect();
        Self { lines }
    }

    fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.lines.iter().filter_map(|line| match &line.body {
            Body::Set(a) => Some(a),
            Body::Text(_) => None,
        })
    }

    /// Current value of the first assignment to `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.assignments()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Replace the value of every assignment to `key`, returning how many changed
    pub fn set(&mut self, key: &str, value: &str) -> usize {
        let mut replaced = 0;
        for line in &mut self.lines {
            if let Body::Set(a) = &mut line.body {
                if a.key == key {
                    a.value = value.to_string();
                    replaced += 1;
                }
            }
        }
        replaced
    }
}

impl fmt::Display for CmakeVersionFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match &line.body {
                Body::Set(a) => write!(f, "{}{} {}{}", a.head, a.key, a.value, a.tail)?,
                Body::Text(text) => f.write_str(text)?,
            }
            f.write_str(&line.ending)?;
        }
        Ok(())
    }
}

/// Key/value pairs written for a release, in write order
pub fn release_assignments(
    version: &Version,
    sha: &str,
    version_type: VersionType,
) -> Vec<(&'static str, String)> {
    vec![
        ("VERSION_REVISION", version.revision.to_string()),
        (
            "VERSION_DESCRIBE",
            build_version_description(version, version_type),
        ),
        ("VERSION_GITHASH", sha.to_string()),
        ("VERSION_MAJOR", version.major.to_string()),
        ("VERSION_MINOR", version.minor.to_string()),
        ("VERSION_PATCH", version.patch.to_string()),
        ("VERSION_STRING", version.version_string()),
    ]
}

/// Rewrite the version constants in `path`
pub fn update(
    path: &Path,
    version: &Version,
    sha: &str,
    version_type: VersionType,
) -> crate::Result<()> {
    let mut file = CmakeVersionFile::parse(&crate::fsutil::read_to_string(path)?);

    for (key, value) in release_assignments(version, sha, version_type) {
        if file.set(key, &value) == 0 {
            tracing::warn!("{} has no SET({}) line, skipping", path.display(), key);
        }
    }

    crate::fsutil::write_atomic(path, &file.to_string())?;
    tracing::info!("Updated {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# This variables autochanged by release_lib.sh:

SET(VERSION_REVISION 54457)
SET(VERSION_MAJOR 21)
SET(VERSION_MINOR 12)
SET(VERSION_PATCH 1)
SET(VERSION_GITHASH 503a418dedf0011e9040c3a1b6913e0b5488be4c)
SET(VERSION_DESCRIBE v21.12.1.1-prestable)
SET(VERSION_STRING 21.12.1.1)
# end of autochange
";

    #[test]
    fn test_roundtrip_unmodified() {
        assert_eq!(CmakeVersionFile::parse(SAMPLE).to_string(), SAMPLE);

        let crlf = "SET(VERSION_MAJOR 21)\r\nno newline at end";
        assert_eq!(CmakeVersionFile::parse(crlf).to_string(), crlf);
    }

    #[test]
    fn test_get_and_set() {
        let mut file = CmakeVersionFile::parse(SAMPLE);
        assert_eq!(file.get("VERSION_GITHASH"), Some("503a418dedf0011e9040c3a1b6913e0b5488be4c"));

        assert_eq!(file.set("VERSION_MINOR", "13"), 1);
        assert_eq!(file.set("VERSION_TWEAK", "2"), 0);
        assert!(file.to_string().contains("SET(VERSION_MINOR 13)\n"));
    }

    #[test]
    fn test_value_stops_at_bracket_or_space() {
        let mut file = CmakeVersionFile::parse("  SET(VERSION_STRING 1.2.3.4 CACHE STRING \"\")\n");
        file.set("VERSION_STRING", "21.12.1.9174");
        assert_eq!(
            file.to_string(),
            "  SET(VERSION_STRING 21.12.1.9174 CACHE STRING \"\")\n"
        );

        let mut empty = CmakeVersionFile::parse("SET(VERSION_GITHASH )\n");
        empty.set("VERSION_GITHASH", "abc");
        assert_eq!(empty.to_string(), "SET(VERSION_GITHASH abc)\n");
    }

    #[test]
    fn test_only_first_assignment_per_line() {
        let mut file =
            CmakeVersionFile::parse("SET(VERSION_MAJOR 21) SET(VERSION_MAJOR 21)\n");
        assert_eq!(file.set("VERSION_MAJOR", "22"), 1);
        assert_eq!(
            file.to_string(),
            "SET(VERSION_MAJOR 22) SET(VERSION_MAJOR 21)\n"
        );
    }

    #[test]
    fn test_update_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autogenerated_versions.txt");
        std::fs::write(&path, SAMPLE).unwrap();

        let version = Version::new(21, 12, 1, 9174, 54458);
        update(&path, &version, "81942b8128", VersionType::Testing).unwrap();

        let expected = "\
# This variables autochanged by release_lib.sh:

SET(VERSION_REVISION 54458)
SET(VERSION_MAJOR 21)
SET(VERSION_MINOR 12)
SET(VERSION_PATCH 1)
SET(VERSION_GITHASH 81942b8128)
SET(VERSION_DESCRIBE v21.12.1.9174-testing)
SET(VERSION_STRING 21.12.1.9174)
# end of autochange
";
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_update_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let version = Version::new(1, 2, 3, 4, 5);
        let err = update(&dir.path().join("absent"), &version, "sha", VersionType::Stable)
            .unwrap_err();
        assert!(matches!(err, crate::Error::FileSystem { .. }));
    }
}
