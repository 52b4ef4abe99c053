//! Reading `SET(VERSION_*)` values from the CMake version file

use std::path::Path;

/// Fields read from the version file; tweak comes from git instead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionFields {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub revision: u32,
}

/// Marker, whether a `SET` is required on the line
const MARKERS: [(&str, bool); 4] = [
    ("VERSION_MAJOR", true),
    ("VERSION_MINOR", true),
    ("VERSION_PATCH", true),
    ("VERSION_REVISION", false),
];

/// Lines mentioning this are computed values, never the source of truth
const IGNORE_MARKER: &str = "math";

/// Which field a line sets, if any. The first matching marker wins.
fn field_for_line(line: &str) -> Option<usize> {
    if line.contains(IGNORE_MARKER) {
        return None;
    }
    MARKERS
        .iter()
        .position(|(marker, needs_set)| line.contains(marker) && (!needs_set || line.contains("SET")))
}

/// Value of a `SET(VERSION_X value)` line: second token minus the closing bracket
pub fn value_from_line(line: &str) -> Option<&str> {
    let mut tokens = line.trim().split(' ');
    let (_, value) = (tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }
    let mut chars = value.chars();
    chars.next_back()?;
    Some(chars.as_str())
}

/// Parse the version file contents. `path` is only used for error messages.
pub fn parse(content: &str, path: &Path) -> crate::Result<VersionFields> {
    let mut values: [Option<u32>; 4] = [None; 4];

    for line in content.lines() {
        let Some(index) = field_for_line(line) else {
            continue;
        };
        let field = MARKERS[index].0;
        let value = value_from_line(line)
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| crate::Error::invalid_field(field, path, line))?;
        tracing::debug!("{} = {}", field, value);
        values[index] = Some(value);
    }

    let get = |index: usize| {
        values[index].ok_or_else(|| crate::Error::MissingVersionField {
            field: MARKERS[index].0,
            path: path.to_path_buf(),
        })
    };

    Ok(VersionFields {
        major: get(0)?,
        minor: get(1)?,
        patch: get(2)?,
        revision: get(3)?,
    })
}

/// Read and parse the version file at `path`
pub fn read(path: &Path) -> crate::Result<VersionFields> {
    let content = crate::fsutil::read_to_string(path)?;
    parse(&content, path)
}
