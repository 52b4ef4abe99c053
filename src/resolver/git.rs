//! Tweak number from `git describe`

use crate::version::VersionType;
use std::path::Path;
use std::process::Command;

/// Run `git describe --long` inside `repo`
pub fn describe(repo: &Path) -> crate::Result<String> {
    let output = crate::process::run(
        Command::new("git")
            .args(["describe", "--long"])
            .current_dir(repo),
    )?;
    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    tracing::debug!("git describe: {}", described);
    Ok(described)
}

/// Parse the leading four-component tag `v<major>.<minor>.<patch>.<tweak>`
fn tag_tweak(output: &str, tag: &str) -> crate::Result<u32> {
    let numbers = tag
        .strip_prefix('v')
        .ok_or_else(|| crate::Error::git_describe(output, format!("tag {tag:?} lacks 'v'")))?;

    let parts: Vec<&str> = numbers.split('.').collect();
    if parts.len() != 4 {
        return Err(crate::Error::git_describe(
            output,
            format!("tag {tag:?} must have four numeric components"),
        ));
    }

    let mut parsed = [0u32; 4];
    for (slot, part) in parsed.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| {
            crate::Error::git_describe(output, format!("non-numeric component {part:?} in tag"))
        })?;
    }
    Ok(parsed[3])
}

/// Derive the tweak from `git describe --long` output.
///
/// Output looks like `v21.11.4.14-stable-31-gd6aab025e0` or
/// `v21.11.4.14-31-gd6aab025e0`. The commit count sits right before the
/// `g<hash>` field. Testing builds add the previous tag's tweak to it so the
/// numbers keep growing across the testing lineage.
pub fn tweak_from_describe(output: &str) -> crate::Result<u32> {
    let output = output.trim();
    let fields: Vec<&str> = output.split('-').collect();
    if fields.len() < 3 {
        return Err(crate::Error::git_describe(
            output,
            "expected <tag>-<count>-g<hash>",
        ));
    }

    let hash = fields[fields.len() - 1];
    if !hash.starts_with('g') {
        return Err(crate::Error::git_describe(
            output,
            format!("last field {hash:?} is not an abbreviated hash"),
        ));
    }

    let count = fields[fields.len() - 2];
    let mut tweak: u32 = count.parse().map_err(|_| {
        crate::Error::git_describe(output, format!("commit count {count:?} is not a number"))
    })?;

    if output.contains(VersionType::Testing.as_str()) {
        let previous = tag_tweak(output, fields[0])?;
        tweak = tweak
            .checked_add(previous)
            .ok_or(crate::Error::Overflow("tweak"))?;
    }

    Ok(tweak)
}
