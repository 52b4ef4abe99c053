//! Pinning the package version in Dockerfiles

use crate::version::Version;
use glob::glob;
use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};

/// Matches `ARG <name>=<anything up to end of line>`
fn arg_pattern(arg: &str) -> crate::Result<Regex> {
    Regex::new(&format!(r"(?m)ARG {}=[^\r\n]+", regex::escape(arg)))
        .map_err(|e| crate::Error::Config(format!("docker version_arg {arg:?}: {e}")))
}

/// Replace the value of every `ARG <arg>=...` line, returning the new text
/// and how many lines changed
pub fn rewrite(content: &str, arg: &str, value: &str) -> crate::Result<(String, usize)> {
    let pattern = arg_pattern(arg)?;
    let count = pattern.find_iter(content).count();
    let replacement = format!("ARG {arg}={value}");
    let rewritten = pattern.replace_all(content, NoExpand(&replacement)).into_owned();
    Ok((rewritten, count))
}

/// Dockerfiles under `repo` matching `pattern`, sorted
pub fn find_dockerfiles(repo: &Path, pattern: &str) -> crate::Result<Vec<PathBuf>> {
    let full = repo.join(pattern);
    let full = full.to_string_lossy();
    let mut files = glob(&full)?.collect::<std::result::Result<Vec<_>, _>>()?;
    files.retain(|p| p.is_file());
    files.sort();

    if files.is_empty() {
        return Err(crate::Error::NoDockerfiles {
            pattern: full.into_owned(),
        });
    }
    Ok(files)
}

/// Point every matched Dockerfile at `major.minor.patch.*`
pub fn update(
    repo: &Path,
    pattern: &str,
    arg: &str,
    version: &Version,
) -> crate::Result<Vec<PathBuf>> {
    let value = version.docker_version();
    let files = find_dockerfiles(repo, pattern)?;

    for file in &files {
        let content = crate::fsutil::read_to_string(file)?;
        let (rewritten, count) = rewrite(&content, arg, &value)?;
        if count == 0 {
            tracing::debug!("{} has no ARG {}", file.display(), arg);
        }
        crate::fsutil::write_atomic(file, &rewritten)?;
        tracing::info!("Updated {} ({} ARG {})", file.display(), count, arg);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCKERFILE: &str = "\
FROM ubuntu:20.04

ARG repository=\"deb https://repo.clickhouse.com/deb/stable/ main/\"
ARG version=21.11.4.*
ARG gosu_ver=1.10

RUN apt-get install clickhouse-server=$version
";

    #[test]
    fn test_rewrite() {
        let (text, count) = rewrite(DOCKERFILE, "version", "21.12.1.*").unwrap();
        assert_eq!(count, 1);
        assert!(text.contains("\nARG version=21.12.1.*\n"));
        assert!(text.contains("ARG gosu_ver=1.10"));
        assert!(text.contains("clickhouse-server=$version"));
    }

    #[test]
    fn test_rewrite_needs_a_value() {
        let (text, count) = rewrite("ARG version=\nARG version\n", "version", "1.2.3.*").unwrap();
        assert_eq!(count, 0);
        assert_eq!(text, "ARG version=\nARG version\n");
    }

    #[test]
    fn test_rewrite_keeps_crlf() {
        let (text, _) = rewrite("ARG version=1.1.1.*\r\nFROM x\r\n", "version", "2.2.2.*").unwrap();
        assert_eq!(text, "ARG version=2.2.2.*\r\nFROM x\r\n");
    }

    #[test]
    fn test_update_all_dockerfiles() {
        let dir = tempfile::tempdir().unwrap();
        for image in ["server", "client"] {
            let image_dir = dir.path().join("docker").join(image);
            std::fs::create_dir_all(&image_dir).unwrap();
            std::fs::write(image_dir.join("Dockerfile"), DOCKERFILE).unwrap();
        }
        // Not matched by docker/*/Dockerfile
        std::fs::write(dir.path().join("docker").join("Dockerfile"), DOCKERFILE).unwrap();

        let version = Version::new(21, 12, 1, 9174, 54458);
        let files = update(dir.path(), "docker/*/Dockerfile", "version", &version).unwrap();

        assert_eq!(files.len(), 2);
        for file in files {
            let content = std::fs::read_to_string(file).unwrap();
            assert!(content.contains("ARG version=21.12.1.*\n"));
        }
        let untouched = std::fs::read_to_string(dir.path().join("docker").join("Dockerfile")).unwrap();
        assert_eq!(untouched, DOCKERFILE);
    }

    #[test]
    fn test_no_dockerfiles() {
        let dir = tempfile::tempdir().unwrap();
        let version = Version::new(1, 2, 3, 4, 5);
        let err = update(dir.path(), "docker/*/Dockerfile", "version", &version).unwrap_err();
        assert!(matches!(err, crate::Error::NoDockerfiles { .. }));
    }
}
