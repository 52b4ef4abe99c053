//! CLI interface using clap

use crate::version::{Version, VersionType};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// version-helper - release version bookkeeping
///
/// Derives the release version from `git describe` and the CMake version file,
/// then rewrites the contributors list, CMake constants, Debian changelog and
/// Dockerfiles to match.
///
/// Tip: Run 'version-helper <COMMAND> --help' for detailed usage options.
#[derive(Parser, Debug)]
#[command(name = "version-helper")]
#[command(author, version = env!("GIT_VERSION"), about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and print the current version
    ///
    /// Reads major, minor, patch and revision from the CMake version file and
    /// computes the tweak from `git describe --long`.
    #[command(visible_alias = "s")]
    Show {
        /// Repository root
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Write the version into all release artifacts
    ///
    /// Runs the contributors script, then rewrites the CMake version file,
    /// the Debian changelog and every Dockerfile, in that order.
    #[command(visible_alias = "u")]
    Update {
        /// Commit SHA recorded as VERSION_GITHASH
        #[arg(long)]
        sha: String,

        /// Repository root
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,

        /// Release channel
        #[arg(short = 't', long = "type", default_value = "testing")]
        version_type: VersionType,

        /// Bump the resolved version before writing it
        #[arg(short, long, default_value = "none")]
        bump: Bump,

        /// Show what would be written without touching anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Initialize or show configuration
    ///
    /// Creates a default configuration file or displays current settings.
    Config {
        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Path for configuration file
        #[arg(long)]
        path: Option<String>,
    },
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary
    #[default]
    Text,
    /// Output as JSON
    Json,
}

/// Version bump applied before updating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Bump {
    /// Keep the resolved version
    #[default]
    None,
    /// Next minor release (also advances the revision)
    Minor,
    /// Next patch release
    Patch,
    /// Next tweak
    Tweak,
}

impl Bump {
    /// Apply this bump to `version`
    pub fn apply(self, version: &Version) -> crate::Result<Version> {
        match self {
            Bump::None => Ok(*version),
            Bump::Minor => version.minor_update(),
            Bump::Patch => version.patch_update(),
            Bump::Tweak => version.tweak_update(),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_update_defaults() {
        let cli = Cli::try_parse_from(["version-helper", "update", "--sha", "abc"]).unwrap();
        match cli.command {
            Commands::Update {
                sha,
                repo,
                version_type,
                bump,
                dry_run,
                yes,
            } => {
                assert_eq!(sha, "abc");
                assert_eq!(repo, PathBuf::from("."));
                assert_eq!(version_type, VersionType::Testing);
                assert_eq!(bump, Bump::None);
                assert!(!dry_run);
                assert!(!yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_update_requires_sha() {
        assert!(Cli::try_parse_from(["version-helper", "update"]).is_err());
    }

    #[test]
    fn test_stable_type() {
        let cli =
            Cli::try_parse_from(["version-helper", "update", "--sha", "abc", "-t", "stable"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Update {
                version_type: VersionType::Stable,
                ..
            }
        ));
    }

    #[test]
    fn test_bump_apply() {
        let v = Version::new(21, 11, 4, 14, 54456);
        assert_eq!(Bump::None.apply(&v).unwrap(), v);
        assert_eq!(Bump::Minor.apply(&v).unwrap(), Version::new(21, 12, 1, 1, 54457));
        assert_eq!(Bump::Patch.apply(&v).unwrap(), Version::new(21, 11, 5, 1, 54456));
        assert_eq!(Bump::Tweak.apply(&v).unwrap(), Version::new(21, 11, 4, 15, 54456));
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let v = Version::new(21, 11, 4, u32::MAX, u32::MAX);
        assert!(Bump::None.apply(&v).is_ok());
        assert!(matches!(
            Bump::Minor.apply(&v),
            Err(crate::Error::Overflow("revision"))
        ));
        assert!(matches!(
            Bump::Tweak.apply(&v),
            Err(crate::Error::Overflow("tweak"))
        ));
    }
}
