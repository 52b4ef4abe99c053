//! version-helper - release version bookkeeping
//!
//! Resolves the release version of a repository and writes it into the
//! CMake version file, Debian changelog, contributors list and Dockerfiles.

use anyhow::Context;
use colored::*;
use dialoguer::Confirm;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use version_helper::{
    Version, VersionType, build_version_description,
    config::Config,
    get_version_from_repo,
    resolver::{Resolved, resolve},
    ui::{Bump, Cli, Commands, OutputFormat},
    update_version_local,
    updater::cmake::release_assignments,
};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Disable colors if requested
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load_or_default()
    };

    // Handle commands
    match cli.command {
        Commands::Show { repo, format } => {
            run_show(&repo, format, &config)?;
        }
        Commands::Update {
            sha,
            repo,
            version_type,
            bump,
            dry_run,
            yes,
        } => {
            run_update(&repo, &sha, version_type, bump, dry_run, yes, &config)?;
        }
        Commands::Config { init, show, path } => {
            run_config(init, show, path)?;
        }
    }

    Ok(())
}

/// Machine readable form of `show`
#[derive(Serialize)]
struct VersionReport<'a> {
    version: String,
    major: u32,
    minor: u32,
    patch: u32,
    tweak: u32,
    revision: u32,
    describe: &'a str,
    docker_version: String,
}

/// Run the show command
fn run_show(repo: &Path, format: OutputFormat, config: &Config) -> anyhow::Result<()> {
    let Resolved { version, describe } = resolve(repo, config)
        .with_context(|| format!("Could not resolve version of {}", repo.display()))?;

    match format {
        OutputFormat::Text => {
            println!("{} {}", "Version:".bold(), version.to_string().green().bold());
            println!("{} {}", "Revision:".bold(), version.revision);
            println!("{} {}", "git describe:".bold(), describe);
            for version_type in [VersionType::Testing, VersionType::Stable] {
                println!(
                    "  {} {}",
                    "▸".cyan(),
                    build_version_description(&version, version_type)
                );
            }
        }
        OutputFormat::Json => {
            let report = VersionReport {
                version: version.version_string(),
                major: version.major,
                minor: version.minor,
                patch: version.patch,
                tweak: version.tweak,
                revision: version.revision,
                describe: &describe,
                docker_version: version.docker_version(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Print what `update` is about to write
fn print_plan(repo: &Path, version: &Version, sha: &str, version_type: VersionType, config: &Config) {
    let paths = &config.paths;
    println!(
        "\n{} {} ({})",
        "📦 Release".cyan().bold(),
        version.to_string().green().bold(),
        version_type
    );
    println!("{}", "═".repeat(60));

    println!(
        "{} run {} in {}",
        "1.".bold(),
        paths.contributors_script,
        repo.join(&paths.contributors_dir).display()
    );
    println!("{} {}", "2.".bold(), repo.join(&paths.version_file).display());
    for (key, value) in release_assignments(version, sha, version_type) {
        println!("     SET({} {})", key, value.yellow());
    }
    println!(
        "{} {} -> {}",
        "3.".bold(),
        repo.join(&paths.changelog_template).display(),
        repo.join(&paths.changelog).display()
    );
    println!(
        "{} {} ARG {}={}",
        "4.".bold(),
        repo.join(&paths.dockerfile_glob).display(),
        config.docker.version_arg,
        version.docker_version().yellow()
    );
    println!("{}", "═".repeat(60));
}

/// Run the update command
fn run_update(
    repo: &Path,
    sha: &str,
    version_type: VersionType,
    bump: Bump,
    dry_run: bool,
    yes: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let resolved = get_version_from_repo(repo, config)
        .with_context(|| format!("Could not resolve version of {}", repo.display()))?;
    let version = bump
        .apply(&resolved)
        .with_context(|| format!("Cannot apply {:?} bump to {}", bump, resolved))?;
    if bump != Bump::None {
        tracing::info!("Bumped {} -> {}", resolved, version);
    }

    print_plan(repo, &version, sha, version_type, config);

    if dry_run {
        println!("{}", "\nDry run mode - nothing was written.".cyan());
        return Ok(());
    }

    if !yes {
        let confirm = Confirm::new()
            .with_prompt(format!("\nWrite version {} into {}?", version, repo.display()))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirm {
            println!("{}", "\n❌ Cancelled.".yellow());
            return Ok(());
        }
    }

    update_version_local(repo, sha, &version, version_type, config)
        .with_context(|| format!("Release update of {} stopped", repo.display()))?;

    println!(
        "\n{} {} written to {}",
        "✅".green(),
        build_version_description(&version, version_type).green().bold(),
        repo.display()
    );

    Ok(())
}

/// Run the config command
fn run_config(init: bool, show: bool, path: Option<String>) -> anyhow::Result<()> {
    let config_path = match path {
        Some(p) => std::path::PathBuf::from(p),
        None => Config::default_path()?,
    };

    if init {
        if config_path.exists() {
            anyhow::bail!(
                "{} already exists, remove it first to regenerate",
                config_path.display()
            );
        }
        Config::default()
            .save(&config_path)
            .with_context(|| format!("Could not write {}", config_path.display()))?;
        println!(
            "{} Default release paths written to {}",
            "✅".green(),
            config_path.display()
        );
    } else if show {
        let (config, source) = if config_path.exists() {
            let config = Config::load(&config_path)
                .with_context(|| format!("Could not read {}", config_path.display()))?;
            (config, config_path.display().to_string())
        } else {
            (Config::default(), "built-in defaults".to_string())
        };

        println!("{} {}", "Configuration from".bold(), source.cyan());
        println!("{}", "═".repeat(60));
        println!("{}", toml::to_string_pretty(&config)?);
    } else {
        println!("{} {}", "Config file:".bold(), config_path.display());
        println!(
            "  {} write the default paths and changelog identity",
            "version-helper config --init [--path <PATH>]".cyan()
        );
        println!(
            "  {} print the configuration update/show would use",
            "version-helper config --show [--path <PATH>]".cyan()
        );
    }

    Ok(())
}
