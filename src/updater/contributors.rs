//! Regenerating the contributors list

use std::path::Path;
use std::process::Command;

/// Run `script` with no arguments from `dir`.
///
/// A script given as a path (`./x.sh`) is taken relative to `dir`; a bare
/// name is looked up on `PATH`.
pub fn update(dir: &Path, script: &str) -> crate::Result<()> {
    let program = if script.contains(std::path::MAIN_SEPARATOR) || script.contains('/') {
        dir.join(script)
    } else {
        script.into()
    };
    let output = crate::process::run(Command::new(program).current_dir(dir))?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        tracing::debug!("{}: {}", script, line);
    }
    tracing::info!("Regenerated contributors in {}", dir.display());
    Ok(())
}
