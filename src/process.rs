//! External command execution

use std::process::{Command, Output};

/// Render a command as `program arg1 arg2` for logs and errors
fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command to completion and fail on a non-zero exit status
pub fn run(command: &mut Command) -> crate::Result<Output> {
    let rendered = describe(command);
    match command.get_current_dir() {
        Some(dir) => tracing::debug!("Running `{}` in {}", rendered, dir.display()),
        None => tracing::debug!("Running `{}`", rendered),
    }

    let output = command
        .output()
        .map_err(|source| crate::Error::CommandSpawn {
            command: rendered.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(crate::Error::CommandFailed {
            command: rendered,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}
