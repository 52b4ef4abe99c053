use std::process::Command;

fn main() {
    // Rerun this script if .git directory changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    // Prefer the nearest tag with commit distance, fall back to the crate version
    let output = Command::new("git")
        .args(["describe", "--long", "--always", "--dirty"])
        .output();

    let version = match output {
        Ok(o) if o.status.success() => String::from_utf8(o.stdout)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
    .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=GIT_VERSION={}", version);
}
