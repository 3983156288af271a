use std::path::Path;
use std::process::Command;

const BUILD_ID_VAR: &str = "TALLY_BUILD_SHA";

/// `git describe` for the workspace, `None` outside a checkout or without git.
fn describe(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--abbrev=10"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let id = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!id.is_empty()).then_some(id)
}

fn main() {
    println!("cargo:rerun-if-env-changed={BUILD_ID_VAR}");

    // Release packaging sets the id explicitly.
    let build_id = match std::env::var(BUILD_ID_VAR) {
        Ok(id) if !id.trim().is_empty() => id,
        _ => {
            let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
            let workspace = Path::new(&manifest_dir).join("..");
            println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());
            describe(&workspace).unwrap_or_else(|| "unknown".into())
        }
    };

    println!("cargo:rustc-env={BUILD_ID_VAR}={build_id}");
}
