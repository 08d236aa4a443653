#![forbid(unsafe_code)]

use std::process::Command;

fn main() {
    // Git values fall back to "unknown" when building outside a git checkout.
    emit("GIT_BRANCH", git(&["rev-parse", "--abbrev-ref", "HEAD"]));
    emit("GIT_COMMIT_SHORT", git(&["rev-parse", "--short", "HEAD"]));
    emit("GIT_DIRTY", git_dirty());
    emit("SOURCE_TIMESTAMP", git(&["log", "-1", "--pretty=%cI"])); // Using BUILD_TIMESTAMP makes build unreproducible.

    build_data::set_RUSTC_VERSION();
}

fn emit(key: &str, value: Option<String>) {
    println!(
        "cargo:rustc-env={}={}",
        key,
        value.unwrap_or_else(|| "unknown".to_string())
    );
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn git_dirty() -> Option<String> {
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some((!output.stdout.is_empty()).to_string())
}
