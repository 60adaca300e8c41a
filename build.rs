//! Build script for admin-console
//!
//! Stamps the binary with the git revision, build time, target and profile
//! so `admin-console version` can report which build talks to the backend.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let git_hash = git_short_hash();
    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=CONSOLE_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=CONSOLE_BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=CONSOLE_TARGET={}", target);
    println!("cargo:rustc-env=CONSOLE_PROFILE={}", profile);
}

/// Short commit hash, or "unknown" outside a git checkout
fn git_short_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
