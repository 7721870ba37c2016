//! Build script for roadsense-dash
//!
//! Exposes `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` to the crate for
//! the startup log line and `/api/buildinfo`.

use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    let build_info = [
        ("GIT_HASH", git_short_hash().unwrap_or_else(|| UNKNOWN.to_string())),
        (
            "BUILD_TIMESTAMP",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        ),
        (
            "BUILD_PROFILE",
            env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()),
        ),
    ];
    for (key, value) in build_info {
        println!("cargo:rustc-env={}={}", key, value);
    }

    // Workspace root holds .git; a tarball build has none and keeps "unknown"
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Eight-character commit hash of HEAD, if built from a git checkout
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}
