//! Generates `build_info.rs` in OUT_DIR with the commit and date shown by
//! `labyrinth --version`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .or_else(short_head)
        .unwrap_or_else(|| UNKNOWN.to_string());
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    let source = format!(
        "pub const BUILD_COMMIT: &str = {commit:?};\npub const BUILD_DATE: &str = {date:?};\n"
    );
    fs::write(out_dir.join("build_info.rs"), source).expect("OUT_DIR is writable");

    for var in ["BUILD_COMMIT", "BUILD_DATE"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}

/// Abbreviated hash of HEAD, or None outside a git checkout
fn short_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}
