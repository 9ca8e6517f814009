//! Embeds a build counter and compile time into the SnapRecipe binaries.
//!
//! The counter lives in `OUT_DIR`, so it survives incremental rebuilds of a
//! profile without writing into the source tree.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=Cargo.toml");

    let counter = PathBuf::from(env::var("OUT_DIR")?).join("snaprecipe_build_number");
    let previous = fs::read_to_string(&counter)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let build_number = previous + 1;
    fs::write(&counter, build_number.to_string())?;

    println!("cargo:rustc-env=SNAPRECIPE_BUILD_NUMBER={}", build_number);
    println!(
        "cargo:rustc-env=SNAPRECIPE_BUILD_TIMESTAMP={}",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
    println!(
        "cargo:rustc-env=SNAPRECIPE_BUILD_PROFILE={}",
        env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string())
    );
    Ok(())
}
