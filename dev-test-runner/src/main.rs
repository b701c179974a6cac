//! Golden-file runner: every `fixtures/<name>.json` must convert to exactly
//! `fixtures/<name>.go`, with `<name>` as the type name.
//!
//! `--bless` rewrites the expectations from the current output.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

fn fixtures_dir() -> PathBuf {
    std::env::args()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures"))
}

fn check(json_path: &Path, bless: bool) -> Result<bool> {
    let stem = json_path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let source = std::fs::read_to_string(json_path)?;
    let actual = json_to_go::convert(&source, &stem)?;
    let golden = json_path.with_extension("go");

    if bless {
        std::fs::write(&golden, &actual)?;
        return Ok(true);
    }
    let expected = std::fs::read_to_string(&golden)
        .with_context(|| format!("missing expectation {}", golden.display()))?;
    if expected.trim_end() == actual {
        return Ok(true);
    }
    eprintln!("--- expected\n{}\n--- actual\n{actual}", expected.trim_end());
    Ok(false)
}

fn main() -> Result<()> {
    let bless = std::env::args().any(|a| a == "--bless");
    let dir = fixtures_dir();

    let mut inputs: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    inputs.sort();

    let mut failed = 0;
    for path in &inputs {
        match check(path, bless) {
            Ok(true) => println!("{} {}", "ok".green(), path.display()),
            Ok(false) => {
                failed += 1;
                println!("{} {}", "FAIL".red().bold(), path.display());
            }
            Err(error) => {
                failed += 1;
                println!("{} {}: {error:#}", "ERROR".red().bold(), path.display());
            }
        }
    }

    println!("{} fixtures, {failed} failed", inputs.len());
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
