//! Exit status and console output of the `ogshot` binary (no Chrome needed)

#![cfg(feature = "cdp")]

use std::path::Path;
use std::process::{Command, Output};

fn ogshot(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ogshot"))
        .args(args)
        // Keep stderr to the error line alone.
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to spawn ogshot")
}

fn pngs_under(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(d) = stack.pop() {
        for entry in std::fs::read_dir(&d).unwrap().flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|e| e == "png") {
                found.push(path);
            }
        }
    }
    found
}

#[test]
fn unknown_catalog_entry_exits_with_error() {
    let out = ogshot(&["--only", "nope.png"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("Error:"), "stderr was: {}", stderr);
    assert!(stderr.contains("nope.png"));
}

#[test]
fn browser_launch_failure_exits_without_writing_images() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_str().unwrap();
    let out = ogshot(&["--chrome", "/nonexistent/chrome", "--out-dir", out_dir]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("Error:"), "stderr was: {}", stderr);
    assert!(!String::from_utf8_lossy(&out.stdout).contains("✓ Generated"));
    assert!(pngs_under(dir.path()).is_empty());
}

#[test]
fn list_prints_catalog_as_json() {
    let out = ogshot(&["--list"]);
    assert_eq!(out.status.code(), Some(0));

    let catalog: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    let entries = catalog.as_array().expect("JSON array");
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0]["output_path"], "og-image.png");
    assert_eq!(entries[0]["title"], "MUIN");
}

#[test]
#[ignore] // Requires Chrome to be installed
fn rendering_reports_each_image_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_str().unwrap();
    let out = ogshot(&["--only", "og-image.png", "--out-dir", out_dir]);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let expected = dir.path().join("og-image.png");
    assert!(stdout.contains(&format!("✓ Generated: {}", expected.display())));
    assert!(stdout.contains("Generated 1 images in"));
    assert_eq!(pngs_under(dir.path()), vec![expected]);
}
