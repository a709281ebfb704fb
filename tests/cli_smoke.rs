use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_panel-scroll")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "panel-scroll.exe"
            } else {
                "panel-scroll"
            });
            p
        })
}

#[test]
fn cli_fails_on_empty_image_dir() {
    let images = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("video.mp4");

    let output = Command::new(exe())
        .arg(images.path())
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn cli_rejects_unreadable_config() {
    let images = tempfile::tempdir().unwrap();
    let missing = images.path().join("missing.json");

    let status = Command::new(exe())
        .arg(images.path())
        .arg("--config")
        .arg(&missing)
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
}

#[test]
fn cli_requires_image_dir() {
    let status = Command::new(exe()).status().unwrap();
    assert!(!status.success());
}
