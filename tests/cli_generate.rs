//! CLI integration tests for the generate and palette commands
#![cfg(feature = "hybrid")]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run pixmon inside `dir`, isolated from any user config.
fn pixmon(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pixmon"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute pixmon")
}

#[test]
fn test_generate_offline_writes_files() {
    let work = TempDir::new().unwrap();
    let out = work.path().join("out");
    let output = pixmon(
        work.path(),
        &["generate", "fire dragon", "--offline", "-q", "2", "-o", out.to_str().unwrap()],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    for name in ["fire_dragon_1.png", "fire_dragon_2.png", "fire_dragon_1.wav", "fire_dragon_2.wav"]
    {
        assert!(out.join(name).exists(), "missing {}", name);
    }
    assert!(!out.join("fire_dragon_3.png").exists());

    let image = image::open(out.join("fire_dragon_1.png")).unwrap();
    assert_eq!((image.width(), image.height()), (64, 64));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Saved:").count(), 4);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Local Fake AI Generator (Fallback)"));
}

#[test]
fn test_generate_json() {
    let work = TempDir::new().unwrap();
    let output = pixmon(work.path(), &["generate", "purple ghost", "--offline", "--json", "--size", "32"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["success"], true);
    assert_eq!(json["aiEnhanced"], false);
    assert_eq!(json["images"].as_array().unwrap().len(), 4);
    assert_eq!(json["audios"].as_array().unwrap().len(), 4);
    assert!(json["images"][0].as_str().unwrap().starts_with("data:image/png;base64,"));
}

#[test]
fn test_generate_unreachable_endpoint_still_succeeds() {
    let work = TempDir::new().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let endpoint = format!("http://127.0.0.1:{}/enhance", port);
    let output = pixmon(
        work.path(),
        &["generate", "slime", "--endpoint", &endpoint, "-q", "1", "--json"],
    );

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["method"], "Local Fake AI Generator (Fallback)");
}

#[test]
fn test_generate_rejects_unsupported_size() {
    let work = TempDir::new().unwrap();
    let output = pixmon(work.path(), &["generate", "bat", "--offline", "--size", "48"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("pixel_size"));
}

#[test]
fn test_generate_rejects_short_palette() {
    let work = TempDir::new().unwrap();
    let output = pixmon(work.path(), &["generate", "bat", "--offline", "--colors", "#ff0000,#00ff00"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_generate_bad_color_fails() {
    let work = TempDir::new().unwrap();
    let output = pixmon(
        work.path(),
        &["generate", "bat", "--offline", "-q", "1", "--colors", "#ff0000,nope,#0000ff"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Generation failed"));
}

#[test]
fn test_generate_reads_project_config() {
    let work = TempDir::new().unwrap();
    std::fs::write(
        work.path().join("pixmon.toml"),
        "[enhancement]\nenabled = false\n\n[defaults]\npixel_size = 128\nquantity = 1\n",
    )
    .unwrap();

    let output = pixmon(work.path(), &["generate", "ice golem", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["images"].as_array().unwrap().len(), 1);
}

#[test]
fn test_palette_json() {
    let work = TempDir::new().unwrap();
    let output = pixmon(work.path(), &["palette", "fire dragon", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["family"], "fire");
    assert_eq!(json["palette"]["white"], "#ffffff");
    assert!(["slime", "legged", "floating", "winged"].contains(&json["archetype"].as_str().unwrap()));
}

#[test]
fn test_palette_empty_description() {
    let work = TempDir::new().unwrap();
    let output = pixmon(work.path(), &["palette", "  "]);
    assert_eq!(output.status.code(), Some(2));
}
