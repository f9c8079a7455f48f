use assert_cmd::Command;
use image::{ImageFormat, Rgba, RgbaImage};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn painter_cmd(temp: &Path) -> Command {
    let config = temp.join("config.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("logo-painter").expect("binary exists");
    cmd.arg("--config").arg(&config);
    cmd
}

fn write_png(path: &Path, img: &RgbaImage) {
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

#[test]
fn help_prints_usage() {
    Command::cargo_bin("logo-painter")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paint and store brand logos"));
}

#[test]
fn brand_is_required() {
    Command::cargo_bin("logo-painter")
        .unwrap()
        .arg("--export")
        .arg("out.png")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--brand"));
}

#[test]
fn export_without_stored_logo_is_blank_white() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out.png");

    painter_cmd(temp.path())
        .args(["--brand", "12", "--store"])
        .arg(temp.path().join("brands"))
        .arg("--export")
        .arg(&out)
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (500, 500));
    assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
}

#[test]
fn stored_logo_is_loaded_centered() {
    let temp = TempDir::new().unwrap();
    let brands = temp.path().join("brands");
    std::fs::create_dir_all(&brands).unwrap();
    write_png(
        &brands.join("3.png"),
        &RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 255])),
    );
    let out = temp.path().join("out.png");

    painter_cmd(temp.path())
        .args(["--brand", "3", "--store"])
        .arg(&brands)
        .arg("--export")
        .arg(&out)
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(*img.get_pixel(225, 225), Rgba([255, 0, 0, 255]));
    assert_eq!(*img.get_pixel(274, 274), Rgba([255, 0, 0, 255]));
    assert_eq!(*img.get_pixel(224, 250), Rgba([255, 255, 255, 255]));
    assert_eq!(*img.get_pixel(275, 250), Rgba([255, 255, 255, 255]));
}

#[test]
fn unreadable_stored_logo_starts_blank() {
    let temp = TempDir::new().unwrap();
    let brands = temp.path().join("brands");
    std::fs::create_dir_all(&brands).unwrap();
    std::fs::write(brands.join("5.png"), b"corrupted").unwrap();
    let out = temp.path().join("out.png");

    painter_cmd(temp.path())
        .args(["--brand", "5", "--store"])
        .arg(&brands)
        .arg("--export")
        .arg(&out)
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba8();
    assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
}

#[test]
fn bad_import_file_fails() {
    let temp = TempDir::new().unwrap();
    let junk = temp.path().join("junk.png");
    std::fs::write(&junk, b"not an image").unwrap();

    painter_cmd(temp.path())
        .args(["--brand", "1", "--store"])
        .arg(temp.path().join("brands"))
        .arg("--import")
        .arg(&junk)
        .arg("--export")
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to import"));
}

#[test]
fn canvas_size_comes_from_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "[canvas]\nwidth = 64\nheight = 48\nbackground = [0, 0, 0]\n",
    )
    .unwrap();
    let out = temp.path().join("out.png");

    painter_cmd(temp.path())
        .args(["--brand", "9", "--store"])
        .arg(temp.path().join("brands"))
        .arg("--export")
        .arg(&out)
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 48));
    assert_eq!(*img.get_pixel(10, 10), Rgba([0, 0, 0, 255]));
}
