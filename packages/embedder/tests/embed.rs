use std::{fs, path::Path, thread, time::Duration};

use embedder::{
  check_all, embed_all, embed_asset, parse_literal, verify_generated,
  Asset, EmbedOptions, Freshness, Language, Manifest, Outcome,
};
use tempfile::TempDir;

fn options_in(dir: &Path, language: Language) -> EmbedOptions {
  EmbedOptions {
    out_dir: dir.join("config"),
    language,
    ..Default::default()
  }
}

fn write_asset(dir: &Path, file: &str, bytes: &[u8]) -> Asset {
  let path = dir.join(file);
  fs::write(&path, bytes).expect("failed to write fixture asset");
  Asset::new(path, file.split('.').next().unwrap_or(file))
}

#[test]
fn fixture_bytes_land_in_named_variable() {
  let dir = TempDir::new().unwrap();
  let asset = write_asset(dir.path(), "test.bin", &[0, 255, 65, 10]);

  let report = embed_asset(&asset, &options_in(dir.path(), Language::Go))
    .expect("embedding should succeed");

  assert_eq!(report.byte_count, 4);
  assert_eq!(report.outcome, Outcome::Written);
  assert_eq!(report.destination, dir.path().join("config/test.go"));

  let generated = fs::read_to_string(&report.destination).unwrap();
  assert!(generated.starts_with("package config\n"));
  assert!(generated.contains("var test = []byte{"));
  assert!(generated.contains("0, 255, 65, 10,"));
}

#[test]
fn generated_literal_round_trips_for_both_languages() {
  let dir = TempDir::new().unwrap();
  let bytes: Vec<u8> = (0..=255).rev().chain(0..=255).collect();
  let asset = write_asset(dir.path(), "font.ttf", &bytes);

  for language in [Language::Go, Language::Rust] {
    let report =
      embed_asset(&asset, &options_in(dir.path(), language)).unwrap();
    let generated = fs::read_to_string(&report.destination).unwrap();

    assert_eq!(parse_literal(&generated, language).unwrap(), bytes);
    assert_eq!(
      verify_generated(&report.destination, &asset.path, Language::Go)
        .unwrap(),
      bytes.len()
    );
  }
}

#[test]
fn empty_asset_produces_empty_literal() {
  let dir = TempDir::new().unwrap();
  let asset = write_asset(dir.path(), "empty.ttf", &[]);

  let report =
    embed_asset(&asset, &options_in(dir.path(), Language::Go)).unwrap();
  let generated = fs::read_to_string(&report.destination).unwrap();

  assert_eq!(report.byte_count, 0);
  assert_eq!(generated, "package config\nvar empty = []byte{\n\t}\n");
}

#[test]
fn rerunning_is_idempotent_and_skips_the_write() {
  let dir = TempDir::new().unwrap();
  let asset = write_asset(dir.path(), "font.ttf", b"glyph data");
  let options = options_in(dir.path(), Language::Go);

  let first = embed_asset(&asset, &options).unwrap();
  let first_bytes = fs::read(&first.destination).unwrap();
  let first_mtime =
    fs::metadata(&first.destination).unwrap().modified().unwrap();

  // Coarse filesystem timestamps would hide a rewrite otherwise.
  thread::sleep(Duration::from_millis(20));

  let second = embed_asset(&asset, &options).unwrap();

  assert_eq!(second.outcome, Outcome::Unchanged);
  assert_eq!(fs::read(&second.destination).unwrap(), first_bytes);
  assert_eq!(
    fs::metadata(&second.destination).unwrap().modified().unwrap(),
    first_mtime
  );
}

#[test]
fn missing_source_leaves_destination_untouched() {
  let dir = TempDir::new().unwrap();
  let options = options_in(dir.path(), Language::Go);
  let missing = Asset::new(dir.path().join("nope.ttf"), "nope");

  let err = embed_asset(&missing, &options).unwrap_err();
  assert!(err.to_string().contains("nope.ttf"));
  assert!(!options.output_path("nope").exists());
  assert!(!options.out_dir.exists());

  fs::create_dir_all(&options.out_dir).unwrap();
  fs::write(options.output_path("nope"), "previous").unwrap();

  assert!(embed_asset(&missing, &options).is_err());
  assert_eq!(
    fs::read_to_string(options.output_path("nope")).unwrap(),
    "previous"
  );
}

#[test]
fn unwritable_destination_is_reported() {
  let dir = TempDir::new().unwrap();
  let asset = write_asset(dir.path(), "font.ttf", &[1, 2, 3]);

  // A regular file where the output directory should be.
  let blocker = dir.path().join("blocked");
  fs::write(&blocker, "").unwrap();

  let options = EmbedOptions {
    out_dir: blocker,
    ..Default::default()
  };

  let err = embed_asset(&asset, &options).unwrap_err();
  assert!(format!("{err:#}").contains("blocked"));
}

#[test]
fn embed_all_stops_at_first_failure() {
  let dir = TempDir::new().unwrap();
  let good = write_asset(dir.path(), "good.ttf", &[7]);
  let bad = Asset::new(dir.path().join("bad.ttf"), "bad");
  let options = options_in(dir.path(), Language::Rust);

  let err = embed_all(&[good, bad], &options).unwrap_err();

  assert!(err.to_string().contains("bad.ttf"));
  assert!(options.output_path("good").exists());
  assert!(!options.output_path("bad").exists());
}

#[test]
fn invalid_names_fail_before_any_io() {
  let dir = TempDir::new().unwrap();
  let good = write_asset(dir.path(), "good.ttf", &[7]);
  let bad = Asset::new(dir.path().join("bad.ttf"), "../escape");
  let options = options_in(dir.path(), Language::Go);

  assert!(embed_all(&[good, bad], &options).is_err());
  assert!(!options.out_dir.exists());
}

#[test]
fn check_reports_missing_and_stale_outputs() {
  let dir = TempDir::new().unwrap();
  let a = write_asset(dir.path(), "a.ttf", &[1]);
  let b = write_asset(dir.path(), "b.ttf", &[2]);
  let options = options_in(dir.path(), Language::Go);
  let assets = [a.clone(), b];

  let outdated = check_all(&assets, &options).unwrap();
  assert_eq!(outdated.len(), 2);
  assert!(outdated.iter().all(|(_, state)| *state == Freshness::Missing));
  assert!(!options.out_dir.exists());

  embed_all(&assets, &options).unwrap();
  assert!(check_all(&assets, &options).unwrap().is_empty());

  fs::write(&a.path, [9u8, 9]).unwrap();
  let outdated = check_all(&assets, &options).unwrap();
  assert_eq!(
    outdated,
    [(options.output_path("a"), Freshness::Stale)]
  );
}

#[test]
fn verify_pinpoints_first_difference() {
  let dir = TempDir::new().unwrap();
  let asset = write_asset(dir.path(), "font.ttf", &[1, 2, 3, 4]);
  let report =
    embed_asset(&asset, &options_in(dir.path(), Language::Go)).unwrap();

  fs::write(&asset.path, [1u8, 2, 30, 4]).unwrap();
  let err =
    verify_generated(&report.destination, &asset.path, Language::Go)
      .unwrap_err();
  assert!(err.to_string().contains("at byte offset 2"));

  fs::write(&asset.path, [1u8, 2, 3, 4, 5]).unwrap();
  let err =
    verify_generated(&report.destination, &asset.path, Language::Go)
      .unwrap_err();
  assert!(err.to_string().contains("holds 4 bytes"));
}

#[test]
fn manifest_drives_a_full_run() {
  let dir = TempDir::new().unwrap();
  fs::create_dir(dir.path().join("fonts")).unwrap();
  fs::write(dir.path().join("fonts/sans.ttf"), [10u8, 20]).unwrap();
  fs::write(dir.path().join("fonts/mono.ttf"), [30u8]).unwrap();

  let manifest_path = dir.path().join("embed.yaml");
  fs::write(
    &manifest_path,
    "\
language: rust
out_dir: generated
assets:
  - path: fonts/sans.ttf
    name: sans
  - path: fonts/mono.ttf
    name: mono
",
  )
  .unwrap();

  let (options, assets) =
    Manifest::from_path(&manifest_path).unwrap().into_parts();
  let reports = embed_all(&assets, &options).unwrap();

  let destinations: Vec<_> =
    reports.iter().map(|r| r.destination.clone()).collect();
  assert_eq!(
    destinations,
    [
      dir.path().join("generated/sans.rs"),
      dir.path().join("generated/mono.rs"),
    ]
  );

  let sans = fs::read_to_string(&destinations[0]).unwrap();
  assert!(sans.contains("pub mod config {"));
  assert!(sans.contains("pub static sans: &[u8] = &["));
  assert_eq!(parse_literal(&sans, Language::Rust).unwrap(), [10, 20]);
}
