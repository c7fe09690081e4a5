use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::{
  Asset, EmbedOptions, Language, DEFAULT_OUT_DIR, DEFAULT_PACKAGE,
};

/// Mapping table loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Manifest {
  #[serde(default = "default_package")]
  pub package: String,

  #[serde(default = "default_out_dir")]
  pub out_dir: PathBuf,

  #[serde(default)]
  pub language: Language,

  pub assets: Vec<ManifestAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ManifestAsset {
  pub path: PathBuf,
  pub name: String,
}

fn default_package() -> String {
  DEFAULT_PACKAGE.to_string()
}

fn default_out_dir() -> PathBuf {
  PathBuf::from(DEFAULT_OUT_DIR)
}

impl Manifest {
  /// Reads a manifest and resolves its paths relative to the manifest's
  /// own directory.
  pub fn from_path(path: &Path) -> Result<Self> {
    let text = fs::read_to_string(path).with_context(|| {
      format!("Failed to read manifest {}.", path.display())
    })?;

    let base_dir = path.parent().unwrap_or(Path::new(""));

    Self::parse(&text, base_dir).with_context(|| {
      format!("Invalid manifest {}.", path.display())
    })
  }

  /// Parses manifest text. Relative paths are joined onto `base_dir` and
  /// a leading `~` is expanded to the home directory.
  pub fn parse(text: &str, base_dir: &Path) -> Result<Self> {
    let mut manifest = serde_yaml::from_str::<Self>(text)
      .context("Failed to parse manifest YAML.")?;

    if manifest.assets.is_empty() {
      bail!("Manifest does not list any assets.");
    }

    manifest.out_dir = resolve_path(&manifest.out_dir, base_dir)?;

    for asset in &mut manifest.assets {
      asset.path = resolve_path(&asset.path, base_dir)?;
    }

    Ok(manifest)
  }

  /// Splits the manifest into run options and the asset table.
  pub fn into_parts(self) -> (EmbedOptions, Vec<Asset>) {
    let options = EmbedOptions {
      package: self.package,
      out_dir: self.out_dir,
      language: self.language,
    };

    let assets = self
      .assets
      .into_iter()
      .map(|asset| Asset::new(asset.path, asset.name))
      .collect();

    (options, assets)
  }
}

fn resolve_path(path: &Path, base_dir: &Path) -> Result<PathBuf> {
  let expanded = match path.strip_prefix("~") {
    Ok(rest) => home::home_dir()
      .context("Unable to get home directory.")?
      .join(rest),
    Err(_) => path.to_path_buf(),
  };

  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}
