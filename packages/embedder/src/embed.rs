//! Reading assets and writing their generated sources.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::{parse_literal, render_source, validate_identifier, Language};

/// Mapping table used when no other table is supplied.
pub const BUILTIN_ASSETS: [(&str, &str); 2] = [
  ("config/luxisr.ttf", "luxibytes"),
  ("config/luximr.ttf", "luximonobytes"),
];

/// Default namespace label and output directory.
pub const DEFAULT_PACKAGE: &str = "config";
pub const DEFAULT_OUT_DIR: &str = "config";

/// A binary file to embed and the variable it is exposed as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
  pub path: PathBuf,
  pub name: String,
}

impl Asset {
  pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      name: name.into(),
    }
  }
}

/// Get the builtin font table.
pub fn builtin_assets() -> Vec<Asset> {
  BUILTIN_ASSETS
    .iter()
    .map(|(path, name)| Asset::new(*path, *name))
    .collect()
}

/// Settings shared by every asset of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
  pub package: String,
  pub out_dir: PathBuf,
  pub language: Language,
}

impl Default for EmbedOptions {
  fn default() -> Self {
    Self {
      package: DEFAULT_PACKAGE.to_string(),
      out_dir: PathBuf::from(DEFAULT_OUT_DIR),
      language: Language::default(),
    }
  }
}

impl EmbedOptions {
  /// Path of the generated source for the variable `name`.
  pub fn output_path(&self, name: &str) -> PathBuf {
    self
      .out_dir
      .join(format!("{name}.{}", self.language.extension()))
  }
}

/// What happened to a destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Written,
  /// Existing content already matched and the file was left alone.
  Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
  pub destination: PathBuf,
  pub byte_count: usize,
  pub outcome: Outcome,
}

/// Generated source for one asset, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
  pub destination: PathBuf,
  pub source: String,
  pub byte_count: usize,
}

/// Rejects bad identifiers and duplicate names before any file is
/// touched.
pub fn validate_table(
  assets: &[Asset],
  options: &EmbedOptions,
) -> Result<()> {
  validate_identifier(&options.package, options.language)
    .context("Invalid package label.")?;

  let mut seen = HashSet::new();

  for asset in assets {
    validate_identifier(&asset.name, options.language).with_context(
      || format!("Invalid name for asset {}.", asset.path.display()),
    )?;

    if !seen.insert(asset.name.as_str()) {
      bail!(
        "Asset name `{}` is used more than once; outputs would collide.",
        asset.name
      );
    }
  }

  Ok(())
}

/// Reads the asset fully and renders its source.
pub fn render_asset(
  asset: &Asset,
  options: &EmbedOptions,
) -> Result<Rendered> {
  let bytes = fs::read(&asset.path).with_context(|| {
    format!("Failed to read asset {}.", asset.path.display())
  })?;

  debug!(
    "Read {} bytes from {}.",
    bytes.len(),
    asset.path.display()
  );

  Ok(Rendered {
    destination: options.output_path(&asset.name),
    source: render_source(
      options.language,
      &options.package,
      &asset.name,
      &bytes,
    ),
    byte_count: bytes.len(),
  })
}

/// Embeds a single asset, creating or overwriting its generated source.
///
/// The source file is read before the destination is opened, so a
/// missing asset leaves the destination untouched.
pub fn embed_asset(
  asset: &Asset,
  options: &EmbedOptions,
) -> Result<EmbedReport> {
  validate_table(std::slice::from_ref(asset), options)?;
  write_rendered(render_asset(asset, options)?)
}

/// Embeds every asset of the table in order, stopping at the first
/// failure.
pub fn embed_all(
  assets: &[Asset],
  options: &EmbedOptions,
) -> Result<Vec<EmbedReport>> {
  validate_table(assets, options)?;

  assets
    .iter()
    .map(|asset| write_rendered(render_asset(asset, options)?))
    .collect()
}

fn write_rendered(rendered: Rendered) -> Result<EmbedReport> {
  let Rendered {
    destination,
    source,
    byte_count,
  } = rendered;

  // Skip the write when the file is already up to date.
  let up_to_date = fs::read(&destination)
    .is_ok_and(|existing| existing == source.as_bytes());

  if up_to_date {
    debug!("{} is up to date.", destination.display());

    return Ok(EmbedReport {
      destination,
      byte_count,
      outcome: Outcome::Unchanged,
    });
  }

  if let Some(parent) = destination.parent() {
    if !parent.as_os_str().is_empty() && !parent.exists() {
      fs::create_dir_all(parent).with_context(|| {
        format!(
          "Failed to create output directory {}.",
          parent.display()
        )
      })?;
    }
  }

  fs::write(&destination, &source).with_context(|| {
    format!("Failed to write generated source {}.", destination.display())
  })?;

  info!(
    "Embedded {} bytes into {}.",
    byte_count,
    destination.display()
  );

  Ok(EmbedReport {
    destination,
    byte_count,
    outcome: Outcome::Written,
  })
}

/// Freshness of an existing generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
  Fresh,
  Stale,
  Missing,
}

/// Compares every asset's rendering with the file on disk without
/// writing anything. Returns the destinations that are not fresh.
pub fn check_all(
  assets: &[Asset],
  options: &EmbedOptions,
) -> Result<Vec<(PathBuf, Freshness)>> {
  validate_table(assets, options)?;

  let mut outdated = Vec::new();

  for asset in assets {
    let rendered = render_asset(asset, options)?;
    let freshness = match fs::read(&rendered.destination) {
      Ok(existing) if existing == rendered.source.as_bytes() => {
        Freshness::Fresh
      }
      Ok(_) => Freshness::Stale,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        Freshness::Missing
      }
      Err(err) => {
        return Err(err).with_context(|| {
          format!(
            "Failed to read generated source {}.",
            rendered.destination.display()
          )
        })
      }
    };

    debug!("{} is {freshness:?}.", rendered.destination.display());

    if freshness != Freshness::Fresh {
      outdated.push((rendered.destination, freshness));
    }
  }

  Ok(outdated)
}

/// Confirms that the literal in `generated` holds exactly the bytes of
/// `source`. Returns the number of bytes compared.
///
/// The language is taken from the generated file's extension, falling
/// back to `fallback` when the extension is not recognized.
pub fn verify_generated(
  generated: &Path,
  source: &Path,
  fallback: Language,
) -> Result<usize> {
  let language = generated
    .extension()
    .and_then(|ext| ext.to_str())
    .and_then(Language::from_extension)
    .unwrap_or(fallback);

  let text = fs::read_to_string(generated).with_context(|| {
    format!("Failed to read generated source {}.", generated.display())
  })?;

  let embedded = parse_literal(&text, language).with_context(|| {
    format!("Failed to parse byte literal in {}.", generated.display())
  })?;

  let original = fs::read(source).with_context(|| {
    format!("Failed to read asset {}.", source.display())
  })?;

  if let Some(offset) = embedded
    .iter()
    .zip(&original)
    .position(|(left, right)| left != right)
  {
    bail!(
      "{} differs from {} at byte offset {offset}.",
      generated.display(),
      source.display()
    );
  }

  if embedded.len() != original.len() {
    bail!(
      "{} holds {} bytes but {} has {}.",
      generated.display(),
      embedded.len(),
      source.display(),
      original.len()
    );
  }

  Ok(original.len())
}
