use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use embedder::{Asset, Language};

#[derive(Debug, Parser)]
#[command(
  name = "fontembed",
  version,
  about = "Embeds font files as byte-array literals in generated sources.",
  long_about = "Embeds font files as byte-array literals in generated \
    sources.\n\nWithout arguments the builtin font table is converted: \
    config/luxisr.ttf and config/luximr.ttf become config/luxibytes.go \
    and config/luximonobytes.go."
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub embed: EmbedArgs,

  /// Log debug output unless `FONTEMBED_LOG` says otherwise.
  #[arg(short, long, global = true)]
  pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Compares the literal in a generated source with the asset's bytes.
  Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct EmbedArgs {
  /// Asset to embed as `PATH=NAME`. Repeat to build a table; replaces
  /// the builtin font table.
  #[arg(
    short,
    long = "asset",
    value_name = "PATH=NAME",
    value_parser = parse_asset,
    conflicts_with = "manifest"
  )]
  pub assets: Vec<Asset>,

  /// YAML manifest listing the assets to embed.
  #[arg(short, long, value_name = "FILE")]
  pub manifest: Option<PathBuf>,

  /// Language of the generated sources.
  #[arg(short, long)]
  pub lang: Option<Language>,

  /// Directory the generated sources are written to.
  #[arg(short, long, value_name = "DIR")]
  pub out_dir: Option<PathBuf>,

  /// Package or module label wrapping each variable.
  #[arg(short, long, value_name = "LABEL")]
  pub package: Option<String>,

  /// Fail if any generated source is missing or out of date, without
  /// writing anything.
  #[arg(long, conflicts_with = "stdout")]
  pub check: bool,

  /// Print generated sources instead of writing them.
  #[arg(long)]
  pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
  /// Generated source containing the byte literal.
  pub generated: PathBuf,

  /// Asset the literal was generated from.
  pub source: PathBuf,

  /// Language to assume when the extension is neither `.go` nor `.rs`.
  #[arg(short, long, default_value = "go")]
  pub lang: Language,
}

fn parse_asset(raw: &str) -> Result<Asset, String> {
  let (path, name) = raw
    .rsplit_once('=')
    .ok_or_else(|| format!("expected PATH=NAME, got `{raw}`"))?;

  if path.is_empty() || name.is_empty() {
    return Err(format!("expected PATH=NAME, got `{raw}`"));
  }

  Ok(Asset::new(path, name))
}
