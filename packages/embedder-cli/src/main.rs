use std::io::Write;

use anyhow::{bail, Context};
use clap::Parser;
use embedder::{
  builtin_assets, check_all, embed_all, render_asset, validate_table,
  verify_generated, Asset, EmbedOptions, Freshness, Manifest, Outcome,
};
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, EmbedArgs, VerifyArgs};

mod cli;

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match cli.command {
    Some(Command::Verify(args)) => run_verify(args),
    None => run_embed(cli.embed),
  }
}

/// Logs go to stderr so `--stdout` output stays clean.
fn init_logging(verbose: bool) {
  let default_level = if verbose {
    LevelFilter::DEBUG
  } else {
    LevelFilter::INFO
  };

  let filter = EnvFilter::builder()
    .with_default_directive(default_level.into())
    .with_env_var("FONTEMBED_LOG")
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

/// Picks the asset table and options for this run. Explicit flags win
/// over manifest values, which win over the builtin defaults.
fn resolve_table(
  args: &EmbedArgs,
) -> anyhow::Result<(EmbedOptions, Vec<Asset>)> {
  let (mut options, assets) = match &args.manifest {
    Some(path) => Manifest::from_path(path)?.into_parts(),
    None if !args.assets.is_empty() => {
      (EmbedOptions::default(), args.assets.clone())
    }
    None => (EmbedOptions::default(), builtin_assets()),
  };

  if let Some(language) = args.lang {
    options.language = language;
  }

  if let Some(out_dir) = &args.out_dir {
    options.out_dir = out_dir.clone();
  }

  if let Some(package) = &args.package {
    options.package = package.clone();
  }

  debug!(
    "Embedding {} asset(s) as {} into {} (package `{}`).",
    assets.len(),
    options.language,
    options.out_dir.display(),
    options.package
  );

  Ok((options, assets))
}

fn run_embed(args: EmbedArgs) -> anyhow::Result<()> {
  let (options, assets) = resolve_table(&args)?;

  if args.check {
    return run_check(&assets, &options);
  }

  if args.stdout {
    return write_sources(&assets, &options, &mut std::io::stdout().lock());
  }

  let reports = embed_all(&assets, &options)?;
  let unchanged = reports
    .iter()
    .filter(|report| report.outcome == Outcome::Unchanged)
    .count();

  info!(
    "Done: {} written, {} unchanged.",
    reports.len() - unchanged,
    unchanged
  );

  Ok(())
}

/// Writes every rendered source to `out` in table order. Nothing is
/// written under the output directory.
fn write_sources(
  assets: &[Asset],
  options: &EmbedOptions,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  validate_table(assets, options)?;

  for asset in assets {
    let rendered = render_asset(asset, options)?;
    out
      .write_all(rendered.source.as_bytes())
      .context("Failed to write generated source to stdout.")?;
  }

  out.flush().context("Failed to flush stdout.")
}

fn run_check(
  assets: &[Asset],
  options: &EmbedOptions,
) -> anyhow::Result<()> {
  let outdated = check_all(assets, options)?;

  if outdated.is_empty() {
    info!("All {} generated source(s) are up to date.", assets.len());
    return Ok(());
  }

  let listing = outdated
    .iter()
    .map(|(path, freshness)| {
      let state = match freshness {
        Freshness::Missing => "missing",
        _ => "stale",
      };

      format!("  {} ({state})", path.display())
    })
    .collect::<Vec<_>>()
    .join("\n");

  bail!("Generated sources are out of date:\n{listing}");
}

fn run_verify(args: VerifyArgs) -> anyhow::Result<()> {
  let byte_count =
    verify_generated(&args.generated, &args.source, args.lang)?;

  info!(
    "{} matches {} ({byte_count} bytes).",
    args.generated.display(),
    args.source.display()
  );

  Ok(())
}
