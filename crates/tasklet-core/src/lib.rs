pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod prompt;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tasklet_shared::ListController;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting tasklet CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.taskletrc.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let store =
    datastore::FileStore::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open store at {}",
        data_dir.display()
      )
    })?;

  let mut controller =
    ListController::load(store);
  let mut renderer =
    render::Renderer::new(
      &cfg,
      controller.theme()
    )?;
  let inv = cli::Invocation::parse(
    &cfg, cli.rest
  )?;

  let mut prompter =
    prompt::TerminalPrompter::stdio();
  commands::dispatch(
    &mut controller,
    &cfg,
    &mut renderer,
    commands::Terminal {
      prompter:   &mut prompter,
      assume_yes: cli.yes
        || inv.assume_yes
    },
    inv
  )?;

  info!("done");
  Ok(())
}
