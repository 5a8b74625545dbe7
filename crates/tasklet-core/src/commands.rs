use std::io::Write;

use anyhow::{Context, anyhow};
use tasklet_shared::{CannedPrompter, KeyValueStore, ListController, Outcome, Prompter};
use tracing::{debug, info, instrument};

use crate::cli::Invocation;
use crate::config::Config;
use crate::render::Renderer;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add", "delete", "edit", "list", "theme", "show", "help", "version",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

/// Per-invocation view of the terminal: where dialogs go and whether the
/// delete confirmation is pre-answered.
pub struct Terminal<'a> {
    pub prompter: &'a mut dyn Prompter,
    pub assume_yes: bool,
}

#[instrument(skip(controller, cfg, renderer, terminal, inv))]
pub fn dispatch<S: KeyValueStore>(
    controller: &mut ListController<S>,
    cfg: &Config,
    renderer: &mut Renderer,
    terminal: Terminal<'_>,
    inv: Invocation,
) -> anyhow::Result<()> {
    let command = inv.command.as_str();

    debug!(command, args = ?inv.command_args, "dispatching command");

    match command {
        "add" => cmd_add(controller, &inv.command_args),
        "delete" => cmd_delete(controller, terminal, &inv.command_args),
        "edit" => cmd_edit(controller, terminal, &inv.command_args),
        "list" => cmd_list(controller, renderer),
        "theme" => cmd_theme(controller, renderer, &inv.command_args),
        "show" => cmd_show(cfg),
        "help" => cmd_help(),
        "version" => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}")),
    }
}

#[instrument(skip(controller, args))]
fn cmd_add<S: KeyValueStore>(
    controller: &mut ListController<S>,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command add");

    controller.set_input(args.join(" "));
    match controller.submit()? {
        Outcome::Changed => println!("Added task {}.", controller.tasks().len()),
        Outcome::Unchanged => debug!("nothing to add"),
    }
    Ok(())
}

#[instrument(skip(controller, terminal, args))]
fn cmd_delete<S: KeyValueStore>(
    controller: &mut ListController<S>,
    terminal: Terminal<'_>,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command delete");

    let (position, rest) = parse_position(controller, args)?;
    if !rest.is_empty() {
        return Err(anyhow!("delete takes a single task number"));
    }

    let outcome = if terminal.assume_yes {
        let mut yes = CannedPrompter::new().confirming(true);
        controller.delete(position, &mut yes)?
    } else {
        controller.delete(position, terminal.prompter)?
    };

    if outcome == Outcome::Changed {
        println!("Deleted task {}.", position + 1);
    }
    Ok(())
}

#[instrument(skip(controller, terminal, args))]
fn cmd_edit<S: KeyValueStore>(
    controller: &mut ListController<S>,
    terminal: Terminal<'_>,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command edit");

    let (position, rest) = parse_position(controller, args)?;

    let outcome = if rest.is_empty() {
        controller.edit(position, terminal.prompter)?
    } else {
        let answer = rest.join(" ");
        let mut canned = CannedPrompter::new().answering(Some(&answer));
        controller.edit(position, &mut canned)?
    };

    if outcome == Outcome::Changed {
        println!("Edited task {}.", position + 1);
    }
    Ok(())
}

fn cmd_list<S: KeyValueStore>(
    controller: &ListController<S>,
    renderer: &Renderer,
) -> anyhow::Result<()> {
    renderer.print_task_list(&controller.rendered())
}

#[instrument(skip(controller, renderer, args))]
fn cmd_theme<S: KeyValueStore>(
    controller: &mut ListController<S>,
    renderer: &mut Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        None => {}
        Some("toggle") => {
            let theme = controller.toggle_theme()?;
            renderer.set_theme(theme);
        }
        Some(other) => return Err(anyhow!("unknown theme action: {other}")),
    }
    renderer.print_theme()
}

fn cmd_show(cfg: &Config) -> anyhow::Result<()> {
    for (k, v) in cfg.iter() {
        println!("{k}={v}");
    }
    for file in &cfg.loaded_files {
        println!("# loaded {}", file.display());
    }
    Ok(())
}

fn cmd_help() -> anyhow::Result<()> {
    write_help(std::io::stdout().lock())
}

fn write_help<W: Write>(mut out: W) -> anyhow::Result<()> {
    writeln!(
        out,
        "Commands: add <text>, delete <n> [--yes], edit <n> [text], list, theme [toggle], show, help, version"
    )?;
    writeln!(
        out,
        "edit without text prompts with the current text; a blank answer keeps it. \
         Use edit <n> \"\" to store an empty task (add ignores empty text)."
    )?;
    Ok(())
}

/// Reads a 1-based task number and returns the 0-based position with the
/// remaining arguments.
fn parse_position<'a, S: KeyValueStore>(
    controller: &ListController<S>,
    args: &'a [String],
) -> anyhow::Result<(usize, &'a [String])> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| anyhow!("missing task number"))?;

    let number: usize = first
        .parse()
        .with_context(|| format!("invalid task number: {first}"))?;
    if number == 0 || number > controller.tasks().len() {
        return Err(anyhow!("no task {number}"));
    }

    Ok((number - 1, rest))
}
