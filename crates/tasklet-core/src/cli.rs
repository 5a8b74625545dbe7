use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::{expand_command_abbrev, known_command_names};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct PreprocessedArgs {
    pub cleaned_args: Vec<OsString>,
    pub rc_overrides: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklet",
    version,
    about = "Tasklet: a small persistent task list",
    disable_help_subcommand = true,
    arg_required_else_help = false
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "taskletrc")]
    pub taskletrc: Option<PathBuf>,

    #[arg(long = "data")]
    pub data: Option<PathBuf>,

    /// Answer yes to the delete confirmation.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<OsString>,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Pulls positional `rc.key=value` / `rc.key:value` overrides out of the
/// argument list before clap sees it.
#[tracing::instrument(skip_all)]
pub fn preprocess_args(raw: &[OsString]) -> anyhow::Result<PreprocessedArgs> {
    let mut cleaned = Vec::with_capacity(raw.len());
    let mut overrides: Vec<(String, String)> = Vec::new();

    let mut iter = raw.iter().cloned();
    if let Some(bin) = iter.next() {
        cleaned.push(bin);
    }

    for arg in iter {
        let s = arg.to_string_lossy();
        if let Some(rest) = s.strip_prefix("rc.") {
            let parsed = if let Some((k, v)) = rest.split_once('=') {
                Some((format!("rc.{k}"), v.to_string()))
            } else if let Some((k, v)) = rest.split_once(':') {
                Some((format!("rc.{k}"), v.to_string()))
            } else {
                None
            };

            if let Some((k, v)) = parsed {
                debug!(key = %k, value = %v, "captured positional rc override");
                overrides.push((k, v));
                continue;
            }
        }

        cleaned.push(arg);
    }

    Ok(PreprocessedArgs {
        cleaned_args: cleaned,
        rc_overrides: overrides,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub command_args: Vec<String>,
    /// `-y`/`--yes` given after `delete` rather than before it.
    pub assume_yes: bool,
}

impl Invocation {
    #[tracing::instrument(skip(cfg, rest))]
    pub fn parse(cfg: &Config, rest: Vec<OsString>) -> anyhow::Result<Self> {
        let tokens: Vec<String> = rest
            .into_iter()
            .map(|arg| arg.to_string_lossy().to_string())
            .collect();
        let known = known_command_names();

        let Some((first, args)) = tokens.split_first() else {
            let configured = cfg.default_command();
            let command = expand_command_abbrev(&configured, &known)
                .ok_or_else(|| anyhow!("invalid default.command: {configured}"))?;
            debug!(configured = %configured, command = %command, "no explicit command, using default");
            return Ok(Self {
                command: command.to_string(),
                command_args: vec![],
                assume_yes: false,
            });
        };

        let command = expand_command_abbrev(first, &known)
            .ok_or_else(|| anyhow!("unknown or ambiguous command: {first}"))?;
        debug!(token = %first, expanded = %command, "resolved command token");

        let mut command_args = args.to_vec();
        let mut assume_yes = false;
        if command == "delete" {
            command_args.retain(|arg| {
                let is_yes = arg == "-y" || arg == "--yes";
                assume_yes |= is_yes;
                !is_yes
            });
        }

        Ok(Self {
            command: command.to_string(),
            command_args,
            assume_yes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::{Invocation, preprocess_args};
    use crate::config::Config;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn positional_rc_overrides_are_extracted() {
        let pre = preprocess_args(&os(&["tasklet", "rc.color:off", "add", "rc.", "x"]))
            .expect("preprocess");

        assert_eq!(pre.cleaned_args, os(&["tasklet", "add", "rc.", "x"]));
        assert_eq!(
            pre.rc_overrides,
            vec![("rc.color".to_string(), "off".to_string())]
        );
    }

    #[test]
    fn invocation_defaults_and_expands_abbreviations() {
        let cfg = Config::default();

        let empty = Invocation::parse(&cfg, vec![]).expect("parse");
        assert_eq!(empty.command, "list");

        let edit = Invocation::parse(&cfg, os(&["ed", "2", "new", "text"])).expect("parse");
        assert_eq!(edit.command, "edit");
        assert_eq!(edit.command_args, vec!["2", "new", "text"]);

        assert!(Invocation::parse(&cfg, os(&["frobnicate"])).is_err());
    }

    #[test]
    fn yes_flag_after_delete_is_lifted_out_of_args() {
        let cfg = Config::default();

        let delete = Invocation::parse(&cfg, os(&["delete", "1", "--yes"])).expect("parse");
        assert_eq!(delete.command_args, vec!["1"]);
        assert!(delete.assume_yes);

        let edit = Invocation::parse(&cfg, os(&["edit", "1", "--yes"])).expect("parse");
        assert_eq!(edit.command_args, vec!["1", "--yes"]);
        assert!(!edit.assume_yes);
    }

    #[test]
    fn configured_default_command_accepts_abbreviations() {
        let mut cfg = Config::default();
        cfg.apply_overrides([("rc.default.command".to_string(), "th".to_string())]);
        let inv = Invocation::parse(&cfg, vec![]).expect("parse");
        assert_eq!(inv.command, "theme");

        cfg.apply_overrides([("default.command".to_string(), "nope".to_string())]);
        assert!(Invocation::parse(&cfg, vec![]).is_err());
    }
}
