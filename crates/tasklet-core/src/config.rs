use std::collections::BTreeMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

const DEFAULTS: &[(&str, &str)] = &[
  ("data.location", "~/.tasklet"),
  ("default.command", "list"),
  ("color", "on")
];

const RC_ENV: &str = "TASKLETRC";
const RC_FILE_NAME: &str = ".taskletrc";
const MAX_INCLUDE_DEPTH: usize = 8;

/// Flat `key = value` settings read from a taskletrc file, layered over
/// built-in defaults and then command-line overrides.
#[derive(Debug, Clone)]
pub struct Config {
  map:              BTreeMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Include(&'a str),
  Setting(&'a str, &'a str)
}

impl Default for Config {
  fn default() -> Self {
    Self {
      map:          DEFAULTS
        .iter()
        .map(|(k, v)| {
          (k.to_string(), v.to_string())
        })
        .collect(),
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    match locate_rc_file(rc_override)? {
      | Some(path) => {
        info!(rc = %path.display(), "loading taskletrc");
        cfg.load_file(&path, 0)?;
      }
      | None => {
        warn!(
          "no taskletrc found; using \
           defaults"
        );
      }
    }

    Ok(cfg)
  }

  /// Applies `key=value` pairs on top of the file settings. A leading
  /// `rc.` on the key is dropped.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .map(str::to_string)
        .unwrap_or(k);
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .and_then(|v| parse_bool(v))
  }

  /// `color` must be a recognisable boolean; anything else is a
  /// configuration error rather than a silent default.
  pub fn color_enabled(
    &self
  ) -> anyhow::Result<bool> {
    match self.map.get("color") {
      | None => Ok(true),
      | Some(raw) => {
        parse_bool(raw).ok_or_else(|| {
          anyhow!(
            "invalid color setting: {raw}"
          )
        })
      }
    }
  }

  pub fn default_command(
    &self
  ) -> String {
    self
      .get("default.command")
      .unwrap_or_else(|| "list".to_string())
  }

  /// Entries in key order.
  pub fn iter(
    &self
  ) -> impl Iterator<Item = (&String, &String)>
  {
    self.map.iter()
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path,
    depth: usize
  ) -> anyhow::Result<()> {
    if depth > MAX_INCLUDE_DEPTH {
      return Err(anyhow!(
        "include depth exceeded at {}",
        path.display()
      ));
    }

    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let parsed =
        parse_line(raw_line).map_err(
          |reason| {
            anyhow!(
              "invalid config line \
               {}:{}: {reason}",
              path.display(),
              line_num + 1
            )
          }
        )?;

      match parsed {
        | None => {}
        | Some(RcLine::Include(target)) => {
          let include_path =
            resolve_include_path(
              &base_dir, target
            )?;
          if include_path.exists() {
            self.load_file(
              &include_path,
              depth + 1
            )?;
          } else {
            warn!(include = %include_path.display(), "include file does not exist; skipping");
          }
        }
        | Some(RcLine::Setting(key, value)) => {
          trace!(key, value, "loaded config key");
          self
            .map
            .insert(key.to_string(), value.to_string());
        }
      }
    }

    Ok(())
  }
}

/// Blank lines and comments yield `Ok(None)`. Text after `#` is a
/// comment.
fn parse_line(
  raw: &str
) -> Result<Option<RcLine<'_>>, String> {
  let line = raw
    .split_once('#')
    .map_or(raw, |(before, _)| before)
    .trim();
  if line.is_empty() {
    return Ok(None);
  }

  if let Some(target) =
    line.strip_prefix("include ")
  {
    let target = target.trim();
    if target.is_empty() {
      return Err(
        "include path cannot be empty"
          .to_string()
      );
    }
    return Ok(Some(RcLine::Include(target)));
  }

  let (k, v) =
    line.split_once('=').ok_or_else(|| {
      format!("expected key = value, got {raw}")
    })?;
  let key = k.trim();
  if key.is_empty() {
    return Err("empty key".to_string());
  }
  Ok(Some(RcLine::Setting(key, v.trim())))
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = match (
    override_dir,
    cfg.get("data.location")
  ) {
    | (Some(path), _) => path.to_path_buf(),
    | (None, Some(location)) => {
      expand_tilde(Path::new(&location))
    }
    | (None, None) => home_dir()?.join(".tasklet")
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

/// Flag, then `TASKLETRC` (`/dev/null` disables), then `~/.taskletrc`.
fn locate_rc_file(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(from_env) =
    std::env::var(RC_ENV)
  {
    return Ok(
      (from_env != "/dev/null")
        .then(|| PathBuf::from(from_env))
    );
  }

  let candidate =
    home_dir()?.join(RC_FILE_NAME);
  Ok(candidate.exists().then_some(candidate))
}

fn home_dir() -> anyhow::Result<PathBuf> {
  dirs::home_dir().ok_or_else(|| {
    anyhow!(
      "cannot determine home \
       directory"
    )
  })
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  let expanded =
    expand_tilde(Path::new(include));
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on" | "true" => {
      Some(true)
    }
    | "0" | "n" | "no" | "off" | "false" => {
      Some(false)
    }
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Config,
    RcLine,
    parse_bool,
    parse_line
  };

  #[test]
  fn parses_settings_comments_and_includes()
  {
    assert_eq!(parse_line("   "), Ok(None));
    assert_eq!(
      parse_line("# just a note"),
      Ok(None)
    );
    assert_eq!(
      parse_line(" color = off # quiet"),
      Ok(Some(RcLine::Setting(
        "color", "off"
      )))
    );
    assert_eq!(
      parse_line("include ~/extra.rc"),
      Ok(Some(RcLine::Include(
        "~/extra.rc"
      )))
    );
    assert!(parse_line("nonsense").is_err());
    assert!(parse_line(" = x").is_err());
  }

  #[test]
  fn color_rejects_unknown_values() {
    let mut cfg = Config::default();
    assert!(
      cfg.color_enabled().expect("default")
    );

    cfg.apply_overrides([(
      "rc.color".to_string(),
      "maybe".to_string()
    )]);
    assert!(cfg.color_enabled().is_err());
    assert_eq!(parse_bool("No"), Some(false));
    assert_eq!(cfg.default_command(), "list");
  }
}
