use anyhow::anyhow;
use tasklet_shared::{
  KeyValueStore,
  Theme,
  theme::DARK_CLASS
};

/// `window.localStorage`, resolved on every access so a page without
/// storage degrades to an empty list instead of failing to mount.
#[derive(Debug, Default)]
pub struct LocalStore;

fn local_storage()
-> Option<web_sys::Storage> {
  web_sys::window().and_then(|window| {
    window
      .local_storage()
      .ok()
      .flatten()
  })
}

impl KeyValueStore for LocalStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    let storage = local_storage()
      .ok_or_else(|| {
        anyhow!(
          "localStorage is unavailable"
        )
      })?;
    storage.get_item(key).map_err(
      |error| {
        anyhow!(
          "localStorage read of {key} \
           failed: {error:?}"
        )
      }
    )
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    let storage = local_storage()
      .ok_or_else(|| {
        anyhow!(
          "localStorage is unavailable"
        )
      })?;
    storage.set_item(key, value).map_err(
      |error| {
        anyhow!(
          "localStorage write of {key} \
           failed: {error:?}"
        )
      }
    )
  }
}

/// Puts the dark class on `<body>` exactly when the theme is dark.
pub fn apply_root_theme(theme: Theme) {
  let Some(body) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| document.body())
  else {
    tracing::warn!(
      "no <body> to apply theme to"
    );
    return;
  };

  if let Err(error) = body
    .class_list()
    .toggle_with_force(
      DARK_CLASS,
      theme.is_dark()
    )
  {
    tracing::error!(
      ?error,
      "failed to apply theme class"
    );
  }
}
