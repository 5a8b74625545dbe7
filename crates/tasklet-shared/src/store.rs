use std::collections::BTreeMap;

/// Storage key holding the JSON array of task texts.
pub const TASKS_KEY: &str = "tasks";
/// Storage key holding the literal `dark` or `light`.
pub const THEME_KEY: &str = "theme";

/// Durable string key-value store, scoped to one application.
///
/// Mirrors the browser's `localStorage` surface: values are opaque strings
/// and a missing key is `Ok(None)`, not an error.
pub trait KeyValueStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct MemoryStore {
  entries: BTreeMap<String, String>
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_entry(
    mut self,
    key: &str,
    value: &str
  ) -> Self {
    self
      .entries
      .insert(key.to_string(), value.to_string());
    self
  }

  pub fn raw(
    &self,
    key: &str
  ) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }
}

impl KeyValueStore for MemoryStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .entries
      .insert(key.to_string(), value.to_string());
    Ok(())
  }
}
