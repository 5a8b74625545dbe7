/// Class applied to the root element while the dark theme is active.
pub const DARK_CLASS: &str = "dark-theme";

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  /// Only the exact string `dark` selects the dark theme; anything else,
  /// including a missing value, falls back to light.
  pub fn from_stored(
    stored: Option<&str>
  ) -> Self {
    match stored {
      | Some("dark") => Self::Dark,
      | _ => Self::Light
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn is_dark(self) -> bool {
    self == Self::Dark
  }

  pub fn toggled(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn root_class(
    self
  ) -> Option<&'static str> {
    self.is_dark().then_some(DARK_CLASS)
  }

  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "Dark mode",
      | Self::Dark => "Light mode"
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    DARK_CLASS,
    Theme
  };

  #[test]
  fn only_exact_dark_selects_dark() {
    assert_eq!(
      Theme::from_stored(Some("dark")),
      Theme::Dark
    );
    for other in
      [None, Some("light"), Some("Dark"), Some(" dark"), Some("")]
    {
      assert_eq!(
        Theme::from_stored(other),
        Theme::Light
      );
    }
  }

  #[test]
  fn toggling_twice_restores_original() {
    let theme = Theme::Dark;
    assert_eq!(theme.toggled(), Theme::Light);
    assert_eq!(
      theme.toggled().toggled(),
      theme
    );
    assert_eq!(
      Theme::Dark.root_class(),
      Some(DARK_CLASS)
    );
    assert_eq!(Theme::Light.root_class(), None);
  }
}
