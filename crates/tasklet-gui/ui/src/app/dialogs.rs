use tasklet_shared::Prompter;

/// Native `window.confirm` / `window.prompt`. Both block the page until
/// answered.
pub struct BrowserPrompter;

impl Prompter for BrowserPrompter {
  fn confirm(
    &mut self,
    message: &str
  ) -> bool {
    gloo::dialogs::confirm(message)
  }

  fn prompt_text(
    &mut self,
    message: &str,
    default: &str
  ) -> Option<String> {
    gloo::dialogs::prompt(
      message,
      Some(default)
    )
  }
}
