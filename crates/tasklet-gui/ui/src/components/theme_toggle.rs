use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
  pub label:     AttrValue,
  pub on_toggle: Callback<MouseEvent>
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(
  props: &ThemeToggleProps
) -> Html {
  html! {
      <button
          id="toggle-theme-btn"
          class="btn"
          onclick={props.on_toggle.clone()}
      >
          { props.label.clone() }
      </button>
  }
}
