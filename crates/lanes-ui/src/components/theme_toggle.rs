use lanes_core::theme::Theme;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
  pub theme:        Theme,
  pub announcement: Option<String>,
  pub on_toggle:    Callback<()>
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(
  props: &ThemeToggleProps
) -> Html {
  let next = props.theme.toggled();
  let label = format!(
    "Switch to {} mode",
    next.storage_value()
  );
  let onclick = {
    let on_toggle = props.on_toggle.clone();
    Callback::from(move |_| {
      on_toggle.emit(());
    })
  };

  html! {
      <>
          <button
              type="button"
              class="theme-toggle"
              aria-label={label.clone()}
              title={label}
              aria-pressed={props.theme.is_dark().to_string()}
              {onclick}
          >
              { if props.theme.is_dark() { "☀" } else { "☾" } }
          </button>
          <div class="sr-only" role="status" aria-live="polite">
              { props.announcement.clone().unwrap_or_default() }
          </div>
      </>
  }
}
