use myday_core::session::HeaderControl;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct HeaderBarProps {
  pub header:          HeaderControl,
  pub theme_icon:      &'static str,
  pub on_toggle_theme:
    Callback<MouseEvent>,
  pub on_header:       Callback<MouseEvent>
}

#[function_component(HeaderBar)]
pub fn header_bar(
  props: &HeaderBarProps
) -> Html {
  html! {
      <header class="topbar">
          <div class="brand">{ "MyDay" }</div>
          <div class="topbar-actions">
              <button
                  id="theme-toggle"
                  class="icon-btn"
                  title="Toggle theme"
                  onclick={props.on_toggle_theme.clone()}
              >
                  { props.theme_icon }
              </button>
              <button
                  id="open-login"
                  class="icon-btn"
                  title={props.header.title}
                  aria-label={props.header.title}
                  onclick={props.on_header.clone()}
              >
                  { props.header.icon }
              </button>
          </div>
      </header>
  }
}
