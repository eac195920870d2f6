mod app;
mod browser;
mod components;

use yew::Renderer;

/// Element id the trunk page reserves
/// for the app.
const MOUNT_ID: &str = "app";

fn mount_point() -> Option<web_sys::Element>
{
  gloo::utils::document()
    .get_element_by_id(MOUNT_ID)
}

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  match mount_point() {
    | Some(root) => {
      tracing::info!(
        mount = MOUNT_ID,
        "mounting MyDay"
      );
      Renderer::<app::App>::with_root(
        root
      )
      .render();
    }
    | None => {
      tracing::warn!(
        mount = MOUNT_ID,
        "mount element missing; \
         rendering into <body>"
      );
      Renderer::<app::App>::new()
        .render();
    }
  }
}
