use chrono::Local;
use gloo::console::log;
use myday_core::task::TaskId;
use myday_core::{
  Config,
  Controller,
  Event,
  Focus,
  ListTarget
};
use web_sys::HtmlInputElement;
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  classes,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_node_ref,
  use_state
};

use crate::browser::{
  BrowserHost,
  BrowserStore,
  query_overrides
};
use crate::components::{
  HeaderBar,
  LoginModalView,
  StatsPanel,
  TaskComposer,
  TaskList
};

const CONFIG_TOML: &str =
  include_str!("../assets/myday.toml");

fn start_controller()
-> Controller<BrowserStore> {
  let mut config =
    Config::load(Some(CONFIG_TOML));
  config
    .apply_overrides(query_overrides());
  Controller::start(
    BrowserStore::open(),
    config,
    Local::now()
  )
}

#[function_component(App)]
pub fn app() -> Html {
  let controller =
    use_mut_ref(start_controller);
  let view = {
    let controller = controller.clone();
    use_state(move || {
      controller.borrow().view()
    })
  };
  // Bumped on every request so asking
  // for the same element twice still
  // re-runs the focus effect.
  let focus_request = {
    let controller = controller.clone();
    use_state(move || {
      (
        0_u32,
        controller
          .borrow()
          .initial_focus()
      )
    })
  };
  let task_input = use_node_ref();
  let username_input = use_node_ref();

  {
    let task_input = task_input.clone();
    let username_input =
      username_input.clone();
    use_effect_with(
      *focus_request,
      move |(_, focus)| {
        let target = match focus {
          | Some(Focus::TaskInput) => {
            Some(&task_input)
          }
          | Some(Focus::Username) => {
            Some(&username_input)
          }
          | None => None
        };
        if let Some(input) = target
          .and_then(|node| {
            node.cast::<HtmlInputElement>()
          })
          && let Err(err) = input.focus()
        {
          tracing::warn!(
            ?err,
            "failed moving focus"
          );
        }
      }
    );
  }

  let dispatch = {
    let controller = controller.clone();
    let view = view.clone();
    let focus_request =
      focus_request.clone();
    Callback::from(move |event: Event| {
      ui_debug("event", event.kind());
      let effects = controller
        .borrow_mut()
        .handle(event, &BrowserHost);
      view.set(
        controller.borrow().view()
      );
      if let Some(focus) = effects.focus
      {
        focus_request.set((
          focus_request.0.wrapping_add(1),
          Some(focus)
        ));
      }
    })
  };

  let on_draft = dispatch
    .reform(Event::DraftChanged);
  let on_add = dispatch
    .reform(|()| Event::AddRequested);
  let on_row_event = dispatch.reform(
    |(id, target): (TaskId, ListTarget)| {
      Event::ListClicked { id, target }
    }
  );
  let on_clear_all = dispatch
    .reform(|_: MouseEvent| {
      Event::ClearAll
    });
  let on_clear_completed = dispatch
    .reform(|_: MouseEvent| {
      Event::ClearCompleted
    });
  let on_toggle_theme = dispatch
    .reform(|_: MouseEvent| {
      Event::ToggleTheme
    });
  let on_header = dispatch
    .reform(|_: MouseEvent| {
      Event::HeaderClicked
    });
  let on_username = dispatch
    .reform(Event::UsernameChanged);
  let on_password = dispatch
    .reform(Event::PasswordChanged);
  let on_login_submit = dispatch
    .reform(|_: MouseEvent| {
      Event::LoginSubmitted
    });
  let on_login_close = dispatch
    .reform(|_: MouseEvent| {
      Event::LoginClosed
    });

  html! {
      <div class={classes!("app", view.body_class)}>
          <HeaderBar
              header={view.header}
              theme_icon={view.theme_icon}
              on_toggle_theme={on_toggle_theme}
              on_header={on_header}
          />
          <main
              id="main-content"
              class={classes!("main", (!view.main_visible).then_some("hidden"))}
          >
              <div class="column">
                  <TaskComposer
                      draft={view.draft.clone()}
                      input_ref={task_input}
                      on_draft={on_draft}
                      on_add={on_add}
                  />
                  <TaskList
                      list_html={AttrValue::from(view.list_html.clone())}
                      is_empty={view.rows.is_empty()}
                      on_row_event={on_row_event}
                      on_clear_all={on_clear_all}
                      on_clear_completed={on_clear_completed}
                  />
              </div>
              <StatsPanel stats={view.stats.clone()} />
          </main>
          {
              if view.main_visible {
                  html! {}
              } else {
                  html! {
                      <div class="locked muted">
                          { "Log in with the 🔐 button to see your daily plan." }
                      </div>
                  }
              }
          }
          <LoginModalView
              modal={view.modal.clone()}
              username_ref={username_input}
              on_username={on_username}
              on_password={on_password}
              on_submit={on_login_submit}
              on_close={on_login_close}
          />
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
