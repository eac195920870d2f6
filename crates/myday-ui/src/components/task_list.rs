use myday_core::ListTarget;
use myday_core::render::{
  ROW_SELECTOR,
  list_target
};
use myday_core::task::TaskId;
use wasm_bindgen::JsCast;
use web_sys::{
  Element,
  HtmlInputElement
};
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
pub struct TaskListProps {
  /// Pre-escaped row markup.
  pub list_html:          AttrValue,
  pub is_empty:           bool,
  pub on_row_event:
    Callback<(TaskId, ListTarget)>,
  pub on_clear_all:       Callback<MouseEvent>,
  pub on_clear_completed: Callback<MouseEvent>
}

/// Maps a click anywhere in the list to
/// the owning row and the control that
/// was hit. Clicks on anything else in a
/// row are ignored.
fn resolve_click(
  e: &MouseEvent
) -> Option<(TaskId, ListTarget)> {
  let target = e
    .target()?
    .dyn_into::<Element>()
    .ok()?;
  let row = target
    .closest(ROW_SELECTOR)
    .ok()
    .flatten()?;
  let id = TaskId::from(
    row.get_attribute("data-id")?
  );
  let checked = target
    .dyn_ref::<HtmlInputElement>()
    .is_some_and(HtmlInputElement::checked);

  list_target(&target.class_name(), checked)
    .map(|hit| (id, hit))
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let on_click = {
    let on_row_event =
      props.on_row_event.clone();
    Callback::from(
      move |e: MouseEvent| {
        if let Some(hit) =
          resolve_click(&e)
        {
          on_row_event.emit(hit);
        }
      }
    )
  };

  html! {
      <section class="panel list">
          <div class="header">{ "Today" }</div>
          {
              if props.is_empty {
                  html! { <div class="empty muted">{ "No tasks yet. Add one above." }</div> }
              } else {
                  html! {}
              }
          }
          <ul id="todo-list" class="todo-list" onclick={on_click}>
              { Html::from_html_unchecked(props.list_html.clone()) }
          </ul>
          <div class="footer">
              <button id="clear-completed" class="btn" onclick={props.on_clear_completed.clone()}>
                  { "Clear completed" }
              </button>
              <button id="clear-all" class="btn danger" onclick={props.on_clear_all.clone()}>
                  { "Clear all" }
              </button>
          </div>
      </section>
  }
}
