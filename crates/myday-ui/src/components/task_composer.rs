use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  KeyboardEvent,
  NodeRef,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskComposerProps {
  pub draft:     String,
  pub input_ref: NodeRef,
  pub on_draft:  Callback<String>,
  pub on_add:    Callback<()>
}

/// Enter adds the draft, except while an
/// input method is still composing.
fn submits_task(
  key: &str,
  composing: bool
) -> bool {
  key == "Enter" && !composing
}

#[function_component(TaskComposer)]
pub fn task_composer(
  props: &TaskComposerProps
) -> Html {
  let on_input = {
    let on_draft =
      props.on_draft.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_draft.emit(input.value());
      }
    )
  };

  // Enter behaves exactly like the
  // add button.
  let on_keydown = {
    let on_add = props.on_add.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if submits_task(
          &e.key(),
          e.is_composing()
        ) {
          e.prevent_default();
          on_add.emit(());
        }
      }
    )
  };

  let on_click = {
    let on_add = props.on_add.clone();
    Callback::from(move |_| {
      on_add.emit(())
    })
  };

  html! {
      <div class="composer">
          <input
              id="todo-input"
              ref={props.input_ref.clone()}
              value={props.draft.clone()}
              oninput={on_input}
              onkeydown={on_keydown}
              placeholder="What do you want to get done today?"
              autocomplete="off"
          />
          <button id="add-btn" class="btn primary" onclick={on_click}>{ "Add" }</button>
      </div>
  }
}
