use myday_core::session::LoginModal;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  NodeRef,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct LoginModalProps {
  pub modal:        LoginModal,
  pub username_ref: NodeRef,
  pub on_username:  Callback<String>,
  pub on_password:  Callback<String>,
  pub on_submit:    Callback<MouseEvent>,
  pub on_close:     Callback<MouseEvent>
}

fn input_value(
  emit: Callback<String>
) -> Callback<InputEvent> {
  Callback::from(move |e: InputEvent| {
    let input: HtmlInputElement =
      e.target_unchecked_into();
    emit.emit(input.value());
  })
}

#[function_component(LoginModalView)]
pub fn login_modal_view(
  props: &LoginModalProps
) -> Html {
  if !props.modal.open {
    return html! {};
  }

  html! {
      <div id="login-modal" class="modal-backdrop" onclick={props.on_close.clone()}>
          <div class="modal modal-sm" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
              <div class="header">{ "Login" }</div>
              <div class="content">
                  <div class="field">
                      <label for="username-input">{ "Username" }</label>
                      <input
                          id="username-input"
                          ref={props.username_ref.clone()}
                          value={props.modal.username.clone()}
                          oninput={input_value(props.on_username.clone())}
                          autocomplete="username"
                      />
                  </div>
                  <div class="field">
                      <label for="password-input">{ "Password" }</label>
                      <input
                          id="password-input"
                          type="password"
                          value={props.modal.password.clone()}
                          oninput={input_value(props.on_password.clone())}
                          autocomplete="current-password"
                      />
                  </div>
                  <div class="footer">
                      <button id="login-close" type="button" class="btn" onclick={props.on_close.clone()}>{ "Close" }</button>
                      <button id="login-do" type="button" class="btn primary" onclick={props.on_submit.clone()}>{ "Login" }</button>
                  </div>
              </div>
          </div>
      </div>
  }
}
