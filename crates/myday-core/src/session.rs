//! Cosmetic login gate.
//!
//! This only decides whether the main content is shown. The credential pair
//! ships inside the page and nothing here protects any data.

use tracing::{
  debug,
  info
};

use crate::config::GateConfig;

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum Session {
  #[default]
  LoggedOut,
  LoggedIn
}

impl Session {
  /// Only the exact string `"true"`
  /// means logged in.
  pub fn from_stored(
    value: Option<&str>
  ) -> Self {
    match value {
      | Some("true") => Self::LoggedIn,
      | _ => Self::LoggedOut
    }
  }

  pub fn is_logged_in(self) -> bool {
    self == Self::LoggedIn
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum HeaderAction {
  OpenLogin,
  Logout
}

/// The header button. Its binding is a
/// function of the session, so exactly
/// one action is ever attached.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct HeaderControl {
  pub action: HeaderAction,
  pub icon:   &'static str,
  pub title:  &'static str
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct LoginModal {
  pub open:     bool,
  pub username: String,
  pub password: String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum LoginOutcome {
  Accepted { username: String },
  Rejected
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct SessionGate {
  session: Session,
  modal:   LoginModal
}

impl SessionGate {
  pub fn new(session: Session) -> Self {
    Self {
      session,
      modal: LoginModal::default()
    }
  }

  pub fn session(&self) -> Session {
    self.session
  }

  pub fn modal(&self) -> &LoginModal {
    &self.modal
  }

  pub fn main_visible(&self) -> bool {
    self.session.is_logged_in()
  }

  pub fn header(&self) -> HeaderControl {
    match self.session {
      | Session::LoggedOut => {
        HeaderControl {
          action: HeaderAction::OpenLogin,
          icon:   "🔐",
          title:  "Login"
        }
      }
      | Session::LoggedIn => {
        HeaderControl {
          action: HeaderAction::Logout,
          icon:   "🔒",
          title:  "Logout"
        }
      }
    }
  }

  /// Returns `false` when already
  /// logged in; the prompt only exists
  /// on the logged-out side.
  pub fn open_prompt(&mut self) -> bool {
    if self.session.is_logged_in() {
      return false;
    }
    self.modal.open = true;
    debug!("login prompt opened");
    true
  }

  pub fn set_username(
    &mut self,
    value: String
  ) {
    self.modal.username = value;
  }

  pub fn set_password(
    &mut self,
    value: String
  ) {
    self.modal.password = value;
  }

  /// Compares the trimmed fields with
  /// the configured pair. A match logs
  /// in and resets the modal; a miss
  /// clears the password only.
  #[tracing::instrument(skip_all)]
  pub fn submit(
    &mut self,
    gate: &GateConfig
  ) -> LoginOutcome {
    let username =
      self.modal.username.trim();
    let password =
      self.modal.password.trim();

    if username == gate.username
      && password == gate.password
    {
      let username = username.to_string();
      self.session = Session::LoggedIn;
      self.close();
      info!(%username, "logged in");
      LoginOutcome::Accepted { username }
    } else {
      self.modal.password.clear();
      info!("login rejected");
      LoginOutcome::Rejected
    }
  }

  pub fn close(&mut self) {
    self.modal = LoginModal::default();
  }

  /// Returns `false` when there was no
  /// session to end.
  pub fn logout(&mut self) -> bool {
    if !self.session.is_logged_in() {
      return false;
    }
    self.session = Session::LoggedOut;
    info!("logged out");
    true
  }
}
