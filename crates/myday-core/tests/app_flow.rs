use std::cell::{
  Cell,
  RefCell
};
use std::collections::VecDeque;

use chrono::{
  DateTime,
  Local,
  TimeZone
};
use myday_core::session::{
  HeaderAction,
  Session
};
use myday_core::task::Task;
use myday_core::theme::Theme;
use myday_core::{
  Config,
  Controller,
  Event,
  Focus,
  Host,
  KeyValueStore,
  ListTarget,
  MemoryStore
};

struct ScriptedHost {
  answers: RefCell<VecDeque<bool>>,
  notices: RefCell<Vec<String>>,
  asked:   RefCell<Vec<String>>,
  clock:   Cell<DateTime<Local>>
}

impl ScriptedHost {
  fn new() -> Self {
    Self {
      answers: RefCell::new(
        VecDeque::new()
      ),
      notices: RefCell::new(vec![]),
      asked:   RefCell::new(vec![]),
      clock:   Cell::new(
        Local
          .with_ymd_and_hms(
            2025, 3, 14, 9, 0, 0
          )
          .single()
          .expect("valid local time")
      )
    }
  }

  fn answer(&self, yes: bool) {
    self
      .answers
      .borrow_mut()
      .push_back(yes);
  }

  fn tick(&self) {
    self.clock.set(
      self.clock.get()
        + chrono::Duration::seconds(1)
    );
  }

  fn notices(&self) -> Vec<String> {
    self.notices.borrow().clone()
  }
}

impl Host for ScriptedHost {
  fn confirm(
    &self,
    message: &str
  ) -> bool {
    self
      .asked
      .borrow_mut()
      .push(message.to_string());
    self
      .answers
      .borrow_mut()
      .pop_front()
      .unwrap_or(false)
  }

  fn notify(&self, message: &str) {
    self
      .notices
      .borrow_mut()
      .push(message.to_string());
  }

  fn now(&self) -> DateTime<Local> {
    self.clock.get()
  }
}

fn start(
  storage: MemoryStore,
  host: &ScriptedHost
) -> Controller<MemoryStore> {
  Controller::start(
    storage,
    Config::default(),
    host.now()
  )
}

fn add(
  ctl: &mut Controller<MemoryStore>,
  host: &ScriptedHost,
  text: &str
) {
  ctl.handle(
    Event::DraftChanged(
      text.to_string()
    ),
    host
  );
  ctl.handle(Event::AddRequested, host);
  host.tick();
}

fn log_in(
  ctl: &mut Controller<MemoryStore>,
  host: &ScriptedHost,
  username: &str,
  password: &str
) -> myday_core::Effects {
  ctl.handle(Event::HeaderClicked, host);
  ctl.handle(
    Event::UsernameChanged(
      username.to_string()
    ),
    host
  );
  ctl.handle(
    Event::PasswordChanged(
      password.to_string()
    ),
    host
  );
  ctl.handle(Event::LoginSubmitted, host)
}

fn stored_tasks(
  ctl: &Controller<MemoryStore>
) -> Vec<Task> {
  let raw = ctl
    .storage()
    .get("myday_tasks_v1")
    .expect("read storage")
    .expect("tasks persisted");
  serde_json::from_str(&raw)
    .expect("parse stored tasks")
}

#[test]
fn counts_track_the_sequence() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);

  for text in
    ["wake up", "stretch", "email", "lunch"]
  {
    add(&mut ctl, &host, text);
  }
  let ids: Vec<_> = ctl
    .state()
    .store
    .tasks()
    .iter()
    .map(|t| t.id.clone())
    .collect();

  ctl.handle(
    Event::ListClicked {
      id:     ids[0].clone(),
      target: ListTarget::Checkbox {
        checked: true
      }
    },
    &host
  );
  let view = ctl.view();
  assert_eq!(view.stats.total, 4);
  assert_eq!(view.stats.completed, 1);
  assert_eq!(view.stats.percent, 25);
  assert_eq!(
    view.stats.progress_width,
    "25%"
  );
  assert_eq!(
    view.stats.task_count_label,
    "4 tasks"
  );

  ctl.handle(
    Event::ListClicked {
      id:     ids[3].clone(),
      target: ListTarget::Delete
    },
    &host
  );
  ctl.handle(
    Event::ListClicked {
      id:     ids[1].clone(),
      target: ListTarget::Checkbox {
        checked: true
      }
    },
    &host
  );
  let view = ctl.view();
  assert_eq!(view.stats.total, 3);
  assert_eq!(view.stats.completed, 2);
  assert_eq!(view.stats.percent, 67);
  assert_eq!(view.rows.len(), 3);
  assert_eq!(stored_tasks(&ctl).len(), 3);
}

#[test]
fn add_persists_and_clears_the_draft() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);

  add(&mut ctl, &host, "  Buy bread ");
  assert!(ctl.state().draft.is_empty());

  let stored = stored_tasks(&ctl);
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0].text, "Buy bread");
  assert_eq!(stored[0].date, "3/14/2025");
  assert_eq!(
    stored,
    ctl.state().store.tasks()
  );
  assert!(
    ctl
      .view()
      .stats
      .last_saved_label
      .starts_with("Last saved: 3/14/2025")
  );
}

#[test]
fn whitespace_add_refocuses_input() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);

  ctl.handle(
    Event::DraftChanged(
      "   ".to_string()
    ),
    &host
  );
  let effects =
    ctl.handle(Event::AddRequested, &host);
  assert_eq!(
    effects.focus,
    Some(Focus::TaskInput)
  );
  assert!(ctl.state().store.is_empty());
  assert_eq!(
    ctl
      .storage()
      .get("myday_tasks_v1")
      .expect("read storage"),
    None
  );
}

#[test]
fn restart_reproduces_tasks() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);
  add(&mut ctl, &host, "first");
  add(&mut ctl, &host, "second");
  let before =
    ctl.state().store.tasks().to_vec();

  let reopened = start(
    ctl.storage().clone(),
    &host
  );
  assert_eq!(
    reopened.state().store.tasks(),
    before.as_slice()
  );
}

#[test]
fn malformed_storage_starts_empty() {
  let host = ScriptedHost::new();
  let storage =
    MemoryStore::with_entries([
      ("myday_tasks_v1", "{oops"),
      ("myday_theme_v1", "purple"),
      ("myday_is_logged_in", "yes"),
    ]);
  let ctl = start(storage, &host);

  assert!(ctl.state().store.is_empty());
  assert_eq!(ctl.state().theme, Theme::Light);
  let view = ctl.view();
  assert!(!view.main_visible);
  assert!(view.list_html.is_empty());
  assert_eq!(view.stats.percent, 0);
}

#[test]
fn clear_all_needs_confirmation() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);
  add(&mut ctl, &host, "a");
  add(&mut ctl, &host, "b");

  host.answer(false);
  ctl.handle(Event::ClearAll, &host);
  assert_eq!(ctl.state().store.len(), 2);

  host.answer(true);
  ctl.handle(Event::ClearAll, &host);
  assert!(ctl.state().store.is_empty());
  assert!(stored_tasks(&ctl).is_empty());
  assert_eq!(
    host.asked.borrow().len(),
    2
  );
}

#[test]
fn clear_completed_keeps_pending_in_order() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);
  for text in ["a", "b", "c"] {
    add(&mut ctl, &host, text);
  }
  let middle =
    ctl.state().store.tasks()[1].id.clone();
  ctl.handle(
    Event::ListClicked {
      id:     middle,
      target: ListTarget::Checkbox {
        checked: true
      }
    },
    &host
  );

  ctl.handle(
    Event::ClearCompleted,
    &host
  );
  let texts: Vec<_> = stored_tasks(&ctl)
    .into_iter()
    .map(|t| t.text)
    .collect();
  assert_eq!(texts, vec!["a", "c"]);
}

#[test]
fn login_survives_restart() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);
  assert!(!ctl.view().main_visible);
  assert_eq!(ctl.initial_focus(), None);

  let effects =
    log_in(&mut ctl, &host, "admin", "12345");
  assert_eq!(
    effects.focus,
    Some(Focus::TaskInput)
  );
  let view = ctl.view();
  assert!(view.main_visible);
  assert!(!view.modal.open);
  assert!(view.modal.username.is_empty());
  assert_eq!(
    view.header.action,
    HeaderAction::Logout
  );
  assert_eq!(host.notices().len(), 1);

  let reopened = start(
    ctl.storage().clone(),
    &host
  );
  assert_eq!(
    reopened.state().gate.session(),
    Session::LoggedIn
  );
  assert!(reopened.view().main_visible);
  assert_eq!(
    reopened.initial_focus(),
    Some(Focus::TaskInput)
  );
}

#[test]
fn wrong_credentials_keep_the_gate_closed() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);

  let effects =
    log_in(&mut ctl, &host, "admin", "nope");
  assert_eq!(
    effects.focus,
    Some(Focus::Username)
  );
  let view = ctl.view();
  assert!(!view.main_visible);
  assert!(view.modal.open);
  assert_eq!(view.modal.username, "admin");
  assert!(view.modal.password.is_empty());
  assert_eq!(
    host.notices(),
    vec![
      "Login failed. Wrong username or \
       password."
        .to_string()
    ]
  );
  assert_eq!(
    ctl
      .storage()
      .get("myday_is_logged_in")
      .expect("read storage"),
    None
  );
}

#[test]
fn closing_the_modal_discards_input() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);
  ctl.handle(Event::HeaderClicked, &host);
  ctl.handle(
    Event::UsernameChanged(
      "admin".to_string()
    ),
    &host
  );
  ctl.handle(
    Event::PasswordChanged(
      "12345".to_string()
    ),
    &host
  );
  ctl.handle(Event::LoginClosed, &host);

  let view = ctl.view();
  assert!(!view.modal.open);
  assert!(view.modal.username.is_empty());
  assert!(view.modal.password.is_empty());
  assert!(!view.main_visible);
}

#[test]
fn logout_hides_content_across_restart() {
  let host = ScriptedHost::new();
  let storage =
    MemoryStore::with_entries([(
      "myday_is_logged_in",
      "true"
    )]);
  let mut ctl = start(storage, &host);
  assert!(ctl.view().main_visible);

  host.answer(false);
  ctl.handle(Event::HeaderClicked, &host);
  assert!(ctl.view().main_visible);

  host.answer(true);
  ctl.handle(Event::HeaderClicked, &host);
  let view = ctl.view();
  assert!(!view.main_visible);
  assert_eq!(
    view.header.action,
    HeaderAction::OpenLogin
  );
  assert_eq!(view.header.icon, "🔐");

  let reopened = start(
    ctl.storage().clone(),
    &host
  );
  assert_eq!(
    reopened.state().gate.session(),
    Session::LoggedOut
  );
  assert!(!reopened.view().main_visible);
}

#[test]
fn theme_choice_is_restored() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);
  ctl.handle(Event::ToggleTheme, &host);

  let view = ctl.view();
  assert_eq!(
    view.body_class,
    Some("dark-mode")
  );
  assert_eq!(view.theme_icon, "☀️");

  let reopened = start(
    ctl.storage().clone(),
    &host
  );
  assert_eq!(
    reopened.state().theme,
    Theme::Dark
  );
}

#[test]
fn unusable_date_patterns_never_break_rendering() {
  let host = ScriptedHost::new();
  let mut cfg = Config::default();
  cfg.apply_overrides([
    (
      "rc.format.timestamp".to_string(),
      "%Q".to_string()
    ),
    (
      "rc.format.date".to_string(),
      "%".to_string()
    ),
  ]);
  assert_eq!(
    cfg.format,
    Config::default().format
  );

  // Bypasses validation entirely.
  cfg.format.timestamp = "%Q".to_string();
  cfg.format.date = "%Q".to_string();
  let mut ctl = Controller::start(
    MemoryStore::new(),
    cfg,
    host.now()
  );
  add(&mut ctl, &host, "still renders");

  let view = ctl.view();
  assert_eq!(view.rows.len(), 1);
  assert_eq!(
    view.rows[0].date,
    "2025-03-14 09:00:00"
  );
  assert_eq!(
    view.stats.last_saved_label,
    "Last saved: 2025-03-14 09:00:00"
  );
}

#[test]
fn configured_keys_are_used() {
  let host = ScriptedHost::new();
  let mut cfg = Config::default();
  cfg.apply_overrides([(
    "storage.tasks".to_string(),
    "scratch_tasks".to_string()
  )]);
  let mut ctl = Controller::start(
    MemoryStore::new(),
    cfg,
    host.now()
  );
  add(&mut ctl, &host, "elsewhere");

  assert!(
    ctl
      .storage()
      .get("scratch_tasks")
      .expect("read storage")
      .is_some()
  );
  assert_eq!(
    ctl
      .storage()
      .get("myday_tasks_v1")
      .expect("read storage"),
    None
  );
}

#[test]
fn escaped_text_reaches_the_view() {
  let host = ScriptedHost::new();
  let mut ctl =
    start(MemoryStore::new(), &host);
  add(
    &mut ctl,
    &host,
    "<script>alert('x')</script>"
  );

  let view = ctl.view();
  assert!(!view.list_html.contains("<script>"));
  assert_eq!(
    view.rows[0].text_html,
    "&lt;script&gt;alert(&#39;x&#39;)&lt;/\
     script&gt;"
  );
  assert_eq!(
    ctl.state().store.tasks()[0].text,
    "<script>alert('x')</script>"
  );
}
