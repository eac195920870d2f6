use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::config::Config;
use crate::render::{ViewModel, render};
use crate::session::{HeaderAction, LoginOutcome, Session, SessionGate};
use crate::storage::{KeyValueStore, write_or_log};
use crate::store::{AddOutcome, TaskStore};
use crate::task::TaskId;
use crate::theme::Theme;

/// Services the controller borrows from whatever is hosting it.
pub trait Host {
    /// Blocking yes/no question. `false` cancels the action.
    fn confirm(&self, message: &str) -> bool;
    /// Blocking notice.
    fn notify(&self, message: &str);
    fn now(&self) -> DateTime<Local>;
}

/// The sub-element of a row that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Checkbox { checked: bool },
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DraftChanged(String),
    /// Add button or Enter in the task input.
    AddRequested,
    ListClicked { id: TaskId, target: ListTarget },
    ClearAll,
    ClearCompleted,
    ToggleTheme,
    HeaderClicked,
    UsernameChanged(String),
    PasswordChanged(String),
    LoginSubmitted,
    LoginClosed,
}

impl Event {
    /// Variant name, for logging. Field values (the password in particular)
    /// stay out of logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::DraftChanged(_) => "draft_changed",
            Event::AddRequested => "add_requested",
            Event::ListClicked { .. } => "list_clicked",
            Event::ClearAll => "clear_all",
            Event::ClearCompleted => "clear_completed",
            Event::ToggleTheme => "toggle_theme",
            Event::HeaderClicked => "header_clicked",
            Event::UsernameChanged(_) => "username_changed",
            Event::PasswordChanged(_) => "password_changed",
            Event::LoginSubmitted => "login_submitted",
            Event::LoginClosed => "login_closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    TaskInput,
    Username,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    pub focus: Option<Focus>,
}

impl Effects {
    fn focus(target: Focus) -> Self {
        Self {
            focus: Some(target),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: TaskStore,
    pub theme: Theme,
    pub gate: SessionGate,
    /// Current contents of the task input.
    pub draft: String,
}

pub struct Controller<S> {
    state: AppState,
    storage: S,
    config: Config,
}

impl<S> Controller<S>
where
    S: KeyValueStore,
{
    /// Hydrates theme, tasks and session from `storage`.
    #[tracing::instrument(skip_all)]
    pub fn start(storage: S, config: Config, now: DateTime<Local>) -> Self {
        let theme = Theme::from_stored(read_or_none(&storage, &config.storage.theme).as_deref());
        let session =
            Session::from_stored(read_or_none(&storage, &config.storage.session).as_deref());

        let mut store = TaskStore::new();
        store.load(&storage, &config.storage.tasks);
        store.touch(now);

        info!(
            ?theme,
            ?session,
            tasks = store.len(),
            "started controller"
        );

        Self {
            state: AppState {
                store,
                theme,
                gate: SessionGate::new(session),
                draft: String::new(),
            },
            storage,
            config,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn view(&self) -> ViewModel {
        render(&self.state, &self.config.format)
    }

    /// Focus wanted right after startup: the task input, but only when the
    /// list is visible.
    pub fn initial_focus(&self) -> Option<Focus> {
        self.state
            .gate
            .main_visible()
            .then_some(Focus::TaskInput)
    }

    #[tracing::instrument(skip_all, fields(event = event.kind()))]
    pub fn handle<H>(&mut self, event: Event, host: &H) -> Effects
    where
        H: Host + ?Sized,
    {
        match event {
            Event::DraftChanged(text) => {
                self.state.draft = text;
                Effects::default()
            }
            Event::AddRequested => self.add(host),
            Event::ListClicked { id, target } => {
                let changed = match target {
                    ListTarget::Checkbox { checked } => self.state.store.toggle(&id, checked),
                    ListTarget::Delete => self.state.store.delete(&id),
                };
                if changed {
                    self.save_tasks(host);
                }
                Effects::default()
            }
            Event::ClearAll => {
                if !host.confirm("Delete ALL tasks?") {
                    info!("clear all canceled");
                    return Effects::default();
                }
                self.state.store.clear_all();
                self.save_tasks(host);
                Effects::default()
            }
            Event::ClearCompleted => {
                self.state.store.clear_completed();
                self.save_tasks(host);
                Effects::default()
            }
            Event::ToggleTheme => {
                self.state.theme = self.state.theme.next();
                write_or_log(
                    &mut self.storage,
                    &self.config.storage.theme,
                    Some(self.state.theme.storage_value()),
                );
                debug!(theme = ?self.state.theme, "theme toggled");
                Effects::default()
            }
            Event::HeaderClicked => match self.state.gate.header().action {
                HeaderAction::OpenLogin => {
                    self.state.gate.open_prompt();
                    Effects::focus(Focus::Username)
                }
                HeaderAction::Logout => self.logout(host),
            },
            Event::UsernameChanged(value) => {
                self.state.gate.set_username(value);
                Effects::default()
            }
            Event::PasswordChanged(value) => {
                self.state.gate.set_password(value);
                Effects::default()
            }
            Event::LoginSubmitted => self.login(host),
            Event::LoginClosed => {
                self.state.gate.close();
                Effects::default()
            }
        }
    }

    fn add<H>(&mut self, host: &H) -> Effects
    where
        H: Host + ?Sized,
    {
        let outcome =
            self.state
                .store
                .add(&self.state.draft, host.now(), &self.config.format.date);
        match outcome {
            AddOutcome::Added(_) => {
                self.state.draft.clear();
                self.save_tasks(host);
                Effects::default()
            }
            AddOutcome::Rejected => Effects::focus(Focus::TaskInput),
        }
    }

    fn login<H>(&mut self, host: &H) -> Effects
    where
        H: Host + ?Sized,
    {
        match self.state.gate.submit(&self.config.gate) {
            LoginOutcome::Accepted { username } => {
                write_or_log(&mut self.storage, &self.config.storage.session, Some("true"));
                host.notify(&format!(
                    "Login successful! Welcome, {username}. Your daily plan is now available."
                ));
                Effects::focus(Focus::TaskInput)
            }
            LoginOutcome::Rejected => {
                host.notify("Login failed. Wrong username or password.");
                Effects::focus(Focus::Username)
            }
        }
    }

    fn logout<H>(&mut self, host: &H) -> Effects
    where
        H: Host + ?Sized,
    {
        if !host.confirm("Are you sure you want to log out?") {
            info!("logout canceled");
            return Effects::default();
        }
        if self.state.gate.logout() {
            write_or_log(&mut self.storage, &self.config.storage.session, None);
            host.notify("You have been logged out. Your daily plan is hidden.");
        }
        Effects::default()
    }

    fn save_tasks<H>(&mut self, host: &H)
    where
        H: Host + ?Sized,
    {
        self.state
            .store
            .persist(&mut self.storage, &self.config.storage.tasks, host.now());
    }
}

fn read_or_none<S>(storage: &S, key: &str) -> Option<String>
where
    S: KeyValueStore + ?Sized,
{
    match storage.get(key) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, error = %format!("{error:#}"), "failed reading storage");
            None
        }
    }
}
