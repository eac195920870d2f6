use anyhow::Context;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};
use uuid::ContextV7;

use crate::storage::{KeyValueStore, write_or_log};
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(TaskId),
    /// Text was empty after trimming; nothing was inserted.
    Rejected,
}

/// Ordered task sequence plus the instant it was last written out.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    last_saved: Option<DateTime<Local>>,
    ids: IdSequence,
}

/// UUIDv7 counter state shared by every id this store mints.
#[derive(Debug)]
struct IdSequence(ContextV7);

impl Default for IdSequence {
    fn default() -> Self {
        Self(ContextV7::new())
    }
}

// A clone mints its own ids from a fresh counter.
impl Clone for IdSequence {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        self.last_saved
    }

    pub(crate) fn touch(&mut self, now: DateTime<Local>) {
        self.last_saved = Some(now);
    }

    #[tracing::instrument(skip(self, text, now, date_format))]
    pub fn add(&mut self, text: &str, now: DateTime<Local>, date_format: &str) -> AddOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("rejected empty task text");
            return AddOutcome::Rejected;
        }

        let id = TaskId::generate(&self.ids.0, now);
        self.tasks.push(Task::new_pending(
            id.clone(),
            trimmed.to_string(),
            now,
            date_format,
        ));
        info!(%id, count = self.tasks.len(), "added task");
        AddOutcome::Added(id)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn toggle(&mut self, id: &TaskId, done: bool) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) else {
            debug!("toggle target not found");
            return false;
        };
        task.done = done;
        true
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        let removed = self.tasks.len() != before;
        if !removed {
            debug!("delete target not found");
        }
        removed
    }

    #[tracing::instrument(skip(self))]
    pub fn clear_all(&mut self) {
        info!(removed = self.tasks.len(), "cleared all tasks");
        self.tasks.clear();
    }

    #[tracing::instrument(skip(self))]
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        let removed = before - self.tasks.len();
        info!(removed, remaining = self.tasks.len(), "cleared completed tasks");
        removed
    }

    /// Replaces the sequence with whatever is stored under `key`.
    ///
    /// Absence, read failures and malformed blobs all leave an empty list;
    /// there is no partial recovery.
    #[tracing::instrument(skip(self, storage))]
    pub fn load<S>(&mut self, storage: &S, key: &str)
    where
        S: KeyValueStore + ?Sized,
    {
        self.tasks = match read_tasks(storage, key) {
            Ok(Some(tasks)) => tasks,
            Ok(None) => {
                debug!("no stored tasks");
                Vec::new()
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "discarding stored tasks");
                Vec::new()
            }
        };
        debug!(count = self.tasks.len(), "loaded tasks");
    }

    #[tracing::instrument(skip(self, storage, now))]
    pub fn persist<S>(&mut self, storage: &mut S, key: &str, now: DateTime<Local>)
    where
        S: KeyValueStore + ?Sized,
    {
        match serde_json::to_string(&self.tasks) {
            Ok(blob) => write_or_log(storage, key, Some(&blob)),
            Err(error) => tracing::error!(%error, "failed serializing tasks"),
        }
        self.last_saved = Some(now);
        debug!(count = self.tasks.len(), "persisted tasks");
    }
}

fn read_tasks<S>(storage: &S, key: &str) -> anyhow::Result<Option<Vec<Task>>>
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = storage
        .get(key)
        .with_context(|| format!("failed reading {key}"))?
    else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let tasks: Vec<Task> =
        serde_json::from_str(&raw).with_context(|| format!("failed parsing {key}"))?;
    Ok(Some(tasks))
}
