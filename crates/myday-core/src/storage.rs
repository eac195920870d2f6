use std::collections::BTreeMap;

use tracing::trace;

/// String-keyed, string-valued persistence boundary.
///
/// The browser front end backs this with `localStorage`; tests and headless
/// callers use [`MemoryStore`].
pub trait KeyValueStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;

  fn remove(
    &mut self,
    key: &str
  ) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: BTreeMap<String, String>
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_entries<I, K, V>(
    entries: I
  ) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>
  {
    Self {
      entries: entries
        .into_iter()
        .map(|(k, v)| {
          (k.into(), v.into())
        })
        .collect()
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    trace!(key, bytes = value.len(), "memory store set");
    self.entries.insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }

  fn remove(
    &mut self,
    key: &str
  ) -> anyhow::Result<()> {
    trace!(key, "memory store remove");
    self.entries.remove(key);
    Ok(())
  }
}

/// Writes are treated as always succeeding; a failure is logged and the
/// session carries on with the in-memory state.
pub(crate) fn write_or_log<S>(
  storage: &mut S,
  key: &str,
  value: Option<&str>
) where
  S: KeyValueStore + ?Sized
{
  let result = match value {
    | Some(value) => {
      storage.set(key, value)
    }
    | None => storage.remove(key)
  };

  if let Err(error) = result {
    tracing::error!(
      key,
      error = %format!("{error:#}"),
      "failed writing to storage"
    );
  }
}
