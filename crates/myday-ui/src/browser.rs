use anyhow::anyhow;
use chrono::{
  DateTime,
  Local
};
use js_sys::Array;
use myday_core::{
  Host,
  KeyValueStore
};
use web_sys::UrlSearchParams;

/// `window.localStorage`. When the
/// browser refuses storage (private
/// mode, disabled cookies) reads come
/// back empty and writes fail, which
/// the core logs and moves past.
pub struct BrowserStore {
  storage: Option<web_sys::Storage>
}

impl BrowserStore {
  pub fn open() -> Self {
    let storage = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });
    if storage.is_none() {
      tracing::warn!(
        "localStorage unavailable; \
         changes will not persist"
      );
    }
    Self { storage }
  }

  fn storage(
    &self
  ) -> anyhow::Result<&web_sys::Storage>
  {
    self.storage.as_ref().ok_or_else(
      || {
        anyhow!(
          "localStorage unavailable"
        )
      }
    )
  }
}

impl KeyValueStore for BrowserStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    let Some(storage) = &self.storage
    else {
      return Ok(None);
    };
    storage.get_item(key).map_err(
      |err| {
        anyhow!(
          "getItem({key}) failed: \
           {err:?}"
        )
      }
    )
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .storage()?
      .set_item(key, value)
      .map_err(|err| {
        anyhow!(
          "setItem({key}) failed: \
           {err:?}"
        )
      })
  }

  fn remove(
    &mut self,
    key: &str
  ) -> anyhow::Result<()> {
    self
      .storage()?
      .remove_item(key)
      .map_err(|err| {
        anyhow!(
          "removeItem({key}) failed: \
           {err:?}"
        )
      })
  }
}

/// Native dialogs and the local clock.
pub struct BrowserHost;

impl Host for BrowserHost {
  fn confirm(
    &self,
    message: &str
  ) -> bool {
    web_sys::window()
      .and_then(|window| {
        window
          .confirm_with_message(message)
          .ok()
      })
      .unwrap_or(false)
  }

  fn notify(&self, message: &str) {
    if let Some(window) =
      web_sys::window()
      && let Err(err) =
        window.alert_with_message(message)
    {
      tracing::error!(
        ?err,
        "failed showing alert"
      );
    }
  }

  fn now(&self) -> DateTime<Local> {
    Local::now()
  }
}

/// `rc.section.key=value` pairs from
/// the page's query string, e.g.
/// `?rc.storage.tasks=scratch`. Keys
/// and values arrive decoded
/// (`%2F`, `+`).
pub fn query_overrides()
-> Vec<(String, String)> {
  let search = web_sys::window()
    .and_then(|window| {
      window.location().search().ok()
    })
    .unwrap_or_default();
  let params =
    match UrlSearchParams::new_with_str(
      &search
    ) {
      | Ok(params) => params,
      | Err(err) => {
        tracing::warn!(
          ?err,
          "unreadable query string"
        );
        return Vec::new();
      }
    };

  let pairs = params
    .entries()
    .into_iter()
    .filter_map(Result::ok)
    .filter_map(|entry| {
      let entry = Array::from(&entry);
      Some((
        entry.get(0).as_string()?,
        entry.get(1).as_string()?
      ))
    });
  rc_overrides(pairs)
}

fn rc_overrides(
  pairs: impl IntoIterator<
    Item = (String, String)
  >
) -> Vec<(String, String)> {
  pairs
    .into_iter()
    .filter(|(key, _)| {
      key.starts_with("rc.")
    })
    .collect()
}
