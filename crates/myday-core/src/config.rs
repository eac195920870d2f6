use std::fmt::Write as _;

use anyhow::{
  Context,
  anyhow,
  bail
};
use chrono::format::{
  Item,
  StrftimeItems
};
use chrono::{
  DateTime,
  Local
};
use serde::Deserialize;
use tracing::{
  debug,
  info,
  warn
};

pub const DEFAULT_THEME_KEY: &str =
  "myday_theme_v1";
pub const DEFAULT_TASKS_KEY: &str =
  "myday_tasks_v1";
pub const DEFAULT_SESSION_KEY: &str =
  "myday_is_logged_in";

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(default)]
pub struct Config {
  pub storage: StorageKeys,
  pub format:  Formats,
  pub gate:    GateConfig
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct StorageKeys {
  pub theme:   String,
  pub tasks:   String,
  pub session: String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct Formats {
  /// `chrono` pattern for the creation
  /// date stored on each task.
  pub date:      String,
  /// `chrono` pattern for the "last
  /// saved" stamp.
  pub timestamp: String
}

/// The decorative login pair. Not a
/// secret; it ships inside the page.
#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct GateConfig {
  pub username: String,
  pub password: String
}

impl Default for StorageKeys {
  fn default() -> Self {
    Self {
      theme:   DEFAULT_THEME_KEY
        .to_string(),
      tasks:   DEFAULT_TASKS_KEY
        .to_string(),
      session: DEFAULT_SESSION_KEY
        .to_string()
    }
  }
}

impl Default for Formats {
  fn default() -> Self {
    Self {
      date:      "%-m/%-d/%Y"
        .to_string(),
      timestamp: "%-m/%-d/%Y, %-I:%M:%S %p"
        .to_string()
    }
  }
}

impl Default for GateConfig {
  fn default() -> Self {
    Self {
      username: "admin".to_string(),
      password: "12345".to_string()
    }
  }
}

impl Config {
  #[tracing::instrument(skip(raw))]
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let cfg: Config =
      toml::from_str(raw).context(
        "failed to parse myday \
         configuration"
      )?;
    check_pattern(&cfg.format.date)
      .context("invalid format.date")?;
    check_pattern(&cfg.format.timestamp)
      .context(
        "invalid format.timestamp"
      )?;
    debug!(?cfg.storage, "parsed configuration");
    Ok(cfg)
  }

  /// Parses `raw` when given, falling
  /// back to defaults on absence or a
  /// parse error.
  pub fn load(
    raw: Option<&str>
  ) -> Self {
    let Some(raw) = raw else {
      info!(
        "no configuration document; \
         using defaults"
      );
      return Self::default();
    };

    match Self::from_toml_str(raw) {
      | Ok(cfg) => cfg,
      | Err(error) => {
        warn!(
          error = %format!("{error:#}"),
          "invalid configuration; \
           using defaults"
        );
        Self::default()
      }
    }
  }

  /// Applies `section.key=value`
  /// overrides; an optional `rc.`
  /// prefix is ignored. Unknown keys
  /// are skipped with a warning.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      match self.set(&key, v) {
        | Ok(()) => {
          debug!(key = %key, "applied override");
        }
        | Err(error) => {
          warn!(key = %key, %error, "ignoring override");
        }
      }
    }
  }

  fn set(
    &mut self,
    key: &str,
    value: String
  ) -> anyhow::Result<()> {
    if value.trim().is_empty() {
      return Err(anyhow!(
        "override value cannot be \
         empty"
      ));
    }

    let slot = match key {
      | "storage.theme" => {
        &mut self.storage.theme
      }
      | "storage.tasks" => {
        &mut self.storage.tasks
      }
      | "storage.session" => {
        &mut self.storage.session
      }
      | "format.date" => {
        check_pattern(&value)?;
        &mut self.format.date
      }
      | "format.timestamp" => {
        check_pattern(&value)?;
        &mut self.format.timestamp
      }
      | "gate.username" => {
        &mut self.gate.username
      }
      | "gate.password" => {
        &mut self.gate.password
      }
      | _ => {
        return Err(anyhow!(
          "unknown config key: {key}"
        ));
      }
    };
    *slot = value;
    Ok(())
  }
}

/// Rejects `chrono` patterns with an
/// unknown or dangling specifier;
/// formatting with one fails at display
/// time.
pub fn check_pattern(
  pattern: &str
) -> anyhow::Result<()> {
  if StrftimeItems::new(pattern)
    .any(|item| item == Item::Error)
  {
    bail!(
      "unsupported date pattern: \
       {pattern}"
    );
  }
  Ok(())
}

/// Formats `at` with `pattern`. A
/// pattern that slipped past
/// [`check_pattern`] yields the fixed
/// `%Y-%m-%d %H:%M:%S` layout instead of
/// a panic.
pub fn format_instant(
  at: DateTime<Local>,
  pattern: &str
) -> String {
  let mut out = String::new();
  if write!(out, "{}", at.format(pattern))
    .is_ok()
  {
    return out;
  }

  warn!(
    pattern,
    "unformattable date pattern"
  );
  at.format("%Y-%m-%d %H:%M:%S")
    .to_string()
}
