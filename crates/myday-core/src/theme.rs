#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  /// Anything other than `"dark"`,
  /// including absence, reads as light.
  pub fn from_stored(
    value: Option<&str>
  ) -> Self {
    match value {
      | Some("dark") => Self::Dark,
      | _ => Self::Light
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn next(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn body_class(
    self
  ) -> Option<&'static str> {
    match self {
      | Self::Light => None,
      | Self::Dark => Some("dark-mode")
    }
  }

  /// Icon on the toggle button: the
  /// theme you would switch to.
  pub fn toggle_icon(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "🌙",
      | Self::Dark => "☀️"
    }
  }
}
