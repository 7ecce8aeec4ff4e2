#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Light,
  Dark
}

/// Theme chosen at startup and whether it
/// should be written back to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChoice {
  pub theme:   Theme,
  pub persist: bool
}

impl Theme {
  /// A stored value wins. With nothing
  /// stored, a system dark preference
  /// selects dark and is remembered.
  pub fn resolve(
    stored: Option<&str>,
    prefers_dark: bool
  ) -> ThemeChoice {
    if let Some(theme) =
      stored.and_then(Self::from_storage)
    {
      return ThemeChoice {
        theme,
        persist: false
      };
    }
    if prefers_dark {
      ThemeChoice {
        theme:   Self::Dark,
        persist: true
      }
    } else {
      ThemeChoice {
        theme:   Self::Light,
        persist: false
      }
    }
  }

  pub fn from_storage(
    raw: &str
  ) -> Option<Self> {
    match raw.trim() {
      | "light" => Some(Self::Light),
      | "dark" => Some(Self::Dark),
      | _ => None
    }
  }

  /// Also the `data-theme` attribute value.
  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn is_dark(self) -> bool {
    self == Self::Dark
  }

  pub fn announcement(self) -> String {
    format!(
      "Switched to {} mode",
      self.storage_value()
    )
  }
}

/// Screen-reader text for the last theme
/// switch. Each announcement gets a new
/// generation; only the timer for the
/// current one may clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Announcement {
  generation: u64,
  text:       Option<String>
}

impl Announcement {
  pub fn announce(
    &mut self,
    theme: Theme
  ) -> u64 {
    self.generation += 1;
    self.text = Some(theme.announcement());
    self.generation
  }

  /// Clear the text if `generation` is
  /// still the latest. Returns whether it
  /// changed.
  pub fn expire(
    &mut self,
    generation: u64
  ) -> bool {
    if generation != self.generation
      || self.text.is_none()
    {
      return false;
    }
    self.text = None;
    true
  }

  pub fn text(&self) -> Option<&str> {
    self.text.as_deref()
  }
}
