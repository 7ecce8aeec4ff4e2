use serde::Deserialize;
use tracing::{
  info,
  warn
};

const MIN_DISMISS_MS: u32 = 500;
const MAX_DISMISS_MS: u32 = 30_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("invalid client config: {0}")]
  Parse(#[from] toml::de::Error)
}

/// Client settings, embedded in the UI
/// bundle as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ClientConfig {
  #[serde(default)]
  pub api:           ApiConfig,
  #[serde(default)]
  pub page:          PageConfig,
  #[serde(default)]
  pub notifications: NotificationConfig,
  #[serde(default)]
  pub theme:         ThemeConfig,
  #[serde(default)]
  pub features:      FeatureConfig
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiConfig {
  /// Empty means same origin.
  #[serde(default)]
  pub base_url: String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageConfig {
  #[serde(default = "default_list_id_field")]
  pub list_id_field:    String,
  #[serde(
    default = "default_board_data_field"
  )]
  pub board_data_field: String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationConfig {
  #[serde(default = "default_dismiss_ms")]
  pub dismiss_ms: u32
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
  #[serde(default = "default_storage_key")]
  pub storage_key: String
}

/// Switches for endpoints the server may
/// not expose yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct FeatureConfig {
  /// Offer deleting from the task modal.
  /// Needs `/api/deleteTask` on the server.
  #[serde(default)]
  pub delete_task: bool
}

fn default_list_id_field() -> String {
  "listIdField".to_string()
}

fn default_board_data_field() -> String {
  "boardData".to_string()
}

fn default_dismiss_ms() -> u32 {
  3_000
}

fn default_storage_key() -> String {
  "theme".to_string()
}

impl Default for PageConfig {
  fn default() -> Self {
    Self {
      list_id_field:    default_list_id_field(),
      board_data_field:
        default_board_data_field()
    }
  }
}

impl Default for NotificationConfig {
  fn default() -> Self {
    Self {
      dismiss_ms: default_dismiss_ms()
    }
  }
}

impl Default for ThemeConfig {
  fn default() -> Self {
    Self {
      storage_key: default_storage_key()
    }
  }
}

impl ClientConfig {
  pub fn parse(
    raw: &str
  ) -> Result<Self, ConfigError> {
    let mut config: Self =
      toml::from_str(raw)?;
    config.sanitize();
    Ok(config)
  }

  /// Parse, falling back to defaults on a
  /// malformed document.
  pub fn load(raw: &str) -> Self {
    match Self::parse(raw) {
      | Ok(config) => {
        info!(
          base_url = %config.api.base_url,
          dismiss_ms = config.notifications.dismiss_ms,
          delete_task = config.features.delete_task,
          "loaded client config"
        );
        config
      }
      | Err(error) => {
        warn!(%error, "failed parsing client config; using defaults");
        Self::default()
      }
    }
  }

  pub fn endpoint(
    &self,
    path: &str
  ) -> String {
    format!("{}{path}", self.api.base_url)
  }

  fn sanitize(&mut self) {
    self.api.base_url = self
      .api
      .base_url
      .trim()
      .trim_end_matches('/')
      .to_string();

    if self.page.list_id_field.trim().is_empty()
    {
      self.page.list_id_field =
        default_list_id_field();
    }
    if self
      .page
      .board_data_field
      .trim()
      .is_empty()
    {
      self.page.board_data_field =
        default_board_data_field();
    }
    if self.theme.storage_key.trim().is_empty()
    {
      self.theme.storage_key =
        default_storage_key();
    }

    self.notifications.dismiss_ms = self
      .notifications
      .dismiss_ms
      .clamp(MIN_DISMISS_MS, MAX_DISMISS_MS);
  }
}
