use lanes_shared::TaskId;

/// Failure of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
  /// Non-2xx answer; `message` is the
  /// plain-text body.
  #[error("server returned {status}: {message}")]
  Server { status: u16, message: String },
  #[error("network error: {0}")]
  Network(String),
  #[error("invalid response: {0}")]
  Decode(String)
}

impl ApiError {
  /// Text shown to the user: the server's
  /// own message when it sent one, the
  /// caller's generic fallback otherwise.
  pub fn user_message(
    &self,
    generic: &str
  ) -> String {
    match self {
      | Self::Server {
        message, ..
      } if !message.trim().is_empty() => {
        message.trim().to_string()
      }
      | _ => generic.to_string()
    }
  }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
  #[error("task title is required")]
  EmptyTitle,
  #[error("task {0} is not on the board")]
  CardNotFound(TaskId),
  #[error("no task is open in the modal")]
  NoOpenTask,
  #[error("modal is not in {expected} mode")]
  WrongMode { expected: &'static str },
  #[error(transparent)]
  Api(#[from] ApiError)
}
