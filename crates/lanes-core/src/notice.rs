/// Most recent toasts kept on screen.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Success,
  Error
}

impl NoticeKind {
  pub fn as_class(self) -> &'static str {
    match self {
      | Self::Success => "success",
      | Self::Error => "error"
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub id:      u64,
  pub kind:    NoticeKind,
  pub message: String
}

/// Transient status messages. Each one is
/// dismissed by the view after
/// `dismiss_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notices {
  next_id:    u64,
  items:      Vec<Notice>,
  dismiss_ms: u32
}

impl Notices {
  pub fn new(dismiss_ms: u32) -> Self {
    Self {
      next_id: 1,
      items: Vec::new(),
      dismiss_ms
    }
  }

  pub fn dismiss_ms(&self) -> u32 {
    self.dismiss_ms
  }

  pub fn items(&self) -> &[Notice] {
    &self.items
  }

  pub fn latest(&self) -> Option<&Notice> {
    self.items.last()
  }

  pub fn push(
    &mut self,
    kind: NoticeKind,
    message: impl Into<String>
  ) -> u64 {
    let id = self.next_id;
    self.next_id =
      self.next_id.wrapping_add(1);
    self.items.push(Notice {
      id,
      kind,
      message: message.into()
    });
    if self.items.len() > MAX_VISIBLE {
      let overflow =
        self.items.len() - MAX_VISIBLE;
      self.items.drain(..overflow);
    }
    id
  }

  pub fn success(
    &mut self,
    message: impl Into<String>
  ) -> u64 {
    self.push(NoticeKind::Success, message)
  }

  pub fn error(
    &mut self,
    message: impl Into<String>
  ) -> u64 {
    let message = message.into();
    tracing::warn!(%message, "error notice");
    self.push(NoticeKind::Error, message)
  }

  pub fn dismiss(&mut self, id: u64) -> bool {
    let before = self.items.len();
    self.items.retain(|notice| notice.id != id);
    before != self.items.len()
  }
}
