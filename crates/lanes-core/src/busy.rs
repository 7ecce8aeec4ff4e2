use std::cell::Cell;
use std::rc::Rc;

use crate::controller::Notifier;

/// Global loading indicator. Counts
/// outstanding requests; visible while the
/// count is non-zero.
#[derive(Clone)]
pub struct Busy {
  outstanding: Rc<Cell<usize>>,
  notify:      Notifier
}

impl Busy {
  pub fn new(notify: Notifier) -> Self {
    Self {
      outstanding: Rc::new(Cell::new(0)),
      notify
    }
  }

  pub fn is_busy(&self) -> bool {
    self.outstanding.get() > 0
  }

  #[cfg(test)]
  fn outstanding(&self) -> usize {
    self.outstanding.get()
  }

  /// The indicator stays up until the
  /// returned guard is dropped, whichever
  /// way the request ends.
  #[must_use]
  pub fn begin(&self) -> BusyGuard {
    self.outstanding.set(
      self.outstanding.get() + 1
    );
    (self.notify)();
    BusyGuard { busy: self.clone() }
  }
}

pub struct BusyGuard {
  busy: Busy
}

impl Drop for BusyGuard {
  fn drop(&mut self) {
    let outstanding =
      &self.busy.outstanding;
    outstanding.set(
      outstanding.get().saturating_sub(1)
    );
    (self.busy.notify)();
  }
}
