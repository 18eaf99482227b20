//! Transient notification queue.
//!
//! Remote failures and confirmations land here; the toast host renders the
//! queue and dismisses each entry after [`TOAST_TTL_MS`]. The queue is bounded
//! so a failing poll loop cannot bury the screen.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

pub const MAX_TOASTS: usize = 5;
pub const TOAST_TTL_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
            Self::Info => "toast toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Append a toast, evicting the oldest beyond [`MAX_TOASTS`]. Returns the
    /// new toast's id for scheduling its dismissal. A repeat of the newest
    /// toast is collapsed into it and its id returned.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        if let Some(last) = self.items.last()
            && last.kind == kind
            && last.message == message
        {
            return last.id;
        }
        self.next_id += 1;
        self.items.push(Toast { id: self.next_id, kind, message });
        if self.items.len() > MAX_TOASTS {
            let excess = self.items.len() - MAX_TOASTS;
            self.items.drain(..excess);
        }
        self.next_id
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
