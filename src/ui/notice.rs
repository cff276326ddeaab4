//! Transient status notices shown in the footer.
//!
//! There is no queue: a new notice replaces whatever is on display and re-arms
//! the dismissal deadline, so the board always shows the outcome of the most
//! recent workflow. Dismissal is deadline-based and idempotent — ticking an
//! already-empty board does nothing, which is what makes superseding an older
//! notice safe without canceling anything.

use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};

/// How long a notice stays visible, measured from the most recent post.
pub const NOTICE_TTL: Duration = Duration::from_millis(3000);

/// Severity of a notice; drives the footer color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn style(&self) -> Style {
        match self {
            NoticeKind::Success => Style::default().fg(Color::Green),
            NoticeKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// A single visible notice plus the instant it stops being shown.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    deadline: Instant,
}

/// Holds at most one notice. All transitions take an explicit `now` so the
/// timing rules are testable without waiting out real timers.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    /// Replace the displayed notice and restart its lifetime. Last write
    /// wins on both content and deadline.
    pub fn post(&mut self, message: impl Into<String>, kind: NoticeKind, now: Instant) {
        self.current = Some(Notice {
            message: message.into(),
            kind,
            deadline: now + NOTICE_TTL,
        });
    }

    /// Hide the notice once its deadline has passed. Idempotent.
    pub fn tick(&mut self, now: Instant) {
        if let Some(notice) = &self.current {
            if now >= notice.deadline {
                self.current = None;
            }
        }
    }

    /// The notice currently on display, if any.
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
