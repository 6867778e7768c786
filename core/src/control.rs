//! Trigger controls and the interactive prompt seam.
//!
//! A `Trigger` is the control that fires an action. While its operation is
//! in flight it is disabled and shows `BUSY_LABEL`; `engage` returns a guard
//! that restores it on drop, whatever the outcome.

use std::sync::atomic::{AtomicBool, Ordering};

pub const BUSY_LABEL: &str = "Processing...";

#[derive(Debug)]
pub struct Trigger {
    label: &'static str,
    busy: AtomicBool,
}

impl Trigger {
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            busy: AtomicBool::new(false),
        }
    }

    /// Enters loading state, or returns `None` if the control is already
    /// disabled by an operation in flight.
    pub fn engage(&self) -> Option<Loading<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Loading { trigger: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Text currently shown on the control.
    pub fn label(&self) -> &'static str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            self.label
        }
    }
}

/// Loading state of one trigger; dropping it re-enables the control.
#[derive(Debug)]
pub struct Loading<'a> {
    trigger: &'a Trigger,
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.trigger.busy.store(false, Ordering::Release);
    }
}

/// One trigger per action.
#[derive(Debug)]
pub struct Triggers {
    pub create_post: Trigger,
    pub create_user: Trigger,
    pub create_comment: Trigger,
    pub load_post: Trigger,
    pub update_post: Trigger,
    pub delete_post: Trigger,
}

impl Default for Triggers {
    fn default() -> Self {
        Self {
            create_post: Trigger::new("Create Post"),
            create_user: Trigger::new("Create User"),
            create_comment: Trigger::new("Add Comment"),
            load_post: Trigger::new("Load Post"),
            update_post: Trigger::new("Update Post"),
            delete_post: Trigger::new("Delete Post"),
        }
    }
}

/// Blocking user interaction: confirmations before destructive actions and
/// alerts for failures that need attention.
pub trait UserPrompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Answers every confirmation with a fixed value and logs alerts.
#[derive(Debug, Clone, Copy)]
pub struct AutoPrompt {
    pub answer: bool,
}

impl UserPrompt for AutoPrompt {
    fn confirm(&self, question: &str) -> bool {
        log::info!("{question} -> {}", if self.answer { "yes" } else { "no" });
        self.answer
    }

    fn alert(&self, message: &str) {
        log::warn!("{message}");
    }
}
