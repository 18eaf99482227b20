//! Checklist completion rules and proof-photo validation.
//!
//! A checklist item marked `requires_photo` can only be completed while it
//! carries a proof reference, either one it already has or one uploaded for
//! this completion. Un-completing is always allowed and keeps the proof so the
//! evidence is not lost when a box is unticked by mistake.

#[cfg(test)]
#[path = "checklist_test.rs"]
mod checklist_test;

use crate::net::types::{ChecklistItem, Task, TaskStatus};

pub const MAX_PROOF_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChecklistError {
    #[error("\"{0}\" needs a photo before it can be completed")]
    ProofRequired(String),
    #[error("checklist item {0} not found")]
    UnknownItem(String),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProofFileError {
    #[error("the selected file is empty")]
    Empty,
    #[error("proof must be an image (got {0})")]
    NotAnImage(String),
    #[error("proof photo is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },
}

impl ChecklistItem {
    #[must_use]
    pub fn has_proof(&self) -> bool {
        self.proof_url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }

    /// Mark the item done or not done.
    ///
    /// # Errors
    ///
    /// [`ChecklistError::ProofRequired`] when completing a photo-required item
    /// with neither an existing nor a new proof. The item is left untouched.
    pub fn set_completed(&mut self, done: bool, new_proof: Option<&str>, by: &str, now: &str) -> Result<(), ChecklistError> {
        if !done {
            self.completed = false;
            self.completed_at = None;
            self.completed_by = None;
            return Ok(());
        }
        let new_proof = new_proof.map(str::trim).filter(|p| !p.is_empty());
        if self.requires_photo && new_proof.is_none() && !self.has_proof() {
            return Err(ChecklistError::ProofRequired(self.label.clone()));
        }
        if let Some(proof) = new_proof {
            self.proof_url = Some(proof.to_owned());
        }
        self.completed = true;
        self.completed_at = Some(now.to_owned());
        self.completed_by = Some(by.to_owned());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub done: usize,
    pub total: usize,
}

impl ChecklistProgress {
    /// Whole-number percentage; an empty checklist counts as complete.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.done * 100) / self.total) as u8
    }
}

#[must_use]
pub fn progress(items: &[ChecklistItem]) -> ChecklistProgress {
    ChecklistProgress { done: items.iter().filter(|i| i.completed).count(), total: items.len() }
}

/// Every item is done and every photo-required item has its proof.
#[must_use]
pub fn all_required_complete(items: &[ChecklistItem]) -> bool {
    items.iter().all(|i| i.completed && (!i.requires_photo || i.has_proof()))
}

/// Task status implied by its checklist.
#[must_use]
pub fn derived_status(items: &[ChecklistItem]) -> TaskStatus {
    let p = progress(items);
    if p.total > 0 && all_required_complete(items) {
        TaskStatus::Completed
    } else if p.done > 0 {
        TaskStatus::InProgress
    } else {
        TaskStatus::Pending
    }
}

/// Apply one checkbox change to `task` and refresh its status.
///
/// # Errors
///
/// [`ChecklistError::UnknownItem`] for a stale item id, otherwise whatever
/// [`ChecklistItem::set_completed`] rejects.
pub fn apply_toggle(
    task: &mut Task,
    item_id: &str,
    done: bool,
    new_proof: Option<&str>,
    by: &str,
    now: &str,
) -> Result<TaskStatus, ChecklistError> {
    let item = task
        .checklist
        .iter_mut()
        .find(|i| i.id == item_id)
        .ok_or_else(|| ChecklistError::UnknownItem(item_id.to_owned()))?;
    item.set_completed(done, new_proof, by, now)?;
    task.status = derived_status(&task.checklist);
    task.completed_at = (task.status == TaskStatus::Completed).then(|| now.to_owned());
    Ok(task.status)
}

/// Check a picked file before uploading it as proof.
///
/// # Errors
///
/// Empty files, non-image MIME types and files over [`MAX_PROOF_BYTES`].
pub fn validate_proof_file(mime: &str, size: u64) -> Result<(), ProofFileError> {
    if size == 0 {
        return Err(ProofFileError::Empty);
    }
    if !mime.trim().to_ascii_lowercase().starts_with("image/") {
        let shown = if mime.trim().is_empty() { "unknown type" } else { mime.trim() };
        return Err(ProofFileError::NotAnImage(shown.to_owned()));
    }
    if size > MAX_PROOF_BYTES {
        return Err(ProofFileError::TooLarge { size, max: MAX_PROOF_BYTES });
    }
    Ok(())
}
