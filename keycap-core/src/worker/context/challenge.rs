use crate::config::Shortcut;
use crate::errors::{KeycapError, Result};

/// Progress through the shortcut dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Challenge {
    pub index: usize,
    /// Wrong answers for the current shortcut.
    pub attempts: u32,
    pub solved: u32,
    pub streak: u32,
}

impl Challenge {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Errors when there is nothing to practice.
    pub fn current<'a>(&self, shortcuts: &'a [Shortcut]) -> Result<&'a Shortcut> {
        if shortcuts.is_empty() {
            return Err(KeycapError::NoShortcuts);
        }
        Ok(&shortcuts[self.index % shortcuts.len()])
    }

    pub fn correct(&mut self, total: usize) {
        self.solved += 1;
        self.streak += 1;
        self.advance(total);
    }

    pub fn wrong(&mut self) {
        self.attempts += 1;
        self.streak = 0;
    }

    pub fn advance(&mut self, total: usize) {
        self.attempts = 0;
        if total > 0 {
            self.index = (self.index + 1) % total;
        }
    }
}
